//! Keyword query resolver — the "Ask" feature.
//!
//! A fixed-priority chain of string-containment rules over the normalized
//! (uppercased, trimmed) query, first match wins. This is a plain rule
//! engine, not NLP: answers come only from the loaded table.
//!
//! Known limitation, preserved from the upstream design: the final rule
//! scans ticker symbols as raw substrings of the query in table discovery
//! order, without word-boundary matching. A short symbol that happens to
//! appear inside another ticker or an unrelated word will be matched
//! first.

use crate::rank::{top_n, top_n_where};
use crate::table::{RecommendationRow, RecommendationTable};

/// How many picks the keyword rules return.
pub const PICK_COUNT: usize = 5;

/// The resolver's answer. `NoTickerDetected` is a user-facing empty
/// result, never an error.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResponse<'a> {
    /// A ranked shortlist produced by one of the keyword rules.
    Picks {
        title: &'static str,
        rows: Vec<&'a RecommendationRow>,
    },
    /// A natural-language answer for one detected ticker.
    TickerAnswer {
        ticker: String,
        answer: String,
        row: &'a RecommendationRow,
    },
    NoTickerDetected,
}

/// Keyword intents, evaluated in order. First match wins, so a query
/// containing both "TOP 5" and a ticker resolves via the earlier rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Intent {
    BestCalls,
    BestPuts,
    TopFive,
}

const KEYWORD_RULES: &[(&[&str], Intent)] = &[
    (&["BEST CALL", "CALL IDEAS"], Intent::BestCalls),
    (&["BEST PUT", "PUT IDEAS"], Intent::BestPuts),
    (&["TOP 5"], Intent::TopFive),
];

/// Resolve a free-text query against the full (unfiltered) table.
pub fn resolve<'a>(table: &'a RecommendationTable, query: &str) -> QueryResponse<'a> {
    let normalized = query.trim().to_uppercase();

    for (keywords, intent) in KEYWORD_RULES {
        if keywords.iter().any(|kw| normalized.contains(kw)) {
            return run_intent(table, *intent);
        }
    }

    // Ticker scan, in table discovery order.
    for ticker in table.tickers() {
        if normalized.contains(ticker.as_str()) {
            if let Some(row) = table.latest_for(ticker) {
                return QueryResponse::TickerAnswer {
                    ticker: ticker.clone(),
                    answer: answer_for(row),
                    row,
                };
            }
        }
    }

    QueryResponse::NoTickerDetected
}

fn run_intent<'a>(table: &'a RecommendationTable, intent: Intent) -> QueryResponse<'a> {
    match intent {
        Intent::BestCalls => QueryResponse::Picks {
            title: "Best CALL ideas (top 5 by BL rank)",
            rows: top_n_where(table, |r| r.options_suggestion == "CALL", PICK_COUNT),
        },
        Intent::BestPuts => QueryResponse::Picks {
            title: "Best PUT ideas (top 5 by BL rank)",
            rows: top_n_where(table, |r| r.options_suggestion == "PUT", PICK_COUNT),
        },
        Intent::TopFive => QueryResponse::Picks {
            title: "Top 5 overall (by BL rank)",
            rows: top_n(table, PICK_COUNT),
        },
    }
}

/// The natural-language answer for one row: the precomputed
/// `mcp_recommendation` verbatim when present, else a templated sentence.
fn answer_for(row: &RecommendationRow) -> String {
    if let Some(answer) = &row.mcp_recommendation {
        return answer.clone();
    }
    let signal = if row.stock_signal.is_empty() {
        "HOLD"
    } else {
        row.stock_signal.as_str()
    };
    let options = if row.options_suggestion.is_empty() {
        "NO_TRADE"
    } else {
        row.options_suggestion.as_str()
    };
    format!(
        "For {}, the model suggests {signal} (options idea: {options}).",
        row.ticker
    )
}
