//! Recommendation rows and the in-memory table.
//!
//! Categorical columns (`stock_signal`, `options_suggestion`, `bl_tilt`)
//! are opaque strings — the value sets are discovered from the data at
//! load time, not a closed enum.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One row of the recommendations table: a (ticker, as-of date) snapshot.
///
/// Every field except `ticker` may be absent; blank CSV cells and
/// unparseable dates load as `None` (or as an empty category string for
/// the two always-present categoricals).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRow {
    pub ticker: String,
    pub date: Option<NaiveDate>,
    pub close: Option<f64>,
    pub stock_signal: String,
    pub options_suggestion: String,
    pub signal_strength: Option<f64>,
    pub rsi14: Option<f64>,
    pub vol20_annual: Option<f64>,
    pub bl_posterior_annual: Option<f64>,
    pub bl_rank: Option<f64>,
    pub bl_tilt: Option<String>,
    pub explanation: Option<String>,
    pub mcp_recommendation: Option<String>,
}

impl RecommendationRow {
    /// A row with only a ticker set. Used by loaders and tests.
    pub fn empty(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            date: None,
            close: None,
            stock_signal: String::new(),
            options_suggestion: String::new(),
            signal_strength: None,
            rsi14: None,
            vol20_annual: None,
            bl_posterior_annual: None,
            bl_rank: None,
            bl_tilt: None,
            explanation: None,
            mcp_recommendation: None,
        }
    }
}

/// Sortable columns of the recommendations table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKey {
    BlPosterior,
    BlRank,
    SignalStrength,
    Rsi14,
    Vol20,
    Close,
    Date,
}

impl SortKey {
    pub const ALL: &'static [SortKey] = &[
        SortKey::BlPosterior,
        SortKey::BlRank,
        SortKey::SignalStrength,
        SortKey::Rsi14,
        SortKey::Vol20,
        SortKey::Close,
        SortKey::Date,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SortKey::BlPosterior => "BL_Posterior_annual",
            SortKey::BlRank => "BL_Rank",
            SortKey::SignalStrength => "Signal_Strength",
            SortKey::Rsi14 => "RSI14",
            SortKey::Vol20 => "Vol20_ann",
            SortKey::Close => "Close",
            SortKey::Date => "Date",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| {
            k.label().eq_ignore_ascii_case(name)
        })
    }

    /// Cycle to the next sort key (UI `s` key).
    pub fn next(self) -> SortKey {
        let idx = Self::ALL.iter().position(|&k| k == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Numeric sort value for a row. `None` values sort last.
    pub fn value(self, row: &RecommendationRow) -> Option<f64> {
        match self {
            SortKey::BlPosterior => row.bl_posterior_annual,
            SortKey::BlRank => row.bl_rank,
            SortKey::SignalStrength => row.signal_strength,
            SortKey::Rsi14 => row.rsi14,
            SortKey::Vol20 => row.vol20_annual,
            SortKey::Close => row.close,
            SortKey::Date => row.date.map(|d| d.num_days_from_ce() as f64),
        }
    }
}

/// The recommendations table plus its load-time discovered category sets.
///
/// Immutable for the session: every downstream view borrows rows, nothing
/// mutates them.
#[derive(Debug, Clone)]
pub struct RecommendationTable {
    rows: Vec<RecommendationRow>,
    signal_values: Vec<String>,
    options_values: Vec<String>,
    tilt_values: Vec<String>,
    tickers: Vec<String>,
}

impl RecommendationTable {
    pub fn from_rows(rows: Vec<RecommendationRow>) -> Self {
        let mut signal_values: Vec<String> = Vec::new();
        let mut options_values: Vec<String> = Vec::new();
        let mut tilt_values: Vec<String> = Vec::new();
        // Discovery (file) order — the query resolver depends on it.
        let mut tickers: Vec<String> = Vec::new();

        for row in &rows {
            if !signal_values.contains(&row.stock_signal) {
                signal_values.push(row.stock_signal.clone());
            }
            if !options_values.contains(&row.options_suggestion) {
                options_values.push(row.options_suggestion.clone());
            }
            if let Some(tilt) = &row.bl_tilt {
                if !tilt_values.contains(tilt) {
                    tilt_values.push(tilt.clone());
                }
            }
            if !tickers.contains(&row.ticker) {
                tickers.push(row.ticker.clone());
            }
        }

        signal_values.sort();
        options_values.sort();
        tilt_values.sort();

        Self {
            rows,
            signal_values,
            options_values,
            tilt_values,
            tickers,
        }
    }

    pub fn rows(&self) -> &[RecommendationRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct `stock_signal` values, sorted.
    pub fn signal_values(&self) -> &[String] {
        &self.signal_values
    }

    /// Distinct `options_suggestion` values, sorted.
    pub fn options_values(&self) -> &[String] {
        &self.options_values
    }

    /// Distinct non-null `bl_tilt` values, sorted.
    pub fn tilt_values(&self) -> &[String] {
        &self.tilt_values
    }

    /// Ticker symbols in file discovery order, deduplicated.
    pub fn tickers(&self) -> &[String] {
        &self.tickers
    }

    /// The most recently dated row for a ticker.
    ///
    /// Rows with a parseable date beat null-dated rows; among equals the
    /// earliest row in file order wins.
    pub fn latest_for(&self, ticker: &str) -> Option<&RecommendationRow> {
        let mut best: Option<&RecommendationRow> = None;
        for row in self.rows.iter().filter(|r| r.ticker == ticker) {
            best = match best {
                None => Some(row),
                Some(current) => {
                    if row.date > current.date {
                        Some(row)
                    } else {
                        Some(current)
                    }
                }
            };
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(ticker: &str, signal: &str, tilt: Option<&str>) -> RecommendationRow {
        RecommendationRow {
            stock_signal: signal.to_string(),
            bl_tilt: tilt.map(String::from),
            ..RecommendationRow::empty(ticker)
        }
    }

    #[test]
    fn category_sets_discovered_and_sorted() {
        let table = RecommendationTable::from_rows(vec![
            row("NVDA", "SELL", Some("UNDERWEIGHT")),
            row("AAPL", "BUY", Some("OVERWEIGHT")),
            row("MSFT", "BUY", None),
        ]);
        assert_eq!(table.signal_values(), ["BUY", "SELL"]);
        assert_eq!(table.tilt_values(), ["OVERWEIGHT", "UNDERWEIGHT"]);
    }

    #[test]
    fn tickers_keep_discovery_order() {
        let table = RecommendationTable::from_rows(vec![
            row("NVDA", "BUY", None),
            row("AAPL", "BUY", None),
            row("NVDA", "SELL", None),
        ]);
        assert_eq!(table.tickers(), ["NVDA", "AAPL"]);
    }

    #[test]
    fn latest_for_prefers_dated_rows() {
        let mut undated = row("AAPL", "HOLD", None);
        undated.close = Some(1.0);
        let mut old = row("AAPL", "BUY", None);
        old.date = NaiveDate::from_ymd_opt(2024, 1, 2);
        let mut new = row("AAPL", "SELL", None);
        new.date = NaiveDate::from_ymd_opt(2024, 6, 2);

        let table = RecommendationTable::from_rows(vec![undated, new, old]);
        let latest = table.latest_for("AAPL").unwrap();
        assert_eq!(latest.stock_signal, "SELL");
        assert!(table.latest_for("ZZZZ").is_none());
    }

    #[test]
    fn latest_for_ties_keep_file_order() {
        let mut a = row("AAPL", "BUY", None);
        a.date = NaiveDate::from_ymd_opt(2024, 6, 2);
        let mut b = row("AAPL", "SELL", None);
        b.date = NaiveDate::from_ymd_opt(2024, 6, 2);
        let table = RecommendationTable::from_rows(vec![a, b]);
        assert_eq!(table.latest_for("AAPL").unwrap().stock_signal, "BUY");
    }

    #[test]
    fn sort_key_cycles_through_all() {
        let mut key = SortKey::BlPosterior;
        for _ in 0..SortKey::ALL.len() {
            key = key.next();
        }
        assert_eq!(key, SortKey::BlPosterior);
    }

    #[test]
    fn sort_key_from_name_is_case_insensitive() {
        assert_eq!(SortKey::from_name("bl_rank"), Some(SortKey::BlRank));
        assert_eq!(SortKey::from_name("RSI14"), Some(SortKey::Rsi14));
        assert_eq!(SortKey::from_name("nope"), None);
    }
}
