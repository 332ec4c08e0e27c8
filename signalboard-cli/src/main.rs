//! SignalBoard CLI — headless access to the recommendation datasets.
//!
//! Commands:
//! - `summary` — headline counts and the BL posterior distribution
//! - `top` — best (or worst, with --bottom) BL-ranked tickers
//! - `ask` — run a keyword query against the table
//! - `export` — write the filtered (or full) table to CSV

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};

use signalboard_core::data::load_recommendations;
use signalboard_core::filter::{filter_and_sort, FilterCriteria};
use signalboard_core::overview::OverviewStats;
use signalboard_core::query::{resolve, QueryResponse};
use signalboard_core::rank::{bottom_n, top_n};
use signalboard_core::table::{RecommendationRow, RecommendationTable, SortKey};
use signalboard_core::{export, DashboardContext};

#[derive(Parser)]
#[command(
    name = "signalboard",
    about = "SignalBoard CLI — query precomputed trading signal recommendations"
)]
struct Cli {
    /// Recommendations CSV path.
    #[arg(long, global = true, default_value = "recommendations.csv")]
    recommendations: PathBuf,

    /// Close prices CSV path.
    #[arg(long, global = true, default_value = "close_prices.csv")]
    prices: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print headline counts and the BL posterior distribution.
    Summary,
    /// Print the best BL-ranked tickers (lowest rank numbers).
    Top {
        /// How many tickers to show.
        #[arg(long, default_value_t = 5)]
        n: usize,

        /// Show the worst-ranked tickers instead.
        #[arg(long, default_value_t = false)]
        bottom: bool,

        /// Emit the picks as JSON instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Run a keyword query (ticker symbol, "best call ideas", "top 5", ...).
    Ask {
        /// The question. Quotes are only needed for multi-word queries.
        #[arg(required = true)]
        query: Vec<String>,

        /// Emit the response as JSON instead of text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Write the filtered (or full) recommendations table to CSV.
    Export {
        /// Export every row, ignoring the filter flags.
        #[arg(long, default_value_t = false)]
        full: bool,

        /// Output path. Defaults to filtered_recommendations.csv
        /// (full_recommendations.csv with --full).
        #[arg(long)]
        out: Option<PathBuf>,

        /// Ticker substring filter, case-insensitive.
        #[arg(long)]
        search: Option<String>,

        /// Keep only these stock signals (repeatable).
        #[arg(long)]
        signal: Vec<String>,

        /// Keep only these options suggestions (repeatable).
        #[arg(long)]
        options: Vec<String>,

        /// Keep only these BL tilts (repeatable; "null" keeps untilted rows).
        #[arg(long)]
        tilt: Vec<String>,

        /// Sort column (CSV header name, e.g. BL_Rank or Close).
        #[arg(long)]
        sort: Option<String>,

        /// Sort descending (only meaningful with --sort).
        #[arg(long, default_value_t = false)]
        desc: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Summary => run_summary(&cli.recommendations, &cli.prices),
        Commands::Top { n, bottom, json } => run_top(&cli.recommendations, n, bottom, json),
        Commands::Ask { query, json } => run_ask(&cli.recommendations, &query.join(" "), json),
        Commands::Export {
            full,
            out,
            search,
            signal,
            options,
            tilt,
            sort,
            desc,
        } => run_export(
            &cli.recommendations,
            ExportOptions {
                full,
                out,
                search,
                signal,
                options,
                tilt,
                sort,
                desc,
            },
        ),
    }
}

fn run_summary(rec_path: &Path, prices_path: &Path) -> Result<()> {
    let ctx = DashboardContext::load(rec_path, prices_path)?;
    let table = &ctx.recommendations;
    let refs: Vec<&RecommendationRow> = table.rows().iter().collect();
    let stats = OverviewStats::compute(&refs);

    let with_prices = table
        .tickers()
        .iter()
        .filter(|t| ctx.prices.has_ticker(t))
        .count();

    println!("Recommendations: {}", rec_path.display());
    println!("Close prices:    {}", prices_path.display());
    println!();
    println!("{:<16} {}", "Rows:", stats.shown);
    println!("{:<16} {}", "BUY signals:", stats.buy_count);
    println!("{:<16} {}", "SELL signals:", stats.sell_count);
    println!("{:<16} {}", "Option ideas:", stats.option_idea_count);
    println!(
        "{:<16} {} of {} tickers",
        "Price history:",
        with_prices,
        table.tickers().len()
    );
    println!();
    println!("{:<16} {}", "Signals:", join_or_dash(table.signal_values()));
    println!("{:<16} {}", "Options:", join_or_dash(table.options_values()));
    println!("{:<16} {}", "Tilts:", join_or_dash(table.tilt_values()));

    if let Some((min, max)) = stats.posterior_range {
        println!();
        println!("BL posterior distribution ({min:.4} to {max:.4}):");
        let max_count = stats.posterior_bins.iter().copied().max().unwrap_or(1).max(1);
        let width = (max - min) / stats.posterior_bins.len() as f64;
        for (i, &count) in stats.posterior_bins.iter().enumerate() {
            let lo = min + i as f64 * width;
            let bar = "#".repeat(count * 40 / max_count);
            println!("  {lo:>8.4}  {bar} {count}");
        }
    }

    Ok(())
}

fn run_top(rec_path: &Path, n: usize, bottom: bool, json: bool) -> Result<()> {
    let table = load_recommendations(rec_path)?;
    let picks = if bottom {
        bottom_n(&table, n)
    } else {
        top_n(&table, n)
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&picks)?);
        return Ok(());
    }

    if picks.is_empty() {
        println!("No rows carry a BL rank.");
        return Ok(());
    }

    println!(
        "{:<6} {:<7} {:<7} {:<9} {:>10}  {}",
        "Rank", "Ticker", "Signal", "Options", "Posterior", "Explanation"
    );
    println!("{}", "-".repeat(70));
    for row in picks {
        println!(
            "{:<6} {:<7} {:<7} {:<9} {:>10}  {}",
            row.bl_rank.map(|r| format!("{r:.0}")).unwrap_or_default(),
            row.ticker,
            blank_dash(&row.stock_signal),
            blank_dash(&row.options_suggestion),
            row.bl_posterior_annual
                .map(|v| format!("{v:+.4}"))
                .unwrap_or_else(|| "-".to_string()),
            row.explanation.as_deref().unwrap_or(""),
        );
    }

    Ok(())
}

fn run_ask(rec_path: &Path, query: &str, json: bool) -> Result<()> {
    let table = load_recommendations(rec_path)?;

    if json {
        let value = match resolve(&table, query) {
            QueryResponse::Picks { title, rows } => serde_json::json!({
                "kind": "picks",
                "title": title,
                "rows": rows,
            }),
            QueryResponse::TickerAnswer { ticker, answer, row } => serde_json::json!({
                "kind": "answer",
                "ticker": ticker,
                "answer": answer,
                "row": row,
            }),
            QueryResponse::NoTickerDetected => serde_json::json!({
                "kind": "no_ticker_detected",
            }),
        };
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    match resolve(&table, query) {
        QueryResponse::Picks { title, rows } => {
            println!("{title}");
            for row in rows {
                println!(
                    "  {:<7} {:<7} {}",
                    row.ticker,
                    blank_dash(&row.stock_signal),
                    row.bl_posterior_annual
                        .map(|v| format!("{v:+.4}"))
                        .unwrap_or_else(|| "-".to_string()),
                );
            }
        }
        QueryResponse::TickerAnswer { ticker, answer, row } => {
            println!("{ticker}: {answer}");
            if let Some(date) = row.date {
                println!("  as of {date}");
            }
        }
        QueryResponse::NoTickerDetected => {
            println!("No ticker or keyword recognized in the query.");
            println!("Try a ticker symbol, \"best call ideas\", \"best put ideas\" or \"top 5\".");
        }
    }

    Ok(())
}

struct ExportOptions {
    full: bool,
    out: Option<PathBuf>,
    search: Option<String>,
    signal: Vec<String>,
    options: Vec<String>,
    tilt: Vec<String>,
    sort: Option<String>,
    desc: bool,
}

fn run_export(rec_path: &Path, opts: ExportOptions) -> Result<()> {
    let table = load_recommendations(rec_path)?;

    let out = opts.out.clone().unwrap_or_else(|| {
        PathBuf::from(if opts.full {
            "full_recommendations.csv"
        } else {
            "filtered_recommendations.csv"
        })
    });

    let rows: Vec<&RecommendationRow> = if opts.full {
        table.rows().iter().collect()
    } else {
        let criteria = build_criteria(&table, &opts)?;
        filter_and_sort(&table, &criteria)
    };

    export::write_csv(&rows, &out)?;
    println!("Exported {} rows to {}", rows.len(), out.display());
    Ok(())
}

/// Translate the export flags into filter criteria, starting from the
/// identity view.
fn build_criteria(table: &RecommendationTable, opts: &ExportOptions) -> Result<FilterCriteria> {
    let mut criteria = FilterCriteria::default_for(table);

    if let Some(search) = &opts.search {
        criteria.search = search.clone();
    }
    if !opts.signal.is_empty() {
        criteria.signals = opts.signal.iter().cloned().collect();
    }
    if !opts.options.is_empty() {
        criteria.options = opts.options.iter().cloned().collect();
    }
    if !opts.tilt.is_empty() {
        criteria.include_null_tilt = opts.tilt.iter().any(|t| t.eq_ignore_ascii_case("null"));
        criteria.tilts = opts
            .tilt
            .iter()
            .filter(|t| !t.eq_ignore_ascii_case("null"))
            .cloned()
            .collect();
    }
    if let Some(name) = &opts.sort {
        let Some(key) = SortKey::from_name(name) else {
            let valid: Vec<&str> = SortKey::ALL.iter().map(|k| k.label()).collect();
            bail!("unknown sort column '{name}'. Valid: {}", valid.join(", "));
        };
        criteria.sort_key = key;
        criteria.descending = opts.desc;
    }

    Ok(criteria)
}

fn join_or_dash(values: &[String]) -> String {
    if values.is_empty() {
        "-".to_string()
    } else {
        values
            .iter()
            .map(|v| if v.is_empty() { "(blank)" } else { v.as_str() })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn blank_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}
