//! Loaders for the two input tables.
//!
//! Both files are read exactly once per session. Data-quality problems
//! degrade gracefully (bad dates become null, blank cells become null,
//! degenerate rows are dropped); only an unreadable file or a header
//! missing a required column is fatal.

mod prices;
mod recommendations;

pub use prices::ClosePriceTable;
pub use recommendations::load_recommendations;

use chrono::NaiveDate;
use std::path::Path;

/// Loading the two tables can fail only at the file/header level.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in {path}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("invalid header in {path}: {}", .errors.join("; "))]
    Schema { path: String, errors: Vec<String> },
}

impl LoadError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        LoadError::Io {
            path: path.display().to_string(),
            source,
        }
    }

    pub(crate) fn csv(path: &Path, source: csv::Error) -> Self {
        LoadError::Csv {
            path: path.display().to_string(),
            source,
        }
    }
}

/// Lenient date parsing: ISO date, or the date prefix of an ISO datetime.
/// Anything else becomes `None` — never a load failure.
pub(crate) fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }
    // Timestamp-style index ("2024-06-03 00:00:00"): take the date part.
    trimmed
        .get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

/// Blank or unparseable numeric cells become `None`.
pub(crate) fn parse_f64(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}
