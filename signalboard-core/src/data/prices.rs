//! Wide-format close-price table loader.
//!
//! First column is the date index, every remaining column is one ticker.
//! Rows whose date fails to parse cannot be indexed and are dropped; rows
//! that are null across all tickers are dropped; nothing else is cleaned.

use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;

use crate::data::{parse_date, parse_f64, LoadError};

/// Date-indexed close prices, one column per ticker.
#[derive(Debug, Clone)]
pub struct ClosePriceTable {
    dates: Vec<NaiveDate>,
    tickers: Vec<String>,
    /// Row-major: `values[row][col]`, aligned to `dates` x `tickers`.
    values: Vec<Vec<Option<f64>>>,
}

impl ClosePriceTable {
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let file = File::open(path).map_err(|e| LoadError::io(path, e))?;
        let mut reader = csv::Reader::from_reader(file);

        let header = reader
            .headers()
            .map_err(|e| LoadError::csv(path, e))?
            .clone();
        if header.is_empty() {
            return Err(LoadError::Schema {
                path: path.display().to_string(),
                errors: vec!["price file has an empty header".to_string()],
            });
        }

        // Column 0 is the date index; its header name does not matter.
        let tickers: Vec<String> = header
            .iter()
            .skip(1)
            .map(|name| name.trim().to_uppercase())
            .collect();

        let mut dates = Vec::new();
        let mut values = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| LoadError::csv(path, e))?;
            let Some(date) = parse_date(record.get(0).unwrap_or("")) else {
                continue;
            };
            let row: Vec<Option<f64>> = (0..tickers.len())
                .map(|col| parse_f64(record.get(col + 1).unwrap_or("")))
                .collect();
            if row.iter().all(Option::is_none) {
                continue;
            }
            dates.push(date);
            values.push(row);
        }

        Ok(Self {
            dates,
            tickers,
            values,
        })
    }

    /// Build a table directly from parts. Used by tests and sample data.
    pub fn from_parts(
        dates: Vec<NaiveDate>,
        tickers: Vec<String>,
        values: Vec<Vec<Option<f64>>>,
    ) -> Self {
        debug_assert_eq!(dates.len(), values.len());
        Self {
            dates,
            tickers,
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn tickers(&self) -> &[String] {
        &self.tickers
    }

    pub fn has_ticker(&self, ticker: &str) -> bool {
        self.tickers.iter().any(|t| t == ticker)
    }

    /// The (date, price) series for one ticker, nulls retained.
    /// `None` when the ticker has no column — the drilldown chart is then
    /// simply omitted.
    pub fn series(&self, ticker: &str) -> Option<Vec<(NaiveDate, Option<f64>)>> {
        let col = self.tickers.iter().position(|t| t == ticker)?;
        Some(
            self.dates
                .iter()
                .zip(&self.values)
                .map(|(date, row)| (*date, row[col]))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_wide_table() {
        let file = write_csv(
            "Date,AAPL,MSFT\n\
             2024-06-03,195.5,420.1\n\
             2024-06-04,196.2,\n",
        );
        let table = ClosePriceTable::load(file.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.tickers(), ["AAPL", "MSFT"]);
        let series = table.series("MSFT").unwrap();
        assert_eq!(series[0].1, Some(420.1));
        assert_eq!(series[1].1, None);
    }

    #[test]
    fn all_null_rows_dropped() {
        let file = write_csv(
            "Date,AAPL,MSFT\n\
             2024-06-03,,\n\
             2024-06-04,196.2,421.0\n",
        );
        let table = ClosePriceTable::load(file.path()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(
            table.series("AAPL").unwrap()[0].0,
            NaiveDate::from_ymd_opt(2024, 6, 4).unwrap()
        );
    }

    #[test]
    fn unparseable_date_rows_dropped() {
        let file = write_csv(
            "Date,AAPL\n\
             not-a-date,195.5\n\
             2024-06-04,196.2\n",
        );
        let table = ClosePriceTable::load(file.path()).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn unknown_ticker_has_no_series() {
        let file = write_csv("Date,AAPL\n2024-06-03,195.5\n");
        let table = ClosePriceTable::load(file.path()).unwrap();
        assert!(table.series("NVDA").is_none());
        assert!(table.has_ticker("AAPL"));
        assert!(!table.has_ticker("NVDA"));
    }

    #[test]
    fn timestamp_index_parses() {
        let file = write_csv("Date,AAPL\n2024-06-03 00:00:00,195.5\n");
        let table = ClosePriceTable::load(file.path()).unwrap();
        assert_eq!(table.len(), 1);
    }
}
