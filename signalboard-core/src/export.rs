//! CSV export of the recommendations table.
//!
//! Same row/column shape as the in-memory table: the schema's column
//! order, a header row, empty cells for nulls, dates as YYYY-MM-DD.

use std::path::Path;

use anyhow::{Context, Result};

use crate::schema;
use crate::table::RecommendationRow;

/// Serialize a view (filtered or full) to CSV text.
pub fn export_csv(rows: &[&RecommendationRow]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(schema::column_names())?;

    for row in rows {
        let date = opt_date(row);
        let close = opt_num(row.close);
        let strength = opt_num(row.signal_strength);
        let rsi = opt_num(row.rsi14);
        let vol = opt_num(row.vol20_annual);
        let posterior = opt_num(row.bl_posterior_annual);
        let rank = opt_num(row.bl_rank);
        wtr.write_record([
            row.ticker.as_str(),
            date.as_str(),
            close.as_str(),
            row.stock_signal.as_str(),
            row.options_suggestion.as_str(),
            strength.as_str(),
            rsi.as_str(),
            vol.as_str(),
            posterior.as_str(),
            rank.as_str(),
            row.bl_tilt.as_deref().unwrap_or(""),
            row.explanation.as_deref().unwrap_or(""),
            row.mcp_recommendation.as_deref().unwrap_or(""),
        ])?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Write a view to a file.
pub fn write_csv(rows: &[&RecommendationRow], path: &Path) -> Result<()> {
    let csv = export_csv(rows)?;
    std::fs::write(path, csv)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

fn opt_date(row: &RecommendationRow) -> String {
    row.date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn opt_num(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::load_recommendations;
    use crate::table::RecommendationRow;
    use chrono::NaiveDate;

    fn sample_row() -> RecommendationRow {
        RecommendationRow {
            date: NaiveDate::from_ymd_opt(2024, 6, 3),
            close: Some(195.5),
            stock_signal: "BUY".to_string(),
            options_suggestion: "CALL".to_string(),
            bl_rank: Some(1.0),
            bl_tilt: Some("OVERWEIGHT".to_string()),
            ..RecommendationRow::empty("AAPL")
        }
    }

    #[test]
    fn header_matches_schema_order() {
        let csv = export_csv(&[]).unwrap();
        let header = csv.lines().next().unwrap();
        assert_eq!(header, schema::column_names().join(","));
    }

    #[test]
    fn nulls_export_as_empty_cells() {
        let row = RecommendationRow::empty("NVDA");
        let csv = export_csv(&[&row]).unwrap();
        let data = csv.lines().nth(1).unwrap();
        assert!(data.starts_with("NVDA,,"));
    }

    #[test]
    fn values_export_in_place() {
        let row = sample_row();
        let csv = export_csv(&[&row]).unwrap();
        let data = csv.lines().nth(1).unwrap();
        assert!(data.contains("2024-06-03"));
        assert!(data.contains("195.5"));
        assert!(data.contains("OVERWEIGHT"));
    }

    #[test]
    fn export_round_trips_through_loader() {
        let row = sample_row();
        let csv = export_csv(&[&row]).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.csv");
        std::fs::write(&path, csv).unwrap();

        let table = load_recommendations(&path).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(&table.rows()[0], &row);
    }
}
