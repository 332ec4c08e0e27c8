//! Recommendations CSV loader.

use std::fs::File;
use std::path::Path;

use csv::StringRecord;

use crate::data::{parse_date, parse_f64, LoadError};
use crate::schema::{self, validate_header};
use crate::table::{RecommendationRow, RecommendationTable};

/// Column positions resolved from the header row. `None` = column absent,
/// which loads as null for every row.
struct ColumnIndex {
    ticker: usize,
    date: Option<usize>,
    close: Option<usize>,
    stock_signal: Option<usize>,
    options_suggestion: Option<usize>,
    signal_strength: Option<usize>,
    rsi14: Option<usize>,
    vol20_annual: Option<usize>,
    bl_posterior: Option<usize>,
    bl_rank: Option<usize>,
    bl_tilt: Option<usize>,
    explanation: Option<usize>,
    mcp_recommendation: Option<usize>,
}

impl ColumnIndex {
    fn resolve(header: &StringRecord) -> Option<Self> {
        let find = |name: &str| header.iter().position(|h| h.trim() == name);
        Some(Self {
            ticker: find(schema::COL_TICKER)?,
            date: find(schema::COL_DATE),
            close: find(schema::COL_CLOSE),
            stock_signal: find(schema::COL_STOCK_SIGNAL),
            options_suggestion: find(schema::COL_OPTIONS_SUGGESTION),
            signal_strength: find(schema::COL_SIGNAL_STRENGTH),
            rsi14: find(schema::COL_RSI14),
            vol20_annual: find(schema::COL_VOL20_ANNUAL),
            bl_posterior: find(schema::COL_BL_POSTERIOR),
            bl_rank: find(schema::COL_BL_RANK),
            bl_tilt: find(schema::COL_BL_TILT),
            explanation: find(schema::COL_EXPLANATION),
            mcp_recommendation: find(schema::COL_MCP_RECOMMENDATION),
        })
    }
}

/// Load the recommendations table.
///
/// Fatal only when the file is unreadable or `Ticker` is missing from the
/// header. Rows with a blank ticker are degenerate and dropped; every
/// other data-quality issue coerces to null.
pub fn load_recommendations(path: &Path) -> Result<RecommendationTable, LoadError> {
    let file = File::open(path).map_err(|e| LoadError::io(path, e))?;
    let mut reader = csv::Reader::from_reader(file);

    let header = reader
        .headers()
        .map_err(|e| LoadError::csv(path, e))?
        .clone();
    let header_names: Vec<&str> = header.iter().collect();
    let validation = validate_header(&header_names);
    if !validation.is_valid {
        return Err(LoadError::Schema {
            path: path.display().to_string(),
            errors: validation.errors,
        });
    }

    // validate_header guarantees Ticker is present.
    let columns = ColumnIndex::resolve(&header).expect("required columns validated");

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| LoadError::csv(path, e))?;
        if let Some(row) = parse_row(&record, &columns) {
            rows.push(row);
        }
    }

    Ok(RecommendationTable::from_rows(rows))
}

fn parse_row(record: &StringRecord, columns: &ColumnIndex) -> Option<RecommendationRow> {
    let ticker = record.get(columns.ticker)?.trim().to_uppercase();
    if ticker.is_empty() {
        return None;
    }

    let cell = |idx: Option<usize>| idx.and_then(|i| record.get(i)).unwrap_or("");
    let text = |idx: Option<usize>| -> Option<String> {
        let value = cell(idx).trim();
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    };

    Some(RecommendationRow {
        ticker,
        date: parse_date(cell(columns.date)),
        close: parse_f64(cell(columns.close)),
        stock_signal: cell(columns.stock_signal).trim().to_string(),
        options_suggestion: cell(columns.options_suggestion).trim().to_string(),
        signal_strength: parse_f64(cell(columns.signal_strength)),
        rsi14: parse_f64(cell(columns.rsi14)),
        vol20_annual: parse_f64(cell(columns.vol20_annual)),
        bl_posterior_annual: parse_f64(cell(columns.bl_posterior)),
        bl_rank: parse_f64(cell(columns.bl_rank)),
        bl_tilt: text(columns.bl_tilt),
        explanation: text(columns.explanation),
        mcp_recommendation: text(columns.mcp_recommendation),
    })
}
