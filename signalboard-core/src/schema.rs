//! Column contract for the recommendations CSV.
//!
//! The upstream signal pipeline writes a header row with at least `Ticker`;
//! every other column is optional and loads as null for all rows when the
//! column is missing. Extra columns are ignored. This replaces the original
//! dashboard's "render whatever columns happen to exist" behavior with an
//! explicit required/optional split.

use serde::{Deserialize, Serialize};

pub const COL_TICKER: &str = "Ticker";
pub const COL_DATE: &str = "Date";
pub const COL_CLOSE: &str = "Close";
pub const COL_STOCK_SIGNAL: &str = "Stock_Signal";
pub const COL_OPTIONS_SUGGESTION: &str = "Options_Suggestion";
pub const COL_SIGNAL_STRENGTH: &str = "Signal_Strength";
pub const COL_RSI14: &str = "RSI14";
pub const COL_VOL20_ANNUAL: &str = "Vol20_ann";
pub const COL_BL_POSTERIOR: &str = "BL_Posterior_annual";
pub const COL_BL_RANK: &str = "BL_Rank";
pub const COL_BL_TILT: &str = "BL_Tilt";
pub const COL_EXPLANATION: &str = "Signal_Explanation";
pub const COL_MCP_RECOMMENDATION: &str = "MCP_Recommendation";

/// A single field in the recommendations schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaField {
    pub name: &'static str,
    pub required: bool,
}

/// The canonical recommendations schema, in display and export order.
pub const RECOMMENDATION_SCHEMA: &[SchemaField] = &[
    SchemaField { name: COL_TICKER, required: true },
    SchemaField { name: COL_DATE, required: false },
    SchemaField { name: COL_CLOSE, required: false },
    SchemaField { name: COL_STOCK_SIGNAL, required: false },
    SchemaField { name: COL_OPTIONS_SUGGESTION, required: false },
    SchemaField { name: COL_SIGNAL_STRENGTH, required: false },
    SchemaField { name: COL_RSI14, required: false },
    SchemaField { name: COL_VOL20_ANNUAL, required: false },
    SchemaField { name: COL_BL_POSTERIOR, required: false },
    SchemaField { name: COL_BL_RANK, required: false },
    SchemaField { name: COL_BL_TILT, required: false },
    SchemaField { name: COL_EXPLANATION, required: false },
    SchemaField { name: COL_MCP_RECOMMENDATION, required: false },
];

/// Result of header validation.
#[derive(Debug, Clone)]
pub struct SchemaValidation {
    pub is_valid: bool,
    /// Missing required columns — these make the file unloadable.
    pub errors: Vec<String>,
    /// Known optional columns absent from the file. Informational only.
    pub missing_optional: Vec<String>,
}

/// Validate a CSV header row against the recommendations schema.
///
/// Collects every problem in one pass so a bad file reports all missing
/// required columns at once instead of failing on the first.
pub fn validate_header(header: &[&str]) -> SchemaValidation {
    let mut errors = Vec::new();
    let mut missing_optional = Vec::new();

    for field in RECOMMENDATION_SCHEMA {
        let present = header.iter().any(|name| name.trim() == field.name);
        if !present {
            if field.required {
                errors.push(format!("missing required column '{}'", field.name));
            } else {
                missing_optional.push(field.name.to_string());
            }
        }
    }

    SchemaValidation {
        is_valid: errors.is_empty(),
        errors,
        missing_optional,
    }
}

/// The export/display column order.
pub fn column_names() -> Vec<&'static str> {
    RECOMMENDATION_SCHEMA.iter().map(|f| f.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_header_passes() {
        let header: Vec<&str> = column_names();
        let result = validate_header(&header);
        assert!(result.is_valid, "errors: {:?}", result.errors);
        assert!(result.missing_optional.is_empty());
    }

    #[test]
    fn missing_ticker_fails() {
        let header = vec![COL_DATE, COL_CLOSE, COL_STOCK_SIGNAL];
        let result = validate_header(&header);
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.contains("Ticker")));
    }

    #[test]
    fn missing_optional_reported_not_fatal() {
        let header = vec![COL_TICKER, COL_DATE, COL_STOCK_SIGNAL];
        let result = validate_header(&header);
        assert!(result.is_valid);
        assert!(result.missing_optional.contains(&COL_BL_RANK.to_string()));
        assert!(result.missing_optional.contains(&COL_MCP_RECOMMENDATION.to_string()));
    }

    #[test]
    fn extra_columns_ignored() {
        let mut header = column_names();
        header.push("Sector");
        header.push("Notes");
        let result = validate_header(&header);
        assert!(result.is_valid);
    }

    #[test]
    fn schema_has_thirteen_fields() {
        assert_eq!(RECOMMENDATION_SCHEMA.len(), 13);
        assert_eq!(
            RECOMMENDATION_SCHEMA.iter().filter(|f| f.required).count(),
            1
        );
    }
}
