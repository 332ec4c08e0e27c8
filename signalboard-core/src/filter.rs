//! Filter/sort engine over the recommendations table.
//!
//! A row survives the conjunction of three category-membership filters
//! plus an optional ticker substring, then the view is stably sorted by a
//! single key. Pure function of its inputs; an empty result is a valid
//! terminal state, not an error.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::table::{RecommendationRow, RecommendationTable, SortKey};

/// User-selected filter and sort state.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    /// Ticker substring, matched case-insensitively after trimming.
    /// Empty = no substring filter.
    pub search: String,
    pub signals: BTreeSet<String>,
    pub options: BTreeSet<String>,
    pub tilts: BTreeSet<String>,
    /// Whether rows with a null `bl_tilt` pass the tilt filter.
    pub include_null_tilt: bool,
    pub sort_key: SortKey,
    pub descending: bool,
}

impl FilterCriteria {
    /// The default criteria: every observed category selected, null tilts
    /// included, sorted by BL posterior descending. With these the
    /// filtered view equals the full table.
    pub fn default_for(table: &RecommendationTable) -> Self {
        Self {
            search: String::new(),
            signals: table.signal_values().iter().cloned().collect(),
            options: table.options_values().iter().cloned().collect(),
            tilts: table.tilt_values().iter().cloned().collect(),
            include_null_tilt: true,
            sort_key: SortKey::BlPosterior,
            descending: true,
        }
    }

    pub fn matches(&self, row: &RecommendationRow) -> bool {
        if !self.signals.contains(&row.stock_signal) {
            return false;
        }
        if !self.options.contains(&row.options_suggestion) {
            return false;
        }
        match &row.bl_tilt {
            Some(tilt) => {
                if !self.tilts.contains(tilt) {
                    return false;
                }
            }
            None => {
                if !self.include_null_tilt {
                    return false;
                }
            }
        }
        let needle = self.search.trim().to_uppercase();
        if !needle.is_empty() && !row.ticker.to_uppercase().contains(&needle) {
            return false;
        }
        true
    }
}

/// Apply the criteria and return a sorted borrowed view.
///
/// The sort is stable; rows whose sort key is null go last in both
/// directions so repeated queries are deterministic.
pub fn filter_and_sort<'a>(
    table: &'a RecommendationTable,
    criteria: &FilterCriteria,
) -> Vec<&'a RecommendationRow> {
    let mut view: Vec<&RecommendationRow> = table
        .rows()
        .iter()
        .filter(|row| criteria.matches(row))
        .collect();

    view.sort_by(|a, b| compare_rows(a, b, criteria.sort_key, criteria.descending));
    view
}

fn compare_rows(
    a: &RecommendationRow,
    b: &RecommendationRow,
    key: SortKey,
    descending: bool,
) -> Ordering {
    match (key.value(a), key.value(b)) {
        (Some(x), Some(y)) => {
            let ord = x.partial_cmp(&y).unwrap_or(Ordering::Equal);
            if descending {
                ord.reverse()
            } else {
                ord
            }
        }
        // Nulls last regardless of direction.
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::RecommendationRow;

    fn row(ticker: &str, signal: &str, posterior: Option<f64>) -> RecommendationRow {
        RecommendationRow {
            stock_signal: signal.to_string(),
            options_suggestion: "CALL".to_string(),
            bl_posterior_annual: posterior,
            ..RecommendationRow::empty(ticker)
        }
    }

    fn sample_table() -> RecommendationTable {
        RecommendationTable::from_rows(vec![
            row("AAPL", "BUY", Some(0.12)),
            row("MSFT", "HOLD", Some(0.05)),
            row("NVDA", "SELL", None),
            row("GOOG", "BUY", Some(0.09)),
        ])
    }

    #[test]
    fn default_criteria_is_identity() {
        let table = sample_table();
        let criteria = FilterCriteria::default_for(&table);
        let view = filter_and_sort(&table, &criteria);
        assert_eq!(view.len(), table.len());
    }

    #[test]
    fn signal_filter_is_conjunction() {
        let table = sample_table();
        let mut criteria = FilterCriteria::default_for(&table);
        criteria.signals = ["BUY".to_string()].into_iter().collect();
        let view = filter_and_sort(&table, &criteria);
        assert_eq!(view.len(), 2);
        assert!(view.iter().all(|r| r.stock_signal == "BUY"));
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let table = sample_table();
        let mut criteria = FilterCriteria::default_for(&table);
        criteria.search = " aa ".to_string();
        let view = filter_and_sort(&table, &criteria);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].ticker, "AAPL");
    }

    #[test]
    fn null_tilt_excluded_when_flag_off() {
        let mut with_tilt = row("AAPL", "BUY", Some(0.1));
        with_tilt.bl_tilt = Some("OVERWEIGHT".to_string());
        let without_tilt = row("MSFT", "BUY", Some(0.2));
        let table = RecommendationTable::from_rows(vec![with_tilt, without_tilt]);

        let mut criteria = FilterCriteria::default_for(&table);
        criteria.include_null_tilt = false;
        let view = filter_and_sort(&table, &criteria);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].ticker, "AAPL");
    }

    #[test]
    fn nulls_sort_last_both_directions() {
        let table = sample_table();
        let mut criteria = FilterCriteria::default_for(&table);

        criteria.descending = true;
        let view = filter_and_sort(&table, &criteria);
        assert_eq!(view.last().unwrap().ticker, "NVDA");
        assert_eq!(view[0].ticker, "AAPL");

        criteria.descending = false;
        let view = filter_and_sort(&table, &criteria);
        assert_eq!(view.last().unwrap().ticker, "NVDA");
        assert_eq!(view[0].ticker, "MSFT");
    }

    #[test]
    fn equal_keys_keep_input_order() {
        let table = RecommendationTable::from_rows(vec![
            row("AAA", "BUY", Some(0.1)),
            row("BBB", "BUY", Some(0.1)),
            row("CCC", "BUY", Some(0.1)),
        ]);
        let mut criteria = FilterCriteria::default_for(&table);
        for descending in [false, true] {
            criteria.descending = descending;
            let view = filter_and_sort(&table, &criteria);
            let tickers: Vec<&str> = view.iter().map(|r| r.ticker.as_str()).collect();
            assert_eq!(tickers, ["AAA", "BBB", "CCC"]);
        }
    }

    #[test]
    fn empty_result_is_valid() {
        let table = sample_table();
        let mut criteria = FilterCriteria::default_for(&table);
        criteria.search = "ZZZ".to_string();
        let view = filter_and_sort(&table, &criteria);
        assert!(view.is_empty());
    }
}
