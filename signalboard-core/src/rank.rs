//! Ranking views by Black–Litterman rank.
//!
//! Polarity is fixed by convention: lower `bl_rank` = stronger overweight
//! candidate. "Top" slices take the smallest ranks, "bottom" the largest.
//! Rows without a rank never qualify.

use crate::table::{RecommendationRow, RecommendationTable};

/// The `n` best overweight candidates (smallest `bl_rank`), ascending.
pub fn top_n(table: &RecommendationTable, n: usize) -> Vec<&RecommendationRow> {
    let mut ranked = ranked_rows(table);
    ranked.truncate(n);
    ranked
}

/// The `n` strongest underweight candidates (largest `bl_rank`), still
/// presented in ascending rank order, matching the dashboard's bottom
/// panel.
pub fn bottom_n(table: &RecommendationTable, n: usize) -> Vec<&RecommendationRow> {
    let ranked = ranked_rows(table);
    let start = ranked.len().saturating_sub(n);
    ranked[start..].to_vec()
}

/// Top-`n` by rank among rows satisfying a predicate (e.g. best CALL
/// ideas). Returns fewer than `n` when fewer qualify — no padding.
pub fn top_n_where<'a, F>(
    table: &'a RecommendationTable,
    predicate: F,
    n: usize,
) -> Vec<&'a RecommendationRow>
where
    F: Fn(&RecommendationRow) -> bool,
{
    let mut ranked: Vec<&RecommendationRow> = table
        .rows()
        .iter()
        .filter(|row| row.bl_rank.is_some() && predicate(row))
        .collect();
    sort_by_rank(&mut ranked);
    ranked.truncate(n);
    ranked
}

fn ranked_rows(table: &RecommendationTable) -> Vec<&RecommendationRow> {
    let mut ranked: Vec<&RecommendationRow> = table
        .rows()
        .iter()
        .filter(|row| row.bl_rank.is_some())
        .collect();
    sort_by_rank(&mut ranked);
    ranked
}

fn sort_by_rank(rows: &mut [&RecommendationRow]) {
    // Stable: equal ranks keep file order.
    rows.sort_by(|a, b| {
        a.bl_rank
            .partial_cmp(&b.bl_rank)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::RecommendationRow;

    fn row(ticker: &str, rank: Option<f64>, options: &str) -> RecommendationRow {
        RecommendationRow {
            options_suggestion: options.to_string(),
            bl_rank: rank,
            ..RecommendationRow::empty(ticker)
        }
    }

    fn sample_table() -> RecommendationTable {
        RecommendationTable::from_rows(vec![
            row("NVDA", Some(3.0), "CALL"),
            row("AAPL", Some(1.0), "CALL"),
            row("MSFT", Some(2.0), "PUT"),
            row("GOOG", None, "CALL"),
        ])
    }

    #[test]
    fn top_n_takes_smallest_ranks_ascending() {
        let table = sample_table();
        let top = top_n(&table, 2);
        let tickers: Vec<&str> = top.iter().map(|r| r.ticker.as_str()).collect();
        assert_eq!(tickers, ["AAPL", "MSFT"]);
    }

    #[test]
    fn bottom_n_takes_largest_ranks() {
        let table = sample_table();
        let bottom = bottom_n(&table, 2);
        let tickers: Vec<&str> = bottom.iter().map(|r| r.ticker.as_str()).collect();
        assert_eq!(tickers, ["MSFT", "NVDA"]);
    }

    #[test]
    fn null_rank_never_qualifies() {
        let table = sample_table();
        assert!(top_n(&table, 10).iter().all(|r| r.bl_rank.is_some()));
        assert!(bottom_n(&table, 10).iter().all(|r| r.bl_rank.is_some()));
    }

    #[test]
    fn fewer_than_n_returns_all_qualifying() {
        let table = sample_table();
        assert_eq!(top_n(&table, 10).len(), 3);
        let calls = top_n_where(&table, |r| r.options_suggestion == "CALL", 5);
        assert_eq!(calls.len(), 2);
    }

    #[test]
    fn top_n_where_filters_then_ranks() {
        let table = sample_table();
        let calls = top_n_where(&table, |r| r.options_suggestion == "CALL", 5);
        let tickers: Vec<&str> = calls.iter().map(|r| r.ticker.as_str()).collect();
        assert_eq!(tickers, ["AAPL", "NVDA"]);
    }

    #[test]
    fn empty_table_yields_empty_slices() {
        let table = RecommendationTable::from_rows(vec![]);
        assert!(top_n(&table, 5).is_empty());
        assert!(bottom_n(&table, 5).is_empty());
    }
}
