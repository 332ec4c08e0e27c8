//! Overview statistics for the dashboard's first tab.
//!
//! Computed over the currently filtered view, so the headline counts
//! track the sidebar filters.

use crate::table::RecommendationRow;

pub const HISTOGRAM_BINS: usize = 15;

/// Summary counts plus the BL posterior distribution histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct OverviewStats {
    /// Rows in the filtered view.
    pub shown: usize,
    pub buy_count: usize,
    pub sell_count: usize,
    /// Rows suggesting either a CALL or a PUT.
    pub option_idea_count: usize,
    /// Histogram of non-null `bl_posterior_annual`, `HISTOGRAM_BINS` bins
    /// over the observed range. Empty when no posteriors are present.
    pub posterior_bins: Vec<usize>,
    /// (min, max) of the observed posteriors backing the histogram.
    pub posterior_range: Option<(f64, f64)>,
}

impl OverviewStats {
    pub fn compute(rows: &[&RecommendationRow]) -> Self {
        let buy_count = rows.iter().filter(|r| r.stock_signal == "BUY").count();
        let sell_count = rows.iter().filter(|r| r.stock_signal == "SELL").count();
        let option_idea_count = rows
            .iter()
            .filter(|r| r.options_suggestion == "CALL" || r.options_suggestion == "PUT")
            .count();

        let posteriors: Vec<f64> = rows.iter().filter_map(|r| r.bl_posterior_annual).collect();
        let (posterior_bins, posterior_range) = histogram(&posteriors);

        Self {
            shown: rows.len(),
            buy_count,
            sell_count,
            option_idea_count,
            posterior_bins,
            posterior_range,
        }
    }
}

fn histogram(values: &[f64]) -> (Vec<usize>, Option<(f64, f64)>) {
    if values.is_empty() {
        return (Vec::new(), None);
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    let mut bins = vec![0usize; HISTOGRAM_BINS];
    if range < 1e-12 {
        // All values identical: everything lands in one bin.
        bins[0] = values.len();
        return (bins, Some((min, max)));
    }

    for &v in values {
        let frac = (v - min) / range;
        let bin = ((frac * HISTOGRAM_BINS as f64) as usize).min(HISTOGRAM_BINS - 1);
        bins[bin] += 1;
    }
    (bins, Some((min, max)))
}
