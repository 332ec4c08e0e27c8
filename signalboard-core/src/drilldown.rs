//! Ticker drilldown: trailing moving averages over the close series.
//!
//! The price series is stripped of null entries first, so a window of `w`
//! covers the `w` most recent trading days with a price, not `w` calendar
//! days. No partial-window averages and no forward fill — positions with
//! fewer than `w` observations behind them are `None`.

use chrono::NaiveDate;

use crate::data::ClosePriceTable;

pub const MA_SHORT: usize = 20;
pub const MA_LONG: usize = 50;

/// One observed (dated, non-null) close price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// Derived drilldown series for one ticker, all aligned to the stripped
/// date index.
#[derive(Debug, Clone)]
pub struct TickerDrilldown {
    pub ticker: String,
    pub points: Vec<PricePoint>,
    pub ma_short: Vec<Option<f64>>,
    pub ma_long: Vec<Option<f64>>,
}

impl TickerDrilldown {
    /// Build the drilldown, or `None` when the ticker has no price column.
    pub fn build(prices: &ClosePriceTable, ticker: &str) -> Option<Self> {
        let series = prices.series(ticker)?;
        let points: Vec<PricePoint> = series
            .into_iter()
            .filter_map(|(date, close)| close.map(|close| PricePoint { date, close }))
            .collect();

        let closes: Vec<f64> = points.iter().map(|p| p.close).collect();
        let ma_short = moving_average(&closes, MA_SHORT);
        let ma_long = moving_average(&closes, MA_LONG);

        Some(Self {
            ticker: ticker.to_string(),
            points,
            ma_short,
            ma_long,
        })
    }
}

/// Trailing simple moving average.
///
/// `result[i]` is the mean of `values[i + 1 - window ..= i]`, or `None`
/// while fewer than `window` observations exist.
pub fn moving_average(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let n = values.len();
    let mut result = vec![None; n];
    if window == 0 || n < window {
        return result;
    }

    let mut sum: f64 = values.iter().take(window).sum();
    result[window - 1] = Some(sum / window as f64);

    for i in window..n {
        sum += values[i] - values[i - window];
        result[i] = Some(sum / window as f64);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_approx(actual: Option<f64>, expected: f64) {
        let actual = actual.expect("expected a value");
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn ma_basic() {
        let values = [10.0, 11.0, 12.0, 13.0, 14.0];
        let ma = moving_average(&values, 3);
        assert!(ma[0].is_none());
        assert!(ma[1].is_none());
        assert_approx(ma[2], 11.0);
        assert_approx(ma[3], 12.0);
        assert_approx(ma[4], 13.0);
    }

    #[test]
    fn ma_too_few_values() {
        let values = [10.0, 11.0];
        let ma = moving_average(&values, 5);
        assert!(ma.iter().all(Option::is_none));
    }

    #[test]
    fn ma_window_one_is_identity() {
        let values = [100.0, 200.0, 300.0];
        let ma = moving_average(&values, 1);
        assert_approx(ma[0], 100.0);
        assert_approx(ma[1], 200.0);
        assert_approx(ma[2], 300.0);
    }

    #[test]
    fn null_prices_stripped_before_windowing() {
        // Series [10, null, 12, 13, 14], window 3: the null is dropped,
        // so the last position averages (12, 13, 14).
        let dates: Vec<NaiveDate> = (1..=5)
            .map(|d| NaiveDate::from_ymd_opt(2024, 6, d).unwrap())
            .collect();
        let values = vec![
            vec![Some(10.0)],
            vec![None],
            vec![Some(12.0)],
            vec![Some(13.0)],
            vec![Some(14.0)],
        ];
        // The all-null middle row would normally be dropped at load; keep
        // it here to exercise the stripping path directly.
        let table = ClosePriceTable::from_parts(dates, vec!["AAPL".to_string()], values);

        let drill = TickerDrilldown::build(&table, "AAPL").unwrap();
        assert_eq!(drill.points.len(), 4);
        let ma = moving_average(
            &drill.points.iter().map(|p| p.close).collect::<Vec<_>>(),
            3,
        );
        assert!(ma[0].is_none());
        assert!(ma[1].is_none());
        assert_approx(ma[2], (10.0 + 12.0 + 13.0) / 3.0);
        assert_approx(ma[3], 13.0);
    }

    #[test]
    fn missing_ticker_yields_no_drilldown() {
        let table = ClosePriceTable::from_parts(vec![], vec![], vec![]);
        assert!(TickerDrilldown::build(&table, "AAPL").is_none());
    }

    #[test]
    fn drilldown_series_are_aligned() {
        let dates: Vec<NaiveDate> = (1..=25)
            .map(|d| NaiveDate::from_ymd_opt(2024, 3, d).unwrap())
            .collect();
        let values: Vec<Vec<Option<f64>>> =
            (0..25).map(|i| vec![Some(100.0 + i as f64)]).collect();
        let table = ClosePriceTable::from_parts(dates, vec!["MSFT".to_string()], values);

        let drill = TickerDrilldown::build(&table, "MSFT").unwrap();
        assert_eq!(drill.points.len(), 25);
        assert_eq!(drill.ma_short.len(), 25);
        assert_eq!(drill.ma_long.len(), 25);
        assert!(drill.ma_short[MA_SHORT - 2].is_none());
        assert!(drill.ma_short[MA_SHORT - 1].is_some());
        // 25 observations < 50: the long MA never becomes defined.
        assert!(drill.ma_long.iter().all(Option::is_none));
    }
}
