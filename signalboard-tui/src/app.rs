//! Application state: the loaded datasets, the active filter criteria,
//! the derived view each panel reads, and the overlay/status machinery.
//!
//! Every mutation recomputes the derived view synchronously — the data
//! is static for the lifetime of the process, so there is no refresh
//! loop and no background work.

use std::collections::VecDeque;
use std::path::PathBuf;

use chrono::{DateTime, Local};

use signalboard_core::drilldown::TickerDrilldown;
use signalboard_core::filter::{filter_and_sort, FilterCriteria};
use signalboard_core::query::{resolve, QueryResponse, PICK_COUNT};
use signalboard_core::table::RecommendationRow;
use signalboard_core::{export, DashboardContext};

/// Cap on retained error records.
const MAX_ERROR_HISTORY: usize = 50;

pub const FILTERED_EXPORT_PATH: &str = "filtered_recommendations.csv";
pub const FULL_EXPORT_PATH: &str = "full_recommendations.csv";

/// The five top-level panels, cycled with Tab / number keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Overview,
    Table,
    Drilldown,
    TopPicks,
    Ask,
}

impl Panel {
    pub const ALL: [Panel; 5] = [
        Panel::Overview,
        Panel::Table,
        Panel::Drilldown,
        Panel::TopPicks,
        Panel::Ask,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Panel::Overview => "Overview",
            Panel::Table => "Recommendations",
            Panel::Drilldown => "Drilldown",
            Panel::TopPicks => "Top Picks",
            Panel::Ask => "Ask",
        }
    }

    pub fn index(self) -> usize {
        Panel::ALL.iter().position(|p| *p == self).unwrap_or(0)
    }

    pub fn next(self) -> Panel {
        Panel::ALL[(self.index() + 1) % Panel::ALL.len()]
    }

    pub fn prev(self) -> Panel {
        Panel::ALL[(self.index() + Panel::ALL.len() - 1) % Panel::ALL.len()]
    }
}

/// Modal overlays; at most one is open at a time and it captures input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Help,
    Search,
    Filter,
    ErrorHistory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
}

#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: DateTime<Local>,
    pub context: String,
    pub message: String,
}

/// One toggleable row in the filter overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterItem {
    Signal(String),
    Options(String),
    Tilt(String),
    NullTilt,
}

impl FilterItem {
    pub fn label(&self) -> String {
        match self {
            FilterItem::Signal(v) | FilterItem::Options(v) | FilterItem::Tilt(v) => {
                if v.is_empty() {
                    "(blank)".to_string()
                } else {
                    v.clone()
                }
            }
            FilterItem::NullTilt => "(null)".to_string(),
        }
    }
}

/// An owned copy of a query resolution, detached from the table borrow.
#[derive(Debug, Clone, PartialEq)]
pub enum AskResult {
    Picks {
        title: String,
        rows: Vec<RecommendationRow>,
    },
    Answer {
        ticker: String,
        answer: String,
        row: RecommendationRow,
    },
    NoTicker,
}

pub struct App {
    pub ctx: DashboardContext,
    pub running: bool,
    pub active_panel: Panel,
    pub overlay: Overlay,

    pub criteria: FilterCriteria,
    /// Derived view: rows passing the criteria, in sort order. Cloned
    /// out of the table so panels can render without borrowing `ctx`.
    pub view: Vec<RecommendationRow>,

    pub table_cursor: usize,
    pub table_offset: usize,

    /// Tickers offered in the drilldown list, alphabetical.
    pub drill_tickers: Vec<String>,
    pub drill_cursor: usize,
    pub drilldown: Option<TickerDrilldown>,

    pub ask_input: String,
    pub ask_result: Option<AskResult>,

    pub search_input: String,
    pub filter_cursor: usize,

    pub status: Option<StatusMessage>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
}

impl App {
    pub fn new(ctx: DashboardContext) -> Self {
        let criteria = FilterCriteria::default_for(&ctx.recommendations);
        let mut drill_tickers: Vec<String> = ctx.recommendations.tickers().to_vec();
        drill_tickers.sort();

        let mut app = App {
            ctx,
            running: true,
            active_panel: Panel::Overview,
            overlay: Overlay::None,
            criteria,
            view: Vec::new(),
            table_cursor: 0,
            table_offset: 0,
            drill_tickers,
            drill_cursor: 0,
            drilldown: None,
            ask_input: String::new(),
            ask_result: None,
            search_input: String::new(),
            filter_cursor: 0,
            status: None,
            error_history: VecDeque::new(),
            error_scroll: 0,
        };
        app.refresh_view();
        app.refresh_drilldown();
        app
    }

    // ── Derived view ─────────────────────────────────────────────────

    /// Re-run filter + sort over the table and clamp the cursor.
    pub fn refresh_view(&mut self) {
        self.view = filter_and_sort(&self.ctx.recommendations, &self.criteria)
            .into_iter()
            .cloned()
            .collect();
        if self.table_cursor >= self.view.len() {
            self.table_cursor = self.view.len().saturating_sub(1);
        }
        if self.table_offset > self.table_cursor {
            self.table_offset = self.table_cursor;
        }
    }

    pub fn selected_row(&self) -> Option<&RecommendationRow> {
        self.view.get(self.table_cursor)
    }

    pub fn move_table_cursor(&mut self, delta: isize) {
        if self.view.is_empty() {
            return;
        }
        let last = self.view.len() - 1;
        self.table_cursor = move_cursor(self.table_cursor, delta, last);
    }

    pub fn cycle_sort_key(&mut self) {
        self.criteria.sort_key = self.criteria.sort_key.next();
        self.refresh_view();
        self.set_status(
            format!("sorting by {}", self.criteria.sort_key.label()),
            StatusLevel::Info,
        );
    }

    pub fn toggle_sort_direction(&mut self) {
        self.criteria.descending = !self.criteria.descending;
        self.refresh_view();
        let dir = if self.criteria.descending {
            "descending"
        } else {
            "ascending"
        };
        self.set_status(format!("sort direction: {dir}"), StatusLevel::Info);
    }

    // ── Search overlay ───────────────────────────────────────────────

    pub fn open_search(&mut self) {
        self.search_input = self.criteria.search.clone();
        self.overlay = Overlay::Search;
    }

    pub fn apply_search(&mut self) {
        self.criteria.search = self.search_input.trim().to_string();
        self.overlay = Overlay::None;
        self.refresh_view();
        if self.criteria.search.is_empty() {
            self.set_status("search cleared".to_string(), StatusLevel::Info);
        } else {
            self.set_status(
                format!("{} rows match \"{}\"", self.view.len(), self.criteria.search),
                StatusLevel::Info,
            );
        }
    }

    // ── Filter overlay ───────────────────────────────────────────────

    /// The toggleable rows shown by the filter overlay, in display order.
    pub fn filter_items(&self) -> Vec<FilterItem> {
        let table = &self.ctx.recommendations;
        let mut items = Vec::new();
        for v in table.signal_values() {
            items.push(FilterItem::Signal(v.clone()));
        }
        for v in table.options_values() {
            items.push(FilterItem::Options(v.clone()));
        }
        for v in table.tilt_values() {
            items.push(FilterItem::Tilt(v.clone()));
        }
        items.push(FilterItem::NullTilt);
        items
    }

    pub fn filter_item_enabled(&self, item: &FilterItem) -> bool {
        match item {
            FilterItem::Signal(v) => self.criteria.signals.contains(v),
            FilterItem::Options(v) => self.criteria.options.contains(v),
            FilterItem::Tilt(v) => self.criteria.tilts.contains(v),
            FilterItem::NullTilt => self.criteria.include_null_tilt,
        }
    }

    pub fn toggle_filter_item(&mut self) {
        let items = self.filter_items();
        let Some(item) = items.get(self.filter_cursor) else {
            return;
        };
        match item {
            FilterItem::Signal(v) => toggle(&mut self.criteria.signals, v),
            FilterItem::Options(v) => toggle(&mut self.criteria.options, v),
            FilterItem::Tilt(v) => toggle(&mut self.criteria.tilts, v),
            FilterItem::NullTilt => {
                self.criteria.include_null_tilt = !self.criteria.include_null_tilt;
            }
        }
        self.refresh_view();
    }

    pub fn reset_filters(&mut self) {
        self.criteria = FilterCriteria::default_for(&self.ctx.recommendations);
        self.refresh_view();
        self.set_status("filters reset".to_string(), StatusLevel::Info);
    }

    // ── Drilldown ────────────────────────────────────────────────────

    pub fn selected_drill_ticker(&self) -> Option<&str> {
        self.drill_tickers.get(self.drill_cursor).map(String::as_str)
    }

    pub fn refresh_drilldown(&mut self) {
        self.drilldown = self
            .selected_drill_ticker()
            .and_then(|t| TickerDrilldown::build(&self.ctx.prices, t));
    }

    pub fn move_drill_cursor(&mut self, delta: isize) {
        if self.drill_tickers.is_empty() {
            return;
        }
        let last = self.drill_tickers.len() - 1;
        self.drill_cursor = move_cursor(self.drill_cursor, delta, last);
        self.refresh_drilldown();
    }

    /// Jump from a table row straight to that ticker's drilldown.
    pub fn drill_into_selection(&mut self) {
        let Some(ticker) = self.selected_row().map(|r| r.ticker.clone()) else {
            return;
        };
        if let Some(pos) = self.drill_tickers.iter().position(|t| *t == ticker) {
            self.drill_cursor = pos;
            self.refresh_drilldown();
            self.active_panel = Panel::Drilldown;
        }
    }

    // ── Ask ──────────────────────────────────────────────────────────

    pub fn run_query(&mut self) {
        let query = self.ask_input.trim();
        if query.is_empty() {
            return;
        }
        self.ask_result = Some(match resolve(&self.ctx.recommendations, query) {
            QueryResponse::Picks { title, rows } => AskResult::Picks {
                title: title.to_string(),
                rows: rows.into_iter().cloned().collect(),
            },
            QueryResponse::TickerAnswer { ticker, answer, row } => AskResult::Answer {
                ticker: ticker.to_string(),
                answer,
                row: row.clone(),
            },
            QueryResponse::NoTickerDetected => AskResult::NoTicker,
        });
    }

    // ── Export ───────────────────────────────────────────────────────

    pub fn export_filtered(&mut self) {
        let result = {
            let refs: Vec<&RecommendationRow> = self.view.iter().collect();
            export::write_csv(&refs, &PathBuf::from(FILTERED_EXPORT_PATH)).map(|()| refs.len())
        };
        self.report_export(result, FILTERED_EXPORT_PATH);
    }

    pub fn export_full(&mut self) {
        let result = {
            let refs: Vec<&RecommendationRow> =
                self.ctx.recommendations.rows().iter().collect();
            export::write_csv(&refs, &PathBuf::from(FULL_EXPORT_PATH)).map(|()| refs.len())
        };
        self.report_export(result, FULL_EXPORT_PATH);
    }

    fn report_export(&mut self, result: anyhow::Result<usize>, path: &str) {
        match result {
            Ok(count) => self.set_status(
                format!("exported {count} rows to {path}"),
                StatusLevel::Info,
            ),
            Err(err) => self.push_error("export", format!("{err:#}")),
        }
    }

    // ── Status / errors ──────────────────────────────────────────────

    pub fn set_status(&mut self, text: String, level: StatusLevel) {
        self.status = Some(StatusMessage { text, level });
    }

    pub fn push_error(&mut self, context: &str, message: String) {
        self.set_status(format!("{context}: {message}"), StatusLevel::Error);
        self.error_history.push_front(ErrorRecord {
            timestamp: Local::now(),
            context: context.to_string(),
            message,
        });
        self.error_history.truncate(MAX_ERROR_HISTORY);
    }

    pub fn top_picks(&self) -> Vec<&RecommendationRow> {
        signalboard_core::rank::top_n(&self.ctx.recommendations, PICK_COUNT)
    }

    pub fn bottom_picks(&self) -> Vec<&RecommendationRow> {
        signalboard_core::rank::bottom_n(&self.ctx.recommendations, PICK_COUNT)
    }
}

fn toggle(set: &mut std::collections::BTreeSet<String>, value: &str) {
    if !set.remove(value) {
        set.insert(value.to_string());
    }
}

fn move_cursor(cursor: usize, delta: isize, last: usize) -> usize {
    if delta < 0 {
        cursor.saturating_sub(delta.unsigned_abs())
    } else {
        (cursor + delta as usize).min(last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use signalboard_core::data::ClosePriceTable;
    use signalboard_core::table::RecommendationTable;

    fn row(ticker: &str, signal: &str, rank: f64, posterior: f64) -> RecommendationRow {
        RecommendationRow {
            stock_signal: signal.to_string(),
            options_suggestion: if signal == "BUY" { "CALL" } else { "PUT" }.to_string(),
            bl_rank: Some(rank),
            bl_posterior_annual: Some(posterior),
            ..RecommendationRow::empty(ticker)
        }
    }

    fn sample_app() -> App {
        let table = RecommendationTable::from_rows(vec![
            row("MSFT", "BUY", 2.0, 0.09),
            row("AAPL", "BUY", 1.0, 0.11),
            row("INTC", "SELL", 3.0, -0.09),
        ]);
        let prices = ClosePriceTable::from_parts(vec![], vec![], vec![]);
        App::new(DashboardContext::new(table, prices))
    }

    #[test]
    fn panels_cycle_in_order() {
        let mut panel = Panel::Overview;
        for expected in [
            Panel::Table,
            Panel::Drilldown,
            Panel::TopPicks,
            Panel::Ask,
            Panel::Overview,
        ] {
            panel = panel.next();
            assert_eq!(panel, expected);
        }
        assert_eq!(Panel::Overview.prev(), Panel::Ask);
    }

    #[test]
    fn default_view_contains_every_row() {
        let app = sample_app();
        assert_eq!(app.view.len(), 3);
        // Posterior descending by default.
        assert_eq!(app.view[0].ticker, "AAPL");
    }

    #[test]
    fn toggling_a_signal_narrows_the_view() {
        let mut app = sample_app();
        let pos = app
            .filter_items()
            .iter()
            .position(|i| *i == FilterItem::Signal("BUY".to_string()))
            .unwrap();
        app.filter_cursor = pos;
        app.toggle_filter_item();
        assert!(app.view.iter().all(|r| r.stock_signal == "SELL"));

        app.toggle_filter_item();
        assert_eq!(app.view.len(), 3);
    }

    #[test]
    fn search_apply_updates_criteria_and_view() {
        let mut app = sample_app();
        app.open_search();
        app.search_input = "aa".to_string();
        app.apply_search();
        assert_eq!(app.view.len(), 1);
        assert_eq!(app.view[0].ticker, "AAPL");
        assert_eq!(app.overlay, Overlay::None);
    }

    #[test]
    fn drill_tickers_are_alphabetical() {
        let app = sample_app();
        assert_eq!(app.drill_tickers, ["AAPL", "INTC", "MSFT"]);
    }

    #[test]
    fn drill_into_selection_targets_the_cursor_row() {
        let mut app = sample_app();
        app.active_panel = Panel::Table;
        app.table_cursor = 2; // INTC (lowest posterior)
        app.drill_into_selection();
        assert_eq!(app.active_panel, Panel::Drilldown);
        assert_eq!(app.selected_drill_ticker(), Some("INTC"));
    }

    #[test]
    fn error_history_is_capped() {
        let mut app = sample_app();
        for i in 0..60 {
            app.push_error("test", format!("boom {i}"));
        }
        assert_eq!(app.error_history.len(), MAX_ERROR_HISTORY);
        // Newest first.
        assert!(app.error_history[0].message.contains("59"));
    }

    #[test]
    fn run_query_detaches_owned_result() {
        let mut app = sample_app();
        app.ask_input = "top 5".to_string();
        app.run_query();
        match app.ask_result.as_ref().unwrap() {
            AskResult::Picks { rows, .. } => {
                assert_eq!(rows[0].ticker, "AAPL");
            }
            other => panic!("expected picks, got {other:?}"),
        }

        app.ask_input = "gibberish".to_string();
        app.run_query();
        assert_eq!(app.ask_result, Some(AskResult::NoTicker));
    }
}
