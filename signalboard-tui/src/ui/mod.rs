//! Top-level UI layout — single active panel with tab strip and status bar.

pub mod ask_panel;
pub mod drilldown_panel;
pub mod overlays;
pub mod overview_panel;
pub mod status_bar;
pub mod table_panel;
pub mod top_picks_panel;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::{App, Overlay, Panel};
use crate::theme;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &App) {
    // Split: tab strip + main area + 1-line status bar.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_tabs(f, chunks[0], app);
    draw_panel(f, chunks[1], app);
    status_bar::render(f, chunks[2], app);

    // Overlays on top.
    match app.overlay {
        Overlay::Help => overlays::render_help(f, chunks[1]),
        Overlay::Search => overlays::render_search(f, chunks[1], &app.search_input),
        Overlay::Filter => overlays::render_filter(f, chunks[1], app),
        Overlay::ErrorHistory => overlays::render_error_history(f, chunks[1], app),
        Overlay::None => {}
    }
}

fn draw_tabs(f: &mut Frame, area: Rect, app: &App) {
    let mut spans: Vec<Span> = vec![Span::raw(" ")];
    for panel in Panel::ALL {
        let style = if panel == app.active_panel {
            theme::accent_bold()
        } else {
            theme::muted()
        };
        spans.push(Span::styled(
            format!("{}:{}", panel.index() + 1, panel.label()),
            style,
        ));
        spans.push(Span::raw("  "));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Draw the active panel with its border.
fn draw_panel(f: &mut Frame, area: Rect, app: &App) {
    let panel = app.active_panel;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(format!(" {} [{}] ", panel.label(), panel.index() + 1))
        .title_style(theme::panel_title(true));

    let inner = block.inner(area);
    f.render_widget(block, area);

    match panel {
        Panel::Overview => overview_panel::render(f, inner, app),
        Panel::Table => table_panel::render(f, inner, app),
        Panel::Drilldown => drilldown_panel::render(f, inner, app),
        Panel::TopPicks => top_picks_panel::render(f, inner, app),
        Panel::Ask => ask_panel::render(f, inner, app),
    }
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use signalboard_core::data::ClosePriceTable;
    use signalboard_core::table::{RecommendationRow, RecommendationTable};
    use signalboard_core::DashboardContext;

    fn sample_app() -> App {
        let rows = vec![
            RecommendationRow {
                date: chrono::NaiveDate::from_ymd_opt(2024, 6, 3),
                close: Some(195.5),
                stock_signal: "BUY".to_string(),
                options_suggestion: "CALL".to_string(),
                bl_posterior_annual: Some(0.11),
                bl_rank: Some(1.0),
                bl_tilt: Some("OVERWEIGHT".to_string()),
                explanation: Some("Momentum strong".to_string()),
                ..RecommendationRow::empty("AAPL")
            },
            RecommendationRow {
                stock_signal: "SELL".to_string(),
                options_suggestion: "PUT".to_string(),
                bl_posterior_annual: Some(-0.09),
                bl_rank: Some(2.0),
                ..RecommendationRow::empty("INTC")
            },
        ];
        let table = RecommendationTable::from_rows(rows);

        let dates: Vec<chrono::NaiveDate> = (1..=30)
            .filter_map(|d| chrono::NaiveDate::from_ymd_opt(2024, 4, d))
            .collect();
        let values: Vec<Vec<Option<f64>>> = dates
            .iter()
            .enumerate()
            .map(|(i, _)| vec![Some(100.0 + i as f64)])
            .collect();
        let prices = ClosePriceTable::from_parts(dates, vec!["AAPL".to_string()], values);

        App::new(DashboardContext::new(table, prices))
    }

    fn backend_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let area = buffer.area;
        let mut content = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                content.push_str(buffer.cell((x, y)).unwrap().symbol());
            }
            content.push('\n');
        }
        content
    }

    #[test]
    fn every_panel_renders_without_panic() {
        let mut app = sample_app();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();

        for panel in Panel::ALL {
            app.active_panel = panel;
            if panel == Panel::Drilldown {
                app.refresh_drilldown();
            }
            terminal.draw(|f| draw(f, &app)).unwrap();
            let text = backend_text(&terminal);
            assert!(text.contains(panel.label()), "missing title for {panel:?}");
        }
    }

    #[test]
    fn table_panel_shows_loaded_tickers() {
        let mut app = sample_app();
        app.active_panel = Panel::Table;
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| draw(f, &app)).unwrap();

        let text = backend_text(&terminal);
        assert!(text.contains("AAPL"));
        assert!(text.contains("INTC"));
        assert!(text.contains("OVERWEIGHT"));
    }

    #[test]
    fn overlays_render_on_top() {
        let mut app = sample_app();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();

        for (overlay, marker) in [
            (Overlay::Help, "Help"),
            (Overlay::Search, "Search"),
            (Overlay::Filter, "Filters"),
            (Overlay::ErrorHistory, "Error History"),
        ] {
            app.overlay = overlay;
            terminal.draw(|f| draw(f, &app)).unwrap();
            let text = backend_text(&terminal);
            assert!(text.contains(marker), "missing overlay marker {marker}");
        }
    }

    #[test]
    fn centered_rect_stays_inside_the_area() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(60, 50, area);
        assert!(popup.x >= area.x && popup.right() <= area.right());
        assert!(popup.y >= area.y && popup.bottom() <= area.bottom());
    }
}
