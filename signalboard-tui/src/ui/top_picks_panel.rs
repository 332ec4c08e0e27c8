//! Panel 4 — Top Picks: best and worst BL-ranked tickers side by side.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use signalboard_core::table::RecommendationRow;

use crate::app::App;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_list(f, chunks[0], " Top ranked ", &app.top_picks(), theme::positive());
    render_list(f, chunks[1], " Bottom ranked ", &app.bottom_picks(), theme::negative());
}

fn render_list(
    f: &mut Frame,
    area: Rect,
    title: &str,
    rows: &[&RecommendationRow],
    title_style: ratatui::style::Style,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::muted())
        .title(title.to_string())
        .title_style(title_style);
    let inner = block.inner(area);
    f.render_widget(block, area);

    if rows.is_empty() {
        let text = Paragraph::new(Span::styled("No ranked tickers.", theme::muted()));
        f.render_widget(text, inner);
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    for row in rows {
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {:<2} ", fmt_rank(row.bl_rank)),
                theme::muted(),
            ),
            Span::styled(format!("{:<6}", row.ticker), theme::accent_bold()),
            Span::styled(
                format!("{:<6}", blank_dash(&row.stock_signal)),
                theme::signal_style(&row.stock_signal),
            ),
            Span::styled(
                format!("{:<9}", blank_dash(&row.options_suggestion)),
                theme::options_style(&row.options_suggestion),
            ),
            Span::styled(
                row.bl_posterior_annual
                    .map(|v| format!("{v:+.4}"))
                    .unwrap_or_else(|| "-".to_string()),
                row.bl_posterior_annual
                    .map(theme::metric_style)
                    .unwrap_or_else(theme::muted),
            ),
        ]));
        if let Some(explanation) = &row.explanation {
            lines.push(Line::from(Span::styled(
                format!("     {explanation}"),
                theme::muted(),
            )));
        }
        lines.push(Line::from(""));
    }

    f.render_widget(Paragraph::new(lines), inner);
}

fn fmt_rank(rank: Option<f64>) -> String {
    rank.map(|r| format!("{r:.0}")).unwrap_or_else(|| "-".to_string())
}

fn blank_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}
