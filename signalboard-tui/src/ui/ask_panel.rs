//! Panel 5 — Ask: a keyword query box over the recommendations table.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use signalboard_core::table::RecommendationRow;

use crate::app::{App, AskResult};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(4)])
        .split(area);

    render_input(f, chunks[0], &app.ask_input);
    render_response(f, chunks[1], app.ask_result.as_ref());
}

fn render_input(f: &mut Frame, area: Rect, input: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Ask [Enter]run [Esc]clear ")
        .title_style(theme::accent_bold());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let line = Line::from(vec![
        Span::styled("> ", theme::accent()),
        Span::styled(input, theme::accent_bold()),
        Span::styled("_", theme::accent()),
    ]);
    f.render_widget(Paragraph::new(line), inner);
}

fn render_response(f: &mut Frame, area: Rect, result: Option<&AskResult>) {
    let lines = match result {
        None => prompt_lines(),
        Some(AskResult::NoTicker) => vec![
            Line::from(""),
            Line::from(Span::styled(
                " No ticker or keyword recognized in the query.",
                theme::warning(),
            )),
            Line::from(""),
            Line::from(Span::styled(
                " Try a ticker symbol, \"best call ideas\", \"best put ideas\" or \"top 5\".",
                theme::muted(),
            )),
        ],
        Some(AskResult::Answer { ticker, answer, row }) => answer_lines(ticker, answer, row),
        Some(AskResult::Picks { title, rows }) => picks_lines(title, rows),
    };

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn prompt_lines() -> Vec<Line<'static>> {
    vec![
        Line::from(""),
        Line::from(Span::styled(" Ask about the loaded signals:", theme::muted())),
        Line::from(""),
        Line::from(Span::styled("   best call ideas", theme::neutral())),
        Line::from(Span::styled("   best put ideas", theme::neutral())),
        Line::from(Span::styled("   top 5", theme::neutral())),
        Line::from(Span::styled("   should I buy AAPL?", theme::neutral())),
    ]
}

fn answer_lines<'a>(ticker: &'a str, answer: &'a str, row: &'a RecommendationRow) -> Vec<Line<'a>> {
    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(format!(" {ticker}: "), theme::accent_bold()),
            Span::styled(answer, theme::neutral()),
        ]),
    ];
    if let Some(date) = row.date {
        lines.push(Line::from(Span::styled(
            format!("   as of {date}"),
            theme::muted(),
        )));
    }
    lines
}

fn picks_lines<'a>(title: &'a str, rows: &'a [RecommendationRow]) -> Vec<Line<'a>> {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(format!(" {title}"), theme::accent_bold())),
        Line::from(""),
    ];
    if rows.is_empty() {
        lines.push(Line::from(Span::styled(
            "   No matching tickers.",
            theme::muted(),
        )));
        return lines;
    }
    for row in rows {
        lines.push(Line::from(vec![
            Span::styled(format!("   {:<6}", row.ticker), theme::accent()),
            Span::styled(
                format!("{:<6}", if row.stock_signal.is_empty() { "-" } else { row.stock_signal.as_str() }),
                theme::signal_style(&row.stock_signal),
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
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(lines: &[Line]) -> String {
        lines
            .iter()
            .flat_map(|l| l.spans.iter())
            .map(|s| s.content.as_ref())
            .collect()
    }

    #[test]
    fn picks_list_names_every_ticker() {
        let rows = vec![
            RecommendationRow {
                stock_signal: "BUY".to_string(),
                bl_posterior_annual: Some(0.1),
                ..RecommendationRow::empty("AAPL")
            },
            RecommendationRow::empty("MSFT"),
        ];
        let text = text_of(&picks_lines("Best CALL candidates", &rows));
        assert!(text.contains("Best CALL candidates"));
        assert!(text.contains("AAPL"));
        assert!(text.contains("MSFT"));
    }

    #[test]
    fn empty_picks_show_a_notice() {
        let text = text_of(&picks_lines("Top ranked", &[]));
        assert!(text.contains("No matching tickers"));
    }

    #[test]
    fn answer_includes_the_date_when_known() {
        let row = RecommendationRow {
            date: chrono::NaiveDate::from_ymd_opt(2024, 6, 3),
            ..RecommendationRow::empty("AAPL")
        };
        let text = text_of(&answer_lines("AAPL", "Looks fine.", &row));
        assert!(text.contains("Looks fine."));
        assert!(text.contains("2024-06-03"));
    }
}
