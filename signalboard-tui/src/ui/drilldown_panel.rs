//! Panel 3 — Drilldown: per-ticker close price chart with 20/50-day
//! moving averages, next to the ticker's latest recommendation.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

use signalboard_core::drilldown::TickerDrilldown;
use signalboard_core::table::RecommendationRow;

use crate::app::App;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(14), Constraint::Min(30)])
        .split(area);

    render_ticker_list(f, chunks[0], app);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(8)])
        .split(chunks[1]);

    match &app.drilldown {
        Some(drill) if !drill.points.is_empty() => render_chart(f, right[0], drill),
        _ => render_no_prices(f, right[0], app.selected_drill_ticker()),
    }
    render_recommendation_card(f, right[1], app);
}

fn render_ticker_list(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(theme::muted());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let visible = inner.height as usize;
    let start = app.drill_cursor.saturating_sub(visible.saturating_sub(1));
    let end = (start + visible).min(app.drill_tickers.len());

    let mut lines: Vec<Line> = Vec::new();
    for (i, ticker) in app.drill_tickers[start..end].iter().enumerate() {
        let style = if start + i == app.drill_cursor {
            theme::accent().add_modifier(Modifier::REVERSED)
        } else {
            theme::neutral()
        };
        lines.push(Line::from(Span::styled(format!(" {ticker:<10}"), style)));
    }
    f.render_widget(Paragraph::new(lines), inner);
}

fn render_no_prices(f: &mut Frame, area: Rect, ticker: Option<&str>) {
    let message = match ticker {
        Some(t) => format!("No price history for {t}."),
        None => "No tickers loaded.".to_string(),
    };
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(format!("  {message}"), theme::muted())),
        Line::from(""),
        Line::from(Span::styled(
            "  The recommendation below is unaffected.",
            theme::muted(),
        )),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn render_chart(f: &mut Frame, area: Rect, drill: &TickerDrilldown) {
    let closes: Vec<(f64, f64)> = drill
        .points
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.close))
        .collect();
    let ma_short = ma_points(&drill.ma_short);
    let ma_long = ma_points(&drill.ma_long);

    let min_y = closes.iter().map(|&(_, y)| y).fold(f64::INFINITY, f64::min);
    let max_y = closes
        .iter()
        .map(|&(_, y)| y)
        .fold(f64::NEG_INFINITY, f64::max);
    let padding = (max_y - min_y).abs().max(1e-9) * 0.05;
    let y_min = min_y - padding;
    let y_max = max_y + padding;
    let x_max = closes.len().saturating_sub(1) as f64;

    let datasets = vec![
        Dataset::default()
            .name("Close")
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(theme::ACCENT))
            .graph_type(GraphType::Line)
            .data(&closes),
        Dataset::default()
            .name("MA20")
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(theme::WARNING))
            .graph_type(GraphType::Line)
            .data(&ma_short),
        Dataset::default()
            .name("MA50")
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(theme::NEUTRAL))
            .graph_type(GraphType::Line)
            .data(&ma_long),
    ];

    let first = drill.points.first().map(|p| p.date.to_string()).unwrap_or_default();
    let last = drill.points.last().map(|p| p.date.to_string()).unwrap_or_default();

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::NONE)
                .title(format!(" {} — close + MA20/MA50 ", drill.ticker))
                .title_style(theme::accent_bold()),
        )
        .x_axis(
            Axis::default()
                .style(theme::muted())
                .bounds([0.0, x_max.max(1.0)])
                .labels(vec![
                    Span::styled(first, theme::muted()),
                    Span::styled(last, theme::muted()),
                ]),
        )
        .y_axis(
            Axis::default()
                .style(theme::muted())
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::styled(format!("{y_min:.2}"), theme::muted()),
                    Span::styled(format!("{y_max:.2}"), theme::muted()),
                ]),
        );

    f.render_widget(chart, area);
}

/// Defined MA observations as chart points, aligned to the price index.
fn ma_points(values: &[Option<f64>]) -> Vec<(f64, f64)> {
    values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|y| (i as f64, y)))
        .collect()
}

fn render_recommendation_card(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(theme::muted())
        .title(" Latest recommendation ")
        .title_style(theme::accent());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(ticker) = app.selected_drill_ticker() else {
        return;
    };
    let Some(row) = app.ctx.recommendations.latest_for(ticker) else {
        let text = Paragraph::new(Span::styled(
            format!("No recommendation for {ticker}."),
            theme::muted(),
        ));
        f.render_widget(text, inner);
        return;
    };

    let lines = card_lines(row);
    f.render_widget(Paragraph::new(lines), inner);
}

fn card_lines(row: &RecommendationRow) -> Vec<Line<'_>> {
    let mut lines = Vec::new();

    let mut headline = vec![
        Span::styled(format!(" {} ", row.ticker), theme::accent_bold()),
        Span::styled(
            if row.stock_signal.is_empty() { "-" } else { row.stock_signal.as_str() },
            theme::signal_style(&row.stock_signal).add_modifier(Modifier::BOLD),
        ),
    ];
    if !row.options_suggestion.is_empty() {
        headline.push(Span::raw("  "));
        headline.push(Span::styled(
            row.options_suggestion.as_str(),
            theme::options_style(&row.options_suggestion),
        ));
    }
    if let Some(tilt) = &row.bl_tilt {
        headline.push(Span::raw("  "));
        headline.push(Span::styled(tilt.as_str(), theme::tilt_style(tilt)));
    }
    lines.push(Line::from(headline));

    let mut metrics = vec![Span::raw(" ")];
    metric(&mut metrics, "RSI14", row.rsi14, 1);
    metric(&mut metrics, "Vol20", row.vol20_annual, 2);
    metric(&mut metrics, "Posterior", row.bl_posterior_annual, 4);
    metric(&mut metrics, "Rank", row.bl_rank, 0);
    lines.push(Line::from(metrics));

    if let Some(explanation) = &row.explanation {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(" {explanation}"),
            theme::muted(),
        )));
    }
    lines
}

fn metric(spans: &mut Vec<Span<'_>>, label: &str, value: Option<f64>, precision: usize) {
    spans.push(Span::styled(format!("{label}: "), theme::muted()));
    let display = value
        .map(|v| format!("{v:.precision$}"))
        .unwrap_or_else(|| "-".to_string());
    spans.push(Span::styled(format!("{display}  "), theme::neutral()));
}
