//! Panel 2 — Recommendations: the filtered, sorted grid with a cursor.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use signalboard_core::table::RecommendationRow;

use crate::app::App;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    if app.view.is_empty() {
        let notice = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "  No rows match the current filters. Press f to adjust, / to search.",
                theme::muted(),
            )),
        ]);
        f.render_widget(notice, area);
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    lines.push(header_line(app));

    // One header line, the rest for data rows.
    let visible = area.height.saturating_sub(1) as usize;
    let offset = scroll_offset(app.table_cursor, app.table_offset, visible);
    let end = (offset + visible).min(app.view.len());

    for (i, row) in app.view[offset..end].iter().enumerate() {
        lines.push(row_line(row, offset + i == app.table_cursor));
    }

    f.render_widget(Paragraph::new(lines), area);
}

/// Keep the cursor inside the visible window.
fn scroll_offset(cursor: usize, offset: usize, visible: usize) -> usize {
    if visible == 0 {
        return offset;
    }
    if cursor < offset {
        cursor
    } else if cursor >= offset + visible {
        cursor + 1 - visible
    } else {
        offset
    }
}

/// Short header cell for a sort key (labels are the CSV column names).
fn sort_header(key: signalboard_core::table::SortKey) -> &'static str {
    use signalboard_core::table::SortKey;
    match key {
        SortKey::BlPosterior => "Posterior",
        SortKey::BlRank => "Rank",
        SortKey::SignalStrength => "Strength",
        SortKey::Rsi14 => "RSI14",
        SortKey::Vol20 => "Vol20",
        SortKey::Close => "Close",
        SortKey::Date => "Date",
    }
}

fn header_line(app: &App) -> Line<'static> {
    let arrow = if app.criteria.descending { "v" } else { "^" };
    let sorted = sort_header(app.criteria.sort_key);
    let cells = [
        ("Ticker", 7),
        ("Date", 11),
        ("Close", 10),
        ("Signal", 7),
        ("Options", 9),
        ("Strength", 9),
        ("RSI14", 7),
        ("Vol20", 7),
        ("Posterior", 10),
        ("Rank", 6),
        ("Tilt", 12),
    ];

    let mut spans = vec![Span::raw(" ")];
    for (label, width) in cells {
        let marked = if label == sorted {
            format!("{label}{arrow}")
        } else {
            label.to_string()
        };
        spans.push(Span::styled(
            format!("{marked:<width$}", width = width),
            theme::accent_bold(),
        ));
    }
    Line::from(spans)
}

fn row_line(row: &RecommendationRow, selected: bool) -> Line<'static> {
    let base = if selected {
        theme::accent().add_modifier(Modifier::REVERSED)
    } else {
        theme::neutral()
    };

    let date = row
        .date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string());

    let mut spans = vec![Span::styled(" ", base)];
    spans.push(Span::styled(format!("{:<7}", row.ticker), base.add_modifier(Modifier::BOLD)));
    spans.push(Span::styled(format!("{date:<11}"), base));
    spans.push(Span::styled(format!("{:<10}", fmt_num(row.close, 2)), base));
    spans.push(Span::styled(
        format!("{:<7}", pad_blank(&row.stock_signal)),
        if selected { base } else { theme::signal_style(&row.stock_signal) },
    ));
    spans.push(Span::styled(
        format!("{:<9}", pad_blank(&row.options_suggestion)),
        if selected { base } else { theme::options_style(&row.options_suggestion) },
    ));
    spans.push(Span::styled(
        format!("{:<9}", fmt_num(row.signal_strength, 2)),
        base,
    ));
    spans.push(Span::styled(format!("{:<7}", fmt_num(row.rsi14, 1)), base));
    spans.push(Span::styled(
        format!("{:<7}", fmt_num(row.vol20_annual, 2)),
        base,
    ));
    spans.push(Span::styled(
        format!("{:<10}", fmt_num(row.bl_posterior_annual, 4)),
        if selected {
            base
        } else {
            row.bl_posterior_annual
                .map(theme::metric_style)
                .unwrap_or_else(theme::muted)
        },
    ));
    spans.push(Span::styled(format!("{:<6}", fmt_num(row.bl_rank, 0)), base));
    let tilt = row.bl_tilt.as_deref().unwrap_or("-");
    spans.push(Span::styled(
        format!("{tilt:<12}"),
        if selected { base } else { theme::tilt_style(tilt) },
    ));

    Line::from(spans)
}

fn fmt_num(value: Option<f64>, precision: usize) -> String {
    value
        .map(|v| format!("{v:.precision$}"))
        .unwrap_or_else(|| "-".to_string())
}

fn pad_blank(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}
