//! Overlay widgets — help, search, filter toggles, error history.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::{App, FilterItem};
use crate::theme;
use crate::ui::centered_rect;

/// Key binding reference.
pub fn render_help(f: &mut Frame, area: Rect) {
    let popup = centered_rect(60, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Help [Esc]close ")
        .title_style(theme::accent_bold());

    let bindings: &[(&str, &str)] = &[
        ("1-5 / Tab", "switch panel"),
        ("j/k", "move cursor (table, drilldown)"),
        ("s", "cycle sort column"),
        ("r", "reverse sort direction"),
        ("/", "search by ticker substring"),
        ("f", "filter by signal / options / tilt"),
        ("Enter", "open drilldown for selected row"),
        ("e", "export filtered view to CSV"),
        ("E", "export full table to CSV"),
        ("!", "error history"),
        ("q", "quit"),
    ];

    let mut lines = vec![Line::from("")];
    for (keys, action) in bindings {
        lines.push(Line::from(vec![
            Span::styled(format!("  {keys:>10}  "), theme::accent()),
            Span::styled(*action, theme::muted()),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  In the Ask panel, type a question and press Enter.",
        theme::neutral(),
    )));

    let para = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(para, popup);
}

/// Search input overlay.
pub fn render_search(f: &mut Frame, area: Rect, input: &str) {
    let popup = centered_rect(50, 20, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Search [Enter]apply [Esc]cancel ")
        .title_style(theme::accent_bold());

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Ticker substring:",
            theme::muted(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("> ", theme::accent()),
            Span::styled(input, theme::accent_bold()),
            Span::styled("_", theme::accent()),
        ]),
    ];

    f.render_widget(Paragraph::new(text), inner);
}

/// Category filter overlay — one toggleable row per observed value.
pub fn render_filter(f: &mut Frame, area: Rect, app: &App) {
    let popup = centered_rect(50, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Filters [Space]toggle [a]reset [Esc]close ")
        .title_style(theme::accent_bold());

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let items = app.filter_items();
    let mut lines: Vec<Line> = Vec::new();
    let mut last_section = "";

    for (i, item) in items.iter().enumerate() {
        let section = match item {
            FilterItem::Signal(_) => "Stock signal",
            FilterItem::Options(_) => "Options suggestion",
            FilterItem::Tilt(_) | FilterItem::NullTilt => "BL tilt",
        };
        if section != last_section {
            if !lines.is_empty() {
                lines.push(Line::from(""));
            }
            lines.push(Line::from(Span::styled(section, theme::accent_bold())));
            last_section = section;
        }

        let mark = if app.filter_item_enabled(item) {
            "[x]"
        } else {
            "[ ]"
        };
        let style = if i == app.filter_cursor {
            theme::accent().add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            theme::neutral()
        };
        lines.push(Line::from(Span::styled(
            format!("  {mark} {}", item.label()),
            style,
        )));
    }

    f.render_widget(Paragraph::new(lines), inner);
}

/// Error history overlay.
pub fn render_error_history(f: &mut Frame, area: Rect, app: &App) {
    let popup = centered_rect(80, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::negative())
        .title(format!(
            " Error History ({}) [Esc]close [j/k]scroll ",
            app.error_history.len()
        ))
        .title_style(theme::negative());

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    if app.error_history.is_empty() {
        let text = Paragraph::new(Span::styled("No errors recorded.", theme::muted()));
        f.render_widget(text, inner);
        return;
    }

    let visible_height = inner.height as usize;
    let start = app.error_scroll;
    let end = (start + visible_height).min(app.error_history.len());

    let mut lines: Vec<Line> = Vec::new();
    for i in start..end {
        let err = &app.error_history[i];
        let style = if i == app.error_scroll {
            theme::negative().add_modifier(Modifier::BOLD)
        } else {
            theme::muted()
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!("[{}] ", err.timestamp.format("%H:%M:%S")),
                theme::muted(),
            ),
            Span::styled(format!("[{}] ", err.context), theme::warning()),
            Span::styled(&err.message, style),
        ]));
    }

    f.render_widget(Paragraph::new(lines), inner);
}
