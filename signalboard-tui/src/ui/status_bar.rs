//! Bottom status bar — key hints plus the last status/error message.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{App, StatusLevel};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let mut spans: Vec<Span> = Vec::new();

    spans.push(Span::styled(
        " Tab:next  ?:help  !:errors  q:quit",
        theme::muted(),
    ));
    spans.push(Span::raw(" | "));
    spans.push(Span::styled(
        format!("{} of {} rows", app.view.len(), app.ctx.recommendations.len()),
        theme::neutral(),
    ));

    if let Some(status) = &app.status {
        let style = match status.level {
            StatusLevel::Info => theme::accent(),
            StatusLevel::Warning => theme::warning(),
            StatusLevel::Error => theme::negative(),
        };
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(status.text.as_str(), style));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
