//! Panel 1 — Overview: headline counts over the filtered view plus a
//! histogram of the BL posterior return distribution.

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};
use ratatui::Frame;

use signalboard_core::overview::OverviewStats;
use signalboard_core::table::RecommendationRow;

use crate::app::App;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let refs: Vec<&RecommendationRow> = app.view.iter().collect();
    let stats = OverviewStats::compute(&refs);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(5)])
        .split(area);

    render_counts(f, chunks[0], app, &stats);
    f.render_widget(
        PosteriorHistogram {
            bins: &stats.posterior_bins,
            range: stats.posterior_range,
        },
        chunks[1],
    );
}

fn render_counts(f: &mut Frame, area: Rect, app: &App, stats: &OverviewStats) {
    let mut lines = vec![Line::from("")];
    count_line(&mut lines, "Shown", stats.shown, theme::accent());
    count_line(&mut lines, "BUY signals", stats.buy_count, theme::positive());
    count_line(&mut lines, "SELL signals", stats.sell_count, theme::negative());
    count_line(
        &mut lines,
        "Option ideas",
        stats.option_idea_count,
        theme::neutral(),
    );
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!(
            "  Sorted by {} ({}). Press f to filter, / to search.",
            app.criteria.sort_key.label(),
            if app.criteria.descending {
                "descending"
            } else {
                "ascending"
            }
        ),
        theme::muted(),
    )));

    f.render_widget(Paragraph::new(lines), area);
}

fn count_line<'a>(lines: &mut Vec<Line<'a>>, label: &str, count: usize, style: Style) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {label:>14}: "), theme::muted()),
        Span::styled(count.to_string(), style),
    ]));
}

/// Vertical bar histogram of the posterior distribution.
struct PosteriorHistogram<'a> {
    bins: &'a [usize],
    range: Option<(f64, f64)>,
}

impl Widget for PosteriorHistogram<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme::muted())
            .title(" BL posterior distribution ")
            .title_style(theme::accent());

        let inner = block.inner(area);
        block.render(area, buf);

        let Some((min, max)) = self.range else {
            buf.set_string(
                inner.x + 1,
                inner.y,
                "No posterior returns in the current view.",
                theme::muted(),
            );
            return;
        };
        if self.bins.is_empty() || inner.width < 10 || inner.height < 4 {
            return;
        }

        let hist_height = inner.height.saturating_sub(1);
        let bar_width = (inner.width as usize / self.bins.len()).max(1) as u16;
        let max_count = self.bins.iter().copied().max().unwrap_or(1).max(1);

        for (i, &count) in self.bins.iter().enumerate() {
            let height = (count as f64 / max_count as f64 * hist_height as f64).round() as u16;
            let x0 = inner.x + i as u16 * bar_width;
            for h in 0..height {
                let y = inner.y + hist_height - 1 - h;
                for dx in 0..bar_width.saturating_sub(1).max(1) {
                    let x = x0 + dx;
                    if x < inner.right() {
                        buf.set_string(x, y, "\u{2587}", theme::accent()); // ▇
                    }
                }
            }
        }

        // Axis labels under the bars.
        let label_y = inner.y + hist_height;
        if label_y < inner.bottom() {
            let left = format!("{min:.3}");
            let right = format!("{max:.3}");
            buf.set_string(inner.x, label_y, &left, theme::muted());
            let right_x = inner.right().saturating_sub(right.len() as u16);
            buf.set_string(right_x, label_y, &right, theme::muted());
        }
    }
}
