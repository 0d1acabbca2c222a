pub mod confirm_popup;
pub mod form_popup;
pub mod header;
pub mod help_overlay;
pub mod status_row;
pub mod task_list;
pub mod toolbar;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use regex::Regex;

use super::app::{App, Mode};

/// Main render function: dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    let banner_height = u16::from(app.controller.error().is_some());

    // Layout: header (3 rows) | toolbar | error banner | content | status row
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // title, stats, separator
            Constraint::Length(1),             // filter, sort, search
            Constraint::Length(banner_height), // error banner
            Constraint::Min(1),                // task list
            Constraint::Length(1),             // status row
        ])
        .split(area);

    header::render_header(frame, app, chunks[0]);
    toolbar::render_toolbar(frame, app, chunks[1]);
    if banner_height > 0 {
        render_error_banner(frame, app, chunks[2]);
    }
    task_list::render_task_list(frame, app, chunks[3]);
    status_row::render_status_row(frame, app, chunks[4]);

    // Popups (rendered on top of everything)
    if matches!(app.mode, Mode::Form(_)) {
        form_popup::render_form_popup(frame, app, area);
    }
    if app.controller.pending_delete().is_some() {
        confirm_popup::render_confirm_popup(frame, app, area);
    }
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, area);
    }
}

/// One-line error banner with the dismiss hint on the right
fn render_error_banner(frame: &mut Frame, app: &App, area: Rect) {
    let Some(message) = app.controller.error() else {
        return;
    };
    let bg = app.theme.red;
    let style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let hint = "x dismiss ";
    let text = format!(" {}", message);
    let used = text.chars().count() + hint.len();
    let padding = (area.width as usize).saturating_sub(used);
    let line = Line::from(vec![
        Span::styled(text, style),
        Span::styled(" ".repeat(padding), Style::default().bg(bg)),
        Span::styled(hint, Style::default().fg(app.theme.text_bright).bg(bg)),
    ]);
    frame.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), area);
}

/// Push spans for text with regex match highlighting. If no regex or no matches,
/// pushes a single span with `base_style`. Otherwise splits text at match boundaries.
pub(super) fn push_highlighted_spans<'a>(
    spans: &mut Vec<Span<'a>>,
    text: &str,
    base_style: Style,
    highlight_style: Style,
    search_re: Option<&Regex>,
) {
    let re = match search_re {
        Some(r) => r,
        None => {
            spans.push(Span::styled(text.to_string(), base_style));
            return;
        }
    };

    let mut last_end = 0;
    for m in re.find_iter(text) {
        if m.start() > last_end {
            spans.push(Span::styled(
                text[last_end..m.start()].to_string(),
                base_style,
            ));
        }
        spans.push(Span::styled(
            text[m.start()..m.end()].to_string(),
            highlight_style,
        ));
        last_end = m.end();
    }
    if last_end < text.len() || last_end == 0 {
        spans.push(Span::styled(text[last_end..].to_string(), base_style));
    }
}

/// A `width` x `height` rectangle centered in `area`, clipped to it
pub(super) fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}
