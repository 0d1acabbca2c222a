use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::util::unicode;

/// Render the status row (bottom of screen): notification or activity on
/// the left, key hints for the current mode on the right
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans: Vec<Span> = Vec::new();
    if let Some(message) = app.controller.notification() {
        spans.push(Span::styled(
            format!(" \u{2713} {}", message),
            Style::default()
                .fg(app.theme.green)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ));
    } else if app.controller.is_loading() {
        spans.push(Span::styled(
            " Loading\u{2026}",
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    } else if app.read_only {
        spans.push(Span::styled(
            " read-only",
            Style::default().fg(app.theme.yellow).bg(bg),
        ));
    }

    let hint = match app.mode {
        Mode::Navigate => "a add  e edit  d delete  / search  ? help  q quit",
        Mode::Search => "type to search  Enter/Esc done",
        Mode::Form(_) => "Enter save  Esc cancel",
        Mode::Confirm => "y delete  n cancel",
    };
    let content_width: usize = spans.iter().map(|s| unicode::display_width(&s.content)).sum();
    let hint_width = unicode::display_width(hint) + 1;
    if content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(
            hint,
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
