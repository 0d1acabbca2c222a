use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::StatusFilter;
use crate::tui::app::App;

/// Render the filter tabs, current sort and search box on one row
pub fn render_toolbar(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let view = app.controller.view();
    let dim = Style::default().fg(app.theme.dim).bg(bg);
    let text = Style::default().fg(app.theme.text).bg(bg);

    let mut spans: Vec<Span> = vec![Span::styled(" ", text)];
    for (i, filter) in StatusFilter::ALL.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("\u{2502}", dim));
        }
        let style = if filter == view.filter {
            Style::default()
                .fg(app.theme.text_bright)
                .bg(app.theme.selection_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            text
        };
        spans.push(Span::styled(format!(" {} ", filter.label()), style));
    }

    spans.push(Span::styled("   Sort: ", dim));
    spans.push(Span::styled(view.sort.label(), text));

    spans.push(Span::styled("   Search: ", dim));
    if app.controller.search_focused() {
        spans.push(Span::styled(
            view.search.clone(),
            Style::default().fg(app.theme.text_bright).bg(bg),
        ));
        spans.push(Span::styled(
            "\u{258C}",
            Style::default().fg(app.theme.highlight).bg(bg),
        )); // ▌ cursor
    } else if view.search.is_empty() {
        spans.push(Span::styled("/", dim));
    } else {
        spans.push(Span::styled(
            view.search.clone(),
            Style::default().fg(app.theme.highlight).bg(bg),
        ));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)),
        area,
    );
}
