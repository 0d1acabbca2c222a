use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;
use crate::util::unicode;
use crate::view::modal::DeletePhase;

use super::centered_rect_fixed;

/// Render the delete confirmation popup
pub fn render_confirm_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(pending) = app.controller.pending_delete() else {
        return;
    };

    let bg = app.theme.background;
    let warn = app.theme.red;
    let header_style = Style::default()
        .fg(warn)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let text_style = Style::default().fg(app.theme.text).bg(bg);
    let bright_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let dim_style = Style::default().fg(app.theme.dim).bg(bg);

    let popup_w: u16 = 46.min(area.width.saturating_sub(2));
    let title = unicode::truncate_to_width(&pending.title, (popup_w as usize).saturating_sub(6));

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(" Delete Task", header_style)),
        Line::from(""),
        Line::from(Span::styled("  Are you sure you want to delete", text_style)),
        Line::from(vec![
            Span::styled("  ", text_style),
            Span::styled(title, bright_style),
            Span::styled("?", text_style),
        ]),
        Line::from(""),
    ];

    match pending.phase {
        DeletePhase::Confirming => lines.push(Line::from(vec![
            Span::styled("  y", bright_style),
            Span::styled(" delete  ", text_style),
            Span::styled("n", bright_style),
            Span::styled("/", text_style),
            Span::styled("Esc", bright_style),
            Span::styled(" cancel", text_style),
        ])),
        DeletePhase::Deleting(_) => {
            lines.push(Line::from(Span::styled("  Deleting\u{2026}", dim_style)))
        }
    }

    let popup_h = (lines.len() as u16 + 2).min(area.height);
    let overlay_area = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(warn).bg(bg))
        .style(Style::default().bg(bg));
    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));
    frame.render_widget(paragraph, overlay_area);
}
