use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::ops::form::FormField;
use crate::tui::app::{App, Mode};
use crate::util::unicode;

use super::centered_rect_fixed;

const POPUP_W: u16 = 60;
const LABEL_W: usize = 14;

/// Render the add/edit task modal
pub fn render_form_popup(frame: &mut Frame, app: &App, area: Rect) {
    let modal_state = app.controller.modal();
    let Some(modal) = modal_state.modal() else {
        return;
    };
    let focused = match app.mode {
        Mode::Form(field) => Some(field),
        _ => None,
    };
    let submitting = modal_state.is_submitting();
    let form = &modal.form;

    let bg = app.theme.background;
    let header_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let label_style = Style::default().fg(app.theme.dim).bg(bg);
    let text_style = Style::default().fg(app.theme.text).bg(bg);
    let focus_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(app.theme.selection_bg);
    let error_style = Style::default().fg(app.theme.red).bg(bg);

    let popup_w = POPUP_W.min(area.width.saturating_sub(2));
    let value_w = (popup_w as usize).saturating_sub(LABEL_W + 4);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(
        format!(" {}", modal.title()),
        header_style,
    )));
    lines.push(Line::from(""));

    for &field in FormField::order(modal.is_edit()) {
        let is_focused = focused == Some(field) && !submitting;
        let style = if is_focused { focus_style } else { text_style };
        let mut spans = vec![Span::styled(
            format!(" {:<width$}", field.label(), width = LABEL_W),
            label_style,
        )];

        match field {
            FormField::Priority => {
                let arrows = if is_focused { ("\u{25C0} ", " \u{25B6}") } else { ("  ", "  ") };
                spans.push(Span::styled(arrows.0, style));
                spans.push(Span::styled(
                    form.priority.label(),
                    style.fg(app.theme.priority_color(form.priority)),
                ));
                spans.push(Span::styled(arrows.1, style));
            }
            FormField::Completed => {
                let check = if form.completed { "[x]" } else { "[ ]" };
                spans.push(Span::styled(check, style));
            }
            _ => {
                let value = form.text(field).unwrap_or_default();
                let (cursor, budget) = if is_focused {
                    ("\u{258C}", value_w.saturating_sub(1))
                } else {
                    ("", value_w)
                };
                // Show the tail of long values so the cursor stays visible
                let shown = tail_to_width(value, budget);
                spans.push(Span::styled(shown, style));
                spans.push(Span::styled(cursor, style.fg(app.theme.highlight)));
            }
        }
        lines.push(Line::from(spans));

        if let Some(err) = form.errors.get(field) {
            lines.push(Line::from(vec![
                Span::styled(" ".repeat(LABEL_W + 1), text_style),
                Span::styled(err.to_string(), error_style),
            ]));
        }
    }

    lines.push(Line::from(""));
    if submitting {
        lines.push(Line::from(Span::styled(" Saving\u{2026}", label_style)));
    } else {
        lines.push(Line::from(vec![
            Span::styled(" Enter", header_style),
            Span::styled(" save  ", label_style),
            Span::styled("Tab", header_style),
            Span::styled(" next field  ", label_style),
            Span::styled("Esc", header_style),
            Span::styled(" cancel", label_style),
        ]));
    }

    let popup_h = (lines.len() as u16 + 2).min(area.height);
    let overlay_area = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.highlight).bg(bg))
        .style(Style::default().bg(bg));
    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));
    frame.render_widget(paragraph, overlay_area);
}

/// The widest suffix of `s` that fits in `max_cells`
fn tail_to_width(s: &str, max_cells: usize) -> String {
    if unicode::display_width(s) <= max_cells {
        return s.to_string();
    }
    let mut width = 0;
    let mut start = s.len();
    for (idx, c) in s.char_indices().rev() {
        let cw = unicode::display_width(c.encode_utf8(&mut [0; 4]));
        if width + cw > max_cells {
            break;
        }
        width += cw;
        start = idx;
    }
    s[start..].to_string()
}
