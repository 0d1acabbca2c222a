use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::Task;
use crate::ops::stats::due_info;
use crate::tui::app::App;
use crate::util::unicode;

use super::push_highlighted_spans;

const PRIORITY_W: usize = 9;
const DATE_W: usize = 8;
const LABEL_W: usize = 16;
const BADGE_W: usize = 9;

/// Render the task rows, one line per task
pub fn render_task_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let visible_height = area.height as usize;

    if app.controller.tasks().is_empty() {
        let search = app.controller.view().search.trim().to_string();
        let msg = if app.controller.is_loading() {
            " Loading tasks\u{2026}".to_string()
        } else if !search.is_empty() {
            format!(" No tasks match \"{}\"", search)
        } else {
            " No tasks yet. Press a to add one.".to_string()
        };
        let empty = Paragraph::new(msg).style(Style::default().fg(app.theme.dim).bg(bg));
        frame.render_widget(empty, area);
        return;
    }

    app.scroll_into_view(visible_height);

    let search_re = app.active_search_re();
    let now = app.now();
    let width = area.width as usize;
    let title_w = width.saturating_sub(2 + 4 + 1 + PRIORITY_W + DATE_W + LABEL_W + BADGE_W);
    let tasks = app.controller.tasks();
    let deleting = app.controller.pending_delete().map(|d| d.id);

    let mut lines: Vec<Line> = Vec::with_capacity(visible_height);
    for (row, task) in tasks
        .iter()
        .enumerate()
        .skip(app.scroll_offset)
        .take(visible_height)
    {
        let is_cursor = row == app.cursor;
        let row_bg = if is_cursor {
            app.theme.selection_bg
        } else {
            bg
        };
        let base = Style::default().bg(row_bg);
        let mut spans: Vec<Span> = Vec::new();

        // Cursor marker and checkbox
        spans.push(Span::styled(
            if is_cursor { "\u{25B8} " } else { "  " },
            base.fg(app.theme.highlight),
        ));
        let toggling = task.id.is_some_and(|id| app.controller.is_toggling(id));
        let check = match (toggling, task.completed) {
            (true, _) => "[\u{2026}] ",
            (false, true) => "[x] ",
            (false, false) => "[ ] ",
        };
        let check_color = if task.completed {
            app.theme.green
        } else {
            app.theme.text
        };
        spans.push(Span::styled(check, base.fg(check_color)));

        // Title (and description, dimmed) with search matches highlighted
        let title_style = if deleting.is_some() && task.id == deleting {
            base.fg(app.theme.red).add_modifier(Modifier::CROSSED_OUT)
        } else if task.completed {
            base.fg(app.theme.dim).add_modifier(Modifier::CROSSED_OUT)
        } else if is_cursor {
            base.fg(app.theme.text_bright)
        } else {
            base.fg(app.theme.text)
        };
        let match_style = Style::default()
            .fg(app.theme.search_match_fg)
            .bg(app.theme.search_match_bg);
        push_title_spans(
            &mut spans,
            task,
            title_w,
            title_style,
            base.fg(app.theme.dim),
            match_style,
            search_re.as_ref(),
        );
        spans.push(Span::styled(" ", base));

        // Priority badge
        spans.push(Span::styled(
            unicode::fit_to_width(&format!("\u{25CF} {}", task.priority_display()), PRIORITY_W),
            base.fg(app.theme.priority_color(task.priority)),
        ));

        // Due date, days label and overdue / due-soon badge
        spans.push(Span::styled(
            unicode::fit_to_width(&task.due.format("%b %d").to_string(), DATE_W),
            base.fg(app.theme.text),
        ));
        let info = due_info(task, now);
        let (label, badge, color) = if task.completed {
            (String::new(), "", app.theme.dim)
        } else if info.is_overdue {
            (info.label(), "Overdue", app.theme.red)
        } else if info.due_soon {
            (info.label(), "Due soon", app.theme.orange)
        } else {
            (info.label(), "", app.theme.dim)
        };
        spans.push(Span::styled(
            unicode::fit_to_width(&label, LABEL_W),
            base.fg(color),
        ));
        spans.push(Span::styled(
            unicode::fit_to_width(badge, BADGE_W),
            base.fg(color).add_modifier(Modifier::BOLD),
        ));

        lines.push(Line::from(spans));
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

/// Title followed by ` · description`, fitted to exactly `width` cells
fn push_title_spans<'a>(
    spans: &mut Vec<Span<'a>>,
    task: &Task,
    width: usize,
    title_style: Style,
    desc_style: Style,
    match_style: Style,
    search_re: Option<&regex::Regex>,
) {
    let title = unicode::truncate_to_width(&task.title, width);
    let mut used = unicode::display_width(&title);
    push_highlighted_spans(spans, &title, title_style, match_style, search_re);

    if let Some(desc) = task.description.as_deref().filter(|d| !d.is_empty()) {
        let room = width.saturating_sub(used + 3);
        if room >= 4 {
            let desc = unicode::truncate_to_width(desc, room);
            used += 3 + unicode::display_width(&desc);
            spans.push(Span::styled(" \u{00B7} ", desc_style));
            push_highlighted_spans(spans, &desc, desc_style, match_style, search_re);
        }
    }
    if used < width {
        spans.push(Span::styled(" ".repeat(width - used), desc_style));
    }
}
