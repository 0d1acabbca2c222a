use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::unicode;

/// Render the header: app title and source, the stat cards, and a separator
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title
            Constraint::Length(1), // stats
            Constraint::Length(1), // separator
        ])
        .split(area);

    render_title(frame, app, chunks[0]);
    render_stats(frame, app, chunks[1]);

    let sep = Paragraph::new("\u{2500}".repeat(area.width as usize))
        .style(Style::default().fg(app.theme.dim).bg(app.theme.background));
    frame.render_widget(sep, chunks[2]);
}

fn render_title(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let title = " \u{25B6} Taskdeck";
    let width = area.width as usize;
    let title_width = unicode::display_width(title);

    let mut spans = vec![Span::styled(
        title,
        Style::default()
            .fg(app.theme.highlight)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    )];
    // Source on the right, truncated to whatever room is left
    let room = width.saturating_sub(title_width + 2);
    if room > 0 {
        let source = unicode::truncate_to_width(&app.source, room);
        let padding = width - title_width - unicode::display_width(&source) - 1;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(source, Style::default().fg(app.theme.dim).bg(bg)));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)),
        area,
    );
}

fn render_stats(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let stats = app.controller.stats(app.now());
    let label_style = Style::default().fg(app.theme.dim).bg(bg);

    let mut spans = vec![Span::styled(" ", label_style)];
    let mut card = |label: &'static str, value: String, color: Color| {
        if spans.len() > 1 {
            spans.push(Span::styled("  \u{2502}  ", label_style));
        }
        spans.push(Span::styled(format!("{} ", label), label_style));
        spans.push(Span::styled(
            value,
            Style::default()
                .fg(color)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ));
    };
    card("Total", stats.total.to_string(), app.theme.text_bright);
    card(
        "Completed",
        format!("{} ({}%)", stats.completed, stats.completion_rate),
        app.theme.green,
    );
    card("Upcoming", stats.upcoming.to_string(), app.theme.highlight);
    card(
        "Overdue",
        stats.overdue.to_string(),
        if stats.overdue > 0 {
            app.theme.red
        } else {
            app.theme.text
        },
    );

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)),
        area,
    );
}
