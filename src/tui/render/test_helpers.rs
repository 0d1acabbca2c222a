use chrono::{DateTime, Local, TimeZone};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::io::store::StoreError;
use crate::model::{Config, Priority, Task, end_of_day};
use crate::tui::app::App;
use crate::view::request::{Outcome, Reply};

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Prefix every line with `|` so leading spaces survive snapshot dedenting
pub fn framed(out: &str) -> String {
    out.lines()
        .map(|l| format!("|{}", l))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the whole screen at the standard test size
pub fn render_app(app: &mut App) -> String {
    render_to_string(TERM_W, TERM_H, |frame, _| super::render(frame, app))
}

/// Fixed "now" for render tests: 2025-06-10 09:00 local
pub fn fixed_now() -> DateTime<Local> {
    Local.with_ymd_and_hms(2025, 6, 10, 9, 0, 0).unwrap()
}

/// A task due at the end of June `day`, 2025
pub fn task(id: u64, title: &str, priority: Priority, day: u32) -> Task {
    let date = chrono::NaiveDate::from_ymd_opt(2025, 6, day).unwrap();
    Task::new(title, end_of_day(date).unwrap())
        .with_id(id)
        .with_priority(priority)
}

/// A read-only app on the fixed clock with `tasks` listed
pub fn app_with_tasks(tasks: Vec<Task>) -> App {
    let mut app = App::new(&Config::default(), true);
    app.clock = fixed_now;
    app.controller.activate();
    let req = app.controller.take_requests().remove(0);
    app.controller.apply(
        Reply::ok(req.ticket, Outcome::Listed(tasks)),
        std::time::Instant::now(),
    );
    app.sync();
    app
}

/// Issue a refresh and fail it, raising the fetch error banner
pub fn fail_next_list(app: &mut App) {
    app.controller.refresh();
    let req = app.controller.take_requests().remove(0);
    app.controller.apply(
        Reply::err(req.ticket, StoreError::Status { status: 500 }),
        std::time::Instant::now(),
    );
}

/// Three tasks around `fixed_now`: one overdue, one due soon, one done
pub fn sample_tasks() -> Vec<Task> {
    vec![
        task(1, "Pay rent", Priority::High, 8),
        task(2, "Buy milk", Priority::Medium, 11).with_description("2 liters"),
        task(3, "Read book", Priority::Low, 20).completed(true),
    ]
}
