use std::collections::HashMap;
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local, NaiveDate};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use regex::Regex;

use crate::io::store::StoreClient;
use crate::io::worker::RequestWorker;
use crate::model::Config;
use crate::ops::form::FormField;
use crate::view::{Controller, ViewState};

use super::input;
use super::render;
use super::theme::Theme;

/// Longest wait for input while idle
const IDLE_POLL: Duration = Duration::from_millis(250);
/// Wait while a request is outstanding, so replies show promptly
const BUSY_POLL: Duration = Duration::from_millis(30);

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Typing in the search box
    Search,
    /// Add/edit modal open, with the focused field
    Form(FormField),
    /// Delete confirmation popup
    Confirm,
}

/// Main application state
pub struct App {
    pub controller: Controller,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    color_overrides: HashMap<String, String>,
    /// Cursor row in the task list
    pub cursor: usize,
    /// First visible row
    pub scroll_offset: usize,
    /// Help overlay visible
    pub show_help: bool,
    /// No remote store configured: mutations will fail
    pub read_only: bool,
    /// Where tasks come from, shown in the header
    pub source: String,
    /// Wall clock for due-date labels and form defaults
    pub clock: fn() -> DateTime<Local>,
}

impl App {
    pub fn new(config: &Config, read_only: bool) -> Self {
        let view = ViewState::from_config(&config.ui);
        let theme = Theme::with_overrides(view.theme, &config.ui.colors);
        let source = match config.api.base_url() {
            Some(url) => url.to_string(),
            None => format!("{} (read-only)", config.snapshot.path.display()),
        };
        App {
            controller: Controller::new(view),
            mode: Mode::Navigate,
            should_quit: false,
            theme,
            color_overrides: config.ui.colors.clone(),
            cursor: 0,
            scroll_offset: 0,
            show_help: false,
            read_only,
            source,
            clock: Local::now,
        }
    }

    pub fn now(&self) -> DateTime<Local> {
        (self.clock)()
    }

    pub fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    /// Bring derived UI state in line with the controller: theme palette,
    /// cursor bounds, and modes whose backing state has gone away.
    pub fn sync(&mut self) {
        let name = self.controller.view().theme;
        if self.theme.name != name {
            self.theme = Theme::with_overrides(name, &self.color_overrides);
        }

        let len = self.controller.tasks().len();
        if len == 0 {
            self.cursor = 0;
        } else {
            self.cursor = self.cursor.min(len - 1);
        }

        match self.mode {
            Mode::Form(_) if self.controller.modal().is_closed() => self.mode = Mode::Navigate,
            Mode::Confirm if self.controller.pending_delete().is_none() => {
                self.mode = Mode::Navigate
            }
            _ => {}
        }
        self.controller.set_search_focus(self.mode == Mode::Search);
    }

    /// Case-insensitive literal match of the search term, for highlighting
    pub fn active_search_re(&self) -> Option<Regex> {
        let term = self.controller.view().search.trim();
        if term.is_empty() {
            return None;
        }
        Regex::new(&format!("(?i){}", regex::escape(term))).ok()
    }

    /// Keep the cursor row inside a viewport of `height` rows
    pub fn scroll_into_view(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.cursor < self.scroll_offset {
            self.scroll_offset = self.cursor;
        } else if self.cursor >= self.scroll_offset + height {
            self.scroll_offset = self.cursor + 1 - height;
        }
    }
}

/// How long the event loop may block waiting for a key
fn poll_timeout(app: &App, now: Instant) -> Duration {
    let ceiling = if app.controller.is_loading() {
        BUSY_POLL
    } else {
        IDLE_POLL
    };
    match app.controller.next_deadline() {
        Some(deadline) => deadline.saturating_duration_since(now).min(ceiling),
        None => ceiling,
    }
}

/// Feed finished requests and timers into the controller, then start
/// whatever it queued.
fn pump(app: &mut App, worker: &RequestWorker) {
    let now = Instant::now();
    for reply in worker.poll() {
        app.controller.apply(reply, now);
    }
    app.controller.tick(now);
    for request in app.controller.take_requests() {
        worker.submit(request);
    }
    app.sync();
}

/// Run the TUI application
pub fn run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let client = StoreClient::from_config(config)?;
    let read_only = client.is_read_only();
    let worker = RequestWorker::new(Arc::new(client));

    let mut app = App::new(config, read_only);
    tracing::info!(source = %app.source, "starting tui");
    app.controller.activate();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app, &worker);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("tui exited");
    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    worker: &RequestWorker,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        pump(app, worker);
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(poll_timeout(app, Instant::now()))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key, Instant::now());
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ThemeName;
    use crate::view::request::{Outcome, Reply};

    fn test_app() -> App {
        App::new(&Config::default(), true)
    }

    #[test]
    fn source_names_snapshot_when_read_only() {
        let app = test_app();
        assert_eq!(app.source, "tasks.json (read-only)");

        let mut config = Config::default();
        config.api.base_url = Some("http://localhost:8085/api".into());
        let app = App::new(&config, false);
        assert_eq!(app.source, "http://localhost:8085/api");
    }

    #[test]
    fn sync_follows_theme_and_clamps_cursor() {
        let mut app = test_app();
        app.cursor = 5;
        app.controller.set_theme(ThemeName::Teal);
        app.sync();
        assert_eq!(app.cursor, 0);
        assert_eq!(app.theme.name, ThemeName::Teal);
    }

    #[test]
    fn form_mode_ends_when_modal_closes() {
        let mut app = test_app();
        app.controller.open_add(app.today());
        app.mode = Mode::Form(FormField::Title);
        app.sync();
        assert_eq!(app.mode, Mode::Form(FormField::Title));

        app.controller.close_modal();
        app.sync();
        assert_eq!(app.mode, Mode::Navigate);
    }

    #[test]
    fn poll_timeout_respects_pending_debounce() {
        let mut app = test_app();
        let now = Instant::now();
        assert_eq!(poll_timeout(&app, now), IDLE_POLL);

        app.controller.activate();
        assert_eq!(poll_timeout(&app, now), BUSY_POLL);
        let req = app.controller.take_requests().remove(0);
        app.controller
            .apply(Reply::ok(req.ticket, Outcome::Listed(vec![])), now);

        app.controller.search_input("x", now);
        let t = poll_timeout(&app, now + Duration::from_millis(200));
        assert!(t <= Duration::from_millis(100));
    }

    #[test]
    fn search_regex_is_literal() {
        let mut app = test_app();
        assert!(app.active_search_re().is_none());
        app.controller.search_input("a.b", Instant::now());
        let re = app.active_search_re().unwrap();
        assert!(re.is_match("xA.By"));
        assert!(!re.is_match("axb"));
    }

    #[test]
    fn scroll_follows_cursor() {
        let mut app = test_app();
        app.cursor = 12;
        app.scroll_into_view(5);
        assert_eq!(app.scroll_offset, 8);
        app.cursor = 3;
        app.scroll_into_view(5);
        assert_eq!(app.scroll_offset, 3);
    }
}
