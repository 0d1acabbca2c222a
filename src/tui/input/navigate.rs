use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::StatusFilter;
use crate::ops::form::FormField;
use crate::tui::app::{App, Mode};

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent, _now: Instant) {
    let len = app.controller.tasks().len();

    match (key.modifiers, key.code) {
        (_, KeyCode::Char('q')) => app.should_quit = true,
        (_, KeyCode::Char('?')) => app.show_help = true,

        // Cursor
        (_, KeyCode::Char('j') | KeyCode::Down) => {
            if app.cursor + 1 < len {
                app.cursor += 1;
            }
        }
        (_, KeyCode::Char('k') | KeyCode::Up) => {
            app.cursor = app.cursor.saturating_sub(1);
        }
        (_, KeyCode::Char('g') | KeyCode::Home) => app.cursor = 0,
        (_, KeyCode::Char('G') | KeyCode::End) => app.cursor = len.saturating_sub(1),

        // Task actions
        (KeyModifiers::NONE, KeyCode::Char(' ')) => app.controller.toggle_complete_at(app.cursor),
        (KeyModifiers::NONE, KeyCode::Char('a')) => {
            let today = app.today();
            app.controller.open_add(today);
            enter_form(app);
        }
        (KeyModifiers::NONE, KeyCode::Char('e')) | (_, KeyCode::Enter) => {
            app.controller.open_edit_at(app.cursor);
            enter_form(app);
        }
        (KeyModifiers::NONE, KeyCode::Char('d')) => {
            app.controller.request_delete_at(app.cursor);
            if app.controller.pending_delete().is_some() {
                app.mode = Mode::Confirm;
            }
        }
        (KeyModifiers::NONE, KeyCode::Char('r')) => app.controller.refresh(),

        // View settings
        (_, KeyCode::Char('/')) => app.mode = Mode::Search,
        (KeyModifiers::NONE, KeyCode::Char('f')) => {
            let next = app.controller.view().filter.next();
            app.controller.set_filter(next);
        }
        (_, KeyCode::Char(c @ '1'..='3')) => {
            let idx = c as usize - '1' as usize;
            app.controller.set_filter(StatusFilter::ALL[idx]);
        }
        (KeyModifiers::NONE, KeyCode::Char('s')) => {
            let next = app.controller.view().sort.next();
            app.controller.set_sort(next);
        }
        (KeyModifiers::NONE, KeyCode::Char('t')) => app.controller.cycle_theme(),
        (KeyModifiers::NONE, KeyCode::Char('x')) | (_, KeyCode::Esc) => {
            app.controller.dismiss_error()
        }
        _ => {}
    }
}

/// Switch to form mode if the controller actually opened the modal
fn enter_form(app: &mut App) {
    if !app.controller.modal().is_closed() {
        app.mode = Mode::Form(FormField::Title);
    }
}
