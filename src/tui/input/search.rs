use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Mode};

pub(super) fn handle_search(app: &mut App, key: KeyEvent, now: Instant) {
    let mut term = app.controller.view().search.clone();
    match (key.modifiers, key.code) {
        // Leave the search box; the term (and its pending fetch) stays
        (_, KeyCode::Esc | KeyCode::Enter) => {
            app.mode = Mode::Navigate;
            return;
        }
        (_, KeyCode::Backspace) => {
            if term.pop().is_none() {
                return;
            }
        }
        (KeyModifiers::CONTROL, KeyCode::Char('u')) => {
            if term.is_empty() {
                return;
            }
            term.clear();
        }
        (m, KeyCode::Char(c)) if !m.contains(KeyModifiers::CONTROL) => term.push(c),
        _ => return,
    }
    app.controller.search_input(term, now);
    app.cursor = 0;
}

#[cfg(test)]
mod tests {
    use super::super::tests::{loaded_app, press, type_str};
    use super::*;

    #[test]
    fn editing_keys() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Char('/'));
        type_str(&mut app, "milk");
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.controller.view().search, "mil");

        let key = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL);
        handle_search(&mut app, key, Instant::now());
        assert_eq!(app.controller.view().search, "");
        assert!(app.controller.next_deadline().is_some());
    }

    #[test]
    fn backspace_on_empty_schedules_nothing() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Char('/'));
        press(&mut app, KeyCode::Backspace);
        assert!(app.controller.next_deadline().is_none());
    }
}
