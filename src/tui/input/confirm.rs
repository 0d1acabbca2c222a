use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::App;
use crate::view::modal::DeletePhase;

pub(super) fn handle_confirm(app: &mut App, key: KeyEvent) {
    let confirming = app
        .controller
        .pending_delete()
        .is_some_and(|d| d.phase == DeletePhase::Confirming);
    if !confirming {
        return;
    }
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.controller.confirm_delete(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.controller.cancel_delete(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{loaded_app, press};
    use super::*;
    use crate::tui::app::Mode;
    use crate::view::request::{Outcome, Reply};
    use crate::view::Command;
    use std::time::Instant;

    #[test]
    fn n_cancels() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.mode, Mode::Navigate);
        assert!(app.controller.pending_delete().is_none());
        assert!(app.controller.take_requests().iter().all(|r| !matches!(r.command, Command::Delete(_))));
    }

    #[test]
    fn y_deletes_after_reply() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));
        let reqs = app.controller.take_requests();
        assert!(matches!(&reqs[..], [r] if r.command == Command::Delete(1)));
        // further keys are ignored while deleting
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, Mode::Confirm);

        app.controller
            .apply(Reply::ok(reqs[0].ticket, Outcome::Deleted(1)), Instant::now());
        app.sync();
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.controller.tasks().len(), 2);
    }
}
