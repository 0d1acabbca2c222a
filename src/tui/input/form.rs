use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ops::form::FormField;
use crate::tui::app::{App, Mode};

pub(super) fn handle_form(app: &mut App, key: KeyEvent, field: FormField) {
    // The modal is frozen until the store answers
    if app.controller.modal().is_submitting() {
        return;
    }
    let is_edit = app
        .controller
        .modal()
        .modal()
        .is_some_and(|m| m.is_edit());

    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => app.controller.close_modal(),
        (_, KeyCode::Enter) => app.controller.submit_modal(),
        (_, KeyCode::Tab) => app.mode = Mode::Form(field.next(is_edit)),
        (_, KeyCode::BackTab) => app.mode = Mode::Form(field.prev(is_edit)),
        (_, KeyCode::Down) => app.mode = Mode::Form(field.next(is_edit)),
        (_, KeyCode::Up) => app.mode = Mode::Form(field.prev(is_edit)),
        _ => edit_field(app, key, field),
    }
}

fn edit_field(app: &mut App, key: KeyEvent, field: FormField) {
    let Some(form) = app.controller.form_mut() else {
        return;
    };
    match field {
        FormField::Priority => match key.code {
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('+') => {
                form.set_priority(form.priority.raise())
            }
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('-') => {
                form.set_priority(form.priority.lower())
            }
            _ => {}
        },
        FormField::Completed => {
            if matches!(key.code, KeyCode::Char(' ') | KeyCode::Char('x')) {
                form.set_completed(!form.completed);
            }
        }
        _ => match (key.modifiers, key.code) {
            (_, KeyCode::Backspace) => form.backspace(field),
            (KeyModifiers::CONTROL, KeyCode::Char('u')) => form.set_text(field, ""),
            (m, KeyCode::Char(c)) if !m.contains(KeyModifiers::CONTROL) => {
                form.push_char(field, c)
            }
            _ => {}
        },
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{loaded_app, press, type_str};
    use super::*;
    use crate::model::Priority;
    use crate::view::Command;

    fn form_field(app: &App) -> FormField {
        match app.mode {
            Mode::Form(f) => f,
            other => panic!("not in form mode: {:?}", other),
        }
    }

    #[test]
    fn tab_cycles_add_fields() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Char('a'));
        let mut seen = vec![form_field(&app)];
        for _ in 0..4 {
            press(&mut app, KeyCode::Tab);
            seen.push(form_field(&app));
        }
        assert_eq!(
            seen,
            vec![
                FormField::Title,
                FormField::Description,
                FormField::Priority,
                FormField::DueDate,
                FormField::Title,
            ]
        );
        press(&mut app, KeyCode::BackTab);
        assert_eq!(form_field(&app), FormField::DueDate);
    }

    #[test]
    fn typing_and_priority_keys() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "ab c");
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        // letters on the priority field do not type
        type_str(&mut app, "lll");
        press(&mut app, KeyCode::Left);

        let form = &app.controller.modal().modal().unwrap().form;
        assert_eq!(form.title, "ab ");
        assert_eq!(form.priority, Priority::Medium);
    }

    #[test]
    fn space_toggles_completed_when_editing() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Char('e'));
        for _ in 0..4 {
            press(&mut app, KeyCode::Tab);
        }
        assert_eq!(form_field(&app), FormField::Completed);
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Enter);

        let reqs = app.controller.take_requests();
        assert!(matches!(&reqs[..], [r] if matches!(r.command, Command::Update { id: 1, ref task } if task.completed)));
    }

    #[test]
    fn invalid_submit_stays_open() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Enter);
        assert!(app.controller.take_requests().is_empty());
        assert_eq!(form_field(&app), FormField::Title);
        let form = &app.controller.modal().modal().unwrap().form;
        assert!(form.errors.get(FormField::Title).is_some());
    }

    #[test]
    fn esc_closes_without_request() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "draft");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, Mode::Navigate);
        assert!(app.controller.modal().is_closed());
        assert!(app.controller.take_requests().is_empty());
    }

    #[test]
    fn keys_ignored_while_submitting() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "x");
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Esc);
        type_str(&mut app, "y");
        assert!(app.controller.modal().is_submitting());
        assert_eq!(app.controller.modal().modal().unwrap().form.title, "x");
    }
}
