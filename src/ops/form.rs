use chrono::NaiveDate;

use crate::model::task::{Priority, Task, end_of_day};

pub const TITLE_REQUIRED: &str = "Title is required.";
pub const DUE_DATE_REQUIRED: &str = "Due date is required.";
pub const DUE_DATE_INVALID: &str = "Due date must be a date (YYYY-MM-DD).";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Editable fields of the task form, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    Priority,
    DueDate,
    Completed,
}

impl FormField {
    const EDIT_ORDER: [FormField; 5] = [
        FormField::Title,
        FormField::Description,
        FormField::Priority,
        FormField::DueDate,
        FormField::Completed,
    ];

    /// Fields shown by the form; `Completed` only when editing
    pub fn order(is_edit: bool) -> &'static [FormField] {
        if is_edit {
            &Self::EDIT_ORDER
        } else {
            &Self::EDIT_ORDER[..4]
        }
    }

    /// Next field in tab order, wrapping
    pub fn next(self, is_edit: bool) -> FormField {
        let order = Self::order(is_edit);
        let idx = order.iter().position(|f| *f == self).unwrap_or(0);
        order[(idx + 1) % order.len()]
    }

    /// Previous field in tab order, wrapping
    pub fn prev(self, is_edit: bool) -> FormField {
        let order = Self::order(is_edit);
        let idx = order.iter().position(|f| *f == self).unwrap_or(0);
        order[(idx + order.len() - 1) % order.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Title => "Title",
            FormField::Description => "Description",
            FormField::Priority => "Priority",
            FormField::DueDate => "Due date",
            FormField::Completed => "Completed",
        }
    }

    pub fn is_text(self) -> bool {
        matches!(
            self,
            FormField::Title | FormField::Description | FormField::DueDate
        )
    }
}

/// Field-level validation messages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub title: Option<String>,
    pub due_date: Option<String>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.due_date.is_none()
    }

    pub fn count(&self) -> usize {
        usize::from(self.title.is_some()) + usize::from(self.due_date.is_some())
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        match field {
            FormField::Title => self.title.as_deref(),
            FormField::DueDate => self.due_date.as_deref(),
            _ => None,
        }
    }

    pub fn clear(&mut self, field: FormField) {
        match field {
            FormField::Title => self.title = None,
            FormField::DueDate => self.due_date = None,
            _ => {}
        }
    }
}

/// The create/edit form behind the task modal.
///
/// Text is kept exactly as typed; it is only interpreted on submit.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    /// Calendar date as typed, `YYYY-MM-DD`
    pub due_date: String,
    pub completed: bool,
    pub errors: FormErrors,
}

impl TaskForm {
    /// Empty form, due date defaulting to `today`
    pub fn blank(today: NaiveDate) -> Self {
        TaskForm {
            title: String::new(),
            description: String::new(),
            priority: Priority::default(),
            due_date: today.format(DATE_FORMAT).to_string(),
            completed: false,
            errors: FormErrors::default(),
        }
    }

    /// Form prefilled from an existing task
    pub fn from_task(task: &Task) -> Self {
        TaskForm {
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            priority: task.priority,
            due_date: task.due.date_naive().format(DATE_FORMAT).to_string(),
            completed: task.completed,
            errors: FormErrors::default(),
        }
    }

    fn text_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Title => Some(&mut self.title),
            FormField::Description => Some(&mut self.description),
            FormField::DueDate => Some(&mut self.due_date),
            FormField::Priority | FormField::Completed => None,
        }
    }

    pub fn text(&self, field: FormField) -> Option<&str> {
        match field {
            FormField::Title => Some(&self.title),
            FormField::Description => Some(&self.description),
            FormField::DueDate => Some(&self.due_date),
            FormField::Priority | FormField::Completed => None,
        }
    }

    /// Replace a text field. Clears that field's error only.
    pub fn set_text(&mut self, field: FormField, value: impl Into<String>) {
        if let Some(text) = self.text_mut(field) {
            *text = value.into();
            self.errors.clear(field);
        }
    }

    pub fn push_char(&mut self, field: FormField, c: char) {
        if let Some(text) = self.text_mut(field) {
            text.push(c);
            self.errors.clear(field);
        }
    }

    pub fn backspace(&mut self, field: FormField) {
        if let Some(text) = self.text_mut(field) {
            text.pop();
            self.errors.clear(field);
        }
    }

    pub fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }

    pub fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }

    /// Check required fields, replacing `errors`. Returns true when valid.
    pub fn validate(&mut self) -> bool {
        let mut errors = FormErrors::default();
        if self.title.trim().is_empty() {
            errors.title = Some(TITLE_REQUIRED.to_string());
        }
        let due = self.due_date.trim();
        if due.is_empty() {
            errors.due_date = Some(DUE_DATE_REQUIRED.to_string());
        } else if self.due_day().is_none() {
            errors.due_date = Some(DUE_DATE_INVALID.to_string());
        }
        self.errors = errors;
        self.errors.is_empty()
    }

    /// True when the form, read the way `submit` reads it, differs from
    /// `task` in `completed` alone. The due date compares by calendar day.
    pub fn changes_only_completion(&self, task: &Task) -> bool {
        let description = task.description.as_deref().unwrap_or_default();
        self.completed != task.completed
            && self.title.trim() == task.title.trim()
            && self.description.trim() == description.trim()
            && self.priority == task.priority
            && self.due_day() == Some(task.due.date_naive())
    }

    fn due_day(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.due_date.trim(), DATE_FORMAT).ok()
    }

    /// Validate and build the task to send to the store.
    ///
    /// The due date is normalized to the end of the chosen day, local time.
    /// `None` means the form has errors (now set on `self.errors`).
    pub fn submit(&mut self, id: Option<u64>) -> Option<Task> {
        if !self.validate() {
            return None;
        }
        let Some(due) = self.due_day().and_then(end_of_day) else {
            self.errors.due_date = Some(DUE_DATE_INVALID.to_string());
            return None;
        };
        let description = self.description.trim();
        Some(Task {
            id,
            title: self.title.trim().to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            priority: self.priority,
            due,
            completed: self.completed,
        })
    }
}
