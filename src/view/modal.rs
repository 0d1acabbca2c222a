use crate::model::task::Task;
use crate::ops::form::TaskForm;

use super::request::Ticket;

/// What the task modal was opened for
#[derive(Debug, Clone, PartialEq)]
pub enum ModalKind {
    Add,
    /// Editing `original`, as it was when the modal opened
    Edit { original: Task },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskModal {
    pub kind: ModalKind,
    pub form: TaskForm,
}

impl TaskModal {
    pub fn title(&self) -> &'static str {
        match self.kind {
            ModalKind::Add => "Add New Task",
            ModalKind::Edit { .. } => "Edit Task",
        }
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.kind, ModalKind::Edit { .. })
    }
}

/// Lifecycle of the add/edit modal.
///
/// Field errors keep it `Open`; a store failure returns it from `Submitting`
/// to `Open`; success closes it.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    Open(TaskModal),
    Submitting { modal: TaskModal, ticket: Ticket },
}

impl ModalState {
    pub fn is_closed(&self) -> bool {
        matches!(self, ModalState::Closed)
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, ModalState::Submitting { .. })
    }

    pub fn modal(&self) -> Option<&TaskModal> {
        match self {
            ModalState::Closed => None,
            ModalState::Open(modal) | ModalState::Submitting { modal, .. } => Some(modal),
        }
    }

    /// The form, editable only while `Open`
    pub fn form_mut(&mut self) -> Option<&mut TaskForm> {
        match self {
            ModalState::Open(modal) => Some(&mut modal.form),
            _ => None,
        }
    }

    pub fn submitting_ticket(&self) -> Option<Ticket> {
        match self {
            ModalState::Submitting { ticket, .. } => Some(*ticket),
            _ => None,
        }
    }
}

/// Phase of a pending delete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletePhase {
    Confirming,
    Deleting(Ticket),
}

/// A delete awaiting confirmation (or the store)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub id: u64,
    pub title: String,
    pub phase: DeletePhase,
}
