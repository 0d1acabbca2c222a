use std::collections::{HashMap, HashSet};
use std::mem;
use std::time::Instant;

use chrono::{DateTime, Local, NaiveDate};

use crate::io::store::StoreError;
use crate::model::config::ThemeName;
use crate::model::query::{Sort, StatusFilter};
use crate::model::task::Task;
use crate::ops::form::TaskForm;
use crate::ops::stats::{TaskStats, stats};

use super::collection::TaskCollection;
use super::modal::{DeletePhase, ModalKind, ModalState, PendingDelete, TaskModal};
use super::request::{Command, Outcome, Reply, Request, Ticket};
use super::state::ViewState;
use super::timers::{Debounce, Notifier, SEARCH_DEBOUNCE};

pub const FETCH_FAILED: &str = "Failed to fetch tasks. Please try again.";
pub const ADD_FAILED: &str = "Failed to add task. Please try again.";
pub const UPDATE_FAILED: &str = "Failed to update task. Please try again.";
pub const DELETE_FAILED: &str = "Failed to delete task. Please try again.";
pub const MISSING_ID: &str = "Cannot update a task that has not been saved yet.";
pub const MISSING_ID_DELETE: &str = "Cannot delete a task that has not been saved yet.";

pub const ADDED: &str = "Task added successfully!";
pub const UPDATED: &str = "Task updated successfully!";
pub const MARKED_COMPLETE: &str = "Task marked as complete!";
pub const MARKED_INCOMPLETE: &str = "Task marked as incomplete";
pub const DELETED: &str = "Task deleted successfully!";

/// What an update changed, for picking the notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Completed(bool),
    Edited,
}

impl Change {
    /// Judged on what the user edited, not on the normalized task
    fn between(original: &Task, form: &TaskForm) -> Change {
        if form.changes_only_completion(original) {
            Change::Completed(form.completed)
        } else {
            Change::Edited
        }
    }

    fn message(self) -> &'static str {
        match self {
            Change::Completed(true) => MARKED_COMPLETE,
            Change::Completed(false) => MARKED_INCOMPLETE,
            Change::Edited => UPDATED,
        }
    }
}

/// Context kept for each request until its reply arrives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    List,
    Create,
    Update { id: u64, change: Change, toggle: bool },
    Delete { id: u64 },
}

/// Owner of all client-side view state and sequencer of store calls.
///
/// The controller never talks to the store itself. Each operation queues
/// tagged `Request`s (collected with `take_requests`), and the caller feeds
/// the matching `Reply`s back through `apply`. Timers are driven by `tick`.
#[derive(Debug)]
pub struct Controller {
    view: ViewState,
    tasks: TaskCollection,
    error: Option<String>,
    notifier: Notifier,
    modal: ModalState,
    delete: Option<PendingDelete>,
    search_focused: bool,
    search_timer: Debounce,
    next_ticket: u64,
    latest_list: Option<Ticket>,
    in_flight: HashMap<Ticket, Pending>,
    toggling: HashSet<u64>,
    outbox: Vec<Request>,
}

impl Controller {
    pub fn new(view: ViewState) -> Self {
        Controller {
            view,
            tasks: TaskCollection::new(),
            error: None,
            notifier: Notifier::default(),
            modal: ModalState::Closed,
            delete: None,
            search_focused: false,
            search_timer: Debounce::new(SEARCH_DEBOUNCE),
            next_ticket: 1,
            latest_list: None,
            in_flight: HashMap::new(),
            toggling: HashSet::new(),
            outbox: Vec::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Read-only views

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn tasks(&self) -> &TaskCollection {
        &self.tasks
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn notification(&self) -> Option<&str> {
        self.notifier.message()
    }

    pub fn modal(&self) -> &ModalState {
        &self.modal
    }

    pub fn pending_delete(&self) -> Option<&PendingDelete> {
        self.delete.as_ref()
    }

    pub fn search_focused(&self) -> bool {
        self.search_focused
    }

    /// True while the current list or any mutation is outstanding.
    /// Superseded list requests do not count.
    pub fn is_loading(&self) -> bool {
        self.in_flight.iter().any(|(ticket, pending)| match pending {
            Pending::List => Some(*ticket) == self.latest_list,
            _ => true,
        })
    }

    pub fn is_toggling(&self, id: u64) -> bool {
        self.toggling.contains(&id)
    }

    pub fn stats(&self, now: DateTime<Local>) -> TaskStats {
        stats(&self.tasks, now)
    }

    /// Earliest instant at which `tick` has something to do
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.search_timer.deadline(), self.notifier.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Requests queued since the last call, in issue order
    pub fn take_requests(&mut self) -> Vec<Request> {
        mem::take(&mut self.outbox)
    }

    // -----------------------------------------------------------------------
    // Request plumbing

    fn issue(&mut self, pending: Pending, command: Command) -> Ticket {
        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        tracing::debug!(%ticket, request = command.name(), "issuing request");
        self.in_flight.insert(ticket, pending);
        self.outbox.push(Request { ticket, command });
        ticket
    }

    fn fetch(&mut self) {
        let query = self.view.query();
        let ticket = self.issue(Pending::List, Command::List(query));
        self.latest_list = Some(ticket);
    }

    fn fail(&mut self, message: &str, error: &StoreError) {
        tracing::error!(error = %error, "{}", message);
        self.error = Some(message.to_string());
    }

    // -----------------------------------------------------------------------
    // Listing

    /// First load
    pub fn activate(&mut self) {
        self.fetch();
    }

    /// Re-list with the current settings, keeping the visible rows
    pub fn refresh(&mut self) {
        self.search_timer.cancel();
        self.fetch();
    }

    pub fn set_filter(&mut self, filter: StatusFilter) {
        self.view.filter = filter;
        self.relist();
    }

    pub fn set_sort(&mut self, sort: Sort) {
        self.view.sort = sort;
        self.relist();
    }

    /// Clear the rows so nothing stale shows, then fetch. A pending search
    /// timer is dropped since the new request already carries the term.
    fn relist(&mut self) {
        self.tasks.clear();
        self.search_timer.cancel();
        self.fetch();
    }

    /// Update the search term now; the list call follows once typing pauses
    pub fn search_input(&mut self, term: impl Into<String>, now: Instant) {
        self.view.search = term.into();
        self.search_timer.schedule(now);
    }

    pub fn set_search_focus(&mut self, focused: bool) {
        self.search_focused = focused;
    }

    /// Advance timers: fire the search debounce, expire the notification
    pub fn tick(&mut self, now: Instant) {
        if self.search_timer.fire(now) {
            self.fetch();
        }
        self.notifier.tick(now);
    }

    // -----------------------------------------------------------------------
    // Banner, theme

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn set_theme(&mut self, theme: ThemeName) {
        self.view.theme = theme;
    }

    pub fn cycle_theme(&mut self) {
        self.view.theme = self.view.theme.next();
    }

    // -----------------------------------------------------------------------
    // Add / edit modal

    pub fn open_add(&mut self, today: NaiveDate) {
        if self.modal.is_submitting() {
            return;
        }
        self.modal = ModalState::Open(TaskModal {
            kind: ModalKind::Add,
            form: TaskForm::blank(today),
        });
    }

    /// Open the edit modal for the row at `index`
    pub fn open_edit_at(&mut self, index: usize) {
        if self.modal.is_submitting() {
            return;
        }
        if let Some(task) = self.tasks.get_index(index).cloned() {
            // The form would hold the pre-toggle `completed` and undo it on save
            if task.id.is_some_and(|id| self.toggling.contains(&id)) {
                tracing::debug!(id = ?task.id, "edit ignored while toggle is in flight");
                return;
            }
            self.modal = ModalState::Open(TaskModal {
                form: TaskForm::from_task(&task),
                kind: ModalKind::Edit { original: task },
            });
        }
    }

    /// Close the modal. Ignored while a submit is outstanding.
    pub fn close_modal(&mut self) {
        if let ModalState::Open(_) = self.modal {
            self.modal = ModalState::Closed;
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut TaskForm> {
        self.modal.form_mut()
    }

    /// Validate and send the modal's form.
    ///
    /// Field errors keep the modal open with no request made. Editing a task
    /// that has no id sets the error banner instead.
    pub fn submit_modal(&mut self) {
        // Closed has nothing to submit; Submitting blocks a second submit.
        if !matches!(self.modal, ModalState::Open(_)) {
            return;
        }
        let ModalState::Open(mut modal) = mem::take(&mut self.modal) else {
            return;
        };
        let original = match &modal.kind {
            ModalKind::Add => None,
            ModalKind::Edit { original } => Some(original.clone()),
        };

        let (pending, command) = match original {
            None => match modal.form.submit(None) {
                Some(task) => (Pending::Create, Command::Create(task)),
                None => {
                    self.modal = ModalState::Open(modal);
                    return;
                }
            },
            Some(original) => {
                let Some(id) = original.id else {
                    tracing::warn!(title = %original.title, "update attempted on unsaved task");
                    self.error = Some(MISSING_ID.to_string());
                    self.modal = ModalState::Open(modal);
                    return;
                };
                let Some(task) = modal.form.submit(Some(id)) else {
                    self.modal = ModalState::Open(modal);
                    return;
                };
                let change = Change::between(&original, &modal.form);
                (
                    Pending::Update {
                        id,
                        change,
                        toggle: false,
                    },
                    Command::Update { id, task },
                )
            }
        };
        let ticket = self.issue(pending, command);
        self.modal = ModalState::Submitting { modal, ticket };
    }

    // -----------------------------------------------------------------------
    // Toggle complete

    /// Flip `completed` on the row at `index`
    pub fn toggle_complete_at(&mut self, index: usize) {
        let Some(task) = self.tasks.get_index(index) else {
            return;
        };
        let Some(id) = task.id else {
            tracing::warn!(title = %task.title, "toggle attempted on unsaved task");
            self.error = Some(MISSING_ID.to_string());
            return;
        };
        if self.toggling.contains(&id) {
            return;
        }
        let mut updated = task.clone();
        updated.completed = !updated.completed;
        let change = Change::Completed(updated.completed);
        self.toggling.insert(id);
        self.issue(
            Pending::Update {
                id,
                change,
                toggle: true,
            },
            Command::Update { id, task: updated },
        );
    }

    // -----------------------------------------------------------------------
    // Delete

    /// Ask for confirmation before deleting the row at `index`
    pub fn request_delete_at(&mut self, index: usize) {
        let Some(task) = self.tasks.get_index(index) else {
            return;
        };
        let id = task.id;
        match id {
            Some(id) => self.request_delete(id),
            None => self.error = Some(MISSING_ID_DELETE.to_string()),
        }
    }

    /// Ask for confirmation before deleting task `id`
    pub fn request_delete(&mut self, id: u64) {
        if matches!(
            self.delete,
            Some(PendingDelete {
                phase: DeletePhase::Deleting(_),
                ..
            })
        ) {
            return;
        }
        let Some(task) = self.tasks.get(id) else {
            return;
        };
        self.delete = Some(PendingDelete {
            id,
            title: task.title.clone(),
            phase: DeletePhase::Confirming,
        });
    }

    pub fn cancel_delete(&mut self) {
        if let Some(PendingDelete {
            phase: DeletePhase::Confirming,
            ..
        }) = self.delete
        {
            self.delete = None;
        }
    }

    pub fn confirm_delete(&mut self) {
        let Some(PendingDelete {
            id,
            phase: DeletePhase::Confirming,
            ..
        }) = self.delete
        else {
            return;
        };
        let ticket = self.issue(Pending::Delete { id }, Command::Delete(id));
        if let Some(pending) = &mut self.delete {
            pending.phase = DeletePhase::Deleting(ticket);
        }
    }

    // -----------------------------------------------------------------------
    // Replies

    /// Apply the result of a request issued earlier
    pub fn apply(&mut self, reply: Reply, now: Instant) {
        let Reply { ticket, result } = reply;
        let Some(pending) = self.in_flight.remove(&ticket) else {
            tracing::warn!(%ticket, "reply for unknown request");
            return;
        };

        match pending {
            Pending::List => self.apply_list(ticket, result),
            Pending::Create => self.apply_create(ticket, result, now),
            Pending::Update { id, change, toggle } => {
                if toggle {
                    self.toggling.remove(&id);
                }
                self.apply_update(ticket, id, change, result, now);
            }
            Pending::Delete { id } => self.apply_delete(id, result, now),
        }
    }

    fn apply_list(&mut self, ticket: Ticket, result: Result<Outcome, StoreError>) {
        if Some(ticket) != self.latest_list {
            tracing::debug!(%ticket, "discarding superseded list reply");
            return;
        }
        match result {
            Ok(Outcome::Listed(tasks)) => {
                tracing::debug!(%ticket, count = tasks.len(), "list applied");
                self.tasks.replace(tasks);
                self.error = None;
            }
            Ok(other) => tracing::warn!(%ticket, ?other, "unexpected outcome for list"),
            Err(e) => self.fail(FETCH_FAILED, &e),
        }
    }

    fn apply_create(&mut self, ticket: Ticket, result: Result<Outcome, StoreError>, now: Instant) {
        match result {
            Ok(Outcome::Created(task)) => {
                self.tasks.append(task);
                if self.modal.submitting_ticket() == Some(ticket) {
                    self.modal = ModalState::Closed;
                }
                self.notifier.show(ADDED, now);
            }
            Ok(other) => tracing::warn!(%ticket, ?other, "unexpected outcome for create"),
            Err(e) => {
                self.fail(ADD_FAILED, &e);
                self.reopen_modal(ticket);
            }
        }
    }

    fn apply_update(
        &mut self,
        ticket: Ticket,
        id: u64,
        change: Change,
        result: Result<Outcome, StoreError>,
        now: Instant,
    ) {
        match result {
            Ok(Outcome::Updated(mut task)) => {
                if task.id.is_none() {
                    task.id = Some(id);
                }
                if !self.tasks.replace_by_id(task) {
                    tracing::debug!(id, "updated task is no longer listed");
                }
                if self.modal.submitting_ticket() == Some(ticket) {
                    self.modal = ModalState::Closed;
                }
                self.notifier.show(change.message(), now);
            }
            Ok(other) => tracing::warn!(%ticket, ?other, "unexpected outcome for update"),
            Err(e) => {
                self.fail(UPDATE_FAILED, &e);
                self.reopen_modal(ticket);
            }
        }
    }

    fn apply_delete(&mut self, id: u64, result: Result<Outcome, StoreError>, now: Instant) {
        match result {
            Ok(_) => {
                self.tasks.remove_by_id(id);
                if self.delete.as_ref().is_some_and(|d| d.id == id) {
                    self.delete = None;
                }
                self.notifier.show(DELETED, now);
            }
            Err(e) => {
                self.fail(DELETE_FAILED, &e);
                if let Some(pending) = self.delete.as_mut().filter(|d| d.id == id) {
                    pending.phase = DeletePhase::Confirming;
                }
            }
        }
    }

    /// A failed submit puts the modal back to `Open` with the form intact
    fn reopen_modal(&mut self, ticket: Ticket) {
        if self.modal.submitting_ticket() != Some(ticket) {
            return;
        }
        if let ModalState::Submitting { modal, .. } = mem::take(&mut self.modal) {
            self.modal = ModalState::Open(modal);
        }
    }
}
