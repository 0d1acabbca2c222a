use std::fmt;

use crate::io::store::{StoreError, TaskService};
use crate::model::query::ListQuery;
use crate::model::task::Task;

/// Monotonically increasing tag attached to every store request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(pub u64);

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A store call the controller wants made
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    List(ListQuery),
    Create(Task),
    Update { id: u64, task: Task },
    Delete(u64),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::List(_) => "list",
            Command::Create(_) => "create",
            Command::Update { .. } => "update",
            Command::Delete(_) => "delete",
        }
    }

    /// Run the call against a store. Blocks for the duration of the call.
    pub fn execute(self, service: &dyn TaskService) -> Result<Outcome, StoreError> {
        match self {
            Command::List(query) => service.list(&query).map(Outcome::Listed),
            Command::Create(task) => service.create(&task).map(Outcome::Created),
            Command::Update { id, task } => service.update(id, &task).map(Outcome::Updated),
            Command::Delete(id) => service.delete(id).map(|()| Outcome::Deleted(id)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub ticket: Ticket,
    pub command: Command,
}

/// Successful result of a store call
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Listed(Vec<Task>),
    Created(Task),
    Updated(Task),
    Deleted(u64),
}

/// Result of a request, handed back to the controller
#[derive(Debug)]
pub struct Reply {
    pub ticket: Ticket,
    pub result: Result<Outcome, StoreError>,
}

impl Reply {
    pub fn ok(ticket: Ticket, outcome: Outcome) -> Self {
        Reply {
            ticket,
            result: Ok(outcome),
        }
    }

    pub fn err(ticket: Ticket, error: StoreError) -> Self {
        Reply {
            ticket,
            result: Err(error),
        }
    }
}
