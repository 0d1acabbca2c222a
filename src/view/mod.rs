pub mod collection;
pub mod controller;
pub mod modal;
pub mod request;
pub mod state;
pub mod timers;

pub use controller::Controller;
pub use request::{Command, Outcome, Reply, Request, Ticket};
pub use state::ViewState;
