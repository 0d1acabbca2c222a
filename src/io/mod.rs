pub mod config_io;
pub mod remote;
pub mod snapshot;
pub mod store;
pub mod worker;
