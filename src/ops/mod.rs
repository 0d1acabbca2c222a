pub mod form;
pub mod stats;
