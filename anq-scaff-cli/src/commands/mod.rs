//! CLI command implementations

pub mod add;

pub use add::{add_resource, AddCommand, AddOutcome, AddRequest};
