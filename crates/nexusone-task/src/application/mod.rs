//! Application layer for the Task context.

pub mod command_handlers;
pub mod query_handlers;
