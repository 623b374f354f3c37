//! Application layer for the Finance context.

pub mod command_handlers;
pub mod query_handlers;
