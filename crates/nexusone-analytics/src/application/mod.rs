//! Application layer for the Analytics context.

pub mod aggregation_engine;
pub mod query_handlers;
