//! Domain layer for the Task context.

pub mod commands;
pub mod repository;
pub mod task;
