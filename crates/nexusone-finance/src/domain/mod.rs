//! Domain layer for the Finance context.

pub mod commands;
pub mod repository;
pub mod transaction;
