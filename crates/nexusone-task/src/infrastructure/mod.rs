//! Infrastructure adapters for the Task context.

pub mod in_memory;
