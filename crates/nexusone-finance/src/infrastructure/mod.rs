//! Infrastructure adapters for the Finance context.

pub mod in_memory;
