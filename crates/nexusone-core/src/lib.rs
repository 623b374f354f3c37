//! NexusOne Core: shared domain abstractions.
//!
//! This crate defines the identifiers, domain events, metrics snapshot and
//! the narrow store/publisher traits that every other crate depends on. It
//! contains no infrastructure code.

pub mod clock;
pub mod error;
pub mod event;
pub mod ids;
pub mod metrics;
pub mod publisher;
pub mod store;
