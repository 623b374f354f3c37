//! NexusOne: Analytics bounded context.
//!
//! Responsible for folding finance and task events into per-user dashboard
//! metrics and serving those metrics to read-only dashboard queries.

pub mod application;
pub mod domain;
