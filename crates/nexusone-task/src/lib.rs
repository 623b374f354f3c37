//! NexusOne: Task bounded context.
//!
//! Responsible for creating tasks, tracking their status, and announcing
//! completions to the aggregation core.

pub mod application;
pub mod domain;
pub mod infrastructure;
