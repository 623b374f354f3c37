//! NexusOne: Finance bounded context.
//!
//! Responsible for recording income and expense transactions and announcing
//! each one to the aggregation core.

pub mod application;
pub mod domain;
pub mod infrastructure;
