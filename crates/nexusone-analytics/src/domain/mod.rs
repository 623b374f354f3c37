//! Domain layer for the Analytics context.

pub mod rules;
