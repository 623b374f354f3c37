//! Shared test doubles and utilities for the NexusOne workspace.

mod clock;
mod handler;
mod publisher;
mod store;

pub use clock::{FixedClock, ManualClock};
pub use handler::{PanickingHandler, RecordingHandler};
pub use publisher::{FailingPublisher, RecordingPublisher};
pub use store::FailingMetricsStore;
