//! NexusOne event bus.
//!
//! Routes published [`DomainEvent`](nexusone_core::event::DomainEvent)s to
//! the handlers subscribed for their type. Dispatch runs on a fixed set of
//! serialization lanes keyed by user, so events for one user are applied in
//! publish order while unrelated users proceed concurrently.

pub mod bus;
pub mod config;
pub mod error;
pub mod handler;

pub use bus::{BusStats, EventBus};
pub use config::EventBusConfig;
pub use error::{EventBusError, HandlerFailure};
pub use handler::EventHandler;
