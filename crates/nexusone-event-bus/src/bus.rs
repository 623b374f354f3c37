//! Event bus implementation.

use std::any::Any;
use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use async_trait::async_trait;
use futures::FutureExt;
use nexusone_core::error::DomainError;
use nexusone_core::event::{DomainEvent, EventType};
use nexusone_core::ids::UserId;
use nexusone_core::publisher::EventPublisher;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, trace, warn};

use crate::config::EventBusConfig;
use crate::error::{EventBusError, HandlerFailure};
use crate::handler::EventHandler;

type HandlerList = Vec<Arc<dyn EventHandler>>;

enum LaneMessage {
    Dispatch(DomainEvent),
    Flush(oneshot::Sender<()>),
}

/// Subscription table. Written only during start-up wiring.
#[derive(Default)]
struct Registry {
    handlers: RwLock<HashMap<EventType, HandlerList>>,
    sealed: AtomicBool,
}

impl Registry {
    fn handlers_for(&self, event_type: EventType) -> HandlerList {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&event_type)
            .cloned()
            .unwrap_or_default()
    }
}

#[derive(Debug, Default)]
struct Counters {
    published: AtomicU64,
    delivered: AtomicU64,
    failed: AtomicU64,
    panicked: AtomicU64,
    unhandled: AtomicU64,
}

/// Point-in-time dispatch counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BusStats {
    /// Events accepted by `publish`.
    pub published: u64,
    /// Handler invocations that completed successfully.
    pub delivered: u64,
    /// Handler invocations that returned an error.
    pub failed: u64,
    /// Handler invocations that panicked.
    pub panicked: u64,
    /// Events dispatched with no handler registered for their type.
    pub unhandled: u64,
}

/// In-process publish/subscribe router for domain events.
///
/// Handlers are registered with [`EventBus::subscribe`] during start-up; the
/// table is frozen by [`EventBus::seal`] or by the first publish. Each
/// published event is queued on the lane owning its user and delivered there
/// to every handler for its type, in registration order.
pub struct EventBus {
    registry: Arc<Registry>,
    counters: Arc<Counters>,
    lanes: RwLock<Option<Vec<mpsc::Sender<LaneMessage>>>>,
    workers: Mutex<Vec<JoinHandle<()>>>,
    lane_count: usize,
}

impl EventBus {
    /// Creates a bus and starts its lane workers.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    #[must_use]
    pub fn new(config: EventBusConfig) -> Self {
        let lane_count = config.lanes.max(1);
        let capacity = config.lane_capacity.max(1);
        let registry = Arc::new(Registry::default());
        let counters = Arc::new(Counters::default());

        let mut senders = Vec::with_capacity(lane_count);
        let mut workers = Vec::with_capacity(lane_count);
        for lane in 0..lane_count {
            let (tx, rx) = mpsc::channel(capacity);
            senders.push(tx);
            workers.push(tokio::spawn(run_lane(
                lane,
                rx,
                Arc::clone(&registry),
                Arc::clone(&counters),
            )));
        }

        debug!(lanes = lane_count, capacity, "event bus started");

        Self {
            registry,
            counters,
            lanes: RwLock::new(Some(senders)),
            workers: Mutex::new(workers),
            lane_count,
        }
    }

    /// Registers `handler` for events of `event_type`.
    ///
    /// # Errors
    ///
    /// Returns `EventBusError::Sealed` once the bus has been sealed.
    pub fn subscribe(
        &self,
        event_type: EventType,
        handler: Arc<dyn EventHandler>,
    ) -> Result<(), EventBusError> {
        let mut handlers = self
            .registry
            .handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if self.registry.sealed.load(Ordering::Acquire) {
            warn!(handler = handler.name(), %event_type, "subscription rejected: bus sealed");
            return Err(EventBusError::Sealed);
        }

        debug!(handler = handler.name(), %event_type, "subscribed handler");
        handlers.entry(event_type).or_default().push(handler);
        Ok(())
    }

    /// Freezes the subscription table. Idempotent.
    pub fn seal(&self) {
        if self.registry.sealed.load(Ordering::Acquire) {
            return;
        }
        let _guard = self
            .registry
            .handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if !self.registry.sealed.swap(true, Ordering::AcqRel) {
            info!("event bus sealed");
        }
    }

    /// Returns `true` once the subscription table is frozen.
    #[must_use]
    pub fn is_sealed(&self) -> bool {
        self.registry.sealed.load(Ordering::Acquire)
    }

    /// Number of handlers registered for `event_type`.
    #[must_use]
    pub fn handler_count(&self, event_type: EventType) -> usize {
        self.registry
            .handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&event_type)
            .map_or(0, Vec::len)
    }

    /// Queues `event` for dispatch on its user's lane.
    ///
    /// Returns once the event is queued; handlers run on the lane worker.
    /// Waits if the lane is full. Handler failures are never reported here.
    ///
    /// # Errors
    ///
    /// Returns `EventBusError::Closed` after [`EventBus::shutdown`].
    pub async fn publish(&self, event: DomainEvent) -> Result<(), EventBusError> {
        self.seal();

        let user_id = event.user_id();
        let event_type = event.event_type();
        let lane = self.lane_index(user_id);
        let sender = self.lane_sender(lane)?;

        // Counted before the send so a worker can never report an event that
        // `published` does not yet include.
        self.counters.published.fetch_add(1, Ordering::Relaxed);
        if sender.send(LaneMessage::Dispatch(event)).await.is_err() {
            self.counters.published.fetch_sub(1, Ordering::Relaxed);
            return Err(EventBusError::Closed);
        }

        trace!(%user_id, %event_type, lane, "event queued");
        Ok(())
    }

    /// Waits until every event queued before this call has been dispatched.
    ///
    /// # Errors
    ///
    /// Returns `EventBusError::Closed` after [`EventBus::shutdown`].
    pub async fn flush(&self) -> Result<(), EventBusError> {
        let senders = self
            .lanes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(EventBusError::Closed)?;

        let mut acks = Vec::with_capacity(senders.len());
        for sender in senders {
            let (tx, rx) = oneshot::channel();
            sender
                .send(LaneMessage::Flush(tx))
                .await
                .map_err(|_| EventBusError::Closed)?;
            acks.push(rx);
        }
        for ack in acks {
            ack.await.map_err(|_| EventBusError::Closed)?;
        }
        Ok(())
    }

    /// Stops accepting events, drains every lane and waits for the workers
    /// to exit. Idempotent.
    pub async fn shutdown(&self) {
        let senders = self
            .lanes
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if senders.is_none() {
            return;
        }
        drop(senders);

        let workers = std::mem::take(
            &mut *self
                .workers
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        );
        for worker in workers {
            if let Err(err) = worker.await {
                warn!(error = %err, "event lane worker did not exit cleanly");
            }
        }

        let stats = self.stats();
        info!(
            published = stats.published,
            delivered = stats.delivered,
            failed = stats.failed,
            panicked = stats.panicked,
            "event bus stopped"
        );
    }

    /// Returns the current dispatch counters.
    #[must_use]
    pub fn stats(&self) -> BusStats {
        // Outcomes are read before `published` so the snapshot never shows
        // more dispatched events than published ones.
        let delivered = self.counters.delivered.load(Ordering::Acquire);
        let failed = self.counters.failed.load(Ordering::Acquire);
        let panicked = self.counters.panicked.load(Ordering::Acquire);
        let unhandled = self.counters.unhandled.load(Ordering::Acquire);
        BusStats {
            published: self.counters.published.load(Ordering::Relaxed),
            delivered,
            failed,
            panicked,
            unhandled,
        }
    }

    /// Number of serialization lanes.
    #[must_use]
    pub fn lane_count(&self) -> usize {
        self.lane_count
    }

    #[allow(clippy::cast_possible_truncation)]
    fn lane_index(&self, user_id: UserId) -> usize {
        let mut hasher = DefaultHasher::new();
        user_id.hash(&mut hasher);
        // The remainder is below `lane_count`, so it fits in usize.
        (hasher.finish() % self.lane_count as u64) as usize
    }

    fn lane_sender(&self, lane: usize) -> Result<mpsc::Sender<LaneMessage>, EventBusError> {
        self.lanes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .and_then(|senders| senders.get(lane).cloned())
            .ok_or(EventBusError::Closed)
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("lane_count", &self.lane_count)
            .field("sealed", &self.is_sealed())
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl EventPublisher for EventBus {
    async fn publish(&self, event: DomainEvent) -> Result<(), DomainError> {
        EventBus::publish(self, event)
            .await
            .map_err(|err| DomainError::Infrastructure(err.to_string()))
    }
}

async fn run_lane(
    lane: usize,
    mut rx: mpsc::Receiver<LaneMessage>,
    registry: Arc<Registry>,
    counters: Arc<Counters>,
) {
    while let Some(message) = rx.recv().await {
        match message {
            LaneMessage::Dispatch(event) => dispatch(&registry, &counters, &event).await,
            LaneMessage::Flush(ack) => {
                // The flusher may have given up waiting.
                let _ = ack.send(());
            }
        }
    }
    debug!(lane, "event lane drained");
}

async fn dispatch(registry: &Registry, counters: &Counters, event: &DomainEvent) {
    let event_type = event.event_type();
    let handlers = registry.handlers_for(event_type);
    if handlers.is_empty() {
        counters.unhandled.fetch_add(1, Ordering::Release);
        debug!(%event_type, "no handlers registered for event");
        return;
    }

    for handler in &handlers {
        match invoke(handler.as_ref(), event).await {
            Ok(()) => {
                counters.delivered.fetch_add(1, Ordering::Release);
            }
            Err(failure) => {
                match failure {
                    HandlerFailure::Error(_) => counters.failed.fetch_add(1, Ordering::Release),
                    HandlerFailure::Panic(_) => counters.panicked.fetch_add(1, Ordering::Release),
                };
                error!(
                    handler = handler.name(),
                    %event_type,
                    user_id = %event.user_id(),
                    event_id = %event.metadata.event_id,
                    error = %failure,
                    "event handler failed"
                );
            }
        }
    }
}

async fn invoke(handler: &dyn EventHandler, event: &DomainEvent) -> Result<(), HandlerFailure> {
    match AssertUnwindSafe(handler.handle(event)).catch_unwind().await {
        Ok(result) => result.map_err(HandlerFailure::from),
        Err(payload) => Err(HandlerFailure::Panic(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}
