//! Event bus configuration.

/// Default number of serialization lanes.
pub const DEFAULT_LANES: usize = 8;

/// Default per-lane queue capacity.
pub const DEFAULT_LANE_CAPACITY: usize = 1024;

/// Sizing of the bus's dispatch lanes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventBusConfig {
    /// Number of independent lanes. Events are assigned to a lane by user.
    pub lanes: usize,
    /// Bounded queue length of each lane. Publishers wait when their lane is
    /// full.
    pub lane_capacity: usize,
}

impl EventBusConfig {
    /// Sets the lane count (clamped to at least one).
    #[must_use]
    pub fn with_lanes(mut self, lanes: usize) -> Self {
        self.lanes = lanes.max(1);
        self
    }

    /// Sets the per-lane capacity (clamped to at least one).
    #[must_use]
    pub fn with_lane_capacity(mut self, lane_capacity: usize) -> Self {
        self.lane_capacity = lane_capacity.max(1);
        self
    }
}

impl Default for EventBusConfig {
    fn default() -> Self {
        Self {
            lanes: DEFAULT_LANES,
            lane_capacity: DEFAULT_LANE_CAPACITY,
        }
    }
}
