//! Car - 号機のハンドル
//!
//! Car 自体は受け身のデータで、動かすのは `service_loop`。
//! Dispatcher と CarGroup が `Arc<Car>` を共有する。

use std::sync::Arc;
use std::time::Duration;

use crate::domain::{CarId, CarState, DispatchError, Floor, FloorRange, Request};
use crate::observability::CarSnapshot;
use crate::ports::SchedulingStrategy;
use crate::queue::{CarQueue, Enqueued};

/// Simulated travel timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarTiming {
    /// Time to move one floor.
    pub floor_travel: Duration,
    /// Time the door stays open at a stop.
    pub door_dwell: Duration,
}

impl CarTiming {
    /// No simulated delay (tests, batch simulations).
    pub const INSTANT: CarTiming = CarTiming {
        floor_travel: Duration::ZERO,
        door_dwell: Duration::ZERO,
    };
}

impl Default for CarTiming {
    fn default() -> Self {
        Self {
            floor_travel: Duration::from_secs(1),
            door_dwell: Duration::from_millis(500),
        }
    }
}

pub struct Car {
    id: CarId,
    zone: Option<FloorRange>,
    queue: CarQueue,
    scheduling: Arc<dyn SchedulingStrategy>,
    timing: CarTiming,
}

impl Car {
    pub fn new(
        id: CarId,
        start_floor: Floor,
        zone: Option<FloorRange>,
        capacity: Option<usize>,
        scheduling: Arc<dyn SchedulingStrategy>,
        timing: CarTiming,
    ) -> Self {
        Self {
            id,
            zone,
            queue: CarQueue::new(id, start_floor, zone, capacity),
            scheduling,
            timing,
        }
    }

    pub fn id(&self) -> CarId {
        self.id
    }

    pub fn zone(&self) -> Option<FloorRange> {
        self.zone
    }

    pub fn timing(&self) -> CarTiming {
        self.timing
    }

    pub fn scheduling(&self) -> &dyn SchedulingStrategy {
        self.scheduling.as_ref()
    }

    /// Published view; may trail the car by one step.
    pub fn view(&self) -> CarSnapshot {
        self.queue.view()
    }

    pub fn current_floor(&self) -> Floor {
        self.queue.view().floor
    }

    pub async fn enqueue(&self, request: Request) -> Result<Enqueued, DispatchError> {
        self.queue.enqueue(request).await
    }

    pub async fn pending_len(&self) -> usize {
        self.queue.pending_len().await
    }

    /// Consistent copy of the scheduling state (takes the queue lock).
    pub async fn state(&self) -> CarState {
        self.queue.snapshot().await
    }

    pub(crate) fn queue(&self) -> &CarQueue {
        &self.queue
    }
}

impl std::fmt::Debug for Car {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Car")
            .field("id", &self.id)
            .field("zone", &self.zone)
            .field("scheduling", &self.scheduling.name())
            .field("timing", &self.timing)
            .finish()
    }
}
