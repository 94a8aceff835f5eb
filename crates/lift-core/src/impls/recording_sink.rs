//! RecordingEventSink - 通知を記録する（テスト・シミュレーション用）

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::domain::{CarId, Floor, Request, RequestId};
use crate::ports::CarEventSink;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CarEvent {
    Arrive { car: CarId, floor: Floor },
    Stop { car: CarId, floor: Floor, request: RequestId },
    Idle { car: CarId },
}

#[derive(Debug, Default)]
pub struct RecordingEventSink {
    events: Mutex<Vec<CarEvent>>,
}

impl RecordingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn events(&self) -> Vec<CarEvent> {
        self.events.lock().await.clone()
    }

    /// Floors passed by `car`, in order.
    pub async fn arrivals(&self, car: CarId) -> Vec<Floor> {
        self.events
            .lock()
            .await
            .iter()
            .filter_map(|e| match e {
                CarEvent::Arrive { car: c, floor } if *c == car => Some(*floor),
                _ => None,
            })
            .collect()
    }

    /// Floors where `car` served a request, in order.
    pub async fn stops(&self, car: CarId) -> Vec<Floor> {
        self.events
            .lock()
            .await
            .iter()
            .filter_map(|e| match e {
                CarEvent::Stop { car: c, floor, .. } if *c == car => Some(*floor),
                _ => None,
            })
            .collect()
    }

    pub async fn idle_count(&self, car: CarId) -> usize {
        self.events
            .lock()
            .await
            .iter()
            .filter(|e| matches!(e, CarEvent::Idle { car: c } if *c == car))
            .count()
    }
}

#[async_trait]
impl CarEventSink for RecordingEventSink {
    async fn on_arrive(&self, car: CarId, floor: Floor) {
        self.events.lock().await.push(CarEvent::Arrive { car, floor });
    }

    async fn on_stop(&self, car: CarId, request: &Request) {
        self.events.lock().await.push(CarEvent::Stop {
            car,
            floor: request.target_floor(),
            request: request.id(),
        });
    }

    async fn on_idle(&self, car: CarId) {
        self.events.lock().await.push(CarEvent::Idle { car });
    }
}
