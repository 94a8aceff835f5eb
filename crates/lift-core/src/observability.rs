use serde::{Deserialize, Serialize};

use crate::domain::{CarId, CarStatus, Direction, Floor, FloorRange};

/// Point-in-time view of one car.
///
/// サービスループが watch で公開する。SelectionStrategy はこれを読むので、
/// 実際の位置より少し古いことがある（許容する）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarSnapshot {
    pub id: CarId,
    pub floor: Floor,
    pub direction: Direction,
    pub status: CarStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<FloorRange>,
    pub pending: usize,
    pub served: u64,
    /// 停止を処理中（移動中、または同じ階でドア開放中）
    #[serde(default)]
    pub busy: bool,
}

impl CarSnapshot {
    pub fn new(id: CarId, floor: Floor, zone: Option<FloorRange>) -> Self {
        Self {
            id,
            floor,
            direction: Direction::Idle,
            status: CarStatus::Idle,
            zone,
            pending: 0,
            served: 0,
            busy: false,
        }
    }

    pub fn distance_to(&self, floor: Floor) -> u32 {
        self.floor.abs_diff(floor)
    }

    /// Idle with nothing pending and no stop in progress.
    pub fn is_at_rest(&self) -> bool {
        self.status == CarStatus::Idle && self.pending == 0 && !self.busy
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetCounts {
    pub idle: usize,
    pub moving: usize,
    pub pending: usize,
    pub served: u64,
}

impl FleetCounts {
    pub fn from_snapshots<'a>(cars: impl IntoIterator<Item = &'a CarSnapshot>) -> Self {
        let mut counts = FleetCounts::default();
        for car in cars {
            match car.status {
                CarStatus::Idle => counts.idle += 1,
                CarStatus::MovingUp | CarStatus::MovingDown => counts.moving += 1,
            }
            counts.pending += car.pending;
            counts.served += car.served;
        }
        counts
    }

    /// 全号機が Idle で pending もない
    pub fn is_quiescent(&self) -> bool {
        self.moving == 0 && self.pending == 0
    }
}
