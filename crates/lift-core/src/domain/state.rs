//! State - 号機の状態
//!
//! # 状態遷移
//! - Idle -> MovingUp / MovingDown: `SchedulingStrategy::next` が Stop を返した
//! - MovingUp / MovingDown -> 同じ状態: 1 階進むごと
//! - MovingUp / MovingDown -> Idle: `next` が None を返した
//!
//! Idle は初期状態であり、何度でも戻ってくる（終端状態はない）。

use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::floor::Floor;
use super::ids::CarId;
use super::pending::PendingSet;
use super::request::Request;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CarStatus {
    Idle,
    MovingUp,
    MovingDown,
}

impl From<Direction> for CarStatus {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => CarStatus::MovingUp,
            Direction::Down => CarStatus::MovingDown,
            Direction::Idle => CarStatus::Idle,
        }
    }
}

impl CarStatus {
    pub fn is_moving(self) -> bool {
        !matches!(self, CarStatus::Idle)
    }
}

/// Scheduling-visible state of one car.
///
/// `current_floor` と `direction` を書き換えるのはその号機のサービスループだけ。
/// `pending` には Dispatcher からも insert される（CarQueue のロック下）。
#[derive(Debug, Clone)]
pub struct CarState {
    pub id: CarId,
    pub current_floor: Floor,
    pub direction: Direction,
    pub pending: PendingSet,
}

impl CarState {
    pub fn new(id: CarId, current_floor: Floor) -> Self {
        Self {
            id,
            current_floor,
            direction: Direction::Idle,
            pending: PendingSet::new(),
        }
    }

    /// Builder-style helper for tests and simulations.
    pub fn heading(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_pending(mut self, requests: impl IntoIterator<Item = Request>) -> Self {
        for request in requests {
            self.pending.insert(request);
        }
        self
    }

    pub fn status(&self) -> CarStatus {
        self.direction.into()
    }
}

/// The next stop picked by a scheduling strategy, with the direction the car
/// travels in afterwards (possibly reversed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stop {
    pub request: Request,
    pub direction: Direction,
}

impl Stop {
    pub fn floor(&self) -> Floor {
        self.request.target_floor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_car_is_idle() {
        let state = CarState::new(CarId::new(1), 1);
        assert_eq!(state.status(), CarStatus::Idle);
        assert!(state.pending.is_empty());
    }

    #[test]
    fn status_follows_direction() {
        let state = CarState::new(CarId::new(1), 1).heading(Direction::Down);
        assert_eq!(state.status(), CarStatus::MovingDown);
        assert!(state.status().is_moving());
    }
}
