//! Direction of travel.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::floor::Floor;

/// Travel direction of a car or a call.
///
/// `Idle` は「方向なし」。Cab call で行き先が現在階と同じ場合や、
/// 待機中の号機がこれになる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Idle,
}

impl Direction {
    /// Direction needed to get from `from` to `to`.
    pub fn between(from: Floor, to: Floor) -> Self {
        match to.cmp(&from) {
            std::cmp::Ordering::Greater => Direction::Up,
            std::cmp::Ordering::Less => Direction::Down,
            std::cmp::Ordering::Equal => Direction::Idle,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Idle => Direction::Idle,
        }
    }

    /// Is `floor` on the path from `current` when travelling this way?
    /// The current floor itself counts as on the path.
    pub fn is_ahead(self, current: Floor, floor: Floor) -> bool {
        match self {
            Direction::Up => floor >= current,
            Direction::Down => floor <= current,
            Direction::Idle => floor == current,
        }
    }

    /// One floor step in this direction.
    pub fn step(self) -> Floor {
        match self {
            Direction::Up => 1,
            Direction::Down => -1,
            Direction::Idle => 0,
        }
    }

    pub fn is_idle(self) -> bool {
        matches!(self, Direction::Idle)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Idle => "idle",
        };
        f.write_str(s)
    }
}
