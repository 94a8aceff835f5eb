//! Look - 方向継続（LOOK）アルゴリズム
//!
//! # アルゴリズム
//! 1. pending が空なら None
//! 2. 現在の方向（Idle なら Up）で、進行方向上（現在階を含む）にある停止階を探す
//! 3. あれば最も近いものを選ぶ（Up なら昇順、Down なら降順の先頭）
//! 4. なければ方向を反転してもう一度だけ探す
//! 5. 選んだリクエストを pending から取り除き、方向と一緒に返す
//!
//! 反転は 1 回で十分: 反転後の探索範囲と元の範囲で全階を覆うので、
//! pending が空でなければ必ずどちらかで見つかる。

use crate::domain::{CarState, Direction, Floor, PendingSet, Stop, StopKey};
use crate::ports::SchedulingStrategy;

#[derive(Debug, Clone, Copy, Default)]
pub struct Look;

impl Look {
    pub fn new() -> Self {
        Self
    }
}

/// Closest pending stop on the path of travel; ties keep insertion order.
fn closest_ahead(pending: &PendingSet, current: Floor, direction: Direction) -> Option<StopKey> {
    pending
        .iter()
        .filter(|r| direction.is_ahead(current, r.target_floor()))
        .min_by_key(|r| r.target_floor().abs_diff(current))
        .map(|r| r.key())
}

impl SchedulingStrategy for Look {
    fn next(&self, state: &mut CarState) -> Option<Stop> {
        if state.pending.is_empty() {
            return None;
        }
        let heading = match state.direction {
            Direction::Idle => Direction::Up,
            direction => direction,
        };
        for direction in [heading, heading.reversed()] {
            if let Some(key) = closest_ahead(&state.pending, state.current_floor, direction) {
                let request = state.pending.remove(&key)?;
                return Some(Stop { request, direction });
            }
        }
        None
    }

    fn name(&self) -> &'static str {
        "look"
    }
}
