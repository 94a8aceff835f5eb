//! Fcfs - 受付順に処理する
//!
//! 最も単純だが、受付順が階の並びと無関係なので往復が増える。

use crate::domain::{CarState, Stop};
use crate::ports::SchedulingStrategy;

use super::heading_towards;

#[derive(Debug, Clone, Copy, Default)]
pub struct Fcfs;

impl Fcfs {
    pub fn new() -> Self {
        Self
    }
}

impl SchedulingStrategy for Fcfs {
    fn next(&self, state: &mut CarState) -> Option<Stop> {
        let key = state.pending.oldest()?.key();
        let request = state.pending.remove(&key)?;
        let direction = heading_towards(state, request.target_floor());
        Some(Stop { request, direction })
    }

    fn name(&self) -> &'static str {
        "fcfs"
    }
}
