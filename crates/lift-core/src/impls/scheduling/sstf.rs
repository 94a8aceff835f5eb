//! ShortestSeekTime - 現在階に最も近い停止階を選ぶ
//!
//! 近い呼び出しが絶えず来ると遠い呼び出しがいつまでも処理されない（飢餓）。
//! 既知の性質としてそのままにしている。公平性が要るなら Look を使う。

use crate::domain::{CarState, Stop};
use crate::ports::SchedulingStrategy;

use super::heading_towards;

#[derive(Debug, Clone, Copy, Default)]
pub struct ShortestSeekTime;

impl ShortestSeekTime {
    pub fn new() -> Self {
        Self
    }
}

impl SchedulingStrategy for ShortestSeekTime {
    fn next(&self, state: &mut CarState) -> Option<Stop> {
        let current = state.current_floor;
        // min_by_key keeps the first minimum, i.e. the oldest on ties
        let key = state
            .pending
            .iter()
            .min_by_key(|r| r.target_floor().abs_diff(current))?
            .key();
        let request = state.pending.remove(&key)?;
        let direction = heading_towards(state, request.target_floor());
        Some(Stop { request, direction })
    }

    fn name(&self) -> &'static str {
        "sstf"
    }
}
