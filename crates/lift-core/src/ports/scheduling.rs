//! SchedulingStrategy port - 号機が次にどこへ止まるか
//!
//! # 実装
//! - Look: 進行方向を維持して最も近い停止階（デフォルト）
//! - Fcfs: 受付順
//! - ShortestSeekTime: 現在階に最も近い停止階

use crate::domain::{CarState, Stop};

/// SchedulingStrategy は pending から次の停止を 1 件取り出す
///
/// # 契約
/// - 選んだリクエストは `state.pending` から取り除いて返す
/// - `state.current_floor` / `state.direction` は書き換えない（ループが反映する）
/// - pending が空なら None
/// - pending が空でないのに None を返すのは不変条件違反（StrategyExhausted）
pub trait SchedulingStrategy: Send + Sync {
    fn next(&self, state: &mut CarState) -> Option<Stop>;

    fn name(&self) -> &'static str;
}
