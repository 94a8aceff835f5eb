//! SelectionStrategy port - hall call をどの号機に割り当てるか
//!
//! # 実装
//! - NearestCar: 最寄りの号機
//! - ParityStrategy: 号機番号と階の偶奇を合わせる
//! - ZoneStrategy: 担当ゾーン

use crate::domain::{CarId, DispatchError, Request};
use crate::observability::CarSnapshot;

/// SelectionStrategy は hall call の担当号機を選ぶ
///
/// # 設計原則
/// - 入力（号機のスナップショット列 + 呼び出し）だけで決まる純粋関数
/// - 内部状態を持たないので dispatch ごとに差し替えられる
/// - `cars` は登録順。タイブレークは登録順で先のものが勝つ
/// - `&self` のみなので object-safe（`Arc<dyn SelectionStrategy>`）
pub trait SelectionStrategy: Send + Sync {
    fn choose(&self, cars: &[CarSnapshot], call: &Request) -> Result<CarId, DispatchError>;

    /// ログ用の名前
    fn name(&self) -> &'static str;
}
