//! EventSink port - 表示盤・ドアなど外部コラボレータへの通知
//!
//! # 通知
//! - on_arrive: 1 階進むごと
//! - on_stop: リクエストを処理した（ドアを開けた）とき
//! - on_idle: pending を処理し尽くしたとき
//!
//! 実装はサービスループから await される。遅い実装はその号機の移動を遅らせる。

use async_trait::async_trait;

use crate::domain::{CarId, Floor, Request};

#[async_trait]
pub trait CarEventSink: Send + Sync {
    async fn on_arrive(&self, car: CarId, floor: Floor);

    async fn on_stop(&self, car: CarId, request: &Request);

    async fn on_idle(&self, car: CarId);
}
