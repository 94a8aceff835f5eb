//! TracingEventSink - 表示盤の代わりに tracing へ出す（デフォルト）

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::{CarId, Floor, Request};
use crate::ports::CarEventSink;

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

#[async_trait]
impl CarEventSink for TracingEventSink {
    async fn on_arrive(&self, car: CarId, floor: Floor) {
        debug!(%car, floor, "arrived");
    }

    async fn on_stop(&self, car: CarId, request: &Request) {
        info!(
            %car,
            floor = request.target_floor(),
            request = %request.id(),
            cab = request.is_cab_call(),
            "stopped"
        );
    }

    async fn on_idle(&self, car: CarId) {
        info!(%car, "idle");
    }
}
