use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

use super::registry::CarRegistry;
use super::service_loop::service_loop;
use crate::ports::CarEventSink;

/// Handle over the running service loops, one tokio task per car.
/// - `request_shutdown()` で全号機が新しい停止を取らなくなる
/// - `shutdown_and_join()` で全ループの終了を待てる
pub struct CarGroup {
    shutdown_tx: watch::Sender<bool>,
    joins: Vec<JoinHandle<()>>,
}

impl CarGroup {
    /// Spawn one service loop per registered car.
    pub fn spawn(registry: &CarRegistry, sink: Arc<dyn CarEventSink>) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let mut joins = Vec::with_capacity(registry.len());
        for car in registry.cars() {
            let join = tokio::spawn(service_loop(
                Arc::clone(car),
                Arc::clone(&sink),
                shutdown_rx.clone(),
            ));
            joins.push(join);
        }
        info!(cars = joins.len(), "car group started");

        Self { shutdown_tx, joins }
    }

    pub fn len(&self) -> usize {
        self.joins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.joins.is_empty()
    }

    /// Request shutdown for all cars.
    /// 移動中の停止は中断しない（到着してからループを抜ける）。
    pub fn request_shutdown(&self) {
        // ignore send error: receivers may already be dropped
        let _ = self.shutdown_tx.send(true);
    }

    /// Shutdown and wait for all cars.
    pub async fn shutdown_and_join(self) {
        self.request_shutdown();
        for j in self.joins {
            if let Err(e) = j.await {
                error!(error = %e, "car loop did not finish cleanly");
            }
        }
        info!("car group stopped");
    }
}
