//! NearestCar - 呼び出し階に最も近い号機を選ぶ

use tracing::debug;

use crate::domain::{CarId, ConfigurationError, DispatchError, Request};
use crate::observability::CarSnapshot;
use crate::ports::SelectionStrategy;

/// `abs(floor - origin)` が最小の号機。同距離なら登録順で先の号機。
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestCar;

impl NearestCar {
    pub fn new() -> Self {
        Self
    }
}

impl SelectionStrategy for NearestCar {
    fn choose(&self, cars: &[CarSnapshot], call: &Request) -> Result<CarId, DispatchError> {
        let mut best: Option<&CarSnapshot> = None;
        for car in cars {
            // strictly smaller keeps the earlier registration on ties
            if best.is_none_or(|b| car.distance_to(call.origin()) < b.distance_to(call.origin())) {
                best = Some(car);
            }
        }
        let chosen = best.ok_or(ConfigurationError::NoCarAvailable)?;
        debug!(car = %chosen.id, distance = chosen.distance_to(call.origin()), "nearest car");
        Ok(chosen.id)
    }

    fn name(&self) -> &'static str {
        "nearest"
    }
}
