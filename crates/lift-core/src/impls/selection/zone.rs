//! ZoneStrategy - 担当ゾーンで号機を選ぶ
//!
//! ゾーンは登録時に号機ごとに設定され、スナップショットの `zone` に載る。
//! どのゾーンにも入らない階は全号機から一様に選ぶ。乱数は `seed` と呼び出し階から
//! 毎回作り直すので、同じ入力には同じ号機を返す（純粋関数のまま）。

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::domain::{CarId, ConfigurationError, DispatchError, Floor, Request};
use crate::observability::CarSnapshot;
use crate::ports::SelectionStrategy;

#[derive(Debug, Clone, Copy)]
pub struct ZoneStrategy {
    seed: u64,
}

impl ZoneStrategy {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    fn fallback_index(&self, origin: Floor, len: usize) -> usize {
        let mut rng = StdRng::seed_from_u64(self.seed ^ (origin as i64 as u64));
        rng.gen_range(0..len)
    }
}

impl Default for ZoneStrategy {
    fn default() -> Self {
        Self::new(0)
    }
}

impl SelectionStrategy for ZoneStrategy {
    fn choose(&self, cars: &[CarSnapshot], call: &Request) -> Result<CarId, DispatchError> {
        if cars.is_empty() {
            return Err(ConfigurationError::NoCarAvailable.into());
        }
        if let Some(car) = cars
            .iter()
            .find(|car| car.zone.is_some_and(|zone| zone.contains(call.origin())))
        {
            return Ok(car.id);
        }
        let chosen = &cars[self.fallback_index(call.origin(), cars.len())];
        debug!(car = %chosen.id, floor = call.origin(), "no zone matched, random fallback");
        Ok(chosen.id)
    }

    fn name(&self) -> &'static str {
        "zone"
    }
}
