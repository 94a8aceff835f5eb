//! ParityStrategy - 号機番号と呼び出し階の偶奇を合わせる
//!
//! 奇数階は奇数号機、偶数階は偶数号機。該当がなければ最初に登録された号機。

use crate::domain::{CarId, ConfigurationError, DispatchError, Request};
use crate::observability::CarSnapshot;
use crate::ports::SelectionStrategy;

#[derive(Debug, Clone, Copy, Default)]
pub struct ParityStrategy;

impl ParityStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl SelectionStrategy for ParityStrategy {
    fn choose(&self, cars: &[CarSnapshot], call: &Request) -> Result<CarId, DispatchError> {
        let first = cars.first().ok_or(ConfigurationError::NoCarAvailable)?;
        let even_floor = call.origin().rem_euclid(2) == 0;
        let chosen = cars
            .iter()
            .find(|car| car.id.is_even() == even_floor)
            .unwrap_or(first);
        Ok(chosen.id)
    }

    fn name(&self) -> &'static str {
        "parity"
    }
}
