use std::sync::Arc;

use tracing::info;

use super::car::Car;
use crate::domain::{CarId, ConfigurationError, FloorRange};
use crate::observability::CarSnapshot;

/// Registry of cars, in registration order.
///
/// Design:
/// - Built during initialization (mutable).
/// - Shared with Dispatcher and CarGroup behind an `Arc` (immutable).
///
/// 起動後の号機の追加・削除はしない。順序は NearestCar / ParityStrategy の
/// タイブレークに使われる。
#[derive(Debug)]
pub struct CarRegistry {
    building: FloorRange,
    cars: Vec<Arc<Car>>,
}

impl CarRegistry {
    pub fn new(building: FloorRange) -> Result<Self, ConfigurationError> {
        if building.is_empty() {
            return Err(ConfigurationError::EmptyBuilding(building));
        }
        Ok(Self {
            building,
            cars: Vec::new(),
        })
    }

    /// Register a car with its optional zone.
    ///
    /// # 検証
    /// - 同じ号機番号は 1 回だけ
    /// - 開始階とゾーンは建物の範囲内
    /// - ゾーン同士は重ならない
    pub fn register(&mut self, car: Car) -> Result<(), ConfigurationError> {
        let id = car.id();
        if self.get(id).is_some() {
            return Err(ConfigurationError::DuplicateCar(id));
        }

        let floor = car.current_floor();
        if !self.building.contains(floor) {
            return Err(ConfigurationError::StartFloorOutOfRange {
                car: id,
                floor,
                building: self.building,
            });
        }

        if let Some(zone) = car.zone() {
            if zone.is_empty() || !self.building.covers(&zone) {
                return Err(ConfigurationError::ZoneOutsideBuilding {
                    car: id,
                    zone,
                    building: self.building,
                });
            }
            for other in &self.cars {
                if let Some(other_zone) = other.zone()
                    && zone.overlaps(&other_zone)
                {
                    return Err(ConfigurationError::ZoneOverlap {
                        car: id,
                        zone,
                        other: other.id(),
                        other_zone,
                    });
                }
            }
        }

        info!(car = %id, floor, zone = ?car.zone(), "car registered");
        self.cars.push(Arc::new(car));
        Ok(())
    }

    pub fn get(&self, id: CarId) -> Option<&Arc<Car>> {
        self.cars.iter().find(|car| car.id() == id)
    }

    pub fn cars(&self) -> &[Arc<Car>] {
        &self.cars
    }

    /// Published views of every car, in registration order. Does not block car loops.
    pub fn snapshots(&self) -> Vec<CarSnapshot> {
        self.cars.iter().map(|car| car.view()).collect()
    }

    pub fn building(&self) -> FloorRange {
        self.building
    }

    pub fn len(&self) -> usize {
        self.cars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cars.is_empty()
    }
}
