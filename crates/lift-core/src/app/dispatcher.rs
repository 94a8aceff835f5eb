//! Dispatcher - hall call / cab call の受付口
//!
//! # フロー
//! - hall call: 検証 → SelectionStrategy で号機を選ぶ → その号機のキューへ
//! - cab call: 検証 → 押された号機のキューへ直接（SelectionStrategy は使わない）
//!
//! どちらも enqueue した時点で返る（処理完了は待たない）。
//! 不正なリクエストは同期的に拒否し、キューには入れない。

use std::sync::Arc;

use tracing::{info, warn};

use super::registry::CarRegistry;
use crate::domain::{
    CarId, ConfigurationError, Direction, DispatchError, Floor, InvalidRequest, Request,
};
use crate::ports::{Clock, IdGenerator, SelectionStrategy, SystemClock, UlidGenerator};
use crate::queue::Enqueued;

pub struct Dispatcher {
    registry: Arc<CarRegistry>,
    selection: Arc<dyn SelectionStrategy>,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
}

impl Dispatcher {
    pub fn new(registry: Arc<CarRegistry>, selection: Arc<dyn SelectionStrategy>) -> Self {
        Self {
            registry,
            selection,
            ids: Arc::new(UlidGenerator::new(SystemClock)),
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace request id generation and timestamps (deterministic tests).
    pub fn with_identity(mut self, ids: Arc<dyn IdGenerator>, clock: Arc<dyn Clock>) -> Self {
        self.ids = ids;
        self.clock = clock;
        self
    }

    pub fn registry(&self) -> &CarRegistry {
        &self.registry
    }

    /// Accept a hall call and assign it to a car. Returns the chosen car.
    pub async fn submit_hall_call(
        &self,
        floor: Floor,
        direction: Direction,
    ) -> Result<CarId, DispatchError> {
        let result = self.dispatch_hall_call(floor, direction).await;
        if let Err(err) = &result {
            warn!(floor, %direction, error = %err, "hall call rejected");
        }
        result
    }

    async fn dispatch_hall_call(
        &self,
        floor: Floor,
        direction: Direction,
    ) -> Result<CarId, DispatchError> {
        self.check_floor(floor)?;
        let building = self.registry.building();
        match direction {
            Direction::Idle => return Err(InvalidRequest::NoDirection { floor }.into()),
            Direction::Up if building.is_top(floor) => {
                return Err(InvalidRequest::DirectionOutOfRange { floor, direction }.into());
            }
            Direction::Down if building.is_bottom(floor) => {
                return Err(InvalidRequest::DirectionOutOfRange { floor, direction }.into());
            }
            _ => {}
        }

        let call = self.stamp(Request::hall(floor, direction));
        let chosen = self.selection.choose(&self.registry.snapshots(), &call)?;
        let car = self
            .registry
            .get(chosen)
            .ok_or(ConfigurationError::UnknownSelection(chosen))?;

        let request = call.assigned_to(chosen);
        let id = request.id();
        let enqueued = car.enqueue(request).await?;
        info!(
            floor,
            %direction,
            car = %chosen,
            request = %id,
            strategy = self.selection.name(),
            duplicate = enqueued == Enqueued::AlreadyPending,
            "hall call assigned"
        );
        Ok(chosen)
    }

    /// Accept a cab call placed inside `car`. Never consults selection.
    pub async fn submit_cab_call(
        &self,
        car: CarId,
        destination: Floor,
    ) -> Result<Enqueued, DispatchError> {
        let result = self.dispatch_cab_call(car, destination).await;
        if let Err(err) = &result {
            warn!(%car, destination, error = %err, "cab call rejected");
        }
        result
    }

    async fn dispatch_cab_call(
        &self,
        car_id: CarId,
        destination: Floor,
    ) -> Result<Enqueued, DispatchError> {
        let car = self
            .registry
            .get(car_id)
            .ok_or(InvalidRequest::UnregisteredCar(car_id))?;
        self.check_floor(destination)?;

        let current = car.current_floor();
        let request = self.stamp(Request::cab(car_id, current, destination));
        if request.direction().is_idle() {
            return Err(InvalidRequest::NoDirection { floor: destination }.into());
        }

        let id = request.id();
        let enqueued = car.enqueue(request).await?;
        info!(car = %car_id, from = current, destination, request = %id, "cab call accepted");
        Ok(enqueued)
    }

    fn check_floor(&self, floor: Floor) -> Result<(), InvalidRequest> {
        let building = self.registry.building();
        if building.contains(floor) {
            Ok(())
        } else {
            Err(InvalidRequest::FloorOutOfRange { floor, building })
        }
    }

    fn stamp(&self, request: Request) -> Request {
        request.stamped(self.ids.generate_request_id(), self.clock.now())
    }
}
