//! ElevatorSystemBuilder - システムの構築とワイヤリング
//!
//! # 学習ポイント
//! - Builder パターンの実装
//! - 起動時検証（Fail-fast 設計）: 号機ゼロ、ゾーン重複などは build() で落とす
//! - グローバルなシングルトンを使わず、Registry を明示的に渡す

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use super::car::{Car, CarTiming};
use super::config::CarSpec;
use super::dispatcher::Dispatcher;
use super::group::CarGroup;
use super::registry::CarRegistry;
use crate::domain::{CarId, ConfigurationError, Direction, DispatchError, Floor, FloorRange};
use crate::impls::{Look, NearestCar, TracingEventSink};
use crate::observability::{CarSnapshot, FleetCounts};
use crate::ports::{CarEventSink, Clock, IdGenerator, SchedulingStrategy, SelectionStrategy};
use crate::queue::Enqueued;

/// ElevatorSystemBuilder は ElevatorSystem を構築
///
/// # 使用例
/// ```ignore
/// let mut system = ElevatorSystemBuilder::new(FloorRange::new(1, 10))
///     .car(CarSpec::new(1, 1))
///     .car(CarSpec::new(2, 1))
///     .selection(Arc::new(ParityStrategy))
///     .build()?;
/// system.start();
/// ```
///
/// # デフォルト
/// - selection: NearestCar
/// - scheduling: Look
/// - event sink: TracingEventSink
/// - timing: 1 階 1 秒、ドア 0.5 秒
pub struct ElevatorSystemBuilder {
    building: FloorRange,
    cars: Vec<CarSpec>,
    selection: Arc<dyn SelectionStrategy>,
    scheduling: Arc<dyn SchedulingStrategy>,
    sink: Arc<dyn CarEventSink>,
    timing: CarTiming,
    capacity: Option<usize>,
    identity: Option<(Arc<dyn IdGenerator>, Arc<dyn Clock>)>,
}

/// BuildError はシステム構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

impl ElevatorSystemBuilder {
    pub fn new(building: FloorRange) -> Self {
        Self {
            building,
            cars: Vec::new(),
            selection: Arc::new(NearestCar),
            scheduling: Arc::new(Look),
            sink: Arc::new(TracingEventSink),
            timing: CarTiming::default(),
            capacity: None,
            identity: None,
        }
    }

    /// 号機を追加（登録順 = 追加順）
    pub fn car(mut self, spec: CarSpec) -> Self {
        self.cars.push(spec);
        self
    }

    pub fn cars(mut self, specs: impl IntoIterator<Item = CarSpec>) -> Self {
        self.cars.extend(specs);
        self
    }

    pub fn selection(mut self, selection: Arc<dyn SelectionStrategy>) -> Self {
        self.selection = selection;
        self
    }

    /// 全号機で共有するスケジューリング戦略
    pub fn scheduling(mut self, scheduling: Arc<dyn SchedulingStrategy>) -> Self {
        self.scheduling = scheduling;
        self
    }

    pub fn event_sink(mut self, sink: Arc<dyn CarEventSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn timing(mut self, timing: CarTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Default capacity for cars whose spec does not set one.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    pub fn identity(mut self, ids: Arc<dyn IdGenerator>, clock: Arc<dyn Clock>) -> Self {
        self.identity = Some((ids, clock));
        self
    }

    /// Validate and wire everything. Does not start the car loops.
    ///
    /// # 検証
    /// - 号機が 1 台もなければ NoCarAvailable
    /// - 号機ごとの検証は CarRegistry::register()
    pub fn build(self) -> Result<ElevatorSystem, BuildError> {
        if self.cars.is_empty() {
            return Err(ConfigurationError::NoCarAvailable.into());
        }

        let mut registry = CarRegistry::new(self.building)?;
        for spec in self.cars {
            registry.register(Car::new(
                spec.id,
                spec.start_floor,
                spec.zone,
                spec.capacity.or(self.capacity),
                Arc::clone(&self.scheduling),
                self.timing,
            ))?;
        }

        let mut dispatcher = Dispatcher::new(Arc::new(registry), self.selection);
        if let Some((ids, clock)) = self.identity {
            dispatcher = dispatcher.with_identity(ids, clock);
        }

        info!(
            building = %self.building,
            cars = dispatcher.registry().len(),
            scheduling = self.scheduling.name(),
            "elevator system built"
        );
        Ok(ElevatorSystem {
            dispatcher,
            sink: self.sink,
            group: None,
        })
    }
}

/// ElevatorSystem は構築済みのシステム
///
/// `start()` で号機ごとのループを起動し、`shutdown()` で全ループを止める。
pub struct ElevatorSystem {
    dispatcher: Dispatcher,
    sink: Arc<dyn CarEventSink>,
    group: Option<CarGroup>,
}

impl std::fmt::Debug for ElevatorSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElevatorSystem")
            .field("registry", self.registry())
            .field("running", &self.is_running())
            .finish_non_exhaustive()
    }
}

impl ElevatorSystem {
    /// Spawn the car loops. Must be called inside a tokio runtime. Idempotent.
    pub fn start(&mut self) {
        if self.group.is_none() {
            self.group = Some(CarGroup::spawn(
                self.dispatcher.registry(),
                Arc::clone(&self.sink),
            ));
        }
    }

    pub fn is_running(&self) -> bool {
        self.group.is_some()
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn registry(&self) -> &CarRegistry {
        self.dispatcher.registry()
    }

    pub async fn submit_hall_call(
        &self,
        floor: Floor,
        direction: Direction,
    ) -> Result<CarId, DispatchError> {
        self.dispatcher.submit_hall_call(floor, direction).await
    }

    pub async fn submit_cab_call(
        &self,
        car: CarId,
        destination: Floor,
    ) -> Result<Enqueued, DispatchError> {
        self.dispatcher.submit_cab_call(car, destination).await
    }

    pub fn status(&self) -> Vec<CarSnapshot> {
        self.registry().snapshots()
    }

    pub fn counts(&self) -> FleetCounts {
        FleetCounts::from_snapshots(&self.status())
    }

    /// Wait until every car is idle with nothing pending. Returns `false` on timeout.
    pub async fn wait_until_idle(&self, timeout: Duration) -> bool {
        let all_idle = async {
            for car in self.registry().cars() {
                let mut rx = car.queue().subscribe();
                if rx.wait_for(|v| v.is_at_rest()).await.is_err() {
                    return false;
                }
            }
            true
        };
        tokio::time::timeout(timeout, all_idle).await.unwrap_or(false)
    }

    /// Stop all car loops and wait for them. In-flight stops complete first.
    pub async fn shutdown(mut self) {
        if let Some(group) = self.group.take() {
            group.shutdown_and_join().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::{ParityStrategy, RecordingEventSink, ZoneStrategy};

    fn instant(building: FloorRange) -> ElevatorSystemBuilder {
        ElevatorSystemBuilder::new(building).timing(CarTiming::INSTANT)
    }

    #[test]
    fn build_without_cars_fails_fast() {
        let result = instant(FloorRange::new(1, 10)).build();
        assert!(matches!(
            result,
            Err(BuildError::Configuration(ConfigurationError::NoCarAvailable))
        ));
    }

    #[test]
    fn build_reports_registry_errors() {
        let result = instant(FloorRange::new(1, 10))
            .car(CarSpec::new(1, 1))
            .car(CarSpec::new(1, 3))
            .build();
        assert!(matches!(
            result,
            Err(BuildError::Configuration(ConfigurationError::DuplicateCar(_)))
        ));
    }

    #[test]
    fn capacity_defaults_apply_per_car() {
        let system = instant(FloorRange::new(1, 10))
            .capacity(8)
            .car(CarSpec::new(1, 1))
            .car(CarSpec::new(2, 1).with_capacity(2))
            .build()
            .unwrap();
        let caps: Vec<_> = system
            .registry()
            .cars()
            .iter()
            .map(|c| c.queue().capacity())
            .collect();
        assert_eq!(caps, vec![Some(8), Some(2)]);
    }

    #[tokio::test]
    async fn parity_demo_scenarios_end_to_end() {
        let sink = Arc::new(RecordingEventSink::new());
        let mut system = instant(FloorRange::new(1, 10))
            .car(CarSpec::new(1, 1))
            .car(CarSpec::new(2, 1))
            .selection(Arc::new(ParityStrategy))
            .event_sink(sink.clone())
            .build()
            .unwrap();
        system.start();
        assert!(system.is_running());

        // odd floors go to car 1, even floors to car 2
        assert_eq!(system.submit_hall_call(3, Direction::Up).await, Ok(CarId::new(1)));
        system.submit_cab_call(CarId::new(1), 7).await.unwrap();
        assert_eq!(system.submit_hall_call(5, Direction::Down).await, Ok(CarId::new(1)));
        assert_eq!(system.submit_hall_call(2, Direction::Up).await, Ok(CarId::new(2)));

        assert!(system.wait_until_idle(Duration::from_secs(5)).await);

        let counts = system.counts();
        assert_eq!(counts.served, 4);
        assert!(counts.is_quiescent());

        let mut car1 = sink.stops(CarId::new(1)).await;
        car1.sort();
        assert_eq!(car1, vec![3, 5, 7]);
        assert_eq!(sink.stops(CarId::new(2)).await, vec![2]);

        system.shutdown().await;
    }

    #[tokio::test]
    async fn zone_cars_stay_in_their_zone() {
        let sink = Arc::new(RecordingEventSink::new());
        let mut system = instant(FloorRange::new(1, 20))
            .car(CarSpec::new(1, 1).with_zone(FloorRange::new(1, 10)))
            .car(CarSpec::new(2, 11).with_zone(FloorRange::new(11, 20)))
            .selection(Arc::new(ZoneStrategy::new(3)))
            .event_sink(sink.clone())
            .build()
            .unwrap();
        system.start();

        for floor in [4, 15, 9, 18] {
            system.submit_hall_call(floor, Direction::Down).await.unwrap();
        }
        assert!(system.wait_until_idle(Duration::from_secs(5)).await);

        assert!(sink.arrivals(CarId::new(1)).await.iter().all(|&f| f <= 10));
        assert!(sink.arrivals(CarId::new(2)).await.iter().all(|&f| f >= 11));
        system.shutdown().await;
    }

    #[tokio::test]
    async fn full_car_rejects_hall_call() {
        let system = instant(FloorRange::new(1, 10))
            .capacity(1)
            .car(CarSpec::new(1, 1))
            .build()
            .unwrap();

        system.submit_hall_call(4, Direction::Up).await.unwrap();
        let err = system.submit_hall_call(6, Direction::Up).await.unwrap_err();
        assert_eq!(
            err,
            DispatchError::CarFull {
                car: CarId::new(1),
                capacity: 1
            }
        );
    }

    #[tokio::test]
    async fn wait_until_idle_times_out_when_not_started() {
        let system = instant(FloorRange::new(1, 10))
            .car(CarSpec::new(1, 1))
            .build()
            .unwrap();
        system.submit_hall_call(4, Direction::Up).await.unwrap();
        assert!(!system.wait_until_idle(Duration::from_millis(50)).await);
    }
}
