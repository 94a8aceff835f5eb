//! Errors - エラー型と分類
//!
//! # 分類
//! - **ConfigurationError**: 設定の誤り。起動時か最初の dispatch で発生。
//!   その呼び出しは失敗するがプロセスは継続する。
//! - **InvalidRequest**: `submit_*` で同期的に拒否。キューには入らない。
//! - **CarFull**: 号機の容量超過。これも同期的に拒否。
//! - **StrategyExhausted**: 論理不変条件の違反。サービスループがログに出して
//!   Idle に戻る（ループは止めない）。

use thiserror::Error;

use super::direction::Direction;
use super::floor::{Floor, FloorRange};
use super::ids::CarId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("no car is registered")]
    NoCarAvailable,

    #[error("{0} is already registered")]
    DuplicateCar(CarId),

    #[error("zone {zone} of {car} overlaps zone {other_zone} of {other}")]
    ZoneOverlap {
        car: CarId,
        zone: FloorRange,
        other: CarId,
        other_zone: FloorRange,
    },

    #[error("zone {zone} of {car} lies outside building {building}")]
    ZoneOutsideBuilding {
        car: CarId,
        zone: FloorRange,
        building: FloorRange,
    },

    #[error("{car} starts at floor {floor}, outside building {building}")]
    StartFloorOutOfRange {
        car: CarId,
        floor: Floor,
        building: FloorRange,
    },

    #[error("building {0} has no floors")]
    EmptyBuilding(FloorRange),

    #[error("selection strategy chose unregistered {0}")]
    UnknownSelection(CarId),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidRequest {
    #[error("{0} is not registered")]
    UnregisteredCar(CarId),

    #[error("floor {floor} is outside building {building}")]
    FloorOutOfRange { floor: Floor, building: FloorRange },

    #[error("call at floor {floor} has no direction")]
    NoDirection { floor: Floor },

    #[error("cannot go {direction} from floor {floor}")]
    DirectionOutOfRange { floor: Floor, direction: Direction },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    InvalidRequest(#[from] InvalidRequest),

    #[error("{car} is full ({capacity} pending)")]
    CarFull { car: CarId, capacity: usize },

    #[error("scheduling found nothing to serve for {car} with {pending} pending")]
    StrategyExhausted { car: CarId, pending: usize },
}
