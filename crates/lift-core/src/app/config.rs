//! SystemConfig - JSON で書く建物・号機・戦略の設定
//!
//! ```json
//! {
//!   "building": { "lowest": 1, "highest": 10 },
//!   "cars": [ { "id": 1, "start_floor": 1, "zone": { "lowest": 1, "highest": 5 } } ],
//!   "selection": "zone",
//!   "scheduling": "look",
//!   "floor_travel_ms": 1000
//! }
//! ```
//!
//! 省略したフィールドは `SystemConfig::default()` の値になる。

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::builder::{BuildError, ElevatorSystem, ElevatorSystemBuilder};
use super::car::CarTiming;
use crate::domain::{CarId, Floor, FloorRange};
use crate::impls::{Fcfs, Look, NearestCar, ParityStrategy, ShortestSeekTime, ZoneStrategy};
use crate::ports::{SchedulingStrategy, SelectionStrategy};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unknown strategy '{0}'")]
    UnknownStrategy(String),

    #[error(transparent)]
    Build(#[from] BuildError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionKind {
    Nearest,
    Parity,
    Zone,
}

impl SelectionKind {
    pub fn strategy(self, zone_seed: u64) -> Arc<dyn SelectionStrategy> {
        match self {
            SelectionKind::Nearest => Arc::new(NearestCar),
            SelectionKind::Parity => Arc::new(ParityStrategy),
            SelectionKind::Zone => Arc::new(ZoneStrategy::new(zone_seed)),
        }
    }
}

impl FromStr for SelectionKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nearest" => Ok(SelectionKind::Nearest),
            "parity" => Ok(SelectionKind::Parity),
            "zone" => Ok(SelectionKind::Zone),
            other => Err(ConfigError::UnknownStrategy(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchedulingKind {
    Look,
    Fcfs,
    Sstf,
}

impl SchedulingKind {
    pub fn strategy(self) -> Arc<dyn SchedulingStrategy> {
        match self {
            SchedulingKind::Look => Arc::new(Look),
            SchedulingKind::Fcfs => Arc::new(Fcfs),
            SchedulingKind::Sstf => Arc::new(ShortestSeekTime),
        }
    }
}

impl FromStr for SchedulingKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "look" => Ok(SchedulingKind::Look),
            "fcfs" => Ok(SchedulingKind::Fcfs),
            "sstf" => Ok(SchedulingKind::Sstf),
            other => Err(ConfigError::UnknownStrategy(other.to_string())),
        }
    }
}

/// One car as written in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarSpec {
    pub id: CarId,
    #[serde(default = "default_start_floor")]
    pub start_floor: Floor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<FloorRange>,
    /// Overrides the system-wide capacity for this car.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<usize>,
}

impl CarSpec {
    pub fn new(id: u32, start_floor: Floor) -> Self {
        Self {
            id: CarId::new(id),
            start_floor,
            zone: None,
            capacity: None,
        }
    }

    pub fn with_zone(mut self, zone: FloorRange) -> Self {
        self.zone = Some(zone);
        self
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }
}

fn default_start_floor() -> Floor {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    pub building: FloorRange,
    pub cars: Vec<CarSpec>,
    pub selection: SelectionKind,
    pub scheduling: SchedulingKind,
    pub zone_seed: u64,
    pub capacity: Option<usize>,
    pub floor_travel_ms: u64,
    pub door_dwell_ms: u64,
}

impl Default for SystemConfig {
    /// 10 階建て、1 号機と 2 号機が 1 階で待機、偶奇で割り当て、LOOK で運行。
    fn default() -> Self {
        Self {
            building: FloorRange::new(1, 10),
            cars: vec![CarSpec::new(1, 1), CarSpec::new(2, 1)],
            selection: SelectionKind::Parity,
            scheduling: SchedulingKind::Look,
            zone_seed: 0,
            capacity: None,
            floor_travel_ms: 1000,
            door_dwell_ms: 500,
        }
    }
}

impl SystemConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn timing(&self) -> CarTiming {
        CarTiming {
            floor_travel: Duration::from_millis(self.floor_travel_ms),
            door_dwell: Duration::from_millis(self.door_dwell_ms),
        }
    }

    pub fn into_builder(self) -> ElevatorSystemBuilder {
        let timing = self.timing();
        let mut builder = ElevatorSystemBuilder::new(self.building)
            .selection(self.selection.strategy(self.zone_seed))
            .scheduling(self.scheduling.strategy())
            .timing(timing);
        if let Some(capacity) = self.capacity {
            builder = builder.capacity(capacity);
        }
        builder.cars(self.cars)
    }

    pub fn build(self) -> Result<ElevatorSystem, ConfigError> {
        Ok(self.into_builder().build()?)
    }
}
