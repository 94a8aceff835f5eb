//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **selection**: NearestCar, ParityStrategy, ZoneStrategy
//! - **scheduling**: Look, Fcfs, ShortestSeekTime
//! - **TracingEventSink**: デフォルトの表示コラボレータ
//! - **RecordingEventSink**: テスト用

pub mod recording_sink;
pub mod scheduling;
pub mod selection;
pub mod tracing_sink;

pub use self::recording_sink::{CarEvent, RecordingEventSink};
pub use self::scheduling::{Fcfs, Look, ShortestSeekTime};
pub use self::selection::{NearestCar, ParityStrategy, ZoneStrategy};
pub use self::tracing_sink::TracingEventSink;
