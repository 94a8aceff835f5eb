//! Ports - 抽象化レイヤー
//!
//! 差し替え可能な判断ロジック（号機選択・停止順）と、
//! コア外のコラボレータ（表示盤、時刻、ID 採番）へのインターフェース。
//! 具体的な実装は `impls` に置く。

pub mod clock;
pub mod event_sink;
pub mod id_generator;
pub mod scheduling;
pub mod selection;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::event_sink::CarEventSink;
pub use self::id_generator::{IdGenerator, UlidGenerator};
pub use self::scheduling::SchedulingStrategy;
pub use self::selection::SelectionStrategy;
