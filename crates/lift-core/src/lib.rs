//! lift-core
//!
//! Dispatch and scheduling core for a group of elevator cars.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（floor, direction, request, pending, state, errors）
//! - **ports**: 抽象化レイヤー（SelectionStrategy, SchedulingStrategy, CarEventSink, Clock, IdGenerator）
//! - **impls**: 実装（NearestCar / ParityStrategy / ZoneStrategy、Look / Fcfs / ShortestSeekTime、event sink）
//! - **queue**: 号機ごとの pending キュー（CarQueue）
//! - **app**: アプリケーションロジック（builder, dispatcher, registry, service loop, config）
//! - **observability**: 号機・全体の状態ビュー
//!
//! # 流れ
//! 1. 乗り場呼び → Dispatcher が SelectionStrategy で号機を選ぶ → その号機の CarQueue へ
//! 2. かご呼び → 号機を選ばずに直接 CarQueue へ
//! 3. 号機ごとのサービスループが SchedulingStrategy で次の停止を決め、移動して停止する

pub mod app;
pub mod domain;
pub mod impls;
pub mod observability;
pub mod ports;
pub mod queue;

pub use app::{ElevatorSystem, ElevatorSystemBuilder, SystemConfig};
