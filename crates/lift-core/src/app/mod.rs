//! App - アプリケーション層
//!
//! ports を組み合わせて号機の運行を実装します。
//!
//! # 主要コンポーネント
//! - **ElevatorSystemBuilder**: システムの構築とワイヤリング
//! - **Dispatcher**: 乗り場呼び・かご呼びの受付と号機への割り当て
//! - **CarRegistry**: 号機の登録と起動時検証
//! - **CarGroup**: 号機ごとのサービスループ（pop→travel→stop→idle）
//! - **SystemConfig**: JSON 設定

pub mod builder;
pub mod car;
pub mod config;
pub mod dispatcher;
pub mod group;
pub mod registry;
mod service_loop;

// 主要な型を再エクスポート
pub use self::builder::{BuildError, ElevatorSystem, ElevatorSystemBuilder};
pub use self::car::{Car, CarTiming};
pub use self::config::{CarSpec, ConfigError, SchedulingKind, SelectionKind, SystemConfig};
pub use self::dispatcher::Dispatcher;
pub use self::group::CarGroup;
pub use self::registry::CarRegistry;
