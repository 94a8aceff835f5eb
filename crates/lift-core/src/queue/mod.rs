//! Queue module: 号機ごとの pending キュー。

mod car_queue;

pub use car_queue::{CarQueue, Enqueued, Plan};
