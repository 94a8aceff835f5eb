//! Domain model (floors, directions, requests, car state, errors).
//!
//! 副作用を持たない値型だけを置く。ロックや非同期処理は queue / app 側。

pub mod direction;
pub mod errors;
pub mod floor;
pub mod ids;
pub mod pending;
pub mod request;
pub mod state;

pub use self::direction::Direction;
pub use self::errors::{ConfigurationError, DispatchError, InvalidRequest};
pub use self::floor::{Floor, FloorRange};
pub use self::ids::{CarId, RequestId};
pub use self::pending::PendingSet;
pub use self::request::{Request, StopKey};
pub use self::state::{CarState, CarStatus, Stop};
