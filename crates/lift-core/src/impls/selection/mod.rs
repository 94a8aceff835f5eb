//! Hall call の号機選択戦略

pub mod nearest;
pub mod parity;
pub mod zone;

pub use self::nearest::NearestCar;
pub use self::parity::ParityStrategy;
pub use self::zone::ZoneStrategy;
