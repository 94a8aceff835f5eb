//! Domain identifiers (strongly-typed IDs).
//!
//! # CarId と RequestId
//! - **CarId**: 設定で与えられる号機番号（1 号機, 2 号機 ...）。ParityStrategy が
//!   偶奇を見るので整数のまま保持する。
//! - **RequestId**: 受け付けたリクエストごとの ULID。ログの突き合わせ用で、
//!   冪等性のキー（origin, destination）には含めない。
//!
//! ## Phantom Type パターン
//! `Id<T>` というジェネリック型で共通実装を提供しつつ、
//! `T` は実行時には使わない（PhantomData）マーカー型として、
//! コンパイル時の型安全性を提供します。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use ulid::Ulid;

/// Identifier of an elevator car, as configured at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CarId(u32);

impl CarId {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// 偶数号機かどうか（ParityStrategy 用）
    pub fn is_even(self) -> bool {
        self.0 % 2 == 0
    }
}

impl From<u32> for CarId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for CarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "car-{}", self.0)
    }
}

/// IdMarker は各 ID 型のマーカー trait
///
/// Display で使うプレフィックス（"req-"）を提供します。
pub trait IdMarker: Send + Sync + 'static {
    fn prefix() -> &'static str;
}

/// ジェネリック ID 型
///
/// `T` は PhantomData で、実行時にはメモリを消費しませんが、
/// コンパイル時に型安全性を提供します。
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Id<T: IdMarker> {
    ulid: Ulid,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

impl<T: IdMarker> Id<T> {
    pub fn from_ulid(ulid: Ulid) -> Self {
        Self {
            ulid,
            _marker: PhantomData,
        }
    }

    /// 内部の ULID を取得
    pub fn as_ulid(&self) -> Ulid {
        self.ulid
    }
}

impl<T: IdMarker> From<Ulid> for Id<T> {
    fn from(ulid: Ulid) -> Self {
        Self::from_ulid(ulid)
    }
}

impl<T: IdMarker> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", T::prefix(), self.ulid)
    }
}

/// Request のマーカー型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Call {}

impl IdMarker for Call {
    fn prefix() -> &'static str {
        "req-"
    }
}

/// Identifier of an accepted hall or cab call.
pub type RequestId = Id<Call>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn car_id_parity() {
        assert!(CarId::new(2).is_even());
        assert!(!CarId::new(1).is_even());
        assert_eq!(CarId::from(7).get(), 7);
        assert_eq!(CarId::new(3).to_string(), "car-3");
    }

    #[test]
    fn request_id_has_prefix() {
        let ulid = Ulid::new();
        let id = RequestId::from_ulid(ulid);
        assert_eq!(id.as_ulid(), ulid);
        assert!(id.to_string().starts_with("req-"));
    }

    #[test]
    fn request_id_can_be_serialized() {
        let id: RequestId = Ulid::new().into();

        let serialized = serde_json::to_string(&id).unwrap();
        let deserialized: RequestId = serde_json::from_str(&serialized).unwrap();

        assert_eq!(id, deserialized);
    }

    #[test]
    fn phantom_data_does_not_consume_memory() {
        use std::mem::size_of;
        assert_eq!(size_of::<RequestId>(), size_of::<Ulid>());
    }
}
