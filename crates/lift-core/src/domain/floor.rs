//! Floor - 階と階の範囲
//!
//! 建物の階範囲（building）と号機ごとの担当ゾーン（zone）は同じ
//! `FloorRange` で表現する。どちらも両端を含む連続区間。

use serde::{Deserialize, Serialize};
use std::fmt;

/// A floor number. Basements are negative.
pub type Floor = i32;

/// Inclusive, contiguous range of floors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FloorRange {
    pub lowest: Floor,
    pub highest: Floor,
}

impl FloorRange {
    pub const fn new(lowest: Floor, highest: Floor) -> Self {
        Self { lowest, highest }
    }

    /// lowest > highest の範囲は空
    pub fn is_empty(&self) -> bool {
        self.lowest > self.highest
    }

    pub fn contains(&self, floor: Floor) -> bool {
        self.lowest <= floor && floor <= self.highest
    }

    pub fn overlaps(&self, other: &FloorRange) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.lowest <= other.highest
            && other.lowest <= self.highest
    }

    /// `other` がこの範囲に完全に収まるか
    pub fn covers(&self, other: &FloorRange) -> bool {
        self.contains(other.lowest) && self.contains(other.highest)
    }

    pub fn is_top(&self, floor: Floor) -> bool {
        floor == self.highest
    }

    pub fn is_bottom(&self, floor: Floor) -> bool {
        floor == self.lowest
    }
}

impl fmt::Display for FloorRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}..={}]", self.lowest, self.highest)
    }
}
