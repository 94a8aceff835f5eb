//! Request - hall call / cab call
//!
//! # 2 種類の呼び出し
//! - **Hall call**: 乗り場ボタン。origin + direction のみ、号機は未定。
//! - **Cab call**: かご内ボタン。押した号機（car_hint）と行き先を持つ。
//!   direction は押した時点の階と行き先から導出する。
//!
//! 作成後は不変（フィールドは非公開、getter のみ）。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use super::direction::Direction;
use super::floor::Floor;
use super::ids::{CarId, RequestId};

/// 冪等性のキー。同じキーのリクエストは pending に 1 件しか入らない。
///
/// cab call は押した階に依らず行き先で同一視する（`origin` には行き先が入る）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StopKey {
    pub origin: Floor,
    pub destination: Option<Floor>,
}

/// An immutable hall or cab call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    id: RequestId,
    origin: Floor,
    direction: Direction,
    destination: Option<Floor>,
    car_hint: Option<CarId>,
    submitted_at: DateTime<Utc>,
}

impl Request {
    /// Hall call placed from `origin`.
    pub fn hall(origin: Floor, direction: Direction) -> Self {
        Self {
            id: RequestId::from_ulid(Ulid::new()),
            origin,
            direction,
            destination: None,
            car_hint: None,
            submitted_at: Utc::now(),
        }
    }

    /// Cab call placed inside `car` while it stood at `current`.
    pub fn cab(car: CarId, current: Floor, destination: Floor) -> Self {
        Self {
            id: RequestId::from_ulid(Ulid::new()),
            origin: current,
            direction: Direction::between(current, destination),
            destination: Some(destination),
            car_hint: Some(car),
            submitted_at: Utc::now(),
        }
    }

    /// Replace identity and timestamp (used by the dispatcher's id generator and clock).
    pub fn stamped(mut self, id: RequestId, submitted_at: DateTime<Utc>) -> Self {
        self.id = id;
        self.submitted_at = submitted_at;
        self
    }

    /// Bind a hall call to the car chosen by selection.
    pub fn assigned_to(mut self, car: CarId) -> Self {
        self.car_hint = Some(car);
        self
    }

    pub fn id(&self) -> RequestId {
        self.id
    }

    pub fn origin(&self) -> Floor {
        self.origin
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn destination(&self) -> Option<Floor> {
        self.destination
    }

    pub fn car_hint(&self) -> Option<CarId> {
        self.car_hint
    }

    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    pub fn is_cab_call(&self) -> bool {
        self.destination.is_some()
    }

    /// 停止すべき階: cab call なら destination、hall call なら origin
    pub fn target_floor(&self) -> Floor {
        self.destination.unwrap_or(self.origin)
    }

    pub fn key(&self) -> StopKey {
        StopKey {
            origin: self.target_floor(),
            destination: self.destination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    #[test]
    fn hall_call_targets_origin() {
        let req = Request::hall(4, Direction::Down);
        assert_eq!(req.target_floor(), 4);
        assert!(!req.is_cab_call());
        assert_eq!(req.car_hint(), None);
    }

    #[rstest]
    #[case::up(2, 7, Direction::Up)]
    #[case::down(9, 3, Direction::Down)]
    #[case::same(5, 5, Direction::Idle)]
    fn cab_call_derives_direction(
        #[case] current: Floor,
        #[case] destination: Floor,
        #[case] expected: Direction,
    ) {
        let req = Request::cab(CarId::new(2), current, destination);
        assert_eq!(req.direction(), expected);
        assert_eq!(req.target_floor(), destination);
        assert_eq!(req.car_hint(), Some(CarId::new(2)));
    }

    #[test]
    fn key_ignores_identity() {
        let a = Request::cab(CarId::new(1), 1, 7);
        let b = Request::cab(CarId::new(1), 1, 7);
        assert_ne!(a.id(), b.id());
        assert_eq!(a.key(), b.key());
    }

    #[test]
    fn cab_key_ignores_where_the_button_was_pressed() {
        let at_first = Request::cab(CarId::new(1), 1, 7);
        let on_the_way = Request::cab(CarId::new(1), 2, 7);
        assert_eq!(at_first.key(), on_the_way.key());
        assert_ne!(at_first.key(), Request::hall(7, Direction::Down).key());
    }

    #[test]
    fn stamped_overrides_id_and_time() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let id = RequestId::from_ulid(Ulid::new());
        let req = Request::hall(3, Direction::Up).stamped(id, at);
        assert_eq!(req.id(), id);
        assert_eq!(req.submitted_at(), at);
    }
}
