//! 停止順の決定戦略
//!
//! | 戦略 | 選び方 | 弱点 |
//! |------|--------|------|
//! | Look | 進行方向で最も近い階、なければ反転 | なし（デフォルト） |
//! | Fcfs | 受付順 | 行ったり来たりする |
//! | ShortestSeekTime | 現在階に最も近い階 | 遠い階が飢餓する |

pub mod fcfs;
pub mod look;
pub mod sstf;

pub use self::fcfs::Fcfs;
pub use self::look::Look;
pub use self::sstf::ShortestSeekTime;

use crate::domain::{CarState, Direction, Floor};

/// Direction to travel towards `floor`; a stop on the current floor keeps the
/// car's present heading.
fn heading_towards(state: &CarState, floor: Floor) -> Direction {
    match Direction::between(state.current_floor, floor) {
        Direction::Idle => state.direction,
        direction => direction,
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::domain::{CarId, CarState, Direction, Floor, Request};
    use crate::ports::SchedulingStrategy;

    pub fn car(floor: Floor, direction: Direction, targets: &[Floor]) -> CarState {
        CarState::new(CarId::new(1), floor)
            .heading(direction)
            .with_pending(targets.iter().map(|&f| Request::hall(f, Direction::Up)))
    }

    /// Serve everything the way the car loop would, returning the floors in order.
    /// Panics if the strategy needs more calls than there were requests.
    pub fn drain(strategy: &dyn SchedulingStrategy, mut state: CarState) -> Vec<Floor> {
        let budget = state.pending.len();
        let mut served = Vec::new();
        while let Some(stop) = strategy.next(&mut state) {
            served.push(stop.floor());
            state.current_floor = stop.floor();
            state.direction = stop.direction;
            assert!(served.len() <= budget, "{} did not terminate", strategy.name());
        }
        assert!(state.pending.is_empty());
        served
    }
}
