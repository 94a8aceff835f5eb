//! CarQueue - 号機ごとのリクエストキュー
//!
//! # 学習ポイント
//! - tokio Mutex + Notify による producer / consumer
//! - 「スナップショットを取って選ぶ」を 1 回のロックで行う（next が一貫した pending を見る）
//! - ロックを握ったまま await しない（移動中も enqueue はブロックされない）
//!
//! # 処理中の停止
//! plan() が選んだ停止は pending から外れるが、complete() までは `in_flight` に残る。
//! 同じ停止の再登録はこれで弾き、容量にも数える。

use tokio::sync::{Mutex, Notify, watch};
use tracing::debug;

use crate::domain::{
    CarId, CarState, Direction, DispatchError, Floor, FloorRange, Request, Stop, StopKey,
};
use crate::observability::CarSnapshot;
use crate::ports::SchedulingStrategy;

/// Result of an accepted enqueue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enqueued {
    /// Newly pending; carries the pending count after insertion.
    Added(usize),
    /// An equal stop was already pending or being served; nothing changed.
    AlreadyPending,
}

/// Outcome of asking the scheduling strategy for work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    Serve(Stop),
    Empty,
    /// pending が残っているのに strategy が何も返さなかった
    Exhausted { pending: usize },
}

struct Slot {
    state: CarState,
    in_flight: Option<StopKey>,
    served: u64,
}

impl Slot {
    fn holds(&self, key: &StopKey) -> bool {
        self.in_flight.as_ref() == Some(key) || self.state.pending.contains_key(key)
    }

    /// pending と処理中の停止の合計
    fn load(&self) -> usize {
        self.state.pending.len() + usize::from(self.in_flight.is_some())
    }
}

/// Pending requests and position of one car, guarded by a single lock.
///
/// # 実装詳細
/// - `slot`: CarState 全体と処理中の停止。pending への insert は Dispatcher、
///   位置の更新と next はサービスループ
/// - `notify`: enqueue 時にループを起こす（permit が残るので取りこぼさない）
/// - `published`: Slot を変えたらロック下で 1 回だけ公開する。読み手はロックを取らない
pub struct CarQueue {
    slot: Mutex<Slot>,
    notify: Notify,
    capacity: Option<usize>,
    published: watch::Sender<CarSnapshot>,
}

impl CarQueue {
    pub fn new(
        id: CarId,
        start_floor: Floor,
        zone: Option<FloorRange>,
        capacity: Option<usize>,
    ) -> Self {
        let (published, _) = watch::channel(CarSnapshot::new(id, start_floor, zone));
        Self {
            slot: Mutex::new(Slot {
                state: CarState::new(id, start_floor),
                in_flight: None,
                served: 0,
            }),
            notify: Notify::new(),
            capacity,
            published,
        }
    }

    /// Latest published view; never waits on the queue lock.
    pub fn view(&self) -> CarSnapshot {
        self.published.borrow().clone()
    }

    /// Subscribe to view changes.
    pub fn subscribe(&self) -> watch::Receiver<CarSnapshot> {
        self.published.subscribe()
    }

    fn publish(&self, slot: &Slot) {
        self.published.send_modify(|view| {
            view.floor = slot.state.current_floor;
            view.direction = slot.state.direction;
            view.status = slot.state.status();
            view.pending = slot.state.pending.len();
            view.served = slot.served;
            view.busy = slot.in_flight.is_some();
        });
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Add a request unless an equal stop is already pending or being served.
    ///
    /// 容量チェックは新規追加のときだけ。既にある停止は何も増やさないので受け付ける。
    pub async fn enqueue(&self, request: Request) -> Result<Enqueued, DispatchError> {
        let result = {
            let mut slot = self.slot.lock().await;
            if slot.holds(&request.key()) {
                Enqueued::AlreadyPending
            } else {
                if let Some(capacity) = self.capacity
                    && slot.load() >= capacity
                {
                    return Err(DispatchError::CarFull {
                        car: slot.state.id,
                        capacity,
                    });
                }
                debug!(
                    car = %slot.state.id,
                    request = %request.id(),
                    floor = request.target_floor(),
                    "enqueued"
                );
                slot.state.pending.insert(request);
                self.publish(&slot);
                Enqueued::Added(slot.state.pending.len())
            }
        };

        // Notify outside the lock
        if matches!(result, Enqueued::Added(_)) {
            self.notify.notify_one();
        }
        Ok(result)
    }

    /// Ask `strategy` for the next stop against a consistent view of pending.
    ///
    /// Serve のときは方向もここで反映し、停止を in_flight に移す（Idle -> Moving* の遷移）。
    /// Empty / Exhausted のときは Idle に戻す。
    pub async fn plan(&self, strategy: &dyn SchedulingStrategy) -> Plan {
        let mut slot = self.slot.lock().await;
        let plan = match strategy.next(&mut slot.state) {
            Some(stop) => {
                slot.state.direction = stop.direction;
                slot.in_flight = Some(stop.request.key());
                Plan::Serve(stop)
            }
            None => {
                slot.state.direction = Direction::Idle;
                slot.in_flight = None;
                if slot.state.pending.is_empty() {
                    Plan::Empty
                } else {
                    Plan::Exhausted {
                        pending: slot.state.pending.len(),
                    }
                }
            }
        };
        self.publish(&slot);
        plan
    }

    /// Record one floor step.
    pub async fn advance(&self, floor: Floor) {
        let mut slot = self.slot.lock().await;
        slot.state.current_floor = floor;
        self.publish(&slot);
    }

    /// Retire the in-flight stop once the door has closed.
    pub(crate) async fn complete(&self) {
        let mut slot = self.slot.lock().await;
        if slot.in_flight.take().is_some() {
            slot.served += 1;
        }
        self.publish(&slot);
    }

    /// Suspend until the next `Added` enqueue.
    pub async fn wait(&self) {
        self.notify.notified().await;
    }

    pub async fn pending_len(&self) -> usize {
        self.slot.lock().await.state.pending.len()
    }

    /// Clone of the full state (for tests and status queries).
    pub async fn snapshot(&self) -> CarState {
        self.slot.lock().await.state.clone()
    }
}
