//! ServiceLoop - 号機ごとの実行ループ
//!
//! # フロー
//! 1. CarQueue::plan() で次の停止を決める（ロック 1 回）
//! 2. 1 階ずつ移動し、そのたびに advance() + on_arrive
//! 3. 到着したら on_stop、ドア開放時間だけ待ってから complete()
//! 4. pending が空なら on_idle を出して enqueue か shutdown まで待つ
//!
//! スケジューリングの失敗（StrategyExhausted）ではループを止めない。
//! ログに出して Idle に戻り、次の enqueue を待つ。pending は残っているので on_idle は出さない。

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{Instrument, debug, error, info, info_span};

use super::car::Car;
use crate::domain::{Direction, DispatchError, Stop};
use crate::ports::CarEventSink;
use crate::queue::Plan;

pub(crate) async fn service_loop(
    car: Arc<Car>,
    sink: Arc<dyn CarEventSink>,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    let span = info_span!("car", car = %car.id());
    async move {
        info!(
            scheduling = car.scheduling().name(),
            floor = car.current_floor(),
            "service loop started"
        );

        // 起動直後は Idle だが「処理し尽くした」わけではないので on_idle は出さない
        let mut idle_reported = true;
        loop {
            if *shutdown_rx.borrow() {
                break;
            }

            match car.queue().plan(car.scheduling()).await {
                Plan::Serve(stop) => {
                    idle_reported = false;
                    serve(&car, sink.as_ref(), stop).await;
                    continue;
                }
                Plan::Empty => {
                    if !idle_reported {
                        sink.on_idle(car.id()).await;
                        idle_reported = true;
                    }
                }
                Plan::Exhausted { pending } => {
                    let err = DispatchError::StrategyExhausted {
                        car: car.id(),
                        pending,
                    };
                    error!(error = %err, "returning to idle");
                }
            }

            // pending が空の間は suspend（busy-poll しない）
            tokio::select! {
                changed = shutdown_rx.changed() => {
                    if changed.is_err() {
                        // sender dropped: treat as shutdown
                        break;
                    }
                }
                _ = car.queue().wait() => {}
            }
        }

        info!("service loop stopped");
    }
    .instrument(span)
    .await
}

/// Travel floor by floor to the stop, then open the door.
async fn serve(car: &Car, sink: &dyn CarEventSink, stop: Stop) {
    let target = stop.floor();
    let mut floor = car.current_floor();
    let step = Direction::between(floor, target).step();
    debug!(
        from = floor,
        to = target,
        direction = %stop.direction,
        request = %stop.request.id(),
        "serving"
    );

    while floor != target {
        tokio::time::sleep(car.timing().floor_travel).await;
        floor += step;
        car.queue().advance(floor).await;
        sink.on_arrive(car.id(), floor).await;
    }

    sink.on_stop(car.id(), &stop.request).await;
    tokio::time::sleep(car.timing().door_dwell).await;
    car.queue().complete().await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::car::CarTiming;
    use crate::domain::{CarId, CarState, CarStatus, Floor, Request};
    use crate::impls::{Look, RecordingEventSink};
    use crate::ports::SchedulingStrategy;
    use crate::queue::Enqueued;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    fn car_with(
        scheduling: Arc<dyn SchedulingStrategy>,
        floor: Floor,
        timing: CarTiming,
    ) -> Arc<Car> {
        Arc::new(Car::new(CarId::new(1), floor, None, None, scheduling, timing))
    }

    fn spawn_car(
        car: Arc<Car>,
        sink: Arc<RecordingEventSink>,
    ) -> (watch::Sender<bool>, tokio::task::JoinHandle<()>) {
        let (tx, rx) = watch::channel(false);
        let join = tokio::spawn(service_loop(car, sink, rx));
        (tx, join)
    }

    async fn wait_idle(car: &Car) {
        let mut rx = car.queue().subscribe();
        tokio::time::timeout(
            Duration::from_secs(5),
            rx.wait_for(|v| v.status == CarStatus::Idle && v.pending == 0 && v.served > 0),
        )
        .await
        .expect("car did not go idle")
        .unwrap();
    }

    #[tokio::test]
    async fn serves_look_order_and_reports_each_floor() {
        let car = car_with(Arc::new(Look), 1, CarTiming::INSTANT);
        for floor in [5, 2, 8] {
            car.enqueue(Request::hall(floor, Direction::Up)).await.unwrap();
        }
        let sink = Arc::new(RecordingEventSink::new());
        let (tx, join) = spawn_car(car.clone(), sink.clone());

        wait_idle(&car).await;
        tx.send(true).unwrap();
        join.await.unwrap();

        assert_eq!(sink.stops(car.id()).await, vec![2, 5, 8]);
        assert_eq!(sink.arrivals(car.id()).await, (2..=8).collect::<Vec<_>>());
        assert_eq!(sink.idle_count(car.id()).await, 1);
        assert_eq!(car.current_floor(), 8);
        assert_eq!(car.view().served, 3);
    }

    #[tokio::test]
    async fn wakes_on_enqueue_after_idle() {
        let car = car_with(Arc::new(Look), 5, CarTiming::INSTANT);
        let sink = Arc::new(RecordingEventSink::new());
        let (tx, join) = spawn_car(car.clone(), sink.clone());

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(sink.events().await.is_empty());

        car.enqueue(Request::cab(car.id(), 5, 3)).await.unwrap();
        wait_idle(&car).await;

        tx.send(true).unwrap();
        join.await.unwrap();
        assert_eq!(sink.arrivals(car.id()).await, vec![4, 3]);
        assert_eq!(sink.stops(car.id()).await, vec![3]);
    }

    #[tokio::test]
    async fn exhausted_strategy_does_not_kill_the_loop() {
        struct Refuse;
        impl SchedulingStrategy for Refuse {
            fn next(&self, _state: &mut CarState) -> Option<Stop> {
                None
            }
            fn name(&self) -> &'static str {
                "refuse"
            }
        }

        let car = car_with(Arc::new(Refuse), 1, CarTiming::INSTANT);
        let sink = Arc::new(RecordingEventSink::new());
        let (tx, join) = spawn_car(car.clone(), sink.clone());

        car.enqueue(Request::hall(4, Direction::Up)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert!(!join.is_finished());
        assert_eq!(car.view().status, CarStatus::Idle);
        assert_eq!(car.pending_len().await, 1);

        tx.send(true).unwrap();
        tokio::time::timeout(Duration::from_secs(1), join)
            .await
            .expect("loop did not stop")
            .unwrap();
    }

    #[tokio::test]
    async fn repeated_press_while_travelling_stops_once() {
        let timing = CarTiming {
            floor_travel: Duration::from_millis(30),
            door_dwell: Duration::ZERO,
        };
        let car = car_with(Arc::new(Look), 1, timing);
        let sink = Arc::new(RecordingEventSink::new());
        let (tx, join) = spawn_car(car.clone(), sink.clone());

        let first = car.enqueue(Request::hall(8, Direction::Up)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(70)).await;
        let second = car.enqueue(Request::hall(8, Direction::Up)).await.unwrap();
        assert_eq!(first, Enqueued::Added(1));
        assert_eq!(second, Enqueued::AlreadyPending);

        wait_idle(&car).await;
        tx.send(true).unwrap();
        join.await.unwrap();

        assert_eq!(sink.stops(car.id()).await, vec![8]);
        assert_eq!(car.view().served, 1);
    }

    #[tokio::test]
    async fn exhausted_after_work_does_not_report_idle() {
        /// Serves one stop with LOOK, then refuses everything.
        #[derive(Default)]
        struct OnceThenRefuse {
            used: AtomicBool,
        }
        impl SchedulingStrategy for OnceThenRefuse {
            fn next(&self, state: &mut CarState) -> Option<Stop> {
                if self.used.swap(true, Ordering::SeqCst) {
                    None
                } else {
                    Look.next(state)
                }
            }
            fn name(&self) -> &'static str {
                "once"
            }
        }

        let car = car_with(Arc::new(OnceThenRefuse::default()), 1, CarTiming::INSTANT);
        for floor in [4, 6] {
            car.enqueue(Request::hall(floor, Direction::Up)).await.unwrap();
        }
        let sink = Arc::new(RecordingEventSink::new());
        let (tx, join) = spawn_car(car.clone(), sink.clone());

        let mut rx = car.queue().subscribe();
        tokio::time::timeout(
            Duration::from_secs(5),
            rx.wait_for(|v| v.served == 1 && v.status == CarStatus::Idle),
        )
        .await
        .expect("first stop never served")
        .unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;

        assert_eq!(sink.stops(car.id()).await, vec![4]);
        assert_eq!(sink.idle_count(car.id()).await, 0);
        assert_eq!(car.pending_len().await, 1);

        tx.send(true).unwrap();
        join.await.unwrap();
    }

    #[tokio::test]
    async fn dropping_the_sender_stops_the_loop() {
        let car = car_with(Arc::new(Look), 1, CarTiming::INSTANT);
        let sink = Arc::new(RecordingEventSink::new());
        let (tx, join) = spawn_car(car, sink);
        drop(tx);
        tokio::time::timeout(Duration::from_secs(1), join)
            .await
            .expect("loop did not stop")
            .unwrap();
    }
}
