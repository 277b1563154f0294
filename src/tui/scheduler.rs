//! Wall-clock side of the timers.
//!
//! The core hands out [`TimerCommand`]s; the scheduler turns each `Arm` into
//! a tokio task that sleeps and then pushes `Action::Tick(kind)` into the
//! session queue. One pending task per kind: arming again aborts the
//! previous one. Dropping the scheduler cancels everything, so a finished
//! session never wakes up again.

use std::collections::HashMap;

use log::{debug, warn};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::AbortHandle;

use crate::core::action::Action;
use crate::core::timer::{TimerCommand, TimerKind, TimerRequest};

pub struct Scheduler {
    events: UnboundedSender<Action>,
    pending: HashMap<TimerKind, AbortHandle>,
}

impl Scheduler {
    pub fn new(events: UnboundedSender<Action>) -> Self {
        Self {
            events,
            pending: HashMap::new(),
        }
    }

    pub fn apply(&mut self, commands: impl IntoIterator<Item = TimerCommand>) {
        for command in commands {
            match command {
                TimerCommand::Arm(request) => self.arm(request),
                TimerCommand::Cancel(kind) => self.cancel(kind),
            }
        }
    }

    /// Whether a timer of this kind is armed and has not fired yet.
    pub fn is_pending(&self, kind: TimerKind) -> bool {
        self.pending
            .get(&kind)
            .is_some_and(|handle| !handle.is_finished())
    }

    fn arm(&mut self, request: TimerRequest) {
        debug!("Arming {:?} in {:?}", request.kind, request.delay);
        let events = self.events.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(request.delay).await;
            if events.send(Action::Tick(request.kind)).is_err() {
                warn!("Dropping {:?} tick: session queue closed", request.kind);
            }
        });
        if let Some(previous) = self.pending.insert(request.kind, task.abort_handle()) {
            previous.abort();
        }
    }

    fn cancel(&mut self, kind: TimerKind) {
        if let Some(handle) = self.pending.remove(&kind) {
            debug!("Cancelling {:?}", kind);
            handle.abort();
        }
    }

    pub fn cancel_all(&mut self) {
        for (_, handle) in self.pending.drain() {
            handle.abort();
        }
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::sync::mpsc;
    use tokio::time::timeout;

    #[tokio::test(start_paused = true)]
    async fn test_armed_timer_ticks() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = Scheduler::new(tx);
        scheduler.apply([TimerCommand::arm(TimerKind::SplashTick, Duration::from_secs(1))]);
        assert!(scheduler.is_pending(TimerKind::SplashTick));

        let action = rx.recv().await;
        assert_eq!(action, Some(Action::Tick(TimerKind::SplashTick)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_arrive_in_deadline_order() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = Scheduler::new(tx);
        scheduler.apply([
            TimerCommand::arm(TimerKind::MinDelay, Duration::from_millis(2000)),
            TimerCommand::arm(TimerKind::SplashTick, Duration::from_millis(1000)),
            TimerCommand::arm(TimerKind::CursorBlink, Duration::from_millis(700)),
        ]);

        assert_eq!(rx.recv().await, Some(Action::Tick(TimerKind::CursorBlink)));
        assert_eq!(rx.recv().await, Some(Action::Tick(TimerKind::SplashTick)));
        assert_eq!(rx.recv().await, Some(Action::Tick(TimerKind::MinDelay)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_timer_never_fires() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = Scheduler::new(tx);
        scheduler.apply([
            TimerCommand::arm(TimerKind::SplashTick, Duration::from_secs(1)),
            TimerCommand::Cancel(TimerKind::SplashTick),
        ]);
        assert!(!scheduler.is_pending(TimerKind::SplashTick));

        let result = timeout(Duration::from_secs(5), rx.recv()).await;
        assert!(result.is_err(), "cancelled timer fired: {result:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearming_replaces_pending_timer() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = Scheduler::new(tx);
        scheduler.apply([TimerCommand::arm(TimerKind::CursorBlink, Duration::from_secs(1))]);
        scheduler.apply([TimerCommand::arm(TimerKind::CursorBlink, Duration::from_secs(3))]);

        let start = tokio::time::Instant::now();
        assert_eq!(rx.recv().await, Some(Action::Tick(TimerKind::CursorBlink)));
        assert!(start.elapsed() >= Duration::from_secs(3));

        let result = timeout(Duration::from_secs(5), rx.recv()).await;
        assert!(result.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_everything() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = Scheduler::new(tx.clone());
        scheduler.apply([
            TimerCommand::arm(TimerKind::CursorBlink, Duration::from_millis(700)),
            TimerCommand::arm(TimerKind::MinDelay, Duration::from_millis(2000)),
        ]);
        drop(scheduler);

        let result = timeout(Duration::from_secs(5), rx.recv()).await;
        assert!(result.is_err());
        drop(tx);
    }
}
