//! # Timer Requests
//!
//! Timers are data. A transition that wants to be woken later returns a
//! [`TimerCommand`]; the scheduler in the TUI adapter owns the clock and
//! feeds `Action::Tick(kind)` back into the session queue when it fires.
//!
//! Every request is one-shot. Repeating behaviour (cursor blink, splash
//! countdown) comes from re-arming on each tick, so stopping a chain is just
//! not re-arming it.

use std::time::Duration;

/// Which timer chain a request belongs to. At most one timer per kind is
/// pending at any time; arming a kind again replaces the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    CursorBlink,
    SplashTick,
    MinDelay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerRequest {
    pub kind: TimerKind,
    pub delay: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    Arm(TimerRequest),
    Cancel(TimerKind),
}

impl TimerCommand {
    pub fn arm(kind: TimerKind, delay: Duration) -> Self {
        TimerCommand::Arm(TimerRequest { kind, delay })
    }

    pub fn kind(&self) -> TimerKind {
        match self {
            TimerCommand::Arm(request) => request.kind,
            TimerCommand::Cancel(kind) => *kind,
        }
    }
}
