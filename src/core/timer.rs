//! # Timers
//!
//! Every animation in the deck is a single-shot timer. The engine never
//! sleeps: it asks a `Scheduler` to deliver a `TimerToken` after a delay and
//! keeps the returned `TimerHandle` next to the state the timer will mutate.
//!
//! ```text
//! Deck ──schedule(token, 350ms)──▶ Scheduler ──(later)──▶ Action::TimerElapsed(token)
//!   │                                                            │
//!   └── PendingTimer { token, handle } ◀── matched or ignored ───┘
//! ```
//!
//! Dropping a `TimerHandle` cancels the timer, so releasing the state that
//! owns it is enough to guarantee no callback fires afterwards.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

/// Identifies one scheduled timer. Never reused within a `Timers` instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(u64);

impl fmt::Display for TimerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Something that can deliver a token back to the deck after a delay.
pub trait Scheduler {
    fn schedule(&mut self, token: TimerToken, delay: Duration) -> TimerHandle;
}

/// Cancellation handle for a scheduled timer. Cancels on drop.
pub struct TimerHandle {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl TimerHandle {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn cancel(mut self) {
        self.fire_cancel();
    }

    fn fire_cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.fire_cancel();
    }
}

impl fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerHandle")
            .field("armed", &self.cancel.is_some())
            .finish()
    }
}

/// A timer the deck is waiting on.
#[derive(Debug)]
pub struct PendingTimer {
    pub token: TimerToken,
    handle: TimerHandle,
}

impl PendingTimer {
    pub fn cancel(self) {
        self.handle.cancel();
    }
}

/// Token allocation plus the scheduler that delivers them.
pub struct Timers {
    scheduler: Box<dyn Scheduler>,
    next_token: u64,
}

impl Timers {
    pub fn new(scheduler: Box<dyn Scheduler>) -> Self {
        Self {
            scheduler,
            next_token: 1,
        }
    }

    pub fn start(&mut self, delay: Duration) -> PendingTimer {
        let token = TimerToken(self.next_token);
        self.next_token += 1;
        let handle = self.scheduler.schedule(token, delay);
        PendingTimer { token, handle }
    }
}

// ============================================================================
// Manual clock (deterministic, single-threaded)
// ============================================================================

#[derive(Debug, Default)]
struct ClockState {
    now: Duration,
    queue: Vec<(Duration, TimerToken)>,
}

/// A virtual clock. Time only moves when `advance` is called, which returns
/// the tokens that came due in deadline order.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    state: Rc<RefCell<ClockState>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// A scheduler feeding this clock's queue.
    pub fn scheduler(&self) -> Box<dyn Scheduler> {
        Box::new(ManualScheduler {
            state: Rc::clone(&self.state),
        })
    }

    /// Number of timers scheduled and not yet fired or cancelled.
    pub fn pending(&self) -> usize {
        self.state.borrow().queue.len()
    }

    pub fn advance(&self, by: Duration) -> Vec<TimerToken> {
        let mut state = self.state.borrow_mut();
        state.now += by;
        let now = state.now;

        let mut due: Vec<(Duration, TimerToken)> = Vec::new();
        state.queue.retain(|&(deadline, token)| {
            if deadline <= now {
                due.push((deadline, token));
                false
            } else {
                true
            }
        });
        due.sort();
        due.into_iter().map(|(_, token)| token).collect()
    }
}

struct ManualScheduler {
    state: Rc<RefCell<ClockState>>,
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, token: TimerToken, delay: Duration) -> TimerHandle {
        let deadline = {
            let mut state = self.state.borrow_mut();
            let deadline = state.now + delay;
            state.queue.push((deadline, token));
            deadline
        };
        log::debug!("Scheduled {token} at {deadline:?}");

        let state = Rc::clone(&self.state);
        TimerHandle::new(move || {
            state.borrow_mut().queue.retain(|&(_, t)| t != token);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_are_unique_and_increasing() {
        let clock = ManualClock::new();
        let mut timers = Timers::new(clock.scheduler());
        let a = timers.start(Duration::from_millis(10));
        let b = timers.start(Duration::from_millis(10));
        assert!(b.token > a.token);
    }

    #[test]
    fn test_manual_clock_fires_at_deadline() {
        let clock = ManualClock::new();
        let mut timers = Timers::new(clock.scheduler());
        let pending = timers.start(Duration::from_millis(350));

        assert!(clock.advance(Duration::from_millis(349)).is_empty());
        assert_eq!(clock.advance(Duration::from_millis(1)), vec![pending.token]);
        assert!(clock.advance(Duration::from_secs(5)).is_empty());
    }

    #[test]
    fn test_due_tokens_come_back_in_deadline_order() {
        let clock = ManualClock::new();
        let mut timers = Timers::new(clock.scheduler());
        let late = timers.start(Duration::from_millis(600));
        let early = timers.start(Duration::from_millis(350));
        assert_eq!(
            clock.advance(Duration::from_secs(1)),
            vec![early.token, late.token]
        );
    }

    #[test]
    fn test_cancel_removes_timer() {
        let clock = ManualClock::new();
        let mut timers = Timers::new(clock.scheduler());
        let pending = timers.start(Duration::from_millis(350));
        assert_eq!(clock.pending(), 1);
        pending.cancel();
        assert_eq!(clock.pending(), 0);
        assert!(clock.advance(Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn test_drop_cancels() {
        let clock = ManualClock::new();
        let mut timers = Timers::new(clock.scheduler());
        {
            let _pending = timers.start(Duration::from_millis(350));
        }
        assert_eq!(clock.pending(), 0);
    }
}
