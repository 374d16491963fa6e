//! # Stack State Machine
//!
//! Owns the top-of-stack position and the one stack motion that may be in
//! flight. The position only changes when that motion's timer elapses:
//!
//! ```text
//! Idle ──Advance (pos < len-1)──▶ AdvancingOut ──T──▶ pos += 1, Idle
//! Idle ──Retreat (pos > 0)──────▶ RetreatingIn ──T──▶ pos -= 1, Idle
//! ```
//!
//! Entry into a motion is gated by `TransitionGuard` in the deck; this type
//! only enforces the boundaries.

use std::time::Duration;

use log::debug;

use crate::core::gesture::Signal;
use crate::core::guard::Rejection;
use crate::core::timer::{PendingTimer, TimerToken, Timers};

#[derive(Debug)]
struct Motion {
    signal: Signal,
    timer: PendingTimer,
}

#[derive(Debug, Default)]
pub struct StackMachine {
    position: usize,
    motion: Option<Motion>,
}

impl StackMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// The motion currently animating, if any.
    pub fn motion(&self) -> Option<Signal> {
        self.motion.as_ref().map(|m| m.signal)
    }

    pub fn owns_timer(&self, token: TimerToken) -> bool {
        self.motion.as_ref().is_some_and(|m| m.timer.token == token)
    }

    /// Start a motion. `len` is the current item count.
    pub fn begin(
        &mut self,
        signal: Signal,
        len: usize,
        timers: &mut Timers,
        duration: Duration,
    ) -> Result<TimerToken, Rejection> {
        if self.motion.is_some() {
            return Err(Rejection::Busy);
        }
        let allowed = match signal {
            Signal::Advance => self.position + 1 < len,
            Signal::Retreat => self.position > 0,
        };
        if !allowed {
            return Err(Rejection::AtBoundary);
        }

        let timer = timers.start(duration);
        let token = timer.token;
        debug!(
            "Stack {:?} from position {} ({}), {:?}",
            signal, self.position, token, duration
        );
        self.motion = Some(Motion { signal, timer });
        Ok(token)
    }

    /// Apply the motion whose timer just elapsed. Returns false for foreign tokens.
    pub fn complete(&mut self, token: TimerToken, len: usize) -> bool {
        if !self.owns_timer(token) {
            return false;
        }
        let Some(motion) = self.motion.take() else {
            return false;
        };
        self.position = match motion.signal {
            Signal::Advance => (self.position + 1).min(len.saturating_sub(1)),
            Signal::Retreat => self.position.saturating_sub(1),
        };
        debug!("Stack settled at position {}", self.position);
        true
    }

    /// Abandon any in-flight motion without moving.
    pub fn cancel(&mut self) {
        if let Some(motion) = self.motion.take() {
            debug!("Cancelled stack {:?} ({})", motion.signal, motion.timer.token);
            motion.timer.cancel();
        }
    }

    /// Keep the position inside a list of `len` items (0 for an empty list).
    pub fn clamp(&mut self, len: usize) {
        self.position = self.position.min(len.saturating_sub(1));
    }
}
