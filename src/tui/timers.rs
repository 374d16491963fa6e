//! Tokio-backed timer scheduling for the event loop.
//!
//! Each timer is a spawned task that sleeps and then sends its token back to
//! the loop. The handle aborts the task, so a cancelled timer never delivers.

use std::time::Duration;

use log::warn;
use tokio::sync::mpsc::UnboundedSender;

use crate::core::timer::{Scheduler, TimerHandle, TimerToken};

pub struct TokioScheduler {
    tx: UnboundedSender<TimerToken>,
}

impl TokioScheduler {
    pub fn new(tx: UnboundedSender<TimerToken>) -> Self {
        Self { tx }
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&mut self, token: TimerToken, delay: Duration) -> TimerHandle {
        let tx = self.tx.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(token).is_err() {
                warn!("Failed to deliver {token}: receiver dropped");
            }
        });
        let abort = task.abort_handle();
        TimerHandle::new(move || abort.abort())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::timer::Timers;
    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    async fn test_token_delivered_after_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timers = Timers::new(Box::new(TokioScheduler::new(tx)));

        let start = tokio::time::Instant::now();
        let pending = timers.start(Duration::from_millis(350));
        let token = rx.recv().await;

        assert_eq!(token, Some(pending.token));
        assert!(start.elapsed() >= Duration::from_millis(350));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_timer_never_delivers() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timers = Timers::new(Box::new(TokioScheduler::new(tx)));

        let pending = timers.start(Duration::from_millis(350));
        pending.cancel();

        let result = tokio::time::timeout(Duration::from_secs(2), rx.recv()).await;
        assert!(result.is_err(), "cancelled timer fired: {:?}", result);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_deck_cancels_its_timers() {
        use crate::core::action::{Action, update};
        use crate::core::state::{Deck, DeckConfig};
        use crate::test_support::sample_items;

        let (tx, mut rx) = mpsc::unbounded_channel();
        {
            let mut deck = Deck::with_items(
                DeckConfig::default(),
                Box::new(TokioScheduler::new(tx)),
                sample_items(&["A", "B"]),
            );
            update(&mut deck, Action::Wheel { delta_x: 0.0, delta_y: 1.0 });
        }

        // All senders are gone once the aborted task is dropped.
        let result = tokio::time::timeout(Duration::from_secs(2), rx.recv()).await;
        assert!(matches!(result, Ok(None) | Err(_)), "timer fired after drop: {:?}", result);
    }
}
