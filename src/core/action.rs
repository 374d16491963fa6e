//! # Actions
//!
//! Everything the deck reacts to becomes an `Action`.
//! Mouse wheel turns? That's `Action::Wheel`.
//! Animation timer fires? That's `Action::TimerElapsed(token)`.
//!
//! The `update()` function applies an action to the deck and reports whether
//! the input was consumed or should propagate to whatever surrounds the deck.
//! No I/O here; timers are scheduled through the deck's `Scheduler`.
//!
//! ```text
//! Deck + Action  →  update()  →  Deck' + Propagation
//! ```
//!
//! Refused transitions are logged and dropped. They never queue.

use log::debug;

use crate::core::gesture::Signal;
use crate::core::guard::Rejection;
use crate::core::item::{Item, ItemId};
use crate::core::state::Deck;
use crate::core::timer::TimerToken;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Wheel { delta_x: f32, delta_y: f32 },
    TouchStart { y: f32 },
    TouchMove { y: f32 },
    TouchEnd { y: f32 },
    TouchCancel,
    /// Click or tap on a card in the stack.
    ClickCard(ItemId),
    /// Click or tap anywhere on the overlay.
    ClickOverlay,
    TimerElapsed(TimerToken),
    LoadingStarted,
    ItemsLoaded(Vec<Item>),
    Teardown,
}

/// Whether the surrounding container should also see the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    /// The deck handled (or deliberately swallowed) the input.
    Stop,
    Continue,
}

pub fn update(deck: &mut Deck, action: Action) -> Propagation {
    if deck.is_torn_down() {
        debug!("Deck torn down, dropping {:?}", action);
        return Propagation::Stop;
    }

    match action {
        Action::Wheel { delta_x, delta_y } => {
            if deck.state().is_overlay() {
                return Propagation::Stop;
            }
            let signal = deck.gestures.wheel(delta_x, delta_y);
            apply_signal(deck, signal)
        }
        Action::TouchStart { y } => {
            if deck.state().is_overlay() {
                deck.gestures.touch_cancel();
                return Propagation::Stop;
            }
            deck.gestures.touch_start(y);
            Propagation::Continue
        }
        Action::TouchMove { y } => {
            if deck.state().is_overlay() {
                return Propagation::Stop;
            }
            deck.gestures.touch_move(y);
            Propagation::Continue
        }
        Action::TouchEnd { y } => {
            if deck.state().is_overlay() {
                deck.gestures.touch_cancel();
                return Propagation::Stop;
            }
            let signal = deck.gestures.touch_end(y);
            apply_signal(deck, signal)
        }
        Action::TouchCancel => {
            deck.gestures.touch_cancel();
            Propagation::Continue
        }
        Action::ClickCard(id) => {
            log_refusal("open", deck.open_overlay(id));
            Propagation::Stop
        }
        Action::ClickOverlay => {
            log_refusal("close", deck.close_overlay());
            Propagation::Stop
        }
        Action::TimerElapsed(token) => {
            deck.timer_elapsed(token);
            Propagation::Stop
        }
        Action::LoadingStarted => {
            deck.set_loading(true);
            Propagation::Stop
        }
        Action::ItemsLoaded(items) => {
            deck.replace_items(items);
            Propagation::Stop
        }
        Action::Teardown => {
            deck.teardown();
            Propagation::Stop
        }
    }
}

/// A gesture that produced a signal belongs to the deck whether or not the
/// transition starts. One that produced nothing passes through.
fn apply_signal(deck: &mut Deck, signal: Option<Signal>) -> Propagation {
    let Some(signal) = signal else {
        return Propagation::Continue;
    };
    log_refusal("stack", deck.begin_stack(signal));
    Propagation::Stop
}

fn log_refusal(what: &str, result: Result<(), Rejection>) {
    if let Err(rejection) = result {
        debug!("Dropped {what} transition: {rejection}");
    }
}
