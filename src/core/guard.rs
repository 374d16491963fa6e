//! # Transition Guard
//!
//! The single gate every transition passes through. At most one stack
//! transition or overlay transition is in flight; anything asked for while
//! one is running is dropped, never queued, so each finished animation maps
//! to exactly one position change.
//!
//! Refusals are values, not errors. Callers log them and move on.

use std::fmt;

use crate::core::state::TransitionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Another transition is in flight (or the overlay owns input).
    Busy,
    /// Items are still loading, or there are none.
    Loading,
    /// Advance on the last card or retreat on the first.
    AtBoundary,
    /// Close requested while the overlay is not fully expanded.
    NotExpanded,
    /// Open requested for an id that is not in the current list.
    UnknownItem,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Rejection::Busy => "transition in flight",
            Rejection::Loading => "items loading",
            Rejection::AtBoundary => "at stack boundary",
            Rejection::NotExpanded => "overlay not expanded",
            Rejection::UnknownItem => "unknown item",
        };
        f.write_str(reason)
    }
}

/// What the overlay wants to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayRequest {
    Open,
    Close,
}

pub struct TransitionGuard;

impl TransitionGuard {
    /// Advance/retreat may start only from `Idle` with items present.
    pub fn try_begin_stack_transition(
        state: &TransitionState,
        loading: bool,
    ) -> Result<(), Rejection> {
        if !matches!(state, TransitionState::Idle) {
            return Err(Rejection::Busy);
        }
        if loading {
            return Err(Rejection::Loading);
        }
        Ok(())
    }

    /// Open from `Idle`; close from `Expanded`.
    pub fn try_begin_overlay_transition(
        state: &TransitionState,
        request: OverlayRequest,
    ) -> Result<(), Rejection> {
        match (request, state) {
            (OverlayRequest::Open, TransitionState::Idle) => Ok(()),
            (OverlayRequest::Open, _) => Err(Rejection::Busy),
            (OverlayRequest::Close, TransitionState::Expanded(_)) => Ok(()),
            (OverlayRequest::Close, _) => Err(Rejection::NotExpanded),
        }
    }
}
