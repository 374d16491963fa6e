//! # Overlay Controller
//!
//! The single full-detail view. Opening is instant; closing keeps the same
//! item on screen for the collapse duration so the exit animation can play,
//! then clears focus. The collapse timer is owned here, independent of any
//! stack motion.

use std::time::Duration;

use log::debug;

use crate::core::item::ItemId;
use crate::core::timer::{PendingTimer, TimerToken, Timers};

#[derive(Debug)]
enum Phase {
    Expanded(ItemId),
    Collapsing { id: ItemId, timer: PendingTimer },
}

/// How the overlay is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayVisual {
    Expanded,
    Collapsing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayView {
    pub item_id: ItemId,
    pub visual: OverlayVisual,
}

#[derive(Debug, Default)]
pub struct OverlayController {
    phase: Option<Phase>,
}

impl OverlayController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focused(&self) -> Option<&ItemId> {
        match &self.phase {
            Some(Phase::Expanded(id)) | Some(Phase::Collapsing { id, .. }) => Some(id),
            None => None,
        }
    }

    pub fn is_expanded(&self) -> bool {
        matches!(self.phase, Some(Phase::Expanded(_)))
    }

    pub fn is_collapsing(&self) -> bool {
        matches!(self.phase, Some(Phase::Collapsing { .. }))
    }

    pub fn view(&self) -> Option<OverlayView> {
        match &self.phase {
            Some(Phase::Expanded(id)) => Some(OverlayView {
                item_id: id.clone(),
                visual: OverlayVisual::Expanded,
            }),
            Some(Phase::Collapsing { id, .. }) => Some(OverlayView {
                item_id: id.clone(),
                visual: OverlayVisual::Collapsing,
            }),
            None => None,
        }
    }

    /// Show `id` immediately. Any previous phase is replaced.
    pub fn open(&mut self, id: ItemId) {
        debug!("Overlay expanded on {id}");
        self.phase = Some(Phase::Expanded(id));
    }

    /// Start the exit animation. Returns the collapse timer token, or `None`
    /// when the overlay was not expanded.
    pub fn close(&mut self, timers: &mut Timers, duration: Duration) -> Option<TimerToken> {
        let id = match self.phase.take() {
            Some(Phase::Expanded(id)) => id,
            other => {
                self.phase = other;
                return None;
            }
        };
        let timer = timers.start(duration);
        let token = timer.token;
        debug!("Overlay collapsing on {id} ({token}, {duration:?})");
        self.phase = Some(Phase::Collapsing { id, timer });
        Some(token)
    }

    pub fn owns_timer(&self, token: TimerToken) -> bool {
        matches!(&self.phase, Some(Phase::Collapsing { timer, .. }) if timer.token == token)
    }

    /// Finish collapsing if `token` is ours. Returns false otherwise.
    pub fn complete(&mut self, token: TimerToken) -> bool {
        if !self.owns_timer(token) {
            return false;
        }
        if let Some(Phase::Collapsing { id, .. }) = self.phase.take() {
            debug!("Overlay closed on {id}");
        }
        true
    }

    /// Drop the overlay at once, cancelling any collapse timer.
    pub fn dismiss(&mut self) {
        match self.phase.take() {
            Some(Phase::Collapsing { id, timer }) => {
                debug!("Overlay dismissed mid-collapse on {id}");
                timer.cancel();
            }
            Some(Phase::Expanded(id)) => debug!("Overlay dismissed on {id}"),
            None => {}
        }
    }
}
