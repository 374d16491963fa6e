//! # Deck State
//!
//! All state of one stacked-card widget, in one owned value. Nothing here is
//! global; two decks never share anything.
//!
//! ```text
//! Deck
//! ├── items: Vec<Item>              // supplied by the data layer, read-only here
//! ├── loading: bool                 // gates every gesture
//! ├── config: DeckConfig            // window size, gap, durations, dead zone
//! ├── gestures: GestureNormalizer   // raw input → Signal
//! ├── stack: StackMachine           // position + in-flight motion timer
//! ├── overlay: OverlayController    // focused item + collapse timer
//! └── timers: Timers                // token allocation + scheduler
//! ```
//!
//! The single `TransitionState` is derived from `stack` and `overlay`; the
//! guard guarantees they are never both active. Mutations happen only through
//! `update(deck, action)` in action.rs.

use std::time::Duration;

use log::{debug, info};

use crate::core::gesture::{GestureNormalizer, Signal};
use crate::core::guard::{OverlayRequest, Rejection, TransitionGuard};
use crate::core::item::{Item, ItemId};
use crate::core::overlay::{OverlayController, OverlayView};
use crate::core::stack::StackMachine;
use crate::core::timer::{Scheduler, TimerToken, Timers};
use crate::core::window::{CardView, VisibleWindow, WindowLayout, incoming_card, visible_window};

pub const DEFAULT_WINDOW_SIZE: usize = 5;
pub const DEFAULT_GAP_PX: u32 = 16;
pub const DEFAULT_STACK_TRANSITION: Duration = Duration::from_millis(350);
pub const DEFAULT_OVERLAY_COLLAPSE: Duration = Duration::from_millis(600);
pub const DEFAULT_SWIPE_THRESHOLD_PX: f32 = 50.0;

/// Exactly one of these holds at any instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionState {
    Idle,
    AdvancingOut,
    RetreatingIn,
    Expanded(ItemId),
    Collapsing(ItemId),
}

impl TransitionState {
    pub fn label(&self) -> &'static str {
        match self {
            TransitionState::Idle => "idle",
            TransitionState::AdvancingOut => "advancing",
            TransitionState::RetreatingIn => "retreating",
            TransitionState::Expanded(_) => "expanded",
            TransitionState::Collapsing(_) => "collapsing",
        }
    }

    /// The overlay owns input in these states.
    pub fn is_overlay(&self) -> bool {
        matches!(
            self,
            TransitionState::Expanded(_) | TransitionState::Collapsing(_)
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeckConfig {
    pub window_size: usize,
    pub gap_px: u32,
    pub stack_transition: Duration,
    pub overlay_collapse: Duration,
    pub swipe_threshold_px: f32,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            gap_px: DEFAULT_GAP_PX,
            stack_transition: DEFAULT_STACK_TRANSITION,
            overlay_collapse: DEFAULT_OVERLAY_COLLAPSE,
            swipe_threshold_px: DEFAULT_SWIPE_THRESHOLD_PX,
        }
    }
}

impl DeckConfig {
    pub fn layout(&self) -> WindowLayout {
        WindowLayout {
            window_size: self.window_size.max(1),
            gap_px: self.gap_px,
        }
    }
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderModel {
    pub window: VisibleWindow,
    pub incoming: Option<CardView>,
    pub overlay: Option<OverlayView>,
}

pub struct Deck {
    pub(crate) items: Vec<Item>,
    pub(crate) loading: bool,
    pub(crate) config: DeckConfig,
    pub(crate) gestures: GestureNormalizer,
    pub(crate) stack: StackMachine,
    pub(crate) overlay: OverlayController,
    timers: Timers,
    torn_down: bool,
}

impl Deck {
    pub fn new(config: DeckConfig, scheduler: Box<dyn Scheduler>) -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            gestures: GestureNormalizer::new(config.swipe_threshold_px),
            config,
            stack: StackMachine::new(),
            overlay: OverlayController::new(),
            timers: Timers::new(scheduler),
            torn_down: false,
        }
    }

    pub fn with_items(config: DeckConfig, scheduler: Box<dyn Scheduler>, items: Vec<Item>) -> Self {
        let mut deck = Self::new(config, scheduler);
        deck.replace_items(items);
        deck
    }

    pub fn state(&self) -> TransitionState {
        if let Some(view) = self.overlay.view() {
            return if self.overlay.is_collapsing() {
                TransitionState::Collapsing(view.item_id)
            } else {
                TransitionState::Expanded(view.item_id)
            };
        }
        match self.stack.motion() {
            Some(Signal::Advance) => TransitionState::AdvancingOut,
            Some(Signal::Retreat) => TransitionState::RetreatingIn,
            None => TransitionState::Idle,
        }
    }

    pub fn position(&self) -> usize {
        self.stack.position()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn item(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn config(&self) -> &DeckConfig {
        &self.config
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Empty and loading are treated the same: nothing to browse.
    pub fn is_blocked(&self) -> bool {
        self.loading || self.items.is_empty()
    }

    /// True while a timed transition is running.
    pub fn is_animating(&self) -> bool {
        self.stack.motion().is_some() || self.overlay.is_collapsing()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn render(&self) -> RenderModel {
        let state = self.state();
        let position = self.stack.position();
        RenderModel {
            window: visible_window(
                &self.items,
                position,
                &state,
                self.is_blocked(),
                self.config.layout(),
            ),
            incoming: incoming_card(&self.items, position, &state),
            overlay: self.overlay.view(),
        }
    }

    // ------------------------------------------------------------------------
    // Transitions (reached through action::update)
    // ------------------------------------------------------------------------

    pub(crate) fn begin_stack(&mut self, signal: Signal) -> Result<(), Rejection> {
        TransitionGuard::try_begin_stack_transition(&self.state(), self.is_blocked())?;
        self.stack
            .begin(
                signal,
                self.items.len(),
                &mut self.timers,
                self.config.stack_transition,
            )
            .map(|_| ())
    }

    pub(crate) fn open_overlay(&mut self, id: ItemId) -> Result<(), Rejection> {
        TransitionGuard::try_begin_overlay_transition(&self.state(), OverlayRequest::Open)?;
        if self.is_blocked() {
            return Err(Rejection::Loading);
        }
        if self.item(&id).is_none() {
            return Err(Rejection::UnknownItem);
        }
        self.gestures.touch_cancel();
        self.overlay.open(id);
        Ok(())
    }

    pub(crate) fn close_overlay(&mut self) -> Result<(), Rejection> {
        TransitionGuard::try_begin_overlay_transition(&self.state(), OverlayRequest::Close)?;
        self.overlay
            .close(&mut self.timers, self.config.overlay_collapse)
            .map(|_| ())
            .ok_or(Rejection::NotExpanded)
    }

    /// Route an elapsed token to whichever half owns it. Unknown tokens are stale.
    pub(crate) fn timer_elapsed(&mut self, token: TimerToken) -> bool {
        if self.torn_down {
            debug!("Ignoring {token} after teardown");
            return false;
        }
        if self.stack.complete(token, self.items.len()) {
            return true;
        }
        if self.overlay.complete(token) {
            return true;
        }
        debug!("Ignoring stale {token}");
        false
    }

    pub(crate) fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
        if loading {
            self.gestures.touch_cancel();
        }
    }

    /// Swap in a new item list. In-flight stack motion is abandoned and an
    /// overlay on an item that disappeared is closed.
    pub(crate) fn replace_items(&mut self, items: Vec<Item>) {
        self.stack.cancel();
        self.gestures.touch_cancel();
        let focus_lost = self
            .overlay
            .focused()
            .is_some_and(|focused| !items.iter().any(|item| &item.id == focused));
        if focus_lost {
            self.overlay.dismiss();
        }
        self.items = items;
        self.stack.clamp(self.items.len());
        self.loading = false;
        info!(
            "Deck holds {} items, position {}",
            self.items.len(),
            self.stack.position()
        );
    }

    /// Cancel every pending timer. After this no action has any effect.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.stack.cancel();
        self.overlay.dismiss();
        self.gestures.touch_cancel();
        self.torn_down = true;
        info!("Deck torn down");
    }
}

impl Drop for Deck {
    fn drop(&mut self) {
        self.teardown();
    }
}
