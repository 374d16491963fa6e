//! # Core Deck Engine
//!
//! This module contains the stacked-card engine.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Deck (state)         │
//!                    │  • Action (inputs)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │  Headless  │      │   Tests    │
//!     │  Adapter   │      │  embedder  │      │ (manual    │
//!     │ (ratatui)  │      │            │      │  clock)    │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! Input flows raw event → `gesture` → `guard` → `stack`/`overlay` (timers
//! scheduled) → `window` (pure) → render.
//!
//! ## Modules
//!
//! - [`state`]: The `Deck` struct: all widget state in one place
//! - [`action`]: The `Action` enum: everything the deck reacts to
//! - [`gesture`]: wheel/touch samples → `Signal`
//! - [`guard`]: the one-transition-at-a-time gate
//! - [`stack`]: position and advance/retreat motion
//! - [`overlay`]: expanded/collapsing detail view
//! - [`window`]: which cards to draw, where, in what order
//! - [`timer`]: scheduling and cancellation
//! - [`item`]: item records and feed mapping
//! - [`config`]: layered settings

pub mod action;
pub mod config;
pub mod gesture;
pub mod guard;
pub mod item;
pub mod overlay;
pub mod stack;
pub mod state;
pub mod timer;
pub mod window;

pub use action::{Action, Propagation, update};
pub use state::{Deck, DeckConfig, RenderModel, TransitionState};
