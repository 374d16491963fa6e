//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the stack,
//! and translates mouse and keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm. The deck
//! itself never touches the terminal, so another host (a web view, a test
//! harness) can drive the same `core::update()`.
//!
//! ## Input Mapping
//!
//! - Mouse wheel → `Action::Wheel`
//! - Left-button press/drag/release → touch samples, one row = `cell_height_px`
//! - Release on the cell that was pressed → click (overlay first, then cards)
//! - Keys: ↓/j/PgDn advance, ↑/k/PgUp retreat, Enter/Space open or close
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Animating** (transition running, feed loading): polls every ~80ms so
//!   timer completions show up promptly.
//! - **Idle**: sleeps up to 500ms, only redraws on events or terminal resize.

mod component;
mod components;
mod event;
mod timers;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;

use crate::core::action::{Action, Propagation, update};
use crate::core::config::ResolvedConfig;
use crate::core::item::{FeedError, Item, demo_items, load_feed};
use crate::core::state::Deck;
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::timers::TokioScheduler;
use crate::tui::ui::HitTarget;

/// TUI-specific presentation state (not part of the deck)
pub struct TuiState {
    /// Cell where the left button went down, for click detection.
    pub press: Option<(u16, u16)>,
    /// Set when the feed could not be loaded.
    pub feed_error: Option<String>,
    pub status_message: String,
    pub cell_height_px: u16,
}

impl TuiState {
    pub fn new(cell_height_px: u16) -> Self {
        Self {
            press: None,
            feed_error: None,
            status_message: String::new(),
            cell_height_px,
        }
    }

    fn row_to_px(&self, row: u16) -> f32 {
        f32::from(row) * f32::from(self.cell_height_px)
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture, Hide)?;
        info!("Terminal modes enabled (mouse capture, hidden cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, Show);
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    // Timer completions come back through this channel as tokens
    let (timer_tx, mut timer_rx) = tokio::sync::mpsc::unbounded_channel();
    let mut deck = Deck::new(config.deck.clone(), Box::new(TokioScheduler::new(timer_tx)));
    let mut tui = TuiState::new(config.cell_height_px);

    // Channel for the feed load result
    let (feed_tx, feed_rx) = mpsc::channel();
    update(&mut deck, Action::LoadingStarted);
    tui.status_message = feed_label(config.feed_path.as_ref());
    let feed_handle = spawn_feed_load(config.feed_path.clone(), feed_tx);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let mut needs_redraw = true; // Force first frame

    loop {
        let animating = deck.is_animating() || deck.is_loading();

        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &deck, &tui))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating, long when idle
        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let frame_area = terminal.get_frame().area();
            let action = match event {
                TuiEvent::Resize => continue,
                TuiEvent::Quit | TuiEvent::ForceQuit => {
                    should_quit = true;
                    break;
                }
                TuiEvent::Escape => {
                    if deck.state().is_overlay() {
                        Action::ClickOverlay
                    } else {
                        should_quit = true;
                        break;
                    }
                }
                TuiEvent::Advance => Action::Wheel { delta_x: 0.0, delta_y: 1.0 },
                TuiEvent::Retreat => Action::Wheel { delta_x: 0.0, delta_y: -1.0 },
                TuiEvent::Wheel(delta_y) => Action::Wheel { delta_x: 0.0, delta_y },
                TuiEvent::Activate => match activate_action(&deck) {
                    Some(action) => action,
                    None => continue,
                },
                TuiEvent::Press(col, row) => {
                    tui.press = Some((col, row));
                    Action::TouchStart { y: tui.row_to_px(row) }
                }
                TuiEvent::Drag(_col, row) => Action::TouchMove { y: tui.row_to_px(row) },
                TuiEvent::Release(col, row) => {
                    let Some(pressed) = tui.press.take() else {
                        continue;
                    };
                    if pressed != (col, row) {
                        Action::TouchEnd { y: tui.row_to_px(row) }
                    } else {
                        // A click, not a swipe: drop the touch and hit-test instead.
                        update(&mut deck, Action::TouchCancel);
                        match ui::hit_target(frame_area, &deck, col, row) {
                            Some(HitTarget::Overlay) => Action::ClickOverlay,
                            Some(HitTarget::Card(id)) => Action::ClickCard(id),
                            None => continue,
                        }
                    }
                }
            };

            if update(&mut deck, action) == Propagation::Continue {
                debug!("Input passed through the deck");
            }
        }

        if should_quit {
            break;
        }

        // Timer completions from the scheduler
        while let Ok(token) = timer_rx.try_recv() {
            needs_redraw = true;
            update(&mut deck, Action::TimerElapsed(token));
        }

        // Feed load result
        if let Ok(result) = feed_rx.try_recv() {
            needs_redraw = true;
            match result {
                Ok(items) => {
                    update(&mut deck, Action::ItemsLoaded(items));
                }
                Err(e) => {
                    warn!("Feed load failed: {}", e);
                    tui.feed_error = Some(e.to_string());
                    tui.status_message = "Feed failed".to_string();
                    update(&mut deck, Action::ItemsLoaded(Vec::new()));
                }
            }
        }
    }

    feed_handle.abort();
    update(&mut deck, Action::Teardown);
    ratatui::restore();
    info!("Cardstack shutting down");
    Ok(())
}

/// Enter/Space: close the overlay if one is up, otherwise open the front card.
fn activate_action(deck: &Deck) -> Option<Action> {
    if deck.state().is_overlay() {
        return Some(Action::ClickOverlay);
    }
    deck.render()
        .window
        .cards
        .first()
        .map(|card| Action::ClickCard(card.item_id.clone()))
}

fn feed_label(path: Option<&PathBuf>) -> String {
    match path {
        Some(path) => format!("Feed: {}", path.display()),
        None => "Feed: demo".to_string(),
    }
}

fn spawn_feed_load(
    path: Option<PathBuf>,
    tx: mpsc::Sender<Result<Vec<Item>, FeedError>>,
) -> tokio::task::AbortHandle {
    info!("Spawning feed load: {:?}", path);
    let task = tokio::spawn(async move {
        let result = match path {
            Some(path) => load_feed(&path).await,
            None => Ok(demo_items()),
        };
        if tx.send(result).is_err() {
            warn!("Failed to deliver feed: receiver dropped");
        }
    });
    task.abort_handle()
}
