//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::time::Duration;

use chrono::{TimeZone, Utc};

use crate::core::action::{Action, update};
use crate::core::item::{Item, ItemId};
use crate::core::state::{Deck, DeckConfig};
use crate::core::timer::ManualClock;

/// Items whose ids and titles are the given names.
pub fn sample_items(names: &[&str]) -> Vec<Item> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| Item {
            id: ItemId::from(*name),
            title: format!("Title {name}"),
            summary: format!("Summary of {name}"),
            body: format!("Body of {name}"),
            image_ref: format!("https://img.test/{name}.jpg"),
            published_at: Utc
                .with_ymd_and_hms(2026, 1, 6, 9, 30, 0)
                .single()
                .unwrap_or_default()
                - chrono::Duration::hours(i as i64),
        })
        .collect()
}

/// A deck with default config on a manual clock.
pub fn test_deck(names: &[&str]) -> (ManualClock, Deck) {
    let clock = ManualClock::new();
    let deck = Deck::with_items(DeckConfig::default(), clock.scheduler(), sample_items(names));
    (clock, deck)
}

/// Move the clock forward and deliver every due token. Returns how many fired.
pub fn elapse(clock: &ManualClock, deck: &mut Deck, by: Duration) -> usize {
    let due = clock.advance(by);
    let fired = due.len();
    for token in due {
        update(deck, Action::TimerElapsed(token));
    }
    fired
}
