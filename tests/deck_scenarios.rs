use cardstack::core::item::{ItemId, parse_feed};
use cardstack::core::timer::ManualClock;
use cardstack::core::window::{CardVisual, EXPANDED_Z, INCOMING_Z};
use cardstack::core::{Action, Deck, DeckConfig, Propagation, TransitionState, update};
use std::time::Duration;

// ============================================================================
// Helper Functions
// ============================================================================

const T: Duration = Duration::from_millis(350);
const T2: Duration = Duration::from_millis(600);

/// A feed of items with the given ids, built through the JSON mapping.
fn feed(ids: &[&str]) -> String {
    let records: Vec<String> = ids
        .iter()
        .map(|id| {
            format!(
                r#"{{"id": "{id}", "title": "Story {id}", "body": "Body {id}", "imageUrl": "https://img.test/{id}.jpg", "publishedAt": "2026-01-06T09:30:00Z"}}"#
            )
        })
        .collect();
    format!("[{}]", records.join(","))
}

/// Deck on a manual clock, loaded the way a host would load it.
fn loaded_deck(ids: &[&str]) -> (ManualClock, Deck) {
    let clock = ManualClock::new();
    let mut deck = Deck::new(DeckConfig::default(), clock.scheduler());
    update(&mut deck, Action::LoadingStarted);
    let items = parse_feed(&feed(ids)).expect("feed should parse");
    update(&mut deck, Action::ItemsLoaded(items));
    (clock, deck)
}

fn elapse(clock: &ManualClock, deck: &mut Deck, by: Duration) {
    for token in clock.advance(by) {
        update(deck, Action::TimerElapsed(token));
    }
}

fn window_ids(deck: &Deck) -> Vec<String> {
    deck.render()
        .window
        .ids()
        .into_iter()
        .map(|id| id.to_string())
        .collect()
}

fn wheel_down() -> Action {
    Action::Wheel { delta_x: 0.0, delta_y: 40.0 }
}

fn wheel_up() -> Action {
    Action::Wheel { delta_x: 0.0, delta_y: -40.0 }
}

// ============================================================================
// Stack Navigation
// ============================================================================

#[test]
fn test_advance_through_six_items() {
    let (clock, mut deck) = loaded_deck(&["A", "B", "C", "D", "E", "F"]);
    assert_eq!(window_ids(&deck), ["A", "B", "C", "D", "E"]);

    let offsets: Vec<u32> = deck.render().window.cards.iter().map(|c| c.offset_px).collect();
    assert_eq!(offsets, [0, 16, 32, 48, 64]);

    assert_eq!(update(&mut deck, wheel_down()), Propagation::Stop);
    assert_eq!(deck.state(), TransitionState::AdvancingOut);
    assert_eq!(deck.render().window.cards[0].visual, CardVisual::Leaving);

    elapse(&clock, &mut deck, T);
    assert_eq!(deck.state(), TransitionState::Idle);
    assert_eq!(deck.position(), 1);
    assert_eq!(window_ids(&deck), ["B", "C", "D", "E", "F"]);
}

#[test]
fn test_retreat_brings_previous_card_back_on_top() {
    let (clock, mut deck) = loaded_deck(&["A", "B", "C", "D", "E", "F"]);
    update(&mut deck, wheel_down());
    elapse(&clock, &mut deck, T);

    update(&mut deck, wheel_up());
    assert_eq!(deck.state(), TransitionState::RetreatingIn);

    let model = deck.render();
    let incoming = model.incoming.expect("incoming card while retreating");
    assert_eq!(incoming.item_id, ItemId::from("A"));
    assert_eq!(incoming.z_order, INCOMING_Z);
    assert!(model.window.cards.iter().all(|c| c.z_order < INCOMING_Z));

    elapse(&clock, &mut deck, T);
    assert_eq!(deck.position(), 0);
    assert_eq!(window_ids(&deck), ["A", "B", "C", "D", "E"]);
    assert!(deck.render().incoming.is_none());
}

#[test]
fn test_rapid_double_advance_moves_once() {
    let (clock, mut deck) = loaded_deck(&["A", "B", "C", "D", "E", "F"]);
    update(&mut deck, wheel_down());
    // Second notch lands mid-transition and is dropped, not queued.
    assert_eq!(update(&mut deck, wheel_down()), Propagation::Stop);
    assert_eq!(clock.pending(), 1);

    elapse(&clock, &mut deck, T * 3);
    assert_eq!(deck.position(), 1);
    assert_eq!(deck.state(), TransitionState::Idle);
}

#[test]
fn test_boundaries_hold() {
    let (clock, mut deck) = loaded_deck(&["A", "B"]);
    update(&mut deck, wheel_up());
    assert_eq!(deck.state(), TransitionState::Idle);

    update(&mut deck, wheel_down());
    elapse(&clock, &mut deck, T);
    assert_eq!(deck.position(), 1);

    update(&mut deck, wheel_down());
    assert_eq!(deck.state(), TransitionState::Idle);
    assert_eq!(clock.pending(), 0);
}

#[test]
fn test_swipe_up_advances_short_swipe_passes_through() {
    let (clock, mut deck) = loaded_deck(&["A", "B", "C"]);

    update(&mut deck, Action::TouchStart { y: 300.0 });
    update(&mut deck, Action::TouchMove { y: 270.0 });
    assert_eq!(update(&mut deck, Action::TouchEnd { y: 260.0 }), Propagation::Continue);
    assert_eq!(deck.state(), TransitionState::Idle);

    update(&mut deck, Action::TouchStart { y: 300.0 });
    assert_eq!(update(&mut deck, Action::TouchEnd { y: 200.0 }), Propagation::Stop);
    assert_eq!(deck.state(), TransitionState::AdvancingOut);
    elapse(&clock, &mut deck, T);
    assert_eq!(deck.position(), 1);
}

// ============================================================================
// Overlay
// ============================================================================

#[test]
fn test_overlay_lifecycle() {
    let (clock, mut deck) = loaded_deck(&["A", "B", "C", "D"]);
    let c = ItemId::from("C");

    update(&mut deck, Action::ClickCard(c.clone()));
    assert_eq!(deck.state(), TransitionState::Expanded(c.clone()));
    let model = deck.render();
    let card = model.window.cards.iter().find(|v| v.item_id == c).unwrap();
    assert_eq!(card.z_order, EXPANDED_Z);
    assert_eq!(model.overlay.as_ref().map(|o| &o.item_id), Some(&c));

    // The stack is frozen while the overlay is up.
    assert_eq!(update(&mut deck, wheel_down()), Propagation::Stop);
    assert_eq!(deck.position(), 0);

    update(&mut deck, Action::ClickOverlay);
    assert_eq!(deck.state(), TransitionState::Collapsing(c.clone()));

    elapse(&clock, &mut deck, T2 - Duration::from_millis(1));
    assert_eq!(deck.state(), TransitionState::Collapsing(c));

    elapse(&clock, &mut deck, Duration::from_millis(1));
    assert_eq!(deck.state(), TransitionState::Idle);
    assert!(deck.render().overlay.is_none());
}

#[test]
fn test_overlay_opens_after_advancing() {
    let (clock, mut deck) = loaded_deck(&["A", "B", "C", "D", "E", "F"]);
    update(&mut deck, wheel_down());
    elapse(&clock, &mut deck, T);
    update(&mut deck, wheel_down());
    elapse(&clock, &mut deck, T);
    assert_eq!(deck.position(), 2);

    // Any card in the window can be opened, not just the front one.
    let e = ItemId::from("E");
    update(&mut deck, Action::ClickCard(e.clone()));
    assert_eq!(deck.state(), TransitionState::Expanded(e.clone()));
    let model = deck.render();
    let card = model.window.cards.iter().find(|v| v.item_id == e).unwrap();
    assert_eq!(card.z_order, EXPANDED_Z);
    assert_eq!(card.rank, 2);

    update(&mut deck, Action::ClickOverlay);
    elapse(&clock, &mut deck, T2);
    assert_eq!(deck.state(), TransitionState::Idle);
    assert_eq!(deck.position(), 2);
    assert_eq!(window_ids(&deck), ["C", "D", "E", "F"]);
}

#[test]
fn test_click_during_advance_is_refused() {
    let (clock, mut deck) = loaded_deck(&["A", "B", "C"]);
    update(&mut deck, wheel_down());
    update(&mut deck, Action::ClickCard(ItemId::from("B")));
    assert_eq!(deck.state(), TransitionState::AdvancingOut);

    elapse(&clock, &mut deck, T);
    assert_eq!(deck.state(), TransitionState::Idle);
}

// ============================================================================
// Loading and Teardown
// ============================================================================

#[test]
fn test_loading_shows_placeholders_and_blocks_navigation() {
    let clock = ManualClock::new();
    let mut deck = Deck::new(DeckConfig::default(), clock.scheduler());
    update(&mut deck, Action::LoadingStarted);

    let model = deck.render();
    assert!(model.window.cards.is_empty());
    assert_eq!(model.window.placeholders, 5);

    update(&mut deck, wheel_down());
    assert_eq!(deck.state(), TransitionState::Idle);
    assert_eq!(clock.pending(), 0);
}

#[test]
fn test_teardown_mid_transition_cancels_timer() {
    let (clock, mut deck) = loaded_deck(&["A", "B", "C"]);
    update(&mut deck, wheel_down());
    assert_eq!(clock.pending(), 1);

    update(&mut deck, Action::Teardown);
    assert_eq!(clock.pending(), 0);

    elapse(&clock, &mut deck, T);
    assert_eq!(deck.position(), 0);
    assert!(deck.is_torn_down());
}
