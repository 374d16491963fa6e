//! # Visible Window
//!
//! Pure derivation of what the stack draws: up to `window_size` cards starting
//! at the current position, each with a rank, a pixel offset and a z-order.
//! Nothing here is stored; call it on every render.
//!
//! ```text
//! items:   A  B  C  D  E  F  G
//! pos=1       ^
//! window:     B  C  D  E  F       ranks 0..4, offset = rank * gap
//! z-order:    6  5  4  3  2       len - index (front card on top)
//! ```

use crate::core::item::{Item, ItemId};
use crate::core::state::TransitionState;

/// Z-order of the expanded card inside the window.
pub const EXPANDED_Z: u32 = u32::MAX - 1;
/// Z-order of the card sliding back in during a retreat.
pub const INCOMING_Z: u32 = u32::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardVisual {
    Resting,
    /// Front card while the stack advances past it.
    Leaving,
    /// The card currently shown in the overlay.
    Expanded,
    /// Transient card returning to the front during a retreat.
    Incoming,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub item_id: ItemId,
    /// Index into the item list.
    pub index: usize,
    pub rank: usize,
    pub offset_px: u32,
    pub z_order: u32,
    pub visual: CardVisual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowLayout {
    pub window_size: usize,
    pub gap_px: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibleWindow {
    /// Front card first.
    pub cards: Vec<CardView>,
    /// Skeleton slots to draw while there is nothing to show.
    pub placeholders: usize,
}

impl VisibleWindow {
    pub fn ids(&self) -> Vec<&ItemId> {
        self.cards.iter().map(|c| &c.item_id).collect()
    }

    /// Cards sorted back-to-front, the order to paint them in.
    pub fn paint_order(&self) -> Vec<&CardView> {
        let mut cards: Vec<&CardView> = self.cards.iter().collect();
        cards.sort_by_key(|c| c.z_order);
        cards
    }
}

pub fn visible_window(
    items: &[Item],
    position: usize,
    state: &TransitionState,
    loading: bool,
    layout: WindowLayout,
) -> VisibleWindow {
    if loading || items.is_empty() {
        return VisibleWindow {
            cards: Vec::new(),
            placeholders: layout.window_size,
        };
    }

    let len = items.len();
    let start = position.min(len - 1);
    let end = (start + layout.window_size).min(len);

    let expanded = match state {
        TransitionState::Expanded(id) => Some(id),
        _ => None,
    };
    let advancing = matches!(state, TransitionState::AdvancingOut);

    let cards = items[start..end]
        .iter()
        .enumerate()
        .map(|(rank, item)| {
            let index = start + rank;
            let is_expanded = expanded == Some(&item.id);
            let visual = if is_expanded {
                CardVisual::Expanded
            } else if rank == 0 && advancing {
                CardVisual::Leaving
            } else {
                CardVisual::Resting
            };
            CardView {
                item_id: item.id.clone(),
                index,
                rank,
                offset_px: rank as u32 * layout.gap_px,
                z_order: if is_expanded {
                    EXPANDED_Z
                } else {
                    (len - index) as u32
                },
                visual,
            }
        })
        .collect();

    VisibleWindow {
        cards,
        placeholders: 0,
    }
}

/// The card returning to the front while `RetreatingIn`. It is not part of
/// the window until the retreat completes.
pub fn incoming_card(items: &[Item], position: usize, state: &TransitionState) -> Option<CardView> {
    if !matches!(state, TransitionState::RetreatingIn) || position == 0 {
        return None;
    }
    let index = position - 1;
    items.get(index).map(|item| CardView {
        item_id: item.id.clone(),
        index,
        rank: 0,
        offset_px: 0,
        z_order: INCOMING_Z,
        visual: CardVisual::Incoming,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_items;

    const LAYOUT: WindowLayout = WindowLayout {
        window_size: 5,
        gap_px: 16,
    };

    fn ids(window: &VisibleWindow) -> Vec<&str> {
        window.cards.iter().map(|c| c.item_id.as_str()).collect()
    }

    #[test]
    fn test_window_slice_and_offsets() {
        let items = sample_items(&["A", "B", "C", "D", "E", "F"]);
        let window = visible_window(&items, 1, &TransitionState::Idle, false, LAYOUT);
        assert_eq!(ids(&window), vec!["B", "C", "D", "E", "F"]);
        let offsets: Vec<u32> = window.cards.iter().map(|c| c.offset_px).collect();
        assert_eq!(offsets, vec![0, 16, 32, 48, 64]);
        let z: Vec<u32> = window.cards.iter().map(|c| c.z_order).collect();
        assert_eq!(z, vec![5, 4, 3, 2, 1]);
        assert_eq!(window.placeholders, 0);
    }

    #[test]
    fn test_window_shrinks_at_tail() {
        let items = sample_items(&["A", "B", "C", "D", "E", "F"]);
        let window = visible_window(&items, 4, &TransitionState::Idle, false, LAYOUT);
        assert_eq!(ids(&window), vec!["E", "F"]);
        assert_eq!(window.cards[1].rank, 1);
    }

    #[test]
    fn test_short_list_fits_in_window() {
        let items = sample_items(&["A", "B"]);
        let window = visible_window(&items, 0, &TransitionState::Idle, false, LAYOUT);
        assert_eq!(ids(&window), vec!["A", "B"]);
    }

    #[test]
    fn test_loading_renders_placeholders() {
        let items = sample_items(&["A", "B"]);
        let window = visible_window(&items, 0, &TransitionState::Idle, true, LAYOUT);
        assert!(window.cards.is_empty());
        assert_eq!(window.placeholders, 5);

        let empty = visible_window(&[], 0, &TransitionState::Idle, false, LAYOUT);
        assert_eq!(empty, window);
    }

    #[test]
    fn test_front_card_leaves_while_advancing() {
        let items = sample_items(&["A", "B", "C"]);
        let window = visible_window(&items, 0, &TransitionState::AdvancingOut, false, LAYOUT);
        assert_eq!(window.cards[0].visual, CardVisual::Leaving);
        assert_eq!(window.cards[1].visual, CardVisual::Resting);
        assert_eq!(ids(&window), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_retreat_keeps_window_and_adds_incoming() {
        let items = sample_items(&["A", "B", "C"]);
        let state = TransitionState::RetreatingIn;
        let window = visible_window(&items, 1, &state, false, LAYOUT);
        assert_eq!(ids(&window), vec!["B", "C"]);
        assert!(window.cards.iter().all(|c| c.visual == CardVisual::Resting));

        let incoming = incoming_card(&items, 1, &state).unwrap();
        assert_eq!(incoming.item_id.as_str(), "A");
        assert_eq!(incoming.z_order, INCOMING_Z);
        assert_eq!(incoming.visual, CardVisual::Incoming);
    }

    #[test]
    fn test_no_incoming_outside_retreat() {
        let items = sample_items(&["A", "B"]);
        assert_eq!(incoming_card(&items, 1, &TransitionState::Idle), None);
        assert_eq!(incoming_card(&items, 0, &TransitionState::RetreatingIn), None);
    }

    #[test]
    fn test_expanded_card_is_topmost() {
        let items = sample_items(&["A", "B", "C", "D"]);
        let state = TransitionState::Expanded(ItemId::from("C"));
        let window = visible_window(&items, 0, &state, false, LAYOUT);
        let c = &window.cards[2];
        assert_eq!(c.visual, CardVisual::Expanded);
        assert_eq!(c.z_order, EXPANDED_Z);
        assert_eq!(window.paint_order().last().unwrap().item_id.as_str(), "C");
    }

    #[test]
    fn test_collapsing_card_rests_in_window() {
        let items = sample_items(&["A", "B"]);
        let state = TransitionState::Collapsing(ItemId::from("A"));
        let window = visible_window(&items, 0, &state, false, LAYOUT);
        assert_eq!(window.cards[0].visual, CardVisual::Resting);
    }

    #[test]
    fn test_idempotent() {
        let items = sample_items(&["A", "B", "C"]);
        let a = visible_window(&items, 1, &TransitionState::Idle, false, LAYOUT);
        let b = visible_window(&items, 1, &TransitionState::Idle, false, LAYOUT);
        assert_eq!(a, b);
    }

    #[test]
    fn test_paint_order_back_to_front() {
        let items = sample_items(&["A", "B", "C"]);
        let window = visible_window(&items, 0, &TransitionState::Idle, false, LAYOUT);
        let order: Vec<&str> = window.paint_order().iter().map(|c| c.item_id.as_str()).collect();
        assert_eq!(order, vec!["C", "B", "A"]);
    }
}
