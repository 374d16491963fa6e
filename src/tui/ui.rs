use crate::core::item::ItemId;
use crate::core::state::Deck;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::card_stack::hit_test;
use crate::tui::components::overlay::overlay_rect;
use crate::tui::components::{CardStack, ItemOverlay, StackGeometry, TitleBar};

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Paragraph, Wrap};

const HELP_TEXT: &str = "wheel/j/k: browse  drag: swipe  click/Enter: open  Esc/q: quit";

/// What a click at a screen cell lands on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitTarget {
    Overlay,
    Card(ItemId),
}

/// Split the frame into title, stack and help rows.
fn layout(frame_area: Rect) -> [Rect; 3] {
    use Constraint::{Length, Min};
    Layout::vertical([Length(1), Min(0), Length(1)]).areas(frame_area)
}

fn geometry(deck: &Deck, stack_area: Rect) -> StackGeometry {
    let layout = deck.config().layout();
    StackGeometry::new(stack_area, layout.window_size, layout.gap_px)
}

pub fn draw_ui(frame: &mut Frame, deck: &Deck, tui: &TuiState) {
    let [title_area, main_area, help_area] = layout(frame.area());

    let mut title_bar = TitleBar {
        position: deck.position(),
        total: deck.items().len(),
        loading: deck.is_loading(),
        state_label: deck.state().label(),
        status_message: tui.status_message.clone(),
    };
    title_bar.render(frame, title_area);

    // Main area - show error OR stack
    if let Some(error_msg) = &tui.feed_error
        && deck.items().is_empty()
    {
        draw_error_view(frame, main_area, error_msg);
    } else {
        let model = deck.render();
        CardStack {
            model: &model,
            items: deck.items(),
            geometry: geometry(deck, main_area),
        }
        .render(frame, main_area);

        if let Some(view) = &model.overlay
            && let Some(item) = deck.item(&view.item_id)
        {
            ItemOverlay {
                item,
                visual: view.visual,
            }
            .render(frame, main_area);
        }
    }

    frame.render_widget(
        Span::styled(HELP_TEXT, Style::default().fg(Color::DarkGray)),
        help_area,
    );
}

fn draw_error_view(frame: &mut Frame, area: Rect, error_msg: &str) {
    let error_paragraph = Paragraph::new(error_msg)
        .block(Block::bordered().title("ERROR"))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(error_paragraph, area);
}

/// Hit test: the overlay wins over the stack, then cards front to back.
pub fn hit_target(frame_area: Rect, deck: &Deck, col: u16, row: u16) -> Option<HitTarget> {
    let [_title_area, main_area, _help_area] = layout(frame_area);
    let model = deck.render();

    if model.overlay.is_some() && overlay_rect(main_area).contains(Position::new(col, row)) {
        return Some(HitTarget::Overlay);
    }
    hit_test(&geometry(deck, main_area), &model, col, row).map(HitTarget::Card)
}
