//! # Card Stack Component
//!
//! Draws the visible window as a pile of bordered cards. Pixel offsets from
//! the engine are turned into terminal cells: one row per `PX_PER_ROW`
//! pixels, two columns per row so the pile fans out diagonally.
//!
//! ```text
//! ┌ A ──────────────┐
//! │┌ B ─────────────┴┐
//! ││┌ C ─────────────┴┐
//! └┤│                 │
//! ```
//!
//! Geometry lives in `StackGeometry` so hit-testing uses exactly the rects
//! that were painted.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::core::item::{Item, ItemId};
use crate::core::state::RenderModel;
use crate::core::window::{CardView, CardVisual};
use crate::tui::component::Component;
use crate::tui::components::truncate_to_width;

/// Engine pixels per terminal row.
pub const PX_PER_ROW: u32 = 16;
/// Rows a leaving or incoming card is lifted by.
const LIFT_ROWS: u16 = 2;
const MAX_CARD_WIDTH: u16 = 64;
const MAX_CARD_HEIGHT: u16 = 12;

#[derive(Debug, Clone, Copy)]
pub struct StackGeometry {
    area: Rect,
    card_width: u16,
    card_height: u16,
    origin_x: u16,
    origin_y: u16,
    gap_px: u32,
}

impl StackGeometry {
    /// Fit a pile of `window_size` cards spaced `gap_px` apart into `area`.
    pub fn new(area: Rect, window_size: usize, gap_px: u32) -> Self {
        let last_rank = window_size.saturating_sub(1) as u32;
        let spread_rows = px_to_rows(last_rank.saturating_mul(gap_px));
        let spread_cols = spread_rows.saturating_mul(2);

        let card_width = area
            .width
            .saturating_sub(spread_cols)
            .min(MAX_CARD_WIDTH)
            .max(1);
        let card_height = area
            .height
            .saturating_sub(spread_rows.saturating_add(LIFT_ROWS))
            .min(MAX_CARD_HEIGHT)
            .max(1);

        let pile_width = card_width.saturating_add(spread_cols);
        let pile_height = card_height.saturating_add(spread_rows);
        let origin_x = area.x + area.width.saturating_sub(pile_width) / 2;
        let origin_y = area.y + LIFT_ROWS + area.height.saturating_sub(pile_height.saturating_add(LIFT_ROWS)) / 2;

        Self {
            area,
            card_width,
            card_height,
            origin_x,
            origin_y,
            gap_px,
        }
    }

    pub fn card_rect(&self, card: &CardView) -> Rect {
        let rows = px_to_rows(card.offset_px);
        let lift = match card.visual {
            CardVisual::Leaving | CardVisual::Incoming => LIFT_ROWS,
            _ => 0,
        };
        let rect = Rect {
            x: self.origin_x.saturating_add(rows.saturating_mul(2)),
            y: self.origin_y.saturating_add(rows).saturating_sub(lift),
            width: self.card_width,
            height: self.card_height,
        };
        rect.intersection(self.area)
    }

    fn slot_rect(&self, rank: usize) -> Rect {
        let rows = px_to_rows((rank as u32).saturating_mul(self.gap_px));
        Rect {
            x: self.origin_x.saturating_add(rows.saturating_mul(2)),
            y: self.origin_y.saturating_add(rows),
            width: self.card_width,
            height: self.card_height,
        }
        .intersection(self.area)
    }
}

fn px_to_rows(px: u32) -> u16 {
    u16::try_from(px / PX_PER_ROW).unwrap_or(u16::MAX)
}

/// The topmost card under (col, row), considering the incoming card first.
pub fn hit_test(geometry: &StackGeometry, model: &RenderModel, col: u16, row: u16) -> Option<ItemId> {
    let point = ratatui::layout::Position::new(col, row);
    model
        .incoming
        .iter()
        .chain(model.window.paint_order().into_iter().rev())
        .find(|card| geometry.card_rect(card).contains(point))
        .map(|card| card.item_id.clone())
}

/// Transient render wrapper for the stack.
pub struct CardStack<'a> {
    pub model: &'a RenderModel,
    pub items: &'a [Item],
    pub geometry: StackGeometry,
}

impl Component for CardStack<'_> {
    fn render(&mut self, frame: &mut Frame, _area: Rect) {
        for rank in (0..self.model.window.placeholders).rev() {
            render_placeholder(frame, self.geometry.slot_rect(rank));
        }

        let cards = self
            .model
            .window
            .paint_order()
            .into_iter()
            .chain(self.model.incoming.iter());
        for card in cards {
            if let Some(item) = self.items.get(card.index) {
                render_card(frame, self.geometry.card_rect(card), item, card);
            }
        }
    }
}

fn card_style(card: &CardView) -> (Style, Style) {
    match card.visual {
        CardVisual::Leaving => (
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
            Style::default().fg(Color::DarkGray),
        ),
        CardVisual::Incoming => (
            Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC),
            Style::default().fg(Color::DarkGray),
        ),
        CardVisual::Expanded => (Style::default(), Style::default().fg(Color::Yellow)),
        CardVisual::Resting if card.rank == 0 => (Style::default(), Style::default().fg(Color::White)),
        CardVisual::Resting => (
            Style::default().fg(Color::Gray),
            Style::default().fg(Color::DarkGray),
        ),
    }
}

fn render_card(frame: &mut Frame, rect: Rect, item: &Item, card: &CardView) {
    if rect.is_empty() {
        return;
    }
    let (style, border_style) = card_style(card);
    let title_width = rect.width.saturating_sub(4) as usize;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!(" {} ", truncate_to_width(&item.title, title_width)));

    let lines = vec![
        Line::from(Span::styled(
            item.published_label(),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(item.summary.as_str()),
    ];

    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .style(style)
            .wrap(Wrap { trim: true }),
        rect,
    );
}

fn render_placeholder(frame: &mut Frame, rect: Rect) {
    if rect.is_empty() {
        return;
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new("· · ·")
            .style(Style::default().fg(Color::DarkGray))
            .block(block),
        rect,
    );
}
