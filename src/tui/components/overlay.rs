//! # Overlay Component
//!
//! Full-detail view of the focused item, drawn above the stack.
//! Opened by clicking a card (or Enter), dismissed by clicking anywhere on it.
//!
//! Follows the transient wrapper pattern: `ItemOverlay` is created each frame
//! with borrowed state from the deck's render model.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use crate::core::item::Item;
use crate::core::overlay::OverlayVisual;
use crate::tui::component::Component;
use crate::tui::components::{centered_rect, truncate_to_width};

/// Share of the screen the overlay covers, in percent.
const OVERLAY_WIDTH_PCT: u16 = 80;
const OVERLAY_HEIGHT_PCT: u16 = 80;

/// Where the overlay sits inside `area`. Shared with hit-testing.
pub fn overlay_rect(area: Rect) -> Rect {
    centered_rect(OVERLAY_WIDTH_PCT, OVERLAY_HEIGHT_PCT, area)
}

/// Transient render wrapper for the overlay.
pub struct ItemOverlay<'a> {
    pub item: &'a Item,
    pub visual: OverlayVisual,
}

impl Component for ItemOverlay<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = overlay_rect(area);
        frame.render_widget(Clear, overlay);

        let collapsing = self.visual == OverlayVisual::Collapsing;
        let (style, border_style, help_text) = if collapsing {
            (
                Style::default().add_modifier(Modifier::DIM),
                Style::default().fg(Color::DarkGray),
                " closing… ",
            )
        } else {
            (
                Style::default(),
                Style::default().fg(Color::Yellow),
                " Click or Enter to close ",
            )
        };

        let title_width = overlay.width.saturating_sub(4) as usize;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" {} ", truncate_to_width(&self.item.title, title_width)))
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(help_text).centered())
            .padding(Padding::horizontal(1));

        let mut lines = vec![
            Line::from(Span::styled(
                self.item.published_label(),
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(Span::styled(
                self.item.image_ref.as_str(),
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            )),
            Line::from(""),
        ];
        lines.extend(self.item.body.lines().map(|l| Line::from(l.trim())));

        let paragraph = Paragraph::new(lines)
            .block(block)
            .style(style)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, overlay);
    }
}
