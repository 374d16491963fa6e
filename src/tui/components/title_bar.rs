//! # TitleBar Component
//!
//! Top status bar: where the stack is and what it is doing.
//!
//! The title text changes based on state:
//!
//! 1. **Loading**: `"Cardstack | loading…"`
//! 2. **Status message**: `"Cardstack  3/7  advancing | Feed: demo"`
//! 3. **Default**: `"Cardstack  3/7  idle"`
//!
//! TitleBar is purely presentational. It receives all data as props.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub struct TitleBar {
    /// Zero-based stack position.
    pub position: usize,
    pub total: usize,
    pub loading: bool,
    /// Transition state label (e.g. "idle", "advancing")
    pub state_label: &'static str,
    pub status_message: String,
}

impl TitleBar {
    pub fn text(&self) -> String {
        if self.loading {
            return "Cardstack | loading…".to_string();
        }
        let counter = if self.total == 0 {
            "0/0".to_string()
        } else {
            format!("{}/{}", self.position + 1, self.total)
        };
        if self.status_message.is_empty() {
            format!("Cardstack  {}  {}", counter, self.state_label)
        } else {
            format!(
                "Cardstack  {}  {} | {}",
                counter, self.state_label, self.status_message
            )
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(Span::styled(
            self.text(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(line, area);
    }
}
