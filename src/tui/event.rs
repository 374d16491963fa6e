use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind};

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq)]
pub enum TuiEvent {
    Quit,
    ForceQuit,
    Escape,
    /// Keyboard stand-ins for a wheel notch.
    Advance,
    Retreat,
    /// Enter/Space: open the front card or close the overlay.
    Activate,
    /// Mouse wheel, positive = down.
    Wheel(f32),
    // Left-button drag, emulating touch (column, row)
    Press(u16, u16),
    Drag(u16, u16),
    Release(u16, u16),
    Resize,
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(std::time::Duration::ZERO)
}

pub fn poll_event_timeout(timeout: std::time::Duration) -> Option<TuiEvent> {
    if !event::poll(timeout).unwrap_or(false) {
        return None;
    }
    match event::read() {
        Ok(event) => map_event(event),
        Err(e) => {
            log::warn!("Failed to read terminal event: {}", e);
            None
        }
    }
}

fn map_event(event: Event) -> Option<TuiEvent> {
    match event {
        Event::Key(key_event) => {
            if key_event.kind == KeyEventKind::Release {
                return None;
            }
            log::debug!("Key event: {:?} with modifiers {:?}", key_event.code, key_event.modifiers);
            match (key_event.modifiers, key_event.code) {
                (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::ForceQuit),
                (_, KeyCode::Char('q')) => Some(TuiEvent::Quit),
                (_, KeyCode::Esc) => Some(TuiEvent::Escape),
                (_, KeyCode::Down | KeyCode::PageDown | KeyCode::Char('j')) => {
                    Some(TuiEvent::Advance)
                }
                (_, KeyCode::Up | KeyCode::PageUp | KeyCode::Char('k')) => Some(TuiEvent::Retreat),
                (_, KeyCode::Enter | KeyCode::Char(' ')) => Some(TuiEvent::Activate),
                _ => None,
            }
        }
        Event::Mouse(mouse_event) => {
            let (col, row) = (mouse_event.column, mouse_event.row);
            match mouse_event.kind {
                MouseEventKind::ScrollDown => Some(TuiEvent::Wheel(1.0)),
                MouseEventKind::ScrollUp => Some(TuiEvent::Wheel(-1.0)),
                MouseEventKind::Down(MouseButton::Left) => Some(TuiEvent::Press(col, row)),
                MouseEventKind::Drag(MouseButton::Left) => Some(TuiEvent::Drag(col, row)),
                MouseEventKind::Up(MouseButton::Left) => Some(TuiEvent::Release(col, row)),
                _ => None,
            }
        }
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}
