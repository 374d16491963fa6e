use ratatui::Frame;
use ratatui::layout::Rect;

/// A reusable UI component.
///
/// Components receive data via props (struct fields) and render to a
/// `Frame` within a given `Rect`. They never reach into the `Deck` on their
/// own; the caller hands them the slice of state they draw.
///
/// # Mutability
///
/// The `render` method takes `&mut self` so components can keep small
/// presentation caches between frames, in the spirit of Ratatui's
/// `StatefulWidget` pattern.
pub trait Component {
    /// Render the component into the given area.
    fn render(&mut self, frame: &mut Frame, area: Rect);
}
