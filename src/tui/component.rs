use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

/// A piece of site chrome.
///
/// Components receive their data as props (struct fields) and render into a
/// buffer region. They report a fixed height so the layout can reserve
/// space for them before the page body is placed.
pub trait Component {
    /// Rows this component occupies.
    fn height(&self) -> u16;

    /// Render the component into the given area.
    fn render(&self, area: Rect, buf: &mut Buffer);
}
