//! # Splash Component
//!
//! The site title in accent bold followed by a one-cell cursor that blinks
//! with `App::cursor_visible`, centered in the whole terminal.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Widget;
use unicode_width::UnicodeWidthStr;

use crate::tui::component::Component;
use crate::tui::layout::centered;
use crate::tui::theme::Theme;

pub struct Splash<'a> {
    pub title: &'a str,
    pub cursor_visible: bool,
    pub theme: &'a Theme,
}

impl<'a> Splash<'a> {
    pub fn new(title: &'a str, cursor_visible: bool, theme: &'a Theme) -> Self {
        Self {
            title,
            cursor_visible,
            theme,
        }
    }

    fn width(&self) -> u16 {
        u16::try_from(self.title.width() + 1).unwrap_or(u16::MAX)
    }
}

impl Component for Splash<'_> {
    fn height(&self) -> u16 {
        1
    }

    fn render(&self, area: Rect, buf: &mut Buffer) {
        let line = Line::from(vec![
            self.theme.emphasis_span(self.title),
            Span::styled(" ", self.theme.cursor(self.cursor_visible)),
        ]);
        line.render(centered(area, self.width(), self.height()), buf);
    }
}
