//! # Footer Component
//!
//! Status line on top, then a rule and the key hints, then one row of
//! padding. Until the minimum loading delay has elapsed the status line
//! reads "loading…" instead of the tagline.

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use crate::core::geometry::FOOTER_HEIGHT;
use crate::tui::component::Component;
use crate::tui::theme::Theme;

const HINTS: [(&str, &str); 3] = [("q", "quit"), ("↑↓", "scroll"), ("t", "splash")];

pub struct Footer<'a> {
    pub tagline: &'a str,
    pub loaded: bool,
    pub theme: &'a Theme,
}

impl<'a> Footer<'a> {
    pub fn new(tagline: &'a str, loaded: bool, theme: &'a Theme) -> Self {
        Self {
            tagline,
            loaded,
            theme,
        }
    }

    fn hints(&self) -> Line<'a> {
        let mut spans: Vec<Span<'a>> = Vec::new();
        for (i, (key, label)) in HINTS.iter().enumerate() {
            if i > 0 {
                spans.push(self.theme.plain_span("  "));
            }
            spans.push(self.theme.accent_span(*key));
            spans.push(self.theme.plain_span(format!(" {label}")));
        }
        Line::from(spans)
    }
}

impl Component for Footer<'_> {
    fn height(&self) -> u16 {
        FOOTER_HEIGHT
    }

    fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        let status = if self.loaded { self.tagline } else { "loading…" };
        let status_area = Rect { height: 1, ..area };
        Paragraph::new(status)
            .style(self.theme.base())
            .alignment(Alignment::Center)
            .render(status_area, buf);

        let table_area = Rect {
            y: area.y + 1,
            height: area.height - 1,
            ..area
        };
        Paragraph::new(self.hints())
            .alignment(Alignment::Center)
            .block(
                Block::new()
                    .borders(Borders::TOP)
                    .border_style(self.theme.border()),
            )
            .render(table_area, buf);
    }
}
