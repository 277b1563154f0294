//! # Layout
//!
//! Turns an `App` into a frame. Pure: the same state, content and theme
//! always produce the same buffer.
//!
//! ```text
//! ┌──────────── terminal ─────────────┐
//! │      ┌──── container ────┐        │
//! │      │ header            │        │
//! │      │   body (padded,   │        │
//! │      │   scrolled)       │        │
//! │      │ footer            │        │
//! │      └───────────────────┘        │
//! └───────────────────────────────────┘
//! ```
//!
//! The container is centered in the terminal and clipped to it. When the
//! container is too short for everything, the header is kept first, then the
//! footer, and the body gets whatever is left (possibly nothing).
//! Splash and Menu skip the chrome and are centered in the whole terminal.

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::Text;
use ratatui::widgets::{Block, Padding, Paragraph, Widget, Wrap};

use crate::core::geometry::{CHROME_MARGIN, INTER_MARGIN};
use crate::core::page::Page;
use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::{Footer, Header, Splash};
use crate::tui::content::{ContentProvider, UNKNOWN_PAGE};
use crate::tui::theme::Theme;

/// A `width` × `height` rect centered in `area`, clipped to it.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Everything needed to draw one frame of a session.
pub struct SiteView<'a> {
    pub app: &'a App,
    pub content: &'a dyn ContentProvider,
    pub theme: &'a Theme,
}

impl<'a> SiteView<'a> {
    pub fn new(app: &'a App, content: &'a dyn ContentProvider, theme: &'a Theme) -> Self {
        Self {
            app,
            content,
            theme,
        }
    }

    /// The whole terminal, as last reported.
    pub fn area(&self) -> Rect {
        Rect::new(0, 0, self.app.terminal_width, self.app.terminal_height)
    }

    fn body_text(&self) -> Text<'static> {
        self.content
            .body(self.app.page, self.theme)
            .unwrap_or_else(|| Text::styled(UNKNOWN_PAGE, self.theme.base()))
    }

    fn body_paragraph(&self) -> Paragraph<'static> {
        Paragraph::new(self.body_text())
            .style(self.theme.base())
            .wrap(Wrap { trim: false })
    }

    /// The container, centered in the terminal and clipped to it.
    fn container(&self) -> Rect {
        centered(
            self.area(),
            self.app.container_width,
            self.app.container_height,
        )
    }

    /// Columns the body text is wrapped at. Narrower than the content width
    /// when the terminal clips the container.
    pub fn body_width(&self) -> u16 {
        self.container().width.saturating_sub(CHROME_MARGIN)
    }

    /// Number of rows the current body needs at the width it is drawn at.
    pub fn measure_body(&self) -> u16 {
        if !self.app.page.has_chrome() {
            return 0;
        }
        let lines = self.body_paragraph().line_count(self.body_width());
        u16::try_from(lines).unwrap_or(u16::MAX)
    }

    /// Render into a fresh buffer the size of the terminal.
    pub fn to_buffer(&self) -> Buffer {
        let area = self.area();
        let mut buf = Buffer::empty(area);
        self.render(area, &mut buf);
        buf
    }

    fn render_full_screen(&self, area: Rect, buf: &mut Buffer) {
        if self.app.page == Page::Splash {
            Splash::new(self.content.title(), self.app.cursor_visible, self.theme).render(area, buf);
            return;
        }
        let text = self.body_text();
        let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
        let height = u16::try_from(text.height()).unwrap_or(u16::MAX);
        Paragraph::new(text)
            .style(self.theme.base())
            .alignment(Alignment::Center)
            .render(centered(area, width, height), buf);
    }

    fn render_framed(&self, area: Rect, buf: &mut Buffer) {
        let app = self.app;
        let container = centered(area, app.container_width, app.container_height);

        let header = Header::new(app.page, app.size_class, self.content.title(), self.theme);
        let footer = Footer::new(self.content.tagline(), app.loaded, self.theme);

        let header_height = header.height().min(container.height);
        let footer_height = footer.height().min(container.height - header_height);
        let body_height = container.height - header_height - footer_height;

        let header_area = Rect {
            height: header_height,
            ..container
        };
        let body_area = Rect {
            y: container.y + header_height,
            height: body_height,
            ..container
        };
        let footer_area = Rect {
            y: body_area.y + body_height,
            height: footer_height,
            ..container
        };

        header.render(header_area, buf);
        self.render_body(body_area, buf);
        footer.render(footer_area, buf);
    }

    fn render_body(&self, area: Rect, buf: &mut Buffer) {
        let side = CHROME_MARGIN / 2;
        let edge = INTER_MARGIN / 2;
        let block = Block::new().padding(Padding::new(side, side, edge, edge));
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.is_empty() {
            return;
        }
        let offset = self.app.scroll_offset.min(self.app.max_scroll());
        self.body_paragraph().scroll((offset, 0)).render(inner, buf);
    }
}

impl Widget for &SiteView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.app.page.has_chrome() {
            self.render_framed(area, buf);
        } else {
            self.render_full_screen(area, buf);
        }
    }
}

/// Draw the frame for `app` as a standalone buffer.
pub fn render_frame(app: &App, content: &dyn ContentProvider, theme: &Theme) -> Buffer {
    SiteView::new(app, content, theme).to_buffer()
}
