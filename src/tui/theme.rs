//! Render styles handed to the layout and content producers.
//!
//! A `Theme` is a plain value built per session, so every SSH client gets
//! its own and nothing is shared through globals.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;

use crate::core::config::ThemeName;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    base: Style,
    accent: Style,
    border: Style,
    cursor: Style,
}

impl Theme {
    /// Light text on the terminal background with an orange accent.
    pub fn basic() -> Self {
        Self {
            base: Style::default().fg(Color::Gray),
            accent: Style::default().fg(Color::Rgb(0xFF, 0x5C, 0x00)),
            border: Style::default().fg(Color::DarkGray),
            cursor: Style::default().bg(Color::Rgb(0xFF, 0x5C, 0x00)),
        }
    }

    /// No colours at all; emphasis and the cursor use modifiers only.
    pub fn plain() -> Self {
        Self {
            base: Style::default(),
            accent: Style::default(),
            border: Style::default(),
            cursor: Style::default().add_modifier(Modifier::REVERSED),
        }
    }

    pub fn from_name(name: ThemeName) -> Self {
        match name {
            ThemeName::Basic => Self::basic(),
            ThemeName::Plain => Self::plain(),
        }
    }

    pub fn base(&self) -> Style {
        self.base
    }

    pub fn text_accent(&self) -> Style {
        self.accent
    }

    /// Accent plus bold: the active tab and the site title.
    pub fn emphasis(&self) -> Style {
        self.accent.add_modifier(Modifier::BOLD)
    }

    pub fn border(&self) -> Style {
        self.border
    }

    /// Style of the blinking cursor cell in the given phase.
    pub fn cursor(&self, visible: bool) -> Style {
        if visible { self.cursor } else { self.base }
    }

    pub fn plain_span<'a>(&self, text: impl Into<std::borrow::Cow<'a, str>>) -> Span<'a> {
        Span::styled(text, self.base)
    }

    pub fn accent_span<'a>(&self, text: impl Into<std::borrow::Cow<'a, str>>) -> Span<'a> {
        Span::styled(text, self.accent)
    }

    pub fn emphasis_span<'a>(&self, text: impl Into<std::borrow::Cow<'a, str>>) -> Span<'a> {
        Span::styled(text, self.emphasis())
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::basic()
    }
}
