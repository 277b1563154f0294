//! Page bodies and site strings.
//!
//! The layout asks a [`ContentProvider`] for the body of the current page.
//! Returning `None` means "no view for this page" and the layout shows the
//! `unknown` placeholder instead.

use ratatui::text::{Line, Text};

use crate::core::config::ResolvedConfig;
use crate::core::page::Page;
use crate::tui::theme::Theme;

/// Body text shown for pages without a view.
pub const UNKNOWN_PAGE: &str = "unknown";

pub trait ContentProvider: Send + Sync {
    /// Site name shown as the logo and on the splash screen.
    fn title(&self) -> &str;

    /// Status line shown above the footer hints.
    fn tagline(&self) -> &str;

    /// Body of `page`, or `None` if the page has no view yet.
    fn body(&self, page: Page, theme: &Theme) -> Option<Text<'static>>;
}

/// The built-in site.
#[derive(Debug, Clone)]
pub struct SiteContent {
    title: String,
    tagline: String,
}

impl SiteContent {
    pub fn new(title: impl Into<String>, tagline: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            tagline: tagline.into(),
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(config.title.clone(), config.tagline.clone())
    }
}

fn numbered(theme: &Theme, items: &[&'static str]) -> Text<'static> {
    let mut lines = Vec::with_capacity(items.len() * 2);
    for (i, item) in items.iter().enumerate() {
        lines.push(Line::from(vec![
            theme.accent_span(format!("{}. ", i + 1)),
            theme.plain_span(*item),
        ]));
        lines.push(Line::default());
    }
    Text::from(lines)
}

impl ContentProvider for SiteContent {
    fn title(&self) -> &str {
        &self.title
    }

    fn tagline(&self) -> &str {
        &self.tagline
    }

    fn body(&self, page: Page, theme: &Theme) -> Option<Text<'static>> {
        let text = match page {
            Page::About => numbered(
                theme,
                &[
                    "# Amazingly awesome products for developers brought to you by a group of talented, good looking, and humble heroes...",
                    "# @thdxr",
                    "# @adamdotdev",
                ],
            ),
            Page::Menu => Text::from(Line::from(vec![
                theme.accent_span("terminal"),
                theme.plain_span(" new menu"),
            ])),
            Page::Work => numbered(
                theme,
                &[
                    "# Systems and tooling work, mostly in the terminal.",
                    "# Data pipelines, services, and the glue between them.",
                ],
            ),
            Page::Project => numbered(
                theme,
                &[
                    "# term-app: this site, served over SSH.",
                    "# More to come.",
                ],
            ),
            Page::Blog => Text::from(vec![
                Line::from(theme.plain_span("No posts yet.")),
                Line::default(),
                Line::from(vec![
                    theme.plain_span("Press "),
                    theme.accent_span("a"),
                    theme.plain_span(" to go back to the about page."),
                ]),
            ]),
            _ => return None,
        };
        Some(text)
    }
}
