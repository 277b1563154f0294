//! # Header Component
//!
//! The navigation bar: a bordered row of tabs. The tab of the current page
//! is drawn in the emphasised style; the others show their shortcut key in
//! the accent colour followed by the label.
//!
//! How many tabs fit depends on the size class:
//!
//! | size class          | tabs                                  |
//! |---------------------|---------------------------------------|
//! | large               | logo, every navigation tab            |
//! | medium              | logo, active tab (if it is a tab)     |
//! | small / undersized  | active tab, or the logo when none     |

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use crate::core::geometry::{HEADER_HEIGHT, SizeClass};
use crate::core::keymap::shortcut_for;
use crate::core::page::{NAV_TABS, Page};
use crate::tui::component::Component;
use crate::tui::theme::Theme;

pub struct Header<'a> {
    pub page: Page,
    pub size_class: SizeClass,
    pub title: &'a str,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(page: Page, size_class: SizeClass, title: &'a str, theme: &'a Theme) -> Self {
        Self {
            page,
            size_class,
            title,
            theme,
        }
    }

    fn logo(&self) -> Line<'a> {
        Line::from(self.theme.emphasis_span(self.title))
    }

    fn tab(&self, page: Page) -> Line<'a> {
        let key = shortcut_for(page).unwrap_or("");
        if page == self.page {
            Line::from(self.theme.emphasis_span(format!("{key} {}", page.label())))
        } else {
            Line::from(vec![
                self.theme.accent_span(key),
                self.theme.plain_span(format!(" {}", page.label())),
            ])
        }
    }

    fn tabs(&self) -> Vec<Line<'a>> {
        match self.size_class {
            SizeClass::Large => std::iter::once(self.logo())
                .chain(NAV_TABS.iter().map(|&page| self.tab(page)))
                .collect(),
            SizeClass::Medium if self.page.is_tab() => vec![self.logo(), self.tab(self.page)],
            SizeClass::Medium => vec![self.logo()],
            SizeClass::Small | SizeClass::Undersized if self.page.is_tab() => {
                vec![self.tab(self.page)]
            }
            SizeClass::Small | SizeClass::Undersized => vec![self.logo()],
        }
    }
}

impl Component for Header<'_> {
    fn height(&self) -> u16 {
        HEADER_HEIGHT
    }

    fn render(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered().border_style(self.theme.border());
        let inner = block.inner(area);
        block.render(area, buf);

        let tabs = self.tabs();
        let cells = Layout::horizontal(vec![Constraint::Fill(1); tabs.len()]).split(inner);
        for (i, (line, cell)) in tabs.into_iter().zip(cells.iter()).enumerate() {
            let separator = if i == 0 {
                Block::new()
            } else {
                Block::new()
                    .borders(Borders::LEFT)
                    .border_style(self.theme.border())
            };
            Paragraph::new(line)
                .alignment(Alignment::Center)
                .style(self.theme.base())
                .block(separator)
                .render(*cell, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{find_in_row, row_text};
    use ratatui::style::Modifier;

    fn render(header: &Header<'_>, width: u16) -> Buffer {
        let mut buf = Buffer::empty(Rect::new(0, 0, width, header.height()));
        header.render(buf.area, &mut buf);
        buf
    }

    #[test]
    fn test_large_header_shows_every_tab() {
        let theme = Theme::basic();
        let header = Header::new(Page::About, SizeClass::Large, "site", &theme);
        let buf = render(&header, 100);
        let row = row_text(&buf, 1);
        for label in ["site", "a about", "w work", "p project", "b blog", "s shop"] {
            assert!(row.contains(label), "missing {label:?} in {row:?}");
        }
    }

    #[test]
    fn test_active_tab_is_emphasised() {
        let theme = Theme::basic();
        let header = Header::new(Page::Work, SizeClass::Large, "site", &theme);
        let buf = render(&header, 100);

        let work = find_in_row(&buf, 1, "work").unwrap();
        assert!(buf[(work, 1)].modifier.contains(Modifier::BOLD));

        let about = find_in_row(&buf, 1, "about").unwrap();
        assert!(!buf[(about, 1)].modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_medium_header_shows_logo_and_active_tab() {
        let theme = Theme::plain();
        let header = Header::new(Page::Blog, SizeClass::Medium, "site", &theme);
        let row = row_text(&render(&header, 40), 1);
        assert!(row.contains("site"));
        assert!(row.contains("b blog"));
        assert!(!row.contains("about"));
    }

    #[test]
    fn test_small_header_without_tab_shows_logo() {
        let theme = Theme::plain();
        let header = Header::new(Page::Cart, SizeClass::Small, "site", &theme);
        let row = row_text(&render(&header, 30), 1);
        assert!(row.contains("site"));
        assert!(!row.contains("cart"));
    }

    #[test]
    fn test_header_is_bordered() {
        let theme = Theme::plain();
        let header = Header::new(Page::About, SizeClass::Large, "site", &theme);
        let buf = render(&header, 100);
        assert_eq!(buf[(0, 0)].symbol(), "┌");
        assert_eq!(buf[(99, 2)].symbol(), "┘");
    }
}
