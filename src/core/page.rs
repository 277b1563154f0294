//! # Pages
//!
//! The closed set of screens the site can show. Only a handful have a real
//! view; the rest render the "unknown" placeholder until content exists.

/// One named screen of the site. Exactly one is current at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Menu,
    Splash,
    About,
    Faq,
    Shop,
    Payment,
    Cart,
    Work,
    Project,
    Blog,
    Shipping,
    Confirm,
    Final,
}

/// Pages that appear as tabs in the navigation bar, in display order.
pub const NAV_TABS: [Page; 5] = [Page::About, Page::Work, Page::Project, Page::Blog, Page::Shop];

impl Page {
    /// Lowercase label used in the navigation bar and logs.
    pub fn label(self) -> &'static str {
        match self {
            Page::Menu => "menu",
            Page::Splash => "splash",
            Page::About => "about",
            Page::Faq => "faq",
            Page::Shop => "shop",
            Page::Payment => "payment",
            Page::Cart => "cart",
            Page::Work => "work",
            Page::Project => "project",
            Page::Blog => "blog",
            Page::Shipping => "shipping",
            Page::Confirm => "confirm",
            Page::Final => "final",
        }
    }

    /// Whether the page is framed by the header and footer.
    ///
    /// Splash and Menu take over the whole terminal.
    pub fn has_chrome(self) -> bool {
        !matches!(self, Page::Splash | Page::Menu)
    }

    /// Whether the page is one of the navigation bar tabs.
    pub fn is_tab(self) -> bool {
        NAV_TABS.contains(&self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_screen_pages() {
        assert!(!Page::Splash.has_chrome());
        assert!(!Page::Menu.has_chrome());
        assert!(Page::About.has_chrome());
        assert!(Page::Final.has_chrome());
    }

    #[test]
    fn test_nav_tabs() {
        assert!(Page::About.is_tab());
        assert!(Page::Shop.is_tab());
        assert!(!Page::Cart.is_tab());
        assert_eq!(NAV_TABS.map(Page::label), ["about", "work", "project", "blog", "shop"]);
    }
}
