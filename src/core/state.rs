//! # Application State
//!
//! One `App` per session. This module contains navigation and layout state
//! only, no terminal or transport types.
//!
//! ```text
//! App
//! ├── page: Page                     // current screen
//! ├── terminal_width/height: u16     // last reported terminal size
//! ├── size_class: SizeClass          // derived from the terminal size
//! ├── container_width/height: u16    // derived from the terminal size
//! ├── content_width/height: u16      // container minus chrome
//! ├── splash_countdown: u32          // seconds left on the splash page
//! ├── cursor_visible: bool           // splash cursor blink phase
//! ├── viewport_ready: bool           // body sized by at least one resize
//! ├── scroll_offset: u16             // body scroll position
//! ├── content_lines: u16             // measured body length
//! ├── loaded: bool                   // minimum loading delay elapsed
//! ├── running: bool                  // false once quit was signalled
//! └── timing: Timing                 // countdown length and intervals
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! The derived dimensions are written by `apply_geometry` and nowhere else.

use std::time::Duration;

use crate::core::geometry::{Geometry, SizeClass, classify};
use crate::core::page::Page;

/// Terminal size assumed until the first resize arrives.
pub const DEFAULT_TERMINAL_SIZE: (u16, u16) = (100, 100);

pub const DEFAULT_SPLASH_SECONDS: u32 = 2;
pub const DEFAULT_CURSOR_BLINK: Duration = Duration::from_millis(700);
pub const DEFAULT_MIN_DELAY: Duration = Duration::from_millis(2000);
pub const SPLASH_TICK: Duration = Duration::from_secs(1);

/// Countdown length and timer intervals, resolved from config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub splash_seconds: u32,
    pub cursor_blink: Duration,
    pub min_delay: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            splash_seconds: DEFAULT_SPLASH_SECONDS,
            cursor_blink: DEFAULT_CURSOR_BLINK,
            min_delay: DEFAULT_MIN_DELAY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct App {
    pub page: Page,
    pub terminal_width: u16,
    pub terminal_height: u16,
    pub size_class: SizeClass,
    pub container_width: u16,
    pub container_height: u16,
    pub content_width: u16,
    pub content_height: u16,
    pub splash_countdown: u32,
    pub cursor_visible: bool,
    pub viewport_ready: bool,
    pub scroll_offset: u16,
    pub content_lines: u16,
    pub loaded: bool,
    pub running: bool,
    pub timing: Timing,
}

impl App {
    pub fn new(timing: Timing) -> Self {
        let (width, height) = DEFAULT_TERMINAL_SIZE;
        let mut app = Self {
            page: Page::Splash,
            terminal_width: width,
            terminal_height: height,
            size_class: SizeClass::Large,
            container_width: 0,
            container_height: 0,
            content_width: 0,
            content_height: 0,
            splash_countdown: timing.splash_seconds,
            cursor_visible: false,
            viewport_ready: false,
            scroll_offset: 0,
            content_lines: 0,
            loaded: false,
            running: true,
            timing,
        };
        app.apply_geometry(classify(width, height));
        app
    }

    /// Store a classification and refresh every derived dimension.
    pub(crate) fn apply_geometry(&mut self, geometry: Geometry) {
        self.size_class = geometry.size_class;
        self.container_width = geometry.container_width;
        self.container_height = geometry.container_height;
        self.content_width = geometry.content_width();
        self.content_height = geometry.content_height();
    }

    /// The classification currently in effect.
    pub fn geometry(&self) -> Geometry {
        Geometry {
            size_class: self.size_class,
            container_width: self.container_width,
            container_height: self.container_height,
        }
    }

    /// Largest scroll offset that still shows a full body region.
    pub fn max_scroll(&self) -> u16 {
        self.content_lines.saturating_sub(self.content_height)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(Timing::default())
    }
}
