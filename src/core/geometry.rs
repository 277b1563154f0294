//! # Geometry
//!
//! Maps raw terminal dimensions onto a size class and the container the
//! site is drawn in. Pure and total: every `(width, height)` pair has an
//! answer, including zero.
//!
//! ```text
//! width < 20 or height < 10  →  Undersized  (width × height)
//! width < 40                 →  Small       (width × height)
//! width < 60                 →  Medium      (40 × min(height, 30))
//! otherwise                  →  Large       (100 × min(height, 60))
//! ```

/// Horizontal space taken by the body padding on both sides.
pub const CHROME_MARGIN: u16 = 4;

/// Rows taken by the navigation bar (bordered, one row of tabs).
pub const HEADER_HEIGHT: u16 = 3;

/// Rows taken by the footer: status line, rule, key hints, bottom padding.
pub const FOOTER_HEIGHT: u16 = 4;

/// Rows of vertical padding around the body text.
pub const INTER_MARGIN: u16 = 2;

/// Discrete bucket derived from the terminal size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeClass {
    Undersized,
    Small,
    Medium,
    Large,
}

/// Result of classifying a terminal size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub size_class: SizeClass,
    pub container_width: u16,
    pub container_height: u16,
}

impl Geometry {
    /// Width available to page text once the body padding is removed.
    pub fn content_width(&self) -> u16 {
        self.container_width.saturating_sub(CHROME_MARGIN)
    }

    /// Height available to page text below the header and above the footer.
    ///
    /// Saturates at zero: a terminal too short for the chrome gets an empty
    /// content region, never an underflow.
    pub fn content_height(&self) -> u16 {
        self.container_height
            .saturating_sub(HEADER_HEIGHT)
            .saturating_sub(FOOTER_HEIGHT)
            .saturating_sub(INTER_MARGIN)
    }
}

/// Classify a terminal size. First matching rule wins.
pub fn classify(width: u16, height: u16) -> Geometry {
    let (size_class, container_width, container_height) = match (width, height) {
        (w, h) if w < 20 || h < 10 => (SizeClass::Undersized, w, h),
        (w, h) if w < 40 => (SizeClass::Small, w, h),
        (w, h) if w < 60 => (SizeClass::Medium, 40, h.min(30)),
        (_, h) => (SizeClass::Large, 100, h.min(60)),
    };

    Geometry {
        size_class,
        container_width,
        container_height,
    }
}
