//! # TUI Components
//!
//! Chrome and full-screen views drawn around (or instead of) page bodies.
//!
//! ## Props-Based Data Flow
//!
//! Components receive external data as "props" (struct fields), not by
//! reaching into the session state. The layout builds them from the `App`,
//! the theme and the content provider on every frame.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs      (this file)
//! ├── header.rs   (navigation bar)
//! ├── footer.rs   (status line and key hints)
//! └── splash.rs   (title with blinking cursor)
//! ```

pub mod footer;
pub mod header;
pub mod splash;

pub use footer::Footer;
pub use header::Header;
pub use splash::Splash;
