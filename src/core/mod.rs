//! # Core Session Logic
//!
//! Navigation and layout state for one session of the site.
//! It knows nothing about terminals, SSH, or wall-clock time.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • App (state)          │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • TimerCommand (data)  │
//!                    │                         │
//!                    │  No I/O. No clock.      │
//!                    └───────────┬─────────────┘
//!                                │
//!                   ┌────────────┴────────────┐
//!                   ▼                         ▼
//!            ┌────────────┐            ┌────────────┐
//!            │    TUI     │            │   SSH      │
//!            │  (local)   │            │  server    │
//!            └────────────┘            └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`geometry`]: terminal size → size class and container dimensions
//! - [`page`]: the `Page` enum
//! - [`keymap`]: the shortcut table
//! - [`state`]: the `App` struct, all session state in one place
//! - [`timer`]: timer requests returned by transitions
//! - [`action`]: the `Action` enum and `update()`
//! - [`config`]: config file loading and resolution

pub mod action;
pub mod config;
pub mod geometry;
pub mod keymap;
pub mod page;
pub mod state;
pub mod timer;
