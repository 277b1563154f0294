//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use ratatui::buffer::Buffer;

use crate::core::action::Action;
use crate::core::state::{App, Timing};

/// Creates a test App with default timing.
pub fn test_app() -> App {
    App::new(Timing::default())
}

/// A key action by identifier.
pub fn key(name: &str) -> Action {
    Action::Key(name.to_string())
}

/// The symbols of row `y`, concatenated.
pub fn row_text(buf: &Buffer, y: u16) -> String {
    (buf.area.x..buf.area.x + buf.area.width)
        .map(|x| buf[(x, y)].symbol())
        .collect()
}

/// Column where `needle` starts in row `y`, matching one char per cell.
pub fn find_in_row(buf: &Buffer, y: u16, needle: &str) -> Option<u16> {
    let symbols: Vec<&str> = (buf.area.x..buf.area.x + buf.area.width)
        .map(|x| buf[(x, y)].symbol())
        .collect();
    let chars: Vec<String> = needle.chars().map(String::from).collect();
    symbols
        .windows(chars.len())
        .position(|window| window.iter().zip(&chars).all(|(a, b)| *a == b.as_str()))
        .map(|i| buf.area.x + i as u16)
}
