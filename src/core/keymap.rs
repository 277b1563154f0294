//! # Key Map
//!
//! The fixed shortcut table. Key identifiers are plain strings
//! (`"q"`, `"ctrl+c"`, `"pgdown"`) so local and remote input sources can
//! share it. Anything not listed here is ignored by the dispatcher.

use crate::core::page::Page;

/// How far a scroll key moves the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scroll {
    LineUp,
    LineDown,
    PageUp,
    PageDown,
    HalfPageUp,
    HalfPageDown,
}

/// What a recognised key asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    Goto(Page),
    Scroll(Scroll),
}

/// Look up a key identifier in the shortcut table.
pub fn lookup(key: &str) -> Option<Command> {
    let command = match key {
        "q" | "ctrl+c" => Command::Quit,
        "a" => Command::Goto(Page::About),
        "m" => Command::Goto(Page::Menu),
        "h" => Command::Goto(Page::Payment),
        "w" => Command::Goto(Page::Work),
        "p" => Command::Goto(Page::Project),
        "b" => Command::Goto(Page::Blog),
        "s" => Command::Goto(Page::Shop),
        "f" => Command::Goto(Page::Faq),
        "c" => Command::Goto(Page::Cart),
        "t" => Command::Goto(Page::Splash),
        "up" => Command::Scroll(Scroll::LineUp),
        "down" => Command::Scroll(Scroll::LineDown),
        "pgup" => Command::Scroll(Scroll::PageUp),
        "pgdown" => Command::Scroll(Scroll::PageDown),
        "ctrl+u" => Command::Scroll(Scroll::HalfPageUp),
        "ctrl+d" => Command::Scroll(Scroll::HalfPageDown),
        _ => return None,
    };
    Some(command)
}

/// The key that jumps to `page`, if it has one.
pub fn shortcut_for(page: Page) -> Option<&'static str> {
    match page {
        Page::About => Some("a"),
        Page::Menu => Some("m"),
        Page::Payment => Some("h"),
        Page::Work => Some("w"),
        Page::Project => Some("p"),
        Page::Blog => Some("b"),
        Page::Shop => Some("s"),
        Page::Faq => Some("f"),
        Page::Cart => Some("c"),
        Page::Splash => Some("t"),
        Page::Shipping | Page::Confirm | Page::Final => None,
    }
}
