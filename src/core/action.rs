//! # Actions
//!
//! Everything that can happen to a session becomes an `Action`.
//! Terminal resized? That's `Action::Resize`. Splash timer fired? That's
//! `Action::Tick(TimerKind::SplashTick)`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state and returns an [`Effect`]: the timers to arm or cancel and
//! whether the session should end. No I/O happens here; the scheduler and
//! the surface live in the TUI adapter.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::debug;

use crate::core::geometry::classify;
use crate::core::keymap::{self, Command, Scroll};
use crate::core::page::Page;
use crate::core::state::{App, SPLASH_TICK};
use crate::core::timer::{TimerCommand, TimerKind};

/// An external event delivered to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// The terminal now has this many columns and rows.
    Resize { width: u16, height: u16 },
    /// A key, by identifier (`"a"`, `"ctrl+c"`, `"pgdown"`).
    Key(String),
    /// A timer armed earlier has fired.
    Tick(TimerKind),
    /// The body of the current page is this many lines long at the
    /// current content width.
    Measure { lines: u16 },
    /// End the session (Ctrl+C signal, client disconnect, server shutdown).
    Quit,
}

/// What the caller has to do after an update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Effect {
    pub timers: Vec<TimerCommand>,
    pub quit: bool,
}

impl Effect {
    fn timers(timers: Vec<TimerCommand>) -> Self {
        Self {
            timers,
            quit: false,
        }
    }
}

const ALL_TIMERS: [TimerKind; 3] = [
    TimerKind::CursorBlink,
    TimerKind::SplashTick,
    TimerKind::MinDelay,
];

/// Timers a fresh session starts with.
pub fn init(app: &App) -> Effect {
    let mut timers = vec![TimerCommand::arm(TimerKind::MinDelay, app.timing.min_delay)];
    if app.page == Page::Splash {
        timers.extend(splash_timers(app));
    }
    Effect::timers(timers)
}

/// Apply one action to the session state.
pub fn update(app: &mut App, action: Action) -> Effect {
    if !app.running {
        debug!("Ignoring {:?}: session already stopped", action);
        return Effect::default();
    }

    match action {
        Action::Resize { width, height } => {
            app.terminal_width = width;
            app.terminal_height = height;
            app.apply_geometry(classify(width, height));
            app.viewport_ready = true;
            app.scroll_offset = 0;
            Effect::default()
        }
        Action::Tick(kind) => on_tick(app, kind),
        Action::Measure { lines } => {
            app.content_lines = lines;
            app.scroll_offset = app.scroll_offset.min(app.max_scroll());
            Effect::default()
        }
        Action::Quit => quit(app),
        Action::Key(key) => match keymap::lookup(&key) {
            Some(Command::Quit) => quit(app),
            Some(Command::Goto(page)) => Effect::timers(switch_page(app, page)),
            Some(Command::Scroll(scroll)) => {
                scroll_by(app, scroll);
                Effect::default()
            }
            None => Effect::default(),
        },
    }
}

fn on_tick(app: &mut App, kind: TimerKind) -> Effect {
    match kind {
        // Blink ticks belong to the cursor alone; they never touch navigation.
        TimerKind::CursorBlink => {
            app.cursor_visible = !app.cursor_visible;
            if app.page == Page::Splash {
                Effect::timers(vec![TimerCommand::arm(
                    TimerKind::CursorBlink,
                    app.timing.cursor_blink,
                )])
            } else {
                Effect::default()
            }
        }
        TimerKind::SplashTick => {
            if app.page != Page::Splash {
                debug!("Stale splash tick on {:?}", app.page);
                return Effect::default();
            }
            app.splash_countdown = app.splash_countdown.saturating_sub(1);
            if app.splash_countdown == 0 {
                Effect::timers(switch_page(app, Page::About))
            } else {
                Effect::timers(vec![TimerCommand::arm(TimerKind::SplashTick, SPLASH_TICK)])
            }
        }
        TimerKind::MinDelay => {
            app.loaded = true;
            Effect::default()
        }
    }
}

fn quit(app: &mut App) -> Effect {
    app.running = false;
    Effect {
        timers: ALL_TIMERS.into_iter().map(TimerCommand::Cancel).collect(),
        quit: true,
    }
}

/// Move to `page`, cancelling the timers of the page being left and
/// arming those of the page being entered.
fn switch_page(app: &mut App, page: Page) -> Vec<TimerCommand> {
    if page == app.page && page != Page::Splash {
        return Vec::new();
    }

    let mut timers = Vec::new();
    if app.page == Page::Splash && page != Page::Splash {
        timers.push(TimerCommand::Cancel(TimerKind::SplashTick));
        timers.push(TimerCommand::Cancel(TimerKind::CursorBlink));
    }

    debug!("Page {:?} -> {:?}", app.page, page);
    app.page = page;
    app.scroll_offset = 0;
    app.content_lines = 0;
    app.apply_geometry(app.geometry());

    if page == Page::Splash {
        app.splash_countdown = app.timing.splash_seconds;
        timers.extend(splash_timers(app));
    }
    timers
}

fn splash_timers(app: &App) -> [TimerCommand; 2] {
    [
        TimerCommand::arm(TimerKind::SplashTick, SPLASH_TICK),
        TimerCommand::arm(TimerKind::CursorBlink, app.timing.cursor_blink),
    ]
}

fn scroll_by(app: &mut App, scroll: Scroll) {
    if !app.viewport_ready {
        return;
    }
    let page = app.content_height.max(1);
    let half = (app.content_height / 2).max(1);
    let offset = app.scroll_offset;
    let next = match scroll {
        Scroll::LineUp => offset.saturating_sub(1),
        Scroll::LineDown => offset.saturating_add(1),
        Scroll::PageUp => offset.saturating_sub(page),
        Scroll::PageDown => offset.saturating_add(page),
        Scroll::HalfPageUp => offset.saturating_sub(half),
        Scroll::HalfPageDown => offset.saturating_add(half),
    };
    app.scroll_offset = next.min(app.max_scroll());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::SizeClass;
    use crate::core::timer::TimerRequest;
    use crate::test_support::{key, test_app};

    fn tick(app: &mut App, kind: TimerKind) -> Effect {
        update(app, Action::Tick(kind))
    }

    #[test]
    fn test_init_arms_splash_cursor_and_min_delay() {
        let app = test_app();
        let effect = init(&app);
        let kinds: Vec<_> = effect.timers.iter().map(TimerCommand::kind).collect();
        assert_eq!(
            kinds,
            vec![TimerKind::MinDelay, TimerKind::SplashTick, TimerKind::CursorBlink]
        );
        assert!(!effect.quit);
    }

    #[test]
    fn test_splash_countdown_reaches_about_after_n_ticks() {
        let mut app = test_app();
        app.timing.splash_seconds = 3;
        app.splash_countdown = 3;

        for _ in 0..2 {
            let effect = tick(&mut app, TimerKind::SplashTick);
            assert_eq!(app.page, Page::Splash);
            assert_eq!(
                effect.timers,
                vec![TimerCommand::Arm(TimerRequest {
                    kind: TimerKind::SplashTick,
                    delay: SPLASH_TICK,
                })]
            );
        }
        assert_eq!(app.splash_countdown, 1);

        let effect = tick(&mut app, TimerKind::SplashTick);
        assert_eq!(app.page, Page::About);
        assert_eq!(app.splash_countdown, 0);
        assert!(effect.timers.contains(&TimerCommand::Cancel(TimerKind::SplashTick)));
        assert!(effect.timers.contains(&TimerCommand::Cancel(TimerKind::CursorBlink)));
        assert!(!effect.timers.iter().any(|t| matches!(t, TimerCommand::Arm(_))));
    }

    #[test]
    fn test_zero_second_splash_leaves_on_first_tick() {
        let mut app = test_app();
        app.splash_countdown = 0;
        tick(&mut app, TimerKind::SplashTick);
        assert_eq!(app.page, Page::About);
        assert_eq!(app.splash_countdown, 0);
    }

    #[test]
    fn test_stale_splash_tick_is_ignored() {
        let mut app = test_app();
        update(&mut app, key("w"));
        let before = app.clone();
        let effect = tick(&mut app, TimerKind::SplashTick);
        assert_eq!(app, before);
        assert_eq!(effect, Effect::default());
    }

    #[test]
    fn test_cursor_alternates_and_rearms_on_splash() {
        let mut app = test_app();
        for k in 1..=5 {
            let effect = tick(&mut app, TimerKind::CursorBlink);
            assert_eq!(app.cursor_visible, k % 2 == 1);
            assert_eq!(
                effect.timers,
                vec![TimerCommand::arm(TimerKind::CursorBlink, app.timing.cursor_blink)]
            );
        }
    }

    #[test]
    fn test_cursor_tick_off_splash_toggles_without_rearm() {
        let mut app = test_app();
        update(&mut app, key("a"));
        let effect = tick(&mut app, TimerKind::CursorBlink);
        assert!(app.cursor_visible);
        assert!(effect.timers.is_empty());
        assert_eq!(app.page, Page::About);
    }

    #[test]
    fn test_min_delay_marks_loaded() {
        let mut app = test_app();
        tick(&mut app, TimerKind::MinDelay);
        assert!(app.loaded);
    }

    #[test]
    fn test_goto_from_every_page() {
        for start in ["a", "m", "h", "w", "p", "b", "s", "f", "c", "t"] {
            let mut app = test_app();
            update(&mut app, key(start));
            update(&mut app, key("a"));
            assert_eq!(app.page, Page::About, "from {start}");
        }
    }

    #[test]
    fn test_reentering_splash_resets_countdown_and_rearms() {
        let mut app = test_app();
        tick(&mut app, TimerKind::SplashTick);
        assert_eq!(app.splash_countdown, 1);
        update(&mut app, key("a"));

        let effect = update(&mut app, key("t"));
        assert_eq!(app.page, Page::Splash);
        assert_eq!(app.splash_countdown, app.timing.splash_seconds);
        let kinds: Vec<_> = effect.timers.iter().map(TimerCommand::kind).collect();
        assert_eq!(kinds, vec![TimerKind::SplashTick, TimerKind::CursorBlink]);
    }

    #[test]
    fn test_same_page_switch_is_a_no_op() {
        let mut app = test_app();
        update(&mut app, key("a"));
        let before = app.clone();
        let effect = update(&mut app, key("a"));
        assert_eq!(app, before);
        assert!(effect.timers.is_empty());
    }

    #[test]
    fn test_unmapped_key_changes_nothing() {
        let mut app = test_app();
        update(&mut app, Action::Resize { width: 80, height: 40 });
        let before = app.clone();
        let effect = update(&mut app, key("z"));
        assert_eq!(app, before);
        assert_eq!(effect, Effect::default());
    }

    #[test]
    fn test_quit_cancels_everything_and_stops() {
        let mut app = test_app();
        let effect = update(&mut app, key("q"));
        assert!(effect.quit);
        assert_eq!(effect.timers.len(), 3);
        assert!(effect.timers.iter().all(|t| matches!(t, TimerCommand::Cancel(_))));
        assert!(!app.running);

        let before = app.clone();
        let effect = update(&mut app, key("a"));
        assert_eq!(effect, Effect::default());
        assert_eq!(app, before);
    }

    #[test]
    fn test_resize_reclassifies_and_is_idempotent() {
        let mut app = test_app();
        update(&mut app, Action::Resize { width: 50, height: 45 });
        let first = app.clone();
        update(&mut app, Action::Resize { width: 50, height: 45 });
        assert_eq!(app, first);
        assert_eq!(app.size_class, SizeClass::Medium);
        assert_eq!((app.container_width, app.container_height), (40, 30));
        assert_eq!(app.content_width, 36);
        assert_eq!(app.content_height, 30 - 3 - 4 - 2);
        assert!(app.viewport_ready);
    }

    #[test]
    fn test_undersized_resize() {
        let mut app = test_app();
        let effect = update(&mut app, Action::Resize { width: 15, height: 8 });
        assert_eq!(effect, Effect::default());
        assert_eq!(app.size_class, SizeClass::Undersized);
        assert_eq!((app.container_width, app.container_height), (15, 8));
        assert_eq!(app.content_height, 0);
    }

    #[test]
    fn test_scroll_waits_for_viewport() {
        let mut app = test_app();
        update(&mut app, key("a"));
        update(&mut app, Action::Measure { lines: 200 });
        update(&mut app, key("down"));
        assert_eq!(app.scroll_offset, 0);
    }

    #[test]
    fn test_scroll_is_bounded_by_measured_content() {
        let mut app = test_app();
        update(&mut app, Action::Resize { width: 100, height: 20 });
        update(&mut app, key("a"));
        // content height is 20 - 3 - 4 - 2 = 11
        update(&mut app, Action::Measure { lines: 15 });

        update(&mut app, key("down"));
        assert_eq!(app.scroll_offset, 1);
        update(&mut app, key("pgdown"));
        assert_eq!(app.scroll_offset, 4);
        update(&mut app, key("ctrl+u"));
        assert_eq!(app.scroll_offset, 0);
        update(&mut app, key("ctrl+d"));
        assert_eq!(app.scroll_offset, 4);
        update(&mut app, key("pgup"));
        assert_eq!(app.scroll_offset, 0);
        update(&mut app, key("up"));
        assert_eq!(app.scroll_offset, 0);
    }

    #[test]
    fn test_shorter_measure_pulls_scroll_back() {
        let mut app = test_app();
        update(&mut app, Action::Resize { width: 100, height: 20 });
        update(&mut app, key("a"));
        update(&mut app, Action::Measure { lines: 40 });
        update(&mut app, key("pgdown"));
        assert_eq!(app.scroll_offset, 11);
        update(&mut app, Action::Measure { lines: 13 });
        assert_eq!(app.scroll_offset, 2);
    }

    #[test]
    fn test_resize_and_page_switch_return_to_top() {
        let mut app = test_app();
        update(&mut app, Action::Resize { width: 100, height: 20 });
        update(&mut app, key("a"));
        update(&mut app, Action::Measure { lines: 40 });
        update(&mut app, key("down"));
        update(&mut app, Action::Resize { width: 100, height: 21 });
        assert_eq!(app.scroll_offset, 0);

        update(&mut app, key("down"));
        update(&mut app, key("w"));
        assert_eq!(app.scroll_offset, 0);
        assert_eq!(app.content_lines, 0);
    }
}
