//! # TUI Adapter
//!
//! The ratatui-specific layer. Renders the site, runs the timers, and
//! translates terminal input into `core::Action` values.
//!
//! The core never sees ratatui or crossterm. Everything that draws goes
//! through [`Surface`], so the same session loop serves the local terminal
//! ([`LocalSurface`]) and each SSH connection (`server::RemoteSurface`).
//!
//! ## Redraw Strategy
//!
//! There is no animation clock. A frame is drawn after every handled event,
//! and the only periodic events are the timer ticks the core asks for
//! (splash countdown, cursor blink). Once the splash is gone the loop sleeps
//! until a key, a resize or the loading delay arrives.

mod component;
pub mod components;
pub mod content;
pub mod event;
pub mod layout;
pub mod scheduler;
pub mod session;
pub mod theme;

use std::io::{self, stdout};
use std::sync::Arc;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use log::{info, warn};
use ratatui::DefaultTerminal;
use tokio::sync::mpsc;

use crate::core::action::Action;
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::tui::content::SiteContent;
use crate::tui::layout::SiteView;
use crate::tui::theme::Theme;

pub use session::{Session, SessionEvents, Surface};

/// Hides the terminal cursor for the lifetime of the guard. The splash
/// draws its own.
struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> io::Result<Self> {
        execute!(stdout(), Hide)?;
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), Show);
    }
}

/// The terminal this process was started in.
pub struct LocalSurface {
    terminal: DefaultTerminal,
}

impl LocalSurface {
    pub fn new(terminal: DefaultTerminal) -> Self {
        Self { terminal }
    }
}

impl Surface for LocalSurface {
    fn present(&mut self, view: &SiteView<'_>) -> io::Result<()> {
        self.terminal
            .draw(|frame| frame.render_widget(view, frame.area()))?;
        Ok(())
    }

    fn resize(&mut self, _width: u16, _height: u16) -> io::Result<()> {
        // ratatui picks up the new size on the next draw
        Ok(())
    }
}

/// Run the site in the current terminal until the user quits.
pub async fn run(config: ResolvedConfig) -> io::Result<()> {
    let content = Arc::new(SiteContent::from_config(&config));
    let theme = Theme::from_name(config.theme);
    let app = App::new(config.timing);

    let terminal = ratatui::init();
    let guard = TerminalModeGuard::new();
    if let Err(e) = &guard {
        warn!("Could not hide the cursor: {}", e);
    }
    let size = terminal.size();

    let (tx, rx) = mpsc::unbounded_channel();
    match size {
        Ok(size) => {
            let _ = tx.send(Action::Resize {
                width: size.width,
                height: size.height,
            });
        }
        Err(e) => warn!("Could not read terminal size, keeping defaults: {}", e),
    }

    let input = tokio::spawn(event::forward_input(tx.clone()));
    let events = SessionEvents {
        tx,
        rx,
        shutdown: None,
    };

    info!("Local session started");
    let result = Session::new(app, LocalSurface::new(terminal), content, theme)
        .run(events)
        .await;
    input.abort();

    drop(guard);
    ratatui::restore();

    let app = result?;
    info!("Local session ended on {:?}", app.page);
    Ok(())
}
