//! # Session Loop
//!
//! One session = one `App`, one scheduler, one queue of `Action`s, one
//! surface to draw on. The loop is the same for the local terminal and for
//! every SSH connection; only the surface differs.
//!
//! ```text
//! keys / resizes ─┐
//! timer ticks ────┼─► queue ─► update() ─► Effect ─► scheduler
//! shutdown ───────┘                │
//!                                  └─► measure ─► SiteView ─► surface
//! ```
//!
//! Events are handled strictly one at a time. The loop ends on quit (key,
//! disconnect or server shutdown) and cancels every timer on the way out.

use std::io;
use std::sync::Arc;

use log::debug;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::sync::watch;

use crate::core::action::{Action, init, update};
use crate::core::state::App;
use crate::tui::content::ContentProvider;
use crate::tui::layout::SiteView;
use crate::tui::scheduler::Scheduler;
use crate::tui::theme::Theme;

/// Somewhere frames can be shown.
pub trait Surface {
    /// Draw one frame.
    fn present(&mut self, view: &SiteView<'_>) -> io::Result<()>;

    /// The terminal behind the surface changed size.
    fn resize(&mut self, width: u16, height: u16) -> io::Result<()>;
}

/// The queue a session reads from, plus the server-wide shutdown flag.
pub struct SessionEvents {
    pub tx: UnboundedSender<Action>,
    pub rx: UnboundedReceiver<Action>,
    pub shutdown: Option<watch::Receiver<bool>>,
}

pub struct Session<S> {
    app: App,
    surface: S,
    content: Arc<dyn ContentProvider>,
    theme: Theme,
}

impl<S: Surface> Session<S> {
    pub fn new(app: App, surface: S, content: Arc<dyn ContentProvider>, theme: Theme) -> Self {
        Self {
            app,
            surface,
            content,
            theme,
        }
    }

    /// Run until the session quits. Returns the final state.
    pub async fn run(mut self, events: SessionEvents) -> io::Result<App> {
        let SessionEvents {
            tx,
            mut rx,
            mut shutdown,
        } = events;
        let mut scheduler = Scheduler::new(tx);
        scheduler.apply(init(&self.app).timers);
        self.present()?;

        loop {
            let action = tokio::select! {
                action = rx.recv() => action.unwrap_or(Action::Quit),
                () = shutdown_requested(shutdown.as_mut()) => {
                    debug!("Shutdown requested, ending session");
                    Action::Quit
                }
            };

            if let Action::Resize { width, height } = action {
                self.surface.resize(width, height)?;
            }

            let effect = update(&mut self.app, action);
            scheduler.apply(effect.timers);
            if effect.quit {
                break;
            }
            self.present()?;
        }

        scheduler.cancel_all();
        Ok(self.app)
    }

    fn present(&mut self) -> io::Result<()> {
        let lines = SiteView::new(&self.app, self.content.as_ref(), &self.theme).measure_body();
        if lines != self.app.content_lines {
            update(&mut self.app, Action::Measure { lines });
        }
        let view = SiteView::new(&self.app, self.content.as_ref(), &self.theme);
        self.surface.present(&view)
    }
}

/// Resolves once the flag is set. Never resolves without a flag, or after
/// its sender is gone.
async fn shutdown_requested(shutdown: Option<&mut watch::Receiver<bool>>) {
    let Some(shutdown) = shutdown else {
        return std::future::pending().await;
    };
    loop {
        if *shutdown.borrow_and_update() {
            return;
        }
        if shutdown.changed().await.is_err() {
            return std::future::pending().await;
        }
    }
}
