//! Per-connection SSH handler.
//!
//! Each accepted connection gets an [`SshSession`]. It waits for a PTY and a
//! shell request, then starts an isolated site session drawing into the
//! channel. Keystrokes and window changes are forwarded into that session's
//! queue; a closed channel or dropped connection quits it.

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info, warn};
use russh::server::{Auth, Handler, Msg, Session};
use russh::{Channel, ChannelId, CryptoVec, Pty};
use russh_keys::key::PublicKey;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::sync::watch;
use uuid::Uuid;

use super::SessionError;
use super::input::decode_keys;
use super::terminal_handle::{RemoteSurface, channel_output};
use crate::core::action::Action;
use crate::core::state::{App, Timing};
use crate::tui::content::ContentProvider;
use crate::tui::theme::Theme;
use crate::tui::{Session as SiteSession, SessionEvents};

pub const PTY_REQUIRED: &str = "Requires an active PTY\r\n";

/// What every session on this server shares. Each session still gets its
/// own `App` and scheduler.
pub struct SiteContext {
    pub content: Arc<dyn ContentProvider>,
    pub theme: Theme,
    pub timing: Timing,
    pub shutdown: watch::Receiver<bool>,
}

/// Answer to a shell request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShellReply {
    Start { width: u16, height: u16 },
    Reject { message: &'static str, exit_status: u32 },
}

pub struct SshSession {
    id: Uuid,
    context: Arc<SiteContext>,
    pty: Option<(u16, u16)>,
    events: Option<UnboundedSender<Action>>,
}

impl SshSession {
    pub fn new(context: Arc<SiteContext>) -> Self {
        Self {
            id: Uuid::new_v4(),
            context,
            pty: None,
            events: None,
        }
    }

    fn send(&self, action: Action) {
        if let Some(events) = &self.events {
            // the session may already have quit on its own
            let _ = events.send(action);
        }
    }

    fn shell_reply(&self) -> ShellReply {
        match self.pty {
            Some((width, height)) => ShellReply::Start { width, height },
            None => ShellReply::Reject {
                message: PTY_REQUIRED,
                exit_status: 1,
            },
        }
    }

    fn start(&mut self, channel: ChannelId, width: u16, height: u16, session: &mut Session) {
        let id = self.id;
        let context = Arc::clone(&self.context);
        let handle = session.handle();
        let (tx, rx) = mpsc::unbounded_channel();
        let _ = tx.send(Action::Resize { width, height });
        self.events = Some(tx.clone());

        tokio::spawn(async move {
            info!("[{}] Session started ({}x{})", id, width, height);
            let output = channel_output(handle.clone(), channel);
            let result = match RemoteSurface::new(output, width, height) {
                Ok(surface) => {
                    let events = SessionEvents {
                        tx,
                        rx,
                        shutdown: Some(context.shutdown.clone()),
                    };
                    SiteSession::new(
                        App::new(context.timing),
                        surface,
                        Arc::clone(&context.content),
                        context.theme,
                    )
                    .run(events)
                    .await
                }
                Err(e) => Err(e),
            };
            match result {
                Ok(app) => info!("[{}] Session ended on {:?}", id, app.page),
                Err(e) => warn!("[{}] Session failed: {}", id, e),
            }
            let _ = handle.exit_status_request(channel, 0).await;
            let _ = handle.eof(channel).await;
            let _ = handle.close(channel).await;
        });
    }
}

impl Drop for SshSession {
    fn drop(&mut self) {
        debug!("[{}] Connection dropped", self.id);
        self.send(Action::Quit);
    }
}

#[async_trait]
impl Handler for SshSession {
    type Error = SessionError;

    async fn auth_none(&mut self, user: &str) -> Result<Auth, Self::Error> {
        debug!("[{}] Accepting {}", self.id, user);
        Ok(Auth::Accept)
    }

    async fn auth_publickey(&mut self, user: &str, _key: &PublicKey) -> Result<Auth, Self::Error> {
        debug!("[{}] Accepting {} by public key", self.id, user);
        Ok(Auth::Accept)
    }

    async fn channel_open_session(
        &mut self,
        channel: Channel<Msg>,
        _session: &mut Session,
    ) -> Result<bool, Self::Error> {
        debug!("[{}] Session channel {:?} opened", self.id, channel.id());
        Ok(true)
    }

    #[allow(clippy::too_many_arguments)]
    async fn pty_request(
        &mut self,
        channel: ChannelId,
        term: &str,
        col_width: u32,
        row_height: u32,
        _pix_width: u32,
        _pix_height: u32,
        _modes: &[(Pty, u32)],
        session: &mut Session,
    ) -> Result<(), Self::Error> {
        debug!("[{}] PTY {} {}x{}", self.id, term, col_width, row_height);
        self.pty = Some((clamp(col_width), clamp(row_height)));
        session.channel_success(channel);
        Ok(())
    }

    async fn shell_request(
        &mut self,
        channel: ChannelId,
        session: &mut Session,
    ) -> Result<(), Self::Error> {
        match self.shell_reply() {
            ShellReply::Start { width, height } => {
                session.channel_success(channel);
                self.start(channel, width, height, session);
            }
            ShellReply::Reject {
                message,
                exit_status,
            } => {
                info!("[{}] Rejecting shell without a PTY", self.id);
                session.data(channel, CryptoVec::from_slice(message.as_bytes()));
                session.exit_status_request(channel, exit_status);
                session.close(channel);
            }
        }
        Ok(())
    }

    async fn data(
        &mut self,
        _channel: ChannelId,
        data: &[u8],
        _session: &mut Session,
    ) -> Result<(), Self::Error> {
        for key in decode_keys(data) {
            self.send(Action::Key(key));
        }
        Ok(())
    }

    async fn window_change_request(
        &mut self,
        _channel: ChannelId,
        col_width: u32,
        row_height: u32,
        _pix_width: u32,
        _pix_height: u32,
        _session: &mut Session,
    ) -> Result<(), Self::Error> {
        let (width, height) = (clamp(col_width), clamp(row_height));
        self.pty = Some((width, height));
        self.send(Action::Resize { width, height });
        Ok(())
    }

    async fn channel_eof(
        &mut self,
        _channel: ChannelId,
        _session: &mut Session,
    ) -> Result<(), Self::Error> {
        self.send(Action::Quit);
        Ok(())
    }

    async fn channel_close(
        &mut self,
        _channel: ChannelId,
        _session: &mut Session,
    ) -> Result<(), Self::Error> {
        self.send(Action::Quit);
        Ok(())
    }
}

fn clamp(cells: u32) -> u16 {
    u16::try_from(cells).unwrap_or(u16::MAX)
}
