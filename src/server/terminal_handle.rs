//! Drawing to an SSH channel.
//!
//! ratatui's crossterm backend writes escape sequences into any
//! [`io::Write`]. [`TerminalHandle`] buffers them and hands each flushed
//! frame to a forwarding task, which pushes the bytes down the channel.
//! Drawing stays synchronous and never waits on the network.

use std::io::{self, Write};

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use log::warn;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::{Terminal, TerminalOptions, Viewport};
use russh::server::Handle;
use russh::{ChannelId, CryptoVec};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::tui::Surface;
use crate::tui::layout::SiteView;

/// Buffered writer whose flushes become channel data.
pub struct TerminalHandle {
    sink: UnboundedSender<Vec<u8>>,
    buffer: Vec<u8>,
}

impl TerminalHandle {
    pub fn new(sink: UnboundedSender<Vec<u8>>) -> Self {
        Self {
            sink,
            buffer: Vec::new(),
        }
    }

}

/// Sink for frames bound for `channel`. Spawns the task that forwards them.
pub fn channel_output(handle: Handle, channel: ChannelId) -> UnboundedSender<Vec<u8>> {
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(forward_output(rx, handle, channel));
    tx
}

impl Write for TerminalHandle {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        let frame = std::mem::take(&mut self.buffer);
        self.sink
            .send(frame)
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "channel output closed"))
    }
}

async fn forward_output(mut frames: UnboundedReceiver<Vec<u8>>, handle: Handle, channel: ChannelId) {
    while let Some(frame) = frames.recv().await {
        if handle.data(channel, CryptoVec::from(frame)).await.is_err() {
            warn!("Dropping output for channel {:?}: client gone", channel);
            break;
        }
    }
}

type RemoteTerminal = Terminal<CrosstermBackend<TerminalHandle>>;

/// A ratatui terminal drawing into a remote PTY of a known size.
///
/// The size is whatever the client last reported. Nothing here may ask the
/// backend about the cursor or the screen: crossterm would answer from the
/// server's own tty, not the client's. A resize therefore builds a new
/// fixed viewport, and the first draw after it repaints every cell.
pub struct RemoteSurface {
    sink: UnboundedSender<Vec<u8>>,
    terminal: RemoteTerminal,
}

impl RemoteSurface {
    pub fn new(sink: UnboundedSender<Vec<u8>>, width: u16, height: u16) -> io::Result<Self> {
        let mut terminal = fixed_terminal(&sink, width, height)?;
        execute!(
            terminal.backend_mut(),
            EnterAlternateScreen,
            Hide,
            Clear(ClearType::All)
        )?;
        Ok(Self { sink, terminal })
    }
}

fn fixed_terminal(
    sink: &UnboundedSender<Vec<u8>>,
    width: u16,
    height: u16,
) -> io::Result<RemoteTerminal> {
    Terminal::with_options(
        CrosstermBackend::new(TerminalHandle::new(sink.clone())),
        TerminalOptions {
            viewport: Viewport::Fixed(Rect::new(0, 0, width, height)),
        },
    )
}

impl Surface for RemoteSurface {
    fn present(&mut self, view: &SiteView<'_>) -> io::Result<()> {
        self.terminal
            .draw(|frame| frame.render_widget(view, frame.area()))?;
        Ok(())
    }

    fn resize(&mut self, width: u16, height: u16) -> io::Result<()> {
        let mut terminal = fixed_terminal(&self.sink, width, height)?;
        execute!(terminal.backend_mut(), Hide, Clear(ClearType::All))?;
        self.terminal = terminal;
        Ok(())
    }
}

impl Drop for RemoteSurface {
    fn drop(&mut self) {
        let _ = execute!(self.terminal.backend_mut(), Show, LeaveAlternateScreen);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::test_support::{key, test_app};
    use crate::tui::content::SiteContent;
    use crate::tui::theme::Theme;

    fn drain(rx: &mut UnboundedReceiver<Vec<u8>>) -> Vec<u8> {
        let mut out = Vec::new();
        while let Ok(frame) = rx.try_recv() {
            out.extend(frame);
        }
        out
    }

    #[test]
    fn test_flush_sends_buffered_bytes() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut handle = TerminalHandle::new(tx);
        handle.write_all(b"hello ").unwrap();
        handle.write_all(b"world").unwrap();
        assert!(rx.try_recv().is_err());

        handle.flush().unwrap();
        assert_eq!(rx.try_recv().unwrap(), b"hello world".to_vec());

        // nothing buffered, nothing sent
        handle.flush().unwrap();
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_flush_fails_once_receiver_is_gone() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let mut handle = TerminalHandle::new(tx);
        handle.write_all(b"x").unwrap();
        let err = handle.flush().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn test_remote_surface_draws_the_site() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut surface = RemoteSurface::new(tx, 40, 12).unwrap();
        let setup = String::from_utf8_lossy(&drain(&mut rx)).into_owned();
        assert!(setup.contains("\x1b[?1049h"), "no alternate screen: {setup:?}");

        let app = test_app();
        let content = SiteContent::new("hello-site", "tagline");
        let theme = Theme::plain();
        surface
            .present(&SiteView::new(&app, &content, &theme))
            .unwrap();
        let frame = String::from_utf8_lossy(&drain(&mut rx)).into_owned();
        assert!(frame.contains("hello-site"));

        drop(surface);
        let teardown = String::from_utf8_lossy(&drain(&mut rx)).into_owned();
        assert!(teardown.contains("\x1b[?1049l"));
    }

    // Everything below only writes to the channel; it must work for a
    // server with no controlling terminal.
    #[test]
    fn test_resize_redraws_at_new_size_without_local_tty() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut surface = RemoteSurface::new(tx, 100, 30).unwrap();

        let mut app = test_app();
        update(&mut app, Action::Resize { width: 100, height: 30 });
        update(&mut app, key("a"));
        let content = SiteContent::new("hello-site", "tagline");
        let theme = Theme::plain();
        surface
            .present(&SiteView::new(&app, &content, &theme))
            .unwrap();
        drain(&mut rx);

        update(&mut app, Action::Resize { width: 50, height: 20 });
        surface.resize(50, 20).unwrap();
        let cleared = String::from_utf8_lossy(&drain(&mut rx)).into_owned();
        assert!(cleared.contains("\x1b[2J"), "no clear: {cleared:?}");

        surface
            .present(&SiteView::new(&app, &content, &theme))
            .unwrap();
        let frame = String::from_utf8_lossy(&drain(&mut rx)).into_owned();
        // the whole medium frame is repainted, logo included
        assert!(frame.contains("hello-site"));
        assert!(frame.contains("about"));
    }
}
