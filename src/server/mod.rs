//! # SSH Server
//!
//! Serves the site to SSH clients. Every connection runs its own session
//! (own `App`, own timers) behind the same content and theme.
//!
//! ```text
//! TcpListener ──accept──► run_stream(SshSession) ──► tui::Session
//!      ▲                        (JoinSet)                  ▲
//!      └── SIGINT / SIGTERM ── shutdown flag (watch) ──────┘
//! ```
//!
//! On a signal the server stops accepting, raises the shutdown flag so
//! every session quits and closes its channel, then waits up to the grace
//! period for connections to finish before aborting the rest.

mod handler;
pub mod input;
mod terminal_handle;

use std::fmt;
use std::fs::{self, File};
use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, error, info, warn};
use russh::server::Config;
use russh_keys::key::KeyPair;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::task::JoinSet;

use crate::core::config::ResolvedConfig;
use crate::tui::content::SiteContent;
use crate::tui::theme::Theme;

pub use handler::{PTY_REQUIRED, SiteContext, SshSession};
pub use terminal_handle::{RemoteSurface, TerminalHandle};

// ============================================================================
// Error Types
// ============================================================================

/// Fatal startup errors.
#[derive(Debug)]
pub enum ServerError {
    HostKey(String),
    Bind { address: String, source: io::Error },
    Io(io::Error),
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::HostKey(msg) => write!(f, "host key error: {msg}"),
            ServerError::Bind { address, source } => {
                write!(f, "could not listen on {address}: {source}")
            }
            ServerError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for ServerError {}

impl From<io::Error> for ServerError {
    fn from(e: io::Error) -> Self {
        ServerError::Io(e)
    }
}

/// Errors that end one connection.
#[derive(Debug)]
pub enum SessionError {
    Ssh(russh::Error),
    Io(io::Error),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Ssh(e) => write!(f, "SSH error: {e}"),
            SessionError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<russh::Error> for SessionError {
    fn from(e: russh::Error) -> Self {
        SessionError::Ssh(e)
    }
}

impl From<io::Error> for SessionError {
    fn from(e: io::Error) -> Self {
        SessionError::Io(e)
    }
}

// ============================================================================
// Host Key
// ============================================================================

/// Load the ed25519 host key at `path`, generating and saving a new one if
/// the file does not exist yet.
pub fn load_or_generate_host_key(path: &Path) -> Result<KeyPair, ServerError> {
    if path.exists() {
        debug!("Loading host key from {}", path.display());
        return russh_keys::load_secret_key(path, None)
            .map_err(|e| ServerError::HostKey(format!("{}: {e}", path.display())));
    }

    info!("Generating host key at {}", path.display());
    let key: Option<KeyPair> = KeyPair::generate_ed25519().into();
    let key = key.ok_or_else(|| ServerError::HostKey("ed25519 generation failed".into()))?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    restrict_permissions(&file)?;
    russh_keys::encode_pkcs8_pem(&key, file)
        .map_err(|e| ServerError::HostKey(format!("{}: {e}", path.display())))?;
    Ok(key)
}

#[cfg(unix)]
fn restrict_permissions(file: &File) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_file: &File) -> io::Result<()> {
    Ok(())
}

// ============================================================================
// Serving
// ============================================================================

fn ssh_config(key: KeyPair) -> Config {
    Config {
        keys: vec![key],
        inactivity_timeout: Some(Duration::from_secs(3600)),
        auth_rejection_time: Duration::from_secs(1),
        auth_rejection_time_initial: Some(Duration::ZERO),
        ..Default::default()
    }
}

/// Serve until SIGINT or SIGTERM, then shut down gracefully.
pub async fn serve(config: ResolvedConfig) -> Result<(), ServerError> {
    let key = load_or_generate_host_key(&config.host_key_path)?;
    let address = config.address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| ServerError::Bind {
            address: address.clone(),
            source,
        })?;
    info!("Starting SSH server on {}", address);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let context = Arc::new(SiteContext {
        content: Arc::new(SiteContent::from_config(&config)),
        theme: Theme::from_name(config.theme),
        timing: config.timing,
        shutdown: shutdown_rx,
    });
    let ssh_config = Arc::new(ssh_config(key));
    let mut connections = JoinSet::new();

    let signal = shutdown_signal();
    tokio::pin!(signal);

    loop {
        tokio::select! {
            accepted = listener.accept() => {
                let (stream, peer) = match accepted {
                    Ok(accepted) => accepted,
                    Err(e) => {
                        warn!("Accept failed: {}", e);
                        continue;
                    }
                };
                debug!("Connection from {}", peer);
                let handler = SshSession::new(Arc::clone(&context));
                let ssh_config = Arc::clone(&ssh_config);
                connections.spawn(async move {
                    let result = match russh::server::run_stream(ssh_config, stream, handler).await {
                        Ok(running) => running.await,
                        Err(e) => Err(e),
                    };
                    if let Err(e) = result {
                        warn!("Connection from {} ended with error: {}", peer, e);
                    }
                });
            }
            Some(_) = connections.join_next(), if !connections.is_empty() => {}
            () = &mut signal => break,
        }
    }

    info!("Stopping SSH server");
    drop(listener);
    drain_connections(&mut connections, config.shutdown_grace, &shutdown_tx).await;
    info!("SSH server stopped");
    Ok(())
}

/// Raise the shutdown flag and wait up to `grace` for every connection to
/// finish. Connections still running after that are aborted. Returns how
/// many were aborted.
pub async fn drain_connections(
    connections: &mut JoinSet<()>,
    grace: Duration,
    shutdown: &watch::Sender<bool>,
) -> usize {
    let _ = shutdown.send(true);

    let drained = tokio::time::timeout(grace, async {
        while connections.join_next().await.is_some() {}
    })
    .await;
    if drained.is_ok() {
        return 0;
    }

    let remaining = connections.len();
    error!(
        "{} connection(s) still open after {:?}, aborting",
        remaining, grace
    );
    connections.abort_all();
    while connections.join_next().await.is_some() {}
    remaining
}

async fn shutdown_signal() {
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Could not listen for SIGINT: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Could not listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = interrupt => info!("Received SIGINT"),
        () = terminate => info!("Received SIGTERM"),
    }
}
