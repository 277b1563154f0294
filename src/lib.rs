//! termsite library exports for testing

use clap::Subcommand;

pub mod core;
pub mod logging;
pub mod server;
pub mod tui;

#[cfg(test)]
pub mod test_support;

/// How the site is served.
#[derive(Debug, Clone, Subcommand)]
pub enum Mode {
    /// Run one session in this terminal
    Terminal,
    /// Serve the site over SSH, one session per connection
    Server {
        /// Address to listen on
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on
        #[arg(long)]
        port: Option<u16>,
        /// Host key path (generated if missing)
        #[arg(long = "host-key")]
        host_key: Option<String>,
    },
}
