//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.termsite/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::state::{DEFAULT_CURSOR_BLINK, DEFAULT_MIN_DELAY, DEFAULT_SPLASH_SECONDS, Timing};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub site: SiteSection,
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub timing: TimingSection,
    #[serde(default)]
    pub log: LogSection,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SiteSection {
    pub title: Option<String>,
    pub tagline: Option<String>,
    pub theme: Option<ThemeName>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub host_key_path: Option<String>,
    pub shutdown_grace_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TimingSection {
    pub splash_seconds: Option<u32>,
    pub cursor_blink_ms: Option<u64>,
    pub min_delay_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LogSection {
    pub file: Option<String>,
    pub level: Option<String>,
}

/// Built-in palettes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Basic,
    Plain,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 23234;
pub const DEFAULT_HOST_KEY_PATH: &str = ".ssh/id_ed25519";
pub const DEFAULT_SHUTDOWN_GRACE_SECS: u64 = 30;
pub const DEFAULT_LOG_FILE: &str = "termsite.log";
pub const DEFAULT_LOG_LEVEL: &str = "debug";
pub const DEFAULT_TITLE: &str = "term-app";
pub const DEFAULT_TAGLINE: &str = "free shipping on US orders over $40";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub title: String,
    pub tagline: String,
    pub theme: ThemeName,
    pub host: String,
    pub port: u16,
    pub host_key_path: PathBuf,
    pub shutdown_grace: Duration,
    pub timing: Timing,
    pub log_file: PathBuf,
    pub log_level: String,
}

/// Overrides given on the command line. `None` = not specified.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub host_key_path: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.termsite/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".termsite").join("config.toml"))
}

/// Load config from `~/.termsite/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `SiteConfig::default()`.
pub fn load_config() -> Result<SiteConfig, ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => {
            warn!("Could not determine home directory, using default config");
            Ok(SiteConfig::default())
        }
    }
}

/// Load config from an explicit path, generating a default file if absent.
pub fn load_config_from(path: &Path) -> Result<SiteConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(SiteConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: SiteConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# termsite configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [site]
# title = "term-app"
# tagline = "free shipping on US orders over $40"
# theme = "basic"                    # "basic" or "plain"

# [server]
# host = "localhost"                 # Or set TERMSITE_HOST
# port = 23234                       # Or set TERMSITE_PORT
# host_key_path = ".ssh/id_ed25519"  # Or set TERMSITE_HOST_KEY; generated if missing
# shutdown_grace_secs = 30

# [timing]
# splash_seconds = 2
# cursor_blink_ms = 700
# min_delay_ms = 2000

# [log]
# file = "termsite.log"
# level = "debug"                    # Or set TERMSITE_LOG_LEVEL
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &SiteConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Host: CLI → env → config → default
    let host = cli
        .host
        .clone()
        .or_else(|| std::env::var("TERMSITE_HOST").ok())
        .or_else(|| config.server.host.clone())
        .unwrap_or_else(|| DEFAULT_HOST.to_string());

    // Port: CLI → env → config → default. An unparsable env value is skipped.
    let port = cli
        .port
        .or_else(|| {
            std::env::var("TERMSITE_PORT").ok().and_then(|raw| match raw.parse() {
                Ok(port) => Some(port),
                Err(_) => {
                    warn!("Ignoring invalid TERMSITE_PORT={raw:?}");
                    None
                }
            })
        })
        .or(config.server.port)
        .unwrap_or(DEFAULT_PORT);

    let host_key_path = cli
        .host_key_path
        .clone()
        .or_else(|| std::env::var("TERMSITE_HOST_KEY").ok())
        .or_else(|| config.server.host_key_path.clone())
        .unwrap_or_else(|| DEFAULT_HOST_KEY_PATH.to_string());

    let log_level = std::env::var("TERMSITE_LOG_LEVEL")
        .ok()
        .or_else(|| config.log.level.clone())
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

    let timing = Timing {
        splash_seconds: config.timing.splash_seconds.unwrap_or(DEFAULT_SPLASH_SECONDS),
        cursor_blink: config
            .timing
            .cursor_blink_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_CURSOR_BLINK),
        min_delay: config
            .timing
            .min_delay_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_MIN_DELAY),
    };

    ResolvedConfig {
        title: config
            .site
            .title
            .clone()
            .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        tagline: config
            .site
            .tagline
            .clone()
            .unwrap_or_else(|| DEFAULT_TAGLINE.to_string()),
        theme: config.site.theme.unwrap_or_default(),
        host,
        port,
        host_key_path: PathBuf::from(host_key_path),
        shutdown_grace: Duration::from_secs(
            config
                .server
                .shutdown_grace_secs
                .unwrap_or(DEFAULT_SHUTDOWN_GRACE_SECS),
        ),
        timing,
        log_file: PathBuf::from(
            config
                .log
                .file
                .clone()
                .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string()),
        ),
        log_level,
    }
}

impl ResolvedConfig {
    /// `host:port`, bracketing IPv6 literals.
    pub fn address(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        resolve(&SiteConfig::default(), &CliOverrides::default())
    }
}
