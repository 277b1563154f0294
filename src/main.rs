use std::process::ExitCode;

use clap::Parser;
use log::{debug, error, info};
use termsite::Mode;
use termsite::core::config::{self, CliOverrides};
use termsite::logging::{self, LogTarget};
use termsite::{server, tui};

#[derive(Parser)]
#[command(name = "termsite", about = "A small website for the terminal")]
struct Args {
    #[command(subcommand)]
    mode: Mode,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let overrides = match &args.mode {
        Mode::Terminal => CliOverrides::default(),
        Mode::Server {
            host,
            port,
            host_key,
        } => CliOverrides {
            host: host.clone(),
            port: *port,
            host_key_path: host_key.clone(),
        },
    };

    let site_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("termsite: {e}");
            return ExitCode::FAILURE;
        }
    };
    let resolved = config::resolve(&site_config, &overrides);

    let target = match args.mode {
        Mode::Terminal => LogTarget::File,
        Mode::Server { .. } => LogTarget::FileAndStderr,
    };
    if let Err(e) = logging::init(target, &resolved.log_file, &resolved.log_level) {
        eprintln!("termsite: {e}");
        return ExitCode::FAILURE;
    }

    debug!("Resolved config: {:?}", resolved);

    match args.mode {
        Mode::Terminal => {
            info!("termsite starting in terminal mode");
            if let Err(e) = tui::run(resolved).await {
                error!("Terminal session failed: {}", e);
                eprintln!("termsite: {e}");
                return ExitCode::FAILURE;
            }
        }
        Mode::Server { .. } => {
            info!("termsite starting in server mode on {}", resolved.address());
            if let Err(e) = server::serve(resolved).await {
                error!("Server failed: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}
