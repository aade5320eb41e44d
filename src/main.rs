//! CLI entry point for launchdeck.

mod app;
mod build_info;
mod cli;

use clap::Parser;
use launchdeck::config::load_config_with_diagnostics;
use launchdeck::render::Renderer;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::cli::Command;

/// Log filter variable; defaults to `warn`.
const LOG_ENV: &str = "LAUNCHDECK_LOG";

#[tokio::main]
async fn main() {
    init_tracing();
    let args = cli::Args::parse();
    let renderer = Renderer::new(!args.no_color && std::env::var_os("NO_COLOR").is_none());
    debug!(build = %build_info::build_summary(), "starting");

    // `init` must work even when the existing file no longer parses.
    let loaded = match &args.command {
        Command::Init { .. } => None,
        _ => match load_config_with_diagnostics(args.config.as_deref()) {
            Ok(loaded) => Some(loaded),
            Err(e) => {
                renderer.error(&format!("failed to load config: {e}"));
                std::process::exit(1);
            }
        },
    };

    let config = match loaded {
        Some(loaded) => {
            for warning in &loaded.diagnostics.warnings {
                renderer.warn(warning);
            }
            debug!(source = ?loaded.source, "config loaded");
            loaded.config
        }
        None => Default::default(),
    };

    let host = args.host.unwrap_or_else(|| config.host());
    debug!(%host, "host classification");

    let app = App {
        config,
        host,
        renderer,
        config_path: args.config.clone(),
    };
    if let Err(msg) = app.run(args.command).await {
        renderer.error(&msg);
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
