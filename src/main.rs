mod config;
mod tiktok;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::{Config, CONFIG_FILE};
use crate::tiktok::TikTokResolver;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match Config::get_config() {
        Ok(c) => c,
        Err(e) => {
            error!("Error reading {}: {}", CONFIG_FILE, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(config).await {
        error!("Exiting: {:?}", e);
        std::process::exit(1);
    }
}

/// Answer every message read from stdin, one message per line
async fn run(config: Config) -> Result<()> {
    let resolver = TikTokResolver::from_config(&config)?;

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let message = tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) => line,
                None => break,
            },
            _ = sigterm.recv() => {
                info!("Received SIGTERM, exiting");
                break;
            }
            _ = sigint.recv() => {
                info!("Received SIGINT, exiting");
                break;
            }
        };

        let resolution = resolver.resolve_message(&message).await;
        if let Some(reply) = resolution.reply(&config.fallback_reply) {
            println!("{}\n", reply);
        }
    }

    Ok(())
}
