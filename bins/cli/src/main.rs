//! Tripbooks command-line driver.
//!
//! Reads a JSON request file, runs the book or TDS computation and prints
//! the result as JSON on stdout.
//!
//! Usage:
//!   tripbooks ledger <input.json>
//!   tripbooks tds <input.json>

mod books;
mod tds;
mod wire;

use std::path::Path;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tripbooks_shared::AppConfig;

const USAGE: &str = "usage: tripbooks <ledger|tds> <input.json>";

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("failed to load configuration")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut args = std::env::args().skip(1);
    let (command, path) = match (args.next(), args.next()) {
        (Some(command), Some(path)) => (command, path),
        _ => anyhow::bail!(USAGE),
    };

    let input = std::fs::read_to_string(Path::new(&path))
        .with_context(|| format!("failed to read {path}"))?;
    info!(%command, %path, "processing request");

    let output = match command.as_str() {
        "ledger" => books::run(&input, &config)?,
        "tds" => tds::run(&input, &config)?,
        other => anyhow::bail!("unknown command {other:?}; {USAGE}"),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
