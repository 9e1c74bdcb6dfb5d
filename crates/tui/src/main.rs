mod app;
mod client;
mod config;
mod error;
mod form;
mod sync;
mod toast;
mod ui;
mod view;

#[cfg(test)]
mod testing;

use std::{fs::OpenOptions, sync::Mutex};

use tracing_subscriber::EnvFilter;

use crate::error::{AppError, Result};

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load()?;
    init_tracing(&config.log_file)?;

    let mut app = app::App::new(config)?;
    app.run().await?;
    Ok(())
}

/// Logs go to a file; stdout belongs to the terminal UI.
fn init_tracing(path: &str) -> Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("splitledger_tui=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|err| AppError::Logging(err.to_string()))
}
