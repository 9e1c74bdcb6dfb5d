use std::time::Duration;

use chrono_tz::Tz;
use clap::Parser;
use serde::Deserialize;

use crate::error::{AppError, Result};

const DEFAULT_CONFIG_PATH: &str = "config/tui.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// API root, e.g. `http://127.0.0.1:8000/api`.
    pub base_url: String,
    /// IANA name used to display expense timestamps.
    pub timezone: String,
    pub refresh_interval_secs: u64,
    pub notification_secs: u64,
    pub log_file: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000/api".to_string(),
            timezone: "Asia/Kolkata".to_string(),
            refresh_interval_secs: 30,
            notification_secs: 5,
            log_file: "splitledger_tui.log".to_string(),
        }
    }
}

impl AppConfig {
    pub fn timezone(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| AppError::Timezone(self.timezone.clone()))
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs.max(1))
    }

    pub fn notification_ttl(&self) -> Duration {
        Duration::from_secs(self.notification_secs.max(1))
    }
}

#[derive(Debug, Parser)]
#[command(name = "splitledger_tui", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override API base URL (e.g. http://127.0.0.1:8000/api).
    #[arg(long)]
    base_url: Option<String>,
    /// Override timezone (IANA name).
    #[arg(long)]
    timezone: Option<String>,
    /// Override background refresh interval, in seconds.
    #[arg(long)]
    refresh_interval_secs: Option<u64>,
    /// Override how long notifications stay visible, in seconds.
    #[arg(long)]
    notification_secs: Option<u64>,
    /// Override log file path.
    #[arg(long)]
    log_file: Option<String>,
}

pub fn load() -> Result<AppConfig> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("SPLITLEDGER_TUI"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    apply_args(&mut settings, args);

    // Fail at startup rather than on the first render.
    settings.timezone()?;

    Ok(settings)
}

/// CLI flags win over the file and the environment.
fn apply_args(settings: &mut AppConfig, args: Args) {
    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    if let Some(timezone) = args.timezone {
        settings.timezone = timezone;
    }
    if let Some(secs) = args.refresh_interval_secs {
        settings.refresh_interval_secs = secs;
    }
    if let Some(secs) = args.notification_secs {
        settings.notification_secs = secs;
    }
    if let Some(log_file) = args.log_file {
        settings.log_file = log_file;
    }
}
