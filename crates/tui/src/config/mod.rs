use chrono_tz::Tz;
use clap::Parser;
use serde::Deserialize;

use crate::error::{AppError, Result};

const DEFAULT_CONFIG_PATH: &str = "config/tui.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    /// IANA name used to display server timestamps.
    pub timezone: String,
    pub state_path: String,
    /// Google ID token exchanged on startup instead of showing the sign-in screen.
    pub id_token: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            timezone: "UTC".to_string(),
            state_path: crate::local_state::default_state_path().to_string(),
            id_token: None,
        }
    }
}

impl AppConfig {
    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| AppError::Timezone(self.timezone.clone()))
    }
}

#[derive(Debug, Parser)]
#[command(name = "spendly_tui", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override base URL (e.g. http://127.0.0.1:8000).
    #[arg(long)]
    base_url: Option<String>,
    /// Override timezone (IANA name).
    #[arg(long)]
    timezone: Option<String>,
    /// Where currency, theme and session are remembered.
    #[arg(long)]
    state_path: Option<String>,
    /// Google ID token to sign in with.
    #[arg(long, env = "SPENDLY_TUI_ID_TOKEN", hide_env_values = true)]
    id_token: Option<String>,
}

pub fn load() -> Result<AppConfig> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("SPENDLY_TUI"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    if let Some(timezone) = args.timezone {
        settings.timezone = timezone;
    }
    if let Some(state_path) = args.state_path {
        settings.state_path = state_path;
    }
    if let Some(id_token) = args.id_token {
        settings.id_token = Some(id_token);
    }
    settings.id_token = settings
        .id_token
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty());

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timezone_parses() {
        assert_eq!(AppConfig::default().tz().unwrap(), chrono_tz::UTC);
    }

    #[test]
    fn unknown_timezone_is_an_error() {
        let config = AppConfig {
            timezone: "Mars/Olympus".to_string(),
            ..AppConfig::default()
        };
        assert!(matches!(config.tz(), Err(AppError::Timezone(_))));
    }
}
