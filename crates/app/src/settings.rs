//! Service settings.
//!
//! Read from `config/spendly.toml` when present, then overridden by
//! `SPENDLY__<SECTION>__<KEY>` environment variables, e.g.
//! `SPENDLY__SERVER__JWT_SECRET`.
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct App {
    pub level: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: String,
    pub port: u16,
    pub database: Database,
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    #[serde(default)]
    pub google_client_id: String,
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Server,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_builder(
            Config::builder()
                .add_source(File::with_name("config/spendly").required(false))
                .add_source(
                    Environment::with_prefix("SPENDLY")
                        .separator("__")
                        .list_separator(",")
                        .with_list_parse_key("server.cors_origins")
                        .try_parsing(true),
                ),
        )
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        let settings = builder
            .set_default("app.level", "info")?
            .set_default("server.bind", "127.0.0.1")?
            .set_default("server.port", 8000)?
            .set_default("server.database", "memory")?
            .set_default("server.jwt_expiration_hours", 24)?
            .build()?;

        let settings: Settings = settings.try_deserialize()?;
        if settings.server.jwt_secret.trim().is_empty() {
            return Err(ConfigError::Message(
                "server.jwt_secret must not be empty".to_string(),
            ));
        }
        if settings.server.jwt_expiration_hours <= 0 {
            return Err(ConfigError::Message(
                "server.jwt_expiration_hours must be positive".to_string(),
            ));
        }
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    fn parse(toml: &str) -> Result<Settings, ConfigError> {
        Settings::from_builder(
            Config::builder().add_source(File::from_str(toml, FileFormat::Toml)),
        )
    }

    #[test]
    fn defaults_fill_missing_keys() {
        let settings = parse("[server]\njwt_secret = \"s3cret\"\n").unwrap();
        assert_eq!(settings.app.level, "info");
        assert_eq!(settings.server.port, 8000);
        assert_eq!(settings.server.jwt_expiration_hours, 24);
        assert!(matches!(settings.server.database, Database::Memory));
        assert!(settings.server.cors_origins.is_empty());
    }

    #[test]
    fn sqlite_database_and_origins() {
        let settings = parse(
            r#"
            [app]
            level = "debug"

            [server]
            port = 9000
            jwt_secret = "s3cret"
            google_client_id = "client.apps.googleusercontent.com"
            cors_origins = ["http://localhost:5173"]
            database = { sqlite = "spendly.db" }
            "#,
        )
        .unwrap();
        assert!(matches!(settings.server.database, Database::Sqlite(ref path) if path == "spendly.db"));
        assert_eq!(settings.server.cors_origins, vec!["http://localhost:5173"]);
    }

    #[test]
    fn jwt_secret_is_required() {
        assert!(parse("[server]\njwt_secret = \"  \"\n").is_err());
        assert!(parse("[app]\nlevel = \"info\"\n").is_err());
    }
}
