//! Preferences and session remembered between runs.
//!
//! Display preferences stored here take precedence over the ones returned by
//! the server.

use std::{fs, path::Path};

use api_types::settings::Theme;
use serde::{Deserialize, Serialize};

use crate::error::Result;

const DEFAULT_STATE_PATH: &str = "config/tui_state.json";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct LocalState {
    /// Currency symbol, e.g. `€`.
    pub currency: Option<String>,
    pub theme: Option<Theme>,
    pub access_token: Option<String>,
}

impl LocalState {
    pub fn load(path: &str) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let parent = Path::new(path).parent();
        if let Some(parent) = parent {
            fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_string_pretty(self)?;
        fs::write(path, payload)?;
        Ok(())
    }

    pub fn set_preferences(&mut self, currency: &str, theme: Theme) {
        self.currency = Some(currency.to_string());
        self.theme = Some(theme);
    }

    pub fn clear_session(&mut self) {
        self.access_token = None;
    }
}

pub fn default_state_path() -> &'static str {
    DEFAULT_STATE_PATH
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_in(dir: &tempfile::TempDir) -> String {
        dir.path()
            .join("nested")
            .join("state.json")
            .to_string_lossy()
            .into_owned()
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let state = LocalState::load(&path_in(&dir)).unwrap();
        assert_eq!(state, LocalState::default());
    }

    #[test]
    fn save_then_load_keeps_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = path_in(&dir);

        let mut state = LocalState::default();
        state.set_preferences("€", Theme::Light);
        state.access_token = Some("jwt".to_string());
        state.save(&path).unwrap();

        let loaded = LocalState::load(&path).unwrap();
        assert_eq!(loaded, state);

        let mut loaded = loaded;
        loaded.clear_session();
        loaded.save(&path).unwrap();
        let reloaded = LocalState::load(&path).unwrap();
        assert_eq!(reloaded.access_token, None);
        assert_eq!(reloaded.currency.as_deref(), Some("€"));
    }

    #[test]
    fn partial_files_are_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, r#"{ "theme": "light" }"#).unwrap();

        let state = LocalState::load(&path.to_string_lossy()).unwrap();
        assert_eq!(state.theme, Some(Theme::Light));
        assert_eq!(state.currency, None);
    }

    #[test]
    fn corrupt_files_are_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "not json").unwrap();
        assert!(LocalState::load(&path.to_string_lossy()).is_err());
    }
}
