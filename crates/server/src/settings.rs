//! User settings endpoints, served on both `/expenses/settings` and `/user-settings`.

use api_types::settings::{Theme, UserSettings, UserSettingsUpdate};
use axum::{Extension, Json, extract::State};
use engine::{SettingsPatch, User};

use crate::{ServerError, extract, server::ServerState};

fn settings_view(settings: engine::UserSettings) -> UserSettings {
    UserSettings {
        theme: match settings.theme {
            engine::Theme::Light => Theme::Light,
            engine::Theme::Dark => Theme::Dark,
        },
        currency: settings.currency.symbol().to_string(),
    }
}

pub async fn get(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
) -> Result<Json<UserSettings>, ServerError> {
    let settings = state.engine.settings(user.id).await?;

    Ok(Json(settings_view(settings)))
}

pub async fn update(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    extract::Json(payload): extract::Json<UserSettingsUpdate>,
) -> Result<Json<UserSettings>, ServerError> {
    let patch = SettingsPatch::parse(
        payload.theme.map(Theme::as_str),
        payload.currency.as_deref(),
    )?;
    let settings = state.engine.update_settings(user.id, patch).await?;

    Ok(Json(settings_view(settings)))
}
