//! Per-user display preferences.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};

use crate::{Currency, EngineError, ResultEngine};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl TryFrom<&str> for Theme {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(EngineError::InvalidSettings(format!(
                "invalid theme: {other}"
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSettings {
    pub theme: Theme,
    pub currency: Currency,
}

/// Partial settings update; `None` keeps the stored value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SettingsPatch {
    pub theme: Option<Theme>,
    pub currency: Option<Currency>,
}

impl SettingsPatch {
    /// Parses raw strings as received from clients.
    pub fn parse(theme: Option<&str>, currency: Option<&str>) -> ResultEngine<Self> {
        Ok(Self {
            theme: theme.map(Theme::try_from).transpose()?,
            currency: currency.map(Currency::try_from).transpose()?,
        })
    }

    pub fn apply(self, settings: UserSettings) -> UserSettings {
        UserSettings {
            theme: self.theme.unwrap_or(settings.theme),
            currency: self.currency.unwrap_or(settings.currency),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "user_settings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub user_id: i64,
    pub theme: String,
    pub currency: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    pub(crate) fn defaults_for(user_id: i64, now: DateTime<Utc>) -> Self {
        let defaults = UserSettings::default();
        Self {
            id: ActiveValue::NotSet,
            user_id: ActiveValue::Set(user_id),
            theme: ActiveValue::Set(defaults.theme.as_str().to_string()),
            currency: ActiveValue::Set(defaults.currency.symbol().to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
    }
}

impl From<Model> for UserSettings {
    /// Unknown stored values fall back to the defaults.
    fn from(model: Model) -> Self {
        Self {
            theme: Theme::try_from(model.theme.as_str()).unwrap_or_default(),
            currency: Currency::try_from(model.currency.as_str()).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_keeps_missing_fields() {
        let current = UserSettings {
            theme: Theme::Light,
            currency: Currency::Usd,
        };
        let patch = SettingsPatch::parse(None, Some("€")).unwrap();
        let updated = patch.apply(current);
        assert_eq!(updated.theme, Theme::Light);
        assert_eq!(updated.currency, Currency::Eur);
    }

    #[test]
    fn patch_rejects_unknown_values() {
        assert!(SettingsPatch::parse(Some("sepia"), None).is_err());
        assert!(SettingsPatch::parse(None, Some("¥")).is_err());
    }

    #[test]
    fn defaults_are_dark_rupee() {
        let defaults = UserSettings::default();
        assert_eq!(defaults.theme, Theme::Dark);
        assert_eq!(defaults.currency.symbol(), "₹");
    }
}
