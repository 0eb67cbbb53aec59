use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, TransactionTrait, prelude::*};

use crate::{ResultEngine, SettingsPatch, UserSettings, settings};

use super::{Engine, with_tx};

impl Engine {
    /// Loads the row for `user_id`, inserting the defaults when missing.
    pub(super) async fn settings_row(
        &self,
        db: &impl ConnectionTrait,
        user_id: i64,
    ) -> ResultEngine<settings::Model> {
        let existing = settings::Entity::find()
            .filter(settings::Column::UserId.eq(user_id))
            .one(db)
            .await?;
        match existing {
            Some(model) => Ok(model),
            None => Ok(settings::ActiveModel::defaults_for(user_id, Utc::now())
                .insert(db)
                .await?),
        }
    }

    /// Returns the user's settings, creating the defaults on first access.
    pub async fn settings(&self, user_id: i64) -> ResultEngine<UserSettings> {
        with_tx!(self, |db_tx| {
            let model = self.settings_row(&db_tx, user_id).await?;
            Ok(UserSettings::from(model))
        })
    }

    /// Applies `patch` and returns the stored result.
    pub async fn update_settings(
        &self,
        user_id: i64,
        patch: SettingsPatch,
    ) -> ResultEngine<UserSettings> {
        let updated = with_tx!(self, |db_tx| {
            let model = self.settings_row(&db_tx, user_id).await?;
            let next = patch.apply(UserSettings::from(model.clone()));

            let mut active: settings::ActiveModel = model.into();
            active.theme = ActiveValue::Set(next.theme.as_str().to_string());
            active.currency = ActiveValue::Set(next.currency.symbol().to_string());
            active.updated_at = ActiveValue::Set(Utc::now());
            Ok(UserSettings::from(active.update(&db_tx).await?))
        })?;
        tracing::debug!(
            user_id,
            theme = updated.theme.as_str(),
            currency = updated.currency.code(),
            "settings updated"
        );
        Ok(updated)
    }
}
