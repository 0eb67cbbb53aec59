use chrono::Utc;
use sea_orm::{ActiveValue, DatabaseTransaction, QueryFilter, TransactionTrait, prelude::*};

use crate::{EngineError, GoogleIdentity, ResultEngine, User, users};

use super::{Engine, with_tx};

impl Engine {
    /// Creates or refreshes the user behind a verified Google identity.
    ///
    /// Existing users are matched on the Google id only; name, picture and
    /// email are refreshed on every sign-in. An email already held by another
    /// account is a [`EngineError::Conflict`]. New users get default settings
    /// in the same transaction.
    pub async fn upsert_google_user(&self, identity: GoogleIdentity) -> ResultEngine<User> {
        let (user, created) = with_tx!(self, |db_tx| {
            let now = Utc::now();
            let existing = users::Entity::find()
                .filter(users::Column::GoogleId.eq(identity.google_id.as_str()))
                .one(&db_tx)
                .await?;
            let owner = existing.as_ref().map(|model| model.id);
            ensure_email_free(&db_tx, &identity.email, owner).await?;

            match existing {
                Some(model) => {
                    let mut active: users::ActiveModel = model.into();
                    active.email = ActiveValue::Set(identity.email);
                    active.name = ActiveValue::Set(identity.name);
                    active.picture = ActiveValue::Set(identity.picture);
                    active.updated_at = ActiveValue::Set(now);
                    let model = active.update(&db_tx).await?;
                    self.settings_row(&db_tx, model.id).await?;
                    Ok((User::from(model), false))
                }
                None => {
                    let model = users::ActiveModel {
                        id: ActiveValue::NotSet,
                        google_id: ActiveValue::Set(identity.google_id),
                        email: ActiveValue::Set(identity.email),
                        name: ActiveValue::Set(identity.name),
                        picture: ActiveValue::Set(identity.picture),
                        is_active: ActiveValue::Set(true),
                        created_at: ActiveValue::Set(now),
                        updated_at: ActiveValue::Set(now),
                    }
                    .insert(&db_tx)
                    .await?;
                    self.settings_row(&db_tx, model.id).await?;
                    Ok((User::from(model), true))
                }
            }
        })?;

        if created {
            tracing::info!(user_id = user.id, email = %user.email, "user registered");
        } else {
            tracing::debug!(user_id = user.id, "user signed in");
        }
        Ok(user)
    }

    /// Returns a user by id. Deactivated accounts are refused.
    pub async fn user(&self, user_id: i64) -> ResultEngine<User> {
        let user = users::Entity::find_by_id(user_id)
            .one(&self.database)
            .await?
            .map(User::from)
            .ok_or_else(|| EngineError::KeyNotFound(format!("user {user_id}")))?;
        if !user.is_active {
            return Err(EngineError::Unauthorized(format!(
                "user {user_id} is inactive"
            )));
        }
        Ok(user)
    }
}

async fn ensure_email_free(
    db_tx: &DatabaseTransaction,
    email: &str,
    owner: Option<i64>,
) -> ResultEngine<()> {
    let holder = users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .one(db_tx)
        .await?;
    match holder {
        Some(model) if Some(model.id) != owner => {
            tracing::warn!(
                user_id = model.id,
                "google sign-in with an email bound to another account"
            );
            Err(EngineError::Conflict(format!(
                "email {email} is linked to another account"
            )))
        }
        _ => Ok(()),
    }
}
