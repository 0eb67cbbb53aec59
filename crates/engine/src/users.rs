//! Users table.
//!
//! Users are created on their first Google sign-in and identified by the
//! stable Google subject id.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub google_id: String,
    pub email: String,
    pub name: String,
    pub picture: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Identity asserted by a verified Google ID token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GoogleIdentity {
    pub google_id: String,
    pub email: String,
    pub name: String,
    pub picture: Option<String>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub google_id: String,
    #[sea_orm(unique)]
    pub email: String,
    pub name: String,
    pub picture: Option<String>,
    pub is_active: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::expenses::Entity")]
    Expenses,
    #[sea_orm(has_one = "super::settings::Entity")]
    Settings,
}

impl Related<super::expenses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expenses.def()
    }
}

impl Related<super::settings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Settings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for User {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            google_id: model.google_id,
            email: model.email,
            name: model.name,
            picture: model.picture,
            is_active: model.is_active,
            created_at: model.created_at,
        }
    }
}
