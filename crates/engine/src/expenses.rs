//! Expense records.
//!
//! An `Expense` is a single spending entry owned by one user. Identity and
//! timestamps are always assigned here, never by the caller.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};

use crate::{Category, EngineError, Money, ResultEngine};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expense {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub amount: Money,
    pub category: Category,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for creating or replacing an expense.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpenseDraft {
    pub title: String,
    pub amount: Money,
    pub category: Category,
    pub date: Option<NaiveDate>,
}

impl ExpenseDraft {
    /// Validates raw input.
    ///
    /// The title is trimmed and must not be empty, the amount must not be
    /// negative and the category must belong to the closed set.
    pub fn new(
        title: &str,
        amount: Money,
        category: &str,
        date: Option<NaiveDate>,
    ) -> ResultEngine<Self> {
        let title = title.trim();
        if title.is_empty() {
            return Err(EngineError::InvalidTitle(
                "title must not be empty".to_string(),
            ));
        }
        if amount.is_negative() {
            return Err(EngineError::InvalidAmount(
                "amount must not be negative".to_string(),
            ));
        }
        let category = Category::try_from(category)?;

        Ok(Self {
            title: title.to_string(),
            amount,
            category,
            date,
        })
    }
}

/// Paging parameters for listing expenses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExpenseQuery {
    pub skip: u64,
    pub limit: u64,
}

impl ExpenseQuery {
    pub const DEFAULT_LIMIT: u64 = 100;
    pub const MAX_LIMIT: u64 = 500;

    pub fn new(skip: Option<u64>, limit: Option<u64>) -> Self {
        Self {
            skip: skip.unwrap_or(0),
            limit: limit
                .unwrap_or(Self::DEFAULT_LIMIT)
                .clamp(1, Self::MAX_LIMIT),
        }
    }
}

impl Default for ExpenseQuery {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub amount_minor: i64,
    pub category: String,
    pub date: Date,
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
    /// New row for `user_id`; `now` stamps both timestamps and the default date.
    pub(crate) fn from_draft(user_id: i64, draft: ExpenseDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: ActiveValue::NotSet,
            user_id: ActiveValue::Set(user_id),
            title: ActiveValue::Set(draft.title),
            amount_minor: ActiveValue::Set(draft.amount.minor()),
            category: ActiveValue::Set(draft.category.as_str().to_string()),
            date: ActiveValue::Set(draft.date.unwrap_or_else(|| now.date_naive())),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
    }
}

impl TryFrom<Model> for Expense {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            user_id: model.user_id,
            title: model.title,
            amount: Money::new(model.amount_minor),
            category: Category::try_from(model.category.as_str())?,
            date: model.date,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_trims_and_validates() {
        let draft = ExpenseDraft::new("  Coffee ", Money::new(8950), "Food", None).unwrap();
        assert_eq!(draft.title, "Coffee");
        assert_eq!(draft.category, Category::Food);

        assert!(matches!(
            ExpenseDraft::new("   ", Money::new(1), "Food", None),
            Err(EngineError::InvalidTitle(_))
        ));
        assert!(matches!(
            ExpenseDraft::new("Coffee", Money::new(-1), "Food", None),
            Err(EngineError::InvalidAmount(_))
        ));
        assert!(matches!(
            ExpenseDraft::new("Coffee", Money::new(1), "Drinks", None),
            Err(EngineError::InvalidCategory(_))
        ));
    }

    #[test]
    fn zero_amount_is_allowed() {
        assert!(ExpenseDraft::new("Free sample", Money::ZERO, "Other", None).is_ok());
    }

    #[test]
    fn query_clamps_limit() {
        assert_eq!(ExpenseQuery::new(None, None).limit, ExpenseQuery::DEFAULT_LIMIT);
        assert_eq!(ExpenseQuery::new(Some(5), Some(0)).limit, 1);
        assert_eq!(ExpenseQuery::new(None, Some(10_000)).limit, ExpenseQuery::MAX_LIMIT);
        assert_eq!(ExpenseQuery::new(Some(5), None).skip, 5);
    }
}
