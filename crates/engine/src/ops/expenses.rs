use chrono::Utc;
use sea_orm::{
    ActiveValue, DatabaseTransaction, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
    prelude::*,
};

use crate::{
    Category, EngineError, Expense, ExpenseDraft, ExpenseQuery, Money, ResultEngine, expenses,
};

use super::{Engine, with_tx};

/// Demo rows inserted by [`Engine::seed_expenses`].
const SEED_EXPENSES: [(&str, i64, Category); 5] = [
    ("Groceries", 15075, Category::Food),
    ("Movie Night", 8000, Category::Entertainment),
    ("Gym Membership", 99999, Category::Health),
    ("Internet Bill", 49900, Category::Utilities),
    ("Coffee", 8950, Category::Food),
];

impl Engine {
    async fn require_expense(
        &self,
        db: &impl ConnectionTrait,
        user_id: i64,
        expense_id: i64,
    ) -> ResultEngine<expenses::Model> {
        expenses::Entity::find_by_id(expense_id)
            .filter(expenses::Column::UserId.eq(user_id))
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound(format!("expense {expense_id}")))
    }

    async fn insert_expense(
        &self,
        db_tx: &DatabaseTransaction,
        user_id: i64,
        draft: ExpenseDraft,
    ) -> ResultEngine<Expense> {
        let model = expenses::ActiveModel::from_draft(user_id, draft, Utc::now())
            .insert(db_tx)
            .await?;
        Expense::try_from(model)
    }

    /// Creates an expense owned by `user_id`.
    pub async fn create_expense(&self, user_id: i64, draft: ExpenseDraft) -> ResultEngine<Expense> {
        let expense = with_tx!(self, |db_tx| {
            self.insert_expense(&db_tx, user_id, draft).await
        })?;
        tracing::debug!(user_id, expense_id = expense.id, "expense created");
        Ok(expense)
    }

    /// Lists the user's expenses, most recent date first.
    pub async fn list_expenses(
        &self,
        user_id: i64,
        query: ExpenseQuery,
    ) -> ResultEngine<Vec<Expense>> {
        expenses::Entity::find()
            .filter(expenses::Column::UserId.eq(user_id))
            .order_by_desc(expenses::Column::Date)
            .order_by_desc(expenses::Column::Id)
            .offset(query.skip)
            .limit(query.limit)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Expense::try_from)
            .collect()
    }

    /// Every expense of the user, unpaged. Used by reports.
    pub(super) async fn all_expenses(&self, user_id: i64) -> ResultEngine<Vec<Expense>> {
        expenses::Entity::find()
            .filter(expenses::Column::UserId.eq(user_id))
            .order_by_asc(expenses::Column::Date)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Expense::try_from)
            .collect()
    }

    pub async fn expense(&self, user_id: i64, expense_id: i64) -> ResultEngine<Expense> {
        let model = self
            .require_expense(&self.database, user_id, expense_id)
            .await?;
        Expense::try_from(model)
    }

    /// Replaces title, amount, category and date. `created_at` is preserved.
    ///
    /// A draft without a date keeps the stored one.
    pub async fn update_expense(
        &self,
        user_id: i64,
        expense_id: i64,
        draft: ExpenseDraft,
    ) -> ResultEngine<Expense> {
        with_tx!(self, |db_tx| {
            let model = self.require_expense(&db_tx, user_id, expense_id).await?;
            let mut active: expenses::ActiveModel = model.into();
            active.title = ActiveValue::Set(draft.title);
            active.amount_minor = ActiveValue::Set(draft.amount.minor());
            active.category = ActiveValue::Set(draft.category.as_str().to_string());
            if let Some(date) = draft.date {
                active.date = ActiveValue::Set(date);
            }
            active.updated_at = ActiveValue::Set(Utc::now());
            let updated = active.update(&db_tx).await?;
            Expense::try_from(updated)
        })
    }

    /// Deletes the expense and returns it as it was.
    pub async fn delete_expense(&self, user_id: i64, expense_id: i64) -> ResultEngine<Expense> {
        with_tx!(self, |db_tx| {
            let model = self.require_expense(&db_tx, user_id, expense_id).await?;
            let expense = Expense::try_from(model.clone())?;
            model.delete(&db_tx).await?;
            Ok(expense)
        })
    }

    /// Inserts the demo data set and returns the inserted rows.
    pub async fn seed_expenses(&self, user_id: i64) -> ResultEngine<Vec<Expense>> {
        let seeded = with_tx!(self, |db_tx| {
            let mut seeded = Vec::with_capacity(SEED_EXPENSES.len());
            for (title, amount, category) in SEED_EXPENSES {
                let draft = ExpenseDraft {
                    title: title.to_string(),
                    amount: Money::new(amount),
                    category,
                    date: None,
                };
                seeded.push(self.insert_expense(&db_tx, user_id, draft).await?);
            }
            Ok(seeded)
        })?;
        tracing::info!(user_id, count = seeded.len(), "seeded demo expenses");
        Ok(seeded)
    }

    /// Deletes every expense of the user, returning how many were removed.
    pub async fn clear_expenses(&self, user_id: i64) -> ResultEngine<u64> {
        let result = expenses::Entity::delete_many()
            .filter(expenses::Column::UserId.eq(user_id))
            .exec(&self.database)
            .await?;
        tracing::info!(user_id, deleted = result.rows_affected, "cleared expenses");
        Ok(result.rows_affected)
    }
}
