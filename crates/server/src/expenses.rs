//! Expenses API endpoints

use api_types::expense::{ExpenseListQuery, ExpenseNew, ExpenseView, ExpensesCleared};
use axum::{Extension, Json, extract::State, http::StatusCode};
use engine::{Expense, ExpenseDraft, ExpenseQuery, Money, User};

use crate::{
    ServerError,
    extract::{self, Path, Query},
    server::ServerState,
};

pub(crate) fn expense_view(expense: Expense) -> ExpenseView {
    ExpenseView {
        id: expense.id,
        title: expense.title,
        amount: expense.amount.to_major(),
        category: expense.category.to_string(),
        date: Some(expense.date),
        created_at: expense.created_at,
    }
}

fn draft(payload: ExpenseNew) -> Result<ExpenseDraft, ServerError> {
    let amount = Money::from_major(payload.amount)?;
    Ok(ExpenseDraft::new(
        &payload.title,
        amount,
        &payload.category,
        payload.date,
    )?)
}

pub async fn list(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Query(query): Query<ExpenseListQuery>,
) -> Result<Json<Vec<ExpenseView>>, ServerError> {
    let query = ExpenseQuery::new(query.skip, query.limit);
    let expenses = state.engine.list_expenses(user.id, query).await?;

    Ok(Json(expenses.into_iter().map(expense_view).collect()))
}

pub async fn create(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    extract::Json(payload): extract::Json<ExpenseNew>,
) -> Result<(StatusCode, Json<ExpenseView>), ServerError> {
    let expense = state.engine.create_expense(user.id, draft(payload)?).await?;

    Ok((StatusCode::CREATED, Json(expense_view(expense))))
}

pub async fn get(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<ExpenseView>, ServerError> {
    let expense = state.engine.expense(user.id, id).await?;

    Ok(Json(expense_view(expense)))
}

pub async fn update(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    extract::Json(payload): extract::Json<ExpenseNew>,
) -> Result<Json<ExpenseView>, ServerError> {
    let expense = state
        .engine
        .update_expense(user.id, id, draft(payload)?)
        .await?;

    Ok(Json(expense_view(expense)))
}

pub async fn delete(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<ExpenseView>, ServerError> {
    let expense = state.engine.delete_expense(user.id, id).await?;

    Ok(Json(expense_view(expense)))
}

/// Inserts the demo data set.
pub async fn seed(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<ExpenseView>>, ServerError> {
    let expenses = state.engine.seed_expenses(user.id).await?;

    Ok(Json(expenses.into_iter().map(expense_view).collect()))
}

pub async fn clear(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
) -> Result<Json<ExpensesCleared>, ServerError> {
    let deleted = state.engine.clear_expenses(user.id).await?;

    Ok(Json(ExpensesCleared { deleted }))
}
