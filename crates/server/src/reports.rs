//! Reports API endpoints

use api_types::report::{CategoryReport, MonthlyReport, ReportSummary};
use axum::{Extension, Json, extract::State};
use engine::{CategoryTotal, MonthTotal, User};

use crate::{ServerError, server::ServerState};

fn category_report(row: CategoryTotal) -> CategoryReport {
    CategoryReport {
        category: row.category.to_string(),
        total_amount: row.total.to_major(),
        count: row.count,
        percentage: row.percentage,
    }
}

fn monthly_report(row: MonthTotal) -> MonthlyReport {
    MonthlyReport {
        month: row.label(),
        total_amount: row.total.to_major(),
        count: row.count,
    }
}

pub async fn summary(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
) -> Result<Json<ReportSummary>, ServerError> {
    let summary = state.engine.summary(user.id).await?;

    Ok(Json(ReportSummary {
        total_amount: summary.total.to_major(),
        total_count: summary.count,
        average_amount: summary.average.to_major(),
        categories: summary
            .top_categories
            .into_iter()
            .map(category_report)
            .collect(),
    }))
}

pub async fn categories(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<CategoryReport>>, ServerError> {
    let rows = state.engine.category_breakdown(user.id).await?;

    Ok(Json(rows.into_iter().map(category_report).collect()))
}

pub async fn monthly(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<MonthlyReport>>, ServerError> {
    let rows = state.engine.monthly_breakdown(user.id).await?;

    Ok(Json(rows.into_iter().map(monthly_report).collect()))
}
