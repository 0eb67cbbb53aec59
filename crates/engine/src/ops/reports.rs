use crate::{
    ResultEngine,
    reports::{self, CategoryTotal, MonthTotal, Summary},
};

use super::Engine;

impl Engine {
    /// Totals, count, average and the top categories of the user.
    pub async fn summary(&self, user_id: i64) -> ResultEngine<Summary> {
        let expenses = self.all_expenses(user_id).await?;
        Ok(reports::summarize(&expenses))
    }

    pub async fn category_breakdown(&self, user_id: i64) -> ResultEngine<Vec<CategoryTotal>> {
        let expenses = self.all_expenses(user_id).await?;
        Ok(reports::by_category(&expenses))
    }

    pub async fn monthly_breakdown(&self, user_id: i64) -> ResultEngine<Vec<MonthTotal>> {
        let expenses = self.all_expenses(user_id).await?;
        Ok(reports::by_month(&expenses))
    }
}
