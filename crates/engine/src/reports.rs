//! Read-only aggregations over a user's expenses.
//!
//! The functions here are pure; `Engine` loads the rows and delegates.

use std::collections::{BTreeMap, HashMap};

use chrono::Datelike;

use crate::{Category, Expense, Money};

/// How many categories the summary carries.
pub const SUMMARY_TOP_CATEGORIES: usize = 5;

#[derive(Clone, Debug, PartialEq)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: Money,
    pub count: u64,
    /// Share of the grand total in percent, rounded to one decimal.
    pub percentage: f64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthTotal {
    pub year: i32,
    pub month: u32,
    pub total: Money,
    pub count: u64,
}

impl MonthTotal {
    /// `YYYY-MM`
    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Summary {
    pub total: Money,
    pub count: u64,
    pub average: Money,
    pub top_categories: Vec<CategoryTotal>,
}

pub fn summarize(expenses: &[Expense]) -> Summary {
    let total: Money = expenses.iter().map(|e| e.amount).sum();
    let count = expenses.len() as u64;
    let mut top_categories = by_category(expenses);
    top_categories.truncate(SUMMARY_TOP_CATEGORIES);

    Summary {
        total,
        count,
        average: total.average(count),
        top_categories,
    }
}

/// Per-category totals, largest first; ties are broken by display order.
pub fn by_category(expenses: &[Expense]) -> Vec<CategoryTotal> {
    let mut buckets: HashMap<Category, (Money, u64)> = HashMap::new();
    for expense in expenses {
        let entry = buckets.entry(expense.category).or_insert((Money::ZERO, 0));
        entry.0 += expense.amount;
        entry.1 += 1;
    }

    let grand_total: Money = buckets.values().map(|(total, _)| *total).sum();

    let mut rows: Vec<CategoryTotal> = buckets
        .into_iter()
        .map(|(category, (total, count))| CategoryTotal {
            category,
            total,
            count,
            percentage: percentage(total, grand_total),
        })
        .collect();

    rows.sort_by(|a, b| b.total.cmp(&a.total).then(a.category.cmp(&b.category)));
    rows
}

/// Per-month totals keyed on the expense date, oldest first.
pub fn by_month(expenses: &[Expense]) -> Vec<MonthTotal> {
    let mut buckets: BTreeMap<(i32, u32), (Money, u64)> = BTreeMap::new();
    for expense in expenses {
        let key = (expense.date.year(), expense.date.month());
        let entry = buckets.entry(key).or_insert((Money::ZERO, 0));
        entry.0 += expense.amount;
        entry.1 += 1;
    }

    buckets
        .into_iter()
        .map(|((year, month), (total, count))| MonthTotal {
            year,
            month,
            total,
            count,
        })
        .collect()
}

fn percentage(part: Money, whole: Money) -> f64 {
    if whole.minor() == 0 {
        return 0.0;
    }
    let raw = part.minor() as f64 * 100.0 / whole.minor() as f64;
    (raw * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};

    use super::*;

    fn expense(id: i64, amount: i64, category: Category, date: (i32, u32, u32)) -> Expense {
        let created_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Expense {
            id,
            user_id: 1,
            title: format!("expense {id}"),
            amount: Money::new(amount),
            category,
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            created_at,
            updated_at: created_at,
        }
    }

    fn seed() -> Vec<Expense> {
        vec![
            expense(1, 15075, Category::Food, (2024, 1, 3)),
            expense(2, 8000, Category::Entertainment, (2024, 1, 9)),
            expense(3, 99999, Category::Health, (2024, 2, 1)),
            expense(4, 49900, Category::Utilities, (2023, 12, 30)),
            expense(5, 8950, Category::Food, (2024, 2, 14)),
        ]
    }

    #[test]
    fn summary_of_empty_set_is_zero() {
        let summary = summarize(&[]);
        assert_eq!(summary.total, Money::ZERO);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.average, Money::ZERO);
        assert!(summary.top_categories.is_empty());
    }

    #[test]
    fn summary_totals_and_average() {
        let summary = summarize(&seed());
        assert_eq!(summary.total.minor(), 181_924);
        assert_eq!(summary.count, 5);
        // 181924 / 5 = 36384.8
        assert_eq!(summary.average.minor(), 36_385);
        assert_eq!(summary.top_categories.len(), 4);
        assert_eq!(summary.top_categories[0].category, Category::Health);
    }

    #[test]
    fn categories_sorted_with_percentages() {
        let rows = by_category(&seed());
        let names: Vec<_> = rows.iter().map(|r| r.category).collect();
        assert_eq!(
            names,
            vec![
                Category::Health,
                Category::Utilities,
                Category::Food,
                Category::Entertainment
            ]
        );

        let food = &rows[2];
        assert_eq!(food.total.minor(), 24_025);
        assert_eq!(food.count, 2);
        assert_eq!(food.percentage, 13.2);

        let sum: f64 = rows.iter().map(|r| r.percentage).sum();
        assert!((sum - 100.0).abs() < 0.5);
    }

    #[test]
    fn zero_totals_have_zero_percentage() {
        let rows = by_category(&[expense(1, 0, Category::Other, (2024, 1, 1))]);
        assert_eq!(rows[0].percentage, 0.0);
    }

    #[test]
    fn summary_keeps_top_five() {
        let expenses: Vec<_> = Category::ALL
            .into_iter()
            .enumerate()
            .map(|(i, c)| expense(i as i64, 100 * (i as i64 + 1), c, (2024, 3, 1)))
            .collect();
        let summary = summarize(&expenses);
        assert_eq!(summary.top_categories.len(), SUMMARY_TOP_CATEGORIES);
        assert_eq!(summary.top_categories[0].category, Category::Other);
    }

    #[test]
    fn months_are_chronological() {
        let rows = by_month(&seed());
        let labels: Vec<_> = rows.iter().map(MonthTotal::label).collect();
        assert_eq!(labels, vec!["2023-12", "2024-01", "2024-02"]);
        assert_eq!(rows[1].count, 2);
        assert_eq!(rows[1].total.minor(), 23_075);
        assert_eq!(rows[2].total.minor(), 108_949);
    }

    #[test]
    fn totals_of_largest_amounts_are_exact() {
        let max = Money::MAX.minor();
        let expenses = vec![
            expense(1, max, Category::Food, (2024, 1, 1)),
            expense(2, max, Category::Food, (2024, 1, 2)),
        ];

        let summary = summarize(&expenses);
        assert_eq!(summary.total.minor(), 2 * max);
        assert_eq!(summary.average, Money::MAX);

        let rows = by_category(&expenses);
        assert_eq!(rows[0].total.minor(), 2 * max);
        assert_eq!(rows[0].percentage, 100.0);
        assert_eq!(by_month(&expenses)[0].total.minor(), 2 * max);
    }
}
