use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Body of every non-2xx response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Plain acknowledgement, e.g. `{ "message": "pong" }`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

pub mod expense {
    use super::*;

    /// Request body for creating or replacing an expense.
    ///
    /// `amount` is a decimal in major units with at most two fractional
    /// digits. `date` defaults to today (UTC) when omitted.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct ExpenseNew {
        pub title: String,
        pub amount: f64,
        pub category: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub date: Option<NaiveDate>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct ExpenseView {
        pub id: i64,
        pub title: String,
        pub amount: f64,
        pub category: String,
        /// Missing on records created before expenses carried a date.
        #[serde(default)]
        pub date: Option<NaiveDate>,
        pub created_at: DateTime<Utc>,
    }

    /// Query string of `GET /expenses`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ExpenseListQuery {
        pub skip: Option<u64>,
        pub limit: Option<u64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpensesCleared {
        pub deleted: u64,
    }
}

pub mod settings {
    use super::*;

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

        pub fn toggled(self) -> Self {
            match self {
                Self::Light => Self::Dark,
                Self::Dark => Self::Light,
            }
        }
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct UserSettings {
        pub theme: Theme,
        pub currency: String,
    }

    /// Partial update: absent fields are left untouched.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct UserSettingsUpdate {
        pub theme: Option<Theme>,
        pub currency: Option<String>,
    }
}

pub mod report {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct CategoryReport {
        pub category: String,
        pub total_amount: f64,
        pub count: u64,
        /// Share of the grand total, rounded to one decimal.
        pub percentage: f64,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct MonthlyReport {
        /// `YYYY-MM`.
        pub month: String,
        pub total_amount: f64,
        pub count: u64,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct ReportSummary {
        pub total_amount: f64,
        pub total_count: u64,
        pub average_amount: f64,
        /// Top categories by amount.
        pub categories: Vec<CategoryReport>,
    }
}

pub mod auth {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GoogleTokenRequest {
        pub token: String,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct UserView {
        pub id: i64,
        pub email: String,
        pub name: String,
        pub picture: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AuthResponse {
        pub access_token: String,
        pub token_type: String,
        pub user: UserView,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ProxyImage {
        pub url: String,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        expense::{ExpenseNew, ExpenseView},
        settings::Theme,
    };

    #[test]
    fn expense_new_date_is_optional() {
        let parsed: ExpenseNew =
            serde_json::from_str(r#"{"title":"Coffee","amount":3.5,"category":"Food"}"#).unwrap();
        assert!(parsed.date.is_none());

        let parsed: ExpenseNew = serde_json::from_str(
            r#"{"title":"Coffee","amount":3.5,"category":"Food","date":"2024-03-01"}"#,
        )
        .unwrap();
        assert_eq!(parsed.date.unwrap().to_string(), "2024-03-01");
    }

    #[test]
    fn expense_view_tolerates_missing_date() {
        let parsed: ExpenseView = serde_json::from_str(
            r#"{"id":1,"title":"Tea","amount":2.0,"category":"Food","created_at":"2024-03-01T10:00:00Z"}"#,
        )
        .unwrap();
        assert!(parsed.date.is_none());
    }

    #[test]
    fn theme_uses_lowercase_names() {
        assert_eq!(serde_json::to_string(&Theme::Light).unwrap(), "\"light\"");
        assert!(serde_json::from_str::<Theme>("\"blue\"").is_err());
        assert_eq!(Theme::default(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }
}
