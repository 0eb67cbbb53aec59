use api_types::{
    ErrorResponse, Message,
    auth::{AuthResponse, GoogleTokenRequest, UserView},
    expense::{ExpenseListQuery, ExpenseNew, ExpenseView, ExpensesCleared},
    report::{CategoryReport, MonthlyReport, ReportSummary},
    settings::{UserSettings, UserSettingsUpdate},
};
use reqwest::{Method, StatusCode, Url};
use serde::{Serialize, de::DeserializeOwned};

use crate::error::{AppError, Result};

/// Page size used when the dashboard loads expenses.
pub const LIST_LIMIT: u64 = 100;

#[derive(Debug)]
pub enum ClientError {
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict(String),
    Validation(String),
    Server(String),
    Transport(reqwest::Error),
}

impl ClientError {
    fn from_status(status: StatusCode, body: String) -> Self {
        match status.as_u16() {
            401 => ClientError::Unauthorized,
            403 => ClientError::Forbidden,
            404 => ClientError::NotFound,
            409 => ClientError::Conflict(body),
            422 => ClientError::Validation(body),
            _ => ClientError::Server(body),
        }
    }

    /// Text suitable for a toast or an inline error line.
    pub fn message(&self) -> String {
        match self {
            ClientError::Unauthorized => "Session expired, please sign in again".to_string(),
            ClientError::Forbidden => "Not allowed".to_string(),
            ClientError::NotFound => "Not found".to_string(),
            ClientError::Conflict(msg) | ClientError::Validation(msg) | ClientError::Server(msg) => {
                msg.clone()
            }
            ClientError::Transport(err) => format!("Cannot reach server: {err}"),
        }
    }
}

type ClientResult<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
    token: Option<String>,
}

impl Client {
    pub fn new(base_url: &str) -> Result<Self> {
        // Relative joins drop the last path segment unless it ends with a slash.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url = Url::parse(&normalized)
            .map_err(|err| AppError::InvalidUrl(format!("{base_url}: {err}")))?;
        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
            token: None,
        })
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    pub fn clear_token(&mut self) {
        self.token = None;
    }

    async fn send<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let endpoint = self
            .base_url
            .join(path)
            .map_err(|err| ClientError::Server(format!("invalid base_url: {err}")))?;

        let mut request = self.http.request(method, endpoint);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let res = request.send().await.map_err(ClientError::Transport)?;

        if res.status().is_success() {
            return res.json::<T>().await.map_err(ClientError::Transport);
        }

        let status = res.status();
        let body = res
            .json::<ErrorResponse>()
            .await
            .map(|err| err.error)
            .unwrap_or_else(|_| "unknown error".to_string());
        Err(ClientError::from_status(status, body))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send::<(), T>(Method::GET, path, None).await
    }

    pub async fn google(&self, id_token: &str) -> ClientResult<AuthResponse> {
        let payload = GoogleTokenRequest {
            token: id_token.to_string(),
        };
        self.send(Method::POST, "google", Some(&payload)).await
    }

    pub async fn me(&self) -> ClientResult<UserView> {
        self.get("me").await
    }

    pub async fn logout(&self) -> ClientResult<Message> {
        self.send::<(), _>(Method::POST, "logout", None).await
    }

    pub async fn list_expenses(&self, query: ExpenseListQuery) -> ClientResult<Vec<ExpenseView>> {
        let skip = query.skip.unwrap_or(0);
        let limit = query.limit.unwrap_or(LIST_LIMIT);
        self.get(&format!("expenses?skip={skip}&limit={limit}"))
            .await
    }

    pub async fn create_expense(&self, payload: &ExpenseNew) -> ClientResult<ExpenseView> {
        self.send(Method::POST, "expenses", Some(payload)).await
    }

    pub async fn update_expense(&self, id: i64, payload: &ExpenseNew) -> ClientResult<ExpenseView> {
        self.send(Method::PUT, &format!("expenses/{id}"), Some(payload))
            .await
    }

    pub async fn delete_expense(&self, id: i64) -> ClientResult<ExpenseView> {
        self.send::<(), _>(Method::DELETE, &format!("expenses/{id}"), None)
            .await
    }

    pub async fn seed_expenses(&self) -> ClientResult<Vec<ExpenseView>> {
        self.send::<(), _>(Method::POST, "expenses/seed", None).await
    }

    pub async fn clear_expenses(&self) -> ClientResult<ExpensesCleared> {
        self.send::<(), _>(Method::DELETE, "expenses/clear", None)
            .await
    }

    pub async fn settings(&self) -> ClientResult<UserSettings> {
        self.get("expenses/settings").await
    }

    pub async fn update_settings(&self, payload: &UserSettingsUpdate) -> ClientResult<UserSettings> {
        self.send(Method::PUT, "expenses/settings", Some(payload))
            .await
    }

    pub async fn summary(&self) -> ClientResult<ReportSummary> {
        self.get("expenses/reports/summary").await
    }

    pub async fn categories(&self) -> ClientResult<Vec<CategoryReport>> {
        self.get("expenses/reports/categories").await
    }

    pub async fn monthly(&self) -> ClientResult<Vec<MonthlyReport>> {
        self.get("expenses/reports/monthly").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_map_to_variants() {
        assert!(matches!(
            ClientError::from_status(StatusCode::UNAUTHORIZED, String::new()),
            ClientError::Unauthorized
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::NOT_FOUND, String::new()),
            ClientError::NotFound
        ));
        match ClientError::from_status(StatusCode::UNPROCESSABLE_ENTITY, "bad amount".to_string()) {
            ClientError::Validation(msg) => assert_eq!(msg, "bad amount"),
            other => panic!("unexpected {other:?}"),
        }
        match ClientError::from_status(StatusCode::BAD_GATEWAY, "down".to_string()) {
            err @ ClientError::Server(_) => assert_eq!(err.message(), "down"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn bad_base_url_is_rejected() {
        assert!(matches!(Client::new("not a url"), Err(AppError::InvalidUrl(_))));
        let client = Client::new("http://127.0.0.1:8000/api").unwrap();
        assert_eq!(client.base_url.as_str(), "http://127.0.0.1:8000/api/");
        assert_eq!(
            client.base_url.join("expenses/seed").unwrap().as_str(),
            "http://127.0.0.1:8000/api/expenses/seed"
        );
    }
}
