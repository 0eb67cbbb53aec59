use api_types::ErrorResponse;
use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

pub use auth::{Claims, JwtConfig};
pub use google::{GoogleTokenVerifier, TokenVerifier, VerifyError};
pub use server::{
    ServerConfig, ServerState, build_cors_layer, http_client, router, run, run_with_listener,
};

mod auth;
mod expenses;
mod extract;
mod google;
mod reports;
mod server;
mod settings;
mod user;

pub mod types {
    pub mod expense {
        pub use api_types::expense::{ExpenseListQuery, ExpenseNew, ExpenseView, ExpensesCleared};
    }

    pub mod settings {
        pub use api_types::settings::{Theme, UserSettings, UserSettingsUpdate};
    }

    pub mod report {
        pub use api_types::report::{CategoryReport, MonthlyReport, ReportSummary};
    }

    pub mod auth {
        pub use api_types::auth::{AuthResponse, GoogleTokenRequest, ProxyImage, UserView};
    }
}

#[derive(Debug)]
pub enum ServerError {
    Engine(EngineError),
    Unauthorized(String),
    /// Failure talking to a remote service; `status` is relayed to the client.
    Upstream {
        status: StatusCode,
        message: String,
    },
    /// A request the extractors could not decode.
    Rejected {
        status: StatusCode,
        message: String,
    },
    Generic(String),
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::Conflict(_) => StatusCode::CONFLICT,
        EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        EngineError::InvalidAmount(_)
        | EngineError::InvalidTitle(_)
        | EngineError::InvalidCategory(_)
        | EngineError::InvalidSettings(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => {
                (status_for_engine_error(&err), message_for_engine_error(err))
            }
            ServerError::Unauthorized(err) => (StatusCode::UNAUTHORIZED, err),
            ServerError::Upstream { status, message } => (status, message),
            ServerError::Rejected { status, message } => (status, message),
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

impl From<VerifyError> for ServerError {
    fn from(value: VerifyError) -> Self {
        match value {
            VerifyError::Transport(err) => {
                tracing::warn!("google token verification failed: {err}");
                Self::Unauthorized("Invalid Google token".to_string())
            }
            other => Self::Unauthorized(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_unauthorized_maps_to_401() {
        let res =
            ServerError::from(EngineError::Unauthorized("inactive".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn engine_not_found_maps_to_404() {
        let res = ServerError::from(EngineError::KeyNotFound("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn engine_conflict_maps_to_409() {
        let res = ServerError::from(EngineError::Conflict("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn engine_validation_maps_to_422() {
        for err in [
            EngineError::InvalidAmount("x".to_string()),
            EngineError::InvalidTitle("x".to_string()),
            EngineError::InvalidCategory("x".to_string()),
            EngineError::InvalidSettings("x".to_string()),
        ] {
            let res = ServerError::from(err).into_response();
            assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        }
    }

    #[test]
    fn database_errors_map_to_500() {
        let err = EngineError::Database(sea_orm_err());
        let res = ServerError::from(err).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn upstream_status_is_relayed() {
        let res = ServerError::Upstream {
            status: StatusCode::TOO_MANY_REQUESTS,
            message: "Image fetch failed".to_string(),
        }
        .into_response();
        assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn verify_errors_map_to_401() {
        let res = ServerError::from(VerifyError::Audience).into_response();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn generic_maps_to_400() {
        let res = ServerError::Generic("bad".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    fn sea_orm_err() -> engine::DbErr {
        engine::DbErr::Custom("boom".to_string())
    }
}
