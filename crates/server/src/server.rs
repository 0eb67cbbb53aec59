use axum::{
    Router,
    extract::{Request, State},
    http::{
        HeaderValue, Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use std::{sync::Arc, time::Duration};

use crate::{
    GoogleTokenVerifier, JwtConfig, ServerError, TokenVerifier, expenses, reports, settings, user,
};
use engine::{Engine, EngineError};

const HTTP_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
    pub jwt: JwtConfig,
    pub google_client_id: String,
    /// Allowed CORS origins; empty allows any.
    pub cors_origins: Vec<String>,
}

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    pub jwt: Arc<JwtConfig>,
    pub verifier: Arc<dyn TokenVerifier>,
    pub http: reqwest::Client,
}

/// Outbound client shared by token verification and the image proxy.
pub fn http_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder().timeout(HTTP_TIMEOUT).build()
}

impl ServerState {
    pub fn new(
        engine: Engine,
        jwt: JwtConfig,
        verifier: Arc<dyn TokenVerifier>,
        http: reqwest::Client,
    ) -> Self {
        Self {
            engine: Arc::new(engine),
            jwt: Arc::new(jwt),
            verifier,
            http,
        }
    }
}

async fn auth(
    auth_header: Option<TypedHeader<Authorization<Bearer>>>,
    State(state): State<ServerState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let Some(TypedHeader(Authorization(bearer))) = auth_header else {
        return Err(ServerError::Unauthorized(
            "Missing bearer token".to_string(),
        ));
    };

    let claims = state
        .jwt
        .validate(bearer.token())
        .map_err(|_| ServerError::Unauthorized("Invalid or expired token".to_string()))?;
    let user_id = claims
        .user_id()
        .ok_or_else(|| ServerError::Unauthorized("Invalid token subject".to_string()))?;

    let user = match state.engine.user(user_id).await {
        Ok(user) => user,
        Err(EngineError::KeyNotFound(_)) => {
            return Err(ServerError::Unauthorized("User not found".to_string()));
        }
        Err(err) => return Err(err.into()),
    };

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Builds the CORS layer; an empty origin list allows any origin.
pub fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.is_empty() || origins.iter().any(|o| o == "*") {
        AllowOrigin::from(Any)
    } else {
        let origins: Vec<_> = origins
            .iter()
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(err) => {
                    tracing::warn!("ignoring invalid CORS origin {origin:?}: {err}");
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
}

pub fn router(state: ServerState, cors: CorsLayer) -> Router {
    let protected = Router::new()
        .route("/me", get(user::me))
        .route(
            "/expenses",
            get(expenses::list).post(expenses::create),
        )
        .route("/expenses/seed", post(expenses::seed))
        .route("/expenses/clear", axum::routing::delete(expenses::clear))
        .route(
            "/expenses/settings",
            get(settings::get).put(settings::update),
        )
        .route("/user-settings", get(settings::get).put(settings::update))
        .route("/expenses/reports/summary", get(reports::summary))
        .route("/expenses/reports/categories", get(reports::categories))
        .route("/expenses/reports/monthly", get(reports::monthly))
        .route(
            "/expenses/{id}",
            get(expenses::get)
                .put(expenses::update)
                .delete(expenses::delete),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), auth));

    Router::new()
        .route("/ping", get(user::ping))
        .route("/google", post(user::google))
        .route("/logout", post(user::logout))
        .route("/proxy-image", get(user::proxy_image))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

pub async fn run(engine: Engine, config: ServerConfig) {
    let addr = format!("{}:{}", config.bind, config.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener on {addr}: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, config, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    config: ServerConfig,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let http = http_client().map_err(std::io::Error::other)?;
    let verifier = Arc::new(GoogleTokenVerifier::new(
        config.google_client_id.clone(),
        http.clone(),
    ));
    if config.google_client_id.is_empty() {
        tracing::warn!("google_client_id is empty, every sign-in will be rejected");
    }

    let cors = build_cors_layer(&config.cors_origins);
    let state = ServerState::new(engine, config.jwt, verifier, http);

    axum::serve(listener, router(state, cors)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cors_accepts_wildcard_and_lists() {
        let _ = build_cors_layer(&[]);
        let _ = build_cors_layer(&["*".to_string()]);
        let _ = build_cors_layer(&[
            "http://localhost:5173".to_string(),
            "not a header\n".to_string(),
        ]);
    }
}
