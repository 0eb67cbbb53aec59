//! Authentication endpoints and the avatar proxy.

use api_types::{
    Message,
    auth::{AuthResponse, GoogleTokenRequest, ProxyImage, UserView},
};
use axum::{
    Extension, Json,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};
use engine::User;

use crate::{
    ServerError,
    extract::{self, Query},
    server::ServerState,
};

const DEFAULT_IMAGE_TYPE: &str = "image/jpeg";
/// Avatar hosts the proxy fetches from, matched on the domain or any subdomain.
const AVATAR_HOSTS: &[&str] = &["googleusercontent.com"];
const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

fn is_avatar_url(url: &reqwest::Url) -> bool {
    let Some(host) = url.host_str() else {
        return false;
    };
    AVATAR_HOSTS.iter().any(|allowed| {
        host == *allowed
            || host
                .strip_suffix(allowed)
                .is_some_and(|prefix| prefix.ends_with('.'))
    })
}

fn fetch_failed(message: &str) -> ServerError {
    ServerError::Upstream {
        status: StatusCode::BAD_GATEWAY,
        message: message.to_string(),
    }
}

fn user_view(user: User) -> UserView {
    UserView {
        id: user.id,
        email: user.email,
        name: user.name,
        picture: user.picture,
    }
}

fn message(text: &str) -> Json<Message> {
    Json(Message {
        message: text.to_string(),
    })
}

pub async fn ping() -> Json<Message> {
    message("pong")
}

/// Exchanges a Google ID token for an access token, registering the user on
/// first sign-in.
pub async fn google(
    State(state): State<ServerState>,
    extract::Json(payload): extract::Json<GoogleTokenRequest>,
) -> Result<Json<AuthResponse>, ServerError> {
    let token = payload.token.trim();
    if token.is_empty() {
        return Err(ServerError::Generic("token is required".to_string()));
    }

    let identity = state.verifier.verify(token).await?;
    let user = state.engine.upsert_google_user(identity).await?;
    let access_token = state.jwt.issue(user.id).map_err(|err| {
        tracing::error!("failed to sign access token: {err}");
        ServerError::Generic("could not issue access token".to_string())
    })?;

    Ok(Json(AuthResponse {
        access_token,
        token_type: "bearer".to_string(),
        user: user_view(user),
    }))
}

pub async fn me(Extension(user): Extension<User>) -> Json<UserView> {
    Json(user_view(user))
}

/// Tokens are stateless, the client simply forgets its token.
pub async fn logout() -> Json<Message> {
    message("Logged out successfully")
}

/// Relays a Google avatar so clients are not rate limited by the image host.
pub async fn proxy_image(
    State(state): State<ServerState>,
    Query(query): Query<ProxyImage>,
) -> Result<impl IntoResponse, ServerError> {
    let url = reqwest::Url::parse(&query.url)
        .map_err(|err| ServerError::Generic(format!("invalid url: {err}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ServerError::Generic(
            "only http and https urls can be proxied".to_string(),
        ));
    }
    if !is_avatar_url(&url) {
        return Err(ServerError::Generic(
            "only avatar hosts can be proxied".to_string(),
        ));
    }

    let mut response = state.http.get(url).send().await.map_err(|err| {
        tracing::warn!("image fetch failed: {err}");
        fetch_failed("Image fetch failed")
    })?;

    if response.status() != reqwest::StatusCode::OK {
        let status = StatusCode::from_u16(response.status().as_u16())
            .unwrap_or(StatusCode::BAD_GATEWAY);
        return Err(ServerError::Upstream {
            status,
            message: "Image fetch failed".to_string(),
        });
    }
    if response
        .content_length()
        .is_some_and(|len| len > MAX_IMAGE_BYTES as u64)
    {
        return Err(fetch_failed("Image too large"));
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or(DEFAULT_IMAGE_TYPE)
        .to_string();

    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await.map_err(|err| {
        tracing::warn!("image read failed: {err}");
        fetch_failed("Image fetch failed")
    })? {
        if body.len() + chunk.len() > MAX_IMAGE_BYTES {
            return Err(fetch_failed("Image too large"));
        }
        body.extend_from_slice(&chunk);
    }

    Ok(([(header::CONTENT_TYPE, content_type)], body))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(raw: &str) -> reqwest::Url {
        reqwest::Url::parse(raw).unwrap()
    }

    #[test]
    fn only_google_avatar_hosts_are_allowed() {
        assert!(is_avatar_url(&url("https://lh3.googleusercontent.com/a/abc=s96-c")));
        assert!(is_avatar_url(&url("https://googleusercontent.com/x.png")));

        assert!(!is_avatar_url(&url("http://127.0.0.1:8000/me")));
        assert!(!is_avatar_url(&url("http://169.254.169.254/latest/meta-data")));
        assert!(!is_avatar_url(&url("https://evilgoogleusercontent.com/x.png")));
        assert!(!is_avatar_url(&url(
            "https://googleusercontent.com.example.org/x.png"
        )));
    }
}
