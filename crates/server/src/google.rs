//! Google ID token verification.

use async_trait::async_trait;
use engine::GoogleIdentity;
use serde::Deserialize;
use thiserror::Error;

const TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";

#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("Invalid Google token")]
    InvalidToken,
    #[error("Invalid token audience")]
    Audience,
    #[error("Google account email is not verified")]
    UnverifiedEmail,
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// Turns a Google ID token into the identity it asserts.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, id_token: &str) -> Result<GoogleIdentity, VerifyError>;
}

/// Verifies tokens against Google's `tokeninfo` endpoint.
#[derive(Clone, Debug)]
pub struct GoogleTokenVerifier {
    client_id: String,
    http: reqwest::Client,
    endpoint: String,
}

impl GoogleTokenVerifier {
    pub fn new(client_id: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            client_id: client_id.into(),
            http,
            endpoint: TOKENINFO_URL.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenInfo {
    sub: String,
    aud: String,
    email: String,
    /// `tokeninfo` reports this as the string `"true"`; a JSON bool is
    /// accepted too.
    #[serde(default)]
    email_verified: Option<serde_json::Value>,
    name: Option<String>,
    picture: Option<String>,
}

impl TokenInfo {
    fn into_identity(self, client_id: &str) -> Result<GoogleIdentity, VerifyError> {
        if self.aud != client_id {
            return Err(VerifyError::Audience);
        }
        let verified = match &self.email_verified {
            Some(serde_json::Value::Bool(flag)) => *flag,
            Some(serde_json::Value::String(flag)) => flag == "true",
            _ => false,
        };
        if !verified {
            return Err(VerifyError::UnverifiedEmail);
        }
        let name = self
            .name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| self.email.clone());

        Ok(GoogleIdentity {
            google_id: self.sub,
            email: self.email,
            name,
            picture: self.picture,
        })
    }
}

#[async_trait]
impl TokenVerifier for GoogleTokenVerifier {
    async fn verify(&self, id_token: &str) -> Result<GoogleIdentity, VerifyError> {
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("id_token", id_token)])
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::debug!(status = %response.status(), "tokeninfo rejected token");
            return Err(VerifyError::InvalidToken);
        }

        let info: TokenInfo = response.json().await?;
        info.into_identity(&self.client_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(aud: &str, name: Option<&str>) -> TokenInfo {
        TokenInfo {
            sub: "1234".to_string(),
            aud: aud.to_string(),
            email: "alice@example.com".to_string(),
            email_verified: Some(serde_json::json!("true")),
            name: name.map(str::to_string),
            picture: None,
        }
    }

    #[test]
    fn audience_must_match() {
        assert!(matches!(
            info("other-client", Some("Alice")).into_identity("my-client"),
            Err(VerifyError::Audience)
        ));
    }

    #[test]
    fn missing_name_falls_back_to_email() {
        let identity = info("my-client", None).into_identity("my-client").unwrap();
        assert_eq!(identity.google_id, "1234");
        assert_eq!(identity.name, "alice@example.com");
    }

    #[test]
    fn unverified_email_is_refused() {
        for flag in [Some(serde_json::json!("false")), Some(serde_json::json!(false)), None] {
            let mut token = info("my-client", Some("Alice"));
            token.email_verified = flag;
            assert!(matches!(
                token.into_identity("my-client"),
                Err(VerifyError::UnverifiedEmail)
            ));
        }
    }

    #[test]
    fn tokeninfo_payload_parses() {
        let token: TokenInfo = serde_json::from_value(serde_json::json!({
            "sub": "42",
            "aud": "my-client",
            "email": "bob@example.com",
            "email_verified": "true",
            "name": "Bob",
            "iss": "https://accounts.google.com"
        }))
        .unwrap();
        let identity = token.into_identity("my-client").unwrap();
        assert_eq!(identity.google_id, "42");
        assert_eq!(identity.name, "Bob");
    }
}
