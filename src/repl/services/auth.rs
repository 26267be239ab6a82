//! # Auth Client
//!
//! Sign-in, sign-up and token validation against the auth server.

use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;
use serde_json::json;

use super::http::{ApiError, HttpTransport};

/// Account record returned by sign-up and token validation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthUser {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub email: String,
}

#[derive(Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct TokenResponse {
    token: String,
}

/// Operations offered by the auth server
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange credentials for a session token
    async fn login(&self, email: &str, password: &str) -> Result<String, ApiError>;

    /// Create an account; does not start a session
    async fn register(&self, email: &str, password: &str) -> Result<AuthUser, ApiError>;

    /// Resolve a stored token to the account it belongs to
    async fn validate_token(&self, token: &str) -> Result<AuthUser, ApiError>;
}

/// reqwest-backed [`AuthApi`]
#[derive(Debug, Clone)]
pub struct HttpAuthClient {
    transport: HttpTransport,
}

impl HttpAuthClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        Ok(Self {
            transport: HttpTransport::new(base_url)?,
        })
    }
}

#[async_trait]
impl AuthApi for HttpAuthClient {
    async fn login(&self, email: &str, password: &str) -> Result<String, ApiError> {
        let body = json!({ "email": email, "password": password });
        let response: TokenResponse = self
            .transport
            .request(Method::POST, "/signin", Some(body))
            .await?;
        Ok(response.token)
    }

    async fn register(&self, email: &str, password: &str) -> Result<AuthUser, ApiError> {
        let body = json!({ "email": email, "password": password });
        let response: DataEnvelope<AuthUser> = self
            .transport
            .request(Method::POST, "/signup", Some(body))
            .await?;
        Ok(response.data)
    }

    async fn validate_token(&self, token: &str) -> Result<AuthUser, ApiError> {
        let response: DataEnvelope<AuthUser> = self
            .transport
            .request_authorized(Method::GET, "/users/me", None, &format!("Bearer {token}"))
            .await?;
        Ok(response.data)
    }
}
