//! # HTTP Transport
//!
//! Thin wrapper around `reqwest` shared by the auth and content clients.
//! Handles base URL joining, session headers and the "non-2xx is an error"
//! rule of the Mesto servers.

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Header carrying the session or API token
pub const AUTHORIZATION: &str = "authorization";

/// Errors produced while talking to the Mesto servers
#[derive(Debug, Error)]
pub enum ApiError {
    /// Server answered with a non-2xx status
    #[error("Ошибка: {status}")]
    Status { status: u16 },

    /// Connection, TLS or body decoding failure
    #[error("не удалось выполнить запрос: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("неверный адрес сервера '{0}'")]
    InvalidUrl(String),
}

impl ApiError {
    /// HTTP status of the failure, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status } => Some(*status),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            ApiError::InvalidUrl(_) => None,
        }
    }
}

/// Shared HTTP plumbing for one server
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    /// Headers sent with every request
    session_headers: HashMap<String, String>,
}

impl HttpTransport {
    /// Create a transport for `base_url`
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let base_url = base_url.into();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ApiError::InvalidUrl(base_url));
        }

        tracing::debug!("Creating HttpTransport for {}", base_url);
        let client = reqwest::Client::builder().build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            session_headers: HashMap::new(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Add or update a session header
    pub fn set_session_header(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.session_headers.insert(key.into(), value.into());
    }

    /// Remove a session header
    pub fn remove_session_header(&mut self, key: &str) -> Option<String> {
        self.session_headers.remove(key)
    }

    /// Get current session headers
    pub fn session_headers(&self) -> &HashMap<String, String> {
        &self.session_headers
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn build(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        authorization: Option<&str>,
    ) -> RequestBuilder {
        let mut req = self.client.request(method, self.url(path));
        for (key, value) in &self.session_headers {
            if authorization.is_some() && key.eq_ignore_ascii_case(AUTHORIZATION) {
                continue;
            }
            req = req.header(key.as_str(), value.as_str());
        }
        if let Some(auth) = authorization {
            req = req.header(AUTHORIZATION, auth);
        }
        if let Some(body) = body {
            req = req.json(&body);
        }
        req
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        authorization: Option<&str>,
    ) -> Result<Response, ApiError> {
        tracing::debug!("{} {}", method, self.url(path));
        let response = self
            .build(method.clone(), path, body, authorization)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!("{} {} answered {}", method, path, status.as_u16());
            return Err(ApiError::Status {
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    /// Send a request and decode the JSON answer
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<T, ApiError> {
        Ok(self.send(method, path, body, None).await?.json::<T>().await?)
    }

    /// Same as [`HttpTransport::request`] with an explicit authorization header
    pub async fn request_authorized<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        authorization: &str,
    ) -> Result<T, ApiError> {
        Ok(self
            .send(method, path, body, Some(authorization))
            .await?
            .json::<T>()
            .await?)
    }

    /// Send a request whose answer body is not needed
    pub async fn request_empty(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<(), ApiError> {
        self.send(method, path, body, None).await?;
        Ok(())
    }
}
