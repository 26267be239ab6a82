//! # Content Client
//!
//! Profile and card operations against the content server.

use async_trait::async_trait;
use reqwest::Method;
use serde_json::json;

use super::http::{ApiError, HttpTransport, AUTHORIZATION};
use crate::repl::models::{Card, CurrentUser};

/// Operations offered by the content server
#[async_trait]
pub trait ContentApi: Send + Sync {
    /// Attach or drop the session token used for authorization
    fn set_token(&mut self, token: Option<&str>);

    async fn get_profile(&self) -> Result<CurrentUser, ApiError>;

    async fn get_cards(&self) -> Result<Vec<Card>, ApiError>;

    async fn like(&self, card_id: &str) -> Result<Card, ApiError>;

    async fn dislike(&self, card_id: &str) -> Result<Card, ApiError>;

    async fn delete_card(&self, card_id: &str) -> Result<(), ApiError>;

    async fn create_card(&self, name: &str, link: &str) -> Result<Card, ApiError>;

    async fn update_profile(&self, name: &str, about: &str) -> Result<CurrentUser, ApiError>;

    async fn update_avatar(&self, avatar: &str) -> Result<CurrentUser, ApiError>;
}

/// reqwest-backed [`ContentApi`]
///
/// When a static API token is configured it is always sent as-is and the
/// session token is ignored; otherwise the session token is sent as a bearer
/// credential.
#[derive(Debug, Clone)]
pub struct HttpContentClient {
    transport: HttpTransport,
    api_token: Option<String>,
}

impl HttpContentClient {
    pub fn new(base_url: impl Into<String>, api_token: Option<String>) -> Result<Self, ApiError> {
        let mut transport = HttpTransport::new(base_url)?;
        if let Some(token) = &api_token {
            transport.set_session_header(AUTHORIZATION, token.clone());
        }
        Ok(Self {
            transport,
            api_token,
        })
    }

    fn card_path(card_id: &str) -> String {
        format!("/cards/{card_id}")
    }

    fn likes_path(card_id: &str) -> String {
        format!("/cards/{card_id}/likes")
    }
}

#[async_trait]
impl ContentApi for HttpContentClient {
    fn set_token(&mut self, token: Option<&str>) {
        if self.api_token.is_some() {
            return;
        }
        match token {
            Some(token) => self
                .transport
                .set_session_header(AUTHORIZATION, format!("Bearer {token}")),
            None => {
                self.transport.remove_session_header(AUTHORIZATION);
            }
        }
    }

    async fn get_profile(&self) -> Result<CurrentUser, ApiError> {
        self.transport.request(Method::GET, "/users/me", None).await
    }

    async fn get_cards(&self) -> Result<Vec<Card>, ApiError> {
        self.transport.request(Method::GET, "/cards", None).await
    }

    async fn like(&self, card_id: &str) -> Result<Card, ApiError> {
        self.transport
            .request(Method::PUT, &Self::likes_path(card_id), None)
            .await
    }

    async fn dislike(&self, card_id: &str) -> Result<Card, ApiError> {
        self.transport
            .request(Method::DELETE, &Self::likes_path(card_id), None)
            .await
    }

    async fn delete_card(&self, card_id: &str) -> Result<(), ApiError> {
        self.transport
            .request_empty(Method::DELETE, &Self::card_path(card_id), None)
            .await
    }

    async fn create_card(&self, name: &str, link: &str) -> Result<Card, ApiError> {
        let body = json!({ "name": name, "link": link });
        self.transport
            .request(Method::POST, "/cards", Some(body))
            .await
    }

    async fn update_profile(&self, name: &str, about: &str) -> Result<CurrentUser, ApiError> {
        let body = json!({ "name": name, "about": about });
        self.transport
            .request(Method::PATCH, "/users/me", Some(body))
            .await
    }

    async fn update_avatar(&self, avatar: &str) -> Result<CurrentUser, ApiError> {
        let body = json!({ "avatar": avatar });
        self.transport
            .request(Method::PATCH, "/users/me/avatar", Some(body))
            .await
    }
}
