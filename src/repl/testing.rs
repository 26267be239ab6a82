//! Testing infrastructure for the client
//!
//! In-memory stand-ins for the auth and content servers plus an output
//! capture, so the controller and REPL can be exercised without a network.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::repl::models::{Card, CurrentUser};
use crate::repl::services::{ApiError, AuthApi, AuthUser, ContentApi};

/// Mock writer that captures output instead of writing to terminal
#[derive(Default)]
pub struct MockWriter {
    pub output: Vec<u8>,
}

impl Write for MockWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.output.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl MockWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_output(&self) -> String {
        String::from_utf8_lossy(&self.output).to_string()
    }
}

pub fn sample_user() -> CurrentUser {
    CurrentUser::new(
        "me",
        "Жак-Ив Кусто",
        "Исследователь океана",
        "https://example.com/cousteau.jpg",
    )
}

/// Three cards: own and unliked, foreign and liked by someone else, own and
/// liked by someone else
pub fn sample_cards() -> Vec<Card> {
    vec![
        Card::new("c0", "Архыз", "https://example.com/arkhyz.jpg", "me"),
        Card::new("c1", "Байкал", "https://example.com/baikal.jpg", "other").with_likes(["other"]),
        Card::new("c2", "Камчатка", "https://example.com/kamchatka.jpg", "me").with_likes(["other"]),
    ]
}

fn status(status: u16) -> ApiError {
    ApiError::Status { status }
}

#[derive(Default)]
struct CallLog {
    calls: Mutex<Vec<&'static str>>,
}

impl CallLog {
    fn record(&self, operation: &'static str) {
        self.calls.lock().unwrap().push(operation);
    }

    fn count(&self, operation: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| **c == operation)
            .count()
    }
}

/// Auth server with registered accounts and issued tokens
#[derive(Default)]
pub struct FakeAuth {
    accounts: Mutex<HashMap<String, String>>,
    tokens: Mutex<HashMap<String, String>>,
    log: CallLog,
}

impl FakeAuth {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(self, email: &str, password: &str) -> Self {
        self.accounts
            .lock()
            .unwrap()
            .insert(email.to_string(), password.to_string());
        self
    }

    /// Token the fake hands out for `email`
    pub fn token_for(email: &str) -> String {
        format!("token-{email}")
    }

    pub fn issue_token(&self, token: &str, email: &str) {
        self.tokens
            .lock()
            .unwrap()
            .insert(token.to_string(), email.to_string());
    }

    pub fn call_count(&self, operation: &str) -> usize {
        self.log.count(operation)
    }
}

#[async_trait]
impl AuthApi for Arc<FakeAuth> {
    async fn login(&self, email: &str, password: &str) -> Result<String, ApiError> {
        self.log.record("login");
        let known = self.accounts.lock().unwrap().get(email).cloned();
        match known {
            Some(expected) if expected == password => {
                let token = FakeAuth::token_for(email);
                self.issue_token(&token, email);
                Ok(token)
            }
            _ => Err(status(401)),
        }
    }

    async fn register(&self, email: &str, password: &str) -> Result<AuthUser, ApiError> {
        self.log.record("register");
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.contains_key(email) {
            return Err(status(409));
        }
        accounts.insert(email.to_string(), password.to_string());
        Ok(AuthUser {
            id: format!("id-{email}"),
            email: email.to_string(),
        })
    }

    async fn validate_token(&self, token: &str) -> Result<AuthUser, ApiError> {
        self.log.record("validate_token");
        let email = self.tokens.lock().unwrap().get(token).cloned();
        email
            .map(|email| AuthUser {
                id: format!("id-{email}"),
                email,
            })
            .ok_or_else(|| status(401))
    }
}

/// Content server keeping a profile and a feed in memory
pub struct FakeContent {
    user: Mutex<CurrentUser>,
    cards: Mutex<Vec<Card>>,
    token: Mutex<Option<String>>,
    failing: Mutex<HashSet<String>>,
    next_id: AtomicUsize,
    log: CallLog,
}

impl FakeContent {
    pub fn new(user: CurrentUser, cards: Vec<Card>) -> Self {
        Self {
            user: Mutex::new(user),
            cards: Mutex::new(cards),
            token: Mutex::new(None),
            failing: Mutex::new(HashSet::new()),
            next_id: AtomicUsize::new(1),
            log: CallLog::default(),
        }
    }

    /// Make every later call of `operation` answer 500
    pub fn fail(&self, operation: &str) {
        self.failing.lock().unwrap().insert(operation.to_string());
    }

    pub fn call_count(&self, operation: &str) -> usize {
        self.log.count(operation)
    }

    pub fn token(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }

    fn enter(&self, operation: &'static str) -> Result<(), ApiError> {
        self.log.record(operation);
        if self.failing.lock().unwrap().contains(operation) {
            Err(status(500))
        } else {
            Ok(())
        }
    }

    fn update_card<F>(&self, card_id: &str, f: F) -> Result<Card, ApiError>
    where
        F: FnOnce(&mut Card),
    {
        let mut cards = self.cards.lock().unwrap();
        let card = cards
            .iter_mut()
            .find(|c| c.id == card_id)
            .ok_or_else(|| status(404))?;
        f(card);
        Ok(card.clone())
    }
}

#[async_trait]
impl ContentApi for Arc<FakeContent> {
    fn set_token(&mut self, token: Option<&str>) {
        *self.token.lock().unwrap() = token.map(str::to_string);
    }

    async fn get_profile(&self) -> Result<CurrentUser, ApiError> {
        self.enter("get_profile")?;
        Ok(self.user.lock().unwrap().clone())
    }

    async fn get_cards(&self) -> Result<Vec<Card>, ApiError> {
        self.enter("get_cards")?;
        Ok(self.cards.lock().unwrap().clone())
    }

    async fn like(&self, card_id: &str) -> Result<Card, ApiError> {
        self.enter("like")?;
        let user_id = self.user.lock().unwrap().id.clone();
        self.update_card(card_id, |card| {
            if !card.likes.contains(&user_id) {
                card.likes.push(user_id);
            }
        })
    }

    async fn dislike(&self, card_id: &str) -> Result<Card, ApiError> {
        self.enter("dislike")?;
        let user_id = self.user.lock().unwrap().id.clone();
        self.update_card(card_id, |card| card.likes.retain(|id| *id != user_id))
    }

    async fn delete_card(&self, card_id: &str) -> Result<(), ApiError> {
        self.enter("delete_card")?;
        let mut cards = self.cards.lock().unwrap();
        let before = cards.len();
        cards.retain(|c| c.id != card_id);
        if cards.len() == before {
            return Err(status(404));
        }
        Ok(())
    }

    async fn create_card(&self, name: &str, link: &str) -> Result<Card, ApiError> {
        self.enter("create_card")?;
        let id = format!("new-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        let owner = self.user.lock().unwrap().id.clone();
        let card = Card::new(id, name, link, owner);
        self.cards.lock().unwrap().insert(0, card.clone());
        Ok(card)
    }

    async fn update_profile(&self, name: &str, about: &str) -> Result<CurrentUser, ApiError> {
        self.enter("update_profile")?;
        let mut user = self.user.lock().unwrap();
        user.name = name.to_string();
        user.about = about.to_string();
        Ok(user.clone())
    }

    async fn update_avatar(&self, avatar: &str) -> Result<CurrentUser, ApiError> {
        self.enter("update_avatar")?;
        let mut user = self.user.lock().unwrap();
        user.avatar = avatar.to_string();
        Ok(user.clone())
    }
}
