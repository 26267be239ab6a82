//! Session model
//!
//! Tracks whether the user is signed in and under which email. The token
//! itself is not held here; it lives in the injected key-value store.

/// Key under which the session token is persisted
pub const TOKEN_KEY: &str = "token";

/// Authentication state of the client
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    logged_in: bool,
    email: String,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    /// Set the logged-in flag
    ///
    /// Returns true only on a false -> true transition, which is when the
    /// profile and feed must be loaded.
    pub fn set_logged_in(&mut self, logged_in: bool) -> bool {
        let became_logged_in = logged_in && !self.logged_in;
        self.logged_in = logged_in;
        became_logged_in
    }

    /// Drop all session data
    pub fn clear(&mut self) {
        self.logged_in = false;
        self.email.clear();
    }
}
