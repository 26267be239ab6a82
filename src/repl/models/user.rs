//! Current user model
//!
//! The profile record of the signed-in user. It is fetched once the session
//! becomes logged-in and replaced wholesale by profile and avatar edits.

use serde::{Deserialize, Serialize};

/// Profile of the signed-in user as returned by the content server
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub about: String,
    #[serde(default)]
    pub avatar: String,
}

impl CurrentUser {
    /// Create a user record
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        about: impl Into<String>,
        avatar: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            about: about.into(),
            avatar: avatar.into(),
        }
    }

    /// Whether the profile has been loaded yet
    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
    }
}
