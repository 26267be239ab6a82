//! Card model
//!
//! A card is a shared photo post. The content server embeds either bare user
//! ids or whole user objects in `owner` and `likes` depending on the
//! endpoint, so both shapes decode to plain ids here.

use serde::{Deserialize, Deserializer, Serialize};

/// A user reference as it appears inside a card payload
#[derive(Deserialize)]
#[serde(untagged)]
enum UserRef {
    Id(String),
    Object {
        #[serde(rename = "_id")]
        id: String,
    },
}

impl UserRef {
    fn into_id(self) -> String {
        match self {
            UserRef::Id(id) => id,
            UserRef::Object { id } => id,
        }
    }
}

fn deserialize_owner<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(UserRef::deserialize(deserializer)?.into_id())
}

fn deserialize_likes<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let refs = Vec::<UserRef>::deserialize(deserializer)?;
    Ok(refs.into_iter().map(UserRef::into_id).collect())
}

/// A photo card in the shared feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub link: String,
    #[serde(deserialize_with = "deserialize_owner", default)]
    pub owner: String,
    #[serde(deserialize_with = "deserialize_likes", default)]
    pub likes: Vec<String>,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Card {
    /// Create a card with no likes
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        link: impl Into<String>,
        owner: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            link: link.into(),
            owner: owner.into(),
            likes: Vec::new(),
            created_at: None,
        }
    }

    /// Builder-style helper to set the liking users
    pub fn with_likes<I, S>(mut self, likes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.likes = likes.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        !user_id.is_empty() && self.owner == user_id
    }

    pub fn is_liked_by(&self, user_id: &str) -> bool {
        !user_id.is_empty() && self.likes.iter().any(|id| id == user_id)
    }

    pub fn like_count(&self) -> usize {
        self.likes.len()
    }
}

/// Replace every card whose id matches `updated.id` with `updated`
///
/// Cards are matched by identity, so the collection never grows.
pub fn replace_card(cards: &[Card], updated: Card) -> Vec<Card> {
    cards
        .iter()
        .map(|card| {
            if card.id == updated.id {
                updated.clone()
            } else {
                card.clone()
            }
        })
        .collect()
}

/// Remove the card with `id`, keeping the order of the rest
pub fn remove_card(cards: &[Card], id: &str) -> Vec<Card> {
    cards.iter().filter(|card| card.id != id).cloned().collect()
}

/// Put a freshly created card at the head of the feed
pub fn prepend_card(cards: &[Card], created: Card) -> Vec<Card> {
    std::iter::once(created)
        .chain(cards.iter().cloned())
        .collect()
}
