//! # Models Module
//!
//! Plain data owned by the application controller: session, current user,
//! card feed, dialog visibility and routes.

pub mod card;
pub mod modal;
pub mod route;
pub mod session;
pub mod user;

// Re-export all models for easy access
pub use card::{prepend_card, remove_card, replace_card, Card};
pub use modal::{Modal, ModalState};
pub use route::{guard, Route};
pub use session::{Session, TOKEN_KEY};
pub use user::CurrentUser;
