//! # Views Module
//!
//! Renders a read-only snapshot of the controller state as text. Views
//! never mutate state; everything they need arrives in [`ViewContext`].

pub mod ansi_escape_codes;
pub mod components;
pub mod text_renderer;

use crate::repl::models::{Card, CurrentUser, ModalState, Route};

// Re-export main types for convenience
pub use text_renderer::{TextRenderer, ViewRenderer};

/// Everything a render pass may look at, built once per render
#[derive(Debug, Clone, Copy)]
pub struct ViewContext<'a> {
    pub email: &'a str,
    pub logged_in: bool,
    pub current_user: &'a CurrentUser,
    pub cards: &'a [Card],
    pub modals: &'a ModalState,
    /// Route after the logged-in guard
    pub route: Route,
    pub pending_delete: Option<&'a Card>,
}
