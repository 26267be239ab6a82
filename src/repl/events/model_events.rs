//! # Model Events
//!
//! Events emitted by the application controller when its state changes.
//! The REPL uses them to decide when to redraw; subscribers on the event bus
//! use them for logging.

use crate::repl::models::{Modal, Route};

/// Events emitted when controller state changes
#[derive(Debug, Clone, PartialEq)]
pub enum ModelEvent {
    /// Logged-in flag or email changed
    SessionChanged { logged_in: bool, email: String },

    /// Current user record replaced
    ProfileChanged,

    /// Card feed replaced, updated or trimmed
    CardsChanged { count: usize },

    /// A dialog was opened
    ModalOpened { modal: Modal },

    /// Image preview opened for a card
    CardSelected { card_id: String },

    /// Delete confirmation shown for a card
    DeleteRequested { card_id: String },

    /// All dialogs closed
    ModalsClosed,

    /// Navigation happened
    RouteChanged { from: Route, to: Route },

    /// A request to one of the servers failed
    RequestFailed {
        operation: &'static str,
        message: String,
    },
}

impl ModelEvent {
    /// Whether the event changes what is on screen
    pub fn requires_redraw(&self) -> bool {
        !matches!(self, ModelEvent::RequestFailed { .. })
    }
}
