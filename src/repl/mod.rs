//! # Mesto Client
//!
//! Session, feed, profile and dialogs of the Mesto client, arranged as
//! models, services, views and controllers.

pub mod commands;
pub mod controllers;
pub mod events;
pub mod forms;
pub mod io;
pub mod models;
pub mod services;
pub mod views;

#[cfg(test)]
pub mod testing;

// Re-export main types for convenience
pub use commands::{CardRef, Command, ParseError};
pub use controllers::{AppController, ControllerError, ReplController};
pub use events::{EventBus, ModelEvent, SimpleEventBus};
pub use forms::FormError;
pub use io::{LineSource, MockLineSource, StdinLineSource};
pub use models::{Card, CurrentUser, Modal, ModalState, Route, Session};
pub use services::{
    ApiError, AuthApi, AuthUser, ContentApi, FileStore, HttpAuthClient, HttpContentClient,
    KeyValueStore, MemoryStore, StorageError,
};
pub use views::{TextRenderer, ViewContext, ViewRenderer};
