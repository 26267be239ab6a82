//! # Controllers Module
//!
//! [`AppController`] owns the client state; [`ReplController`] feeds it
//! commands read from a line source and renders the result.

pub mod app_controller;
pub mod repl_controller;

// Re-export main types for convenience
pub use app_controller::{AppController, ControllerError};
pub use repl_controller::ReplController;
