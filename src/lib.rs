//! # Mesto - Command-Line Client for the Mesto Photo Feed
//!
//! Sign in, browse the shared card feed, like and delete cards, and edit
//! the profile, all from a line-oriented prompt.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐  commands   ┌────────────────┐   requests   ┌──────────────┐
//! │ LineSource  │────────────▶│ ReplController │              │  AuthApi     │
//! └─────────────┘             │                │              │  ContentApi  │
//!                             │ - Parsing      │              │  (reqwest)   │
//! ┌─────────────┐  snapshot   │ - Forms        │              └──────▲───────┘
//! │ViewRenderer │◀────────────│ - Redraw       │                     │
//! │             │             └───────┬────────┘                     │
//! │ - Pages     │                     │ operations                   │
//! │ - Dialogs   │                     ▼                              │
//! └─────────────┘             ┌────────────────┐──────────────────────┘
//!                             │ AppController  │
//!                             │                │   token     ┌──────────────┐
//!                             │ - Session      │────────────▶│KeyValueStore │
//!                             │ - Feed, Modals │             └──────────────┘
//!                             └────────────────┘
//! ```

pub mod cmd_args;
pub mod config;
pub mod repl;

// Re-export main types for easy access
pub use repl::*;
