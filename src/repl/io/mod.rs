//! # I/O Abstraction Layer
//!
//! Input arrives one line at a time through [`LineSource`], so the REPL can
//! be driven by stdin in production and by a scripted queue in tests.
//!
//! ```text
//! Production:  ReplController ──▶ StdinLineSource ──▶ tokio::io::stdin()
//! Testing:     ReplController ──▶ MockLineSource  ──▶ VecDeque<String>
//! ```

use anyhow::Result;
use async_trait::async_trait;

pub mod mock;
pub mod terminal;

pub use mock::MockLineSource;
pub use terminal::StdinLineSource;

/// Source of user input lines
#[async_trait]
pub trait LineSource: Send {
    /// Next line without its terminator, or `None` once input is exhausted
    async fn next_line(&mut self) -> Result<Option<String>>;
}
