//! # Scripted Input for Testing
//!
//! Feeds a fixed list of lines to the REPL.

use super::LineSource;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::VecDeque;

#[derive(Debug, Default)]
pub struct MockLineSource {
    lines: VecDeque<String>,
}

impl MockLineSource {
    /// Create a source that yields `lines` in order, then end of input
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn push_line(&mut self, line: impl Into<String>) {
        self.lines.push_back(line.into());
    }

    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

#[async_trait]
impl LineSource for MockLineSource {
    async fn next_line(&mut self) -> Result<Option<String>> {
        Ok(self.lines.pop_front())
    }
}
