//! # Text Renderer
//!
//! Writes pages, notices and prompts to any `Write` sink. Production uses
//! stdout; tests capture the output in memory.

use anyhow::Result;
use std::io::Write;

use super::ansi_escape_codes::{paint, FG_RED};
use super::components;
use super::ViewContext;

/// Trait for rendering views
pub trait ViewRenderer {
    /// Render the whole page for the current state
    fn render_full(&mut self, ctx: &ViewContext<'_>) -> Result<()>;

    /// Print an informational line
    fn render_message(&mut self, message: &str) -> Result<()>;

    /// Print a failure line
    fn render_error(&mut self, message: &str) -> Result<()>;

    /// Print a prompt without a trailing newline
    fn render_prompt(&mut self, prompt: &str) -> Result<()>;
}

pub struct TextRenderer<W: Write> {
    out: W,
    color: bool,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    /// Give back the sink, e.g. to inspect captured output
    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn writer(&self) -> &W {
        &self.out
    }
}

impl<W: Write> ViewRenderer for TextRenderer<W> {
    fn render_full(&mut self, ctx: &ViewContext<'_>) -> Result<()> {
        for line in components::page(ctx, self.color) {
            writeln!(self.out, "{line}")?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn render_message(&mut self, message: &str) -> Result<()> {
        writeln!(self.out, "{message}")?;
        self.out.flush()?;
        Ok(())
    }

    fn render_error(&mut self, message: &str) -> Result<()> {
        let line = paint(&format!("✘ {message}"), FG_RED, self.color);
        writeln!(self.out, "{line}")?;
        self.out.flush()?;
        Ok(())
    }

    fn render_prompt(&mut self, prompt: &str) -> Result<()> {
        write!(self.out, "{prompt}")?;
        self.out.flush()?;
        Ok(())
    }
}
