//! Top-level `<style>` extraction into the shared stylesheet.

use std::fmt::Write;
use std::path::{Path, PathBuf};

use crate::error::UnitError;
use crate::tokenize::MarkupToken;

const STYLESHEET_HEADER: &str = "/* Code generated by viewgen. DO NOT EDIT. */\n\n";

/// Raw CSS captured from one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleBlock {
    pub source: PathBuf,
    pub css: String,
}

/// Capture the style text that follows a top-level `<style>` start tag.
///
/// The closing `</style>` is not checked; nothing after the captured text is
/// read.
pub fn capture(path: &Path, next: Option<MarkupToken>) -> Result<StyleBlock, UnitError> {
    match next {
        Some(MarkupToken::Text(text)) => Ok(StyleBlock {
            source: path.to_path_buf(),
            css: text.trim().to_string(),
        }),
        _ => Err(UnitError::MissingStyleContent),
    }
}

/// Concatenated stylesheet output.
#[derive(Debug)]
pub struct Stylesheet {
    buf: String,
}

impl Default for Stylesheet {
    fn default() -> Self {
        Self {
            buf: STYLESHEET_HEADER.to_string(),
        }
    }
}

impl Stylesheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, block: &StyleBlock) {
        let _ = write!(
            self.buf,
            "/* source: {} */\n{}\n\n",
            block.source.display(),
            block.css
        );
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf.into_bytes()
    }
}
