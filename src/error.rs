//! Error types surfaced by the view generator.
//!
//! Every user-facing failure is attributed to the markup file it came from.
//! A formatter that rejects the generated source is not represented here:
//! that is a generator bug and aborts with a panic instead.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::tokenize::TokenizeError;

// ═══════════════════════════════════════════════════════════════════════════════
// RUN ERRORS
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Error)]
pub enum Error {
    /// A markup file failed to compile.
    #[error("{}: {kind}", path.display())]
    Unit { path: PathBuf, kind: UnitError },

    /// The configured package name is not a Go identifier.
    #[error("invalid package name {0:?}")]
    InvalidPackage(String),

    /// The source formatter could not be run at all.
    #[error("run source formatter: {0}")]
    Formatter(#[source] io::Error),
}

impl Error {
    pub fn unit(path: &Path, kind: UnitError) -> Self {
        Error::Unit {
            path: path.to_path_buf(),
            kind,
        }
    }

    /// The path of the unit that failed, if the error belongs to one.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Error::Unit { path, .. } => Some(path),
            Error::InvalidPackage(_) | Error::Formatter(_) => None,
        }
    }

    pub fn kind(&self) -> Option<&UnitError> {
        match self {
            Error::Unit { kind, .. } => Some(kind),
            Error::InvalidPackage(_) | Error::Formatter(_) => None,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// UNIT ERRORS
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Error)]
pub enum UnitError {
    #[error("read file: {0}")]
    Io(#[from] io::Error),

    #[error("tokenize HTML: {0}")]
    Tokenize(#[from] TokenizeError),

    #[error("cannot find <style> text")]
    MissingStyleContent,

    #[error("ref name {name:?} disallowed ({reason})")]
    DisallowedRef { name: String, reason: &'static str },

    #[error("ref name {name:?} present multiple times (previous occurrence in <{previous_tag}>)")]
    DuplicateRef { name: String, previous_tag: String },

    #[error("<include> specifies invalid attribute {0:?}")]
    InvalidIncludeAttribute(String),

    #[error("missing required \"path\" attribute in <include>")]
    MissingIncludePath,

    #[error("<include> specifies \"path\" more than once")]
    DuplicateIncludePath,

    #[error("cycle in include paths ({})", chain.join(" -> "))]
    IncludeCycle { chain: Vec<String> },

    #[error("closing tag </{0}> has no matching opening tag")]
    UnmatchedEndTag(String),

    #[error("<include> cannot have content (found {0})")]
    IncludeContent(String),

    #[error("file name yields type name {name:?}, which is not a valid identifier")]
    InvalidTypeName { name: String },

    #[error("type name {name:?} is already generated from {}", previous.display())]
    DuplicateTypeName { name: String, previous: PathBuf },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_error_display_is_prefixed_with_path() {
        let err = Error::unit(
            Path::new("views/card.html"),
            UnitError::DuplicateRef {
                name: "title".to_string(),
                previous_tag: "h1".to_string(),
            },
        );
        assert_eq!(
            err.to_string(),
            "views/card.html: ref name \"title\" present multiple times (previous occurrence in <h1>)"
        );
        assert_eq!(err.path(), Some(Path::new("views/card.html")));
    }

    #[test]
    fn test_cycle_display_lists_chain() {
        let kind = UnitError::IncludeCycle {
            chain: vec!["a.html".into(), "b.html".into(), "a.html".into()],
        };
        assert_eq!(
            kind.to_string(),
            "cycle in include paths (a.html -> b.html -> a.html)"
        );
    }
}
