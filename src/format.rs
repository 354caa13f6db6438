//! Source formatting of the assembled view module.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormatError {
    /// The formatter could not be run.
    #[error("formatter unavailable: {0}")]
    Unavailable(#[source] io::Error),
    /// The formatter ran and refused the source.
    #[error("formatter rejected source: {0}")]
    Rejected(String),
}

pub trait SourceFormatter {
    fn format(&self, source: &[u8]) -> Result<Vec<u8>, FormatError>;
}

/// Pipes the source through a `gofmt` executable.
#[derive(Debug, Clone)]
pub struct Gofmt {
    program: PathBuf,
}

impl Default for Gofmt {
    fn default() -> Self {
        Self {
            program: PathBuf::from("gofmt"),
        }
    }
}

impl Gofmt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl SourceFormatter for Gofmt {
    fn format(&self, source: &[u8]) -> Result<Vec<u8>, FormatError> {
        let mut child = Command::new(&self.program)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(FormatError::Unavailable)?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| FormatError::Unavailable(io::Error::other("gofmt stdin not piped")))?;

        // Feed stdin from a second thread so a full stdout pipe cannot stall us.
        let (output, written) = thread::scope(|s| {
            let writer = s.spawn(move || stdin.write_all(source));
            let output = child.wait_with_output();
            let written = writer
                .join()
                .unwrap_or_else(|_| Err(io::Error::other("gofmt stdin writer panicked")));
            (output, written)
        });
        let output = output.map_err(FormatError::Unavailable)?;

        // A rejecting gofmt may exit before reading all input; its verdict wins
        // over the resulting broken pipe.
        if !output.status.success() {
            return Err(FormatError::Rejected(
                String::from_utf8_lossy(&output.stderr).into_owned(),
            ));
        }
        written.map_err(FormatError::Unavailable)?;
        Ok(output.stdout)
    }
}

/// Leaves the source untouched. The generator already lays out code the
/// way gofmt prints it, so this is enough where gofmt is not installed.
#[derive(Debug, Clone, Copy, Default)]
pub struct Verbatim;

impl SourceFormatter for Verbatim {
    fn format(&self, source: &[u8]) -> Result<Vec<u8>, FormatError> {
        Ok(source.to_vec())
    }
}
