//! Recursion history for include cycle detection.
//!
//! Holds the paths of the units currently being compiled, outermost first.
//! Entering a unit returns a guard that pops the entry when dropped, so the
//! stack mirrors the call stack on every exit path.

use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
pub struct RecursionHistory {
    stack: Vec<PathBuf>,
}

impl RecursionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.stack.iter().any(|p| p == path)
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Push `path`, or return the cycle as file names (outermost first,
    /// ending with the repeated file) if it is already being compiled.
    pub fn enter(&mut self, path: &Path) -> Result<HistoryGuard<'_>, Vec<String>> {
        if self.contains(path) {
            let mut chain: Vec<String> = self.stack.iter().map(|p| base_name(p)).collect();
            chain.push(base_name(path));
            return Err(chain);
        }
        self.stack.push(path.to_path_buf());
        Ok(HistoryGuard { history: self })
    }
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Scoped entry in a [`RecursionHistory`]. Derefs to the history so nested
/// compilations can enter further units through it.
pub struct HistoryGuard<'a> {
    history: &'a mut RecursionHistory,
}

impl Deref for HistoryGuard<'_> {
    type Target = RecursionHistory;

    fn deref(&self) -> &RecursionHistory {
        self.history
    }
}

impl DerefMut for HistoryGuard<'_> {
    fn deref_mut(&mut self) -> &mut RecursionHistory {
        self.history
    }
}

impl Drop for HistoryGuard<'_> {
    fn drop(&mut self) {
        self.history.stack.pop();
    }
}
