//! Generator configuration.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// Go package clause of the generated views file.
    pub package: String,
    /// Directory that `<include path="/...">` is resolved against.
    pub root: PathBuf,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            package: "views".to_string(),
            root: PathBuf::from("."),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl Options {
    pub fn new(package: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            package: package.into(),
            root: root.into(),
        }
    }

    /// Load options from a TOML file; missing keys keep their defaults.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let opts = Options::default();
        assert_eq!(opts.package, "views");
        assert_eq!(opts.root, PathBuf::from("."));
    }

    #[test]
    fn test_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "package = \"ui\"\nroot = \"web/views\"").unwrap();
        let opts = Options::from_toml_file(file.path()).unwrap();
        assert_eq!(opts, Options::new("ui", "web/views"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "package = \"ui\"").unwrap();
        let opts = Options::from_toml_file(file.path()).unwrap();
        assert_eq!(opts.root, PathBuf::from("."));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "pakage = \"ui\"").unwrap();
        assert!(matches!(
            Options::from_toml_file(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }
}
