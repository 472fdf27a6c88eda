//! Source-module references accepted by the evaluator.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

/// A unit of Pkl source: a file on the local filesystem or a module URI.
///
/// URIs (`https:`, `package:`, `modulepath:`, …) are passed through to the
/// evaluator verbatim; resolution is entirely the evaluator's concern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ModuleSource {
    /// A module on the local filesystem.
    File(PathBuf),
    /// A module addressed by URI.
    Uri(String),
}

impl ModuleSource {
    /// Construct a file-backed module source.
    #[must_use]
    pub fn file<P: Into<PathBuf>>(path: P) -> Self {
        Self::File(path.into())
    }

    /// Construct a URI module source.
    #[must_use]
    pub fn uri<S: Into<String>>(uri: S) -> Self {
        Self::Uri(uri.into())
    }

    /// The form handed to the evaluator on the command line.
    pub(crate) fn to_argument(&self) -> OsString {
        match self {
            Self::File(path) => path.clone().into_os_string(),
            Self::Uri(uri) => uri.clone().into(),
        }
    }
}

impl fmt::Display for ModuleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Uri(uri) => f.write_str(uri),
        }
    }
}

impl From<PathBuf> for ModuleSource {
    fn from(path: PathBuf) -> Self {
        Self::File(path)
    }
}

impl From<&Path> for ModuleSource {
    fn from(path: &Path) -> Self {
        Self::File(path.to_path_buf())
    }
}

/// Bare strings are treated as file paths; use [`ModuleSource::uri`] for
/// URI modules.
impl From<&str> for ModuleSource {
    fn from(path: &str) -> Self {
        Self::File(PathBuf::from(path))
    }
}
