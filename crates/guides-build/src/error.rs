//! Build error types.

use std::io;
use std::path::{Path, PathBuf};

use guides_markup::ParseError;
use guides_render::RenderError;

/// Error building one document or scanning the source tree.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BuildError {
    /// The discovery pattern could not be compiled.
    #[error("invalid source pattern {pattern}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// A directory entry could not be read while scanning sources.
    #[error("failed to scan {}", .path.display())]
    Scan {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A source file could not be read.
    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The markup of a source file is invalid.
    #[error("failed to parse {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    /// A parsed document could not be rendered.
    #[error("failed to render {}", .path.display())]
    Render {
        path: PathBuf,
        #[source]
        source: RenderError,
    },

    /// An output file or its folder could not be written.
    #[error("failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl BuildError {
    /// File the error is about, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Pattern { .. } => None,
            Self::Scan { path, .. }
            | Self::Read { path, .. }
            | Self::Parse { path, .. }
            | Self::Render { path, .. }
            | Self::Write { path, .. } => Some(path),
        }
    }
}

impl From<glob::GlobError> for BuildError {
    fn from(err: glob::GlobError) -> Self {
        Self::Scan {
            path: err.path().to_path_buf(),
            source: err.into_error(),
        }
    }
}
