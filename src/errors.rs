//! Error types for the `li8n` library.

use std::path::PathBuf;

/// Result type used throughout the crate, defaulting to [`Li8nError`].
pub type Result<T, E = Li8nError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Li8nError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Failure inside the seekable zstd codec used for compressed tables.
    #[error(transparent)]
    Compression(#[from] zeekstd::Error),

    /// The source directory could not be turned into a glob pattern.
    #[error(transparent)]
    Pattern(#[from] glob::PatternError),

    /// A matched source path could not be read while walking the directory.
    #[error(transparent)]
    Glob(#[from] glob::GlobError),

    /// A dictionary or word list line that cannot be parsed.
    #[error("{source_name}:{line}: {msg}")]
    InvalidFormat {
        source_name: String,
        line: usize,
        msg: &'static str,
    },

    /// The configuration names an encoding `encoding_rs` does not know.
    #[error("unknown text encoding '{0}'")]
    UnknownEncoding(String),

    /// The configuration file exists but is not valid JSON for [`crate::config::Config`].
    #[error("failed to parse {}: {}", path.display(), source)]
    Config {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl Li8nError {
    pub(crate) fn invalid_format(source_name: impl Into<String>, line: usize, msg: &'static str) -> Self {
        Self::InvalidFormat {
            source_name: source_name.into(),
            line,
            msg,
        }
    }
}
