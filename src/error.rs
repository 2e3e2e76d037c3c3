use std::path::PathBuf;

use skrifa::{outline::DrawError, raw::ReadError};

use crate::header::HeaderError;

/// Failures that abort a validation run.
///
/// Metadata and glyph mismatches are not errors; they are findings recorded
/// in the report and only affect the verdict.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("malformed WOFF2 header in {}: {source}", .path.display())]
    MalformedHeader {
        path: PathBuf,
        #[source]
        source: HeaderError,
    },

    #[error("required table {table} missing from {}", .path.display())]
    MissingTable { path: PathBuf, table: &'static str },

    #[error("failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: ReadError,
    },

    #[error("failed to load glyph {name} from {}: {source}", .path.display())]
    Glyph {
        path: PathBuf,
        name: String,
        #[source]
        source: DrawError,
    },

    #[error("reference encoder failed: {0}")]
    ReferenceEncodingFailed(String),

    #[error("failed to decompress {}: {message}", .path.display())]
    DecompressionFailed { path: PathBuf, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
