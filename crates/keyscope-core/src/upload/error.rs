//! Upload rejection reasons

use std::path::PathBuf;
use thiserror::Error;

/// Why a file was rejected before upload
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("File size exceeds {limit} limit ({actual})")]
    TooLarge { actual: String, limit: String },

    #[error("File '{0}' is empty")]
    Empty(String),

    #[error("Unsupported file type '{kind}'. Please upload an audio file ({accepted})")]
    UnsupportedType { kind: String, accepted: String },

    #[error("Cannot read '{path}'")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{0}' is not a file")]
    NotAFile(PathBuf),
}

pub type Result<T> = std::result::Result<T, UploadError>;
