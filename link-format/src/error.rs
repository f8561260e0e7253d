//! FILENAME: link-format/src/error.rs
//! Error types for token encoding and decoding.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LinkError {
    #[error("unsupported token version: {0}")]
    UnsupportedVersion(String),

    #[error("token hash {token} does not match current dataset hash {current}")]
    DictionaryMismatch { token: String, current: String },

    #[error("malformed token segment: {0:?}")]
    InvalidSegment(String),

    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
}
