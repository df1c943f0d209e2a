//! Error types for artifact-ingest
//!
//! This module provides the error taxonomy for the library:
//! - Permanent per-URL input errors (unsupported URL shape, unknown artifact kind)
//! - Fetch errors with a retryable/permanent classification (see [`crate::retry`])
//! - Malformed artifact contents (XML parse failures, filename token contract
//!   violations)
//!
//! Identity and kind errors abort the pipeline for that URL before any network
//! access. Fetch and parse errors that occur while loading a payload are
//! captured on the descriptor as [`Payload::Failed`](crate::types::Payload)
//! rather than propagated, so one bad artifact never aborts a batch.

use thiserror::Error;

/// Result type alias for artifact-ingest operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for artifact-ingest
#[derive(Debug, Error)]
pub enum Error {
    /// URL is not a multilevel (nested `/job/…/job/…`) Jenkins job URL, or its
    /// path is too short to carry the positional job identity contract.
    /// Permanent; raised before any network access.
    #[error("unsupported URL shape for '{url}': {reason}")]
    UnsupportedUrlShape {
        /// The offending URL
        url: String,
        /// What the URL is missing
        reason: String,
    },

    /// No rule in the artifact kind table matches the URL. Permanent.
    #[error("no artifact kind matches URL '{0}'")]
    UnknownArtifactKind(String),

    /// Fetching the artifact bytes failed (after retry exhaustion)
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Artifact content violates its kind's contract: the XML document fails to
    /// parse, or a filename does not carry the tokens its family requires
    #[error("malformed artifact: {0}")]
    MalformedArtifact(String),

    /// I/O error (staging reads/writes)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors from the fetch collaborator
///
/// Classified for retry purposes in [`crate::retry`]: `NotFound` is permanent,
/// `Status` is retryable only for the transient status set (429, 500, 502, 504),
/// and `Network` is retryable for timeouts and connection failures.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Remote resource is absent (HTTP 404)
    #[error("resource not found: {url}")]
    NotFound {
        /// The URL that returned 404
        url: String,
    },

    /// Remote returned a non-success HTTP status
    #[error("HTTP status {status} fetching {url}")]
    Status {
        /// The HTTP status code
        status: u16,
        /// The URL that returned the status
        url: String,
    },

    /// Transport-level error from the HTTP client
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}
