//! # artifact-ingest
//!
//! Jenkins CI artifact ingestion and normalization library.
//!
//! Takes artifact URLs produced by nested Jenkins jobs — kernel log excerpts,
//! device-enumeration logs, JUnit-style XML test reports — and normalizes
//! each into a uniform sequence of structured records (a procedure/event name
//! plus an optional parameter), ready for downstream aggregation.
//!
//! ## Design Philosophy
//!
//! - **Library-first** - No CLI or UI, purely a Rust crate for embedding
//! - **Strategy table, not class hierarchy** - A closed set of artifact kinds,
//!   each carrying its metadata rule, result-kind filter, and kind label
//! - **Failures are data** - A fetch or parse failure becomes a
//!   distinguishable payload state on the descriptor, never a batch abort
//! - **Event-driven observability** - Consumers subscribe to fetch and
//!   payload events, no polling required
//!
//! ## Quick Start
//!
//! ```no_run
//! use artifact_ingest::{ArtifactEngine, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let engine = ArtifactEngine::new(Config::default())?;
//!
//!     let descriptors = engine
//!         .ingest("https://ci.example.com/jenkins/job/hw-tests/job/nightly/42/artifact/dmesg_zynq_err.log")
//!         .await?;
//!
//!     for descriptor in &descriptors {
//!         println!("{}", serde_json::to_string_pretty(descriptor)?);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! One URL yields one descriptor for text artifacts, or three for XML report
//! artifacts (one per result kind: failure, skipped, error).

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// Ingestion engine orchestrating the pipeline
pub mod engine;
/// Error types
pub mod error;
/// Artifact fetching over HTTP
pub mod fetch;
/// JUnit-style XML report reading
pub mod junit;
/// Artifact kind matching
pub mod kind;
/// Filename metadata extraction
pub mod metadata;
/// Record normalization
pub mod normalize;
/// Raw payload loading
pub mod payload;
/// Retry logic with exponential backoff
pub mod retry;
/// Scoped staging of fetched bytes
pub mod staging;
/// Core types and events
pub mod types;
/// Jenkins job URL identity resolution
pub mod url_info;

// Re-export commonly used types
pub use config::{Config, FetchConfig, RetryConfig, StagingConfig};
pub use engine::ArtifactEngine;
pub use error::{Error, FetchError, Result};
pub use fetch::{Fetch, HttpFetcher};
pub use kind::{ArtifactKind, ResultKind};
pub use types::{
    ArtifactDescriptor, Event, FileMetadata, JobInfo, NO_PARAMETER, Payload, Record,
};
pub use url_info::UrlInfo;
