//! Core types for artifact-ingest

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder parameter value for records that carry no parameter
pub const NO_PARAMETER: &str = "NA";

/// Identity of the CI job a descriptor was extracted from
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobInfo {
    /// Job name, `<folder>/<name>` for nested jobs
    pub job: String,

    /// Build number as it appears in the URL path
    pub job_number: String,

    /// Build timestamp. Always `None`: obtaining it would require the CI
    /// server's job-metadata API, which is out of scope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_date: Option<DateTime<Utc>>,
}

/// Metadata derived from an artifact's filename
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMetadata {
    /// Last URL path segment
    pub file_name: String,

    /// Filename split on `_`, order preserved
    pub tokens: Vec<String>,

    /// Target board identifier, derived per strategy family
    pub target_board: String,

    /// Normalized lower-case artifact kind identifier
    /// (e.g. `dmesg_err`, `enumerated_devs`, `pytest_failure`)
    pub artifact_kind: String,
}

/// One normalized record extracted from an artifact
///
/// Text artifacts decide the shape per line: lines carrying a recognizable
/// timestamp become [`Record::Timed`], everything else [`Record::Named`] with
/// parameter [`NO_PARAMETER`]. XML report artifacts always produce
/// [`Record::Named`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Record {
    /// A log line with a detected timestamp
    Timed {
        /// Seconds-since-boot timestamp as written in the line
        timestamp: String,
        /// The line content after the timestamp bracket
        message: String,
    },

    /// A procedure/event name with an optional parameter
    Named {
        /// Normalized procedure or event name
        procedure: String,
        /// Associated parameter value, [`NO_PARAMETER`] when absent
        parameter: String,
    },
}

impl Record {
    /// A [`Record::Named`] with no parameter
    pub fn named(procedure: impl Into<String>) -> Self {
        Record::Named {
            procedure: procedure.into(),
            parameter: NO_PARAMETER.to_string(),
        }
    }
}

/// Outcome of loading and normalizing one artifact's payload
///
/// Loader failures degrade to [`Payload::Failed`] instead of aborting the
/// pipeline, but stay distinguishable from a genuinely empty result: callers
/// can tell "found nothing" apart from "failed to read".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Payload {
    /// Payload was loaded and normalized; may be empty
    Records {
        /// Normalized records, artifact order preserved
        records: Vec<Record>,
    },

    /// Fetching or parsing the payload failed after retry exhaustion
    Failed {
        /// Human-readable failure description
        reason: String,
    },
}

impl Payload {
    /// The record sequence, or `None` if loading failed
    pub fn records(&self) -> Option<&[Record]> {
        match self {
            Payload::Records { records } => Some(records),
            Payload::Failed { .. } => None,
        }
    }

    /// True if the payload failed to load
    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, Payload::Failed { .. })
    }
}

/// Fully-populated result of running one extraction strategy against one URL
///
/// Immutable after assembly. Each descriptor owns its records exclusively;
/// descriptors produced from the same URL (the three result-kind variants of
/// an XML report) share nothing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactDescriptor {
    /// The artifact URL this descriptor was built from
    pub url: String,

    /// Server origin including the CI root path segment,
    /// e.g. `https://ci.example.com/jenkins`
    pub server: String,

    /// Job identity
    pub job: JobInfo,

    /// Filename-derived metadata
    pub file: FileMetadata,

    /// Normalized payload
    pub payload: Payload,
}

/// Event emitted during artifact ingestion
///
/// Subscribe via [`ArtifactEngine::subscribe`](crate::ArtifactEngine::subscribe).
/// Events are broadcast; the engine never blocks on slow subscribers.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Fetch of an artifact started
    FetchStarted {
        /// Artifact URL
        url: String,
    },

    /// Bytes arrived for an in-flight fetch
    FetchProgress {
        /// Artifact URL
        url: String,
        /// Bytes transferred so far
        bytes: u64,
        /// Total bytes if the server sent a Content-Length
        #[serde(skip_serializing_if = "Option::is_none")]
        total: Option<u64>,
    },

    /// Fetch of an artifact completed
    FetchCompleted {
        /// Artifact URL
        url: String,
        /// Total bytes transferred
        bytes: u64,
    },

    /// Loading or parsing a payload failed; the descriptor carries
    /// [`Payload::Failed`] instead of records
    PayloadFailed {
        /// Artifact URL
        url: String,
        /// Artifact kind label of the failing strategy
        kind: String,
        /// Failure description
        reason: String,
    },
}
