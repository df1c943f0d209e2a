//! Artifact ingestion engine
//!
//! Orchestrates the full pipeline for one URL: identity resolution → kind
//! matching → per-strategy metadata extraction, payload loading and record
//! normalization. Strategies selected for the same URL (the three result-kind
//! variants of an XML report) run concurrently; each owns disjoint state and a
//! uniquely-named staging path, so no coordination is needed.
//!
//! Identity and kind errors abort the whole pipeline for that URL before any
//! network access. Payload failures degrade to
//! [`Payload::Failed`] on the affected descriptor.

use crate::config::Config;
use crate::error::Result;
use crate::fetch::{Fetch, HttpFetcher};
use crate::kind::{self, ArtifactKind};
use crate::metadata;
use crate::normalize;
use crate::payload;
use crate::types::{ArtifactDescriptor, Event, JobInfo, Payload};
use crate::url_info::UrlInfo;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Broadcast channel capacity for ingestion events
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Artifact ingestion engine (cloneable - all fields are Arc-wrapped)
#[derive(Clone)]
pub struct ArtifactEngine {
    /// Fetch collaborator (trait object for pluggable implementations)
    fetcher: Arc<dyn Fetch>,
    /// Configuration (wrapped in Arc for sharing across tasks)
    config: Arc<Config>,
    /// Event broadcast channel sender (multiple subscribers supported)
    event_tx: broadcast::Sender<Event>,
}

impl ArtifactEngine {
    /// Create an engine with the production HTTP fetcher
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: Config) -> Result<Self> {
        let fetcher = Arc::new(HttpFetcher::new(&config)?);
        Ok(Self::with_fetcher(config, fetcher))
    }

    /// Create an engine with a custom fetch collaborator
    ///
    /// Useful for embedding (shared HTTP client pools) and for tests
    /// (fetch doubles).
    pub fn with_fetcher(config: Config, fetcher: Arc<dyn Fetch>) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            fetcher,
            config: Arc::new(config),
            event_tx,
        }
    }

    /// Subscribe to ingestion lifecycle events
    ///
    /// Events are broadcast; slow subscribers lag and miss events rather than
    /// blocking the engine.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    fn emit(&self, event: Event) {
        // A send error just means nobody is subscribed right now.
        let _ = self.event_tx.send(event);
    }

    /// Ingest one artifact URL into descriptors
    ///
    /// Returns one descriptor per selected strategy — one for text artifacts,
    /// three for XML reports — in rule-table order, regardless of fetch
    /// completion order. Re-running against unchanged remote content yields
    /// identical descriptors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedUrlShape`](crate::Error::UnsupportedUrlShape)
    /// or [`Error::UnknownArtifactKind`](crate::Error::UnknownArtifactKind)
    /// before any network access, and
    /// [`Error::MalformedArtifact`](crate::Error::MalformedArtifact) when a
    /// filename violates its family's token contract. Payload fetch/parse
    /// failures are not errors here; they surface as [`Payload::Failed`] on
    /// the affected descriptor.
    pub async fn ingest(&self, url: &str) -> Result<Vec<ArtifactDescriptor>> {
        let info = UrlInfo::resolve(url)?;
        let kinds = kind::match_url(url)?;
        tracing::info!(url = url, strategies = kinds.len(), "Ingesting artifact");

        let descriptors =
            futures::future::join_all(kinds.into_iter().map(|k| self.describe(&info, k))).await;
        descriptors.into_iter().collect()
    }

    /// Run one strategy against a resolved URL
    async fn describe(&self, info: &UrlInfo, kind: ArtifactKind) -> Result<ArtifactDescriptor> {
        let file = metadata::extract(info, kind)?;

        self.emit(Event::FetchStarted {
            url: info.url.clone(),
        });
        let progress_tx = self.event_tx.clone();
        let progress_url = info.url.clone();
        let progress = move |bytes: u64, total: Option<u64>| {
            let _ = progress_tx.send(Event::FetchProgress {
                url: progress_url.clone(),
                bytes,
                total,
            });
        };

        let loaded = payload::load(
            self.fetcher.as_ref(),
            &self.config,
            info,
            kind,
            &progress,
        )
        .await;

        let payload = match loaded {
            Ok(loaded) => {
                self.emit(Event::FetchCompleted {
                    url: info.url.clone(),
                    bytes: loaded.bytes,
                });
                let records = if kind.is_report() {
                    normalize::normalize_case_names(&loaded.entries)
                } else {
                    normalize::normalize_lines(&loaded.entries)
                };
                Payload::Records { records }
            }
            Err(e) => {
                tracing::warn!(
                    url = %info.url,
                    kind = kind.label(),
                    error = %e,
                    "Failed to load artifact payload"
                );
                self.emit(Event::PayloadFailed {
                    url: info.url.clone(),
                    kind: kind.label().to_string(),
                    reason: e.to_string(),
                });
                Payload::Failed {
                    reason: e.to_string(),
                }
            }
        };

        Ok(ArtifactDescriptor {
            url: info.url.clone(),
            server: info.server.clone(),
            job: JobInfo {
                job: info.job.clone(),
                job_number: info.job_number.clone(),
                job_date: None,
            },
            file,
            payload,
        })
    }
}
