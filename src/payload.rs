//! Raw payload loading
//!
//! Fetches an artifact's bytes through the [`Fetch`] collaborator, stages
//! them locally, and reads them back as the strategy's raw payload: trimmed
//! text lines for log artifacts, result-kind-filtered test-case names for XML
//! reports. The staged file is gone by the time this module returns, on every
//! exit path.

use crate::config::Config;
use crate::error::Result;
use crate::fetch::{Fetch, ProgressFn};
use crate::junit;
use crate::kind::ArtifactKind;
use crate::staging::StagedFile;
use crate::url_info::UrlInfo;

/// A loaded raw payload plus transfer accounting
#[derive(Debug)]
pub struct LoadedPayload {
    /// Raw entries: text lines, or test-case names filtered by result kind
    pub entries: Vec<String>,
    /// Bytes transferred by the fetch
    pub bytes: u64,
}

/// Fetch, stage and read one artifact's raw payload
///
/// # Errors
///
/// Returns [`Error::Fetch`](crate::Error::Fetch) after retry exhaustion,
/// [`Error::MalformedArtifact`](crate::Error::MalformedArtifact) for
/// unparseable reports, and [`Error::Io`](crate::Error::Io) for staging
/// failures. Callers assembling descriptors convert these into
/// [`Payload::Failed`](crate::types::Payload) rather than aborting.
pub async fn load(
    fetcher: &dyn Fetch,
    config: &Config,
    info: &UrlInfo,
    kind: ArtifactKind,
    progress: &ProgressFn,
) -> Result<LoadedPayload> {
    let bytes = fetcher.fetch(&info.url, progress).await?;

    // Job number and strategy label make the staging path unique across the
    // concurrently-running strategies of one report file.
    let staging_name = format!("{}-{}-{}", info.job_number, kind.label(), info.file_name);
    let staged = StagedFile::write(&config.staging.staging_dir, &staging_name, &bytes).await?;

    let raw = tokio::fs::read(staged.path()).await?;
    let entries = match kind.result_kind() {
        Some(result_kind) => junit::collect_case_names(&raw, result_kind)?,
        None => String::from_utf8_lossy(&raw)
            .lines()
            .map(|line| line.trim().to_string())
            .collect(),
    };

    Ok(LoadedPayload {
        entries,
        bytes: bytes.len() as u64,
    })
}
