//! Jenkins job URL identity resolution
//!
//! Every pipeline stage downstream of this module relies on the URL being
//! "multilevel": a nested-job URL whose path contains at least two `/job/`
//! segment groups, e.g.
//! `https://ci.example.com/jenkins/job/hw-tests/job/nightly/42/artifact/dmesg_zynq_err.log`.
//! Single-level job URLs are a permanent input error, never retried.
//!
//! Job identity comes from fixed path-segment positions (1-indexed after the
//! leading slash): `job = seg[3] + "/" + seg[5]`, `job_number = seg[6]`. The
//! positional contract assumes the standard nested-job path depth
//! `/<root>/job/<folder>/job/<name>/<build>/artifact/…` and is load-bearing;
//! a path too short to index is rejected up front instead of silently
//! producing wrong identity metadata.

use crate::error::{Error, Result};
use url::Url;

/// Path segment index of the job folder name
const JOB_FOLDER_SEGMENT: usize = 3;
/// Path segment index of the job name
const JOB_NAME_SEGMENT: usize = 5;
/// Path segment index of the build number
const JOB_NUMBER_SEGMENT: usize = 6;

/// Identity metadata resolved from a multilevel Jenkins artifact URL
///
/// Construction validates the multilevel invariant, so holding a `UrlInfo`
/// guarantees every downstream stage a well-shaped URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UrlInfo {
    /// The original URL string
    pub url: String,
    /// Server origin including the CI root path segment,
    /// e.g. `https://ci.example.com/jenkins`
    pub server: String,
    /// Job name, `<folder>/<name>`
    pub job: String,
    /// Build number as it appears in the path
    pub job_number: String,
    /// Last path segment
    pub file_name: String,
}

impl UrlInfo {
    /// Resolve identity metadata from a raw artifact URL
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedUrlShape`] if the URL does not parse, is
    /// not multilevel, or its path is too short for the positional job
    /// identity contract. No network access happens here or anywhere before
    /// this check passes.
    pub fn resolve(url: &str) -> Result<Self> {
        let parsed = Url::parse(url).map_err(|e| Error::UnsupportedUrlShape {
            url: url.to_string(),
            reason: format!("not a valid URL: {}", e),
        })?;

        let path = parsed.path();
        if path.matches("/job/").count() < 2 {
            return Err(Error::UnsupportedUrlShape {
                url: url.to_string(),
                reason: "single-level job URLs are not supported".to_string(),
            });
        }

        // Leading slash makes segments[0] empty, so indices line up with the
        // 1-indexed positional contract.
        let segments: Vec<&str> = path.split('/').collect();
        if segments.len() <= JOB_NUMBER_SEGMENT {
            return Err(Error::UnsupportedUrlShape {
                url: url.to_string(),
                reason: "path too short to carry job name and build number".to_string(),
            });
        }

        let server = format!(
            "{}/{}",
            parsed.origin().ascii_serialization(),
            segments[1]
        );
        let job = format!(
            "{}/{}",
            segments[JOB_FOLDER_SEGMENT], segments[JOB_NAME_SEGMENT]
        );
        let job_number = segments[JOB_NUMBER_SEGMENT].to_string();
        let file_name = segments
            .last()
            .copied()
            .unwrap_or_default()
            .to_string();

        Ok(Self {
            url: url.to_string(),
            server,
            job,
            job_number,
            file_name,
        })
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_nested_job_url() {
        let info = UrlInfo::resolve(
            "https://ci.example.com/jenkins/job/HW_tests/job/nightly/42/artifact/logs/dmesg_zynq_err.log",
        )
        .unwrap();
        assert_eq!(info.server, "https://ci.example.com/jenkins");
        assert_eq!(info.job, "HW_tests/nightly");
        assert_eq!(info.job_number, "42");
        assert_eq!(info.file_name, "dmesg_zynq_err.log");
    }

    #[test]
    fn keeps_explicit_port_in_server() {
        let info = UrlInfo::resolve(
            "http://ci:8080/jenkins/job/a/job/b/7/artifact/x_enumerated_devs.log",
        )
        .unwrap();
        assert_eq!(info.server, "http://ci:8080/jenkins");
    }

    #[test]
    fn rejects_single_level_job_url() {
        let err = UrlInfo::resolve(
            "https://ci.example.com/jenkins/job/only/42/artifact/dmesg_zynq.log",
        )
        .unwrap_err();
        assert!(matches!(err, Error::UnsupportedUrlShape { .. }));
    }

    #[test]
    fn rejects_path_too_short_for_identity() {
        // Two /job/ groups but nothing after the job name
        let err = UrlInfo::resolve("https://ci.example.com/r/job/a/job/b").unwrap_err();
        assert!(matches!(err, Error::UnsupportedUrlShape { .. }));
    }

    #[test]
    fn rejects_garbage_input() {
        let err = UrlInfo::resolve("not a url at all").unwrap_err();
        assert!(matches!(err, Error::UnsupportedUrlShape { .. }));
    }
}
