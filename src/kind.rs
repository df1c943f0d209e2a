//! Artifact kind matching
//!
//! Maps an artifact URL against an ordered rule table to select extraction
//! strategies. The strategy set is a closed enum — [`ArtifactKind`] — rather
//! than an open class hierarchy: each variant carries its normalized kind
//! label and, for XML report variants, the JUnit result classification it
//! filters on.
//!
//! Rule order is load-bearing: the three dmesg patterns overlap, and the
//! structurally-specific `err`/`warn` rules must only be reached when the
//! generic rule's stricter board-token character class has already rejected
//! the filename (an underscore before `err`/`warn` defeats the generic rule).

use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// JUnit-style result classification targeted by a report strategy
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
    /// `<failure>` result entries
    Failure,
    /// `<skipped>` result entries
    Skipped,
    /// `<error>` result entries
    Error,
}

impl ResultKind {
    /// The XML element tag this classification matches
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            ResultKind::Failure => "failure",
            ResultKind::Skipped => "skipped",
            ResultKind::Error => "error",
        }
    }
}

/// Closed set of artifact extraction strategies
///
/// One URL selects one strategy for text artifacts, or three (one per
/// [`ResultKind`]) for XML report artifacts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    /// Generic kernel log excerpt, `dmesg_<board>.log`
    Dmesg,
    /// Kernel error log, `dmesg_<board>_err.log`
    DmesgError,
    /// Kernel warning log, `dmesg_<board>_warn.log`
    DmesgWarning,
    /// Device enumeration log, `<board>_enumerated_devs.log`
    EnumeratedDevs,
    /// Missing-device log, `<board>_missing_devs.log`
    MissingDevs,
    /// pytest XML report, failure cases
    PytestFailure,
    /// pytest XML report, skipped cases
    PytestSkipped,
    /// pytest XML report, error cases
    PytestError,
    /// MATLAB hardware-test XML report, failure cases
    MatlabFailure,
    /// MATLAB hardware-test XML report, skipped cases
    MatlabSkipped,
    /// MATLAB hardware-test XML report, error cases
    MatlabError,
}

impl ArtifactKind {
    /// Normalized lower-case label for this strategy
    ///
    /// For XML report variants this doubles as the descriptor's
    /// `artifact_kind` string; for every variant it is part of the unique
    /// staging path and of log/event fields.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            ArtifactKind::Dmesg => "dmesg",
            ArtifactKind::DmesgError => "dmesg_error",
            ArtifactKind::DmesgWarning => "dmesg_warning",
            ArtifactKind::EnumeratedDevs => "enumerated_devs",
            ArtifactKind::MissingDevs => "missing_devs",
            ArtifactKind::PytestFailure => "pytest_failure",
            ArtifactKind::PytestSkipped => "pytest_skipped",
            ArtifactKind::PytestError => "pytest_error",
            ArtifactKind::MatlabFailure => "matlab_failure",
            ArtifactKind::MatlabSkipped => "matlab_skipped",
            ArtifactKind::MatlabError => "matlab_error",
        }
    }

    /// The result classification this strategy filters on, for XML report
    /// variants; `None` for text artifact variants
    #[must_use]
    pub fn result_kind(&self) -> Option<ResultKind> {
        match self {
            ArtifactKind::PytestFailure | ArtifactKind::MatlabFailure => Some(ResultKind::Failure),
            ArtifactKind::PytestSkipped | ArtifactKind::MatlabSkipped => Some(ResultKind::Skipped),
            ArtifactKind::PytestError | ArtifactKind::MatlabError => Some(ResultKind::Error),
            _ => None,
        }
    }

    /// True for XML report strategies
    #[must_use]
    pub fn is_report(&self) -> bool {
        self.result_kind().is_some()
    }
}

/// Ordered rule table: pattern → strategies, first match wins.
///
/// Patterns are anchored at the string start and matched as prefixes of the
/// full URL, not just the filename.
static RULES: LazyLock<Vec<(Regex, &'static [ArtifactKind])>> = LazyLock::new(|| {
    vec![
        rule(r"^.*dmesg_[a-zA-Z0-9-]+\.log", &[ArtifactKind::Dmesg]),
        rule(r"^.*dmesg_.+err\.log", &[ArtifactKind::DmesgError]),
        rule(r"^.*dmesg_.+warn\.log", &[ArtifactKind::DmesgWarning]),
        rule(r"^.*enumerated_devs\.log", &[ArtifactKind::EnumeratedDevs]),
        rule(r"^.*missing_devs\.log", &[ArtifactKind::MissingDevs]),
        rule(
            r"^.*pyadi-iio.*\.xml",
            &[
                ArtifactKind::PytestFailure,
                ArtifactKind::PytestSkipped,
                ArtifactKind::PytestError,
            ],
        ),
        rule(
            r"^.*HWTestResults\.xml",
            &[
                ArtifactKind::MatlabFailure,
                ArtifactKind::MatlabSkipped,
                ArtifactKind::MatlabError,
            ],
        ),
    ]
});

fn rule(pattern: &str, kinds: &'static [ArtifactKind]) -> (Regex, &'static [ArtifactKind]) {
    // Patterns are fixed at compile time; an invalid one is a programmer error.
    #[allow(clippy::expect_used)]
    let re = Regex::new(pattern).expect("invalid artifact kind rule pattern");
    (re, kinds)
}

/// Select the extraction strategies for a URL
///
/// Returns one strategy for text artifacts, three for XML report artifacts
/// (one per result kind), in rule-table order.
///
/// # Errors
///
/// Returns [`Error::UnknownArtifactKind`] if no rule matches. Permanent; not
/// retried.
pub fn match_url(url: &str) -> Result<Vec<ArtifactKind>> {
    for (pattern, kinds) in RULES.iter() {
        if pattern.is_match(url) {
            return Ok(kinds.to_vec());
        }
    }
    Err(Error::UnknownArtifactKind(url.to_string()))
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generic_dmesg_url_selects_one_strategy() {
        let kinds =
            match_url("https://ci/jenkins/job/a/job/b/1/artifact/dmesg_zynq.log").unwrap();
        assert_eq!(kinds, vec![ArtifactKind::Dmesg]);
    }

    #[test]
    fn err_log_is_never_classified_as_generic_dmesg() {
        // The underscore before "err" defeats the generic rule's board
        // character class, so the err rule is reached.
        let kinds =
            match_url("https://ci/jenkins/job/a/job/b/1/artifact/dmesg_zynq_err.log").unwrap();
        assert_eq!(kinds, vec![ArtifactKind::DmesgError]);
    }

    #[test]
    fn warn_log_selects_warning_strategy() {
        let kinds =
            match_url("https://ci/jenkins/job/a/job/b/1/artifact/dmesg_zynq_warn.log").unwrap();
        assert_eq!(kinds, vec![ArtifactKind::DmesgWarning]);
    }

    #[test]
    fn hyphenated_board_stays_generic() {
        let kinds =
            match_url("https://ci/jenkins/job/a/job/b/1/artifact/dmesg_zynq-adrv9371.log")
                .unwrap();
        assert_eq!(kinds, vec![ArtifactKind::Dmesg]);
    }

    #[test]
    fn device_list_logs_match_their_rules() {
        let kinds = match_url("https://ci/x/job/a/job/b/1/artifact/zynq_enumerated_devs.log")
            .unwrap();
        assert_eq!(kinds, vec![ArtifactKind::EnumeratedDevs]);

        let kinds =
            match_url("https://ci/x/job/a/job/b/1/artifact/zynq_missing_devs.log").unwrap();
        assert_eq!(kinds, vec![ArtifactKind::MissingDevs]);
    }

    #[test]
    fn pytest_report_yields_three_strategies() {
        let kinds = match_url(
            "https://ci/x/job/a/job/b/1/artifact/zynq_pyadi-iio_reports.xml",
        )
        .unwrap();
        assert_eq!(
            kinds,
            vec![
                ArtifactKind::PytestFailure,
                ArtifactKind::PytestSkipped,
                ArtifactKind::PytestError,
            ]
        );
    }

    #[test]
    fn matlab_report_yields_three_strategies() {
        let kinds =
            match_url("https://ci/x/job/a/job/b/1/artifact/AD9361_HWTestResults.xml").unwrap();
        assert_eq!(
            kinds,
            vec![
                ArtifactKind::MatlabFailure,
                ArtifactKind::MatlabSkipped,
                ArtifactKind::MatlabError,
            ]
        );
    }

    #[test]
    fn unmatched_url_is_an_error() {
        let err = match_url("https://ci/x/job/a/job/b/1/artifact/console.txt").unwrap_err();
        assert!(matches!(err, Error::UnknownArtifactKind(_)));
    }

    #[test]
    fn report_variants_carry_their_result_kind() {
        assert_eq!(
            ArtifactKind::PytestFailure.result_kind(),
            Some(ResultKind::Failure)
        );
        assert_eq!(
            ArtifactKind::MatlabSkipped.result_kind(),
            Some(ResultKind::Skipped)
        );
        assert_eq!(ArtifactKind::Dmesg.result_kind(), None);
        assert!(ArtifactKind::PytestError.is_report());
        assert!(!ArtifactKind::MissingDevs.is_report());
    }
}
