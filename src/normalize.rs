//! Record normalization
//!
//! Converts raw payload entries into [`Record`]s. Text artifacts go line by
//! line: a line carrying a `[  <seconds>.<fraction>]` timestamp becomes
//! [`Record::Timed`], anything else a [`Record::Named`] with no parameter.
//! XML report artifacts go test-case name by test-case name through a fixed
//! rewrite chain; the substitution order is part of the contract (dashes must
//! be collapsed before the name is split at its first bracket).

use crate::types::Record;
use regex::Regex;
use std::sync::LazyLock;

/// Keywords whose presence routes parameter extraction through the
/// profile-filename carve-out
const PROFILE_KEYWORDS: [&str; 2] = ["profile_write", "write_profile"];

/// `[   12.345] message` — kernel log timestamp prefix. The lazy gap keeps
/// the capture anchored at the first digit run, so the full timestamp is
/// captured rather than its tail.
static TIMESTAMP_RE: LazyLock<Regex> = LazyLock::new(|| compiled(r"\[.*?(\d+\.\d*)\]\s(.*)"));

/// Trailing `-adi.<device>` suffix appended to test-case names
static DEVICE_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| compiled(r"-adi\.\w*"));

/// Runs of consecutive dashes
static DASH_RUN_RE: LazyLock<Regex> = LazyLock::new(|| compiled(r"-+"));

/// Bare `<name>.<ext>` filename in front of the closing bracket, used by the
/// profile carve-out to discard any path-looking prefix
static PROFILE_PARAM_RE: LazyLock<Regex> = LazyLock::new(|| compiled(r"(\w*\..*?)\]"));

fn compiled(pattern: &str) -> Regex {
    match Regex::new(pattern) {
        Ok(re) => re,
        // Patterns are fixed at compile time; an invalid one is a programmer error.
        Err(e) => unreachable!("invalid normalization pattern: {}", e),
    }
}

/// Normalize one raw text line
///
/// Emits [`Record::Timed`] when a timestamp is detected anywhere in the line,
/// otherwise a parameterless [`Record::Named`] holding the whole line.
pub fn normalize_line(line: &str) -> Record {
    match TIMESTAMP_RE.captures(line) {
        Some(caps) => Record::Timed {
            timestamp: caps[1].to_string(),
            message: caps[2].to_string(),
        },
        None => Record::named(line),
    }
}

/// Normalize one XML test-case name into a (procedure, parameter) record
///
/// The rewrite chain, in order:
/// 1. every `-adi.<device>` suffix is removed
/// 2. dash runs collapse to a single dash
/// 3. MATLAB-style parentheses become brackets
/// 4. the name splits at its first `[`; no bracket means no parameter
/// 5. the parameter is the bracket content without its trailing `]` — unless
///    the name mentions a profile write, in which case it is the bare
///    filename in front of the closing bracket, path prefix discarded
pub fn normalize_case_name(name: &str) -> Record {
    let name = DEVICE_SUFFIX_RE.replace_all(name, "");
    let name = DASH_RUN_RE.replace_all(&name, "-");
    let name = name.replace('(', "[").replace(')', "]");

    let Some((procedure, rest)) = name.split_once('[') else {
        return Record::named(name);
    };

    let parameter = if PROFILE_KEYWORDS.iter().any(|kw| name.contains(kw)) {
        profile_parameter(rest)
    } else {
        rest.strip_suffix(']').unwrap_or(rest).to_string()
    };

    Record::Named {
        procedure: procedure.to_string(),
        parameter,
    }
}

/// Extract the bare profile filename from bracket content, falling back to
/// the plain bracket-stripped content when no filename is present
fn profile_parameter(rest: &str) -> String {
    PROFILE_PARAM_RE
        .captures(rest)
        .map(|caps| caps[1].to_string())
        .unwrap_or_else(|| rest.strip_suffix(']').unwrap_or(rest).to_string())
}

/// Normalize an ordered sequence of raw text lines
pub fn normalize_lines<I, S>(lines: I) -> Vec<Record>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .map(|line| normalize_line(line.as_ref()))
        .collect()
}

/// Normalize an ordered sequence of XML test-case names
pub fn normalize_case_names<I, S>(names: I) -> Vec<Record>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .map(|name| normalize_case_name(name.as_ref()))
        .collect()
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NO_PARAMETER;

    #[test]
    fn line_with_timestamp_becomes_timed_record() {
        let record = normalize_line("[   12.345] some device probe failed");
        assert_eq!(
            record,
            Record::Timed {
                timestamp: "12.345".to_string(),
                message: "some device probe failed".to_string(),
            }
        );
    }

    #[test]
    fn timestamp_is_captured_whole() {
        // The whole digit run before the dot belongs to the timestamp.
        let record = normalize_line("[ 1234.567890] usb 1-1: reset");
        assert_eq!(
            record,
            Record::Timed {
                timestamp: "1234.567890".to_string(),
                message: "usb 1-1: reset".to_string(),
            }
        );
    }

    #[test]
    fn line_without_timestamp_becomes_named_record() {
        let record = normalize_line("iio:device0 ad9361-phy");
        assert_eq!(
            record,
            Record::Named {
                procedure: "iio:device0 ad9361-phy".to_string(),
                parameter: NO_PARAMETER.to_string(),
            }
        );
    }

    #[test]
    fn empty_line_is_a_named_record() {
        assert_eq!(normalize_line(""), Record::named(""));
    }

    #[test]
    fn case_name_without_bracket_has_no_parameter() {
        let record = normalize_case_name("test_dcxo");
        assert_eq!(record, Record::named("test_dcxo"));
    }

    #[test]
    fn bracket_content_becomes_parameter() {
        let record = normalize_case_name("spi-loopback(1000000)");
        assert_eq!(
            record,
            Record::Named {
                procedure: "spi-loopback".to_string(),
                parameter: "1000000".to_string(),
            }
        );
    }

    #[test]
    fn device_suffix_is_removed_before_split() {
        let record = normalize_case_name("test_phase_deviation-adi.ad9361[2000000000]");
        assert_eq!(
            record,
            Record::Named {
                procedure: "test_phase_deviation".to_string(),
                parameter: "2000000000".to_string(),
            }
        );
    }

    #[test]
    fn dash_runs_collapse_before_split() {
        // Removing the device suffix can leave doubled dashes behind.
        let record = normalize_case_name("tx--attn-adi.ad9364--sweep[10]");
        assert_eq!(
            record,
            Record::Named {
                procedure: "tx-attn-sweep".to_string(),
                parameter: "10".to_string(),
            }
        );
    }

    #[test]
    fn profile_write_parameter_discards_path_prefix() {
        let record =
            normalize_case_name("read-write-adi.ad9361(profile_write(path/to/file.profile))");
        assert_eq!(
            record,
            Record::Named {
                procedure: "read-write".to_string(),
                parameter: "file.profile".to_string(),
            }
        );
    }

    #[test]
    fn pytest_profile_write_keeps_bare_filename() {
        let record =
            normalize_case_name("test_profile_write[adi/ad9361/profiles/lte_5.profile]");
        assert_eq!(
            record,
            Record::Named {
                procedure: "test_profile_write".to_string(),
                parameter: "lte_5.profile".to_string(),
            }
        );
    }

    #[test]
    fn write_profile_keyword_also_triggers_carve_out() {
        let record = normalize_case_name("write_profile[profiles/custom.ftr]");
        assert_eq!(
            record,
            Record::Named {
                procedure: "write_profile".to_string(),
                parameter: "custom.ftr".to_string(),
            }
        );
    }

    #[test]
    fn sequences_preserve_order() {
        let records = normalize_lines(["first", "[  1.0] second"]);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], Record::named("first"));
        assert!(matches!(records[1], Record::Timed { .. }));
    }
}
