//! JUnit-style XML report reading
//!
//! Streams a report document and collects the names of test cases whose
//! result entry matches a target [`ResultKind`]. A test case is classified by
//! its first result child (`<failure>`, `<skipped>` or `<error>`); cases with
//! no result child passed and are never collected. Only conformance a
//! JUnit-style document already provides is assumed — no schema validation.

use crate::error::{Error, Result};
use crate::kind::ResultKind;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Collect the names of all test cases carrying the target result kind
///
/// Names are returned in document order. Zero matching cases is a valid,
/// empty result.
///
/// # Errors
///
/// Returns [`Error::MalformedArtifact`] when the document fails to parse or a
/// collected test case is missing its `name` attribute.
pub fn collect_case_names(xml: &[u8], kind: ResultKind) -> Result<Vec<String>> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut names = Vec::new();

    let mut in_case = false;
    // Name of the currently open test case, if it carries one.
    let mut case_name: Option<String> = None;
    // Whether the open case's first result child has already been seen.
    let mut classified = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Err(e) => {
                return Err(Error::MalformedArtifact(format!(
                    "XML parse error at byte {}: {}",
                    reader.buffer_position(),
                    e
                )));
            }
            Ok(Event::Eof) => break,
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                match e.local_name().as_ref() {
                    b"testcase" => {
                        // A self-closing testcase has no result children: it
                        // passed and stays uncollected.
                        in_case = true;
                        case_name = attribute_value(&e, "name")?;
                        classified = false;
                    }
                    tag @ (b"failure" | b"skipped" | b"error") => {
                        if in_case && !classified {
                            classified = true;
                            if tag == kind.tag().as_bytes() {
                                let name = case_name.clone().ok_or_else(|| {
                                    Error::MalformedArtifact(
                                        "testcase element without a name attribute".to_string(),
                                    )
                                })?;
                                names.push(name);
                            }
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::End(e)) => {
                if e.local_name().as_ref() == b"testcase" {
                    in_case = false;
                    case_name = None;
                }
            }
            Ok(_) => {}
        }
        buf.clear();
    }

    Ok(names)
}

/// An unescaped attribute value, if the attribute is present
fn attribute_value(element: &BytesStart<'_>, attribute: &str) -> Result<Option<String>> {
    element
        .try_get_attribute(attribute)
        .map_err(|e| Error::MalformedArtifact(format!("bad testcase attribute: {}", e)))?
        .map(|attr| {
            attr.unescape_value()
                .map(|value| value.into_owned())
                .map_err(|e| Error::MalformedArtifact(format!("bad attribute value: {}", e)))
        })
        .transpose()
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<testsuites>
  <testsuite name="pyadi-iio" tests="5" failures="1" skipped="1" errors="1">
    <testcase classname="test_ad9361" name="test_dcxo" time="0.01"/>
    <testcase classname="test_ad9361" name="test_rssi" time="0.40">
      <failure message="assert failed">traceback</failure>
    </testcase>
    <testcase classname="test_ad9361" name="test_loopback[1000000]" time="0.00">
      <skipped message="no hardware"/>
    </testcase>
    <testcase classname="test_ad9361" name="test_profile_write[lte_5.profile]" time="0.10">
      <error message="boom"/>
    </testcase>
    <testcase classname="test_ad9361" name="test_temp" time="0.02"/>
  </testsuite>
</testsuites>"#;

    #[test]
    fn collects_only_the_target_result_kind() {
        let failures = collect_case_names(REPORT.as_bytes(), ResultKind::Failure).unwrap();
        assert_eq!(failures, vec!["test_rssi"]);

        let skipped = collect_case_names(REPORT.as_bytes(), ResultKind::Skipped).unwrap();
        assert_eq!(skipped, vec!["test_loopback[1000000]"]);

        let errors = collect_case_names(REPORT.as_bytes(), ResultKind::Error).unwrap();
        assert_eq!(errors, vec!["test_profile_write[lte_5.profile]"]);
    }

    #[test]
    fn report_without_matching_cases_is_empty_not_an_error() {
        let xml = r#"<testsuite tests="1">
            <testcase name="test_ok"/>
        </testsuite>"#;
        let names = collect_case_names(xml.as_bytes(), ResultKind::Failure).unwrap();
        assert!(names.is_empty());
    }

    #[test]
    fn first_result_child_classifies_the_case() {
        let xml = r#"<testsuite>
            <testcase name="flaky">
                <failure message="first"/>
                <error message="second"/>
            </testcase>
        </testsuite>"#;
        let failures = collect_case_names(xml.as_bytes(), ResultKind::Failure).unwrap();
        assert_eq!(failures, vec!["flaky"]);
        let errors = collect_case_names(xml.as_bytes(), ResultKind::Error).unwrap();
        assert!(errors.is_empty());
    }

    #[test]
    fn escaped_names_are_unescaped() {
        let xml = r#"<testsuite>
            <testcase name="a &amp; b"><failure/></testcase>
        </testsuite>"#;
        let names = collect_case_names(xml.as_bytes(), ResultKind::Failure).unwrap();
        assert_eq!(names, vec!["a & b"]);
    }

    #[test]
    fn nameless_passing_case_is_tolerated() {
        let xml = r#"<testsuite><testcase/><testcase name="x"><failure/></testcase></testsuite>"#;
        let names = collect_case_names(xml.as_bytes(), ResultKind::Failure).unwrap();
        assert_eq!(names, vec!["x"]);
    }

    #[test]
    fn mismatched_end_tag_is_malformed() {
        let xml = r#"<testsuite><testcase name="x"></wrong></testsuite>"#;
        let err = collect_case_names(xml.as_bytes(), ResultKind::Failure).unwrap_err();
        assert!(matches!(err, Error::MalformedArtifact(_)));
    }

    #[test]
    fn nameless_collected_case_is_malformed() {
        let xml = r#"<testsuite><testcase><failure/></testcase></testsuite>"#;
        let err = collect_case_names(xml.as_bytes(), ResultKind::Failure).unwrap_err();
        assert!(matches!(err, Error::MalformedArtifact(_)));
    }
}
