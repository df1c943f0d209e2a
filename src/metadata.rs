//! Filename metadata extraction
//!
//! Each strategy family derives `target_board` and `artifact_kind` from the
//! artifact filename in its own way:
//! - device-list logs put the board first (`<board>_enumerated_devs.log`)
//! - dmesg logs put the kind first (`dmesg_<board>[_err|_warn].log`)
//! - XML reports take the kind from the strategy itself and the board from the
//!   dashified filename with the report suffix stripped
//!
//! The multilevel URL invariant is enforced by construction: extraction takes
//! a [`UrlInfo`], which only exists for validated multilevel URLs.

use crate::error::{Error, Result};
use crate::kind::ArtifactKind;
use crate::types::FileMetadata;
use crate::url_info::UrlInfo;

/// Derive [`FileMetadata`] for one (URL, strategy) pair
///
/// # Errors
///
/// Returns [`Error::MalformedArtifact`] when the filename does not carry the
/// tokens its family requires (e.g. a device-list log with no board prefix).
pub fn extract(info: &UrlInfo, kind: ArtifactKind) -> Result<FileMetadata> {
    let file_name = info.file_name.as_str();
    if file_name.is_empty() {
        return Err(Error::MalformedArtifact(format!(
            "URL '{}' has no filename segment",
            info.url
        )));
    }

    let tokens: Vec<String> = file_name.split('_').map(str::to_string).collect();

    let (target_board, artifact_kind) = match kind {
        ArtifactKind::Dmesg | ArtifactKind::DmesgError | ArtifactKind::DmesgWarning => {
            dmesg_family(file_name, &tokens)?
        }
        ArtifactKind::EnumeratedDevs | ArtifactKind::MissingDevs => {
            device_list_family(file_name, &tokens)?
        }
        _ => report_family(file_name, kind),
    };

    Ok(FileMetadata {
        file_name: file_name.to_string(),
        tokens,
        target_board,
        artifact_kind,
    })
}

/// `dmesg_<board>.log` / `dmesg_<board>_err.log` / `dmesg_<board>_warn.log`:
/// kind token first, board second, optional severity third.
fn dmesg_family(file_name: &str, tokens: &[String]) -> Result<(String, String)> {
    if tokens.len() < 2 {
        return Err(Error::MalformedArtifact(format!(
            "dmesg filename '{}' is missing its board token",
            file_name
        )));
    }
    let target_board = tokens[1].clone();
    let mut artifact_kind = tokens[0].clone();
    if tokens.len() == 3 {
        artifact_kind.push('_');
        artifact_kind.push_str(&tokens[2]);
    }
    Ok((target_board, strip_suffix_if(&artifact_kind, ".log")))
}

/// `<board>_enumerated_devs.log` / `<board>_missing_devs.log`: board token
/// first, two kind tokens after it.
fn device_list_family(file_name: &str, tokens: &[String]) -> Result<(String, String)> {
    if tokens.len() < 3 {
        return Err(Error::MalformedArtifact(format!(
            "device-list filename '{}' is missing its board token",
            file_name
        )));
    }
    let target_board = tokens[0].clone();
    let artifact_kind = format!("{}_{}", tokens[1], tokens[2]);
    Ok((target_board, strip_suffix_if(&artifact_kind, ".log")))
}

/// XML reports: the kind string is static per strategy, the board is the
/// dashified filename with its report suffix stripped.
fn report_family(file_name: &str, kind: ArtifactKind) -> (String, String) {
    let board = file_name.replace('_', "-");
    let board = strip_suffix_if(&board, "-reports.xml");
    let board = strip_suffix_if(&board, "-HWTestResults.xml");
    (board, kind.label().to_string())
}

fn strip_suffix_if(s: &str, suffix: &str) -> String {
    s.strip_suffix(suffix).unwrap_or(s).to_string()
}
