// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Report relocation
//!
//! The console launcher always names its XML report `TEST-junit-jupiter.xml`
//! inside `--reports-dir`. Bazel wants it at `XML_OUTPUT_FILE`, so once the
//! launcher exits the report is moved there.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::BridgeError;
use crate::transform::reports_dir;

/// File name of the launcher's legacy XML report
pub const LEGACY_REPORT_FILE_NAME: &str = "TEST-junit-jupiter.xml";

/// Where the launcher writes its report for a given `XML_OUTPUT_FILE`
#[must_use]
pub fn launcher_report_path(xml_output_file: &Path) -> PathBuf {
    reports_dir(xml_output_file).join(LEGACY_REPORT_FILE_NAME)
}

/// Move the launcher's report to `xml_output_file`
///
/// Any existing file at the destination is replaced. Returns the path the
/// report was moved from.
///
/// # Errors
///
/// Returns `BridgeError::FileRelocation` if the launcher's report does not
/// exist or cannot be moved.
pub fn relocate_report(xml_output_file: &Path) -> Result<PathBuf, BridgeError> {
    let source_path = launcher_report_path(xml_output_file);
    let relocation_error = |source| BridgeError::FileRelocation {
        source_path: source_path.clone(),
        destination: xml_output_file.to_path_buf(),
        source,
    };

    if !source_path.is_file() {
        return Err(relocation_error(io::Error::new(
            io::ErrorKind::NotFound,
            "launcher did not write a report",
        )));
    }
    if source_path == xml_output_file {
        debug!("Report already at {}", xml_output_file.display());
        return Ok(source_path);
    }

    move_file(&source_path, xml_output_file).map_err(relocation_error)?;
    debug!(
        "Moved report {} to {}",
        source_path.display(),
        xml_output_file.display()
    );
    Ok(source_path)
}

/// Rename, falling back to copy and remove across filesystems
fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    if let Some(parent) = to.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) => {
            debug!("Rename failed ({}), copying instead", e);
            fs::copy(from, to)?;
            fs::remove_file(from)
        }
    }
}
