// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Launcher argument transformation

use std::path::Path;

use bazel_junit5_reflect::ClassResolver;
use tracing::debug;

use crate::error::BridgeError;
use crate::filter::parse_filter;
use crate::options::filter_options;

/// Options removed from the raw arguments when a test filter is present
pub const SCRUBBED_OPTIONS: &[&str] = &["select-package"];

/// Build the console launcher arguments for a Bazel test invocation
///
/// With a non-empty `test_filter`, any `--select-package` in `raw_args` is
/// dropped and the filter's selection flags are appended. With a non-empty
/// `xml_output_file`, `--reports-dir=<its parent>` is appended so the
/// launcher writes its report next to where Bazel expects it.
///
/// # Errors
///
/// Returns `BridgeError::ClassResolution` if the filter names a method on a
/// class that cannot be loaded.
pub fn transform_args<R: ClassResolver + ?Sized>(
    raw_args: &[String],
    test_filter: Option<&str>,
    xml_output_file: Option<&Path>,
    resolver: &R,
) -> Result<Vec<String>, BridgeError> {
    let mut args = match test_filter.filter(|f| !f.is_empty()) {
        Some(filter) => {
            let selection = parse_filter(filter, resolver)?;
            let mut args = filter_options(raw_args, SCRUBBED_OPTIONS);
            args.extend(selection.into_iter().map(String::from));
            args
        }
        None => raw_args.to_vec(),
    };

    if let Some(report) = xml_output_file.filter(|p| !p.as_os_str().is_empty()) {
        args.push(format!("--reports-dir={}", reports_dir(report).display()));
    }

    debug!("Launcher arguments: {:?}", args);
    Ok(args)
}

/// Directory the launcher should write its report into
///
/// This is the parent of `xml_output_file`, or `.` for a bare file name.
#[must_use]
pub fn reports_dir(xml_output_file: &Path) -> &Path {
    match xml_output_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
