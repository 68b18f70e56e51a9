// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! bazel-junit5 library
//!
//! Adapts a `bazel test` invocation to the JUnit Platform console launcher:
//! the Bazel test filter becomes `--select-*` flags, the report directory is
//! pointed at `XML_OUTPUT_FILE`, and the launcher's fixed-name report is moved
//! to where Bazel expects it once the run is over.

pub mod config;
pub mod error;
pub mod filter;
pub mod launcher;
pub mod options;
pub mod report;
pub mod transform;

pub use config::{Config, ConfigError};
pub use error::BridgeError;
pub use filter::{SelectionFlag, parse_filter};
pub use launcher::LaunchPlan;
pub use options::filter_options;
pub use report::{LEGACY_REPORT_FILE_NAME, relocate_report};
pub use transform::transform_args;
