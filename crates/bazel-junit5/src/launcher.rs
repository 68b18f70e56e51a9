// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Console launcher process
//!
//! The launcher runs in a child JVM with inherited stdio; its exit status is
//! what Bazel sees as the test result.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Command;

use serde::{Serialize, Serializer};
use tracing::info;

use crate::config::Config;
use crate::error::BridgeError;

/// Exit code reported when the launcher was killed by a signal
pub const SIGNALLED_EXIT_CODE: i32 = 1;

/// A fully resolved console launcher invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchPlan {
    /// Java executable
    pub program: PathBuf,
    /// Classpath passed with `-cp`, if any
    #[serde(serialize_with = "serialize_lossy")]
    pub class_path: Option<OsString>,
    /// Launcher main class
    pub main_class: String,
    /// Transformed launcher arguments
    pub launcher_args: Vec<String>,
    /// Where the report is relocated to after the run
    pub xml_output_file: Option<PathBuf>,
}

impl LaunchPlan {
    /// Build the invocation for `config` with already transformed arguments
    #[must_use]
    pub fn new(config: &Config, launcher_args: Vec<String>) -> Self {
        Self {
            program: config.java_binary(),
            class_path: config
                .launcher_classpath
                .clone()
                .filter(|cp| !cp.is_empty()),
            main_class: config.main_class().to_string(),
            launcher_args,
            xml_output_file: config.xml_output_file().map(PathBuf::from),
        }
    }

    /// Arguments passed to the java executable
    #[must_use]
    pub fn command_args(&self) -> Vec<OsString> {
        let mut args = Vec::with_capacity(self.launcher_args.len() + 3);
        if let Some(class_path) = &self.class_path {
            args.push(OsString::from("-cp"));
            args.push(class_path.clone());
        }
        args.push(OsString::from(&self.main_class));
        args.extend(self.launcher_args.iter().map(OsString::from));
        args
    }

    /// Run the launcher to completion and return its exit code
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::Launch` if the process cannot be started.
    pub fn run(&self) -> Result<i32, BridgeError> {
        info!(
            "Launching {} {}",
            self.program.display(),
            self.main_class
        );
        let status = Command::new(&self.program)
            .args(self.command_args())
            .status()
            .map_err(|source| BridgeError::Launch {
                program: self.program.clone(),
                source,
            })?;
        let code = status.code().unwrap_or(SIGNALLED_EXIT_CODE);
        info!("Launcher exited with code {}", code);
        Ok(code)
    }

    /// Pretty JSON rendering used by `--dry-run`
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::Json` if a path is not valid UTF-8.
    pub fn to_json(&self) -> Result<String, BridgeError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn serialize_lossy<S: Serializer>(value: &Option<OsString>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(value) => serializer.serialize_some(&value.to_string_lossy()),
        None => serializer.serialize_none(),
    }
}
