// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for bazel-junit5

use std::path::PathBuf;

use bazel_junit5_reflect::ReflectError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur while adapting a Bazel test invocation
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The test filter names a class that cannot be loaded
    #[error("Cannot resolve test class '{class_name}': {source}")]
    ClassResolution {
        /// Class part of the test filter
        class_name: String,
        /// Underlying lookup failure
        #[source]
        source: ReflectError,
    },

    /// The launcher's report was not where it should be
    #[error(
        "Failed to move report {} to {}: {source}",
        .source_path.display(),
        .destination.display()
    )]
    FileRelocation {
        /// Fixed-name report written by the launcher
        source_path: PathBuf,
        /// Report path requested by Bazel
        destination: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// The wrapped launcher could not be started
    #[error("Failed to launch {}: {source}", .program.display())]
    Launch {
        /// Program that was spawned
        program: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Failed to serialize the launch plan
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
