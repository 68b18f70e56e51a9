// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Configuration for the bazel-junit5 launcher adapter
//!
//! Bazel communicates with test runners mostly through environment variables
//! (`TESTBRIDGE_TEST_ONLY`, `XML_OUTPUT_FILE`, `JAVABIN`, ...). Every one of
//! them can also be given as a flag, which is handy when debugging a test
//! outside of `bazel test`.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use bazel_junit5_reflect::ClassPath;
use clap::Parser;

/// Main class of the JUnit Platform console launcher
pub const DEFAULT_LAUNCHER_MAIN: &str = "org.junit.platform.console.ConsoleLauncher";

/// Java executable used when `JAVABIN` is not set
pub const DEFAULT_JAVA: &str = "java";

/// Bazel JUnit 5 launcher - runs the JUnit Platform console launcher under `bazel test`
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "bazel-junit5")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Test filter (`bazel test --test_filter`)
    ///
    /// Accepts `package`, `Class`, `Class#method`, `Class#method$` or
    /// `Class#method(paramTypes)`.
    #[arg(long, env = "TESTBRIDGE_TEST_ONLY")]
    pub test_filter: Option<String>,

    /// Path where Bazel expects the JUnit XML report
    #[arg(long, env = "XML_OUTPUT_FILE")]
    pub xml_output_file: Option<PathBuf>,

    /// Runtime classpath of the test, used for class lookup and passed to java
    #[arg(long, env = "CLASSPATH")]
    pub launcher_classpath: Option<OsString>,

    /// Java executable
    ///
    /// Defaults to `java` on the PATH.
    #[arg(long, env = "JAVABIN")]
    pub java: Option<PathBuf>,

    /// Main class of the wrapped console launcher
    #[arg(long, env = "BAZEL_JUNIT5_LAUNCHER_MAIN")]
    pub launcher_main: Option<String>,

    /// Print the launch plan as JSON instead of running it
    #[arg(long, default_value = "false")]
    pub dry_run: bool,

    /// Enable verbose logging (debug level)
    ///
    /// Logs are written to stderr so they never mix with launcher output.
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,

    /// Arguments forwarded to the console launcher
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub launcher_args: Vec<String>,
}

impl Config {
    /// The test filter, if one was given and is non-empty
    #[must_use]
    pub fn test_filter(&self) -> Option<&str> {
        self.test_filter.as_deref().filter(|s| !s.is_empty())
    }

    /// The requested report path, if one was given and is non-empty
    #[must_use]
    pub fn xml_output_file(&self) -> Option<&Path> {
        self.xml_output_file
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
    }

    /// The classpath used for class lookup
    #[must_use]
    pub fn class_path(&self) -> ClassPath {
        self.launcher_classpath
            .as_ref()
            .map(ClassPath::parse)
            .unwrap_or_default()
    }

    /// The java executable, defaulting to `java`
    #[must_use]
    pub fn java_binary(&self) -> PathBuf {
        self.java
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_JAVA))
    }

    /// The launcher main class, defaulting to the JUnit console launcher
    #[must_use]
    pub fn main_class(&self) -> &str {
        self.launcher_main
            .as_deref()
            .unwrap_or(DEFAULT_LAUNCHER_MAIN)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The java executable or main class is given but empty
    /// - The report path points at an existing directory
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.java.as_ref().is_some_and(|p| p.as_os_str().is_empty()) {
            return Err(ConfigError::EmptyJavaBinary);
        }
        if self.launcher_main.as_ref().is_some_and(|m| m.trim().is_empty()) {
            return Err(ConfigError::EmptyMainClass);
        }
        if let Some(report) = self.xml_output_file() {
            if report.is_dir() {
                return Err(ConfigError::ReportPathIsDirectory(report.to_path_buf()));
            }
        }
        Ok(())
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `--java` / `JAVABIN` was set to an empty value
    #[error("Java executable must not be empty")]
    EmptyJavaBinary,

    /// `--launcher-main` was set to an empty value
    #[error("Launcher main class must not be empty")]
    EmptyMainClass,

    /// `XML_OUTPUT_FILE` names a directory
    #[error("Report path is a directory: {0}")]
    ReportPathIsDirectory(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.test_filter().is_none());
        assert!(config.xml_output_file().is_none());
        assert!(config.class_path().is_empty());
        assert!(!config.dry_run);
        assert!(!config.verbose);
        assert!(!config.quiet);
        assert!(config.launcher_args.is_empty());
    }

    #[test]
    fn test_empty_values_are_absent() {
        let config = Config {
            test_filter: Some(String::new()),
            xml_output_file: Some(PathBuf::new()),
            ..Default::default()
        };
        assert!(config.test_filter().is_none());
        assert!(config.xml_output_file().is_none());
    }

    #[test]
    fn test_java_binary_default() {
        assert_eq!(Config::default().java_binary(), PathBuf::from("java"));
    }

    #[test]
    fn test_java_binary_custom() {
        let config = Config {
            java: Some(PathBuf::from("/opt/jdk/bin/java")),
            ..Default::default()
        };
        assert_eq!(config.java_binary(), PathBuf::from("/opt/jdk/bin/java"));
    }

    #[test]
    fn test_main_class_default() {
        assert_eq!(Config::default().main_class(), DEFAULT_LAUNCHER_MAIN);
    }

    #[test]
    fn test_class_path_parsed() {
        let joined = std::env::join_paths(["/nonexistent/a.jar", "/nonexistent/b.jar"])
            .expect("join paths");
        let config = Config {
            launcher_classpath: Some(joined),
            ..Default::default()
        };
        assert_eq!(config.class_path().entries().len(), 2);
    }

    #[test]
    fn test_log_level_default() {
        assert_eq!(Config::default().log_level(), tracing::Level::INFO);
    }

    #[test]
    fn test_log_level_verbose() {
        let config = Config {
            verbose: true,
            ..Default::default()
        };
        assert_eq!(config.log_level(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_log_level_quiet() {
        let config = Config {
            quiet: true,
            ..Default::default()
        };
        assert_eq!(config.log_level(), tracing::Level::WARN);
    }

    #[test]
    fn test_validate_empty_java() {
        let config = Config {
            java: Some(PathBuf::new()),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::EmptyJavaBinary)));
    }

    #[test]
    fn test_validate_empty_main_class() {
        let config = Config {
            launcher_main: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::EmptyMainClass)));
    }

    #[test]
    fn test_validate_report_directory() {
        let config = Config {
            xml_output_file: Some(std::env::temp_dir()),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ReportPathIsDirectory(_))
        ));
    }

    #[test]
    fn test_validate_default() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Config::command().debug_assert();
    }
}
