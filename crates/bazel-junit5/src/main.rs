// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! bazel-junit5: JUnit 5 console launcher adapter for `bazel test`
//!
//! Reads Bazel's test environment, rewrites the launcher arguments, runs the
//! launcher and hands its report back to Bazel. The launcher's exit code is
//! this process's exit code.

use std::process::ExitCode;

use anyhow::Context;
use bazel_junit5::config::Config;
use bazel_junit5::launcher::LaunchPlan;
use bazel_junit5::report::relocate_report;
use bazel_junit5::transform::transform_args;
use clap::Parser;
use tracing::{debug, error};

/// Exit code for failures of the adapter itself
const ADAPTER_FAILURE_EXIT_CODE: u8 = 2;

fn main() -> ExitCode {
    let config = Config::parse();

    // Logs go to stderr; stdout belongs to the launcher
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(&config) {
        Ok(code) => exit_code(code),
        Err(e) => {
            error!("{:#}", e);
            ExitCode::from(ADAPTER_FAILURE_EXIT_CODE)
        }
    }
}

fn run(config: &Config) -> anyhow::Result<i32> {
    config.validate().context("Invalid configuration")?;

    let class_path = config.class_path();
    debug!("Class lookup uses {} classpath entries", class_path.entries().len());

    let launcher_args = transform_args(
        &config.launcher_args,
        config.test_filter(),
        config.xml_output_file(),
        &class_path,
    )
    .context("Failed to build launcher arguments")?;

    let plan = LaunchPlan::new(config, launcher_args);
    if config.dry_run {
        println!("{}", plan.to_json()?);
        return Ok(0);
    }

    let code = plan.run().context("Failed to run the console launcher")?;

    if let Some(xml_output_file) = config.xml_output_file() {
        if let Err(e) = relocate_report(xml_output_file) {
            error!("{}", e);
        }
    }

    Ok(code)
}

/// Map a launcher exit code onto this process's exit code
fn exit_code(code: i32) -> ExitCode {
    u8::try_from(code).map_or(ExitCode::FAILURE, ExitCode::from)
}
