// SPDX-License-Identifier: MIT
//
// prism: command-line front end for the perceptual color engine.
//
// Wires the two library crates to the terminal:
//
//   prism-color   → hex parsing, color spaces, blending, gradients
//   prism-palette → harmonies, shades, strategies, vision, contrast
//
// Flow for every invocation:
//
//   args → Cli (clap) → Config (TOML, flags override) → Command::execute
//        → Report → text | JSON on stdout
//
// Exit status: 0 on success, 2 for malformed input (clap usage errors and
// engine `ColorError`s), 1 for I/O or configuration failures.

mod cli;
mod config;
mod report;

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use prism_color::ColorError;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;
use crate::config::Config;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "PRISM_LOG";

fn setup_logging(level: &str, json: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = Config::load_or_default(cli.config.as_deref())?;
    let format = cli.format.unwrap_or(config.format);

    let report = cli.command.execute(&config)?;
    let output = report.render(format)?;

    io::stdout().lock().write_all(output.as_bytes()).context("failed to write output")?;
    Ok(())
}

/// Malformed input exits 2, everything else 1.
fn exit_code(err: &anyhow::Error) -> ExitCode {
    if err.downcast_ref::<ColorError>().is_some() {
        ExitCode::from(2)
    } else {
        ExitCode::FAILURE
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(&cli.log_level, cli.json_logs);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "command failed");
            eprintln!("prism: {err:#}");
            exit_code(&err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_errors_are_usage_failures() {
        let err = anyhow::Error::new(ColorError::InvalidRatio(40.0));
        assert_eq!(exit_code(&err), ExitCode::from(2));
    }

    #[test]
    fn wrapped_color_errors_keep_their_class() {
        let err = anyhow::Error::new(ColorError::EmptyAnchors).context("while blending");
        assert_eq!(exit_code(&err), ExitCode::from(2));
    }

    #[test]
    fn config_errors_are_general_failures() {
        let err = Config::from_toml("colour = 1").unwrap_err();
        assert_eq!(exit_code(&err), ExitCode::FAILURE);
    }
}
