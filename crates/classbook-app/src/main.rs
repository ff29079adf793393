use std::io::Read;
use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use classbook_app::cli::Cli;
use classbook_app::command::run;
use classbook_core::config::load_config;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    let config = load_config()?;

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping debug");
    }

    tracing::debug!(config = ?config, "Configuration loaded");

    let input = read_input(cli.command.input())?;

    let output = run(&cli.command, &input, &config)?;
    println!("{}", serde_json::to_string_pretty(&output.body)?);

    Ok(ExitCode::from(output.exit_code))
}

/// Reads the request from `path`, or from stdin when there is none.
fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    if let Some(path) = path {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read request file {}", path.display()));
    }

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read request from stdin")?;
    Ok(input)
}
