// PlateMerge - Source plate coalescing for editorial timelines
// Copyright (C) 2025 PlateMerge Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published
// by the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.

mod commands;
mod output;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use commands::*;
use platemerge_config::{Config, ConfigLoader};
use platemerge_observability::{init_tracing_with_config, LogConfig, LogFormat};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "platemerge")]
#[command(version, about = "Merge editorial timelines into source plates")]
#[command(
    long_about = "PlateMerge collects every usage of every source clip across a set of timelines,
merges usages that overlap or sit within a gap tolerance of each other, and builds
a new timeline holding one plate per merged range."
)]
#[command(propagate_version = true)]
#[command(author = "PlateMerge Contributors")]
#[command(arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Configuration file (TOML, YAML or JSON)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Colored output
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: ColorChoice,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ColorChoice {
    Always,
    Auto,
    Never,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge timelines into a new timeline of source plates
    Merge(MergeCmd),

    /// Show which shots each plate would absorb
    Summary(SummaryCmd),

    /// Convert between frame counts and timecode
    Timecode(TimecodeCmd),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let use_color = match cli.color {
        ColorChoice::Always => {
            console::set_colors_enabled(true);
            true
        }
        ColorChoice::Never => {
            console::set_colors_enabled(false);
            false
        }
        ColorChoice::Auto => console::colors_enabled_stderr(),
    };

    let result = run(cli, use_color).await;
    if let Err(e) = result {
        output::error(&format!("Error: {:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

async fn run(cli: Cli, use_color: bool) -> Result<()> {
    let config = ConfigLoader::new()
        .load_or_default(cli.config.as_deref())
        .await
        .context("Failed to load configuration")?;

    init_logging(&config, cli.verbose, cli.quiet, use_color)?;

    match cli.command {
        Commands::Merge(cmd) => cmd.execute(&config).await,
        Commands::Summary(cmd) => cmd.execute(&config).await,
        Commands::Timecode(cmd) => cmd.execute().await,
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "platemerge", &mut io::stdout());
            Ok(())
        }
    }
}

fn init_logging(config: &Config, verbose: u8, quiet: bool, use_color: bool) -> Result<()> {
    init_tracing_with_config(log_config(config, verbose, quiet, use_color)?)?;
    Ok(())
}

/// Logging settings from the config file and the global flags. With no
/// configured level and no flags, the level is left unset so `RUST_LOG`
/// still applies.
fn log_config(config: &Config, verbose: u8, quiet: bool, use_color: bool) -> Result<LogConfig> {
    let format: LogFormat = config.observability.log_format.parse()?;
    let mut log_config = LogConfig::new().with_format(format).with_color(use_color);
    if let Some(level) = &config.observability.log_level {
        log_config = log_config.with_level(level.as_str());
    }
    Ok(log_config.with_verbosity(verbose, quiet))
}
