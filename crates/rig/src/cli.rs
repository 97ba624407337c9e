//! Command line interface
//!
//! | Command | Description |
//! |---------|-------------|
//! | `rig features` | List registered features |
//! | `rig resolve <NAME>...` | Print the resolution order of the named features |
//! | `rig config` | Print the effective configuration |

use anyhow::Context;
use clap::{Parser, Subcommand};
use rig_application::list_features;
use rig_infrastructure::Bootstrap;
use rig_infrastructure::config::{AppConfig, ConfigLoader};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

/// Command line interface for rig
#[derive(Parser, Debug)]
#[command(name = "rig")]
#[command(about = "rig - feature-driven lifecycle orchestration for test classes")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the configured log level
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log as JSON
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// List registered features
    Features {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Resolve features by name and print them in dependency order
    Resolve {
        /// Registered feature names
        #[arg(required = true)]
        names: Vec<String>,

        /// Print JSON instead of a list
        #[arg(long)]
        json: bool,
    },
    /// Print the effective configuration as JSON
    Config,
}

#[derive(Debug, Serialize)]
struct FeatureInfo<'a> {
    name: &'a str,
    description: &'a str,
}

#[derive(Debug, Serialize)]
struct ResolvedFeature {
    position: usize,
    name: &'static str,
    type_name: &'static str,
}

/// Load configuration and apply the command line overrides
pub fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    let mut config = loader.load().context("Failed to load configuration")?;

    if let Some(level) = &cli.log_level {
        config.logging.level.clone_from(level);
    }
    if cli.json_logs {
        config.logging.json_format = true;
    }
    Ok(config)
}

/// Run the selected command, writing its output to `out`
pub fn execute(cli: &Cli, config: AppConfig, out: &mut impl Write) -> anyhow::Result<()> {
    debug!(command = ?cli.command, "Executing command");
    match &cli.command {
        Command::Features { json } => print_features(*json, out),
        Command::Resolve { names, json } => {
            print_resolution(&Bootstrap::new(config), names, *json, out)
        }
        Command::Config => {
            serde_json::to_writer_pretty(&mut *out, &config)?;
            writeln!(out)?;
            Ok(())
        }
    }
}

fn print_features(json: bool, out: &mut impl Write) -> anyhow::Result<()> {
    let features = list_features();
    if json {
        let infos: Vec<FeatureInfo<'_>> = features
            .iter()
            .map(|&(name, description)| FeatureInfo { name, description })
            .collect();
        serde_json::to_writer_pretty(&mut *out, &infos)?;
        writeln!(out)?;
        return Ok(());
    }

    let width = features.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    for (name, description) in features {
        writeln!(out, "{name:<width$}  {description}")?;
    }
    Ok(())
}

fn print_resolution(
    bootstrap: &Bootstrap,
    names: &[String],
    json: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let graph = bootstrap
        .resolve(names)
        .with_context(|| format!("Failed to resolve features {names:?}"))?;
    let resolved: Vec<ResolvedFeature> = graph
        .iter()
        .enumerate()
        .map(|(i, id)| ResolvedFeature {
            position: i + 1,
            name: id.short_name(),
            type_name: id.name(),
        })
        .collect();

    if json {
        serde_json::to_writer_pretty(&mut *out, &resolved)?;
        writeln!(out)?;
        return Ok(());
    }
    for feature in resolved {
        writeln!(
            out,
            "{}. {} ({})",
            feature.position, feature.name, feature.type_name
        )?;
    }
    Ok(())
}
