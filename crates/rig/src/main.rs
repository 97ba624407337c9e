//! rig - Entry Point
//!
//! Binary entry point for the `rig` command line. Lives in the `rig` facade
//! crate next to the library it drives.

// Force-link rig-infrastructure so its linkme feature registrations are included
extern crate rig_infrastructure;

use clap::Parser;
use rig::cli::{Cli, execute, load_config};
use rig_infrastructure::logging::init_logging;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_logging(&config.logging)?;
    execute(&cli, config, &mut std::io::stdout().lock())
}
