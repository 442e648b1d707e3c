//! Development tasks for the spell engine
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;
mod utils;

use anyhow::Result;
use clap::Parser;
use commands::{Cast, Grimoire, Inspect, Synth};

/// Development tasks for the spell engine
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for spell synthesis and casting", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Generate random spells matching a preset
    Synth(Synth),

    /// Generate a grimoire and summarize it
    Grimoire(Grimoire),

    /// Print attributes and affordability of spell book entries
    Inspect(Inspect),

    /// Cast a spell book entry in a sandbox world
    Cast(Cast),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Synth(cmd) => cmd.execute(),
        Command::Grimoire(cmd) => cmd.execute(),
        Command::Inspect(cmd) => cmd.execute(),
        Command::Cast(cmd) => cmd.execute(),
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn synth_subcommand_accepts_a_preset() {
        let cli = Cli::try_parse_from(["xtask", "synth", "small_ranged"]).unwrap();
        assert!(matches!(cli.command, Command::Synth(_)));
    }
}
