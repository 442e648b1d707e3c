//! Generate random spells from the command line.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use console::style;
use spell_content::TokenPoolLoader;
use spell_core::{SpellPreset, Synthesizer};

use crate::utils;

/// Generate random spells matching a preset
#[derive(Parser)]
pub struct Synth {
    /// Preset to satisfy (small_ranged, small_bump, small_heal, small_summon, small_construction)
    #[arg(value_name = "PRESET")]
    preset: SpellPreset,

    /// Number of spells to generate
    #[arg(short = 'n', long, default_value_t = 3)]
    count: usize,

    /// RNG seed for reproducible output
    #[arg(short, long)]
    seed: Option<u64>,

    /// RON token pool restricting synthesis (defaults to every built-in token)
    #[arg(short, long, value_name = "FILE")]
    pool: Option<PathBuf>,

    /// TOML engine configuration
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl Synth {
    pub fn execute(self) -> Result<()> {
        let config = utils::load_config(self.config.as_deref())?;
        let synth = match &self.pool {
            Some(path) => Synthesizer::with_catalog(config, &TokenPoolLoader::load(path)?),
            None => Synthesizer::new(config),
        };
        let mut rng = utils::rng_from_seed(self.seed);

        println!(
            "{} {} ({} tokens in pool)",
            style("Preset:").bold().cyan(),
            self.preset,
            synth.pool().len()
        );
        println!();

        for i in 0..self.count {
            match synth.generate_preset(&mut rng, self.preset) {
                Ok(spell) => utils::print_spell(&format!("#{}", i + 1), &spell),
                Err(err) => println!("{} {err}", style(format!("#{}", i + 1)).bold().red()),
            }
            println!();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_parses_from_its_snake_case_name() {
        let cmd = Synth::try_parse_from(["synth", "small_heal", "-n", "2", "--seed", "7"]).unwrap();
        assert_eq!(cmd.preset, SpellPreset::SmallHeal);
        assert_eq!(cmd.count, 2);
        assert_eq!(cmd.seed, Some(7));

        assert!(Synth::try_parse_from(["synth", "big_boom"]).is_err());
    }
}
