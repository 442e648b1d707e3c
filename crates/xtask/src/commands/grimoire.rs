//! Generate a session grimoire and summarize it.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use console::style;
use spell_core::{SpellPreset, SpellSlots};
use strum::IntoEnumIterator;

use crate::utils;

/// Generate a grimoire and summarize it
#[derive(Parser)]
pub struct Grimoire {
    /// RNG seed for reproducible output
    #[arg(short, long)]
    seed: Option<u64>,

    /// Spells per preset (overrides the config)
    #[arg(short, long)]
    variants: Option<usize>,

    /// TOML engine configuration
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Also print every spell's attributes
    #[arg(long)]
    verbose: bool,
}

impl Grimoire {
    pub fn execute(self) -> Result<()> {
        let mut config = utils::load_config(self.config.as_deref())?;
        if let Some(variants) = self.variants {
            config = config.with_grimoire_variants(variants);
        }
        let mut rng = utils::rng_from_seed(self.seed);
        let grimoire = spell_core::Grimoire::generate(&config, &mut rng);

        println!("{}", style("=== Grimoire ===").bold().green());
        println!();
        for preset in SpellPreset::iter() {
            let spells = grimoire.variants(preset);
            println!(
                "{} {}/{}",
                style(format!("{preset}:")).bold().yellow(),
                spells.len(),
                config.grimoire_variants
            );
            for (i, spell) in spells.iter().enumerate() {
                if self.verbose {
                    utils::print_spell(&format!("  #{}", i + 1), spell);
                } else {
                    let name = spell.name().unwrap_or_else(|| "unnamed spell".to_owned());
                    println!("  #{} {} ({} tokens)", i + 1, name, spell.len());
                }
            }
        }
        println!();
        utils::print_spell("Free bump:", grimoire.bump_free());
        println!();

        let mut slots = SpellSlots::new();
        grimoire.fill_default_slots(&mut slots, &mut rng);
        println!("{}", style("Default slots:").bold().yellow());
        for (role, spell) in slots.all_spells() {
            let role = role.map_or_else(|| "other".to_owned(), |role| role.to_string());
            let name = spell.name().unwrap_or_else(|| "unnamed spell".to_owned());
            println!("  {role}: {name}");
        }
        println!("  Known tokens: {}", slots.known_tokens().len());
        Ok(())
    }
}
