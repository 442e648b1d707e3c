//! Inspect hand-authored spells.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use console::style;
use spell_core::TokenInventory;

use crate::utils;

/// Print attributes and affordability of spell book entries
#[derive(Parser)]
pub struct Inspect {
    /// RON spell book (defaults to the bundled one)
    #[arg(value_name = "BOOK")]
    book: Option<PathBuf>,

    /// Only show the entry with this name
    #[arg(short, long)]
    name: Option<String>,

    /// Casts worth of tokens to stock the test inventory with (overrides the config)
    #[arg(long)]
    stock: Option<u32>,

    /// TOML engine configuration
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl Inspect {
    pub fn execute(self) -> Result<()> {
        let config = utils::load_config(self.config.as_deref())?;
        let book = utils::load_book(self.book.as_deref())?;
        let stock = self.stock.unwrap_or(config.castability_stock);

        let entries: Vec<_> = book
            .spells
            .iter()
            .filter(|entry| self.name.as_ref().is_none_or(|name| *name == entry.name))
            .collect();
        if entries.is_empty() {
            anyhow::bail!("No matching spells in the spell book");
        }

        // One shared inventory, so entries compete for tokens like slots do.
        let mut inventory = TokenInventory::new();
        for entry in &entries {
            inventory.stock_for(&entry.spell, stock);
        }

        println!(
            "{} {} spells, inventory stocked for {} casts each",
            style("Spell book:").bold().cyan(),
            entries.len(),
            stock
        );
        println!();

        for entry in entries {
            utils::print_spell(&format!("{}:", entry.name), &entry.spell);
            println!("  Needs target: {}", entry.spell.needs_target());
            println!("  Max casts: {}", entry.spell.max_casts(&inventory));
            println!();
        }
        Ok(())
    }
}
