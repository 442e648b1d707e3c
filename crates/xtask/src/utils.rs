//! Utility functions for xtask commands

use std::path::{Path, PathBuf};

use anyhow::Result;
use console::style;
use rand::SeedableRng;
use rand::rngs::StdRng;
use spell_content::{ConfigLoader, SpellBook, SpellBookLoader};
use spell_core::{Position, Spell, SpellConfig};

/// Bundled content shipped with `spell-content`.
pub fn content_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../spell/content/data")
}

/// Loads the config at `path`, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<SpellConfig> {
    match path {
        Some(path) => ConfigLoader::load(path),
        None => Ok(SpellConfig::default()),
    }
}

/// Loads the spell book at `path`, or the bundled one.
pub fn load_book(path: Option<&Path>) -> Result<SpellBook> {
    match path {
        Some(path) => SpellBookLoader::load(path),
        None => SpellBookLoader::load(&content_dir().join("spellbook.ron")),
    }
}

/// Seeded RNG; a random seed is drawn and reported when none is given.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    let seed = seed.unwrap_or_else(rand::random);
    println!("{} {}", style("Seed:").bold().cyan(), seed);
    StdRng::seed_from_u64(seed)
}

/// Parses `x,y` into a position.
pub fn parse_position(s: &str) -> Result<Position, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got {s:?}"))?;
    let x = x.trim().parse().map_err(|e| format!("bad x: {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad y: {e}"))?;
    Ok(Position::new(x, y))
}

/// Prints a spell's tokens, name and inferred attributes.
pub fn print_spell(label: &str, spell: &Spell) {
    let name = spell.name().unwrap_or_else(|| "unnamed spell".to_owned());
    println!("{} {}", style(label).bold().yellow(), style(name).green());
    println!("  Tokens: {spell}");
    println!("  Connections: {:?}", spell.connections());
    match spell.attributes() {
        Ok(attributes) => {
            for (key, value) in attributes.iter() {
                println!("  {key}: {value}");
            }
        }
        Err(err) => println!("  {} {err}", style("Evaluation failed:").red()),
    }
}
