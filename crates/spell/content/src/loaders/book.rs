//! Spell book loader.
//!
//! Spells are stored as token lists plus connection tables; every entry is
//! rebuilt through `Spell::new`, so malformed graphs fail to load.

use std::path::Path;

use serde::{Deserialize, Serialize};
use spell_core::Spell;

use crate::loaders::{LoadResult, read_file};

/// A named hand-authored spell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellBookEntry {
    pub name: String,
    pub spell: Spell,
}

/// Spell book structure for RON files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellBook {
    pub spells: Vec<SpellBookEntry>,
}

impl SpellBook {
    pub fn get(&self, name: &str) -> Option<&Spell> {
        self.spells
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| &entry.spell)
    }
}

/// Loader for spell books from RON files.
pub struct SpellBookLoader;

impl SpellBookLoader {
    pub fn load(path: &Path) -> LoadResult<SpellBook> {
        let content = read_file(path)?;
        let book: SpellBook = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse spell book RON: {}", e))?;

        tracing::debug!(path = %path.display(), spells = book.spells.len(), "loaded spell book");
        Ok(book)
    }

    /// Writes `book` as pretty RON.
    pub fn save(book: &SpellBook, path: &Path) -> LoadResult<()> {
        let content = ron::ser::to_string_pretty(book, ron::ser::PrettyConfig::default())
            .map_err(|e| anyhow::anyhow!("Failed to serialize spell book: {}", e))?;
        std::fs::write(path, content)
            .map_err(|e| anyhow::anyhow!("Failed to write file {}: {}", path.display(), e))
    }
}
