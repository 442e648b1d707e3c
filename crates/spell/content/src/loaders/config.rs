//! Spell engine configuration loader.

use std::path::Path;

use spell_core::SpellConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for engine configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to the [`SpellConfig`] defaults.
    pub fn load(path: &Path) -> LoadResult<SpellConfig> {
        let content = read_file(path)?;
        let config: SpellConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        tracing::debug!(path = %path.display(), ?config, "loaded spell config");
        Ok(config)
    }
}
