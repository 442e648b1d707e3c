/// Spell engine constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpellConfig {
    /// Samples the synthesizer draws before giving up on a predicate.
    pub max_attempts: u32,
    /// Maximum nesting of input filling during a single sample.
    pub max_depth: u32,
    /// Spells generated per preset when a grimoire is built.
    pub grimoire_variants: usize,
    /// Node cap applied by the synthesis presets.
    pub preset_max_tokens: usize,
    /// Casts worth of tokens handed out by `TokenInventory::stock_for` at session start.
    pub castability_stock: u32,
}

impl SpellConfig {
    // ===== defaults =====
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 5000;
    pub const DEFAULT_MAX_DEPTH: u32 = 10;
    pub const DEFAULT_GRIMOIRE_VARIANTS: usize = 10;
    pub const DEFAULT_PRESET_MAX_TOKENS: usize = 6;
    pub const DEFAULT_CASTABILITY_STOCK: u32 = 10;

    pub fn new() -> Self {
        Self {
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
            max_depth: Self::DEFAULT_MAX_DEPTH,
            grimoire_variants: Self::DEFAULT_GRIMOIRE_VARIANTS,
            preset_max_tokens: Self::DEFAULT_PRESET_MAX_TOKENS,
            castability_stock: Self::DEFAULT_CASTABILITY_STOCK,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_grimoire_variants(mut self, grimoire_variants: usize) -> Self {
        self.grimoire_variants = grimoire_variants;
        self
    }
}

impl Default for SpellConfig {
    fn default() -> Self {
        Self::new()
    }
}
