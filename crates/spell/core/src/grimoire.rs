//! Session-wide pool of pre-generated spells.
//!
//! Built once at session start and handed to whoever needs default spells;
//! there is no global instance.

use std::collections::BTreeMap;
use std::sync::Arc;

use rand::Rng;
use rand::seq::SliceRandom;
use strum::IntoEnumIterator;

use crate::config::SpellConfig;
use crate::slots::{SlotRole, SpellSlots};
use crate::spell::Spell;
use crate::synth::{SpellPreset, Synthesizer};
use crate::token::{Material, RangeBand, ScaleTier, Token};

/// Generated spell variants per preset plus the free bump fallback.
#[derive(Clone, Debug)]
pub struct Grimoire {
    variants: BTreeMap<SpellPreset, Vec<Arc<Spell>>>,
    bump_free: Arc<Spell>,
}

impl Grimoire {
    /// Synthesizes `config.grimoire_variants` spells for every preset.
    ///
    /// A preset whose synthesis keeps failing ends up with fewer variants,
    /// possibly none.
    pub fn generate<R>(config: &SpellConfig, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let synth = Synthesizer::new(config.clone());
        let mut variants = BTreeMap::new();
        for preset in SpellPreset::iter() {
            let mut spells = Vec::with_capacity(config.grimoire_variants);
            for _ in 0..config.grimoire_variants {
                match synth.generate_preset(rng, preset) {
                    Ok(spell) => spells.push(Arc::new(spell)),
                    Err(err) => tracing::warn!(%preset, error = %err, "grimoire variant missing"),
                }
            }
            tracing::debug!(%preset, count = spells.len(), "grimoire preset filled");
            variants.insert(preset, spells);
        }
        Self {
            variants,
            bump_free: Arc::new(free_bump_spell()),
        }
    }

    /// Grimoire holding only the given spells.
    pub fn from_variants(variants: BTreeMap<SpellPreset, Vec<Arc<Spell>>>) -> Self {
        Self {
            variants,
            bump_free: Arc::new(free_bump_spell()),
        }
    }

    pub fn variants(&self, preset: SpellPreset) -> &[Arc<Spell>] {
        self.variants.get(&preset).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn pick<R>(&self, preset: SpellPreset, rng: &mut R) -> Option<Arc<Spell>>
    where
        R: Rng + ?Sized,
    {
        self.variants(preset).choose(rng).cloned()
    }

    pub fn bump_free(&self) -> &Arc<Spell> {
        &self.bump_free
    }

    /// Total number of generated variants.
    pub fn len(&self) -> usize {
        self.variants.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Gives an actor one random variant per role and the free bump spell.
    pub fn fill_default_slots<R>(&self, slots: &mut SpellSlots, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        let roles = [
            (SlotRole::Ranged, SpellPreset::SmallRanged),
            (SlotRole::Bump, SpellPreset::SmallBump),
            (SlotRole::Heal, SpellPreset::SmallHeal),
            (SlotRole::Summon, SpellPreset::SmallSummon),
        ];
        for (role, preset) in roles {
            if let Some(spell) = self.pick(preset, rng) {
                slots.assign(role, spell);
            }
        }
        slots.assign(SlotRole::BumpFree, Arc::clone(&self.bump_free));
    }
}

/// Melee beam of poop at any adjacent actor. Never charged.
pub fn free_bump_spell() -> Spell {
    Spell::from_raw_parts(
        vec![
            Token::AllActors,
            Token::WithinRange(RangeBand::Melee),
            Token::MadeOf(Material::Poop),
            Token::Scale(ScaleTier::Small),
            Token::BeamOf,
        ],
        vec![vec![], vec![0], vec![], vec![], vec![2, 3, 1]],
    )
}
