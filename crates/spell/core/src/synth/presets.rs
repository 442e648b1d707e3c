//! Named attribute constraints used to stock default spell slots.

use crate::spell::Attributes;

/// A family of small spells the grimoire keeps variants of.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SpellPreset {
    /// Targeted damage that reaches past its own blast radius.
    SmallRanged,
    /// Targeted single-tile damage against an adjacent actor.
    SmallBump,
    /// Self heal.
    SmallHeal,
    SmallSummon,
    SmallConstruction,
}

impl SpellPreset {
    pub fn matches(self, attributes: &Attributes) -> bool {
        let damage = attributes.base_damage();
        match self {
            Self::SmallRanged => {
                attributes.requires_target()
                    && attributes.range() >= 4.0
                    && attributes.range() > attributes.aoe_radius()
                    && (1..=3).contains(&damage)
            }
            Self::SmallBump => {
                attributes.requires_target()
                    && attributes.range() == 1.5
                    && attributes.aoe_radius() == 0.0
                    && (1..=3).contains(&damage)
            }
            Self::SmallHeal => {
                attributes.targets_caster()
                    && attributes.aoe_radius() <= 0.0
                    && (-10..=-1).contains(&damage)
            }
            Self::SmallSummon => attributes.is_summon(),
            Self::SmallConstruction => {
                attributes.is_construction() && attributes.requires_target()
            }
        }
    }
}
