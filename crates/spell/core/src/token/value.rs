//! Payload types carried by tokens and the values that flow along spell edges.

use std::fmt;

use crate::state::Position;

/// Elemental substance a damaging or constructing spell is made of.
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
pub enum Material {
    Poop,
    Fire,
    Ice,
    Lightning,
}

impl Material {
    /// Damage dealt by a small spell of this material.
    pub const fn damage(self) -> i64 {
        match self {
            Self::Poop => 1,
            Self::Fire => 10,
            Self::Ice => 4,
            Self::Lightning => 6,
        }
    }

    /// Display name of the token that yields this material.
    pub const fn token_name(self) -> &'static str {
        match self {
            Self::Poop => "red globule",
            Self::Fire => "orange globule",
            Self::Ice => "blue globule",
            Self::Lightning => "yellow globule",
        }
    }
}

/// One or more materials combined by blend tokens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaterialMix(Vec<Material>);

impl MaterialMix {
    pub fn single(material: Material) -> Self {
        Self(vec![material])
    }

    /// Concatenates two mixes, keeping the left operand first.
    pub fn blend(mut self, other: MaterialMix) -> Self {
        self.0.extend(other.0);
        self
    }

    pub fn parts(&self) -> &[Material] {
        &self.0
    }

    /// The first material; walls are built out of it.
    pub fn primary(&self) -> Material {
        self.0.first().copied().unwrap_or(Material::Poop)
    }

    pub fn damage(&self) -> i64 {
        self.0.iter().map(|m| m.damage()).sum()
    }
}

impl fmt::Display for MaterialMix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, material) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" and ")?;
            }
            write!(f, "{material}")?;
        }
        Ok(())
    }
}

/// Power tier of a spell.
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
pub enum ScaleTier {
    Small,
    Medium,
    Large,
    Huge,
}

impl ScaleTier {
    pub const fn multiplier(self) -> i64 {
        match self {
            Self::Small => 1,
            Self::Medium => 2,
            Self::Large => 3,
            Self::Huge => 5,
        }
    }

    /// Area radius of ball-shaped spells at this tier.
    pub const fn radius(self) -> u32 {
        match self {
            Self::Small => 1,
            Self::Medium => 2,
            Self::Large => 3,
            Self::Huge => 4,
        }
    }

    pub const fn token_name(self) -> &'static str {
        match self {
            Self::Small => "sighing module",
            Self::Medium => "humming module",
            Self::Large => "roaring module",
            Self::Huge => "screaming module",
        }
    }
}

/// Fixed radius used by target-list range filters.
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
pub enum RangeBand {
    /// Adjacent tiles, diagonals included.
    Melee,
    Near,
    Far,
}

impl RangeBand {
    pub const fn radius(self) -> f32 {
        match self {
            Self::Melee => 1.5,
            Self::Near => 4.0,
            Self::Far => 8.0,
        }
    }

    pub const fn token_name(self) -> &'static str {
        match self {
            Self::Melee => "emerald shard",
            Self::Near => "jade shard",
            Self::Far => "beryl shard",
        }
    }
}

/// Creature that summon spells call forth.
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
pub enum Creature {
    Rat,
    Wolf,
}

impl Creature {
    pub const fn token_name(self) -> &'static str {
        match self {
            Self::Rat => "rat tooth",
            Self::Wolf => "wolf fang",
        }
    }
}

/// Output of a processing function, consumed positionally by the next node.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Targets(Vec<Position>),
    Material(MaterialMix),
    Scale(ScaleTier),
    Creature(Creature),
    /// Sinks produce no value; their result is the effect on the world.
    Effect,
}

impl Value {
    /// Short name of the variant for error reporting.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Targets(_) => "targets",
            Self::Material(_) => "material",
            Self::Scale(_) => "scale",
            Self::Creature(_) => "creature",
            Self::Effect => "effect",
        }
    }
}
