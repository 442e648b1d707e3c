//! Aggregate spell properties written by processing functions.

use std::collections::BTreeMap;

/// Attribute keys written during evaluation.
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
#[strum(serialize_all = "snake_case")]
pub enum Attribute {
    /// Damage per hit; negative for heals.
    BaseDamage,
    #[strum(serialize = "AOE_radius")]
    AoeRadius,
    /// Tightest range filter on the target path.
    Range,
    RequiresTarget,
    TargetsCaster,
    Material,
    Scale,
    IsHeal,
    IsSummon,
    IsConstruction,
    Creature,
    SpellShape,
}

/// Attribute value.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttrValue {
    Flag(bool),
    Int(i64),
    Number(f32),
    Text(String),
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f32> for AttrValue {
    fn from(value: f32) -> Self {
        Self::Number(value)
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl std::fmt::Display for AttrValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Flag(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

/// Accumulated attribute map of one evaluation.
///
/// Missing keys read as `false`, `0` or `None`.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attributes(BTreeMap<Attribute, AttrValue>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: Attribute, value: impl Into<AttrValue>) {
        self.0.insert(key, value.into());
    }

    pub fn get(&self, key: Attribute) -> Option<&AttrValue> {
        self.0.get(&key)
    }

    pub fn contains(&self, key: Attribute) -> bool {
        self.0.contains_key(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Attribute, &AttrValue)> {
        self.0.iter().map(|(key, value)| (*key, value))
    }

    pub fn flag(&self, key: Attribute) -> bool {
        matches!(self.get(key), Some(AttrValue::Flag(true)))
    }

    pub fn int(&self, key: Attribute) -> i64 {
        match self.get(key) {
            Some(AttrValue::Int(value)) => *value,
            _ => 0,
        }
    }

    pub fn number(&self, key: Attribute) -> f32 {
        match self.get(key) {
            Some(AttrValue::Number(value)) => *value,
            Some(AttrValue::Int(value)) => *value as f32,
            _ => 0.0,
        }
    }

    pub fn text(&self, key: Attribute) -> Option<&str> {
        match self.get(key) {
            Some(AttrValue::Text(value)) => Some(value),
            _ => None,
        }
    }

    /// Records a range filter; stacked filters keep the smallest radius.
    pub fn narrow_range(&mut self, radius: f32) {
        let range = match self.get(Attribute::Range) {
            Some(AttrValue::Number(current)) => current.min(radius),
            _ => radius,
        };
        self.set(Attribute::Range, range);
    }

    pub fn base_damage(&self) -> i64 {
        self.int(Attribute::BaseDamage)
    }

    pub fn aoe_radius(&self) -> f32 {
        self.number(Attribute::AoeRadius)
    }

    pub fn range(&self) -> f32 {
        self.number(Attribute::Range)
    }

    pub fn requires_target(&self) -> bool {
        self.flag(Attribute::RequiresTarget)
    }

    pub fn targets_caster(&self) -> bool {
        self.flag(Attribute::TargetsCaster)
    }

    pub fn is_heal(&self) -> bool {
        self.flag(Attribute::IsHeal)
    }

    pub fn is_summon(&self) -> bool {
        self.flag(Attribute::IsSummon)
    }

    pub fn is_construction(&self) -> bool {
        self.flag(Attribute::IsConstruction)
    }

    pub fn spell_shape(&self) -> Option<&str> {
        self.text(Attribute::SpellShape)
    }

    /// Player-facing spell name, e.g. "small ball of fire".
    pub fn display_name(&self) -> Option<String> {
        let scale = self.text(Attribute::Scale).unwrap_or("small");
        if let Some(shape) = self.spell_shape() {
            let material = self.text(Attribute::Material).unwrap_or("nothing");
            Some(format!("{scale} {shape} of {material}"))
        } else if self.is_heal() {
            Some(format!("{scale} heal"))
        } else if self.is_summon() {
            let creature = self.text(Attribute::Creature).unwrap_or("something");
            Some(format!("summon {creature}"))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_read_as_defaults() {
        let attributes = Attributes::new();
        assert_eq!(attributes.base_damage(), 0);
        assert_eq!(attributes.range(), 0.0);
        assert!(!attributes.requires_target());
        assert_eq!(attributes.display_name(), None);
    }

    #[test]
    fn range_keeps_the_tightest_filter() {
        let mut attributes = Attributes::new();
        attributes.narrow_range(8.0);
        attributes.narrow_range(1.5);
        attributes.narrow_range(4.0);
        assert_eq!(attributes.range(), 1.5);
    }

    #[test]
    fn aoe_key_keeps_its_legacy_spelling() {
        assert_eq!(Attribute::AoeRadius.to_string(), "AOE_radius");
        assert_eq!(Attribute::BaseDamage.to_string(), "base_damage");
    }

    #[test]
    fn display_names() {
        let mut ball = Attributes::new();
        ball.set(Attribute::SpellShape, "ball");
        ball.set(Attribute::Material, "fire");
        ball.set(Attribute::Scale, "large");
        assert_eq!(ball.display_name().as_deref(), Some("large ball of fire"));

        let mut heal = Attributes::new();
        heal.set(Attribute::IsHeal, true);
        assert_eq!(heal.display_name().as_deref(), Some("small heal"));
    }
}
