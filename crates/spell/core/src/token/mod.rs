//! Token kinds: typed building blocks of a spell.
//!
//! Every token declares an ordered list of input port tags, a set of output
//! port tags and a processing function. The registry of built-in kinds is the
//! static [`STANDARD_TOKENS`] table; there is no runtime discovery.
//!
//! Input tags are matching metadata for graph construction. Evaluation hands a
//! processing function exactly as many inputs as the node has recorded
//! sources, and the function rejects any other count with
//! [`EvalError::ArityMismatch`].
mod catalog;
mod sink;
mod source;
mod value;

use std::hash::{Hash, Hasher};

use bitflags::bitflags;

pub use catalog::{STANDARD_TOKENS, TokenCatalog};
pub use value::{Creature, Material, MaterialMix, RangeBand, ScaleTier, Value};

use crate::spell::{CastContext, EvalError};

/// Label identifying the slot type of a token input or output.
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
pub enum PortTag {
    Target,
    Material,
    Scale,
    Creature,
    /// Marks a terminal effect; the evaluation root of a spell.
    Sink,
}

impl PortTag {
    pub const fn bit(self) -> Ports {
        match self {
            Self::Target => Ports::TARGET,
            Self::Material => Ports::MATERIAL,
            Self::Scale => Ports::SCALE,
            Self::Creature => Ports::CREATURE,
            Self::Sink => Ports::SINK,
        }
    }
}

bitflags! {
    /// Order-insensitive set of port tags.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Ports: u8 {
        const TARGET = 1 << 0;
        const MATERIAL = 1 << 1;
        const SCALE = 1 << 2;
        const CREATURE = 1 << 3;
        const SINK = 1 << 4;
    }
}

impl Ports {
    pub fn from_tags(tags: &[PortTag]) -> Self {
        tags.iter().fold(Ports::empty(), |set, tag| set | tag.bit())
    }
}

/// Static description of a token kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenSpec {
    pub name: &'static str,
    pub inputs: &'static [PortTag],
    pub outputs: &'static [PortTag],
}

const NO_PORTS: &[PortTag] = &[];
const TARGET: &[PortTag] = &[PortTag::Target];
const MATERIAL: &[PortTag] = &[PortTag::Material];
const SCALE: &[PortTag] = &[PortTag::Scale];
const CREATURE: &[PortTag] = &[PortTag::Creature];
const SINK: &[PortTag] = &[PortTag::Sink];
const MATERIAL_PAIR: &[PortTag] = &[PortTag::Material, PortTag::Material];
const SHAPED: &[PortTag] = &[PortTag::Material, PortTag::Scale, PortTag::Target];
const HEAL: &[PortTag] = &[PortTag::Scale, PortTag::Target];
const SUMMON: &[PortTag] = &[PortTag::Creature, PortTag::Target];

/// A concrete token instance.
///
/// Pure marker kinds carry no payload; literal kinds (materials, scales,
/// range filters, creatures) carry the value their processing function emits.
///
/// Two tokens are the same kind, and therefore stack in an inventory, iff
/// their names match and their input and output tag sets match. Every
/// parameterized variant has its own name so unrelated literals never stack.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Token {
    /// Every visible actor other than the caster.
    AllActors,
    /// The caster's own tile.
    TheCaster,
    /// The externally supplied target coordinate.
    SpecificTarget,
    WithinRange(RangeBand),
    OneAtRandom,
    MadeOf(Material),
    Blend,
    Scale(ScaleTier),
    Summonable(Creature),
    BallOf,
    BeamOf,
    Heal,
    Summon,
    WallOf,
}

impl Token {
    pub fn spec(&self) -> TokenSpec {
        let (name, inputs, outputs) = match self {
            Self::AllActors => ("grey shard", NO_PORTS, TARGET),
            Self::TheCaster => ("black shard", NO_PORTS, TARGET),
            Self::SpecificTarget => ("chalk shard", NO_PORTS, TARGET),
            Self::WithinRange(band) => (band.token_name(), TARGET, TARGET),
            Self::OneAtRandom => ("black marble", TARGET, TARGET),
            Self::MadeOf(material) => (material.token_name(), NO_PORTS, MATERIAL),
            Self::Blend => ("squirming module", MATERIAL_PAIR, MATERIAL),
            Self::Scale(tier) => (tier.token_name(), NO_PORTS, SCALE),
            Self::Summonable(creature) => (creature.token_name(), NO_PORTS, CREATURE),
            Self::BallOf => ("silver rod", SHAPED, SINK),
            Self::BeamOf => ("copper rod", SHAPED, SINK),
            Self::Heal => ("golden rod", HEAL, SINK),
            Self::Summon => ("chrome ring", SUMMON, SINK),
            Self::WallOf => ("iron rod", SHAPED, SINK),
        };
        TokenSpec {
            name,
            inputs,
            outputs,
        }
    }

    pub fn name(&self) -> &'static str {
        self.spec().name
    }

    pub fn inputs(&self) -> &'static [PortTag] {
        self.spec().inputs
    }

    pub fn outputs(&self) -> &'static [PortTag] {
        self.spec().outputs
    }

    /// Returns true if any output carries `tag`.
    pub fn provides(&self, tag: PortTag) -> bool {
        self.outputs().contains(&tag)
    }

    pub fn is_sink(&self) -> bool {
        self.provides(PortTag::Sink)
    }

    /// Returns true if casting this token needs a coordinate from the caller.
    pub fn needs_target(&self) -> bool {
        matches!(self, Self::SpecificTarget)
    }

    /// Runs the processing function with positional `inputs`.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::ArityMismatch`] or [`EvalError::InputType`] when
    /// the inputs do not match what this kind consumes.
    pub fn process(&self, ctx: &mut CastContext<'_>, inputs: Vec<Value>) -> Result<Value, EvalError> {
        match self {
            Self::AllActors => {
                take::<0>(self, inputs)?;
                Ok(source::all_actors(ctx))
            }
            Self::TheCaster => {
                take::<0>(self, inputs)?;
                Ok(source::the_caster(ctx))
            }
            Self::SpecificTarget => {
                take::<0>(self, inputs)?;
                Ok(source::specific_target(ctx))
            }
            Self::WithinRange(band) => {
                let [targets] = take::<1>(self, inputs)?;
                Ok(source::within_range(ctx, *band, targets_of(self, 0, targets)?))
            }
            Self::OneAtRandom => {
                let [targets] = take::<1>(self, inputs)?;
                Ok(source::one_at_random(ctx, targets_of(self, 0, targets)?))
            }
            Self::MadeOf(material) => {
                take::<0>(self, inputs)?;
                Ok(Value::Material(MaterialMix::single(*material)))
            }
            Self::Blend => {
                let [a, b] = take::<2>(self, inputs)?;
                let a = material_of(self, 0, a)?;
                let b = material_of(self, 1, b)?;
                Ok(Value::Material(a.blend(b)))
            }
            Self::Scale(tier) => {
                take::<0>(self, inputs)?;
                Ok(Value::Scale(*tier))
            }
            Self::Summonable(creature) => {
                take::<0>(self, inputs)?;
                Ok(Value::Creature(*creature))
            }
            Self::BallOf => {
                let [material, scale, targets] = take::<3>(self, inputs)?;
                sink::ball(
                    ctx,
                    material_of(self, 0, material)?,
                    scale_of(self, 1, scale)?,
                    targets_of(self, 2, targets)?,
                );
                Ok(Value::Effect)
            }
            Self::BeamOf => {
                let [material, scale, targets] = take::<3>(self, inputs)?;
                sink::beam(
                    ctx,
                    material_of(self, 0, material)?,
                    scale_of(self, 1, scale)?,
                    targets_of(self, 2, targets)?,
                );
                Ok(Value::Effect)
            }
            Self::Heal => {
                let [scale, targets] = take::<2>(self, inputs)?;
                sink::heal(ctx, scale_of(self, 0, scale)?, targets_of(self, 1, targets)?);
                Ok(Value::Effect)
            }
            Self::Summon => {
                let [creature, targets] = take::<2>(self, inputs)?;
                sink::summon(
                    ctx,
                    creature_of(self, 0, creature)?,
                    targets_of(self, 1, targets)?,
                );
                Ok(Value::Effect)
            }
            Self::WallOf => {
                let [material, scale, targets] = take::<3>(self, inputs)?;
                sink::wall(
                    ctx,
                    material_of(self, 0, material)?,
                    scale_of(self, 1, scale)?,
                    targets_of(self, 2, targets)?,
                );
                Ok(Value::Effect)
            }
        }
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        let (a, b) = (self.spec(), other.spec());
        a.name == b.name
            && Ports::from_tags(a.inputs) == Ports::from_tags(b.inputs)
            && Ports::from_tags(a.outputs) == Ports::from_tags(b.outputs)
    }
}

impl Eq for Token {}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name().hash(state);
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn take<const N: usize>(token: &Token, inputs: Vec<Value>) -> Result<[Value; N], EvalError> {
    let supplied = inputs.len();
    <[Value; N]>::try_from(inputs).map_err(|_| EvalError::ArityMismatch {
        token: token.name(),
        expected: N,
        supplied,
    })
}

fn mismatch(token: &Token, position: usize, expected: PortTag, found: &Value) -> EvalError {
    EvalError::InputType {
        token: token.name(),
        position,
        expected,
        found: found.kind(),
    }
}

fn targets_of(
    token: &Token,
    position: usize,
    value: Value,
) -> Result<Vec<crate::state::Position>, EvalError> {
    match value {
        Value::Targets(targets) => Ok(targets),
        other => Err(mismatch(token, position, PortTag::Target, &other)),
    }
}

fn material_of(token: &Token, position: usize, value: Value) -> Result<MaterialMix, EvalError> {
    match value {
        Value::Material(mix) => Ok(mix),
        other => Err(mismatch(token, position, PortTag::Material, &other)),
    }
}

fn scale_of(token: &Token, position: usize, value: Value) -> Result<ScaleTier, EvalError> {
    match value {
        Value::Scale(tier) => Ok(tier),
        other => Err(mismatch(token, position, PortTag::Scale, &other)),
    }
}

fn creature_of(token: &Token, position: usize, value: Value) -> Result<Creature, EvalError> {
    match value {
        Value::Creature(creature) => Ok(creature),
        other => Err(mismatch(token, position, PortTag::Creature, &other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_identity_uses_name_and_port_sets() {
        assert_eq!(Token::MadeOf(Material::Fire), Token::MadeOf(Material::Fire));
        assert_ne!(Token::MadeOf(Material::Fire), Token::MadeOf(Material::Poop));
        assert_ne!(
            Token::WithinRange(RangeBand::Melee),
            Token::WithinRange(RangeBand::Far)
        );
        assert_ne!(Token::BallOf, Token::BeamOf);
    }

    #[test]
    fn sinks_are_the_terminal_kinds() {
        let sinks: Vec<_> = STANDARD_TOKENS.iter().filter(|t| t.is_sink()).collect();
        assert_eq!(sinks.len(), 5);
        assert!(sinks.iter().all(|t| !t.inputs().is_empty()));
    }

    #[test]
    fn wrong_arity_is_reported() {
        let mut ctx = CastContext::dry_run();
        let err = Token::BallOf
            .process(&mut ctx, vec![Value::Scale(ScaleTier::Small)])
            .unwrap_err();
        assert_eq!(
            err,
            EvalError::ArityMismatch {
                token: "silver rod",
                expected: 3,
                supplied: 1
            }
        );
    }

    #[test]
    fn wrong_input_type_is_reported() {
        let mut ctx = CastContext::dry_run();
        let err = Token::Blend
            .process(
                &mut ctx,
                vec![
                    Value::Material(MaterialMix::single(Material::Ice)),
                    Value::Scale(ScaleTier::Huge),
                ],
            )
            .unwrap_err();
        assert!(matches!(
            err,
            EvalError::InputType {
                position: 1,
                expected: PortTag::Material,
                ..
            }
        ));
    }

    #[test]
    fn literals_emit_their_payload() {
        let mut ctx = CastContext::dry_run();
        assert_eq!(
            Token::Scale(ScaleTier::Large).process(&mut ctx, vec![]).unwrap(),
            Value::Scale(ScaleTier::Large)
        );
        assert_eq!(
            Token::Summonable(Creature::Wolf).process(&mut ctx, vec![]).unwrap(),
            Value::Creature(Creature::Wolf)
        );
    }
}
