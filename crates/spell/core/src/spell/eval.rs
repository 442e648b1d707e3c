//! Recursive evaluation of a spell graph from its sink.

use tracing::warn;

use super::{CastContext, Spell};
use crate::error::{ErrorSeverity, MagicError};
use crate::token::{PortTag, Value};

/// Errors that can occur while evaluating a spell.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    /// No node outputs the sink tag; the spell fizzles.
    #[error("spell has no sink")]
    NoSink,

    /// A connection points past the end of the node list.
    #[error("node {node} reads from node {input}, but the spell has {len} nodes")]
    SourceOutOfRange { node: usize, input: usize, len: usize },

    /// The connection table has no entry for a node.
    #[error("node {node} has no connection list")]
    MissingSources { node: usize },

    /// Evaluation re-entered a node that is still being evaluated.
    #[error("cycle through node {node}")]
    Cycle { node: usize },

    /// A processing function received the wrong number of inputs.
    #[error("{token} expects {expected} inputs, got {supplied}")]
    ArityMismatch {
        token: &'static str,
        expected: usize,
        supplied: usize,
    },

    /// A processing function received a value of the wrong type.
    #[error("{token} input {position} expects {expected}, got {found}")]
    InputType {
        token: &'static str,
        position: usize,
        expected: PortTag,
        found: &'static str,
    },
}

impl MagicError for EvalError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NoSink => ErrorSeverity::Recoverable,
            Self::SourceOutOfRange { .. }
            | Self::MissingSources { .. }
            | Self::Cycle { .. }
            | Self::ArityMismatch { .. }
            | Self::InputType { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoSink => "EVAL_NO_SINK",
            Self::SourceOutOfRange { .. } => "EVAL_SOURCE_OUT_OF_RANGE",
            Self::MissingSources { .. } => "EVAL_MISSING_SOURCES",
            Self::Cycle { .. } => "EVAL_CYCLE",
            Self::ArityMismatch { .. } => "EVAL_ARITY_MISMATCH",
            Self::InputType { .. } => "EVAL_INPUT_TYPE",
        }
    }
}

/// Evaluates `spell` starting at its sink.
///
/// Each node first evaluates its sources in order, then runs its processing
/// function on the resulting positional inputs. Nodes shared by several
/// parents are evaluated once per parent.
pub(crate) fn evaluate(spell: &Spell, ctx: &mut CastContext<'_>) -> Result<Value, EvalError> {
    let sink = spell.sink().ok_or(EvalError::NoSink)?;
    let mut on_path = vec![false; spell.len()];
    let result = eval_node(spell, sink, ctx, &mut on_path);
    if let Err(err) = &result {
        warn!(spell = %spell, error = %err, code = err.error_code(), "malformed spell");
    }
    result
}

fn eval_node(
    spell: &Spell,
    index: usize,
    ctx: &mut CastContext<'_>,
    on_path: &mut [bool],
) -> Result<Value, EvalError> {
    if on_path[index] {
        return Err(EvalError::Cycle { node: index });
    }
    on_path[index] = true;

    let sources = spell
        .connections()
        .get(index)
        .ok_or(EvalError::MissingSources { node: index })?;
    let mut inputs = Vec::with_capacity(sources.len());
    for &input in sources {
        if input >= spell.len() {
            return Err(EvalError::SourceOutOfRange {
                node: index,
                input,
                len: spell.len(),
            });
        }
        inputs.push(eval_node(spell, input, ctx, on_path)?);
    }

    on_path[index] = false;
    spell.tokens()[index].process(ctx, inputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{Material, ScaleTier, Token};

    fn fire_ball() -> Spell {
        Spell::from_raw_parts(
            vec![
                Token::MadeOf(Material::Fire),
                Token::Scale(ScaleTier::Small),
                Token::SpecificTarget,
                Token::BallOf,
            ],
            vec![vec![], vec![], vec![], vec![0, 1, 2]],
        )
    }

    #[test]
    fn evaluates_from_the_first_sink() {
        let mut ctx = CastContext::dry_run();
        assert_eq!(evaluate(&fire_ball(), &mut ctx), Ok(Value::Effect));
        assert_eq!(ctx.attributes.base_damage(), 10);
    }

    #[test]
    fn missing_sink_is_recoverable() {
        let spell = Spell::from_raw_parts(vec![Token::MadeOf(Material::Ice)], vec![vec![]]);
        let err = evaluate(&spell, &mut CastContext::dry_run()).unwrap_err();
        assert_eq!(err, EvalError::NoSink);
        assert!(err.severity().is_recoverable());
    }

    #[test]
    fn out_of_range_source_fails_loudly() {
        let spell = Spell::from_raw_parts(
            vec![
                Token::SpecificTarget,
                Token::WithinRange(crate::token::RangeBand::Near),
                Token::MadeOf(Material::Fire),
                Token::Scale(ScaleTier::Small),
                Token::BeamOf,
            ],
            vec![vec![], vec![7], vec![], vec![], vec![2, 3, 1]],
        );
        let err = evaluate(&spell, &mut CastContext::dry_run()).unwrap_err();
        assert_eq!(
            err,
            EvalError::SourceOutOfRange {
                node: 1,
                input: 7,
                len: 5
            }
        );
        assert!(err.severity().is_internal());
    }

    #[test]
    fn cycles_are_detected() {
        let spell = Spell::from_raw_parts(
            vec![
                Token::MadeOf(Material::Fire),
                Token::Scale(ScaleTier::Small),
                Token::WithinRange(crate::token::RangeBand::Near),
                Token::BallOf,
            ],
            vec![vec![], vec![], vec![2], vec![0, 1, 2]],
        );
        let err = evaluate(&spell, &mut CastContext::dry_run()).unwrap_err();
        assert_eq!(err, EvalError::Cycle { node: 2 });
    }

    #[test]
    fn short_connection_table_fails_loudly() {
        let spell = Spell::from_raw_parts(
            vec![
                Token::MadeOf(Material::Fire),
                Token::Scale(ScaleTier::Small),
                Token::SpecificTarget,
                Token::BallOf,
            ],
            vec![vec![], vec![]],
        );
        let err = evaluate(&spell, &mut CastContext::dry_run()).unwrap_err();
        assert_eq!(err, EvalError::MissingSources { node: 3 });
        assert!(err.severity().is_internal());
    }

    #[test]
    fn too_few_sources_fail_loudly() {
        let spell = Spell::from_raw_parts(
            vec![Token::MadeOf(Material::Fire), Token::BeamOf],
            vec![vec![], vec![0]],
        );
        let err = evaluate(&spell, &mut CastContext::dry_run()).unwrap_err();
        assert_eq!(
            err,
            EvalError::ArityMismatch {
                token: "copper rod",
                expected: 3,
                supplied: 1
            }
        );
    }
}
