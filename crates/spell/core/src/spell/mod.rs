//! Spell graphs: immutable DAGs of tokens.
//!
//! A spell is a node list plus, for every node, the ordered indices of the
//! nodes feeding its inputs. The first node whose outputs include the sink
//! tag is the evaluation root; other sinks are inert unless reachable from it.
mod attributes;
mod context;
mod eval;

use std::fmt;

use crate::error::{ErrorSeverity, MagicError};
use crate::ledger::Ledger;
use crate::state::TokenInventory;
use crate::token::Token;

pub use attributes::{AttrValue, Attribute, Attributes};
pub use context::CastContext;
pub use eval::EvalError;
pub(crate) use eval::evaluate;

/// Errors raised while constructing a spell from parts.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BuildError {
    /// The connection table does not have one entry per node.
    #[error("{tokens} tokens but {connections} connection lists")]
    LengthMismatch { tokens: usize, connections: usize },

    /// A connection points past the end of the node list.
    #[error("node {node} reads from node {input}, but the spell has {len} nodes")]
    SourceOutOfRange { node: usize, input: usize, len: usize },

    /// The connections form a cycle.
    #[error("connections form a cycle through node {node}")]
    Cycle { node: usize },
}

impl MagicError for BuildError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::LengthMismatch { .. } => "BUILD_LENGTH_MISMATCH",
            Self::SourceOutOfRange { .. } => "BUILD_SOURCE_OUT_OF_RANGE",
            Self::Cycle { .. } => "BUILD_CYCLE",
        }
    }
}

/// Serialized form of a spell; deserialization validates through [`Spell::new`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellParts {
    pub tokens: Vec<Token>,
    pub connections: Vec<Vec<usize>>,
}

/// An immutable spell graph.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "SpellParts", into = "SpellParts")
)]
pub struct Spell {
    tokens: Vec<Token>,
    connections: Vec<Vec<usize>>,
}

impl Spell {
    /// Builds a spell, rejecting dangling connections and cycles.
    ///
    /// Declared input arity is not checked here; a node with too few sources
    /// fails when evaluated.
    pub fn new(tokens: Vec<Token>, connections: Vec<Vec<usize>>) -> Result<Self, BuildError> {
        if tokens.len() != connections.len() {
            return Err(BuildError::LengthMismatch {
                tokens: tokens.len(),
                connections: connections.len(),
            });
        }
        let len = tokens.len();
        for (node, sources) in connections.iter().enumerate() {
            if let Some(&input) = sources.iter().find(|&&input| input >= len) {
                return Err(BuildError::SourceOutOfRange { node, input, len });
            }
        }
        if let Some(node) = find_cycle(&connections) {
            return Err(BuildError::Cycle { node });
        }
        Ok(Self {
            tokens,
            connections,
        })
    }

    /// Assembles a spell without any validation.
    ///
    /// Malformed graphs built this way fail at evaluation with an
    /// [`EvalError`] instead of at construction.
    pub fn from_raw_parts(tokens: Vec<Token>, connections: Vec<Vec<usize>>) -> Self {
        Self {
            tokens,
            connections,
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn connections(&self) -> &[Vec<usize>] {
        &self.connections
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Index of the evaluation root.
    pub fn sink(&self) -> Option<usize> {
        self.tokens.iter().position(Token::is_sink)
    }

    /// Returns true if any node needs a coordinate supplied by the caller.
    pub fn needs_target(&self) -> bool {
        self.tokens.iter().any(Token::needs_target)
    }

    /// Infers the spell's attributes with a world-less dry run.
    pub fn attributes(&self) -> Result<Attributes, EvalError> {
        let mut ctx = CastContext::dry_run();
        evaluate(self, &mut ctx)?;
        Ok(ctx.into_attributes())
    }

    /// Player-facing name derived from the attributes.
    pub fn name(&self) -> Option<String> {
        self.attributes().ok()?.display_name()
    }

    /// Distinct token kinds with multiplicities, in first-appearance order.
    ///
    /// Every node counts, reachable from the sink or not.
    pub fn required_tokens(&self) -> Vec<(Token, u32)> {
        let mut needed: Vec<(Token, u32)> = Vec::new();
        for token in &self.tokens {
            match needed.iter_mut().find(|(kind, _)| kind == token) {
                Some((_, count)) => *count += 1,
                None => needed.push((*token, 1)),
            }
        }
        needed
    }

    /// Returns true if `inventory` can pay for one cast. Never mutates.
    pub fn can_cast(&self, inventory: &TokenInventory) -> bool {
        Ledger::plan(self, inventory).is_ok()
    }

    /// Number of casts `inventory` can pay for.
    pub fn max_casts(&self, inventory: &TokenInventory) -> u32 {
        Ledger::max_casts(self, inventory)
    }
}

impl TryFrom<SpellParts> for Spell {
    type Error = BuildError;

    fn try_from(parts: SpellParts) -> Result<Self, Self::Error> {
        Spell::new(parts.tokens, parts.connections)
    }
}

impl From<Spell> for SpellParts {
    fn from(spell: Spell) -> Self {
        SpellParts {
            tokens: spell.tokens,
            connections: spell.connections,
        }
    }
}

impl fmt::Display for Spell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(token.name())?;
        }
        Ok(())
    }
}

/// Returns a node on a cycle, if the connection table has one.
fn find_cycle(connections: &[Vec<usize>]) -> Option<usize> {
    // Kahn's algorithm over edges source -> consumer.
    let len = connections.len();
    let mut pending: Vec<usize> = connections.iter().map(Vec::len).collect();
    let mut consumers: Vec<Vec<usize>> = vec![Vec::new(); len];
    for (node, sources) in connections.iter().enumerate() {
        for &input in sources {
            consumers[input].push(node);
        }
    }

    let mut ready: Vec<usize> = (0..len).filter(|&node| pending[node] == 0).collect();
    let mut resolved = 0;
    while let Some(node) = ready.pop() {
        resolved += 1;
        for &consumer in &consumers[node] {
            pending[consumer] -= 1;
            if pending[consumer] == 0 {
                ready.push(consumer);
            }
        }
    }

    if resolved == len {
        None
    } else {
        (0..len).find(|&node| pending[node] > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{Material, RangeBand, ScaleTier};

    fn melee_beam() -> Spell {
        Spell::new(
            vec![
                Token::SpecificTarget,
                Token::WithinRange(RangeBand::Melee),
                Token::MadeOf(Material::Poop),
                Token::Scale(ScaleTier::Small),
                Token::BeamOf,
            ],
            vec![vec![], vec![0], vec![], vec![], vec![2, 3, 1]],
        )
        .unwrap()
    }

    #[test]
    fn construction_rejects_malformed_tables() {
        assert_eq!(
            Spell::new(vec![Token::BallOf], vec![]),
            Err(BuildError::LengthMismatch {
                tokens: 1,
                connections: 0
            })
        );
        assert_eq!(
            Spell::new(vec![Token::OneAtRandom], vec![vec![3]]),
            Err(BuildError::SourceOutOfRange {
                node: 0,
                input: 3,
                len: 1
            })
        );
        assert!(matches!(
            Spell::new(
                vec![Token::OneAtRandom, Token::OneAtRandom],
                vec![vec![1], vec![0]]
            ),
            Err(BuildError::Cycle { .. })
        ));
    }

    #[test]
    fn attributes_of_a_melee_beam() {
        let spell = melee_beam();
        let attributes = spell.attributes().unwrap();
        assert!(attributes.requires_target());
        assert_eq!(attributes.range(), 1.5);
        assert_eq!(attributes.aoe_radius(), 0.0);
        assert_eq!(attributes.base_damage(), 1);
        assert_eq!(spell.name().as_deref(), Some("small beam of poop"));
        assert!(spell.needs_target());
    }

    #[test]
    fn first_sink_wins() {
        let spell = Spell::new(
            vec![
                Token::Scale(ScaleTier::Medium),
                Token::TheCaster,
                Token::Heal,
                Token::MadeOf(Material::Fire),
                Token::BallOf,
            ],
            vec![vec![], vec![], vec![0, 1], vec![], vec![3, 0, 1]],
        )
        .unwrap();
        assert_eq!(spell.sink(), Some(2));
        let attributes = spell.attributes().unwrap();
        assert!(attributes.is_heal());
        assert_eq!(attributes.spell_shape(), None);
    }

    #[test]
    fn required_tokens_count_every_node() {
        let spell = Spell::new(
            vec![
                Token::MadeOf(Material::Fire),
                Token::MadeOf(Material::Fire),
                Token::Blend,
                Token::Scale(ScaleTier::Small),
                Token::TheCaster,
                Token::BallOf,
                Token::MadeOf(Material::Fire),
            ],
            vec![vec![], vec![], vec![0, 1], vec![], vec![], vec![2, 3, 4], vec![]],
        )
        .unwrap();
        let required = spell.required_tokens();
        assert_eq!(required[0], (Token::MadeOf(Material::Fire), 3));
        assert_eq!(required.len(), 5);
    }

    #[test]
    fn can_cast_does_not_mutate() {
        let spell = melee_beam();
        let mut inventory = TokenInventory::new();
        inventory.stock_for(&spell, 1);
        let before = inventory.clone();

        assert!(spell.can_cast(&inventory));
        assert_eq!(spell.max_casts(&inventory), 1);
        assert_eq!(inventory, before);

        let poorer = TokenInventory::from_stacks(
            before
                .stacks()
                .iter()
                .copied()
                .filter(|stack| stack.token != Token::BeamOf),
        );
        assert!(!spell.can_cast(&poorer));
        assert_eq!(spell.max_casts(&poorer), 0);
    }

    #[test]
    fn display_lists_token_names() {
        assert_eq!(
            melee_beam().to_string(),
            "chalk shard, emerald shard, red globule, sighing module, copper rod"
        );
    }
}
