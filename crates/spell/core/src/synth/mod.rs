//! Random spell synthesis by rejection sampling.
//!
//! One sample shuffles the token pool, picks the first sink as root and
//! fills every declared input depth-first: an already placed node offering
//! the tag is reused once per (node, tag) pair, otherwise a fresh pool token
//! is placed after its own inputs. Samples that recurse past the depth cap,
//! hit an unfillable tag, exceed the node cap or fail the caller's predicate
//! are discarded until the attempt budget runs out.
mod presets;

use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::config::SpellConfig;
use crate::error::{ErrorSeverity, MagicError};
use crate::spell::{Attributes, Spell};
use crate::state::TokenInventory;
use crate::token::{PortTag, STANDARD_TOKENS, Token, TokenCatalog};

pub use presets::SpellPreset;

/// Synthesis produced no spell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SynthesisError {
    /// The pool holds no sink token, so no spell can exist.
    #[error("token pool has no sink")]
    NoSinkCandidate,

    #[error("no acceptable spell after {attempts} attempts")]
    Exhausted { attempts: u32 },
}

impl MagicError for SynthesisError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoSinkCandidate => "SYNTH_NO_SINK_CANDIDATE",
            Self::Exhausted { .. } => "SYNTH_EXHAUSTED",
        }
    }
}

/// Why a single sample was thrown away before reaching the predicate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Abort {
    TooDeep,
    Unfillable(PortTag),
    Malformed,
}

/// Random spell generator over a fixed token pool.
#[derive(Clone, Debug)]
pub struct Synthesizer {
    config: SpellConfig,
    pool: Vec<Token>,
    max_tokens: Option<usize>,
}

impl Synthesizer {
    /// Generator over every built-in token kind.
    pub fn new(config: SpellConfig) -> Self {
        Self::with_pool(config, STANDARD_TOKENS.iter().copied())
    }

    pub fn with_pool(config: SpellConfig, pool: impl IntoIterator<Item = Token>) -> Self {
        Self {
            config,
            pool: pool.into_iter().collect(),
            max_tokens: None,
        }
    }

    pub fn with_catalog(config: SpellConfig, catalog: &TokenCatalog) -> Self {
        Self::with_pool(config, catalog.tokens().iter().copied())
    }

    /// Generator restricted to the kinds an inventory currently holds.
    pub fn from_inventory(config: SpellConfig, inventory: &TokenInventory) -> Self {
        Self::with_catalog(config, &TokenCatalog::from_inventory(inventory))
    }

    /// Rejects spells with more than `max_tokens` nodes.
    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn pool(&self) -> &[Token] {
        &self.pool
    }

    pub fn config(&self) -> &SpellConfig {
        &self.config
    }

    /// Samples until a spell's attributes satisfy `predicate`.
    ///
    /// # Errors
    ///
    /// [`SynthesisError::NoSinkCandidate`] right away if the pool has no
    /// sink, otherwise [`SynthesisError::Exhausted`] once
    /// `config.max_attempts` samples have been discarded.
    pub fn generate<R, P>(&self, rng: &mut R, predicate: P) -> Result<Spell, SynthesisError>
    where
        R: Rng + ?Sized,
        P: Fn(&Attributes) -> bool,
    {
        if !self.pool.iter().any(Token::is_sink) {
            return Err(SynthesisError::NoSinkCandidate);
        }

        for attempt in 1..=self.config.max_attempts {
            let spell = match self.sample(rng) {
                Ok(spell) => spell,
                Err(abort) => {
                    tracing::trace!(attempt, ?abort, "sample aborted");
                    continue;
                }
            };
            if self.max_tokens.is_some_and(|cap| spell.len() > cap) {
                tracing::trace!(attempt, nodes = spell.len(), "sample too large");
                continue;
            }
            match spell.attributes() {
                Ok(attributes) if predicate(&attributes) => {
                    tracing::debug!(attempt, spell = %spell, "synthesized spell");
                    return Ok(spell);
                }
                Ok(_) => tracing::trace!(attempt, "sample rejected"),
                Err(err) => tracing::trace!(attempt, error = %err, "sample failed to evaluate"),
            }
        }

        tracing::warn!(
            attempts = self.config.max_attempts,
            pool = self.pool.len(),
            "spell synthesis exhausted"
        );
        Err(SynthesisError::Exhausted {
            attempts: self.config.max_attempts,
        })
    }

    /// Generates a spell matching `preset`, honoring its node cap.
    pub fn generate_preset<R>(&self, rng: &mut R, preset: SpellPreset) -> Result<Spell, SynthesisError>
    where
        R: Rng + ?Sized,
    {
        let cap = self.config.preset_max_tokens;
        let capped = match self.max_tokens {
            Some(existing) => existing.min(cap),
            None => cap,
        };
        Self {
            max_tokens: Some(capped),
            ..self.clone()
        }
        .generate(rng, |attributes| preset.matches(attributes))
    }

    /// Builds one structurally valid spell without any predicate.
    fn sample<R>(&self, rng: &mut R) -> Result<Spell, Abort>
    where
        R: Rng + ?Sized,
    {
        let mut pool = self.pool.clone();
        pool.shuffle(rng);
        let root = pool
            .iter()
            .copied()
            .find(Token::is_sink)
            .ok_or(Abort::Unfillable(PortTag::Sink))?;

        let mut draft = Draft {
            pool,
            max_depth: self.config.max_depth,
            tokens: Vec::new(),
            connections: Vec::new(),
            consumed: HashSet::new(),
        };
        draft.place(root, 0, rng)?;
        Spell::new(draft.tokens, draft.connections).map_err(|_| Abort::Malformed)
    }
}

impl Default for Synthesizer {
    fn default() -> Self {
        Self::new(SpellConfig::default())
    }
}

/// Spell under construction during one sample.
struct Draft {
    pool: Vec<Token>,
    max_depth: u32,
    tokens: Vec<Token>,
    connections: Vec<Vec<usize>>,
    consumed: HashSet<(usize, PortTag)>,
}

impl Draft {
    /// Fills `token`'s inputs, then appends it.
    fn place<R>(&mut self, token: Token, depth: u32, rng: &mut R) -> Result<(), Abort>
    where
        R: Rng + ?Sized,
    {
        if depth > self.max_depth {
            return Err(Abort::TooDeep);
        }

        let mut sources = Vec::with_capacity(token.inputs().len());
        for &tag in token.inputs() {
            let reusable = (0..self.tokens.len())
                .find(|&i| self.tokens[i].provides(tag) && !self.consumed.contains(&(i, tag)));
            let source = match reusable {
                Some(i) => i,
                None => {
                    self.pool.shuffle(rng);
                    let fresh = self
                        .pool
                        .iter()
                        .copied()
                        .find(|candidate| candidate.provides(tag))
                        .ok_or(Abort::Unfillable(tag))?;
                    self.place(fresh, depth + 1, rng)?;
                    self.tokens.len() - 1
                }
            };
            self.consumed.insert((source, tag));
            sources.push(source);
        }

        self.connections.push(sources);
        self.tokens.push(token);
        Ok(())
    }
}
