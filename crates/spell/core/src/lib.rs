//! Spell composition, synthesis and evaluation.
//!
//! `spell-core` models a spell as an immutable DAG of typed tokens
//! ([`spell::Spell`]). Attributes are inferred with a world-less dry run,
//! payment goes through the all-or-nothing [`ledger::Ledger`], and real
//! effects reach the game only through the [`env::SpellWorld`] trait.
//! [`synth::Synthesizer`] builds random spells that satisfy attribute
//! predicates; [`grimoire::Grimoire`] keeps a session's worth of them.
pub mod cast;
pub mod config;
pub mod env;
pub mod error;
pub mod grimoire;
pub mod ledger;
pub mod slots;
pub mod spell;
pub mod state;
pub mod synth;
pub mod token;
pub use cast::{CastCost, CastError, cast_bump_spell, cast_spell};
pub use config::SpellConfig;
pub use env::{
    ActorView, MessageTone, SandboxActor, SandboxWorld, SpellWorld, TerrainKind, VisualEffect,
};
pub use error::{ErrorSeverity, MagicError};
pub use grimoire::{Grimoire, free_bump_spell};
pub use ledger::{Ledger, PreparedSpell, ReservationPlan, Shortfall};
pub use slots::{SlotAffordability, SlotRole, SpellSlots};
pub use spell::{AttrValue, Attribute, Attributes, BuildError, CastContext, EvalError, Spell, SpellParts};
pub use state::{EntityId, Position, TokenInventory, TokenStack};
pub use synth::{SpellPreset, SynthesisError, Synthesizer};
pub use token::{
    Creature, Material, MaterialMix, PortTag, Ports, RangeBand, STANDARD_TOKENS, ScaleTier, Token,
    TokenCatalog, TokenSpec, Value,
};
