//! Data-driven spell content and loaders.
//!
//! This crate reads hand-authored data files:
//! - Engine configuration (TOML)
//! - Token pools restricting synthesis (RON)
//! - Spell books of named, hand-built spells (RON)
//!
//! Everything loaded here is validated through `spell-core` constructors, so
//! a spell book with a dangling connection or a cycle is rejected at load
//! time rather than at cast time.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, LoadResult, SpellBook, SpellBookEntry, SpellBookLoader, TokenPool,
    TokenPoolLoader,
};
