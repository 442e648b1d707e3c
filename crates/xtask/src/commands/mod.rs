//! Command implementations for xtask
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod cast;
mod grimoire;
mod inspect;
mod synth;

pub use cast::Cast;
pub use grimoire::Grimoire;
pub use inspect::Inspect;
pub use synth::Synth;
