//! Caster-owned state the spell engine reads and mutates.
//!
//! Only the token inventory lives here; health, equipment and positions
//! belong to the surrounding game and are reached through
//! [`crate::env::SpellWorld`].
mod common;
mod inventory;

pub use common::{EntityId, Position};
pub use inventory::{TokenInventory, TokenStack};
