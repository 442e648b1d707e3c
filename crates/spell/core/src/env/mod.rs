//! Boundary between the spell engine and the surrounding game.
//!
//! Sink tokens are the only code that touches the world, and they do it
//! through [`SpellWorld`] via the cast context. Everything behind the trait
//! (health bookkeeping, map storage, rendering, message logs) belongs to the
//! game; [`SandboxWorld`] is an in-memory stand-in for tests and tools.
mod sandbox;

use rand::RngCore;

use crate::state::{EntityId, Position};
use crate::token::{Creature, Material};

pub use sandbox::{SandboxActor, SandboxWorld};

/// Read-only view of an actor, as seen by spell processing functions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActorView {
    pub id: EntityId,
    pub name: String,
    pub position: Position,
}

/// Color/severity tag of a message shown to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum MessageTone {
    /// Cast announcements.
    Magic,
    /// The player tried something they cannot do.
    Impossible,
    /// Another actor failed at something.
    Error,
    Info,
    Damage,
    Heal,
}

/// Transient overlay drawn for one frame after a spell resolves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum VisualEffect {
    AoeCircle {
        center: Position,
        radius: u32,
        tone: MessageTone,
    },
    BeamLine {
        from: Position,
        to: Position,
        tone: MessageTone,
    },
}

/// Terrain a construction spell can leave behind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerrainKind {
    Floor,
    Wall(Material),
}

/// World capabilities available to sink tokens.
///
/// Query methods never mutate; mutating methods are only reached through
/// [`crate::spell::CastContext`], which suppresses them during dry runs.
pub trait SpellWorld {
    /// Every actor currently on the map, caster included.
    fn actors(&self) -> Vec<ActorView>;

    fn actor(&self, id: EntityId) -> Option<ActorView>;

    fn actor_at(&self, position: Position) -> Option<ActorView>;

    /// Returns true if `position` is in the player's field of view.
    fn is_visible(&self, position: Position) -> bool;

    /// Applies damage and returns the hit points actually lost.
    fn damage(&mut self, target: EntityId, amount: u32) -> u32;

    /// Applies healing and returns the hit points actually recovered.
    fn heal(&mut self, target: EntityId, amount: u32) -> u32;

    /// Replaces the terrain at `position`; false if the tile is off the map.
    fn set_terrain(&mut self, position: Position, terrain: TerrainKind) -> bool;

    /// Places a new creature on a free tile near `position`.
    fn spawn_near(&mut self, position: Position, creature: Creature) -> Option<EntityId>;

    fn message(&mut self, text: String, tone: MessageTone);

    fn push_effect(&mut self, effect: VisualEffect);

    /// Randomness source for target selection.
    fn rng(&mut self) -> &mut dyn RngCore;
}
