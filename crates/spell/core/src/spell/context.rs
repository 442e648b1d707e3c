//! Per-cast scratch state threaded through evaluation.

use rand::RngCore;

use super::Attributes;
use crate::env::{ActorView, MessageTone, SpellWorld, TerrainKind, VisualEffect};
use crate::state::{EntityId, Position};
use crate::token::Creature;

/// Context for one evaluation of a spell.
///
/// Created fresh for every cast attempt and dropped afterwards. All world
/// mutation goes through the methods below, which do nothing when
/// `dry_run` is set; messages are additionally suppressed by `quiet`.
pub struct CastContext<'w> {
    /// The actor casting the spell, if any.
    pub caster: Option<EntityId>,

    world: Option<&'w mut dyn SpellWorld>,

    /// Coordinate supplied by the caller (cursor pick, AI target).
    pub target: Option<Position>,

    /// Infer attributes only; never touch the world.
    pub dry_run: bool,

    /// Suppress message emission.
    pub quiet: bool,

    /// Attributes written by processing functions so far.
    pub attributes: Attributes,
}

impl<'w> CastContext<'w> {
    /// Context for a real cast.
    pub fn new(caster: EntityId, world: &'w mut dyn SpellWorld, target: Option<Position>) -> Self {
        Self {
            caster: Some(caster),
            world: Some(world),
            target,
            dry_run: false,
            quiet: false,
            attributes: Attributes::new(),
        }
    }

    /// Context for attribute inference without any world.
    pub fn dry_run() -> CastContext<'static> {
        CastContext {
            caster: None,
            world: None,
            target: None,
            dry_run: true,
            quiet: true,
            attributes: Attributes::new(),
        }
    }

    /// Marks this context as a dry run; the world stays readable.
    pub fn with_dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    pub fn with_quiet(mut self) -> Self {
        self.quiet = true;
        self
    }

    pub fn into_attributes(self) -> Attributes {
        self.attributes
    }

    // ===== queries =====

    pub fn actors(&self) -> Vec<ActorView> {
        self.world
            .as_deref()
            .map(|world| world.actors())
            .unwrap_or_default()
    }

    pub fn actor_at(&self, position: Position) -> Option<ActorView> {
        self.world.as_deref()?.actor_at(position)
    }

    pub fn is_visible(&self, position: Position) -> bool {
        self.world
            .as_deref()
            .is_some_and(|world| world.is_visible(position))
    }

    pub fn caster_view(&self) -> Option<ActorView> {
        self.world.as_deref()?.actor(self.caster?)
    }

    pub fn caster_position(&self) -> Option<Position> {
        self.caster_view().map(|view| view.position)
    }

    /// Caster display name for messages; "You" for the player.
    pub fn caster_name(&self) -> String {
        match self.caster {
            Some(id) if id.is_player() => "You".to_owned(),
            _ => self
                .caster_view()
                .map(|view| view.name)
                .unwrap_or_else(|| "Someone".to_owned()),
        }
    }

    // ===== mutations (no-ops during dry runs) =====

    /// World RNG; `None` during dry runs so inference never advances it.
    pub fn rng(&mut self) -> Option<&mut dyn RngCore> {
        Some(self.live_world()?.rng())
    }

    fn live_world(&mut self) -> Option<&mut dyn SpellWorld> {
        if self.dry_run {
            return None;
        }
        Some(self.world.as_deref_mut()?)
    }

    pub fn say(&mut self, text: impl Into<String>, tone: MessageTone) {
        if self.quiet {
            return;
        }
        if let Some(world) = self.live_world() {
            world.message(text.into(), tone);
        }
    }

    pub fn damage(&mut self, target: EntityId, amount: u32) -> u32 {
        self.live_world()
            .map(|world| world.damage(target, amount))
            .unwrap_or(0)
    }

    pub fn heal(&mut self, target: EntityId, amount: u32) -> u32 {
        self.live_world()
            .map(|world| world.heal(target, amount))
            .unwrap_or(0)
    }

    pub fn set_terrain(&mut self, position: Position, terrain: TerrainKind) -> bool {
        self.live_world()
            .is_some_and(|world| world.set_terrain(position, terrain))
    }

    pub fn spawn_near(&mut self, position: Position, creature: Creature) -> Option<EntityId> {
        self.live_world()?.spawn_near(position, creature)
    }

    pub fn push_effect(&mut self, effect: VisualEffect) {
        if let Some(world) = self.live_world() {
            world.push_effect(effect);
        }
    }
}
