//! In-memory world for tests and offline tools.

use std::collections::{HashMap, HashSet};

use rand::RngCore;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::{ActorView, MessageTone, SpellWorld, TerrainKind, VisualEffect};
use crate::state::{EntityId, Position};
use crate::token::Creature;

/// Actor record kept by [`SandboxWorld`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SandboxActor {
    pub id: EntityId,
    pub name: String,
    pub position: Position,
    pub hp: u32,
    pub max_hp: u32,
}

impl SandboxActor {
    fn view(&self) -> ActorView {
        ActorView {
            id: self.id,
            name: self.name.clone(),
            position: self.position,
        }
    }
}

/// Simulates world capabilities in-memory.
///
/// Every tile is visible unless hidden with [`SandboxWorld::hide`]. Each call
/// to a mutating capability bumps [`SandboxWorld::mutations`], which lets
/// tests prove a dry run left the world alone.
pub struct SandboxWorld {
    width: i32,
    height: i32,
    actors: Vec<SandboxActor>,
    hidden: HashSet<Position>,
    terrain: HashMap<Position, TerrainKind>,
    messages: Vec<(String, MessageTone)>,
    effects: Vec<VisualEffect>,
    rng: StdRng,
    next_id: u32,
    mutations: usize,
}

impl SandboxWorld {
    pub fn new(width: i32, height: i32, seed: u64) -> Self {
        Self {
            width,
            height,
            actors: Vec::new(),
            hidden: HashSet::new(),
            terrain: HashMap::new(),
            messages: Vec::new(),
            effects: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
            next_id: 0,
            mutations: 0,
        }
    }

    /// Adds an actor and returns its id. The first actor added is the player.
    pub fn add_actor(&mut self, name: impl Into<String>, position: Position, hp: u32) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.actors.push(SandboxActor {
            id,
            name: name.into(),
            position,
            hp,
            max_hp: hp,
        });
        id
    }

    pub fn hide(&mut self, position: Position) {
        self.hidden.insert(position);
    }

    pub fn actor_state(&self, id: EntityId) -> Option<&SandboxActor> {
        self.actors.iter().find(|actor| actor.id == id)
    }

    pub fn actor_state_mut(&mut self, id: EntityId) -> Option<&mut SandboxActor> {
        self.actors.iter_mut().find(|actor| actor.id == id)
    }

    pub fn terrain(&self, position: Position) -> TerrainKind {
        self.terrain
            .get(&position)
            .copied()
            .unwrap_or(TerrainKind::Floor)
    }

    pub fn messages(&self) -> &[(String, MessageTone)] {
        &self.messages
    }

    pub fn effects(&self) -> &[VisualEffect] {
        &self.effects
    }

    /// Number of mutating capability calls made so far.
    pub fn mutations(&self) -> usize {
        self.mutations
    }

    pub fn in_bounds(&self, position: Position) -> bool {
        (0..self.width).contains(&position.x) && (0..self.height).contains(&position.y)
    }

    fn is_free(&self, position: Position) -> bool {
        self.in_bounds(position)
            && self.terrain(position) == TerrainKind::Floor
            && self.actor_at(position).is_none()
    }
}

impl SpellWorld for SandboxWorld {
    fn actors(&self) -> Vec<ActorView> {
        self.actors.iter().map(SandboxActor::view).collect()
    }

    fn actor(&self, id: EntityId) -> Option<ActorView> {
        self.actor_state(id).map(SandboxActor::view)
    }

    fn actor_at(&self, position: Position) -> Option<ActorView> {
        self.actors
            .iter()
            .find(|actor| actor.position == position)
            .map(SandboxActor::view)
    }

    fn is_visible(&self, position: Position) -> bool {
        self.in_bounds(position) && !self.hidden.contains(&position)
    }

    fn damage(&mut self, target: EntityId, amount: u32) -> u32 {
        self.mutations += 1;
        let Some(actor) = self.actor_state_mut(target) else {
            return 0;
        };
        let lost = amount.min(actor.hp);
        actor.hp -= lost;
        lost
    }

    fn heal(&mut self, target: EntityId, amount: u32) -> u32 {
        self.mutations += 1;
        let Some(actor) = self.actor_state_mut(target) else {
            return 0;
        };
        let recovered = amount.min(actor.max_hp - actor.hp);
        actor.hp += recovered;
        recovered
    }

    fn set_terrain(&mut self, position: Position, terrain: TerrainKind) -> bool {
        self.mutations += 1;
        if !self.in_bounds(position) {
            return false;
        }
        self.terrain.insert(position, terrain);
        true
    }

    fn spawn_near(&mut self, position: Position, creature: Creature) -> Option<EntityId> {
        self.mutations += 1;
        let spot = (1..=2)
            .flat_map(|radius| position.disc(radius))
            .find(|candidate| *candidate != position && self.is_free(*candidate))?;
        Some(self.add_actor(creature.to_string(), spot, 5))
    }

    fn message(&mut self, text: String, tone: MessageTone) {
        self.mutations += 1;
        self.messages.push((text, tone));
    }

    fn push_effect(&mut self, effect: VisualEffect) {
        self.mutations += 1;
        self.effects.push(effect);
    }

    fn rng(&mut self) -> &mut dyn RngCore {
        &mut self.rng
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_and_heal_are_clamped() {
        let mut world = SandboxWorld::new(10, 10, 7);
        let orc = world.add_actor("orc", Position::new(1, 1), 10);

        assert_eq!(world.damage(orc, 4), 4);
        assert_eq!(world.heal(orc, 10), 4);
        assert_eq!(world.damage(orc, 50), 10);
        assert_eq!(world.actor_state(orc).map(|a| a.hp), Some(0));
        assert_eq!(world.mutations(), 3);
    }

    #[test]
    fn spawn_skips_walls_and_occupied_tiles() {
        let mut world = SandboxWorld::new(3, 3, 7);
        world.add_actor("player", Position::new(1, 1), 10);
        for p in Position::new(1, 1).disc(1).filter(|p| *p != Position::new(1, 2)) {
            world.set_terrain(p, TerrainKind::Wall(crate::token::Material::Ice));
        }

        let rat = world.spawn_near(Position::new(1, 1), Creature::Rat);
        let placed = rat.and_then(|id| world.actor(id)).map(|a| a.position);
        assert_eq!(placed, Some(Position::new(1, 2)));
    }

    #[test]
    fn hidden_and_out_of_bounds_tiles_are_not_visible() {
        let mut world = SandboxWorld::new(4, 4, 0);
        world.hide(Position::new(2, 2));
        assert!(world.is_visible(Position::new(1, 1)));
        assert!(!world.is_visible(Position::new(2, 2)));
        assert!(!world.is_visible(Position::new(-1, 0)));
    }
}
