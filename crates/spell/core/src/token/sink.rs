//! Processing functions of terminal effect tokens.
//!
//! Each sink records its attributes first and only then checks `dry_run`,
//! so attribute inference sees the same keys a live cast produces.

use super::{Creature, MaterialMix, ScaleTier};
use crate::env::{MessageTone, TerrainKind, VisualEffect};
use crate::spell::{Attribute, CastContext};
use crate::state::Position;

const HEAL_PER_TIER: i64 = 4;

fn amount(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

fn record_shape(
    ctx: &mut CastContext<'_>,
    shape: &str,
    material: &MaterialMix,
    scale: ScaleTier,
) {
    ctx.attributes.set(Attribute::SpellShape, shape);
    ctx.attributes.set(Attribute::Material, material.to_string());
    ctx.attributes.set(Attribute::Scale, scale.to_string());
}

/// Area damage around every visible target.
pub(super) fn ball(
    ctx: &mut CastContext<'_>,
    material: MaterialMix,
    scale: ScaleTier,
    targets: Vec<Position>,
) {
    let damage = material.damage() * scale.multiplier();
    let radius = scale.radius();
    record_shape(ctx, "ball", &material, scale);
    ctx.attributes.set(Attribute::BaseDamage, damage);
    ctx.attributes.set(Attribute::AoeRadius, radius as f32);
    if ctx.dry_run {
        return;
    }

    if targets.is_empty() {
        ctx.say("nothing happens", MessageTone::Info);
        return;
    }
    for target in targets {
        if !ctx.is_visible(target) {
            continue;
        }
        ctx.push_effect(VisualEffect::AoeCircle {
            center: target,
            radius,
            tone: MessageTone::Damage,
        });
        let hit: Vec<_> = ctx
            .actors()
            .into_iter()
            .filter(|actor| actor.position.distance(target) <= radius as f32)
            .collect();
        for actor in hit {
            ctx.say(
                format!(
                    "A ball of {material} hits {} dealing {damage} damage!",
                    actor.name
                ),
                MessageTone::Damage,
            );
            ctx.damage(actor.id, amount(damage));
        }
    }
}

/// Single-tile damage at every target.
pub(super) fn beam(
    ctx: &mut CastContext<'_>,
    material: MaterialMix,
    scale: ScaleTier,
    targets: Vec<Position>,
) {
    let damage = material.damage() * scale.multiplier();
    record_shape(ctx, "beam", &material, scale);
    ctx.attributes.set(Attribute::BaseDamage, damage);
    ctx.attributes.set(Attribute::AoeRadius, 0.0_f32);
    if ctx.dry_run {
        return;
    }

    if targets.is_empty() {
        ctx.say("nothing happens", MessageTone::Info);
        return;
    }
    let origin = ctx.caster_position();
    for target in targets {
        ctx.push_effect(VisualEffect::BeamLine {
            from: origin.unwrap_or(target),
            to: target,
            tone: MessageTone::Damage,
        });
        match ctx.actor_at(target) {
            Some(actor) => {
                ctx.say(
                    format!(
                        "A beam of {material} hits {} dealing {damage} damage!",
                        actor.name
                    ),
                    MessageTone::Damage,
                );
                ctx.damage(actor.id, amount(damage));
            }
            None => ctx.say(
                format!("A beam of {material} hits the ground, accomplishing nothing"),
                MessageTone::Info,
            ),
        }
    }
}

/// Restores health of the actor at every target.
pub(super) fn heal(ctx: &mut CastContext<'_>, scale: ScaleTier, targets: Vec<Position>) {
    let restored = HEAL_PER_TIER * scale.multiplier();
    ctx.attributes.set(Attribute::IsHeal, true);
    ctx.attributes.set(Attribute::Scale, scale.to_string());
    ctx.attributes.set(Attribute::BaseDamage, -restored);
    ctx.attributes.set(Attribute::AoeRadius, 0.0_f32);
    if ctx.dry_run {
        return;
    }

    if targets.is_empty() {
        ctx.say("nothing happens", MessageTone::Info);
        return;
    }
    for target in targets {
        let Some(actor) = ctx.actor_at(target) else {
            continue;
        };
        let recovered = ctx.heal(actor.id, amount(restored));
        ctx.say(
            format!("{} recovers {recovered} HP", actor.name),
            MessageTone::Heal,
        );
    }
}

/// Calls a creature forth next to every target.
pub(super) fn summon(ctx: &mut CastContext<'_>, creature: Creature, targets: Vec<Position>) {
    ctx.attributes.set(Attribute::IsSummon, true);
    ctx.attributes.set(Attribute::Creature, creature.to_string());
    ctx.attributes.set(Attribute::AoeRadius, 0.0_f32);
    if ctx.dry_run {
        return;
    }

    if targets.is_empty() {
        ctx.say("nothing happens", MessageTone::Info);
        return;
    }
    for target in targets {
        match ctx.spawn_near(target, creature) {
            Some(_) => ctx.say(format!("A {creature} appears!"), MessageTone::Magic),
            None => ctx.say(
                format!("The {creature} finds no room and fades"),
                MessageTone::Info,
            ),
        }
    }
}

/// Raises wall terrain around every target, leaving occupied tiles alone.
pub(super) fn wall(
    ctx: &mut CastContext<'_>,
    material: MaterialMix,
    scale: ScaleTier,
    targets: Vec<Position>,
) {
    let radius = scale.radius().saturating_sub(1);
    record_shape(ctx, "wall", &material, scale);
    ctx.attributes.set(Attribute::IsConstruction, true);
    ctx.attributes.set(Attribute::AoeRadius, radius as f32);
    if ctx.dry_run {
        return;
    }

    if targets.is_empty() {
        ctx.say("nothing happens", MessageTone::Info);
        return;
    }
    let terrain = TerrainKind::Wall(material.primary());
    for target in targets {
        let mut raised = 0;
        for tile in target.disc(radius) {
            if ctx.actor_at(tile).is_none() && ctx.set_terrain(tile, terrain) {
                raised += 1;
            }
        }
        if raised > 0 {
            ctx.say(format!("A wall of {material} rises"), MessageTone::Magic);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{SandboxWorld, SpellWorld};
    use crate::token::Material;

    #[test]
    fn ball_hits_everyone_in_radius() {
        let mut world = SandboxWorld::new(10, 10, 1);
        let player = world.add_actor("player", Position::new(0, 0), 20);
        let goblin = world.add_actor("goblin", Position::new(5, 5), 20);
        let imp = world.add_actor("imp", Position::new(6, 6), 20);
        let far = world.add_actor("troll", Position::new(8, 5), 20);
        {
            let mut ctx = CastContext::new(player, &mut world, Some(Position::new(5, 5)));
            ball(
                &mut ctx,
                MaterialMix::single(Material::Ice),
                ScaleTier::Medium,
                vec![Position::new(5, 5)],
            );
            assert_eq!(ctx.attributes.base_damage(), 8);
            assert_eq!(ctx.attributes.aoe_radius(), 2.0);
        }
        assert_eq!(world.actor_state(goblin).map(|a| a.hp), Some(12));
        assert_eq!(world.actor_state(imp).map(|a| a.hp), Some(12));
        assert_eq!(world.actor_state(far).map(|a| a.hp), Some(20));
        assert_eq!(world.effects().len(), 1);
    }

    #[test]
    fn beam_into_empty_ground() {
        let mut world = SandboxWorld::new(10, 10, 1);
        let player = world.add_actor("player", Position::new(0, 0), 20);
        {
            let mut ctx = CastContext::new(player, &mut world, None);
            beam(
                &mut ctx,
                MaterialMix::single(Material::Fire),
                ScaleTier::Small,
                vec![Position::new(3, 3)],
            );
        }
        assert_eq!(
            world.messages().last().map(|(text, _)| text.as_str()),
            Some("A beam of fire hits the ground, accomplishing nothing")
        );
    }

    #[test]
    fn heal_writes_negative_damage() {
        let mut ctx = CastContext::dry_run();
        heal(&mut ctx, ScaleTier::Large, vec![]);
        assert!(ctx.attributes.is_heal());
        assert_eq!(ctx.attributes.base_damage(), -12);
    }

    #[test]
    fn wall_radius_is_one_below_the_tier() {
        let mut world = SandboxWorld::new(10, 10, 1);
        let player = world.add_actor("player", Position::new(0, 0), 20);
        {
            let mut ctx = CastContext::new(player, &mut world, None);
            wall(
                &mut ctx,
                MaterialMix::single(Material::Ice),
                ScaleTier::Medium,
                vec![Position::new(4, 4)],
            );
            assert!(ctx.attributes.is_construction());
            assert_eq!(ctx.attributes.aoe_radius(), 1.0);
        }
        assert_eq!(
            world.terrain(Position::new(4, 5)),
            TerrainKind::Wall(Material::Ice)
        );
        assert_eq!(world.terrain(Position::new(4, 6)), TerrainKind::Floor);
    }

    #[test]
    fn summon_places_a_creature() {
        let mut world = SandboxWorld::new(10, 10, 1);
        let player = world.add_actor("player", Position::new(2, 2), 20);
        {
            let mut ctx = CastContext::new(player, &mut world, None);
            summon(&mut ctx, Creature::Wolf, vec![Position::new(2, 2)]);
        }
        assert_eq!(world.actors().len(), 2);
        assert_eq!(
            world.messages().last().map(|(text, _)| text.as_str()),
            Some("A wolf appears!")
        );
    }
}
