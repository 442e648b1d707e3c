//! Processing functions of target-selection sources and filters.

use rand::seq::SliceRandom;

use super::{RangeBand, Value};
use crate::spell::{Attribute, CastContext};
use crate::state::Position;

pub(super) fn all_actors(ctx: &CastContext<'_>) -> Value {
    let caster = ctx.caster;
    let targets = ctx
        .actors()
        .into_iter()
        .filter(|actor| Some(actor.id) != caster && ctx.is_visible(actor.position))
        .map(|actor| actor.position)
        .collect();
    Value::Targets(targets)
}

pub(super) fn the_caster(ctx: &mut CastContext<'_>) -> Value {
    ctx.attributes.set(Attribute::TargetsCaster, true);
    Value::Targets(ctx.caster_position().into_iter().collect())
}

pub(super) fn specific_target(ctx: &mut CastContext<'_>) -> Value {
    ctx.attributes.set(Attribute::RequiresTarget, true);
    Value::Targets(ctx.target.into_iter().collect())
}

/// Keeps targets strictly closer to the caster than the band radius.
pub(super) fn within_range(
    ctx: &mut CastContext<'_>,
    band: RangeBand,
    targets: Vec<Position>,
) -> Value {
    let radius = band.radius();
    ctx.attributes.narrow_range(radius);
    let Some(origin) = ctx.caster_position() else {
        return Value::Targets(Vec::new());
    };
    Value::Targets(
        targets
            .into_iter()
            .filter(|target| origin.distance(*target) < radius)
            .collect(),
    )
}

pub(super) fn one_at_random(ctx: &mut CastContext<'_>, targets: Vec<Position>) -> Value {
    let picked = match ctx.rng() {
        Some(rng) => targets.choose(rng).copied(),
        None => targets.first().copied(),
    };
    Value::Targets(picked.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use rand::RngCore;

    use super::*;
    use crate::env::{SandboxWorld, SpellWorld};
    use crate::state::EntityId;

    fn arena() -> (SandboxWorld, EntityId) {
        let mut world = SandboxWorld::new(12, 12, 3);
        let player = world.add_actor("player", Position::new(5, 5), 10);
        world.add_actor("rat", Position::new(6, 5), 3);
        world.add_actor("orc", Position::new(9, 5), 8);
        world.add_actor("bat", Position::new(5, 11), 2);
        (world, player)
    }

    #[test]
    fn all_actors_skips_caster_and_hidden() {
        let (mut world, player) = arena();
        world.hide(Position::new(5, 11));
        let ctx = CastContext::new(player, &mut world, None);
        assert_eq!(
            all_actors(&ctx),
            Value::Targets(vec![Position::new(6, 5), Position::new(9, 5)])
        );
    }

    #[test]
    fn range_filter_is_strict_and_narrows() {
        let (mut world, player) = arena();
        let mut ctx = CastContext::new(player, &mut world, None);
        let everyone = vec![
            Position::new(6, 5),
            Position::new(9, 5),
            Position::new(5, 11),
            Position::new(1, 5),
        ];
        let near = within_range(&mut ctx, RangeBand::Near, everyone.clone());
        assert_eq!(near, Value::Targets(vec![Position::new(6, 5)]));
        within_range(&mut ctx, RangeBand::Far, everyone);
        assert_eq!(ctx.attributes.range(), 4.0);
    }

    #[test]
    fn sources_write_flags_without_a_world() {
        let mut ctx = CastContext::dry_run();
        assert_eq!(the_caster(&mut ctx), Value::Targets(vec![]));
        assert_eq!(specific_target(&mut ctx), Value::Targets(vec![]));
        assert!(ctx.attributes.targets_caster());
        assert!(ctx.attributes.requires_target());
        assert_eq!(
            within_range(&mut ctx, RangeBand::Melee, vec![Position::ORIGIN]),
            Value::Targets(vec![])
        );
    }

    #[test]
    fn one_at_random_picks_a_single_member() {
        let (mut world, player) = arena();
        let mut ctx = CastContext::new(player, &mut world, None);
        let pool = vec![Position::new(1, 1), Position::new(2, 2), Position::new(3, 3)];
        match one_at_random(&mut ctx, pool.clone()) {
            Value::Targets(picked) => {
                assert_eq!(picked.len(), 1);
                assert!(pool.contains(&picked[0]));
            }
            other => panic!("unexpected value {other:?}"),
        }
        assert_eq!(one_at_random(&mut ctx, vec![]), Value::Targets(vec![]));
    }

    #[test]
    fn dry_run_picks_the_first_without_touching_the_rng() {
        let (mut world, player) = arena();
        let pool = vec![Position::new(1, 1), Position::new(2, 2), Position::new(3, 3)];
        {
            let mut ctx = CastContext::new(player, &mut world, None).with_dry_run();
            for _ in 0..8 {
                assert_eq!(
                    one_at_random(&mut ctx, pool.clone()),
                    Value::Targets(vec![Position::new(1, 1)])
                );
            }
        }

        let (mut fresh, _) = arena();
        assert_eq!(world.rng().next_u64(), fresh.rng().next_u64());
    }
}
