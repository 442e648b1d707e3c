//! Token payment for spells.
//!
//! Paying is two-phase. [`Ledger::plan`] matches the spell's token multiset
//! against the inventory without touching it; [`Ledger::reserve`] plans and
//! then commits the whole plan at once, so a failed payment leaves the
//! inventory exactly as it was.
//!
//! Plan and commit are not guarded against concurrent mutation. Callers that
//! share one inventory across threads must hold a lock around `reserve`.

use crate::error::{ErrorSeverity, MagicError};
use crate::spell::{CastContext, EvalError, Spell};
use crate::state::TokenInventory;
use crate::token::{Token, Value};

/// The inventory cannot cover a spell's token cost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("missing {token}: need {needed}, have {available}")]
pub struct Shortfall {
    /// First token kind, in node order, that could not be covered.
    pub token: Token,
    pub needed: u32,
    pub available: u32,
}

impl MagicError for Shortfall {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        "LEDGER_SHORTFALL"
    }
}

/// Units to take from each inventory stack, by stack index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReservationPlan {
    reserved: Vec<u32>,
}

impl ReservationPlan {
    /// Units reserved from the stack at `index`.
    pub fn reserved_at(&self, index: usize) -> u32 {
        self.reserved.get(index).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.reserved.iter().sum()
    }
}

/// A spell whose cost has been paid (or waived). Casting consumes it.
#[derive(Debug)]
#[must_use = "a prepared spell has already been paid for"]
pub struct PreparedSpell<'s> {
    spell: &'s Spell,
}

impl<'s> PreparedSpell<'s> {
    pub fn spell(&self) -> &'s Spell {
        self.spell
    }

    /// Evaluates the spell for real against the context's world.
    pub fn cast(self, ctx: &mut CastContext<'_>) -> Result<Value, EvalError> {
        crate::spell::evaluate(self.spell, ctx)
    }
}

/// Stateless payment operations.
pub struct Ledger;

impl Ledger {
    /// Matches one unit per node against the inventory, first fit in stack
    /// order. Never mutates.
    pub fn plan(spell: &Spell, inventory: &TokenInventory) -> Result<ReservationPlan, Shortfall> {
        let stacks = inventory.stacks();
        let mut reserved = vec![0u32; stacks.len()];

        for token in spell.tokens() {
            let slot = (0..stacks.len())
                .find(|&i| stacks[i].token == *token && stacks[i].count > reserved[i]);
            match slot {
                Some(i) => reserved[i] += 1,
                None => {
                    let shortfall = Shortfall {
                        token: *token,
                        needed: spell
                            .required_tokens()
                            .into_iter()
                            .find(|(kind, _)| kind == token)
                            .map_or(1, |(_, count)| count),
                        available: inventory.count_of(token),
                    };
                    tracing::debug!(spell = %spell, %shortfall, "cannot pay for spell");
                    return Err(shortfall);
                }
            }
        }

        Ok(ReservationPlan { reserved })
    }

    /// Pays for `spell` out of `inventory`, all or nothing.
    pub fn reserve<'s>(
        spell: &'s Spell,
        inventory: &mut TokenInventory,
    ) -> Result<PreparedSpell<'s>, Shortfall> {
        let plan = Self::plan(spell, inventory)?;
        Self::commit(&plan, inventory);
        tracing::debug!(spell = %spell, units = plan.total(), "paid for spell");
        Ok(PreparedSpell { spell })
    }

    /// Prepares `spell` without charging anything.
    pub fn waive(spell: &Spell) -> PreparedSpell<'_> {
        PreparedSpell { spell }
    }

    /// Number of times `inventory` can pay for `spell`, ignoring graph shape.
    ///
    /// A spell with no nodes costs nothing and is affordable without limit,
    /// matching [`Ledger::plan`].
    pub fn max_casts(spell: &Spell, inventory: &TokenInventory) -> u32 {
        spell
            .required_tokens()
            .into_iter()
            .map(|(token, needed)| inventory.count_of(&token) / needed)
            .min()
            .unwrap_or(u32::MAX)
    }

    fn commit(plan: &ReservationPlan, inventory: &mut TokenInventory) {
        // Back to front so removing an emptied stack keeps lower indices valid.
        for (index, &units) in plan.reserved.iter().enumerate().rev() {
            if units > 0 {
                inventory.decrement(index, units);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::TokenStack;
    use crate::token::{Material, ScaleTier};

    fn poop_ball() -> Spell {
        Spell::new(
            vec![
                Token::MadeOf(Material::Poop),
                Token::Scale(ScaleTier::Small),
                Token::SpecificTarget,
                Token::BallOf,
            ],
            vec![vec![], vec![], vec![], vec![0, 1, 2]],
        )
        .unwrap()
    }

    #[test]
    fn plan_spans_split_stacks() {
        let spell = Spell::new(
            vec![
                Token::MadeOf(Material::Fire),
                Token::MadeOf(Material::Fire),
                Token::Blend,
                Token::Scale(ScaleTier::Small),
                Token::TheCaster,
                Token::BallOf,
            ],
            vec![vec![], vec![], vec![0, 1], vec![], vec![], vec![2, 3, 4]],
        )
        .unwrap();
        let mut inventory = TokenInventory::from_stacks([
            TokenStack::new(Token::MadeOf(Material::Fire), 1),
            TokenStack::new(Token::Blend, 1),
            TokenStack::new(Token::Scale(ScaleTier::Small), 1),
            TokenStack::new(Token::TheCaster, 1),
            TokenStack::new(Token::BallOf, 1),
            TokenStack::new(Token::MadeOf(Material::Fire), 1),
        ]);

        let plan = Ledger::plan(&spell, &inventory).unwrap();
        assert_eq!(plan.reserved_at(0), 1);
        assert_eq!(plan.reserved_at(5), 1);
        assert_eq!(plan.total(), 6);

        let prepared = Ledger::reserve(&spell, &mut inventory).unwrap();
        assert!(inventory.is_empty());
        assert_eq!(prepared.spell(), &spell);
    }

    #[test]
    fn failed_plan_leaves_inventory_untouched() {
        let spell = poop_ball();
        let mut inventory = TokenInventory::from_stacks([
            TokenStack::new(Token::MadeOf(Material::Poop), 2),
            TokenStack::new(Token::Scale(ScaleTier::Small), 2),
            TokenStack::new(Token::BallOf, 2),
        ]);
        let before = inventory.clone();

        let err = Ledger::reserve(&spell, &mut inventory).unwrap_err();
        assert_eq!(
            err,
            Shortfall {
                token: Token::SpecificTarget,
                needed: 1,
                available: 0
            }
        );
        assert!(err.severity().is_recoverable());
        assert_eq!(inventory, before);
    }

    #[test]
    fn max_casts_is_zero_when_any_kind_is_absent() {
        let spell = poop_ball();
        let inventory = TokenInventory::from_stacks([
            TokenStack::new(Token::MadeOf(Material::Poop), 99),
            TokenStack::new(Token::Scale(ScaleTier::Small), 99),
            TokenStack::new(Token::BallOf, 99),
        ]);
        assert_eq!(Ledger::max_casts(&spell, &inventory), 0);
    }

    #[test]
    fn max_casts_takes_the_scarcest_kind() {
        let spell = poop_ball();
        let mut inventory = TokenInventory::new();
        inventory.stock_for(&spell, 3);
        inventory.add_tokens(Token::MadeOf(Material::Poop), 10);
        assert_eq!(Ledger::max_casts(&spell, &inventory), 3);
    }

    #[test]
    fn empty_spell_is_free_for_plan_and_max_casts() {
        let spell = Spell::new(vec![], vec![]).unwrap();
        let inventory = TokenInventory::new();
        assert_eq!(Ledger::plan(&spell, &inventory).map(|plan| plan.total()), Ok(0));
        assert_eq!(Ledger::max_casts(&spell, &inventory), u32::MAX);
        assert!(spell.can_cast(&inventory));
    }

    #[test]
    fn waived_spells_cost_nothing() {
        let spell = poop_ball();
        let mut ctx = CastContext::dry_run();
        assert_eq!(Ledger::waive(&spell).cast(&mut ctx), Ok(Value::Effect));
        assert_eq!(ctx.attributes.base_damage(), 1);
    }
}
