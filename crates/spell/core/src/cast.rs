//! Casting a spell on behalf of an actor: pay, announce, evaluate.

use crate::env::{MessageTone, SpellWorld};
use crate::error::{ErrorSeverity, MagicError};
use crate::ledger::{Ledger, Shortfall};
use crate::slots::{SlotRole, SpellSlots};
use crate::spell::{CastContext, EvalError, Spell};
use crate::state::{EntityId, Position, TokenInventory};
use crate::token::Value;

/// Whether a cast draws on the caster's inventory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CastCost {
    #[default]
    Charged,
    Waived,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CastError {
    #[error("cannot pay for spell: {0}")]
    Shortfall(#[from] Shortfall),

    #[error("spell failed: {0}")]
    Eval(#[from] EvalError),

    #[error("no spell in the {0} slot")]
    EmptySlot(SlotRole),
}

impl MagicError for CastError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Shortfall(err) => err.severity(),
            Self::Eval(err) => err.severity(),
            Self::EmptySlot(_) => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Shortfall(err) => err.error_code(),
            Self::Eval(err) => err.error_code(),
            Self::EmptySlot(_) => "CAST_EMPTY_SLOT",
        }
    }
}

/// Pays for and casts `spell` as `caster`.
///
/// A spell without a sink and a shortfall both leave the inventory untouched;
/// either failure is reported to the message log before the error is returned.
pub fn cast_spell(
    world: &mut dyn SpellWorld,
    caster: EntityId,
    inventory: &mut TokenInventory,
    spell: &Spell,
    target: Option<Position>,
    cost: CastCost,
) -> Result<Value, CastError> {
    let mut ctx = CastContext::new(caster, world, target);
    let is_player = caster.is_player();
    let name = ctx.caster_name();

    if spell.sink().is_none() {
        if is_player {
            ctx.say("That spell would do nothing", MessageTone::Impossible);
        } else {
            ctx.say(format!("{name}'s spell fizzles"), MessageTone::Error);
        }
        return Err(EvalError::NoSink.into());
    }

    let prepared = match cost {
        CastCost::Waived => Ledger::waive(spell),
        CastCost::Charged => match Ledger::reserve(spell, inventory) {
            Ok(prepared) => prepared,
            Err(shortfall) => {
                if is_player {
                    ctx.say(
                        "You don't have the right tokens to cast that spell",
                        MessageTone::Impossible,
                    );
                } else {
                    ctx.say(format!("{name} failed to cast a spell"), MessageTone::Error);
                }
                return Err(shortfall.into());
            }
        },
    };

    if is_player {
        ctx.say("You cast a spell:", MessageTone::Magic);
    } else {
        ctx.say(format!("{name} casts a spell:"), MessageTone::Magic);
    }
    tracing::debug!(%caster, spell = %spell, ?cost, "casting spell");
    Ok(prepared.cast(&mut ctx)?)
}

/// Casts the bump spell at `target`, falling back to the free bump spell
/// when the inventory cannot pay.
pub fn cast_bump_spell(
    world: &mut dyn SpellWorld,
    caster: EntityId,
    inventory: &mut TokenInventory,
    slots: &SpellSlots,
    target: Position,
) -> Result<Value, CastError> {
    if let Some(bump) = slots.get(SlotRole::Bump) {
        if bump.can_cast(inventory) {
            return cast_spell(world, caster, inventory, bump, Some(target), CastCost::Charged);
        }
    }
    match slots.get(SlotRole::BumpFree) {
        Some(free) => cast_spell(world, caster, inventory, free, Some(target), CastCost::Waived),
        None => Err(CastError::EmptySlot(SlotRole::Bump)),
    }
}
