//! Role-based spell slots held by an actor.

use std::sync::Arc;

use crate::spell::Spell;
use crate::state::TokenInventory;
use crate::token::Token;

/// Named slot a spell can be assigned to.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SlotRole {
    Ranged,
    Bump,
    Heal,
    Summon,
    /// Zero-cost fallback used when the bump spell is unaffordable.
    BumpFree,
}

/// Affordability of one slotted spell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotAffordability {
    /// `None` for ad-hoc spells.
    pub role: Option<SlotRole>,
    pub spell: Arc<Spell>,
    pub max_casts: u32,
}

/// Spell references by role plus an ad-hoc list.
///
/// Slots only read spells; spells are shared with the grimoire through `Arc`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpellSlots {
    ranged: Option<Arc<Spell>>,
    bump: Option<Arc<Spell>>,
    heal: Option<Arc<Spell>>,
    summon: Option<Arc<Spell>>,
    bump_free: Option<Arc<Spell>>,
    other: Vec<Arc<Spell>>,
    known_tokens: Vec<Token>,
}

impl SpellSlots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, role: SlotRole) -> Option<&Arc<Spell>> {
        self.slot(role).as_ref()
    }

    /// Puts `spell` in `role`. Paid roles also remember the spell's tokens.
    pub fn assign(&mut self, role: SlotRole, spell: Arc<Spell>) {
        if role != SlotRole::BumpFree {
            self.remember_tokens(&spell);
        }
        *self.slot_mut(role) = Some(spell);
    }

    pub fn clear(&mut self, role: SlotRole) -> Option<Arc<Spell>> {
        self.slot_mut(role).take()
    }

    pub fn push_other(&mut self, spell: Arc<Spell>) {
        self.remember_tokens(&spell);
        self.other.push(spell);
    }

    pub fn other(&self) -> &[Arc<Spell>] {
        &self.other
    }

    /// Records the token kinds of `spell` as known to this actor.
    pub fn remember_tokens(&mut self, spell: &Spell) {
        for token in spell.tokens() {
            if !self.known_tokens.contains(token) {
                self.known_tokens.push(*token);
            }
        }
    }

    pub fn known_tokens(&self) -> &[Token] {
        &self.known_tokens
    }

    pub fn knows(&self, token: &Token) -> bool {
        self.known_tokens.contains(token)
    }

    /// Every slotted spell with its role, ad-hoc spells last.
    pub fn all_spells(&self) -> impl Iterator<Item = (Option<SlotRole>, &Arc<Spell>)> {
        use strum::IntoEnumIterator;

        SlotRole::iter()
            .filter_map(|role| self.get(role).map(|spell| (Some(role), spell)))
            .chain(self.other.iter().map(|spell| (None, spell)))
    }

    /// Casts each slotted spell could afford from `inventory`.
    pub fn affordability(&self, inventory: &TokenInventory) -> Vec<SlotAffordability> {
        self.all_spells()
            .map(|(role, spell)| SlotAffordability {
                role,
                spell: Arc::clone(spell),
                max_casts: spell.max_casts(inventory),
            })
            .collect()
    }

    fn slot(&self, role: SlotRole) -> &Option<Arc<Spell>> {
        match role {
            SlotRole::Ranged => &self.ranged,
            SlotRole::Bump => &self.bump,
            SlotRole::Heal => &self.heal,
            SlotRole::Summon => &self.summon,
            SlotRole::BumpFree => &self.bump_free,
        }
    }

    fn slot_mut(&mut self, role: SlotRole) -> &mut Option<Arc<Spell>> {
        match role {
            SlotRole::Ranged => &mut self.ranged,
            SlotRole::Bump => &mut self.bump,
            SlotRole::Heal => &mut self.heal,
            SlotRole::Summon => &mut self.summon,
            SlotRole::BumpFree => &mut self.bump_free,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{Material, ScaleTier};

    fn self_heal() -> Arc<Spell> {
        Arc::new(
            Spell::new(
                vec![Token::Scale(ScaleTier::Small), Token::TheCaster, Token::Heal],
                vec![vec![], vec![], vec![0, 1]],
            )
            .unwrap(),
        )
    }

    #[test]
    fn assigning_remembers_tokens() {
        let mut slots = SpellSlots::new();
        slots.assign(SlotRole::Heal, self_heal());
        assert!(slots.knows(&Token::Heal));
        assert!(!slots.knows(&Token::BallOf));
        assert_eq!(slots.known_tokens().len(), 3);

        slots.assign(SlotRole::Heal, self_heal());
        assert_eq!(slots.known_tokens().len(), 3);
    }

    #[test]
    fn affordability_reports_every_slot() {
        let heal = self_heal();
        let mut slots = SpellSlots::new();
        slots.assign(SlotRole::Heal, Arc::clone(&heal));
        slots.push_other(Arc::new(
            Spell::new(
                vec![
                    Token::MadeOf(Material::Fire),
                    Token::Scale(ScaleTier::Small),
                    Token::TheCaster,
                    Token::WallOf,
                ],
                vec![vec![], vec![], vec![], vec![0, 1, 2]],
            )
            .unwrap(),
        ));

        let mut inventory = TokenInventory::new();
        inventory.stock_for(&heal, 2);

        let report = slots.affordability(&inventory);
        assert_eq!(report.len(), 2);
        assert_eq!(report[0].role, Some(SlotRole::Heal));
        assert_eq!(report[0].max_casts, 2);
        assert_eq!(report[1].role, None);
        assert_eq!(report[1].max_casts, 0);
    }

    #[test]
    fn free_slot_does_not_teach_tokens() {
        let mut slots = SpellSlots::new();
        slots.assign(SlotRole::BumpFree, self_heal());
        assert!(slots.known_tokens().is_empty());
        assert!(slots.get(SlotRole::BumpFree).is_some());
    }
}
