//! Token inventory carried by casters.
//!
//! Stacks keep insertion order; the ledger's first-fit matching depends on it.

use crate::spell::Spell;
use crate::token::Token;

/// A stack of identical token kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TokenStack {
    pub token: Token,
    pub count: u32,
}

impl TokenStack {
    pub fn new(token: Token, count: u32) -> Self {
        Self { token, count }
    }
}

/// Ordered token stacks; every stored stack has `count >= 1`.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TokenInventory {
    stacks: Vec<TokenStack>,
}

impl TokenInventory {
    pub fn new() -> Self {
        Self { stacks: Vec::new() }
    }

    /// Builds an inventory from stacks, discarding empty ones.
    pub fn from_stacks(stacks: impl IntoIterator<Item = TokenStack>) -> Self {
        Self {
            stacks: stacks.into_iter().filter(|stack| stack.count > 0).collect(),
        }
    }

    pub fn stacks(&self) -> &[TokenStack] {
        &self.stacks
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    /// Total units of `token` across all stacks of that kind.
    pub fn count_of(&self, token: &Token) -> u32 {
        self.stacks
            .iter()
            .filter(|stack| stack.token == *token)
            .fold(0u32, |total, stack| total.saturating_add(stack.count))
    }

    /// Adds one unit, growing the first matching stack or appending a new one.
    pub fn add_token(&mut self, token: Token) {
        self.add_tokens(token, 1);
    }

    pub fn add_tokens(&mut self, token: Token, count: u32) {
        if count == 0 {
            return;
        }
        match self.stacks.iter_mut().find(|stack| stack.token == token) {
            Some(stack) => stack.count = stack.count.saturating_add(count),
            None => self.stacks.push(TokenStack::new(token, count)),
        }
    }

    /// Removes up to `count` units from the stack at `index`, dropping the
    /// stack when it empties. Returns the units actually removed.
    pub fn decrement(&mut self, index: usize, count: u32) -> u32 {
        let Some(stack) = self.stacks.get_mut(index) else {
            return 0;
        };
        let removed = stack.count.min(count);
        stack.count -= removed;
        if stack.count == 0 {
            self.stacks.remove(index);
        }
        removed
    }

    /// Adds enough tokens to cast `spell` `times` more times.
    pub fn stock_for(&mut self, spell: &Spell, times: u32) {
        for (token, multiplicity) in spell.required_tokens() {
            self.add_tokens(token, multiplicity.saturating_mul(times));
        }
    }
}
