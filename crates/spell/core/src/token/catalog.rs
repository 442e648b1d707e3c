//! Registry of token kinds available for spell construction.

use super::{Creature, Material, PortTag, RangeBand, ScaleTier, Token};
use crate::state::TokenInventory;

/// Every default-constructible token kind, in a stable order.
pub const STANDARD_TOKENS: &[Token] = &[
    // Target selection
    Token::AllActors,
    Token::TheCaster,
    Token::SpecificTarget,
    Token::WithinRange(RangeBand::Melee),
    Token::WithinRange(RangeBand::Near),
    Token::WithinRange(RangeBand::Far),
    Token::OneAtRandom,
    // Materials
    Token::MadeOf(Material::Poop),
    Token::MadeOf(Material::Fire),
    Token::MadeOf(Material::Ice),
    Token::MadeOf(Material::Lightning),
    Token::Blend,
    // Scales
    Token::Scale(ScaleTier::Small),
    Token::Scale(ScaleTier::Medium),
    Token::Scale(ScaleTier::Large),
    Token::Scale(ScaleTier::Huge),
    // Creatures
    Token::Summonable(Creature::Rat),
    Token::Summonable(Creature::Wolf),
    // Sinks
    Token::BallOf,
    Token::BeamOf,
    Token::Heal,
    Token::Summon,
    Token::WallOf,
];

/// A pool of distinct token kinds.
///
/// The standard catalog feeds unconstrained synthesis; narrower catalogs
/// (for example "whatever this actor carries") restrict it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenCatalog {
    tokens: Vec<Token>,
}

impl TokenCatalog {
    /// Catalog of every built-in kind.
    pub fn standard() -> Self {
        Self {
            tokens: STANDARD_TOKENS.to_vec(),
        }
    }

    /// Builds a catalog from arbitrary tokens, dropping repeated kinds.
    pub fn from_tokens(tokens: impl IntoIterator<Item = Token>) -> Self {
        let mut unique: Vec<Token> = Vec::new();
        for token in tokens {
            if !unique.contains(&token) {
                unique.push(token);
            }
        }
        Self { tokens: unique }
    }

    /// Catalog of the kinds present in `inventory`, in stack order.
    pub fn from_inventory(inventory: &TokenInventory) -> Self {
        Self::from_tokens(inventory.stacks().iter().map(|stack| stack.token))
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn contains(&self, token: &Token) -> bool {
        self.tokens.contains(token)
    }

    /// Kinds whose outputs include `tag`.
    pub fn providers(&self, tag: PortTag) -> impl Iterator<Item = &Token> {
        self.tokens.iter().filter(move |token| token.provides(tag))
    }

    /// Looks a kind up by display name.
    pub fn lookup(&self, name: &str) -> Option<Token> {
        self.tokens.iter().copied().find(|token| token.name() == name)
    }
}

impl Default for TokenCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_has_unique_kinds() {
        let catalog = TokenCatalog::standard();
        assert_eq!(
            TokenCatalog::from_tokens(STANDARD_TOKENS.iter().copied()).len(),
            catalog.len()
        );
    }

    #[test]
    fn every_input_tag_has_a_provider() {
        let catalog = TokenCatalog::standard();
        for token in catalog.tokens() {
            for tag in token.inputs() {
                assert!(
                    catalog.providers(*tag).next().is_some(),
                    "{token} needs {tag} but nothing provides it"
                );
            }
        }
    }

    #[test]
    fn lookup_by_name() {
        let catalog = TokenCatalog::standard();
        assert_eq!(
            catalog.lookup("red globule"),
            Some(Token::MadeOf(Material::Poop))
        );
        assert_eq!(catalog.lookup("plastic spoon"), None);
    }

    #[test]
    fn inventory_catalog_follows_stack_order() {
        let mut inventory = TokenInventory::new();
        inventory.add_token(Token::BallOf);
        inventory.add_token(Token::SpecificTarget);
        inventory.add_token(Token::BallOf);

        let catalog = TokenCatalog::from_inventory(&inventory);
        assert_eq!(catalog.tokens(), &[Token::BallOf, Token::SpecificTarget]);
    }
}
