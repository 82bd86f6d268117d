//! Card catalog for identifier lookup and inflation.
//!
//! The `CardCatalog` stores every card record known to an encounter. Decks
//! and enemy scripts refer to cards by id; `inflate` expands those ids into
//! full records, skipping ids the catalog does not know.

use rustc_hash::FxHashMap;
use tracing::warn;

use super::definition::{Card, CardId};
use crate::core::CombatError;

/// Catalog of card records.
///
/// ## Example
///
/// ```
/// use battle_timeline::cards::{Card, CardCatalog, CardId};
///
/// let mut catalog = CardCatalog::new();
/// catalog.register(Card::attack("shoot", "Shoot", 3, 4)).unwrap();
///
/// let found = catalog.get(&CardId::new("shoot")).unwrap();
/// assert_eq!(found.name, "Shoot");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: FxHashMap<CardId, Card>,
}

impl CardCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from records, rejecting duplicate ids.
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Result<Self, CombatError> {
        let mut catalog = Self::new();
        for card in cards {
            catalog.register(card)?;
        }
        Ok(catalog)
    }

    /// Register a card record.
    pub fn register(&mut self, card: Card) -> Result<(), CombatError> {
        if self.cards.contains_key(&card.id) {
            return Err(CombatError::DuplicateCard(card.id));
        }
        self.cards.insert(card.id.clone(), card);
        Ok(())
    }

    /// Get a card record by ID.
    #[must_use]
    pub fn get(&self, id: &CardId) -> Option<&Card> {
        self.cards.get(id)
    }

    /// Get a card record by ID, failing with `UnknownCard`.
    pub fn require(&self, id: &CardId) -> Result<&Card, CombatError> {
        self.get(id).ok_or_else(|| CombatError::UnknownCard(id.clone()))
    }

    /// Check if a card ID is registered.
    #[must_use]
    pub fn contains(&self, id: &CardId) -> bool {
        self.cards.contains_key(id)
    }

    /// Get the number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Expand ids into card records, preserving order.
    ///
    /// Unknown ids are skipped rather than failing the whole hand.
    pub fn inflate<'a>(&self, ids: impl IntoIterator<Item = &'a CardId>) -> Vec<Card> {
        ids.into_iter()
            .filter_map(|id| match self.get(id) {
                Some(card) => Some(card.clone()),
                None => {
                    warn!(card = %id, "skipping unknown card id during inflation");
                    None
                }
            })
            .collect()
    }

    /// Iterate over all card records.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.values()
    }

    /// Find cards matching a predicate.
    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = &Card>
    where
        F: Fn(&Card) -> bool,
    {
        self.cards.values().filter(move |c| predicate(c))
    }
}
