//! Dealing hands from a deck pool.
//!
//! A deck pool is a list of card ids (duplicates allowed). Dealing shuffles
//! a copy of the pool with the injected random source and inflates the
//! first `size` ids that the catalog knows.

use tracing::debug;

use super::catalog::CardCatalog;
use super::definition::{Card, CardId};
use crate::core::{shuffle_with, RandomSource};

/// Deal a random hand of up to `size` cards from `pool`.
///
/// The pool is not modified. Ids missing from the catalog are skipped and
/// the next id takes their place, so a hand is only short when the pool
/// runs out of known cards.
pub fn deal_hand(
    pool: &[CardId],
    catalog: &CardCatalog,
    size: usize,
    rng: &mut dyn RandomSource,
) -> Vec<Card> {
    let mut order: Vec<&CardId> = pool.iter().collect();
    shuffle_with(rng, &mut order);

    let hand: Vec<Card> = catalog
        .inflate(order)
        .into_iter()
        .take(size)
        .collect();

    debug!(pool = pool.len(), dealt = hand.len(), "dealt hand");
    hand
}

/// Draw `count` more cards into an existing hand, avoiding ids already held
/// when the pool allows it.
pub fn draw_extra(
    hand: &[Card],
    pool: &[CardId],
    catalog: &CardCatalog,
    count: usize,
    rng: &mut dyn RandomSource,
) -> Vec<Card> {
    let fresh: Vec<CardId> = pool
        .iter()
        .filter(|id| !hand.iter().any(|c| &c.id == *id))
        .cloned()
        .collect();
    let source: &[CardId] = if fresh.is_empty() { pool } else { &fresh };
    deal_hand(source, catalog, count, rng)
}
