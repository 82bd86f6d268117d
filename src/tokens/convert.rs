//! Conversion between the bucketed and flat token representations.
//!
//! These are the only places the two shapes meet. Converting to flat sums
//! stacks across buckets and drops grant metadata; converting back places
//! every id in its canonical bucket.

use super::defs::TokenDefs;
use super::flat::{signed, FlatTokens};
use super::ledger::TokenState;

/// Collapse buckets into a flat map.
#[must_use]
pub fn bucket_to_flat(tokens: &TokenState) -> FlatTokens {
    let mut flat = FlatTokens::new();
    for (_, token) in tokens.iter() {
        let count = flat.0.entry(token.id.clone()).or_insert(0);
        *count = count.saturating_add(signed(token.stacks));
    }
    flat
}

/// Expand a flat map into buckets using each id's canonical class.
///
/// Non-positive counts are dropped. Output order within a bucket is sorted
/// by id.
#[must_use]
pub fn flat_to_bucket(flat: &FlatTokens, defs: &TokenDefs) -> TokenState {
    let mut entries: Vec<_> = flat.iter().filter(|(_, n)| *n > 0).collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    let mut tokens = TokenState::default();
    for (id, count) in entries {
        tokens.add_to(defs.class_of(id), id, count.unsigned_abs(), None);
    }
    tokens
}
