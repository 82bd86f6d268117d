//! Flat token map: id to stack count, no duration classes.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::defs::{TokenDefs, TokenId};
use super::ledger::TokenLedger;

/// Flat token representation used by some call sites.
///
/// Counts are signed so foreign data with non-positive entries survives a
/// load; such entries are ignored by `stacks` and dropped on conversion.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlatTokens(pub FxHashMap<TokenId, i64>);

impl FlatTokens {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw count, possibly non-positive.
    #[must_use]
    pub fn raw(&self, id: &TokenId) -> i64 {
        self.0.get(id).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TokenId, i64)> {
        self.0.iter().map(|(id, n)| (id, *n))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl FromIterator<(TokenId, i64)> for FlatTokens {
    fn from_iter<I: IntoIterator<Item = (TokenId, i64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Stack counts past `i64::MAX` saturate.
pub(crate) fn signed(stacks: u64) -> i64 {
    i64::try_from(stacks).unwrap_or(i64::MAX)
}

impl TokenLedger for FlatTokens {
    fn stacks(&self, id: &TokenId) -> u64 {
        self.raw(id).max(0).unsigned_abs()
    }

    fn add(&mut self, id: &TokenId, stacks: u64, _defs: &TokenDefs) {
        if stacks == 0 {
            return;
        }
        let entry = self.0.entry(id.clone()).or_insert(0);
        *entry = entry.saturating_add(signed(stacks));
    }

    fn remove(&mut self, id: &TokenId, stacks: u64) {
        let emptied = match self.0.get_mut(id) {
            Some(count) => {
                *count = count.saturating_sub(signed(stacks)).max(0);
                *count == 0
            }
            None => false,
        };
        if emptied {
            self.0.remove(id);
        }
    }

    fn clear(&mut self, id: &TokenId) {
        self.0.remove(id);
    }

    fn is_empty(&self) -> bool {
        self.0.values().all(|n| *n <= 0)
    }
}
