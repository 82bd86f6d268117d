//! Bucketed token ledger.
//!
//! `TokenState` is the canonical per-combatant representation: three
//! buckets keyed by duration class. An id appears at most once per bucket
//! and a stored record never has zero stacks.
//!
//! ## Turn boundary
//!
//! `clear_turn_tokens` purges `turn` tokens that carry no grant metadata.
//! Tokens granted during the turn keep their slot for one more boundary:
//! the pass strips their metadata, so the following pass removes them.

use serde::{Deserialize, Serialize};

use super::defs::{DurationClass, TokenDefs, TokenId};
use crate::core::CombatError;

/// When a token was granted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GrantedAt {
    /// Turn number of the grant.
    pub turn: u32,
    /// Timeline coordinate of the granting entry.
    pub sp: i64,
}

/// One stored token record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenInstance {
    pub id: TokenId,
    pub stacks: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub granted_at: Option<GrantedAt>,
}

/// Operations shared by the bucketed and flat token representations.
pub trait TokenLedger {
    /// Total effective stacks of `id`.
    fn stacks(&self, id: &TokenId) -> u64;

    /// Add stacks. Zero stacks is a no-op.
    fn add(&mut self, id: &TokenId, stacks: u64, defs: &TokenDefs);

    /// Remove stacks, clamping at zero and deleting emptied records.
    fn remove(&mut self, id: &TokenId, stacks: u64);

    /// Remove every stack of `id`.
    fn clear(&mut self, id: &TokenId);

    /// True when no token is stored.
    fn is_empty(&self) -> bool;

    /// True if `id` has at least one stack.
    fn has(&self, id: &TokenId) -> bool {
        self.stacks(id) > 0
    }
}

/// Per-combatant token ledger partitioned by duration class.
///
/// `Clone` is a deep copy: every bucket and record is owned.
///
/// ```
/// use battle_timeline::tokens::{TokenDefs, TokenId, TokenLedger, TokenState};
///
/// let defs = TokenDefs::standard();
/// let mut tokens = TokenState::default();
/// tokens.add(&TokenId::FINESSE, 2, &defs);
/// tokens.remove(&TokenId::FINESSE, 5);
/// assert!(tokens.is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenState {
    pub usage: Vec<TokenInstance>,
    pub turn: Vec<TokenInstance>,
    pub permanent: Vec<TokenInstance>,
}

impl TokenState {
    /// Records in one duration class.
    #[must_use]
    pub fn bucket(&self, class: DurationClass) -> &[TokenInstance] {
        match class {
            DurationClass::Usage => &self.usage,
            DurationClass::Turn => &self.turn,
            DurationClass::Permanent => &self.permanent,
        }
    }

    fn bucket_mut(&mut self, class: DurationClass) -> &mut Vec<TokenInstance> {
        match class {
            DurationClass::Usage => &mut self.usage,
            DurationClass::Turn => &mut self.turn,
            DurationClass::Permanent => &mut self.permanent,
        }
    }

    /// Add stacks to an explicit bucket, merging with an existing record.
    ///
    /// A present `granted_at` replaces the record's metadata.
    pub fn add_to(
        &mut self,
        class: DurationClass,
        id: &TokenId,
        stacks: u64,
        granted_at: Option<GrantedAt>,
    ) {
        if stacks == 0 {
            return;
        }
        let bucket = self.bucket_mut(class);
        match bucket.iter_mut().find(|t| &t.id == id) {
            Some(existing) => {
                existing.stacks = existing.stacks.saturating_add(stacks);
                if granted_at.is_some() {
                    existing.granted_at = granted_at;
                }
            }
            None => bucket.push(TokenInstance {
                id: id.clone(),
                stacks,
                granted_at,
            }),
        }
    }

    /// Add stacks with grant metadata so turn tokens survive the next boundary.
    pub fn grant(&mut self, id: &TokenId, stacks: u64, defs: &TokenDefs, at: GrantedAt) {
        self.add_to(defs.class_of(id), id, stacks, Some(at));
    }

    /// Iterate every record with its class.
    pub fn iter(&self) -> impl Iterator<Item = (DurationClass, &TokenInstance)> {
        DurationClass::ALL
            .into_iter()
            .flat_map(move |class| self.bucket(class).iter().map(move |t| (class, t)))
    }

    /// Purge `turn` tokens lacking grant metadata; strip metadata from the rest.
    pub fn clear_turn_tokens(&mut self) {
        self.turn.retain(|t| t.granted_at.is_some());
        for token in &mut self.turn {
            token.granted_at = None;
        }
    }

    /// Encode for battle snapshots.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CombatError> {
        bincode::serialize(self).map_err(|e| CombatError::Snapshot(e.to_string()))
    }

    /// Decode a snapshot produced by `to_bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CombatError> {
        bincode::deserialize(bytes).map_err(|e| CombatError::Snapshot(e.to_string()))
    }
}

impl TokenLedger for TokenState {
    fn stacks(&self, id: &TokenId) -> u64 {
        self.iter()
            .filter(|(_, t)| &t.id == id)
            .fold(0u64, |acc, (_, t)| acc.saturating_add(t.stacks))
    }

    fn add(&mut self, id: &TokenId, stacks: u64, defs: &TokenDefs) {
        self.add_to(defs.class_of(id), id, stacks, None);
    }

    fn remove(&mut self, id: &TokenId, stacks: u64) {
        let mut remaining = stacks;
        for class in DurationClass::ALL {
            if remaining == 0 {
                break;
            }
            let bucket = self.bucket_mut(class);
            if let Some(pos) = bucket.iter().position(|t| &t.id == id) {
                let taken = remaining.min(bucket[pos].stacks);
                bucket[pos].stacks -= taken;
                remaining -= taken;
                if bucket[pos].stacks == 0 {
                    bucket.remove(pos);
                }
            }
        }
    }

    fn clear(&mut self, id: &TokenId) {
        for class in DurationClass::ALL {
            self.bucket_mut(class).retain(|t| &t.id != id);
        }
    }

    fn is_empty(&self) -> bool {
        self.usage.is_empty() && self.turn.is_empty() && self.permanent.is_empty()
    }
}
