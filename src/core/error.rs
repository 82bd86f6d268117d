//! Error types surfaced by the combat core.
//!
//! The simulation path tolerates malformed data by defaulting, so errors
//! only describe recoverable, caller-visible outcomes: catalog misses,
//! invalid configuration, and failed ability invocations.

use crate::abilities::AbilityError;
use crate::cards::CardId;

/// Errors returned by combat entry points.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CombatError {
    #[error("unknown card id: {0}")]
    UnknownCard(CardId),

    #[error("duplicate card id: {0}")]
    DuplicateCard(CardId),

    #[error("invalid combat configuration: {0}")]
    InvalidConfig(&'static str),

    #[error("ability failed: {0}")]
    Ability(#[from] AbilityError),

    #[error("battle snapshot failed: {0}")]
    Snapshot(String),
}

impl CombatError {
    /// Returns true if the caller can retry with different input.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Ability(_) | Self::UnknownCard(_))
    }
}
