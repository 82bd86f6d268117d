//! Per-entry resolution reports.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::effects::CombatEvent;
use crate::outcome::TransitionOutcome;
use crate::timeline::QueueEntry;

/// What happened when one queue entry resolved.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepReport {
    /// Queue index the entry resolved at.
    pub index: usize,
    /// The entry as scheduled.
    pub entry: QueueEntry,
    /// The card after pre-attack rewrites.
    pub card: Card,
    pub events: Vec<CombatEvent>,
    pub logs: Vec<String>,
    /// Entries a parry pushed out of the timeline.
    pub out_cards: Vec<QueueEntry>,
    pub transition: TransitionOutcome,
}

impl StepReport {
    /// Total damage dealt by this entry after block.
    #[must_use]
    pub fn damage_dealt(&self) -> i64 {
        self.events
            .iter()
            .map(|e| match e {
                CombatEvent::Damage { dealt, .. } => *dealt,
                _ => 0,
            })
            .sum()
    }
}
