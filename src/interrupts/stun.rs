//! Stun: destroys opposing entries close behind the stunning card.

use tracing::debug;

use crate::effects::CombatEvent;
use crate::timeline::QueueEntry;

/// Result of a stun.
#[derive(Clone, Debug, PartialEq)]
pub struct StunOutcome {
    pub queue: Vec<QueueEntry>,
    /// One event naming every destroyed card; `None` if nothing was hit.
    pub event: Option<CombatEvent>,
    pub logs: Vec<String>,
}

impl StunOutcome {
    fn unchanged(queue: &[QueueEntry]) -> Self {
        Self {
            queue: queue.to_vec(),
            event: None,
            logs: Vec::new(),
        }
    }
}

/// Cancel opposing entries in `[center, center + range]`, where `center` is
/// the coordinate of the entry at `current_q_index`.
///
/// Only entries after the cursor are eligible. An out-of-range cursor
/// leaves the queue unchanged.
pub fn process_stun_effect(queue: &[QueueEntry], current_q_index: usize, range: i64) -> StunOutcome {
    let Some(stunner) = queue.get(current_q_index) else {
        return StunOutcome::unchanged(queue);
    };
    let center = stunner.sp;
    let upper = center.saturating_add(range.max(0));

    let mut kept = Vec::with_capacity(queue.len());
    let mut destroyed = Vec::new();
    for (i, entry) in queue.iter().enumerate() {
        let in_window = entry.sp >= center && entry.sp <= upper;
        if i > current_q_index && entry.opposes(stunner.side) && in_window {
            destroyed.push(entry.card.name.clone());
        } else {
            kept.push(entry.clone());
        }
    }

    if destroyed.is_empty() {
        return StunOutcome::unchanged(queue);
    }

    debug!(source = %stunner.card.id, center, upper, destroyed = destroyed.len(), "stun resolved");
    let logs = vec![format!(
        "{}: {} stuns {}",
        stunner.side,
        stunner.card.name,
        destroyed.join(", ")
    )];
    StunOutcome {
        queue: kept,
        event: Some(CombatEvent::Stun {
            side: stunner.side,
            source: stunner.card.id.clone(),
            destroyed,
        }),
        logs,
    }
}
