//! Scheduled actions.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::Side;

/// One card placed on the merged timeline.
///
/// `sp` is the owning side's cumulative speed position. It is the
/// coordinate used by interrupt range checks; entries of different sides
/// share the coordinate space but are not merged by it in fixed-order mode.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueEntry {
    pub side: Side,

    pub card: Card,

    /// Timeline coordinate.
    pub sp: i64,

    /// 1-based rank assigned at merge time.
    pub order: u32,

    /// Position in the side's submitted list, for stable re-sorting.
    pub original_index: usize,

    /// Cumulative time units on the preview timeline.
    #[serde(default)]
    pub tu: i64,

    /// Tie-break roll, drawn once when the preview timeline is built.
    #[serde(default)]
    pub tie_roll: f64,

    /// Shares its coordinate with an opposing entry.
    #[serde(default)]
    pub has_crossed: bool,
}

impl QueueEntry {
    /// Create an entry at a coordinate. `order` is assigned by the scheduler.
    #[must_use]
    pub fn new(side: Side, card: Card, sp: i64, original_index: usize) -> Self {
        Self {
            side,
            card,
            sp,
            order: 0,
            original_index,
            tu: sp,
            tie_roll: 0.0,
            has_crossed: false,
        }
    }

    /// True if the entry belongs to the side opposing `side`.
    #[must_use]
    pub fn opposes(&self, side: Side) -> bool {
        self.side != side
    }

    /// Display name of the wrapped card.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.card.name
    }
}

/// Assign 1-based `order` ranks in queue order.
pub fn assign_order(queue: &mut [QueueEntry]) {
    for (rank, entry) in queue.iter_mut().enumerate() {
        entry.order = u32::try_from(rank + 1).unwrap_or(u32::MAX);
    }
}
