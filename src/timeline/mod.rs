//! Timeline scheduling.
//!
//! Two schedulers serve different call sites:
//!
//! - [`create_fixed_order`]: the queue actually resolved in combat. Player
//!   entries precede enemy entries; `sp` is a per-side coordinate.
//! - [`build_speed_timeline`]: the hand preview. A true merge of both sides
//!   under a time-unit budget.
//!
//! Interrupt resolvers later rewrite the tail of a live queue; the helpers
//! here only build it and answer coordinate queries.

mod cross;
mod entry;
mod fixed;
mod preview;
mod speed;

pub use cross::{crossed_at, mark_crossings, overlaps_opposing};
pub use entry::{assign_order, QueueEntry};
pub use fixed::create_fixed_order;
pub use preview::build_speed_timeline;
pub use speed::{AgilityModifier, SpeedModifier};

/// Insert entries directly after the cursor, keeping their given order.
///
/// With no cursor (nothing resolved yet) the entries go to the front.
pub fn insert_after_cursor(
    queue: &mut Vec<QueueEntry>,
    cursor: Option<usize>,
    entries: impl IntoIterator<Item = QueueEntry>,
) {
    let at = cursor.map_or(0, |c| (c + 1).min(queue.len()));
    queue.splice(at..at, entries);
}
