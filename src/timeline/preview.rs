//! Speed timeline for hand previews.
//!
//! Unlike the fixed-order queue, the preview merges both sides into one
//! sequence. Entries are ranked by
//!
//! 1. ascending raw speed cost,
//! 2. descending priority weight,
//! 3. ascending tie-break roll.
//!
//! Rolls are drawn once per entry, in submission order (player cards first),
//! before sorting. Entries are then accepted while the running time-unit
//! total stays within budget; the first entry that would overflow it ends
//! the timeline and every later entry is dropped.

use std::cmp::Ordering;

use tracing::{debug, trace};

use super::entry::{assign_order, QueueEntry};
use crate::cards::Card;
use crate::core::{RandomSource, Side, SideMap};

fn preview_order(a: &QueueEntry, b: &QueueEntry) -> Ordering {
    a.card
        .speed_cost
        .cmp(&b.card.speed_cost)
        .then_with(|| b.card.priority.weight().cmp(&a.card.priority.weight()))
        .then_with(|| a.tie_roll.total_cmp(&b.tie_roll))
}

/// Merge both hands into a budget-limited preview timeline.
///
/// Each accepted entry carries `tu`, the merged running total after it was
/// accepted, and `sp`, its own side's running total. A budget of zero or
/// less accepts nothing. Negative costs count as zero.
pub fn build_speed_timeline(
    player_cards: &[Card],
    enemy_cards: &[Card],
    max_time_units: i64,
    rng: &mut dyn RandomSource,
) -> Vec<QueueEntry> {
    let mut candidates: Vec<QueueEntry> = [(Side::Player, player_cards), (Side::Enemy, enemy_cards)]
        .into_iter()
        .flat_map(|(side, cards)| {
            cards
                .iter()
                .enumerate()
                .map(move |(index, card)| QueueEntry::new(side, card.clone(), 0, index))
        })
        .collect();

    for entry in &mut candidates {
        entry.tie_roll = rng.roll();
    }

    if max_time_units <= 0 {
        debug!(candidates = candidates.len(), "preview budget exhausted before start");
        return Vec::new();
    }

    candidates.sort_by(preview_order);

    let mut accepted = Vec::with_capacity(candidates.len());
    let mut total = 0i64;
    let mut side_totals: SideMap<i64> = SideMap::default();

    for mut entry in candidates {
        let cost = entry.card.speed_cost.max(0);
        let next = total.saturating_add(cost);
        if next > max_time_units {
            trace!(card = %entry.card.id, next, max_time_units, "preview budget exceeded");
            break;
        }
        total = next;
        side_totals[entry.side] += cost;
        entry.tu = total;
        entry.sp = side_totals[entry.side];
        accepted.push(entry);
    }

    assign_order(&mut accepted);
    debug!(accepted = accepted.len(), total, "built speed timeline");
    accepted
}
