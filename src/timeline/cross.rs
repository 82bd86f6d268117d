//! Crossings: opposing entries that share a timeline coordinate.

use rustc_hash::FxHashSet;

use super::entry::QueueEntry;
use crate::core::Side;

/// Flag every entry whose `sp` matches at least one opposing entry.
pub fn mark_crossings(queue: &mut [QueueEntry]) {
    let occupied: FxHashSet<(Side, i64)> = queue.iter().map(|e| (e.side, e.sp)).collect();
    for entry in queue.iter_mut() {
        entry.has_crossed = occupied.contains(&(entry.side.opponent(), entry.sp));
    }
}

/// True if an opposing entry sits at `sp` and is flagged as crossed.
#[must_use]
pub fn crossed_at(queue: &[QueueEntry], side: Side, sp: i64) -> bool {
    queue
        .iter()
        .any(|e| e.opposes(side) && e.sp == sp && e.has_crossed)
}

/// True if any opposing entry shares `sp` with the entry at `q_index`.
///
/// Returns false when the index is out of range.
#[must_use]
pub fn overlaps_opposing(queue: &[QueueEntry], q_index: usize, sp: i64) -> bool {
    let Some(current) = queue.get(q_index) else {
        return false;
    };
    queue
        .iter()
        .enumerate()
        .any(|(i, e)| i != q_index && e.opposes(current.side) && e.sp == sp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Card;

    fn entry(side: Side, sp: i64) -> QueueEntry {
        QueueEntry::new(side, Card::attack("c", "C", 1, 1), sp, 0)
    }

    #[test]
    fn test_mark_crossings() {
        let mut queue = vec![
            entry(Side::Player, 3),
            entry(Side::Player, 6),
            entry(Side::Enemy, 3),
            entry(Side::Enemy, 5),
        ];
        mark_crossings(&mut queue);
        let flags: Vec<bool> = queue.iter().map(|e| e.has_crossed).collect();
        assert_eq!(flags, vec![true, false, true, false]);
    }

    #[test]
    fn test_same_side_is_not_a_crossing() {
        let mut queue = vec![entry(Side::Player, 2), entry(Side::Player, 2)];
        mark_crossings(&mut queue);
        assert!(queue.iter().all(|e| !e.has_crossed));
    }

    #[test]
    fn test_crossed_at_requires_flag() {
        let mut queue = vec![entry(Side::Player, 4), entry(Side::Enemy, 4)];
        assert!(!crossed_at(&queue, Side::Player, 4));
        mark_crossings(&mut queue);
        assert!(crossed_at(&queue, Side::Player, 4));
        assert!(!crossed_at(&queue, Side::Player, 5));
    }

    #[test]
    fn test_overlaps_opposing() {
        let queue = vec![entry(Side::Player, 4), entry(Side::Enemy, 4), entry(Side::Enemy, 7)];
        assert!(overlaps_opposing(&queue, 0, 4));
        assert!(!overlaps_opposing(&queue, 0, 5));
        assert!(!overlaps_opposing(&queue, 9, 4));
    }
}
