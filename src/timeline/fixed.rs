//! Fixed-order scheduling for combat resolution.
//!
//! All player entries come first, then all enemy entries, each in submitted
//! order. `sp` is still the side's running cost total so interrupt windows
//! have a shared coordinate space, but it is not a merge key here.

use tracing::trace;

use super::entry::{assign_order, QueueEntry};
use super::speed::{effective_cost, SpeedModifier};
use crate::cards::Card;
use crate::core::{Side, SideMap};

/// Build the resolution queue in manual order.
///
/// ## Example
///
/// ```
/// use battle_timeline::cards::Card;
/// use battle_timeline::core::SideMap;
/// use battle_timeline::timeline::{create_fixed_order, AgilityModifier};
///
/// let player = vec![Card::attack("a", "A", 3, 1), Card::attack("b", "B", 4, 1)];
/// let enemy = vec![Card::attack("x", "X", 2, 1)];
///
/// let queue = create_fixed_order(&player, &enemy, &SideMap::default(), &AgilityModifier);
/// let sps: Vec<i64> = queue.iter().map(|e| e.sp).collect();
/// assert_eq!(sps, vec![3, 7, 2]);
/// ```
pub fn create_fixed_order(
    player_cards: &[Card],
    enemy_cards: &[Card],
    agility: &SideMap<i64>,
    modifier: &dyn SpeedModifier,
) -> Vec<QueueEntry> {
    let mut queue = Vec::with_capacity(player_cards.len() + enemy_cards.len());

    for (side, cards) in [(Side::Player, player_cards), (Side::Enemy, enemy_cards)] {
        let mut sp = 0i64;
        for (index, card) in cards.iter().enumerate() {
            sp = sp.saturating_add(effective_cost(modifier, card.speed_cost, agility[side]));
            trace!(%side, card = %card.id, sp, "scheduled");
            queue.push(QueueEntry::new(side, card.clone(), sp, index));
        }
    }

    assign_order(&mut queue);
    queue
}
