//! Agility-based speed adjustment.
//!
//! Each side's card costs pass through a `SpeedModifier` before they are
//! accumulated. Any `Fn(i64, i64) -> i64` closure is a modifier, so callers
//! can swap in their own rule without a new type.

/// Maps a card's base speed cost and the owner's agility to an effective cost.
pub trait SpeedModifier {
    /// Effective cost. Negative results are clamped to zero by the scheduler.
    fn adjust(&self, base_cost: i64, agility: i64) -> i64;
}

impl<F> SpeedModifier for F
where
    F: Fn(i64, i64) -> i64,
{
    fn adjust(&self, base_cost: i64, agility: i64) -> i64 {
        self(base_cost, agility)
    }
}

/// Default rule: each point of agility shaves one unit off the cost, down to 1.
///
/// Cards that cost nothing stay free.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AgilityModifier;

impl SpeedModifier for AgilityModifier {
    fn adjust(&self, base_cost: i64, agility: i64) -> i64 {
        if base_cost <= 0 {
            0
        } else {
            base_cost.saturating_sub(agility).max(1)
        }
    }
}

/// Effective cost clamped at zero.
pub(crate) fn effective_cost(modifier: &dyn SpeedModifier, base_cost: i64, agility: i64) -> i64 {
    modifier.adjust(base_cost, agility).max(0)
}
