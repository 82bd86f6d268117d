//! Combat configuration.
//!
//! Every tunable constant of the resolver lives in `CombatConfig`. Callers
//! build one at encounter start (or deserialize it) and hand it to the
//! pipelines, interrupt resolvers, and the battle controller.
//!
//! The engine never hardcodes these values elsewhere.

use serde::{Deserialize, Serialize};

use super::error::CombatError;
use crate::cards::CardId;

/// Complete combat configuration.
///
/// ## Example
///
/// ```
/// use battle_timeline::core::CombatConfig;
///
/// let config = CombatConfig::new()
///     .with_max_speed(24)
///     .with_stun_range(4);
///
/// assert_eq!(config.max_speed, 24);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Time-unit budget of one side's timeline.
    pub max_speed: i64,

    /// Width of the stun window (`[center, center + range]`).
    pub stun_range: i64,

    /// Coordinate past which pushed entries are removed when the caller
    /// supplies no enemy max speed.
    pub parry_out_threshold: i64,

    /// Parry window width for parry cards that do not carry their own.
    pub default_parry_range: i64,

    /// Push amount for parry cards that do not carry their own.
    pub default_parry_push: i64,

    /// Cards dealt per turn.
    pub hand_size: usize,

    /// Maximum cards a side may submit per turn.
    pub max_submit_cards: usize,

    /// Emergency draw only fires when the hand holds at most this many cards.
    pub emergency_draw_threshold: usize,

    /// Cards drawn by an emergency draw.
    pub emergency_draw_count: u32,

    /// Damage bonus granted next turn by blade sharpening.
    pub fencing_damage_bonus: i64,

    /// Catalog id of the card cloned for injected bonus shots.
    pub bonus_shot_card: CardId,

    /// Bonus shots injected by an execution squad.
    pub execution_squad_shots: u32,

    /// Probability that one unit of energy grants an extra roulette hit.
    pub roulette_probability: f64,

    /// Damage added per point of agility.
    pub agility_damage_factor: i64,

    /// Extra hits per finesse stack.
    pub finesse_hits_per_stack: u32,

    /// Delay before the post-combat phase on an ordinary victory.
    pub victory_delay_ms: u64,

    /// Delay before the post-combat phase on defeat.
    pub defeat_delay_ms: u64,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            max_speed: 30,
            stun_range: 5,
            parry_out_threshold: 30,
            default_parry_range: 5,
            default_parry_push: 3,
            hand_size: 5,
            max_submit_cards: 5,
            emergency_draw_threshold: 6,
            emergency_draw_count: 3,
            fencing_damage_bonus: 3,
            bonus_shot_card: CardId::new("shoot"),
            execution_squad_shots: 4,
            roulette_probability: 0.5,
            agility_damage_factor: 5,
            finesse_hits_per_stack: 3,
            victory_delay_ms: 500,
            defeat_delay_ms: 1000,
        }
    }
}

impl CombatConfig {
    /// Create a configuration with the standard values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the timeline budget.
    #[must_use]
    pub fn with_max_speed(mut self, max_speed: i64) -> Self {
        self.max_speed = max_speed;
        self
    }

    /// Set the stun window width.
    #[must_use]
    pub fn with_stun_range(mut self, range: i64) -> Self {
        self.stun_range = range;
        self
    }

    /// Set the fallback "out" threshold for parry pushes.
    #[must_use]
    pub fn with_parry_out_threshold(mut self, threshold: i64) -> Self {
        self.parry_out_threshold = threshold;
        self
    }

    /// Set the fallback parry window and push.
    #[must_use]
    pub fn with_default_parry(mut self, range: i64, push: i64) -> Self {
        self.default_parry_range = range;
        self.default_parry_push = push;
        self
    }

    /// Set the hand size.
    #[must_use]
    pub fn with_hand_size(mut self, size: usize) -> Self {
        self.hand_size = size;
        self
    }

    /// Set the catalog id used for bonus shots.
    #[must_use]
    pub fn with_bonus_shot_card(mut self, id: impl Into<CardId>) -> Self {
        self.bonus_shot_card = id.into();
        self
    }

    /// Set the roulette coin-flip probability.
    #[must_use]
    pub fn with_roulette_probability(mut self, probability: f64) -> Self {
        self.roulette_probability = probability;
        self
    }

    /// Set the phase-transition delays.
    #[must_use]
    pub fn with_transition_delays(mut self, victory_ms: u64, defeat_ms: u64) -> Self {
        self.victory_delay_ms = victory_ms;
        self.defeat_delay_ms = defeat_ms;
        self
    }

    /// Check that the configuration is internally consistent.
    pub fn validate(&self) -> Result<(), CombatError> {
        if self.max_speed < 0 {
            return Err(CombatError::InvalidConfig("max_speed must not be negative"));
        }
        if self.stun_range < 0 {
            return Err(CombatError::InvalidConfig("stun_range must not be negative"));
        }
        if self.default_parry_range < 0 || self.default_parry_push < 0 {
            return Err(CombatError::InvalidConfig("parry defaults must not be negative"));
        }
        if !(0.0..=1.0).contains(&self.roulette_probability) {
            return Err(CombatError::InvalidConfig(
                "roulette_probability must be within [0, 1]",
            ));
        }
        if self.hand_size == 0 {
            return Err(CombatError::InvalidConfig("hand_size must be positive"));
        }
        Ok(())
    }
}
