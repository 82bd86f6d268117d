//! Victory and defeat transition.
//!
//! Checked after every resolved queue entry. Victory is evaluated first, so
//! a step that defeats both sides is a victory. The transition itself is a
//! fire-and-forget request to the surrounding phase machine; the delay only
//! paces the visual hand-off and never gates simulation.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{CombatConfig, Combatant};

/// Result tag handed to the post-combat phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BattleResult {
    Victory,
    Defeat,
}

/// How the enemy was beaten.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VictoryKind {
    /// Enemy still standing.
    None,
    /// Ordinary victory.
    Standard,
    /// Ether victory: extra visual flag and a caller-chosen delay.
    Ether { delay_ms: u64 },
}

/// Decides whether the enemy is beaten.
///
/// Closures taking `&Combatant` implement it.
pub trait VictoryPredicate {
    fn check(&self, enemy: &Combatant) -> VictoryKind;
}

impl<F> VictoryPredicate for F
where
    F: Fn(&Combatant) -> VictoryKind,
{
    fn check(&self, enemy: &Combatant) -> VictoryKind {
        self(enemy)
    }
}

/// Standard rule: victory once the enemy's hit points reach zero.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnemyDefeated;

impl VictoryPredicate for EnemyDefeated {
    fn check(&self, enemy: &Combatant) -> VictoryKind {
        if enemy.is_defeated() {
            VictoryKind::Standard
        } else {
            VictoryKind::None
        }
    }
}

/// Request for the phase machine to leave combat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseRequest {
    pub result: BattleResult,
    pub delay_ms: u64,
    pub ether_victory: bool,
}

/// The surrounding phase state machine, as seen by the transition check.
pub trait PhaseScheduler {
    /// Drop any pending net-resource-delta display value.
    fn clear_net_delta(&mut self);

    /// Switch to the post-combat phase after `request.delay_ms`.
    fn schedule_phase(&mut self, request: PhaseRequest);
}

/// What the transition check decided.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionOutcome {
    /// The caller should stop resolving.
    pub should_return: bool,
    pub is_victory: bool,
    pub is_defeat: bool,
}

impl TransitionOutcome {
    /// Result tag, if a transition fired.
    #[must_use]
    pub fn result(&self) -> Option<BattleResult> {
        if self.is_victory {
            Some(BattleResult::Victory)
        } else if self.is_defeat {
            Some(BattleResult::Defeat)
        } else {
            None
        }
    }
}

/// Check for the end of the encounter and schedule at most one transition.
///
/// ## Example
///
/// ```
/// use battle_timeline::core::{CombatConfig, Combatant};
/// use battle_timeline::outcome::{
///     process_victory_defeat_transition, EnemyDefeated, PhaseRequest, PhaseScheduler,
/// };
///
/// #[derive(Default)]
/// struct Phases(Vec<PhaseRequest>);
///
/// impl PhaseScheduler for Phases {
///     fn clear_net_delta(&mut self) {}
///     fn schedule_phase(&mut self, request: PhaseRequest) {
///         self.0.push(request);
///     }
/// }
///
/// let mut enemy = Combatant::new(10);
/// enemy.hp = 0;
/// let player = Combatant::new(10);
/// let mut phases = Phases::default();
///
/// let outcome = process_victory_defeat_transition(
///     &enemy, &player, &EnemyDefeated, &mut phases, &CombatConfig::default(),
/// );
/// assert!(outcome.is_victory);
/// assert_eq!(phases.0.len(), 1);
/// ```
pub fn process_victory_defeat_transition(
    enemy: &Combatant,
    player: &Combatant,
    victory: &dyn VictoryPredicate,
    scheduler: &mut dyn PhaseScheduler,
    config: &CombatConfig,
) -> TransitionOutcome {
    let request = match victory.check(enemy) {
        VictoryKind::Standard => Some(PhaseRequest {
            result: BattleResult::Victory,
            delay_ms: config.victory_delay_ms,
            ether_victory: false,
        }),
        VictoryKind::Ether { delay_ms } => Some(PhaseRequest {
            result: BattleResult::Victory,
            delay_ms,
            ether_victory: true,
        }),
        VictoryKind::None if player.is_defeated() => Some(PhaseRequest {
            result: BattleResult::Defeat,
            delay_ms: config.defeat_delay_ms,
            ether_victory: false,
        }),
        VictoryKind::None => None,
    };

    let Some(request) = request else {
        return TransitionOutcome::default();
    };

    debug!(result = ?request.result, delay_ms = request.delay_ms, "scheduling phase transition");
    scheduler.clear_net_delta();
    scheduler.schedule_phase(request);

    TransitionOutcome {
        should_return: true,
        is_victory: request.result == BattleResult::Victory,
        is_defeat: request.result == BattleResult::Defeat,
    }
}
