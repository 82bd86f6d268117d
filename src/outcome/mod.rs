//! End-of-encounter detection.
//!
//! The resolver never owns the game's phase machine. It reaches it through
//! the [`PhaseScheduler`] seam, and decides victory through a
//! [`VictoryPredicate`] so encounters with special win conditions can plug
//! in their own rule.

mod transition;

pub use transition::{
    process_victory_defeat_transition, BattleResult, EnemyDefeated, PhaseRequest,
    PhaseScheduler, TransitionOutcome, VictoryKind, VictoryPredicate,
};
