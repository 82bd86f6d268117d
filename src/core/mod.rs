//! Core combat types: sides, RNG, configuration, combatants, errors.
//!
//! Everything else in the crate builds on these. None of them know about
//! the timeline or the effect pipelines.

pub mod side;
pub mod rng;
pub mod config;
pub mod combatant;
pub mod error;

pub use side::{Side, SideMap};
pub use rng::{shuffle_with, GameRng, GameRngState, RandomSource, ScriptedRolls};
pub use config::CombatConfig;
pub use combatant::{Combatant, HitResult};
pub use error::CombatError;
