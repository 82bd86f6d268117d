//! Reference turn-resolution controller.
//!
//! ## Key Types
//!
//! - `Battle`: owns both combatants, the live queue, parries, deferred
//!   effects, and the transition guard
//! - `BattleState`: the serializable part of a battle
//! - `StepReport`: what one resolved entry did
//!
//! ## Turn Loop
//!
//! ```text
//! deal_hand -> begin_turn -> step* -> end_turn -> deal_hand -> ...
//! ```
//!
//! `resolve_all` runs `step` until the queue is exhausted or a result is
//! decided.

mod controller;
mod report;
mod state;

pub use controller::Battle;
pub use report::StepReport;
pub use state::{BattleSnapshot, BattleState};
