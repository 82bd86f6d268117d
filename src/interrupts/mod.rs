//! Interrupt resolvers.
//!
//! Interrupts rewrite the live queue strictly ahead of the resolution
//! cursor:
//! - **Stun** destroys opposing entries in `[center, center + range]`
//! - **Parry** pushes the opposing timeline back when an attack lands in
//!   `(center, center + range]`, removing entries pushed past max speed
//!
//! Both take the queue by reference and return a new one. Entries at or
//! before the cursor are never touched.

mod parry;
mod stun;

pub use parry::{check_parry_trigger, reset_parry_states, setup_parry_ready, ParryCheck, ParryReadyState};
pub use stun::{process_stun_effect, StunOutcome};
