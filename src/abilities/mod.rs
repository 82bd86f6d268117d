//! Player abilities invoked by name.

mod book;

pub use book::{Ability, AbilityBook, AbilityError, AbilityOutcome};
