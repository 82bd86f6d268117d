//! Combatant token ledgers.
//!
//! Tokens are named stacking status markers. The canonical store is the
//! bucketed `TokenState`; `FlatTokens` is the flat map some call sites use.
//! Both implement `TokenLedger`, and `convert` is the only bridge between
//! them.

mod convert;
mod defs;
mod flat;
mod ledger;

pub use convert::{bucket_to_flat, flat_to_bucket};
pub use defs::{DurationClass, TokenDefs, TokenId};
pub use flat::FlatTokens;
pub use ledger::{GrantedAt, TokenInstance, TokenLedger, TokenState};
