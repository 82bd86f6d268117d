//! Card system: records, tags, catalog, and dealing.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier used by decks and the catalog
//! - `Card`: Fully inflated card record (speed cost, priority, tags, stats)
//! - `SpecialTag` / `CardTrait`: Tags that drive the effect pipelines
//! - `CardCatalog`: Identifier lookup and inflation
//! - `deal_hand`: Random hands from a deck pool

pub mod tags;
pub mod definition;
pub mod catalog;
pub mod deck;

pub use tags::{CardTrait, CrossBonus, CrossBonusKind, SpecialTag, Specials};
pub use definition::{Card, CardId, CardKind, Priority};
pub use catalog::CardCatalog;
pub use deck::{deal_hand, draw_extra};
