//! # battle-timeline
//!
//! A turn-based combat resolver for card-driven battles.
//!
//! ## Design Principles
//!
//! 1. **Pure Pipelines**: Schedulers, effect pipelines, and interrupt
//!    resolvers take values and return values. Logging, audio, and phase
//!    changes go through injected hooks.
//!
//! 2. **Injected Randomness**: Tie-breaks and probability-based hit counts
//!    draw through `RandomSource`, so every outcome can be pinned in tests.
//!
//! 3. **Tolerant Data**: Unknown tags, missing fields, and odd numbers
//!    default or clamp. The simulation never stops mid-turn on bad cards.
//!
//! ## Architecture
//!
//! - **Two Schedulers**: the resolved queue keeps submitted order per side;
//!   the hand preview merges both sides under a time-unit budget.
//!
//! - **Interrupts Rewrite the Tail**: stun and parry only touch entries
//!   after the resolution cursor.
//!
//! - **Bucketed Tokens**: status markers live in usage, turn, and
//!   permanent buckets with a flat-map view for lookups.
//!
//! ## Modules
//!
//! - `core`: Sides, RNG, configuration, combatants, errors
//! - `cards`: Card records, tags, catalog, hand dealing
//! - `tokens`: Token ledgers and conversion
//! - `timeline`: Queue entries and scheduling
//! - `effects`: Battle context, events, pre-attack and on-play pipelines
//! - `interrupts`: Stun and parry
//! - `outcome`: Victory/defeat transition
//! - `abilities`: Named player abilities
//! - `battle`: The turn-resolution controller

pub mod core;
pub mod cards;
pub mod tokens;
pub mod timeline;
pub mod effects;
pub mod interrupts;
pub mod outcome;
pub mod abilities;
pub mod battle;

// Re-export commonly used types
pub use crate::core::{
    CombatConfig, CombatError, Combatant, GameRng, GameRngState, RandomSource, Side, SideMap,
};

pub use crate::cards::{Card, CardCatalog, CardId, CardKind, CardTrait, Priority, SpecialTag};

pub use crate::tokens::{DurationClass, FlatTokens, TokenDefs, TokenId, TokenLedger, TokenState};

pub use crate::timeline::{build_speed_timeline, create_fixed_order, QueueEntry, SpeedModifier};

pub use crate::effects::{
    process_card_play_specials, process_pre_attack_specials, BattleContext, CombatEvent,
    CombatHooks, SoundCue,
};

pub use crate::interrupts::{check_parry_trigger, process_stun_effect, ParryReadyState};

pub use crate::outcome::{process_victory_defeat_transition, BattleResult, PhaseScheduler};

pub use crate::abilities::{Ability, AbilityBook, AbilityError, AbilityOutcome};

pub use crate::battle::{Battle, StepReport};
