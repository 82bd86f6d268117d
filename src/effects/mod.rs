//! Special-effect pipelines.
//!
//! Two pure pipelines run for every resolved card:
//! - `process_pre_attack_specials`: rewrites the card, attacker, and
//!   defender before damage math
//! - `process_card_play_specials`: describes bonus cards, token changes,
//!   and deferred next-turn effects
//!
//! ## Design Philosophy
//!
//! Pipelines take a read-only [`BattleContext`] and return value objects.
//! They never call out to the UI, audio, or the game store; the caller
//! applies their output and forwards logs and events through
//! [`CombatHooks`].

mod context;
mod event;
mod on_play;
mod pre_attack;

pub use context::{BattleContext, CombatHooks, HookRecorder};
pub use event::{CombatEvent, SoundCue};
pub use on_play::{process_card_play_specials, NextTurnEffects, OnPlayOutcome, TokenChange};
pub use pre_attack::{process_pre_attack_specials, PreAttackOutcome};
