//! Combatant state: hit points, block, agility, energy, and the token ledger.
//!
//! A `Combatant` is a plain value. Pipelines receive references and return
//! modified copies; only the battle controller replaces the authoritative
//! copy.

use serde::{Deserialize, Serialize};

use crate::tokens::{TokenId, TokenLedger, TokenState};

/// Outcome of applying one hit to a combatant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitResult {
    /// Damage absorbed by block.
    pub blocked: i64,
    /// Damage that reached hit points.
    pub dealt: i64,
}

/// One side's fighting state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    /// Current hit points. May drop below zero.
    pub hp: i64,

    /// Maximum hit points.
    pub max_hp: i64,

    /// Block absorbing incoming damage before hit points.
    #[serde(default)]
    pub block: i64,

    /// Agility stat feeding speed adjustment and agility bonuses.
    #[serde(default)]
    pub agility: i64,

    /// Remaining energy (action resource) this turn.
    #[serde(default)]
    pub energy: i64,

    /// Living units on this side. Single enemies and the player count as 1.
    #[serde(default = "default_units")]
    pub alive_units: u32,

    /// Buffs and debuffs.
    #[serde(default)]
    pub tokens: TokenState,
}

fn default_units() -> u32 {
    1
}

impl Combatant {
    /// Create a combatant at full health.
    #[must_use]
    pub fn new(max_hp: i64) -> Self {
        Self {
            hp: max_hp,
            max_hp,
            block: 0,
            agility: 0,
            energy: 0,
            alive_units: 1,
            tokens: TokenState::default(),
        }
    }

    /// Set agility (builder pattern).
    #[must_use]
    pub fn with_agility(mut self, agility: i64) -> Self {
        self.agility = agility;
        self
    }

    /// Set energy (builder pattern).
    #[must_use]
    pub fn with_energy(mut self, energy: i64) -> Self {
        self.energy = energy;
        self
    }

    /// Set block (builder pattern).
    #[must_use]
    pub fn with_block(mut self, block: i64) -> Self {
        self.block = block;
        self
    }

    /// Set the number of living units (builder pattern).
    #[must_use]
    pub fn with_units(mut self, units: u32) -> Self {
        self.alive_units = units;
        self
    }

    /// Replace the token ledger (builder pattern).
    #[must_use]
    pub fn with_tokens(mut self, tokens: TokenState) -> Self {
        self.tokens = tokens;
        self
    }

    /// True once hit points reach zero.
    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.hp <= 0
    }

    /// Effective stacks of a token across every duration class.
    #[must_use]
    pub fn stacks(&self, id: &TokenId) -> u64 {
        self.tokens.stacks(id)
    }

    /// True if the token is present in any duration class.
    #[must_use]
    pub fn has_token(&self, id: &TokenId) -> bool {
        self.stacks(id) > 0
    }

    /// Add block, ignoring negative amounts.
    pub fn gain_block(&mut self, amount: i64) {
        self.block += amount.max(0);
    }

    /// Apply one hit. Block absorbs first unless `ignore_block` is set, in
    /// which case stored block is left untouched.
    pub fn take_hit(&mut self, damage: i64, ignore_block: bool) -> HitResult {
        let damage = damage.max(0);
        let blocked = if ignore_block { 0 } else { damage.min(self.block.max(0)) };
        if !ignore_block {
            self.block -= blocked;
        }
        let dealt = damage - blocked;
        self.hp -= dealt;
        HitResult { blocked, dealt }
    }
}
