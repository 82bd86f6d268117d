//! Serializable battle state.

use serde::{Deserialize, Serialize};

use crate::abilities::AbilityBook;
use crate::cards::{Card, CardCatalog, CardId};
use crate::core::{CombatConfig, Combatant, GameRngState, Side, SideMap};
use crate::effects::{BattleContext, NextTurnEffects};
use crate::interrupts::ParryReadyState;
use crate::outcome::BattleResult;
use crate::timeline::QueueEntry;
use crate::tokens::TokenDefs;

/// Everything that changes while a battle runs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BattleState {
    /// Turn number, starting at 1.
    pub turn: u32,
    pub combatants: SideMap<Combatant>,
    /// Live queue for the current turn.
    pub queue: Vec<QueueEntry>,
    /// Index of the last resolved entry.
    pub cursor: Option<usize>,
    /// Cards each side submitted this turn.
    pub submitted: SideMap<Vec<Card>>,
    /// Cards the player still holds.
    pub hand: Vec<Card>,
    pub parry_states: Vec<ParryReadyState>,
    /// Deferred effects collected this turn.
    pub pending: NextTurnEffects,
    /// Deferred effects from last turn, in force now.
    pub active: NextTurnEffects,
    pub abilities: AbilityBook,
    /// Set once the transition fires; nothing resolves afterwards.
    pub result: Option<BattleResult>,
    /// Narrative log.
    pub log: im::Vector<String>,
}

impl BattleState {
    pub(crate) fn new(player: Combatant, enemy: Combatant) -> Self {
        Self {
            turn: 1,
            combatants: SideMap::from_values(player, enemy),
            queue: Vec::new(),
            cursor: None,
            submitted: SideMap::default(),
            hand: Vec::new(),
            parry_states: Vec::new(),
            pending: NextTurnEffects::default(),
            active: NextTurnEffects::default(),
            abilities: AbilityBook::new(),
            result: None,
            log: im::Vector::new(),
        }
    }

    /// Index of the next entry to resolve.
    #[must_use]
    pub fn next_index(&self) -> usize {
        self.cursor.map_or(0, |c| c + 1)
    }

    /// Entries not yet resolved.
    #[must_use]
    pub fn remaining(&self) -> &[QueueEntry] {
        self.queue.get(self.next_index()..).unwrap_or(&[])
    }
}

/// Fixed inputs of a battle.
#[derive(Clone, Debug)]
pub(crate) struct Rules {
    pub config: CombatConfig,
    pub defs: TokenDefs,
    pub catalog: CardCatalog,
    pub reload_card_ids: Vec<CardId>,
}

impl Rules {
    /// Pipeline context for the entry at `index`.
    pub fn context<'a>(&'a self, state: &'a BattleState, index: usize) -> BattleContext<'a> {
        let (side, sp) = state
            .queue
            .get(index)
            .map_or((Side::Player, 0), |e| (e.side, e.sp));
        let hand: &[Card] = match side {
            Side::Player => &state.hand,
            Side::Enemy => &[],
        };
        BattleContext::new(&self.config, &self.defs)
            .with_queue(&state.queue, index, sp)
            .with_hand(hand)
            .with_attacker_cards(&state.submitted[side])
            .with_catalog(&self.catalog)
            .with_alive_enemy_units(state.combatants[Side::Enemy].alive_units)
            .with_reload_cards(&self.reload_card_ids)
    }
}

/// Snapshot written by `Battle::snapshot_bytes`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BattleSnapshot {
    pub state: BattleState,
    pub rng: GameRngState,
}
