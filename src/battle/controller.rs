//! The turn-resolution controller.
//!
//! `Battle` owns both combatants and the live queue, and resolves the
//! queue one entry at a time. Every step runs the same sequence:
//!
//! 1. pre-attack specials rewrite the card and both combatants
//! 2. attack cards are checked against the opposing side's armed parries
//! 3. damage math, unless the pipeline asked to skip it
//! 4. block gain, parry arming, and stun for cards that carry them
//! 5. on-play specials: token changes, bonus cards, deferred effects
//! 6. the victory/defeat transition check
//!
//! Logs and sounds leave through [`CombatHooks`]; nothing else in the
//! crate talks to the outside world.

use tracing::{debug, info, warn};

use super::report::StepReport;
use super::state::{BattleSnapshot, BattleState, Rules};
use crate::abilities::{Ability, AbilityBook, AbilityError, AbilityOutcome};
use crate::cards::{deal_hand, draw_extra, Card, CardCatalog, CardId};
use crate::core::{CombatConfig, CombatError, Combatant, GameRng, Side, SideMap};
use crate::effects::{
    process_card_play_specials, process_pre_attack_specials, CombatEvent, CombatHooks,
    NextTurnEffects, SoundCue,
};
use crate::interrupts::{check_parry_trigger, process_stun_effect, reset_parry_states, setup_parry_ready};
use crate::outcome::{
    process_victory_defeat_transition, BattleResult, EnemyDefeated, TransitionOutcome,
    VictoryPredicate,
};
use crate::timeline::{assign_order, create_fixed_order, insert_after_cursor, mark_crossings, AgilityModifier, QueueEntry};
use crate::tokens::{GrantedAt, TokenDefs, TokenId, TokenLedger};

/// A two-sided battle.
///
/// ## Example
///
/// ```
/// use battle_timeline::battle::Battle;
/// use battle_timeline::cards::{Card, CardCatalog};
/// use battle_timeline::core::{CombatConfig, Combatant};
/// use battle_timeline::effects::CombatHooks;
/// use battle_timeline::outcome::BattleResult;
///
/// let strike = Card::attack("strike", "Strike", 3, 6);
/// let catalog = CardCatalog::from_cards([strike.clone()]).unwrap();
/// let mut battle = Battle::new(
///     Combatant::new(20),
///     Combatant::new(5),
///     catalog,
///     CombatConfig::default(),
/// )
/// .unwrap();
///
/// battle.begin_turn(vec![strike], vec![]);
/// let reports = battle.resolve_all(&mut CombatHooks::noop());
/// assert_eq!(reports.len(), 1);
/// assert_eq!(battle.result(), Some(BattleResult::Victory));
/// ```
pub struct Battle {
    rules: Rules,
    state: BattleState,
    rng: GameRng,
    victory: Box<dyn VictoryPredicate>,
    turn_start: Option<BattleSnapshot>,
}

impl std::fmt::Debug for Battle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Battle")
            .field("turn", &self.state.turn)
            .field("cursor", &self.state.cursor)
            .field("queue_len", &self.state.queue.len())
            .field("result", &self.state.result)
            .finish_non_exhaustive()
    }
}

impl Battle {
    /// Create a battle with the standard token table and victory rule.
    pub fn new(
        player: Combatant,
        enemy: Combatant,
        catalog: CardCatalog,
        config: CombatConfig,
    ) -> Result<Self, CombatError> {
        config.validate()?;
        Ok(Self {
            rules: Rules {
                config,
                defs: TokenDefs::standard(),
                catalog,
                reload_card_ids: Vec::new(),
            },
            state: BattleState::new(player, enemy),
            rng: GameRng::new(0),
            victory: Box::new(EnemyDefeated),
            turn_start: None,
        })
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = GameRng::new(seed);
        self
    }

    /// Replace the victory rule.
    #[must_use]
    pub fn with_victory(mut self, victory: impl VictoryPredicate + 'static) -> Self {
        self.victory = Box::new(victory);
        self
    }

    #[must_use]
    pub fn with_token_defs(mut self, defs: TokenDefs) -> Self {
        self.rules.defs = defs;
        self
    }

    /// Card ids that count as reload cards besides those with the trait.
    #[must_use]
    pub fn with_reload_cards(mut self, ids: impl IntoIterator<Item = CardId>) -> Self {
        self.rules.reload_card_ids = ids.into_iter().collect();
        self
    }

    /// Abilities the player owns.
    #[must_use]
    pub fn with_abilities(mut self, abilities: impl IntoIterator<Item = Ability>) -> Self {
        self.state.abilities = AbilityBook::with_abilities(abilities);
        self
    }

    #[must_use]
    pub fn state(&self) -> &BattleState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &CombatConfig {
        &self.rules.config
    }

    #[must_use]
    pub fn combatant(&self, side: Side) -> &Combatant {
        &self.state.combatants[side]
    }

    #[must_use]
    pub fn queue(&self) -> &[QueueEntry] {
        &self.state.queue
    }

    #[must_use]
    pub fn result(&self) -> Option<BattleResult> {
        self.state.result
    }

    /// Deal the player's hand for the coming turn.
    ///
    /// Deferred effects from the last turn apply here: emergency draw adds
    /// extra cards, and recall returns the last card the player submitted.
    pub fn deal_hand(&mut self, pool: &[CardId]) -> &[Card] {
        let Battle { rules, state, rng, .. } = self;
        let mut hand = deal_hand(pool, &rules.catalog, rules.config.hand_size, rng);

        if state.pending.emergency_draw > 0 {
            let extra = draw_extra(&hand, pool, &rules.catalog, state.pending.emergency_draw as usize, rng);
            debug!(extra = extra.len(), "emergency draw");
            hand.extend(extra);
        }
        if state.pending.recall_card {
            if let Some(card) = state.submitted[Side::Player].last() {
                debug!(card = %card.id, "card recalled");
                hand.push(card.clone());
            }
        }

        state.hand = hand;
        &self.state.hand
    }

    /// Schedule a new turn from both sides' submissions.
    ///
    /// Submissions beyond the configured limit are dropped. Submitted player
    /// cards leave the hand, one copy per submission. Effects deferred by
    /// the previous turn come into force.
    pub fn begin_turn(&mut self, mut player_cards: Vec<Card>, mut enemy_cards: Vec<Card>) {
        let limit = self.rules.config.max_submit_cards;
        for (side, cards) in [(Side::Player, &mut player_cards), (Side::Enemy, &mut enemy_cards)] {
            if cards.len() > limit {
                warn!(%side, submitted = cards.len(), limit, "too many cards submitted, truncating");
                cards.truncate(limit);
            }
        }

        for card in &player_cards {
            if let Some(pos) = self.state.hand.iter().position(|held| held.id == card.id) {
                self.state.hand.remove(pos);
            }
        }

        let agility = SideMap::new(|side| self.state.combatants[side].agility);
        let mut queue = create_fixed_order(&player_cards, &enemy_cards, &agility, &AgilityModifier);
        mark_crossings(&mut queue);

        self.state.queue = queue;
        self.state.cursor = None;
        self.state.submitted = SideMap::from_values(player_cards, enemy_cards);
        self.state.active = std::mem::take(&mut self.state.pending);
        self.turn_start = Some(self.snapshot());

        info!(turn = self.state.turn, entries = self.state.queue.len(), "turn started");
    }

    /// Resolve the next queue entry.
    ///
    /// Returns `None` when the queue is exhausted or the battle is over.
    pub fn step(&mut self, hooks: &mut CombatHooks<'_>) -> Option<StepReport> {
        if self.state.result.is_some() {
            return None;
        }
        let index = self.state.next_index();
        let entry = self.state.queue.get(index)?.clone();
        let side = entry.side;
        let target = side.opponent();

        let Battle { rules, state, rng, .. } = self;
        let config = &rules.config;

        let pre = {
            let ctx = rules.context(state, index);
            process_pre_attack_specials(
                &entry.card,
                &state.combatants[side],
                &state.combatants[target],
                side,
                &ctx,
                rng,
            )
        };
        state.combatants[side] = pre.attacker;
        state.combatants[target] = pre.defender;
        let card = pre.card;
        let mut events = pre.events;
        let mut logs = pre.logs;
        let mut out_cards = Vec::new();

        if card.is_attack() {
            let check = check_parry_trigger(
                &state.queue,
                index,
                &state.parry_states,
                Some(config.max_speed),
                config,
            );
            state.queue = check.queue;
            state.parry_states = check.parry_states;
            events.extend(check.parry_events);
            logs.extend(check.logs);
            out_cards = check.out_cards;
        }

        if !pre.skip_normal_damage {
            let bonus = match side {
                Side::Player => state.active.fencing_damage_bonus,
                Side::Enemy => 0,
            };
            let damage = card.damage_or_zero().saturating_add(bonus);
            let defender = &mut state.combatants[target];
            let mut dealt = 0i64;
            for _ in 0..card.hits_or_one() {
                let hit = defender.take_hit(damage, card.ignore_block);
                dealt += hit.dealt;
                events.push(CombatEvent::Damage {
                    target,
                    card: card.id.clone(),
                    blocked: hit.blocked,
                    dealt: hit.dealt,
                });
            }
            logs.push(format!("{}: {} deals {} damage", side, card.name, dealt));
        }

        if let Some(amount) = card.block.filter(|b| *b > 0) {
            state.combatants[side].gain_block(amount);
            events.push(CombatEvent::BlockGained { side, amount });
            logs.push(format!("{}: {} grants {} block", side, card.name, amount));
        }

        if card.is_parry() {
            let resolved = QueueEntry {
                card: card.clone(),
                ..entry.clone()
            };
            state.parry_states.push(setup_parry_ready(&resolved, config));
            logs.push(format!("{}: {} readies a parry", side, card.name));
        }

        if card.is_stun() {
            let stun = process_stun_effect(&state.queue, index, config.stun_range);
            state.queue = stun.queue;
            events.extend(stun.event);
            logs.extend(stun.logs);
        }

        let play = {
            let ctx = rules.context(state, index);
            process_card_play_specials(&card, &state.combatants[side], side, &ctx)
        };
        let owner = &mut state.combatants[side];
        for change in &play.tokens_to_remove {
            match change.stacks {
                Some(stacks) => owner.tokens.remove(&change.id, stacks),
                None => owner.tokens.clear(&change.id),
            }
        }
        let granted_at = GrantedAt {
            turn: state.turn,
            sp: entry.sp,
        };
        for change in &play.tokens_to_add {
            owner
                .tokens
                .grant(&change.id, change.stacks.unwrap_or(1), &rules.defs, granted_at);
        }
        if !play.bonus_cards.is_empty() {
            let bonus = play
                .bonus_cards
                .into_iter()
                .map(|c| QueueEntry::new(side, c, entry.sp, entry.original_index));
            insert_after_cursor(&mut state.queue, Some(index), bonus);
            assign_order(&mut state.queue);
        }
        state.pending.merge(&play.next_turn);
        events.extend(play.events);
        logs.extend(play.logs);

        state.cursor = Some(index);

        for line in &logs {
            hooks.log(line);
            state.log.push_back(line.clone());
        }
        for cue in events.iter().filter_map(CombatEvent::sound) {
            hooks.sound(cue);
        }

        let transition = self.check_transition(hooks);
        Some(StepReport {
            index,
            entry,
            card,
            events,
            logs,
            out_cards,
            transition,
        })
    }

    /// Resolve entries until the queue runs out or the battle ends.
    pub fn resolve_all(&mut self, hooks: &mut CombatHooks<'_>) -> Vec<StepReport> {
        std::iter::from_fn(|| self.step(hooks)).collect()
    }

    /// Run the victory/defeat check.
    ///
    /// Schedules at most one phase change per battle. Once a result is set
    /// further calls report it without scheduling anything.
    pub fn check_transition(&mut self, hooks: &mut CombatHooks<'_>) -> TransitionOutcome {
        if let Some(result) = self.state.result {
            return TransitionOutcome {
                should_return: true,
                is_victory: result == BattleResult::Victory,
                is_defeat: result == BattleResult::Defeat,
            };
        }

        let outcome = process_victory_defeat_transition(
            &self.state.combatants[Side::Enemy],
            &self.state.combatants[Side::Player],
            self.victory.as_ref(),
            &mut *hooks,
            &self.rules.config,
        );
        if let Some(result) = outcome.result() {
            info!(?result, turn = self.state.turn, "battle decided");
            hooks.sound(match result {
                BattleResult::Victory => SoundCue::Victory,
                BattleResult::Defeat => SoundCue::Defeat,
            });
            self.state.result = Some(result);
        }
        outcome
    }

    /// Close the turn and return the effects deferred to the next one.
    ///
    /// Unresolved entries are discarded. Parries, block, and ungranted
    /// turn tokens are cleared; ability cooldowns tick.
    pub fn end_turn(&mut self) -> NextTurnEffects {
        reset_parry_states(&mut self.state.parry_states);
        for side in Side::ALL {
            let combatant = &mut self.state.combatants[side];
            combatant.tokens.clear_turn_tokens();
            combatant.block = 0;
        }
        self.state.abilities.tick();
        self.state.queue.clear();
        self.state.cursor = None;
        self.state.active = NextTurnEffects::default();

        debug!(turn = self.state.turn, pending = ?self.state.pending, "turn ended");
        self.state.turn += 1;
        self.state.pending.clone()
    }

    /// Invoke a player ability by name.
    pub fn use_ability(&mut self, name: &str) -> AbilityOutcome {
        self.try_ability(name).into()
    }

    fn try_ability(&mut self, name: &str) -> Result<Ability, AbilityError> {
        if Ability::from_name(name) == Some(Ability::Rewind)
            && self.state.abilities.owns(Ability::Rewind)
            && self.turn_start.is_none()
        {
            return Err(AbilityError::NothingToRewind);
        }
        let ability = self.state.abilities.invoke(name)?;

        match ability {
            Ability::Redraw => {
                let pending = &mut self.state.pending;
                pending.emergency_draw = pending
                    .emergency_draw
                    .max(self.rules.config.emergency_draw_count);
            }
            Ability::Rewind => {
                if let Some(snapshot) = self.turn_start.clone() {
                    let abilities = std::mem::take(&mut self.state.abilities);
                    self.state = snapshot.state;
                    self.state.abilities = abilities;
                    self.rng = GameRng::from_state(&snapshot.rng);
                }
            }
            Ability::FocusBurst => {
                let at = GrantedAt {
                    turn: self.state.turn,
                    sp: self.state.queue.get(self.state.next_index()).map_or(0, |e| e.sp),
                };
                self.state.combatants[Side::Player]
                    .tokens
                    .grant(&TokenId::FOCUS, 1, &self.rules.defs, at);
            }
        }
        Ok(ability)
    }

    fn snapshot(&self) -> BattleSnapshot {
        BattleSnapshot {
            state: self.state.clone(),
            rng: self.rng.state(),
        }
    }

    /// Encode the battle state and RNG position.
    pub fn snapshot_bytes(&self) -> Result<Vec<u8>, CombatError> {
        bincode::serialize(&self.snapshot()).map_err(|e| CombatError::Snapshot(e.to_string()))
    }

    /// Rebuild a battle from `snapshot_bytes` output.
    ///
    /// The catalog, config, and victory rule are not part of the snapshot.
    pub fn restore(bytes: &[u8], catalog: CardCatalog, config: CombatConfig) -> Result<Self, CombatError> {
        let snapshot: BattleSnapshot =
            bincode::deserialize(bytes).map_err(|e| CombatError::Snapshot(e.to_string()))?;
        let mut battle = Self::new(
            snapshot.state.combatants[Side::Player].clone(),
            snapshot.state.combatants[Side::Enemy].clone(),
            catalog,
            config,
        )?;
        battle.state = snapshot.state;
        battle.rng = GameRng::from_state(&snapshot.rng);
        Ok(battle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardTrait, SpecialTag};
    use crate::effects::HookRecorder;
    use crate::outcome::VictoryKind;

    fn catalog() -> CardCatalog {
        CardCatalog::from_cards([
            Card::attack("strike", "Strike", 3, 6),
            Card::attack("shoot", "Shoot", 1, 2),
            Card::defense("guard", "Guard", 2, 4),
        ])
        .unwrap()
    }

    fn battle(player_hp: i64, enemy_hp: i64) -> Battle {
        Battle::new(
            Combatant::new(player_hp),
            Combatant::new(enemy_hp),
            catalog(),
            CombatConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = CombatConfig::default().with_hand_size(0);
        let result = Battle::new(Combatant::new(10), Combatant::new(10), catalog(), config);
        assert!(matches!(result, Err(CombatError::InvalidConfig(_))));
    }

    #[test]
    fn test_fixed_order_resolution() {
        let mut battle = battle(50, 50);
        battle.begin_turn(
            vec![Card::attack("p1", "P1", 2, 1), Card::attack("p2", "P2", 2, 1)],
            vec![Card::attack("e1", "E1", 1, 1)],
        );
        let reports = battle.resolve_all(&mut CombatHooks::noop());
        let ids: Vec<&str> = reports.iter().map(|r| r.card.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2", "e1"]);
        assert_eq!(battle.combatant(Side::Enemy).hp, 48);
        assert_eq!(battle.combatant(Side::Player).hp, 49);
    }

    #[test]
    fn test_block_absorbs_first() {
        let mut battle = battle(50, 50);
        battle.begin_turn(vec![Card::attack("a", "A", 2, 5)], vec![]);
        battle.state.combatants[Side::Enemy].block = 3;

        let report = battle.step(&mut CombatHooks::noop()).unwrap();
        assert_eq!(report.damage_dealt(), 2);
        assert_eq!(battle.combatant(Side::Enemy).block, 0);
        assert_eq!(battle.combatant(Side::Enemy).hp, 48);
    }

    #[test]
    fn test_defense_card_grants_block() {
        let mut battle = battle(50, 50);
        battle.begin_turn(
            vec![Card::defense("guard", "Guard", 1, 4)],
            vec![Card::attack("e", "E", 3, 6)],
        );
        battle.resolve_all(&mut CombatHooks::noop());
        assert_eq!(battle.combatant(Side::Player).hp, 48);
        assert_eq!(battle.combatant(Side::Player).block, 0);
    }

    #[test]
    fn test_parry_pushes_enemy_out() {
        let mut battle = battle(50, 50);
        battle.begin_turn(
            vec![Card::defense("parry", "Parry", 2, 0).with_parry(5, 30)],
            vec![Card::attack("e1", "E1", 3, 4), Card::attack("e2", "E2", 3, 4)],
        );
        let reports = battle.resolve_all(&mut CombatHooks::noop());

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[1].out_cards.len(), 1);
        assert_eq!(reports[1].out_cards[0].card.id.as_str(), "e2");
        assert_eq!(battle.combatant(Side::Player).hp, 46);
    }

    #[test]
    fn test_stun_destroys_window() {
        let mut battle = battle(50, 50);
        battle.begin_turn(
            vec![Card::attack("bash", "Bash", 2, 1).with_trait(CardTrait::Stun)],
            vec![Card::attack("e1", "E1", 3, 4), Card::attack("e2", "E2", 6, 4)],
        );
        let reports = battle.resolve_all(&mut CombatHooks::noop());

        let resolved: Vec<&str> = reports.iter().map(|r| r.card.id.as_str()).collect();
        assert_eq!(resolved, vec!["bash", "e2"]);
        assert!(reports[0]
            .events
            .iter()
            .any(|e| matches!(e, CombatEvent::Stun { destroyed, .. } if destroyed == &vec!["E1".to_string()])));
    }

    #[test]
    fn test_bonus_shots_resolve_next() {
        let mut battle = battle(50, 50);
        battle.begin_turn(
            vec![
                Card::attack("volley", "Volley", 2, 1).with_special(SpecialTag::DoubleShot),
                Card::attack("last", "Last", 2, 1),
            ],
            vec![],
        );
        let reports = battle.resolve_all(&mut CombatHooks::noop());
        let ids: Vec<&str> = reports.iter().map(|r| r.card.id.as_str()).collect();
        assert_eq!(ids, vec!["volley", "shoot#bonus1", "shoot#bonus2", "last"]);
        assert_eq!(reports[1].entry.sp, 2);
        assert_eq!(battle.combatant(Side::Enemy).hp, 50 - 1 - 2 - 2 - 1);
    }

    #[test]
    fn test_hooks_receive_logs_and_sounds() {
        let mut recorder = HookRecorder::new();
        let mut battle = battle(50, 6);
        battle.begin_turn(vec![Card::attack("strike", "Strike", 3, 6)], vec![]);
        {
            let mut hooks = recorder.hooks();
            battle.resolve_all(&mut hooks);
        }
        assert!(!recorder.logs.is_empty());
        assert_eq!(recorder.logs.len(), battle.state().log.len());
        assert!(recorder.sounds.contains(&SoundCue::Hit));
        assert!(recorder.sounds.contains(&SoundCue::Victory));
        assert_eq!(recorder.phases.len(), 1);
        assert_eq!(recorder.net_delta_resets, 1);
    }

    #[test]
    fn test_transition_guard() {
        let mut recorder = HookRecorder::new();
        let mut battle = battle(50, 6);
        battle.begin_turn(
            vec![Card::attack("a", "A", 1, 6), Card::attack("b", "B", 1, 6)],
            vec![Card::attack("e", "E", 1, 99)],
        );
        {
            let mut hooks = recorder.hooks();
            let reports = battle.resolve_all(&mut hooks);
            assert_eq!(reports.len(), 1);
            let again = battle.check_transition(&mut hooks);
            assert!(again.is_victory);
        }
        assert_eq!(recorder.phases.len(), 1);
        assert_eq!(battle.combatant(Side::Player).hp, 50);
    }

    #[test]
    fn test_victory_beats_defeat() {
        let mut recorder = HookRecorder::new();
        let mut battle = battle(1, 1);
        battle.state.combatants[Side::Player].hp = 0;
        battle.state.combatants[Side::Enemy].hp = 0;
        let outcome = battle.check_transition(&mut recorder.hooks());
        assert!(outcome.is_victory);
        assert!(!outcome.is_defeat);
    }

    #[test]
    fn test_custom_victory_rule() {
        let mut battle = battle(50, 20).with_victory(|enemy: &Combatant| {
            if enemy.hp <= 10 {
                VictoryKind::Ether { delay_ms: 50 }
            } else {
                VictoryKind::None
            }
        });
        let mut recorder = HookRecorder::new();
        battle.begin_turn(vec![Card::attack("a", "A", 1, 10), Card::attack("b", "B", 1, 1)], vec![]);
        let reports = battle.resolve_all(&mut recorder.hooks());
        assert_eq!(reports.len(), 1);
        assert_eq!(recorder.phases[0].delay_ms, 50);
        assert!(recorder.phases[0].ether_victory);
    }

    #[test]
    fn test_end_turn_carries_deferred_effects() {
        let mut battle = battle(50, 50);
        battle.begin_turn(
            vec![Card::defense("hone", "Hone", 1, 0).with_special(SpecialTag::SharpenBlade)],
            vec![],
        );
        battle.resolve_all(&mut CombatHooks::noop());
        let next = battle.end_turn();
        assert_eq!(next.fencing_damage_bonus, 3);
        assert_eq!(battle.state().turn, 2);

        battle.begin_turn(vec![Card::attack("a", "A", 1, 2)], vec![]);
        battle.resolve_all(&mut CombatHooks::noop());
        assert_eq!(battle.combatant(Side::Enemy).hp, 45);
        assert!(battle.end_turn().is_empty());
    }

    #[test]
    fn test_granted_turn_token_survives_one_boundary() {
        let mut battle = battle(50, 50);
        battle.begin_turn(
            vec![Card::attack("squad", "Squad", 1, 0).with_special(SpecialTag::ExecutionSquad)],
            vec![],
        );
        battle.resolve_all(&mut CombatHooks::noop());
        assert!(battle.combatant(Side::Player).has_token(&TokenId::JAM_IMMUNE));

        battle.end_turn();
        assert!(battle.combatant(Side::Player).has_token(&TokenId::JAM_IMMUNE));
        battle.end_turn();
        assert!(!battle.combatant(Side::Player).has_token(&TokenId::JAM_IMMUNE));
        assert!(battle.combatant(Side::Player).has_token(&TokenId::LOADED));
    }

    #[test]
    fn test_submission_limit() {
        let mut battle = battle(500, 500);
        let cards: Vec<Card> = (0..8).map(|i| Card::attack(format!("c{i}"), "C", 1, 1)).collect();
        battle.begin_turn(cards, vec![]);
        assert_eq!(battle.queue().len(), 5);
    }

    #[test]
    fn test_deal_hand_with_emergency_draw_and_recall() {
        let pool: Vec<CardId> = ["strike", "shoot", "guard"].into_iter().map(CardId::new).collect();
        let config = CombatConfig::default().with_hand_size(2);
        let mut battle = Battle::new(Combatant::new(50), Combatant::new(50), catalog(), config)
            .unwrap()
            .with_seed(7);

        battle.begin_turn(
            vec![Card::defense("trick", "Trick", 1, 0)
                .with_special(SpecialTag::EmergencyDraw)
                .with_special(SpecialTag::RecallCard)],
            vec![],
        );
        battle.resolve_all(&mut CombatHooks::noop());
        battle.end_turn();

        let hand = battle.deal_hand(&pool);
        assert_eq!(hand.len(), 2 + 1 + 1);
        assert_eq!(hand.last().map(|c| c.id.as_str()), Some("trick"));
    }

    #[test]
    fn test_submitted_cards_leave_hand() {
        let pool: Vec<CardId> = ["shoot", "shoot", "guard"].into_iter().map(CardId::new).collect();
        let config = CombatConfig::default().with_hand_size(3);
        let mut battle = Battle::new(Combatant::new(50), Combatant::new(50), catalog(), config)
            .unwrap()
            .with_seed(3);
        battle.deal_hand(&pool);

        let shoot = battle.rules.catalog.require(&CardId::new("shoot")).unwrap().clone();
        battle.begin_turn(vec![shoot], vec![]);

        let mut held: Vec<&str> = battle.state().hand.iter().map(|c| c.id.as_str()).collect();
        held.sort_unstable();
        assert_eq!(held, vec!["guard", "shoot"]);
    }

    #[test]
    fn test_rewind_not_owned() {
        let mut battle = battle(50, 50);
        let outcome = battle.use_ability("rewind");
        assert!(!outcome.success);
        assert_eq!(outcome.message, AbilityError::NotOwned("rewind".to_string()).to_string());

        let mut owner = self::battle(50, 50).with_abilities([Ability::Rewind]);
        let early = owner.use_ability("rewind");
        assert_eq!(early.message, AbilityError::NothingToRewind.to_string());
    }

    #[test]
    fn test_abilities() {
        let mut battle = battle(50, 50).with_abilities([Ability::FocusBurst, Ability::Redraw]);

        let used = battle.use_ability("focus_burst");
        assert!(used.success);
        assert!(battle.combatant(Side::Player).has_token(&TokenId::FOCUS));

        let again = battle.use_ability("focus_burst");
        assert!(!again.success);

        assert!(battle.use_ability("redraw").success);
        assert_eq!(battle.state().pending.emergency_draw, 3);

        assert!(!battle.use_ability("rewind").success);
        assert!(!battle.use_ability("teleport").success);
    }

    #[test]
    fn test_rewind_restores_turn_start() {
        let mut battle = battle(50, 50).with_abilities([Ability::Rewind]);
        battle.begin_turn(
            vec![Card::attack("a", "A", 1, 5)],
            vec![Card::attack("e", "E", 1, 7)],
        );
        battle.resolve_all(&mut CombatHooks::noop());
        assert_eq!(battle.combatant(Side::Player).hp, 43);

        let outcome = battle.use_ability("rewind");
        assert!(outcome.success);
        assert_eq!(battle.combatant(Side::Player).hp, 50);
        assert_eq!(battle.combatant(Side::Enemy).hp, 50);
        assert_eq!(battle.state().cursor, None);
        assert_eq!(battle.queue().len(), 2);

        let twice = battle.use_ability("rewind");
        assert!(!twice.success);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut battle = battle(50, 50).with_seed(11);
        battle.state.combatants[Side::Player].energy = 3;
        battle.begin_turn(
            vec![Card::attack("a", "A", 1, 5).with_special(SpecialTag::GyrusRoulette)],
            vec![Card::attack("e", "E", 4, 3)],
        );
        battle.step(&mut CombatHooks::noop());

        let bytes = battle.snapshot_bytes().unwrap();
        let mut restored = Battle::restore(&bytes, catalog(), CombatConfig::default()).unwrap();
        assert_eq!(restored.state(), battle.state());

        let left = battle.resolve_all(&mut CombatHooks::noop());
        let right = restored.resolve_all(&mut CombatHooks::noop());
        assert_eq!(left, right);
    }

    #[test]
    fn test_restore_rejects_garbage() {
        let result = Battle::restore(&[1, 2, 3], catalog(), CombatConfig::default());
        assert!(matches!(result, Err(CombatError::Snapshot(_))));
    }
}
