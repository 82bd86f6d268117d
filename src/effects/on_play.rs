//! On-play special effects.
//!
//! Side effects of playing a card that do not depend on the attack: bonus
//! cards to inject, tokens to grant or remove, and deferred next-turn
//! effects. The pipeline only describes them; the caller applies them.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::context::BattleContext;
use super::event::CombatEvent;
use crate::cards::{Card, CardId, CardTrait, CrossBonusKind, SpecialTag};
use crate::core::{Combatant, Side};
use crate::timeline::overlaps_opposing;
use crate::tokens::{TokenId, TokenLedger};

/// A token change requested by the pipeline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenChange {
    pub id: TokenId,
    /// Stacks to add or remove. `None` on removal means every stack.
    pub stacks: Option<u64>,
}

impl TokenChange {
    #[must_use]
    pub fn add(id: TokenId, stacks: u64) -> Self {
        Self {
            id,
            stacks: Some(stacks),
        }
    }

    #[must_use]
    pub fn remove_all(id: TokenId) -> Self {
        Self { id, stacks: None }
    }
}

/// Effects applied by the caller at next-turn setup.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextTurnEffects {
    pub recall_card: bool,
    /// Extra cards to draw.
    pub emergency_draw: u32,
    pub fencing_damage_bonus: i64,
    pub is_aoe_attack: bool,
}

impl NextTurnEffects {
    /// Fold another set of deferred effects into this one.
    ///
    /// Flags are or-ed; counts take the larger value.
    pub fn merge(&mut self, other: &NextTurnEffects) {
        self.recall_card |= other.recall_card;
        self.emergency_draw = self.emergency_draw.max(other.emergency_draw);
        self.fencing_damage_bonus = self.fencing_damage_bonus.max(other.fencing_damage_bonus);
        self.is_aoe_attack |= other.is_aoe_attack;
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Output of the on-play pipeline.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OnPlayOutcome {
    pub bonus_cards: Vec<Card>,
    pub tokens_to_add: Vec<TokenChange>,
    pub tokens_to_remove: Vec<TokenChange>,
    pub next_turn: NextTurnEffects,
    pub events: Vec<CombatEvent>,
    pub logs: Vec<String>,
}

struct OnPlay<'c> {
    out: OnPlayOutcome,
    card: &'c Card,
    attacker: &'c Combatant,
    side: Side,
    ctx: &'c BattleContext<'c>,
}

impl OnPlay<'_> {
    fn grant(&mut self, id: TokenId) {
        self.out.events.push(CombatEvent::TokenGranted {
            side: self.side,
            token: id.clone(),
            stacks: 1,
        });
        self.out.tokens_to_add.push(TokenChange::add(id, 1));
    }

    fn bonus_shots(&mut self, count: u32) {
        if count == 0 {
            return;
        }
        let shot_id = &self.ctx.config.bonus_shot_card;
        let Some(base) = self.ctx.catalog.and_then(|c| c.get(shot_id)) else {
            warn!(card = %shot_id, source = %self.card.id, "bonus shot base card missing from catalog");
            return;
        };
        let start = self.out.bonus_cards.len();
        for n in 0..count as usize {
            let mut shot = base.clone();
            shot.id = CardId::new(format!("{}#bonus{}", base.id.as_str(), start + n + 1));
            shot.created_by = Some(self.card.id.clone());
            self.out.bonus_cards.push(shot);
        }
        self.out.events.push(CombatEvent::BonusCards {
            side: self.side,
            source: self.card.id.clone(),
            count,
        });
        self.out
            .logs
            .push(format!("{}: {} fires {} bonus shot(s)", self.side, self.card.name, count));
    }

    fn apply(&mut self, tag: &SpecialTag) {
        let config = self.ctx.config;
        match tag {
            SpecialTag::AutoReload => {
                if self.ctx.hand.iter().any(|c| self.ctx.is_reload_card(c)) {
                    self.grant(TokenId::LOADED);
                    self.out.logs.push(format!("{}: auto reload", self.side));
                }
            }
            SpecialTag::MentalFocus => self.grant(TokenId::FOCUS),
            SpecialTag::RecallCard => self.out.next_turn.recall_card = true,
            SpecialTag::EmergencyDraw => {
                if self.ctx.hand.len() <= config.emergency_draw_threshold {
                    self.out.next_turn.emergency_draw = config.emergency_draw_count;
                }
            }
            SpecialTag::SharpenBlade => {
                self.out.next_turn.fencing_damage_bonus = config.fencing_damage_bonus;
            }
            SpecialTag::EvasiveShot => self.bonus_shots(1),
            SpecialTag::DoubleShot => self.bonus_shots(2),
            SpecialTag::TripleShot => self.bonus_shots(3),
            SpecialTag::Manipulation => {
                if self.attacker.tokens.has(&TokenId::JAM) {
                    self.out.tokens_to_remove.push(TokenChange::remove_all(TokenId::JAM));
                    self.out.events.push(CombatEvent::TokenRemoved {
                        side: self.side,
                        token: TokenId::JAM,
                    });
                    self.grant(TokenId::LOADED);
                    self.out.logs.push(format!("{}: jam cleared, gun loaded", self.side));
                } else {
                    self.bonus_shots(1);
                }
            }
            SpecialTag::SpreadShot => self.bonus_shots(self.ctx.alive_enemy_units),
            SpecialTag::ExecutionSquad => {
                self.grant(TokenId::LOADED);
                self.grant(TokenId::JAM_IMMUNE);
                self.bonus_shots(config.execution_squad_shots);
            }
            SpecialTag::AoeAttack => self.out.next_turn.is_aoe_attack = true,
            _ => {}
        }
    }

    fn apply_cross(&mut self) {
        if !self.card.has_trait(&CardTrait::Cross) {
            return;
        }
        let count = match &self.card.cross_bonus {
            Some(bonus) if bonus.kind == CrossBonusKind::GunAttack => bonus.count,
            _ => return,
        };
        if overlaps_opposing(self.ctx.queue, self.ctx.current_q_index, self.ctx.current_sp) {
            self.bonus_shots(count);
        }
    }
}

/// Describe the on-play effects of a card.
pub fn process_card_play_specials(
    card: &Card,
    attacker: &Combatant,
    attacker_side: Side,
    ctx: &BattleContext<'_>,
) -> OnPlayOutcome {
    let mut run = OnPlay {
        out: OnPlayOutcome::default(),
        card,
        attacker,
        side: attacker_side,
        ctx,
    };

    for tag in card.special.iter() {
        run.apply(tag);
    }
    run.apply_cross();

    let out = run.out;
    if !out.events.is_empty() || !out.next_turn.is_empty() {
        debug!(
            card = %card.id,
            side = %attacker_side,
            bonus = out.bonus_cards.len(),
            add = out.tokens_to_add.len(),
            remove = out.tokens_to_remove.len(),
            "on-play specials applied"
        );
    }
    out
}
