//! Pre-attack special effects.
//!
//! Runs before damage math and rewrites the card, attacker, and defender
//! triple. Inputs are never mutated: the outcome carries fresh copies.
//!
//! ## Behaviors
//!
//! | Tag | Effect |
//! |---|---|
//! | `ignoreBlock` | damage math treats defender block as zero |
//! | `clearAllBlock` | both sides lose all block |
//! | `doubleDamageIfSolo` | damage x2 when it is the side's only attack card |
//! | `agilityBonus` | damage + agility x factor |
//! | `gyrusRoulette` | hits = hits x energy + one per winning coin flip |
//! | `tempeteDechainee` | hits + finesse stacks x per-stack bonus |
//! | `reloadSpray` | jam token removed entirely |
//!
//! Tags apply in listing order. After them, a `cross` card sharing its
//! coordinate with a crossed opposing entry gets its `damage_mult` bonus.

use tracing::debug;

use super::context::BattleContext;
use super::event::CombatEvent;
use crate::cards::{Card, CardTrait, CrossBonusKind, SpecialTag};
use crate::core::{Combatant, RandomSource, Side};
use crate::timeline::crossed_at;
use crate::tokens::{TokenId, TokenLedger};

/// Output of the pre-attack pipeline.
#[derive(Clone, Debug, PartialEq)]
pub struct PreAttackOutcome {
    pub card: Card,
    pub attacker: Combatant,
    pub defender: Combatant,
    pub events: Vec<CombatEvent>,
    pub logs: Vec<String>,
    /// Non-attack cards never run damage math.
    pub skip_normal_damage: bool,
}

struct PreAttack<'c> {
    out: PreAttackOutcome,
    side: Side,
    ctx: &'c BattleContext<'c>,
}

impl PreAttack<'_> {
    fn set_damage(&mut self, damage: i64) {
        let from = self.out.card.damage_or_zero();
        if from != damage {
            self.out.card.damage = Some(damage);
            self.out.events.push(CombatEvent::DamageModified {
                card: self.out.card.id.clone(),
                from,
                to: damage,
            });
        }
    }

    fn set_hits(&mut self, hits: u32) {
        let from = self.out.card.hits_or_one();
        if from != hits {
            self.out.card.hits = Some(hits);
            self.out.events.push(CombatEvent::HitsModified {
                card: self.out.card.id.clone(),
                from,
                to: hits,
            });
        }
    }

    fn apply(&mut self, tag: &SpecialTag, rng: &mut dyn RandomSource) {
        let config = self.ctx.config;
        match tag {
            SpecialTag::IgnoreBlock => {
                self.out.card.ignore_block = true;
                self.out.events.push(CombatEvent::BlockIgnored {
                    card: self.out.card.id.clone(),
                });
            }
            SpecialTag::ClearAllBlock => {
                self.out.attacker.block = 0;
                self.out.defender.block = 0;
                self.out.events.push(CombatEvent::BlockCleared {
                    by: self.side,
                    card: self.out.card.id.clone(),
                });
                self.out
                    .logs
                    .push(format!("{}: {} shatters every guard", self.side, self.out.card.name));
            }
            SpecialTag::DoubleDamageIfSolo => {
                if self.ctx.attack_card_count() == 1 {
                    let doubled = self.out.card.damage_or_zero().saturating_mul(2);
                    self.set_damage(doubled);
                    self.out
                        .logs
                        .push(format!("{}: lone strike, damage doubled", self.side));
                }
            }
            SpecialTag::AgilityBonus => {
                let bonus = self.out.attacker.agility.saturating_mul(config.agility_damage_factor);
                let damage = self.out.card.damage_or_zero().saturating_add(bonus);
                self.set_damage(damage);
            }
            SpecialTag::GyrusRoulette => {
                let energy = u32::try_from(self.out.attacker.energy.max(0)).unwrap_or(u32::MAX);
                let wins = (0..energy)
                    .filter(|_| rng.chance(config.roulette_probability))
                    .count();
                let wins = u32::try_from(wins).unwrap_or(u32::MAX);
                let hits = self
                    .out
                    .card
                    .hits_or_one()
                    .saturating_mul(energy)
                    .saturating_add(wins);
                self.set_hits(hits);
                self.out.logs.push(format!(
                    "{}: roulette spins {} times, {} extra hits",
                    self.side, energy, wins
                ));
            }
            SpecialTag::TempeteDechainee => {
                let finesse = u32::try_from(self.out.attacker.stacks(&TokenId::FINESSE))
                    .unwrap_or(u32::MAX);
                let hits = self
                    .out
                    .card
                    .hits_or_one()
                    .saturating_add(finesse.saturating_mul(config.finesse_hits_per_stack));
                self.set_hits(hits);
            }
            SpecialTag::ReloadSpray => {
                if self.out.attacker.tokens.has(&TokenId::JAM) {
                    self.out.attacker.tokens.clear(&TokenId::JAM);
                    self.out.events.push(CombatEvent::TokenRemoved {
                        side: self.side,
                        token: TokenId::JAM,
                    });
                    self.out.logs.push(format!("{}: jam sprayed clear", self.side));
                }
            }
            _ => {}
        }
    }

    fn apply_cross(&mut self) {
        if !self.out.card.has_trait(&CardTrait::Cross) {
            return;
        }
        let Some(bonus) = self.out.card.cross_bonus.clone() else {
            return;
        };
        if bonus.kind != CrossBonusKind::DamageMult
            || !crossed_at(self.ctx.queue, self.side, self.ctx.current_sp)
        {
            return;
        }
        let scaled = (self.out.card.damage_or_zero() as f64 * bonus.multiplier()).round();
        let damage = if scaled.is_finite() { scaled as i64 } else { self.out.card.damage_or_zero() };
        self.set_damage(damage);
        self.out
            .logs
            .push(format!("{}: cross bonus x{}", self.side, bonus.multiplier()));
    }
}

/// Apply pre-attack special effects.
///
/// Random draws (roulette) go through `rng`, one per unit of energy.
///
/// ## Example
///
/// ```
/// use battle_timeline::cards::{Card, SpecialTag};
/// use battle_timeline::core::{CombatConfig, Combatant, GameRng, Side};
/// use battle_timeline::effects::{process_pre_attack_specials, BattleContext};
/// use battle_timeline::tokens::TokenDefs;
///
/// let config = CombatConfig::default();
/// let defs = TokenDefs::standard();
/// let ctx = BattleContext::new(&config, &defs);
///
/// let card = Card::attack("dash", "Dash", 3, 10).with_special(SpecialTag::AgilityBonus);
/// let attacker = Combatant::new(30).with_agility(3);
/// let defender = Combatant::new(30);
///
/// let out = process_pre_attack_specials(
///     &card, &attacker, &defender, Side::Player, &ctx, &mut GameRng::new(1),
/// );
/// assert_eq!(out.card.damage, Some(25));
/// assert_eq!(card.damage, Some(10));
/// ```
pub fn process_pre_attack_specials(
    card: &Card,
    attacker: &Combatant,
    defender: &Combatant,
    attacker_side: Side,
    ctx: &BattleContext<'_>,
    rng: &mut dyn RandomSource,
) -> PreAttackOutcome {
    let mut run = PreAttack {
        out: PreAttackOutcome {
            card: card.clone(),
            attacker: attacker.clone(),
            defender: defender.clone(),
            events: Vec::new(),
            logs: Vec::new(),
            skip_normal_damage: !card.is_attack(),
        },
        side: attacker_side,
        ctx,
    };

    for tag in card.special.iter() {
        run.apply(tag, rng);
    }
    run.apply_cross();

    if !run.out.events.is_empty() {
        debug!(card = %card.id, side = %attacker_side, events = run.out.events.len(), "pre-attack specials applied");
    }
    run.out
}
