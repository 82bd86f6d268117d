//! Battle controller integration tests.
//!
//! These tests play whole turns through `Battle`: scheduling, interrupts,
//! pipelines, the transition guard, and snapshots working together.

use battle_timeline::abilities::Ability;
use battle_timeline::battle::Battle;
use battle_timeline::cards::{Card, CardCatalog, CardId, CardTrait, SpecialTag};
use battle_timeline::core::{CombatConfig, Combatant, Side};
use battle_timeline::effects::{CombatEvent, CombatHooks, HookRecorder, SoundCue};
use battle_timeline::outcome::BattleResult;
use battle_timeline::tokens::TokenId;

const CATALOG_JSON: &str = r#"[
    {"id": "strike", "name": "Strike", "speedCost": 3, "type": "attack", "damage": 6},
    {"id": "shoot", "name": "Shoot", "speedCost": 1, "type": "attack", "damage": 2},
    {"id": "guard", "name": "Guard", "speedCost": 2, "type": "defense", "block": 5},
    {"id": "riposte", "name": "Riposte", "speedCost": 1, "type": "defense", "block": 0, "parryRange": 6, "parryPush": 4},
    {"id": "bash", "name": "Bash", "speedCost": 2, "type": "attack", "damage": 3, "traits": ["stun"]},
    {"id": "volley", "name": "Volley", "speedCost": 2, "type": "attack", "damage": 1, "special": ["doubleShot"]},
    {"id": "load", "name": "Load", "speedCost": 1, "type": "general", "traits": ["reload"]}
]"#;

fn catalog() -> CardCatalog {
    let cards: Vec<Card> = serde_json::from_str(CATALOG_JSON).unwrap();
    CardCatalog::from_cards(cards).unwrap()
}

fn card(id: &str) -> Card {
    catalog().require(&CardId::new(id)).unwrap().clone()
}

fn battle(player_hp: i64, enemy_hp: i64) -> Battle {
    Battle::new(
        Combatant::new(player_hp),
        Combatant::new(enemy_hp),
        catalog(),
        CombatConfig::default(),
    )
    .unwrap()
    .with_seed(42)
}

// =============================================================================
// Turn Resolution Tests
// =============================================================================

/// A full turn mixing block, parry, stun, and bonus shots.
#[test]
fn test_mixed_turn() {
    let mut battle = battle(40, 40);
    battle.begin_turn(
        vec![card("riposte"), card("guard"), card("volley")],
        vec![card("strike"), card("strike"), card("strike")],
    );
    let reports = battle.resolve_all(&mut CombatHooks::noop());

    let resolved: Vec<&str> = reports.iter().map(|r| r.card.id.as_str()).collect();
    assert_eq!(
        resolved,
        vec!["riposte", "guard", "volley", "shoot#bonus1", "shoot#bonus2", "strike", "strike", "strike"]
    );

    // Riposte guards (1, 7]; the first strike at 3 triggers it and pushes
    // the later strikes from 6 and 9 to 10 and 13.
    let parried = &reports[5];
    assert!(parried
        .events
        .iter()
        .any(|e| matches!(e, CombatEvent::Parry { push: 4, .. })));
    assert!(parried.out_cards.is_empty());
    assert_eq!(reports[6].entry.sp, 10);
    assert_eq!(reports[7].entry.sp, 13);

    assert_eq!(battle.combatant(Side::Enemy).hp, 40 - 1 - 2 - 2);
    // Guard absorbs 5 of the first strike.
    assert_eq!(battle.combatant(Side::Player).hp, 40 - 1 - 6 - 6);
    assert_eq!(battle.queue().len(), 8);
    assert_eq!(battle.result(), None);
}

/// A stun removes the enemy cards inside its window.
#[test]
fn test_stun_turn() {
    let mut battle = battle(40, 40);
    battle.begin_turn(
        vec![card("bash")],
        vec![card("shoot"), card("guard"), card("strike"), card("strike")],
    );
    let reports = battle.resolve_all(&mut CombatHooks::noop());

    let resolved: Vec<&str> = reports.iter().map(|r| r.card.id.as_str()).collect();
    assert_eq!(resolved, vec!["bash", "shoot", "strike"]);
    assert_eq!(reports[2].entry.sp, 9);
    assert_eq!(battle.combatant(Side::Enemy).hp, 37);
    assert_eq!(battle.combatant(Side::Player).hp, 32);
}

/// Defeat is scheduled when only the player falls.
#[test]
fn test_defeat() {
    let mut recorder = HookRecorder::new();
    let mut battle = battle(6, 40);
    battle.begin_turn(vec![], vec![card("strike"), card("strike")]);
    let reports = battle.resolve_all(&mut recorder.hooks());

    assert_eq!(reports.len(), 1);
    assert!(reports[0].transition.is_defeat);
    assert_eq!(battle.result(), Some(BattleResult::Defeat));
    assert_eq!(recorder.phases.len(), 1);
    assert_eq!(recorder.phases[0].delay_ms, 1000);
    assert!(recorder.sounds.contains(&SoundCue::Defeat));
}

/// When both sides are down after one step, victory wins.
#[test]
fn test_victory_beats_defeat() {
    let mut recorder = HookRecorder::new();
    let mut fallen = Combatant::new(10);
    fallen.hp = 0;
    let mut battle = Battle::new(fallen, Combatant::new(6), catalog(), CombatConfig::default()).unwrap();
    battle.begin_turn(vec![card("strike")], vec![]);

    let report = battle.step(&mut recorder.hooks()).unwrap();
    assert!(report.transition.is_victory);
    assert!(!report.transition.is_defeat);
    assert_eq!(recorder.phases.len(), 1);
    assert_eq!(recorder.phases[0].result, BattleResult::Victory);
    assert_eq!(recorder.phases[0].delay_ms, 500);
}

/// After a result is decided, nothing else resolves or schedules.
#[test]
fn test_transition_guard() {
    let mut recorder = HookRecorder::new();
    let mut battle = battle(40, 6);
    battle.begin_turn(vec![card("strike"), card("strike")], vec![card("strike")]);
    {
        let mut hooks = recorder.hooks();
        assert_eq!(battle.resolve_all(&mut hooks).len(), 1);
        assert!(battle.step(&mut hooks).is_none());
        assert!(battle.check_transition(&mut hooks).is_victory);
    }
    assert_eq!(recorder.phases.len(), 1);
    assert_eq!(recorder.net_delta_resets, 1);
    assert_eq!(battle.combatant(Side::Player).hp, 40);
}

// =============================================================================
// Multi-Turn Tests
// =============================================================================

/// Turn tokens and deferred effects cross exactly one boundary.
#[test]
fn test_turn_boundaries() {
    let mut battle = battle(40, 40);
    let hone = Card::new("hone", "Hone", 1)
        .with_special(SpecialTag::SharpenBlade)
        .with_special(SpecialTag::ExecutionSquad);
    battle.begin_turn(vec![hone], vec![]);
    battle.resolve_all(&mut CombatHooks::noop());
    assert_eq!(battle.combatant(Side::Enemy).hp, 40 - 4 * 2);

    let next = battle.end_turn();
    assert_eq!(next.fencing_damage_bonus, 3);
    assert!(battle.combatant(Side::Player).has_token(&TokenId::JAM_IMMUNE));

    battle.begin_turn(vec![card("shoot")], vec![]);
    battle.resolve_all(&mut CombatHooks::noop());
    assert_eq!(battle.combatant(Side::Enemy).hp, 32 - 5);

    battle.end_turn();
    assert!(!battle.combatant(Side::Player).has_token(&TokenId::JAM_IMMUNE));
    assert!(battle.combatant(Side::Player).has_token(&TokenId::LOADED));
    assert_eq!(battle.state().turn, 3);
}

/// Block does not carry over between turns.
#[test]
fn test_block_resets() {
    let mut battle = battle(40, 40);
    battle.begin_turn(vec![card("guard")], vec![]);
    battle.resolve_all(&mut CombatHooks::noop());
    assert_eq!(battle.combatant(Side::Player).block, 5);
    battle.end_turn();
    assert_eq!(battle.combatant(Side::Player).block, 0);
}

/// Auto reload reads the dealt hand.
#[test]
fn test_auto_reload_uses_hand() {
    let pool: Vec<CardId> = ["load"].into_iter().map(CardId::new).collect();
    let mut battle = battle(40, 40);
    battle.deal_hand(&pool);
    let reloader = Card::new("quickdraw", "Quickdraw", 1).with_special(SpecialTag::AutoReload);
    battle.begin_turn(vec![reloader], vec![]);
    battle.resolve_all(&mut CombatHooks::noop());
    assert!(battle.combatant(Side::Player).has_token(&TokenId::LOADED));
}

/// A reload card played this turn no longer counts as held.
#[test]
fn test_auto_reload_ignores_played_cards() {
    let pool: Vec<CardId> = ["load"].into_iter().map(CardId::new).collect();
    let mut battle = battle(40, 40);
    battle.deal_hand(&pool);
    let reloader = Card::new("quickdraw", "Quickdraw", 1).with_special(SpecialTag::AutoReload);
    battle.begin_turn(vec![card("load"), reloader], vec![]);
    assert!(battle.state().hand.is_empty());

    battle.resolve_all(&mut CombatHooks::noop());
    assert!(!battle.combatant(Side::Player).has_token(&TokenId::LOADED));
}

// =============================================================================
// Ability and Snapshot Tests
// =============================================================================

/// Rewind restores the turn start once per battle.
#[test]
fn test_rewind() {
    let mut battle = battle(40, 40).with_abilities([Ability::Rewind]);
    battle.begin_turn(vec![card("strike")], vec![card("strike")]);
    let first = battle.resolve_all(&mut CombatHooks::noop());
    assert_eq!(battle.combatant(Side::Player).hp, 34);

    assert!(battle.use_ability("rewind").success);
    assert_eq!(battle.combatant(Side::Player).hp, 40);

    let replay = battle.resolve_all(&mut CombatHooks::noop());
    assert_eq!(first, replay);

    let again = battle.use_ability("rewind");
    assert!(!again.success);
    assert!(again.message.contains("once per battle"));
}

/// Snapshots restore mid-turn and replay identically.
#[test]
fn test_snapshot_mid_turn() {
    let mut battle = battle(40, 40);
    battle.begin_turn(
        vec![card("riposte"), card("volley"), card("bash")],
        vec![card("strike"), card("shoot"), card("strike")],
    );
    let mut hooks = CombatHooks::noop();
    battle.step(&mut hooks);
    battle.step(&mut hooks);

    let bytes = battle.snapshot_bytes().unwrap();
    let mut restored = Battle::restore(&bytes, catalog(), CombatConfig::default()).unwrap();

    assert_eq!(restored.state(), battle.state());
    assert_eq!(
        battle.resolve_all(&mut hooks),
        restored.resolve_all(&mut CombatHooks::noop())
    );
    assert_eq!(battle.state(), restored.state());
}

/// Every card in the fixture deserializes with the expected traits.
#[test]
fn test_catalog_fixture() {
    let catalog = catalog();
    assert_eq!(catalog.len(), 7);
    assert!(card("bash").has_trait(&CardTrait::Stun));
    assert!(card("riposte").is_parry());
    assert!(card("volley").has_special(&SpecialTag::DoubleShot));
}
