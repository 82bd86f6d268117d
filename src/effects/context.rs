//! Context handed to the effect pipelines, and the capability record for
//! side effects.
//!
//! `BattleContext` is a read-only view of the turn: the live queue and the
//! cursor, the attacker's cards, the catalog, and configuration. Any field
//! a caller cannot supply stays at its empty default and the behaviors that
//! need it quietly do nothing.
//!
//! `CombatHooks` bundles the injected collaborators (logger, audio, phase
//! machine) as boxed closures. Pipelines never see it; only the battle
//! controller forwards pipeline output through it.

use crate::cards::{Card, CardCatalog, CardId, CardTrait};
use crate::core::CombatConfig;
use crate::outcome::{PhaseRequest, PhaseScheduler};
use crate::timeline::QueueEntry;
use crate::tokens::TokenDefs;

use super::event::SoundCue;

/// Read-only view of the turn being resolved.
#[derive(Clone, Copy, Debug)]
pub struct BattleContext<'a> {
    /// Live queue.
    pub queue: &'a [QueueEntry],
    /// Coordinate of the entry being resolved.
    pub current_sp: i64,
    /// Index of the entry being resolved.
    pub current_q_index: usize,
    /// Cards still held in the acting side's hand.
    pub hand: &'a [Card],
    /// Every card the acting side submitted this turn.
    pub attacker_cards: &'a [Card],
    /// Full card catalog, for bonus-card cloning.
    pub catalog: Option<&'a CardCatalog>,
    /// Living enemy units.
    pub alive_enemy_units: u32,
    /// Ids the encounter treats as reload cards, besides the `reload` trait.
    pub reload_card_ids: &'a [CardId],
    pub config: &'a CombatConfig,
    pub defs: &'a TokenDefs,
}

impl<'a> BattleContext<'a> {
    /// Create an empty context.
    #[must_use]
    pub fn new(config: &'a CombatConfig, defs: &'a TokenDefs) -> Self {
        Self {
            queue: &[],
            current_sp: 0,
            current_q_index: 0,
            hand: &[],
            attacker_cards: &[],
            catalog: None,
            alive_enemy_units: 1,
            reload_card_ids: &[],
            config,
            defs,
        }
    }

    /// Point the context at a queue entry.
    #[must_use]
    pub fn with_queue(mut self, queue: &'a [QueueEntry], current_q_index: usize, current_sp: i64) -> Self {
        self.queue = queue;
        self.current_q_index = current_q_index;
        self.current_sp = current_sp;
        self
    }

    #[must_use]
    pub fn with_hand(mut self, hand: &'a [Card]) -> Self {
        self.hand = hand;
        self
    }

    #[must_use]
    pub fn with_attacker_cards(mut self, cards: &'a [Card]) -> Self {
        self.attacker_cards = cards;
        self
    }

    #[must_use]
    pub fn with_catalog(mut self, catalog: &'a CardCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    #[must_use]
    pub fn with_alive_enemy_units(mut self, units: u32) -> Self {
        self.alive_enemy_units = units;
        self
    }

    #[must_use]
    pub fn with_reload_cards(mut self, ids: &'a [CardId]) -> Self {
        self.reload_card_ids = ids;
        self
    }

    /// True if the card counts as a reload card here.
    #[must_use]
    pub fn is_reload_card(&self, card: &Card) -> bool {
        card.has_trait(&CardTrait::Reload) || self.reload_card_ids.contains(&card.id)
    }

    /// Number of attack-type cards the acting side submitted.
    #[must_use]
    pub fn attack_card_count(&self) -> usize {
        self.attacker_cards.iter().filter(|c| c.is_attack()).count()
    }
}

/// Injected collaborators for logging, audio, and phase changes.
///
/// ## Example
///
/// ```
/// use battle_timeline::effects::CombatHooks;
///
/// let mut lines = Vec::new();
/// {
///     let mut hooks = CombatHooks::noop().with_log(|msg| lines.push(msg.to_string()));
///     hooks.log("Strike hits for 6");
/// }
/// assert_eq!(lines, vec!["Strike hits for 6"]);
/// ```
pub struct CombatHooks<'a> {
    /// Narrative log sink.
    pub add_log: Box<dyn FnMut(&str) + 'a>,
    /// Audio trigger. Return values are never consulted.
    pub play_sound: Box<dyn FnMut(SoundCue) + 'a>,
    /// Clears the pending net-resource-delta display.
    pub clear_net_delta: Box<dyn FnMut() + 'a>,
    /// Schedules the post-combat phase.
    pub schedule_phase: Box<dyn FnMut(PhaseRequest) + 'a>,
}

impl<'a> CombatHooks<'a> {
    /// Hooks that discard everything.
    #[must_use]
    pub fn noop() -> Self {
        Self {
            add_log: Box::new(|_| {}),
            play_sound: Box::new(|_| {}),
            clear_net_delta: Box::new(|| {}),
            schedule_phase: Box::new(|_| {}),
        }
    }

    #[must_use]
    pub fn with_log(mut self, f: impl FnMut(&str) + 'a) -> Self {
        self.add_log = Box::new(f);
        self
    }

    #[must_use]
    pub fn with_sound(mut self, f: impl FnMut(SoundCue) + 'a) -> Self {
        self.play_sound = Box::new(f);
        self
    }

    #[must_use]
    pub fn with_phase(mut self, f: impl FnMut(PhaseRequest) + 'a) -> Self {
        self.schedule_phase = Box::new(f);
        self
    }

    #[must_use]
    pub fn with_net_delta_reset(mut self, f: impl FnMut() + 'a) -> Self {
        self.clear_net_delta = Box::new(f);
        self
    }

    pub fn log(&mut self, message: &str) {
        (self.add_log)(message);
    }

    pub fn sound(&mut self, cue: SoundCue) {
        (self.play_sound)(cue);
    }
}

impl PhaseScheduler for CombatHooks<'_> {
    fn clear_net_delta(&mut self) {
        (self.clear_net_delta)();
    }

    fn schedule_phase(&mut self, request: PhaseRequest) {
        (self.schedule_phase)(request);
    }
}

/// Records everything sent through hooks, for tests and replays.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HookRecorder {
    pub logs: Vec<String>,
    pub sounds: Vec<SoundCue>,
    pub net_delta_resets: u32,
    pub phases: Vec<PhaseRequest>,
}

impl HookRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Hooks writing into this recorder.
    pub fn hooks(&mut self) -> CombatHooks<'_> {
        let HookRecorder {
            logs,
            sounds,
            net_delta_resets,
            phases,
        } = self;
        CombatHooks {
            add_log: Box::new(move |msg| logs.push(msg.to_string())),
            play_sound: Box::new(move |cue| sounds.push(cue)),
            clear_net_delta: Box::new(move || *net_delta_resets += 1),
            schedule_phase: Box::new(move |request| phases.push(request)),
        }
    }
}
