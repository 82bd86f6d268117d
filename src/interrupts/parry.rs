//! Parry: arm a guarded window, then push back the opposing timeline when
//! an opposing attack lands inside it.
//!
//! ## Windows
//!
//! A parry guards `(center, center + range]`. The left end is open, unlike
//! the stun window, so an attack at exactly `center` never triggers.
//!
//! ## Trigger pass
//!
//! For the entry at the cursor, every armed parry of the other side is
//! checked. Each match fires once and adds its push to a total. The total
//! is applied once to every unresolved entry of the attacking side; any of
//! them pushed past the maximum speed is removed as "out". The tail after
//! the cursor is then stably re-sorted by coordinate.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{CombatConfig, Side};
use crate::effects::CombatEvent;
use crate::timeline::QueueEntry;

/// One armed parry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParryReadyState {
    pub side: Side,
    /// Name of the card that armed it.
    pub source: String,
    pub center_sp: i64,
    /// Upper bound of the guarded window, `center_sp + range`.
    pub max_sp: i64,
    pub push: i64,
    pub triggered: bool,
    pub active: bool,
}

impl ParryReadyState {
    /// True if `sp` lies in `(center_sp, max_sp]`.
    #[must_use]
    pub fn guards(&self, sp: i64) -> bool {
        sp > self.center_sp && sp <= self.max_sp
    }

    /// True if an attack from `side` at `sp` would set this parry off.
    #[must_use]
    pub fn catches(&self, side: Side, sp: i64) -> bool {
        self.active && !self.triggered && self.side != side && self.guards(sp)
    }
}

/// Arm a parry for the entry that just resolved.
///
/// Range and push come from the card, falling back to the configured
/// defaults. Negative values are clamped to zero.
#[must_use]
pub fn setup_parry_ready(entry: &QueueEntry, config: &CombatConfig) -> ParryReadyState {
    let range = entry.card.parry_range.unwrap_or(config.default_parry_range).max(0);
    let push = entry.card.parry_push.unwrap_or(config.default_parry_push).max(0);
    debug!(side = %entry.side, card = %entry.card.id, center = entry.sp, range, push, "parry armed");
    ParryReadyState {
        side: entry.side,
        source: entry.card.name.clone(),
        center_sp: entry.sp,
        max_sp: entry.sp.saturating_add(range),
        push,
        triggered: false,
        active: true,
    }
}

/// Result of a parry trigger check.
#[derive(Clone, Debug, PartialEq)]
pub struct ParryCheck {
    pub queue: Vec<QueueEntry>,
    pub parry_events: Vec<CombatEvent>,
    pub parry_states: Vec<ParryReadyState>,
    /// Entries removed for exceeding the maximum speed.
    pub out_cards: Vec<QueueEntry>,
    pub logs: Vec<String>,
}

impl ParryCheck {
    fn unchanged(queue: &[QueueEntry], states: &[ParryReadyState]) -> Self {
        Self {
            queue: queue.to_vec(),
            parry_events: Vec::new(),
            parry_states: states.to_vec(),
            out_cards: Vec::new(),
            logs: Vec::new(),
        }
    }

    /// Total push applied by this check.
    #[must_use]
    pub fn total_push(&self) -> i64 {
        self.parry_events
            .iter()
            .map(|e| match e {
                CombatEvent::Parry { push, .. } => *push,
                _ => 0,
            })
            .sum()
    }
}

/// Check the entry at `current_q_index` against every armed parry.
///
/// Only attack-type entries are checked. `enemy_max_speed` is the "out"
/// threshold; without it the configured fallback applies.
pub fn check_parry_trigger(
    queue: &[QueueEntry],
    current_q_index: usize,
    parry_states: &[ParryReadyState],
    enemy_max_speed: Option<i64>,
    config: &CombatConfig,
) -> ParryCheck {
    let Some(attack) = queue.get(current_q_index) else {
        return ParryCheck::unchanged(queue, parry_states);
    };
    if !attack.card.is_attack() {
        return ParryCheck::unchanged(queue, parry_states);
    }

    let mut states = parry_states.to_vec();
    let mut events = Vec::new();
    let mut logs = Vec::new();
    let mut total_push = 0i64;

    for state in states.iter_mut().filter(|s| s.catches(attack.side, attack.sp)) {
        state.triggered = true;
        state.active = false;
        total_push = total_push.saturating_add(state.push);
        events.push(CombatEvent::Parry {
            side: state.side,
            source: state.source.clone(),
            attacker: attack.card.id.clone(),
            push: state.push,
        });
        logs.push(format!(
            "{}: {} parries {}, pushing back {}",
            state.side, state.source, attack.card.name, state.push
        ));
    }

    if events.is_empty() {
        return ParryCheck::unchanged(queue, parry_states);
    }

    let threshold = enemy_max_speed.unwrap_or(config.parry_out_threshold);
    let pushed_side = attack.side;
    let mut head: Vec<QueueEntry> = queue[..=current_q_index].to_vec();
    let mut tail = Vec::with_capacity(queue.len() - head.len());
    let mut out_cards = Vec::new();

    for entry in &queue[current_q_index + 1..] {
        let mut entry = entry.clone();
        if entry.side == pushed_side {
            entry.sp = entry.sp.saturating_add(total_push);
            if entry.sp > threshold {
                events.push(CombatEvent::Out {
                    side: entry.side,
                    card: entry.card.id.clone(),
                    sp: entry.sp,
                });
                logs.push(format!("{}: {} is pushed out of the timeline", entry.side, entry.card.name));
                out_cards.push(entry);
                continue;
            }
        }
        tail.push(entry);
    }
    tail.sort_by_key(|e| e.sp);

    debug!(
        attacker = %attack.card.id,
        total_push,
        out = out_cards.len(),
        "parry triggered"
    );

    head.extend(tail);
    ParryCheck {
        queue: head,
        parry_events: events,
        parry_states: states,
        out_cards,
        logs,
    }
}

/// Clear every parry at turn end, triggered or not.
pub fn reset_parry_states(states: &mut Vec<ParryReadyState>) {
    states.clear();
}
