//! Combat events reported to the UI layer.
//!
//! Pipelines and interrupt resolvers never touch the presentation layer.
//! They return `CombatEvent` values and the caller decides what to show,
//! animate, or play. Events are plain data and serialize with a `type` tag.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::Side;
use crate::tokens::TokenId;

/// Something observable that happened while resolving an entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CombatEvent {
    /// Both sides lost their block.
    BlockCleared { by: Side, card: CardId },

    /// The card's damage changed before damage math.
    DamageModified { card: CardId, from: i64, to: i64 },

    /// The card's hit count changed before damage math.
    HitsModified { card: CardId, from: u32, to: u32 },

    /// Damage math will ignore block.
    BlockIgnored { card: CardId },

    /// A token was granted to a side.
    TokenGranted { side: Side, token: TokenId, stacks: u64 },

    /// A token was removed from a side.
    TokenRemoved { side: Side, token: TokenId },

    /// Bonus cards were queued behind the source card.
    BonusCards { side: Side, source: CardId, count: u32 },

    /// A parry caught an opposing attack.
    Parry {
        side: Side,
        source: String,
        attacker: CardId,
        push: i64,
    },

    /// An entry was pushed past the maximum speed and left the timeline.
    Out { side: Side, card: CardId, sp: i64 },

    /// A stun destroyed opposing entries.
    Stun {
        side: Side,
        source: CardId,
        destroyed: Vec<String>,
    },

    /// Damage landed on a side.
    Damage {
        target: Side,
        card: CardId,
        blocked: i64,
        dealt: i64,
    },

    /// A side gained block.
    BlockGained { side: Side, amount: i64 },
}

impl CombatEvent {
    /// Sound cue that fits this event, if any.
    #[must_use]
    pub fn sound(&self) -> Option<SoundCue> {
        match self {
            CombatEvent::Parry { .. } => Some(SoundCue::Parry),
            CombatEvent::Stun { destroyed, .. } if !destroyed.is_empty() => Some(SoundCue::Stun),
            CombatEvent::Damage { dealt, .. } if *dealt > 0 => Some(SoundCue::Hit),
            CombatEvent::Damage { .. } | CombatEvent::BlockGained { .. } => Some(SoundCue::Block),
            CombatEvent::BonusCards { .. } => Some(SoundCue::Shot),
            CombatEvent::TokenGranted { token, .. } if *token == TokenId::LOADED => {
                Some(SoundCue::Reload)
            }
            _ => None,
        }
    }
}

/// Fire-and-forget audio trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundCue {
    Hit,
    Block,
    Parry,
    Stun,
    Shot,
    Reload,
    Victory,
    Defeat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_json_tag() {
        let event = CombatEvent::Out {
            side: Side::Enemy,
            card: CardId::new("slash"),
            sp: 33,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"type":"out","side":"enemy","card":"slash","sp":33}"#);
    }

    #[test]
    fn test_sound_mapping() {
        let hit = CombatEvent::Damage {
            target: Side::Enemy,
            card: CardId::new("a"),
            blocked: 0,
            dealt: 4,
        };
        let blocked = CombatEvent::Damage {
            target: Side::Enemy,
            card: CardId::new("a"),
            blocked: 4,
            dealt: 0,
        };
        let empty_stun = CombatEvent::Stun {
            side: Side::Player,
            source: CardId::new("s"),
            destroyed: vec![],
        };
        assert_eq!(hit.sound(), Some(SoundCue::Hit));
        assert_eq!(blocked.sound(), Some(SoundCue::Block));
        assert_eq!(empty_stun.sound(), None);
    }
}
