//! Named abilities with cooldowns.
//!
//! Abilities are player-invoked actions outside the card queue. Failures
//! are ordinary values: the caller shows the message and play continues.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Built-in abilities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ability {
    /// Draw replacement cards next turn.
    Redraw,
    /// Restore the turn to its start. Once per battle.
    Rewind,
    /// Gain focus immediately.
    FocusBurst,
}

impl Ability {
    pub const ALL: [Ability; 3] = [Ability::Redraw, Ability::Rewind, Ability::FocusBurst];

    /// Look up an ability by name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == name)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Ability::Redraw => "redraw",
            Ability::Rewind => "rewind",
            Ability::FocusBurst => "focus_burst",
        }
    }

    /// Turns before the ability can be used again.
    #[must_use]
    pub const fn cooldown(self) -> u32 {
        match self {
            Ability::Redraw => 1,
            Ability::Rewind => 0,
            Ability::FocusBurst => 2,
        }
    }

    #[must_use]
    pub const fn once_per_battle(self) -> bool {
        matches!(self, Ability::Rewind)
    }
}

/// Why an ability could not be used.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AbilityError {
    #[error("unknown ability: {0}")]
    Unknown(String),

    #[error("ability not owned: {0}")]
    NotOwned(String),

    #[error("{name} is on cooldown for {remaining} more turn(s)")]
    OnCooldown { name: String, remaining: u32 },

    #[error("{0} can only be used once per battle")]
    AlreadyUsed(String),

    #[error("no turn has started, nothing to rewind")]
    NothingToRewind,
}

/// `{ success, message }` view of an invocation for UI callers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityOutcome {
    pub success: bool,
    pub message: String,
}

impl From<Result<Ability, AbilityError>> for AbilityOutcome {
    fn from(result: Result<Ability, AbilityError>) -> Self {
        match result {
            Ok(ability) => Self {
                success: true,
                message: format!("{} used", ability.name()),
            },
            Err(err) => Self {
                success: false,
                message: err.to_string(),
            },
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
struct Slot {
    remaining: u32,
    used: bool,
}

/// Abilities a combatant owns and their cooldown state.
///
/// ## Example
///
/// ```
/// use battle_timeline::abilities::{Ability, AbilityBook, AbilityError};
///
/// let mut book = AbilityBook::with_abilities([Ability::Redraw]);
/// assert!(book.invoke("redraw").is_ok());
/// assert!(matches!(book.invoke("redraw"), Err(AbilityError::OnCooldown { .. })));
///
/// book.tick();
/// assert!(book.invoke("redraw").is_ok());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityBook {
    slots: FxHashMap<Ability, Slot>,
}

impl AbilityBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A book owning the given abilities, all ready.
    #[must_use]
    pub fn with_abilities(abilities: impl IntoIterator<Item = Ability>) -> Self {
        let mut book = Self::new();
        for ability in abilities {
            book.grant(ability);
        }
        book
    }

    /// Add an ability. Re-granting keeps its cooldown state.
    pub fn grant(&mut self, ability: Ability) {
        self.slots.entry(ability).or_default();
    }

    #[must_use]
    pub fn owns(&self, ability: Ability) -> bool {
        self.slots.contains_key(&ability)
    }

    /// Turns left before `ability` is ready, if owned.
    #[must_use]
    pub fn remaining(&self, ability: Ability) -> Option<u32> {
        self.slots.get(&ability).map(|s| s.remaining)
    }

    /// Use an ability by name, starting its cooldown.
    pub fn invoke(&mut self, name: &str) -> Result<Ability, AbilityError> {
        let ability = Ability::from_name(name).ok_or_else(|| AbilityError::Unknown(name.to_string()))?;
        let slot = self
            .slots
            .get_mut(&ability)
            .ok_or_else(|| AbilityError::NotOwned(name.to_string()))?;

        if ability.once_per_battle() && slot.used {
            return Err(AbilityError::AlreadyUsed(name.to_string()));
        }
        if slot.remaining > 0 {
            return Err(AbilityError::OnCooldown {
                name: name.to_string(),
                remaining: slot.remaining,
            });
        }

        slot.used = true;
        slot.remaining = ability.cooldown();
        debug!(ability = name, cooldown = slot.remaining, "ability used");
        Ok(ability)
    }

    /// Advance cooldowns by one turn.
    pub fn tick(&mut self) {
        for slot in self.slots.values_mut() {
            slot.remaining = slot.remaining.saturating_sub(1);
        }
    }
}
