//! Combat sides and per-side data storage.
//!
//! ## Side
//!
//! Every queue entry, parry, and combatant belongs to exactly one side.
//! A multi-unit enemy group is still a single side on the timeline.
//!
//! ## SideMap
//!
//! Fixed two-slot storage indexed by `Side`, used for per-side agility,
//! ledgers, and running speed totals.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Owning side of a scheduled action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// The human-controlled side.
    Player,
    /// The enemy side (single or grouped units).
    Enemy,
}

impl Side {
    /// Both sides, player first.
    pub const ALL: [Side; 2] = [Side::Player, Side::Enemy];

    /// The side facing this one.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }

    /// Slot index for `SideMap` storage.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Side::Player => 0,
            Side::Enemy => 1,
        }
    }

    /// Lowercase label used in narrative logs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Side::Player => "player",
            Side::Enemy => "enemy",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-side data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use battle_timeline::core::{Side, SideMap};
///
/// let mut agility: SideMap<i64> = SideMap::new(|side| match side {
///     Side::Player => 2,
///     Side::Enemy => 0,
/// });
///
/// assert_eq!(agility[Side::Player], 2);
/// agility[Side::Enemy] = 1;
/// assert_eq!(agility[Side::Enemy], 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideMap<T> {
    player: T,
    enemy: T,
}

impl<T> SideMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(factory: impl Fn(Side) -> T) -> Self {
        Self {
            player: factory(Side::Player),
            enemy: factory(Side::Enemy),
        }
    }

    /// Create a map from explicit values.
    pub fn from_values(player: T, enemy: T) -> Self {
        Self { player, enemy }
    }

    /// Create a map with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            player: value.clone(),
            enemy: value,
        }
    }

    /// Get a reference to a side's data.
    #[must_use]
    pub fn get(&self, side: Side) -> &T {
        match side {
            Side::Player => &self.player,
            Side::Enemy => &self.enemy,
        }
    }

    /// Get a mutable reference to a side's data.
    pub fn get_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::Player => &mut self.player,
            Side::Enemy => &mut self.enemy,
        }
    }

    /// Iterate over (Side, &T) pairs, player first.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        [(Side::Player, &self.player), (Side::Enemy, &self.enemy)].into_iter()
    }
}

impl<T> Index<Side> for SideMap<T> {
    type Output = T;

    fn index(&self, side: Side) -> &Self::Output {
        self.get(side)
    }
}

impl<T> IndexMut<Side> for SideMap<T> {
    fn index_mut(&mut self, side: Side) -> &mut Self::Output {
        self.get_mut(side)
    }
}
