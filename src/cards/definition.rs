//! Card records.
//!
//! A `Card` is the fully inflated record for one card identifier. Cards are
//! immutable once drawn; scheduling data lives on the `QueueEntry` that
//! wraps a card, and pipelines that change numbers return a modified copy.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::tags::{CardTrait, CrossBonus, SpecialTag, Specials};

/// Card identifier, as used in decks and the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub String);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CardId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for CardId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Scheduling priority class.
///
/// The weight only breaks ties between equal speed costs on the preview
/// timeline: higher weight goes first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    Instant,
    Quick,
    #[default]
    Normal,
    Slow,
}

impl Priority {
    /// Tie-break weight.
    #[must_use]
    pub const fn weight(self) -> i32 {
        match self {
            Priority::Instant => 3,
            Priority::Quick => 2,
            Priority::Normal => 1,
            Priority::Slow => 0,
        }
    }

    /// Name as it appears in card data.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Priority::Instant => "instant",
            Priority::Quick => "quick",
            Priority::Normal => "normal",
            Priority::Slow => "slow",
        }
    }
}

// Unknown priority names fall back to `Normal`, whose weight is 1.
impl From<String> for Priority {
    fn from(s: String) -> Self {
        match s.as_str() {
            "instant" => Priority::Instant,
            "quick" => Priority::Quick,
            "slow" => Priority::Slow,
            _ => Priority::Normal,
        }
    }
}

impl From<Priority> for String {
    fn from(p: Priority) -> Self {
        p.as_str().to_string()
    }
}

/// Broad card category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardKind {
    /// Deals damage; triggers parry checks.
    Attack,
    /// Grants block or arms parries.
    Defense,
    /// Anything else.
    #[default]
    General,
}

/// Fully inflated card record.
///
/// ## Example
///
/// ```
/// use battle_timeline::cards::{Card, CardKind, SpecialTag};
///
/// let strike = Card::attack("strike", "Strike", 4, 6)
///     .with_special(SpecialTag::AgilityBonus);
///
/// assert!(strike.is_attack());
/// assert_eq!(strike.kind, CardKind::Attack);
/// assert_eq!(strike.damage_or_zero(), 6);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,

    pub name: String,

    /// Cost consumed on the owning side's timeline.
    #[serde(default)]
    pub speed_cost: i64,

    #[serde(default)]
    pub priority: Priority,

    /// Energy spent to play the card.
    #[serde(default)]
    pub action_cost: i64,

    #[serde(default, rename = "type")]
    pub kind: CardKind,

    #[serde(default)]
    pub traits: SmallVec<[CardTrait; 4]>,

    #[serde(default)]
    pub special: Specials,

    #[serde(default)]
    pub cross_bonus: Option<CrossBonus>,

    #[serde(default)]
    pub damage: Option<i64>,

    #[serde(default)]
    pub hits: Option<u32>,

    #[serde(default)]
    pub block: Option<i64>,

    /// Width of the parry window armed by this card.
    #[serde(default)]
    pub parry_range: Option<i64>,

    /// Push applied when this card's parry triggers.
    #[serde(default)]
    pub parry_push: Option<i64>,

    /// Id of the card that injected this one, for bonus cards.
    #[serde(default)]
    pub created_by: Option<CardId>,

    /// Set by the pre-attack pipeline; damage math treats block as zero.
    #[serde(default)]
    pub ignore_block: bool,
}

impl Card {
    /// Create a general card.
    #[must_use]
    pub fn new(id: impl Into<CardId>, name: impl Into<String>, speed_cost: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            speed_cost,
            priority: Priority::Normal,
            action_cost: 1,
            kind: CardKind::General,
            traits: SmallVec::new(),
            special: Specials::none(),
            cross_bonus: None,
            damage: None,
            hits: None,
            block: None,
            parry_range: None,
            parry_push: None,
            created_by: None,
            ignore_block: false,
        }
    }

    /// Create an attack card with base damage.
    #[must_use]
    pub fn attack(
        id: impl Into<CardId>,
        name: impl Into<String>,
        speed_cost: i64,
        damage: i64,
    ) -> Self {
        let mut card = Self::new(id, name, speed_cost);
        card.kind = CardKind::Attack;
        card.damage = Some(damage);
        card
    }

    /// Create a defense card granting block.
    #[must_use]
    pub fn defense(
        id: impl Into<CardId>,
        name: impl Into<String>,
        speed_cost: i64,
        block: i64,
    ) -> Self {
        let mut card = Self::new(id, name, speed_cost);
        card.kind = CardKind::Defense;
        card.block = Some(block);
        card
    }

    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    #[must_use]
    pub fn with_action_cost(mut self, cost: i64) -> Self {
        self.action_cost = cost;
        self
    }

    #[must_use]
    pub fn with_hits(mut self, hits: u32) -> Self {
        self.hits = Some(hits);
        self
    }

    #[must_use]
    pub fn with_special(mut self, tag: SpecialTag) -> Self {
        self.special.push(tag);
        self
    }

    #[must_use]
    pub fn with_trait(mut self, card_trait: CardTrait) -> Self {
        self.traits.push(card_trait);
        self
    }

    /// Attach a cross bonus and the `cross` trait.
    #[must_use]
    pub fn with_cross_bonus(mut self, bonus: CrossBonus) -> Self {
        if !self.has_trait(&CardTrait::Cross) {
            self.traits.push(CardTrait::Cross);
        }
        self.cross_bonus = Some(bonus);
        self
    }

    /// Make this a parry card.
    #[must_use]
    pub fn with_parry(mut self, range: i64, push: i64) -> Self {
        self.parry_range = Some(range);
        self.parry_push = Some(push);
        self
    }

    #[must_use]
    pub fn has_special(&self, tag: &SpecialTag) -> bool {
        self.special.contains(tag)
    }

    #[must_use]
    pub fn has_trait(&self, card_trait: &CardTrait) -> bool {
        self.traits.contains(card_trait)
    }

    #[must_use]
    pub fn is_attack(&self) -> bool {
        self.kind == CardKind::Attack
    }

    /// Parry cards carry a parry window.
    #[must_use]
    pub fn is_parry(&self) -> bool {
        self.parry_range.is_some()
    }

    #[must_use]
    pub fn is_stun(&self) -> bool {
        self.has_trait(&CardTrait::Stun)
    }

    #[must_use]
    pub fn damage_or_zero(&self) -> i64 {
        self.damage.unwrap_or(0)
    }

    #[must_use]
    pub fn hits_or_one(&self) -> u32 {
        self.hits.unwrap_or(1)
    }
}
