//! Card tags: special-effect tags, trait tags, and cross bonuses.
//!
//! Tags arrive as strings from card data. Known names map to enum variants;
//! anything else is kept as `Other(..)` so malformed or future data never
//! fails to load and simply matches no behavior.
//!
//! ## Special tags
//!
//! A card's `special` field holds one tag or a list of tags. Every matching
//! pipeline behavior runs, in listing order.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

macro_rules! string_tags {
    (
        $(#[$meta:meta])*
        pub enum $name:ident { $( $(#[$vmeta:meta])* $variant:ident => $text:literal, )* }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )*
            /// Unrecognised tag, kept verbatim.
            Other(String),
        }

        impl $name {
            /// Tag name as it appears in card data.
            #[must_use]
            pub fn as_str(&self) -> &str {
                match self {
                    $( $name::$variant => $text, )*
                    $name::Other(s) => s,
                }
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                match s {
                    $( $text => $name::$variant, )*
                    other => $name::Other(other.to_string()),
                }
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::from(s.as_str())
            }
        }

        impl From<$name> for String {
            fn from(tag: $name) -> Self {
                tag.as_str().to_string()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

string_tags! {
    /// Special-effect tag driving the pre-attack and on-play pipelines.
    pub enum SpecialTag {
        /// Damage math treats defender block as zero.
        IgnoreBlock => "ignoreBlock",
        /// Both sides lose all block.
        ClearAllBlock => "clearAllBlock",
        /// Double damage when it is the side's only attack card.
        DoubleDamageIfSolo => "doubleDamageIfSolo",
        /// Damage scales with agility.
        AgilityBonus => "agilityBonus",
        /// One coin flip per remaining energy for extra hits.
        GyrusRoulette => "gyrusRoulette",
        /// Extra hits per finesse stack.
        TempeteDechainee => "tempeteDechainee",
        /// Clears the jam token before firing.
        ReloadSpray => "reloadSpray",
        /// Loads the gun if a reload card is in hand.
        AutoReload => "autoReload",
        /// Grants focus.
        MentalFocus => "mentalFocus",
        /// Recalls a card at next-turn setup.
        RecallCard => "recallCard",
        /// Draws extra cards next turn when the hand is small.
        EmergencyDraw => "emergencyDraw",
        /// Next-turn fencing damage bonus.
        SharpenBlade => "sharpenBlade",
        /// One bonus shot.
        EvasiveShot => "evasiveShot",
        /// Clears a jam into a loaded gun, or fires a bonus shot.
        Manipulation => "manipulation",
        /// Two bonus shots.
        DoubleShot => "doubleShot",
        /// Three bonus shots.
        TripleShot => "tripleShot",
        /// One bonus shot per living enemy unit.
        SpreadShot => "spreadShot",
        /// Loaded, jam immunity, and four bonus shots.
        ExecutionSquad => "executionSquad",
        /// Next attack hits every enemy unit.
        AoeAttack => "aoeAttack",
    }
}

string_tags! {
    /// Trait tag carried in a card's `traits` list.
    pub enum CardTrait {
        /// Gains a cross bonus when sharing a coordinate with an opposing entry.
        Cross => "cross",
        /// Destroys opposing entries in the stun window.
        Stun => "stun",
        /// Marks a card as a reload card for auto reload.
        Reload => "reload",
    }
}

string_tags! {
    /// Kind of bonus granted by the cross trait.
    pub enum CrossBonusKind {
        /// Multiply damage by `value`.
        DamageMult => "damage_mult",
        /// Inject `count` bonus shots.
        GunAttack => "gun_attack",
    }
}

/// Cross-timeline bonus descriptor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CrossBonus {
    /// What the bonus does.
    #[serde(rename = "type")]
    pub kind: CrossBonusKind,

    /// Multiplier for `damage_mult`.
    #[serde(default = "default_value")]
    pub value: f64,

    /// Shot count for `gun_attack`.
    #[serde(default)]
    pub count: u32,
}

fn default_value() -> f64 {
    1.0
}

impl CrossBonus {
    /// Damage multiplier bonus.
    #[must_use]
    pub fn damage_mult(value: f64) -> Self {
        Self {
            kind: CrossBonusKind::DamageMult,
            value,
            count: 0,
        }
    }

    /// Bonus shot bonus.
    #[must_use]
    pub fn gun_attack(count: u32) -> Self {
        Self {
            kind: CrossBonusKind::GunAttack,
            value: 1.0,
            count,
        }
    }

    /// Multiplier with non-finite or negative values treated as 1.
    #[must_use]
    pub fn multiplier(&self) -> f64 {
        if self.value.is_finite() && self.value >= 0.0 {
            self.value
        } else {
            1.0
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SpecialsRepr {
    One(SpecialTag),
    Many(Vec<SpecialTag>),
}

/// Ordered list of special tags.
///
/// Human-readable formats accept a single tag or a list; binary formats
/// always carry a list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(into = "Vec<SpecialTag>")]
pub struct Specials(pub SmallVec<[SpecialTag; 2]>);

impl<'de> Deserialize<'de> for Specials {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            SpecialsRepr::deserialize(deserializer).map(Self::from)
        } else {
            Vec::<SpecialTag>::deserialize(deserializer).map(|tags| Self(tags.into_iter().collect()))
        }
    }
}

impl Specials {
    /// No special tags.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Check whether a tag is present.
    #[must_use]
    pub fn contains(&self, tag: &SpecialTag) -> bool {
        self.0.contains(tag)
    }

    /// Tags in listing order.
    pub fn iter(&self) -> impl Iterator<Item = &SpecialTag> {
        self.0.iter()
    }

    /// Append a tag.
    pub fn push(&mut self, tag: SpecialTag) {
        self.0.push(tag);
    }

    /// True if the card carries no special tag.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<SpecialsRepr> for Specials {
    fn from(repr: SpecialsRepr) -> Self {
        match repr {
            SpecialsRepr::One(tag) => Self(SmallVec::from_elem(tag, 1)),
            SpecialsRepr::Many(tags) => Self(tags.into_iter().collect()),
        }
    }
}

impl From<Specials> for Vec<SpecialTag> {
    fn from(specials: Specials) -> Self {
        specials.0.into_vec()
    }
}

impl FromIterator<SpecialTag> for Specials {
    fn from_iter<I: IntoIterator<Item = SpecialTag>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
