//! Token identifiers and their canonical duration classes.
//!
//! The flat token representation carries no duration information, so
//! converting back to buckets needs this lookup. Unknown ids default to
//! `Usage`.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Token identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenId(pub Cow<'static, str>);

impl TokenId {
    /// Gun is loaded; shots may fire.
    pub const LOADED: TokenId = TokenId(Cow::Borrowed("loaded"));
    /// Gun is jammed.
    pub const JAM: TokenId = TokenId(Cow::Borrowed("jam"));
    /// Jams cannot occur this turn.
    pub const JAM_IMMUNE: TokenId = TokenId(Cow::Borrowed("jam_immune"));
    /// Stacking finesse for flurry attacks.
    pub const FINESSE: TokenId = TokenId(Cow::Borrowed("finesse"));
    /// Mental focus.
    pub const FOCUS: TokenId = TokenId(Cow::Borrowed("focus"));
    /// Dulled senses.
    pub const DULL: TokenId = TokenId(Cow::Borrowed("dull"));

    /// Create a token id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(Cow::Owned(id.into()))
    }

    /// Get the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TokenId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for TokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// How long a token lives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationClass {
    /// Consumed when it triggers.
    #[default]
    Usage,
    /// Cleared at the turn boundary unless freshly granted.
    Turn,
    /// Lasts the whole encounter.
    Permanent,
}

impl DurationClass {
    /// All classes in bucket order.
    pub const ALL: [DurationClass; 3] = [
        DurationClass::Usage,
        DurationClass::Turn,
        DurationClass::Permanent,
    ];
}

/// Lookup from token id to its canonical duration class.
///
/// ```
/// use battle_timeline::tokens::{DurationClass, TokenDefs, TokenId};
///
/// let defs = TokenDefs::standard();
/// assert_eq!(defs.class_of(&TokenId::JAM), DurationClass::Permanent);
/// assert_eq!(defs.class_of(&TokenId::new("mystery")), DurationClass::Usage);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TokenDefs {
    classes: FxHashMap<TokenId, DurationClass>,
}

impl TokenDefs {
    /// Empty lookup; every id is `Usage`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in token table.
    #[must_use]
    pub fn standard() -> Self {
        Self::new()
            .with(TokenId::LOADED, DurationClass::Permanent)
            .with(TokenId::JAM, DurationClass::Permanent)
            .with(TokenId::JAM_IMMUNE, DurationClass::Turn)
            .with(TokenId::FINESSE, DurationClass::Permanent)
            .with(TokenId::FOCUS, DurationClass::Usage)
            .with(TokenId::DULL, DurationClass::Turn)
            .with(TokenId::new("parry_ready"), DurationClass::Turn)
    }

    /// Register a token class (builder pattern).
    #[must_use]
    pub fn with(mut self, id: TokenId, class: DurationClass) -> Self {
        self.classes.insert(id, class);
        self
    }

    /// Register or replace a token class.
    pub fn define(&mut self, id: TokenId, class: DurationClass) {
        self.classes.insert(id, class);
    }

    /// Canonical class of a token; unknown ids are `Usage`.
    #[must_use]
    pub fn class_of(&self, id: &TokenId) -> DurationClass {
        self.classes.get(id).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_const_ids_equal_owned() {
        assert_eq!(TokenId::LOADED, TokenId::new("loaded"));
        assert_eq!(TokenId::JAM.as_str(), "jam");
    }

    #[test]
    fn test_standard_classes() {
        let defs = TokenDefs::standard();
        assert_eq!(defs.class_of(&TokenId::LOADED), DurationClass::Permanent);
        assert_eq!(defs.class_of(&TokenId::JAM_IMMUNE), DurationClass::Turn);
        assert_eq!(defs.class_of(&TokenId::FOCUS), DurationClass::Usage);
    }

    #[test]
    fn test_unknown_defaults_to_usage() {
        let defs = TokenDefs::new();
        assert_eq!(defs.class_of(&TokenId::FINESSE), DurationClass::Usage);
    }

    #[test]
    fn test_define_overrides() {
        let mut defs = TokenDefs::standard();
        defs.define(TokenId::FOCUS, DurationClass::Turn);
        assert_eq!(defs.class_of(&TokenId::FOCUS), DurationClass::Turn);
    }

    #[test]
    fn test_token_id_serde_transparent() {
        let json = serde_json::to_string(&TokenId::JAM).unwrap();
        assert_eq!(json, "\"jam\"");
        let back: TokenId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TokenId::JAM);
    }
}
