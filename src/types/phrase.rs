//! Phrase records and their self-describing identifiers

use serde::{Deserialize, Serialize};
use crate::{GameError, AUTHENTIC_PREFIX, FABRICATED_PREFIX};

/// Ground truth for a phrase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    /// Intercepted UVB-76 voice message
    Authentic,
    /// Generated by a neural network
    Fabricated,
}

impl Label {
    /// Identifier prefix carrying this label
    pub fn prefix(&self) -> &'static str {
        match self {
            Label::Authentic => AUTHENTIC_PREFIX,
            Label::Fabricated => FABRICATED_PREFIX,
        }
    }

    /// Label a guess of `is_authentic` stands for
    pub fn from_guess(is_authentic: bool) -> Self {
        if is_authentic {
            Label::Authentic
        } else {
            Label::Fabricated
        }
    }

    pub fn is_authentic(&self) -> bool {
        *self == Label::Authentic
    }

    /// Badge shown on the card
    pub fn badge(&self) -> &'static str {
        match self {
            Label::Authentic => "УВБ-76",
            Label::Fabricated => "НЕЙРОСЕТЬ",
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Label::Authentic => "AUTHENTIC",
            Label::Fabricated => "FABRICATED",
        };
        write!(f, "{}", name)
    }
}

/// Opaque phrase identifier: `<tag>_<token>`.
///
/// The tag alone decides the label, so judging never needs the pool.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhraseId(String);

impl PhraseId {
    /// Tag `token` with `label`
    pub fn tagged(label: Label, token: impl std::fmt::Display) -> Self {
        Self(format!("{}{}", label.prefix(), token))
    }

    /// Decode the label from the tag
    pub fn label(&self) -> Result<Label, GameError> {
        decode_tag(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PhraseId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl From<String> for PhraseId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl std::fmt::Display for PhraseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Decode the label of a raw identifier.
///
/// A known prefix followed by a non-empty token is required; anything else is
/// an integrity fault rather than a guessable label.
pub fn decode_tag(raw: &str) -> Result<Label, GameError> {
    for label in [Label::Authentic, Label::Fabricated] {
        if let Some(token) = raw.strip_prefix(label.prefix()) {
            if !token.is_empty() {
                return Ok(label);
            }
        }
    }
    Err(GameError::UnknownIdentifierTag(raw.to_string()))
}

/// One card of the deck
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseRecord {
    pub id: PhraseId,
    pub text: String,
}

impl PhraseRecord {
    pub fn new(id: impl Into<PhraseId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// Shuffled phrases for one session, in presentation order
pub type Deck = Vec<PhraseRecord>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_known_tags() {
        assert_eq!(decode_tag("real_1").unwrap(), Label::Authentic);
        assert_eq!(decode_tag("fake_abc").unwrap(), Label::Fabricated);
    }

    #[test]
    fn test_decode_rejects_untagged() {
        for raw in ["", "real_", "fake_", "1234", "REAL_1", "realx"] {
            assert!(
                matches!(decode_tag(raw), Err(GameError::UnknownIdentifierTag(_))),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_tagged_round_trips_label() {
        let id = PhraseId::tagged(Label::Fabricated, 42);
        assert_eq!(id.as_str(), "fake_42");
        assert_eq!(id.label().unwrap(), Label::Fabricated);
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let record = PhraseRecord::new("real_7", "НЖТИ 95402");
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"id":"real_7","text":"НЖТИ 95402"}"#);
    }
}
