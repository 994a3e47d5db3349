//! Episode identifiers
//!
//! An episode identifier is an opaque token handed out by the catalog API,
//! e.g. `"attack-on-river-112?ep=2940"`. The part before the first `?` is the
//! title identifier; the remainder is the episode selector. Identifiers
//! without a `?` address the title itself (empty selector).

use serde::{Deserialize, Serialize};

/// Opaque episode identifier.
///
/// The title/selector split is computed once at construction and never
/// changes for the lifetime of the value. Construction is total: any string
/// is a valid identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct EpisodeId {
    raw: String,
    /// Byte length of the title portion (index of the first `?`, or the
    /// whole string when absent).
    title_len: usize,
}

impl EpisodeId {
    /// Create an identifier from a raw token, splitting at the first `?`.
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let title_len = raw.find('?').unwrap_or(raw.len());
        Self { raw, title_len }
    }

    /// The full raw token.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The title identifier (substring before the first `?`).
    pub fn title_id(&self) -> &str {
        &self.raw[..self.title_len]
    }

    /// The episode selector (substring after the first `?`), empty when the
    /// token has no `?`.
    pub fn selector(&self) -> &str {
        if self.title_len == self.raw.len() {
            ""
        } else {
            &self.raw[self.title_len + 1..]
        }
    }
}

impl From<String> for EpisodeId {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<&str> for EpisodeId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<EpisodeId> for String {
    fn from(id: EpisodeId) -> Self {
        id.raw
    }
}

impl std::fmt::Display for EpisodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

/// One episode of a title, as listed by the catalog.
///
/// `episode_id` is unique within a title's catalog; `number` starts at 1.
/// The source collection guarantees no ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    /// Identifier addressing this episode
    pub episode_id: EpisodeId,

    /// Episode number within the title (1-based)
    pub number: u32,

    /// Episode title
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn splits_at_first_question_mark() {
        let id = EpisodeId::new("attack-on-river-112?ep=2940");
        assert_eq!(id.title_id(), "attack-on-river-112");
        assert_eq!(id.selector(), "ep=2940");
        assert_eq!(id.as_str(), "attack-on-river-112?ep=2940");
    }

    #[test]
    fn missing_question_mark_yields_empty_selector() {
        let id = EpisodeId::new("attack-on-river-112");
        assert_eq!(id.title_id(), "attack-on-river-112");
        assert_eq!(id.selector(), "");
    }

    #[test]
    fn only_the_first_question_mark_splits() {
        let id = EpisodeId::new("show?ep=1?extra=2");
        assert_eq!(id.title_id(), "show");
        assert_eq!(id.selector(), "ep=1?extra=2");
    }

    #[test]
    fn empty_and_degenerate_tokens_parse() {
        let empty = EpisodeId::new("");
        assert_eq!(empty.title_id(), "");
        assert_eq!(empty.selector(), "");

        let bare = EpisodeId::new("?");
        assert_eq!(bare.title_id(), "");
        assert_eq!(bare.selector(), "");

        let leading = EpisodeId::new("?ep=1");
        assert_eq!(leading.title_id(), "");
        assert_eq!(leading.selector(), "ep=1");
    }

    #[test]
    fn serde_round_trips_through_the_raw_token() {
        let id = EpisodeId::new("show-1?ep=7");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"show-1?ep=7\"");
        let back: EpisodeId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
        assert_eq!(back.title_id(), "show-1");
    }

    proptest! {
        #[test]
        fn reconstruction_matches_raw(raw in "\\PC*") {
            let id = EpisodeId::new(raw.clone());
            let rebuilt = if id.selector().is_empty() && !raw.contains('?') {
                id.title_id().to_string()
            } else {
                format!("{}?{}", id.title_id(), id.selector())
            };
            prop_assert_eq!(rebuilt, raw);
        }

        #[test]
        fn title_id_never_contains_question_mark(raw in "\\PC*") {
            let id = EpisodeId::new(raw);
            prop_assert!(!id.title_id().contains('?'));
        }
    }
}
