//! Core types for playback session management

use mizu_core::{AudioCategory, CaptionTrack, EpisodeId};
use serde::{Deserialize, Serialize};

/// Lifecycle of one loading phase of the playback session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lifecycle {
    /// Fetches for the current (episode, category) target are in flight
    Loading,

    /// Source and catalog both landed; the player can render
    Ready,

    /// A required fetch failed; terminal until the next episode or
    /// category command
    Error,
}

/// Render-ready snapshot of the playback session.
///
/// This is what the presentational layer reads; it never mutates session
/// state through it.
#[derive(Debug, Clone, Serialize)]
pub struct PlaybackState {
    /// Episode currently targeted by the session
    pub episode_id: EpisodeId,

    /// Selected audio category
    pub category: AudioCategory,

    /// Current lifecycle phase
    pub lifecycle: Lifecycle,

    /// Playable URL, present only once resolved
    pub source_url: Option<String>,

    /// Caption tracks for the resolved source, upstream order
    pub caption_tracks: Vec<CaptionTrack>,

    /// Pre-selected caption file, when upstream marked a default
    pub selected_caption_file: Option<String>,

    /// Last known playback position in seconds
    pub position_seconds: f64,

    /// Failure description when `lifecycle` is `Error`
    pub error_message: Option<String>,
}

/// Tag identifying the (episode, category) target that triggered a source
/// fetch.
///
/// A fetch result is applied only while its tag still matches the session's
/// current target; anything else arrives stale and is discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceTag {
    pub episode_id: String,
    pub category: AudioCategory,
}

/// Tag identifying the fetch round that triggered a catalog or metadata
/// fetch.
///
/// Catalog and title metadata are keyed by title; the audio category cannot
/// affect them, so a category switch never invalidates them. The title alone
/// cannot distinguish two loading phases of the same title (episode
/// navigation within one series), so the tag also carries the session's
/// fetch-round generation and only the most recently issued tag matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleTag {
    pub title_id: String,
    pub generation: u64,
}

/// The fetches a command requires the caller to start, each carrying the
/// tag its result must present on completion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchPlan {
    /// Source resolution for the new (episode, category) target
    pub source: Option<SourceTag>,

    /// Episode catalog for the target's title
    pub catalog: Option<TitleTag>,

    /// Title display metadata (not required for `Ready`)
    pub title: Option<TitleTag>,
}

impl FetchPlan {
    /// True when the command was a no-op and nothing needs fetching.
    pub fn is_empty(&self) -> bool {
        self.source.is_none() && self.catalog.is_none() && self.title.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_plan() {
        assert!(FetchPlan::default().is_empty());

        let plan = FetchPlan {
            source: Some(SourceTag {
                episode_id: "show-1?ep=1".to_string(),
                category: AudioCategory::Sub,
            }),
            ..FetchPlan::default()
        };
        assert!(!plan.is_empty());
    }

    #[test]
    fn title_tags_compare_by_generation() {
        let old = TitleTag {
            title_id: "show-1".to_string(),
            generation: 0,
        };
        let retry = TitleTag {
            title_id: "show-1".to_string(),
            generation: 1,
        };
        assert_ne!(old, retry);
    }

    #[test]
    fn source_tags_compare_by_episode_and_category() {
        let sub = SourceTag {
            episode_id: "show-1?ep=1".to_string(),
            category: AudioCategory::Sub,
        };
        let dub = SourceTag {
            episode_id: "show-1?ep=1".to_string(),
            category: AudioCategory::Dub,
        };
        assert_ne!(sub, dub);
        assert_eq!(sub, sub.clone());
    }
}
