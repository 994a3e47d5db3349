//! Source and caption types shared by the client and the playback session

use serde::{Deserialize, Serialize};

/// Audio track variant for an episode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioCategory {
    /// Subtitled original audio
    #[default]
    Sub,

    /// Dubbed audio
    Dub,
}

impl AudioCategory {
    /// Query-parameter value understood by the source API.
    pub fn as_str(self) -> &'static str {
        match self {
            AudioCategory::Sub => "sub",
            AudioCategory::Dub => "dub",
        }
    }
}

impl std::fmt::Display for AudioCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A subtitle/caption resource attached to a resolved source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionTrack {
    /// Track kind as reported upstream ("subtitles", "captions", ...)
    pub kind: String,

    /// Display label, typically a language name
    #[serde(default)]
    pub label: Option<String>,

    /// URL of the caption file
    pub file: String,

    /// Whether upstream marked this track as the default
    #[serde(default, rename = "default")]
    pub is_default: bool,
}

/// A playable source resolved for one (episode, category) pair.
///
/// Construction goes through [`SourceResolution::new`], which applies the
/// default-caption policy; a value of this type always carries a playable
/// URL. "Upstream had no source" is an error at the resolver, not an empty
/// resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceResolution {
    /// Primary playable media URL
    pub source_url: String,

    /// Caption tracks, verbatim in upstream order
    pub caption_tracks: Vec<CaptionTrack>,

    /// File URL of the pre-selected caption: the first track with
    /// `is_default = true`, or `None` when no track claims the default
    pub default_caption: Option<String>,
}

impl SourceResolution {
    /// Build a resolution from the primary URL and the upstream track list.
    pub fn new(source_url: impl Into<String>, caption_tracks: Vec<CaptionTrack>) -> Self {
        let default_caption = caption_tracks
            .iter()
            .find(|track| track.is_default)
            .map(|track| track.file.clone());
        Self {
            source_url: source_url.into(),
            caption_tracks,
            default_caption,
        }
    }
}
