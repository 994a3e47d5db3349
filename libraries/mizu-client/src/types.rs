//! Wire types for the catalog/source API.
//!
//! Field names mirror the upstream JSON (camelCase); responses are converted
//! into `mizu-core` domain types at the client boundary.

use mizu_core::{CaptionTrack, EpisodeId};
use serde::{Deserialize, Serialize};

/// Configuration for connecting to a catalog/source API.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API (e.g. "https://vod.example.com")
    pub url: String,
    /// Streaming server name passed to source resolution (default "hd-1")
    pub server: String,
}

impl ClientConfig {
    /// Create a config with the default streaming server.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            server: "hd-1".to_string(),
        }
    }

    /// Create a config targeting a specific streaming server.
    pub fn with_server(url: impl Into<String>, server: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            server: server.into(),
        }
    }
}

// =============================================================================
// Episode Catalog Types
// =============================================================================

/// One episode entry as listed by the episodes endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireEpisode {
    pub episode_id: String,
    pub number: u32,
    #[serde(default)]
    pub title: Option<String>,
}

/// Response of `GET /anime/episodes/{titleId}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodesResponse {
    pub episodes: Vec<WireEpisode>,
    pub total_episodes: u32,
}

// =============================================================================
// Source Resolution Types
// =============================================================================

/// One playable source entry.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaSource {
    pub url: String,
    /// Container/stream type as reported upstream (e.g. "hls")
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

/// Response of `GET /anime/episode-srcs`.
#[derive(Debug, Clone, Deserialize)]
pub struct SourcesResponse {
    #[serde(default)]
    pub sources: Vec<MediaSource>,
    #[serde(default)]
    pub tracks: Vec<CaptionTrack>,
}

// =============================================================================
// Title Metadata Types
// =============================================================================

/// Sub/dub episode availability for a title.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeAvailability {
    #[serde(default)]
    pub sub: Option<u32>,
    #[serde(default)]
    pub dub: Option<u32>,
}

/// Display statistics for a title.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TitleStats {
    #[serde(default)]
    pub episodes: EpisodeAvailability,
    #[serde(default)]
    pub rating: Option<String>,
}

/// Core display data for a title.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitleOverview {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub poster: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stats: Option<TitleStats>,
}

/// A title card used in carousels and side lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitleCard {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub poster: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WireTitleDetails {
    pub(crate) info: TitleOverview,
}

/// Response of `GET /anime/info`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TitleInfoResponse {
    pub(crate) anime: WireTitleDetails,
    #[serde(default)]
    pub(crate) most_popular_animes: Vec<TitleCard>,
    #[serde(default)]
    pub(crate) related_animes: Vec<TitleCard>,
}

/// Title display data, flattened for consumers.
#[derive(Debug, Clone, Serialize)]
pub struct TitleInfo {
    pub overview: TitleOverview,
    pub most_popular: Vec<TitleCard>,
    pub related: Vec<TitleCard>,
}

impl TitleInfo {
    /// Availability of the sub/dub categories, when the API reported stats.
    pub fn availability(&self) -> EpisodeAvailability {
        self.overview
            .stats
            .as_ref()
            .map(|stats| stats.episodes.clone())
            .unwrap_or_default()
    }
}

impl From<TitleInfoResponse> for TitleInfo {
    fn from(response: TitleInfoResponse) -> Self {
        Self {
            overview: response.anime.info,
            most_popular: response.most_popular_animes,
            related: response.related_animes,
        }
    }
}

// =============================================================================
// Home Feed Types
// =============================================================================

/// Response of `GET /anime/home`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeFeed {
    #[serde(default)]
    pub trending_animes: Vec<TitleCard>,
    #[serde(default)]
    pub latest_episode_animes: Vec<TitleCard>,
}

/// Convert a wire episode into the domain type.
pub(crate) fn into_episode(wire: WireEpisode) -> mizu_core::Episode {
    mizu_core::Episode {
        episode_id: EpisodeId::new(wire.episode_id),
        number: wire.number,
        title: wire.title.unwrap_or_default(),
    }
}
