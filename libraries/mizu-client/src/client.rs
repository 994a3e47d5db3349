//! Catalog/source API client.

use std::time::Duration;

use mizu_core::{AudioCategory, EpisodeCatalog, EpisodeId, SourceResolution};
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::error::{ClientError, Result};
use crate::types::{
    into_episode, ClientConfig, EpisodesResponse, HomeFeed, SourcesResponse, TitleInfo,
    TitleInfoResponse,
};

/// Client for the Mizu catalog/source API.
///
/// Stateless apart from the connection pool; one instance can serve any
/// number of concurrent fetches.
///
/// # Example
///
/// ```ignore
/// use mizu_client::{CatalogClient, ClientConfig};
/// use mizu_core::{AudioCategory, EpisodeId};
///
/// let client = CatalogClient::new(ClientConfig::new("https://vod.example.com"))?;
///
/// let episode = EpisodeId::new("show-1?ep=4500");
/// let catalog = client.fetch_episodes(episode.title_id()).await?;
/// let resolution = client.resolve_sources(&episode, AudioCategory::Sub).await?;
/// println!("playing {}", resolution.source_url);
/// ```
pub struct CatalogClient {
    http: Client,
    base_url: String,
    server: String,
}

impl CatalogClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.url.is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let base_url = config.url.trim_end_matches('/').to_string();
        let parsed =
            Url::parse(&base_url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ClientError::InvalidUrl(
                "URL must use http:// or https://".into(),
            ));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("MizuPlayer/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Request)?;

        Ok(Self {
            http,
            base_url,
            server: config.server,
        })
    }

    /// The normalized API base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The streaming server name used for source resolution.
    pub fn server(&self) -> &str {
        &self.server
    }

    /// Fetch the episode catalog for a title.
    pub async fn fetch_episodes(&self, title_id: &str) -> Result<EpisodeCatalog> {
        let url = format!("{}/anime/episodes/{}", self.base_url, title_id);
        debug!(url = %url, title_id = %title_id, "Fetching episode catalog");

        let response = self.http.get(&url).send().await.map_err(map_transport)?;
        let status = response.status();

        if status.is_success() {
            let body: EpisodesResponse = response.json().await.map_err(|e| {
                ClientError::ParseError(format!("Failed to parse episodes response: {}", e))
            })?;

            debug!(
                episodes = body.episodes.len(),
                total = body.total_episodes,
                "Fetched episode catalog"
            );

            let episodes = body.episodes.into_iter().map(into_episode).collect();
            Ok(EpisodeCatalog::new(episodes, body.total_episodes))
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(ClientError::ServerError {
                status: status.as_u16(),
                message,
            })
        }
    }

    /// Resolve the playable source and caption set for an episode/category
    /// pair.
    ///
    /// Selection policy: the first listed source wins deterministically (no
    /// quality negotiation), caption tracks are kept verbatim in upstream
    /// order, and the first `default = true` track becomes the pre-selected
    /// caption. An empty source list is reported as
    /// [`ClientError::NoSourceAvailable`], never as an empty resolution.
    pub async fn resolve_sources(
        &self,
        episode_id: &EpisodeId,
        category: AudioCategory,
    ) -> Result<SourceResolution> {
        let url = format!("{}/anime/episode-srcs", self.base_url);
        debug!(
            episode_id = %episode_id,
            category = %category,
            server = %self.server,
            "Resolving sources"
        );

        let response = self
            .http
            .get(&url)
            .query(&[
                ("id", episode_id.as_str()),
                ("server", &self.server),
                ("category", category.as_str()),
            ])
            .send()
            .await
            .map_err(map_transport)?;
        let status = response.status();

        if status.is_success() {
            let body: SourcesResponse = response.json().await.map_err(|e| {
                ClientError::ParseError(format!("Failed to parse sources response: {}", e))
            })?;

            let Some(primary) = body.sources.into_iter().next() else {
                return Err(ClientError::NoSourceAvailable {
                    episode_id: episode_id.as_str().to_string(),
                    category,
                });
            };

            debug!(source_url = %primary.url, tracks = body.tracks.len(), "Resolved source");
            Ok(SourceResolution::new(primary.url, body.tracks))
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(ClientError::ServerError {
                status: status.as_u16(),
                message,
            })
        }
    }

    /// Fetch display metadata for a title, including sub/dub availability
    /// and the related/most-popular side lists.
    pub async fn fetch_title_info(&self, title_id: &str) -> Result<TitleInfo> {
        let url = format!("{}/anime/info", self.base_url);
        debug!(url = %url, title_id = %title_id, "Fetching title info");

        let response = self
            .http
            .get(&url)
            .query(&[("id", title_id)])
            .send()
            .await
            .map_err(map_transport)?;
        let status = response.status();

        if status.is_success() {
            let body: TitleInfoResponse = response.json().await.map_err(|e| {
                ClientError::ParseError(format!("Failed to parse title info response: {}", e))
            })?;
            Ok(TitleInfo::from(body))
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(ClientError::ServerError {
                status: status.as_u16(),
                message,
            })
        }
    }

    /// Fetch the home feed (trending and latest-episode carousels).
    pub async fn fetch_home(&self) -> Result<HomeFeed> {
        let url = format!("{}/anime/home", self.base_url);
        debug!(url = %url, "Fetching home feed");

        let response = self.http.get(&url).send().await.map_err(map_transport)?;
        let status = response.status();

        if status.is_success() {
            let feed: HomeFeed = response.json().await.map_err(|e| {
                ClientError::ParseError(format!("Failed to parse home response: {}", e))
            })?;
            Ok(feed)
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(ClientError::ServerError {
                status: status.as_u16(),
                message,
            })
        }
    }
}

fn map_transport(error: reqwest::Error) -> ClientError {
    if error.is_connect() || error.is_timeout() {
        ClientError::ServerUnreachable(error.to_string())
    } else {
        ClientError::Request(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_validation() {
        assert!(CatalogClient::new(ClientConfig::new("https://example.com")).is_ok());
        assert!(CatalogClient::new(ClientConfig::new("http://localhost:8080")).is_ok());

        assert!(CatalogClient::new(ClientConfig::new("")).is_err());
        assert!(CatalogClient::new(ClientConfig::new("not-a-url")).is_err());
        assert!(CatalogClient::new(ClientConfig::new("ftp://example.com")).is_err());
    }

    #[test]
    fn url_normalization() {
        let client = CatalogClient::new(ClientConfig::new("https://example.com/")).unwrap();
        assert_eq!(client.base_url(), "https://example.com");
    }
}
