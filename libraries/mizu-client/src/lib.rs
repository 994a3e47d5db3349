//! Mizu Catalog Client
//!
//! HTTP client library for the Mizu catalog/source API.
//!
//! # Features
//!
//! - **Episode catalog**: fetch a title's episode list with authoritative
//!   total count, indexed for lookup by id and number
//! - **Source resolution**: resolve the playable URL and caption tracks for
//!   an (episode, category) pair, with the first-source/default-caption
//!   selection policy applied
//! - **Title metadata**: display data, sub/dub availability, related and
//!   most-popular titles
//! - **Home feed**: trending and latest-episode carousels
//!
//! # Example
//!
//! ```ignore
//! use mizu_client::{CatalogClient, ClientConfig};
//! use mizu_core::{AudioCategory, EpisodeId};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CatalogClient::new(ClientConfig::new("https://vod.example.com"))?;
//!
//!     let episode = EpisodeId::new("show-1?ep=4500");
//!     let catalog = client.fetch_episodes(episode.title_id()).await?;
//!     println!("{} episodes", catalog.total_count());
//!
//!     let resolution = client.resolve_sources(&episode, AudioCategory::Sub).await?;
//!     println!("source: {}", resolution.source_url);
//!
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]

mod client;
mod error;
mod types;

// Re-export main types
pub use client::CatalogClient;
pub use error::{ClientError, Result};
pub use types::{
    ClientConfig, EpisodeAvailability, HomeFeed, MediaSource, SourcesResponse, TitleCard,
    TitleInfo, TitleOverview, TitleStats,
};
