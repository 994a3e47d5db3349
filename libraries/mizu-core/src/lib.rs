//! Mizu Player Core
//!
//! Platform-agnostic domain types for the Mizu VOD viewer.
//!
//! This crate defines:
//! - **Episode identifiers**: opaque tokens carrying a title id plus an
//!   episode selector, split once at construction
//! - **Episode catalog**: an unordered episode set with indexed lookup by
//!   episode id and by episode number
//! - **Source types**: audio category (sub/dub), caption tracks, and the
//!   resolved playable source for one episode
//!
//! Nothing in here performs I/O; fetching lives in `mizu-client` and the
//! playback state machine in `mizu-playback`.
//!
//! # Example
//!
//! ```rust
//! use mizu_core::{Episode, EpisodeCatalog, EpisodeId};
//!
//! let id = EpisodeId::new("attack-on-river-112?ep=2940");
//! assert_eq!(id.title_id(), "attack-on-river-112");
//! assert_eq!(id.selector(), "ep=2940");
//!
//! let catalog = EpisodeCatalog::new(
//!     vec![Episode {
//!         episode_id: id.clone(),
//!         number: 1,
//!         title: "The Departure".to_string(),
//!     }],
//!     12,
//! );
//! assert!(catalog.find_by_episode_id(id.as_str()).is_some());
//! ```

#![forbid(unsafe_code)]

mod catalog;
mod episode;
pub mod types;

pub use catalog::EpisodeCatalog;
pub use episode::{Episode, EpisodeId};
pub use types::{AudioCategory, CaptionTrack, SourceResolution};
