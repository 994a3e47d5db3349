//! # Mizu Playback
//!
//! Playback continuity for the Mizu Player. This crate owns the session
//! state machine behind the episode view: which episode and audio category
//! are targeted, whether the view is loading, ready, or failed, where
//! playback position carries across a sub/dub switch, and which fetch
//! results are still fresh enough to apply.
//!
//! The state machine itself ([`PlaybackSession`]) is synchronous and pure:
//! commands return a [`FetchPlan`] describing what must be fetched, and
//! results are applied back with staleness tags. [`PlaybackController`]
//! wraps it for async use, running the fetches against a
//! [`CatalogClient`](mizu_client::CatalogClient) and broadcasting
//! [`SessionEvent`]s to the UI.
//!
//! ## Example
//!
//! ```ignore
//! use mizu_client::{CatalogClient, ClientConfig};
//! use mizu_core::AudioCategory;
//! use mizu_playback::{PlaybackController, SessionEvent};
//!
//! let client = CatalogClient::new(ClientConfig::new("https://vod.example.com"))?;
//! let controller = PlaybackController::new(client, "show-1?ep=4500");
//! let mut events = controller.subscribe();
//!
//! // Switch to dub at 42.5 seconds; the new source resumes there.
//! controller.change_category(AudioCategory::Dub, Some(42.5)).await;
//!
//! while let Ok(event) = events.recv().await {
//!     if let SessionEvent::SeekRequested { position_seconds } = event {
//!         player.seek(position_seconds);
//!     }
//! }
//! ```

#![forbid(unsafe_code)]

mod controller;
mod events;
mod navigation;
mod session;
mod types;

pub use controller::PlaybackController;
pub use events::SessionEvent;
pub use navigation::{next_episode_affordance, NextEpisodeAffordance};
pub use session::PlaybackSession;
pub use types::{FetchPlan, Lifecycle, PlaybackState, SourceTag, TitleTag};
