//! Session Events
//!
//! Event-based communication for UI synchronization. Events are emitted by
//! the controller at key points:
//! - Lifecycle changes (loading/ready/error)
//! - Episode and category changes
//! - One-time seek requests after a category switch

use serde::{Deserialize, Serialize};

use mizu_core::AudioCategory;

use crate::types::Lifecycle;

/// Events emitted by the playback controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SessionEvent {
    /// Lifecycle phase changed
    LifecycleChanged {
        /// The new lifecycle phase
        lifecycle: Lifecycle,
    },

    /// The session re-targeted another episode
    EpisodeChanged {
        /// Raw identifier of the new episode
        episode_id: String,
    },

    /// The audio category changed
    CategoryChanged {
        /// The new category
        category: AudioCategory,
    },

    /// A source became ready for rendering
    SourceReady {
        /// Playable URL handed to the video element
        source_url: String,
    },

    /// The player should seek before resuming playback
    ///
    /// Emitted at most once per category switch that carried a position;
    /// emitting it consumes the armed seek, so a subscriber handling this
    /// event must not also poll `take_pending_seek`.
    SeekRequested {
        /// Seek target in seconds
        position_seconds: f64,
    },

    /// A required fetch failed
    Error {
        /// Failure description
        message: String,
    },
}
