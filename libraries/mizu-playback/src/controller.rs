//! Playback controller - async orchestration
//!
//! Connects the synchronous [`PlaybackSession`] state machine to the
//! catalog/source API. Each [`FetchPlan`] entry becomes an independent tokio
//! task; no ordering is assumed between them. Every task carries the tag of
//! the target that triggered it and locks the session only after its fetch
//! completes, so applying a result is a short critical section and stale
//! results are discarded on arrival (soft cancellation).

use std::sync::Arc;

use mizu_client::CatalogClient;
use mizu_core::{AudioCategory, EpisodeId};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, warn};

use crate::events::SessionEvent;
use crate::navigation::NextEpisodeAffordance;
use crate::session::PlaybackSession;
use crate::types::{FetchPlan, Lifecycle, PlaybackState};

/// Capacity of the event channel; slow subscribers lag rather than block.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Async driver for one playback view.
///
/// Cheap to clone; clones share the same session. Must be created inside a
/// tokio runtime: the initial fetches are spawned immediately.
///
/// # Example
///
/// ```ignore
/// use mizu_client::{CatalogClient, ClientConfig};
/// use mizu_core::AudioCategory;
/// use mizu_playback::PlaybackController;
///
/// let client = CatalogClient::new(ClientConfig::new("https://vod.example.com"))?;
/// let controller = PlaybackController::new(client, "show-1?ep=4500");
///
/// // UI event handlers:
/// controller.change_category(AudioCategory::Dub, Some(42.5)).await;
/// let state = controller.snapshot().await;
/// ```
#[derive(Clone)]
pub struct PlaybackController {
    inner: Arc<Inner>,
}

struct Inner {
    client: CatalogClient,
    session: Mutex<PlaybackSession>,
    events: broadcast::Sender<SessionEvent>,
}

impl PlaybackController {
    /// Create a controller targeting an episode and start the initial
    /// fetches.
    pub fn new(client: CatalogClient, episode_id: impl Into<EpisodeId>) -> Self {
        let (session, plan) = PlaybackSession::new(episode_id);
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let controller = Self {
            inner: Arc::new(Inner {
                client,
                session: Mutex::new(session),
                events,
            }),
        };
        controller.run_plan(plan);
        controller
    }

    /// Subscribe to session events.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.inner.events.subscribe()
    }

    /// Render-ready snapshot of the session.
    pub async fn snapshot(&self) -> PlaybackState {
        self.inner.session.lock().await.snapshot()
    }

    /// Navigate to another episode.
    ///
    /// Re-enters `Loading` with the position reset to zero and re-fetches
    /// catalog, source, and title metadata. No-op for the current episode.
    pub async fn change_episode(&self, episode_id: impl Into<EpisodeId>) {
        let episode_id = episode_id.into();
        let plan = self
            .inner
            .session
            .lock()
            .await
            .change_episode(episode_id.clone());
        if plan.is_empty() {
            return;
        }

        debug!(episode_id = %episode_id, "Changing episode");
        self.emit(SessionEvent::EpisodeChanged {
            episode_id: episode_id.as_str().to_string(),
        });
        self.emit(SessionEvent::LifecycleChanged {
            lifecycle: Lifecycle::Loading,
        });
        self.run_plan(plan);
    }

    /// Switch the audio category.
    ///
    /// `player_position` is the position the player reported at the moment
    /// of the switch; it is carried into the new `Loading` phase and applied
    /// as a one-time seek once the new source is `Ready`. No-op for the
    /// current category.
    pub async fn change_category(&self, category: AudioCategory, player_position: Option<f64>) {
        let plan = {
            let mut session = self.inner.session.lock().await;
            if let Some(position) = player_position {
                session.record_progress(position);
            }
            session.change_category(category)
        };
        if plan.is_empty() {
            return;
        }

        debug!(category = %category, "Changing category");
        self.emit(SessionEvent::CategoryChanged { category });
        self.emit(SessionEvent::LifecycleChanged {
            lifecycle: Lifecycle::Loading,
        });
        self.run_plan(plan);
    }

    /// Record a progress report from the player.
    pub async fn report_progress(&self, seconds: f64) {
        self.inner.session.lock().await.record_progress(seconds);
    }

    /// Consume the one-time seek armed after a category switch.
    ///
    /// Returns `None` when a `SeekRequested` event already delivered the
    /// seek to a subscriber; the two channels never hand out the same seek
    /// twice.
    pub async fn take_pending_seek(&self) -> Option<f64> {
        self.inner.session.lock().await.take_pending_seek()
    }

    /// The next-episode affordance for the current catalog and episode.
    pub async fn next_episode_affordance(&self) -> NextEpisodeAffordance {
        self.inner.session.lock().await.next_episode_affordance()
    }

    /// Navigate to the next episode when the affordance is visible.
    ///
    /// Returns whether a navigation happened.
    pub async fn advance_to_next(&self) -> bool {
        let target = self
            .inner
            .session
            .lock()
            .await
            .next_episode_affordance()
            .target_episode_id;
        match target {
            Some(episode_id) => {
                self.change_episode(episode_id).await;
                true
            }
            None => false,
        }
    }

    fn emit(&self, event: SessionEvent) {
        // Nobody listening is fine.
        let _ = self.inner.events.send(event);
    }

    /// Start one task per planned fetch. Tasks run concurrently and may
    /// complete in any order; each applies its tagged result and emits the
    /// resulting lifecycle transition, if any.
    fn run_plan(&self, plan: FetchPlan) {
        if let Some(tag) = plan.source {
            let inner = Arc::clone(&self.inner);
            tokio::spawn(async move {
                let episode_id = EpisodeId::new(tag.episode_id.clone());
                let result = inner
                    .client
                    .resolve_sources(&episode_id, tag.category)
                    .await
                    .map_err(|e| e.to_string());

                let mut session = inner.session.lock().await;
                let before = session.lifecycle();
                if session.apply_source(&tag, result) {
                    emit_transition(&inner, before, &mut session);
                } else {
                    debug!(
                        episode_id = %tag.episode_id,
                        category = %tag.category,
                        "Discarding stale source result"
                    );
                }
            });
        }

        if let Some(tag) = plan.catalog {
            let inner = Arc::clone(&self.inner);
            tokio::spawn(async move {
                let result = inner
                    .client
                    .fetch_episodes(&tag.title_id)
                    .await
                    .map_err(|e| e.to_string());

                let mut session = inner.session.lock().await;
                let before = session.lifecycle();
                if session.apply_catalog(&tag, result) {
                    emit_transition(&inner, before, &mut session);
                } else {
                    debug!(title_id = %tag.title_id, "Discarding stale catalog result");
                }
            });
        }

        if let Some(tag) = plan.title {
            let inner = Arc::clone(&self.inner);
            tokio::spawn(async move {
                let result = inner
                    .client
                    .fetch_title_info(&tag.title_id)
                    .await
                    .map_err(|e| e.to_string());
                if let Err(message) = &result {
                    // Display metadata is optional; the session stays usable.
                    warn!(title_id = %tag.title_id, error = %message, "Title metadata fetch failed");
                }

                let mut session = inner.session.lock().await;
                if !session.apply_title(&tag, result) {
                    debug!(title_id = %tag.title_id, "Discarding stale title result");
                }
            });
        }
    }
}

/// Emit the events implied by a lifecycle transition.
fn emit_transition(inner: &Inner, before: Lifecycle, session: &mut PlaybackSession) {
    let after = session.lifecycle();
    if after == before {
        return;
    }

    let _ = inner.events.send(SessionEvent::LifecycleChanged { lifecycle: after });
    match after {
        Lifecycle::Ready => {
            if let Some(resolution) = session.resolution() {
                let _ = inner.events.send(SessionEvent::SourceReady {
                    source_url: resolution.source_url.clone(),
                });
            }
            // The armed seek is delivered exactly once: through the event
            // when the UI is subscribed, otherwise via take_pending_seek().
            if inner.events.receiver_count() > 0 {
                if let Some(position_seconds) = session.take_pending_seek() {
                    let _ = inner
                        .events
                        .send(SessionEvent::SeekRequested { position_seconds });
                }
            }
        }
        Lifecycle::Error => {
            if let Some(message) = session.error_message() {
                let _ = inner.events.send(SessionEvent::Error {
                    message: message.to_string(),
                });
            }
        }
        Lifecycle::Loading => {}
    }
}
