//! Playback session - core state machine
//!
//! Owns the current (episode, category) target, the fetched catalog/source/
//! metadata, and the playback position. Commands return a [`FetchPlan`]
//! naming the fetches the caller must start; completions come back through
//! the `apply_*` methods carrying the tag of the target that triggered them.
//!
//! The session is synchronous and single-owner: all asynchrony (and all the
//! races that come with it) stays in the controller, which serializes access.
//! Completions may arrive in any order; a result whose tag no longer matches
//! the current target is discarded, so a slow response for an abandoned
//! target can never overwrite newer state.

use mizu_client::TitleInfo;
use mizu_core::{AudioCategory, EpisodeCatalog, EpisodeId, SourceResolution};

use crate::navigation::{next_episode_affordance, NextEpisodeAffordance};
use crate::types::{FetchPlan, Lifecycle, PlaybackState, SourceTag, TitleTag};

/// State machine for one playback view.
///
/// Created in `Loading`; reaches `Ready` once the source resolution and the
/// episode catalog have both landed for the current target, or `Error` when
/// a required fetch fails. `Error` is terminal until the next episode or
/// category command re-enters `Loading`.
#[derive(Debug)]
pub struct PlaybackSession {
    episode_id: EpisodeId,
    category: AudioCategory,
    lifecycle: Lifecycle,
    resolution: Option<SourceResolution>,
    catalog: Option<EpisodeCatalog>,
    title: Option<TitleInfo>,
    position_seconds: f64,
    pending_seek: Option<f64>,
    error_message: Option<String>,
    /// Fetch-round counter, bumped on every episode change.
    generation: u64,
    /// Most recently issued catalog/title tags; only these are accepted.
    expected_catalog: Option<TitleTag>,
    expected_title: Option<TitleTag>,
}

impl PlaybackSession {
    /// Create a session targeting an episode, with the plan for the initial
    /// round of fetches.
    pub fn new(episode_id: impl Into<EpisodeId>) -> (Self, FetchPlan) {
        let mut session = Self {
            episode_id: episode_id.into(),
            category: AudioCategory::default(),
            lifecycle: Lifecycle::Loading,
            resolution: None,
            catalog: None,
            title: None,
            position_seconds: 0.0,
            pending_seek: None,
            error_message: None,
            generation: 0,
            expected_catalog: None,
            expected_title: None,
        };
        let plan = session.full_plan();
        (session, plan)
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Switch to another episode.
    ///
    /// Discards catalog, source, and title metadata, resets the playback
    /// position to zero, and re-enters `Loading`. Position continuity is
    /// never carried across episodes, and every fetch still in flight for
    /// the previous target becomes stale, even within the same title. A
    /// command naming the current episode is a no-op.
    pub fn change_episode(&mut self, episode_id: impl Into<EpisodeId>) -> FetchPlan {
        let next = episode_id.into();
        if next == self.episode_id {
            return FetchPlan::default();
        }

        self.generation += 1;
        self.episode_id = next;
        self.resolution = None;
        self.catalog = None;
        self.title = None;
        self.position_seconds = 0.0;
        self.pending_seek = None;
        self.error_message = None;
        self.lifecycle = Lifecycle::Loading;
        self.full_plan()
    }

    /// Switch the audio category for the current episode.
    ///
    /// Keeps the episode catalog and title metadata (the episode did not
    /// change) and carries the playback position into the new `Loading`
    /// phase; once the new source is `Ready` a one-time seek to that
    /// position is armed. A command naming the current category is a no-op.
    pub fn change_category(&mut self, category: AudioCategory) -> FetchPlan {
        if category == self.category {
            return FetchPlan::default();
        }

        self.category = category;
        self.resolution = None;
        self.pending_seek = None;
        self.error_message = None;
        self.lifecycle = Lifecycle::Loading;
        FetchPlan {
            source: Some(self.source_tag()),
            ..FetchPlan::default()
        }
    }

    /// Record the player's reported playback position.
    ///
    /// Only meaningful while `Ready`; progress reported during `Loading` or
    /// `Error` belongs to a source that is no longer on screen.
    pub fn record_progress(&mut self, seconds: f64) {
        if self.lifecycle == Lifecycle::Ready {
            self.position_seconds = seconds.max(0.0);
        }
    }

    /// Consume the one-time seek command armed on re-entering `Ready` after
    /// a category switch.
    pub fn take_pending_seek(&mut self) -> Option<f64> {
        self.pending_seek.take()
    }

    // =========================================================================
    // Fetch completions
    // =========================================================================

    /// Apply an episode-catalog result.
    ///
    /// Returns false (and changes nothing) unless the tag is the most
    /// recently issued catalog tag; completions for abandoned targets,
    /// including earlier loading phases of the same title, are discarded.
    /// Each issued tag is accepted at most once.
    pub fn apply_catalog(
        &mut self,
        tag: &TitleTag,
        result: Result<EpisodeCatalog, String>,
    ) -> bool {
        if self.expected_catalog.as_ref() != Some(tag) {
            return false;
        }
        self.expected_catalog = None;
        match result {
            Ok(catalog) => {
                self.catalog = Some(catalog);
                self.refresh_lifecycle();
            }
            Err(message) => self.fail(message),
        }
        true
    }

    /// Apply a source-resolution result.
    ///
    /// Returns false (and changes nothing) when the tag no longer matches
    /// the current (episode, category) target.
    pub fn apply_source(
        &mut self,
        tag: &SourceTag,
        result: Result<SourceResolution, String>,
    ) -> bool {
        if *tag != self.source_tag() {
            return false;
        }
        match result {
            Ok(resolution) => {
                self.resolution = Some(resolution);
                self.refresh_lifecycle();
            }
            Err(message) => self.fail(message),
        }
        true
    }

    /// Apply a title-metadata result.
    ///
    /// Metadata is display-only: it is not required for `Ready`, and a
    /// failed metadata fetch does not fail the session. Returns false when
    /// the tag is not the most recently issued title tag.
    pub fn apply_title(&mut self, tag: &TitleTag, result: Result<TitleInfo, String>) -> bool {
        if self.expected_title.as_ref() != Some(tag) {
            return false;
        }
        self.expected_title = None;
        if let Ok(title) = result {
            self.title = Some(title);
        }
        true
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Current lifecycle phase.
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Episode currently targeted.
    pub fn episode_id(&self) -> &EpisodeId {
        &self.episode_id
    }

    /// Selected audio category.
    pub fn category(&self) -> AudioCategory {
        self.category
    }

    /// Last known playback position in seconds.
    pub fn position_seconds(&self) -> f64 {
        self.position_seconds
    }

    /// Armed seek target, without consuming it.
    pub fn pending_seek(&self) -> Option<f64> {
        self.pending_seek
    }

    /// The loaded episode catalog, once fetched.
    pub fn catalog(&self) -> Option<&EpisodeCatalog> {
        self.catalog.as_ref()
    }

    /// The resolved source, once fetched.
    pub fn resolution(&self) -> Option<&SourceResolution> {
        self.resolution.as_ref()
    }

    /// Title display metadata, once fetched.
    pub fn title_info(&self) -> Option<&TitleInfo> {
        self.title.as_ref()
    }

    /// Failure description while in `Error`.
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// The catalog entry for the current episode, when the catalog knows it.
    pub fn current_episode(&self) -> Option<&mizu_core::Episode> {
        self.catalog
            .as_ref()
            .and_then(|catalog| catalog.find_by_episode_id(self.episode_id.as_str()))
    }

    /// The next-episode affordance derived from the loaded catalog.
    ///
    /// Hidden while the catalog is missing, when the current episode is not
    /// in it, and at the end of the series or a numbering gap.
    pub fn next_episode_affordance(&self) -> NextEpisodeAffordance {
        next_episode_affordance(self.catalog.as_ref(), &self.episode_id)
    }

    /// Render-ready snapshot of the session.
    pub fn snapshot(&self) -> PlaybackState {
        PlaybackState {
            episode_id: self.episode_id.clone(),
            category: self.category,
            lifecycle: self.lifecycle,
            source_url: self
                .resolution
                .as_ref()
                .map(|resolution| resolution.source_url.clone()),
            caption_tracks: self
                .resolution
                .as_ref()
                .map(|resolution| resolution.caption_tracks.clone())
                .unwrap_or_default(),
            selected_caption_file: self
                .resolution
                .as_ref()
                .and_then(|resolution| resolution.default_caption.clone()),
            position_seconds: self.position_seconds,
            error_message: self.error_message.clone(),
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn source_tag(&self) -> SourceTag {
        SourceTag {
            episode_id: self.episode_id.as_str().to_string(),
            category: self.category,
        }
    }

    /// Issue the tags for a full fetch round and remember them as the only
    /// ones the `apply_*` methods will accept.
    fn full_plan(&mut self) -> FetchPlan {
        let tag = TitleTag {
            title_id: self.episode_id.title_id().to_string(),
            generation: self.generation,
        };
        self.expected_catalog = Some(tag.clone());
        self.expected_title = Some(tag.clone());
        FetchPlan {
            source: Some(self.source_tag()),
            catalog: Some(tag.clone()),
            title: Some(tag),
        }
    }

    fn fail(&mut self, message: String) {
        self.lifecycle = Lifecycle::Error;
        self.error_message = Some(message);
    }

    /// Promote to `Ready` once both required fetches have landed.
    ///
    /// A failure wins regardless of the other fetches' outcomes, so nothing
    /// is promoted once `Error` has been entered.
    fn refresh_lifecycle(&mut self) {
        if self.lifecycle == Lifecycle::Error {
            return;
        }
        if self.resolution.is_some() && self.catalog.is_some() {
            self.lifecycle = Lifecycle::Ready;
            if self.position_seconds > 0.0 {
                self.pending_seek = Some(self.position_seconds);
            }
        }
    }
}
