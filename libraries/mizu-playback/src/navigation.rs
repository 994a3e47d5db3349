//! Next-episode navigation bridge
//!
//! Derives the "next episode" affordance from the loaded catalog. Absence of
//! a successor (end of series, numbering gap, unknown current episode, or no
//! catalog yet) hides the affordance; it is never an error.

use mizu_core::{EpisodeCatalog, EpisodeId};
use serde::Serialize;

/// The next-episode affordance shown next to the player.
#[derive(Debug, Clone, Serialize)]
pub struct NextEpisodeAffordance {
    /// Whether the affordance should be rendered
    pub visible: bool,

    /// Episode to navigate to when activated
    pub target_episode_id: Option<EpisodeId>,
}

impl NextEpisodeAffordance {
    fn hidden() -> Self {
        Self {
            visible: false,
            target_episode_id: None,
        }
    }
}

/// Compute the affordance for `current` against a possibly-unloaded catalog.
pub fn next_episode_affordance(
    catalog: Option<&EpisodeCatalog>,
    current: &EpisodeId,
) -> NextEpisodeAffordance {
    let Some(catalog) = catalog else {
        return NextEpisodeAffordance::hidden();
    };
    let Some(current) = catalog.find_by_episode_id(current.as_str()) else {
        return NextEpisodeAffordance::hidden();
    };
    match catalog.find_next(current) {
        Some(next) => NextEpisodeAffordance {
            visible: true,
            target_episode_id: Some(next.episode_id.clone()),
        },
        None => NextEpisodeAffordance::hidden(),
    }
}
