//! Episode catalog with indexed lookup
//!
//! The upstream episode collection is unordered; consumers need lookup by
//! episode id (current episode display) and by number (next-episode
//! derivation). Both indexes are built once at construction instead of
//! re-scanning the list on every render.

use std::collections::HashMap;

use serde::Serialize;

use crate::episode::Episode;

/// The set of episodes known for one title.
///
/// `total_count` comes from the API and stays authoritative even when the
/// episode list is incomplete; it is never derived from `episodes().len()`.
/// Serializes for snapshots; rebuilding one goes through [`Self::new`] so the
/// lookup indexes always match the list.
#[derive(Debug, Clone, Serialize)]
pub struct EpisodeCatalog {
    episodes: Vec<Episode>,
    total_count: u32,
    #[serde(skip)]
    by_id: HashMap<String, usize>,
    #[serde(skip)]
    by_number: HashMap<u32, usize>,
}

impl EpisodeCatalog {
    /// Build a catalog from an unordered episode list and the authoritative
    /// total count.
    ///
    /// Duplicate ids or numbers keep the first occurrence.
    pub fn new(episodes: Vec<Episode>, total_count: u32) -> Self {
        let mut by_id = HashMap::with_capacity(episodes.len());
        let mut by_number = HashMap::with_capacity(episodes.len());
        for (index, episode) in episodes.iter().enumerate() {
            by_id
                .entry(episode.episode_id.as_str().to_string())
                .or_insert(index);
            by_number.entry(episode.number).or_insert(index);
        }
        Self {
            episodes,
            total_count,
            by_id,
            by_number,
        }
    }

    /// All known episodes, in upstream order.
    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    /// Authoritative episode count for the title.
    pub fn total_count(&self) -> u32 {
        self.total_count
    }

    /// Look up an episode by its raw identifier token.
    ///
    /// Absence is not an error; an unknown id simply yields `None` and the
    /// caller decides how to present it.
    pub fn find_by_episode_id(&self, episode_id: &str) -> Option<&Episode> {
        self.by_id.get(episode_id).map(|&index| &self.episodes[index])
    }

    /// Look up an episode by its number.
    pub fn find_by_number(&self, number: u32) -> Option<&Episode> {
        self.by_number
            .get(&number)
            .map(|&index| &self.episodes[index])
    }

    /// The episode numbered `current.number + 1`, when it exists.
    ///
    /// `None` means end of series or a numbering gap; either way there is no
    /// next-episode affordance to show.
    pub fn find_next(&self, current: &Episode) -> Option<&Episode> {
        current
            .number
            .checked_add(1)
            .and_then(|next| self.find_by_number(next))
    }
}
