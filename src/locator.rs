use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::error::PipelineError;
use crate::riot::region::Region;
use crate::riot::traits::MatchApi;

/// How far back the locator looks through a player's history.
pub const MATCH_HISTORY_DEPTH: u8 = 20;

/// Queue ids strictly above this value belong to rotating special game modes
/// under Riot's current allocation scheme.
const GAME_MODE_THRESHOLD: u16 = 1165;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueueFilter {
    Ranked,
    Normal,
    HyperRoll,
    DoubleUp,
    /// Umbrella for all rotating game modes: accepts any queue id strictly
    /// above [`GAME_MODE_THRESHOLD`], covering future modes without
    /// enumerating each one.
    GameMode,
}

impl QueueFilter {
    pub fn accepts(&self, queue_id: u16) -> bool {
        match self {
            Self::Ranked => queue_id == 1100,
            Self::Normal => queue_id == 1090,
            Self::HyperRoll => queue_id == 1130,
            Self::DoubleUp => queue_id == 1160,
            Self::GameMode => queue_id > GAME_MODE_THRESHOLD,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ranked => "Ranked",
            Self::Normal => "Normal",
            Self::HyperRoll => "Hyper Roll",
            Self::DoubleUp => "Double Up",
            Self::GameMode => "Game Mode",
        }
    }
}

impl fmt::Display for QueueFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug)]
pub struct MatchLocator<A> {
    api: Arc<A>,
}

impl<A: MatchApi> MatchLocator<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// Locate the `occurrence`-th most recent match (1-indexed) whose queue
    /// matches `filter`, walking the history newest first.
    ///
    /// The three NotFound flavors are kept apart because user-facing messages
    /// differ: an account with no history at all, an account with history but
    /// no qualifying match, and a qualifying count smaller than `occurrence`.
    pub async fn find_match(
        &self,
        puuid: &str,
        filter: QueueFilter,
        occurrence: usize,
        region: Region,
    ) -> Result<String, PipelineError> {
        if occurrence == 0 || occurrence > MATCH_HISTORY_DEPTH as usize {
            return Err(PipelineError::OccurrenceOutOfRange {
                requested: occurrence,
                found: 0,
                scanned: 0,
            });
        }

        let ids = self
            .api
            .get_match_ids(puuid, MATCH_HISTORY_DEPTH, region)
            .await?;
        if ids.is_empty() {
            return Err(PipelineError::NoMatchHistory);
        }

        let mut found = 0usize;
        for id in &ids {
            let detail = self.api.get_match(id, region).await?;
            if filter.accepts(detail.info.queue_id) {
                found += 1;
                if found == occurrence {
                    debug!("located {} match {} for {}", filter, id, puuid);
                    return Ok(id.clone());
                }
            }
        }

        if found == 0 {
            Err(PipelineError::NoMatchingGames { queue: filter })
        } else {
            Err(PipelineError::OccurrenceOutOfRange {
                requested: occurrence,
                found,
                scanned: ids.len(),
            })
        }
    }
}
