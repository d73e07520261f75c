use thiserror::Error;

use crate::locator::QueueFilter;
use crate::riot::types::RiotApiError;

/// Every failure kind the pipeline can surface. Presentation code decides how
/// to render each kind; nothing here is meant to crash a caller.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Riot API error: {0}")]
    Api(#[from] RiotApiError),

    #[error("Player not found: {game_name}#{tag_line}")]
    IdentityNotFound { game_name: String, tag_line: String },

    #[error("No match history found for this account")]
    NoMatchHistory,

    #[error("No recent {queue} matches found")]
    NoMatchingGames { queue: QueueFilter },

    #[error(
        "No match found at occurrence {requested}: {found} qualifying matches in the last {scanned} games"
    )]
    OccurrenceOutOfRange {
        requested: usize,
        found: usize,
        scanned: usize,
    },

    #[error("All participants are unranked, the lobby average is undefined")]
    InsufficientRankedData,

    #[error("Invalid region: {0}")]
    InvalidRegion(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
