//! Match resolution and lobby average rank pipeline for Teamfight Tactics.
//!
//! The crate turns "a player name" into "a resolved match plus a normalized
//! lobby rank estimate": resolve the riot id to a PUUID, locate the wanted
//! match in recent history by queue type, fetch every participant's ranked
//! standing concurrently and fold the standings into a single average
//! division bucket. Presentation layers (chat bots, web frontends) consume
//! the typed results; nothing here renders UI or persists state.

pub mod config;
pub mod elo;
pub mod error;
pub mod identity;
pub mod leaderboard;
pub mod lobby;
pub mod locator;
pub mod logging;
pub mod pipeline;
pub mod rank;
pub mod riot;

pub use config::Config;
pub use elo::{AverageRank, Division, Tier};
pub use error::PipelineError;
pub use identity::{IdentityResolver, PlayerIdentity};
pub use leaderboard::{LeaderboardRow, LeaderboardScanner, RegisteredPlayer};
pub use lobby::{LobbyAggregator, LobbySummary, PlacementLine, names_equal};
pub use locator::{MatchLocator, QueueFilter};
pub use pipeline::Pipeline;
pub use rank::{LpCutoffs, RankOracle, RankedStanding};
pub use riot::{ApiClient, Platform, Region};
