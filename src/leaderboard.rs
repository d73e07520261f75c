use std::cmp::Reverse;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::warn;

use crate::config::Config;
use crate::identity::PlayerIdentity;
use crate::lobby::names_equal;
use crate::rank::{RankOracle, RankedStanding};
use crate::riot::region::Platform;
use crate::riot::traits::LeagueApi;

/// One registered player to include in a scan.
#[derive(Debug, Clone)]
pub struct RegisteredPlayer {
    pub identity: PlayerIdentity,
    pub platform: Platform,
}

#[derive(Debug, Clone)]
pub struct LeaderboardRow {
    pub identity: PlayerIdentity,
    pub platform: Platform,
    pub standing: Option<RankedStanding>,
}

impl LeaderboardRow {
    pub fn elo(&self) -> Option<u32> {
        self.standing.map(|standing| standing.elo())
    }

    /// Render one leaderboard line, bolding the requesting player's row.
    pub fn format(&self, position: usize, requester: Option<&str>) -> String {
        let name = self.identity.riot_id();
        let body = match &self.standing {
            Some(standing) => format!(
                "{}: {} • {} LP",
                name,
                standing.label(),
                standing.league_points
            ),
            None => format!("{}: UNRANKED", name),
        };
        if requester.is_some_and(|r| names_equal(r, &name)) {
            format!("**{}** - **__{}__**", position, body)
        } else {
            format!("**{}** - {}", position, body)
        }
    }
}

/// Scans the standings of every registered player, bounded by the configured
/// concurrency ceiling so batch operations respect upstream rate limits.
#[derive(Debug)]
pub struct LeaderboardScanner<A> {
    rank: RankOracle<A>,
    concurrency: usize,
}

impl<A: LeagueApi> LeaderboardScanner<A> {
    pub fn new(api: Arc<A>, config: &Config) -> Self {
        Self {
            rank: RankOracle::new(api),
            concurrency: config.fan_out_limit,
        }
    }

    /// Fetch every player's standing concurrently and order rows by elo
    /// descending. Unranked players (and failed lookups, which degrade to
    /// unranked) sink to the bottom; ties keep the input order.
    pub async fn scan(&self, players: Vec<RegisteredPlayer>) -> Vec<LeaderboardRow> {
        let mut rows: Vec<LeaderboardRow> = stream::iter(players)
            .map(|player| async move {
                let standing = match self
                    .rank
                    .ranked_standing(&player.identity.puuid, player.platform)
                    .await
                {
                    Ok(standing) => standing,
                    Err(e) => {
                        warn!(
                            "standing fetch failed for {}, listing as unranked: {}",
                            player.identity.riot_id(),
                            e
                        );
                        None
                    }
                };
                LeaderboardRow {
                    identity: player.identity,
                    platform: player.platform,
                    standing,
                }
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        rows.sort_by_key(|row| Reverse(row.elo().map_or(-1, i64::from)));
        rows
    }
}
