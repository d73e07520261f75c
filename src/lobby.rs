use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use tracing::warn;

use crate::config::Config;
use crate::elo::{self, AverageRank};
use crate::error::PipelineError;
use crate::identity::{IdentityResolver, UNKNOWN_PLAYER};
use crate::rank::{RankOracle, RankedStanding};
use crate::riot::region::{Platform, Region};
use crate::riot::traits::TftApiFull;
use crate::riot::types::ParticipantDto;

/// Indicator shown on most placement rows.
const TROPHY_INDICATOR: &str = "🏆";
/// Alternate indicator for a last-place finish.
const OUCH_INDICATOR: &str = "💀";
const LAST_PLACE: u8 = 8;

/// One participant row, placement-ordered inside [`LobbySummary`].
#[derive(Debug, Clone)]
pub struct PlacementLine {
    pub placement: u8,
    pub display_name: String,
    pub standing: Option<RankedStanding>,
}

impl PlacementLine {
    /// Rank icon key for the presentation layer ("GOLD", "UNRANKED", ...).
    pub fn rank_icon(&self) -> &'static str {
        match &self.standing {
            Some(standing) => standing.tier.as_str(),
            None => "UNRANKED",
        }
    }
}

/// Aggregated view of one match: placement rows plus the average lobby rank.
/// Computed fresh per request, never persisted.
#[derive(Debug, Clone)]
pub struct LobbySummary {
    pub match_id: String,
    pub game_datetime: u64,
    pub placements: Vec<PlacementLine>,
    pub average: AverageRank,
    /// How many participants actually contributed to the average.
    pub ranked_players: usize,
}

impl LobbySummary {
    /// Render the placement block. The requesting player's own row is matched
    /// name-insensitively and visually distinguished; a last-place finish
    /// swaps the trophy for the ouch indicator.
    pub fn format_lines(&self, requester: Option<&str>) -> String {
        let mut out = String::new();
        for line in &self.placements {
            let indicator = if line.placement == LAST_PLACE {
                OUCH_INDICATOR
            } else {
                TROPHY_INDICATOR
            };
            let name = if requester.is_some_and(|r| names_equal(r, &line.display_name)) {
                format!("**__{}__**", line.display_name)
            } else {
                line.display_name.clone()
            };
            out.push_str(&format!("{} **{}** - {}\n", indicator, line.placement, name));
        }
        out
    }

    /// Footer label, e.g. "GOLD II" or "Master+ 133 LP".
    pub fn average_label(&self) -> String {
        match self.average {
            AverageRank::MasterPlus { overflow_lp } => format!("Master+ {} LP", overflow_lp),
            rank => rank.to_string(),
        }
    }
}

/// Case, whitespace and underscore insensitive comparison used to spot the
/// requesting player among lobby display names.
pub fn names_equal(a: &str, b: &str) -> bool {
    fn canon(s: &str) -> String {
        s.chars()
            .filter(|c| *c != ' ' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect()
    }
    canon(a) == canon(b)
}

#[derive(Debug)]
pub struct LobbyAggregator<A> {
    api: Arc<A>,
    identity: IdentityResolver<A>,
    rank: RankOracle<A>,
    fan_out_limit: usize,
    participant_timeout: Duration,
}

impl<A: TftApiFull> LobbyAggregator<A> {
    pub fn new(api: Arc<A>, config: &Config) -> Self {
        Self {
            identity: IdentityResolver::new(api.clone()),
            rank: RankOracle::new(api.clone()),
            api,
            fan_out_limit: config.fan_out_limit,
            participant_timeout: config.participant_timeout,
        }
    }

    /// Fetch a match and aggregate every participant's standing into placement
    /// rows and an average lobby rank.
    ///
    /// All per-participant lookups (reverse identity + league entries) run
    /// concurrently, bounded by the configured fan-out limit; the output is
    /// sorted by placement so concurrency never shows in the ordering. The
    /// average divides by the ranked participants only; a fully unranked
    /// lobby reports [`PipelineError::InsufficientRankedData`].
    pub async fn summarize(
        &self,
        match_id: &str,
        platform: Platform,
    ) -> Result<LobbySummary, PipelineError> {
        let region = platform.to_region();
        let detail = self.api.get_match(match_id, region).await?;

        if !detail.info.has_valid_placements() {
            warn!(
                "match {} placements are not a permutation of 1..={}",
                match_id,
                detail.info.participants.len()
            );
        }

        let mut lines: Vec<PlacementLine> = stream::iter(detail.info.participants.iter())
            .map(|participant| self.fetch_participant(participant, platform, region))
            .buffer_unordered(self.fan_out_limit)
            .collect()
            .await;
        lines.sort_by_key(|line| line.placement);

        // The denominator starts at the actual participant count and loses
        // one per unranked participant.
        let mut ranked_players = lines.len();
        let mut elo_sum: u64 = 0;
        for line in &lines {
            match &line.standing {
                Some(standing) => elo_sum += u64::from(standing.elo()),
                None => ranked_players -= 1,
            }
        }
        if ranked_players == 0 {
            return Err(PipelineError::InsufficientRankedData);
        }

        let average = elo::from_elo(elo_sum as f64 / ranked_players as f64);

        Ok(LobbySummary {
            match_id: detail.metadata.match_id,
            game_datetime: detail.info.game_datetime,
            placements: lines,
            average,
            ranked_players,
        })
    }

    /// Resolve one participant's display name and standing, concurrently.
    /// Timeouts and upstream failures degrade the participant to
    /// unknown/unranked instead of failing the whole aggregation.
    async fn fetch_participant(
        &self,
        participant: &ParticipantDto,
        platform: Platform,
        region: Region,
    ) -> PlacementLine {
        let (name, standing) = futures::join!(
            tokio::time::timeout(
                self.participant_timeout,
                self.identity.display_name(&participant.puuid, region),
            ),
            tokio::time::timeout(
                self.participant_timeout,
                self.rank.ranked_standing(&participant.puuid, platform),
            ),
        );

        let display_name = name.unwrap_or_else(|_| UNKNOWN_PLAYER.to_string());
        let standing = match standing {
            Ok(Ok(standing)) => standing,
            Ok(Err(e)) => {
                warn!(
                    "league lookup failed for {}, counting as unranked: {}",
                    participant.puuid, e
                );
                None
            }
            Err(_) => {
                warn!(
                    "league lookup timed out for {}, counting as unranked",
                    participant.puuid
                );
                None
            }
        };

        PlacementLine {
            placement: participant.placement,
            display_name,
            standing,
        }
    }
}
