use std::sync::Arc;

use futures::join;
use tracing::warn;

use crate::elo::{self, Division, Tier};
use crate::error::PipelineError;
use crate::riot::region::Platform;
use crate::riot::traits::{ApexLeague, LeagueApi};
use crate::riot::types::LeagueEntryDto;

/// Fixed population ranks used for cutoffs: the 250th and 750th highest LP
/// values over the pooled apex leagues, matching Riot's challenger and
/// grandmaster seat caps. These are absolute ranks, not percentiles.
const CHALLENGER_SEAT: usize = 250;
const GRANDMASTER_SEAT: usize = 750;
const CHALLENGER_FLOOR_LP: u32 = 500;
const GRANDMASTER_FLOOR_LP: u32 = 200;

/// A player's current ranked standing, typed at the deserialization boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankedStanding {
    pub tier: Tier,
    pub division: Division,
    pub league_points: u32,
    pub wins: u32,
    pub losses: u32,
}

impl RankedStanding {
    pub fn from_entry(entry: &LeagueEntryDto) -> Result<Self, elo::ParseRankError> {
        Ok(Self {
            tier: entry.tier.parse()?,
            division: entry.rank.parse()?,
            league_points: entry.league_points,
            wins: entry.wins,
            losses: entry.losses,
        })
    }

    pub fn elo(&self) -> u32 {
        elo::elo(self.tier, self.division, self.league_points)
    }

    pub fn total_games(&self) -> u32 {
        self.wins + self.losses
    }

    /// Share of games placed in the top four, as a percentage.
    pub fn top_four_rate(&self) -> f64 {
        let total = self.total_games();
        if total == 0 {
            0.0
        } else {
            self.wins as f64 / total as f64 * 100.0
        }
    }

    /// Standing as the API spells it, e.g. "GOLD II" or "MASTER I".
    pub fn label(&self) -> String {
        format!("{} {}", self.tier, self.division)
    }
}

/// LP thresholds for promotion into the two highest apex leagues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LpCutoffs {
    pub challenger: u32,
    pub grandmaster: u32,
}

#[derive(Debug)]
pub struct RankOracle<A> {
    api: Arc<A>,
}

impl<A: LeagueApi> RankOracle<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// Current RANKED_TFT standing of a player, or `None` for unranked
    /// players. An empty entry list is a valid, expected state.
    pub async fn ranked_standing(
        &self,
        puuid: &str,
        platform: Platform,
    ) -> Result<Option<RankedStanding>, PipelineError> {
        let entries = self.api.get_league_entries(puuid, platform).await?;
        Ok(ranked_tft_standing(&entries))
    }

    /// Compute the challenger and grandmaster LP cutoffs by pooling all apex
    /// league points. Below the minimum apex population the floors apply.
    pub async fn cutoffs(&self, platform: Platform) -> Result<LpCutoffs, PipelineError> {
        let (challenger, grandmaster, master) = join!(
            self.api.get_apex_league(ApexLeague::Challenger, platform),
            self.api.get_apex_league(ApexLeague::Grandmaster, platform),
            self.api.get_apex_league(ApexLeague::Master, platform),
        );

        let mut points: Vec<u32> = [challenger?, grandmaster?, master?]
            .iter()
            .flat_map(|league| league.entries.iter().map(|entry| entry.league_points))
            .collect();
        points.sort_unstable_by(|a, b| b.cmp(a));

        Ok(LpCutoffs {
            challenger: points
                .get(CHALLENGER_SEAT - 1)
                .copied()
                .unwrap_or(0)
                .max(CHALLENGER_FLOOR_LP),
            grandmaster: points
                .get(GRANDMASTER_SEAT - 1)
                .copied()
                .unwrap_or(0)
                .max(GRANDMASTER_FLOOR_LP),
        })
    }
}

/// Pick the RANKED_TFT entry out of a player's league entries. Entries with
/// rank strings this crate cannot parse are skipped as unranked.
pub fn ranked_tft_standing(entries: &[LeagueEntryDto]) -> Option<RankedStanding> {
    let entry = entries.iter().find(|entry| entry.is_ranked_tft())?;
    match RankedStanding::from_entry(entry) {
        Ok(standing) => Some(standing),
        Err(e) => {
            warn!(
                "ignoring unparseable ranked entry {} {}: {}",
                entry.tier, entry.rank, e
            );
            None
        }
    }
}
