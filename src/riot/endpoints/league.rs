use async_trait::async_trait;

use crate::riot::client::ApiClient;
use crate::riot::region::Platform;
use crate::riot::traits::{ApexLeague, LeagueApi};
use crate::riot::types::{LeagueEntryDto, LeagueListDto, RiotApiResponse};

#[async_trait]
impl LeagueApi for ApiClient {
    /// Get league entries (ranked info) for a player by PUUID.
    /// Uses platform routing (euw1, na1, kr, etc.). An empty list is a valid
    /// response for unranked players.
    async fn get_league_entries(
        &self,
        puuid: &str,
        platform: Platform,
    ) -> RiotApiResponse<Vec<LeagueEntryDto>> {
        tracing::trace!("[TFT-LEAGUE-V1 API] entries {} in {}", puuid, platform);

        let path = format!(
            "{}/tft/league/v1/entries/by-puuid/{}",
            platform.base_url(),
            puuid
        );

        self.request(path).await
    }

    /// Get one of the apex leagues (challenger/grandmaster/master) for cutoff
    /// computation.
    async fn get_apex_league(
        &self,
        league: ApexLeague,
        platform: Platform,
    ) -> RiotApiResponse<LeagueListDto> {
        tracing::trace!(
            "[TFT-LEAGUE-V1 API] {} league in {}",
            league.path_segment(),
            platform
        );

        let path = format!(
            "{}/tft/league/v1/{}",
            platform.base_url(),
            league.path_segment()
        );

        self.request(path).await
    }
}
