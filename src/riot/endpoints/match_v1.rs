use async_trait::async_trait;

use crate::riot::client::ApiClient;
use crate::riot::region::Region;
use crate::riot::traits::MatchApi;
use crate::riot::types::{MatchDto, RiotApiResponse};

#[async_trait]
impl MatchApi for ApiClient {
    /// Get the most recent match ids for a player, newest first.
    /// Uses regional routing (americas, europe, asia, sea).
    async fn get_match_ids(
        &self,
        puuid: &str,
        count: u8,
        region: Region,
    ) -> RiotApiResponse<Vec<String>> {
        tracing::trace!("[TFT-MATCH-V1 API] match ids {} in {:?}", puuid, region);

        let path = format!(
            "{}/tft/match/v1/matches/by-puuid/{}/ids?start=0&count={}",
            region.base_url(),
            puuid,
            count
        );

        self.request(path).await
    }

    /// Get match details by match ID.
    async fn get_match(&self, match_id: &str, region: Region) -> RiotApiResponse<MatchDto> {
        tracing::trace!("[TFT-MATCH-V1 API] get_match {} in {:?}", match_id, region);

        let path = format!("{}/tft/match/v1/matches/{}", region.base_url(), match_id);

        self.request(path).await
    }
}
