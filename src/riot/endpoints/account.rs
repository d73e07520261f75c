use async_trait::async_trait;

use crate::riot::client::ApiClient;
use crate::riot::region::Region;
use crate::riot::traits::AccountApi;
use crate::riot::types::{AccountDto, RiotApiResponse};

#[async_trait]
impl AccountApi for ApiClient {
    /// Get account by Riot ID (game name + tag line).
    /// Uses regional routing (americas, europe, asia, sea).
    async fn get_account_by_riot_id(
        &self,
        game_name: &str,
        tag_line: &str,
        region: Region,
    ) -> RiotApiResponse<AccountDto> {
        tracing::trace!("[ACCOUNT-V1 API] by-riot-id {}#{}", game_name, tag_line);

        let path = format!(
            "{}/riot/account/v1/accounts/by-riot-id/{}/{}",
            region.base_url(),
            urlencoding::encode(game_name),
            urlencoding::encode(tag_line)
        );

        self.request(path).await
    }

    /// Get account by PUUID, the reverse direction used for participant display.
    async fn get_account_by_puuid(
        &self,
        puuid: &str,
        region: Region,
    ) -> RiotApiResponse<AccountDto> {
        tracing::trace!("[ACCOUNT-V1 API] by-puuid {} in {:?}", puuid, region);

        let path = format!(
            "{}/riot/account/v1/accounts/by-puuid/{}",
            region.base_url(),
            puuid
        );

        self.request(path).await
    }
}
