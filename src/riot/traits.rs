use std::fmt::Debug;

use async_trait::async_trait;

use super::region::{Platform, Region};
use super::types::{AccountDto, LeagueEntryDto, LeagueListDto, MatchDto, RiotApiResponse};

/// Apex league buckets served by dedicated TFT-League-v1 routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApexLeague {
    Challenger,
    Grandmaster,
    Master,
}

impl ApexLeague {
    pub fn path_segment(&self) -> &'static str {
        match self {
            Self::Challenger => "challenger",
            Self::Grandmaster => "grandmaster",
            Self::Master => "master",
        }
    }
}

/// Riot Account-v1 API as described in the official documentation.
#[async_trait]
pub trait AccountApi: Send + Sync + Debug {
    async fn get_account_by_riot_id(
        &self,
        game_name: &str,
        tag_line: &str,
        region: Region,
    ) -> RiotApiResponse<AccountDto>;

    async fn get_account_by_puuid(
        &self,
        puuid: &str,
        region: Region,
    ) -> RiotApiResponse<AccountDto>;
}

/// TFT-League-v1 API surface needed by the pipeline.
#[async_trait]
pub trait LeagueApi: Send + Sync + Debug {
    async fn get_league_entries(
        &self,
        puuid: &str,
        platform: Platform,
    ) -> RiotApiResponse<Vec<LeagueEntryDto>>;

    async fn get_apex_league(
        &self,
        league: ApexLeague,
        platform: Platform,
    ) -> RiotApiResponse<LeagueListDto>;
}

/// TFT-Match-v1 API surface needed by the pipeline.
#[async_trait]
pub trait MatchApi: Send + Sync + Debug {
    async fn get_match_ids(
        &self,
        puuid: &str,
        count: u8,
        region: Region,
    ) -> RiotApiResponse<Vec<String>>;

    async fn get_match(&self, match_id: &str, region: Region) -> RiotApiResponse<MatchDto>;
}

/// All APIs required for the entire TFT scope of the pipeline.
pub trait TftApiFull: AccountApi + LeagueApi + MatchApi {}

impl<T: AccountApi + LeagueApi + MatchApi> TftApiFull for T {}
