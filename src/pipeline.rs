use std::sync::Arc;

use crate::config::Config;
use crate::error::PipelineError;
use crate::identity::IdentityResolver;
use crate::leaderboard::LeaderboardScanner;
use crate::lobby::{LobbyAggregator, LobbySummary};
use crate::locator::{MatchLocator, QueueFilter};
use crate::rank::{RankOracle, RankedStanding};
use crate::riot::client::ApiClient;
use crate::riot::region::Platform;
use crate::riot::traits::TftApiFull;

/// All pipeline components wired over one shared API client.
///
/// Construct once at process start and pass around by reference; components
/// hold no per-request state, so one `Pipeline` serves concurrent requests.
#[derive(Debug)]
pub struct Pipeline<A> {
    pub identity: IdentityResolver<A>,
    pub rank: RankOracle<A>,
    pub locator: MatchLocator<A>,
    pub lobby: LobbyAggregator<A>,
    pub leaderboard: LeaderboardScanner<A>,
}

impl Pipeline<ApiClient> {
    pub fn from_config(config: &Config) -> Self {
        Self::new(Arc::new(ApiClient::from_config(config)), config)
    }
}

impl<A: TftApiFull> Pipeline<A> {
    pub fn new(api: Arc<A>, config: &Config) -> Self {
        Self {
            identity: IdentityResolver::new(api.clone()),
            rank: RankOracle::new(api.clone()),
            locator: MatchLocator::new(api.clone()),
            lobby: LobbyAggregator::new(api.clone(), config),
            leaderboard: LeaderboardScanner::new(api, config),
        }
    }

    /// Turn a riot id into a summarized recent match: resolve the identity,
    /// locate the `occurrence`-th qualifying match, aggregate the lobby.
    pub async fn recent_match(
        &self,
        game_name: &str,
        tag_line: &str,
        filter: QueueFilter,
        occurrence: usize,
        platform: Platform,
    ) -> Result<LobbySummary, PipelineError> {
        let region = platform.to_region();
        let identity = self.identity.resolve(game_name, tag_line, region).await?;
        let match_id = self
            .locator
            .find_match(&identity.puuid, filter, occurrence, region)
            .await?;
        self.lobby.summarize(&match_id, platform).await
    }

    /// Current ranked standing of a riot id, `None` when unranked.
    pub async fn player_standing(
        &self,
        game_name: &str,
        tag_line: &str,
        platform: Platform,
    ) -> Result<Option<RankedStanding>, PipelineError> {
        let identity = self
            .identity
            .resolve(game_name, tag_line, platform.to_region())
            .await?;
        self.rank.ranked_standing(&identity.puuid, platform).await
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use reqwest::StatusCode;

    use super::*;
    use crate::riot::region::Region;
    use crate::riot::traits::{AccountApi, ApexLeague, LeagueApi, MatchApi};
    use crate::riot::types::{
        AccountDto, InfoDto, LeagueEntryDto, LeagueListDto, MatchDto, MetadataDto, ParticipantDto,
        RiotApiError, RiotApiResponse,
    };

    /// A fixed world: Ada#NA1 and seven GOLD II teammates plus one unranked
    /// player, with one ranked match and one hyper roll match on record.
    #[derive(Debug)]
    struct FakeWorld;

    const ADA_PUUID: &str = "puuid-ada";

    fn lobby_puuids() -> Vec<String> {
        let mut puuids = vec![ADA_PUUID.to_string()];
        puuids.extend((2..=7).map(|i| format!("puuid-{}", i)));
        puuids.push("puuid-fresh".to_string());
        puuids
    }

    #[async_trait]
    impl AccountApi for FakeWorld {
        async fn get_account_by_riot_id(
            &self,
            game_name: &str,
            tag_line: &str,
            _region: Region,
        ) -> RiotApiResponse<AccountDto> {
            if game_name == "Ada" && tag_line == "NA1" {
                Ok(AccountDto {
                    puuid: ADA_PUUID.into(),
                    game_name: Some("Ada".into()),
                    tag_line: Some("NA1".into()),
                })
            } else {
                Err(RiotApiError::Status(StatusCode::NOT_FOUND))
            }
        }

        async fn get_account_by_puuid(
            &self,
            puuid: &str,
            _region: Region,
        ) -> RiotApiResponse<AccountDto> {
            let name = match puuid {
                ADA_PUUID => "Ada".to_string(),
                "puuid-fresh" => "Fresh".to_string(),
                other => other.replace("puuid-", "Player "),
            };
            Ok(AccountDto {
                puuid: puuid.to_string(),
                game_name: Some(name),
                tag_line: Some("NA1".into()),
            })
        }
    }

    #[async_trait]
    impl LeagueApi for FakeWorld {
        async fn get_league_entries(
            &self,
            puuid: &str,
            _platform: Platform,
        ) -> RiotApiResponse<Vec<LeagueEntryDto>> {
            if puuid == "puuid-fresh" {
                return Ok(vec![]);
            }
            Ok(vec![LeagueEntryDto {
                queue_type: "RANKED_TFT".into(),
                tier: "GOLD".into(),
                rank: "II".into(),
                league_points: 50,
                wins: 30,
                losses: 10,
            }])
        }

        async fn get_apex_league(
            &self,
            _league: ApexLeague,
            _platform: Platform,
        ) -> RiotApiResponse<LeagueListDto> {
            Ok(LeagueListDto { entries: vec![] })
        }
    }

    #[async_trait]
    impl MatchApi for FakeWorld {
        async fn get_match_ids(
            &self,
            _puuid: &str,
            _count: u8,
            _region: Region,
        ) -> RiotApiResponse<Vec<String>> {
            // Newest first: a hyper roll game, then the ranked game.
            Ok(vec!["NA1_hyper".into(), "NA1_ranked".into()])
        }

        async fn get_match(&self, match_id: &str, _region: Region) -> RiotApiResponse<MatchDto> {
            let queue_id = match match_id {
                "NA1_hyper" => 1130,
                _ => 1100,
            };
            Ok(MatchDto {
                metadata: MetadataDto {
                    match_id: match_id.to_string(),
                },
                info: InfoDto {
                    queue_id,
                    game_datetime: 1_720_000_000_000,
                    participants: lobby_puuids()
                        .into_iter()
                        .enumerate()
                        .map(|(i, puuid)| ParticipantDto {
                            puuid,
                            placement: i as u8 + 1,
                        })
                        .collect(),
                },
            })
        }
    }

    fn pipeline() -> Pipeline<FakeWorld> {
        Pipeline::new(Arc::new(FakeWorld), &Config::default())
    }

    #[tokio::test]
    async fn recent_match_resolves_locates_and_summarizes() {
        let summary = pipeline()
            .recent_match("Ada", "NA1", QueueFilter::Ranked, 1, Platform::NA1)
            .await
            .unwrap();

        // The hyper roll game is skipped by the queue filter.
        assert_eq!(summary.match_id, "NA1_ranked");
        // 7 × (1400 + 50) / 7 = 1450 → floors to GOLD II.
        assert_eq!(summary.ranked_players, 7);
        assert_eq!(summary.average_label(), "GOLD II");
        assert!(
            summary
                .format_lines(Some("Ada#NA1"))
                .contains("**__Ada#NA1__**")
        );
    }

    #[tokio::test]
    async fn recent_match_respects_the_queue_filter() {
        let summary = pipeline()
            .recent_match("Ada", "NA1", QueueFilter::HyperRoll, 1, Platform::NA1)
            .await
            .unwrap();
        assert_eq!(summary.match_id, "NA1_hyper");

        let err = pipeline()
            .recent_match("Ada", "NA1", QueueFilter::DoubleUp, 1, Platform::NA1)
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::NoMatchingGames { .. }));
    }

    #[tokio::test]
    async fn unknown_riot_id_surfaces_identity_not_found() {
        let err = pipeline()
            .recent_match("Nobody", "EUW", QueueFilter::Ranked, 1, Platform::NA1)
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::IdentityNotFound { .. }));
    }

    #[tokio::test]
    async fn player_standing_resolves_then_fetches() {
        let standing = pipeline()
            .player_standing("Ada", "NA1", Platform::NA1)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(standing.label(), "GOLD II");
        assert_eq!(standing.total_games(), 40);
    }
}
