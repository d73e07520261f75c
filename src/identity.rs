use std::sync::Arc;

use tracing::debug;

use crate::error::PipelineError;
use crate::riot::region::Region;
use crate::riot::traits::AccountApi;

/// Placeholder shown when a participant's account can no longer be resolved.
pub const UNKNOWN_PLAYER: &str = "Unknown Player";

/// Durable player identity. The `puuid` is the stable key; `game_name` and
/// `tag_line` form a mutable display identifier that can collide after
/// renames, so the reverse mapping is never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerIdentity {
    pub game_name: String,
    pub tag_line: String,
    pub puuid: String,
}

impl PlayerIdentity {
    pub fn riot_id(&self) -> String {
        format!("{}#{}", self.game_name, self.tag_line)
    }
}

#[derive(Debug)]
pub struct IdentityResolver<A> {
    api: Arc<A>,
}

impl<A: AccountApi> IdentityResolver<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// Resolve a display riot id to a durable identity.
    ///
    /// Any transport or status failure is reported as
    /// [`PipelineError::IdentityNotFound`]: an unresolvable handle is a
    /// normal, displayable outcome for callers, never a fatal error.
    pub async fn resolve(
        &self,
        game_name: &str,
        tag_line: &str,
        region: Region,
    ) -> Result<PlayerIdentity, PipelineError> {
        match self
            .api
            .get_account_by_riot_id(game_name, tag_line, region)
            .await
        {
            Ok(account) => Ok(PlayerIdentity {
                game_name: account.game_name.unwrap_or_else(|| game_name.to_string()),
                tag_line: account.tag_line.unwrap_or_else(|| tag_line.to_string()),
                puuid: account.puuid,
            }),
            Err(e) => {
                debug!(
                    "could not resolve PUUID for {}#{}: {}",
                    game_name, tag_line, e
                );
                Err(PipelineError::IdentityNotFound {
                    game_name: game_name.to_string(),
                    tag_line: tag_line.to_string(),
                })
            }
        }
    }

    /// Reverse lookup used for participant display. Failures fall back to
    /// [`UNKNOWN_PLAYER`] instead of aborting the caller.
    pub async fn display_name(&self, puuid: &str, region: Region) -> String {
        match self.api.get_account_by_puuid(puuid, region).await {
            Ok(account) => account
                .riot_id()
                .unwrap_or_else(|| UNKNOWN_PLAYER.to_string()),
            Err(e) => {
                debug!("could not resolve display name for {}: {}", puuid, e);
                UNKNOWN_PLAYER.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use reqwest::StatusCode;

    use super::*;
    use crate::riot::types::{AccountDto, RiotApiError, RiotApiResponse};

    #[derive(Debug)]
    struct FakeAccounts {
        fail: bool,
    }

    #[async_trait]
    impl AccountApi for FakeAccounts {
        async fn get_account_by_riot_id(
            &self,
            game_name: &str,
            tag_line: &str,
            _region: Region,
        ) -> RiotApiResponse<AccountDto> {
            if self.fail {
                return Err(RiotApiError::Status(StatusCode::NOT_FOUND));
            }
            Ok(AccountDto {
                puuid: "puuid-1".into(),
                game_name: Some(game_name.to_string()),
                tag_line: Some(tag_line.to_string()),
            })
        }

        async fn get_account_by_puuid(
            &self,
            puuid: &str,
            _region: Region,
        ) -> RiotApiResponse<AccountDto> {
            if self.fail {
                return Err(RiotApiError::Status(StatusCode::INTERNAL_SERVER_ERROR));
            }
            Ok(AccountDto {
                puuid: puuid.to_string(),
                game_name: Some("Ada".into()),
                tag_line: None,
            })
        }
    }

    #[tokio::test]
    async fn resolve_returns_identity() {
        let resolver = IdentityResolver::new(Arc::new(FakeAccounts { fail: false }));

        let identity = resolver
            .resolve("Ada", "NA1", Region::Americas)
            .await
            .unwrap();

        assert_eq!(identity.puuid, "puuid-1");
        assert_eq!(identity.riot_id(), "Ada#NA1");
    }

    #[tokio::test]
    async fn resolve_maps_any_failure_to_identity_not_found() {
        let resolver = IdentityResolver::new(Arc::new(FakeAccounts { fail: true }));

        let err = resolver
            .resolve("Ada", "NA1", Region::Americas)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PipelineError::IdentityNotFound { game_name, tag_line }
                if game_name == "Ada" && tag_line == "NA1"
        ));
    }

    #[tokio::test]
    async fn display_name_falls_back_to_placeholder() {
        let resolver = IdentityResolver::new(Arc::new(FakeAccounts { fail: true }));
        assert_eq!(
            resolver.display_name("puuid-1", Region::Americas).await,
            UNKNOWN_PLAYER
        );

        // A resolvable account with a missing tag line is also unusable for display.
        let resolver = IdentityResolver::new(Arc::new(FakeAccounts { fail: false }));
        assert_eq!(
            resolver.display_name("puuid-1", Region::Americas).await,
            UNKNOWN_PLAYER
        );
    }
}
