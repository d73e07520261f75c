use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RiotApiError {
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("HTTP status error: {0}")]
    Status(StatusCode),

    #[error("Decoding raw response error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// A call to Riot API can either result in a success with the success type or fail with a [`RiotApiError`].
pub type RiotApiResponse<T> = Result<T, RiotApiError>;

// ============================================================================
// Account-v1
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDto {
    pub puuid: String,
    pub game_name: Option<String>,
    pub tag_line: Option<String>,
}

impl AccountDto {
    /// Full riot id as `name#tag`, when the account still exposes both parts.
    pub fn riot_id(&self) -> Option<String> {
        match (&self.game_name, &self.tag_line) {
            (Some(name), Some(tag)) => Some(format!("{}#{}", name, tag)),
            _ => None,
        }
    }
}

// ============================================================================
// TFT-League-v1
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueEntryDto {
    pub queue_type: String,
    pub tier: String,
    pub rank: String,
    pub league_points: u32,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
}

impl LeagueEntryDto {
    pub fn is_ranked_tft(&self) -> bool {
        self.queue_type == "RANKED_TFT"
    }
}

/// Apex league response (challenger/grandmaster/master). Only the points of
/// each entry matter for cutoff computation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueListDto {
    pub entries: Vec<LeagueItemDto>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueItemDto {
    pub league_points: u32,
}

// ============================================================================
// TFT-Match-v1
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct MatchDto {
    pub metadata: MetadataDto,
    pub info: InfoDto,
}

impl MatchDto {
    pub fn participant(&self, puuid: &str) -> Option<&ParticipantDto> {
        self.info.participants.iter().find(|p| p.puuid == puuid)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetadataDto {
    pub match_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InfoDto {
    pub queue_id: u16,
    pub game_datetime: u64,
    pub participants: Vec<ParticipantDto>,
}

impl InfoDto {
    /// Whether placements form a permutation of `1..=N`. TFT guarantees this
    /// (no ties, no gaps); a violation means corrupt upstream data.
    pub fn has_valid_placements(&self) -> bool {
        let n = self.participants.len();
        let mut seen = vec![false; n];
        for p in &self.participants {
            let placement = p.placement as usize;
            if placement == 0 || placement > n || seen[placement - 1] {
                return false;
            }
            seen[placement - 1] = true;
        }
        true
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParticipantDto {
    pub puuid: String,
    pub placement: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn league_entry_queue_filtering() {
        let entry: LeagueEntryDto = serde_json::from_str(
            r#"{"queueType":"RANKED_TFT","tier":"GOLD","rank":"II","leaguePoints":50,"wins":20,"losses":10}"#,
        )
        .unwrap();
        assert!(entry.is_ranked_tft());
        assert_eq!(entry.league_points, 50);

        let turbo: LeagueEntryDto = serde_json::from_str(
            r#"{"queueType":"RANKED_TFT_TURBO","tier":"GOLD","rank":"II","leaguePoints":50}"#,
        )
        .unwrap();
        assert!(!turbo.is_ranked_tft());
        assert_eq!(turbo.wins, 0);
    }

    #[test]
    fn placement_permutation_check() {
        let make = |placements: &[u8]| InfoDto {
            queue_id: 1100,
            game_datetime: 0,
            participants: placements
                .iter()
                .map(|&placement| ParticipantDto {
                    puuid: format!("p{}", placement),
                    placement,
                })
                .collect(),
        };

        assert!(make(&[3, 1, 4, 2, 8, 6, 7, 5]).has_valid_placements());
        assert!(!make(&[1, 1, 3, 4, 5, 6, 7, 8]).has_valid_placements());
        assert!(!make(&[1, 2, 3, 4, 5, 6, 7, 9]).has_valid_placements());
    }

    #[test]
    fn riot_id_requires_both_parts() {
        let account = AccountDto {
            puuid: "x".into(),
            game_name: Some("Ada".into()),
            tag_line: None,
        };
        assert_eq!(account.riot_id(), None);
    }
}
