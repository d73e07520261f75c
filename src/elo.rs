//! Conversion between ranked standings and a single numeric elo scale.
//!
//! Sub-apex divisions advance in 100 point steps from IRON IV = 0 up to
//! DIAMOND I = 2700. The three apex tiers share a single base of 2800 with
//! league points carried on top as unbounded overflow, so elo alone cannot
//! distinguish Master from Challenger; lobby averaging only needs the
//! division bucket.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Elo value shared by all apex tiers.
pub const APEX_BASE: u32 = 2800;

/// Base of the highest sub-apex division (DIAMOND I).
const TOP_DIVISION_BASE: u32 = 2700;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown rank component: {0}")]
pub struct ParseRankError(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    Iron,
    Bronze,
    Silver,
    Gold,
    Platinum,
    Emerald,
    Diamond,
    Master,
    Grandmaster,
    Challenger,
}

impl Tier {
    /// Sub-apex tiers in ascending order, used for bucket inversion.
    const LADDER: [Self; 7] = [
        Self::Iron,
        Self::Bronze,
        Self::Silver,
        Self::Gold,
        Self::Platinum,
        Self::Emerald,
        Self::Diamond,
    ];

    pub fn is_apex(&self) -> bool {
        matches!(self, Self::Master | Self::Grandmaster | Self::Challenger)
    }

    fn base(&self) -> u32 {
        match self {
            Self::Iron => 0,
            Self::Bronze => 400,
            Self::Silver => 800,
            Self::Gold => 1200,
            Self::Platinum => 1600,
            Self::Emerald => 2000,
            Self::Diamond => 2400,
            Self::Master | Self::Grandmaster | Self::Challenger => APEX_BASE,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Iron => "IRON",
            Self::Bronze => "BRONZE",
            Self::Silver => "SILVER",
            Self::Gold => "GOLD",
            Self::Platinum => "PLATINUM",
            Self::Emerald => "EMERALD",
            Self::Diamond => "DIAMOND",
            Self::Master => "MASTER",
            Self::Grandmaster => "GRANDMASTER",
            Self::Challenger => "CHALLENGER",
        }
    }
}

impl FromStr for Tier {
    type Err = ParseRankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "IRON" => Ok(Self::Iron),
            "BRONZE" => Ok(Self::Bronze),
            "SILVER" => Ok(Self::Silver),
            "GOLD" => Ok(Self::Gold),
            "PLATINUM" => Ok(Self::Platinum),
            "EMERALD" => Ok(Self::Emerald),
            "DIAMOND" => Ok(Self::Diamond),
            "MASTER" => Ok(Self::Master),
            "GRANDMASTER" => Ok(Self::Grandmaster),
            "CHALLENGER" => Ok(Self::Challenger),
            other => Err(ParseRankError(other.to_string())),
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Division {
    I,
    II,
    III,
    IV,
}

impl Division {
    /// Divisions in ascending order (IV is the entry division of a tier).
    const LADDER: [Self; 4] = [Self::IV, Self::III, Self::II, Self::I];

    fn offset(&self) -> u32 {
        match self {
            Self::IV => 0,
            Self::III => 100,
            Self::II => 200,
            Self::I => 300,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::I => "I",
            Self::II => "II",
            Self::III => "III",
            Self::IV => "IV",
        }
    }
}

impl FromStr for Division {
    type Err = ParseRankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "I" => Ok(Self::I),
            "II" => Ok(Self::II),
            "III" => Ok(Self::III),
            "IV" => Ok(Self::IV),
            other => Err(ParseRankError(other.to_string())),
        }
    }
}

impl fmt::Display for Division {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Map a standing to its elo score. Apex tiers collapse to [`APEX_BASE`] and
/// ignore the division, which Riot reports as a fixed "I".
pub fn elo(tier: Tier, division: Division, league_points: u32) -> u32 {
    if tier.is_apex() {
        APEX_BASE + league_points
    } else {
        tier.base() + division.offset() + league_points
    }
}

/// Human-readable bucket an averaged elo falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AverageRank {
    Division { tier: Tier, division: Division },
    MasterPlus { overflow_lp: u32 },
}

impl AverageRank {
    pub fn overflow_lp(&self) -> u32 {
        match self {
            Self::Division { .. } => 0,
            Self::MasterPlus { overflow_lp } => *overflow_lp,
        }
    }
}

impl fmt::Display for AverageRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Division { tier, division } => write!(f, "{} {}", tier, division),
            Self::MasterPlus { .. } => write!(f, "Master+"),
        }
    }
}

/// Invert an averaged elo back into a division bucket.
///
/// Averages strictly above [`APEX_BASE`] report as Master+ with the rounded
/// overflow; everything else floors to the division boundary below it, so the
/// result names the lobby's weakest fully-qualified division. An average of
/// exactly 2800 still floors into the DIAMOND I bucket.
pub fn from_elo(average: f64) -> AverageRank {
    if average > APEX_BASE as f64 {
        return AverageRank::MasterPlus {
            overflow_lp: (average - APEX_BASE as f64).round() as u32,
        };
    }

    let bucket = (average.max(0.0) as u32 / 100 * 100).min(TOP_DIVISION_BASE);
    let tier = Tier::LADDER[(bucket / 400) as usize];
    let division = Division::LADDER[(bucket % 400 / 100) as usize];
    AverageRank::Division { tier, division }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sub_apex_ladder_increases_in_hundred_point_steps() {
        let mut expected = 0;
        for tier in Tier::LADDER {
            for division in Division::LADDER {
                assert_eq!(elo(tier, division, 0), expected);
                expected += 100;
            }
        }
        // The ladder tops out right below the apex base.
        assert_eq!(expected, APEX_BASE);
    }

    #[test]
    fn apex_tiers_collapse_to_shared_base() {
        assert_eq!(elo(Tier::Master, Division::I, 50), 2850);
        assert_eq!(elo(Tier::Grandmaster, Division::I, 50), 2850);
        assert_eq!(elo(Tier::Challenger, Division::I, 50), 2850);
    }

    #[test]
    fn from_elo_floors_to_division_boundary() {
        assert_eq!(
            from_elo(2799.0),
            AverageRank::Division {
                tier: Tier::Diamond,
                division: Division::I
            }
        );
        assert_eq!(
            from_elo(2800.0),
            AverageRank::Division {
                tier: Tier::Diamond,
                division: Division::I
            }
        );
        assert_eq!(from_elo(2801.0), AverageRank::MasterPlus { overflow_lp: 1 });

        assert_eq!(
            from_elo(2750.0),
            AverageRank::Division {
                tier: Tier::Diamond,
                division: Division::I
            }
        );
        assert_eq!(
            from_elo(1450.0),
            AverageRank::Division {
                tier: Tier::Gold,
                division: Division::II
            }
        );
        assert_eq!(
            from_elo(0.0),
            AverageRank::Division {
                tier: Tier::Iron,
                division: Division::IV
            }
        );
    }

    #[test]
    fn master_plus_overflow_rounds() {
        assert_eq!(
            from_elo(2933.4),
            AverageRank::MasterPlus { overflow_lp: 133 }
        );
        assert_eq!(from_elo(2933.4).overflow_lp(), 133);
    }

    #[test]
    fn display_matches_api_labels() {
        assert_eq!(
            AverageRank::Division {
                tier: Tier::Gold,
                division: Division::II
            }
            .to_string(),
            "GOLD II"
        );
        assert_eq!(
            AverageRank::MasterPlus { overflow_lp: 42 }.to_string(),
            "Master+"
        );
    }

    #[test]
    fn rank_components_parse_from_api_strings() {
        assert_eq!("GOLD".parse::<Tier>().unwrap(), Tier::Gold);
        assert_eq!("grandmaster".parse::<Tier>().unwrap(), Tier::Grandmaster);
        assert!("CHALLENGEJOUR".parse::<Tier>().is_err());

        assert_eq!("IV".parse::<Division>().unwrap(), Division::IV);
        assert!("V".parse::<Division>().is_err());
    }
}
