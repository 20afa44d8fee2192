//! Ranking scales
//!
//! Ordinal quality classes for conferences (CORE ranks) and journals
//! (quartiles). Variants are declared worst-to-best so the derived `Ord`
//! follows the quality order, which the resolvers rely on when picking a
//! best class.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// CORE conference rank. `D` is the lowest published class, `AStarStar`
/// the highest; `NR` means not ranked and sorts below everything.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CoreRanking {
    NR,
    D,
    C,
    B,
    A,
    AStar,
    AStarStar,
}

impl CoreRanking {
    /// Display label as published by the CORE portal.
    pub const fn label(self) -> &'static str {
        match self {
            CoreRanking::NR => "NR",
            CoreRanking::D => "D",
            CoreRanking::C => "C",
            CoreRanking::B => "B",
            CoreRanking::A => "A",
            CoreRanking::AStar => "A*",
            CoreRanking::AStarStar => "A**",
        }
    }
}

impl fmt::Display for CoreRanking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CoreRanking {
    type Err = Error;

    /// Case-insensitive parse of the portal labels (`A**`, `A*`, `A`, `B`,
    /// `C`, `D`, `NR`) and their spelled-out aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A**" | "ASTARSTAR" | "A_STAR_STAR" => Ok(CoreRanking::AStarStar),
            "A*" | "ASTAR" | "A_STAR" => Ok(CoreRanking::AStar),
            "A" => Ok(CoreRanking::A),
            "B" => Ok(CoreRanking::B),
            "C" => Ok(CoreRanking::C),
            "D" => Ok(CoreRanking::D),
            "NR" => Ok(CoreRanking::NR),
            _ => Err(Error::InvalidInput(format!(
                "unknown CORE rank token: {s:?}"
            ))),
        }
    }
}

/// Journal quartile. `Q1` is the best quarter; `NR` means not ranked and
/// sorts below `Q4`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum QuartileRanking {
    NR,
    Q4,
    Q3,
    Q2,
    Q1,
}

impl QuartileRanking {
    pub const fn label(self) -> &'static str {
        match self {
            QuartileRanking::NR => "NR",
            QuartileRanking::Q4 => "Q4",
            QuartileRanking::Q3 => "Q3",
            QuartileRanking::Q2 => "Q2",
            QuartileRanking::Q1 => "Q1",
        }
    }
}

impl fmt::Display for QuartileRanking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for QuartileRanking {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "Q1" => Ok(QuartileRanking::Q1),
            "Q2" => Ok(QuartileRanking::Q2),
            "Q3" => Ok(QuartileRanking::Q3),
            "Q4" => Ok(QuartileRanking::Q4),
            "NR" => Ok(QuartileRanking::NR),
            _ => Err(Error::InvalidInput(format!(
                "unknown quartile token: {s:?}"
            ))),
        }
    }
}

/// Quality indicators known for one journal in one catalog year.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JournalRanking {
    /// Quartile per subject area, subject names lowercased.
    pub quartiles: std::collections::BTreeMap<String, QuartileRanking>,
    /// Best quartile across subject areas (the synthetic pseudo-subject).
    pub best_quartile: Option<QuartileRanking>,
    pub impact_factor: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_rank_order_follows_quality() {
        assert!(CoreRanking::AStarStar > CoreRanking::AStar);
        assert!(CoreRanking::AStar > CoreRanking::A);
        assert!(CoreRanking::A > CoreRanking::B);
        assert!(CoreRanking::B > CoreRanking::C);
        assert!(CoreRanking::C > CoreRanking::D);
        assert!(CoreRanking::D > CoreRanking::NR);
    }

    #[test]
    fn test_core_rank_parse_labels_and_aliases() {
        assert_eq!("a**".parse::<CoreRanking>().unwrap(), CoreRanking::AStarStar);
        assert_eq!("A*".parse::<CoreRanking>().unwrap(), CoreRanking::AStar);
        assert_eq!("astar".parse::<CoreRanking>().unwrap(), CoreRanking::AStar);
        assert_eq!("b".parse::<CoreRanking>().unwrap(), CoreRanking::B);
        assert_eq!(" nr ".parse::<CoreRanking>().unwrap(), CoreRanking::NR);
    }

    #[test]
    fn test_core_rank_parse_rejects_junk() {
        assert!(matches!(
            "A***".parse::<CoreRanking>(),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            "".parse::<CoreRanking>(),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_quartile_order_follows_quality() {
        assert!(QuartileRanking::Q1 > QuartileRanking::Q2);
        assert!(QuartileRanking::Q2 > QuartileRanking::Q3);
        assert!(QuartileRanking::Q3 > QuartileRanking::Q4);
        assert!(QuartileRanking::Q4 > QuartileRanking::NR);
    }

    #[test]
    fn test_quartile_parse() {
        assert_eq!("q2".parse::<QuartileRanking>().unwrap(), QuartileRanking::Q2);
        assert!(matches!(
            "Q5".parse::<QuartileRanking>(),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_labels_round_trip() {
        for rank in [
            CoreRanking::NR,
            CoreRanking::D,
            CoreRanking::C,
            CoreRanking::B,
            CoreRanking::A,
            CoreRanking::AStar,
            CoreRanking::AStarStar,
        ] {
            assert_eq!(rank.label().parse::<CoreRanking>().unwrap(), rank);
        }
    }
}
