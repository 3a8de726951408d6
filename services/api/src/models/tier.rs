//! Pricing/complexity tier classification

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coarse pricing/complexity tier applied to leads, projects, and users.
///
/// Stored as a closed set; unknown values are rejected at validation rather
/// than written through to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Low,
    Medium,
    High,
}

impl FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(format!("Unknown tier: {other}")),
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_tiers() {
        assert_eq!("low".parse::<Tier>(), Ok(Tier::Low));
        assert_eq!("Medium".parse::<Tier>(), Ok(Tier::Medium));
        assert_eq!(" high ".parse::<Tier>(), Ok(Tier::High));
    }

    #[test]
    fn rejects_unknown_tiers() {
        assert!("premium".parse::<Tier>().is_err());
        assert!("".parse::<Tier>().is_err());
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Tier::Low).unwrap(), "\"low\"");
        assert_eq!(Tier::High.to_string(), "high");
    }
}
