use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PracticeError;

/// A player's skill level, used as a cumulative filter over every table:
/// an intermediate player gets beginner and intermediate material, an
/// advanced player gets everything.
///
/// `basics` is accepted on input as another name for `beginner`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[serde(alias = "basics")]
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }

    /// True when material tagged `tag` is available at this skill level.
    pub fn includes(self, tag: Difficulty) -> bool {
        tag <= self
    }

    /// The skill level after this one, wrapping back to beginner.
    pub fn next(self) -> Difficulty {
        match self {
            Difficulty::Beginner => Difficulty::Intermediate,
            Difficulty::Intermediate => Difficulty::Advanced,
            Difficulty::Advanced => Difficulty::Beginner,
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Beginner
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = PracticeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" | "basics" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            _ => Err(PracticeError::UnknownDifficulty(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cumulative_filter() {
        assert!(Difficulty::Beginner.includes(Difficulty::Beginner));
        assert!(!Difficulty::Beginner.includes(Difficulty::Intermediate));
        assert!(Difficulty::Intermediate.includes(Difficulty::Beginner));
        assert!(!Difficulty::Intermediate.includes(Difficulty::Advanced));
        for tag in Difficulty::ALL {
            assert!(Difficulty::Advanced.includes(tag));
        }
    }

    #[test]
    fn test_parse_labels() {
        assert_eq!("beginner".parse::<Difficulty>().unwrap(), Difficulty::Beginner);
        assert_eq!("basics".parse::<Difficulty>().unwrap(), Difficulty::Beginner);
        assert_eq!("Advanced".parse::<Difficulty>().unwrap(), Difficulty::Advanced);
        assert_eq!(
            "expert".parse::<Difficulty>(),
            Err(PracticeError::UnknownDifficulty("expert".to_string()))
        );
    }

    #[test]
    fn test_serde_alias() {
        let d: Difficulty = serde_json::from_str("\"basics\"").unwrap();
        assert_eq!(d, Difficulty::Beginner);
        assert_eq!(serde_json::to_string(&d).unwrap(), "\"beginner\"");
    }

    #[test]
    fn test_next_cycles() {
        assert_eq!(Difficulty::Beginner.next(), Difficulty::Intermediate);
        assert_eq!(Difficulty::Intermediate.next(), Difficulty::Advanced);
        assert_eq!(Difficulty::Advanced.next(), Difficulty::Beginner);
    }
}
