use std::fmt;

use serde::{Deserialize, Serialize};

use crate::difficulty::Difficulty;
use crate::exercises::picker::{pick_index, regenerate, RandomSource, Tiered};

/// Highest fret a custom range may reach.
pub const MAX_GUITAR_FRET: u8 = 24;

/// Fret limits start anywhere in `0..=16`.
const FRET_LIMIT_START_CHOICES: usize = 17;
const FRET_LIMIT_MIN_SPAN: u8 = 4;
const FRET_LIMIT_SPAN_CHOICES: usize = 2;

pub static STRING_NAMES: [&str; 6] = ["Low E", "A", "D", "G", "B", "High E"];

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FretRange {
    pub id: String,
    pub name: String,
    pub min_fret: u8,
    pub max_fret: u8,
    pub description: String,
    pub difficulty: Difficulty,
}

impl Tiered for FretRange {
    fn tier(&self) -> Difficulty {
        self.difficulty
    }
}

/// A range of `span` frets starting at `min_fret`, capped at the last fret
/// of the neck.
pub fn custom_fret_range(min_fret: u8, span: u8) -> FretRange {
    let max_fret = (min_fret as u16 + span.max(1) as u16 - 1).min(MAX_GUITAR_FRET as u16) as u8;
    let difficulty = if min_fret > 7 {
        Difficulty::Advanced
    } else if min_fret > 3 {
        Difficulty::Intermediate
    } else {
        Difficulty::Beginner
    };

    FretRange {
        id: format!("custom-{}-{}", min_fret, max_fret),
        name: format!("Frets {}-{}", min_fret, max_fret),
        min_fret,
        max_fret,
        description: format!("Custom fret range from fret {} to {}", min_fret, max_fret),
        difficulty,
    }
}

/// A randomly placed window of frets to stay within.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct FretLimit {
    pub start: u8,
    pub end: u8,
}

impl fmt::Display for FretLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

fn draw_fret_limit<R: RandomSource + ?Sized>(rng: &mut R) -> FretLimit {
    let start = pick_index(rng, FRET_LIMIT_START_CHOICES) as u8;
    let span = FRET_LIMIT_MIN_SPAN + pick_index(rng, FRET_LIMIT_SPAN_CHOICES) as u8;
    FretLimit {
        start,
        end: start + span,
    }
}

pub fn random_fret_limit<R: RandomSource + ?Sized>(
    rng: &mut R,
    previous: Option<&FretLimit>,
    max_attempts: usize,
) -> FretLimit {
    regenerate(rng, max_attempts, draw_fret_limit, |candidate| {
        previous == Some(candidate)
    })
}

/// Adjacent strings to stay on, low to high.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct StringLimit {
    pub strings: Vec<&'static str>,
}

impl fmt::Display for StringLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.strings.join(", "))
    }
}

/// Every window of three adjacent strings, then every window of two.
pub fn string_groups() -> Vec<StringLimit> {
    [3, 2]
        .iter()
        .flat_map(|&size| STRING_NAMES.windows(size))
        .map(|window| StringLimit {
            strings: window.to_vec(),
        })
        .collect()
}

pub fn random_string_limit<R: RandomSource + ?Sized>(
    rng: &mut R,
    previous: Option<&StringLimit>,
    max_attempts: usize,
) -> StringLimit {
    let groups = string_groups();
    regenerate(
        rng,
        max_attempts,
        |rng| groups[pick_index(rng, groups.len())].clone(),
        |candidate| previous == Some(candidate),
    )
}

fn fret_range(
    id: &str,
    name: &str,
    min_fret: u8,
    max_fret: u8,
    description: &str,
    difficulty: Difficulty,
) -> FretRange {
    FretRange {
        id: id.to_string(),
        name: name.to_string(),
        min_fret,
        max_fret,
        description: description.to_string(),
        difficulty,
    }
}

pub fn standard_fret_ranges() -> Vec<FretRange> {
    use Difficulty::{Advanced, Beginner, Intermediate};

    vec![
        fret_range(
            "open-position",
            "Open Position",
            0,
            3,
            "The first position on the neck, including open strings",
            Beginner,
        ),
        fret_range(
            "first-position",
            "First Position",
            1,
            4,
            "The standard first position without open strings",
            Beginner,
        ),
        fret_range(
            "second-position",
            "Second Position",
            2,
            5,
            "Second position on the neck",
            Beginner,
        ),
        fret_range(
            "third-position",
            "Third Position",
            3,
            6,
            "Third position on the neck",
            Intermediate,
        ),
        fret_range(
            "fifth-position",
            "Fifth Position",
            5,
            8,
            "Fifth position on the neck",
            Intermediate,
        ),
        fret_range("middle-neck", "Middle Neck", 4, 9, "Middle part of the neck", Intermediate),
        fret_range(
            "seventh-position",
            "Seventh Position",
            7,
            10,
            "Seventh position on the neck",
            Advanced,
        ),
        fret_range(
            "ninth-position",
            "Ninth Position",
            9,
            12,
            "Ninth position on the neck",
            Advanced,
        ),
        fret_range(
            "higher-position",
            "Higher Position",
            12,
            15,
            "Higher position on the neck, near the cutaway",
            Advanced,
        ),
        fret_range(
            "full-neck",
            "Full Neck",
            0,
            15,
            "The entire playable range of the neck",
            Advanced,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercises::picker::{available, ScriptedSource, MAX_REGEN_ATTEMPTS};

    #[test]
    fn test_fret_range_table() {
        let table = standard_fret_ranges();
        assert_eq!(table.len(), 10);
        assert!(table.iter().all(|r| r.min_fret <= r.max_fret));
        assert_eq!(available(&table, Difficulty::Beginner).len(), 3);
        assert_eq!(available(&table, Difficulty::Intermediate).len(), 6);
    }

    #[test]
    fn test_custom_fret_range() {
        let r = custom_fret_range(5, 4);
        assert_eq!((r.min_fret, r.max_fret), (5, 8));
        assert_eq!(r.id, "custom-5-8");
        assert_eq!(r.name, "Frets 5-8");
        assert_eq!(r.difficulty, Difficulty::Intermediate);

        assert_eq!(custom_fret_range(0, 4).difficulty, Difficulty::Beginner);
        assert_eq!(custom_fret_range(8, 4).difficulty, Difficulty::Advanced);
        assert_eq!(custom_fret_range(22, 6).max_fret, MAX_GUITAR_FRET);
    }

    #[test]
    fn test_fret_limit_window() {
        let mut rng = ScriptedSource::new(&[0.0, 0.0, 0.999, 0.999]);
        let low = random_fret_limit(&mut rng, None, MAX_REGEN_ATTEMPTS);
        assert_eq!(low, FretLimit { start: 0, end: 4 });
        let high = random_fret_limit(&mut rng, None, MAX_REGEN_ATTEMPTS);
        assert_eq!(high, FretLimit { start: 16, end: 21 });
        assert_eq!(high.to_string(), "16-21");
    }

    #[test]
    fn test_fret_limit_avoids_previous() {
        let previous = FretLimit { start: 0, end: 4 };
        let mut rng = ScriptedSource::new(&[0.0, 0.0, 0.5, 0.5]);
        let next = random_fret_limit(&mut rng, Some(&previous), MAX_REGEN_ATTEMPTS);
        assert_eq!(next, FretLimit { start: 8, end: 13 });
    }

    #[test]
    fn test_string_groups() {
        let groups = string_groups();
        assert_eq!(groups.len(), 9);
        assert_eq!(groups[0].to_string(), "Low E, A, D");
        assert_eq!(groups[3].to_string(), "G, B, High E");
        assert_eq!(groups[4].to_string(), "Low E, A");
        assert_eq!(groups[8].to_string(), "B, High E");
    }

    #[test]
    fn test_string_limit_avoids_previous() {
        let groups = string_groups();
        let mut rng = ScriptedSource::new(&[0.0, 0.0, 0.95]);
        let next = random_string_limit(&mut rng, Some(&groups[0]), MAX_REGEN_ATTEMPTS);
        assert_eq!(next, groups[8]);
        assert_eq!(rng.draws, 3);
    }
}
