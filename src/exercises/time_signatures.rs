use serde::Serialize;

use crate::difficulty::Difficulty;
use crate::exercises::picker::Tiered;

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimeSignature {
    pub id: String,
    /// Display form, e.g. `6/8`.
    pub name: String,
    /// Beats per measure.
    pub upper: u8,
    /// Beat unit.
    pub lower: u8,
    pub description: String,
    pub difficulty: Difficulty,
    pub common_in: Vec<String>,
}

impl Tiered for TimeSignature {
    fn tier(&self) -> Difficulty {
        self.difficulty
    }
}

impl TimeSignature {
    /// Compound meters group their beats in threes.
    pub fn is_compound(&self) -> bool {
        self.lower == 8 && self.upper % 3 == 0
    }
}

fn time_signature(
    upper: u8,
    lower: u8,
    description: &str,
    difficulty: Difficulty,
    common_in: &[&str],
) -> TimeSignature {
    TimeSignature {
        id: format!("{}-{}", upper, lower),
        name: format!("{}/{}", upper, lower),
        upper,
        lower,
        description: description.to_string(),
        difficulty,
        common_in: common_in.iter().map(|s| s.to_string()).collect(),
    }
}

pub fn standard_time_signatures() -> Vec<TimeSignature> {
    use Difficulty::{Advanced, Beginner, Intermediate};

    vec![
        time_signature(
            4,
            4,
            "Common time. Four quarter notes per measure.",
            Beginner,
            &["rock", "pop", "jazz", "blues", "folk"],
        ),
        time_signature(
            3,
            4,
            "Waltz time. Three quarter notes per measure.",
            Beginner,
            &["classical", "folk", "country"],
        ),
        time_signature(
            6,
            8,
            "Compound duple meter. Six eighth notes per measure, often grouped as two dotted quarter notes.",
            Intermediate,
            &["rock ballads", "folk", "classical"],
        ),
        time_signature(
            2,
            4,
            "Simple duple meter. Two quarter notes per measure.",
            Intermediate,
            &["marches", "polkas"],
        ),
        time_signature(
            2,
            2,
            "Cut time. Two half notes per measure, often used for faster tempos.",
            Intermediate,
            &["marches", "rock", "classical"],
        ),
        time_signature(
            5,
            4,
            "Five quarter notes per measure, often grouped as 3+2 or 2+3.",
            Advanced,
            &["jazz", "progressive rock"],
        ),
        time_signature(
            7,
            8,
            "Seven eighth notes per measure, often grouped as 2+2+3, 3+2+2, or 2+3+2.",
            Advanced,
            &["progressive rock", "balkan folk"],
        ),
        time_signature(
            9,
            8,
            "Nine eighth notes per measure, often grouped as 3+3+3.",
            Advanced,
            &["progressive rock", "classical"],
        ),
        time_signature(
            12,
            8,
            "Twelve eighth notes per measure, often grouped as 3+3+3+3. Common in slow blues.",
            Advanced,
            &["blues", "rock ballads"],
        ),
    ]
}
