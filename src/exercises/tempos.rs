use serde::{Deserialize, Serialize};

use crate::difficulty::Difficulty;
use crate::exercises::picker::{uniform_in, RandomSource, Tiered};

/// A traditional Italian tempo marking and its BPM range.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TempoRange {
    pub id: String,
    pub name: String,
    #[serde(rename = "minBPM")]
    pub min_bpm: u32,
    #[serde(rename = "maxBPM")]
    pub max_bpm: u32,
    pub description: String,
    pub difficulty: Difficulty,
}

impl Tiered for TempoRange {
    fn tier(&self) -> Difficulty {
        self.difficulty
    }
}

/// A concrete tempo to practice at.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Tempo {
    pub bpm: u32,
    pub name: String,
    pub description: String,
}

impl TempoRange {
    /// BPM in `min_bpm..max_bpm`.
    pub fn random_bpm<R: RandomSource + ?Sized>(&self, rng: &mut R) -> u32 {
        uniform_in(rng, self.min_bpm, self.max_bpm)
    }

    pub fn sample<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Tempo {
        Tempo {
            bpm: self.random_bpm(rng),
            name: self.name.clone(),
            description: self.description.clone(),
        }
    }

    pub fn contains(&self, tempo: &Tempo) -> bool {
        tempo.name == self.name && (self.min_bpm..self.max_bpm).contains(&tempo.bpm)
    }
}

fn tempo_range(
    name: &str,
    min_bpm: u32,
    max_bpm: u32,
    description: &str,
    difficulty: Difficulty,
) -> TempoRange {
    TempoRange {
        id: name.to_ascii_lowercase(),
        name: name.to_string(),
        min_bpm,
        max_bpm,
        description: description.to_string(),
        difficulty,
    }
}

pub fn standard_tempo_ranges() -> Vec<TempoRange> {
    use Difficulty::{Advanced, Beginner, Intermediate};

    vec![
        tempo_range("Largo", 40, 60, "Very slow and broad", Beginner),
        tempo_range("Adagio", 66, 76, "Slow and stately", Beginner),
        tempo_range("Andante", 76, 108, "At a walking pace", Beginner),
        tempo_range("Moderato", 108, 120, "Moderately", Intermediate),
        tempo_range("Allegretto", 112, 120, "Moderately fast", Intermediate),
        tempo_range("Allegro", 120, 168, "Fast, quickly and bright", Intermediate),
        tempo_range("Vivace", 140, 168, "Lively and fast", Advanced),
        tempo_range("Presto", 168, 200, "Very fast", Advanced),
        tempo_range("Prestissimo", 200, 240, "Extremely fast", Advanced),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercises::picker::available;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_table() {
        let table = standard_tempo_ranges();
        assert_eq!(table.len(), 9);
        assert!(table.iter().all(|r| r.min_bpm < r.max_bpm));
        assert_eq!(table[0].id, "largo");
        assert_eq!(available(&table, Difficulty::Beginner).len(), 3);
        assert_eq!(available(&table, Difficulty::Intermediate).len(), 6);
    }

    #[test]
    fn test_random_bpm_stays_below_max() {
        let table = standard_tempo_ranges();
        let mut rng = StdRng::seed_from_u64(42);
        for range in &table {
            for _ in 0..200 {
                let bpm = range.random_bpm(&mut rng);
                assert!(bpm >= range.min_bpm && bpm < range.max_bpm, "{} {}", range.name, bpm);
            }
        }
    }

    #[test]
    fn test_sample_carries_name() {
        let largo = &standard_tempo_ranges()[0];
        let mut rng = crate::exercises::picker::ScriptedSource::new(&[0.5]);
        let tempo = largo.sample(&mut rng);
        assert_eq!(tempo.bpm, 50);
        assert_eq!(tempo.name, "Largo");
        assert_eq!(tempo.description, "Very slow and broad");
        assert!(largo.contains(&tempo));
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_value(&standard_tempo_ranges()[0]).unwrap();
        assert_eq!(json["minBPM"], 40);
        assert_eq!(json["maxBPM"], 60);
        assert_eq!(json["difficulty"], "beginner");
    }
}
