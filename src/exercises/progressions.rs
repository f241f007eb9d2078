use serde::Serialize;

use crate::difficulty::Difficulty;
use crate::exercises::picker::{pick_fresh, RandomSource, Tiered};
use crate::theory::keys::{Key, KeyQuality};
use crate::theory::nashville::resolve_tokens;

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChordProgression {
    pub name: String,
    pub description: String,
    /// Number form, e.g. `["1", "5", "6m", "4"]`.
    pub nashville: Vec<String>,
    /// Roman numeral form, e.g. `["I", "V", "vi", "IV"]`.
    pub roman: Vec<String>,
    /// Label shown to the player.
    pub difficulty: Difficulty,
    /// Which table the progression belongs to; this is what the skill
    /// filter looks at, and it can differ from the label.
    #[serde(skip)]
    pub tier: Difficulty,
    pub quality: KeyQuality,
    pub common_in: Vec<String>,
}

impl Tiered for ChordProgression {
    fn tier(&self) -> Difficulty {
        self.tier
    }
}

impl ChordProgression {
    /// Chord names for this progression in `key`.
    pub fn resolve(&self, key: &Key) -> Vec<String> {
        resolve_tokens(&self.nashville, key)
    }
}

/// Random progression suited to `key`'s quality, or `None` without a key.
pub fn random_progression<'a, R: RandomSource + ?Sized>(
    rng: &mut R,
    table: &'a [ChordProgression],
    key: Option<&Key>,
    difficulty: Difficulty,
    previous: Option<&ChordProgression>,
    max_attempts: usize,
) -> Option<&'a ChordProgression> {
    let key = key?;
    let pool: Vec<&ChordProgression> = table
        .iter()
        .filter(|p| p.quality == key.quality && difficulty.includes(p.tier()))
        .collect();
    pick_fresh(rng, &pool, previous, max_attempts)
}

#[allow(clippy::too_many_arguments)]
fn progression(
    quality: KeyQuality,
    tier: Difficulty,
    name: &str,
    description: &str,
    nashville: &[&str],
    roman: &[&str],
    difficulty: Difficulty,
    common_in: &[&str],
) -> ChordProgression {
    let strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
    ChordProgression {
        name: name.to_string(),
        description: description.to_string(),
        nashville: strings(nashville),
        roman: strings(roman),
        difficulty,
        tier,
        quality,
        common_in: strings(common_in),
    }
}

pub fn standard_progressions() -> Vec<ChordProgression> {
    use Difficulty::{Advanced, Beginner, Intermediate};
    use KeyQuality::{Major, Minor};

    vec![
        progression(
            Major,
            Beginner,
            "Major 1-4-5 Progression",
            "The classic three-chord progression",
            &["1", "4", "5"],
            &["I", "IV", "V"],
            Beginner,
            &["rock", "folk", "country", "blues"],
        ),
        progression(
            Major,
            Beginner,
            "Pop Punk Progression",
            "The 'pop punk' progression, used in many hit songs",
            &["1", "5", "6m", "4"],
            &["I", "V", "vi", "IV"],
            Beginner,
            &["pop", "rock", "punk", "contemporary"],
        ),
        progression(
            Major,
            Beginner,
            "50s Progression",
            "Classic doo-wop sequence used in countless hits from the 50s onwards",
            &["1", "6m", "4", "5"],
            &["I", "vi", "IV", "V"],
            Beginner,
            &["doo-wop", "pop", "rock", "ballads"],
        ),
        progression(
            Major,
            Beginner,
            "Blues Progression",
            "Simple 12-bar blues structure, foundation of blues and rock",
            &["1", "1", "1", "1", "4", "4", "1", "1", "5", "4", "1", "5"],
            &["I", "I", "I", "I", "IV", "IV", "I", "I", "V", "IV", "I", "V"],
            Beginner,
            &["blues", "rock", "country", "jazz"],
        ),
        progression(
            Major,
            Beginner,
            "Simple Jazz Progression",
            "The jazz fundamental progression, the backbone of jazz harmony",
            &["2m", "5", "1"],
            &["ii", "V", "I"],
            Intermediate,
            &["jazz", "bossa nova", "fusion"],
        ),
        progression(
            Major,
            Beginner,
            "Unexpected Turn",
            "Takes a unexpected turn when the V chord moves to vi instead of I",
            &["1", "4", "5", "6m"],
            &["I", "IV", "V", "vi"],
            Intermediate,
            &["pop", "rock", "film music", "classical"],
        ),
        progression(
            Major,
            Intermediate,
            "Circle of Fifths Progression",
            "Progression moving through the circle of fifths, creates a sense of motion",
            &["6m", "2m", "5", "1"],
            &["vi", "ii", "V", "I"],
            Intermediate,
            &["jazz", "classical", "pop"],
        ),
        progression(
            Major,
            Advanced,
            "Rhythm Changes Progression",
            "Jazz progression based on Gershwin's 'I Got Rhythm'",
            &["1", "6m", "2m", "5", "1", "6", "2m", "5"],
            &["I", "vi", "ii", "V", "I", "VI7", "ii", "V"],
            Advanced,
            &["jazz", "bebop"],
        ),
        progression(
            Major,
            Advanced,
            "Modal Interchange Progression",
            "Using chords borrowed from parallel modes for rich harmony",
            &["1", "b6", "b7", "1"],
            &["I", "bVI", "bVII", "I"],
            Advanced,
            &["rock", "metal", "fusion", "jazz"],
        ),
        progression(
            Minor,
            Beginner,
            "Minor 1-4-5 Progression",
            "The classic three-chord progression in minor",
            &["1m", "4m", "5m"],
            &["i", "iv", "v"],
            Beginner,
            &["rock", "folk", "blues"],
        ),
        progression(
            Minor,
            Beginner,
            "Ballad Progression",
            "Common minor progression with a strong emotional impact",
            &["1m", "6", "7"],
            &["i", "VI", "VII"],
            Beginner,
            &["pop", "ballads", "film music"],
        ),
        progression(
            Minor,
            Beginner,
            "Minor Pop Progression",
            "A simple, catchy progression commonly used in minor key pop songs",
            &["1m", "6", "7", "5"],
            &["i", "VI", "VII", "v"],
            Beginner,
            &["pop", "indie", "alternative", "rock"],
        ),
        progression(
            Minor,
            Beginner,
            "Dark Rock Progression",
            "Common in rock and metal for a darker, more intense feel",
            &["1m", "5", "6", "5"],
            &["i", "v", "VI", "v"],
            Beginner,
            &["rock", "metal", "alternative", "grunge"],
        ),
        progression(
            Minor,
            Beginner,
            "Sad Ballad Progression",
            "Creates a melancholic, emotional atmosphere",
            &["1m", "3", "4m", "6"],
            &["i", "III", "iv", "VI"],
            Beginner,
            &["ballads", "folk", "pop", "singer-songwriter"],
        ),
        progression(
            Minor,
            Beginner,
            "Dramatic Minor Progression",
            "Creates a tense, dramatic feel often used in film",
            &["1m", "6", "3", "5"],
            &["i", "VI", "III", "V"],
            Intermediate,
            &["film scores", "dramatic pop", "classical", "rock"],
        ),
        progression(
            Minor,
            Intermediate,
            "Andalusian Cadence Progression",
            "Descending progression from Spanish/Flamenco music",
            &["1m", "7", "6", "5"],
            &["i", "VII", "VI", "V"],
            Intermediate,
            &["flamenco", "rock", "classical"],
        ),
        progression(
            Minor,
            Intermediate,
            "Minor Jazz Turnaround",
            "Common turnaround used in minor key jazz standards",
            &["1m", "4m", "5", "1m"],
            &["i", "iv", "V", "i"],
            Intermediate,
            &["jazz", "blues", "fusion", "soul"],
        ),
        progression(
            Minor,
            Advanced,
            "Harmonic Minor Cycle Progression",
            "Utilizing the harmonic minor sound",
            &["1m", "4m", "5", "1m"],
            &["i", "iv", "V", "i"],
            Advanced,
            &["neo-classical", "jazz", "metal"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercises::picker::{ScriptedSource, MAX_REGEN_ATTEMPTS};
    use crate::theory::keys::all_keys;

    fn key(name: &str) -> Key {
        all_keys().into_iter().find(|k| k.name == name).unwrap()
    }

    #[test]
    fn test_table_shape() {
        let table = standard_progressions();
        assert_eq!(table.len(), 18);
        for p in &table {
            assert_eq!(p.nashville.len(), p.roman.len(), "{}", p.name);
            assert!(!p.nashville.is_empty());
        }
        let count = |q, t| table.iter().filter(|p| p.quality == q && p.tier == t).count();
        assert_eq!(count(KeyQuality::Major, Difficulty::Beginner), 6);
        assert_eq!(count(KeyQuality::Major, Difficulty::Intermediate), 1);
        assert_eq!(count(KeyQuality::Major, Difficulty::Advanced), 2);
        assert_eq!(count(KeyQuality::Minor, Difficulty::Beginner), 6);
        assert_eq!(count(KeyQuality::Minor, Difficulty::Intermediate), 2);
        assert_eq!(count(KeyQuality::Minor, Difficulty::Advanced), 1);
    }

    #[test]
    fn test_number_and_roman_forms_agree_in_major() {
        let table = standard_progressions();
        let c = key("C Major");
        let pop = table.iter().find(|p| p.name == "Pop Punk Progression").unwrap();
        assert_eq!(pop.resolve(&c), vec!["C", "G", "Am", "F"]);
        assert_eq!(resolve_tokens(&pop.roman, &c), pop.resolve(&c));
    }

    #[test]
    fn test_resolve_minor_progression() {
        let table = standard_progressions();
        let andalusian = table.iter().find(|p| p.name.starts_with("Andalusian")).unwrap();
        assert_eq!(andalusian.resolve(&key("A Minor")), vec!["Am", "G", "F", "Em"]);
        assert_eq!(
            resolve_tokens(&andalusian.roman, &key("A Minor")),
            vec!["Am", "G", "F", "E"]
        );
    }

    #[test]
    fn test_no_key_no_progression() {
        let table = standard_progressions();
        let mut rng = ScriptedSource::new(&[0.5]);
        let chosen = random_progression(
            &mut rng,
            &table,
            None,
            Difficulty::Advanced,
            None,
            MAX_REGEN_ATTEMPTS,
        );
        assert!(chosen.is_none());
        assert_eq!(rng.draws, 0);
    }

    #[test]
    fn test_progression_matches_key_quality_and_tier() {
        let table = standard_progressions();
        let a_minor = key("A Minor");
        let c_major = key("C Major");
        let samples: Vec<f64> = (0..20).map(|i| i as f64 / 20.0).collect();
        let mut rng = ScriptedSource::new(&samples);

        for _ in 0..40 {
            let p = random_progression(
                &mut rng,
                &table,
                Some(&a_minor),
                Difficulty::Beginner,
                None,
                MAX_REGEN_ATTEMPTS,
            )
            .unwrap();
            assert_eq!(p.quality, KeyQuality::Minor);
            assert_eq!(p.tier, Difficulty::Beginner);

            let p = random_progression(
                &mut rng,
                &table,
                Some(&c_major),
                Difficulty::Intermediate,
                None,
                MAX_REGEN_ATTEMPTS,
            )
            .unwrap();
            assert_eq!(p.quality, KeyQuality::Major);
            assert_ne!(p.tier, Difficulty::Advanced);
        }
    }

    #[test]
    fn test_progression_avoids_previous() {
        let table = standard_progressions();
        let c_major = key("C Major");
        let first = &table[0];
        // 0.0 lands on the first beginner major entry again, 0.5 does not
        let mut rng = ScriptedSource::new(&[0.0, 0.5]);
        let next = random_progression(
            &mut rng,
            &table,
            Some(&c_major),
            Difficulty::Beginner,
            Some(first),
            MAX_REGEN_ATTEMPTS,
        )
        .unwrap();
        assert_ne!(next, first);
        assert_eq!(rng.draws, 2);
    }
}
