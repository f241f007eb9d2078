use crate::difficulty::Difficulty;
use crate::error::PracticeError;
use crate::exercises::picker::{available, random_tiered, RandomSource, Tiered};
use crate::theory::keys::Key;

impl Tiered for Key {
    fn tier(&self) -> Difficulty {
        self.difficulty
    }
}

/// Keys a player at `difficulty` may be given.
pub fn keys_for(keys: &[Key], difficulty: Difficulty) -> Vec<&Key> {
    available(keys, difficulty)
}

pub fn random_key<'a, R: RandomSource + ?Sized>(
    rng: &mut R,
    keys: &'a [Key],
    difficulty: Difficulty,
    previous: Option<&Key>,
    max_attempts: usize,
) -> Option<&'a Key> {
    random_tiered(rng, keys, difficulty, previous, max_attempts)
}

/// Look a key up by name, ignoring case and surrounding whitespace.
pub fn key_by_name<'a>(keys: &'a [Key], name: &str) -> Option<&'a Key> {
    let name = name.trim();
    keys.iter().find(|key| key.name.eq_ignore_ascii_case(name))
}

pub fn require_key<'a>(keys: &'a [Key], name: &str) -> Result<&'a Key, PracticeError> {
    key_by_name(keys, name).ok_or_else(|| PracticeError::UnknownKey(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercises::picker::{ScriptedSource, MAX_REGEN_ATTEMPTS};
    use crate::theory::keys::{all_keys, KeyQuality};

    #[test]
    fn test_key_pools_are_cumulative() {
        let keys = all_keys();
        let beginner = keys_for(&keys, Difficulty::Beginner);
        let intermediate = keys_for(&keys, Difficulty::Intermediate);

        let names: Vec<&str> = beginner.iter().map(|k| k.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "A Major", "A Minor", "C Major", "D Major", "D Minor", "E Major", "E Minor",
                "F Major", "G Major"
            ]
        );
        assert!(beginner.iter().all(|k| intermediate.contains(k)));
        assert_eq!(intermediate.len(), 15);
        assert_eq!(keys_for(&keys, Difficulty::Advanced).len(), 24);
    }

    #[test]
    fn test_random_key_respects_level() {
        let keys = all_keys();
        let samples: Vec<f64> = (0..24).map(|i| i as f64 / 24.0).collect();
        let mut rng = ScriptedSource::new(&samples);
        for _ in 0..48 {
            let key = random_key(&mut rng, &keys, Difficulty::Beginner, None, MAX_REGEN_ATTEMPTS)
                .unwrap();
            assert_eq!(key.difficulty, Difficulty::Beginner);
        }
    }

    #[test]
    fn test_random_key_avoids_previous() {
        let keys = all_keys();
        let a_major = key_by_name(&keys, "A Major").unwrap();
        let mut rng = ScriptedSource::new(&[0.0, 0.5]);
        let next =
            random_key(&mut rng, &keys, Difficulty::Beginner, Some(a_major), MAX_REGEN_ATTEMPTS)
                .unwrap();
        assert_ne!(next, a_major);
    }

    #[test]
    fn test_key_by_name() {
        let keys = all_keys();
        let key = key_by_name(&keys, "  bb minor ").unwrap();
        assert_eq!(key.name, "Bb Minor");
        assert_eq!(key.quality, KeyQuality::Minor);
        assert!(key_by_name(&keys, "H Major").is_none());
        assert_eq!(
            require_key(&keys, "A# Major"),
            Err(PracticeError::UnknownKey("A# Major".to_string()))
        );
    }
}
