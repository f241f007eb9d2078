use serde::{Deserialize, Serialize, Serializer};

use crate::difficulty::Difficulty;
use crate::theory::pitch::{PitchClass, Spelling, MAJOR_SCALE_INTERVALS, MINOR_SCALE_INTERVALS};

/// Keys conventionally written with flats. Only consulted for roots that
/// have an accidental.
const FLAT_KEYS: [&str; 10] = ["F", "Bb", "Eb", "Ab", "Db", "Gb", "Cb", "D", "G", "C"];

const UNCOMMON_MAJOR_ROOTS: [&str; 5] = ["F#", "C#", "G#", "D#", "A#"];
const UNCOMMON_MINOR_ROOTS: [&str; 4] = ["D#", "A#", "E#", "B#"];

/// Curated difficulty table, checked top to bottom; the first row naming
/// the key's root wins, anything unlisted is advanced.
const DIFFICULTY_TABLE: [(KeyQuality, &[&str], Difficulty); 5] = [
    (KeyQuality::Major, &["E", "A", "D", "G"], Difficulty::Beginner),
    (KeyQuality::Major, &["C", "G", "F"], Difficulty::Beginner),
    (KeyQuality::Minor, &["A", "E", "D"], Difficulty::Beginner),
    (KeyQuality::Major, &["D", "A", "Bb", "Eb"], Difficulty::Intermediate),
    (KeyQuality::Minor, &["B", "F#", "G", "C"], Difficulty::Intermediate),
];

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum KeyQuality {
    Major,
    Minor,
}

impl KeyQuality {
    pub fn intervals(self) -> &'static [u8; 7] {
        match self {
            KeyQuality::Major => &MAJOR_SCALE_INTERVALS,
            KeyQuality::Minor => &MINOR_SCALE_INTERVALS,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            KeyQuality::Major => "Major",
            KeyQuality::Minor => "Minor",
        }
    }

    pub fn relative(self) -> KeyQuality {
        match self {
            KeyQuality::Major => KeyQuality::Minor,
            KeyQuality::Minor => KeyQuality::Major,
        }
    }

    /// Semitones from this key's root up to its relative key's root.
    fn relative_offset(self) -> i32 {
        match self {
            KeyQuality::Major => 9,
            KeyQuality::Minor => 3,
        }
    }
}

/// A major or minor key with its diatonic notes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Key {
    pub name: String,
    pub root: PitchClass,
    pub quality: KeyQuality,
    pub notes: Vec<PitchClass>,
    pub relative_key: String,
    pub difficulty: Difficulty,
    pub spelling: Spelling,
}

impl Key {
    pub fn new(root: PitchClass, quality: KeyQuality) -> Self {
        let notes = quality
            .intervals()
            .iter()
            .map(|&interval| root.transpose(interval as i32))
            .collect();
        let root_name = conventional_root_name(root, quality);
        let relative_root = root.transpose(quality.relative_offset());

        Key {
            name: key_name(root, quality),
            root,
            quality,
            notes,
            relative_key: key_name(relative_root, quality.relative()),
            difficulty: classify(root_name, quality),
            spelling: key_spelling(root, quality),
        }
    }

    pub fn root_name(&self) -> &'static str {
        conventional_root_name(self.root, self.quality)
    }

    pub fn note_names(&self) -> Vec<&'static str> {
        self.notes.iter().map(|&n| self.spell(n)).collect()
    }

    pub fn spell(&self, note: PitchClass) -> &'static str {
        note.name(self.spelling)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct KeyRepr<'a> {
    name: &'a str,
    root: &'static str,
    quality: KeyQuality,
    notes: Vec<&'static str>,
    relative_key: &'a str,
    difficulty: Difficulty,
}

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        KeyRepr {
            name: &self.name,
            root: self.root_name(),
            quality: self.quality,
            notes: self.note_names(),
            relative_key: &self.relative_key,
            difficulty: self.difficulty,
        }
        .serialize(serializer)
    }
}

/// Root spelling used in key names: a sharp root is renamed to its flat
/// when the key (or, for minor keys, its relative major) is conventionally
/// written with flats.
pub fn conventional_root_name(root: PitchClass, quality: KeyQuality) -> &'static str {
    let sharp = root.name(Spelling::Sharp);
    if root.is_natural() {
        return sharp;
    }

    let flat = root.name(Spelling::Flat);
    let uses_flats = match quality {
        KeyQuality::Major => FLAT_KEYS.contains(&flat),
        KeyQuality::Minor => {
            let relative_major = conventional_root_name(root.transpose(3), KeyQuality::Major);
            FLAT_KEYS.contains(&relative_major)
        }
    };

    if uses_flats {
        flat
    } else {
        sharp
    }
}

fn key_name(root: PitchClass, quality: KeyQuality) -> String {
    format!("{} {}", conventional_root_name(root, quality), quality.label())
}

/// Accidentals used when displaying notes and chords in a key. Minor keys
/// follow their relative major.
fn key_spelling(root: PitchClass, quality: KeyQuality) -> Spelling {
    match quality {
        KeyQuality::Minor => key_spelling(root.transpose(3), KeyQuality::Major),
        KeyQuality::Major if root.is_natural() => {
            if root == PitchClass::C || root == PitchClass::F {
                Spelling::Flat
            } else {
                Spelling::Sharp
            }
        }
        KeyQuality::Major => {
            if conventional_root_name(root, quality).ends_with('b') {
                Spelling::Flat
            } else {
                Spelling::Sharp
            }
        }
    }
}

fn classify(root_name: &str, quality: KeyQuality) -> Difficulty {
    DIFFICULTY_TABLE
        .iter()
        .find(|(q, roots, _)| *q == quality && roots.contains(&root_name))
        .map(|(_, _, difficulty)| *difficulty)
        .unwrap_or(Difficulty::Advanced)
}

fn is_uncommon(key: &Key) -> bool {
    let uncommon_roots: &[&str] = match key.quality {
        KeyQuality::Major => &UNCOMMON_MAJOR_ROOTS,
        KeyQuality::Minor => &UNCOMMON_MINOR_ROOTS,
    };
    uncommon_roots
        .iter()
        .any(|root| key.name == format!("{} {}", root, key.quality.label()))
}

/// Every practical major and minor key, sorted by name.
pub fn all_keys() -> Vec<Key> {
    let roots = (0..12).map(PitchClass::new);
    let mut keys: Vec<Key> = roots
        .clone()
        .map(|root| Key::new(root, KeyQuality::Major))
        .chain(roots.map(|root| Key::new(root, KeyQuality::Minor)))
        .filter(|key| !is_uncommon(key))
        .collect();

    keys.sort_by(|a, b| a.name.cmp(&b.name));
    keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn find<'a>(keys: &'a [Key], name: &str) -> &'a Key {
        keys.iter()
            .find(|k| k.name == name)
            .unwrap_or_else(|| panic!("missing key {}", name))
    }

    #[test]
    fn test_all_keys_count() {
        let keys = all_keys();
        assert_eq!(keys.len(), 24);
        assert_eq!(keys.iter().filter(|k| k.quality == KeyQuality::Major).count(), 12);

        let roots: BTreeSet<u8> = keys
            .iter()
            .filter(|k| k.quality == KeyQuality::Minor)
            .map(|k| k.root.index())
            .collect();
        assert_eq!(roots.len(), 12);
    }

    #[test]
    fn test_flat_normalization() {
        let keys = all_keys();
        for name in [
            "Db Major", "Eb Major", "Gb Major", "Ab Major", "Bb Major", "Eb Minor", "Bb Minor",
            "C# Minor", "F# Minor", "G# Minor",
        ] {
            find(&keys, name);
        }
        assert!(keys.iter().all(|k| !k.name.starts_with("A# ")));
        assert!(keys.iter().all(|k| !k.name.starts_with("D# ")));
    }

    #[test]
    fn test_scale_notes() {
        let keys = all_keys();
        assert_eq!(
            find(&keys, "C Major").note_names(),
            vec!["C", "D", "E", "F", "G", "A", "B"]
        );
        assert_eq!(
            find(&keys, "E Major").note_names(),
            vec!["E", "F#", "G#", "A", "B", "C#", "D#"]
        );
        assert_eq!(
            find(&keys, "Bb Major").note_names(),
            vec!["Bb", "C", "D", "Eb", "F", "G", "A"]
        );
        assert_eq!(
            find(&keys, "D Minor").note_names(),
            vec!["D", "E", "F", "G", "A", "Bb", "C"]
        );
    }

    #[test]
    fn test_relative_keys_share_notes() {
        let keys = all_keys();
        for key in &keys {
            let distinct: BTreeSet<PitchClass> = key.notes.iter().copied().collect();
            assert_eq!(key.notes.len(), 7);
            assert_eq!(distinct.len(), 7, "{} has repeated notes", key.name);

            let relative = find(&keys, &key.relative_key);
            let relative_notes: BTreeSet<PitchClass> = relative.notes.iter().copied().collect();
            assert_eq!(distinct, relative_notes, "{} vs {}", key.name, relative.name);
            assert_eq!(relative.relative_key, key.name);
        }
    }

    #[test]
    fn test_relative_key_names() {
        let keys = all_keys();
        assert_eq!(find(&keys, "C Major").relative_key, "A Minor");
        assert_eq!(find(&keys, "Db Major").relative_key, "Bb Minor");
        assert_eq!(find(&keys, "E Major").relative_key, "C# Minor");
        assert_eq!(find(&keys, "Eb Minor").relative_key, "Gb Major");
    }

    #[test]
    fn test_difficulty_table() {
        let keys = all_keys();
        let difficulty = |name: &str| find(&keys, name).difficulty;

        assert_eq!(difficulty("E Major"), Difficulty::Beginner);
        assert_eq!(difficulty("F Major"), Difficulty::Beginner);
        assert_eq!(difficulty("A Minor"), Difficulty::Beginner);
        assert_eq!(difficulty("Bb Major"), Difficulty::Intermediate);
        assert_eq!(difficulty("Eb Major"), Difficulty::Intermediate);
        assert_eq!(difficulty("F# Minor"), Difficulty::Intermediate);
        assert_eq!(difficulty("C Minor"), Difficulty::Intermediate);
        assert_eq!(difficulty("B Major"), Difficulty::Advanced);
        assert_eq!(difficulty("G# Minor"), Difficulty::Advanced);
        assert_eq!(difficulty("Gb Major"), Difficulty::Advanced);
    }

    #[test]
    fn test_all_keys_idempotent() {
        assert_eq!(all_keys(), all_keys());
    }

    #[test]
    fn test_sorted_by_name() {
        let keys = all_keys();
        assert!(keys.windows(2).all(|w| w[0].name <= w[1].name));
    }

    #[test]
    fn test_serialize_uses_key_spelling() {
        let keys = all_keys();
        let json = serde_json::to_value(find(&keys, "Eb Major")).unwrap();
        assert_eq!(json["root"], "Eb");
        assert_eq!(json["relativeKey"], "C Minor");
        assert_eq!(json["notes"][3], "Ab");
        assert_eq!(json["quality"], "major");
    }
}
