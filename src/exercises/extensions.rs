use serde::Serialize;

use crate::difficulty::Difficulty;
use crate::exercises::picker::Tiered;

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct ChordExtension {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub description: String,
    pub difficulty: Difficulty,
}

impl Tiered for ChordExtension {
    fn tier(&self) -> Difficulty {
        self.difficulty
    }
}

impl ChordExtension {
    fn is_triad(&self) -> bool {
        self.symbol.is_empty()
    }

    fn is_minor(&self) -> bool {
        self.symbol.starts_with('m') && !self.symbol.starts_with("maj")
    }

    fn is_altered_fifth(&self) -> bool {
        self.symbol.starts_with("aug") || self.symbol.starts_with("dim")
    }
}

/// Apply `extension` to a chord name such as `C`, `Am` or `G/B`.
///
/// A minor chord takes a minor extension without doubling the `m`
/// (`Am` + `m7` = `Am7`, `Bdim` + `m7` = `Bdim7`), and an augmented or diminished chord is left alone
/// when the extension would restate its fifth. A slash bass stays last.
pub fn apply_extension(chord: &str, extension: &ChordExtension) -> String {
    if extension.is_triad() {
        return chord.to_string();
    }

    let (base, bass) = match chord.split_once('/') {
        Some((base, bass)) => (base, Some(bass)),
        None => (chord, None),
    };

    let is_altered_chord = base.ends_with("aug") || base.ends_with("dim");

    // a trailing "m" or "dim" already gives the minor third
    let extended = if is_altered_chord && extension.is_altered_fifth() {
        base.to_string()
    } else if base.ends_with('m') && extension.is_minor() {
        format!("{}{}", base, &extension.symbol[1..])
    } else {
        format!("{}{}", base, extension.symbol)
    };

    match bass {
        Some(bass) => format!("{}/{}", extended, bass),
        None => extended,
    }
}

fn extension(
    id: &str,
    name: &str,
    symbol: &str,
    description: &str,
    difficulty: Difficulty,
) -> ChordExtension {
    ChordExtension {
        id: id.to_string(),
        name: name.to_string(),
        symbol: symbol.to_string(),
        description: description.to_string(),
        difficulty,
    }
}

pub fn standard_extensions() -> Vec<ChordExtension> {
    use Difficulty::{Advanced, Beginner, Intermediate};

    vec![
        extension("triad", "Triad", "", "Basic three-note chord with no extension", Beginner),
        extension(
            "7",
            "Dominant 7th",
            "7",
            "Adds a minor 7th above the root, creating tension",
            Beginner,
        ),
        extension(
            "sus4",
            "Suspended 4th",
            "sus4",
            "Replaces the 3rd with a 4th, creating an unresolved sound",
            Beginner,
        ),
        extension(
            "maj7",
            "Major 7th",
            "maj7",
            "Adds a major 7th above the root for a jazzy, smooth sound",
            Intermediate,
        ),
        extension("m7", "Minor 7th", "m7", "Minor chord with added minor 7th", Intermediate),
        extension(
            "add9",
            "Add 9",
            "add9",
            "Adds a 9th (2nd above the octave) without adding the 7th",
            Intermediate,
        ),
        extension("6", "6th", "6", "Adds a major 6th above the root", Intermediate),
        extension("9", "9th", "9", "Dominant 7th chord with added 9th", Advanced),
        extension("m9", "Minor 9th", "m9", "Minor 7th chord with added 9th", Advanced),
        extension("maj9", "Major 9th", "maj9", "Major 7th chord with added 9th", Advanced),
        extension("13", "13th", "13", "Dominant chord with added 9th, 11th and 13th", Advanced),
        extension("aug", "Augmented", "aug", "Major chord with a sharpened 5th", Advanced),
        extension(
            "dim7",
            "Diminished 7th",
            "dim7",
            "Diminished triad with a diminished 7th",
            Advanced,
        ),
    ]
}
