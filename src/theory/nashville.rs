//! Nashville number and roman numeral chord symbols.
//!
//! A token names a chord by scale degree rather than by pitch, so the same
//! progression can be played in any key:
//!
//! - `1`, `4`, `5m`, `b7`, `5/B` (number form, quality inferred from the key
//!   unless a suffix is given)
//! - `I`, `vi`, `vii°`, `bVII`, `VI7`, `I+` (roman form, the numeral's case
//!   gives the quality)
//!
//! Tokens that do not fit either grammar are kept as [`NashvilleToken::Passthrough`]
//! and come back unchanged when resolved, so the player still sees them.

use std::fmt;

use crate::theory::keys::{Key, KeyQuality};
use crate::theory::pitch::{PitchClass, Spelling};

const ROMAN_NUMERALS: [&str; 7] = ["I", "II", "III", "IV", "V", "VI", "VII"];

const NUMBER_SUFFIXES: [&str; 15] = [
    "maj7", "min7", "dim7", "aug7", "add9", "sus4", "sus2", "maj", "min", "dim", "aug", "m7",
    "m", "7", "9",
];

const ROMAN_EXTENSIONS: [&str; 8] = ["maj7", "dim7", "aug7", "add9", "sus4", "sus2", "m7", "7"];

/// Where a chord's quality comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChordQuality {
    /// No suffix: use the quality the degree has in the key.
    Diatonic,
    /// Written out in the token; may be empty for an explicit major chord.
    Explicit(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChordToken {
    pub flats: u8,
    /// Scale degree, 0-based.
    pub degree: u8,
    pub quality: ChordQuality,
    /// Slash bass, kept exactly as written.
    pub bass: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NashvilleToken {
    Chord(ChordToken),
    Passthrough(String),
}

impl NashvilleToken {
    pub fn parse(token: &str) -> Self {
        match parse_chord(token) {
            Some(chord) => NashvilleToken::Chord(chord),
            None => NashvilleToken::Passthrough(token.to_string()),
        }
    }

    /// Chord name in `key`; passthrough tokens come back as written.
    pub fn resolve(&self, key: &Key) -> String {
        match self {
            NashvilleToken::Chord(chord) => chord.resolve(key).to_string(),
            NashvilleToken::Passthrough(raw) => {
                log::trace!("leaving unrecognised chord token {:?} as is", raw);
                raw.clone()
            }
        }
    }
}

/// A chord placed in a key: root, quality suffix and optional bass note.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedChord {
    pub root: PitchClass,
    pub quality: String,
    pub bass: Option<String>,
    pub spelling: Spelling,
}

impl fmt::Display for ResolvedChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.root.name(self.spelling), self.quality)?;
        if let Some(bass) = &self.bass {
            write!(f, "/{}", bass)?;
        }
        Ok(())
    }
}

impl ChordToken {
    pub fn resolve(&self, key: &Key) -> ResolvedChord {
        let offset = key.quality.intervals()[self.degree as usize % 7] as i32;
        let root = key.root.transpose(offset - self.flats as i32);

        let quality = match &self.quality {
            ChordQuality::Explicit(q) => q.clone(),
            ChordQuality::Diatonic => diatonic_quality(key.quality, self.degree).to_string(),
        };

        ResolvedChord {
            root,
            quality,
            bass: self.bass.clone(),
            spelling: key.spelling,
        }
    }
}

/// Quality a scale degree has in a major or natural minor key.
pub fn diatonic_quality(quality: KeyQuality, degree: u8) -> &'static str {
    match (quality, degree % 7) {
        (KeyQuality::Major, 1 | 2 | 5) => "m",
        (KeyQuality::Major, 6) => "dim",
        (KeyQuality::Major, _) => "",
        (KeyQuality::Minor, 0 | 3 | 4) => "m",
        (KeyQuality::Minor, 1) => "dim",
        (KeyQuality::Minor, _) => "",
    }
}

/// Resolve every token of a progression in `key`.
pub fn resolve_tokens<S: AsRef<str>>(tokens: &[S], key: &Key) -> Vec<String> {
    tokens
        .iter()
        .map(|t| NashvilleToken::parse(t.as_ref()).resolve(key))
        .collect()
}

fn parse_chord(token: &str) -> Option<ChordToken> {
    let flats = token.chars().take_while(|&c| c == 'b').count();
    let rest = &token[flats..];

    let (body, bass) = match rest.split_once('/') {
        Some((body, bass)) => (body, Some(parse_bass(bass)?)),
        None => (rest, None),
    };

    let first = body.chars().next()?;
    let (degree, quality) = if first.is_ascii_digit() {
        parse_number(body)?
    } else {
        parse_roman(body)?
    };

    Some(ChordToken {
        flats: u8::try_from(flats).ok()?,
        degree,
        quality,
        bass,
    })
}

fn parse_number(body: &str) -> Option<(u8, ChordQuality)> {
    let mut chars = body.chars();
    let value = chars.next()?.to_digit(10)?;
    if !(1..=7).contains(&value) {
        return None;
    }
    let suffix = chars.as_str();

    let quality = match suffix {
        "" => ChordQuality::Diatonic,
        "m" | "min" => ChordQuality::Explicit("m".to_string()),
        "+" => ChordQuality::Explicit("aug".to_string()),
        "°" => ChordQuality::Explicit("dim".to_string()),
        s if NUMBER_SUFFIXES.contains(&s) => ChordQuality::Explicit(s.to_string()),
        _ => return None,
    };

    Some((value as u8 - 1, quality))
}

fn parse_roman(body: &str) -> Option<(u8, ChordQuality)> {
    let numeral_len = body
        .char_indices()
        .find(|(_, c)| !matches!(c, 'I' | 'V' | 'i' | 'v'))
        .map(|(i, _)| i)
        .unwrap_or(body.len());
    let (numeral, mut rest) = body.split_at(numeral_len);

    let upper = numeral.to_ascii_uppercase();
    let is_major = numeral == upper;
    if !is_major && numeral != numeral.to_ascii_lowercase() {
        return None;
    }
    let degree = ROMAN_NUMERALS.iter().position(|&n| n == upper)? as u8;

    let mut quality = if is_major { "" } else { "m" }.to_string();
    if let Some(r) = rest.strip_prefix('°') {
        if is_major {
            return None;
        }
        quality = "dim".to_string();
        rest = r;
    }
    if let Some(r) = rest.strip_prefix('+') {
        quality = "aug".to_string();
        rest = r;
    }
    if !rest.is_empty() {
        if !ROMAN_EXTENSIONS.contains(&rest) {
            return None;
        }
        // "m7" on a lowercase numeral already carries the minor third
        if quality == "m" && rest.starts_with('m') && !rest.starts_with("maj") {
            quality.clear();
        }
        quality.push_str(rest);
    }

    Some((degree, ChordQuality::Explicit(quality)))
}

/// A bass is one or more word characters (`[A-Za-z0-9_]`).
fn parse_bass(bass: &str) -> Option<String> {
    if bass.is_empty() || !bass.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return None;
    }
    Some(bass.to_string())
}
