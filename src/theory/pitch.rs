use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PracticeError;

pub const SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

pub const FLAT_NAMES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

pub const MAJOR_SCALE_INTERVALS: [u8; 7] = [0, 2, 4, 5, 7, 9, 11];
pub const MINOR_SCALE_INTERVALS: [u8; 7] = [0, 2, 3, 5, 7, 8, 10];

/// How accidentals are written when a pitch class is displayed.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Spelling {
    Sharp,
    Flat,
}

/// One of the twelve chromatic notes, independent of octave.
///
/// Always holds an index in `0..12` with C = 0. Two spellings of the same
/// note (`C#` and `Db`) are the same pitch class.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct PitchClass(u8);

impl PitchClass {
    pub const C: PitchClass = PitchClass(0);
    pub const D: PitchClass = PitchClass(2);
    pub const E: PitchClass = PitchClass(4);
    pub const F: PitchClass = PitchClass(5);
    pub const G: PitchClass = PitchClass(7);
    pub const A: PitchClass = PitchClass(9);
    pub const B: PitchClass = PitchClass(11);

    pub fn new(index: i32) -> Self {
        PitchClass(index.rem_euclid(12) as u8)
    }

    pub fn index(self) -> u8 {
        self.0
    }

    /// Move up (or down, for negative values) by a number of semitones.
    pub fn transpose(self, semitones: i32) -> Self {
        PitchClass::new(self.0 as i32 + semitones)
    }

    /// Semitones from `root` up to `self`, in `0..12`.
    pub fn semitones_above(self, root: PitchClass) -> u8 {
        (self.0 as i32 - root.0 as i32).rem_euclid(12) as u8
    }

    pub fn is_natural(self) -> bool {
        SHARP_NAMES[self.0 as usize].len() == 1
    }

    pub fn name(self, spelling: Spelling) -> &'static str {
        match spelling {
            Spelling::Sharp => SHARP_NAMES[self.0 as usize],
            Spelling::Flat => FLAT_NAMES[self.0 as usize],
        }
    }

    /// Parse a note name such as `C`, `f#`, `Bb` or `Cb`.
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        let mut chars = name.chars();
        let step = chars.next()?;

        let base: i32 = match step.to_ascii_uppercase() {
            'C' => 0,
            'D' => 2,
            'E' => 4,
            'F' => 5,
            'G' => 7,
            'A' => 9,
            'B' => 11,
            _ => return None,
        };

        let mut alter = 0;
        for c in chars {
            match c {
                '#' | '♯' => alter += 1,
                'b' | '♭' => alter -= 1,
                _ => return None,
            }
        }

        Some(PitchClass::new(base + alter))
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name(Spelling::Sharp))
    }
}

impl FromStr for PitchClass {
    type Err = PracticeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PitchClass::parse(s).ok_or_else(|| PracticeError::InvalidNote(s.to_string()))
    }
}

impl TryFrom<String> for PitchClass {
    type Error = PracticeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PitchClass> for String {
    fn from(pc: PitchClass) -> Self {
        pc.name(Spelling::Sharp).to_string()
    }
}
