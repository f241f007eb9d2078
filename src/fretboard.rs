//! Note positions on a six-string neck.
//!
//! The map is a pure function of the tuning and the number of frets. String
//! 0 is the lowest string (low E in standard tuning), fret 0 is the open
//! string. Lookups outside the neck come back empty.

use serde::{Deserialize, Serialize};

use crate::error::PracticeError;
use crate::theory::pitch::PitchClass;

pub const STRING_COUNT: usize = 6;

const SINGLE_DOT_FRETS: [u8; 4] = [3, 5, 7, 9];
const DOUBLE_DOT_FRET: u8 = 12;

pub const ROOT_LABEL: &str = "Root";
const ROOT_COLOR: &str = "#328647";

/// Open-string notes, low to high.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Tuning {
    open: [PitchClass; STRING_COUNT],
}

impl Tuning {
    pub fn new(open: [PitchClass; STRING_COUNT]) -> Self {
        Tuning { open }
    }

    /// E A D G B E.
    pub fn standard() -> Self {
        Tuning::new([
            PitchClass::E,
            PitchClass::A,
            PitchClass::D,
            PitchClass::G,
            PitchClass::B,
            PitchClass::E,
        ])
    }

    /// Parse six note names, lowest string first.
    pub fn parse<S: AsRef<str>>(names: &[S]) -> Result<Self, PracticeError> {
        if names.len() != STRING_COUNT {
            return Err(PracticeError::InvalidTuning {
                expected: STRING_COUNT,
                found: names.len(),
            });
        }

        let mut open = [PitchClass::C; STRING_COUNT];
        for (slot, name) in open.iter_mut().zip(names) {
            *slot = name.as_ref().parse()?;
        }
        Ok(Tuning { open })
    }

    pub fn open_notes(&self) -> &[PitchClass; STRING_COUNT] {
        &self.open
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Tuning::standard()
    }
}

impl TryFrom<Vec<String>> for Tuning {
    type Error = PracticeError;

    fn try_from(names: Vec<String>) -> Result<Self, Self::Error> {
        Tuning::parse(&names)
    }
}

impl From<Tuning> for Vec<String> {
    fn from(tuning: Tuning) -> Self {
        tuning.open.iter().map(|&note| note.into()).collect()
    }
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct FretboardPosition {
    pub string: u8,
    pub fret: u8,
    pub note: PitchClass,
}

/// An interval the player can ask to see relative to a root.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntervalOption {
    pub name: &'static str,
    pub semitones: u8,
    pub color: &'static str,
}

pub const INTERVAL_OPTIONS: [IntervalOption; 8] = [
    IntervalOption { name: "Major 2nd", semitones: 2, color: "#3DA2C7" },
    IntervalOption { name: "Minor 3rd", semitones: 3, color: "#C13C28" },
    IntervalOption { name: "Major 3rd", semitones: 4, color: "#D68C00" },
    IntervalOption { name: "Perfect 4th", semitones: 5, color: "#A67C4E" },
    IntervalOption { name: "Perfect 5th", semitones: 7, color: "#4668B0" },
    IntervalOption { name: "Major 6th", semitones: 9, color: "#D17832" },
    IntervalOption { name: "Minor 7th", semitones: 10, color: "#B87346" },
    IntervalOption { name: "Major 7th", semitones: 11, color: "#CA8C4D" },
];

pub fn interval_by_name(name: &str) -> Option<IntervalOption> {
    INTERVAL_OPTIONS
        .iter()
        .find(|option| option.name.eq_ignore_ascii_case(name.trim()))
        .copied()
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Highlight {
    #[serde(flatten)]
    pub position: FretboardPosition,
    pub label: &'static str,
    pub color: &'static str,
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FretMarker {
    Single,
    Double,
}

/// Inlay dot drawn at `fret`, if any.
pub fn fret_marker(fret: u8) -> Option<FretMarker> {
    if fret == DOUBLE_DOT_FRET {
        Some(FretMarker::Double)
    } else if SINGLE_DOT_FRETS.contains(&fret) {
        Some(FretMarker::Single)
    } else {
        None
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fretboard {
    max_fret: u8,
    positions: Vec<FretboardPosition>,
}

impl Fretboard {
    pub fn new(tuning: Tuning, max_fret: u8) -> Self {
        let positions = tuning
            .open
            .iter()
            .enumerate()
            .flat_map(|(string, &open)| {
                (0..=max_fret).map(move |fret| FretboardPosition {
                    string: string as u8,
                    fret,
                    note: open.transpose(fret as i32),
                })
            })
            .collect();

        Fretboard {
            max_fret,
            positions,
        }
    }

    pub fn standard(max_fret: u8) -> Self {
        Fretboard::new(Tuning::standard(), max_fret)
    }

    /// Every position, string by string, frets ascending.
    pub fn positions(&self) -> &[FretboardPosition] {
        &self.positions
    }

    pub fn positions_of(&self, note: PitchClass) -> Vec<FretboardPosition> {
        self.positions
            .iter()
            .filter(|p| p.note == note)
            .copied()
            .collect()
    }

    pub fn at(&self, string: u8, fret: u8) -> Option<FretboardPosition> {
        if string as usize >= STRING_COUNT || fret > self.max_fret {
            return None;
        }
        let index = string as usize * (self.max_fret as usize + 1) + fret as usize;
        self.positions.get(index).copied()
    }

    /// Positions holding `root` or one of `intervals` above it. A note that
    /// is both keeps the root label; otherwise the first matching interval
    /// wins.
    pub fn highlight(&self, root: PitchClass, intervals: &[IntervalOption]) -> Vec<Highlight> {
        self.positions
            .iter()
            .filter_map(|&position| {
                let (label, color) = if position.note == root {
                    (ROOT_LABEL, ROOT_COLOR)
                } else {
                    let above = position.note.semitones_above(root);
                    let interval = intervals.iter().find(|i| i.semitones % 12 == above)?;
                    (interval.name, interval.color)
                };
                Some(Highlight {
                    position,
                    label,
                    color,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_map() {
        let board = Fretboard::standard(12);
        assert_eq!(board.positions().len(), 78);
        assert_eq!(board.at(0, 0).unwrap().note, PitchClass::E);
        assert_eq!(board.at(0, 5).unwrap().note, PitchClass::A);
        assert_eq!(board.at(4, 0).unwrap().note, PitchClass::B);
        assert_eq!(board.at(5, 12).unwrap().note, PitchClass::E);
    }

    #[test]
    fn test_out_of_range_is_none() {
        let board = Fretboard::standard(12);
        assert_eq!(board.at(6, 0), None);
        assert_eq!(board.at(0, 13), None);
    }

    #[test]
    fn test_positions_of() {
        let board = Fretboard::standard(12);
        let a = board.positions_of(PitchClass::A);
        // one per string within 12 frets, plus the open and 12th fret A string
        assert_eq!(a.len(), 7);
        assert!(a.iter().all(|p| p.note == PitchClass::A));
        assert!(a.contains(&FretboardPosition { string: 1, fret: 0, note: PitchClass::A }));
        assert!(a.contains(&FretboardPosition { string: 1, fret: 12, note: PitchClass::A }));
    }

    #[test]
    fn test_parse_tuning() {
        let drop_d = Tuning::parse(&["D", "A", "D", "G", "B", "E"]).unwrap();
        let board = Fretboard::new(drop_d, 5);
        assert_eq!(board.at(0, 2).unwrap().note, PitchClass::E);

        assert_eq!(
            Tuning::parse(&["E", "A", "D"]),
            Err(PracticeError::InvalidTuning { expected: 6, found: 3 })
        );
        assert_eq!(
            Tuning::parse(&["E", "A", "D", "G", "B", "X"]),
            Err(PracticeError::InvalidNote("X".to_string()))
        );
    }

    #[test]
    fn test_tuning_serde() {
        let tuning: Tuning = serde_json::from_str(r#"["D","G","D","G","B","D"]"#).unwrap();
        assert_eq!(tuning.open_notes()[0], PitchClass::D);
        let json = serde_json::to_string(&Tuning::standard()).unwrap();
        assert_eq!(json, r#"["E","A","D","G","B","E"]"#);
        assert!(serde_json::from_str::<Tuning>(r#"["E"]"#).is_err());
    }

    #[test]
    fn test_highlight_root_wins() {
        let board = Fretboard::standard(12);
        let fifth = interval_by_name("perfect 5th").unwrap();
        let octave_like = IntervalOption { name: "Octave", semitones: 12, color: "#000000" };
        let marks = board.highlight(PitchClass::A, &[fifth, octave_like]);

        let roots = marks.iter().filter(|h| h.label == ROOT_LABEL).count();
        let fifths = marks.iter().filter(|h| h.label == "Perfect 5th").count();
        assert_eq!(roots, 7);
        assert_eq!(fifths, board.positions_of(PitchClass::E).len());
        assert!(marks.iter().all(|h| h.label != "Octave"));
    }

    #[test]
    fn test_fret_markers() {
        assert_eq!(fret_marker(0), None);
        assert_eq!(fret_marker(3), Some(FretMarker::Single));
        assert_eq!(fret_marker(9), Some(FretMarker::Single));
        assert_eq!(fret_marker(12), Some(FretMarker::Double));
        assert_eq!(fret_marker(11), None);
    }
}
