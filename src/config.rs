use serde::{Deserialize, Serialize};

use crate::exercises::picker::MAX_REGEN_ATTEMPTS;
use crate::fretboard::Tuning;

/// Per-session knobs. Every field is optional on input; missing fields fall
/// back to the defaults.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionConfig {
    /// Redraws allowed when a pick repeats the previous one.
    pub max_regen_attempts: usize,
    /// Frets drawn on the fretboard, not counting the open string.
    pub max_fret: u8,
    pub tuning: Tuning,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            max_regen_attempts: MAX_REGEN_ATTEMPTS,
            max_fret: 12,
            tuning: Tuning::standard(),
        }
    }
}
