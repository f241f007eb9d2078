use crate::config::SessionConfig;
use crate::difficulty::Difficulty;
use crate::exercises::extensions::{standard_extensions, ChordExtension};
use crate::exercises::fret_ranges::{standard_fret_ranges, FretRange};
use crate::exercises::keys::{key_by_name, random_key};
use crate::exercises::picker::{random_tiered, RandomSource};
use crate::exercises::progressions::{random_progression, standard_progressions, ChordProgression};
use crate::exercises::tempos::{standard_tempo_ranges, Tempo, TempoRange};
use crate::exercises::time_signatures::{standard_time_signatures, TimeSignature};
use crate::theory::keys::{all_keys, Key};

/// Every table the generators draw from.
#[derive(Clone, Debug)]
pub struct Catalog {
    pub keys: Vec<Key>,
    pub progressions: Vec<ChordProgression>,
    pub extensions: Vec<ChordExtension>,
    pub fret_ranges: Vec<FretRange>,
    pub time_signatures: Vec<TimeSignature>,
    pub tempo_ranges: Vec<TempoRange>,
}

impl Catalog {
    pub fn standard() -> Self {
        Catalog {
            keys: all_keys(),
            progressions: standard_progressions(),
            extensions: standard_extensions(),
            fret_ranges: standard_fret_ranges(),
            time_signatures: standard_time_signatures(),
            tempo_ranges: standard_tempo_ranges(),
        }
    }

    // Lookups for the `previous` value handed back by a caller. An unknown
    // name yields `None`, so the next draw is simply unconstrained.

    pub fn key(&self, name: &str) -> Option<&Key> {
        key_by_name(&self.keys, name)
    }

    pub fn progression(&self, name: &str) -> Option<&ChordProgression> {
        self.progressions.iter().find(|p| p.name == name)
    }

    pub fn extension(&self, id: &str) -> Option<&ChordExtension> {
        self.extensions.iter().find(|e| e.id == id)
    }

    pub fn fret_range(&self, id: &str) -> Option<&FretRange> {
        self.fret_ranges.iter().find(|r| r.id == id)
    }

    pub fn time_signature(&self, id: &str) -> Option<&TimeSignature> {
        self.time_signatures.iter().find(|ts| ts.id == id)
    }

    pub fn random_key<R: RandomSource + ?Sized>(
        &self,
        rng: &mut R,
        config: &SessionConfig,
        difficulty: Difficulty,
        previous: Option<&Key>,
    ) -> Option<&Key> {
        random_key(rng, &self.keys, difficulty, previous, config.max_regen_attempts)
    }

    pub fn random_progression<R: RandomSource + ?Sized>(
        &self,
        rng: &mut R,
        config: &SessionConfig,
        key: Option<&Key>,
        difficulty: Difficulty,
        previous: Option<&ChordProgression>,
    ) -> Option<&ChordProgression> {
        random_progression(
            rng,
            &self.progressions,
            key,
            difficulty,
            previous,
            config.max_regen_attempts,
        )
    }

    pub fn random_extension<R: RandomSource + ?Sized>(
        &self,
        rng: &mut R,
        config: &SessionConfig,
        difficulty: Difficulty,
        previous: Option<&ChordExtension>,
    ) -> Option<&ChordExtension> {
        random_tiered(rng, &self.extensions, difficulty, previous, config.max_regen_attempts)
    }

    pub fn random_fret_range<R: RandomSource + ?Sized>(
        &self,
        rng: &mut R,
        config: &SessionConfig,
        difficulty: Difficulty,
        previous: Option<&FretRange>,
    ) -> Option<&FretRange> {
        random_tiered(rng, &self.fret_ranges, difficulty, previous, config.max_regen_attempts)
    }

    pub fn random_time_signature<R: RandomSource + ?Sized>(
        &self,
        rng: &mut R,
        config: &SessionConfig,
        difficulty: Difficulty,
        previous: Option<&TimeSignature>,
    ) -> Option<&TimeSignature> {
        random_tiered(
            rng,
            &self.time_signatures,
            difficulty,
            previous,
            config.max_regen_attempts,
        )
    }

    /// A tempo from a range suited to `difficulty`. The retry compares
    /// tempo names, so the same marking at a different BPM still counts as
    /// a repeat.
    pub fn random_tempo<R: RandomSource + ?Sized>(
        &self,
        rng: &mut R,
        config: &SessionConfig,
        difficulty: Difficulty,
        previous: Option<&Tempo>,
    ) -> Option<Tempo> {
        let previous_range = previous
            .and_then(|tempo| self.tempo_ranges.iter().find(|range| range.name == tempo.name));
        let range = random_tiered(
            rng,
            &self.tempo_ranges,
            difficulty,
            previous_range,
            config.max_regen_attempts,
        )?;
        Some(range.sample(rng))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::standard()
    }
}
