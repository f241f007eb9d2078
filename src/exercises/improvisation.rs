use serde::Serialize;

use crate::config::SessionConfig;
use crate::difficulty::Difficulty;
use crate::exercises::catalog::Catalog;
use crate::exercises::extensions::{apply_extension, ChordExtension};
use crate::exercises::fret_ranges::FretRange;
use crate::exercises::picker::RandomSource;
use crate::exercises::progressions::ChordProgression;
use crate::exercises::tempos::Tempo;
use crate::exercises::time_signatures::TimeSignature;
use crate::theory::keys::Key;

/// Everything needed for one improvisation session.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImprovisationPractice {
    pub key: Key,
    pub progression: ChordProgression,
    /// The progression's chords in `key`, as triads.
    pub basic_chords: Vec<String>,
    /// `basic_chords` with `extension` applied.
    pub chords: Vec<String>,
    /// Beginners get plain triads.
    pub extension: Option<ChordExtension>,
    pub time_signature: TimeSignature,
    pub tempo: Tempo,
    pub fret_range: FretRange,
}

/// Draw a full practice for `difficulty`. Each part avoids repeating the
/// matching part of `previous`.
pub fn generate_improvisation_practice<R: RandomSource + ?Sized>(
    catalog: &Catalog,
    config: &SessionConfig,
    difficulty: Difficulty,
    previous: Option<&ImprovisationPractice>,
    rng: &mut R,
) -> Option<ImprovisationPractice> {
    let key = catalog.random_key(rng, config, difficulty, previous.map(|p| &p.key))?;
    let progression = catalog.random_progression(
        rng,
        config,
        Some(key),
        difficulty,
        previous.map(|p| &p.progression),
    )?;
    let basic_chords = progression.resolve(key);

    let extension = if difficulty == Difficulty::Beginner {
        None
    } else {
        catalog.random_extension(
            rng,
            config,
            difficulty,
            previous.and_then(|p| p.extension.as_ref()),
        )
    };
    let chords = match extension {
        Some(extension) => basic_chords
            .iter()
            .map(|chord| apply_extension(chord, extension))
            .collect(),
        None => basic_chords.clone(),
    };

    let time_signature = catalog.random_time_signature(
        rng,
        config,
        difficulty,
        previous.map(|p| &p.time_signature),
    )?;
    let tempo = catalog.random_tempo(rng, config, difficulty, previous.map(|p| &p.tempo))?;
    let fret_range =
        catalog.random_fret_range(rng, config, difficulty, previous.map(|p| &p.fret_range))?;

    Some(ImprovisationPractice {
        key: key.clone(),
        progression: progression.clone(),
        basic_chords,
        chords,
        extension: extension.cloned(),
        time_signature: time_signature.clone(),
        tempo,
        fret_range: fret_range.clone(),
    })
}
