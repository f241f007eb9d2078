use wasm_bindgen::prelude::*;

pub mod config;
pub mod difficulty;
pub mod error;
pub mod exercises;
pub mod fretboard;
pub mod practice;
pub mod theory;

pub use config::SessionConfig;
pub use difficulty::Difficulty;
pub use error::PracticeError;
pub use exercises::catalog::Catalog;
pub use exercises::improvisation::{generate_improvisation_practice, ImprovisationPractice};
pub use exercises::picker::{RandomSource, MAX_REGEN_ATTEMPTS};
pub use fretboard::{Fretboard, FretboardPosition, Tuning};
pub use practice::{InMemoryPracticeRepository, Practice, PracticeRepository, PracticeUpdate};
pub use theory::keys::{all_keys, Key, KeyQuality};
pub use theory::nashville::resolve_tokens;
pub use theory::pitch::PitchClass;

use exercises::fret_ranges::{self, FretLimit};
use exercises::keys::require_key;
use exercises::tempos::Tempo;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::de::DeserializeOwned;
use serde::Serialize;

use std::cell::RefCell;

thread_local! {
    static RNG: RefCell<StdRng> = RefCell::new(StdRng::from_entropy());
    static CATALOG: Catalog = Catalog::standard();
    static LAST_PRACTICE: RefCell<Option<ImprovisationPractice>> = RefCell::new(None);
    static PRACTICES: RefCell<InMemoryPracticeRepository> =
        RefCell::new(InMemoryPracticeRepository::new(|| js_sys::Date::now() as u64));
}

fn js_error<E: ToString>(e: E) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(js_error)
}

/// `null` and `undefined` become `None`.
fn from_js<T: DeserializeOwned>(value: JsValue) -> Result<Option<T>, JsValue> {
    if value.is_null() || value.is_undefined() {
        return Ok(None);
    }
    serde_wasm_bindgen::from_value(value).map(Some).map_err(js_error)
}

fn session_config(config_js: JsValue) -> Result<SessionConfig, JsValue> {
    Ok(from_js(config_js)?.unwrap_or_default())
}

fn skill_level(level: &str) -> Result<Difficulty, JsValue> {
    level.parse().map_err(js_error)
}

/// Run `f` against the shared catalog and random source.
fn with_catalog<T>(f: impl FnOnce(&Catalog, &mut StdRng) -> T) -> T {
    CATALOG.with(|catalog| RNG.with(|rng| f(catalog, &mut rng.borrow_mut())))
}

/// Reseed the shared random source, for reproducible sessions.
#[wasm_bindgen]
pub fn seed_random(seed: u64) {
    RNG.with(|rng| *rng.borrow_mut() = StdRng::seed_from_u64(seed));
}

#[wasm_bindgen]
pub fn get_all_keys() -> Result<JsValue, JsValue> {
    CATALOG.with(|catalog| to_js(&catalog.keys))
}

/// Random key for the skill level, avoiding `previous` (a key name). An
/// unknown `previous` is ignored, as in the other `random_*` functions.
#[wasm_bindgen]
pub fn random_key(
    difficulty: &str,
    previous: Option<String>,
    config_js: JsValue,
) -> Result<JsValue, JsValue> {
    let difficulty = skill_level(difficulty)?;
    let config = session_config(config_js)?;
    with_catalog(|catalog, rng| {
        let previous = previous.as_deref().and_then(|name| catalog.key(name));
        to_js(&catalog.random_key(rng, &config, difficulty, previous))
    })
}

#[wasm_bindgen]
pub fn select_key(name: &str) -> Result<JsValue, JsValue> {
    CATALOG.with(|catalog| to_js(require_key(&catalog.keys, name).map_err(js_error)?))
}

/// Random progression for the key named `key`, or `undefined` without one.
/// `previous` is a progression name.
#[wasm_bindgen]
pub fn random_progression(
    key: Option<String>,
    difficulty: &str,
    previous: Option<String>,
    config_js: JsValue,
) -> Result<JsValue, JsValue> {
    let difficulty = skill_level(difficulty)?;
    let config = session_config(config_js)?;
    with_catalog(|catalog, rng| {
        let key = match key.as_deref() {
            Some(name) => Some(require_key(&catalog.keys, name).map_err(js_error)?),
            None => None,
        };
        let previous = previous.as_deref().and_then(|name| catalog.progression(name));
        to_js(&catalog.random_progression(rng, &config, key, difficulty, previous))
    })
}

/// Chord names for Nashville or roman numeral `tokens` in the key named `key`.
#[wasm_bindgen]
pub fn resolve_progression(tokens_js: JsValue, key: &str) -> Result<js_sys::Array, JsValue> {
    let tokens: Vec<String> = from_js(tokens_js)?.unwrap_or_default();
    CATALOG.with(|catalog| {
        let key = require_key(&catalog.keys, key).map_err(js_error)?;
        Ok(resolve_tokens(&tokens, key)
            .iter()
            .map(|chord| JsValue::from_str(chord))
            .collect())
    })
}

/// `previous` is an extension id.
#[wasm_bindgen]
pub fn random_extension(
    difficulty: &str,
    previous: Option<String>,
    config_js: JsValue,
) -> Result<JsValue, JsValue> {
    let difficulty = skill_level(difficulty)?;
    let config = session_config(config_js)?;
    with_catalog(|catalog, rng| {
        let previous = previous.as_deref().and_then(|id| catalog.extension(id));
        to_js(&catalog.random_extension(rng, &config, difficulty, previous))
    })
}

/// Apply the extension with id `extension` to `chord`.
#[wasm_bindgen]
pub fn apply_extension(chord: &str, extension: &str) -> Result<String, JsValue> {
    CATALOG.with(|catalog| {
        catalog
            .extension(extension)
            .map(|e| exercises::extensions::apply_extension(chord, e))
            .ok_or_else(|| JsValue::from_str(&format!("Unknown extension: {}", extension)))
    })
}

/// `previous` is a fret range id.
#[wasm_bindgen]
pub fn random_fret_range(
    difficulty: &str,
    previous: Option<String>,
    config_js: JsValue,
) -> Result<JsValue, JsValue> {
    let difficulty = skill_level(difficulty)?;
    let config = session_config(config_js)?;
    with_catalog(|catalog, rng| {
        let previous = previous.as_deref().and_then(|id| catalog.fret_range(id));
        to_js(&catalog.random_fret_range(rng, &config, difficulty, previous))
    })
}

#[wasm_bindgen]
pub fn custom_fret_range(min_fret: u8, span: u8) -> Result<JsValue, JsValue> {
    to_js(&fret_ranges::custom_fret_range(min_fret, span))
}

/// `previous` is a `{ start, end }` object.
#[wasm_bindgen]
pub fn random_fret_limit(previous_js: JsValue, config_js: JsValue) -> Result<JsValue, JsValue> {
    let previous: Option<FretLimit> = from_js(previous_js)?;
    let config = session_config(config_js)?;
    with_catalog(|_, rng| {
        to_js(&fret_ranges::random_fret_limit(
            rng,
            previous.as_ref(),
            config.max_regen_attempts,
        ))
    })
}

/// `previous` is the comma-joined display form, e.g. `"Low E, A, D"`.
#[wasm_bindgen]
pub fn random_string_limit(
    previous: Option<String>,
    config_js: JsValue,
) -> Result<JsValue, JsValue> {
    let config = session_config(config_js)?;
    let previous = previous.and_then(|shown| {
        fret_ranges::string_groups()
            .into_iter()
            .find(|group| group.to_string() == shown)
    });
    with_catalog(|_, rng| {
        to_js(&fret_ranges::random_string_limit(
            rng,
            previous.as_ref(),
            config.max_regen_attempts,
        ))
    })
}

/// `previous` is a time signature id such as `"6-8"`.
#[wasm_bindgen]
pub fn random_time_signature(
    difficulty: &str,
    previous: Option<String>,
    config_js: JsValue,
) -> Result<JsValue, JsValue> {
    let difficulty = skill_level(difficulty)?;
    let config = session_config(config_js)?;
    with_catalog(|catalog, rng| {
        let previous = previous.as_deref().and_then(|id| catalog.time_signature(id));
        to_js(&catalog.random_time_signature(rng, &config, difficulty, previous))
    })
}

/// `previous` is a `{ bpm, name, description }` object.
#[wasm_bindgen]
pub fn random_tempo(
    difficulty: &str,
    previous_js: JsValue,
    config_js: JsValue,
) -> Result<JsValue, JsValue> {
    let difficulty = skill_level(difficulty)?;
    let previous: Option<Tempo> = from_js(previous_js)?;
    let config = session_config(config_js)?;
    with_catalog(|catalog, rng| {
        to_js(&catalog.random_tempo(rng, &config, difficulty, previous.as_ref()))
    })
}

/// Every position on the neck for the configured tuning and fret count.
#[wasm_bindgen]
pub fn map_fretboard(config_js: JsValue) -> Result<JsValue, JsValue> {
    let config = session_config(config_js)?;
    let board = Fretboard::new(config.tuning, config.max_fret);
    to_js(board.positions())
}

/// Positions holding `root` or any of the named intervals above it.
#[wasm_bindgen]
pub fn highlight_fretboard(
    root: &str,
    intervals_js: JsValue,
    config_js: JsValue,
) -> Result<JsValue, JsValue> {
    let root: PitchClass = root.parse().map_err(js_error)?;
    let names: Vec<String> = from_js(intervals_js)?.unwrap_or_default();
    let intervals = names
        .iter()
        .map(|name| {
            fretboard::interval_by_name(name)
                .ok_or_else(|| JsValue::from_str(&format!("Unknown interval: {}", name)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let config = session_config(config_js)?;
    let board = Fretboard::new(config.tuning, config.max_fret);
    to_js(&board.highlight(root, &intervals))
}

#[wasm_bindgen]
pub fn fret_marker(fret: u8) -> Result<JsValue, JsValue> {
    to_js(&fretboard::fret_marker(fret))
}

/// A complete improvisation practice. Each part avoids the one generated by
/// the previous call.
#[wasm_bindgen]
pub fn generate_improvisation(difficulty: &str, config_js: JsValue) -> Result<JsValue, JsValue> {
    let difficulty = skill_level(difficulty)?;
    let config = session_config(config_js)?;
    LAST_PRACTICE.with(|last| {
        let mut last = last.borrow_mut();
        let practice = with_catalog(|catalog, rng| {
            generate_improvisation_practice(catalog, &config, difficulty, last.as_ref(), rng)
        })
        .ok_or_else(|| JsValue::from_str("No practice available"))?;
        let value = to_js(&practice)?;
        *last = Some(practice);
        Ok(value)
    })
}

#[wasm_bindgen]
pub fn filter_practices_by_skill_level(
    practices_js: JsValue,
    level: &str,
) -> Result<JsValue, JsValue> {
    let level = skill_level(level)?;
    let practices: Vec<Practice> = from_js(practices_js)?.unwrap_or_default();
    to_js(&practice::filter_by_skill_level(&practices, level))
}

#[wasm_bindgen]
pub fn validate_practice(practice_js: JsValue) -> Result<(), JsValue> {
    let practice: Practice = from_js(practice_js)?
        .ok_or_else(|| JsValue::from_str("Missing practice"))?;
    practice.validate().map_err(js_error)
}

/// The skill level after `level`, wrapping from advanced to beginner.
#[wasm_bindgen]
pub fn next_skill_level(level: &str) -> Result<String, JsValue> {
    Ok(skill_level(level)?.next().to_string())
}

#[wasm_bindgen]
pub fn list_practices(level: Option<String>) -> Result<JsValue, JsValue> {
    let level = level.as_deref().map(skill_level).transpose()?;
    PRACTICES.with(|repo| {
        let repo = repo.borrow();
        match level {
            Some(level) => to_js(&repo.list_by_skill_level(level)),
            None => to_js(&repo.list()),
        }
    })
}

#[wasm_bindgen]
pub fn get_practice(id: &str) -> Result<JsValue, JsValue> {
    PRACTICES.with(|repo| to_js(&repo.borrow().get(id)))
}

/// Store a new practice and return its id.
#[wasm_bindgen]
pub fn add_practice(practice_js: JsValue) -> Result<String, JsValue> {
    let practice: Practice = from_js(practice_js)?
        .ok_or_else(|| JsValue::from_str("Missing practice"))?;
    PRACTICES.with(|repo| repo.borrow_mut().create(practice).map_err(js_error))
}

#[wasm_bindgen]
pub fn update_practice(id: &str, update_js: JsValue) -> Result<JsValue, JsValue> {
    let update: PracticeUpdate = from_js(update_js)?.unwrap_or_default();
    PRACTICES.with(|repo| {
        let updated = repo.borrow_mut().update(id, update).map_err(js_error)?;
        to_js(&updated)
    })
}

#[wasm_bindgen]
pub fn delete_practice(id: &str) -> Result<(), JsValue> {
    PRACTICES.with(|repo| repo.borrow_mut().delete(id).map_err(js_error))
}
