use rand::{Rng, RngCore};

use crate::difficulty::Difficulty;

/// Redraws allowed when a draw repeats the previous value.
pub const MAX_REGEN_ATTEMPTS: usize = 5;

/// Source of uniform samples in `[0, 1)`.
///
/// Every `rand` generator is a source; tests substitute fixed sequences.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

impl<R: RngCore> RandomSource for R {
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Uniform index into a collection of `len` items. `len` must be non-zero.
pub fn pick_index<R: RandomSource + ?Sized>(rng: &mut R, len: usize) -> usize {
    let index = (rng.next_unit() * len as f64).floor() as usize;
    index.min(len - 1)
}

/// Uniform integer in `low..high`, or `low` when the range is empty.
pub fn uniform_in<R: RandomSource + ?Sized>(rng: &mut R, low: u32, high: u32) -> u32 {
    if high <= low {
        return low;
    }
    low + pick_index(rng, (high - low) as usize) as u32
}

/// Draw with `draw` until the result is not a repeat, giving up after
/// `max_attempts` redraws and keeping the last draw.
pub fn regenerate<T, R, D, S>(rng: &mut R, max_attempts: usize, mut draw: D, is_repeat: S) -> T
where
    R: RandomSource + ?Sized,
    D: FnMut(&mut R) -> T,
    S: Fn(&T) -> bool,
{
    let mut candidate = draw(rng);
    let mut attempts = 0;

    while is_repeat(&candidate) && attempts < max_attempts {
        candidate = draw(rng);
        attempts += 1;
    }

    if attempts == max_attempts && is_repeat(&candidate) {
        log::debug!("no fresh value after {} redraws, repeating", max_attempts);
    }
    candidate
}

/// Pick from `pool`, avoiding `previous` per [`regenerate`].
pub fn pick_fresh<'a, T, R>(
    rng: &mut R,
    pool: &[&'a T],
    previous: Option<&T>,
    max_attempts: usize,
) -> Option<&'a T>
where
    T: PartialEq,
    R: RandomSource + ?Sized,
{
    if pool.is_empty() {
        return None;
    }
    let chosen = regenerate(
        rng,
        max_attempts,
        |rng| pool[pick_index(rng, pool.len())],
        |candidate| previous.map_or(false, |p| p == *candidate),
    );
    Some(chosen)
}

/// A table record tagged with the skill level it is meant for.
pub trait Tiered {
    fn tier(&self) -> Difficulty;
}

/// Records available at `level`: its own tier and every easier one.
pub fn available<T: Tiered>(table: &[T], level: Difficulty) -> Vec<&T> {
    table.iter().filter(|item| level.includes(item.tier())).collect()
}

/// Random record for `level` that avoids repeating `previous`.
pub fn random_tiered<'a, T, R>(
    rng: &mut R,
    table: &'a [T],
    level: Difficulty,
    previous: Option<&T>,
    max_attempts: usize,
) -> Option<&'a T>
where
    T: Tiered + PartialEq,
    R: RandomSource + ?Sized,
{
    pick_fresh(rng, &available(table, level), previous, max_attempts)
}

/// Replays a fixed list of samples, cycling when it runs out.
#[cfg(test)]
pub(crate) struct ScriptedSource {
    samples: Vec<f64>,
    position: usize,
    pub draws: usize,
}

#[cfg(test)]
impl ScriptedSource {
    pub fn new(samples: &[f64]) -> Self {
        ScriptedSource {
            samples: samples.to_vec(),
            position: 0,
            draws: 0,
        }
    }
}

#[cfg(test)]
impl RandomSource for ScriptedSource {
    fn next_unit(&mut self) -> f64 {
        let sample = self.samples[self.position % self.samples.len()];
        self.position += 1;
        self.draws += 1;
        sample
    }
}
