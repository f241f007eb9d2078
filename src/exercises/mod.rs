//! Practice material: the fixed tables each exercise draws from, and the
//! generators that pick from them by skill level without repeating the
//! previous pick too often.

pub mod catalog;
pub mod extensions;
pub mod fret_ranges;
pub mod improvisation;
pub mod keys;
pub mod picker;
pub mod progressions;
pub mod tempos;
pub mod time_signatures;
