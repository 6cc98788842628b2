//! Errors raised at the noise API boundary.

use thiserror::Error;

/// An invalid argument passed to a noise constructor or evaluation call.
///
/// Every check happens before any evaluation work, so a returned error never
/// leaves partial state behind.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NoiseError {
    /// A permutation table period must be positive.
    #[error("Permutation period must be positive, got {0}")]
    InvalidPeriod(usize),
    /// A custom permutation table must have at least one entry.
    #[error("Permutation table cannot be empty")]
    EmptyTable,
    /// At least one octave is required.
    #[error("Octave count must be at least 1")]
    InvalidOctaves,
    /// Persistence must be finite and positive.
    #[error("Persistence must be finite and positive, got {0}")]
    InvalidPersistence(f64),
    /// Lacunarity must be finite and positive.
    #[error("Lacunarity must be finite and positive, got {0}")]
    InvalidLacunarity(f64),
    /// The octave weights or frequencies grow past the `f64` range.
    #[error("{count} octaves overflow with persistence {persistence} and lacunarity {lacunarity}")]
    OctaveOverflow {
        /// Requested octave count.
        count: u32,
        /// Amplitude multiplier between octaves.
        persistence: f64,
        /// Frequency multiplier between octaves.
        lacunarity: f64,
    },
    /// A tiling repeat period must be positive.
    #[error("Repeat period for the {axis} axis must be positive, got {repeat}")]
    InvalidRepeat {
        /// Axis name (`x`, `y` or `z`).
        axis: char,
        /// The rejected repeat period.
        repeat: u32,
    },
}
