//! Fractal (multi-octave) summation of a single-octave kernel.

use serde::{Deserialize, Serialize};

use crate::error::NoiseError;

/// Default amplitude multiplier between octaves.
pub const DEFAULT_PERSISTENCE: f64 = 0.5;
/// Default frequency multiplier between octaves.
pub const DEFAULT_LACUNARITY: f64 = 2.0;
/// Default octave count.
pub const DEFAULT_OCTAVES: u32 = 1;

/// Octave layout for a fractal sum.
///
/// Octave `i` samples the kernel at frequency `lacunarity^i` and weights it by
/// `persistence^i`. The weighted sum is divided by `Σ persistence^i`, which keeps
/// the result in the kernel's own range for any octave count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Octaves {
    /// Number of octaves, at least 1.
    pub count: u32,
    /// Amplitude multiplier between octaves.
    pub persistence: f64,
    /// Frequency multiplier between octaves.
    pub lacunarity: f64,
}

impl Default for Octaves {
    fn default() -> Self {
        Self {
            count: DEFAULT_OCTAVES,
            persistence: DEFAULT_PERSISTENCE,
            lacunarity: DEFAULT_LACUNARITY,
        }
    }
}

impl Octaves {
    /// `count` octaves with the default persistence and lacunarity.
    #[must_use]
    pub fn new(count: u32) -> Self {
        Self {
            count,
            ..Self::default()
        }
    }

    /// Sets the amplitude multiplier.
    #[must_use]
    pub const fn with_persistence(mut self, persistence: f64) -> Self {
        self.persistence = persistence;
        self
    }

    /// Sets the frequency multiplier.
    #[must_use]
    pub const fn with_lacunarity(mut self, lacunarity: f64) -> Self {
        self.lacunarity = lacunarity;
        self
    }

    /// Checks the layout before any sampling happens.
    ///
    /// Besides the per-field checks, rejects layouts whose amplitude total or
    /// top frequency would overflow to infinity and turn the sum into NaN.
    pub fn validate(&self) -> Result<(), NoiseError> {
        if self.count == 0 {
            return Err(NoiseError::InvalidOctaves);
        }
        if !self.persistence.is_finite() || self.persistence <= 0.0 {
            return Err(NoiseError::InvalidPersistence(self.persistence));
        }
        if !self.lacunarity.is_finite() || self.lacunarity <= 0.0 {
            return Err(NoiseError::InvalidLacunarity(self.lacunarity));
        }

        // Σ p^i over the octaves, and the frequency of the last octave
        let count = f64::from(self.count);
        let normalizer = if (self.persistence - 1.0).abs() < f64::EPSILON {
            count
        } else {
            (self.persistence.powf(count) - 1.0) / (self.persistence - 1.0)
        };
        let top_frequency = self.lacunarity.powf(count - 1.0);
        if !normalizer.is_finite() || !top_frequency.is_finite() {
            return Err(NoiseError::OctaveOverflow {
                count: self.count,
                persistence: self.persistence,
                lacunarity: self.lacunarity,
            });
        }
        Ok(())
    }

    /// Sums `sample(frequency)` over every octave and normalizes the result.
    ///
    /// `sample` is never called if the layout is invalid.
    pub fn sum(&self, mut sample: impl FnMut(f64) -> f64) -> Result<f64, NoiseError> {
        self.validate()?;

        let mut total = 0.0;
        let mut normalizer = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        for _ in 0..self.count {
            total += sample(frequency) * amplitude;
            normalizer += amplitude;
            amplitude *= self.persistence;
            frequency *= self.lacunarity;
        }

        Ok(total / normalizer)
    }
}
