//! Toroidal 3D Perlin noise.
//!
//! Coordinates are wrapped into `[0, repeat)` per axis and the far corner of a
//! cell wraps to `(i + 1) mod repeat`, so the field repeats exactly with period
//! `repeat` along every axis. Baked 3D textures rely on this to tile seamlessly.

use serde::{Deserialize, Serialize};

use crate::error::NoiseError;
use crate::math::wrap;
use crate::noise::PermutationTable;
use crate::noise::improved_noise::sample_and_lerp;

/// Repeat periods and offsets for [`tileable_noise_3d`].
///
/// The two offsets are independent:
///
/// - `base` shifts the permutation lookups. Two channels evaluated with
///   different bases at the same coordinates are decorrelated.
/// - `lattice_offset` shifts the wrapped cell indices inside the torus, which
///   is the same as translating the input by an integer on every axis.
///
/// Neither offset breaks periodicity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tiling {
    /// Repeat period per axis (`x`, `y`, `z`).
    pub repeat: [u32; 3],
    /// Permutation lookup shift.
    #[serde(default)]
    pub base: i32,
    /// Wrapped cell index shift.
    #[serde(default)]
    pub lattice_offset: i32,
}

impl Tiling {
    /// Tiling with the given per-axis periods and no offsets.
    #[must_use]
    pub const fn new(repeat: [u32; 3]) -> Self {
        Self {
            repeat,
            base: 0,
            lattice_offset: 0,
        }
    }

    /// Tiling with the same period on every axis.
    #[must_use]
    pub const fn cubic(repeat: u32) -> Self {
        Self::new([repeat; 3])
    }

    /// Sets the permutation lookup shift.
    #[must_use]
    pub const fn with_base(mut self, base: i32) -> Self {
        self.base = base;
        self
    }

    /// Sets the wrapped cell index shift.
    #[must_use]
    pub const fn with_lattice_offset(mut self, lattice_offset: i32) -> Self {
        self.lattice_offset = lattice_offset;
        self
    }

    /// Rejects zero repeat periods.
    pub fn validate(&self) -> Result<(), NoiseError> {
        for (axis, repeat) in ['x', 'y', 'z'].into_iter().zip(self.repeat) {
            if repeat == 0 {
                return Err(NoiseError::InvalidRepeat { axis, repeat });
            }
        }
        Ok(())
    }

    /// The tiling to use for an octave sampled at `frequency`.
    ///
    /// Scaling coordinates by `frequency` scales the period by the same factor,
    /// rounded to the nearest whole cell. The summed field keeps the base
    /// period exactly when every scaled period is integral, e.g. for integer
    /// lacunarity.
    #[must_use]
    pub fn scaled(&self, frequency: f64) -> Self {
        let scale = |repeat: u32| (f64::from(repeat) * frequency).round().clamp(1.0, f64::from(u32::MAX)) as u32;
        Self {
            repeat: self.repeat.map(scale),
            ..*self
        }
    }
}

/// Wraps one coordinate onto the torus.
///
/// Returns the near and far cell index (both in `[0, repeat)`) and the
/// fractional offset within the cell.
#[inline]
fn wrap_axis(coord: f64, repeat: u32, lattice_offset: i32) -> (i64, i64, f64) {
    let wrapped = wrap(coord, f64::from(repeat));
    let cell = wrapped.floor();
    let repeat = i64::from(repeat);
    let i = cell as i64 + i64::from(lattice_offset);
    (i.rem_euclid(repeat), (i + 1).rem_euclid(repeat), wrapped - cell)
}

/// Maps a wrapped cell index into `[0, period)` after applying `base`.
#[inline]
fn hash_index(index: i64, base: i32, table: &PermutationTable) -> usize {
    let mask = table.period() as i64 - 1;
    ((index + i64::from(base)) & mask) as usize
}

/// Single-octave 3D Perlin noise that repeats with `tiling.repeat` on each axis.
///
/// `tiling` is assumed valid (see [`Tiling::validate`]); a zero period panics.
/// The table period must be a power of two. Repeat periods larger than the
/// table period still tile, but distinct cells start sharing gradients.
#[must_use]
pub fn tileable_noise_3d(x: f64, y: f64, z: f64, tiling: &Tiling, table: &PermutationTable) -> f64 {
    let [rx, ry, rz] = tiling.repeat;
    let (x0, x1, xf) = wrap_axis(x, rx, tiling.lattice_offset);
    let (y0, y1, yf) = wrap_axis(y, ry, tiling.lattice_offset);
    let (z0, z1, zf) = wrap_axis(z, rz, tiling.lattice_offset);

    let hash = |index: i64| hash_index(index, tiling.base, table);
    sample_and_lerp(
        table,
        [hash(x0), hash(y0), hash(z0)],
        [hash(x1), hash(y1), hash(z1)],
        xf,
        yf,
        zf,
    )
}
