//! One evaluation function per dimension, with defaults bound.
//!
//! The plain calls (`pnoise3`, `snoise2`, ...) evaluate a single octave against
//! the shared reference table and cannot fail. The `*_with` calls take an
//! options struct and validate it before sampling.

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::error::NoiseError;
pub use crate::noise::fractal::{DEFAULT_LACUNARITY, DEFAULT_OCTAVES, DEFAULT_PERSISTENCE};
use crate::noise::improved_noise::{improved_noise_1d, improved_noise_2d, improved_noise_3d};
use crate::noise::simplex_noise::{simplex_noise_2d, simplex_noise_3d, simplex_noise_4d};
use crate::noise::tileable_noise::tileable_noise_3d;
use crate::noise::{Octaves, PermutationTable, Tiling, default_permutation_table};

/// Default permutation lookup shift for the Perlin family.
pub const DEFAULT_BASE: i32 = 0;

/// Options for the Perlin family.
#[derive(Debug, Clone, Copy)]
pub struct PerlinOptions<'a> {
    /// Octave layout.
    pub octaves: Octaves,
    /// Permutation lookup shift, applied to every octave.
    pub base: i32,
    /// Table used to hash lattice points.
    pub table: &'a PermutationTable,
}

impl Default for PerlinOptions<'_> {
    fn default() -> Self {
        Self {
            octaves: Octaves::default(),
            base: DEFAULT_BASE,
            table: default_permutation_table(),
        }
    }
}

impl<'a> PerlinOptions<'a> {
    /// Sets the octave layout.
    #[must_use]
    pub const fn with_octaves(mut self, octaves: Octaves) -> Self {
        self.octaves = octaves;
        self
    }

    /// Sets the permutation lookup shift.
    #[must_use]
    pub const fn with_base(mut self, base: i32) -> Self {
        self.base = base;
        self
    }

    /// Sets the permutation table.
    #[must_use]
    pub const fn with_table(self, table: &'a PermutationTable) -> PerlinOptions<'a> {
        PerlinOptions { table, ..self }
    }
}

/// Options for the simplex family.
#[derive(Debug, Clone, Copy)]
pub struct SimplexOptions<'a> {
    /// Octave layout.
    pub octaves: Octaves,
    /// Table used to hash lattice points.
    pub table: &'a PermutationTable,
}

impl Default for SimplexOptions<'_> {
    fn default() -> Self {
        Self {
            octaves: Octaves::default(),
            table: default_permutation_table(),
        }
    }
}

impl<'a> SimplexOptions<'a> {
    /// Sets the octave layout.
    #[must_use]
    pub const fn with_octaves(mut self, octaves: Octaves) -> Self {
        self.octaves = octaves;
        self
    }

    /// Sets the permutation table.
    #[must_use]
    pub const fn with_table(self, table: &'a PermutationTable) -> SimplexOptions<'a> {
        SimplexOptions { table, ..self }
    }
}

/// Options for tileable 3D Perlin noise.
#[derive(Debug, Clone, Copy)]
pub struct TileOptions<'a> {
    /// Octave layout. Each octave's repeat period is scaled by its frequency.
    pub octaves: Octaves,
    /// Repeat periods and offsets of the first octave.
    pub tiling: Tiling,
    /// Table used to hash lattice points.
    pub table: &'a PermutationTable,
}

impl Default for TileOptions<'_> {
    fn default() -> Self {
        Self {
            octaves: Octaves::default(),
            tiling: Tiling::cubic(1),
            table: default_permutation_table(),
        }
    }
}

impl<'a> TileOptions<'a> {
    /// Options for `tiling` with the defaults for everything else.
    #[must_use]
    pub fn new(tiling: Tiling) -> Self {
        Self {
            tiling,
            ..Self::default()
        }
    }

    /// Sets the octave layout.
    #[must_use]
    pub const fn with_octaves(mut self, octaves: Octaves) -> Self {
        self.octaves = octaves;
        self
    }

    /// Sets the repeat periods and offsets.
    #[must_use]
    pub const fn with_tiling(mut self, tiling: Tiling) -> Self {
        self.tiling = tiling;
        self
    }

    /// Sets the permutation table.
    #[must_use]
    pub const fn with_table(self, table: &'a PermutationTable) -> TileOptions<'a> {
        TileOptions { table, ..self }
    }
}

/// Single-octave 1D Perlin noise with the default table.
#[must_use]
pub fn pnoise1(x: f64) -> f64 {
    improved_noise_1d(x, DEFAULT_BASE, default_permutation_table())
}

/// Single-octave 2D Perlin noise with the default table.
#[must_use]
pub fn pnoise2(x: f64, y: f64) -> f64 {
    improved_noise_2d(x, y, DEFAULT_BASE, default_permutation_table())
}

/// Single-octave 3D Perlin noise with the default table.
#[must_use]
pub fn pnoise3(x: f64, y: f64, z: f64) -> f64 {
    improved_noise_3d(x, y, z, DEFAULT_BASE, default_permutation_table())
}

/// Fractal 1D Perlin noise.
pub fn pnoise1_with(x: f64, options: &PerlinOptions<'_>) -> Result<f64, NoiseError> {
    options
        .octaves
        .sum(|frequency| improved_noise_1d(x * frequency, options.base, options.table))
}

/// Fractal 2D Perlin noise.
pub fn pnoise2_with(x: f64, y: f64, options: &PerlinOptions<'_>) -> Result<f64, NoiseError> {
    options.octaves.sum(|frequency| {
        improved_noise_2d(x * frequency, y * frequency, options.base, options.table)
    })
}

/// Fractal 3D Perlin noise.
pub fn pnoise3_with(x: f64, y: f64, z: f64, options: &PerlinOptions<'_>) -> Result<f64, NoiseError> {
    options.octaves.sum(|frequency| {
        improved_noise_3d(
            x * frequency,
            y * frequency,
            z * frequency,
            options.base,
            options.table,
        )
    })
}

/// Fractal 3D Perlin noise that repeats with `options.tiling.repeat` on each axis.
///
/// With more than one octave the field keeps that period exactly when the
/// lacunarity is an integer.
pub fn pnoise3_tiled(x: f64, y: f64, z: f64, options: &TileOptions<'_>) -> Result<f64, NoiseError> {
    options.tiling.validate()?;
    options.octaves.sum(|frequency| {
        tileable_noise_3d(
            x * frequency,
            y * frequency,
            z * frequency,
            &options.tiling.scaled(frequency),
            options.table,
        )
    })
}

/// Single-octave 2D simplex noise with the default table.
#[must_use]
pub fn snoise2(x: f64, y: f64) -> f64 {
    simplex_noise_2d(x, y, default_permutation_table())
}

/// Single-octave 3D simplex noise with the default table.
#[must_use]
pub fn snoise3(x: f64, y: f64, z: f64) -> f64 {
    simplex_noise_3d(x, y, z, default_permutation_table())
}

/// Single-octave 4D simplex noise with the default table.
#[must_use]
pub fn snoise4(x: f64, y: f64, z: f64, w: f64) -> f64 {
    simplex_noise_4d(x, y, z, w, default_permutation_table())
}

/// Fractal 2D simplex noise.
pub fn snoise2_with(x: f64, y: f64, options: &SimplexOptions<'_>) -> Result<f64, NoiseError> {
    options
        .octaves
        .sum(|frequency| simplex_noise_2d(x * frequency, y * frequency, options.table))
}

/// Fractal 3D simplex noise.
pub fn snoise3_with(x: f64, y: f64, z: f64, options: &SimplexOptions<'_>) -> Result<f64, NoiseError> {
    options.octaves.sum(|frequency| {
        simplex_noise_3d(x * frequency, y * frequency, z * frequency, options.table)
    })
}

/// Fractal 4D simplex noise.
pub fn snoise4_with(
    x: f64,
    y: f64,
    z: f64,
    w: f64,
    options: &SimplexOptions<'_>,
) -> Result<f64, NoiseError> {
    options.octaves.sum(|frequency| {
        simplex_noise_4d(
            x * frequency,
            y * frequency,
            z * frequency,
            w * frequency,
            options.table,
        )
    })
}

/// A new shuffled table of `period` entries, independent of the shared default.
pub fn create_permutation_table(period: usize) -> Result<PermutationTable, NoiseError> {
    PermutationTable::random(period)
}

/// A new shuffled table that is identical for identical `(period, seed)` pairs.
pub fn create_permutation_table_seeded(period: usize, seed: u64) -> Result<PermutationTable, NoiseError> {
    let table = PermutationTable::with_rng(period, &mut StdRng::seed_from_u64(seed))?;
    tracing::debug!(period, seed, "created seeded permutation table");
    Ok(table)
}

/// A table built from caller-supplied values, which are not checked for
/// uniqueness.
pub fn create_permutation_table_from(values: &[usize]) -> Result<PermutationTable, NoiseError> {
    PermutationTable::from_values(values)
}
