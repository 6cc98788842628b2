use std::time::Instant;

use grain_noise::noise::Tiling;
use grain_noise::{PermutationTable, TileOptions, pnoise3_tiled};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::BakeError;

/// Scale that maps noise in `[-1, 1]` onto the full `u16` range.
const FIXED_POINT_SCALE: f64 = 32767.5;

fn default_frequency() -> u32 {
    8
}

fn default_width() -> u32 {
    64
}

/// What to bake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BakeSettings {
    /// Noise cells per axis. The volume repeats exactly once per `frequency` cells.
    #[serde(default = "default_frequency")]
    pub frequency: u32,
    /// Texels per axis.
    #[serde(default = "default_width")]
    pub width: u32,
    /// Permutation shift of the second channel. Defaults to `frequency + 1`.
    #[serde(default)]
    pub second_channel_base: Option<i32>,
}

impl Default for BakeSettings {
    fn default() -> Self {
        Self {
            frequency: default_frequency(),
            width: default_width(),
            second_channel_base: None,
        }
    }
}

impl BakeSettings {
    /// Settings for `frequency` cells sampled by `width` texels per axis.
    #[must_use]
    pub const fn new(frequency: u32, width: u32) -> Self {
        Self {
            frequency,
            width,
            second_channel_base: None,
        }
    }

    /// Overrides the second channel's permutation shift.
    #[must_use]
    pub const fn with_second_channel_base(mut self, base: i32) -> Self {
        self.second_channel_base = Some(base);
        self
    }

    /// The permutation shift used for the second channel.
    #[must_use]
    pub const fn second_channel_base(&self) -> i32 {
        match self.second_channel_base {
            Some(base) => base,
            // Only the low bits survive the table mask.
            None => (self.frequency as i32).wrapping_add(1),
        }
    }

    /// Noise-space distance between neighbouring texels.
    #[must_use]
    pub fn scale(&self) -> f64 {
        f64::from(self.frequency) / f64::from(self.width)
    }

    fn texel_count(&self) -> Result<usize, BakeError> {
        if self.width == 0 {
            return Err(BakeError::ZeroWidth);
        }
        if self.frequency == 0 {
            return Err(BakeError::ZeroFrequency);
        }
        let width = usize::try_from(self.width).map_err(|_| BakeError::TooLarge(self.width))?;
        width
            .checked_mul(width)
            .and_then(|area| area.checked_mul(width))
            .ok_or(BakeError::TooLarge(self.width))
    }
}

/// Maps a noise value in `[-1, 1]` to `[0, 65535]`, truncating.
///
/// Values outside the range saturate.
#[must_use]
pub fn pack_sample(value: f64) -> u16 {
    ((value + 1.0) * FIXED_POINT_SCALE).clamp(0.0, f64::from(u16::MAX)) as u16
}

/// A baked cube of two-channel noise texels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoiseVolume {
    width: u32,
    texels: Vec<[u16; 2]>,
}

impl NoiseVolume {
    /// Bakes a volume with `table`.
    ///
    /// Texel `(x, y, z)` samples the torus at `(x, y, z) * frequency / width`,
    /// so texel `width` would land on texel `0` along every axis. Z slices are
    /// baked in parallel; the result does not depend on scheduling.
    pub fn bake(settings: &BakeSettings, table: &PermutationTable) -> Result<Self, BakeError> {
        let texel_count = settings.texel_count()?;
        if !settings.width.is_power_of_two() {
            tracing::warn!(
                width = settings.width,
                "Volume width is not a power of two; some texture targets prefer power-of-two sizes"
            );
        }

        let start = Instant::now();
        let width = settings.width as usize;
        let scale = settings.scale();
        let tiling = Tiling::cubic(settings.frequency);
        let first = TileOptions::new(tiling).with_table(table);
        let second = TileOptions::new(tiling.with_base(settings.second_channel_base())).with_table(table);

        let mut texels = vec![[0u16; 2]; texel_count];
        texels
            .par_chunks_mut(width * width)
            .enumerate()
            .try_for_each(|(z, slice)| -> Result<(), BakeError> {
                let nz = z as f64 * scale;
                for (index, texel) in slice.iter_mut().enumerate() {
                    let nx = (index % width) as f64 * scale;
                    let ny = (index / width) as f64 * scale;
                    *texel = [
                        pack_sample(pnoise3_tiled(nx, ny, nz, &first)?),
                        pack_sample(pnoise3_tiled(nx, ny, nz, &second)?),
                    ];
                }
                Ok(())
            })?;

        tracing::info!(
            width = settings.width,
            frequency = settings.frequency,
            texels = texel_count,
            elapsed = ?start.elapsed(),
            "Baked noise volume"
        );
        Ok(Self {
            width: settings.width,
            texels,
        })
    }

    /// Texels per axis.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// All texels, x fastest, then y, then z.
    #[must_use]
    pub fn texels(&self) -> &[[u16; 2]] {
        &self.texels
    }

    /// The texel at `(x, y, z)`, or `None` outside the volume.
    #[must_use]
    pub fn texel(&self, x: u32, y: u32, z: u32) -> Option<[u16; 2]> {
        if x >= self.width || y >= self.width || z >= self.width {
            return None;
        }
        let width = self.width as usize;
        let index = (z as usize * width + y as usize) * width + x as usize;
        self.texels.get(index).copied()
    }

    /// Raw little-endian bytes, four per texel (first channel, then second).
    #[must_use]
    pub fn to_le_bytes(&self) -> Vec<u8> {
        self.texels
            .iter()
            .flat_map(|[first, second]| {
                let [a, b] = first.to_le_bytes();
                let [c, d] = second.to_le_bytes();
                [a, b, c, d]
            })
            .collect()
    }
}
