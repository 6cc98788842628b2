//! `grain.json5` loading.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use grain_bake::BakeSettings;
use grain_noise::{PermutationTable, create_permutation_table_seeded};
use serde::{Deserialize, Serialize};

fn default_period() -> usize {
    256
}

fn default_output() -> PathBuf {
    PathBuf::from("noise_volume.bin")
}

/// Baker configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrainConfig {
    /// Volume size and noise frequency.
    #[serde(default)]
    pub bake: BakeSettings,
    /// Permutation table period for seeded tables.
    #[serde(default = "default_period")]
    pub period: usize,
    /// Empty for the reference table. Integers are used as-is, anything else
    /// is hashed.
    #[serde(default)]
    pub seed: String,
    /// Where the raw texel bytes are written.
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

impl Default for GrainConfig {
    fn default() -> Self {
        Self {
            bake: BakeSettings::default(),
            period: default_period(),
            seed: String::new(),
            output: default_output(),
        }
    }
}

impl GrainConfig {
    /// Reads the config at `path`, or the defaults if there is no file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "No config file found, using defaults");
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Failed to parse config {}", path.display()))
    }

    /// Parses JSON5 config text.
    pub fn parse(text: &str) -> Result<Self, serde_json5::Error> {
        serde_json5::from_str(text)
    }

    /// The numeric seed, or `None` for the reference table.
    #[must_use]
    pub fn resolved_seed(&self) -> Option<i64> {
        if self.seed.is_empty() {
            return None;
        }
        Some(self.seed.parse().unwrap_or_else(|_| {
            let mut hash: i64 = 0;
            for byte in self.seed.bytes() {
                hash = hash.wrapping_mul(31).wrapping_add(i64::from(byte));
            }
            hash
        }))
    }

    /// Builds the permutation table selected by `seed` and `period`.
    pub fn permutation_table(&self) -> Result<PermutationTable> {
        let Some(seed) = self.resolved_seed() else {
            if self.period != default_period() {
                tracing::warn!(
                    period = self.period,
                    "Period is ignored without a seed; using the 256-entry reference table"
                );
            }
            return Ok(PermutationTable::new());
        };
        let table = create_permutation_table_seeded(self.period, seed as u64)
            .with_context(|| format!("Invalid permutation period {}", self.period))?;
        if !table.is_power_of_two() {
            tracing::warn!(
                period = self.period,
                "Permutation period is not a power of two; Perlin lattice hashing will be skewed"
            );
        }
        Ok(table)
    }
}
