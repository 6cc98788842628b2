//! Bakes a tileable two-channel noise volume to a raw texel file.
//!
//! Usage: `grain [config.json5]`. The log level follows `RUST_LOG`.

use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use grain_bake::NoiseVolume;
use tracing_subscriber::EnvFilter;

use crate::config::GrainConfig;

mod config;

const DEFAULT_CONFIG_PATH: &str = "grain.json5";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config_path = env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let config = GrainConfig::load(&config_path)?;

    let table = config.permutation_table()?;
    let volume = NoiseVolume::bake(&config.bake, &table).context("Failed to bake noise volume")?;

    fs::write(&config.output, volume.to_le_bytes())
        .with_context(|| format!("Failed to write {}", config.output.display()))?;
    tracing::info!(
        path = %config.output.display(),
        width = volume.width(),
        "Wrote noise volume"
    );
    Ok(())
}
