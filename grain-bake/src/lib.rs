//! Bakes seamless two-channel 3D noise volumes.
//!
//! A volume is `width³` texels of tileable Perlin noise sampled on a torus of
//! `frequency` cells per axis. Each texel packs two decorrelated channels as
//! unsigned 16-bit fixed point, ready for upload as an `RG16` 3D texture that
//! wraps without seams.

mod error;
mod volume;

pub use error::BakeError;
pub use volume::{BakeSettings, NoiseVolume, pack_sample};
