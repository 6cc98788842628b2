//! Deterministic gradient noise for procedural textures and terrain.
//!
//! The kernels in [`noise`] take an explicit [`PermutationTable`] and never
//! touch global state. [`facade`] binds the usual defaults (one octave,
//! persistence 0.5, lacunarity 2.0, the shared reference table) and adds
//! validated multi-octave entry points.

pub mod error;
pub mod facade;
pub mod math;
pub mod noise;

pub use error::NoiseError;
pub use facade::{
    PerlinOptions, SimplexOptions, TileOptions, create_permutation_table,
    create_permutation_table_from, create_permutation_table_seeded, pnoise1, pnoise1_with, pnoise2,
    pnoise2_with, pnoise3, pnoise3_tiled, pnoise3_with, snoise2, snoise2_with, snoise3,
    snoise3_with, snoise4, snoise4_with,
};
pub use noise::{Octaves, PermutationTable, Tiling, default_permutation_table};
