use grain_noise::NoiseError;
use thiserror::Error;

/// Errors that can occur while baking a noise volume.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BakeError {
    /// The volume needs at least one texel per axis.
    #[error("Volume width must be positive")]
    ZeroWidth,
    /// The noise needs at least one cell per axis.
    #[error("Noise frequency must be positive")]
    ZeroFrequency,
    /// `width³` texels do not fit in memory addressing.
    #[error("Volume width {0} is too large")]
    TooLarge(u32),
    /// The noise evaluation rejected its arguments.
    #[error(transparent)]
    Noise(#[from] NoiseError),
}
