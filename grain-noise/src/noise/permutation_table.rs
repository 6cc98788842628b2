//! Seedable permutation table used to hash integer lattice coordinates.
//!
//! The table stores `2 * period` entries, where the second half mirrors the
//! first. Kernels can then index with nested sums such as `perm(perm(x) + y)`
//! without reducing the inner sum, as long as each operand is below `period`.

use std::sync::LazyLock;

use rand::Rng;

use crate::error::NoiseError;

/// Ken Perlin's reference permutation.
#[rustfmt::skip]
const REFERENCE_PERMUTATION: [u8; 256] = [
    151, 160, 137, 91,  90,  15,  131, 13,  201, 95,  96,  53,  194, 233, 7,   225,
    140, 36,  103, 30,  69,  142, 8,   99,  37,  240, 21,  10,  23,  190, 6,   148,
    247, 120, 234, 75,  0,   26,  197, 62,  94,  252, 219, 203, 117, 35,  11,  32,
    57,  177, 33,  88,  237, 149, 56,  87,  174, 20,  125, 136, 171, 168, 68,  175,
    74,  165, 71,  134, 139, 48,  27,  166, 77,  146, 158, 231, 83,  111, 229, 122,
    60,  211, 133, 230, 220, 105, 92,  41,  55,  46,  245, 40,  244, 102, 143, 54,
    65,  25,  63,  161, 1,   216, 80,  73,  209, 76,  132, 187, 208, 89,  18,  169,
    200, 196, 135, 130, 116, 188, 159, 86,  164, 100, 109, 198, 173, 186, 3,   64,
    52,  217, 226, 250, 124, 123, 5,   202, 38,  147, 118, 126, 255, 82,  85,  212,
    207, 206, 59,  227, 47,  16,  58,  17,  182, 189, 28,  42,  223, 183, 170, 213,
    119, 248, 152, 2,   44,  154, 163, 70,  221, 153, 101, 155, 167, 43,  172, 9,
    129, 22,  39,  253, 19,  98,  108, 110, 79,  113, 224, 232, 178, 185, 112, 104,
    218, 246, 97,  228, 251, 34,  242, 193, 238, 210, 144, 12,  191, 179, 162, 241,
    81,  51,  145, 235, 249, 14,  239, 107, 49,  192, 214, 31,  181, 199, 106, 157,
    184, 84,  204, 176, 115, 121, 50,  45,  127, 4,   150, 254, 138, 236, 205, 93,
    222, 114, 67,  29,  24,  72,  243, 141, 128, 195, 78,  66,  215, 61,  156, 180,
];

static DEFAULT_PERMUTATION_TABLE: LazyLock<PermutationTable> = LazyLock::new(PermutationTable::new);

/// The process-wide reference table used by the facade defaults.
///
/// It is built once on first use and never mutated. Callers that need another
/// seed should construct their own [`PermutationTable`].
#[must_use]
pub fn default_permutation_table() -> &'static PermutationTable {
    &DEFAULT_PERMUTATION_TABLE
}

/// A permutation of `[0, period)` doubled into a `2 * period` backing store.
///
/// # Power-of-two periods
///
/// The Perlin kernels reduce cell indices with `index & (period - 1)`. That
/// mask is only a modulo when `period` is a power of two. Other periods are
/// accepted (the simplex kernels reduce with a true remainder) but the Perlin
/// kernels will hash through a sparse, non-uniform subset of the table. See
/// [`PermutationTable::is_power_of_two`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermutationTable {
    period: usize,
    values: Box<[usize]>,
}

impl Default for PermutationTable {
    fn default() -> Self {
        Self::new()
    }
}

impl PermutationTable {
    /// Creates the table from Ken Perlin's 256-entry reference permutation.
    #[must_use]
    pub fn new() -> Self {
        let period = REFERENCE_PERMUTATION.len();
        let values = REFERENCE_PERMUTATION
            .iter()
            .chain(REFERENCE_PERMUTATION.iter())
            .map(|&v| usize::from(v))
            .collect();
        Self { period, values }
    }

    /// Creates a freshly shuffled table using the thread-local random source.
    pub fn random(period: usize) -> Result<Self, NoiseError> {
        Self::with_rng(period, &mut rand::rng())
    }

    /// Creates a shuffled permutation of `[0, period)` using `rng`.
    ///
    /// The same seeded `rng` always yields the same table.
    pub fn with_rng<R: Rng + ?Sized>(period: usize, rng: &mut R) -> Result<Self, NoiseError> {
        let values = shuffled(period, rng)?;
        Ok(Self { period, values })
    }

    /// Creates a table from caller-supplied values.
    ///
    /// The period becomes `values.len()`. Values are copied as-is: duplicates
    /// and out-of-range entries are kept, so deliberately skewed tables keep
    /// their effect.
    pub fn from_values(values: &[usize]) -> Result<Self, NoiseError> {
        if values.is_empty() {
            return Err(NoiseError::EmptyTable);
        }
        Ok(Self {
            period: values.len(),
            values: values.iter().chain(values.iter()).copied().collect(),
        })
    }

    /// Replaces the table with a new shuffled permutation of `[0, period)`.
    ///
    /// The table is left untouched if `period` is rejected. Not safe to call
    /// while another thread reads this instance; build a new table instead.
    pub fn reseed<R: Rng + ?Sized>(&mut self, period: usize, rng: &mut R) -> Result<(), NoiseError> {
        self.values = shuffled(period, rng)?;
        self.period = period;
        tracing::trace!(period, len = self.values.len(), "reseeded permutation table");
        Ok(())
    }

    /// Looks up `index` in the doubled backing store.
    ///
    /// Kernels keep `index < 2 * period` by construction. An index past the end
    /// wraps around the store instead of panicking, so the result stays
    /// deterministic.
    #[inline]
    #[must_use]
    pub fn lookup(&self, index: usize) -> usize {
        match self.values.get(index) {
            Some(&value) => value,
            None => self.values[index % self.values.len()],
        }
    }

    /// Looks up `index + offset`, the nested-sum form the kernels hash with.
    ///
    /// Custom tables may hold values near `usize::MAX`; the sum wraps instead of
    /// overflowing and then goes through [`PermutationTable::lookup`].
    #[inline]
    #[must_use]
    pub fn lookup_offset(&self, index: usize, offset: usize) -> usize {
        self.lookup(index.wrapping_add(offset))
    }

    /// Number of distinct entries before the table repeats.
    #[inline]
    #[must_use]
    pub const fn period(&self) -> usize {
        self.period
    }

    /// Whether the period is a power of two, as the Perlin kernels require.
    #[must_use]
    pub const fn is_power_of_two(&self) -> bool {
        self.period.is_power_of_two()
    }

    /// The full doubled backing store.
    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.values
    }
}

/// Fisher-Yates shuffle of `[0, period)`, mirrored into a `2 * period` store.
fn shuffled<R: Rng + ?Sized>(period: usize, rng: &mut R) -> Result<Box<[usize]>, NoiseError> {
    if period == 0 {
        return Err(NoiseError::InvalidPeriod(period));
    }

    let mut values = vec![0usize; period * 2];
    for (i, value) in values.iter_mut().enumerate().take(period) {
        *value = i;
    }

    for i in 0..period {
        let j = rng.random_range(i..period);
        values.swap(i, j);
    }

    values.copy_within(0..period, period);
    Ok(values.into_boxed_slice())
}
