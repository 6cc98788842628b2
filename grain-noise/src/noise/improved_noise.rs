//! Single-octave Improved Perlin noise in one to three dimensions.
//!
//! Cell indices are reduced with `floor(x) & (period - 1)`, so the permutation
//! table period must be a power of two. Other periods are not rejected here;
//! they silently hash through the wrong subset of the table.
//!
//! Every kernel returns exactly `0.0` on integer lattice points: all fractional
//! offsets and fade weights are zero there, which selects the origin corner,
//! whose offset vector is zero.

use crate::math::{dot2, dot3, fade, floor, lerp};
use crate::noise::{GRAD3, PermutationTable};

/// Reduces `coord` to a lattice index in `[0, period)`, shifted by `base`.
#[inline]
fn lattice_index(coord: f64, base: i32, table: &PermutationTable) -> usize {
    let period = table.period() as i64;
    let cell = i64::from(floor(coord)) & (period - 1);
    (cell + i64::from(base)).rem_euclid(period) as usize
}

#[inline]
fn gradient(hash: usize) -> &'static [i32; 3] {
    &GRAD3[hash % GRAD3.len()]
}

/// 1D Improved Perlin noise using the x component of the 3D gradient set.
#[must_use]
pub fn improved_noise_1d(x: f64, base: i32, table: &PermutationTable) -> f64 {
    let xi = lattice_index(x, base, table);
    let xf = x - x.floor();
    let u = fade(xf);

    let g0 = gradient(table.lookup(xi))[0];
    let g1 = gradient(table.lookup_offset(xi, 1))[0];
    lerp(u, f64::from(g0) * xf, f64::from(g1) * (xf - 1.0))
}

/// 2D Improved Perlin noise using the x/y components of the 3D gradient set.
#[must_use]
pub fn improved_noise_2d(x: f64, y: f64, base: i32, table: &PermutationTable) -> f64 {
    let xi = lattice_index(x, base, table);
    let yi = lattice_index(y, base, table);
    let xf = x - x.floor();
    let yf = y - y.floor();
    let u = fade(xf);
    let v = fade(yf);

    let a = table.lookup(xi).wrapping_add(yi);
    let b = table.lookup_offset(xi, 1).wrapping_add(yi);

    lerp(
        v,
        lerp(
            u,
            dot2(gradient(table.lookup(a)), xf, yf),
            dot2(gradient(table.lookup(b)), xf - 1.0, yf),
        ),
        lerp(
            u,
            dot2(gradient(table.lookup_offset(a, 1)), xf, yf - 1.0),
            dot2(gradient(table.lookup_offset(b, 1)), xf - 1.0, yf - 1.0),
        ),
    )
}

/// 3D Improved Perlin noise.
#[must_use]
pub fn improved_noise_3d(x: f64, y: f64, z: f64, base: i32, table: &PermutationTable) -> f64 {
    let xi = lattice_index(x, base, table);
    let yi = lattice_index(y, base, table);
    let zi = lattice_index(z, base, table);
    let xf = x - x.floor();
    let yf = y - y.floor();
    let zf = z - z.floor();

    sample_and_lerp(table, [xi, yi, zi], [xi + 1, yi + 1, zi + 1], xf, yf, zf)
}

/// Hashes the eight corners of a cell and trilinearly blends their gradient
/// contributions.
///
/// `near` and `far` hold the lattice indices of the low and high corner on each
/// axis. The plain kernel passes `i` and `i + 1`; the toroidal kernel passes
/// the wrapped successor instead. Every index must be below `period` (a far
/// index may equal `period`), which keeps every nested lookup inside the
/// doubled store for proper permutations. Custom tables with larger values
/// still hash deterministically through [`PermutationTable::lookup_offset`].
#[inline]
pub(crate) fn sample_and_lerp(
    table: &PermutationTable,
    near: [usize; 3],
    far: [usize; 3],
    xf: f64,
    yf: f64,
    zf: f64,
) -> f64 {
    let [x0, y0, z0] = near;
    let [x1, y1, z1] = far;

    let a = table.lookup(x0);
    let b = table.lookup(x1);
    let aa = table.lookup_offset(a, y0);
    let ab = table.lookup_offset(a, y1);
    let ba = table.lookup_offset(b, y0);
    let bb = table.lookup_offset(b, y1);

    let u = fade(xf);
    let v = fade(yf);
    let w = fade(zf);

    let corner = |row: usize, z: usize, dx: f64, dy: f64, dz: f64| {
        dot3(gradient(table.lookup_offset(row, z)), dx, dy, dz)
    };

    lerp(
        w,
        lerp(
            v,
            lerp(u, corner(aa, z0, xf, yf, zf), corner(ba, z0, xf - 1.0, yf, zf)),
            lerp(
                u,
                corner(ab, z0, xf, yf - 1.0, zf),
                corner(bb, z0, xf - 1.0, yf - 1.0, zf),
            ),
        ),
        lerp(
            v,
            lerp(
                u,
                corner(aa, z1, xf, yf, zf - 1.0),
                corner(ba, z1, xf - 1.0, yf, zf - 1.0),
            ),
            lerp(
                u,
                corner(ab, z1, xf, yf - 1.0, zf - 1.0),
                corner(bb, z1, xf - 1.0, yf - 1.0, zf - 1.0),
            ),
        ),
    )
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_zero_on_lattice_points() {
        let table = PermutationTable::new();
        for i in -5..=5 {
            let x = f64::from(i);
            assert_eq!(improved_noise_1d(x, 0, &table), 0.0);
            for j in -3..=3 {
                let y = f64::from(j);
                assert_eq!(improved_noise_2d(x, y, 0, &table), 0.0);
                for k in -2..=2 {
                    let z = f64::from(k);
                    assert_eq!(improved_noise_3d(x, y, z, 0, &table), 0.0);
                    assert_eq!(improved_noise_3d(x, y, z, 17, &table), 0.0);
                }
            }
        }
    }

    #[test]
    fn test_1d_known_values() {
        // perm[0] = 151 -> grad 7 (x = -1), perm[1] = 160 -> grad 4 (x = 1)
        let table = PermutationTable::new();
        assert_eq!(improved_noise_1d(0.5, 0, &table), -0.5);
        assert_eq!(improved_noise_1d(0.5, 5, &table), -0.25);
        assert_eq!(improved_noise_1d(0.5, 1, &table), 0.5);
    }

    #[test]
    fn test_base_matches_integer_translation() {
        let table = PermutationTable::new();
        assert_eq!(
            improved_noise_3d(0.25, 0.5, 0.75, 5, &table),
            improved_noise_3d(5.25, 5.5, 5.75, 0, &table)
        );
        assert_eq!(
            improved_noise_2d(0.125, 0.375, -3, &table),
            improved_noise_2d(-2.875, -2.625, 0, &table)
        );
    }

    #[test]
    fn test_periodic_over_table_period() {
        let table = PermutationTable::new();
        let a = improved_noise_3d(1.3, 2.7, 3.1, 0, &table);
        let b = improved_noise_3d(1.3 + 256.0, 2.7, 3.1 - 256.0, 0, &table);
        assert!((a - b).abs() < 1e-9);
    }

    #[test]
    fn test_continuous_across_cell_boundary() {
        let table = PermutationTable::new();
        let eps = 1e-9;
        for i in 1..8 {
            let edge = f64::from(i);
            let below = improved_noise_3d(edge - eps, 0.4, 0.6, 0, &table);
            let above = improved_noise_3d(edge + eps, 0.4, 0.6, 0, &table);
            assert!((below - above).abs() < 1e-6, "jump at x = {edge}");
        }
    }

    #[test]
    fn test_non_power_of_two_period_skips_cells() {
        // period 6 masks with `& 5`, so cells 2 and 3 are never hashed
        let table = PermutationTable::from_values(&[2, 0, 1, 4, 3, 5]).expect("non-empty");
        let visited: FxHashSet<usize> = (-64..64)
            .map(|i| lattice_index(f64::from(i) + 0.5, 0, &table))
            .collect();
        let expected: FxHashSet<usize> = [0, 1, 4, 5].into_iter().collect();
        assert_eq!(visited, expected);
        assert_eq!(improved_noise_1d(0.25, 0, &table), improved_noise_1d(2.25, 0, &table));

        let reference = PermutationTable::new();
        let visited: FxHashSet<usize> = (0..256)
            .map(|i| lattice_index(f64::from(i) + 0.5, 0, &reference))
            .collect();
        assert_eq!(visited.len(), 256);
    }

    #[test]
    fn test_non_power_of_two_period_still_evaluates() {
        // Precondition violation: results are deterministic but not a proper hash.
        let table = PermutationTable::from_values(&[2, 0, 1, 4, 3, 5]).expect("non-empty");
        let a = improved_noise_3d(7.3, -2.2, 11.9, 0, &table);
        let b = improved_noise_3d(7.3, -2.2, 11.9, 0, &table);
        assert!(a.is_finite());
        assert_eq!(a, b);
    }
}
