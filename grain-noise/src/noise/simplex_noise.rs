//! Single-octave simplex noise in two to four dimensions.
//!
//! The input is skewed onto a lattice of simplices, so only `d + 1` corners
//! contribute to each sample instead of the `2^d` corners of a hypercube.
//! Results are bounded to roughly `[-1, 1]` but, unlike Perlin noise, are not
//! zero on integer lattice points.
//!
//! Cell indices are reduced with a true remainder, so any permutation period
//! works here.

use crate::math::{dot2, dot3, dot4, floor};
use crate::noise::{GRAD3, GRAD4, PermutationTable, SIMPLEX_TRAVERSAL};

#[allow(clippy::unreadable_literal)]
const SQRT_3: f64 = 1.7320508075688772;
#[allow(clippy::unreadable_literal)]
const SQRT_5: f64 = 2.23606797749979;

/// Skewing factor for 2D simplex: `0.5 * (sqrt(3) - 1)`
pub const F2: f64 = 0.5 * (SQRT_3 - 1.0);
/// Unskewing factor for 2D simplex: `(3 - sqrt(3)) / 6`
pub const G2: f64 = (3.0 - SQRT_3) / 6.0;
/// Skewing factor for 3D simplex: `1/3`
pub const F3: f64 = 1.0 / 3.0;
/// Unskewing factor for 3D simplex: `1/6`
pub const G3: f64 = 1.0 / 6.0;
/// Skewing factor for 4D simplex: `(sqrt(5) - 1) / 4`
pub const F4: f64 = (SQRT_5 - 1.0) / 4.0;
/// Unskewing factor for 4D simplex: `(5 - sqrt(5)) / 20`
pub const G4: f64 = (5.0 - SQRT_5) / 20.0;

/// Squared radius of each corner's influence.
const RADIUS_SQ_2D: f64 = 0.5;
const RADIUS_SQ_3D: f64 = 0.6;
const RADIUS_SQ_4D: f64 = 0.6;

/// Output scales that stretch each kernel to roughly `[-1, 1]`.
const SCALE_2D: f64 = 70.0;
const SCALE_3D: f64 = 32.0;
const SCALE_4D: f64 = 27.0;

#[inline]
fn cell_index(cell: i32, table: &PermutationTable) -> usize {
    i64::from(cell).rem_euclid(table.period() as i64) as usize
}

/// Radial falloff `max(0, r² - |d|²)⁴`.
#[inline]
fn falloff(radius_sq: f64, dist_sq: f64) -> f64 {
    let t = radius_sq - dist_sq;
    if t > 0.0 {
        let t = t * t;
        t * t
    } else {
        0.0
    }
}

#[inline]
fn corner_2d(hash: usize, x: f64, y: f64) -> f64 {
    falloff(RADIUS_SQ_2D, x * x + y * y) * dot2(&GRAD3[hash % 12], x, y)
}

#[inline]
fn corner_3d(hash: usize, x: f64, y: f64, z: f64) -> f64 {
    falloff(RADIUS_SQ_3D, x * x + y * y + z * z) * dot3(&GRAD3[hash % 12], x, y, z)
}

#[inline]
fn corner_4d(hash: usize, [x, y, z, w]: [f64; 4]) -> f64 {
    falloff(RADIUS_SQ_4D, x * x + y * y + z * z + w * w) * dot4(&GRAD4[hash % 32], x, y, z, w)
}

/// Sample 2D simplex noise.
#[must_use]
pub fn simplex_noise_2d(x: f64, y: f64, table: &PermutationTable) -> f64 {
    let s = (x + y) * F2;
    let i = floor(x + s);
    let j = floor(y + s);
    let t = (f64::from(i) + f64::from(j)) * G2;
    let x0 = x - (f64::from(i) - t);
    let y0 = y - (f64::from(j) - t);

    // Lower or upper triangle of the skewed cell
    let (i1, j1): (u8, u8) = if x0 > y0 { (1, 0) } else { (0, 1) };

    let x1 = x0 - f64::from(i1) + G2;
    let y1 = y0 - f64::from(j1) + G2;
    let x2 = x0 - 1.0 + 2.0 * G2;
    let y2 = y0 - 1.0 + 2.0 * G2;

    let ii = cell_index(i, table);
    let jj = cell_index(j, table);
    let hash = |di: u8, dj: u8| {
        let row = table.lookup_offset(jj, usize::from(dj));
        table.lookup_offset(ii + usize::from(di), row)
    };
    let gi0 = hash(0, 0);
    let gi1 = hash(i1, j1);
    let gi2 = hash(1, 1);

    SCALE_2D * (corner_2d(gi0, x0, y0) + corner_2d(gi1, x1, y1) + corner_2d(gi2, x2, y2))
}

/// Sample 3D simplex noise.
#[must_use]
pub fn simplex_noise_3d(x: f64, y: f64, z: f64, table: &PermutationTable) -> f64 {
    let s = (x + y + z) * F3;
    let i = floor(x + s);
    let j = floor(y + s);
    let k = floor(z + s);
    let t = (f64::from(i) + f64::from(j) + f64::from(k)) * G3;
    let x0 = x - (f64::from(i) - t);
    let y0 = y - (f64::from(j) - t);
    let z0 = z - (f64::from(k) - t);

    // Which of the six tetrahedra of the skewed cube holds the point
    let (i1, j1, k1, i2, j2, k2): (u8, u8, u8, u8, u8, u8) = if x0 >= y0 {
        if y0 >= z0 {
            (1, 0, 0, 1, 1, 0)
        } else if x0 >= z0 {
            (1, 0, 0, 1, 0, 1)
        } else {
            (0, 0, 1, 1, 0, 1)
        }
    } else if y0 < z0 {
        (0, 0, 1, 0, 1, 1)
    } else if x0 < z0 {
        (0, 1, 0, 0, 1, 1)
    } else {
        (0, 1, 0, 1, 1, 0)
    };

    let x1 = x0 - f64::from(i1) + G3;
    let y1 = y0 - f64::from(j1) + G3;
    let z1 = z0 - f64::from(k1) + G3;
    let x2 = x0 - f64::from(i2) + 2.0 * G3;
    let y2 = y0 - f64::from(j2) + 2.0 * G3;
    let z2 = z0 - f64::from(k2) + 2.0 * G3;
    let x3 = x0 - 1.0 + 3.0 * G3;
    let y3 = y0 - 1.0 + 3.0 * G3;
    let z3 = z0 - 1.0 + 3.0 * G3;

    let ii = cell_index(i, table);
    let jj = cell_index(j, table);
    let kk = cell_index(k, table);
    let hash = |di: u8, dj: u8, dk: u8| {
        let row = table.lookup_offset(kk, usize::from(dk));
        let row = table.lookup_offset(jj + usize::from(dj), row);
        table.lookup_offset(ii + usize::from(di), row)
    };

    SCALE_3D
        * (corner_3d(hash(0, 0, 0), x0, y0, z0)
            + corner_3d(hash(i1, j1, k1), x1, y1, z1)
            + corner_3d(hash(i2, j2, k2), x2, y2, z2)
            + corner_3d(hash(1, 1, 1), x3, y3, z3))
}

/// 6-bit code describing the magnitude ordering of a 4D offset.
///
/// Bits, high to low: `x > y`, `x > z`, `y > z`, `x > w`, `y > w`, `z > w`.
/// Index into [`SIMPLEX_TRAVERSAL`].
#[must_use]
pub fn simplex_ordering_code(x: f64, y: f64, z: f64, w: f64) -> usize {
    (usize::from(x > y) << 5)
        | (usize::from(x > z) << 4)
        | (usize::from(y > z) << 3)
        | (usize::from(x > w) << 2)
        | (usize::from(y > w) << 1)
        | usize::from(z > w)
}

/// Lattice offsets of simplex corners 1 to 4 for an ordering code.
///
/// Corner 0 is the cell origin. Each following corner steps one unit along the
/// next-largest axis, so corner 4 is always `(1, 1, 1, 1)`. Codes past 63 are
/// masked; codes with an all-zero traversal row are unreachable from
/// [`simplex_ordering_code`] and yield the origin for corners 1 to 3.
#[must_use]
pub fn simplex_corner_offsets(code: usize) -> [[u8; 4]; 4] {
    let rank = SIMPLEX_TRAVERSAL[code & 63];
    let step = |threshold: u8| rank.map(|r| u8::from(r >= threshold));
    [step(3), step(2), step(1), [1, 1, 1, 1]]
}

/// Sample 4D simplex noise.
#[must_use]
pub fn simplex_noise_4d(x: f64, y: f64, z: f64, w: f64, table: &PermutationTable) -> f64 {
    let s = (x + y + z + w) * F4;
    let cell = [floor(x + s), floor(y + s), floor(z + s), floor(w + s)];
    let t = cell.iter().map(|&c| f64::from(c)).sum::<f64>() * G4;
    let origin = [
        x - (f64::from(cell[0]) - t),
        y - (f64::from(cell[1]) - t),
        z - (f64::from(cell[2]) - t),
        w - (f64::from(cell[3]) - t),
    ];

    let [ii, jj, kk, ll] = cell.map(|c| cell_index(c, table));
    let hash = |[di, dj, dk, dl]: [u8; 4]| {
        let row = table.lookup_offset(ll, usize::from(dl));
        let row = table.lookup_offset(kk + usize::from(dk), row);
        let row = table.lookup_offset(jj + usize::from(dj), row);
        table.lookup_offset(ii + usize::from(di), row)
    };

    let [x0, y0, z0, w0] = origin;
    let offsets = simplex_corner_offsets(simplex_ordering_code(x0, y0, z0, w0));

    let mut n = corner_4d(hash([0; 4]), origin);
    for (step, offset) in (1u8..).zip(offsets) {
        let unskew = f64::from(step) * G4;
        let d = [
            x0 - f64::from(offset[0]) + unskew,
            y0 - f64::from(offset[1]) + unskew,
            z0 - f64::from(offset[2]) + unskew,
            w0 - f64::from(offset[3]) + unskew,
        ];
        n += corner_4d(hash(offset), d);
    }

    SCALE_4D * n
}

#[cfg(test)]
mod tests {
    use std::array;

    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_simplex_noise_deterministic() {
        let table = PermutationTable::with_rng(256, &mut StdRng::seed_from_u64(42)).expect("valid");
        for i in 0..10 {
            let x = f64::from(i) * 13.7;
            let z = f64::from(i) * 7.3;
            #[allow(clippy::float_cmp)]
            {
                assert_eq!(simplex_noise_2d(x, z, &table), simplex_noise_2d(x, z, &table));
                assert_eq!(
                    simplex_noise_4d(x, z, -x, 0.5, &table),
                    simplex_noise_4d(x, z, -x, 0.5, &table)
                );
            }
        }
    }

    #[test]
    fn test_simplex_spatial_variation() {
        let table = PermutationTable::new();
        let spread = |values: Vec<f64>| {
            let min = values.iter().copied().fold(f64::INFINITY, f64::min);
            let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            max - min
        };

        let samples_2d = (0..20)
            .map(|i| simplex_noise_2d(f64::from(i) * 0.37, f64::from(i) * 0.23, &table))
            .collect();
        let samples_3d = (0..20)
            .map(|i| simplex_noise_3d(f64::from(i) * 0.37, f64::from(i) * 0.23, 0.5, &table))
            .collect();
        let samples_4d = (0..20)
            .map(|i| simplex_noise_4d(f64::from(i) * 0.37, 0.1, f64::from(i) * 0.23, 0.7, &table))
            .collect();

        assert!(spread(samples_2d) > 0.01, "2D simplex should vary");
        assert!(spread(samples_3d) > 0.01, "3D simplex should vary");
        assert!(spread(samples_4d) > 0.01, "4D simplex should vary");
    }

    #[test]
    fn test_simplex_bounded() {
        let table = PermutationTable::new();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..2000 {
            let [x, y, z, w]: [f64; 4] = array::from_fn(|_| rng.random_range(-64.0..64.0));
            for value in [
                simplex_noise_2d(x, y, &table),
                simplex_noise_3d(x, y, z, &table),
                simplex_noise_4d(x, y, z, w, &table),
            ] {
                assert!(value.abs() <= 1.05, "out of range: {value}");
            }
        }
    }

    #[test]
    fn test_corner_offsets_extremes() {
        // w > z > y > x: every comparison false
        assert_eq!(
            simplex_corner_offsets(0),
            [[0, 0, 0, 1], [0, 0, 1, 1], [0, 1, 1, 1], [1, 1, 1, 1]]
        );
        // x > y > z > w: every comparison true
        assert_eq!(
            simplex_corner_offsets(63),
            [[1, 0, 0, 0], [1, 1, 0, 0], [1, 1, 1, 0], [1, 1, 1, 1]]
        );
        // y > x > w > z
        assert_eq!(simplex_ordering_code(0.3, 0.4, 0.1, 0.2), 0b011110);
        assert_eq!(
            simplex_corner_offsets(0b011110),
            [[0, 1, 0, 0], [1, 1, 0, 0], [1, 1, 0, 1], [1, 1, 1, 1]]
        );
    }

    #[test]
    fn test_corner_offsets_follow_coordinate_order() {
        let magnitudes = [0.1, 0.2, 0.3, 0.4];
        let mut seen = 0;
        for a in 0..4 {
            for b in 0..4 {
                for c in 0..4 {
                    for d in 0..4 {
                        let order = [a, b, c, d];
                        if (1..4).any(|n| order[..n].contains(&order[n])) {
                            continue;
                        }
                        seen += 1;
                        let v = order.map(|o| magnitudes[o]);
                        let code = simplex_ordering_code(v[0], v[1], v[2], v[3]);
                        assert_eq!(
                            SIMPLEX_TRAVERSAL[code],
                            order.map(|o| o as u8),
                            "traversal row for code {code} should rank the axes"
                        );

                        let offsets = simplex_corner_offsets(code);
                        let mut previous = [0u8; 4];
                        for (step, corner) in offsets.iter().enumerate() {
                            let added: Vec<usize> = (0..4).filter(|&axis| corner[axis] != previous[axis]).collect();
                            assert_eq!(added.len(), 1, "corner {step} should add exactly one axis");
                            // The axis added at step s is the one with the (3 - s)-th rank
                            assert_eq!(order[added[0]], 3 - step);
                            previous = *corner;
                        }
                    }
                }
            }
        }
        assert_eq!(seen, 24);
    }

    #[test]
    fn test_ordering_code_with_ties_is_reachable() {
        for v in [[0.5, 0.5, 0.5, 0.5], [0.1, 0.1, 0.3, 0.3], [0.9, 0.2, 0.9, 0.0]] {
            let code = simplex_ordering_code(v[0], v[1], v[2], v[3]);
            assert_ne!(SIMPLEX_TRAVERSAL[code], [0, 0, 0, 0], "code {code} for {v:?}");
        }
    }

    #[test]
    fn test_any_period_is_supported() {
        let table = PermutationTable::from_values(&[4, 2, 0, 5, 1, 3]).expect("non-empty");
        for i in -10..10 {
            let t = f64::from(i) * 1.7;
            assert!(simplex_noise_2d(t, -t, &table).is_finite());
            assert!(simplex_noise_3d(t, -t, t * 0.5, &table).is_finite());
            assert!(simplex_noise_4d(t, -t, t * 0.5, 3.0 - t, &table).is_finite());
        }
    }
}
