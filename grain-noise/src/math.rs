//! Scalar helpers shared by the noise kernels.

/// Floors `value` toward negative infinity and truncates to `i32`.
///
/// Coordinates beyond the `i32` range saturate, which only shifts which lattice
/// cell is hashed.
#[inline]
#[must_use]
pub fn floor(value: f64) -> i32 {
    value.floor() as i32
}

/// Improved Perlin fade curve `6t⁵ − 15t⁴ + 10t³`.
///
/// First and second derivatives vanish at `t = 0` and `t = 1`, which makes the
/// interpolated field C² continuous across cell boundaries.
#[inline]
#[must_use]
pub fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

/// Linear interpolation from `a` to `b`. Extrapolates for `t` outside `[0, 1]`.
#[inline]
#[must_use]
pub fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + t * (b - a)
}

/// Wraps `value` into `[0, period)`.
#[inline]
#[must_use]
pub fn wrap(value: f64, period: f64) -> f64 {
    let wrapped = value.rem_euclid(period);
    // rem_euclid can round up to `period` for tiny negative inputs
    if wrapped >= period { 0.0 } else { wrapped }
}

#[inline]
pub(crate) fn dot2(g: &[i32], x: f64, y: f64) -> f64 {
    f64::from(g[0]) * x + f64::from(g[1]) * y
}

#[inline]
pub(crate) fn dot3(g: &[i32; 3], x: f64, y: f64, z: f64) -> f64 {
    f64::from(g[0]) * x + f64::from(g[1]) * y + f64::from(g[2]) * z
}

#[inline]
pub(crate) fn dot4(g: &[i32; 4], x: f64, y: f64, z: f64, w: f64) -> f64 {
    f64::from(g[0]) * x + f64::from(g[1]) * y + f64::from(g[2]) * z + f64::from(g[3]) * w
}
