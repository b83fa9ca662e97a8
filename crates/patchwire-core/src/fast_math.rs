//! Table-driven sine and base-2 exponential.
//!
//! Oscillators call these once per sample, so both are O(1) lookups with
//! linear interpolation between adjacent entries. The tables are built on
//! first use and are read-only afterwards.
//!
//! | Function | Replaces | Domain | Max abs error |
//! |----------|----------|--------|---------------|
//! | [`fast_sin`] | `libm::sin` | all finite x | < 1e-4 |
//! | [`fast_exp2`] | `libm::exp2` | table over [-11, 11], exact outside | < 1e-4 |
//!
//! The error bound for [`fast_exp2`] is absolute, so it holds over the
//! covered range where results reach 2^11. Outside the covered range the
//! function falls back to `libm::exp2`.

use std::f64::consts::TAU;
use std::sync::LazyLock;

const SIN_LEN: usize = 1 << 10;
const SIN_FACTOR: f64 = SIN_LEN as f64 / TAU;

const EXP2_LO: f64 = -11.0;
const EXP2_HI: f64 = 11.0;
const EXP2_STEPS: usize = 1 << 16;
const EXP2_SCALE: f64 = EXP2_STEPS as f64 / (EXP2_HI - EXP2_LO);

/// Sampled function plus the slope to the next entry.
struct Table {
    value: Vec<f64>,
    slope: Vec<f64>,
}

static SIN_TABLE: LazyLock<Table> = LazyLock::new(|| {
    let value: Vec<f64> = (0..SIN_LEN)
        .map(|i| libm::sin(i as f64 / SIN_FACTOR))
        .collect();
    // Last slope wraps to entry 0 so the final segment interpolates too.
    let slope = (0..SIN_LEN)
        .map(|i| value[(i + 1) % SIN_LEN] - value[i])
        .collect();
    Table { value, slope }
});

static EXP2_TABLE: LazyLock<Table> = LazyLock::new(|| {
    let value: Vec<f64> = (0..=EXP2_STEPS)
        .map(|i| libm::exp2(EXP2_LO + i as f64 / EXP2_SCALE))
        .collect();
    let slope = value.windows(2).map(|w| w[1] - w[0]).collect();
    Table { value, slope }
});

/// Fast sine via a 1024-entry table with linear interpolation.
///
/// Negative arguments are reflected with `sin(-x) = -sin(x)`.
///
/// # Accuracy
///
/// Maximum absolute error: < 1e-4 (interpolation error is about 5e-6).
///
/// # Examples
///
/// ```
/// use patchwire_core::fast_math::fast_sin;
///
/// assert!(fast_sin(0.0).abs() < 1e-4);
/// assert!((fast_sin(std::f64::consts::FRAC_PI_2) - 1.0).abs() < 1e-4);
/// assert!((fast_sin(-std::f64::consts::FRAC_PI_2) + 1.0).abs() < 1e-4);
/// ```
#[inline]
pub fn fast_sin(x: f64) -> f64 {
    if x > 0.0 { sin_lerp(x) } else { -sin_lerp(-x) }
}

#[inline]
fn sin_lerp(x: f64) -> f64 {
    let table = &*SIN_TABLE;
    let f = x * SIN_FACTOR;
    let whole = f as usize;
    let i = whole & (SIN_LEN - 1);
    table.value[i] + table.slope[i] * (f - whole as f64)
}

/// Fast `2^x` via a table over [-11, 11] with linear interpolation.
///
/// Arguments outside the table (and NaN) fall back to `libm::exp2`.
///
/// # Accuracy
///
/// Maximum absolute error inside the table: < 1e-4 (about 1.5e-5 at x = 11).
/// Exact outside it.
///
/// # Examples
///
/// ```
/// use patchwire_core::fast_math::fast_exp2;
///
/// assert!((fast_exp2(0.0) - 1.0).abs() < 1e-4);
/// assert!((fast_exp2(-1.0) - 0.5).abs() < 1e-4);
/// assert_eq!(fast_exp2(20.0), 1_048_576.0);
/// ```
#[inline]
pub fn fast_exp2(x: f64) -> f64 {
    let f = (x - EXP2_LO) * EXP2_SCALE;
    if !(f >= 0.0 && f < EXP2_STEPS as f64) {
        return libm::exp2(x);
    }
    let table = &*EXP2_TABLE;
    let i = f as usize;
    table.value[i] + table.slope[i] * (f - i as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const ACCURACY: f64 = 1e-4;

    #[test]
    fn sin_reference_points() {
        let inputs = [
            PI,
            10000.0 * PI,
            2.0 * PI,
            1000.0 * 2.0 * PI,
            0.0,
            1.0,
            0.5,
            -1.0,
            -0.5,
            -1000.0,
            1000.0,
            -9.6466616586009283766724726e-01,
            9.9338225271646545763467022e-01,
            -2.7335587039794393342449301e-01,
            9.5586257685042792878173752e-01,
            -2.0875827063809575181543812e-01,
        ];
        for x in inputs {
            let got = fast_sin(x);
            let want = libm::sin(x);
            let delta = (got - want).abs();
            assert!(
                delta < ACCURACY,
                "fast_sin({x}) = {got}, want {want} ± {ACCURACY} (delta {delta})"
            );
        }
    }

    #[test]
    fn sin_accuracy_sweep() {
        let mut max_err: f64 = 0.0;
        for i in -20_000..20_000 {
            let x = i as f64 * 0.005; // -100.0 to 100.0
            let err = (fast_sin(x) - libm::sin(x)).abs();
            max_err = max_err.max(err);
        }
        assert!(max_err < ACCURACY, "fast_sin max error = {max_err}");
    }

    #[test]
    fn sin_is_odd() {
        for i in 1..500 {
            let x = i as f64 * 0.037;
            assert_eq!(fast_sin(-x), -fast_sin(x), "x = {x}");
        }
    }

    #[test]
    fn sin_last_segment_interpolates() {
        // Just below 2π, inside the final table segment.
        let x = TAU - 0.001;
        let err = (fast_sin(x) - libm::sin(x)).abs();
        assert!(err < ACCURACY, "fast_sin({x}) error = {err}");
    }

    #[test]
    fn exp2_reference_points() {
        let inputs = [
            7.0,
            6.0,
            5.0,
            4.0,
            3.0,
            2.0,
            1.0,
            0.5,
            0.0,
            -10.0,
            -9.0,
            -8.0,
            -7.0,
            -11.0,
            -4.0,
            -3.0,
            -2.0,
            -1.0,
            -0.5,
            3.1537839463286288034313104e+01,
            2.1361549283756232296144849e+02,
            8.2537402562185562902577219e-01,
            3.1021158628740294833424229e-02,
            7.9581744110252191462569661e+02,
            7.6019905892596359262696423e+00,
            3.7506882048388096973183084e+01,
            6.6250893439173561733216375e+00,
            3.5438267900243941544605339e+00,
            2.4281533133513300984289196e-03,
        ];
        for x in inputs {
            let got = fast_exp2(x);
            let want = libm::exp2(x);
            let delta = (got - want).abs();
            assert!(
                delta < ACCURACY,
                "fast_exp2({x}) = {got}, want {want} ± {ACCURACY} (delta {delta})"
            );
        }
    }

    #[test]
    fn exp2_accuracy_sweep() {
        let mut max_err: f64 = 0.0;
        for i in -11_000..11_000 {
            let x = i as f64 * 0.001; // covered range
            let err = (fast_exp2(x) - libm::exp2(x)).abs();
            max_err = max_err.max(err);
        }
        assert!(max_err < ACCURACY, "fast_exp2 max error = {max_err}");
    }

    #[test]
    fn exp2_falls_back_outside_table() {
        for x in [-30.0, -11.5, 11.0, 12.25, 40.0] {
            assert_eq!(fast_exp2(x), libm::exp2(x), "x = {x}");
        }
        assert!(fast_exp2(f64::NAN).is_nan());
    }
}
