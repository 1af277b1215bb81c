//! Small stateless helpers used throughout the models.

/// Evenly spaced values in `[start, stop)`.
///
/// Holds `ceil((stop - start) / step)` elements; empty when that count is not positive.
pub fn arange(start: f64, stop: f64, step: f64) -> Vec<f64> {
    let n = ((stop - start) / step).ceil();
    if n.is_nan() || n <= 0.0 {
        return Vec::new();
    }
    (0..n as usize).map(|i| start + i as f64 * step).collect()
}

/// One-dimensional linear interpolation of `x` over the sample points `(xp, fp)`.
///
/// `xp` must be increasing. Values outside the sampled range clamp to the end points.
pub fn interp(x: f64, xp: &[f64], fp: &[f64]) -> f64 {
    debug_assert_eq!(xp.len(), fp.len());
    let (Some(&first), Some(&last)) = (xp.first(), xp.last()) else {
        return f64::NAN;
    };
    if x <= first {
        return fp.first().copied().unwrap_or(f64::NAN);
    }
    if x >= last {
        return fp.last().copied().unwrap_or(f64::NAN);
    }

    let Some(i) = xp.windows(2).position(|w| x >= w[0] && x < w[1]) else {
        return f64::NAN;
    };
    match (fp.get(i), fp.get(i + 1)) {
        (Some(&f0), Some(&f1)) => f0 + (f1 - f0) * ((x - xp[i]) / (xp[i + 1] - xp[i])),
        _ => f64::NAN,
    }
}

/// Largest element; negative infinity for an empty slice.
pub fn max(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

/// Two-breakpoint profile: `y0` up to `x0`, `y1` from `x1`, linear in between.
pub fn ramp(x: f64, (x0, y0): (f64, f64), (x1, y1): (f64, f64)) -> f64 {
    if x <= x0 {
        y0
    } else if x >= x1 {
        y1
    } else {
        y0 + (y1 - y0) * (x - x0) / (x1 - x0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_arange_length_rounds_up() {
        assert_eq!(arange(0.0, 5.0, 1.0), vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(arange(0.0, 1.0, 0.3).len(), 4);
        assert!(arange(3.0, 3.0, 1.0).is_empty());
        assert!(arange(0.0, f64::NAN, 1.0).is_empty());
    }

    #[test]
    fn test_interp_inside_and_clamped() {
        let xp = [0.0, 1.0, 3.0];
        let fp = [10.0, 20.0, 0.0];
        assert_abs_diff_eq!(interp(0.5, &xp, &fp), 15.0, epsilon = 1e-12);
        assert_abs_diff_eq!(interp(2.0, &xp, &fp), 10.0, epsilon = 1e-12);
        assert_eq!(interp(1.0, &xp, &fp), 20.0);
        assert_eq!(interp(-4.0, &xp, &fp), 10.0);
        assert_eq!(interp(7.0, &xp, &fp), 0.0);
    }

    #[test]
    fn test_interp_empty_is_nan() {
        assert!(interp(1.0, &[], &[]).is_nan());
    }

    #[test]
    fn test_max() {
        assert_eq!(max(&[1.0, -2.0, 7.5, 3.0]), 7.5);
        assert_eq!(max(&[]), f64::NEG_INFINITY);
    }

    #[test]
    fn test_ramp_plateaus_and_slope() {
        let lo = (500.0, 40.0);
        let hi = (1500.0, 10.0);
        assert_eq!(ramp(0.0, lo, hi), 40.0);
        assert_eq!(ramp(500.0, lo, hi), 40.0);
        assert_abs_diff_eq!(ramp(1000.0, lo, hi), 25.0, epsilon = 1e-12);
        assert_eq!(ramp(1500.0, lo, hi), 10.0);
        assert_eq!(ramp(9000.0, lo, hi), 10.0);
    }
}
