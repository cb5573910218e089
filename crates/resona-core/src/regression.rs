//! Least-squares linear regression.
//!
//! The decay-time estimator fits a line through a stretch of the energy
//! decay curve and gates the result on the Pearson correlation of the fit.
//! Sums are accumulated in f64; a curve can easily hold 10^5 points.

use libm::sqrt;

/// Result of a least-squares line fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    /// Slope in y-units per x-unit.
    pub slope: f32,
    /// y value at x = 0.
    pub intercept: f32,
    /// Pearson correlation coefficient, in [-1, 1].
    pub correlation: f32,
}

/// Fit `y = slope * x + intercept` over paired samples.
///
/// Returns `None` when fewer than two points are given, when the x values
/// are all identical (vertical line), or when the data is otherwise
/// degenerate. A perfectly flat `y` yields slope 0 with correlation 0.
pub fn linear_fit(x: &[f32], y: &[f32]) -> Option<LinearFit> {
    let n = x.len().min(y.len());
    if n < 2 {
        return None;
    }

    let mut sum_x = 0.0f64;
    let mut sum_y = 0.0f64;
    let mut sum_xy = 0.0f64;
    let mut sum_xx = 0.0f64;
    let mut sum_yy = 0.0f64;

    for i in 0..n {
        let xi = f64::from(x[i]);
        let yi = f64::from(y[i]);
        sum_x += xi;
        sum_y += yi;
        sum_xy += xi * yi;
        sum_xx += xi * xi;
        sum_yy += yi * yi;
    }

    let nf = n as f64;
    let var_x = nf * sum_xx - sum_x * sum_x;
    if var_x <= 0.0 {
        return None;
    }

    let cov_xy = nf * sum_xy - sum_x * sum_y;
    let slope = cov_xy / var_x;
    let intercept = (sum_y - slope * sum_x) / nf;

    let var_y = nf * sum_yy - sum_y * sum_y;
    let denom = sqrt(var_x * var_y);
    let correlation = if denom > 0.0 { cov_xy / denom } else { 0.0 };

    Some(LinearFit {
        slope: slope as f32,
        intercept: intercept as f32,
        correlation: correlation.clamp(-1.0, 1.0) as f32,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovers_exact_line() {
        let x: Vec<f32> = (0..100).map(|i| i as f32 * 0.01).collect();
        let y: Vec<f32> = x.iter().map(|&t| -60.0 * t + 5.0).collect();

        let fit = linear_fit(&x, &y).unwrap();
        assert!((fit.slope - (-60.0)).abs() < 1e-3);
        assert!((fit.intercept - 5.0).abs() < 1e-3);
        assert!((fit.correlation - (-1.0)).abs() < 1e-6);
    }

    #[test]
    fn positive_slope_positive_correlation() {
        let x = [0.0f32, 1.0, 2.0, 3.0];
        let y = [1.0f32, 2.0, 3.0, 4.0];
        let fit = linear_fit(&x, &y).unwrap();
        assert!((fit.slope - 1.0).abs() < 1e-6);
        assert!(fit.correlation > 0.999);
    }

    #[test]
    fn rejects_degenerate_input() {
        assert!(linear_fit(&[], &[]).is_none());
        assert!(linear_fit(&[1.0], &[1.0]).is_none());
        // all x identical: vertical line
        assert!(linear_fit(&[2.0, 2.0, 2.0], &[1.0, 2.0, 3.0]).is_none());
    }

    #[test]
    fn flat_y_has_zero_correlation() {
        let x = [0.0f32, 1.0, 2.0, 3.0];
        let y = [5.0f32, 5.0, 5.0, 5.0];
        let fit = linear_fit(&x, &y).unwrap();
        assert!(fit.slope.abs() < 1e-6);
        assert_eq!(fit.correlation, 0.0);
    }

    #[test]
    fn noisy_line_correlation_below_one() {
        let x: Vec<f32> = (0..50).map(|i| i as f32).collect();
        // deterministic "noise" alternating around the line
        let y: Vec<f32> = x
            .iter()
            .enumerate()
            .map(|(i, &t)| -2.0 * t + if i % 2 == 0 { 3.0 } else { -3.0 })
            .collect();
        let fit = linear_fit(&x, &y).unwrap();
        assert!(fit.correlation > -1.0 && fit.correlation < -0.9);
    }
}
