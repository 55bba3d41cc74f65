//! Least squares solver and the per-pixel `polyfit` entry point.
//!
//! Each pixel position contributes one small regression: minimize
//!
//! ```text
//! Σ_t (s_t - x_t^T β)^2
//! ```
//!
//! where `x_t` is the Vandermonde row for frame index `t` and `s_t` the
//! observed intensity.
//!
//! Implementation choices:
//! - SVD solve rather than normal equations: Vandermonde columns over long
//!   frame axes grow at very different rates and become poorly scaled, and
//!   the design matrix is tall (frames × 3 columns), which nalgebra's
//!   `QR::solve` does not accept.
//! - The parameter dimension is tiny (degree + 1 columns), so SVD cost per
//!   pixel is acceptable even for full-resolution videos.

use nalgebra::{DMatrix, DVector};

use crate::math::vandermonde;

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // Try progressively looser tolerances if the strict solve fails.
    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

/// Fit `degree`-polynomial coefficients to one sample sequence.
///
/// The predictor is the implicit frame axis `t = 0..samples.len()-1`. The
/// returned row always has `degree + 1` entries, highest power first.
///
/// Sequences shorter than `degree + 1` under-determine the polynomial; we
/// degrade to exact interpolation through the available points and leave the
/// missing high-order coefficients at zero. Callers must not pass an empty
/// sequence.
///
/// Returns `None` when the solve fails or produces non-finite values.
pub fn polyfit(samples: &[u8], degree: usize) -> Option<Vec<f64>> {
    debug_assert!(!samples.is_empty());

    let n = samples.len();
    let eff_degree = degree.min(n.saturating_sub(1));

    let x = vandermonde(n, eff_degree);
    let y = DVector::from_iterator(n, samples.iter().map(|&s| s as f64));

    let beta = solve_least_squares(&x, &y)?;

    // Left-pad with zeros when the effective degree was reduced.
    let mut coeffs = vec![0.0; degree + 1];
    coeffs[degree - eff_degree..].copy_from_slice(beta.as_slice());
    Some(coeffs)
}
