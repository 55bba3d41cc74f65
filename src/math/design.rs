//! Vandermonde design matrices for polynomial regression.
//!
//! For a sequence of length `n` sampled at `t = 0, 1, …, n-1` and a polynomial
//! of degree `d`, the design matrix row for `t` is:
//!
//! ```text
//! [ t^d, t^(d-1), …, t, 1 ]
//! ```
//!
//! Columns are ordered by descending power so the solved coefficient vector
//! reads `[a_d, …, a_1, a_0]`, matching the artifact's `[a, b, c]` convention
//! for the degree-2 default.

use nalgebra::DMatrix;

/// Build the `n × (degree + 1)` Vandermonde matrix over `t = 0..n-1`.
pub fn vandermonde(n: usize, degree: usize) -> DMatrix<f64> {
    let cols = degree + 1;
    let mut x = DMatrix::<f64>::zeros(n, cols);

    for t in 0..n {
        // Fill the row right-to-left so each entry is one multiply.
        let mut pow = 1.0;
        for j in (0..cols).rev() {
            x[(t, j)] = pow;
            pow *= t as f64;
        }
    }

    x
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_are_descending_powers() {
        let x = vandermonde(4, 2);
        assert_eq!(x.nrows(), 4);
        assert_eq!(x.ncols(), 3);

        // Row for t = 3: [9, 3, 1].
        assert_eq!(x[(3, 0)], 9.0);
        assert_eq!(x[(3, 1)], 3.0);
        assert_eq!(x[(3, 2)], 1.0);

        // Row for t = 0: [0, 0, 1].
        assert_eq!(x[(0, 0)], 0.0);
        assert_eq!(x[(0, 2)], 1.0);
    }

    #[test]
    fn degree_zero_is_all_ones() {
        let x = vandermonde(3, 0);
        assert_eq!(x.ncols(), 1);
        for t in 0..3 {
            assert_eq!(x[(t, 0)], 1.0);
        }
    }
}
