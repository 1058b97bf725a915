//! Normal equations for least-squares polynomial fitting.
use nalgebra::{DMatrix, DVector};

use crate::{
    error::{Error, Result},
    value::Value,
};

/// The square system `M * c = v` whose solution is the least-squares coefficient vector.
///
/// For effective degree `d` over points `(x_k, y_k)`:
/// ```math
/// M[i][j] = Σ_k x_k^(i+j)
/// v[i]    = Σ_k x_k^i * y_k
/// ```
///
/// `M` is a Hankel matrix: each entry only depends on `i + j`, so the `2d + 1` power
/// sums are accumulated once and the matrix is filled from them.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalEquations<T: Value> {
    /// The `(d+1)x(d+1)` moment matrix.
    pub matrix: DMatrix<T>,

    /// The `d+1` right-hand side.
    pub rhs: DVector<T>,
}
impl<T: Value> NormalEquations<T> {
    /// Builds the normal equations for `data` at the given (already clamped) degree.
    ///
    /// When `data.len() == degree + 1` the system is exactly determined and its
    /// solution interpolates the points.
    ///
    /// # Errors
    /// Returns [`Error::NoData`] if `data` is empty.
    pub fn build(data: &[(T, T)], degree: usize) -> Result<Self> {
        if data.is_empty() {
            return Err(Error::NoData);
        }

        let k = degree + 1;
        let mut power_sums = vec![T::zero(); 2 * degree + 1];
        let mut rhs = DVector::zeros(k);

        for &(x, y) in data {
            let mut x_pow = T::one();
            for (p, sum) in power_sums.iter_mut().enumerate() {
                *sum += x_pow;
                if p < k {
                    rhs[p] += x_pow * y;
                }
                x_pow *= x;
            }
        }

        let matrix = DMatrix::from_fn(k, k, |i, j| power_sums[i + j]);
        Ok(Self { matrix, rhs })
    }

    /// Number of unknowns, `d + 1`.
    pub fn size(&self) -> usize {
        self.rhs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_quadratic() {
        let data = [(0.0, 1.0), (1.0, 2.0), (2.0, 5.0)];
        let eq = NormalEquations::build(&data, 2).unwrap();
        assert_eq!(eq.size(), 3);

        // Σx^0 = 3, Σx = 3, Σx² = 5, Σx³ = 9, Σx⁴ = 17
        let expected = DMatrix::from_row_slice(3, 3, &[3.0, 3.0, 5.0, 3.0, 5.0, 9.0, 5.0, 9.0, 17.0]);
        assert_eq!(eq.matrix, expected);

        // Σy = 8, Σxy = 12, Σx²y = 22
        assert_eq!(eq.rhs, DVector::from_vec(vec![8.0, 12.0, 22.0]));
    }

    #[test]
    fn test_build_is_symmetric_hankel() {
        let data = [(0.5, 1.0), (-1.5, 2.0), (3.0, -4.0), (2.0, 0.0)];
        let eq = NormalEquations::build(&data, 3).unwrap();
        for i in 0..4 {
            for j in 0..4 {
                assert_eq!(eq.matrix[(i, j)], eq.matrix[(j, i)]);
                if i + 1 < 4 && j > 0 {
                    assert_eq!(eq.matrix[(i + 1, j - 1)], eq.matrix[(i, j)]);
                }
            }
        }
    }

    #[test]
    fn test_build_degree_zero() {
        let data = [(1.0, 2.0), (5.0, 4.0)];
        let eq = NormalEquations::build(&data, 0).unwrap();
        assert_eq!(eq.matrix, DMatrix::from_element(1, 1, 2.0));
        assert_eq!(eq.rhs, DVector::from_element(1, 6.0));
    }

    #[test]
    fn test_build_empty() {
        let data: [(f64, f64); 0] = [];
        assert_eq!(NormalEquations::build(&data, 1), Err(Error::NoData));
    }
}
