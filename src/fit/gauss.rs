//! Gaussian elimination with partial pivoting.
use nalgebra::{DMatrix, DVector};

use crate::{
    error::{Error, Result},
    value::Value,
};

/// Solves the square system `matrix * c = rhs` for `c`.
///
/// Forward elimination selects, for each column, the remaining row with the largest
/// absolute entry in that column as the pivot. Back-substitution then recovers the
/// unknowns from the last row up.
///
/// A pivot is rejected when it is non-finite or its magnitude is at most
/// `epsilon * size * max|M_ij|`, so the check scales with the entries of the matrix.
///
/// # Errors
/// - [`Error::DimensionMismatch`] if the matrix is not square or `rhs` has the wrong length.
/// - [`Error::SingularMatrix`] if a pivot is rejected.
/// - [`Error::NonFiniteCoefficients`] if back-substitution overflows.
pub fn solve<T: Value>(mut matrix: DMatrix<T>, mut rhs: DVector<T>) -> Result<Vec<T>> {
    let (rows, cols) = matrix.shape();
    if rows != cols || rhs.len() != rows {
        return Err(Error::DimensionMismatch {
            rows,
            cols,
            len: rhs.len(),
        });
    }

    let size = rows;
    let scale = matrix
        .iter()
        .fold(T::zero(), |acc, &m| nalgebra::RealField::max(acc, Value::abs(m)));
    let tolerance = T::epsilon() * T::from_positive_int(size) * scale;

    for col in 0..size {
        let mut pivot_row = col;
        let mut pivot_abs = Value::abs(matrix[(col, col)]);
        for row in (col + 1)..size {
            let candidate = Value::abs(matrix[(row, col)]);
            if candidate > pivot_abs {
                pivot_row = row;
                pivot_abs = candidate;
            }
        }

        if !num_traits::float::FloatCore::is_finite(pivot_abs) || pivot_abs <= tolerance {
            return Err(Error::SingularMatrix { size, column: col });
        }

        if pivot_row != col {
            matrix.swap_rows(col, pivot_row);
            rhs.swap_rows(col, pivot_row);
        }

        let pivot = matrix[(col, col)];
        for row in (col + 1)..size {
            let factor = matrix[(row, col)] / pivot;
            if factor.is_zero() {
                continue;
            }

            for j in col..size {
                let delta = factor * matrix[(col, j)];
                matrix[(row, j)] -= delta;
            }
            let delta = factor * rhs[col];
            rhs[row] -= delta;
        }
    }

    let mut solution = vec![T::zero(); size];
    for i in (0..size).rev() {
        let mut sum = rhs[i];
        for j in (i + 1)..size {
            sum -= matrix[(i, j)] * solution[j];
        }
        solution[i] = sum / matrix[(i, i)];
    }

    if solution
        .iter()
        .any(|c| !num_traits::float::FloatCore::is_finite(*c))
    {
        return Err(Error::NonFiniteCoefficients);
    }

    Ok(solution)
}

#[cfg(test)]
mod tests {
    use crate::assert_all_close;

    use super::*;

    #[test]
    fn test_solve_identity() {
        let m = DMatrix::<f64>::identity(3, 3);
        let v = DVector::from_vec(vec![1.0, -2.0, 3.5]);
        assert_eq!(solve(m, v).unwrap(), vec![1.0, -2.0, 3.5]);
    }

    #[test]
    fn test_solve_needs_pivoting() {
        // Zero in the top-left: only works if rows are swapped
        let m = DMatrix::from_row_slice(2, 2, &[0.0, 1.0, 2.0, 1.0]);
        let v = DVector::from_vec(vec![3.0, 5.0]);
        let c = solve(m, v).unwrap();
        assert_all_close!(c, [1.0, 3.0], tol = 1e-12);
    }

    #[test]
    fn test_solve_3x3() {
        // 2a + b - c = 8, -3a - b + 2c = -11, -2a + b + 2c = -3
        let m = DMatrix::from_row_slice(3, 3, &[2.0, 1.0, -1.0, -3.0, -1.0, 2.0, -2.0, 1.0, 2.0]);
        let v = DVector::from_vec(vec![8.0, -11.0, -3.0]);
        let c = solve(m, v).unwrap();
        assert_all_close!(c, [2.0, 3.0, -1.0], tol = 1e-9);
    }

    #[test]
    fn test_solve_singular() {
        let m = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 4.0]);
        let v = DVector::from_vec(vec![1.0, 2.0]);
        assert_eq!(
            solve(m, v),
            Err(Error::SingularMatrix { size: 2, column: 1 })
        );

        let zeros = DMatrix::<f64>::zeros(2, 2);
        assert!(matches!(
            solve(zeros, DVector::zeros(2)),
            Err(Error::SingularMatrix { column: 0, .. })
        ));
    }

    #[test]
    fn test_solve_dimension_mismatch() {
        let m = DMatrix::<f64>::zeros(2, 3);
        let v = DVector::zeros(2);
        assert_eq!(
            solve(m, v),
            Err(Error::DimensionMismatch {
                rows: 2,
                cols: 3,
                len: 2
            })
        );

        let m = DMatrix::<f64>::identity(2, 2);
        assert!(matches!(
            solve(m, DVector::zeros(3)),
            Err(Error::DimensionMismatch { len: 3, .. })
        ));
    }

    #[test]
    fn test_solve_non_finite_input() {
        let m = DMatrix::from_row_slice(2, 2, &[f64::NAN, 0.0, 0.0, 1.0]);
        let v = DVector::from_vec(vec![1.0, 1.0]);
        assert!(solve(m, v).is_err());
    }
}
