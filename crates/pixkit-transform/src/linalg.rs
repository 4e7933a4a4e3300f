//! Small dense linear solves used to fit transforms to point pairs

use crate::{TransformError, TransformResult};

/// Pivots smaller than this are treated as zero
const PIVOT_EPS: f64 = 1.0e-12;

/// Solve `a * x = b` by Gauss-Jordan elimination with partial pivoting
///
/// # Errors
///
/// Returns `TransformError::SingularMatrix` if `a` is (numerically) singular.
pub(crate) fn solve<const N: usize>(
    mut a: [[f64; N]; N],
    mut b: [f64; N],
) -> TransformResult<[f64; N]> {
    for col in 0..N {
        let pivot = (col..N)
            .max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))
            .unwrap_or(col);
        if a[pivot][col].abs() < PIVOT_EPS {
            return Err(TransformError::SingularMatrix);
        }
        a.swap(col, pivot);
        b.swap(col, pivot);

        let inv = 1.0 / a[col][col];
        for k in col..N {
            a[col][k] *= inv;
        }
        b[col] *= inv;

        for row in 0..N {
            if row == col {
                continue;
            }
            let factor = a[row][col];
            if factor == 0.0 {
                continue;
            }
            for k in col..N {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }
    Ok(b)
}
