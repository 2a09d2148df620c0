//! Normal-equations solve, model reconstruction and residual statistics.

use nalgebra::{DMatrix, DVector};
use ndarray::{Array1, Array2, ArrayView2};

use crate::error::{FitError, Result};
use crate::grid::{evaluate_terms, NormalizedGrid};

/// Largest accepted ratio between the extreme singular values of `G^T G`.
pub const MAX_CONDITION_NUMBER: f64 = 1e12;

// Normal matrix M = G^T G. Symmetric, so only the upper triangle is computed.
fn normal_matrix(design: &Array2<f64>) -> DMatrix<f64> {
    let n = design.ncols();
    let mut m = DMatrix::zeros(n, n);

    for i in 0..n {
        let v1 = design.column(i);
        for j in i..n {
            let dot_product = v1.dot(&design.column(j));
            m[(i, j)] = dot_product;
            m[(j, i)] = dot_product;
        }
    }

    m
}

/// Condition number of a symmetric matrix from its singular values.
///
/// Infinite when the smallest singular value is zero.
pub fn condition_number(m: &DMatrix<f64>) -> f64 {
    let singular_values = m.singular_values();
    let max = singular_values.max();
    let min = singular_values.min();
    if min <= 0.0 || !min.is_finite() {
        f64::INFINITY
    } else {
        max / min
    }
}

/// Solves `(G^T G) B = G^T Z` for the coefficient vector `B`.
///
/// Fails with `SingularSystem` when the normal matrix is rank deficient or
/// its condition number exceeds [`MAX_CONDITION_NUMBER`].
pub fn solve_normal_equations(design: &Array2<f64>, values: &Array1<f64>) -> Result<Array1<f64>> {
    let m = normal_matrix(design);
    let rhs = DVector::from_iterator(design.ncols(), design.t().dot(values).into_iter());

    let condition = condition_number(&m);
    if condition.is_nan() || condition > MAX_CONDITION_NUMBER {
        return Err(FitError::SingularSystem { condition });
    }

    let coeffs = match m.clone().cholesky() {
        Some(cholesky) => cholesky.solve(&rhs),
        None => m
            .lu()
            .solve(&rhs)
            .ok_or(FitError::SingularSystem { condition })?,
    };

    if coeffs.iter().any(|c| !c.is_finite()) {
        return Err(FitError::SingularSystem { condition });
    }

    Ok(Array1::from_iter(coeffs.iter().copied()))
}

/// Evaluates `G B` for every pixel of the grid, without materializing the
/// full design matrix.
pub fn reconstruct(grid: &NormalizedGrid, coeffs: &Array1<f64>) -> Array2<f64> {
    Array2::from_shape_fn(grid.shape(), |(r, c)| {
        evaluate_terms(coeffs, grid.x[[r, c]], grid.y[[r, c]])
    })
}

/// Root of the residual sum of squares divided by the sample count.
///
/// This is not an RMS: the root is taken before dividing by `n`. Returns 0
/// for an empty residual set.
pub fn residual_statistic<I>(residuals: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let (sum_sq, count) = residuals
        .into_iter()
        .fold((0.0, 0usize), |(s, n), r| (s + r * r, n + 1));
    if count == 0 {
        return 0.0;
    }
    sum_sq.sqrt() / count as f64
}

/// Residual statistic of `raster - surface` over the given flat indices,
/// which must be sorted ascending.
pub fn masked_residual(raster: ArrayView2<f64>, surface: &Array2<f64>, valid: &[usize]) -> f64 {
    let mut pending = valid.iter().copied().peekable();
    let residuals = raster
        .iter()
        .zip(surface.iter())
        .enumerate()
        .filter_map(move |(k, (observed, modelled))| {
            pending
                .next_if_eq(&k)
                .map(|_| observed - modelled)
        });
    residual_statistic(residuals)
}
