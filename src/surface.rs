//! Polynomial trend surface fitting for rasters.

use ndarray::{Array1, Array2, ArrayView2};

use crate::error::{FitError, Result};
use crate::grid::{evaluate_terms, term_count, NormalizedGrid};
use crate::reduce::{reduce_system, valid_indices};
use crate::solve::{masked_residual, reconstruct, solve_normal_equations};

/// Outcome of [`fit_surface`].
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceFit {
    /// Fitted model evaluated at every pixel, masked ones included
    pub surface: Array2<f64>,
    /// `[offset, X^1, Y^1, X^2, Y^2, ...]`
    pub coefficients: Array1<f64>,
    /// `sqrt(sum(res^2)) / n` over all valid pixels
    pub residual: f64,
    pub degree: usize,
    /// Pixels whose mask matched the valid sentinel
    pub valid_count: usize,
    /// Rows of the system after decimation
    pub samples_used: usize,
}

impl SurfaceFit {
    /// Splits the fit into `(surface, coefficients, residual)`.
    pub fn into_parts(self) -> (Array2<f64>, Array1<f64>, f64) {
        (self.surface, self.coefficients, self.residual)
    }

    pub fn offset(&self) -> f64 {
        self.coefficients[0]
    }

    /// Coefficients on `X^order` and `Y^order`, or `None` if `order` is 0 or
    /// above the fitted degree.
    pub fn term(&self, order: usize) -> Option<(f64, f64)> {
        if order == 0 || order > self.degree {
            return None;
        }
        Some((
            self.coefficients[2 * order - 1],
            self.coefficients[2 * order],
        ))
    }

    /// Evaluates the model at a point in normalized coordinates.
    pub fn evaluate(&self, x: f64, y: f64) -> f64 {
        evaluate_terms(&self.coefficients, x, y)
    }

    /// Subtracts the fitted trend from `raster`.
    pub fn detrend(&self, raster: ArrayView2<f64>) -> Result<Array2<f64>> {
        if raster.dim() != self.surface.dim() {
            return Err(FitError::invalid(format!(
                "raster shape {:?} does not match fitted surface {:?}",
                raster.dim(),
                self.surface.dim()
            )));
        }
        Ok(&raster - &self.surface)
    }
}

/// Fits a polynomial surface of the given degree to the valid pixels of
/// `raster`.
///
/// A pixel is valid when its `mask` value equals `valid`. The coefficients are
/// solved from every `10^decimation`-th valid pixel, while the returned
/// surface covers the whole raster and the residual statistic covers all
/// valid pixels.
///
/// # Arguments
/// * `raster` - The `(M, N)` data.
/// * `mask` - Validity flags with the same shape as `raster`.
/// * `degree` - Polynomial order per axis; the model has `1 + 2 * degree` terms.
/// * `decimation` - Exponent `d` of the row stride `10^d`.
/// * `valid` - Mask value marking usable pixels.
///
/// # Returns
/// A `Result` containing the [`SurfaceFit`].
pub fn fit_surface<M: PartialEq>(
    raster: ArrayView2<f64>,
    mask: ArrayView2<M>,
    degree: usize,
    decimation: u32,
    valid: M,
) -> Result<SurfaceFit> {
    let (rows, cols) = raster.dim();
    if mask.dim() != (rows, cols) {
        return Err(FitError::invalid(format!(
            "mask shape {:?} does not match raster shape {:?}",
            mask.dim(),
            (rows, cols)
        )));
    }
    let columns = term_count(degree)?;
    if rows == 0 || cols == 0 {
        return Err(FitError::InsufficientData { rows: 0, columns });
    }

    let z: Array1<f64> = raster.iter().copied().collect();
    let valid_idx = valid_indices(mask.iter(), &valid);
    if let Some(&k) = valid_idx.iter().find(|&&k| !z[k].is_finite()) {
        return Err(FitError::invalid(format!(
            "valid pixel ({}, {}) holds a non-finite value",
            k / cols,
            k % cols
        )));
    }

    let grid = NormalizedGrid::new(rows, cols);
    let system = reduce_system(&grid, z.view(), &valid_idx, degree, decimation)?;
    let coefficients = solve_normal_equations(&system.design, &system.values)?;

    let surface = reconstruct(&grid, &coefficients);
    let residual = masked_residual(raster, &surface, &valid_idx);

    Ok(SurfaceFit {
        surface,
        coefficients,
        residual,
        degree,
        valid_count: valid_idx.len(),
        samples_used: system.rows(),
    })
}
