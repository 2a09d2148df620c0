//! Normalized coordinate grid and the polynomial design matrix.
//!
//! Coordinates are mapped to [-1, 1] along each axis independently. This keeps
//! the powers `X^i` and `Y^i` bounded, so the normal matrix does not explode or
//! vanish for higher degrees regardless of raster size.

use ndarray::{Array1, Array2};

use crate::error::{FitError, Result};

/// Pair of coordinate arrays sharing the raster shape.
///
/// `x` varies along the column index and is constant down each column,
/// `y` varies along the row index and is constant along each row.
#[derive(Debug, Clone)]
pub struct NormalizedGrid {
    pub x: Array2<f64>,
    pub y: Array2<f64>,
}

impl NormalizedGrid {
    /// Builds the grid for a raster of `rows` x `cols` samples.
    pub fn new(rows: usize, cols: usize) -> Self {
        let xs = unit_linspace(cols);
        let ys = unit_linspace(rows);

        let x = Array2::from_shape_fn((rows, cols), |(_, c)| xs[c]);
        let y = Array2::from_shape_fn((rows, cols), |(r, _)| ys[r]);

        NormalizedGrid { x, y }
    }

    pub fn shape(&self) -> (usize, usize) {
        self.x.dim()
    }
}

/// `n` evenly spaced values from -1 to 1 inclusive.
///
/// A single sample sits at -1, the start of the interval.
pub fn unit_linspace(n: usize) -> Array1<f64> {
    Array1::linspace(-1.0, 1.0, n)
}

/// Number of design matrix columns for a given degree: offset plus one
/// `X^i` and one `Y^i` column per order.
///
/// Fails with `InvalidParameter` when the count does not fit in `usize`.
pub fn term_count(degree: usize) -> Result<usize> {
    degree
        .checked_mul(2)
        .and_then(|n| n.checked_add(1))
        .ok_or_else(|| FitError::invalid(format!("degree {} is too large", degree)))
}

/// Builds the flattened design matrix `G` for the grid.
///
/// Row `k` corresponds to pixel `k` of the raster flattened in row-major
/// order. Column 0 is all ones; for order `i` in `1..=degree` column `2i-1`
/// holds `X^i` and column `2i` holds `Y^i`.
pub fn design_matrix(grid: &NormalizedGrid, degree: usize) -> Result<Array2<f64>> {
    let indices: Vec<usize> = (0..grid.x.len()).collect();
    design_rows(grid, &indices, degree)
}

/// Rows of `G` for the given flat pixel indices only.
pub fn design_rows(grid: &NormalizedGrid, indices: &[usize], degree: usize) -> Result<Array2<f64>> {
    let cols = grid.shape().1;
    let mut g = Array2::<f64>::ones((indices.len(), term_count(degree)?));

    for (row, &k) in indices.iter().enumerate() {
        let (x, y) = (grid.x[[k / cols, k % cols]], grid.y[[k / cols, k % cols]]);
        for i in 1..=degree {
            g[[row, 2 * i - 1]] = x.powi(i as i32);
            g[[row, 2 * i]] = y.powi(i as i32);
        }
    }

    Ok(g)
}

/// Evaluates `offset + sum_i (c[2i-1] X^i + c[2i] Y^i)` at one point, i.e. one
/// row of `G` times the coefficient vector.
pub fn evaluate_terms(coeffs: &Array1<f64>, x: f64, y: f64) -> f64 {
    let degree = (coeffs.len() - 1) / 2;
    let mut value = coeffs[0];
    for i in 1..=degree {
        value += coeffs[2 * i - 1] * x.powi(i as i32) + coeffs[2 * i] * y.powi(i as i32);
    }
    value
}

/// Converts a real-valued degree into a polynomial order.
///
/// Negative, fractional and non-finite values are rejected.
pub fn degree_from_f64(value: f64) -> Result<usize> {
    if !value.is_finite() {
        return Err(FitError::invalid(format!(
            "degree must be finite, got {}",
            value
        )));
    }
    if value < 0.0 {
        return Err(FitError::invalid(format!(
            "degree must be non-negative, got {}",
            value
        )));
    }
    if value.fract() != 0.0 {
        return Err(FitError::invalid(format!(
            "degree must be an integer, got {}",
            value
        )));
    }
    if value > u32::MAX as f64 {
        return Err(FitError::invalid(format!("degree {} is too large", value)));
    }
    Ok(value as usize)
}

/// Parses a degree from text (command line, configuration files).
pub fn parse_degree(text: &str) -> Result<usize> {
    let trimmed = text.trim();
    if let Ok(degree) = trimmed.parse::<usize>() {
        return Ok(degree);
    }
    let value = trimmed
        .parse::<f64>()
        .map_err(|_| FitError::invalid(format!("degree '{}' is not a number", trimmed)))?;
    degree_from_f64(value)
}
