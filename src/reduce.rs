//! Masked reduction and decimation of the design matrix and data vector.

use ndarray::{Array1, Array2, ArrayView1, Axis};

use crate::error::{FitError, Result};
use crate::grid::{design_rows, term_count, NormalizedGrid};

/// The least-squares system actually handed to the solver.
#[derive(Debug, Clone)]
pub struct ReducedSystem {
    /// Rows of `G` for the retained samples
    pub design: Array2<f64>,
    /// Data values for the retained samples
    pub values: Array1<f64>,
    /// Flat indices (row-major) of the retained samples
    pub indices: Vec<usize>,
}

impl ReducedSystem {
    pub fn rows(&self) -> usize {
        self.design.nrows()
    }
}

/// Row stride for a decimation exponent `d`: every `10^d`-th valid row is kept.
///
/// Saturates at `usize::MAX` when the power does not fit, which keeps only the
/// first valid row.
pub fn decimation_stride(exponent: u32) -> usize {
    10usize.checked_pow(exponent).unwrap_or(usize::MAX)
}

/// Flat indices of the samples whose mask value equals `valid`.
pub fn valid_indices<'a, M, I>(mask: I, valid: &M) -> Vec<usize>
where
    M: PartialEq + 'a,
    I: IntoIterator<Item = &'a M>,
{
    mask.into_iter()
        .enumerate()
        .filter(|(_, flag)| *flag == valid)
        .map(|(k, _)| k)
        .collect()
}

/// Keeps every `10^decimation`-th valid index, starting with the first.
///
/// Fails with `InsufficientData` when nothing survives or when fewer rows
/// than `columns` coefficients remain.
pub fn decimate(valid: &[usize], decimation: u32, columns: usize) -> Result<Vec<usize>> {
    let stride = decimation_stride(decimation);

    let indices: Vec<usize> = valid.iter().copied().step_by(stride).collect();
    if indices.is_empty() || indices.len() < columns {
        return Err(FitError::InsufficientData {
            rows: indices.len(),
            columns,
        });
    }

    Ok(indices)
}

/// Builds the rows of `G` and the data values for the retained samples only.
///
/// The row count is checked before anything is allocated, so an oversized
/// degree fails with `InsufficientData` instead of building a huge matrix.
pub fn reduce_system(
    grid: &NormalizedGrid,
    values: ArrayView1<f64>,
    valid: &[usize],
    degree: usize,
    decimation: u32,
) -> Result<ReducedSystem> {
    let indices = decimate(valid, decimation, term_count(degree)?)?;

    Ok(ReducedSystem {
        design: design_rows(grid, &indices, degree)?,
        values: values.select(Axis(0), &indices),
        indices,
    })
}
