//! Offset, trend and seasonal fitting for 1D signals.

use std::f64::consts::PI;

use ndarray::{Array1, Array2, ArrayView1};

use crate::error::{FitError, Result};
use crate::solve::{residual_statistic, solve_normal_equations};

/// One cycle per unit of `x`, e.g. an annual signal with `x` in years.
pub const DEFAULT_FREQUENCY: f64 = 1.0;

/// Outcome of [`fit_linear`] or [`fit_periodic`].
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesFit {
    /// Model evaluated at every input `x`
    pub signal: Array1<f64>,
    /// `[offset, trend]`, followed by `[sin, cos]` for periodic fits
    pub coefficients: Array1<f64>,
    /// `sqrt(sum(res^2)) / n` over all samples
    pub residual: f64,
}

impl SeriesFit {
    pub fn into_parts(self) -> (Array1<f64>, Array1<f64>, f64) {
        (self.signal, self.coefficients, self.residual)
    }

    pub fn offset(&self) -> f64 {
        self.coefficients[0]
    }

    pub fn trend(&self) -> f64 {
        self.coefficients[1]
    }

    /// Amplitude and phase (radians) of the sinusoid, such that the seasonal
    /// term equals `amplitude * sin(2 pi f x + phase)`. `None` for linear fits.
    pub fn seasonal(&self) -> Option<(f64, f64)> {
        if self.coefficients.len() < 4 {
            return None;
        }
        let (s, c) = (self.coefficients[2], self.coefficients[3]);
        Some((s.hypot(c), c.atan2(s)))
    }
}

fn check_samples(x: ArrayView1<f64>, y: ArrayView1<f64>, columns: usize) -> Result<()> {
    if x.len() != y.len() {
        return Err(FitError::invalid(format!(
            "x and y must be the same length ({} vs {})",
            x.len(),
            y.len()
        )));
    }
    if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
        return Err(FitError::invalid("samples must be finite"));
    }
    if x.len() < columns {
        return Err(FitError::InsufficientData {
            rows: x.len(),
            columns,
        });
    }
    Ok(())
}

fn solve_series(g: Array2<f64>, y: ArrayView1<f64>) -> Result<SeriesFit> {
    let values = y.to_owned();
    let coefficients = solve_normal_equations(&g, &values)?;
    let signal = g.dot(&coefficients);
    let residual = residual_statistic(y.iter().zip(signal.iter()).map(|(o, m)| o - m));

    Ok(SeriesFit {
        signal,
        coefficients,
        residual,
    })
}

/// Fits an offset and a secular trend, `y = a + b x`.
pub fn fit_linear(x: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<SeriesFit> {
    check_samples(x, y, 2)?;

    let mut g = Array2::<f64>::ones((x.len(), 2));
    g.column_mut(1).assign(&x);

    solve_series(g, y)
}

/// Fits an offset, a secular trend and a sinusoid of the given frequency,
/// `y = a + b x + c sin(2 pi f x) + d cos(2 pi f x)`.
pub fn fit_periodic(x: ArrayView1<f64>, y: ArrayView1<f64>, frequency: f64) -> Result<SeriesFit> {
    if !frequency.is_finite() || frequency <= 0.0 {
        return Err(FitError::invalid(format!(
            "frequency must be positive and finite, got {}",
            frequency
        )));
    }
    check_samples(x, y, 4)?;

    let mut g = Array2::<f64>::ones((x.len(), 4));
    for (i, &xi) in x.iter().enumerate() {
        let phase = 2.0 * PI * frequency * xi;
        g[[i, 1]] = xi;
        g[[i, 2]] = phase.sin();
        g[[i, 3]] = phase.cos();
    }

    solve_series(g, y)
}
