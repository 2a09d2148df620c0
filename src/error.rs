//! Error types for trend surface and signal fitting.

/// Errors that can occur while fitting a polynomial trend.
///
/// Every fit either returns a complete result or one of these; nothing is
/// printed and no partial output is produced.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FitError {
    /// An argument is outside its contract: negative or fractional degree,
    /// raster/mask shape mismatch, non-finite samples, bad frequency.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Not enough samples survive masking and decimation to determine the
    /// coefficients.
    #[error("Insufficient data: {rows} usable samples for {columns} coefficients")]
    InsufficientData {
        /// Number of rows left in the reduced system
        rows: usize,
        /// Number of basis functions in the design matrix
        columns: usize,
    },

    /// The normal matrix (G^T G) cannot be inverted reliably.
    ///
    /// Usually the valid samples lack spatial variation, e.g. they all lie
    /// on one line while the degree is at least 1.
    #[error("Normal equations are singular or ill-conditioned (condition number {condition:e})")]
    SingularSystem {
        /// Estimated condition number; infinite when a singular value is zero
        condition: f64,
    },
}

impl FitError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        FitError::InvalidParameter(message.into())
    }
}

/// Result type for the fitting routines
pub type Result<T> = std::result::Result<T, FitError>;
