//! # Surface Fit
//!
//! Least-squares fitting of low-order polynomial trends to rasters and 1D
//! signals, used to remove linear, periodic or polynomial-surface trends
//! before further analysis.
//!
//! The main components are:
//! - [`fit_surface`]: fits `offset + sum_i (a_i X^i + b_i Y^i)` over a
//!   normalized [-1, 1] grid, using only pixels whose mask matches the valid
//!   sentinel and optionally every `10^d`-th of them.
//! - [`fit_linear`] and [`fit_periodic`]: offset + trend, and offset + trend +
//!   sinusoid fits of 1D signals.
//! - [`report`]: text summaries of the results; the fitting routines
//!   themselves never print.
//!
//! ```
//! use ndarray::Array2;
//! use surface_fit::fit_surface;
//!
//! let raster = Array2::from_elem((4, 4), 5.0);
//! let mask = Array2::from_elem((4, 4), 1);
//!
//! let fit = fit_surface(raster.view(), mask.view(), 0, 0, 1).unwrap();
//! assert!((fit.offset() - 5.0).abs() < 1e-12);
//! ```

pub mod config;
pub mod error;
pub mod grid;
pub mod raster;
pub mod reduce;
pub mod report;
pub mod series;
pub mod solve;
pub mod surface;
pub mod text;

pub use error::{FitError, Result};
pub use grid::{degree_from_f64, design_matrix, parse_degree, term_count, NormalizedGrid};
pub use series::{fit_linear, fit_periodic, SeriesFit, DEFAULT_FREQUENCY};
pub use surface::{fit_surface, SurfaceFit};
