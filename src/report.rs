//! Human-readable summaries of fit results.
//!
//! The fitting routines never print. Callers that want verbose output pass the
//! returned fits here and decide where the text goes.

use std::fmt::Write;

use crate::series::SeriesFit;
use crate::surface::SurfaceFit;
use crate::text;

/// Summary of a surface fit: order, offset, per-order `X^i`/`Y^i`
/// coefficients and the expected residual.
pub fn surface_summary(fit: &SurfaceFit) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", text::bold("Polynomial fit"));
    let _ = writeln!(out, "Order: {}", fit.degree);
    let _ = writeln!(out, "\toffset: {}", text::number(fit.offset()));
    for i in 1..=fit.degree {
        if let Some((x, y)) = fit.term(i) {
            let _ = writeln!(
                out,
                "\tX^{i} {} Y^{i} {}",
                text::number(x),
                text::number(y),
                i = i
            );
        }
    }
    let _ = writeln!(
        out,
        "Samples: {} valid, {} used in solve",
        fit.valid_count, fit.samples_used
    );
    let _ = write!(out, "Expected residual: {:.6}", fit.residual);
    out
}

/// Summary of a linear or periodic series fit.
pub fn series_summary(fit: &SeriesFit) -> String {
    let mut out = String::new();
    let title = if fit.seasonal().is_some() {
        "Periodic fit"
    } else {
        "Linear fit"
    };
    let _ = writeln!(out, "{}", text::bold(title));
    let _ = writeln!(out, "x^0 {}", text::number(fit.offset()));
    let _ = writeln!(out, "x^1 {}", text::number(fit.trend()));
    if let Some((amplitude, phase)) = fit.seasonal() {
        let _ = writeln!(out, "sin {}", text::number(fit.coefficients[2]));
        let _ = writeln!(out, "cos {}", text::number(fit.coefficients[3]));
        let _ = writeln!(
            out,
            "amplitude {} phase {}",
            text::number(amplitude),
            text::number(phase)
        );
    }
    let _ = write!(out, "Expected residual: {:.6}", fit.residual);
    out
}
