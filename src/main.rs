use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use surface_fit::raster::{Raster, RasterParams};
use surface_fit::config::FitConfig;
use surface_fit::{fit_surface, parse_degree, report, text, SurfaceFit};

mod cli;

use cli::Args;

const DEFAULT_NODATA: f64 = -9999.0;

fn output_path(prefix: &Path, suffix: &str) -> PathBuf {
    PathBuf::from(format!("{}_{}", prefix.display(), suffix))
}

/// Merges the configuration file (if any) with explicit command-line flags.
fn resolve_config(args: &Args) -> Result<FitConfig> {
    let mut config = match &args.config {
        Some(path) => FitConfig::from_file(path)?,
        None => FitConfig::default(),
    };
    if let Some(degree) = &args.degree {
        config.degree = parse_degree(degree)?;
    }
    if let Some(decimation) = args.decimation {
        config.decimation = decimation;
    }
    if let Some(valid) = args.valid {
        config.valid = valid;
    }
    Ok(config)
}

/// Writes the fitted coefficients and statistics as JSON.
fn save_fit_summary(path: &Path, fit: &SurfaceFit, config: &FitConfig, params: &RasterParams) -> Result<()> {
    let summary = json!({
        "degree": fit.degree,
        "decimation": config.decimation,
        "valid_sentinel": config.valid,
        "coefficients": fit.coefficients.to_vec(),
        "residual": fit.residual,
        "valid_pixels": fit.valid_count,
        "samples_used": fit.samples_used,
        "width": params.width,
        "height": params.height,
        "pixel_size": params.resolution(),
        "origin": params.origin(),
    });

    let mut file = File::create(path).with_context(|| format!("Failed to create {:?}", path))?;
    file.write_all(serde_json::to_string_pretty(&summary)?.as_bytes())
        .with_context(|| format!("Failed to write {:?}", path))?;
    Ok(())
}

/// Main entry point for the surface-fit tool.
///
/// Reads the input raster and optional mask, fits the trend surface and writes
/// the trend, the detrended raster and a JSON summary next to the output prefix.
fn main() {
    if let Err(e) = run() {
        let output = format!("{}: {:#}", text::error("Error"), e);
        eprintln!("{}\n", text::bold(output));
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let start_time = Instant::now();
    let args = Args::parse();

    let line = text::line();
    let dline = text::double_line();

    println!(
        "\n{}\n{}\nTool for fitting polynomial trend surfaces to raster data.\n{}\n",
        format!(
            "{} {}",
            text::highlight("Surface Fit"),
            env!("CARGO_PKG_VERSION")
        ),
        line,
        dline
    );

    let config = resolve_config(&args)?;
    println!(
        "Fitting a degree {} polynomial surface (decimation 10^{}, valid value {}).\n",
        config.degree, config.decimation, config.valid
    );

    let mut part_time = Instant::now();
    let input = Raster::open(&args.input)?;
    let mask = match &args.mask {
        Some(path) => {
            let mask_raster = Raster::open(path)?;
            if mask_raster.data.dim() != input.data.dim() {
                anyhow::bail!(
                    "Mask {:?} is {} x {}, input is {} x {}",
                    path,
                    mask_raster.params.width,
                    mask_raster.params.height,
                    input.params.width,
                    input.params.height
                );
            }
            mask_raster.as_flags()?
        }
        None => input.data_mask(),
    };
    println!(
        "{} Input raster ({} x {}) read in {:.2} seconds.",
        text::check_icon(),
        input.params.width,
        input.params.height,
        part_time.elapsed().as_secs_f64()
    );
    let [dx, dy] = input.params.resolution();
    println!(
        "  └─{} {}: pixel size {} x {} is not applied; fits use normalized coordinates",
        text::ARROW,
        text::warning("Warning"),
        dx,
        dy
    );

    part_time = Instant::now();
    let fit = fit_surface(
        input.data.view(),
        mask.view(),
        config.degree,
        config.decimation,
        config.valid,
    )
    .context("Surface fit failed")?;
    println!(
        "{} Surface fitted in {:.2} seconds.",
        text::check_icon(),
        part_time.elapsed().as_secs_f64()
    );

    if !args.quiet {
        println!("{}\n{}\n{}", line, report::surface_summary(&fit), line);
    }

    part_time = Instant::now();
    let nodata = input.params.nodata.unwrap_or(DEFAULT_NODATA);
    let out_params = RasterParams {
        nodata: Some(nodata),
        ..input.params.clone()
    };

    let mut detrended = fit.detrend(input.data.view())?;
    detrended.zip_mut_with(&mask, |v, &flag| {
        if flag != config.valid {
            *v = nodata;
        }
    });

    let surface_path = output_path(&args.output_prefix, "surface.tif");
    let detrended_path = output_path(&args.output_prefix, "detrended.tif");
    let summary_path = output_path(&args.output_prefix, "fit.json");

    Raster::new(out_params.clone(), fit.surface.clone()).save(&surface_path)?;
    Raster::new(out_params, detrended).save(&detrended_path)?;
    save_fit_summary(&summary_path, &fit, &config, &input.params)?;

    println!(
        "{} Output files written in {:.2} seconds.",
        text::check_icon(),
        part_time.elapsed().as_secs_f64()
    );
    for path in [&surface_path, &detrended_path, &summary_path] {
        println!("  {}", text::light(format!("└─{} {}", text::ARROW, path.display())));
    }

    println!("{}", line);
    println!("{}", text::success("Fit completed successfully."));
    println!(
        "Total elapsed time: {:.2} seconds.\n",
        start_time.elapsed().as_secs_f64()
    );

    Ok(())
}
