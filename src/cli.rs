use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the surface-fit tool.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about = "Fits a polynomial trend surface to a single-band raster and writes the trend and detrended rasters as GeoTIFF plus a JSON summary."
)]
pub struct Args {
    /// Input raster (any GDAL-readable format, band 1).
    #[arg(short, long)]
    pub input: PathBuf,

    /// Prefix of the output files.
    #[arg(short, long)]
    pub output_prefix: PathBuf,

    /// Optional mask raster of integer flags; defaults to the input's data cells.
    #[arg(short, long)]
    pub mask: Option<PathBuf>,

    /// Polynomial degree per axis [default: 1].
    #[arg(short, long, allow_hyphen_values = true)]
    pub degree: Option<String>,

    /// Keep every 10^D-th valid pixel when solving [default: 0].
    #[arg(long)]
    pub decimation: Option<u32>,

    /// Mask value marking valid pixels [default: 1].
    #[arg(long, allow_hyphen_values = true)]
    pub valid: Option<i32>,

    /// Configuration file with 'key = value' defaults.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Suppress the coefficient report.
    #[arg(short, long)]
    pub quiet: bool,
}
