//! Single-band raster input and output through GDAL.
//!
//! Any format GDAL reads can be fitted (GeoTIFF, ESRI ASCII grids, ...).
//! Outputs are written as GeoTIFF with the georeferencing of the input.

use std::path::Path;

use anyhow::{Context, Result};
use gdal::raster::Buffer;
use gdal::{Dataset, DriverManager};
use ndarray::Array2;

// GDAL's default for datasets without georeferencing.
const IDENTITY_TRANSFORM: [f64; 6] = [0.0, 1.0, 0.0, 0.0, 0.0, 1.0];

#[derive(Debug, Clone, PartialEq)]
pub struct RasterParams {
    pub width: usize,
    pub height: usize,
    pub geo_transform: [f64; 6],
    /// WKT, empty when the source carries no spatial reference
    pub projection: String,
    pub nodata: Option<f64>,
}

impl RasterParams {
    /// Upper-left corner of the upper-left pixel.
    pub fn origin(&self) -> [f64; 2] {
        [self.geo_transform[0], self.geo_transform[3]]
    }

    /// Pixel size along x and y.
    pub fn resolution(&self) -> [f64; 2] {
        [self.geo_transform[1].abs(), self.geo_transform[5].abs()]
    }

    pub fn is_nodata(&self, value: f64) -> bool {
        !value.is_finite() || self.nodata.is_some_and(|nd| value == nd)
    }
}

#[derive(Debug, Clone)]
pub struct Raster {
    pub params: RasterParams,
    pub data: Array2<f64>,
}

impl Raster {
    pub fn new(params: RasterParams, data: Array2<f64>) -> Self {
        Raster { params, data }
    }

    /// Reads band 1 of the dataset at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let ds = Dataset::open(path).with_context(|| format!("Failed to open raster: {:?}", path))?;
        let (width, height) = ds.raster_size();
        let geo_transform = ds.geo_transform().unwrap_or(IDENTITY_TRANSFORM);
        let projection = ds.projection();

        let band = ds.rasterband(1)?;
        let nodata = band.no_data_value();
        let buffer: Buffer<f64> = band
            .read_as((0, 0), (width, height), (width, height), None)
            .with_context(|| format!("Failed to read raster data: {:?}", path))?;
        let data = Array2::from_shape_vec((height, width), buffer.data().to_vec())
            .with_context(|| format!("Raster {:?} does not hold {} x {} values", path, height, width))?;

        Ok(Raster {
            params: RasterParams {
                width,
                height,
                geo_transform,
                projection,
                nodata,
            },
            data,
        })
    }

    /// Validity mask: 1 for cells holding data, 0 for nodata or non-finite.
    pub fn data_mask(&self) -> Array2<i32> {
        self.data
            .mapv(|v| if self.params.is_nodata(v) { 0 } else { 1 })
    }

    /// Mask values read from an integer flag raster.
    pub fn as_flags(&self) -> Result<Array2<i32>> {
        if let Some(v) = self.data.iter().find(|v| v.fract() != 0.0 || !v.is_finite()) {
            anyhow::bail!("Mask raster holds a non-integer value: {}", v);
        }
        if let Some(v) = self
            .data
            .iter()
            .find(|&&v| v < i32::MIN as f64 || v > i32::MAX as f64)
        {
            anyhow::bail!("Mask raster value {} does not fit a 32-bit flag", v);
        }
        Ok(self.data.mapv(|v| v as i32))
    }

    /// Writes the raster as a single-band Float64 GeoTIFF.
    pub fn save(&self, path: &Path) -> Result<()> {
        let (height, width) = self.data.dim();
        let driver = DriverManager::get_driver_by_name("GTiff")?;
        let mut ds = driver
            .create_with_band_type::<f64, _>(path, width, height, 1)
            .with_context(|| format!("Failed to create raster: {:?}", path))?;
        ds.set_geo_transform(&self.params.geo_transform)?;
        if !self.params.projection.is_empty() {
            ds.set_projection(&self.params.projection)?;
        }

        let mut band = ds.rasterband(1)?;
        if let Some(nodata) = self.params.nodata {
            band.set_no_data_value(Some(nodata))?;
        }
        let mut buffer = Buffer::new((width, height), self.data.iter().copied().collect());
        band.write((0, 0), (width, height), &mut buffer)
            .with_context(|| format!("Failed to write raster: {:?}", path))?;
        Ok(())
    }
}
