//! Fit defaults loaded from a `key = value` file.
//!
//! ```text
//! # trend removal for 1 m DEM tiles
//! degree = 2
//! decimation = 1
//! valid = 1
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};

use crate::grid::parse_degree;

/// Parameters of a surface fit that can be set from file or command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitConfig {
    pub degree: usize,
    pub decimation: u32,
    pub valid: i32,
}

impl Default for FitConfig {
    fn default() -> Self {
        FitConfig {
            degree: 1,
            decimation: 0,
            valid: 1,
        }
    }
}

impl FitConfig {
    /// Reads a configuration file, starting from the defaults.
    ///
    /// Blank lines and `#` comments are skipped; unknown keys are an error.
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {:?}", path))?;
        let reader = BufReader::new(file);

        let mut config = FitConfig::default();
        for (number, line) in reader.lines().enumerate() {
            let line = line.with_context(|| format!("Failed to read config file: {:?}", path))?;
            let content = line.split('#').next().unwrap_or("").trim();
            if content.is_empty() {
                continue;
            }
            let (key, value) = content.split_once('=').with_context(|| {
                format!("Line {} of {:?} is not 'key = value'", number + 1, path)
            })?;
            config
                .set(key.trim(), value.trim())
                .with_context(|| format!("Line {} of {:?}", number + 1, path))?;
        }
        Ok(config)
    }

    /// Sets one value by key.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "degree" => self.degree = parse_degree(value)?,
            "decimation" => {
                self.decimation = value
                    .parse()
                    .with_context(|| format!("Invalid decimation '{}'", value))?
            }
            "valid" => {
                self.valid = value
                    .parse()
                    .with_context(|| format!("Invalid valid sentinel '{}'", value))?
            }
            _ => anyhow::bail!("Unknown config key '{}'", key),
        }
        Ok(())
    }
}
