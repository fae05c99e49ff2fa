//! Engine configuration, loaded from JSON.
//!
//! ```json
//! {
//!   "defaultBounds": { "min": 12, "max": 72 },
//!   "font": "times",
//!   "cellPadding": 16,
//!   "cache": true,
//!   "linearScanForTables": true
//! }
//! ```
//!
//! Every field is optional.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::FitError;
use crate::font::{FontMetrics, StandardFont};
use crate::measure::MetricsMeasurer;
use crate::model::SizeBounds;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FitConfig {
    /// Font-size bounds for sections that set none.
    pub default_bounds: SizeBounds,
    /// `helvetica`, `times`, or a path to a TrueType/OpenType file.
    pub font: String,
    /// Overrides the template's cell padding when set.
    pub cell_padding: Option<f64>,
    /// Memoize solves across sections with identical inputs.
    pub cache: bool,
    /// Scan table markup linearly instead of by binary search.
    pub linear_scan_for_tables: bool,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            default_bounds: SizeBounds::default(),
            font: "helvetica".to_string(),
            cell_padding: None,
            cache: true,
            linear_scan_for_tables: true,
        }
    }
}

impl FitConfig {
    pub fn from_json_str(json: &str) -> Result<Self, FitError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, FitError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// The standard family named by `font`, if it names one.
    pub fn standard_font(&self) -> Option<StandardFont> {
        match self.font.trim().to_ascii_lowercase().as_str() {
            "" | "helvetica" | "sans-serif" | "arial" => Some(StandardFont::Helvetica),
            "times" | "times-roman" | "serif" => Some(StandardFont::Times),
            _ => None,
        }
    }

    pub fn font_metrics(&self) -> Result<FontMetrics, FitError> {
        match self.standard_font() {
            Some(family) => Ok(FontMetrics::Standard(family)),
            None => FontMetrics::from_file(self.font.trim()),
        }
    }

    /// A metrics-backed measurer for the configured font.
    pub fn measurer(&self) -> Result<MetricsMeasurer, FitError> {
        self.font_metrics().map(MetricsMeasurer::new)
    }
}
