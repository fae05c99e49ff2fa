//! Structured error types for the fitting engine.
//!
//! Fitting itself never fails the caller: bounds are clamped, unavailable
//! measurement falls back to the policy hint and bad image dimensions
//! resolve to a zero-size box. The variants below are what those fallbacks
//! are keyed on, plus the input errors of the JSON and CLI surfaces.

use thiserror::Error;

/// The unified error type returned by the public posterfit API.
#[derive(Debug, Error)]
pub enum FitError {
    /// `min > max` was supplied as font-size bounds. Recoverable: the solver
    /// clamps `max` to `min` and proceeds.
    #[error("invalid font-size bounds: min {min}px > max {max}px")]
    InvalidBounds { min: u32, max: u32 },

    /// The measurer has no render host to lay content out in.
    #[error("measurement unavailable: {0}")]
    MeasurementUnavailable(String),

    /// An image or box dimension was zero, negative or not finite.
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: f64, height: f64 },

    /// Content of the wrong kind was handed to a component (e.g. an image
    /// given to a text measurer).
    #[error("invalid content: {0}")]
    InvalidContent(String),

    /// A section could not be placed on the poster grid.
    #[error("section '{section}' cannot be placed: {reason}")]
    InvalidPlacement { section: String, reason: String },

    /// JSON input failed to parse as a poster template or config.
    #[error("failed to parse input: {source}{}", format_hint(.hint))]
    Parse {
        #[source]
        source: serde_json::Error,
        hint: String,
    },

    /// A font file could not be read or parsed.
    #[error("font error: {0}")]
    Font(String),

    /// An image source could not be read or decoded.
    #[error("image error: {0}")]
    Image(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn format_hint(hint: &str) -> String {
    if hint.is_empty() {
        String::new()
    } else {
        format!("\n  Hint: {hint}")
    }
}

impl FitError {
    /// Whether the section container should degrade to the policy hint
    /// instead of reporting this error.
    pub fn is_measurement_unavailable(&self) -> bool {
        matches!(self, FitError::MeasurementUnavailable(_))
    }
}

impl From<serde_json::Error> for FitError {
    fn from(e: serde_json::Error) -> Self {
        let hint = match e.classify() {
            serde_json::error::Category::Syntax => {
                "Check for trailing commas, missing quotes, or unescaped characters.".to_string()
            }
            serde_json::error::Category::Data => {
                "The JSON is valid but doesn't match the poster schema. Check field names and types.".to_string()
            }
            serde_json::error::Category::Eof => {
                "Unexpected end of input. Is the JSON truncated?".to_string()
            }
            serde_json::error::Category::Io => String::new(),
        };
        FitError::Parse { source: e, hint }
    }
}
