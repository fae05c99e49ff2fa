//! # Measurement
//!
//! The `Measurer` capability answers one question: does this content,
//! rendered at this font size and line height, fit inside this box?
//!
//! ```text
//!   MetricsMeasurer      pure computation from font metrics (headless, tests)
//!   HostedMeasurer<H>    off-screen layout in a host render tree
//!   UnavailableMeasurer  no way to measure; callers fall back to hints
//! ```

pub mod host;

use std::borrow::Cow;

use crate::error::FitError;
use crate::font::FontMetrics;
use crate::model::{BoxSize, Content};
use crate::text::{html, TextLayout};

pub use host::{HostedMeasurer, LayoutHost, ProbeGuard};

/// Something that can lay content out at a given width and report its height.
pub trait Measurer {
    /// Natural height in px of `content` wrapped at `width` px.
    fn measure_height(
        &self,
        content: &Content,
        font_size: f64,
        line_height: f64,
        width: f64,
    ) -> Result<f64, FitError>;

    /// Whether `content` at `font_size` fits inside `target`.
    ///
    /// Zero-length content always fits. Whitespace is measured like any
    /// other text.
    fn fits(
        &self,
        content: &Content,
        font_size: u32,
        line_height: f64,
        target: BoxSize,
    ) -> Result<bool, FitError> {
        if content.is_empty() {
            return Ok(true);
        }
        let height = self.measure_height(content, font_size as f64, line_height, target.width)?;
        Ok(height <= target.height)
    }
}

impl<M: Measurer + ?Sized> Measurer for &M {
    fn measure_height(
        &self,
        content: &Content,
        font_size: f64,
        line_height: f64,
        width: f64,
    ) -> Result<f64, FitError> {
        (**self).measure_height(content, font_size, line_height, width)
    }
}

impl<M: Measurer + ?Sized> Measurer for Box<M> {
    fn measure_height(
        &self,
        content: &Content,
        font_size: f64,
        line_height: f64,
        width: f64,
    ) -> Result<f64, FitError> {
        (**self).measure_height(content, font_size, line_height, width)
    }
}

/// The text a measurer lays out for `content`. Images have none.
pub fn measurable_text(content: &Content) -> Result<Cow<'_, str>, FitError> {
    match content {
        Content::Text { text } => Ok(Cow::Borrowed(text.as_str())),
        Content::Html { html: markup } => Ok(Cow::Owned(html::flatten(markup))),
        Content::Image { .. } => Err(FitError::InvalidContent(
            "images are sized by the image resolver, not measured as text".to_string(),
        )),
    }
}

/// Height estimate from character-width tables and greedy line breaking.
#[derive(Debug, Clone, Default)]
pub struct MetricsMeasurer {
    metrics: FontMetrics,
}

impl MetricsMeasurer {
    pub fn new(metrics: FontMetrics) -> Self {
        Self { metrics }
    }
}

impl Measurer for MetricsMeasurer {
    fn measure_height(
        &self,
        content: &Content,
        font_size: f64,
        line_height: f64,
        width: f64,
    ) -> Result<f64, FitError> {
        let text = measurable_text(content)?;
        if font_size <= 0.0 {
            return Ok(0.0);
        }
        // Nothing fits in a box with no width.
        if width.is_nan() || width <= 0.0 {
            return Ok(f64::INFINITY);
        }
        let lines = TextLayout::new(&self.metrics).line_count(&text, font_size, width);
        Ok(lines as f64 * font_size * line_height)
    }
}

/// A measurer for environments with no layout capability at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableMeasurer;

impl Measurer for UnavailableMeasurer {
    fn measure_height(&self, _: &Content, _: f64, _: f64, _: f64) -> Result<f64, FitError> {
        Err(FitError::MeasurementUnavailable(
            "no render host available".to_string(),
        ))
    }
}
