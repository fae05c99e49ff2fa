//! # Font-Size Solver
//!
//! Finds the largest integer font size in `[min, max]` at which content
//! still fits its box, asking the `Measurer` as few times as possible.
//!
//! Binary search assumes fit is monotonic in font size: if size `f` fits,
//! every smaller size fits too. That holds for reflowed text and HTML. It
//! can break for tables with fixed-width cells, so table markup is scanned
//! linearly from the top instead.

pub mod cache;

use tracing::debug;

use crate::error::FitError;
use crate::measure::Measurer;
use crate::model::{BoxSize, Content, SizeBounds};
use crate::text::html;

pub use cache::FitCache;

/// How the solver walks the font-size range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SearchStrategy {
    /// O(log(max − min)) probes. Requires monotonic fit.
    #[default]
    Binary,
    /// Probe from `max` down, first fit wins. Correct for any content.
    Linear,
}

impl SearchStrategy {
    /// Linear for table markup when `linear_for_tables` is set, binary
    /// otherwise.
    pub fn for_content(content: &Content, linear_for_tables: bool) -> Self {
        match content {
            Content::Html { html: markup } if linear_for_tables && html::contains_table(markup) => {
                SearchStrategy::Linear
            }
            _ => SearchStrategy::Binary,
        }
    }
}

/// Outcome of one solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Solution {
    pub font_size: u32,
    /// False when nothing in range fit and `font_size` is the minimum.
    pub fits: bool,
    /// Measurer calls made.
    pub probes: u32,
}

/// Everything the solver needs for one box.
#[derive(Debug, Clone, Copy)]
pub struct FitRequest<'a> {
    pub content: &'a Content,
    pub target: BoxSize,
    pub bounds: SizeBounds,
    pub line_height: f64,
    pub strategy: SearchStrategy,
}

impl<'a> FitRequest<'a> {
    pub fn new(content: &'a Content, target: BoxSize, bounds: SizeBounds, line_height: f64) -> Self {
        Self {
            content,
            target,
            bounds,
            line_height,
            strategy: SearchStrategy::Binary,
        }
    }

    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Run the search. Measurement errors propagate unchanged, so a caller
    /// can tell `MeasurementUnavailable` apart and fall back to a hint.
    pub fn solve<M: Measurer + ?Sized>(&self, measurer: &M) -> Result<Solution, FitError> {
        let bounds = self.bounds.normalized();
        let solution = match self.strategy {
            SearchStrategy::Binary => self.binary_search(measurer, bounds)?,
            SearchStrategy::Linear => self.linear_scan(measurer, bounds)?,
        };
        debug!(
            font_size = solution.font_size,
            fits = solution.fits,
            probes = solution.probes,
            strategy = ?self.strategy,
            width = self.target.width,
            height = self.target.height,
            "solved font size"
        );
        Ok(solution)
    }

    fn fits<M: Measurer + ?Sized>(&self, measurer: &M, size: u32) -> Result<bool, FitError> {
        measurer.fits(self.content, size, self.line_height, self.target)
    }

    fn binary_search<M: Measurer + ?Sized>(
        &self,
        measurer: &M,
        bounds: SizeBounds,
    ) -> Result<Solution, FitError> {
        let mut low = bounds.min;
        let mut high = bounds.max;
        let mut best = None;
        let mut probes = 0;

        while low <= high {
            let mid = low + (high - low) / 2;
            probes += 1;
            if self.fits(measurer, mid)? {
                best = Some(mid);
                match mid.checked_add(1) {
                    Some(next) => low = next,
                    None => break,
                }
            } else {
                match mid.checked_sub(1) {
                    Some(prev) => high = prev,
                    None => break,
                }
            }
        }

        Ok(Solution {
            font_size: best.unwrap_or(bounds.min),
            fits: best.is_some(),
            probes,
        })
    }

    fn linear_scan<M: Measurer + ?Sized>(
        &self,
        measurer: &M,
        bounds: SizeBounds,
    ) -> Result<Solution, FitError> {
        let mut probes = 0;
        for size in (bounds.min..=bounds.max).rev() {
            probes += 1;
            if self.fits(measurer, size)? {
                return Ok(Solution {
                    font_size: size,
                    fits: true,
                    probes,
                });
            }
        }
        Ok(Solution {
            font_size: bounds.min,
            fits: false,
            probes,
        })
    }
}

/// Largest font size in `bounds` at which `content` fits `target`, by
/// binary search. Returns `bounds.min` when nothing fits.
pub fn solve<M: Measurer + ?Sized>(
    measurer: &M,
    content: &Content,
    target: BoxSize,
    bounds: SizeBounds,
    line_height: f64,
) -> Result<u32, FitError> {
    FitRequest::new(content, target, bounds, line_height)
        .solve(measurer)
        .map(|s| s.font_size)
}
