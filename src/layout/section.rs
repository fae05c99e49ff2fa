//! # Section Container
//!
//! Owns one poster section's content and target box and drives it through
//! `Empty → Editing → Fitted`. Every input change bumps a version number.
//! A fit is computed from a snapshot (`FitTicket`) and only applied if no
//! input changed since the snapshot was taken, so an out-of-order result
//! from an older edit can never overwrite a newer one.
//!
//! ```text
//!   set_content / set_box / set_bounds ──► version += 1, state = Editing
//!   begin_fit()  ──► FitTicket { version, inputs }
//!   ticket.run() ──► FitResult          (pure, container untouched)
//!   apply()      ──► Fitted  if ticket.version == version, else discarded
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::fit::{FitCache, FitRequest, SearchStrategy};
use crate::image_loader;
use crate::measure::Measurer;
use crate::model::{BoxSize, Content, FitResult, FitSource, SectionDef, SectionKind, SizeBounds};
use crate::policy::{hint_font_size, policy_for, resolve_bounds, resolve_line_height};

use super::image;

/// Where a section is in its edit/fit cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "result", rename_all = "lowercase")]
pub enum SectionState {
    /// Nothing to render.
    Empty,
    /// Inputs changed since the last applied fit.
    Editing,
    /// The current inputs have been fitted.
    Fitted(FitResult),
}

/// A snapshot of a container's fit inputs, tagged with its version.
#[derive(Debug, Clone)]
pub struct FitTicket {
    version: u64,
    id: String,
    kind: SectionKind,
    content: Content,
    target: BoxSize,
    bounds: SizeBounds,
    line_height: f64,
    preserve_aspect_ratio: bool,
    strategy: SearchStrategy,
}

impl FitTicket {
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Compute the fit for the snapshot. Never fails: text degrades to the
    /// policy hint and unreadable images resolve to zero size.
    pub fn run<M: Measurer + ?Sized>(&self, measurer: &M, cache: Option<&mut FitCache>) -> FitResult {
        match &self.content {
            Content::Image { src, width, height } => self.run_image(src.as_deref(), *width, *height),
            _ => self.run_text(measurer, cache),
        }
    }

    fn run_text<M: Measurer + ?Sized>(&self, measurer: &M, cache: Option<&mut FitCache>) -> FitResult {
        let request = FitRequest::new(&self.content, self.target, self.bounds, self.line_height)
            .with_strategy(self.strategy);
        let solved = match cache {
            Some(cache) => cache.solve(measurer, &request),
            None => request.solve(measurer),
        };
        match solved {
            Ok(solution) => {
                if !solution.fits {
                    warn!(
                        section = %self.id,
                        font_size = solution.font_size,
                        "content overflows its box at the minimum font size"
                    );
                }
                FitResult::Text {
                    font_size: solution.font_size,
                    line_height: self.line_height,
                    source: FitSource::Solved,
                    overflow: !solution.fits,
                }
            }
            Err(e) => {
                if e.is_measurement_unavailable() {
                    debug!(section = %self.id, error = %e, "falling back to width hint");
                } else {
                    warn!(section = %self.id, error = %e, "measurement failed, falling back to width hint");
                }
                self.hint()
            }
        }
    }

    fn hint(&self) -> FitResult {
        let font_size = hint_font_size(self.target.width, policy_for(self.kind), self.bounds);
        FitResult::Text {
            font_size,
            line_height: self.line_height,
            source: FitSource::Hint,
            overflow: false,
        }
    }

    fn run_image(&self, src: Option<&str>, width: Option<f64>, height: Option<f64>) -> FitResult {
        let natural = match (width, height, src) {
            (Some(w), Some(h), _) => BoxSize::new(w, h),
            (_, _, Some(src)) if self.preserve_aspect_ratio => {
                image_loader::natural_size(src).unwrap_or_else(|e| {
                    warn!(section = %self.id, error = %e, "cannot read image dimensions");
                    BoxSize::default()
                })
            }
            _ => BoxSize::default(),
        };
        let fit = image::resolve(natural, self.target, self.preserve_aspect_ratio);
        FitResult::Image {
            width: fit.width,
            height: fit.height,
        }
    }
}

/// Fitting state for one poster section.
#[derive(Debug, Clone)]
pub struct SectionContainer {
    def: SectionDef,
    target: BoxSize,
    defaults: SizeBounds,
    linear_scan_for_tables: bool,
    version: u64,
    state: SectionState,
}

impl SectionContainer {
    pub fn new(def: SectionDef) -> Self {
        let state = Self::unfitted_state(&def.content);
        Self {
            def,
            target: BoxSize::default(),
            defaults: SizeBounds::default(),
            linear_scan_for_tables: true,
            version: 0,
            state,
        }
    }

    /// Font-size bounds used where the section sets none.
    pub fn with_default_bounds(mut self, defaults: SizeBounds) -> Self {
        self.defaults = defaults;
        self.invalidate();
        self
    }

    pub fn with_linear_scan_for_tables(mut self, enabled: bool) -> Self {
        self.linear_scan_for_tables = enabled;
        self.invalidate();
        self
    }

    pub fn id(&self) -> &str {
        &self.def.id
    }

    pub fn def(&self) -> &SectionDef {
        &self.def
    }

    pub fn content(&self) -> &Content {
        &self.def.content
    }

    pub fn target(&self) -> BoxSize {
        self.target
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn state(&self) -> SectionState {
        self.state
    }

    /// The applied fit, if the current inputs have one.
    pub fn result(&self) -> Option<FitResult> {
        match self.state {
            SectionState::Fitted(result) => Some(result),
            _ => None,
        }
    }

    pub fn set_content(&mut self, content: Content) {
        self.def.content = content;
        self.invalidate();
    }

    pub fn set_box(&mut self, target: BoxSize) {
        self.target = target;
        self.invalidate();
    }

    /// Per-section bound overrides. `None` falls back to the defaults.
    pub fn set_bounds(&mut self, min: Option<u32>, max: Option<u32>) {
        self.def.min_font_size = min;
        self.def.max_font_size = max;
        self.invalidate();
    }

    fn invalidate(&mut self) {
        self.version += 1;
        self.state = Self::unfitted_state(&self.def.content);
    }

    fn unfitted_state(content: &Content) -> SectionState {
        if content.is_blank() {
            SectionState::Empty
        } else {
            SectionState::Editing
        }
    }

    /// Snapshot the current inputs. `None` when there is nothing to fit.
    pub fn begin_fit(&self) -> Option<FitTicket> {
        if self.def.content.is_blank() {
            return None;
        }
        let bounds = resolve_bounds(&self.def, self.defaults);
        Some(FitTicket {
            version: self.version,
            id: self.def.id.clone(),
            kind: self.def.kind,
            content: self.def.content.clone(),
            target: self.target,
            bounds: bounds.normalized(),
            line_height: resolve_line_height(&self.def),
            preserve_aspect_ratio: self.def.preserve_aspect_ratio,
            strategy: SearchStrategy::for_content(&self.def.content, self.linear_scan_for_tables),
        })
    }

    /// Apply a result computed from `ticket`. Returns false, leaving the
    /// state untouched, when the inputs changed after the ticket was taken.
    pub fn apply(&mut self, ticket: &FitTicket, result: FitResult) -> bool {
        if ticket.version != self.version {
            debug!(
                section = %self.def.id,
                ticket = ticket.version,
                current = self.version,
                "discarding stale fit"
            );
            return false;
        }
        self.state = SectionState::Fitted(result);
        true
    }

    /// Fit the current inputs synchronously.
    pub fn refit<M: Measurer + ?Sized>(&mut self, measurer: &M) -> Option<FitResult> {
        self.refit_with(measurer, None)
    }

    /// [`refit`](Self::refit) through an optional solve cache.
    pub fn refit_with<M: Measurer + ?Sized>(
        &mut self,
        measurer: &M,
        cache: Option<&mut FitCache>,
    ) -> Option<FitResult> {
        let ticket = self.begin_fit()?;
        let result = ticket.run(measurer, cache);
        self.apply(&ticket, result);
        Some(result)
    }

    /// Replace the content and refit.
    pub fn edit<M: Measurer + ?Sized>(&mut self, content: Content, measurer: &M) -> Option<FitResult> {
        self.set_content(content);
        self.refit(measurer)
    }
}
