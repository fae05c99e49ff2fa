//! Measurement backed by a host's own layout engine.
//!
//! A host (a browser DOM, a headless layout pass, a native toolkit) renders
//! the content into an off-flow probe element constrained to the box width
//! and reports its natural height. The probe is attached for exactly one
//! measurement and detached by `ProbeGuard` on every exit path.

use crate::error::FitError;
use crate::model::Content;

use super::{measurable_text, Measurer};

/// A render tree that can host a temporary measuring element.
pub trait LayoutHost {
    /// Handle to an attached, off-flow measuring element.
    type Probe;

    /// Attach a probe constrained to `width` px with `white-space: pre-wrap`
    /// at the given font size and line height.
    ///
    /// Hosts with no render tree return `FitError::MeasurementUnavailable`.
    fn attach(&self, width: f64, font_size: f64, line_height: f64) -> Result<Self::Probe, FitError>;

    /// Render `content` into the probe and read back its scroll height.
    fn render_height(&self, probe: &mut Self::Probe, content: &Content) -> Result<f64, FitError>;

    /// Remove the probe from the render tree.
    fn detach(&self, probe: Self::Probe);
}

/// Scoped ownership of an attached probe. Dropping the guard detaches it.
pub struct ProbeGuard<'h, H: LayoutHost> {
    host: &'h H,
    probe: Option<H::Probe>,
}

impl<'h, H: LayoutHost> ProbeGuard<'h, H> {
    pub fn acquire(
        host: &'h H,
        width: f64,
        font_size: f64,
        line_height: f64,
    ) -> Result<Self, FitError> {
        let probe = host.attach(width, font_size, line_height)?;
        Ok(Self {
            host,
            probe: Some(probe),
        })
    }

    pub fn render_height(&mut self, content: &Content) -> Result<f64, FitError> {
        match self.probe.as_mut() {
            Some(probe) => self.host.render_height(probe, content),
            None => Err(FitError::MeasurementUnavailable(
                "probe already released".to_string(),
            )),
        }
    }
}

impl<H: LayoutHost> Drop for ProbeGuard<'_, H> {
    fn drop(&mut self) {
        if let Some(probe) = self.probe.take() {
            self.host.detach(probe);
        }
    }
}

/// `Measurer` that delegates layout to a `LayoutHost`.
#[derive(Debug, Clone, Default)]
pub struct HostedMeasurer<H> {
    host: H,
}

impl<H: LayoutHost> HostedMeasurer<H> {
    pub fn new(host: H) -> Self {
        Self { host }
    }

    pub fn host(&self) -> &H {
        &self.host
    }
}

impl<H: LayoutHost> Measurer for HostedMeasurer<H> {
    fn measure_height(
        &self,
        content: &Content,
        font_size: f64,
        line_height: f64,
        width: f64,
    ) -> Result<f64, FitError> {
        // Rejects images before touching the host.
        measurable_text(content)?;
        let mut guard = ProbeGuard::acquire(&self.host, width, font_size, line_height)?;
        guard.render_height(content)
    }
}
