//! # Section Policy Table
//!
//! Per-section-type fitting heuristics: a width divisor for the fast hint
//! size and the line height text is set at. The table is a `'static`
//! constant; nothing writes to it after compilation.

use crate::model::{SectionDef, SectionKind, SizeBounds};

/// Fitting heuristics for one section type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionPolicy {
    /// `hint = container_width / divisor`.
    pub divisor: f64,
    /// Unitless line-height multiplier.
    pub line_height: f64,
}

const HEADER: SectionPolicy = SectionPolicy {
    divisor: 20.0,
    line_height: 1.3,
};
const BODY: SectionPolicy = SectionPolicy {
    divisor: 30.0,
    line_height: 1.5,
};
const REFERENCES: SectionPolicy = SectionPolicy {
    divisor: 40.0,
    line_height: 1.4,
};
const FIGURE: SectionPolicy = SectionPolicy {
    divisor: 35.0,
    line_height: 1.4,
};

pub fn policy_for(kind: SectionKind) -> &'static SectionPolicy {
    match kind {
        SectionKind::Header => &HEADER,
        SectionKind::Text | SectionKind::Methods | SectionKind::Results => &BODY,
        SectionKind::References => &REFERENCES,
        SectionKind::Figure | SectionKind::Table => &FIGURE,
        SectionKind::Default => &BODY,
    }
}

/// Section overrides win over the configured defaults. The result may be
/// inverted; the solver normalizes it.
pub fn resolve_bounds(section: &SectionDef, defaults: SizeBounds) -> SizeBounds {
    SizeBounds {
        min: section.min_font_size.unwrap_or(defaults.min),
        max: section.max_font_size.unwrap_or(defaults.max),
    }
}

/// The section's own line height if set and sane, else the policy's.
pub fn resolve_line_height(section: &SectionDef) -> f64 {
    match section.line_height {
        Some(lh) if lh.is_finite() && lh > 0.0 => lh,
        _ => policy_for(section.kind).line_height,
    }
}

/// Width-based starting size: `clamp(floor(width / divisor), min, max)`.
///
/// Cheap enough to use without measuring; the solver stays authoritative.
pub fn hint_font_size(container_width: f64, policy: &SectionPolicy, bounds: SizeBounds) -> u32 {
    let raw = if container_width.is_finite() && container_width > 0.0 {
        (container_width / policy.divisor).floor()
    } else {
        0.0
    };
    bounds.clamp(raw.min(u32::MAX as f64) as u32)
}
