//! # posterfit
//!
//! A content-fitting engine for grid-based scientific posters.
//!
//! A poster template is a fixed canvas cut into grid cells. Authors pour
//! text, rich-text HTML and figures into those cells, and the cells do not
//! grow. posterfit works the other way round from a normal layout engine:
//! the box is fixed and the **font size is the unknown**. For every text
//! section it finds the largest integer font size at which the content
//! still fits. For every figure it picks display dimensions that keep the
//! aspect ratio inside the cell.
//!
//! ## Architecture
//!
//! ```text
//! Input (JSON/API)
//!       ↓
//!   [model]     Poster template, sections, content
//!       ↓
//!   [layout]    Grid cells, one SectionContainer per section
//!       ↓
//!   [policy]    Bounds, line height, width hint per section type
//!       ↓
//!   [fit]       Binary search over font sizes (cached)
//!       ↓
//!   [measure]   Does it fit? Font metrics or a host layout engine
//!       ↓
//!   PosterFit (JSON)
//! ```

pub mod config;
pub mod error;
pub mod fit;
pub mod font;
pub mod image_loader;
pub mod layout;
pub mod measure;
pub mod model;
pub mod policy;
pub mod text;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::FitConfig;
pub use error::FitError;
pub use fit::{solve, FitCache, FitRequest, SearchStrategy, Solution};
pub use layout::image::{resolve as resolve_image, try_resolve as try_resolve_image, ImageFit};
pub use layout::{PosterFit, PosterLayout, SectionContainer, SectionFit, SectionState};
pub use measure::{HostedMeasurer, LayoutHost, Measurer, MetricsMeasurer, UnavailableMeasurer};
pub use model::{
    BoxSize, Content, FitResult, FitSource, Placement, PosterTemplate, SectionDef, SectionKind,
    SizeBounds, Track,
};
pub use policy::{hint_font_size, policy_for, SectionPolicy};

/// Fit every section of a poster with the configured font metrics.
pub fn fit_poster(template: &PosterTemplate, config: &FitConfig) -> Result<PosterFit, FitError> {
    let measurer = config.measurer()?;
    PosterLayout::new(config.clone(), measurer).fit(template)
}

/// Fit a poster described as JSON and return the `PosterFit` as JSON.
pub fn fit_poster_json(json: &str) -> Result<String, FitError> {
    let template: PosterTemplate = serde_json::from_str(json)?;
    let fit = fit_poster(&template, &FitConfig::default())?;
    Ok(serde_json::to_string(&fit)?)
}
