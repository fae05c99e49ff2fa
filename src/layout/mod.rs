//! # Poster Layout Pass
//!
//! Takes a poster template, resolves its grid, and fits every section into
//! its cell. Sections are independent: each gets its own container and a
//! failure to measure one never affects another.
//!
//! ```text
//!   PosterTemplate ─► grid::resolve_tracks ─► grid::cell_rect (per section)
//!                                                  │
//!                           SectionContainer::set_box + refit_with(cache)
//!                                                  │
//!                                             PosterFit
//! ```

pub mod grid;
pub mod image;
pub mod section;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::FitConfig;
use crate::error::FitError;
use crate::fit::FitCache;
use crate::measure::Measurer;
use crate::model::{BoxSize, FitResult, PosterTemplate, SectionKind};

pub use grid::GridCell;
pub use image::ImageFit;
pub use section::{FitTicket, SectionContainer, SectionState};

/// Fit of one section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionFit {
    pub id: String,
    pub kind: SectionKind,
    pub cell: GridCell,
    pub state: SectionState,
}

impl SectionFit {
    pub fn result(&self) -> Option<FitResult> {
        match self.state {
            SectionState::Fitted(result) => Some(result),
            _ => None,
        }
    }
}

/// Fits of every section of a poster, in template order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PosterFit {
    pub sections: Vec<SectionFit>,
}

impl PosterFit {
    pub fn section(&self, id: &str) -> Option<&SectionFit> {
        self.sections.iter().find(|s| s.id == id)
    }
}

/// Runs whole posters through the fitting engine with one measurer. Holds
/// the solve cache across calls when the config enables it. Cached answers
/// belong to the measurer that produced them, so the layout owns both.
#[derive(Debug)]
pub struct PosterLayout<M: Measurer> {
    config: FitConfig,
    measurer: M,
    cache: Option<FitCache>,
}

impl<M: Measurer> PosterLayout<M> {
    pub fn new(config: FitConfig, measurer: M) -> Self {
        let cache = config.cache.then(FitCache::default);
        Self {
            config,
            measurer,
            cache,
        }
    }

    pub fn cache(&self) -> Option<&FitCache> {
        self.cache.as_ref()
    }

    /// Fit every section of `template`.
    pub fn fit(&mut self, template: &PosterTemplate) -> Result<PosterFit, FitError> {
        let poster = BoxSize::new(template.width, template.height);
        if !poster.is_valid() {
            return Err(FitError::InvalidDimensions {
                width: poster.width,
                height: poster.height,
            });
        }

        let margin = if template.margin.is_finite() {
            template.margin.max(0.0)
        } else {
            0.0
        };
        let content_width = (template.width - 2.0 * margin).max(0.0);
        let content_height = (template.height - 2.0 * margin).max(0.0);
        let columns = grid::resolve_tracks(&template.columns, content_width, template.gap);
        let rows = grid::resolve_tracks(&template.rows, content_height, template.gap);
        let padding = self
            .config
            .cell_padding
            .or(template.cell_padding)
            .unwrap_or(0.0);

        debug!(
            columns = ?columns,
            rows = ?rows,
            padding,
            "resolved poster grid"
        );

        let mut sections = Vec::with_capacity(template.sections.len());
        for def in &template.sections {
            let mut cell = grid::cell_rect(&def.placement, &columns, &rows, template.gap, padding)
                .map_err(|e| match e {
                    FitError::InvalidPlacement { reason, .. } => FitError::InvalidPlacement {
                        section: def.id.clone(),
                        reason,
                    },
                    other => other,
                })?;
            cell.x += margin;
            cell.y += margin;

            let mut container = SectionContainer::new(def.clone())
                .with_default_bounds(self.config.default_bounds)
                .with_linear_scan_for_tables(self.config.linear_scan_for_tables);
            container.set_box(cell.size());
            container.refit_with(&self.measurer, self.cache.as_mut());

            sections.push(SectionFit {
                id: def.id.clone(),
                kind: def.kind,
                cell,
                state: container.state(),
            });
        }

        if let Some(cache) = self.cache() {
            debug!(
                hits = cache.hits(),
                misses = cache.misses(),
                "fit cache"
            );
        }
        info!(sections = sections.len(), "fitted poster");
        Ok(PosterFit { sections })
    }
}
