//! # Image Scale Resolver
//!
//! Display dimensions for an image inside a box: contain-style scaling that
//! keeps the aspect ratio, or stretch to the box. Invalid inputs resolve to
//! a zero-size image instead of failing the layout.

use serde::{Deserialize, Serialize};

use crate::error::FitError;
use crate::model::BoxSize;

/// Resolved display size of an image in px.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ImageFit {
    pub width: f64,
    pub height: f64,
}

impl ImageFit {
    pub const ZERO: ImageFit = ImageFit {
        width: 0.0,
        height: 0.0,
    };

    /// Whole-pixel dimensions.
    pub fn rounded(self) -> Self {
        Self {
            width: self.width.round(),
            height: self.height.round(),
        }
    }
}

fn invalid(size: BoxSize) -> FitError {
    FitError::InvalidDimensions {
        width: size.width,
        height: size.height,
    }
}

/// Scale `natural` into `target`.
///
/// With `preserve_aspect_ratio` the result touches the box on one axis and
/// stays inside it on the other. Without it the box is returned as-is and
/// the natural size is not consulted.
pub fn try_resolve(
    natural: BoxSize,
    target: BoxSize,
    preserve_aspect_ratio: bool,
) -> Result<ImageFit, FitError> {
    if !target.is_valid() {
        return Err(invalid(target));
    }
    if !preserve_aspect_ratio {
        return Ok(ImageFit {
            width: target.width,
            height: target.height,
        });
    }
    if !natural.is_valid() {
        return Err(invalid(natural));
    }

    let image_ratio = natural.width / natural.height;
    let box_ratio = target.width / target.height;
    let fit = if image_ratio > box_ratio {
        ImageFit {
            width: target.width,
            height: target.width / image_ratio,
        }
    } else {
        ImageFit {
            width: target.height * image_ratio,
            height: target.height,
        }
    };
    Ok(fit)
}

/// [`try_resolve`], with every invalid input mapped to [`ImageFit::ZERO`].
pub fn resolve(natural: BoxSize, target: BoxSize, preserve_aspect_ratio: bool) -> ImageFit {
    match try_resolve(natural, target, preserve_aspect_ratio) {
        Ok(fit) => fit,
        Err(e) => {
            tracing::warn!(error = %e, "image resolves to zero size");
            ImageFit::ZERO
        }
    }
}
