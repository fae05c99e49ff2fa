//! JavaScript bindings.
//!
//! `fit_poster_with_host` measures through a JS callback so that the
//! browser's own layout engine decides what fits:
//!
//! ```js
//! fit_poster_with_host(json, (markup, isHtml, fontSize, lineHeight, width) => {
//!   probe.style.cssText = `position:absolute;visibility:hidden;white-space:pre-wrap;` +
//!     `width:${width}px;font-size:${fontSize}px;line-height:${lineHeight}`;
//!   isHtml ? (probe.innerHTML = markup) : (probe.textContent = markup);
//!   return probe.scrollHeight;
//! });
//! ```

use wasm_bindgen::prelude::*;

use crate::error::FitError;
use crate::measure::Measurer;
use crate::model::{BoxSize, Content, PosterTemplate};
use crate::{FitConfig, PosterLayout};

fn to_js(e: FitError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Measures by calling `(markup, isHtml, fontSize, lineHeight, width) -> height`.
struct JsMeasurer<'a> {
    measure: &'a js_sys::Function,
}

impl Measurer for JsMeasurer<'_> {
    fn measure_height(
        &self,
        content: &Content,
        font_size: f64,
        line_height: f64,
        width: f64,
    ) -> Result<f64, FitError> {
        let (markup, is_html) = match content {
            Content::Text { text } => (text.as_str(), false),
            Content::Html { html } => (html.as_str(), true),
            Content::Image { .. } => {
                return Err(FitError::InvalidContent(
                    "images are not measured as text".to_string(),
                ))
            }
        };
        let args = js_sys::Array::new();
        args.push(&JsValue::from_str(markup));
        args.push(&JsValue::from_bool(is_html));
        args.push(&JsValue::from_f64(font_size));
        args.push(&JsValue::from_f64(line_height));
        args.push(&JsValue::from_f64(width));
        let value = self
            .measure
            .apply(&JsValue::NULL, &args)
            .map_err(|e| FitError::MeasurementUnavailable(format!("{e:?}")))?;
        value.as_f64().ok_or_else(|| {
            FitError::MeasurementUnavailable("measure callback did not return a number".to_string())
        })
    }
}

fn parse(json: &str) -> Result<PosterTemplate, JsValue> {
    serde_json::from_str(json).map_err(|e| to_js(e.into()))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| to_js(e.into()))
}

/// Fit a poster with the built-in font metrics. Returns `PosterFit` JSON.
#[wasm_bindgen]
pub fn fit_poster(json: &str) -> Result<String, JsValue> {
    crate::fit_poster_json(json).map_err(to_js)
}

/// Fit a poster measuring with a JS callback. Returns `PosterFit` JSON.
#[wasm_bindgen]
pub fn fit_poster_with_host(json: &str, measure: &js_sys::Function) -> Result<String, JsValue> {
    let template = parse(json)?;
    let fit = PosterLayout::new(FitConfig::default(), JsMeasurer { measure })
        .fit(&template)
        .map_err(to_js)?;
    to_json(&fit)
}

/// Display size of an image inside a box. Returns `ImageFit` JSON.
#[wasm_bindgen]
pub fn resolve_image(
    natural_width: f64,
    natural_height: f64,
    box_width: f64,
    box_height: f64,
    preserve_aspect_ratio: bool,
) -> Result<String, JsValue> {
    let fit = crate::layout::image::resolve(
        BoxSize::new(natural_width, natural_height),
        BoxSize::new(box_width, box_height),
        preserve_aspect_ratio,
    );
    to_json(&fit)
}
