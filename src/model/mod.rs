//! # Poster Model
//!
//! The input side of the fitting engine: what a poster template looks like,
//! what a section holds, and the geometry types every other module speaks.
//!
//! Everything here is plain data with serde derives so that a template can
//! be handed over as JSON by whatever UI hosts the editor.

use serde::{Deserialize, Serialize};

/// Renderable payload of a section. The engine only measures it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Content {
    /// Plain text. Newlines are hard breaks, spaces are preserved.
    Text { text: String },
    /// HTML markup from the rich-text editor.
    Html { html: String },
    /// An image. Natural dimensions are either given or read from `src`.
    Image {
        #[serde(default)]
        src: Option<String>,
        #[serde(default)]
        width: Option<f64>,
        #[serde(default)]
        height: Option<f64>,
    },
}

impl Default for Content {
    fn default() -> Self {
        Content::Text {
            text: String::new(),
        }
    }
}

impl Content {
    pub fn text(text: impl Into<String>) -> Self {
        Content::Text { text: text.into() }
    }

    pub fn html(html: impl Into<String>) -> Self {
        Content::Html { html: html.into() }
    }

    /// An image with known natural dimensions.
    pub fn image(width: f64, height: f64) -> Self {
        Content::Image {
            src: None,
            width: Some(width),
            height: Some(height),
        }
    }

    /// Whether there is nothing to lay out at all. Whitespace still takes
    /// space under pre-wrap, so only zero-length text is empty. An image is
    /// empty when it has neither a source nor dimensions.
    pub fn is_empty(&self) -> bool {
        match self {
            Content::Text { text } => text.is_empty(),
            Content::Html { html } => crate::text::html::flatten(html).is_empty(),
            Content::Image { .. } => self.is_blank(),
        }
    }

    /// Whether a section holding this shows its placeholder: no visible
    /// characters, or an image with nothing to show.
    pub fn is_blank(&self) -> bool {
        match self {
            Content::Text { text } => text.trim().is_empty(),
            Content::Html { html } => crate::text::html::flatten(html).trim().is_empty(),
            Content::Image { src, width, height } => {
                src.as_deref().map_or(true, str::is_empty) && width.is_none() && height.is_none()
            }
        }
    }
}

/// Target rectangle in px.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoxSize {
    pub width: f64,
    pub height: f64,
}

impl BoxSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Both sides finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Inclusive integer font-size range in px.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SizeBounds {
    pub min: u32,
    pub max: u32,
}

impl Default for SizeBounds {
    fn default() -> Self {
        Self { min: 12, max: 72 }
    }
}

impl SizeBounds {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Clamp `max` up to `min` when the bounds are inverted.
    pub fn normalized(self) -> Self {
        if self.min > self.max {
            let error = crate::error::FitError::InvalidBounds {
                min: self.min,
                max: self.max,
            };
            tracing::warn!(%error, "clamping max font size to min");
            Self {
                min: self.min,
                max: self.min,
            }
        } else {
            self
        }
    }

    pub fn clamp(&self, size: u32) -> u32 {
        let b = self.normalized();
        size.clamp(b.min, b.max)
    }
}

/// Semantic type of a section, used to pick fitting heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    #[serde(alias = "title")]
    Header,
    #[serde(alias = "introduction", alias = "abstract")]
    Text,
    Methods,
    Results,
    References,
    #[serde(alias = "image")]
    Figure,
    Table,
    #[default]
    #[serde(other)]
    Default,
}

impl SectionKind {
    /// Parse a template tag. Unknown tags map to `Default`.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "header" | "title" => SectionKind::Header,
            "text" | "introduction" | "abstract" => SectionKind::Text,
            "methods" => SectionKind::Methods,
            "results" => SectionKind::Results,
            "references" => SectionKind::References,
            "figure" | "image" => SectionKind::Figure,
            "table" => SectionKind::Table,
            _ => SectionKind::Default,
        }
    }
}

/// Grid track size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Track {
    /// Fixed size in px.
    Px(f64),
    /// Share of the space left after fixed tracks and gaps.
    Fr(f64),
}

/// Where a section sits on the grid. Indices are 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub column: usize,
    pub row: usize,
    #[serde(default = "one")]
    pub column_span: usize,
    #[serde(default = "one")]
    pub row_span: usize,
}

impl Default for Placement {
    /// Top-left cell.
    fn default() -> Self {
        Self {
            column: 0,
            row: 0,
            column_span: 1,
            row_span: 1,
        }
    }
}

fn one() -> usize {
    1
}

fn yes() -> bool {
    true
}

/// One cell of a poster template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionDef {
    pub id: String,
    #[serde(default)]
    pub kind: SectionKind,
    pub placement: Placement,
    /// Overrides the configured default minimum.
    #[serde(default)]
    pub min_font_size: Option<u32>,
    /// Overrides the configured default maximum.
    #[serde(default)]
    pub max_font_size: Option<u32>,
    /// Overrides the policy line height.
    #[serde(default)]
    pub line_height: Option<f64>,
    #[serde(default = "yes")]
    pub preserve_aspect_ratio: bool,
    #[serde(default)]
    pub content: Content,
}

impl SectionDef {
    pub fn new(id: impl Into<String>, kind: SectionKind, placement: Placement) -> Self {
        Self {
            id: id.into(),
            kind,
            placement,
            min_font_size: None,
            max_font_size: None,
            line_height: None,
            preserve_aspect_ratio: true,
            content: Content::default(),
        }
    }

    pub fn with_content(mut self, content: Content) -> Self {
        self.content = content;
        self
    }

    pub fn with_bounds(mut self, min: Option<u32>, max: Option<u32>) -> Self {
        self.min_font_size = min;
        self.max_font_size = max;
        self
    }
}

/// A poster: a fixed-size canvas divided into a grid of sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PosterTemplate {
    pub width: f64,
    pub height: f64,
    pub columns: Vec<Track>,
    pub rows: Vec<Track>,
    /// Gap between tracks in px.
    #[serde(default)]
    pub gap: f64,
    /// Outer margin of the poster in px.
    #[serde(default)]
    pub margin: f64,
    /// Inner padding of every cell in px. `None` uses the config value.
    #[serde(default)]
    pub cell_padding: Option<f64>,
    pub sections: Vec<SectionDef>,
}

/// Where a text fit came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitSource {
    /// Measured with the solver.
    Solved,
    /// Width-based policy hint, used when measurement is unavailable.
    Hint,
}

/// Output of one fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FitResult {
    #[serde(rename_all = "camelCase")]
    Text {
        font_size: u32,
        line_height: f64,
        source: FitSource,
        /// Nothing in range fit; content overflows at the minimum size.
        overflow: bool,
    },
    Image { width: f64, height: f64 },
}

impl FitResult {
    pub fn font_size(&self) -> Option<u32> {
        match self {
            FitResult::Text { font_size, .. } => Some(*font_size),
            FitResult::Image { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_normalized_clamps_inverted() {
        let b = SizeBounds::new(40, 20).normalized();
        assert_eq!(b, SizeBounds::new(40, 40));
        assert_eq!(SizeBounds::new(12, 72).normalized(), SizeBounds::new(12, 72));
    }

    #[test]
    fn test_bounds_clamp_value() {
        let b = SizeBounds::default();
        assert_eq!(b.clamp(5), 12);
        assert_eq!(b.clamp(100), 72);
        assert_eq!(b.clamp(30), 30);
    }

    #[test]
    fn test_section_kind_unknown_tag_is_default() {
        assert_eq!(SectionKind::from_tag("Methods"), SectionKind::Methods);
        assert_eq!(SectionKind::from_tag("acknowledgements"), SectionKind::Default);
        let kind: SectionKind = serde_json::from_str("\"sidebar\"").unwrap();
        assert_eq!(kind, SectionKind::Default);
    }

    #[test]
    fn test_section_kind_aliases_agree_with_serde() {
        for tag in [
            "header", "title", "text", "introduction", "abstract", "methods", "results",
            "references", "figure", "image", "table", "sidebar",
        ] {
            let kind: SectionKind = serde_json::from_str(&format!("\"{tag}\"")).unwrap();
            assert_eq!(kind, SectionKind::from_tag(tag), "{tag}");
        }
        let kind: SectionKind = serde_json::from_str("\"title\"").unwrap();
        assert_eq!(kind, SectionKind::Header);
    }

    #[test]
    fn test_content_emptiness() {
        assert!(Content::text("").is_empty());
        assert!(!Content::text("   \n").is_empty());
        assert!(Content::text("   \n").is_blank());
        assert!(!Content::text("x").is_empty());
        assert!(!Content::text("x").is_blank());
        assert!(Content::html("<p></p>").is_empty());
        assert!(!Content::html("<p> </p>").is_empty());
        assert!(Content::html("<p> </p>").is_blank());
        assert!(!Content::image(10.0, 10.0).is_empty());
        assert!(Content::Image {
            src: None,
            width: None,
            height: None
        }
        .is_empty());
    }

    #[test]
    fn test_section_def_deserializes_with_defaults() {
        let json = r#"{
            "id": "methods",
            "kind": "methods",
            "placement": { "column": 1, "row": 0 },
            "content": { "type": "text", "text": "We measured things." }
        }"#;
        let def: SectionDef = serde_json::from_str(json).unwrap();
        assert_eq!(def.kind, SectionKind::Methods);
        assert_eq!(def.placement.column_span, 1);
        assert_eq!(def.placement.row_span, 1);
        assert!(def.preserve_aspect_ratio);
        assert_eq!(def.min_font_size, None);
    }

    #[test]
    fn test_fit_result_serializes_camel_case() {
        let r = FitResult::Text {
            font_size: 24,
            line_height: 1.5,
            source: FitSource::Solved,
            overflow: false,
        };
        let json = serde_json::to_string(&r).unwrap();
        assert!(json.contains("\"fontSize\":24"), "got {json}");
        assert!(json.contains("\"source\":\"solved\""));
    }
}
