//! # Font Metrics
//!
//! Character advance widths used by the metrics-backed measurer.
//!
//! Two sources: static AFM tables for the standard families (no font file
//! needed, which is what tests and headless runs use) and real metrics
//! parsed from a TrueType/OpenType file with ttf-parser.

mod standard;

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::FitError;
use standard::{StandardWidths, HELVETICA, TIMES};

/// Built-in font families with static metric tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StandardFont {
    #[default]
    Helvetica,
    Times,
}

impl StandardFont {
    fn widths(&self) -> &'static StandardWidths {
        match self {
            StandardFont::Helvetica => &HELVETICA,
            StandardFont::Times => &TIMES,
        }
    }
}

/// Parsed metrics from a TrueType/OpenType font via ttf-parser.
#[derive(Debug, Clone)]
pub struct CustomFontMetrics {
    pub units_per_em: u16,
    pub advance_widths: HashMap<char, u16>,
    pub default_advance: u16,
}

impl CustomFontMetrics {
    /// Parse metrics from font data using ttf-parser.
    pub fn from_font_data(data: &[u8]) -> Result<Self, FitError> {
        let face = ttf_parser::Face::parse(data, 0)
            .map_err(|e| FitError::Font(format!("cannot parse font: {e}")))?;
        let units_per_em = face.units_per_em();

        let mut advance_widths = HashMap::new();
        let mut default_advance = 0u16;

        for code in 32u32..=0xFFFF {
            if let Some(ch) = char::from_u32(code) {
                if let Some(glyph_id) = face.glyph_index(ch) {
                    let advance = face.glyph_hor_advance(glyph_id).unwrap_or(0);
                    advance_widths.insert(ch, advance);
                    if ch == 'n' {
                        default_advance = advance;
                    }
                }
            }
        }

        if default_advance == 0 {
            default_advance = units_per_em / 2;
        }

        Ok(CustomFontMetrics {
            units_per_em,
            advance_widths,
            default_advance,
        })
    }

    fn em(&self, ch: char) -> f64 {
        let w = self
            .advance_widths
            .get(&ch)
            .copied()
            .unwrap_or(self.default_advance);
        w as f64 / self.units_per_em.max(1) as f64
    }
}

/// Width source for text measurement.
#[derive(Debug, Clone)]
pub enum FontMetrics {
    Standard(StandardFont),
    Custom(CustomFontMetrics),
}

impl Default for FontMetrics {
    fn default() -> Self {
        FontMetrics::Standard(StandardFont::default())
    }
}

impl FontMetrics {
    /// Load metrics from a font file on disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FitError> {
        let path = path.as_ref();
        let data = std::fs::read(path)
            .map_err(|e| FitError::Font(format!("cannot read '{}': {e}", path.display())))?;
        Ok(FontMetrics::Custom(CustomFontMetrics::from_font_data(&data)?))
    }

    /// Advance width of `ch` in em units.
    pub fn char_em(&self, ch: char) -> f64 {
        match self {
            FontMetrics::Standard(font) => font.widths().em(ch),
            FontMetrics::Custom(custom) => custom.em(ch),
        }
    }
}
