//! # Text Layout
//!
//! Line breaking with `white-space: pre-wrap` semantics, so a paragraph
//! wraps here the way it wraps in the real grid cell: newlines are hard
//! breaks, runs of spaces are kept, trailing spaces hang past the edge.
//!
//! Everything is computed in em units. A font size only scales the
//! available width (`width_px / font_size`), which keeps the line count
//! monotonic in font size: a larger font never produces fewer lines.

pub mod html;

use unicode_linebreak::{linebreaks, BreakOpportunity};

use crate::font::FontMetrics;

/// A line of text after line-breaking.
#[derive(Debug, Clone, PartialEq)]
pub struct BrokenLine {
    pub text: String,
    /// Width in em, trailing spaces excluded.
    pub width_em: f64,
}

/// Compute UAX#14 break opportunities indexed by char position.
///
/// Entry `i` is the opportunity *before* `char[i]`. Index 0 is always
/// `None`. A break reported at the very end of the text is dropped.
fn compute_break_opportunities(text: &str) -> Vec<Option<BreakOpportunity>> {
    let char_count = text.chars().count();
    let mut result = vec![None; char_count];

    let mut byte_to_char = vec![0usize; text.len() + 1];
    for (char_idx, (byte_idx, _)) in text.char_indices().enumerate() {
        byte_to_char[byte_idx] = char_idx;
    }
    byte_to_char[text.len()] = char_count;

    for (byte_offset, opp) in linebreaks(text) {
        let char_idx = byte_to_char[byte_offset];
        if char_idx < char_count {
            result[char_idx] = Some(opp);
        }
    }

    result
}

fn is_newline(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

pub struct TextLayout<'a> {
    metrics: &'a FontMetrics,
}

impl<'a> TextLayout<'a> {
    pub fn new(metrics: &'a FontMetrics) -> Self {
        Self { metrics }
    }

    /// Break `text` into lines no wider than `max_width_em`.
    ///
    /// Greedy: each line ends at the last break opportunity before the
    /// first overflowing character. A word with no opportunity inside the
    /// line is split at the character that overflows.
    pub fn break_into_lines(&self, text: &str, max_width_em: f64) -> Vec<BrokenLine> {
        if text.is_empty() {
            return vec![];
        }

        let chars: Vec<char> = text.chars().collect();
        let widths: Vec<f64> = chars.iter().map(|&c| self.metrics.char_em(c)).collect();
        let break_opps = compute_break_opportunities(text);

        let mut lines = Vec::new();
        let mut line_start = 0;
        let mut line_width = 0.0;
        let mut last_break_point: Option<usize> = None;

        for (i, &ch) in chars.iter().enumerate() {
            if i > 0 {
                match break_opps[i] {
                    Some(BreakOpportunity::Mandatory) => {
                        let end = if is_newline(chars[i - 1]) { i - 1 } else { i };
                        lines.push(self.make_line(&chars[line_start..end], &widths[line_start..end]));
                        line_start = i;
                        line_width = 0.0;
                        last_break_point = None;
                    }
                    Some(BreakOpportunity::Allowed) => {
                        last_break_point = Some(i - 1);
                    }
                    None => {}
                }
            }

            // Consumed by the mandatory break that follows.
            if is_newline(ch) {
                continue;
            }

            let char_width = widths[i];

            // Hanging whitespace never causes an overflow.
            if ch == ' ' || ch == '\t' {
                line_width += char_width;
                continue;
            }

            if line_width + char_width > max_width_em && line_start < i {
                let break_at = match last_break_point {
                    Some(bp) if bp >= line_start => bp + 1,
                    _ => i,
                };
                lines.push(self.make_line(&chars[line_start..break_at], &widths[line_start..break_at]));
                line_start = break_at;
                line_width = widths[line_start..=i].iter().sum();
                last_break_point = None;
                continue;
            }

            line_width += char_width;
        }

        if line_start < chars.len() {
            lines.push(self.make_line(&chars[line_start..], &widths[line_start..]));
        }

        lines
    }

    fn make_line(&self, chars: &[char], widths: &[f64]) -> BrokenLine {
        let mut end = chars.len();
        while end > 0 && (chars[end - 1] == ' ' || chars[end - 1] == '\t' || is_newline(chars[end - 1])) {
            end -= 1;
        }
        BrokenLine {
            text: chars.iter().filter(|c| !is_newline(**c)).collect(),
            width_em: widths[..end].iter().sum(),
        }
    }

    /// Number of lines `text` occupies at `font_size` px inside `width_px`.
    pub fn line_count(&self, text: &str, font_size: f64, width_px: f64) -> usize {
        if font_size <= 0.0 {
            return 0;
        }
        self.break_into_lines(text, width_px / font_size).len()
    }
}
