//! # Poster Grid
//!
//! Resolves the poster's column and row tracks to px and computes the cell
//! rectangle a section occupies. Supports fixed (px) and fractional (fr)
//! tracks, spans, a uniform gap and uniform cell padding.

use serde::{Deserialize, Serialize};

use crate::error::FitError;
use crate::model::{BoxSize, Placement, Track};

/// A section's cell on the poster, in px from the top-left of the content
/// area. `width`/`height` are the inner size after padding.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GridCell {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl GridCell {
    pub fn size(&self) -> BoxSize {
        BoxSize::new(self.width, self.height)
    }
}

/// Resolve track sizes to px.
///
/// Fixed tracks take their size. Fr tracks share whatever is left after
/// fixed tracks and gaps, proportionally to their factor. Negative or
/// non-finite track values count as zero.
pub fn resolve_tracks(tracks: &[Track], available: f64, gap: f64) -> Vec<f64> {
    if tracks.is_empty() {
        return vec![];
    }

    let gap = sanitize(gap);
    let total_gap = gap * (tracks.len() - 1) as f64;
    let mut remaining = (sanitize(available) - total_gap).max(0.0);
    let mut sizes = vec![0.0_f64; tracks.len()];
    let mut total_fr = 0.0_f64;

    for (i, track) in tracks.iter().enumerate() {
        match *track {
            Track::Px(px) => {
                sizes[i] = sanitize(px);
                remaining -= sizes[i];
            }
            Track::Fr(fr) => total_fr += sanitize(fr),
        }
    }

    remaining = remaining.max(0.0);
    if total_fr > 0.0 {
        let fr_unit = remaining / total_fr;
        for (i, track) in tracks.iter().enumerate() {
            if let Track::Fr(fr) = *track {
                sizes[i] = sanitize(fr) * fr_unit;
            }
        }
    }

    sizes
}

fn sanitize(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 {
        v
    } else {
        0.0
    }
}

/// The cell `placement` covers. Spans past the last track are clamped to
/// the grid edge, and a zero span counts as one.
pub fn cell_rect(
    placement: &Placement,
    columns: &[f64],
    rows: &[f64],
    gap: f64,
    padding: f64,
) -> Result<GridCell, FitError> {
    let (x, width) = span_extent(placement.column, placement.column_span, columns, gap)
        .ok_or_else(|| out_of_grid("column", placement.column, columns.len()))?;
    let (y, height) = span_extent(placement.row, placement.row_span, rows, gap)
        .ok_or_else(|| out_of_grid("row", placement.row, rows.len()))?;
    let padding = sanitize(padding);
    Ok(GridCell {
        x: x + padding,
        y: y + padding,
        width: (width - 2.0 * padding).max(0.0),
        height: (height - 2.0 * padding).max(0.0),
    })
}

/// Offset and length of `span` tracks starting at `start`, gaps included.
fn span_extent(start: usize, span: usize, tracks: &[f64], gap: f64) -> Option<(f64, f64)> {
    if start >= tracks.len() {
        return None;
    }
    let gap = sanitize(gap);
    let end = start.saturating_add(span.max(1)).min(tracks.len());
    let offset = tracks[..start].iter().sum::<f64>() + gap * start as f64;
    let length = tracks[start..end].iter().sum::<f64>() + gap * (end - start - 1) as f64;
    Some((offset, length))
}

fn out_of_grid(axis: &str, index: usize, len: usize) -> FitError {
    let reason = if len == 0 {
        format!("grid has no {axis}s")
    } else {
        format!("{axis} {index} is outside a grid of {len} {axis}s")
    };
    FitError::InvalidPlacement {
        section: String::new(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(column: usize, row: usize, column_span: usize, row_span: usize) -> Placement {
        Placement {
            column,
            row,
            column_span,
            row_span,
        }
    }

    #[test]
    fn test_fr_tracks_share_remaining_space() {
        let sizes = resolve_tracks(&[Track::Fr(1.0), Track::Fr(2.0), Track::Fr(1.0)], 420.0, 10.0);
        assert_eq!(sizes, vec![100.0, 200.0, 100.0]);
    }

    #[test]
    fn test_px_tracks_before_fr() {
        let sizes = resolve_tracks(&[Track::Px(100.0), Track::Fr(1.0)], 500.0, 0.0);
        assert_eq!(sizes, vec![100.0, 400.0]);
    }

    #[test]
    fn test_overfull_fixed_tracks_leave_fr_at_zero() {
        let sizes = resolve_tracks(&[Track::Px(400.0), Track::Fr(1.0)], 300.0, 0.0);
        assert_eq!(sizes, vec![400.0, 0.0]);
    }

    #[test]
    fn test_negative_tracks_count_as_zero() {
        let sizes = resolve_tracks(&[Track::Px(-50.0), Track::Fr(f64::NAN), Track::Fr(1.0)], 100.0, 0.0);
        assert_eq!(sizes, vec![0.0, 0.0, 100.0]);
    }

    #[test]
    fn test_empty_template() {
        assert!(resolve_tracks(&[], 100.0, 5.0).is_empty());
    }

    #[test]
    fn test_single_cell() {
        let cols = [100.0, 200.0];
        let rows = [50.0, 60.0];
        let cell = cell_rect(&at(1, 1, 1, 1), &cols, &rows, 10.0, 0.0).unwrap();
        assert_eq!(
            cell,
            GridCell {
                x: 110.0,
                y: 60.0,
                width: 200.0,
                height: 60.0
            }
        );
    }

    #[test]
    fn test_span_includes_inner_gaps() {
        let cols = [100.0, 100.0, 100.0];
        let rows = [80.0];
        let size = cell_rect(&at(0, 0, 3, 1), &cols, &rows, 20.0, 0.0).unwrap().size();
        assert_eq!(size, BoxSize::new(340.0, 80.0));
    }

    #[test]
    fn test_span_clamped_to_grid_edge() {
        let cols = [100.0, 100.0];
        let rows = [80.0];
        let size = cell_rect(&at(1, 0, 5, 9), &cols, &rows, 10.0, 0.0).unwrap().size();
        assert_eq!(size, BoxSize::new(100.0, 80.0));
    }

    #[test]
    fn test_padding_subtracted_on_each_side() {
        let cell = cell_rect(&at(0, 0, 1, 1), &[200.0], &[100.0], 0.0, 12.0).unwrap();
        assert_eq!(cell.x, 12.0);
        assert_eq!(cell.size(), BoxSize::new(176.0, 76.0));
        // Padding larger than the cell leaves nothing, never negative.
        let size = cell_rect(&at(0, 0, 1, 1), &[20.0], &[20.0], 0.0, 15.0).unwrap().size();
        assert_eq!(size, BoxSize::new(0.0, 0.0));
    }

    #[test]
    fn test_empty_grid_is_invalid_placement() {
        let err = cell_rect(&at(0, 0, 1, 1), &[], &[100.0], 0.0, 0.0).unwrap_err();
        assert!(matches!(err, FitError::InvalidPlacement { .. }));
        let err = cell_rect(&at(3, 0, 1, 1), &[100.0], &[100.0], 0.0, 0.0).unwrap_err();
        assert!(err.to_string().contains("column 3"));
    }
}
