//! The rowcol-smart search shared by the Smart and MinOverlap strategies.
//!
//! Candidate coordinates on each axis are the placement interval endpoints
//! plus, for every visible neighbor box, its near and far edges and those
//! edges shifted back by the view's own extent, so a candidate exists for
//! "flush against" every neighbor edge. Candidates are clamped into the
//! interval, sorted, and de-duplicated; the scan then walks rows-outer or
//! cols-outer and scores each position by total pixel overlap.

use super::{ColDirection, RowDirection, DEFAULT_VIEW_EDGE};
use crate::types::{Point, Rect, Size};

/// Upper bound on candidate coordinates per axis; excess candidates are
/// silently dropped. This bounds the scan at roughly a million positions
/// on pathological layouts.
const MAX_AXIS_CANDIDATES: usize = 1024;

/// Which axis the outer scan loop walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Axis {
    /// Rows outer: walk each row of y candidates across all x candidates.
    Row,
    /// Columns outer.
    Col,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum SearchMode {
    /// Return the first zero-overlap candidate in scan order; if every
    /// candidate overlaps, fall back to the first candidate scanned.
    FirstFit,
    /// Return the candidate with the least total overlap, ties resolved to
    /// the earliest scanned. Short-circuits on a zero-overlap hit.
    MinOverlap,
}

pub(super) fn place(
    area: Rect,
    size: Size,
    neighbors: &[Rect],
    axis: Axis,
    mode: SearchMode,
    row_dir: RowDirection,
    col_dir: ColDirection,
) -> Point {
    let width = if size.width < 1 { DEFAULT_VIEW_EDGE } else { size.width };
    let height = if size.height < 1 { DEFAULT_VIEW_EDGE } else { size.height };

    let min_x = area.x;
    let max_x = (area.x + area.width - width).max(min_x);
    let min_y = area.y;
    let max_y = (area.y + area.height - height).max(min_y);

    let mut xs = axis_candidates(min_x, max_x, width, neighbors, |n| (n.left(), n.right()));
    let mut ys = axis_candidates(min_y, max_y, height, neighbors, |n| (n.top(), n.bottom()));
    if row_dir == RowDirection::RightToLeft {
        xs.reverse();
    }
    if col_dir == ColDirection::BottomToTop {
        ys.reverse();
    }

    let mut best: Option<(i64, Point)> = None;
    let mut consider = |x: i32, y: i32| -> Option<Point> {
        let candidate = Rect::new(x, y, width, height);
        let cost: i64 = neighbors
            .iter()
            .map(|n| candidate.intersection_area(n))
            .sum();
        if cost == 0 {
            return Some(candidate.origin());
        }
        let keep = match (mode, best) {
            (_, None) => true,
            (SearchMode::FirstFit, Some(_)) => false,
            (SearchMode::MinOverlap, Some((best_cost, _))) => cost < best_cost,
        };
        if keep {
            best = Some((cost, candidate.origin()));
        }
        None
    };

    match axis {
        Axis::Row => {
            for &y in &ys {
                for &x in &xs {
                    if let Some(found) = consider(x, y) {
                        return found;
                    }
                }
            }
        }
        Axis::Col => {
            for &x in &xs {
                for &y in &ys {
                    if let Some(found) = consider(x, y) {
                        return found;
                    }
                }
            }
        }
    }

    best.map(|(_, p)| p).unwrap_or(Point::new(min_x, min_y))
}

/// Candidate placement origins along one axis, ascending and de-duplicated.
fn axis_candidates(
    min: i32,
    max: i32,
    extent: i32,
    neighbors: &[Rect],
    edges: impl Fn(&Rect) -> (i32, i32),
) -> Vec<i32> {
    let mut candidates = Vec::with_capacity(2 + neighbors.len() * 4);
    candidates.push(min);
    candidates.push(max);
    for neighbor in neighbors {
        let (near, far) = edges(neighbor);
        for value in [near, far, near - extent, far - extent] {
            candidates.push(value.clamp(min, max));
        }
    }
    candidates.sort_unstable();
    candidates.dedup();
    candidates.truncate(MAX_AXIS_CANDIDATES);
    candidates
}
