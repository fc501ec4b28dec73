//! Window placement: turns an output area, a view size, the cursor position
//! and the boxes of already-visible views into a placement coordinate.
//!
//! `place` is total. Degenerate inputs degrade to a default geometry rather
//! than failing, since the caller sits on the compositor's map path.

mod rowcol;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{Point, Rect, Size};

/// Diagonal offset between consecutive cascade placements, in pixels.
pub const CASCADE_STEP: i32 = 32;

/// Fallback edge length when a caller asks to place a view with a
/// non-positive size. Applied only inside the rowcol search.
pub(crate) const DEFAULT_VIEW_EDGE: i32 = 256;

/// Most neighbor boxes the rowcol search will consider.
pub(crate) const MAX_NEIGHBOR_BOXES: usize = 256;

/// Placement strategy for newly mapped windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PlacementStrategy {
    Cascade,
    UnderMouse,
    #[default]
    RowSmart,
    ColSmart,
    RowMinOverlap,
    ColMinOverlap,
    /// Observed to behave exactly like [`PlacementStrategy::RowSmart`];
    /// tab-aware grouping happens outside this engine.
    AutoTab,
}

impl PlacementStrategy {
    /// The fluxbox resource value for this strategy.
    pub fn resource_str(&self) -> &'static str {
        match self {
            PlacementStrategy::Cascade => "CascadePlacement",
            PlacementStrategy::UnderMouse => "UnderMousePlacement",
            PlacementStrategy::RowSmart => "RowSmartPlacement",
            PlacementStrategy::ColSmart => "ColSmartPlacement",
            PlacementStrategy::RowMinOverlap => "RowMinOverlapPlacement",
            PlacementStrategy::ColMinOverlap => "ColMinOverlapPlacement",
            PlacementStrategy::AutoTab => "AutoTabPlacement",
        }
    }
}

impl fmt::Display for PlacementStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.resource_str())
    }
}

impl FromStr for PlacementStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, ConfigError> {
        let all = [
            PlacementStrategy::Cascade,
            PlacementStrategy::UnderMouse,
            PlacementStrategy::RowSmart,
            PlacementStrategy::ColSmart,
            PlacementStrategy::RowMinOverlap,
            PlacementStrategy::ColMinOverlap,
            PlacementStrategy::AutoTab,
        ];
        all.into_iter()
            .find(|strategy| strategy.resource_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::UnknownPlacementStrategy(s.to_string()))
    }
}

/// Horizontal scan order for placement candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RowDirection {
    #[default]
    LeftToRight,
    RightToLeft,
}

impl RowDirection {
    pub fn resource_str(&self) -> &'static str {
        match self {
            RowDirection::LeftToRight => "LeftToRight",
            RowDirection::RightToLeft => "RightToLeft",
        }
    }
}

impl fmt::Display for RowDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.resource_str())
    }
}

impl FromStr for RowDirection {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, ConfigError> {
        if s.eq_ignore_ascii_case("LeftToRight") {
            Ok(RowDirection::LeftToRight)
        } else if s.eq_ignore_ascii_case("RightToLeft") {
            Ok(RowDirection::RightToLeft)
        } else {
            Err(ConfigError::UnknownRowDirection(s.to_string()))
        }
    }
}

/// Vertical scan order for placement candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ColDirection {
    #[default]
    TopToBottom,
    BottomToTop,
}

impl ColDirection {
    pub fn resource_str(&self) -> &'static str {
        match self {
            ColDirection::TopToBottom => "TopToBottom",
            ColDirection::BottomToTop => "BottomToTop",
        }
    }
}

impl fmt::Display for ColDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.resource_str())
    }
}

impl FromStr for ColDirection {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, ConfigError> {
        if s.eq_ignore_ascii_case("TopToBottom") {
            Ok(ColDirection::TopToBottom)
        } else if s.eq_ignore_ascii_case("BottomToTop") {
            Ok(ColDirection::BottomToTop)
        } else {
            Err(ConfigError::UnknownColDirection(s.to_string()))
        }
    }
}

/// Strategy selection plus the mutable cascade cursor.
#[derive(Debug, Clone)]
pub(crate) struct Placer {
    pub(crate) strategy: PlacementStrategy,
    pub(crate) row_dir: RowDirection,
    pub(crate) col_dir: ColDirection,
    cascade_x: i32,
    cascade_y: i32,
}

impl Default for Placer {
    fn default() -> Self {
        Placer {
            strategy: PlacementStrategy::default(),
            row_dir: RowDirection::default(),
            col_dir: ColDirection::default(),
            cascade_x: 0,
            cascade_y: 0,
        }
    }
}

impl Placer {
    /// Computes a placement origin for a view of `size` inside `area`.
    /// `neighbors` are the frame boxes of currently visible views.
    pub(crate) fn place(
        &mut self,
        area: Rect,
        size: Size,
        cursor: Point,
        neighbors: &[Rect],
    ) -> Point {
        match self.strategy {
            PlacementStrategy::Cascade => self.place_cascade(area, size),
            PlacementStrategy::UnderMouse => place_under_mouse(area, size, cursor),
            PlacementStrategy::RowSmart | PlacementStrategy::AutoTab => rowcol::place(
                area,
                size,
                neighbors,
                rowcol::Axis::Row,
                rowcol::SearchMode::FirstFit,
                self.row_dir,
                self.col_dir,
            ),
            PlacementStrategy::ColSmart => rowcol::place(
                area,
                size,
                neighbors,
                rowcol::Axis::Col,
                rowcol::SearchMode::FirstFit,
                self.row_dir,
                self.col_dir,
            ),
            PlacementStrategy::RowMinOverlap => rowcol::place(
                area,
                size,
                neighbors,
                rowcol::Axis::Row,
                rowcol::SearchMode::MinOverlap,
                self.row_dir,
                self.col_dir,
            ),
            PlacementStrategy::ColMinOverlap => rowcol::place(
                area,
                size,
                neighbors,
                rowcol::Axis::Col,
                rowcol::SearchMode::MinOverlap,
                self.row_dir,
                self.col_dir,
            ),
        }
    }

    /// Diagonal cascade from the usable-box origin. The cursor persists
    /// across calls and wraps back to the origin once the next placement
    /// would no longer fit, instead of drifting off the output.
    fn place_cascade(&mut self, area: Rect, size: Size) -> Point {
        let position = Point::new(area.x + self.cascade_x, area.y + self.cascade_y);
        self.cascade_x += CASCADE_STEP;
        self.cascade_y += CASCADE_STEP;
        let max_x = area.width - size.width;
        let max_y = area.height - size.height;
        if self.cascade_x > max_x || self.cascade_y > max_y {
            self.cascade_x = 0;
            self.cascade_y = 0;
        }
        position
    }
}

/// Places the view at the cursor, clamped into the area so it stays fully
/// on screen. A degenerate area leaves the cursor untouched.
fn place_under_mouse(area: Rect, size: Size, cursor: Point) -> Point {
    if area.is_degenerate() {
        return cursor;
    }
    let max_x = (area.x + area.width - size.width).max(area.x);
    let max_y = (area.y + area.height - size.height).max(area.y);
    Point::new(cursor.x.clamp(area.x, max_x), cursor.y.clamp(area.y, max_y))
}
