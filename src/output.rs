//! Read-only query surface for a display region.
//!
//! Outputs are referenced per call and never stored by the engine.

use crate::types::Rect;

/// Capabilities the engine may query on an output.
pub trait OutputBackend {
    /// Output name, for logging.
    fn name(&self) -> Option<String> {
        None
    }

    /// The output's full box in layout coordinates.
    fn full_box(&self) -> Option<Rect>;

    /// The work area: the full box minus space reserved by panels and
    /// layer-shell surfaces.
    fn usable_box(&self) -> Option<Rect>;
}

/// Resolves the area new windows are placed into: the usable box when it has
/// area, else the full box, else the zero box.
pub fn placement_area(output: &dyn OutputBackend) -> Rect {
    if let Some(usable) = output.usable_box() {
        if !usable.is_degenerate() {
            return usable;
        }
    }
    if let Some(full) = output.full_box() {
        if !full.is_degenerate() {
            return full;
        }
    }
    Rect::ZERO
}
