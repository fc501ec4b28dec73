//! View handles and the capability surface a compositor view exposes to the
//! policy engine.

use crate::types::Rect;

/// Capabilities the engine may query on a managed view.
///
/// Implementations live in the compositor; the engine never creates or
/// destroys the underlying window objects. Every method except
/// [`ViewBackend::frame_box`] has a default, so a backend only implements
/// what it supports: a view that cannot report mapped state is treated as
/// mapped.
pub trait ViewBackend {
    /// Whether the view currently has a mapped surface.
    fn is_mapped(&self) -> bool {
        true
    }

    /// Window title, for logging.
    fn title(&self) -> Option<String> {
        None
    }

    /// Application id, for logging.
    fn app_id(&self) -> Option<String> {
        None
    }

    /// Notification that the engine transferred focus to this view. The
    /// compositor reacts by moving keyboard focus and raising the surface.
    fn focus(&self) {}

    /// Current frame geometry in output-layout coordinates, if known.
    fn frame_box(&self) -> Option<Rect>;
}

/// Stable handle for a registered view.
///
/// The index addresses a slot in the view arena; the generation is bumped
/// every time a slot is reused, so a handle kept across `destroy_view`
/// fails validation instead of silently addressing an unrelated view.
/// Operations on a stale handle are no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}
