//! The policy engine: owns the view registry, decides focus, tracks
//! workspace visibility, and computes placement for new windows.
//!
//! Every operation is total and runs to completion on the caller's thread.
//! Invalid input (a stale handle, an out-of-range workspace index) is a
//! silent no-op: this sits on the compositor's event-loop hot path, where
//! aborting would take the whole session down.

use std::rc::Rc;

use tracing::debug;

use crate::config::PolicyConfig;
use crate::output::{placement_area, OutputBackend};
use crate::placement::{
    ColDirection, Placer, PlacementStrategy, RowDirection, MAX_NEIGHBOR_BOXES,
};
use crate::registry::ViewArena;
use crate::types::{Point, Rect, Size};
use crate::view::{ViewBackend, ViewId};
use crate::workspaces::WorkspaceModel;

const DEFAULT_WORKSPACE_COUNT: usize = 4;

/// Window-manager policy state for one compositor instance.
///
/// The engine references views and outputs, it never creates or destroys
/// the underlying compositor objects. Views enter management through
/// [`PolicyEngine::register_view`] and leave it through
/// [`PolicyEngine::destroy_view`].
pub struct PolicyEngine {
    views: ViewArena,
    focused: Option<ViewId>,
    workspaces: WorkspaceModel,
    placer: Placer,
}

impl Default for PolicyEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PolicyEngine {
    pub fn new() -> Self {
        PolicyEngine {
            views: ViewArena::new(),
            focused: None,
            workspaces: WorkspaceModel::new(DEFAULT_WORKSPACE_COUNT),
            placer: Placer::default(),
        }
    }

    /// Builds an engine from a loaded configuration.
    pub fn with_config(config: &PolicyConfig) -> Self {
        let mut workspaces = WorkspaceModel::new(config.workspaces);
        for (index, name) in config.workspace_names.iter().enumerate() {
            if !name.is_empty() {
                workspaces.set_name(index, Some(name.clone()));
            }
        }
        let mut placer = Placer::default();
        placer.strategy = config.window_placement;
        placer.row_dir = config.row_placement_direction;
        placer.col_dir = config.col_placement_direction;
        PolicyEngine {
            views: ViewArena::new(),
            focused: None,
            workspaces,
            placer,
        }
    }

    // --- View registry ---

    /// Brings a view under management. The view starts unmapped and without
    /// a workspace assignment; the first map assigns the current workspace
    /// unless one was set beforehand.
    pub fn register_view(&mut self, backend: Rc<dyn ViewBackend>) -> ViewId {
        self.views.insert(backend)
    }

    /// Inserts the view at the top of the MRU order. No-op if the handle is
    /// stale or the view is already mapped. A missing or out-of-range
    /// workspace assignment is replaced by the current workspace.
    pub fn map_view(&mut self, id: ViewId) {
        if self.views.is_linked(id) {
            return;
        }
        let current = self.workspaces.current();
        let count = self.workspaces.count();
        let Some(record) = self.views.get_mut(id) else {
            return;
        };
        match record.workspace {
            Some(ws) if ws < count => {}
            _ => record.workspace = Some(current),
        }
        self.views.link_front(id);
    }

    /// Takes the view out of the MRU order, refocusing if it held focus.
    /// The view stays registered and can be mapped again.
    pub fn unmap_view(&mut self, id: ViewId) {
        if !self.views.is_linked(id) {
            return;
        }
        let was_focused = self.focused == Some(id);
        self.views.unlink(id);
        if was_focused {
            self.refocus();
        }
    }

    /// Unmaps the view and releases its registration. The handle goes
    /// stale; later operations on it are no-ops.
    pub fn destroy_view(&mut self, id: ViewId) {
        self.unmap_view(id);
        self.views.remove(id);
    }

    /// Whether the view is currently in the MRU order.
    pub fn is_mapped(&self, id: ViewId) -> bool {
        self.views.is_linked(id)
    }

    /// Mapped views in stacking order, most recently focused/mapped first.
    pub fn stacking_order(&self) -> impl Iterator<Item = ViewId> + '_ {
        self.views.iter()
    }

    // --- Per-view attributes ---

    /// Marks the view visible on every workspace.
    ///
    /// Visibility gained or lost this way is not acted on immediately; the
    /// next refocus-triggering operation picks it up.
    pub fn set_sticky(&mut self, id: ViewId, sticky: bool) {
        if let Some(record) = self.views.get_mut(id) {
            record.sticky = sticky;
        }
    }

    pub fn is_sticky(&self, id: ViewId) -> bool {
        self.views.get(id).map_or(false, |record| record.sticky)
    }

    /// Assigns a workspace ahead of mapping, the way app rules pin a window
    /// to a workspace. No-op when the index is out of range.
    pub fn set_view_workspace(&mut self, id: ViewId, workspace: usize) {
        if !self.workspaces.contains(workspace) {
            return;
        }
        if let Some(record) = self.views.get_mut(id) {
            record.workspace = Some(workspace);
        }
    }

    pub fn view_workspace(&self, id: ViewId) -> Option<usize> {
        self.views.get(id).and_then(|record| record.workspace)
    }

    // --- Focus policy ---

    /// A view is visible iff it is mapped into the MRU order, its surface
    /// reports mapped, and it is sticky or on the current workspace.
    pub fn is_visible(&self, id: ViewId) -> bool {
        let Some(record) = self.views.get(id) else {
            return false;
        };
        if !self.views.is_linked(id) || !record.backend.is_mapped() {
            return false;
        }
        record.sticky || record.workspace == Some(self.workspaces.current())
    }

    pub fn focused(&self) -> Option<ViewId> {
        self.focused
    }

    /// Transfers focus to the view: promotes it to the top of the MRU
    /// order and invokes its focus callback. No-op unless visible, so
    /// focus can never land on a hidden view.
    pub fn focus_view(&mut self, id: ViewId) {
        if !self.is_visible(id) {
            return;
        }
        self.views.promote(id);
        self.focused = Some(id);
        self.log_focus(id, "direct");
        if let Some(record) = self.views.get(id) {
            record.backend.focus();
        }
    }

    /// Cycles focus to the least recently used visible view: the first
    /// visible view scanning from the tail of the MRU order.
    pub fn focus_next(&mut self) {
        let candidate = self.views.iter_rev().find(|&id| self.is_visible(id));
        let Some(id) = candidate else {
            return;
        };
        if self.focused == Some(id) {
            return;
        }
        self.log_focus(id, "cycle");
        self.focus_view(id);
    }

    /// Restores the focus invariant: if the focused view is gone or no
    /// longer visible, focus moves to the first visible view from the head
    /// of the MRU order, or clears entirely.
    pub fn refocus(&mut self) {
        if let Some(focused) = self.focused {
            if self.is_visible(focused) {
                return;
            }
        }
        self.focused = None;
        let candidate = self.views.iter().find(|&id| self.is_visible(id));
        if let Some(id) = candidate {
            self.focus_view(id);
        }
    }

    // --- Workspaces ---

    pub fn workspace_current(&self) -> usize {
        self.workspaces.current()
    }

    pub fn workspace_count(&self) -> usize {
        self.workspaces.count()
    }

    /// Switches the current workspace. No-op when out of range or already
    /// current, so switching to the current workspace never re-fires focus
    /// callbacks.
    pub fn workspace_switch(&mut self, index: usize) {
        if !self.workspaces.switch(index) {
            return;
        }
        debug!("workspace switch to {index}");
        self.refocus();
    }

    /// Reassigns the focused view to `index` and lets the refocus pass
    /// restore consistency. A sticky view stays visible regardless of its
    /// workspace field and therefore keeps focus.
    pub fn move_focused_to_workspace(&mut self, index: usize) {
        if !self.workspaces.contains(index) {
            return;
        }
        let Some(focused) = self.focused else {
            return;
        };
        if let Some(record) = self.views.get_mut(focused) {
            record.workspace = Some(index);
            debug!(
                "move focused to workspace {index}: title={:?} app_id={:?}",
                record.backend.title(),
                record.backend.app_id()
            );
        }
        self.refocus();
    }

    /// Sets the number of workspaces (clamped to at least one). The
    /// current workspace is pulled back in range and focus is restored.
    pub fn set_workspace_count(&mut self, count: usize) {
        self.workspaces.set_count(count);
        self.refocus();
    }

    pub fn set_workspace_name(&mut self, index: usize, name: Option<String>) {
        self.workspaces.set_name(index, name);
    }

    pub fn workspace_name(&self, index: usize) -> Option<&str> {
        self.workspaces.name(index)
    }

    // --- Placement ---

    pub fn placement_strategy(&self) -> PlacementStrategy {
        self.placer.strategy
    }

    pub fn set_placement_strategy(&mut self, strategy: PlacementStrategy) {
        self.placer.strategy = strategy;
    }

    pub fn row_direction(&self) -> RowDirection {
        self.placer.row_dir
    }

    pub fn set_row_direction(&mut self, dir: RowDirection) {
        self.placer.row_dir = dir;
    }

    pub fn col_direction(&self) -> ColDirection {
        self.placer.col_dir
    }

    pub fn set_col_direction(&mut self, dir: ColDirection) {
        self.placer.col_dir = dir;
    }

    /// Computes where the next window of `size` should go on `output`.
    /// Never fails; degenerate outputs and sizes degrade to a default
    /// geometry.
    pub fn place_next(&mut self, output: &dyn OutputBackend, size: Size, cursor: Point) -> Point {
        let area = placement_area(output);
        let neighbors = match self.placer.strategy {
            PlacementStrategy::Cascade | PlacementStrategy::UnderMouse => Vec::new(),
            _ => self.visible_boxes(),
        };
        self.placer.place(area, size, cursor, &neighbors)
    }

    /// Frame boxes of visible views, in stacking order, capped so a runaway
    /// session cannot blow up the placement search.
    fn visible_boxes(&self) -> Vec<Rect> {
        let mut boxes = Vec::new();
        for id in self.views.iter() {
            if boxes.len() == MAX_NEIGHBOR_BOXES {
                break;
            }
            if !self.is_visible(id) {
                continue;
            }
            let frame = self.views.get(id).and_then(|record| record.backend.frame_box());
            if let Some(frame) = frame {
                boxes.push(frame);
            }
        }
        boxes
    }

    fn log_focus(&self, id: ViewId, why: &str) {
        if let Some(record) = self.views.get(id) {
            debug!(
                "focus ({why}): title={:?} app_id={:?}",
                record.backend.title(),
                record.backend.app_id()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;

    struct TestView {
        title: &'static str,
        mapped: Cell<bool>,
        frame: Cell<Option<Rect>>,
        focus_count: Cell<usize>,
    }

    impl TestView {
        fn new(title: &'static str) -> Rc<TestView> {
            Rc::new(TestView {
                title,
                mapped: Cell::new(true),
                frame: Cell::new(None),
                focus_count: Cell::new(0),
            })
        }
    }

    impl ViewBackend for TestView {
        fn is_mapped(&self) -> bool {
            self.mapped.get()
        }

        fn title(&self) -> Option<String> {
            Some(self.title.to_string())
        }

        fn focus(&self) {
            self.focus_count.set(self.focus_count.get() + 1);
        }

        fn frame_box(&self) -> Option<Rect> {
            self.frame.get()
        }
    }

    struct TestOutput(Rect);

    impl OutputBackend for TestOutput {
        fn full_box(&self) -> Option<Rect> {
            Some(self.0)
        }

        fn usable_box(&self) -> Option<Rect> {
            Some(self.0)
        }
    }

    fn mapped_view(engine: &mut PolicyEngine, title: &'static str) -> (ViewId, Rc<TestView>) {
        let view = TestView::new(title);
        let id = engine.register_view(view.clone());
        engine.map_view(id);
        (id, view)
    }

    fn order(engine: &PolicyEngine) -> Vec<ViewId> {
        engine.stacking_order().collect()
    }

    #[test]
    fn map_is_idempotent() {
        let mut engine = PolicyEngine::new();
        let (a, _) = mapped_view(&mut engine, "a");
        engine.map_view(a);
        assert_eq!(order(&engine), vec![a]);
    }

    #[test]
    fn unmap_is_idempotent() {
        let mut engine = PolicyEngine::new();
        let (a, _) = mapped_view(&mut engine, "a");
        engine.unmap_view(a);
        engine.unmap_view(a);
        assert!(!engine.is_mapped(a));
        assert_eq!(order(&engine), Vec::new());
    }

    #[test]
    fn map_assigns_current_workspace() {
        let mut engine = PolicyEngine::new();
        let view = TestView::new("a");
        let id = engine.register_view(view);
        assert_eq!(engine.view_workspace(id), None);
        engine.workspace_switch(2);
        engine.map_view(id);
        assert_eq!(engine.view_workspace(id), Some(2));
    }

    #[test]
    fn map_keeps_valid_preassigned_workspace() {
        let mut engine = PolicyEngine::new();
        let view = TestView::new("a");
        let id = engine.register_view(view);
        engine.set_view_workspace(id, 3);
        engine.map_view(id);
        assert_eq!(engine.view_workspace(id), Some(3));
    }

    #[test]
    fn map_replaces_out_of_range_workspace() {
        let mut engine = PolicyEngine::new();
        let view = TestView::new("a");
        let id = engine.register_view(view);
        engine.set_view_workspace(id, 3);
        engine.set_workspace_count(2);
        engine.map_view(id);
        assert_eq!(engine.view_workspace(id), Some(0));
    }

    #[test]
    fn focus_promotes_to_top_and_fires_callback() {
        let mut engine = PolicyEngine::new();
        let (a, view_a) = mapped_view(&mut engine, "a");
        let (b, view_b) = mapped_view(&mut engine, "b");
        engine.focus_view(a);
        engine.focus_view(b);
        assert_eq!(order(&engine), vec![b, a]);
        assert_eq!(engine.focused(), Some(b));
        assert_eq!(view_a.focus_count.get(), 1);
        assert_eq!(view_b.focus_count.get(), 1);
    }

    #[test]
    fn focus_refuses_hidden_views() {
        let mut engine = PolicyEngine::new();
        let (a, view_a) = mapped_view(&mut engine, "a");
        let unmapped = TestView::new("b");
        let b = engine.register_view(unmapped.clone());

        engine.focus_view(b);
        assert_eq!(engine.focused(), None);
        assert_eq!(unmapped.focus_count.get(), 0);

        // A view whose surface is unmapped is not visible either.
        view_a.mapped.set(false);
        engine.focus_view(a);
        assert_eq!(engine.focused(), None);
    }

    #[test]
    fn focus_refuses_views_on_other_workspaces() {
        let mut engine = PolicyEngine::new();
        let (a, view_a) = mapped_view(&mut engine, "a");
        engine.workspace_switch(1);
        engine.focus_view(a);
        assert_eq!(engine.focused(), None);
        assert_eq!(view_a.focus_count.get(), 0);
    }

    #[test]
    fn unmap_refocuses_next_visible() {
        let mut engine = PolicyEngine::new();
        let (a, view_a) = mapped_view(&mut engine, "a");
        let (b, _) = mapped_view(&mut engine, "b");
        engine.focus_view(a);
        engine.focus_view(b);
        engine.unmap_view(b);
        assert_eq!(engine.focused(), Some(a));
        assert_eq!(view_a.focus_count.get(), 2);
    }

    #[test]
    fn focus_next_picks_least_recently_used() {
        let mut engine = PolicyEngine::new();
        let (a, _) = mapped_view(&mut engine, "a");
        let (b, _) = mapped_view(&mut engine, "b");
        let (c, _) = mapped_view(&mut engine, "c");
        engine.focus_view(a);
        engine.focus_view(b);
        engine.focus_view(c);
        assert_eq!(order(&engine), vec![c, b, a]);

        engine.focus_next();
        assert_eq!(engine.focused(), Some(a));
        assert_eq!(order(&engine), vec![a, c, b]);

        engine.focus_next();
        assert_eq!(engine.focused(), Some(b));
    }

    #[test]
    fn focus_next_is_noop_with_single_visible_view() {
        let mut engine = PolicyEngine::new();
        let (a, view_a) = mapped_view(&mut engine, "a");
        engine.focus_view(a);
        engine.focus_next();
        assert_eq!(engine.focused(), Some(a));
        assert_eq!(view_a.focus_count.get(), 1);
    }

    #[test]
    fn workspace_switch_scenario() {
        let mut engine = PolicyEngine::new();
        engine.set_workspace_count(2);
        let (a, _) = mapped_view(&mut engine, "a");
        let (b, _) = mapped_view(&mut engine, "b");
        engine.focus_view(a);
        engine.focus_view(b);
        assert_eq!(order(&engine), vec![b, a]);
        assert_eq!(engine.focused(), Some(b));

        engine.unmap_view(b);
        assert_eq!(engine.focused(), Some(a));

        engine.workspace_switch(1);
        assert_eq!(engine.focused(), None);

        engine.set_sticky(a, true);
        engine.workspace_switch(0);
        engine.workspace_switch(1);
        assert_eq!(engine.focused(), Some(a));
    }

    #[test]
    fn workspace_switch_to_current_fires_no_callback() {
        let mut engine = PolicyEngine::new();
        let (a, view_a) = mapped_view(&mut engine, "a");
        engine.focus_view(a);
        engine.workspace_switch(0);
        assert_eq!(view_a.focus_count.get(), 1);
        assert_eq!(engine.focused(), Some(a));
    }

    #[test]
    fn workspace_switch_out_of_range_is_noop() {
        let mut engine = PolicyEngine::new();
        engine.workspace_switch(99);
        assert_eq!(engine.workspace_current(), 0);
    }

    #[test]
    fn shrinking_workspace_count_refocuses() {
        let mut engine = PolicyEngine::new();
        engine.workspace_switch(3);
        let (a, _) = mapped_view(&mut engine, "a");
        engine.focus_view(a);
        engine.set_workspace_count(2);
        assert_eq!(engine.workspace_current(), 1);
        // The view stays assigned to workspace 3 and is no longer visible.
        assert_eq!(engine.focused(), None);
        assert!(!engine.is_visible(a));
    }

    #[test]
    fn move_focused_to_workspace_drops_focus() {
        let mut engine = PolicyEngine::new();
        let (a, _) = mapped_view(&mut engine, "a");
        let (b, _) = mapped_view(&mut engine, "b");
        engine.focus_view(b);
        engine.move_focused_to_workspace(1);
        assert_eq!(engine.view_workspace(b), Some(1));
        assert_eq!(engine.focused(), Some(a));
    }

    #[test]
    fn move_focused_sticky_view_keeps_focus() {
        let mut engine = PolicyEngine::new();
        let (a, _) = mapped_view(&mut engine, "a");
        engine.set_sticky(a, true);
        engine.focus_view(a);
        engine.move_focused_to_workspace(1);
        assert_eq!(engine.view_workspace(a), Some(1));
        assert_eq!(engine.focused(), Some(a));
    }

    #[test]
    fn move_focused_out_of_range_is_noop() {
        let mut engine = PolicyEngine::new();
        let (a, _) = mapped_view(&mut engine, "a");
        engine.focus_view(a);
        engine.move_focused_to_workspace(99);
        assert_eq!(engine.view_workspace(a), Some(0));
        assert_eq!(engine.focused(), Some(a));
    }

    #[test]
    fn stale_handle_operations_are_noops() {
        let mut engine = PolicyEngine::new();
        let (a, _) = mapped_view(&mut engine, "a");
        engine.destroy_view(a);
        assert_eq!(engine.focused(), None);

        engine.map_view(a);
        engine.focus_view(a);
        engine.set_sticky(a, true);
        engine.set_view_workspace(a, 1);
        engine.unmap_view(a);
        engine.destroy_view(a);
        assert!(!engine.is_mapped(a));
        assert_eq!(engine.view_workspace(a), None);
        assert_eq!(order(&engine), Vec::new());
    }

    #[test]
    fn destroying_focused_view_refocuses() {
        let mut engine = PolicyEngine::new();
        let (a, _) = mapped_view(&mut engine, "a");
        let (b, _) = mapped_view(&mut engine, "b");
        engine.focus_view(a);
        engine.focus_view(b);
        engine.destroy_view(b);
        assert_eq!(engine.focused(), Some(a));
        assert_eq!(order(&engine), vec![a]);
    }

    #[test]
    fn refocus_skips_surface_unmapped_views() {
        let mut engine = PolicyEngine::new();
        let (a, _) = mapped_view(&mut engine, "a");
        let (b, view_b) = mapped_view(&mut engine, "b");
        let (c, _) = mapped_view(&mut engine, "c");
        engine.focus_view(a);
        engine.focus_view(b);
        engine.focus_view(c);
        view_b.mapped.set(false);
        engine.destroy_view(c);
        // b is next in MRU order but its surface is unmapped.
        assert_eq!(engine.focused(), Some(a));
    }

    #[test]
    fn place_next_avoids_visible_views() {
        let mut engine = PolicyEngine::new();
        let output = TestOutput(Rect::new(0, 0, 800, 600));
        let (_, view_a) = mapped_view(&mut engine, "a");
        view_a.frame.set(Some(Rect::new(0, 0, 200, 150)));

        let got = engine.place_next(&output, Size::new(200, 150), Point::ZERO);
        assert_eq!(got, Point::new(200, 0));
    }

    #[test]
    fn place_next_ignores_views_on_other_workspaces() {
        let mut engine = PolicyEngine::new();
        let output = TestOutput(Rect::new(0, 0, 800, 600));
        let (a, view_a) = mapped_view(&mut engine, "a");
        view_a.frame.set(Some(Rect::new(0, 0, 200, 150)));
        engine.focus_view(a);
        engine.move_focused_to_workspace(1);

        // The only frame box belongs to a view hidden on workspace 1, so
        // the slot it occupies is free again.
        assert!(!engine.is_visible(a));
        let got = engine.place_next(&output, Size::new(200, 150), Point::ZERO);
        assert_eq!(got, Point::new(0, 0));
    }

    #[test]
    fn place_next_cascade_state_persists() {
        let mut engine = PolicyEngine::new();
        engine.set_placement_strategy(PlacementStrategy::Cascade);
        let output = TestOutput(Rect::new(0, 0, 800, 600));
        let size = Size::new(200, 150);
        assert_eq!(engine.place_next(&output, size, Point::ZERO), Point::new(0, 0));
        assert_eq!(engine.place_next(&output, size, Point::ZERO), Point::new(32, 32));
    }

    #[test]
    fn place_next_under_mouse_uses_cursor() {
        let mut engine = PolicyEngine::new();
        engine.set_placement_strategy(PlacementStrategy::UnderMouse);
        let output = TestOutput(Rect::new(0, 0, 800, 600));
        let got = engine.place_next(&output, Size::new(200, 150), Point::new(900, 300));
        assert_eq!(got, Point::new(600, 300));
    }

    #[test]
    fn with_config_applies_settings() {
        let config = PolicyConfig {
            workspaces: 6,
            workspace_names: vec!["web".to_string(), String::new(), "mail".to_string()],
            window_placement: PlacementStrategy::ColMinOverlap,
            row_placement_direction: RowDirection::RightToLeft,
            col_placement_direction: ColDirection::BottomToTop,
        };
        let engine = PolicyEngine::with_config(&config);
        assert_eq!(engine.workspace_count(), 6);
        assert_eq!(engine.workspace_name(0), Some("web"));
        assert_eq!(engine.workspace_name(1), None);
        assert_eq!(engine.workspace_name(2), Some("mail"));
        assert_eq!(engine.placement_strategy(), PlacementStrategy::ColMinOverlap);
        assert_eq!(engine.row_direction(), RowDirection::RightToLeft);
        assert_eq!(engine.col_direction(), ColDirection::BottomToTop);
    }
}
