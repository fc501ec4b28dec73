//! Workspace model: current index, count, and optional per-index names.

/// Bookkeeping for virtual workspaces.
///
/// Names are a sparse array independent of the workspace count: a name can
/// be stored for an index beyond the current count and survives count
/// changes, so shrinking and re-growing the count does not lose names.
#[derive(Debug, Clone)]
pub(crate) struct WorkspaceModel {
    current: usize,
    count: usize,
    names: Vec<Option<String>>,
}

impl WorkspaceModel {
    pub(crate) fn new(count: usize) -> Self {
        WorkspaceModel {
            current: 0,
            count: count.max(1),
            names: Vec::new(),
        }
    }

    pub(crate) fn current(&self) -> usize {
        self.current
    }

    pub(crate) fn count(&self) -> usize {
        self.count
    }

    pub(crate) fn contains(&self, index: usize) -> bool {
        index < self.count
    }

    /// Clamps the count to at least one and pulls the current index back in
    /// range. Returns true if either value changed.
    pub(crate) fn set_count(&mut self, count: usize) -> bool {
        let count = count.max(1);
        let changed = count != self.count;
        self.count = count;
        if self.current >= self.count {
            self.current = self.count - 1;
            return true;
        }
        changed
    }

    /// Switches to `index`. Returns false when out of range or unchanged.
    pub(crate) fn switch(&mut self, index: usize) -> bool {
        if index >= self.count || index == self.current {
            return false;
        }
        self.current = index;
        true
    }

    /// Stores or clears a name, growing the sparse array as needed.
    pub(crate) fn set_name(&mut self, index: usize, name: Option<String>) {
        if index >= self.names.len() {
            if name.is_none() {
                return;
            }
            self.names.resize(index + 1, None);
        }
        self.names[index] = name;
    }

    pub(crate) fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).and_then(|name| name.as_deref())
    }

    pub(crate) fn names_len(&self) -> usize {
        self.names.len()
    }
}
