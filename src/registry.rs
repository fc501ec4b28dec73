//! View registry: a slot arena holding per-view policy attributes and an
//! intrusive MRU list threaded through the slots by index.
//!
//! The list carries only mapped views, newest focus/map first. Links are
//! slot indices rather than pointers, and every slot carries a generation
//! counter, so a handle that outlives its view is detected instead of
//! dangling.

use std::rc::Rc;

use crate::view::{ViewBackend, ViewId};

#[derive(Debug, Clone, Copy)]
struct Link {
    prev: Option<u32>,
    next: Option<u32>,
}

/// Policy attributes the engine tracks per registered view.
pub(crate) struct ViewRecord {
    pub(crate) backend: Rc<dyn ViewBackend>,
    /// `None` until first map, which assigns the current workspace.
    pub(crate) workspace: Option<usize>,
    pub(crate) sticky: bool,
    /// Present iff the view is in the MRU list (mapped).
    link: Option<Link>,
}

struct Slot {
    generation: u32,
    record: Option<ViewRecord>,
}

#[derive(Default)]
pub(crate) struct ViewArena {
    slots: Vec<Slot>,
    free: Vec<u32>,
    head: Option<u32>,
    tail: Option<u32>,
}

impl ViewArena {
    pub(crate) fn new() -> Self {
        ViewArena {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
        }
    }

    /// Registers a view and returns its handle. The view starts unlinked.
    pub(crate) fn insert(&mut self, backend: Rc<dyn ViewBackend>) -> ViewId {
        let record = ViewRecord {
            backend,
            workspace: None,
            sticky: false,
            link: None,
        };
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.record = Some(record);
                ViewId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    record: Some(record),
                });
                ViewId {
                    index,
                    generation: 0,
                }
            }
        }
    }

    /// Unlinks and frees the record. Returns false for a stale handle. The
    /// slot generation is bumped so outstanding handles go stale.
    pub(crate) fn remove(&mut self, id: ViewId) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        self.unlink(id);
        let slot = &mut self.slots[id.index as usize];
        slot.record = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        true
    }

    pub(crate) fn get(&self, id: ViewId) -> Option<&ViewRecord> {
        let slot = self.slots.get(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.record.as_ref()
    }

    pub(crate) fn get_mut(&mut self, id: ViewId) -> Option<&mut ViewRecord> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.record.as_mut()
    }

    pub(crate) fn is_linked(&self, id: ViewId) -> bool {
        self.get(id).map_or(false, |record| record.link.is_some())
    }

    /// Inserts the view at the head of the MRU list. No-op if stale or
    /// already linked.
    pub(crate) fn link_front(&mut self, id: ViewId) {
        match self.get(id) {
            Some(record) if record.link.is_none() => {}
            _ => return,
        }
        let old_head = self.head;
        if let Some(record) = self.get_mut(id) {
            record.link = Some(Link {
                prev: None,
                next: old_head,
            });
        }
        match old_head {
            Some(head) => self.set_prev(head, Some(id.index)),
            None => self.tail = Some(id.index),
        }
        self.head = Some(id.index);
    }

    /// Removes the view from the MRU list. No-op if stale or not linked.
    pub(crate) fn unlink(&mut self, id: ViewId) {
        let link = match self.get_mut(id) {
            Some(record) => match record.link.take() {
                Some(link) => link,
                None => return,
            },
            None => return,
        };
        match link.prev {
            Some(prev) => self.set_next(prev, link.next),
            None => self.head = link.next,
        }
        match link.next {
            Some(next) => self.set_prev(next, link.prev),
            None => self.tail = link.prev,
        }
    }

    /// Moves a linked view to the head of the list.
    pub(crate) fn promote(&mut self, id: ViewId) {
        if self.is_linked(id) {
            self.unlink(id);
            self.link_front(id);
        }
    }

    /// Linked views, head (most recent) to tail.
    pub(crate) fn iter(&self) -> LinkedViews<'_> {
        LinkedViews {
            arena: self,
            cursor: self.head,
            forward: true,
        }
    }

    /// Linked views, tail (least recent) to head.
    pub(crate) fn iter_rev(&self) -> LinkedViews<'_> {
        LinkedViews {
            arena: self,
            cursor: self.tail,
            forward: false,
        }
    }

    fn linked_record(&self, index: u32) -> Option<&ViewRecord> {
        self.slots.get(index as usize)?.record.as_ref()
    }

    fn set_prev(&mut self, index: u32, prev: Option<u32>) {
        if let Some(record) = self
            .slots
            .get_mut(index as usize)
            .and_then(|slot| slot.record.as_mut())
        {
            if let Some(link) = record.link.as_mut() {
                link.prev = prev;
            }
        }
    }

    fn set_next(&mut self, index: u32, next: Option<u32>) {
        if let Some(record) = self
            .slots
            .get_mut(index as usize)
            .and_then(|slot| slot.record.as_mut())
        {
            if let Some(link) = record.link.as_mut() {
                link.next = next;
            }
        }
    }
}

pub(crate) struct LinkedViews<'a> {
    arena: &'a ViewArena,
    cursor: Option<u32>,
    forward: bool,
}

impl Iterator for LinkedViews<'_> {
    type Item = ViewId;

    fn next(&mut self) -> Option<ViewId> {
        let index = self.cursor?;
        let record = self.arena.linked_record(index)?;
        let link = record.link?;
        self.cursor = if self.forward { link.next } else { link.prev };
        Some(ViewId {
            index,
            generation: self.arena.slots[index as usize].generation,
        })
    }
}
