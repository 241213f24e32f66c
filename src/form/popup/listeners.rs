use std::cell::RefCell;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;
use ratatui::layout::{Position, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Debug, Default)]
struct ListenerTable {
    next_id: u64,
    regions: IndexMap<ListenerId, Vec<Rect>>,
}

/// Registry of outside-pointer listeners for open popups.
///
/// A popup acquires an [`OutsidePointerGuard`] when it opens; dropping the
/// guard deregisters it, so closing through any path (commit, escape, outside
/// click, or the field being dropped) leaves nothing behind. Clones share the
/// same table; the registry is single-threaded like the event loop using it.
#[derive(Debug, Clone, Default)]
pub struct PointerListeners {
    table: Rc<RefCell<ListenerTable>>,
}

impl PointerListeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn acquire(&self) -> OutsidePointerGuard {
        let mut table = self.table.borrow_mut();
        let id = ListenerId(table.next_id);
        table.next_id += 1;
        table.regions.insert(id, Vec::new());
        tracing::trace!(?id, "outside-pointer listener registered");
        OutsidePointerGuard {
            id,
            table: Rc::downgrade(&self.table),
        }
    }

    pub fn len(&self) -> usize {
        self.table.borrow().regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_registered(&self, id: ListenerId) -> bool {
        self.table.borrow().regions.contains_key(&id)
    }

    /// Listeners whose popup subtree does not contain `position`.
    pub fn outside(&self, position: Position) -> Vec<ListenerId> {
        self.table
            .borrow()
            .regions
            .iter()
            .filter(|(_, regions)| !regions.iter().any(|rect| rect.contains(position)))
            .map(|(id, _)| *id)
            .collect()
    }
}

#[derive(Debug)]
pub struct OutsidePointerGuard {
    id: ListenerId,
    table: Weak<RefCell<ListenerTable>>,
}

impl OutsidePointerGuard {
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Areas that count as "inside" the popup (its trigger and its panel).
    pub(crate) fn set_regions(&self, regions: Vec<Rect>) {
        if let Some(table) = self.table.upgrade()
            && let Some(slot) = table.borrow_mut().regions.get_mut(&self.id)
        {
            *slot = regions;
        }
    }
}

impl Drop for OutsidePointerGuard {
    fn drop(&mut self) {
        if let Some(table) = self.table.upgrade() {
            table.borrow_mut().regions.shift_remove(&self.id);
            tracing::trace!(id = ?self.id, "outside-pointer listener released");
        }
    }
}
