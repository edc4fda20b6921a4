//! Document-level listener registrations.
//!
//! Components that must react to input happening *anywhere* (a pointer press
//! away from a popup, a key pressed while focus is elsewhere) subscribe
//! here. A registration lives exactly as long as its [`Subscription`]
//! guard: dropping the guard removes it, so the lifetime of a listener can
//! be tied to the lifetime of whatever state needs it.
//!
//! Dispatch does not call back into components. It returns one
//! [`Delivery`] per active registration and the host routes each delivery
//! to its owner, which keeps the registry free of re-entrant borrows.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::dom::ElementId;
use crate::geom::Point;
use crate::messages::{Key, ModMask, MouseAction};

/// The kinds of document-level input a component can listen for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    PointerDown,
    KeyDown,
}

/// Identifies the component a registration belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ListenerOwner(u64);

/// An input event as seen by document-level listeners.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GlobalEvent {
    /// A pointer button went down over `target` (already hit-tested).
    PointerDown {
        target: ElementId,
        pos: Point,
        action: MouseAction,
    },
    KeyDown {
        key: Key,
        modifiers: ModMask,
    },
}

impl GlobalEvent {
    pub fn kind(&self) -> ListenerKind {
        match self {
            Self::PointerDown { .. } => ListenerKind::PointerDown,
            Self::KeyDown { .. } => ListenerKind::KeyDown,
        }
    }
}

/// An event addressed to one registered owner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Delivery {
    pub owner: ListenerOwner,
    pub event: GlobalEvent,
}

#[derive(Debug)]
struct Registration {
    id: u64,
    kind: ListenerKind,
    owner: ListenerOwner,
}

#[derive(Debug, Default)]
struct Table {
    next_id: u64,
    next_owner: u64,
    active: Vec<Registration>,
}

/// The registry of document-level listeners. Cloning yields another handle
/// onto the same registry.
#[derive(Clone, Debug, Default)]
pub struct Listeners {
    table: Rc<RefCell<Table>>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh owner identity for a component.
    pub fn allocate_owner(&self) -> ListenerOwner {
        let mut table = self.table.borrow_mut();
        table.next_owner += 1;
        ListenerOwner(table.next_owner)
    }

    /// Register `owner` for events of `kind`. The registration is active
    /// until the returned guard is dropped.
    pub fn subscribe(&self, kind: ListenerKind, owner: ListenerOwner) -> Subscription {
        let mut table = self.table.borrow_mut();
        table.next_id += 1;
        let id = table.next_id;
        table.active.push(Registration { id, kind, owner });
        log::trace!("listener {id} ({kind:?}) registered for {owner:?}");
        Subscription {
            table: Rc::downgrade(&self.table),
            id,
            kind,
        }
    }

    /// One delivery per active registration matching the event's kind, in
    /// registration order.
    pub fn dispatch(&self, event: &GlobalEvent) -> Vec<Delivery> {
        let kind = event.kind();
        self.table
            .borrow()
            .active
            .iter()
            .filter(|r| r.kind == kind)
            .map(|r| Delivery {
                owner: r.owner,
                event: event.clone(),
            })
            .collect()
    }

    /// Number of active registrations of `kind`.
    pub fn count(&self, kind: ListenerKind) -> usize {
        self.table
            .borrow()
            .active
            .iter()
            .filter(|r| r.kind == kind)
            .count()
    }

    /// Number of active registrations held by `owner`, all kinds included.
    pub fn count_for(&self, owner: ListenerOwner) -> usize {
        self.table
            .borrow()
            .active
            .iter()
            .filter(|r| r.owner == owner)
            .count()
    }
}

/// Guard for an active listener registration; dropping it deregisters.
#[must_use = "dropping a Subscription immediately deregisters the listener"]
#[derive(Debug)]
pub struct Subscription {
    table: Weak<RefCell<Table>>,
    id: u64,
    kind: ListenerKind,
}

impl Subscription {
    pub fn kind(&self) -> ListenerKind {
        self.kind
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(table) = self.table.upgrade() else {
            return;
        };
        let mut table = table.borrow_mut();
        table.active.retain(|r| r.id != self.id);
        log::trace!("listener {} ({:?}) released", self.id, self.kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn escape() -> GlobalEvent {
        GlobalEvent::KeyDown {
            key: Key::Escape,
            modifiers: ModMask::NONE,
        }
    }

    #[test]
    fn dropping_the_guard_deregisters() {
        let listeners = Listeners::new();
        let owner = listeners.allocate_owner();
        let sub = listeners.subscribe(ListenerKind::KeyDown, owner);
        assert_eq!(listeners.count(ListenerKind::KeyDown), 1);
        assert_eq!(listeners.dispatch(&escape()).len(), 1);

        drop(sub);
        assert_eq!(listeners.count(ListenerKind::KeyDown), 0);
        assert!(listeners.dispatch(&escape()).is_empty());
    }

    #[test]
    fn dispatch_filters_by_kind_and_keeps_order() {
        let listeners = Listeners::new();
        let a = listeners.allocate_owner();
        let b = listeners.allocate_owner();
        let _pointer = listeners.subscribe(ListenerKind::PointerDown, a);
        let _key_b = listeners.subscribe(ListenerKind::KeyDown, b);
        let _key_a = listeners.subscribe(ListenerKind::KeyDown, a);

        let owners: Vec<_> = listeners
            .dispatch(&escape())
            .into_iter()
            .map(|d| d.owner)
            .collect();
        assert_eq!(owners, vec![b, a]);
        assert_eq!(listeners.count_for(a), 2);
    }

    #[test]
    fn guard_outliving_the_registry_is_harmless() {
        let listeners = Listeners::new();
        let owner = listeners.allocate_owner();
        let sub = listeners.subscribe(ListenerKind::PointerDown, owner);
        drop(listeners);
        drop(sub);
    }
}
