//! A retained element tree: the host document.
//!
//! The grid is repainted from scratch every frame, but interaction needs
//! stable identities: "is this press inside the panel?", "which element has
//! focus?", "is the trigger still there?". [`Document`] answers those. It
//! keeps a tree of elements with screen bounds, roles, labels and string
//! attributes, tracks keyboard focus, and owns the document-level
//! [`Listeners`] registry.
//!
//! Like [`Grid`](crate::Grid), a `Document` is a handle: clones share the
//! same tree. Element ids carry a generation, so an id kept after its
//! element was removed never aliases a newer element.

mod listeners;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use crate::geom::{Point, Range};

pub use listeners::{Delivery, GlobalEvent, ListenerKind, ListenerOwner, Listeners, Subscription};

/// Stable identity of an element.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ElementId {
    index: u32,
    generation: u32,
}

/// Semantic role of an element, as announced to assistive technology.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Document,
    Banner,
    Navigation,
    Main,
    ContentInfo,
    Button,
    Link,
    Generic,
}

impl Role {
    const fn interactive(self) -> bool {
        matches!(self, Self::Button | Self::Link)
    }
}

/// Everything needed to create an element.
#[derive(Clone, Debug)]
pub struct ElementSpec {
    role: Role,
    label: Option<String>,
    dom_id: Option<String>,
    href: Option<String>,
    bounds: Range,
    focusable: bool,
    tabbable: bool,
    hidden: bool,
}

impl ElementSpec {
    /// Buttons and links start out focusable and in the Tab sequence.
    pub fn new(role: Role) -> Self {
        Self {
            role,
            label: None,
            dom_id: None,
            href: None,
            bounds: Range::default(),
            focusable: role.interactive(),
            tabbable: role.interactive(),
            hidden: false,
        }
    }

    /// Accessible name.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Document-unique identifier, the target of fragment links and of
    /// `aria-controls`.
    pub fn dom_id(mut self, id: impl Into<String>) -> Self {
        self.dom_id = Some(id.into());
        self
    }

    pub fn href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    pub fn bounds(mut self, bounds: Range) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Focusable from code but skipped by Tab (`tabindex="-1"`).
    pub fn programmatic_focus(mut self) -> Self {
        self.focusable = true;
        self.tabbable = false;
        self
    }
}

#[derive(Debug)]
struct Node {
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    spec: ElementSpec,
    attrs: BTreeMap<String, String>,
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

#[derive(Debug, Default)]
struct Tree {
    slots: Vec<Slot>,
    free: Vec<u32>,
    focused: Option<ElementId>,
}

impl Tree {
    fn node(&self, id: ElementId) -> Option<&Node> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    fn node_mut(&mut self, id: ElementId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    fn insert(&mut self, parent: Option<ElementId>, spec: ElementSpec) -> ElementId {
        let node = Node {
            parent,
            children: Vec::new(),
            spec,
            attrs: BTreeMap::new(),
        };
        let id = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.generation += 1;
                slot.node = Some(node);
                ElementId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                ElementId {
                    index,
                    generation: 0,
                }
            }
        };
        if let Some(parent) = parent.and_then(|p| self.node_mut(p)) {
            parent.children.push(id);
        }
        id
    }

    /// Remove `id` and all of its descendants. Returns how many elements
    /// were removed.
    fn remove_subtree(&mut self, id: ElementId) -> usize {
        let Some(parent) = self.node(id).map(|n| n.parent) else {
            return 0;
        };
        if let Some(parent) = parent.and_then(|p| self.node_mut(p)) {
            parent.children.retain(|&c| c != id);
        }

        let mut removed = 0;
        let mut stack = vec![id];
        while let Some(cur) = stack.pop() {
            let Some(node) = self.slots[cur.index as usize].node.take() else {
                continue;
            };
            stack.extend(node.children);
            self.free.push(cur.index);
            if self.focused == Some(cur) {
                self.focused = None;
            }
            removed += 1;
        }
        removed
    }

    fn contains(&self, ancestor: ElementId, node: ElementId) -> bool {
        if self.node(ancestor).is_none() {
            return false;
        }
        let mut cur = Some(node);
        while let Some(id) = cur {
            if id == ancestor {
                return true;
            }
            cur = self.node(id).and_then(|n| n.parent);
        }
        false
    }

    /// Whether the element exists and neither it nor an ancestor is hidden.
    fn is_rendered(&self, id: ElementId) -> bool {
        let mut cur = Some(id);
        while let Some(id) = cur {
            match self.node(id) {
                Some(node) if !node.spec.hidden => cur = node.parent,
                _ => return false,
            }
        }
        true
    }

    fn preorder(&self, root: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.node(id) {
                out.push(id);
                stack.extend(node.children.iter().rev());
            }
        }
        out
    }

    /// Deepest rendered element under `p` in the subtree of `id`; later
    /// siblings are painted on top and win.
    fn hit(&self, id: ElementId, p: Point) -> Option<ElementId> {
        let node = self.node(id)?;
        if node.spec.hidden || !node.spec.bounds.contains(p) {
            return None;
        }
        node.children
            .iter()
            .rev()
            .find_map(|&child| self.hit(child, p))
            .or(Some(id))
    }
}

/// Handle onto a shared element tree.
#[derive(Clone, Debug)]
pub struct Document {
    tree: Rc<RefCell<Tree>>,
    root: ElementId,
    listeners: Listeners,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// An empty document containing only its root element.
    pub fn new() -> Self {
        let mut tree = Tree::default();
        let root = tree.insert(None, ElementSpec::new(Role::Document));
        Self {
            tree: Rc::new(RefCell::new(tree)),
            root,
            listeners: Listeners::new(),
        }
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn listeners(&self) -> &Listeners {
        &self.listeners
    }

    /// Hand `event` to the document-level listeners. See [`Listeners::dispatch`].
    pub fn dispatch(&self, event: &GlobalEvent) -> Vec<Delivery> {
        self.listeners.dispatch(event)
    }

    /// Number of active document-level listeners of `kind`.
    pub fn listener_count(&self, kind: ListenerKind) -> usize {
        self.listeners.count(kind)
    }

    // -- Structure --

    /// Append a new element under `parent`. A parent that no longer exists
    /// is replaced by the root.
    pub fn create(&self, parent: ElementId, spec: ElementSpec) -> ElementId {
        let mut tree = self.tree.borrow_mut();
        let parent = if tree.node(parent).is_some() {
            parent
        } else {
            log::warn!("element {parent:?} is gone, attaching {:?} to the root", spec.role);
            self.root
        };
        tree.insert(Some(parent), spec)
    }

    /// Like [`create`](Self::create), but the element (and everything later
    /// added under it) is removed when the returned guard is dropped.
    pub fn mount(&self, parent: ElementId, spec: ElementSpec) -> Mounted {
        let id = self.create(parent, spec);
        Mounted {
            tree: Rc::downgrade(&self.tree),
            id,
        }
    }

    /// Remove an element with its subtree. Focus inside the subtree is
    /// dropped. The root cannot be removed.
    pub fn remove(&self, id: ElementId) -> bool {
        if id == self.root {
            return false;
        }
        self.tree.borrow_mut().remove_subtree(id) > 0
    }

    /// Remove every child of `id`, keeping `id` itself.
    pub fn clear_children(&self, id: ElementId) {
        let children = self.children(id);
        let mut tree = self.tree.borrow_mut();
        for child in children {
            tree.remove_subtree(child);
        }
    }

    pub fn exists(&self, id: ElementId) -> bool {
        self.tree.borrow().node(id).is_some()
    }

    /// Number of live elements, the root included.
    pub fn len(&self) -> usize {
        self.tree.borrow().preorder(self.root).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.tree.borrow().node(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: ElementId) -> Vec<ElementId> {
        self.tree
            .borrow()
            .node(id)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    /// Whether `node` is `ancestor` itself or one of its descendants.
    pub fn contains(&self, ancestor: ElementId, node: ElementId) -> bool {
        self.tree.borrow().contains(ancestor, node)
    }

    /// First element in document order whose id attribute is `dom_id`.
    pub fn find_by_dom_id(&self, dom_id: &str) -> Option<ElementId> {
        let tree = self.tree.borrow();
        tree.preorder(self.root).into_iter().find(|&id| {
            tree.node(id)
                .is_some_and(|n| n.spec.dom_id.as_deref() == Some(dom_id))
        })
    }

    // -- Properties --

    pub fn role(&self, id: ElementId) -> Option<Role> {
        self.tree.borrow().node(id).map(|n| n.spec.role)
    }

    pub fn label(&self, id: ElementId) -> Option<String> {
        self.tree.borrow().node(id).and_then(|n| n.spec.label.clone())
    }

    pub fn set_label(&self, id: ElementId, label: impl Into<String>) {
        if let Some(node) = self.tree.borrow_mut().node_mut(id) {
            node.spec.label = Some(label.into());
        }
    }

    pub fn href(&self, id: ElementId) -> Option<String> {
        self.tree.borrow().node(id).and_then(|n| n.spec.href.clone())
    }

    pub fn dom_id(&self, id: ElementId) -> Option<String> {
        self.tree.borrow().node(id).and_then(|n| n.spec.dom_id.clone())
    }

    /// Screen bounds; empty for a removed element.
    pub fn bounds(&self, id: ElementId) -> Range {
        self.tree
            .borrow()
            .node(id)
            .map(|n| n.spec.bounds)
            .unwrap_or_default()
    }

    pub fn set_bounds(&self, id: ElementId, bounds: Range) {
        if let Some(node) = self.tree.borrow_mut().node_mut(id) {
            node.spec.bounds = bounds;
        }
    }

    pub fn set_hidden(&self, id: ElementId, hidden: bool) {
        let mut tree = self.tree.borrow_mut();
        if let Some(node) = tree.node_mut(id) {
            node.spec.hidden = hidden;
        }
        if hidden && tree.focused.is_some_and(|f| tree.contains(id, f)) {
            tree.focused = None;
        }
    }

    /// Whether the element exists and no ancestor hides it.
    pub fn is_rendered(&self, id: ElementId) -> bool {
        self.tree.borrow().is_rendered(id)
    }

    pub fn set_attr(&self, id: ElementId, name: &str, value: impl Into<String>) {
        if let Some(node) = self.tree.borrow_mut().node_mut(id) {
            node.attrs.insert(name.to_string(), value.into());
        }
    }

    pub fn attr(&self, id: ElementId, name: &str) -> Option<String> {
        self.tree
            .borrow()
            .node(id)
            .and_then(|n| n.attrs.get(name).cloned())
    }

    // -- Hit testing --

    /// Deepest rendered element whose bounds contain `p`, or the root.
    pub fn hit_test(&self, p: Point) -> ElementId {
        let tree = self.tree.borrow();
        tree.node(self.root)
            .and_then(|root| root.children.iter().rev().find_map(|&c| tree.hit(c, p)))
            .unwrap_or(self.root)
    }

    // -- Focus --

    pub fn focused(&self) -> Option<ElementId> {
        self.tree.borrow().focused
    }

    pub fn is_focused(&self, id: ElementId) -> bool {
        self.focused() == Some(id)
    }

    /// Move focus to `id`. Returns `false`, leaving focus unchanged, when the
    /// element is gone, hidden, or not focusable.
    pub fn focus(&self, id: ElementId) -> bool {
        let mut tree = self.tree.borrow_mut();
        let focusable = tree.node(id).is_some_and(|n| n.spec.focusable);
        if !focusable || !tree.is_rendered(id) {
            return false;
        }
        tree.focused = Some(id);
        true
    }

    pub fn blur(&self) {
        self.tree.borrow_mut().focused = None;
    }

    /// Move focus to the next element of the Tab sequence, wrapping around.
    pub fn focus_next(&self) -> Option<ElementId> {
        self.step_focus(true)
    }

    /// Move focus to the previous element of the Tab sequence, wrapping
    /// around.
    pub fn focus_prev(&self) -> Option<ElementId> {
        self.step_focus(false)
    }

    fn step_focus(&self, forward: bool) -> Option<ElementId> {
        let mut tree = self.tree.borrow_mut();
        let order: Vec<ElementId> = tree
            .preorder(self.root)
            .into_iter()
            .filter(|&id| tree.node(id).is_some_and(|n| n.spec.tabbable) && tree.is_rendered(id))
            .collect();
        if order.is_empty() {
            return None;
        }
        let len = order.len();
        let pos = tree
            .focused
            .and_then(|f| order.iter().position(|&id| id == f));
        let next = match (pos, forward) {
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
            (None, true) => 0,
            (None, false) => len - 1,
        };
        tree.focused = Some(order[next]);
        tree.focused
    }
}

/// Guard for an element created with [`Document::mount`]. Dropping it
/// removes the element and its subtree.
#[must_use = "dropping a Mounted guard immediately removes the element"]
#[derive(Debug)]
pub struct Mounted {
    tree: Weak<RefCell<Tree>>,
    id: ElementId,
}

impl Mounted {
    pub fn id(&self) -> ElementId {
        self.id
    }
}

impl Drop for Mounted {
    fn drop(&mut self) {
        if let Some(tree) = self.tree.upgrade() {
            tree.borrow_mut().remove_subtree(self.id);
        }
    }
}
