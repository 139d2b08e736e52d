use std::cell::{Cell, Ref, RefCell, RefMut};
use std::rc::Rc;

use gridcanvas::{Buffer, EventKind, HostEvent};
use log::trace;
use uuid::Uuid;

/// Callback attached to an element for one kind of event.
pub type Listener = Rc<dyn Fn(&HostEvent)>;

/// Identifier returned when a listener is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct ElementInner {
    id: Uuid,
    tag: String,
    surface: RefCell<Buffer>,
    listeners: RefCell<Vec<(ListenerId, EventKind, Listener)>>,
    next_listener: Cell<u64>,
}

/// A host-owned drawing surface with event listeners.
///
/// Cloning yields another handle to the same element.
#[derive(Clone)]
pub struct HostElement {
    inner: Rc<ElementInner>,
}

impl HostElement {
    pub fn new(tag: impl Into<String>, width: u16, height: u16) -> Self {
        Self {
            inner: Rc::new(ElementInner {
                id: Uuid::new_v4(),
                tag: tag.into(),
                surface: RefCell::new(Buffer::new(width, height)),
                listeners: RefCell::new(Vec::new()),
                next_listener: Cell::new(0),
            }),
        }
    }

    pub fn id(&self) -> Uuid {
        self.inner.id
    }

    pub fn tag(&self) -> &str {
        &self.inner.tag
    }

    /// Surface size in cells.
    pub fn size(&self) -> (u16, u16) {
        let surface = self.inner.surface.borrow();
        (surface.width(), surface.height())
    }

    /// Resize the surface. Its contents are cleared.
    pub fn resize(&self, width: u16, height: u16) {
        if self.size() != (width, height) {
            *self.inner.surface.borrow_mut() = Buffer::new(width, height);
        }
    }

    pub fn surface(&self) -> Ref<'_, Buffer> {
        self.inner.surface.borrow()
    }

    pub fn surface_mut(&self) -> RefMut<'_, Buffer> {
        self.inner.surface.borrow_mut()
    }

    /// Glyphs on one line of the surface.
    pub fn line(&self, y: u16) -> String {
        self.surface().line(y)
    }

    pub fn add_listener(&self, kind: EventKind, listener: Listener) -> ListenerId {
        let id = ListenerId(self.inner.next_listener.get());
        self.inner.next_listener.set(id.0 + 1);
        self.inner.listeners.borrow_mut().push((id, kind, listener));
        id
    }

    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.inner.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(lid, _, _)| *lid != id);
        listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    /// Deliver `event` to every listener of its kind. A resize event resizes
    /// the surface first. Returns how many listeners ran.
    pub fn dispatch(&self, event: &HostEvent) -> usize {
        if let HostEvent::Resize { width, height } = event {
            self.resize(*width, *height);
        }
        let kind = event.kind();
        let matching: Vec<Listener> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .filter(|(_, k, _)| *k == kind)
            .map(|(_, _, l)| Rc::clone(l))
            .collect();
        trace!("Element {}: {:?} -> {} listener(s)", self.inner.tag, kind, matching.len());
        for listener in &matching {
            listener(event);
        }
        matching.len()
    }
}

impl PartialEq for HostElement {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl Eq for HostElement {}

impl std::fmt::Debug for HostElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostElement")
            .field("id", &self.inner.id)
            .field("tag", &self.inner.tag)
            .field("size", &self.size())
            .field("listeners", &self.listener_count())
            .finish()
    }
}
