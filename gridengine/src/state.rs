use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Identifier returned by [`State::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber<T> = Rc<dyn Fn(&T)>;

/// Observable value cell handed out by a framework adapter.
///
/// `State<T>` is cheap to clone; clones share the value. It is single-threaded,
/// like the engine that owns it. Subscribers run after every `set`/`update`
/// with a snapshot of the new value, so they may read or write the state.
pub struct State<T> {
    inner: Rc<RefCell<T>>,
    dirty: Rc<Cell<bool>>,
    subscribers: Rc<RefCell<Vec<(SubscriptionId, Subscriber<T>)>>>,
    next_id: Rc<Cell<u64>>,
}

impl<T: Clone + 'static> State<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(value)),
            dirty: Rc::new(Cell::new(false)),
            subscribers: Rc::new(RefCell::new(Vec::new())),
            next_id: Rc::new(Cell::new(0)),
        }
    }

    /// Get a clone of the current value
    pub fn get(&self) -> T {
        self.inner.borrow().clone()
    }

    /// Set a new value and notify subscribers
    pub fn set(&self, value: T) {
        *self.inner.borrow_mut() = value;
        self.changed();
    }

    /// Update the value using a closure
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut T),
    {
        f(&mut self.inner.borrow_mut());
        self.changed();
    }

    pub fn subscribe<F>(&self, f: F) -> SubscriptionId
    where
        F: Fn(&T) + 'static,
    {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.subscribers.borrow_mut().push((id, Rc::new(f)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|(sid, _)| *sid != id);
        subscribers.len() != before
    }

    /// Check if the state has been modified since last check
    pub fn is_dirty(&self) -> bool {
        self.dirty.get()
    }

    /// Clear the dirty flag
    pub fn clear_dirty(&self) {
        self.dirty.set(false);
    }

    fn changed(&self) {
        self.dirty.set(true);
        let subscribers: Vec<Subscriber<T>> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, f)| Rc::clone(f))
            .collect();
        if subscribers.is_empty() {
            return;
        }
        let snapshot = self.get();
        for subscriber in subscribers {
            subscriber(&snapshot);
        }
    }
}

impl<T> Clone for State<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
            dirty: Rc::clone(&self.dirty),
            subscribers: Rc::clone(&self.subscribers),
            next_id: Rc::clone(&self.next_id),
        }
    }
}

impl<T: Clone + Default + 'static> Default for State<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for State<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("State")
            .field("value", &self.inner.borrow())
            .field("dirty", &self.dirty.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_value() {
        let a = State::new(1);
        let b = a.clone();
        b.set(5);
        assert_eq!(a.get(), 5);
        assert!(a.is_dirty());
        a.clear_dirty();
        assert!(!b.is_dirty());
    }

    #[test]
    fn test_subscribers_see_new_value() {
        let state = State::new(0);
        let seen = Rc::new(Cell::new(0));
        let sink = Rc::clone(&seen);
        let id = state.subscribe(move |v| sink.set(*v));

        state.update(|v| *v += 3);
        assert_eq!(seen.get(), 3);

        assert!(state.unsubscribe(id));
        state.set(9);
        assert_eq!(seen.get(), 3);
    }

    #[test]
    fn test_subscriber_may_write_back() {
        let state = State::new(0);
        let inner = state.clone();
        state.subscribe(move |v| {
            if *v < 2 {
                inner.set(v + 1);
            }
        });

        state.set(0);
        assert_eq!(state.get(), 2);
    }
}
