use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use gridcanvas::{text::display_width, EventKind, HostEvent};
use log::debug;

use super::{FontSpec, FrameCallback, FrameId, FrameQueue, FrameworkAdapter, HostElement, Listener, ListenerId, TextMetrics};
use crate::lifecycle::{Hook, LifecycleHooks, MountHook};
use crate::state::State;

/// Time one headless paint frame advances the clock.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

struct HeadlessInner {
    hooks: RefCell<LifecycleHooks>,
    frames: FrameQueue,
    clock: Cell<Duration>,
    width: u16,
    height: u16,
}

/// In-memory host with an explicit frame clock.
///
/// Elements are off-screen surfaces, host events are delivered with
/// [`HeadlessAdapter::dispatch`], and paint frames only run when
/// [`HeadlessAdapter::run_frame`] is called.
#[derive(Clone)]
pub struct HeadlessAdapter {
    inner: Rc<HeadlessInner>,
}

impl HeadlessAdapter {
    pub fn new() -> Self {
        Self::with_size(80, 24)
    }

    /// Adapter whose new elements are `width` x `height` cells.
    pub fn with_size(width: u16, height: u16) -> Self {
        Self {
            inner: Rc::new(HeadlessInner {
                hooks: RefCell::new(LifecycleHooks::new()),
                frames: FrameQueue::new(),
                clock: Cell::new(Duration::ZERO),
                width,
                height,
            }),
        }
    }

    /// Fire the mount hook for `element`.
    pub fn mount(&self, element: &HostElement) {
        let hooks = self.inner.hooks.borrow().clone();
        hooks.call_on_mount(element);
    }

    pub fn unmount(&self) {
        let hooks = self.inner.hooks.borrow().clone();
        hooks.call_on_unmount();
    }

    pub fn update(&self) {
        let hooks = self.inner.hooks.borrow().clone();
        hooks.call_on_update();
    }

    /// Deliver a host event to `element`.
    pub fn dispatch(&self, element: &HostElement, event: &HostEvent) -> usize {
        element.dispatch(event)
    }

    /// Advance the clock by one frame and run the callbacks due.
    pub fn run_frame(&self) -> usize {
        let now = self.inner.clock.get() + FRAME_INTERVAL;
        self.inner.clock.set(now);
        self.inner.frames.run(now)
    }

    pub fn run_frames(&self, count: usize) -> usize {
        (0..count).map(|_| self.run_frame()).sum()
    }

    pub fn pending_frames(&self) -> usize {
        self.inner.frames.len()
    }

    pub fn now(&self) -> Duration {
        self.inner.clock.get()
    }
}

impl Default for HeadlessAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameworkAdapter for HeadlessAdapter {
    fn name(&self) -> &'static str {
        "headless"
    }

    fn on_mount(&self, hook: MountHook) {
        self.inner.hooks.borrow_mut().on_mount = Some(hook);
    }

    fn on_unmount(&self, hook: Hook) {
        self.inner.hooks.borrow_mut().on_unmount = Some(hook);
    }

    fn on_update(&self, hook: Hook) {
        self.inner.hooks.borrow_mut().on_update = Some(hook);
    }

    fn create_state<T: Clone + 'static>(&self, initial: T) -> State<T> {
        State::new(initial)
    }

    fn add_event_listener(&self, element: &HostElement, kind: EventKind, listener: Listener) -> ListenerId {
        element.add_listener(kind, listener)
    }

    fn remove_event_listener(&self, element: &HostElement, id: ListenerId) {
        if !element.remove_listener(id) {
            debug!("Listener {:?} was not attached to {}", id, element.tag());
        }
    }

    fn request_animation_frame(&self, callback: FrameCallback) -> FrameId {
        self.inner.frames.request(callback)
    }

    fn cancel_animation_frame(&self, id: FrameId) {
        self.inner.frames.cancel(id);
    }

    fn create_element(&self, tag: &str) -> HostElement {
        HostElement::new(tag, self.inner.width, self.inner.height)
    }

    /// Approximate metrics: half an em per column of display width.
    fn measure_text(&self, text: &str, font: &FontSpec) -> TextMetrics {
        let em = if font.bold { font.size * 1.05 } else { font.size };
        TextMetrics {
            width: display_width(text) as f32 * em * 0.5,
            height: font.size,
        }
    }
}
