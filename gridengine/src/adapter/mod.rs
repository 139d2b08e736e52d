//! Host framework adapters.
//!
//! An adapter gives the engine everything it needs from a host: lifecycle
//! hooks, state cells, event wiring, paint-frame scheduling, elements and
//! text measurement. The engine never talks to a host any other way.

mod element;
mod headless;
mod terminal;

pub use element::{HostElement, Listener, ListenerId};
pub use headless::{HeadlessAdapter, FRAME_INTERVAL};
pub use terminal::{TerminalAdapter, TerminalHost, FRAME_TICK};

use std::cell::{Cell, RefCell};
use std::time::Duration;

use gridcanvas::EventKind;

use crate::lifecycle::{Hook, MountHook};
use crate::state::State;

/// Callback run on the next paint frame with the frame timestamp.
pub type FrameCallback = Box<dyn FnOnce(Duration)>;

/// Identifier of a scheduled paint-frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(u64);

/// Font a piece of text is measured in.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub family: String,
    /// Size in pixels.
    pub size: f32,
    pub bold: bool,
}

impl FontSpec {
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
            bold: false,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::new("monospace", 13.0)
    }
}

/// Rendered extent of a piece of text, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextMetrics {
    pub width: f32,
    pub height: f32,
}

/// Capabilities a host framework provides to the grid engine.
pub trait FrameworkAdapter: 'static {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    fn on_mount(&self, hook: MountHook);
    fn on_unmount(&self, hook: Hook);
    fn on_update(&self, hook: Hook);

    /// Create a state cell the host can observe.
    fn create_state<T: Clone + 'static>(&self, initial: T) -> State<T>;

    fn add_event_listener(&self, element: &HostElement, kind: EventKind, listener: Listener) -> ListenerId;
    fn remove_event_listener(&self, element: &HostElement, id: ListenerId);

    /// Run `callback` once on the next paint frame.
    fn request_animation_frame(&self, callback: FrameCallback) -> FrameId;
    fn cancel_animation_frame(&self, id: FrameId);

    fn create_element(&self, tag: &str) -> HostElement;
    fn measure_text(&self, text: &str, font: &FontSpec) -> TextMetrics;
}

/// Paint-frame callbacks waiting for the next frame.
#[derive(Default)]
pub struct FrameQueue {
    next_id: Cell<u64>,
    pending: RefCell<Vec<(FrameId, FrameCallback)>>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self, callback: FrameCallback) -> FrameId {
        let id = FrameId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.pending.borrow_mut().push((id, callback));
        id
    }

    pub fn cancel(&self, id: FrameId) -> bool {
        let mut pending = self.pending.borrow_mut();
        let before = pending.len();
        pending.retain(|(fid, _)| *fid != id);
        pending.len() != before
    }

    pub fn len(&self) -> usize {
        self.pending.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.borrow().is_empty()
    }

    /// Run the callbacks queued before this call. Callbacks requested while
    /// running wait for the next frame; ones cancelled while running are
    /// skipped. Returns how many ran.
    pub fn run(&self, now: Duration) -> usize {
        let due: Vec<FrameId> = self.pending.borrow().iter().map(|(id, _)| *id).collect();
        let mut ran = 0;
        for id in due {
            let callback = {
                let mut pending = self.pending.borrow_mut();
                pending
                    .iter()
                    .position(|(fid, _)| *fid == id)
                    .map(|index| pending.remove(index).1)
            };
            if let Some(callback) = callback {
                callback(now);
                ran += 1;
            }
        }
        ran
    }
}

impl std::fmt::Debug for FrameQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameQueue")
            .field("pending", &self.len())
            .finish()
    }
}
