//! Crossterm host: one full-screen element driven by an async event loop.

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::io;
use std::panic;
use std::rc::Rc;
use std::sync::Once;
use std::time::{Duration, Instant};

use crossterm::event::{DisableBracketedPaste, DisableMouseCapture, EventStream};
use crossterm::{cursor, execute, terminal};
use futures::StreamExt;
use gridcanvas::{text::display_width, EventKind, HostEvent, Key, Terminal, CELL_WIDTH_PX};
use log::{debug, error, info, trace};
use tokio::time::MissedTickBehavior;

use super::{FontSpec, FrameCallback, FrameId, FrameQueue, FrameworkAdapter, HostElement, Listener, ListenerId, TextMetrics};
use crate::error::EngineError;
use crate::lifecycle::{Hook, LifecycleHooks, MountHook};
use crate::state::State;

/// Paint-frame tick of the terminal loop.
pub const FRAME_TICK: Duration = Duration::from_millis(16);

static RESTORE_HOOK: Once = Once::new();

struct TerminalInner {
    hooks: RefCell<LifecycleHooks>,
    frames: FrameQueue,
    quit: Cell<bool>,
}

/// Adapter for a crossterm terminal. Pair it with a [`TerminalHost`] to run.
#[derive(Clone)]
pub struct TerminalAdapter {
    inner: Rc<TerminalInner>,
}

impl TerminalAdapter {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(TerminalInner {
                hooks: RefCell::new(LifecycleHooks::new()),
                frames: FrameQueue::new(),
                quit: Cell::new(false),
            }),
        }
    }

    /// Ask the running host loop to stop after the current event.
    pub fn request_quit(&self) {
        self.inner.quit.set(true);
    }

    pub fn quit_requested(&self) -> bool {
        self.inner.quit.get()
    }

    fn hooks(&self) -> LifecycleHooks {
        self.inner.hooks.borrow().clone()
    }
}

impl Default for TerminalAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameworkAdapter for TerminalAdapter {
    fn name(&self) -> &'static str {
        "terminal"
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
        element.remove_listener(id);
    }

    fn request_animation_frame(&self, callback: FrameCallback) -> FrameId {
        self.inner.frames.request(callback)
    }

    fn cancel_animation_frame(&self, id: FrameId) {
        self.inner.frames.cancel(id);
    }

    /// Elements start at the current terminal size.
    fn create_element(&self, tag: &str) -> HostElement {
        let (width, height) = terminal::size().unwrap_or((80, 24));
        HostElement::new(tag, width, height)
    }

    /// Monospace cells: every column of display width is one cell wide.
    fn measure_text(&self, text: &str, font: &FontSpec) -> TextMetrics {
        TextMetrics {
            width: (display_width(text) * CELL_WIDTH_PX as usize) as f32,
            height: font.size,
        }
    }
}

/// Owns the terminal while a [`TerminalAdapter`] is running.
pub struct TerminalHost {
    adapter: TerminalAdapter,
    terminal: Terminal,
}

impl TerminalHost {
    /// Enter raw mode and the alternate screen. The terminal is restored when
    /// the host is dropped, or by a process-wide panic hook.
    pub fn new(adapter: TerminalAdapter) -> Result<Self, EngineError> {
        install_restore_hook();
        let terminal = Terminal::new()?;
        Ok(Self { adapter, terminal })
    }

    /// Mount `root` full-screen and run until a quit key or
    /// [`TerminalAdapter::request_quit`].
    ///
    /// Events go to the element's listeners, paint frames run on every tick
    /// and the surface is presented after each wakeup. The root is unmounted
    /// on every exit, including terminal errors.
    pub async fn run(mut self, root: &HostElement) -> Result<(), EngineError> {
        let (width, height) = self.terminal.size()?;
        root.resize(width, height);
        info!("Terminal host started at {}x{}", width, height);

        let adapter = self.adapter.clone();
        let result = mounted_session(&adapter, root, self.event_loop(root)).await;
        match &result {
            Ok(()) => info!("Terminal host stopped"),
            Err(e) => error!("Terminal host failed: {}", e),
        }
        result
    }

    async fn event_loop(&mut self, root: &HostElement) -> Result<(), EngineError> {
        self.terminal.present(&root.surface())?;

        let mut events = EventStream::new();
        let mut tick = tokio::time::interval(FRAME_TICK);
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let started = Instant::now();

        loop {
            tokio::select! {
                next = events.next() => {
                    match next {
                        Some(Ok(raw)) => {
                            trace!("Crossterm event: {:?}", raw);
                            let Some(event) = HostEvent::from_crossterm(raw) else {
                                continue;
                            };
                            if is_quit(&event) {
                                debug!("Quit key pressed");
                                return Ok(());
                            }
                            root.dispatch(&event);
                        }
                        Some(Err(e)) => {
                            error!("Event stream error: {}", e);
                        }
                        None => return Ok(()),
                    }
                }
                _ = tick.tick() => {
                    self.adapter.inner.frames.run(started.elapsed());
                }
            }

            if self.adapter.quit_requested() {
                return Ok(());
            }
            self.terminal.present(&root.surface())?;
        }
    }
}

/// Fire the mount hooks for `root`, drive `session`, then fire the unmount
/// hooks whatever the session returned.
async fn mounted_session<T>(
    adapter: &TerminalAdapter,
    root: &HostElement,
    session: impl Future<Output = Result<T, EngineError>>,
) -> Result<T, EngineError> {
    adapter.hooks().call_on_mount(root);
    let result = session.await;
    adapter.hooks().call_on_unmount();
    result
}

/// Chain a terminal restore in front of the current panic hook. Only the
/// first call installs it; returns whether this call did.
fn install_restore_hook() -> bool {
    let mut installed = false;
    RESTORE_HOOK.call_once(|| {
        let original_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            if terminal::is_raw_mode_enabled().unwrap_or(false) {
                let _ = restore_terminal();
            }
            original_hook(panic_info);
        }));
        installed = true;
    });
    installed
}

fn is_quit(event: &HostEvent) -> bool {
    match event {
        HostEvent::Key { key, modifiers } => match key {
            Key::Char('q') | Key::Escape => true,
            Key::Char('c') => modifiers.ctrl,
            _ => false,
        },
        _ => false,
    }
}

fn restore_terminal() -> io::Result<()> {
    terminal::disable_raw_mode()?;
    execute!(
        io::stdout(),
        DisableBracketedPaste,
        DisableMouseCapture,
        cursor::Show,
        terminal::LeaveAlternateScreen
    )
}
