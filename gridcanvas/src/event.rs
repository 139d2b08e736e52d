/// Input delivered by a host to one of its elements.
///
/// Coordinates are in surface cells relative to the element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// Key press
    Key { key: Key, modifiers: Modifiers },
    /// Mouse button pressed
    Click { x: u16, y: u16, button: MouseButton },
    /// Wheel or trackpad scroll, in lines
    Scroll {
        x: u16,
        y: u16,
        delta_x: i16,
        delta_y: i16,
    },
    /// Text pasted into the element
    Paste(String),
    /// Element resized
    Resize { width: u16, height: u16 },
}

/// Listener channel an event is delivered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Key,
    Click,
    Scroll,
    Paste,
    Resize,
}

impl EventKind {
    pub const ALL: [EventKind; 5] = [
        EventKind::Key,
        EventKind::Click,
        EventKind::Scroll,
        EventKind::Paste,
        EventKind::Resize,
    ];
}

impl HostEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            HostEvent::Key { .. } => EventKind::Key,
            HostEvent::Click { .. } => EventKind::Click,
            HostEvent::Scroll { .. } => EventKind::Scroll,
            HostEvent::Paste(_) => EventKind::Paste,
            HostEvent::Resize { .. } => EventKind::Resize,
        }
    }

    pub fn key(key: Key) -> Self {
        HostEvent::Key {
            key,
            modifiers: Modifiers::new(),
        }
    }

    pub fn click(x: u16, y: u16) -> Self {
        HostEvent::Click {
            x,
            y,
            button: MouseButton::Left,
        }
    }

    /// Convert a raw crossterm event. Returns None for events the grid ignores
    /// (key releases, unmapped keys, mouse moves, focus changes).
    pub fn from_crossterm(event: crossterm::event::Event) -> Option<Self> {
        use crossterm::event::{Event as CtEvent, KeyEventKind, KeyModifiers, MouseEventKind};

        match event {
            CtEvent::Key(press) if press.kind == KeyEventKind::Press => {
                let modifiers = Modifiers {
                    shift: press.modifiers.contains(KeyModifiers::SHIFT),
                    ctrl: press.modifiers.contains(KeyModifiers::CONTROL),
                    alt: press.modifiers.contains(KeyModifiers::ALT),
                };
                Key::from_code(press.code).map(|key| HostEvent::Key { key, modifiers })
            }
            CtEvent::Mouse(mouse) => {
                let (x, y) = (mouse.column, mouse.row);
                let (delta_x, delta_y) = match mouse.kind {
                    MouseEventKind::Down(button) => {
                        let button = MouseButton::from_crossterm(button);
                        return Some(HostEvent::Click { x, y, button });
                    }
                    MouseEventKind::ScrollDown => (0, 1),
                    MouseEventKind::ScrollUp => (0, -1),
                    MouseEventKind::ScrollRight => (1, 0),
                    MouseEventKind::ScrollLeft => (-1, 0),
                    _ => return None,
                };
                Some(HostEvent::Scroll {
                    x,
                    y,
                    delta_x,
                    delta_y,
                })
            }
            CtEvent::Paste(text) => Some(HostEvent::Paste(text)),
            CtEvent::Resize(width, height) => Some(HostEvent::Resize { width, height }),
            _ => None,
        }
    }
}

/// Keys the grid and its hosts react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Tab,
    BackTab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

impl Key {
    fn from_code(code: crossterm::event::KeyCode) -> Option<Self> {
        use crossterm::event::KeyCode;

        Some(match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Escape,
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    fn from_crossterm(button: crossterm::event::MouseButton) -> Self {
        use crossterm::event::MouseButton as CtButton;

        match button {
            CtButton::Left => MouseButton::Left,
            CtButton::Right => MouseButton::Right,
            CtButton::Middle => MouseButton::Middle,
        }
    }
}
