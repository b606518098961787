use crate::state::ScrollAction;
use crossterm::event::{Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};

/// Input the terminal widget reacts to, independent of the host backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TerminalEvent {
    Key(KeyEvent),
    Paste(String),
    Click { column: u16, row: u16 },
    Hover { column: u16, row: u16 },
    Scroll(ScrollAction),
    FocusGained,
    FocusLost,
    Resize { width: u16, height: u16 },
}

impl TerminalEvent {
    /// Maps a crossterm event. Key releases and unhandled mouse traffic map to
    /// `None`.
    pub fn from_crossterm(event: Event) -> Option<Self> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Release => None,
            Event::Key(key) => Some(Self::Key(key)),
            Event::Paste(text) => Some(Self::Paste(text)),
            Event::Mouse(mouse) => Self::from_mouse(mouse),
            Event::FocusGained => Some(Self::FocusGained),
            Event::FocusLost => Some(Self::FocusLost),
            Event::Resize(width, height) => Some(Self::Resize { width, height }),
        }
    }

    fn from_mouse(mouse: MouseEvent) -> Option<Self> {
        let (column, row) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => Some(Self::Click { column, row }),
            MouseEventKind::Moved => Some(Self::Hover { column, row }),
            MouseEventKind::ScrollUp => Some(Self::Scroll(ScrollAction::LineUp)),
            MouseEventKind::ScrollDown => Some(Self::Scroll(ScrollAction::LineDown)),
            _ => None,
        }
    }
}
