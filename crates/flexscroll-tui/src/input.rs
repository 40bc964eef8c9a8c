use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use flexscroll_core::Axis;

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// Raise the go-to-middle signal
    GoToMiddle,
    /// Load a page past the end without dragging
    AppendPage,
    /// Pointer pressed at a cell position along the scroll axis
    DragStart(u16),
    DragMove(u16),
    DragEnd,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Esc, _) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Char('m'), KeyModifiers::NONE) => Action::GoToMiddle,
        (KeyCode::Char('a'), KeyModifiers::NONE) => Action::AppendPage,
        _ => Action::None,
    }
}

/// Translate left-button mouse events into drag actions
pub fn handle_mouse_event(mouse: MouseEvent, axis: Axis) -> Action {
    let position = match axis {
        Axis::Vertical => mouse.row,
        Axis::Horizontal => mouse.column,
    };
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Action::DragStart(position),
        MouseEventKind::Drag(MouseButton::Left) => Action::DragMove(position),
        MouseEventKind::Up(MouseButton::Left) => Action::DragEnd,
        _ => Action::None,
    }
}
