use crate::input::InputEvent;
use crate::view::Layout;

/// What the app should do in response to one decoded input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    SetLayout(Layout),
    ScrollLines(isize),
    PageUp,
    PageDown,
    ToggleMouse,
    ToggleTree,
    StageAll,
    DraftCommit,
}

/// Wheel notches scroll three lines.
const WHEEL_LINES: isize = 3;

pub fn map_event(event: InputEvent) -> Option<Action> {
    match event {
        InputEvent::Quit | InputEvent::Key('q') => Some(Action::Quit),
        InputEvent::Key('s') => Some(Action::SetLayout(Layout::SideBySide)),
        InputEvent::Key('i') => Some(Action::SetLayout(Layout::Inline)),
        InputEvent::Key('m') => Some(Action::ToggleMouse),
        InputEvent::Key('t') => Some(Action::ToggleTree),
        InputEvent::Key('a') => Some(Action::StageAll),
        InputEvent::Key('c') => Some(Action::DraftCommit),
        InputEvent::Up | InputEvent::Key('k') => Some(Action::ScrollLines(-1)),
        InputEvent::Down | InputEvent::Key('j') => Some(Action::ScrollLines(1)),
        InputEvent::PageUp | InputEvent::Key('b') => Some(Action::PageUp),
        InputEvent::PageDown | InputEvent::Key('f') => Some(Action::PageDown),
        InputEvent::ScrollUp => Some(Action::ScrollLines(-WHEEL_LINES)),
        InputEvent::ScrollDown => Some(Action::ScrollLines(WHEEL_LINES)),
        InputEvent::Key(_) => None,
    }
}
