use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Focus, Mode};

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    FocusLeft,
    FocusRight,
    FocusNext,
    MoveUp,
    MoveDown,
    ToggleTag,
    ClearSelection,
    Fetch,
    OpenInBrowser,
    ShowHelp,
    ExitMode,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App) -> Action {
    if app.mode == Mode::Help {
        // Any key exits help
        return Action::ExitMode;
    }

    match (key.code, key.modifiers) {
        // Quit
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        // Navigation between panels
        (KeyCode::Char('h'), KeyModifiers::NONE) => Action::FocusLeft,
        (KeyCode::Char('l'), KeyModifiers::NONE) => Action::FocusRight,
        (KeyCode::Left, KeyModifiers::NONE) => Action::FocusLeft,
        (KeyCode::Right, KeyModifiers::NONE) => Action::FocusRight,
        (KeyCode::Tab, _) => Action::FocusNext,

        // Navigation within panel
        (KeyCode::Char('j'), KeyModifiers::NONE) => Action::MoveDown,
        (KeyCode::Char('k'), KeyModifiers::NONE) => Action::MoveUp,
        (KeyCode::Down, KeyModifiers::NONE) => Action::MoveDown,
        (KeyCode::Up, KeyModifiers::NONE) => Action::MoveUp,

        // Tag selection
        (KeyCode::Char(' '), KeyModifiers::NONE) | (KeyCode::Enter, KeyModifiers::NONE)
            if app.focus == Focus::Tags =>
        {
            Action::ToggleTag
        }
        (KeyCode::Char('c'), KeyModifiers::NONE) => Action::ClearSelection,

        // Fetch
        (KeyCode::Char('f'), KeyModifiers::NONE) => Action::Fetch,
        (KeyCode::Char('r'), KeyModifiers::NONE) => Action::Fetch,

        // Article actions
        (KeyCode::Char('o'), KeyModifiers::NONE) | (KeyCode::Enter, KeyModifiers::NONE)
            if app.focus == Focus::Articles =>
        {
            Action::OpenInBrowser
        }

        (KeyCode::Char('?'), _) => Action::ShowHelp,
        (KeyCode::Esc, _) => Action::ExitMode,

        _ => Action::None,
    }
}
