use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Mode, Tab};

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextTab,
    PrevTab,
    ShowTab(Tab),
    MoveUp,
    MoveDown,
    ScrollHalfPageDown,
    ScrollHalfPageUp,
    JumpToTop,
    JumpToBottom,
    Select,
    StartSearch,
    // Reading view
    ToggleAutoScroll,
    SpeedUp,
    SpeedDown,
    PrevSurah,
    NextSurah,
    ToggleTranslation,
    StartJump,
    StartBookmark,
    // Bookmarks
    Delete,
    ToggleTheme,
    Help,
    ExitMode,
    Confirm,
    Cancel,
    InputChar(char),
    Backspace,
    NextField,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App) -> Action {
    // Handle input modes (search, jump, bookmark dialog)
    if app.is_input_mode() {
        return handle_input_mode(key);
    }

    match &app.mode {
        Mode::DeleteConfirm(_) => return handle_confirm_mode(key),
        Mode::Help => {
            // Any key exits help
            return Action::ExitMode;
        }
        _ => {}
    }

    // Keys shared by every tab
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => return Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => return Action::Quit,
        (KeyCode::Tab, _) => return Action::NextTab,
        (KeyCode::BackTab, _) => return Action::PrevTab,
        (KeyCode::Char('1'), KeyModifiers::NONE) => return Action::ShowTab(Tab::Surahs),
        (KeyCode::Char('2'), KeyModifiers::NONE) => return Action::ShowTab(Tab::Bookmarks),
        (KeyCode::Char('3'), KeyModifiers::NONE) => return Action::ShowTab(Tab::Reading),
        (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => return Action::MoveDown,
        (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => return Action::MoveUp,
        (KeyCode::Char('d'), KeyModifiers::CONTROL) => return Action::ScrollHalfPageDown,
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => return Action::ScrollHalfPageUp,
        (KeyCode::PageDown, _) => return Action::ScrollHalfPageDown,
        (KeyCode::PageUp, _) => return Action::ScrollHalfPageUp,
        (KeyCode::Char('g'), KeyModifiers::NONE) | (KeyCode::Home, _) => return Action::JumpToTop,
        (KeyCode::Char('G'), _) | (KeyCode::End, _) => return Action::JumpToBottom,
        (KeyCode::Char('T'), _) => return Action::ToggleTheme,
        (KeyCode::Char('?'), _) => return Action::Help,
        (KeyCode::Esc, _) => return Action::ExitMode,
        _ => {}
    }

    match app.tab {
        Tab::Surahs => match key.code {
            KeyCode::Enter => Action::Select,
            KeyCode::Char('/') => Action::StartSearch,
            _ => Action::None,
        },
        Tab::Bookmarks => match key.code {
            KeyCode::Enter => Action::Select,
            KeyCode::Char('/') => Action::StartSearch,
            KeyCode::Char('d') if key.modifiers == KeyModifiers::NONE => Action::Delete,
            _ => Action::None,
        },
        Tab::Reading => match key.code {
            KeyCode::Char(' ') => Action::ToggleAutoScroll,
            KeyCode::Char('+') | KeyCode::Char('=') => Action::SpeedUp,
            KeyCode::Char('-') => Action::SpeedDown,
            KeyCode::Char('[') => Action::PrevSurah,
            KeyCode::Char(']') => Action::NextSurah,
            KeyCode::Char('t') => Action::ToggleTranslation,
            KeyCode::Char(':') => Action::StartJump,
            KeyCode::Char('b') => Action::StartBookmark,
            _ => Action::None,
        },
    }
}

/// Handle key events in input mode
fn handle_input_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Enter => Action::Confirm,
        KeyCode::Esc => Action::Cancel,
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Tab => Action::NextField,
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => Action::InputChar(c),
        _ => Action::None,
    }
}

/// Handle key events in confirmation mode
fn handle_confirm_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Action::Confirm,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Action::Cancel,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tilawa_core::storage::ReaderPreferences;
    use tilawa_core::AppConfig;
    use uuid::Uuid;

    fn app_on(tab: Tab) -> App {
        let config = Arc::new(AppConfig::default());
        let prefs = ReaderPreferences::defaults(&config);
        let mut app = App::new(config, prefs);
        app.tab = tab;
        app
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_reading_keys() {
        let app = app_on(Tab::Reading);
        assert_eq!(handle_key_event(key(KeyCode::Char(' ')), &app), Action::ToggleAutoScroll);
        assert_eq!(handle_key_event(key(KeyCode::Char('+')), &app), Action::SpeedUp);
        assert_eq!(handle_key_event(key(KeyCode::Char(']')), &app), Action::NextSurah);
        assert_eq!(handle_key_event(key(KeyCode::Char(':')), &app), Action::StartJump);
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('T'), KeyModifiers::SHIFT), &app),
            Action::ToggleTheme
        );
    }

    #[test]
    fn test_tab_specific_keys() {
        let surahs = app_on(Tab::Surahs);
        assert_eq!(handle_key_event(key(KeyCode::Char(' ')), &surahs), Action::None);
        assert_eq!(handle_key_event(key(KeyCode::Char('/')), &surahs), Action::StartSearch);

        let bookmarks = app_on(Tab::Bookmarks);
        assert_eq!(handle_key_event(key(KeyCode::Char('d')), &bookmarks), Action::Delete);
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL), &bookmarks),
            Action::ScrollHalfPageDown
        );
    }

    #[test]
    fn test_input_mode_captures_characters() {
        let mut app = app_on(Tab::Reading);
        app.mode = Mode::JumpInput(String::new());
        assert_eq!(handle_key_event(key(KeyCode::Char('q')), &app), Action::InputChar('q'));
        assert_eq!(handle_key_event(key(KeyCode::Enter), &app), Action::Confirm);
        assert_eq!(handle_key_event(key(KeyCode::Esc), &app), Action::Cancel);
    }

    #[test]
    fn test_confirm_mode() {
        let mut app = app_on(Tab::Bookmarks);
        app.mode = Mode::DeleteConfirm(Uuid::new_v4());
        assert_eq!(handle_key_event(key(KeyCode::Char('y')), &app), Action::Confirm);
        assert_eq!(handle_key_event(key(KeyCode::Char('n')), &app), Action::Cancel);
        assert_eq!(handle_key_event(key(KeyCode::Char('x')), &app), Action::None);
    }
}
