use crossterm::event::KeyCode;

/// What the keyboard currently talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Table,
    Search,
    Detail,
    ConfirmDelete,
    Report,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TuiAction {
    Quit,
    MoveSelectionUp,
    MoveSelectionDown,
    OpenDetail,
    CloseDetail,
    ViewDetails,
    ToggleStatus,
    BeginSearch,
    SearchChar(char),
    SearchBackspace,
    SearchCommit,
    SearchCancel,
    CycleMonth,
    CycleDate,
    CycleReporter,
    CycleIncident,
    ResetFilters,
    RequestDelete,
    ConfirmDelete,
    CancelDelete,
    DismissError,
    BackToDashboard,
    ToggleHelp,
}

pub fn key_to_action(key: KeyCode, mode: InputMode) -> Option<TuiAction> {
    match mode {
        InputMode::Search => match key {
            KeyCode::Char(c) => Some(TuiAction::SearchChar(c)),
            KeyCode::Backspace => Some(TuiAction::SearchBackspace),
            KeyCode::Enter => Some(TuiAction::SearchCommit),
            KeyCode::Esc => Some(TuiAction::SearchCancel),
            _ => None,
        },
        InputMode::ConfirmDelete => match key {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Some(TuiAction::ConfirmDelete),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(TuiAction::CancelDelete),
            _ => None,
        },
        InputMode::Detail => match key {
            KeyCode::Enter | KeyCode::Char('v') | KeyCode::Char('V') => Some(TuiAction::ViewDetails),
            KeyCode::Esc | KeyCode::Backspace => Some(TuiAction::CloseDetail),
            KeyCode::Char('q') => Some(TuiAction::Quit),
            _ => None,
        },
        InputMode::Report => match key {
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => Some(TuiAction::BackToDashboard),
            KeyCode::Char('q') => Some(TuiAction::Quit),
            _ => None,
        },
        InputMode::Table => match key {
            KeyCode::Char('q') | KeyCode::Char('Q') => Some(TuiAction::Quit),
            KeyCode::Up | KeyCode::Char('k') => Some(TuiAction::MoveSelectionUp),
            KeyCode::Down | KeyCode::Char('j') => Some(TuiAction::MoveSelectionDown),
            KeyCode::Enter => Some(TuiAction::OpenDetail),
            KeyCode::Char(' ') | KeyCode::Char('s') | KeyCode::Char('S') => Some(TuiAction::ToggleStatus),
            KeyCode::Char('/') => Some(TuiAction::BeginSearch),
            KeyCode::Char('m') | KeyCode::Char('M') => Some(TuiAction::CycleMonth),
            KeyCode::Char('d') | KeyCode::Char('D') => Some(TuiAction::CycleDate),
            KeyCode::Char('n') | KeyCode::Char('N') => Some(TuiAction::CycleReporter),
            KeyCode::Char('t') | KeyCode::Char('T') => Some(TuiAction::CycleIncident),
            KeyCode::Char('c') | KeyCode::Char('C') => Some(TuiAction::ResetFilters),
            KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Delete => Some(TuiAction::RequestDelete),
            KeyCode::Esc => Some(TuiAction::DismissError),
            KeyCode::Char('?') | KeyCode::Char('h') | KeyCode::Char('H') => Some(TuiAction::ToggleHelp),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_mode_captures_letters() {
        assert_eq!(key_to_action(KeyCode::Char('q'), InputMode::Search), Some(TuiAction::SearchChar('q')));
        assert_eq!(key_to_action(KeyCode::Char('q'), InputMode::Table), Some(TuiAction::Quit));
    }

    #[test]
    fn test_dialog_answers() {
        assert_eq!(key_to_action(KeyCode::Char('y'), InputMode::ConfirmDelete), Some(TuiAction::ConfirmDelete));
        assert_eq!(key_to_action(KeyCode::Esc, InputMode::ConfirmDelete), Some(TuiAction::CancelDelete));
        assert_eq!(key_to_action(KeyCode::Char('q'), InputMode::ConfirmDelete), None);
    }

    #[test]
    fn test_enter_depends_on_mode() {
        assert_eq!(key_to_action(KeyCode::Enter, InputMode::Table), Some(TuiAction::OpenDetail));
        assert_eq!(key_to_action(KeyCode::Enter, InputMode::Detail), Some(TuiAction::ViewDetails));
        assert_eq!(key_to_action(KeyCode::Esc, InputMode::Report), Some(TuiAction::BackToDashboard));
    }
}
