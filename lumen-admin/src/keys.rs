//! Keybinding definitions for the admin panel.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextPage,
    PrevPage,
    /// Toggle sorting on the n-th column (zero based).
    SortColumn(usize),
    MoveUp,
    MoveDown,
    PageBack,
    PageForward,
    OpenSearch,
    DeleteItem,
    /// Run the n-th custom row action on the selected row.
    RunAction(usize),
    SyncPortfolio,
    Refresh,
    Confirm,
    Cancel,
}

pub fn map_key(event: KeyEvent) -> Option<Action> {
    let KeyEvent { code, modifiers, .. } = event;

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') => Some(Action::Cancel),
            KeyCode::Char('r') => Some(Action::Refresh),
            _ => None,
        };
    }

    match code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('/') => Some(Action::OpenSearch),
        KeyCode::Char('d') => Some(Action::DeleteItem),
        KeyCode::Char('a') => Some(Action::RunAction(0)),
        KeyCode::Char('b') => Some(Action::RunAction(1)),
        KeyCode::Char('s') => Some(Action::SyncPortfolio),
        KeyCode::Char('r') => Some(Action::Refresh),
        KeyCode::Char('y') | KeyCode::Enter => Some(Action::Confirm),
        KeyCode::Char('n') | KeyCode::Esc => Some(Action::Cancel),
        KeyCode::Tab => Some(Action::NextPage),
        KeyCode::BackTab => Some(Action::PrevPage),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::PageBack),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::PageForward),
        KeyCode::Char(c @ '1'..='9') => Some(Action::SortColumn(c as usize - '1' as usize)),
        _ => None,
    }
}
