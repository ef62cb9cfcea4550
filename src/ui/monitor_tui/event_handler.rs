use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Commands the dashboard reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Switch between dark and light palettes
    ToggleTheme,
    /// Leave the dashboard
    Quit,
    /// Empty the log pane
    ClearLog,
    /// Show or hide the log pane
    ToggleLog,
    /// Toggle help overlay
    ToggleHelp,
    /// Show the view bound to this 1-based slot
    ShowView(usize),
    /// No action
    None,
}

/// Translate a key press into a command.
pub fn map_key(key: KeyEvent) -> AppCommand {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('l') => AppCommand::ClearLog,
            KeyCode::Char('c') => AppCommand::Quit,
            _ => AppCommand::None,
        };
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => AppCommand::Quit,
        KeyCode::Char('d') => AppCommand::ToggleTheme,
        KeyCode::Char('l') => AppCommand::ToggleLog,
        KeyCode::Char('?') | KeyCode::Char('h') => AppCommand::ToggleHelp,
        KeyCode::Char(c @ '1'..='9') => AppCommand::ShowView(c as usize - '0' as usize),
        _ => AppCommand::None,
    }
}
