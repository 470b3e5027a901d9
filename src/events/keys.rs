//! Key binding definitions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Key binding configuration.
///
/// Arrow keys always work; `j`/`k`/`h`/`l` are only honoured with vim mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBindings {
    /// Whether vim-style bindings are enabled.
    pub vim_mode: bool,
}

impl KeyBindings {
    /// Create new key bindings.
    pub fn new(vim_mode: bool) -> Self {
        Self { vim_mode }
    }

    fn is_vim(&self, key: &KeyEvent, c: char) -> bool {
        self.vim_mode && key.code == KeyCode::Char(c) && key.modifiers == KeyModifiers::NONE
    }

    /// Move the selection down.
    pub fn is_down(&self, key: &KeyEvent) -> bool {
        key.code == KeyCode::Down || self.is_vim(key, 'j')
    }

    /// Move the selection up.
    pub fn is_up(&self, key: &KeyEvent) -> bool {
        key.code == KeyCode::Up || self.is_vim(key, 'k')
    }

    /// Go to the previous page.
    pub fn is_left(&self, key: &KeyEvent) -> bool {
        matches!(key.code, KeyCode::Left | KeyCode::Char('[')) || self.is_vim(key, 'h')
    }

    /// Go to the next page.
    pub fn is_right(&self, key: &KeyEvent) -> bool {
        matches!(key.code, KeyCode::Right | KeyCode::Char(']')) || self.is_vim(key, 'l')
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Where a key binding applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyContext {
    Global,
    Table,
    Dashboard,
    TraineeDetail,
    Form,
    Dialog,
}

impl KeyContext {
    /// Every context, in help panel order.
    pub const ALL: [KeyContext; 6] = [
        KeyContext::Global,
        KeyContext::Table,
        KeyContext::Dashboard,
        KeyContext::TraineeDetail,
        KeyContext::Form,
        KeyContext::Dialog,
    ];

    /// Section heading in the help panel.
    pub fn display(&self) -> &'static str {
        match self {
            KeyContext::Global => "Global",
            KeyContext::Table => "Lists",
            KeyContext::Dashboard => "Dashboard",
            KeyContext::TraineeDetail => "Trainee Detail",
            KeyContext::Form => "Forms",
            KeyContext::Dialog => "Dialogs",
        }
    }
}

/// A documented key binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keybinding {
    pub key: &'static str,
    pub description: &'static str,
    pub context: KeyContext,
}

const fn binding(key: &'static str, description: &'static str, context: KeyContext) -> Keybinding {
    Keybinding {
        key,
        description,
        context,
    }
}

const KEYBINDINGS: &[Keybinding] = &[
    binding("1-4", "Dashboard, trainees, admins, divisions", KeyContext::Global),
    binding("Tab/S-Tab", "Next / previous screen", KeyContext::Global),
    binding("?", "Toggle help", KeyContext::Global),
    binding("q", "Back, or quit from a top screen", KeyContext::Global),
    binding("Ctrl+c", "Quit", KeyContext::Global),
    binding("/", "Search", KeyContext::Table),
    binding("Esc", "Clear search", KeyContext::Table),
    binding("j/k ↑/↓", "Select row", KeyContext::Table),
    binding("h/l ←/→ [/]", "Previous / next page", KeyContext::Table),
    binding("g/G", "First / last page", KeyContext::Table),
    binding("s", "Cycle rows per page", KeyContext::Table),
    binding("Enter/v", "View row", KeyContext::Table),
    binding("e", "Edit row", KeyContext::Table),
    binding("d/Del", "Delete row", KeyContext::Table),
    binding("a", "Add record", KeyContext::Table),
    binding("r", "Reload", KeyContext::Table),
    binding("r", "Reload statistics", KeyContext::Dashboard),
    binding("a", "Add logbook", KeyContext::TraineeDetail),
    binding("p", "Edit trainee profile", KeyContext::TraineeDetail),
    binding("Tab/↓", "Next field", KeyContext::Form),
    binding("S-Tab/↑", "Previous field", KeyContext::Form),
    binding("Enter", "Save", KeyContext::Form),
    binding("Esc", "Cancel", KeyContext::Form),
    binding("y/n", "Confirm / cancel", KeyContext::Dialog),
    binding("←/→ Enter", "Choose a button", KeyContext::Dialog),
];

/// All key bindings grouped by context, in help panel order.
pub fn get_keybindings_grouped() -> Vec<(KeyContext, Vec<Keybinding>)> {
    KeyContext::ALL
        .into_iter()
        .map(|context| {
            let bindings = KEYBINDINGS
                .iter()
                .filter(|b| b.context == context)
                .cloned()
                .collect();
            (context, bindings)
        })
        .collect()
}

/// The one-line hint shown in the status bar for a context.
pub fn get_context_hints(context: KeyContext) -> &'static str {
    match context {
        KeyContext::Global | KeyContext::Table => {
            "[/] search  [j/k] select  [h/l] page  [v/e/d] view/edit/delete  [a] add  [?] help"
        }
        KeyContext::Dashboard => "[1-4] screens  [r] reload  [?] help  [q] quit",
        KeyContext::TraineeDetail => "[a] add logbook  [p] edit profile  [e/d] edit/delete  [q] back",
        KeyContext::Form => "[Tab] next field  [Enter] save  [Esc] cancel",
        KeyContext::Dialog => "[y] yes  [n] no",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_arrows_always_bound() {
        let keys = KeyBindings::new(false);
        assert!(keys.is_down(&key(KeyCode::Down)));
        assert!(keys.is_up(&key(KeyCode::Up)));
        assert!(keys.is_left(&key(KeyCode::Left)));
        assert!(keys.is_right(&key(KeyCode::Char(']'))));
    }

    #[test]
    fn test_vim_keys_follow_setting() {
        let vim = KeyBindings::new(true);
        let plain = KeyBindings::new(false);
        assert!(vim.is_down(&key(KeyCode::Char('j'))));
        assert!(!plain.is_down(&key(KeyCode::Char('j'))));
        assert!(vim.is_right(&key(KeyCode::Char('l'))));
        assert!(!plain.is_left(&key(KeyCode::Char('h'))));
    }

    #[test]
    fn test_every_context_documented() {
        let grouped = get_keybindings_grouped();
        assert_eq!(grouped.len(), KeyContext::ALL.len());
        assert!(grouped.iter().all(|(_, bindings)| !bindings.is_empty()));
    }
}
