//! A titled, loadable list screen around a [`DataTable`].

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::models::Record;
use crate::ui::components::{DataTable, TableAction};
use crate::ui::theme;

/// Text shown while a screen waits for its data.
pub const LOADING_MESSAGE: &str = "Loading...";

/// Actions that can be returned from a list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListAction {
    /// An action on a row.
    Row(TableAction),
    /// Open the add form.
    Add,
    /// Load the records again.
    Reload,
}

/// A list screen: a title, a loading state and the table itself.
pub struct ListView<R> {
    title: String,
    table: DataTable<R>,
    loading: bool,
    can_add: bool,
}

impl<R: Record> ListView<R> {
    /// Create a list view. It starts out loading.
    pub fn new(title: impl Into<String>, table: DataTable<R>) -> Self {
        Self {
            title: title.into(),
            table,
            loading: true,
            can_add: true,
        }
    }

    /// Set whether `a` opens the add form.
    pub fn with_add(mut self, can_add: bool) -> Self {
        self.can_add = can_add;
        self
    }

    /// Change whether `a` opens the add form.
    pub fn set_can_add(&mut self, can_add: bool) {
        self.can_add = can_add;
    }

    /// Check if the add action is offered.
    pub fn can_add(&self) -> bool {
        self.can_add
    }

    /// Mark the view as waiting for data.
    pub fn set_loading(&mut self) {
        self.loading = true;
    }

    /// Check if the view is waiting for data.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Replace the records and stop loading.
    pub fn set_records(&mut self, records: Vec<R>) {
        self.table.set_records(records);
        self.loading = false;
    }

    /// The underlying table.
    pub fn table(&self) -> &DataTable<R> {
        &self.table
    }

    /// The underlying table, mutably.
    pub fn table_mut(&mut self) -> &mut DataTable<R> {
        &mut self.table
    }

    /// Check if keystrokes currently go into the search bar.
    pub fn is_capturing_input(&self) -> bool {
        self.table.is_searching()
    }

    /// Handle keyboard input.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<ListAction> {
        if self.loading {
            return None;
        }

        if !self.table.is_searching() {
            match (key.code, key.modifiers) {
                (KeyCode::Char('a'), KeyModifiers::NONE) if self.can_add => {
                    return Some(ListAction::Add);
                }
                (KeyCode::Char('r'), KeyModifiers::NONE) => return Some(ListAction::Reload),
                _ => {}
            }
        }

        self.table.handle_input(key).map(ListAction::Row)
    }

    /// Render the list view.
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title = if self.loading {
            format!(" {} ", self.title)
        } else {
            format!(" {} ({}) ", self.title, self.table.records().len())
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.loading {
            frame.render_widget(
                Paragraph::new(LOADING_MESSAGE).alignment(Alignment::Center),
                inner,
            );
            return;
        }

        self.table.render(frame, inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Division;
    use crate::ui::components::ActionSet;
    use crate::ui::test_utils::buffer_text;
    use ratatui::{backend::TestBackend, widgets::Cell, Terminal};

    fn view() -> ListView<Division> {
        let table = DataTable::new(vec!["Division".to_string()], |d: &Division, _| {
            vec![Cell::from(d.name.clone())]
        })
        .with_actions(ActionSet::EDIT_DELETE);
        ListView::new("Divisions", table)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn division(id: &str, name: &str) -> Division {
        Division {
            id: id.to_string(),
            code: 1,
            name: name.to_string(),
        }
    }

    #[test]
    fn test_starts_loading_and_ignores_input() {
        let mut view = view();
        assert!(view.is_loading());
        assert_eq!(view.handle_input(key(KeyCode::Char('a'))), None);

        view.set_records(vec![]);
        assert!(!view.is_loading());
        assert_eq!(view.handle_input(key(KeyCode::Char('a'))), Some(ListAction::Add));
    }

    #[test]
    fn test_add_disabled() {
        let mut view = view().with_add(false);
        view.set_records(vec![]);
        assert_eq!(view.handle_input(key(KeyCode::Char('a'))), None);
    }

    #[test]
    fn test_row_actions_pass_through() {
        let mut view = view();
        view.set_records(vec![division("d1", "IT")]);
        assert_eq!(
            view.handle_input(key(KeyCode::Char('e'))),
            Some(ListAction::Row(TableAction::Edit("d1".to_string())))
        );
        // View is not in this table's action set
        assert_eq!(view.handle_input(key(KeyCode::Char('v'))), None);
    }

    #[test]
    fn test_search_captures_shortcut_keys() {
        let mut view = view();
        view.set_records(vec![division("d1", "IT")]);
        view.handle_input(key(KeyCode::Char('/')));
        assert!(view.is_capturing_input());
        assert_eq!(view.handle_input(key(KeyCode::Char('a'))), None);
        assert_eq!(view.table().search_term(), "a");
    }

    #[test]
    fn test_render_loading() {
        let mut view = view();
        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
        terminal
            .draw(|frame| view.render(frame, frame.area()))
            .unwrap();
        assert!(buffer_text(terminal.backend().buffer()).contains(LOADING_MESSAGE));
    }
}
