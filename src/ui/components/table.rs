//! Generic data table with search, pagination and row actions.
//!
//! The table owns a copy of the caller's records but never mutates them. It
//! filters them with the search term, slices the filtered set into pages and
//! delegates cell rendering to a caller-supplied row renderer. Which row
//! actions exist is decided by an explicit [`ActionSet`].
//!
//! # Keys
//!
//! - `/` starts typing a search term, `Enter` keeps it, `Esc` clears it
//! - `j`/`k` or arrows move the row selection within the page
//! - `h`/`l`, `[`/`]` or arrows change page, `g`/`G` jump to first/last page
//! - `s` cycles the page size (20, 40, 50, 100)
//! - `Enter`/`v` view, `e` edit, `d`/`Delete` delete the selected row

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};
use tracing::trace;

use super::pagination::{PageButton, PageSize, Pagination};
use super::search_bar::{matches_any, render_search_bar, SearchInput};
use crate::events::KeyBindings;
use crate::models::Record;
use crate::ui::theme;

/// Message shown in place of rows when nothing is on the current page.
pub const EMPTY_MESSAGE: &str = "No data available";

/// Header label of the action column.
pub const ACTIONS_HEADER: &str = "Actions";

/// Renders the cells of one row.
///
/// Receives the record and the current search term (for highlighting).
pub type RowRenderer<R> = Box<dyn Fn(&R, &str) -> Vec<Cell<'static>>>;

/// An action that can be applied to a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    View,
    Edit,
    Delete,
}

impl RowAction {
    /// Label shown in the action column.
    pub fn label(&self) -> &'static str {
        match self {
            RowAction::View => "[v]iew",
            RowAction::Edit => "[e]dit",
            RowAction::Delete => "[d]elete",
        }
    }
}

/// Which row actions a table offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActionSet {
    pub view: bool,
    pub edit: bool,
    pub delete: bool,
}

impl ActionSet {
    /// No row actions.
    pub const NONE: ActionSet = ActionSet {
        view: false,
        edit: false,
        delete: false,
    };

    /// View, edit and delete.
    pub const ALL: ActionSet = ActionSet {
        view: true,
        edit: true,
        delete: true,
    };

    /// Edit and delete only.
    pub const EDIT_DELETE: ActionSet = ActionSet {
        view: false,
        edit: true,
        delete: true,
    };

    /// Check whether an action is enabled.
    pub fn allows(&self, action: RowAction) -> bool {
        match action {
            RowAction::View => self.view,
            RowAction::Edit => self.edit,
            RowAction::Delete => self.delete,
        }
    }

    /// Enabled actions in display order.
    pub fn enabled(&self) -> Vec<RowAction> {
        [RowAction::View, RowAction::Edit, RowAction::Delete]
            .into_iter()
            .filter(|action| self.allows(*action))
            .collect()
    }

    /// Check if no action is enabled.
    pub fn is_empty(&self) -> bool {
        !(self.view || self.edit || self.delete)
    }
}

/// An action triggered on a row, carrying the record identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableAction {
    View(String),
    Edit(String),
    /// Delete a record, with its associated resource for cleanup.
    Delete {
        id: String,
        locator: Option<String>,
    },
}

/// What the table body shows for the current page.
#[derive(Debug, PartialEq)]
pub enum TableBody<'a, R> {
    /// The records on the current page.
    Rows(Vec<&'a R>),
    /// A single placeholder row spanning every column.
    Empty { colspan: usize },
}

/// A searchable, paginated table over records of type `R`.
pub struct DataTable<R> {
    headers: Vec<String>,
    records: Vec<R>,
    render_row: RowRenderer<R>,
    actions: ActionSet,
    show_actions: bool,
    search: SearchInput,
    pagination: Pagination,
    /// Indices into `records` that match the search term.
    filtered: Vec<usize>,
    /// Selected row within the current page.
    selected: usize,
    table_state: TableState,
    keys: KeyBindings,
}

impl<R: Record> DataTable<R> {
    /// Create an empty table with the given headers and row renderer.
    ///
    /// Starts with an empty search term on page 1 with 20 rows per page,
    /// no row actions and the action column shown.
    pub fn new<F>(headers: Vec<String>, render_row: F) -> Self
    where
        F: Fn(&R, &str) -> Vec<Cell<'static>> + 'static,
    {
        Self {
            headers,
            records: Vec::new(),
            render_row: Box::new(render_row),
            actions: ActionSet::NONE,
            show_actions: true,
            search: SearchInput::new(),
            pagination: Pagination::default(),
            filtered: Vec::new(),
            selected: 0,
            table_state: TableState::default(),
            keys: KeyBindings::default(),
        }
    }

    /// Set the enabled row actions.
    pub fn with_actions(mut self, actions: ActionSet) -> Self {
        self.actions = actions;
        self
    }

    /// Set whether the action column is shown at all.
    pub fn with_show_actions(mut self, show_actions: bool) -> Self {
        self.show_actions = show_actions;
        self
    }

    /// Set the initial page size.
    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.pagination.set_page_size(page_size);
        self
    }

    /// Set the key bindings used for navigation.
    pub fn with_key_bindings(mut self, keys: KeyBindings) -> Self {
        self.keys = keys;
        self
    }

    /// Replace the enabled row actions.
    pub fn set_actions(&mut self, actions: ActionSet) {
        self.actions = actions;
    }

    /// Show or hide the action column.
    pub fn set_show_actions(&mut self, show_actions: bool) {
        self.show_actions = show_actions;
    }

    /// Replace the records.
    ///
    /// The search term is kept and the current page is pulled back into
    /// range if the new set is smaller. The selection stays on its row
    /// unless the page moved.
    pub fn set_records(&mut self, records: Vec<R>) {
        let page = self.current_page();
        self.records = records;
        self.refilter();
        self.pagination.clamp(self.filtered.len());
        if self.current_page() == page {
            self.clamp_selection();
        } else {
            self.select_first();
        }
    }

    /// All records, unfiltered.
    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Column header labels (without the action column).
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of rendered columns, including the action column if shown.
    pub fn column_count(&self) -> usize {
        self.headers.len() + usize::from(self.show_actions)
    }

    /// Check if the action column is rendered.
    pub fn shows_actions(&self) -> bool {
        self.show_actions
    }

    /// Actions actually offered to the user.
    ///
    /// Empty when the action column is hidden, whatever the action set says.
    pub fn visible_actions(&self) -> ActionSet {
        if self.show_actions {
            self.actions
        } else {
            ActionSet::NONE
        }
    }

    // ========================================================================
    // Search
    // ========================================================================

    /// The current search term.
    pub fn search_term(&self) -> &str {
        self.search.query()
    }

    /// Check if the search bar is accepting keystrokes.
    pub fn is_searching(&self) -> bool {
        self.search.is_active()
    }

    /// Replace the search term and return to page 1.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search.set_query(term);
        self.on_search_changed();
    }

    /// Check whether a record matches the current search term.
    pub fn matches(&self, record: &R) -> bool {
        matches_any(&record.search_fields(), &self.search.normalized())
    }

    fn on_search_changed(&mut self) {
        self.refilter();
        self.pagination.reset();
        self.select_first();
        trace!(term = %self.search.query(), matches = self.filtered.len(), "Search term changed");
    }

    fn refilter(&mut self) {
        let needle = self.search.normalized();
        self.filtered = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, record)| matches_any(&record.search_fields(), &needle))
            .map(|(i, _)| i)
            .collect();
    }

    /// Number of records matching the search term.
    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    /// Records matching the search term, in their original order.
    pub fn filtered(&self) -> Vec<&R> {
        self.filtered.iter().map(|&i| &self.records[i]).collect()
    }

    // ========================================================================
    // Pagination
    // ========================================================================

    /// The current 1-based page.
    pub fn current_page(&self) -> usize {
        self.pagination.current_page()
    }

    /// The active page size.
    pub fn page_size(&self) -> PageSize {
        self.pagination.page_size()
    }

    /// Total pages: `ceil(filtered / page_size)`.
    pub fn total_pages(&self) -> usize {
        self.pagination.total_pages(self.filtered.len())
    }

    /// Change the page size and return to page 1.
    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.pagination.set_page_size(page_size);
        self.select_first();
    }

    /// Jump to a page, clamped into the valid range.
    pub fn go_to_page(&mut self, page: usize) {
        if self.pagination.go_to(page, self.filtered.len()) {
            self.select_first();
        }
    }

    /// Go to the next page. No-op on the last page.
    pub fn next_page(&mut self) {
        if self.pagination.next(self.filtered.len()) {
            self.select_first();
        }
    }

    /// Go to the previous page. No-op on the first page.
    pub fn previous_page(&mut self) {
        if self.pagination.previous() {
            self.select_first();
        }
    }

    /// Whether the previous-page control is enabled.
    pub fn can_go_previous(&self) -> bool {
        self.pagination.can_go_previous()
    }

    /// Whether the next-page control is enabled.
    pub fn can_go_next(&self) -> bool {
        self.pagination.can_go_next(self.filtered.len())
    }

    /// One button per page.
    pub fn page_buttons(&self) -> Vec<PageButton> {
        self.pagination.buttons(self.filtered.len())
    }

    /// Records on the current page.
    pub fn page_items(&self) -> Vec<&R> {
        let bounds = self.pagination.bounds(self.filtered.len());
        self.filtered[bounds]
            .iter()
            .map(|&i| &self.records[i])
            .collect()
    }

    /// The table body for the current page.
    pub fn body(&self) -> TableBody<'_, R> {
        let items = self.page_items();
        if items.is_empty() {
            TableBody::Empty {
                colspan: self.column_count(),
            }
        } else {
            TableBody::Rows(items)
        }
    }

    /// "Showing X to Y of Z results" for the current page.
    pub fn range_summary(&self) -> String {
        let total = self.filtered.len();
        let bounds = self.pagination.bounds(total);
        if bounds.is_empty() {
            return format!("Showing 0 to 0 of {} results", total);
        }
        format!(
            "Showing {} to {} of {} results",
            bounds.start + 1,
            bounds.end,
            total
        )
    }

    // ========================================================================
    // Selection and actions
    // ========================================================================

    /// Index of the selected row within the current page.
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// The selected record, if the page has any rows.
    pub fn selected_record(&self) -> Option<&R> {
        self.page_items().get(self.selected).copied()
    }

    /// Select the next row on the page.
    pub fn select_next(&mut self) {
        let len = self.page_items().len();
        if len > 0 && self.selected + 1 < len {
            self.selected += 1;
        }
    }

    /// Select the previous row on the page.
    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn select_first(&mut self) {
        self.selected = 0;
    }

    fn clamp_selection(&mut self) {
        let len = self.page_items().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    /// Trigger an action on the selected row.
    ///
    /// Returns `None` if the action is not offered or no row is selected.
    pub fn trigger(&self, action: RowAction) -> Option<TableAction> {
        if !self.visible_actions().allows(action) {
            return None;
        }
        let record = self.selected_record()?;
        let id = record.id().to_string();
        Some(match action {
            RowAction::View => TableAction::View(id),
            RowAction::Edit => TableAction::Edit(id),
            RowAction::Delete => TableAction::Delete {
                id,
                locator: record.resource_locator().map(str::to_string),
            },
        })
    }

    /// Handle keyboard input.
    ///
    /// Returns an action when the user triggers one on the selected row.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<TableAction> {
        if self.search.is_active() {
            self.handle_search_input(key);
            return None;
        }

        if self.keys.is_down(&key) {
            self.select_next();
            return None;
        }
        if self.keys.is_up(&key) {
            self.select_previous();
            return None;
        }
        if self.keys.is_right(&key) {
            self.next_page();
            return None;
        }
        if self.keys.is_left(&key) {
            self.previous_page();
            return None;
        }

        match (key.code, key.modifiers) {
            (KeyCode::Char('/'), _) => {
                self.search.activate();
                None
            }
            (KeyCode::Esc, _) if !self.search.is_empty() => {
                self.search.clear();
                self.on_search_changed();
                None
            }
            (KeyCode::Char('g'), KeyModifiers::NONE) | (KeyCode::Home, _) => {
                self.go_to_page(1);
                None
            }
            (KeyCode::Char('G'), _) | (KeyCode::End, _) => {
                self.go_to_page(self.total_pages());
                None
            }
            (KeyCode::Char('s'), KeyModifiers::NONE) => {
                self.set_page_size(self.page_size().next());
                None
            }
            (KeyCode::Enter, _) | (KeyCode::Char('v'), KeyModifiers::NONE) => {
                self.trigger(RowAction::View)
            }
            (KeyCode::Char('e'), KeyModifiers::NONE) => self.trigger(RowAction::Edit),
            (KeyCode::Char('d'), KeyModifiers::NONE) | (KeyCode::Delete, _) => {
                self.trigger(RowAction::Delete)
            }
            _ => None,
        }
    }

    fn handle_search_input(&mut self, key: KeyEvent) {
        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => {
                self.search.clear();
                self.on_search_changed();
            }
            (KeyCode::Enter, _) => self.search.deactivate(),
            (KeyCode::Backspace, _) => {
                if self.search.pop_char().is_some() {
                    self.on_search_changed();
                }
            }
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                self.search.push_char(c);
                self.on_search_changed();
            }
            _ => {}
        }
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Render the search bar, the table and the pagination footer.
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Search bar
                Constraint::Min(3),    // Table
                Constraint::Length(1), // Pagination
            ])
            .split(area);

        render_search_bar(frame, chunks[0], &self.search);
        self.render_table(frame, chunks[1]);
        self.render_pagination(frame, chunks[2]);
    }

    fn action_column_width(&self) -> u16 {
        let labels: usize = self
            .actions
            .enabled()
            .iter()
            .map(|a| a.label().len() + 1)
            .sum();
        (labels.max(ACTIONS_HEADER.len()) as u16) + 1
    }

    fn render_table(&mut self, frame: &mut Frame, area: Rect) {
        let mut widths: Vec<Constraint> = self.headers.iter().map(|_| Constraint::Fill(1)).collect();
        let mut header_cells: Vec<Cell> = self
            .headers
            .iter()
            .map(|h| Cell::from(h.clone()))
            .collect();
        if self.show_actions {
            widths.push(Constraint::Length(self.action_column_width()));
            header_cells.push(Cell::from(ACTIONS_HEADER));
        }
        let header = Row::new(header_cells).style(theme::header());

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT));

        let term = self.search.query().to_string();
        let actions_label = self
            .visible_actions()
            .enabled()
            .iter()
            .map(|a| a.label())
            .collect::<Vec<_>>()
            .join(" ");

        let rows: Vec<Row> = match self.body() {
            TableBody::Rows(items) => items
                .into_iter()
                .map(|record| {
                    let mut cells = (self.render_row)(record, &term);
                    if self.show_actions {
                        cells.push(Cell::from(actions_label.clone()));
                    }
                    Row::new(cells)
                })
                .collect(),
            TableBody::Empty { .. } => Vec::new(),
        };
        let is_empty = rows.is_empty();

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .highlight_style(theme::selected_row());

        self.table_state
            .select(if is_empty { None } else { Some(self.selected) });
        frame.render_stateful_widget(table, area, &mut self.table_state);

        if is_empty {
            // The placeholder spans the whole body below the header.
            let body = Rect {
                x: area.x + 1,
                y: area.y + 2,
                width: area.width.saturating_sub(2),
                height: area.height.saturating_sub(3).max(1),
            };
            if body.y < area.y + area.height {
                let placeholder = Paragraph::new(EMPTY_MESSAGE).alignment(Alignment::Center);
                frame.render_widget(placeholder, body);
            }
        }
    }

    fn render_pagination(&self, frame: &mut Frame, area: Rect) {
        let enabled = Style::default();
        let mut spans = vec![
            Span::raw(self.range_summary()),
            Span::raw("  Rows: "),
            Span::styled(
                self.page_size().to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                "‹ Prev",
                if self.can_go_previous() {
                    enabled
                } else {
                    theme::disabled()
                },
            ),
        ];

        for button in self.page_buttons() {
            spans.push(Span::raw(" "));
            if button.is_current {
                spans.push(Span::styled(
                    format!("[{}]", button.number),
                    Style::default()
                        .fg(theme::ACCENT)
                        .add_modifier(Modifier::BOLD),
                ));
            } else {
                spans.push(Span::raw(button.number.to_string()));
            }
        }

        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            "Next ›",
            if self.can_go_next() {
                enabled
            } else {
                theme::disabled()
            },
        ));

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::test_utils::buffer_text;
    use ratatui::{backend::TestBackend, Terminal};

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: String,
        name: String,
        photo: Option<String>,
    }

    impl Record for Item {
        fn id(&self) -> &str {
            &self.id
        }

        fn search_fields(&self) -> Vec<String> {
            vec![self.name.clone()]
        }

        fn resource_locator(&self) -> Option<&str> {
            self.photo.as_deref()
        }
    }

    fn items(count: usize) -> Vec<Item> {
        (0..count)
            .map(|i| Item {
                id: format!("id-{}", i),
                name: format!("Trainee {:02}", i),
                photo: None,
            })
            .collect()
    }

    fn table_with(count: usize) -> DataTable<Item> {
        let mut table = DataTable::new(vec!["Name".to_string()], |item: &Item, _| {
            vec![Cell::from(item.name.clone())]
        })
        .with_actions(ActionSet::ALL);
        table.set_records(items(count));
        table
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn render_to_string(table: &mut DataTable<Item>, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| table.render(frame, frame.area())).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn test_defaults() {
        let table = table_with(0);
        assert_eq!(table.search_term(), "");
        assert_eq!(table.current_page(), 1);
        assert_eq!(table.page_size(), PageSize::Twenty);
        assert!(table.shows_actions());
    }

    #[test]
    fn test_forty_five_records_paginate_into_three_pages() {
        let mut table = table_with(45);
        assert_eq!(table.total_pages(), 3);

        let page: Vec<&str> = table.page_items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(page.len(), 20);
        assert_eq!(page[0], "id-0");
        assert_eq!(page[19], "id-19");

        table.go_to_page(3);
        let page: Vec<&str> = table.page_items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(page, vec!["id-40", "id-41", "id-42", "id-43", "id-44"]);
    }

    #[test]
    fn test_displayed_set_is_filtered_slice() {
        let mut table = table_with(45);
        table.set_search_term("trainee 1");
        // Trainee 10..=19 match
        let filtered: Vec<&Item> = table.filtered();
        assert_eq!(filtered.len(), 10);
        assert!(filtered.iter().all(|i| table.matches(i)));
        assert_eq!(table.page_items(), filtered);
    }

    #[test]
    fn test_search_resets_page() {
        let mut table = table_with(45);
        table.go_to_page(3);
        assert_eq!(table.current_page(), 3);
        table.set_search_term("trainee");
        assert_eq!(table.current_page(), 1);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let mut table = table_with(5);
        table.set_search_term("TRAINEE 03");
        assert_eq!(table.filtered_len(), 1);
        table.set_search_term("");
        assert_eq!(table.filtered_len(), 5);
    }

    #[test]
    fn test_search_matching_two_of_forty_five() {
        let mut records = items(45);
        records[7].name = "Unique Alpha".to_string();
        records[31].name = "unique beta".to_string();

        let mut table = table_with(0);
        table.set_records(records);
        table.go_to_page(2);
        table.set_search_term("unique");

        assert_eq!(table.filtered_len(), 2);
        assert_eq!(table.current_page(), 1);
        assert_eq!(table.page_buttons().len(), 1);
    }

    #[test]
    fn test_page_size_change_resets_and_recomputes() {
        for size in PageSize::ALL {
            let mut table = table_with(250);
            table.go_to_page(2);
            table.set_page_size(size);
            assert_eq!(table.current_page(), 1);
            assert_eq!(table.total_pages(), 250usize.div_ceil(size.value()));
        }
    }

    #[test]
    fn test_boundary_controls() {
        let mut table = table_with(45);
        assert!(!table.can_go_previous());
        assert!(table.can_go_next());

        table.previous_page();
        assert_eq!(table.current_page(), 1);

        table.go_to_page(3);
        assert!(table.can_go_previous());
        assert!(!table.can_go_next());
        table.next_page();
        assert_eq!(table.current_page(), 3);
    }

    #[test]
    fn test_empty_body_spans_all_columns() {
        let table = table_with(0);
        assert_eq!(table.body(), TableBody::Empty { colspan: 2 });

        let hidden = table_with(0).with_show_actions(false);
        assert_eq!(hidden.body(), TableBody::Empty { colspan: 1 });
    }

    #[test]
    fn test_empty_body_when_everything_filtered_out() {
        let mut table = table_with(10);
        table.set_search_term("nobody");
        assert_eq!(table.body(), TableBody::Empty { colspan: 2 });
        assert_eq!(table.range_summary(), "Showing 0 to 0 of 0 results");
    }

    #[test]
    fn test_show_actions_false_hides_actions() {
        let table = table_with(3).with_show_actions(false);
        assert_eq!(table.column_count(), 1);
        assert!(table.visible_actions().is_empty());
        assert_eq!(table.trigger(RowAction::Edit), None);
        assert_eq!(table.trigger(RowAction::Delete), None);
    }

    #[test]
    fn test_action_set_decides_actions() {
        let table = table_with(3).with_actions(ActionSet::EDIT_DELETE);
        assert_eq!(table.trigger(RowAction::View), None);
        assert_eq!(
            table.trigger(RowAction::Edit),
            Some(TableAction::Edit("id-0".to_string()))
        );
    }

    #[test]
    fn test_delete_carries_locator() {
        let mut records = items(2);
        records[0].photo = Some("photos/a.png".to_string());
        let mut table = table_with(0);
        table.set_records(records);

        assert_eq!(
            table.handle_input(key(KeyCode::Char('d'))),
            Some(TableAction::Delete {
                id: "id-0".to_string(),
                locator: Some("photos/a.png".to_string()),
            })
        );
    }

    #[test]
    fn test_range_summary() {
        let mut table = table_with(45);
        assert_eq!(table.range_summary(), "Showing 1 to 20 of 45 results");
        table.go_to_page(3);
        assert_eq!(table.range_summary(), "Showing 41 to 45 of 45 results");
    }

    #[test]
    fn test_set_records_clamps_page() {
        let mut table = table_with(45);
        table.set_search_term("trainee");
        table.go_to_page(3);
        table.set_records(items(25));
        assert_eq!(table.current_page(), 2);
        assert_eq!(table.search_term(), "trainee");
    }

    #[test]
    fn test_selection_moves_within_page() {
        let mut table = table_with(3);
        table.handle_input(key(KeyCode::Char('j')));
        table.handle_input(key(KeyCode::Char('j')));
        table.handle_input(key(KeyCode::Char('j')));
        assert_eq!(table.selected_index(), 2);
        assert_eq!(
            table.handle_input(key(KeyCode::Enter)),
            Some(TableAction::View("id-2".to_string()))
        );
        table.handle_input(key(KeyCode::Up));
        assert_eq!(table.selected_index(), 1);
    }

    #[test]
    fn test_page_change_resets_selection() {
        let mut table = table_with(45);
        table.handle_input(key(KeyCode::Down));
        table.handle_input(key(KeyCode::Down));
        assert_eq!(table.selected_index(), 2);

        table.next_page();
        assert_eq!(table.current_page(), 2);
        assert_eq!(table.selected_index(), 0);
        assert_eq!(table.selected_record().map(|i| i.id.as_str()), Some("id-20"));

        table.handle_input(key(KeyCode::Down));
        table.previous_page();
        assert_eq!(table.selected_index(), 0);

        table.handle_input(key(KeyCode::Down));
        table.go_to_page(3);
        assert_eq!(table.selected_index(), 0);
    }

    #[test]
    fn test_boundary_page_keeps_selection() {
        let mut table = table_with(45);
        table.go_to_page(3);
        table.handle_input(key(KeyCode::Down));
        table.next_page();
        assert_eq!(table.current_page(), 3);
        assert_eq!(table.selected_index(), 1);
    }

    #[test]
    fn test_shrinking_records_clamps_selection() {
        let mut table = table_with(10);
        for _ in 0..7 {
            table.handle_input(key(KeyCode::Down));
        }
        assert_eq!(table.selected_index(), 7);

        table.set_records(items(4));
        assert_eq!(table.selected_index(), 3);
        assert_eq!(table.selected_record().map(|i| i.id.as_str()), Some("id-3"));

        table.set_records(Vec::new());
        assert_eq!(table.selected_index(), 0);
        assert_eq!(table.selected_record(), None);
    }

    #[test]
    fn test_clamped_page_resets_selection() {
        let mut table = table_with(45);
        table.go_to_page(3);
        table.handle_input(key(KeyCode::Down));
        table.handle_input(key(KeyCode::Down));

        table.set_records(items(30));
        assert_eq!(table.current_page(), 2);
        assert_eq!(table.selected_index(), 0);
    }

    #[test]
    fn test_typed_search_resets_page_each_keystroke() {
        let mut table = table_with(45);
        table.handle_input(key(KeyCode::Char(']')));
        assert_eq!(table.current_page(), 2);

        table.handle_input(key(KeyCode::Char('/')));
        assert!(table.is_searching());
        table.handle_input(key(KeyCode::Char('4')));
        assert_eq!(table.current_page(), 1);
        assert_eq!(table.search_term(), "4");
        // 'd' goes into the term, it does not delete
        assert_eq!(table.handle_input(key(KeyCode::Char('d'))), None);
        assert_eq!(table.search_term(), "4d");

        table.handle_input(key(KeyCode::Backspace));
        table.handle_input(key(KeyCode::Enter));
        assert!(!table.is_searching());
        assert_eq!(table.search_term(), "4");
        assert_eq!(table.filtered_len(), 5); // 04, 14, 24, 34, 44
    }

    #[test]
    fn test_escape_clears_search() {
        let mut table = table_with(45);
        table.set_search_term("trainee 0");
        table.handle_input(key(KeyCode::Esc));
        assert_eq!(table.search_term(), "");
        assert_eq!(table.filtered_len(), 45);
    }

    #[test]
    fn test_cycle_page_size_key() {
        let mut table = table_with(45);
        table.go_to_page(2);
        table.handle_input(key(KeyCode::Char('s')));
        assert_eq!(table.page_size(), PageSize::Forty);
        assert_eq!(table.current_page(), 1);
        assert_eq!(table.total_pages(), 2);
    }

    #[test]
    fn test_first_and_last_page_keys() {
        let mut table = table_with(45);
        table.handle_input(key(KeyCode::Char('G')));
        assert_eq!(table.current_page(), 3);
        table.handle_input(key(KeyCode::Char('g')));
        assert_eq!(table.current_page(), 1);
    }

    #[test]
    fn test_render_empty_state() {
        let mut table = table_with(0);
        let screen = render_to_string(&mut table, 80, 10);
        assert!(screen.contains(EMPTY_MESSAGE));
        assert!(screen.contains("Actions"));
    }

    #[test]
    fn test_render_without_action_column() {
        let mut table = table_with(3).with_show_actions(false);
        let screen = render_to_string(&mut table, 80, 10);
        assert!(screen.contains("Trainee 00"));
        assert!(!screen.contains("Actions"));
        assert!(!screen.contains("[e]dit"));
    }

    #[test]
    fn test_render_rows_and_footer() {
        let mut table = table_with(45);
        let screen = render_to_string(&mut table, 100, 30);
        assert!(screen.contains("Trainee 00"));
        assert!(screen.contains("[v]iew [e]dit [d]elete"));
        assert!(screen.contains("Showing 1 to 20 of 45 results"));
        assert!(screen.contains("[1] 2 3"));
    }
}
