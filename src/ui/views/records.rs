//! Table setups for each record list.

use ratatui::{
    style::Style,
    text::{Line, Span},
    widgets::Cell,
};

use crate::events::KeyBindings;
use crate::models::{Division, Logbook, Record, User};
use crate::ui::components::{highlight_text, ActionSet, DataTable, PageSize};
use crate::ui::theme;

/// Paging and key settings shared by every table.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableOptions {
    pub page_size: PageSize,
    pub keys: KeyBindings,
}

fn headers(names: &[&str]) -> Vec<String> {
    names.iter().map(|h| h.to_string()).collect()
}

fn finish<R: Record>(table: DataTable<R>, options: TableOptions) -> DataTable<R> {
    table
        .with_page_size(options.page_size)
        .with_key_bindings(options.keys)
}

fn styled(line: Line<'static>, style: Style) -> Line<'static> {
    line.patch_style(style)
}

fn active_cell(active: bool) -> Cell<'static> {
    Cell::from(Line::from(Span::styled(
        theme::active_icon(active),
        theme::active_style(active),
    )))
}

/// Trainees: name, division, type and active flag. View, edit and delete.
pub fn trainee_table(options: TableOptions) -> DataTable<User> {
    let table = DataTable::new(
        headers(&["Name", "Division", "Trainee Type", "Active"]),
        |user: &User, term: &str| {
            vec![
                Cell::from(highlight_text(&user.name, term)),
                Cell::from(styled(
                    highlight_text(user.division_label(), term),
                    theme::division_style(user.division_name().is_some()),
                )),
                Cell::from(styled(
                    highlight_text(user.trainee_type_label(), term),
                    theme::trainee_type_style(user.trainee_type),
                )),
                active_cell(user.is_active),
            ]
        },
    )
    .with_actions(ActionSet::ALL);
    finish(table, options)
}

/// Administrators. The action column only exists for super administrators.
pub fn admin_table(options: TableOptions, super_admin: bool) -> DataTable<User> {
    let table = DataTable::new(
        headers(&["Name", "Division", "Role", "Email", "Active"]),
        |user: &User, term: &str| {
            vec![
                Cell::from(highlight_text(&user.name, term)),
                Cell::from(styled(
                    highlight_text(user.division_label(), term),
                    theme::division_style(user.division_name().is_some()),
                )),
                Cell::from(styled(
                    highlight_text(user.role.label(), term),
                    theme::role_style(user.role),
                )),
                Cell::from(highlight_text(&user.email, term)),
                active_cell(user.is_active),
            ]
        },
    )
    .with_actions(ActionSet::EDIT_DELETE)
    .with_show_actions(super_admin);
    finish(table, options)
}

/// Divisions in code order. Edit and delete.
pub fn division_table(options: TableOptions) -> DataTable<Division> {
    let table = DataTable::new(headers(&["Division"]), |division: &Division, term: &str| {
        vec![Cell::from(highlight_text(&division.name, term))]
    })
    .with_actions(ActionSet::EDIT_DELETE);
    finish(table, options)
}

/// A trainee's logbooks, newest first. Edit and delete.
pub fn logbook_table(options: TableOptions) -> DataTable<Logbook> {
    let table = DataTable::new(
        headers(&["Date", "Check In", "Check Out", "Location"]),
        |logbook: &Logbook, term: &str| {
            vec![
                Cell::from(highlight_text(&logbook.date_label(), term)),
                Cell::from(highlight_text(&logbook.check_in_label(), term)),
                Cell::from(highlight_text(&logbook.check_out_label(), term)),
                Cell::from(highlight_text(logbook.location_label(), term)),
            ]
        },
    )
    .with_actions(ActionSet::EDIT_DELETE);
    finish(table, options)
}
