//! User interface components and views.
//!
//! Reusable widgets live in `components`; each screen of the console is a
//! view in `views`.

mod components;
pub mod theme;
mod views;

pub use components::{
    centered_rect, highlight_text, render_context_help, ActionSet, ConfirmAction, ConfirmDialog,
    DataTable, ErrorDialog, Notification, NotificationManager, NotificationType, PageButton,
    PageSize, RowAction, TableAction, TableBody, TextInput, ACTIONS_HEADER, EMPTY_MESSAGE,
};
pub use views::{
    admin_table, division_table, logbook_table, trainee_table, DashboardAction, DashboardView,
    DetailAction, FormAction, FormView, HelpAction, HelpView, ListAction, ListView,
    TableOptions, TraineeDetailView, LOADING_MESSAGE,
};
