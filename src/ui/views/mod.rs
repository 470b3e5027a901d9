//! Application views (screens).

mod dashboard;
mod form;
mod help;
mod list;
mod records;
mod trainee_detail;

pub use dashboard::{DashboardAction, DashboardView};
pub use form::{FormAction, FormView};
pub use help::{HelpAction, HelpView};
pub use list::{ListAction, ListView, LOADING_MESSAGE};
pub use records::{admin_table, division_table, logbook_table, trainee_table, TableOptions};
pub use trainee_detail::{DetailAction, TraineeDetailView};
