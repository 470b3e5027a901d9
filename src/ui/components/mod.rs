//! Reusable UI components.

mod help_bar;
mod input;
mod modal;
mod notification;
mod pagination;
mod search_bar;
mod table;

pub use help_bar::render_context_help;
pub use input::TextInput;
pub use modal::{centered_rect, ConfirmAction, ConfirmDialog, ErrorDialog};
pub use notification::{Notification, NotificationManager, NotificationType};
pub use pagination::{PageButton, PageSize, Pagination};
pub use search_bar::{highlight_text, matches_any, SearchInput};
pub use table::{
    ActionSet, DataTable, RowAction, RowRenderer, TableAction, TableBody, ACTIONS_HEADER,
    EMPTY_MESSAGE,
};
