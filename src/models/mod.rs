//! Record types managed by the console.
//!
//! Every type shown in a [`DataTable`](crate::ui::DataTable) implements
//! [`Record`], which exposes its identifier and the display values the
//! search bar matches against.

mod division;
mod logbook;
mod user;

pub use division::Division;
pub use logbook::{Logbook, Session, DATE_FORMAT, DATE_TIME_FORMAT, TIME_FORMAT};
pub use user::{Role, TraineeType, User, UNDEFINED_DIVISION};

/// A row that can be shown in the data table.
pub trait Record {
    /// The identifier passed to row actions.
    fn id(&self) -> &str;

    /// Display values the search term is matched against.
    ///
    /// Only values an operator can see should be listed here, so a search
    /// never matches on internal representations.
    fn search_fields(&self) -> Vec<String>;

    /// An associated resource (such as a photo) to clean up on delete.
    fn resource_locator(&self) -> Option<&str> {
        None
    }
}

/// The kinds of records the console manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Trainee,
    Admin,
    Division,
    Logbook,
}

impl RecordKind {
    /// Noun used in messages, such as "delete this trainee".
    pub fn noun(&self) -> &'static str {
        match self {
            RecordKind::Trainee => "trainee",
            RecordKind::Admin => "admin",
            RecordKind::Division => "division",
            RecordKind::Logbook => "logbook",
        }
    }

    /// The noun at the start of a title or sentence.
    pub fn title(&self) -> &'static str {
        match self {
            RecordKind::Trainee => "Trainee",
            RecordKind::Admin => "Admin",
            RecordKind::Division => "Division",
            RecordKind::Logbook => "Logbook",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_is_capitalized_noun() {
        for kind in [
            RecordKind::Trainee,
            RecordKind::Admin,
            RecordKind::Division,
            RecordKind::Logbook,
        ] {
            let noun = kind.noun();
            assert_eq!(kind.title().to_lowercase(), noun);
            assert!(kind.title().starts_with(|c: char| c.is_uppercase()));
        }
    }
}
