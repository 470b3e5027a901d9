//! Daily attendance logbooks.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::Record;

/// Format used to show and enter dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Format used to show and enter date-times.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";
/// Format used to show check-in and check-out times.
pub const TIME_FORMAT: &str = "%H:%M";

/// Where and when a trainee was present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub check_in: NaiveDateTime,
    pub check_out: NaiveDateTime,
    #[serde(default)]
    pub location: String,
}

/// One attendance entry for a trainee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Logbook {
    /// Document key.
    #[serde(default)]
    pub id: String,
    /// Key of the trainee this entry belongs to.
    #[serde(rename = "userID")]
    pub user_id: String,
    pub date: NaiveDateTime,
    pub session: Session,
    #[serde(default, rename = "task")]
    pub tasks: Vec<String>,
}

impl Logbook {
    /// The calendar day of this entry.
    pub fn day(&self) -> NaiveDate {
        self.date.date()
    }

    /// Formatted entry date.
    pub fn date_label(&self) -> String {
        self.date.format(DATE_TIME_FORMAT).to_string()
    }

    /// Formatted check-in time.
    pub fn check_in_label(&self) -> String {
        self.session.check_in.format(TIME_FORMAT).to_string()
    }

    /// Formatted check-out time.
    pub fn check_out_label(&self) -> String {
        self.session.check_out.format(TIME_FORMAT).to_string()
    }

    /// Location, or "N/A" when none was entered.
    pub fn location_label(&self) -> &str {
        if self.session.location.trim().is_empty() {
            "N/A"
        } else {
            &self.session.location
        }
    }
}

impl Record for Logbook {
    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<String> {
        let mut fields = vec![
            self.date_label(),
            self.check_in_label(),
            self.check_out_label(),
            self.location_label().to_string(),
        ];
        fields.extend(self.tasks.iter().cloned());
        fields
    }
}
