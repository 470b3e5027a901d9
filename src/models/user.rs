//! Users: trainees and administrators share one collection.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Record;

/// Shown when a user has no division assigned.
pub const UNDEFINED_DIVISION: &str = "Undefined";

/// The role of a user document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Role {
    /// A trainee with logbooks.
    #[default]
    #[serde(rename = "trainee")]
    Trainee,
    /// A regular administrator.
    #[serde(rename = "admin")]
    Admin,
    /// An administrator allowed to manage other administrators.
    #[serde(rename = "super.admin")]
    SuperAdmin,
    /// Any value the console does not recognise.
    #[serde(other, rename = "unknown")]
    Unknown,
}

impl Role {
    /// The stored string for this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Trainee => "trainee",
            Role::Admin => "admin",
            Role::SuperAdmin => "super.admin",
            Role::Unknown => "unknown",
        }
    }

    /// Parse a stored role string.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "trainee" => Some(Role::Trainee),
            "admin" => Some(Role::Admin),
            "super.admin" => Some(Role::SuperAdmin),
            _ => None,
        }
    }

    /// Label shown in the admin list.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Trainee => "Trainee",
            Role::Admin => "Admin",
            Role::SuperAdmin => "Super Admin",
            Role::Unknown => "Undefined!!",
        }
    }

    /// Check if this role belongs to an administrator.
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Admin | Role::SuperAdmin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of traineeship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TraineeType {
    #[serde(rename = "intern")]
    Intern,
    #[serde(rename = "part-time")]
    PartTime,
    #[serde(other, rename = "unknown")]
    Unknown,
}

impl TraineeType {
    /// The stored string for this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            TraineeType::Intern => "intern",
            TraineeType::PartTime => "part-time",
            TraineeType::Unknown => "unknown",
        }
    }

    /// Parse a stored type string.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "intern" => Some(TraineeType::Intern),
            "part-time" => Some(TraineeType::PartTime),
            _ => None,
        }
    }

    /// Label shown in the trainee list.
    pub fn label(&self) -> &'static str {
        match self {
            TraineeType::Intern => "Intern",
            TraineeType::PartTime => "Part Time",
            TraineeType::Unknown => "Undefined",
        }
    }
}

/// A trainee or administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Document key.
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    /// Division name. Empty or missing means unassigned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub division: Option<String>,
    #[serde(default)]
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trainee_type: Option<TraineeType>,
    #[serde(default, rename = "isActive")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub nik: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub address: String,
    /// Location of the user's photo, removed together with the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl User {
    /// Create an active user with the given role and no optional details.
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            email: email.into(),
            division: None,
            role,
            trainee_type: None,
            is_active: true,
            start_date: None,
            end_date: None,
            dob: None,
            nik: String::new(),
            address: String::new(),
            photo_url: None,
        }
    }

    /// Check if this user is a trainee.
    pub fn is_trainee(&self) -> bool {
        self.role == Role::Trainee
    }

    /// The assigned division, if it is non-empty.
    pub fn division_name(&self) -> Option<&str> {
        self.division.as_deref().filter(|d| !d.trim().is_empty())
    }

    /// Division label, falling back to "Undefined".
    pub fn division_label(&self) -> &str {
        self.division_name().unwrap_or(UNDEFINED_DIVISION)
    }

    /// Trainee type label, falling back to "Undefined".
    pub fn trainee_type_label(&self) -> &'static str {
        self.trainee_type
            .unwrap_or(TraineeType::Unknown)
            .label()
    }
}

impl Record for User {
    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.email.clone(),
            self.division_label().to_string(),
            self.role.label().to_string(),
            self.trainee_type_label().to_string(),
            self.nik.clone(),
            self.address.clone(),
        ]
    }

    fn resource_locator(&self) -> Option<&str> {
        self.photo_url.as_deref()
    }
}
