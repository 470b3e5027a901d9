//! Add and edit forms for every record kind.
//!
//! A [`FormDraft`] holds the record being edited and a list of text fields.
//! Field values stay plain strings while the operator types; [`FormDraft::finish`]
//! validates them and produces the typed record.

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

use crate::models::{
    Division, Logbook, RecordKind, Role, Session, TraineeType, User, DATE_FORMAT,
    DATE_TIME_FORMAT,
};

/// Separator between tasks in the tasks field.
pub const TASK_SEPARATOR: char = ';';

/// Validation failures, naming the offending field.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("{field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl FormError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        FormError::Invalid {
            field,
            reason: reason.into(),
        }
    }

    /// The field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            FormError::Required(field) => field,
            FormError::Invalid { field, .. } => field,
        }
    }
}

/// One editable text field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub label: &'static str,
    pub value: String,
    pub required: bool,
    /// Short description of the expected format.
    pub hint: &'static str,
}

impl FormField {
    fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
            required: false,
            hint: "",
        }
    }

    fn required(mut self) -> Self {
        self.required = true;
        self
    }

    fn hint(mut self, hint: &'static str) -> Self {
        self.hint = hint;
        self
    }
}

/// A validated record ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub enum FormRecord {
    User(User),
    Division(Division),
    Logbook(Logbook),
}

/// Data a form is validated against.
#[derive(Debug, Clone, Copy)]
pub struct FormContext<'a> {
    /// Every existing division.
    pub divisions: &'a [Division],
    /// Code a newly created division receives.
    pub next_division_code: u32,
}

const NAME: &str = "Name";
const EMAIL: &str = "Email";
const DIVISION: &str = "Division";
const TRAINEE_TYPE: &str = "Trainee Type";
const ROLE: &str = "Role";
const ACTIVE: &str = "Active";
const START_DATE: &str = "Start Date";
const END_DATE: &str = "End Date";
const DOB: &str = "Date of Birth";
const NIK: &str = "NIK";
const ADDRESS: &str = "Address";
const PHOTO: &str = "Photo";
const DIVISION_NAME: &str = "Division Name";
const DATE: &str = "Date";
const CHECK_IN: &str = "Check In";
const CHECK_OUT: &str = "Check Out";
const LOCATION: &str = "Location";
const TASKS: &str = "Tasks";

const DATE_HINT: &str = "YYYY-MM-DD";
const DATE_TIME_HINT: &str = "YYYY-MM-DD HH:MM";

/// An add or edit form in progress.
#[derive(Debug, Clone, PartialEq)]
pub struct FormDraft {
    kind: RecordKind,
    editing: bool,
    base: FormRecord,
    fields: Vec<FormField>,
}

impl FormDraft {
    /// Blank form for a new trainee.
    pub fn new_trainee() -> Self {
        Self::for_user(User::new("", "", Role::Trainee), false)
    }

    /// Blank form for a new administrator.
    pub fn new_admin() -> Self {
        Self::for_user(User::new("", "", Role::Admin), false)
    }

    /// Blank form for a new division.
    pub fn new_division() -> Self {
        Self::for_division(Division::new(0, ""), false)
    }

    /// Blank form for a new logbook of `user_id`, dated `now`.
    pub fn new_logbook(user_id: impl Into<String>, now: NaiveDateTime) -> Self {
        let logbook = Logbook {
            id: String::new(),
            user_id: user_id.into(),
            date: now,
            session: Session {
                check_in: now,
                check_out: now,
                location: String::new(),
            },
            tasks: Vec::new(),
        };
        let mut draft = Self::for_logbook(logbook, false);
        for field in &mut draft.fields {
            if field.label != DATE {
                field.value.clear();
            }
        }
        draft
    }

    /// Form prefilled from an existing user. Trainees get the trainee form.
    pub fn edit_user(user: &User) -> Self {
        Self::for_user(user.clone(), true)
    }

    /// Form prefilled from an existing division.
    pub fn edit_division(division: &Division) -> Self {
        Self::for_division(division.clone(), true)
    }

    /// Form prefilled from an existing logbook.
    pub fn edit_logbook(logbook: &Logbook) -> Self {
        Self::for_logbook(logbook.clone(), true)
    }

    fn for_user(user: User, editing: bool) -> Self {
        let date = |d: Option<NaiveDate>| {
            d.map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default()
        };
        let active = if user.is_active { "yes" } else { "no" };

        let (kind, fields) = if user.is_trainee() {
            let trainee_type = user
                .trainee_type
                .filter(|t| *t != TraineeType::Unknown)
                .map(|t| t.as_str())
                .unwrap_or_default();
            (
                RecordKind::Trainee,
                vec![
                    FormField::new(NAME, user.name.clone()).required(),
                    FormField::new(EMAIL, user.email.clone()).required(),
                    FormField::new(DIVISION, user.division_name().unwrap_or_default()),
                    FormField::new(TRAINEE_TYPE, trainee_type)
                        .required()
                        .hint("intern or part-time"),
                    FormField::new(ACTIVE, active).hint("yes or no"),
                    FormField::new(START_DATE, date(user.start_date)).hint(DATE_HINT),
                    FormField::new(END_DATE, date(user.end_date)).hint(DATE_HINT),
                    FormField::new(DOB, date(user.dob)).hint(DATE_HINT),
                    FormField::new(NIK, user.nik.clone()),
                    FormField::new(ADDRESS, user.address.clone()),
                    FormField::new(PHOTO, user.photo_url.clone().unwrap_or_default())
                        .hint("file path or URL"),
                ],
            )
        } else {
            let role = if user.role.is_staff() {
                user.role.as_str()
            } else {
                ""
            };
            (
                RecordKind::Admin,
                vec![
                    FormField::new(NAME, user.name.clone()).required(),
                    FormField::new(EMAIL, user.email.clone()).required(),
                    FormField::new(DIVISION, user.division_name().unwrap_or_default()),
                    FormField::new(ROLE, role)
                        .required()
                        .hint("admin or super.admin"),
                    FormField::new(ACTIVE, active).hint("yes or no"),
                ],
            )
        };

        Self {
            kind,
            editing,
            base: FormRecord::User(user),
            fields,
        }
    }

    fn for_division(division: Division, editing: bool) -> Self {
        let fields = vec![FormField::new(DIVISION_NAME, division.name.clone()).required()];
        Self {
            kind: RecordKind::Division,
            editing,
            base: FormRecord::Division(division),
            fields,
        }
    }

    fn for_logbook(logbook: Logbook, editing: bool) -> Self {
        let date_time = |d: NaiveDateTime| d.format(DATE_TIME_FORMAT).to_string();
        let fields = vec![
            FormField::new(DATE, date_time(logbook.date))
                .required()
                .hint(DATE_TIME_HINT),
            FormField::new(CHECK_IN, date_time(logbook.session.check_in))
                .required()
                .hint(DATE_TIME_HINT),
            FormField::new(CHECK_OUT, date_time(logbook.session.check_out))
                .required()
                .hint(DATE_TIME_HINT),
            FormField::new(LOCATION, logbook.session.location.clone()).required(),
            FormField::new(TASKS, logbook.tasks.join("; ")).hint("separate tasks with ;"),
        ];
        Self {
            kind: RecordKind::Logbook,
            editing,
            base: FormRecord::Logbook(logbook),
            fields,
        }
    }

    /// Which kind of record this form edits.
    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    /// Check if this form edits an existing record.
    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Title such as "Add Trainee" or "Edit Division".
    pub fn title(&self) -> String {
        let verb = if self.editing { "Edit" } else { "Add" };
        format!("{} {}", verb, self.kind.title())
    }

    /// The fields in display order.
    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    /// Current value of a field.
    pub fn value(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.label == label)
            .map(|f| f.value.as_str())
    }

    /// Replace the value of the field at `index`.
    pub fn set_value(&mut self, index: usize, value: impl Into<String>) {
        if let Some(field) = self.fields.get_mut(index) {
            field.value = value.into();
        }
    }

    /// Replace the value of a field by label.
    pub fn set(&mut self, label: &str, value: impl Into<String>) {
        if let Some(field) = self.fields.iter_mut().find(|f| f.label == label) {
            field.value = value.into();
        }
    }

    fn text(&self, label: &'static str) -> &str {
        self.value(label).map(str::trim).unwrap_or_default()
    }

    fn required(&self, label: &'static str) -> Result<&str, FormError> {
        let value = self.text(label);
        if value.is_empty() {
            Err(FormError::Required(label))
        } else {
            Ok(value)
        }
    }

    fn optional(&self, label: &'static str) -> Option<String> {
        let value = self.text(label);
        (!value.is_empty()).then(|| value.to_string())
    }

    /// Validate the fields and build the record.
    pub fn finish(&self, ctx: &FormContext<'_>) -> Result<FormRecord, FormError> {
        // Required fields are checked first, in display order.
        for field in &self.fields {
            if field.required && field.value.trim().is_empty() {
                return Err(FormError::Required(field.label));
            }
        }

        match &self.base {
            FormRecord::User(user) => self.finish_user(user, ctx).map(FormRecord::User),
            FormRecord::Division(division) => {
                self.finish_division(division, ctx).map(FormRecord::Division)
            }
            FormRecord::Logbook(logbook) => self.finish_logbook(logbook).map(FormRecord::Logbook),
        }
    }

    fn finish_user(&self, base: &User, ctx: &FormContext<'_>) -> Result<User, FormError> {
        let mut user = base.clone();
        user.name = self.required(NAME)?.to_string();

        let email = self.required(EMAIL)?;
        if !email.contains('@') {
            return Err(FormError::invalid(EMAIL, "must be a valid email address"));
        }
        user.email = email.to_string();

        user.division = match self.optional(DIVISION) {
            Some(name) => {
                let known = ctx
                    .divisions
                    .iter()
                    .find(|d| d.name.eq_ignore_ascii_case(&name))
                    .ok_or_else(|| {
                        FormError::invalid(DIVISION, format!("no division named '{}'", name))
                    })?;
                Some(known.name.clone())
            }
            None => None,
        };

        user.is_active = match self.optional(ACTIVE) {
            Some(value) => parse_flag(&value).ok_or_else(|| {
                FormError::invalid(ACTIVE, format!("'{}' is not yes or no", value))
            })?,
            None => true,
        };

        match self.kind {
            RecordKind::Trainee => {
                let value = self.required(TRAINEE_TYPE)?;
                let trainee_type = TraineeType::parse(value).ok_or_else(|| {
                    FormError::invalid(TRAINEE_TYPE, "must be intern or part-time")
                })?;
                user.role = Role::Trainee;
                user.trainee_type = Some(trainee_type);
                user.start_date = parse_date(START_DATE, self.text(START_DATE))?;
                user.end_date = parse_date(END_DATE, self.text(END_DATE))?;
                if let (Some(start), Some(end)) = (user.start_date, user.end_date) {
                    if end < start {
                        return Err(FormError::invalid(END_DATE, "cannot be before the start date"));
                    }
                }
                user.dob = parse_date(DOB, self.text(DOB))?;
                user.nik = self.text(NIK).to_string();
                user.address = self.text(ADDRESS).to_string();
                user.photo_url = self.optional(PHOTO);
            }
            _ => {
                let value = self.required(ROLE)?;
                user.role = Role::parse(value)
                    .filter(Role::is_staff)
                    .ok_or_else(|| FormError::invalid(ROLE, "must be admin or super.admin"))?;
            }
        }

        Ok(user)
    }

    fn finish_division(
        &self,
        base: &Division,
        ctx: &FormContext<'_>,
    ) -> Result<Division, FormError> {
        let name = self.required(DIVISION_NAME)?;
        let taken = ctx
            .divisions
            .iter()
            .any(|d| d.id != base.id && d.name.trim().eq_ignore_ascii_case(name));
        if taken {
            return Err(FormError::invalid(
                DIVISION_NAME,
                format!("'{}' already exists", name),
            ));
        }

        let mut division = base.clone();
        division.name = name.to_string();
        if division.id.is_empty() {
            division.code = ctx.next_division_code;
        }
        Ok(division)
    }

    fn finish_logbook(&self, base: &Logbook) -> Result<Logbook, FormError> {
        let mut logbook = base.clone();
        logbook.date = parse_date_time(DATE, self.required(DATE)?)?;
        logbook.session.check_in = parse_date_time(CHECK_IN, self.required(CHECK_IN)?)?;
        logbook.session.check_out = parse_date_time(CHECK_OUT, self.required(CHECK_OUT)?)?;
        if logbook.session.check_out < logbook.session.check_in {
            return Err(FormError::invalid(CHECK_OUT, "cannot be before check in"));
        }
        logbook.session.location = self.required(LOCATION)?.to_string();
        logbook.tasks = split_tasks(self.text(TASKS));
        Ok(logbook)
    }
}

/// Parse a yes/no style flag.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "yes" | "y" | "true" | "1" => Some(true),
        "no" | "n" | "false" | "0" => Some(false),
        _ => None,
    }
}

/// Split the tasks field, dropping blank entries.
pub fn split_tasks(value: &str) -> Vec<String> {
    value
        .split(TASK_SEPARATOR)
        .map(str::trim)
        .filter(|task| !task.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_date(field: &'static str, value: &str) -> Result<Option<NaiveDate>, FormError> {
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map(Some)
        .map_err(|_| FormError::invalid(field, format!("'{}' is not a {} date", value, DATE_HINT)))
}

fn parse_date_time(field: &'static str, value: &str) -> Result<NaiveDateTime, FormError> {
    NaiveDateTime::parse_from_str(value, DATE_TIME_FORMAT).map_err(|_| {
        FormError::invalid(field, format!("'{}' is not a {} date-time", value, DATE_TIME_HINT))
    })
}
