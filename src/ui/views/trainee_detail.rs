//! A trainee's profile and their logbooks.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::list::LOADING_MESSAGE;
use super::records::{logbook_table, TableOptions};
use crate::models::{Logbook, User, DATE_FORMAT};
use crate::ui::components::{DataTable, TableAction};
use crate::ui::theme;

/// Actions that can be returned from the trainee detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailAction {
    /// An action on a logbook row.
    Logbook(TableAction),
    AddLogbook,
    EditProfile,
    Reload,
}

/// The trainee detail screen.
pub struct TraineeDetailView {
    user_id: String,
    user: Option<User>,
    logbooks: DataTable<Logbook>,
}

impl TraineeDetailView {
    /// Create a view for `user_id`, waiting for its data.
    pub fn new(user_id: impl Into<String>, options: TableOptions) -> Self {
        Self {
            user_id: user_id.into(),
            user: None,
            logbooks: logbook_table(options),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.user.is_none()
    }

    pub fn set_loading(&mut self) {
        self.user = None;
    }

    /// Show a loaded trainee and their logbooks.
    pub fn set_data(&mut self, user: User, logbooks: Vec<Logbook>) {
        self.user = Some(user);
        self.logbooks.set_records(logbooks);
    }

    pub fn logbooks(&self) -> &DataTable<Logbook> {
        &self.logbooks
    }

    /// Check if keystrokes currently go into the search bar.
    pub fn is_capturing_input(&self) -> bool {
        self.logbooks.is_searching()
    }

    pub fn handle_input(&mut self, key: KeyEvent) -> Option<DetailAction> {
        if self.is_loading() {
            return None;
        }

        if !self.logbooks.is_searching() {
            match (key.code, key.modifiers) {
                (KeyCode::Char('a'), KeyModifiers::NONE) => return Some(DetailAction::AddLogbook),
                (KeyCode::Char('p'), KeyModifiers::NONE) => return Some(DetailAction::EditProfile),
                (KeyCode::Char('r'), KeyModifiers::NONE) => return Some(DetailAction::Reload),
                _ => {}
            }
        }

        self.logbooks.handle_input(key).map(DetailAction::Logbook)
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let Some(user) = &self.user else {
            let block = Block::default()
                .title(" Trainee ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::ACCENT));
            frame.render_widget(
                Paragraph::new(LOADING_MESSAGE)
                    .block(block)
                    .alignment(Alignment::Center),
                area,
            );
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(8), Constraint::Min(6)])
            .split(area);

        let profile = Block::default()
            .title(format!(" {} ", user.name))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT));
        frame.render_widget(
            Paragraph::new(profile_lines(user))
                .block(profile)
                .wrap(Wrap { trim: true }),
            chunks[0],
        );

        let logbooks = Block::default()
            .title(format!(" Logbooks ({}) ", self.logbooks.records().len()))
            .borders(Borders::ALL)
            .border_style(theme::disabled());
        let inner = logbooks.inner(chunks[1]);
        frame.render_widget(logbooks, chunks[1]);
        self.logbooks.render(frame, inner);
    }
}

fn field(label: &'static str, value: String, style: Style) -> Vec<Span<'static>> {
    vec![
        Span::styled(
            format!("{:>12}: ", label),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(value, style),
        Span::raw("   "),
    ]
}

fn date(value: Option<chrono::NaiveDate>) -> String {
    value.map_or_else(|| "-".to_string(), |d| d.format(DATE_FORMAT).to_string())
}

fn or_dash(value: &str) -> String {
    if value.trim().is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}

fn profile_lines(user: &User) -> Vec<Line<'static>> {
    let plain = Style::default();
    vec![
        Line::from(
            [
                field("Email", user.email.clone(), plain),
                field(
                    "Division",
                    user.division_label().to_string(),
                    theme::division_style(user.division_name().is_some()),
                ),
            ]
            .concat(),
        ),
        Line::from(
            [
                field(
                    "Type",
                    user.trainee_type_label().to_string(),
                    theme::trainee_type_style(user.trainee_type),
                ),
                field(
                    "Active",
                    theme::active_icon(user.is_active).to_string(),
                    theme::active_style(user.is_active),
                ),
            ]
            .concat(),
        ),
        Line::from(
            [
                field("Start Date", date(user.start_date), plain),
                field("End Date", date(user.end_date), plain),
            ]
            .concat(),
        ),
        Line::from(
            [
                field("Birth Date", date(user.dob), plain),
                field("NIK", or_dash(&user.nik), plain),
            ]
            .concat(),
        ),
        Line::from(field("Address", or_dash(&user.address), plain)),
        Line::from(field(
            "Photo",
            or_dash(user.photo_url.as_deref().unwrap_or_default()),
            plain,
        )),
    ]
}
