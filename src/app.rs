//! Main application state and update logic.
//!
//! The app follows The Elm Architecture: [`App::update`] applies terminal
//! events, [`App::apply`] applies results from the store, and [`App::view`]
//! renders the current state. Store work is never done here; the app queues
//! [`StoreRequest`]s that the event loop drains with
//! [`App::take_requests`] and runs in the background.

use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Tabs},
    Frame,
};
use tracing::{debug, info, trace, warn};

use crate::config::{Operator, Settings};
use crate::error::AppError;
use crate::events::{Event, KeyBindings, KeyContext};
use crate::forms::FormDraft;
use crate::models::{Division, Logbook, Record, RecordKind, User};
use crate::store::{Environment, StoreError};
use crate::tasks::{StoreMessage, StoreRequest, SubmitError};
use crate::ui::{
    admin_table, division_table, render_context_help, theme, trainee_table, ConfirmAction,
    ConfirmDialog, DashboardAction, DashboardView, DetailAction, ErrorDialog, FormAction,
    FormView, HelpAction, HelpView, ListAction, ListView, NotificationManager, TableAction,
    TableOptions, TraineeDetailView,
};

/// The screen the application is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    #[default]
    Dashboard,
    Trainees,
    TraineeDetail,
    Admins,
    Divisions,
    /// An add or edit form.
    Form,
    Help,
    Exiting,
}

impl AppState {
    /// Screens reachable from the tab bar, in order.
    pub const TABS: [AppState; 4] = [
        AppState::Dashboard,
        AppState::Trainees,
        AppState::Admins,
        AppState::Divisions,
    ];

    fn title(&self) -> &'static str {
        match self {
            AppState::Dashboard => "Dashboard",
            AppState::Trainees | AppState::TraineeDetail => "Trainees",
            AppState::Admins => "Admins",
            AppState::Divisions => "Divisions",
            AppState::Form => "Form",
            AppState::Help => "Help",
            AppState::Exiting => "Exiting",
        }
    }

    /// Position in the tab bar. The trainee detail belongs to the trainees tab.
    fn tab_index(&self) -> Option<usize> {
        match self {
            AppState::TraineeDetail => Some(1),
            other => Self::TABS.iter().position(|tab| tab == other),
        }
    }
}

/// A delete waiting for confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub kind: RecordKind,
    pub id: String,
    pub locator: Option<String>,
}

/// The application model.
pub struct App {
    state: AppState,
    /// Screen to return to from help or a form.
    return_to: AppState,
    should_quit: bool,
    operator: Operator,
    environment: Environment,
    dashboard: DashboardView,
    trainees: ListView<User>,
    admins: ListView<User>,
    divisions: ListView<Division>,
    detail: Option<TraineeDetailView>,
    form: Option<FormView>,
    help: HelpView,
    confirm: ConfirmDialog<PendingDelete>,
    notifications: NotificationManager,
    error_dialog: ErrorDialog,
    options: TableOptions,
    requests: Vec<StoreRequest>,
}

impl App {
    /// Create the app for `operator` and open the dashboard.
    pub fn new(operator: Operator, settings: &Settings) -> Self {
        debug!(operator = %operator.id, role = %operator.role, "Creating application");

        let options = TableOptions {
            page_size: settings.page_size,
            keys: KeyBindings::new(settings.vim_mode),
        };
        let super_admin = operator.is_super_admin();

        let mut app = Self {
            state: AppState::Dashboard,
            return_to: AppState::Dashboard,
            should_quit: false,
            operator,
            environment: settings.environment,
            dashboard: DashboardView::new(),
            trainees: ListView::new("Trainees", trainee_table(options)),
            admins: ListView::new("Admins", admin_table(options, super_admin))
                .with_add(super_admin),
            divisions: ListView::new("Divisions", division_table(options)),
            detail: None,
            form: None,
            help: HelpView::new(),
            confirm: ConfirmDialog::new("Confirm Delete"),
            notifications: NotificationManager::new(),
            error_dialog: ErrorDialog::new(),
            options,
            requests: Vec::new(),
        };
        app.enter(AppState::Dashboard);
        app
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn operator(&self) -> &Operator {
        &self.operator
    }

    pub fn trainees(&self) -> &ListView<User> {
        &self.trainees
    }

    pub fn admins(&self) -> &ListView<User> {
        &self.admins
    }

    pub fn divisions(&self) -> &ListView<Division> {
        &self.divisions
    }

    pub fn detail(&self) -> Option<&TraineeDetailView> {
        self.detail.as_ref()
    }

    pub fn form(&self) -> Option<&FormView> {
        self.form.as_ref()
    }

    pub fn notifications(&self) -> &NotificationManager {
        &self.notifications
    }

    pub fn is_confirming(&self) -> bool {
        self.confirm.is_visible()
    }

    pub fn is_error_dialog_visible(&self) -> bool {
        self.error_dialog.is_visible()
    }

    /// Take the store requests queued since the last call.
    pub fn take_requests(&mut self) -> Vec<StoreRequest> {
        std::mem::take(&mut self.requests)
    }

    fn request(&mut self, request: StoreRequest) {
        trace!(?request, "Queueing store request");
        self.requests.push(request);
    }

    /// Handle an application error.
    ///
    /// Critical errors are shown in a modal dialog, everything else as a toast.
    pub fn handle_error(&mut self, error: &AppError) {
        if error.is_critical() {
            warn!(error = %error, "Critical error occurred");
            self.error_dialog
                .show(error.user_message(), error.suggested_action());
        } else {
            debug!(error = %error, "Recoverable error occurred");
            self.notifications.error(error.user_message());
        }
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Switch to a screen and load its data.
    fn enter(&mut self, state: AppState) {
        debug!(from = ?self.state, to = ?state, "Entering screen");
        self.state = state;
        self.reload();
    }

    /// Load the data of the current screen again.
    fn reload(&mut self) {
        match self.state {
            AppState::Dashboard => {
                self.dashboard.set_loading();
                self.request(StoreRequest::LoadDashboard {
                    today: Local::now().date_naive(),
                });
            }
            AppState::Trainees => {
                self.trainees.set_loading();
                self.request(StoreRequest::LoadTrainees);
            }
            AppState::Admins => {
                self.admins.set_loading();
                self.request(StoreRequest::LoadAdmins);
            }
            AppState::Divisions => {
                self.divisions.set_loading();
                self.request(StoreRequest::LoadDivisions);
            }
            AppState::TraineeDetail => {
                if let Some(detail) = &mut self.detail {
                    detail.set_loading();
                    let user_id = detail.user_id().to_string();
                    self.request(StoreRequest::LoadTraineeDetail { user_id });
                }
            }
            AppState::Form | AppState::Help | AppState::Exiting => {}
        }
    }

    fn cycle_tab(&mut self, forward: bool) {
        let count = AppState::TABS.len();
        let current = self.state.tab_index().unwrap_or(0);
        let next = if forward {
            (current + 1) % count
        } else {
            (current + count - 1) % count
        };
        self.enter(AppState::TABS[next]);
    }

    fn open_detail(&mut self, user_id: String) {
        self.detail = Some(TraineeDetailView::new(user_id, self.options));
        self.enter(AppState::TraineeDetail);
    }

    fn close_detail(&mut self) {
        self.detail = None;
        self.enter(AppState::Trainees);
    }

    fn open_help(&mut self) {
        self.return_to = self.state;
        self.help.reset_scroll();
        self.state = AppState::Help;
    }

    fn open_form(&mut self, draft: FormDraft) {
        debug!(form = %draft.title(), "Opening form");
        self.return_to = self.state;
        self.form = Some(FormView::new(draft));
        self.state = AppState::Form;
    }

    fn close_form(&mut self, reload: bool) {
        self.form = None;
        self.state = self.return_to;
        if reload {
            self.reload();
        }
    }

    fn quit(&mut self) {
        info!("Quit requested");
        self.should_quit = true;
        self.state = AppState::Exiting;
    }

    // ========================================================================
    // Update
    // ========================================================================

    /// Apply a terminal event.
    pub fn update(&mut self, event: Event) {
        match event {
            Event::Key(key) => {
                trace!(key = ?key.code, modifiers = ?key.modifiers, "Key event");
                self.handle_key_event(key);
            }
            Event::Paste(text) => {
                if let Some(form) = &mut self.form {
                    form.paste(&text);
                }
            }
            Event::Resize(width, height) => {
                trace!(width, height, "Terminal resize event");
            }
            Event::Tick => self.notifications.tick(),
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return;
        }

        // Dialogs block all other input
        if self.error_dialog.is_visible() {
            self.error_dialog.handle_input(key);
            return;
        }
        if self.confirm.is_visible() {
            if let Some(ConfirmAction::Confirmed(pending)) = self.confirm.handle_input(key) {
                info!(kind = pending.kind.noun(), id = %pending.id, "Delete confirmed");
                self.request(StoreRequest::Delete {
                    kind: pending.kind,
                    id: pending.id,
                    locator: pending.locator,
                });
            }
            return;
        }

        match self.state {
            AppState::Help => {
                if self.help.handle_input(key) == Some(HelpAction::Close) {
                    self.state = self.return_to;
                }
                return;
            }
            AppState::Form => {
                self.handle_form_input(key);
                return;
            }
            AppState::Exiting => return,
            _ => {}
        }

        if !self.is_capturing_input() && self.handle_global_key(key) {
            return;
        }

        match self.state {
            AppState::Dashboard => {
                if self.dashboard.handle_input(key) == Some(DashboardAction::Reload) {
                    self.reload();
                }
            }
            AppState::Trainees => {
                if let Some(action) = self.trainees.handle_input(key) {
                    self.handle_list_action(RecordKind::Trainee, action);
                }
            }
            AppState::Admins => {
                if let Some(action) = self.admins.handle_input(key) {
                    self.handle_list_action(RecordKind::Admin, action);
                }
            }
            AppState::Divisions => {
                if let Some(action) = self.divisions.handle_input(key) {
                    self.handle_list_action(RecordKind::Division, action);
                }
            }
            AppState::TraineeDetail => {
                let action = self.detail.as_mut().and_then(|d| d.handle_input(key));
                if let Some(action) = action {
                    self.handle_detail_action(action);
                }
            }
            AppState::Form | AppState::Help | AppState::Exiting => {}
        }
    }

    /// Check if the current screen is typing into a search bar.
    fn is_capturing_input(&self) -> bool {
        match self.state {
            AppState::Trainees => self.trainees.is_capturing_input(),
            AppState::Admins => self.admins.is_capturing_input(),
            AppState::Divisions => self.divisions.is_capturing_input(),
            AppState::TraineeDetail => self
                .detail
                .as_ref()
                .is_some_and(|d| d.is_capturing_input()),
            _ => false,
        }
    }

    /// Keys that work on every top-level screen. Returns true if handled.
    fn handle_global_key(&mut self, key: KeyEvent) -> bool {
        match (key.code, key.modifiers) {
            (KeyCode::Char('q'), KeyModifiers::NONE) => {
                if self.state == AppState::TraineeDetail {
                    self.close_detail();
                } else {
                    self.quit();
                }
            }
            (KeyCode::Esc, _) if self.state == AppState::TraineeDetail => {
                let has_term = self
                    .detail
                    .as_ref()
                    .is_some_and(|d| !d.logbooks().search_term().is_empty());
                if has_term {
                    // Let the table clear its search first
                    return false;
                }
                self.close_detail();
            }
            (KeyCode::Char('?'), _) => self.open_help(),
            (KeyCode::Char(c @ '1'..='4'), KeyModifiers::NONE) => {
                let index = c as usize - '1' as usize;
                self.enter(AppState::TABS[index]);
            }
            (KeyCode::Tab, _) => self.cycle_tab(true),
            (KeyCode::BackTab, _) => self.cycle_tab(false),
            _ => return false,
        }
        true
    }

    fn handle_form_input(&mut self, key: KeyEvent) {
        let Some(form) = &mut self.form else {
            self.state = self.return_to;
            return;
        };
        match form.handle_input(key) {
            Some(FormAction::Submit(draft)) => self.request(StoreRequest::Submit(draft)),
            Some(FormAction::Cancel) => self.close_form(false),
            None => {}
        }
    }

    fn handle_list_action(&mut self, kind: RecordKind, action: ListAction) {
        match action {
            ListAction::Reload => self.reload(),
            ListAction::Add => match kind {
                RecordKind::Trainee => self.open_form(FormDraft::new_trainee()),
                RecordKind::Admin => self.open_form(FormDraft::new_admin()),
                RecordKind::Division => self.open_form(FormDraft::new_division()),
                RecordKind::Logbook => {}
            },
            ListAction::Row(TableAction::View(id)) => {
                if kind == RecordKind::Trainee {
                    self.open_detail(id);
                }
            }
            ListAction::Row(TableAction::Edit(id)) => {
                let draft = match kind {
                    RecordKind::Trainee => find(self.trainees.table().records(), &id)
                        .map(FormDraft::edit_user),
                    RecordKind::Admin => {
                        find(self.admins.table().records(), &id).map(FormDraft::edit_user)
                    }
                    RecordKind::Division => find(self.divisions.table().records(), &id)
                        .map(FormDraft::edit_division),
                    RecordKind::Logbook => None,
                };
                if let Some(draft) = draft {
                    self.open_form(draft);
                }
            }
            ListAction::Row(TableAction::Delete { id, locator }) => {
                self.ask_delete(kind, id, locator);
            }
        }
    }

    fn handle_detail_action(&mut self, action: DetailAction) {
        let Some(detail) = &self.detail else {
            return;
        };
        match action {
            DetailAction::Reload => self.reload(),
            DetailAction::AddLogbook => {
                let draft = FormDraft::new_logbook(detail.user_id(), Local::now().naive_local());
                self.open_form(draft);
            }
            DetailAction::EditProfile => {
                if let Some(draft) = detail.user().map(FormDraft::edit_user) {
                    self.open_form(draft);
                }
            }
            DetailAction::Logbook(TableAction::Edit(id)) => {
                if let Some(draft) =
                    find(detail.logbooks().records(), &id).map(FormDraft::edit_logbook)
                {
                    self.open_form(draft);
                }
            }
            DetailAction::Logbook(TableAction::Delete { id, locator }) => {
                self.ask_delete(RecordKind::Logbook, id, locator);
            }
            DetailAction::Logbook(TableAction::View(_)) => {}
        }
    }

    fn ask_delete(&mut self, kind: RecordKind, id: String, locator: Option<String>) {
        if kind == RecordKind::Admin && id == self.operator.id {
            self.notifications.error("You cannot delete your own account");
            return;
        }
        self.confirm.ask(
            format!("Are you sure you want to delete this {}?", kind.noun()),
            PendingDelete { kind, id, locator },
        );
    }

    // ========================================================================
    // Store results
    // ========================================================================

    /// Apply the result of a store request.
    pub fn apply(&mut self, message: StoreMessage) {
        match message {
            StoreMessage::DashboardLoaded(stats) => self.dashboard.set_stats(stats),
            StoreMessage::TraineesLoaded(users) => self.trainees.set_records(users),
            StoreMessage::AdminsLoaded(users) => self.admins.set_records(users),
            StoreMessage::DivisionsLoaded(divisions) => self.divisions.set_records(divisions),
            StoreMessage::TraineeDetailLoaded { user_id, result } => {
                self.apply_detail(user_id, result);
            }
            StoreMessage::Submitted { kind, result } => self.apply_submitted(kind, result),
            StoreMessage::Deleted { kind, id, result } => self.apply_deleted(kind, &id, result),
        }
    }

    fn apply_detail(&mut self, user_id: String, result: Result<(User, Vec<Logbook>), StoreError>) {
        let Some(detail) = self.detail.as_mut().filter(|d| d.user_id() == user_id) else {
            debug!(user_id = %user_id, "Dropping stale trainee detail");
            return;
        };
        match result {
            Ok((user, logbooks)) => detail.set_data(user, logbooks),
            Err(e) => {
                self.handle_error(&AppError::Store(e));
                if self.state == AppState::TraineeDetail {
                    self.close_detail();
                } else {
                    self.detail = None;
                }
            }
        }
    }

    fn apply_submitted(&mut self, kind: RecordKind, result: Result<String, SubmitError>) {
        match result {
            Ok(_) => {
                self.notifications
                    .success(format!("{} saved", kind.title()));
                self.close_form(true);
            }
            Err(SubmitError::Invalid(e)) => {
                if let Some(form) = &mut self.form {
                    form.set_error(&e);
                }
            }
            Err(SubmitError::Store(e)) => {
                let error = AppError::Store(e);
                if let Some(form) = &mut self.form {
                    form.set_failure(error.user_message());
                }
                self.handle_error(&error);
            }
        }
    }

    fn apply_deleted(&mut self, kind: RecordKind, id: &str, result: Result<(), StoreError>) {
        match result {
            Ok(()) => {
                self.notifications
                    .success(format!("{} deleted", kind.title()));
                let viewing_deleted = self.state == AppState::TraineeDetail
                    && self.detail.as_ref().is_some_and(|d| d.user_id() == id);
                if viewing_deleted {
                    self.close_detail();
                } else {
                    self.reload();
                }
            }
            Err(e) => self.handle_error(&AppError::Store(e)),
        }
    }

    // ========================================================================
    // View
    // ========================================================================

    /// Render the application.
    pub fn view(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Tabs
                Constraint::Min(1),    // Content
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        self.render_tabs(frame, chunks[0]);
        self.render_content(frame, chunks[1]);

        let status = format!(
            "{} ({}) | {}",
            self.operator.display_name(),
            self.operator.role.label(),
            self.environment
        );
        render_context_help(frame, chunks[2], self.key_context(), &status);

        self.notifications.render(frame, area);
        self.confirm.render(frame, area);
        self.error_dialog.render(frame, area);
    }

    fn key_context(&self) -> KeyContext {
        if self.confirm.is_visible() || self.error_dialog.is_visible() {
            return KeyContext::Dialog;
        }
        match self.state {
            AppState::Dashboard => KeyContext::Dashboard,
            AppState::TraineeDetail => KeyContext::TraineeDetail,
            AppState::Form => KeyContext::Form,
            AppState::Help => KeyContext::Global,
            _ => KeyContext::Table,
        }
    }

    fn render_tabs(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = AppState::TABS
            .iter()
            .enumerate()
            .map(|(i, tab)| Line::from(format!("{} {}", i + 1, tab.title())))
            .collect();
        let shown = match self.state {
            AppState::Form | AppState::Help => self.return_to,
            state => state,
        };
        let tabs = Tabs::new(titles)
            .select(shown.tab_index().unwrap_or(0))
            .style(Style::default().fg(Color::Gray))
            .highlight_style(
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD),
            )
            .block(
                Block::default()
                    .title(" LazyLogbook ")
                    .borders(Borders::BOTTOM)
                    .border_style(theme::disabled()),
            );
        frame.render_widget(tabs, area);
    }

    fn render_content(&mut self, frame: &mut Frame, area: Rect) {
        let state = match self.state {
            AppState::Help => self.return_to,
            state => state,
        };
        match state {
            AppState::Dashboard => self.dashboard.render(frame, area),
            AppState::Trainees => self.trainees.render(frame, area),
            AppState::Admins => self.admins.render(frame, area),
            AppState::Divisions => self.divisions.render(frame, area),
            AppState::TraineeDetail => {
                if let Some(detail) = &mut self.detail {
                    detail.render(frame, area);
                }
            }
            AppState::Form => {
                if let Some(form) = &self.form {
                    form.render(frame, area);
                }
            }
            AppState::Help | AppState::Exiting => {}
        }

        if self.state == AppState::Help {
            self.help.render(frame, area);
        }
    }
}

fn find<'a, R: Record>(records: &'a [R], id: &str) -> Option<&'a R> {
    records.iter().find(|r| r.id() == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{rate_change, DashboardStats};
    use crate::forms::FormError;
    use crate::models::Role;
    use crate::ui::test_utils::buffer_text;
    use ratatui::{backend::TestBackend, Terminal};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn char_key(c: char) -> Event {
        key(KeyCode::Char(c))
    }

    fn app_for(role: Role) -> App {
        let mut app = App::new(Operator::new("me", "Dewi", role), &Settings::default());
        app.take_requests();
        app
    }

    fn user(id: &str, name: &str, role: Role) -> User {
        let mut user = User::new(name, format!("{}@example.com", id), role);
        user.id = id.to_string();
        user
    }

    fn trainees_screen() -> App {
        let mut app = app_for(Role::Admin);
        app.update(char_key('2'));
        app.take_requests();
        app.apply(StoreMessage::TraineesLoaded(vec![user("t1", "Rina", Role::Trainee)]));
        app
    }

    #[test]
    fn test_starts_on_dashboard_loading_stats() {
        let mut app = App::new(Operator::new("me", "Dewi", Role::Admin), &Settings::default());
        assert_eq!(app.state(), AppState::Dashboard);
        assert!(matches!(
            app.take_requests().as_slice(),
            [StoreRequest::LoadDashboard { .. }]
        ));
        assert!(app.take_requests().is_empty());
    }

    #[test]
    fn test_number_keys_switch_screens() {
        let mut app = app_for(Role::Admin);
        app.update(char_key('3'));
        assert_eq!(app.state(), AppState::Admins);
        assert!(app.admins().is_loading());
        assert!(matches!(
            app.take_requests().as_slice(),
            [StoreRequest::LoadAdmins]
        ));

        app.update(key(KeyCode::Tab));
        assert_eq!(app.state(), AppState::Divisions);
        app.update(key(KeyCode::Tab));
        assert_eq!(app.state(), AppState::Dashboard);
        app.update(key(KeyCode::BackTab));
        assert_eq!(app.state(), AppState::Divisions);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app_for(Role::Admin);
        app.update(char_key('q'));
        assert!(app.should_quit());

        let mut app = app_for(Role::Admin);
        app.update(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert!(app.should_quit());
        assert_eq!(app.state(), AppState::Exiting);
    }

    #[test]
    fn test_help_returns_to_previous_screen() {
        let mut app = trainees_screen();
        app.update(char_key('?'));
        assert_eq!(app.state(), AppState::Help);
        app.update(key(KeyCode::Esc));
        assert_eq!(app.state(), AppState::Trainees);
    }

    #[test]
    fn test_search_keeps_shortcut_keys() {
        let mut app = trainees_screen();
        app.update(char_key('/'));
        app.update(char_key('q'));
        app.update(char_key('2'));
        assert!(!app.should_quit());
        assert_eq!(app.state(), AppState::Trainees);
        assert_eq!(app.trainees().table().search_term(), "q2");
    }

    #[test]
    fn test_view_opens_trainee_detail() {
        let mut app = trainees_screen();
        app.update(char_key('v'));
        assert_eq!(app.state(), AppState::TraineeDetail);
        assert!(matches!(
            app.take_requests().as_slice(),
            [StoreRequest::LoadTraineeDetail { user_id }] if user_id == "t1"
        ));

        app.apply(StoreMessage::TraineeDetailLoaded {
            user_id: "t1".to_string(),
            result: Ok((user("t1", "Rina", Role::Trainee), vec![])),
        });
        assert!(app.detail().is_some_and(|d| !d.is_loading()));

        app.update(char_key('q'));
        assert_eq!(app.state(), AppState::Trainees);
        assert!(app.detail().is_none());
        assert!(!app.should_quit());
    }

    #[test]
    fn test_missing_trainee_goes_back_with_toast() {
        let mut app = trainees_screen();
        app.update(char_key('v'));
        app.take_requests();
        app.apply(StoreMessage::TraineeDetailLoaded {
            user_id: "t1".to_string(),
            result: Err(StoreError::not_found("DevUsers", "t1")),
        });
        assert_eq!(app.state(), AppState::Trainees);
        assert_eq!(app.notifications().len(), 1);
        assert!(!app.is_error_dialog_visible());
    }

    #[test]
    fn test_delete_asks_first() {
        let mut app = trainees_screen();
        app.update(char_key('d'));
        assert!(app.is_confirming());
        assert!(app.take_requests().is_empty());

        app.update(char_key('y'));
        assert!(!app.is_confirming());
        assert!(matches!(
            app.take_requests().as_slice(),
            [StoreRequest::Delete { kind: RecordKind::Trainee, id, .. }] if id == "t1"
        ));
    }

    #[test]
    fn test_delete_cancelled() {
        let mut app = trainees_screen();
        app.update(char_key('d'));
        app.update(char_key('n'));
        assert!(!app.is_confirming());
        assert!(app.take_requests().is_empty());
    }

    #[test]
    fn test_deleted_reloads_list() {
        let mut app = trainees_screen();
        app.apply(StoreMessage::Deleted {
            kind: RecordKind::Trainee,
            id: "t1".to_string(),
            result: Ok(()),
        });
        assert!(app.trainees().is_loading());
        assert!(matches!(
            app.take_requests().as_slice(),
            [StoreRequest::LoadTrainees]
        ));
    }

    #[test]
    fn test_regular_admin_cannot_manage_admins() {
        let mut app = app_for(Role::Admin);
        app.update(char_key('3'));
        app.apply(StoreMessage::AdminsLoaded(vec![user("a2", "Ani", Role::Admin)]));
        app.take_requests();

        app.update(char_key('a'));
        app.update(char_key('e'));
        app.update(char_key('d'));
        assert_eq!(app.state(), AppState::Admins);
        assert!(!app.is_confirming());
    }

    #[test]
    fn test_super_admin_cannot_delete_self() {
        let mut app = app_for(Role::SuperAdmin);
        app.update(char_key('3'));
        app.apply(StoreMessage::AdminsLoaded(vec![user("me", "Dewi", Role::SuperAdmin)]));

        app.update(char_key('d'));
        assert!(!app.is_confirming());
        assert_eq!(app.notifications().len(), 1);

        app.update(char_key('a'));
        assert_eq!(app.state(), AppState::Form);
    }

    #[test]
    fn test_form_submit_flow() {
        let mut app = app_for(Role::Admin);
        app.update(char_key('4'));
        app.apply(StoreMessage::DivisionsLoaded(vec![]));
        app.take_requests();

        app.update(char_key('a'));
        assert_eq!(app.state(), AppState::Form);
        for c in "IT".chars() {
            app.update(char_key(c));
        }
        app.update(key(KeyCode::Enter));
        assert!(matches!(
            app.take_requests().as_slice(),
            [StoreRequest::Submit(draft)] if draft.value("Division Name") == Some("IT")
        ));

        app.apply(StoreMessage::Submitted {
            kind: RecordKind::Division,
            result: Ok("d1".to_string()),
        });
        assert_eq!(app.state(), AppState::Divisions);
        assert!(app.form().is_none());
        assert!(matches!(
            app.take_requests().as_slice(),
            [StoreRequest::LoadDivisions]
        ));
    }

    #[test]
    fn test_rejected_form_stays_open() {
        let mut app = app_for(Role::Admin);
        app.update(char_key('4'));
        app.apply(StoreMessage::DivisionsLoaded(vec![]));
        app.update(char_key('a'));
        app.update(key(KeyCode::Enter));

        app.apply(StoreMessage::Submitted {
            kind: RecordKind::Division,
            result: Err(SubmitError::Invalid(FormError::Required("Division Name"))),
        });
        assert_eq!(app.state(), AppState::Form);
        assert_eq!(
            app.form().and_then(|f| f.error()),
            Some("Division Name is required")
        );

        app.update(key(KeyCode::Esc));
        assert_eq!(app.state(), AppState::Divisions);
    }

    #[test]
    fn test_critical_error_blocks_input() {
        let mut app = trainees_screen();
        app.apply(StoreMessage::Deleted {
            kind: RecordKind::Trainee,
            id: "t1".to_string(),
            result: Err(StoreError::Io(std::io::Error::other("disk"))),
        });
        assert!(app.is_error_dialog_visible());

        app.update(char_key('2'));
        assert!(app.is_error_dialog_visible());
        assert!(app.take_requests().is_empty());
        app.update(key(KeyCode::Enter));
        assert!(!app.is_error_dialog_visible());
        assert_eq!(app.state(), AppState::Trainees);
    }

    #[test]
    fn test_render_dashboard() {
        let mut app = app_for(Role::SuperAdmin);
        app.apply(StoreMessage::DashboardLoaded(DashboardStats {
            present_today: 1,
            present_yesterday: 0,
            today_rate: rate_change(1, 0),
            active_trainees: 1,
            active_interns: 1,
            active_part_timers: 0,
            attendance: vec![],
        }));
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|frame| app.view(frame)).unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("1 Dashboard"));
        assert!(text.contains("Dewi (Super Admin) | development"));
        assert!(text.contains("n/a"));
    }
}
