//! Modal dialogs: delete confirmation and critical errors.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// The operator's answer to a confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction<T> {
    /// Proceed with the pending action.
    Confirmed(T),
    Cancelled,
}

/// A yes/no question guarding a pending action.
#[derive(Debug, Clone)]
pub struct ConfirmDialog<T> {
    title: String,
    message: String,
    pending: Option<T>,
    /// Whether "Yes" is focused. Defaults to "No".
    yes_focused: bool,
}

impl<T> ConfirmDialog<T> {
    /// Create a hidden dialog.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: String::new(),
            pending: None,
            yes_focused: false,
        }
    }

    /// Ask `message` about `pending`.
    pub fn ask(&mut self, message: impl Into<String>, pending: T) {
        self.message = message.into();
        self.pending = Some(pending);
        self.yes_focused = false;
    }

    /// Check if the dialog is shown.
    pub fn is_visible(&self) -> bool {
        self.pending.is_some()
    }

    /// The question being asked.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Handle keyboard input.
    ///
    /// `y` confirms and `n`/`Esc`/`q` cancel directly; arrows or Tab move the
    /// focus between the buttons and Enter picks the focused one.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<ConfirmAction<T>> {
        if self.pending.is_none() {
            return None;
        }

        match (key.code, key.modifiers) {
            (KeyCode::Char('y') | KeyCode::Char('Y'), _) => self.confirm(),
            (KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Char('q'), _)
            | (KeyCode::Esc, _) => self.cancel(),
            (KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab, _)
            | (KeyCode::Char('h') | KeyCode::Char('l'), KeyModifiers::NONE) => {
                self.yes_focused = !self.yes_focused;
                None
            }
            (KeyCode::Enter, _) => {
                if self.yes_focused {
                    self.confirm()
                } else {
                    self.cancel()
                }
            }
            _ => None,
        }
    }

    fn confirm(&mut self) -> Option<ConfirmAction<T>> {
        self.pending.take().map(ConfirmAction::Confirmed)
    }

    fn cancel(&mut self) -> Option<ConfirmAction<T>> {
        self.pending = None;
        Some(ConfirmAction::Cancelled)
    }

    /// Render the dialog centered in `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.is_visible() {
            return;
        }

        let dialog_area = centered_rect(50.min(area.width.saturating_sub(4)), 7, area);
        frame.render_widget(Clear, dialog_area);

        let block = Block::default()
            .title(format!(" {} ", self.title))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow));
        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(2), Constraint::Length(1)])
            .split(inner);

        frame.render_widget(
            Paragraph::new(self.message.as_str())
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            chunks[0],
        );

        let button = |label: &'static str, focused: bool| {
            if focused {
                Span::styled(
                    label,
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Span::raw(label)
            }
        };
        let buttons = Line::from(vec![
            button(" [Y]es ", self.yes_focused),
            Span::raw("   "),
            button(" [N]o ", !self.yes_focused),
        ]);
        frame.render_widget(
            Paragraph::new(buttons).alignment(Alignment::Center),
            chunks[1],
        );
    }
}

/// A dismissable dialog for critical errors.
#[derive(Debug, Clone, Default)]
pub struct ErrorDialog {
    message: Option<String>,
    suggestion: Option<String>,
}

impl ErrorDialog {
    /// Create a hidden dialog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Show an error with an optional suggested action.
    pub fn show(&mut self, message: impl Into<String>, suggestion: Option<&str>) {
        self.message = Some(message.into());
        self.suggestion = suggestion.map(str::to_string);
    }

    /// Check if the dialog is shown.
    pub fn is_visible(&self) -> bool {
        self.message.is_some()
    }

    /// The error being shown.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Enter, Esc or `q` dismiss the dialog. Returns true if it was dismissed.
    pub fn handle_input(&mut self, key: KeyEvent) -> bool {
        if !self.is_visible() {
            return false;
        }
        match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q') => {
                self.message = None;
                self.suggestion = None;
                true
            }
            _ => false,
        }
    }

    /// Render the dialog centered in `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let Some(message) = &self.message else {
            return;
        };

        let dialog_area = centered_rect(60.min(area.width.saturating_sub(4)), 9, area);
        frame.render_widget(Clear, dialog_area);

        let mut lines = vec![Line::from(Span::styled(
            message.as_str(),
            Style::default().fg(Color::Red),
        ))];
        if let Some(suggestion) = &self.suggestion {
            lines.push(Line::raw(""));
            lines.push(Line::from(Span::styled(
                suggestion.as_str(),
                Style::default().fg(Color::Gray),
            )));
        }
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "Press Enter to dismiss",
            Style::default().fg(Color::DarkGray),
        )));

        let block = Block::default()
            .title(" Error ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red));

        frame.render_widget(
            Paragraph::new(lines)
                .block(block)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            dialog_area,
        );
    }
}

/// Create a centered rectangle.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
