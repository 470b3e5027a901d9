//! Add/edit form screen.
//!
//! One text input per field. The draft is handed to the app on submit and
//! validated in the background; a rejection comes back through
//! [`FormView::set_error`] and moves the focus to the offending field.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::forms::{FormDraft, FormError};
use crate::ui::components::TextInput;
use crate::ui::theme;

/// Rows taken by one bordered input.
const FIELD_HEIGHT: u16 = 3;

/// Actions that can be returned from the form.
#[derive(Debug, Clone, PartialEq)]
pub enum FormAction {
    /// Save the draft.
    Submit(FormDraft),
    Cancel,
}

/// The form screen.
pub struct FormView {
    draft: FormDraft,
    inputs: Vec<TextInput>,
    focus: usize,
    error: Option<String>,
    submitting: bool,
}

impl FormView {
    pub fn new(draft: FormDraft) -> Self {
        let inputs = draft
            .fields()
            .iter()
            .map(|f| TextInput::with_value(f.value.clone()))
            .collect();
        Self {
            draft,
            inputs,
            focus: 0,
            error: None,
            submitting: false,
        }
    }

    pub fn draft(&self) -> &FormDraft {
        &self.draft
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Check if a submit is waiting for its result.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Show a validation error and focus the field it names.
    pub fn set_error(&mut self, error: &FormError) {
        if let Some(index) = self
            .draft
            .fields()
            .iter()
            .position(|f| f.label == error.field())
        {
            self.focus = index;
        }
        self.error = Some(error.to_string());
        self.submitting = false;
    }

    /// Show a save failure that is not tied to a field.
    pub fn set_failure(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.submitting = false;
    }

    /// Insert pasted text into the focused field.
    pub fn paste(&mut self, text: &str) {
        if let Some(input) = self.inputs.get_mut(self.focus) {
            // Fields are single-line
            input.insert_str(&text.replace(['\r', '\n'], " "));
        }
    }

    fn focus_next(&mut self) {
        if !self.inputs.is_empty() {
            self.focus = (self.focus + 1) % self.inputs.len();
        }
    }

    fn focus_previous(&mut self) {
        if !self.inputs.is_empty() {
            self.focus = (self.focus + self.inputs.len() - 1) % self.inputs.len();
        }
    }

    fn sync_draft(&mut self) {
        for (index, input) in self.inputs.iter().enumerate() {
            self.draft.set_value(index, input.value());
        }
    }

    pub fn handle_input(&mut self, key: KeyEvent) -> Option<FormAction> {
        if self.submitting {
            return None;
        }

        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => Some(FormAction::Cancel),
            (KeyCode::Enter, _) | (KeyCode::Char('s'), KeyModifiers::CONTROL) => {
                self.sync_draft();
                self.error = None;
                self.submitting = true;
                Some(FormAction::Submit(self.draft.clone()))
            }
            (KeyCode::Tab, _) | (KeyCode::Down, _) => {
                self.focus_next();
                None
            }
            (KeyCode::BackTab, _) | (KeyCode::Up, _) => {
                self.focus_previous();
                None
            }
            _ => {
                if let Some(input) = self.inputs.get_mut(self.focus) {
                    input.handle_input(key);
                }
                None
            }
        }
    }

    /// First field shown so that the focused one stays visible.
    fn first_visible(&self, capacity: usize) -> usize {
        if capacity == 0 || self.focus < capacity {
            0
        } else {
            self.focus + 1 - capacity
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(format!(" {} ", self.draft.title()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(FIELD_HEIGHT), Constraint::Length(1)])
            .split(inner);

        let capacity = (chunks[0].height / FIELD_HEIGHT) as usize;
        let first = self.first_visible(capacity);
        let fields = self.draft.fields();

        for (slot, index) in (first..fields.len()).take(capacity).enumerate() {
            let field = &fields[index];
            let label = if field.required {
                format!("{} *", field.label)
            } else {
                field.label.to_string()
            };
            let area = Rect::new(
                chunks[0].x,
                chunks[0].y + slot as u16 * FIELD_HEIGHT,
                chunks[0].width,
                FIELD_HEIGHT,
            );
            self.inputs[index].render(frame, area, &label, field.hint, index == self.focus);
        }

        let status = match (&self.error, self.submitting) {
            (Some(error), _) => Line::from(Span::styled(error.clone(), Style::default().fg(Color::Red))),
            (None, true) => Line::from(Span::styled("Saving...", Style::default().fg(Color::Yellow))),
            (None, false) => Line::from(Span::styled(
                format!("Field {} of {}  * required", self.focus + 1, fields.len()),
                theme::disabled(),
            )),
        };
        frame.render_widget(Paragraph::new(status), chunks[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::test_utils::buffer_text;
    use ratatui::{backend::TestBackend, Terminal};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(view: &mut FormView, text: &str) {
        for c in text.chars() {
            view.handle_input(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_submit_carries_typed_values() {
        let mut view = FormView::new(FormDraft::new_division());
        type_text(&mut view, "Finance");

        let Some(FormAction::Submit(draft)) = view.handle_input(key(KeyCode::Enter)) else {
            panic!("expected a submit");
        };
        assert_eq!(draft.value("Division Name"), Some("Finance"));
        assert!(view.is_submitting());
        // Input is held until the result comes back
        assert_eq!(view.handle_input(key(KeyCode::Esc)), None);
    }

    #[test]
    fn test_focus_wraps() {
        let mut view = FormView::new(FormDraft::new_trainee());
        let count = view.draft().fields().len();
        view.handle_input(key(KeyCode::BackTab));
        assert_eq!(view.focus(), count - 1);
        view.handle_input(key(KeyCode::Tab));
        assert_eq!(view.focus(), 0);
    }

    #[test]
    fn test_error_focuses_field() {
        let mut view = FormView::new(FormDraft::new_trainee());
        view.handle_input(key(KeyCode::Enter));
        view.set_error(&FormError::Required("Email"));

        assert!(!view.is_submitting());
        assert_eq!(view.error(), Some("Email is required"));
        assert_eq!(view.draft().fields()[view.focus()].label, "Email");
    }

    #[test]
    fn test_paste_is_single_line() {
        let mut view = FormView::new(FormDraft::new_division());
        view.paste("Human\nResources");
        view.handle_input(key(KeyCode::Enter));
        assert_eq!(view.draft().value("Division Name"), Some("Human Resources"));
    }

    #[test]
    fn test_first_visible_follows_focus() {
        let mut view = FormView::new(FormDraft::new_trainee());
        assert_eq!(view.first_visible(4), 0);
        view.focus = 6;
        assert_eq!(view.first_visible(4), 3);
        assert_eq!(view.first_visible(0), 0);
    }

    #[test]
    fn test_render_title_and_error() {
        let mut view = FormView::new(FormDraft::new_division());
        view.set_failure("Disk full");
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        terminal
            .draw(|frame| view.render(frame, frame.area()))
            .unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Add Division"));
        assert!(text.contains("Division Name *"));
        assert!(text.contains("Disk full"));
    }
}
