//! Single-line text input for form fields.
//!
//! The cursor counts characters, not bytes, so names and addresses with
//! non-ASCII letters edit correctly.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Position, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::theme;

/// A text input widget.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    /// Cursor position in characters.
    cursor: usize,
}

impl TextInput {
    /// Create a new empty input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new input with an initial value and the cursor at the end.
    pub fn with_value(value: impl Into<String>) -> Self {
        let mut input = Self::new();
        input.set_value(value);
        input
    }

    /// Get the current value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Set the value and move the cursor to the end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.len();
    }

    /// Clear the input.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Check if the input is empty.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn len(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map_or(self.value.len(), |(i, _)| i)
    }

    /// Insert text at the cursor.
    pub fn insert_str(&mut self, text: &str) {
        let at = self.byte_index(self.cursor);
        self.value.insert_str(at, text);
        self.cursor += text.chars().count();
    }

    fn insert_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    fn remove_at(&mut self, char_index: usize) {
        let at = self.byte_index(char_index);
        if at < self.value.len() {
            self.value.remove(at);
        }
    }

    /// Handle keyboard input.
    ///
    /// Returns true if the value changed.
    pub fn handle_input(&mut self, key: KeyEvent) -> bool {
        match (key.code, key.modifiers) {
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                let changed = !self.value.is_empty();
                self.clear();
                changed
            }
            (KeyCode::Char('a'), KeyModifiers::CONTROL) | (KeyCode::Home, _) => {
                self.cursor = 0;
                false
            }
            (KeyCode::Char('e'), KeyModifiers::CONTROL) | (KeyCode::End, _) => {
                self.cursor = self.len();
                false
            }
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                self.insert_char(c);
                true
            }
            (KeyCode::Backspace, _) => {
                if self.cursor == 0 {
                    return false;
                }
                self.cursor -= 1;
                self.remove_at(self.cursor);
                true
            }
            (KeyCode::Delete, _) => {
                if self.cursor >= self.len() {
                    return false;
                }
                self.remove_at(self.cursor);
                true
            }
            (KeyCode::Left, _) => {
                self.cursor = self.cursor.saturating_sub(1);
                false
            }
            (KeyCode::Right, _) => {
                self.cursor = (self.cursor + 1).min(self.len());
                false
            }
            _ => false,
        }
    }

    /// Render the input as a bordered field with its label as the title.
    ///
    /// The hint, if any, is shown in the bottom border.
    pub fn render(&self, frame: &mut Frame, area: Rect, label: &str, hint: &str, focused: bool) {
        let border = if focused {
            Style::default().fg(theme::ACCENT)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(format!(" {} ", label));
        if !hint.is_empty() {
            block = block.title_bottom(Line::from(Span::styled(
                format!(" {} ", hint),
                theme::disabled(),
            )));
        }

        frame.render_widget(Paragraph::new(self.value.as_str()).block(block), area);

        if focused {
            let prefix: String = self.value.chars().take(self.cursor).collect();
            let x = area.x + 1 + Line::raw(prefix).width() as u16;
            frame.set_cursor_position(Position::new(
                x.min(area.x + area.width.saturating_sub(2)),
                area.y + 1,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut input = TextInput::new();
        for c in "Rina".chars() {
            assert!(input.handle_input(key(KeyCode::Char(c))));
        }
        assert_eq!(input.value(), "Rina");
        assert!(input.handle_input(key(KeyCode::Backspace)));
        assert_eq!(input.value(), "Rin");
        assert_eq!(input.cursor(), 3);
    }

    #[test]
    fn test_multibyte_editing() {
        let mut input = TextInput::with_value("Jalan Café");
        input.handle_input(key(KeyCode::Left));
        input.handle_input(key(KeyCode::Backspace));
        assert_eq!(input.value(), "Jalan Caé");
        input.handle_input(key(KeyCode::Char('f')));
        assert_eq!(input.value(), "Jalan Café");
        input.handle_input(key(KeyCode::Delete));
        assert_eq!(input.value(), "Jalan Caf");
    }

    #[test]
    fn test_home_end_and_insert() {
        let mut input = TextInput::with_value("bc");
        input.handle_input(key(KeyCode::Home));
        input.handle_input(key(KeyCode::Char('a')));
        input.handle_input(key(KeyCode::End));
        input.insert_str("de");
        assert_eq!(input.value(), "abcde");
        assert_eq!(input.cursor(), 5);
    }

    #[test]
    fn test_ctrl_u_clears() {
        let mut input = TextInput::with_value("text");
        assert!(input.handle_input(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL)));
        assert!(input.is_empty());
        assert!(!input.handle_input(key(KeyCode::Backspace)));
    }
}
