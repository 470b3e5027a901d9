//! Help panel listing keyboard shortcuts.
//!
//! Opened with `?` and closed with `?`, `q` or Escape. Long content scrolls.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

use crate::events::{get_keybindings_grouped, KeyContext, Keybinding};
use crate::ui::theme;

/// Actions that can be returned from the help view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HelpAction {
    Close,
}

/// The help panel.
pub struct HelpView {
    grouped_bindings: Vec<(KeyContext, Vec<Keybinding>)>,
    scroll: usize,
    /// Inner height from the last render.
    visible_height: usize,
}

impl HelpView {
    pub fn new() -> Self {
        Self {
            grouped_bindings: get_keybindings_grouped(),
            scroll: 0,
            visible_height: 0,
        }
    }

    /// Scroll back to the top.
    pub fn reset_scroll(&mut self) {
        self.scroll = 0;
    }

    fn total_lines(&self) -> usize {
        // Heading and blank line per section, one per binding, a blank line
        // after each section and the footer.
        self.grouped_bindings
            .iter()
            .map(|(_, bindings)| bindings.len() + 3)
            .sum::<usize>()
            + 1
    }

    fn max_scroll(&self) -> usize {
        self.total_lines().saturating_sub(self.visible_height)
    }

    /// Handle keyboard input. All keys are consumed while help is open.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<HelpAction> {
        let page = self.visible_height.saturating_sub(2).max(1);
        match (key.code, key.modifiers) {
            (KeyCode::Char('?'), _) | (KeyCode::Char('q'), KeyModifiers::NONE) | (KeyCode::Esc, _) => {
                return Some(HelpAction::Close)
            }
            (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => {
                self.scroll = (self.scroll + 1).min(self.max_scroll());
            }
            (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => {
                self.scroll = self.scroll.saturating_sub(1);
            }
            (KeyCode::Char('d'), KeyModifiers::CONTROL) | (KeyCode::PageDown, _) => {
                self.scroll = (self.scroll + page).min(self.max_scroll());
            }
            (KeyCode::Char('u'), KeyModifiers::CONTROL) | (KeyCode::PageUp, _) => {
                self.scroll = self.scroll.saturating_sub(page);
            }
            (KeyCode::Char('g'), KeyModifiers::NONE) | (KeyCode::Home, _) => self.scroll = 0,
            (KeyCode::Char('G'), _) | (KeyCode::End, _) => self.scroll = self.max_scroll(),
            _ => {}
        }
        None
    }

    /// Render the help panel over `area`.
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(" Help - Keyboard Shortcuts ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        self.visible_height = inner.height as usize;
        self.scroll = self.scroll.min(self.max_scroll());

        frame.render_widget(
            Paragraph::new(self.content_lines()).scroll((self.scroll as u16, 0)),
            inner,
        );

        if self.total_lines() > self.visible_height && area.width > 0 {
            let mut state = ScrollbarState::new(self.max_scroll()).position(self.scroll);
            let scrollbar_area = Rect::new(
                area.x + area.width - 1,
                area.y + 1,
                1,
                area.height.saturating_sub(2),
            );
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(Some("▲"))
                    .end_symbol(Some("▼")),
                scrollbar_area,
                &mut state,
            );
        }
    }

    fn content_lines(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for (context, bindings) in &self.grouped_bindings {
            lines.push(Line::from(Span::styled(
                format!("── {} ──", context.display()),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::raw(""));
            for binding in bindings {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("{:>14}", binding.key),
                        Style::default()
                            .fg(theme::ACCENT)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::raw(binding.description),
                ]));
            }
            lines.push(Line::raw(""));
        }
        lines.push(Line::from(Span::styled(
            "Press ?, q, or Esc to close",
            theme::disabled(),
        )));
        lines
    }
}

impl Default for HelpView {
    fn default() -> Self {
        Self::new()
    }
}
