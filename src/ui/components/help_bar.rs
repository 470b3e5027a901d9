//! Bottom status bar: key hints on the left, session info on the right.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::events::{get_context_hints, KeyContext};
use crate::ui::theme;

/// Render the hints for `context`, with `status` right-aligned.
pub fn render_context_help(frame: &mut Frame, area: Rect, context: KeyContext, status: &str) {
    let status_width = (status.chars().count() as u16 + 1).min(area.width / 2);
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(status_width)])
        .split(area);

    frame.render_widget(
        Paragraph::new(Line::from(hint_spans(get_context_hints(context)))),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new(Span::styled(status.to_string(), Style::default().fg(theme::ACCENT)))
            .alignment(Alignment::Right),
        chunks[1],
    );
}

/// Split a hint string into spans, with bracketed keys highlighted.
fn hint_spans(hints: &str) -> Vec<Span<'static>> {
    let key_style = Style::default().fg(Color::Cyan);
    let text_style = Style::default().fg(Color::DarkGray);

    let mut spans = Vec::new();
    let mut rest = hints;
    while let Some(open) = rest.find('[') {
        let Some(close) = rest[open..].find(']').map(|i| open + i) else {
            break;
        };
        if open > 0 {
            spans.push(Span::styled(rest[..open].to_string(), text_style));
        }
        spans.push(Span::styled(rest[open..=close].to_string(), key_style));
        rest = &rest[close + 1..];
    }
    if !rest.is_empty() {
        spans.push(Span::styled(rest.to_string(), text_style));
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::test_utils::buffer_text;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_hint_spans_alternate() {
        let spans = hint_spans("[a] add  [?] help");
        let text: Vec<&str> = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, vec!["[a]", " add  ", "[?]", " help"]);
        assert_eq!(spans[0].style.fg, Some(Color::Cyan));
    }

    #[test]
    fn test_hint_spans_unclosed_bracket() {
        let spans = hint_spans("plain [open");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].content, "plain [open");
    }

    #[test]
    fn test_render_shows_status() {
        let mut terminal = Terminal::new(TestBackend::new(100, 1)).unwrap();
        terminal
            .draw(|frame| {
                render_context_help(frame, frame.area(), KeyContext::Form, "Administrator")
            })
            .unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("[Esc] cancel"));
        assert!(text.contains("Administrator"));
    }
}
