//! Search bar for filtering table rows.
//!
//! The search term is matched case-insensitively against the searchable
//! values of each record. Matching text can be highlighted when rendering.

use ratatui::{
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Search term input state.
#[derive(Debug, Clone, Default)]
pub struct SearchInput {
    /// The current search term.
    query: String,
    /// Whether keystrokes go to the search term.
    active: bool,
}

impl SearchInput {
    /// Create an empty, inactive search input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start accepting keystrokes. The existing term is kept.
    pub fn activate(&mut self) {
        self.active = true;
    }

    /// Stop accepting keystrokes. The term stays applied.
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Check if the search input is accepting keystrokes.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Get the current term.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Get the lowercased term used for matching.
    pub fn normalized(&self) -> String {
        self.query.to_lowercase()
    }

    /// Check if the term is empty.
    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
    }

    /// Replace the term.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Append a character to the term.
    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
    }

    /// Remove the last character of the term.
    pub fn pop_char(&mut self) -> Option<char> {
        self.query.pop()
    }

    /// Clear the term and leave search mode.
    pub fn clear(&mut self) {
        self.query.clear();
        self.active = false;
    }
}

/// Check whether any of `fields` contains `needle`.
///
/// `needle` must already be lowercased. An empty needle matches everything.
pub fn matches_any<S: AsRef<str>>(fields: &[S], needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    fields
        .iter()
        .any(|field| field.as_ref().to_lowercase().contains(needle))
}

/// Highlight matching text in a string with the search query.
///
/// Returns a Line with spans that have highlighted style for matches.
pub fn highlight_text(text: &str, query: &str) -> Line<'static> {
    if query.is_empty() {
        return Line::from(text.to_string());
    }

    let text_lower = text.to_lowercase();
    let query_lower = query.to_lowercase();

    // Lowercasing can change byte lengths for some scripts; fall back to
    // plain text rather than slicing at a bad offset.
    if text_lower.len() != text.len() {
        return Line::from(text.to_string());
    }

    let mut spans = Vec::new();
    let mut last_end = 0;

    for (start, matched) in text_lower.match_indices(&query_lower) {
        if start > last_end {
            spans.push(Span::raw(text[last_end..start].to_string()));
        }

        let end = start + matched.len();
        spans.push(Span::styled(
            text[start..end].to_string(),
            Style::default()
                .bg(Color::Yellow)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ));

        last_end = end;
    }

    if last_end < text.len() {
        spans.push(Span::raw(text[last_end..].to_string()));
    }

    if spans.is_empty() {
        Line::from(text.to_string())
    } else {
        Line::from(spans)
    }
}

/// Render the search bar at the given area.
pub fn render_search_bar(frame: &mut Frame, area: Rect, search: &SearchInput) {
    let (text, style) = if search.is_active() {
        (
            format!("/{}", search.query()),
            Style::default().fg(Color::Yellow),
        )
    } else if search.is_empty() {
        (
            "Search... (press /)".to_string(),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        (
            format!("/{}", search.query()),
            Style::default().fg(Color::Gray),
        )
    };

    frame.render_widget(Paragraph::new(text).style(style), area);

    if search.is_active() {
        let offset = search.query().chars().count() as u16 + 1;
        frame.set_cursor_position(Position::new(area.x + offset, area.y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_input_new() {
        let search = SearchInput::new();
        assert!(!search.is_active());
        assert!(search.is_empty());
    }

    #[test]
    fn test_activate_keeps_query() {
        let mut search = SearchInput::new();
        search.set_query("ali");
        search.activate();
        assert!(search.is_active());
        assert_eq!(search.query(), "ali");
    }

    #[test]
    fn test_push_pop() {
        let mut search = SearchInput::new();
        search.push_char('a');
        search.push_char('b');
        assert_eq!(search.query(), "ab");
        assert_eq!(search.pop_char(), Some('b'));
        assert_eq!(search.pop_char(), Some('a'));
        assert_eq!(search.pop_char(), None);
    }

    #[test]
    fn test_clear_leaves_search_mode() {
        let mut search = SearchInput::new();
        search.activate();
        search.push_char('x');
        search.clear();
        assert!(!search.is_active());
        assert!(search.is_empty());
    }

    #[test]
    fn test_normalized_is_lowercase() {
        let mut search = SearchInput::new();
        search.set_query("IT Division");
        assert_eq!(search.normalized(), "it division");
    }

    #[test]
    fn test_matches_any() {
        let fields = vec!["Budi Santoso".to_string(), "Engineering".to_string()];
        assert!(matches_any(&fields, ""));
        assert!(matches_any(&fields, "santoso"));
        assert!(matches_any(&fields, "engin"));
        assert!(!matches_any(&fields, "finance"));
    }

    #[test]
    fn test_matches_any_no_fields() {
        let fields: Vec<String> = Vec::new();
        assert!(matches_any(&fields, ""));
        assert!(!matches_any(&fields, "a"));
    }

    #[test]
    fn test_highlight_text_empty_query() {
        let line = highlight_text("Hello world", "");
        assert_eq!(line.spans.len(), 1);
        assert_eq!(line.spans[0].content, "Hello world");
    }

    #[test]
    fn test_highlight_text_case_insensitive() {
        let line = highlight_text("Hello WORLD", "world");
        assert_eq!(line.spans.len(), 2);
        assert_eq!(line.spans[0].content, "Hello ");
        assert_eq!(line.spans[1].content, "WORLD");
        assert_eq!(line.spans[1].style.bg, Some(Color::Yellow));
    }

    #[test]
    fn test_highlight_text_multiple_matches() {
        let line = highlight_text("intern and intern", "intern");
        assert_eq!(line.spans.len(), 3);
        assert_eq!(line.spans[0].content, "intern");
        assert_eq!(line.spans[1].content, " and ");
        assert_eq!(line.spans[2].content, "intern");
    }

    #[test]
    fn test_highlight_text_no_match() {
        let line = highlight_text("Finance", "xyz");
        assert_eq!(line.spans.len(), 1);
        assert_eq!(line.spans[0].content, "Finance");
    }
}
