//! Theme and styling configuration.

use ratatui::style::{Color, Modifier, Style};

use crate::models::{Role, TraineeType};

/// Accent color used for titles, borders and the current page.
pub const ACCENT: Color = Color::Green;

/// Style for a trainee type badge.
pub fn trainee_type_style(kind: Option<TraineeType>) -> Style {
    match kind {
        Some(TraineeType::Intern) => Style::default().fg(Color::Green),
        Some(TraineeType::PartTime) => Style::default().fg(Color::Blue),
        _ => Style::default().fg(Color::Red),
    }
}

/// Style for a role badge.
pub fn role_style(role: Role) -> Style {
    match role {
        Role::Admin => Style::default().fg(Color::Blue),
        Role::SuperAdmin => Style::default().fg(Color::Yellow),
        _ => Style::default().fg(Color::Red),
    }
}

/// Style for a division cell; unassigned divisions are flagged in red.
pub fn division_style(assigned: bool) -> Style {
    if assigned {
        Style::default()
    } else {
        Style::default().fg(Color::Red)
    }
}

/// Icon for the active flag.
pub fn active_icon(active: bool) -> &'static str {
    if active {
        "✓"
    } else {
        "✗"
    }
}

/// Style for the active flag.
pub fn active_style(active: bool) -> Style {
    if active {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::Red)
    }
}

/// Style for disabled controls.
pub fn disabled() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Style for the highlighted (selected) table row.
pub fn selected_row() -> Style {
    Style::default()
        .bg(Color::DarkGray)
        .add_modifier(Modifier::BOLD)
}

/// Style for column headers.
pub fn header() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(ACCENT)
        .add_modifier(Modifier::BOLD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_colors() {
        assert_eq!(trainee_type_style(Some(TraineeType::Intern)).fg, Some(Color::Green));
        assert_eq!(trainee_type_style(None).fg, Some(Color::Red));
        assert_eq!(role_style(Role::SuperAdmin).fg, Some(Color::Yellow));
        assert_eq!(role_style(Role::Unknown).fg, Some(Color::Red));
    }

    #[test]
    fn test_active_icon() {
        assert_eq!(active_icon(true), "✓");
        assert_eq!(active_icon(false), "✗");
    }
}
