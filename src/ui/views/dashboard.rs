//! Dashboard: attendance and trainee counts at a glance.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};

use super::list::LOADING_MESSAGE;
use crate::dashboard::{DashboardStats, RateChange};
use crate::ui::theme;

const BAR_WIDTH: u16 = 5;
const BAR_GAP: u16 = 1;

/// Actions that can be returned from the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardAction {
    Reload,
}

/// The dashboard screen.
#[derive(Debug, Default)]
pub struct DashboardView {
    stats: Option<DashboardStats>,
}

impl DashboardView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show freshly loaded statistics.
    pub fn set_stats(&mut self, stats: DashboardStats) {
        self.stats = Some(stats);
    }

    /// Drop the statistics until the next load.
    pub fn set_loading(&mut self) {
        self.stats = None;
    }

    pub fn stats(&self) -> Option<&DashboardStats> {
        self.stats.as_ref()
    }

    pub fn handle_input(&mut self, key: KeyEvent) -> Option<DashboardAction> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('r'), KeyModifiers::NONE) => Some(DashboardAction::Reload),
            _ => None,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Dashboard ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(stats) = &self.stats else {
            frame.render_widget(
                Paragraph::new(LOADING_MESSAGE).alignment(Alignment::Center),
                inner,
            );
            return;
        };

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(6)])
            .split(inner);
        let cards = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Fill(1); 4])
            .split(rows[0]);

        render_card(
            frame,
            cards[0],
            "Present Today",
            stats.present_today,
            Some(rate_line(&stats.today_rate)),
        );
        render_card(frame, cards[1], "Active Trainees", stats.active_trainees, None);
        render_card(frame, cards[2], "Active Interns", stats.active_interns, None);
        render_card(frame, cards[3], "Active Part Time", stats.active_part_timers, None);

        render_attendance(frame, rows[1], stats);
    }
}

/// "▲ 50.00% vs yesterday", colored by direction.
fn rate_line(rate: &RateChange) -> Line<'static> {
    let (arrow, color) = if rate.level_up {
        ("▲ ", Color::Green)
    } else if rate.level_down {
        ("▼ ", Color::Red)
    } else {
        ("", Color::Gray)
    };
    Line::from(vec![
        Span::styled(
            format!("{}{}", arrow, rate.percentage),
            Style::default().fg(color),
        ),
        Span::styled(" vs yesterday", theme::disabled()),
    ])
}

fn render_card(frame: &mut Frame, area: Rect, title: &str, value: usize, footer: Option<Line<'static>>) {
    let mut lines = vec![Line::from(Span::styled(
        value.to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    if let Some(footer) = footer {
        lines.push(footer);
    }

    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(theme::disabled());
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center),
        area,
    );
}

fn render_attendance(frame: &mut Frame, area: Rect, stats: &DashboardStats) {
    let block = Block::default()
        .title(" Attendance ")
        .borders(Borders::ALL)
        .border_style(theme::disabled());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let days = (inner.width / (BAR_WIDTH + BAR_GAP)).max(1) as usize;
    let recent = stats.recent_attendance(days);
    if recent.is_empty() {
        frame.render_widget(
            Paragraph::new("No attendance recorded").alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let bars: Vec<Bar> = recent
        .iter()
        .map(|(date, count)| {
            Bar::default()
                .value(*count as u64)
                .label(Line::from(date.format("%m-%d").to_string()))
                .style(Style::default().fg(theme::ACCENT))
        })
        .collect();

    frame.render_widget(
        BarChart::default()
            .data(BarGroup::default().bars(&bars))
            .bar_width(BAR_WIDTH)
            .bar_gap(BAR_GAP),
        inner,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::rate_change;
    use crate::ui::test_utils::buffer_text;
    use chrono::NaiveDate;
    use ratatui::{backend::TestBackend, Terminal};

    fn stats() -> DashboardStats {
        DashboardStats {
            present_today: 3,
            present_yesterday: 2,
            today_rate: rate_change(3, 2),
            active_trainees: 7,
            active_interns: 4,
            active_part_timers: 2,
            attendance: vec![
                (NaiveDate::from_ymd_opt(2024, 3, 3).unwrap(), 2),
                (NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(), 3),
            ],
        }
    }

    fn draw(view: &DashboardView) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal
            .draw(|frame| view.render(frame, frame.area()))
            .unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn test_rate_line_direction() {
        let up = rate_line(&rate_change(3, 2));
        assert_eq!(up.spans[0].content, "▲ 50.00%");
        let down = rate_line(&rate_change(1, 2));
        assert_eq!(down.spans[0].content, "▼ -50.00%");
        let flat = rate_line(&rate_change(0, 0));
        assert_eq!(flat.spans[0].content, "0.00%");
    }

    #[test]
    fn test_loading_until_stats_arrive() {
        let mut view = DashboardView::new();
        assert!(draw(&view).contains(LOADING_MESSAGE));

        view.set_stats(stats());
        let text = draw(&view);
        assert!(text.contains("Present Today"));
        assert!(text.contains("50.00%"));
        assert!(text.contains("03-04"));
    }

    #[test]
    fn test_reload_key() {
        let mut view = DashboardView::new();
        let key = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE);
        assert_eq!(view.handle_input(key), Some(DashboardAction::Reload));
    }
}
