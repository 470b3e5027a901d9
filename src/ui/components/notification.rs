//! Toast notifications for transient feedback.
//!
//! Toasts stack in the bottom-right corner and expire on their own; the app
//! prunes them on every tick.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const MAX_VISIBLE: usize = 3;
const TOAST_WIDTH: u16 = 50;

/// The type of notification, which determines its appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationType {
    Info,
    Success,
    Error,
}

impl NotificationType {
    /// Get the icon for this notification type.
    pub fn icon(&self) -> &'static str {
        match self {
            NotificationType::Info => "ℹ",
            NotificationType::Success => "✓",
            NotificationType::Error => "✗",
        }
    }

    /// Get the color for this notification type.
    pub fn color(&self) -> Color {
        match self {
            NotificationType::Info => Color::Blue,
            NotificationType::Success => Color::Green,
            NotificationType::Error => Color::Red,
        }
    }

    fn lifetime(&self) -> Duration {
        match self {
            NotificationType::Error => Duration::from_secs(5),
            _ => Duration::from_secs(3),
        }
    }
}

/// A single notification message.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub notification_type: NotificationType,
    created_at: Instant,
    duration: Duration,
}

impl Notification {
    /// Create a notification with the default lifetime for its type.
    pub fn new(message: impl Into<String>, notification_type: NotificationType) -> Self {
        Self {
            message: message.into(),
            notification_type,
            created_at: Instant::now(),
            duration: notification_type.lifetime(),
        }
    }

    /// Override how long the notification stays visible.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Check if the notification has expired.
    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() > self.duration
    }

    /// Rows needed to show the message at `inner_width` columns, borders included.
    fn height(&self, inner_width: usize) -> u16 {
        // icon + space
        let text_len = self.message.chars().count() + 2;
        let lines = if inner_width > 0 {
            text_len.div_ceil(inner_width)
        } else {
            1
        };
        lines as u16 + 2
    }
}

/// The visible notifications, newest last.
#[derive(Debug, Default)]
pub struct NotificationManager {
    notifications: VecDeque<Notification>,
}

impl NotificationManager {
    /// Create an empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a notification, dropping the oldest beyond the visible limit.
    pub fn push(&mut self, notification: Notification) {
        self.notifications.push_back(notification);
        while self.notifications.len() > MAX_VISIBLE {
            self.notifications.pop_front();
        }
    }

    /// Add an info notification.
    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Notification::new(message, NotificationType::Info));
    }

    /// Add a success notification.
    pub fn success(&mut self, message: impl Into<String>) {
        self.push(Notification::new(message, NotificationType::Success));
    }

    /// Add an error notification.
    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Notification::new(message, NotificationType::Error));
    }

    /// Remove expired notifications.
    pub fn tick(&mut self) {
        self.notifications.retain(|n| !n.is_expired());
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    /// Get an iterator over the notifications.
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.iter()
    }

    /// Render the notifications stacked in the bottom-right corner of `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if self.notifications.is_empty() {
            return;
        }

        let width = TOAST_WIDTH.min(area.width.saturating_sub(4));
        let inner_width = width.saturating_sub(4) as usize;
        let x = area.x + area.width.saturating_sub(width + 2);
        let mut bottom = area.y + area.height.saturating_sub(1);

        // Newest at the bottom, older ones stacked above it
        for notification in self.notifications.iter().rev() {
            let height = notification.height(inner_width);
            if bottom < area.y + height {
                break;
            }
            bottom -= height;
            render_notification(notification, frame, Rect::new(x, bottom, width, height));
        }
    }
}

fn render_notification(notification: &Notification, frame: &mut Frame, area: Rect) {
    frame.render_widget(Clear, area);

    let kind = notification.notification_type;
    let style = Style::default().fg(kind.color());
    let text = Line::from(vec![
        Span::styled(format!("{} ", kind.icon()), style.add_modifier(Modifier::BOLD)),
        Span::styled(notification.message.as_str(), style),
    ]);

    let block = Block::default().borders(Borders::ALL).border_style(style);
    frame.render_widget(
        Paragraph::new(text).block(block).wrap(Wrap { trim: true }),
        area,
    );
}
