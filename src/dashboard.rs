//! Summary statistics shown on the dashboard.

use chrono::{Duration, NaiveDate, NaiveTime};

use crate::models::{Role, TraineeType};
use crate::store::DocumentStore;

/// Day-over-day change between two counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateChange {
    /// Percentage with two decimals, such as `"50.00%"`, or `"n/a"`.
    pub percentage: String,
    pub level_up: bool,
    pub level_down: bool,
}

/// Percentage change from `previous` to `current`.
///
/// With no previous value there is no meaningful ratio: two zeros are
/// reported as `0.00%`, any growth from zero as `n/a` going up.
pub fn rate_change(current: usize, previous: usize) -> RateChange {
    if previous == 0 {
        return if current == 0 {
            RateChange {
                percentage: "0.00%".to_string(),
                level_up: false,
                level_down: false,
            }
        } else {
            RateChange {
                percentage: "n/a".to_string(),
                level_up: true,
                level_down: false,
            }
        };
    }

    let result = (current as f64 - previous as f64) / previous as f64 * 100.0;
    RateChange {
        percentage: format!("{:.2}%", result),
        level_up: result > 0.0,
        level_down: result < 0.0,
    }
}

/// Everything the dashboard displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardStats {
    /// Logbooks dated today.
    pub present_today: usize,
    /// Logbooks dated yesterday.
    pub present_yesterday: usize,
    /// Today compared to yesterday.
    pub today_rate: RateChange,
    /// Active users with the trainee role.
    pub active_trainees: usize,
    pub active_interns: usize,
    pub active_part_timers: usize,
    /// Logbooks per day, oldest first.
    pub attendance: Vec<(NaiveDate, usize)>,
}

impl DashboardStats {
    /// Compute the statistics as of `today`.
    pub fn collect(store: &DocumentStore, today: NaiveDate) -> Self {
        let today_start = today.and_time(NaiveTime::MIN);
        let tomorrow_start = today_start + Duration::days(1);
        let yesterday_start = today_start - Duration::days(1);

        let present_today = store.count_logbooks_between(today_start, tomorrow_start);
        let present_yesterday = store.count_logbooks_between(yesterday_start, today_start);

        let active_of_type = |kind: TraineeType| {
            store.count_users(|u| u.is_active && u.trainee_type == Some(kind))
        };

        Self {
            present_today,
            present_yesterday,
            today_rate: rate_change(present_today, present_yesterday),
            active_trainees: store.count_users(|u| u.is_active && u.role == Role::Trainee),
            active_interns: active_of_type(TraineeType::Intern),
            active_part_timers: active_of_type(TraineeType::PartTime),
            attendance: store.logbook_counts_by_date(),
        }
    }

    /// The last `days` entries of the attendance series.
    pub fn recent_attendance(&self, days: usize) -> &[(NaiveDate, usize)] {
        let start = self.attendance.len().saturating_sub(days);
        &self.attendance[start..]
    }
}
