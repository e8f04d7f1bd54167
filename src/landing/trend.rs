//! Daily load trend reconstructed from task timestamps.
//!
//! A task counts toward a day when it existed at the end of that day and
//! was not yet completed: `created_at <= day_end` and `completed_at` is
//! unset or later than `day_end`.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::common::percentage;
use crate::config::MAX_TREND_DAYS;
use crate::core::Task;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub active_tasks: usize,
    /// Open tasks as a share of team capacity, clamped to 100.
    pub load_percent: u32,
}

/// Last millisecond of `date` in UTC.
pub fn day_end(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc() + TimeDelta::days(1) - TimeDelta::milliseconds(1)
}

/// The `days` calendar days ending with the day of `now`, oldest first.
/// At most [`MAX_TREND_DAYS`] days; days before the calendar's range are skipped.
pub fn trend_window(now: DateTime<Utc>, days: usize) -> Vec<NaiveDate> {
    let today = now.date_naive();
    (0..days.min(MAX_TREND_DAYS) as i64)
        .rev()
        .filter_map(|back| today.checked_sub_signed(TimeDelta::days(back)))
        .collect()
}

/// Workforce capacity in concurrent tasks; 1 when there is no workforce.
pub fn capacity(employee_count: usize, team_capacity_factor: f64) -> f64 {
    if employee_count == 0 {
        1.0
    } else {
        employee_count as f64 * team_capacity_factor
    }
}

fn load_percent(active_tasks: usize, capacity: f64) -> u32 {
    let value = percentage(active_tasks as f64, capacity).round();
    value.clamp(0.0, 100.0) as u32
}

/// One point per day in `window`, counting `tasks` open at each day's end.
pub fn daily_trend(tasks: &[Task], window: &[NaiveDate], capacity: f64) -> Vec<TrendPoint> {
    window
        .iter()
        .map(|&date| {
            let end = day_end(date);
            let active_tasks = tasks.iter().filter(|task| task.was_open_at(end)).count();
            TrendPoint {
                date,
                active_tasks,
                load_percent: load_percent(active_tasks, capacity),
            }
        })
        .collect()
}
