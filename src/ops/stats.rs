use chrono::{DateTime, Local};
use serde::Serialize;

use crate::model::task::Task;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Dashboard counts for a task collection at a given instant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    /// Percentage of completed tasks, rounded; 0 for an empty collection
    pub completion_rate: u32,
    pub upcoming: usize,
    pub overdue: usize,
}

/// Compute dashboard counts. A task due exactly at `now` is neither upcoming
/// nor overdue.
pub fn stats<'a, I>(tasks: I, now: DateTime<Local>) -> TaskStats
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut s = TaskStats::default();
    for task in tasks {
        s.total += 1;
        if task.completed {
            s.completed += 1;
        } else if task.due > now {
            s.upcoming += 1;
        } else if task.due < now {
            s.overdue += 1;
        }
    }
    s.completion_rate = completion_rate(s.completed, s.total);
    s
}

fn completion_rate(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (completed as f64 / total as f64 * 100.0).round() as u32
}

/// Per-row due-date information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DueInfo {
    pub is_overdue: bool,
    /// Whole days until due, rounded down (negative once past)
    pub days_remaining: i64,
    pub due_soon: bool,
}

impl DueInfo {
    pub fn label(&self) -> String {
        days_label(self.days_remaining)
    }
}

pub fn due_info(task: &Task, now: DateTime<Local>) -> DueInfo {
    let is_overdue = !task.completed && task.due < now;
    let days_remaining = (task.due - now)
        .num_milliseconds()
        .div_euclid(MILLIS_PER_DAY);
    DueInfo {
        is_overdue,
        days_remaining,
        due_soon: !task.completed && !is_overdue && days_remaining <= 3,
    }
}

/// "Today", "Tomorrow", "N days left", "Yesterday" or "N days overdue"
pub fn days_label(days: i64) -> String {
    match days {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        -1 => "Yesterday".to_string(),
        d if d > 1 => format!("{} days left", d),
        d => format!("{} days overdue", d.abs()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use insta::assert_snapshot;

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn due_in(hours: i64) -> Task {
        Task::new("t", now() + Duration::hours(hours))
    }

    #[test]
    fn empty_collection() {
        let none: Vec<Task> = Vec::new();
        let s = stats(&none, now());
        assert_eq!(s, TaskStats::default());
        assert_eq!(s.completion_rate, 0);
    }

    #[test]
    fn counts_and_rate() {
        let tasks = vec![
            due_in(5).completed(true),
            due_in(-5),
            due_in(48),
            due_in(0),
        ];
        let s = stats(&tasks, now());
        assert_eq!(s.total, 4);
        assert_eq!(s.completed, 1);
        assert_eq!(s.completion_rate, 25);
        assert_eq!(s.upcoming, 1);
        assert_eq!(s.overdue, 1);
    }

    #[test]
    fn rate_rounds_to_nearest() {
        let tasks = vec![due_in(1).completed(true), due_in(1).completed(true), due_in(1)];
        assert_eq!(stats(&tasks, now()).completion_rate, 67);
        let tasks = vec![due_in(1).completed(true), due_in(1), due_in(1)];
        assert_eq!(stats(&tasks, now()).completion_rate, 33);
    }

    #[test]
    fn incomplete_tasks_fall_in_exactly_one_bucket() {
        let tasks: Vec<Task> = (-72..=72).step_by(6).map(due_in).collect();
        let s = stats(&tasks, now());
        let at_now = tasks.iter().filter(|t| t.due == now()).count();
        assert_eq!(at_now, 1);
        assert_eq!(s.upcoming + s.overdue + at_now, s.total);
        assert!(s.completed <= s.total);
    }

    #[test]
    fn completed_tasks_are_never_overdue() {
        let info = due_info(&due_in(-30).completed(true), now());
        assert!(!info.is_overdue);
        assert!(!info.due_soon);
    }

    #[test]
    fn days_remaining_floors() {
        assert_eq!(due_info(&due_in(11), now()).days_remaining, 0);
        assert_eq!(due_info(&due_in(35), now()).days_remaining, 1);
        assert_eq!(due_info(&due_in(-1), now()).days_remaining, -1);
        assert_eq!(due_info(&due_in(-25), now()).days_remaining, -2);
        assert_eq!(due_info(&due_in(0), now()).days_remaining, 0);
    }

    #[test]
    fn due_soon_window() {
        assert!(due_info(&due_in(80), now()).due_soon);
        assert!(!due_info(&due_in(24 * 4 + 1), now()).due_soon);
        let past = due_info(&due_in(-2), now());
        assert!(past.is_overdue);
        assert!(!past.due_soon);
    }

    #[test]
    fn labels() {
        assert_snapshot!(days_label(0), @"Today");
        assert_snapshot!(days_label(1), @"Tomorrow");
        assert_snapshot!(days_label(5), @"5 days left");
        assert_snapshot!(days_label(-1), @"Yesterday");
        assert_snapshot!(days_label(-4), @"4 days overdue");
    }
}
