use chrono::{DateTime, Local};
use serde::Serialize;

use crate::model::task::Task;
use crate::ops::stats::{TaskStats, due_info};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

/// A task as printed by `td list --json`: the wire fields plus the
/// due-date information the TUI shows next to each row
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskJson {
    pub id: Option<u64>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub priority: &'static str,
    pub due_date: String,
    pub completed: bool,
    pub days_remaining: i64,
    pub overdue: bool,
    pub due_soon: bool,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn task_to_json(task: &Task, now: DateTime<Local>) -> TaskJson {
    let info = due_info(task, now);
    TaskJson {
        id: task.id,
        title: task.title.clone(),
        description: task.description.clone().filter(|d| !d.is_empty()),
        priority: task.priority_display(),
        due_date: task.due.to_rfc3339(),
        completed: task.completed,
        days_remaining: info.days_remaining,
        overdue: info.is_overdue,
        due_soon: info.due_soon,
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// Format a single task as a one-line summary
pub fn format_task_line(task: &Task, now: DateTime<Local>) -> String {
    let check = if task.completed { 'x' } else { ' ' };
    let id_str = task.id.map(|id| format!("{} ", id)).unwrap_or_default();
    let mut line = format!(
        "[{}] {}{} ({}) due {}",
        check,
        id_str,
        task.title,
        task.priority_display().to_lowercase(),
        task.due.format("%Y-%m-%d"),
    );
    if !task.completed {
        line.push_str(", ");
        line.push_str(&due_info(task, now).label());
    }
    line
}

/// Format the result of a list call, descriptions indented under titles
pub fn format_task_listing(tasks: &[Task], now: DateTime<Local>) -> Vec<String> {
    if tasks.is_empty() {
        return vec!["no tasks".to_string()];
    }
    let mut lines = Vec::new();
    for task in tasks {
        lines.push(format_task_line(task, now));
        if let Some(desc) = task.description.as_deref().filter(|d| !d.is_empty()) {
            for l in desc.lines() {
                lines.push(format!("    {}", l));
            }
        }
    }
    lines
}

pub fn format_stats(stats: &TaskStats) -> Vec<String> {
    vec![
        format!("Total      {:>4}", stats.total),
        format!(
            "Completed  {:>4}  ({}%)",
            stats.completed, stats.completion_rate
        ),
        format!("Upcoming   {:>4}", stats.upcoming),
        format!("Overdue    {:>4}", stats.overdue),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Priority;
    use crate::model::task::end_of_day;
    use chrono::{NaiveDate, TimeZone};
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 6, 10, 9, 0, 0).unwrap()
    }

    fn due(day: u32) -> DateTime<Local> {
        end_of_day(NaiveDate::from_ymd_opt(2025, 6, day).unwrap()).unwrap()
    }

    #[test]
    fn listing_lines() {
        let tasks = vec![
            Task::new("Pay rent", due(8))
                .with_id(1)
                .with_priority(Priority::High),
            Task::new("Buy milk", due(11))
                .with_id(2)
                .with_priority(Priority::Medium)
                .with_description("2 liters\nsemi-skimmed"),
            Task::new("Read book", due(20)).with_id(3).completed(true),
            Task::new("Draft", due(10)),
        ];
        assert_eq!(
            format_task_listing(&tasks, now()),
            vec![
                "[ ] 1 Pay rent (high) due 2025-06-08, 2 days overdue",
                "[ ] 2 Buy milk (medium) due 2025-06-11, Tomorrow",
                "    2 liters",
                "    semi-skimmed",
                "[x] 3 Read book (low) due 2025-06-20",
                "[ ] Draft (low) due 2025-06-10, Today",
            ]
        );
    }

    #[test]
    fn empty_listing() {
        assert_eq!(format_task_listing(&[], now()), vec!["no tasks"]);
    }

    #[test]
    fn stats_block() {
        let stats = TaskStats {
            total: 3,
            completed: 1,
            completion_rate: 33,
            upcoming: 1,
            overdue: 1,
        };
        assert_eq!(
            format_stats(&stats),
            vec![
                "Total         3",
                "Completed     1  (33%)",
                "Upcoming      1",
                "Overdue       1",
            ]
        );
    }

    #[test]
    fn json_carries_due_info() {
        let task = Task::new("Pay rent", due(8))
            .with_id(1)
            .with_priority(Priority::High);
        let value = serde_json::to_value(task_to_json(&task, now())).unwrap();
        assert_eq!(value["id"], 1);
        assert_eq!(value["priority"], "High");
        assert_eq!(value["overdue"], true);
        assert_eq!(value["dueSoon"], false);
        assert_eq!(value["daysRemaining"], -2);
        assert!(value.get("description").is_none());
    }
}
