use std::fmt;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Task priority. Stored on the wire as 1, 2 or 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[derive(Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Priority {
    #[default]
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("priority must be 1, 2 or 3 (got {0})")]
pub struct InvalidPriority(pub u8);

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    /// Numeric value used by the store
    pub fn value(self) -> u8 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
        }
    }

    /// Human-readable label, always derived from the numeric value
    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    /// One step up, saturating at High
    pub fn raise(self) -> Priority {
        match self {
            Priority::Low => Priority::Medium,
            _ => Priority::High,
        }
    }

    /// One step down, saturating at Low
    pub fn lower(self) -> Priority {
        match self {
            Priority::High => Priority::Medium,
            _ => Priority::Low,
        }
    }
}

impl TryFrom<u8> for Priority {
    type Error = InvalidPriority;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Priority::Low),
            2 => Ok(Priority::Medium),
            3 => Ok(Priority::High),
            other => Err(InvalidPriority(other)),
        }
    }
}

impl From<Priority> for u8 {
    fn from(p: Priority) -> u8 {
        p.value()
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single task as held by the client.
///
/// `id` is assigned by the store; a task built from the form has none until
/// the create call returns.
#[derive(Debug, Clone, PartialEq)]
#[derive(Serialize, Deserialize)]
#[serde(from = "TaskRecord", into = "TaskRecord")]
pub struct Task {
    pub id: Option<u64>,
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub due: DateTime<Local>,
    pub completed: bool,
}

impl Task {
    /// A new, unsaved, incomplete task with Low priority
    pub fn new(title: impl Into<String>, due: DateTime<Local>) -> Self {
        Task {
            id: None,
            title: title.into(),
            description: None,
            priority: Priority::default(),
            due,
            completed: false,
        }
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    pub fn priority_display(&self) -> &'static str {
        self.priority.label()
    }
}

/// Wire shape of a task (camelCase JSON).
///
/// `priorityDisplay` is written from `priority` and ignored when reading.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<u64>,
    title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    priority: Priority,
    #[serde(default, skip_deserializing)]
    priority_display: String,
    #[serde(with = "due_date")]
    due_date: DateTime<Local>,
    #[serde(default)]
    completed: bool,
}

impl From<TaskRecord> for Task {
    fn from(r: TaskRecord) -> Self {
        Task {
            id: r.id,
            title: r.title,
            description: r.description,
            priority: r.priority,
            due: r.due_date,
            completed: r.completed,
        }
    }
}

impl From<Task> for TaskRecord {
    fn from(t: Task) -> Self {
        TaskRecord {
            id: t.id,
            title: t.title,
            description: t.description,
            priority: t.priority,
            priority_display: t.priority.label().to_string(),
            due_date: t.due,
            completed: t.completed,
        }
    }
}

/// End of the given calendar day (23:59:59.999) in local time.
///
/// Returns `None` only if that instant does not exist locally.
pub fn end_of_day(date: NaiveDate) -> Option<DateTime<Local>> {
    let naive = date.and_hms_milli_opt(23, 59, 59, 999)?;
    Local.from_local_datetime(&naive).earliest()
}

/// Parse a date-like string as sent by the store.
///
/// Accepts RFC 3339, a naive date-time (local), or a bare `YYYY-MM-DD`
/// (end of that day, local).
pub fn parse_due(s: &str) -> Option<DateTime<Local>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Local.from_local_datetime(&naive).earliest();
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(end_of_day)
}

mod due_date {
    use super::*;

    pub fn serialize<S: Serializer>(dt: &DateTime<Local>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, false))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Local>, D::Error> {
        d.deserialize_any(DueVisitor)
    }

    struct DueVisitor;

    impl DueVisitor {
        fn from_millis<E: de::Error>(ms: i64) -> Result<DateTime<Local>, E> {
            DateTime::from_timestamp_millis(ms)
                .map(|utc| utc.with_timezone(&Local))
                .ok_or_else(|| E::custom(format!("timestamp out of range: {ms}")))
        }
    }

    impl<'de> Visitor<'de> for DueVisitor {
        type Value = DateTime<Local>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a date string or a millisecond timestamp")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            parse_due(v).ok_or_else(|| E::custom(format!("invalid due date: {v:?}")))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Self::from_millis(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            let ms = i64::try_from(v).map_err(|_| E::custom("timestamp out of range"))?;
            Self::from_millis(ms)
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Self::from_millis(v as i64)
        }
    }
}
