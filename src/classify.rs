use chrono::{Duration, NaiveDateTime};

use crate::models::Task;

/// Wire format for due timestamps. The backend stores no timezone, so due
/// dates are naive and compared against naive local time.
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// What the datetime-local input produces before normalization.
const DUE_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

pub fn parse_due_date(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, DUE_DATE_FORMAT).ok()
}

/// Normalizes a form due date to second precision for submission.
///
/// The datetime-local input yields `YYYY-MM-DDTHH:mm`; the backend expects
/// `YYYY-MM-DDTHH:mm:ss`. Input that already carries seconds passes through.
pub fn normalize_due_input(raw: &str) -> Result<String, String> {
    let raw = raw.trim();
    if NaiveDateTime::parse_from_str(raw, DUE_INPUT_FORMAT).is_ok() {
        return Ok(format!("{raw}:00"));
    }
    if NaiveDateTime::parse_from_str(raw, DUE_DATE_FORMAT).is_ok() {
        return Ok(raw.to_string());
    }
    Err(format!("invalid due date: {raw}"))
}

/// A completed task is never overdue; an unparsable due date is never overdue.
pub fn is_overdue(task: &Task, now: NaiveDateTime) -> bool {
    if task.completed {
        return false;
    }
    match parse_due_date(&task.due_date) {
        Some(due) => due < now,
        None => false,
    }
}

/// True iff the task is due within the next `window_minutes`, inclusive at
/// both ends: `0 <= due - now <= window`. Drives the one-time reminder only.
pub fn is_due_soon(task: &Task, now: NaiveDateTime, window_minutes: i64) -> bool {
    if task.completed {
        return false;
    }
    let Some(due) = parse_due_date(&task.due_date) else {
        return false;
    };
    let diff = due - now;
    diff >= Duration::zero() && diff <= Duration::minutes(window_minutes)
}

/// Display-relevant task state. Overdue is computed, never stored.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    Active,
    Overdue,
    Completed,
}

pub fn task_state(task: &Task, now: NaiveDateTime) -> TaskState {
    if task.completed {
        return TaskState::Completed;
    }
    if is_overdue(task, now) {
        return TaskState::Overdue;
    }
    TaskState::Active
}
