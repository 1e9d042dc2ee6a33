use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::classify::{is_overdue, parse_due_date, task_state, TaskState};
use crate::models::{FilterMode, SortOrder, Task};

/// The view inputs the UI controls produce. The displayed list is a pure
/// function of (cached tasks, query, now).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub struct ViewQuery {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub filter: FilterMode,
    #[serde(default)]
    pub sort: SortOrder,
}

/// Applies search, category filter, and due-date sort. Search is a trimmed
/// case-insensitive substring match over title and description. The sort is
/// stable; ties keep their original order.
pub fn visible_tasks(tasks: &[Task], query: &ViewQuery, now: NaiveDateTime) -> Vec<Task> {
    let needle = query.search.trim().to_lowercase();
    let mut list: Vec<Task> = tasks
        .iter()
        .filter(|task| {
            if needle.is_empty() {
                return true;
            }
            task.title.to_lowercase().contains(&needle)
                || task.description_text().to_lowercase().contains(&needle)
        })
        .filter(|task| match query.filter {
            FilterMode::All => true,
            FilterMode::Active => !task.completed,
            FilterMode::Completed => task.completed,
            FilterMode::Overdue => is_overdue(task, now),
        })
        .cloned()
        .collect();

    match query.sort {
        SortOrder::Asc => list.sort_by_key(due_sort_key),
        SortOrder::Desc => list.sort_by_key(|task| std::cmp::Reverse(due_sort_key(task))),
    }
    list
}

// Unparsable due dates sort as the epoch, matching the original UI's fallback.
fn due_sort_key(task: &Task) -> i64 {
    parse_due_date(&task.due_date)
        .map(|due| due.and_utc().timestamp())
        .unwrap_or(0)
}

/// A task plus its display state, as handed to the renderer.
#[derive(Debug, Clone, Serialize)]
pub struct TaskRow {
    #[serde(flatten)]
    pub task: Task,
    pub state: TaskState,
}

impl TaskRow {
    pub fn derive(task: Task, now: NaiveDateTime) -> Self {
        let state = task_state(&task, now);
        Self { task, state }
    }
}
