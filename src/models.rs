use serde::{Deserialize, Serialize};

pub type TaskId = i64;

/// A task as the backend serves it. Field names follow the REST contract
/// (`dueDate` etc.), so this type doubles as the PUT body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// `YYYY-MM-DDTHH:mm:ss`, no timezone.
    pub due_date: String,
    pub completed: bool,
}

impl Task {
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

/// Creation payload. The backend contract requires the literal
/// `completed: false` and `notificationSent: false` fields on POST.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub due_date: String,
    pub completed: bool,
    pub notification_sent: bool,
}

impl TaskDraft {
    pub fn new(title: String, description: String, due_date: String) -> Self {
        Self {
            title,
            description,
            due_date,
            completed: false,
            notification_sent: false,
        }
    }
}

/// Category filter for the derived view. Tokens match what the UI sends.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FilterMode {
    #[default]
    All,
    Active,
    Completed,
    Overdue,
}

/// Sort direction over the due timestamp.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct Settings {
    #[serde(default = "default_backend_base_url")]
    pub backend_base_url: String,
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    #[serde(default = "default_remind_window_minutes")]
    pub remind_window_minutes: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend_base_url: default_backend_base_url(),
            poll_interval_secs: default_poll_interval_secs(),
            remind_window_minutes: default_remind_window_minutes(),
        }
    }
}

fn default_backend_base_url() -> String {
    "http://localhost:8081".to_string()
}

fn default_poll_interval_secs() -> u64 {
    10
}

fn default_remind_window_minutes() -> i64 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SettingsFile {
    pub schema_version: u32,
    pub settings: Settings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_serializes_with_wire_field_names() {
        let task = Task {
            id: 7,
            title: "pay rent".to_string(),
            description: Some("before noon".to_string()),
            due_date: "2026-03-01T09:30:00".to_string(),
            completed: false,
        };
        let value = serde_json::to_value(&task).expect("serialize task");
        assert_eq!(
            value,
            serde_json::json!({
              "id": 7,
              "title": "pay rent",
              "description": "before noon",
              "dueDate": "2026-03-01T09:30:00",
              "completed": false
            })
        );
    }

    #[test]
    fn task_deserializes_with_null_or_missing_description() {
        let with_null = r#"{"id":1,"title":"a","description":null,"dueDate":"2026-01-01T00:00:00","completed":false}"#;
        let task: Task = serde_json::from_str(with_null).expect("task with null description");
        assert_eq!(task.description, None);
        assert_eq!(task.description_text(), "");

        let missing = r#"{"id":2,"title":"b","dueDate":"2026-01-01T00:00:00","completed":true}"#;
        let task: Task = serde_json::from_str(missing).expect("task without description");
        assert_eq!(task.description, None);
        assert!(task.completed);
    }

    #[test]
    fn draft_carries_the_fixed_creation_flags() {
        let draft = TaskDraft::new(
            "title".to_string(),
            "desc".to_string(),
            "2026-03-01T09:30:00".to_string(),
        );
        let value = serde_json::to_value(&draft).expect("serialize draft");
        assert_eq!(
            value,
            serde_json::json!({
              "title": "title",
              "description": "desc",
              "dueDate": "2026-03-01T09:30:00",
              "completed": false,
              "notificationSent": false
            })
        );
    }

    #[test]
    fn filter_and_sort_tokens_match_the_ui() {
        let filter: FilterMode = serde_json::from_str("\"OVERDUE\"").expect("filter token");
        assert_eq!(filter, FilterMode::Overdue);
        let sort: SortOrder = serde_json::from_str("\"DESC\"").expect("sort token");
        assert_eq!(sort, SortOrder::Desc);

        assert_eq!(
            serde_json::to_string(&FilterMode::Active).expect("serialize filter"),
            "\"ACTIVE\""
        );
        assert_eq!(FilterMode::default(), FilterMode::All);
        assert_eq!(SortOrder::default(), SortOrder::Asc);
    }

    #[test]
    fn settings_serde_applies_defaults_for_missing_fields() {
        let settings: Settings = serde_json::from_str("{}").expect("settings from empty object");
        assert_eq!(settings, Settings::default());

        let partial: Settings =
            serde_json::from_str(r#"{"poll_interval_secs": 30}"#).expect("partial settings");
        assert_eq!(partial.poll_interval_secs, 30);
        assert_eq!(partial.backend_base_url, "http://localhost:8081");
        assert_eq!(partial.remind_window_minutes, 1);
    }
}
