use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use crate::models::{Settings, SettingsFile, Task, TaskId};

const SCHEMA_VERSION: u32 = 1;

/// Controller state: the cached task list, the session notification set, and
/// the active settings, all behind one mutex. The cache is only ever replaced
/// wholesale by a sync or trimmed by an explicit delete; the notification set
/// lives and dies with the process.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<Mutex<AppData>>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            inner: Arc::new(Mutex::new(AppData {
                tasks: Vec::new(),
                notified: HashSet::new(),
                settings,
            })),
        }
    }

    pub fn tasks(&self) -> Vec<Task> {
        let guard = self.inner.lock().expect("state poisoned");
        guard.tasks.clone()
    }

    pub fn replace_tasks(&self, tasks: Vec<Task>) {
        let mut guard = self.inner.lock().expect("state poisoned");
        guard.tasks = tasks;
    }

    pub fn find_task(&self, task_id: TaskId) -> Option<Task> {
        let guard = self.inner.lock().expect("state poisoned");
        guard.tasks.iter().find(|t| t.id == task_id).cloned()
    }

    pub fn remove_task(&self, task_id: TaskId) {
        let mut guard = self.inner.lock().expect("state poisoned");
        guard.tasks.retain(|task| task.id != task_id);
    }

    /// Records that a reminder fired for this task. Returns true only the
    /// first time per session, which is what keeps notifications one-shot.
    pub fn mark_notified(&self, task_id: TaskId) -> bool {
        let mut guard = self.inner.lock().expect("state poisoned");
        guard.notified.insert(task_id)
    }

    pub fn forget_notified(&self, task_id: TaskId) {
        let mut guard = self.inner.lock().expect("state poisoned");
        guard.notified.remove(&task_id);
    }

    pub fn settings(&self) -> Settings {
        let guard = self.inner.lock().expect("state poisoned");
        guard.settings.clone()
    }

    pub fn update_settings(&self, settings: Settings) {
        let mut guard = self.inner.lock().expect("state poisoned");
        guard.settings = settings;
    }

    pub fn settings_file(&self) -> SettingsFile {
        let guard = self.inner.lock().expect("state poisoned");
        SettingsFile {
            schema_version: SCHEMA_VERSION,
            settings: guard.settings.clone(),
        }
    }
}

#[derive(Debug)]
struct AppData {
    tasks: Vec<Task>,
    notified: HashSet<TaskId>,
    settings: Settings,
}
