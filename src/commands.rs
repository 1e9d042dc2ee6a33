use std::path::PathBuf;

use chrono::{Local, NaiveDateTime};

use crate::api::TaskBackend;
use crate::classify::{is_due_soon, normalize_due_input};
use crate::events::StatePayload;
#[cfg(all(feature = "app", not(test)))]
use crate::events::EVENT_STATE_UPDATED;
use crate::models::{Settings, Task, TaskDraft, TaskId};
use crate::state::AppState;
use crate::storage::{Storage, StorageError};
use crate::view::{visible_tasks, TaskRow, ViewQuery};

#[cfg(all(feature = "app", not(test)))]
use crate::api::ApiClient;
#[cfg(all(feature = "app", not(test)))]
use tauri::{AppHandle, Emitter, Manager};

#[derive(Debug, serde::Serialize)]
pub struct CommandResult<T> {
    pub ok: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

/// Shell-side effects the controller needs: event emission towards the
/// webview, user-facing alerts, and desktop notifications. Tests substitute
/// a recording implementation.
pub trait CommandCtx {
    fn app_data_dir(&self) -> Result<PathBuf, StorageError>;
    fn emit_state_updated(&self, payload: StatePayload);
    fn alert(&self, message: &str);
    fn notify_due_soon(&self, task: &Task);
}

fn ok<T>(data: T) -> CommandResult<T> {
    CommandResult {
        ok: true,
        data: Some(data),
        error: None,
    }
}

fn err<T>(message: &str) -> CommandResult<T> {
    CommandResult {
        ok: false,
        data: None,
        error: Some(message.to_string()),
    }
}

fn emit_state(ctx: &impl CommandCtx, state: &AppState) {
    ctx.emit_state_updated(StatePayload {
        tasks: state.tasks(),
        settings: state.settings(),
    });
}

/// Fires one desktop notification per task that entered its due-soon window,
/// at most once per task per session. Runs after every successful sync.
fn run_reminder_sweep(ctx: &impl CommandCtx, state: &AppState, now: NaiveDateTime) {
    let window = state.settings().remind_window_minutes;
    for task in state.tasks() {
        if !is_due_soon(&task, now, window) {
            continue;
        }
        if state.mark_notified(task.id) {
            log::debug!("reminder fired task_id={} due={}", task.id, task.due_date);
            ctx.notify_due_soon(&task);
        }
    }
}

/// One sync cycle: fetch all tasks and replace the cache wholesale, then run
/// the due-soon sweep. On failure the previous cache is kept; background
/// polls pass `alert_on_error = false` and only leave a log line.
pub async fn sync_tasks_impl(
    ctx: &impl CommandCtx,
    state: &AppState,
    backend: &impl TaskBackend,
    alert_on_error: bool,
) -> CommandResult<Vec<Task>> {
    match backend.list_tasks().await {
        Ok(tasks) => {
            state.replace_tasks(tasks.clone());
            run_reminder_sweep(ctx, state, Local::now().naive_local());
            emit_state(ctx, state);
            ok(tasks)
        }
        Err(error) => {
            log::warn!("task sync failed err={error}");
            if alert_on_error {
                ctx.alert("failed to load tasks from the backend");
            }
            err(&format!("sync failed: {error}"))
        }
    }
}

pub async fn create_task_impl(
    ctx: &impl CommandCtx,
    state: &AppState,
    backend: &impl TaskBackend,
    title: String,
    description: String,
    due_date: String,
) -> CommandResult<Task> {
    let title = title.trim();
    if title.is_empty() {
        return err("title is required");
    }
    if due_date.trim().is_empty() {
        return err("due date is required");
    }
    let normalized = match normalize_due_input(&due_date) {
        Ok(value) => value,
        Err(message) => return err(&message),
    };

    let draft = TaskDraft::new(title.to_string(), description.trim().to_string(), normalized);
    match backend.create_task(&draft).await {
        Ok(task) => {
            log::info!("task created id={} due={}", task.id, task.due_date);
            let _ = sync_tasks_impl(ctx, state, backend, true).await;
            ok(task)
        }
        Err(error) => {
            ctx.alert("failed to add task");
            err(&format!("failed to add task: {error}"))
        }
    }
}

pub async fn toggle_completed_impl(
    ctx: &impl CommandCtx,
    state: &AppState,
    backend: &impl TaskBackend,
    task_id: TaskId,
) -> CommandResult<Task> {
    let Some(mut task) = state.find_task(task_id) else {
        return err("task not found");
    };
    task.completed = !task.completed;

    match backend.update_task(&task).await {
        Ok(updated) => {
            let _ = sync_tasks_impl(ctx, state, backend, false).await;
            ok(updated)
        }
        Err(error) => {
            ctx.alert("failed to update task");
            err(&format!("failed to update task: {error}"))
        }
    }
}

pub async fn delete_task_impl(
    ctx: &impl CommandCtx,
    state: &AppState,
    backend: &impl TaskBackend,
    task_id: TaskId,
) -> CommandResult<bool> {
    match backend.delete_task(task_id).await {
        Ok(()) => {
            // Drop the session reminder marker with the task, and remove it
            // from the cache eagerly so the next derived view is already
            // correct even if the resync below fails.
            state.forget_notified(task_id);
            state.remove_task(task_id);
            let _ = sync_tasks_impl(ctx, state, backend, false).await;
            ok(true)
        }
        Err(error) => {
            ctx.alert("failed to delete task");
            err(&format!("failed to delete task: {error}"))
        }
    }
}

pub fn load_state_impl(state: &AppState) -> CommandResult<StatePayload> {
    ok(StatePayload {
        tasks: state.tasks(),
        settings: state.settings(),
    })
}

pub fn visible_tasks_impl(state: &AppState, query: ViewQuery) -> CommandResult<Vec<TaskRow>> {
    let now = Local::now().naive_local();
    let rows = visible_tasks(&state.tasks(), &query, now)
        .into_iter()
        .map(|task| TaskRow::derive(task, now))
        .collect();
    ok(rows)
}

fn persist_settings(ctx: &impl CommandCtx, state: &AppState) -> Result<(), StorageError> {
    let root = ctx.app_data_dir()?;
    let storage = Storage::new(root);
    storage.ensure_dirs()?;
    storage.save_settings(&state.settings_file())
}

pub fn update_settings_impl(
    ctx: &impl CommandCtx,
    state: &AppState,
    settings: Settings,
) -> CommandResult<Settings> {
    let settings = Settings {
        backend_base_url: settings.backend_base_url.trim().to_string(),
        ..settings
    };
    if settings.backend_base_url.is_empty() {
        return err("backend base url is required");
    }
    if settings.poll_interval_secs == 0 {
        return err("poll interval must be at least one second");
    }
    if settings.remind_window_minutes < 0 {
        return err("reminder window must not be negative");
    }

    let previous = state.settings();
    state.update_settings(settings.clone());
    if let Err(error) = persist_settings(ctx, state) {
        // Roll back in-memory settings to keep the running app consistent.
        state.update_settings(previous);
        return err(&format!("storage error: {error:?}"));
    }
    emit_state(ctx, state);
    ok(settings)
}

#[cfg(all(feature = "app", not(test)))]
pub(crate) struct TauriCommandCtx<'a> {
    pub(crate) app: &'a AppHandle,
}

#[cfg(all(feature = "app", not(test)))]
impl CommandCtx for TauriCommandCtx<'_> {
    fn app_data_dir(&self) -> Result<PathBuf, StorageError> {
        self.app
            .path()
            .app_data_dir()
            .map_err(|err| StorageError::Io(std::io::Error::other(err.to_string())))
    }

    fn emit_state_updated(&self, payload: StatePayload) {
        let _ = self.app.emit(EVENT_STATE_UPDATED, payload);
    }

    fn alert(&self, message: &str) {
        use tauri_plugin_dialog::{DialogExt, MessageDialogKind};
        self.app
            .dialog()
            .message(message)
            .title("SmartTask")
            .kind(MessageDialogKind::Error)
            .show(|_| {});
    }

    fn notify_due_soon(&self, task: &Task) {
        use tauri_plugin_notification::{NotificationExt, PermissionState};
        match self.app.notification().permission_state() {
            Ok(PermissionState::Granted) => {}
            Ok(_) => return,
            Err(error) => {
                log::warn!("notification permission check failed err={error}");
                return;
            }
        }
        let body = format!("{} is due soon ({})", task.title, task.due_date);
        if let Err(error) = self
            .app
            .notification()
            .builder()
            .title("Task Reminder")
            .body(body)
            .show()
        {
            log::warn!("failed to show reminder notification err={error}");
        }
    }
}

#[cfg(all(feature = "app", not(test)))]
#[tauri::command]
pub fn load_state(app: AppHandle) -> CommandResult<StatePayload> {
    load_state_impl(app.state::<AppState>().inner())
}

#[cfg(all(feature = "app", not(test)))]
#[tauri::command]
pub async fn sync_tasks(app: AppHandle, show_alert: bool) -> CommandResult<Vec<Task>> {
    let ctx = TauriCommandCtx { app: &app };
    let state = app.state::<AppState>();
    let api = app.state::<ApiClient>();
    sync_tasks_impl(&ctx, state.inner(), api.inner(), show_alert).await
}

#[cfg(all(feature = "app", not(test)))]
#[tauri::command]
pub async fn create_task(
    app: AppHandle,
    title: String,
    description: String,
    due_date: String,
) -> CommandResult<Task> {
    let ctx = TauriCommandCtx { app: &app };
    let state = app.state::<AppState>();
    let api = app.state::<ApiClient>();
    create_task_impl(&ctx, state.inner(), api.inner(), title, description, due_date).await
}

#[cfg(all(feature = "app", not(test)))]
#[tauri::command]
pub async fn toggle_completed(app: AppHandle, task_id: TaskId) -> CommandResult<Task> {
    let ctx = TauriCommandCtx { app: &app };
    let state = app.state::<AppState>();
    let api = app.state::<ApiClient>();
    toggle_completed_impl(&ctx, state.inner(), api.inner(), task_id).await
}

#[cfg(all(feature = "app", not(test)))]
#[tauri::command]
pub async fn delete_task(app: AppHandle, task_id: TaskId) -> CommandResult<bool> {
    let ctx = TauriCommandCtx { app: &app };
    let state = app.state::<AppState>();
    let api = app.state::<ApiClient>();
    delete_task_impl(&ctx, state.inner(), api.inner(), task_id).await
}

#[cfg(all(feature = "app", not(test)))]
#[tauri::command]
pub fn visible_tasks_query(app: AppHandle, query: ViewQuery) -> CommandResult<Vec<TaskRow>> {
    visible_tasks_impl(app.state::<AppState>().inner(), query)
}

#[cfg(all(feature = "app", not(test)))]
#[tauri::command]
pub fn update_settings(app: AppHandle, settings: Settings) -> CommandResult<Settings> {
    let ctx = TauriCommandCtx { app: &app };
    update_settings_impl(&ctx, app.state::<AppState>().inner(), settings)
}

/// Requests OS notification permission once; reminders only fire while the
/// permission is granted.
#[cfg(all(feature = "app", not(test)))]
#[tauri::command]
pub fn enable_notifications(app: AppHandle) -> CommandResult<bool> {
    use tauri_plugin_notification::{NotificationExt, PermissionState};
    match app.notification().request_permission() {
        Ok(permission) => ok(matches!(permission, PermissionState::Granted)),
        Err(error) => err(&format!(
            "failed to request notification permission: {error}"
        )),
    }
}
