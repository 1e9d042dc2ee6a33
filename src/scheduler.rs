use std::time::Duration;

use tauri::AppHandle;

use crate::api::ApiClient;
use crate::commands::{sync_tasks_impl, TauriCommandCtx};
use crate::state::AppState;

/// Background polling loop: one silent sync per tick. The due-soon sweep runs
/// inside the sync path, so this is the only timer the app needs. The first
/// tick fires immediately and doubles as the startup sync.
pub fn start_sync_loop(app: AppHandle, state: AppState, api: ApiClient) {
    let poll_secs = state.settings().poll_interval_secs.max(1);
    tauri::async_runtime::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(poll_secs));
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            let ctx = TauriCommandCtx { app: &app };
            let _ = sync_tasks_impl(&ctx, &state, &api, false).await;
        }
    });
}
