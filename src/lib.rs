// Learn more about Tauri commands at https://tauri.app/develop/calling-rust/
pub mod api;
pub mod classify;
pub mod commands;
pub mod events;
pub mod logging;
pub mod models;
#[cfg(all(feature = "app", not(test)))]
mod scheduler;
pub mod state;
pub mod storage;
pub mod view;

#[cfg(all(feature = "app", not(test)))]
use tauri::Manager;

#[cfg(all(feature = "app", not(test)))]
use crate::api::ApiClient;
#[cfg(all(feature = "app", not(test)))]
use crate::commands::*;
#[cfg(all(feature = "app", not(test)))]
use crate::scheduler::start_sync_loop;
#[cfg(all(feature = "app", not(test)))]
use crate::state::AppState;
#[cfg(all(feature = "app", not(test)))]
use crate::storage::Storage;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
#[cfg(all(feature = "app", not(test)))]
pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_notification::init())
        .plugin(tauri_plugin_dialog::init())
        .setup(|app| {
            let app_data_dir = app.path().app_data_dir()?;
            if let Err(error) = logging::init_logging(&app_data_dir) {
                eprintln!("failed to initialize logging: {error}");
            }

            let storage = Storage::new(app_data_dir);
            storage.ensure_dirs()?;
            let settings = storage
                .load_settings()
                .map(|data| data.settings)
                .unwrap_or_default();
            log::info!(
                "starting backend={} poll_interval_secs={} remind_window_minutes={}",
                settings.backend_base_url,
                settings.poll_interval_secs,
                settings.remind_window_minutes
            );

            let api = ApiClient::new(&settings.backend_base_url)?;
            let state = AppState::new(settings);
            app.manage(state.clone());
            app.manage(api.clone());

            // Covers the startup sync and every poll after it.
            start_sync_loop(app.handle().clone(), state, api);

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            load_state,
            sync_tasks,
            create_task,
            toggle_completed,
            delete_task,
            visible_tasks_query,
            update_settings,
            enable_notifications,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
