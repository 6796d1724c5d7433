#[cfg(feature = "desktop")]
mod commands;
pub mod error;
pub mod models;
pub mod services;

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use services::prediction::client::PredictionClient;
    use services::prediction::controller::TryNowController;
    use services::settings_service::SettingsStore;
    use std::sync::Arc;
    use tauri::Manager;

    services::logging::init_logging();

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_window_state::Builder::default().build())
        .setup(|app| {
            let app_data_dir = app.path().app_data_dir()?;
            std::fs::create_dir_all(&app_data_dir)?;

            let settings = SettingsStore::open(app_data_dir)?;
            let client = PredictionClient::new(&settings.get())?;
            app.manage(TryNowController::new(Arc::new(client)));
            app.manage(settings);

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::try_now::list_categories,
            commands::try_now::get_try_now_state,
            commands::try_now::select_file,
            commands::try_now::drop_files,
            commands::try_now::select_category,
            commands::try_now::clear_selection,
            commands::try_now::submit_prediction,
            commands::history::get_prediction_history,
            commands::settings::get_settings,
            commands::settings::update_settings,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
