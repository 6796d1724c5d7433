use crate::error::AppError;
use crate::models::settings_types::Settings;
use crate::services::prediction::client::PredictionClient;
use crate::services::prediction::controller::TryNowController;
use crate::services::settings_service::SettingsStore;
use std::sync::Arc;
use tauri::State;

#[tauri::command]
pub fn get_settings(store: State<'_, SettingsStore>) -> Settings {
    store.get()
}

#[tauri::command]
pub async fn update_settings(
    store: State<'_, SettingsStore>,
    controller: State<'_, TryNowController>,
    settings: Settings,
) -> Result<Settings, AppError> {
    let client = PredictionClient::new(&settings)?;
    let saved = store.update(settings)?;
    controller.set_backend(Arc::new(client)).await;
    Ok(saved)
}
