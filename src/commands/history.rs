use crate::models::history_types::HistoryEntryView;
use crate::services::history_service;

#[tauri::command]
pub fn get_prediction_history() -> Vec<HistoryEntryView> {
    history_service::views()
}
