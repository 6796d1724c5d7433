use crate::error::AppError;
use crate::models::prediction_types::{CategoryOption, DiseaseCategory};
use crate::models::view_types::TryNowSnapshot;
use crate::services::prediction::controller::TryNowController;
use crate::services::upload_service;
use std::path::{Path, PathBuf};
use tauri::State;

#[tauri::command]
pub fn list_categories() -> Vec<CategoryOption> {
    DiseaseCategory::ALL.into_iter().map(CategoryOption::from).collect()
}

#[tauri::command]
pub async fn get_try_now_state(
    controller: State<'_, TryNowController>,
) -> Result<TryNowSnapshot, AppError> {
    Ok(controller.snapshot().await)
}

#[tauri::command]
pub async fn select_file(
    controller: State<'_, TryNowController>,
    path: String,
) -> Result<TryNowSnapshot, AppError> {
    let file = upload_service::read_file(Path::new(&path)).await?;
    Ok(controller.select_file(file).await)
}

#[tauri::command]
pub async fn drop_files(
    controller: State<'_, TryNowController>,
    paths: Vec<String>,
) -> Result<TryNowSnapshot, AppError> {
    let paths: Vec<PathBuf> = paths.into_iter().map(PathBuf::from).collect();
    let file = upload_service::read_dropped(&paths).await?;
    Ok(controller.select_file(file).await)
}

#[tauri::command]
pub async fn select_category(
    controller: State<'_, TryNowController>,
    category: String,
) -> Result<TryNowSnapshot, AppError> {
    let category: DiseaseCategory = category.parse()?;
    Ok(controller.select_category(category).await)
}

#[tauri::command]
pub async fn clear_selection(
    controller: State<'_, TryNowController>,
) -> Result<TryNowSnapshot, AppError> {
    controller.clear().await
}

#[tauri::command]
pub async fn submit_prediction(
    controller: State<'_, TryNowController>,
) -> Result<TryNowSnapshot, AppError> {
    Ok(controller.submit().await)
}
