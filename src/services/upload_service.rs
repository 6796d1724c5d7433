use crate::error::AppError;
use crate::models::upload_types::SelectedFile;
use std::path::{Path, PathBuf};

const CSV_EXTENSION: &str = ".csv";
const CSV_MEDIA_TYPE: &str = "text/csv";

/// A file counts as CSV by its declared media type or by its name.
/// No size or schema checks are made.
pub fn is_csv_file(name: &str, media_type: Option<&str>) -> bool {
    media_type == Some(CSV_MEDIA_TYPE) || name.ends_with(CSV_EXTENSION)
}

pub fn accept_file(
    name: &str,
    media_type: Option<&str>,
    bytes: Vec<u8>,
) -> Result<SelectedFile, AppError> {
    if !is_csv_file(name, media_type) {
        return Err(AppError::Validation(format!(
            "Only CSV files are supported: {}",
            name
        )));
    }

    Ok(SelectedFile {
        name: name.to_string(),
        media_type: media_type.map(str::to_string),
        bytes,
    })
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

pub async fn read_file(path: &Path) -> Result<SelectedFile, AppError> {
    let name = file_name(path);
    if !is_csv_file(&name, None) {
        return Err(AppError::Validation(format!(
            "Only CSV files are supported: {}",
            path.display()
        )));
    }

    if !is_existing_file(path).await {
        return Err(AppError::Validation(format!(
            "File does not exist: {}",
            path.display()
        )));
    }

    let bytes = tokio::fs::read(path).await?;
    tracing::debug!(file = %name, size = bytes.len(), "read upload file");
    accept_file(&name, None, bytes)
}

async fn is_existing_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|meta| meta.is_file())
        .unwrap_or(false)
}

/// First dropped path that is an existing CSV file; the rest are ignored.
pub async fn pick_dropped(paths: &[PathBuf]) -> Option<&PathBuf> {
    for path in paths {
        if is_csv_file(&file_name(path), None) && is_existing_file(path).await {
            return Some(path);
        }
    }
    None
}

pub async fn read_dropped(paths: &[PathBuf]) -> Result<SelectedFile, AppError> {
    match pick_dropped(paths).await {
        Some(path) => read_file(path).await,
        None => Err(AppError::Validation(
            "None of the dropped files is a CSV file".to_string(),
        )),
    }
}
