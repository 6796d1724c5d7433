use crate::error::AppError;
use crate::models::prediction_types::{DiseaseCategory, PredictionResponse};
use crate::models::settings_types::Settings;
use crate::models::upload_types::SelectedFile;
use futures::future::{BoxFuture, FutureExt};
use reqwest::multipart::{Form, Part};
use std::time::Duration;

const FILE_FIELD: &str = "file";
const DEFAULT_MEDIA_TYPE: &str = "text/csv";

/// Anything that can turn an uploaded CSV into prediction records.
pub trait PredictionBackend: Send + Sync {
    fn predict(
        &self,
        file: SelectedFile,
        category: DiseaseCategory,
    ) -> BoxFuture<'_, Result<PredictionResponse, AppError>>;
}

/// HTTP client for the remote prediction service.
#[derive(Clone)]
pub struct PredictionClient {
    http: reqwest::Client,
    base_url: String,
}

impl PredictionClient {
    pub fn new(settings: &Settings) -> Result<Self, AppError> {
        Self::with_timeout(
            &settings.api_base_url,
            Duration::from_secs(settings.request_timeout_secs),
        )
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, AppError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self, category: DiseaseCategory) -> String {
        format!("{}/predict/{}/", self.base_url, category.slug())
    }

    /// POSTs the file as multipart form data. Any HTTP status is accepted as
    /// long as the body is JSON; the caller decides what a usable body is.
    pub async fn upload_csv(
        &self,
        file: SelectedFile,
        category: DiseaseCategory,
    ) -> Result<PredictionResponse, AppError> {
        let url = self.endpoint(category);
        let media_type = file
            .media_type
            .clone()
            .unwrap_or_else(|| DEFAULT_MEDIA_TYPE.to_string());
        let size = file.size();

        let part = Part::bytes(file.bytes)
            .file_name(file.name.clone())
            .mime_str(&media_type)?;
        let form = Form::new().part(FILE_FIELD, part);

        tracing::info!(url = %url, file = %file.name, size, "sending prediction request");
        let response = self.http.post(&url).multipart(form).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %url, %status, "prediction service returned a non-success status");
        }

        let body: serde_json::Value = response.json().await?;
        Ok(PredictionResponse::from_value(body))
    }
}

impl PredictionBackend for PredictionClient {
    fn predict(
        &self,
        file: SelectedFile,
        category: DiseaseCategory,
    ) -> BoxFuture<'_, Result<PredictionResponse, AppError>> {
        self.upload_csv(file, category).boxed()
    }
}
