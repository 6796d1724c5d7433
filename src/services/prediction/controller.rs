use crate::error::AppError;
use crate::models::prediction_types::{DiseaseCategory, PredictionResult};
use crate::models::upload_types::SelectedFile;
use crate::models::view_types::{FlowPhase, TryNowSnapshot};
use crate::services::prediction::client::PredictionBackend;
use crate::services::prediction::presenter;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Default)]
struct FormState {
    phase: FlowPhase,
    file: Option<SelectedFile>,
    category: Option<DiseaseCategory>,
    result: Option<PredictionResult>,
    last_error: Option<String>,
}

impl FormState {
    fn can_submit(&self) -> bool {
        self.phase != FlowPhase::Submitting && self.file.is_some() && self.category.is_some()
    }

    fn snapshot(&self) -> TryNowSnapshot {
        TryNowSnapshot {
            phase: self.phase,
            file: self.file.as_ref().map(SelectedFile::info),
            category: self.category,
            can_submit: self.can_submit(),
            result: self.result.as_ref().map(presenter::render),
            last_error: self.last_error.clone(),
        }
    }
}

/// State behind the Try Now page: Idle -> Submitting -> Succeeded, or back to
/// Idle when the request fails or yields nothing.
pub struct TryNowController {
    backend: Mutex<Arc<dyn PredictionBackend>>,
    state: Mutex<FormState>,
}

impl TryNowController {
    pub fn new(backend: Arc<dyn PredictionBackend>) -> Self {
        Self {
            backend: Mutex::new(backend),
            state: Mutex::new(FormState::default()),
        }
    }

    /// Takes effect from the next submission.
    pub async fn set_backend(&self, backend: Arc<dyn PredictionBackend>) {
        *self.backend.lock().await = backend;
    }

    pub async fn snapshot(&self) -> TryNowSnapshot {
        self.state.lock().await.snapshot()
    }

    #[cfg(test)]
    async fn is_submitting(&self) -> bool {
        self.state.lock().await.phase == FlowPhase::Submitting
    }

    pub async fn select_file(&self, file: SelectedFile) -> TryNowSnapshot {
        let mut state = self.state.lock().await;
        tracing::debug!(file = %file.name, size = file.size(), "file selected");
        state.file = Some(file);
        state.last_error = None;
        state.snapshot()
    }

    pub async fn select_category(&self, category: DiseaseCategory) -> TryNowSnapshot {
        let mut state = self.state.lock().await;
        state.category = Some(category);
        state.last_error = None;
        state.snapshot()
    }

    pub async fn clear(&self) -> Result<TryNowSnapshot, AppError> {
        let mut state = self.state.lock().await;
        if state.phase == FlowPhase::Submitting {
            return Err(AppError::Busy);
        }
        *state = FormState::default();
        Ok(state.snapshot())
    }

    /// Sends the selected file once. Does nothing unless a file and a category
    /// are set and no request is in flight. The file is consumed by the attempt.
    pub async fn submit(&self) -> TryNowSnapshot {
        let (file, category) = {
            let mut state = self.state.lock().await;
            if !state.can_submit() {
                tracing::debug!(phase = ?state.phase, "submit ignored");
                return state.snapshot();
            }
            let (Some(category), Some(file)) = (state.category, state.file.take()) else {
                return state.snapshot();
            };
            state.phase = FlowPhase::Submitting;
            state.last_error = None;
            (file, category)
        };

        let backend = self.backend.lock().await.clone();
        let file_name = file.name.clone();
        let outcome = backend.predict(file, category).await;

        let mut state = self.state.lock().await;
        match outcome {
            Ok(response) => match response.first_record() {
                Some(record) => {
                    tracing::info!(
                        file = %file_name,
                        %category,
                        probability = record.probability,
                        "prediction received"
                    );
                    state.result = Some(PredictionResult::from_record(category, record));
                    state.phase = FlowPhase::Succeeded;
                }
                None => {
                    tracing::info!(file = %file_name, %category, "prediction service returned no usable record");
                    state.result = None;
                    state.phase = FlowPhase::Idle;
                }
            },
            Err(e) => {
                tracing::error!(file = %file_name, %category, error = %e, "prediction failed");
                state.result = None;
                state.last_error = Some(e.to_string());
                state.phase = FlowPhase::Idle;
            }
        }
        state.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::prediction_types::{PredictionResponse, RiskTier, ILLUSTRATIVE_FACTORS};
    use crate::services::upload_service;
    use futures::future::{BoxFuture, FutureExt};
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    enum Script {
        Respond(Value),
        Fail(&'static str),
    }

    struct FakeBackend {
        script: Script,
        gate: Option<Arc<Notify>>,
        calls: AtomicUsize,
        seen: std::sync::Mutex<Vec<(String, DiseaseCategory)>>,
    }

    impl FakeBackend {
        fn new(script: Script) -> Arc<Self> {
            Arc::new(Self {
                script,
                gate: None,
                calls: AtomicUsize::new(0),
                seen: std::sync::Mutex::new(Vec::new()),
            })
        }

        fn gated(script: Script, gate: Arc<Notify>) -> Arc<Self> {
            Arc::new(Self {
                script,
                gate: Some(gate),
                calls: AtomicUsize::new(0),
                seen: std::sync::Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl PredictionBackend for FakeBackend {
        fn predict(
            &self,
            file: SelectedFile,
            category: DiseaseCategory,
        ) -> BoxFuture<'_, Result<PredictionResponse, AppError>> {
            async move {
                self.calls.fetch_add(1, Ordering::SeqCst);
                self.seen.lock().unwrap().push((file.name, category));
                if let Some(gate) = &self.gate {
                    gate.notified().await;
                }
                match &self.script {
                    Script::Respond(body) => Ok(PredictionResponse::from_value(body.clone())),
                    Script::Fail(msg) => Err(AppError::Message(msg.to_string())),
                }
            }
            .boxed()
        }
    }

    fn csv(name: &str) -> SelectedFile {
        upload_service::accept_file(name, Some("text/csv"), b"age\n65\n".to_vec()).unwrap()
    }

    fn respond(probability: f64) -> Script {
        Script::Respond(json!({ "predictions": [{ "probability": probability }] }))
    }

    #[tokio::test]
    async fn submit_needs_file_and_category() {
        let backend = FakeBackend::new(respond(0.5));
        let controller = TryNowController::new(backend.clone());

        let snap = controller.submit().await;
        assert!(!snap.can_submit);
        assert_eq!(snap.phase, FlowPhase::Idle);

        controller.select_file(csv("a.csv")).await;
        let snap = controller.submit().await;
        assert!(!snap.can_submit);

        controller.clear().await.unwrap();
        controller.select_category(DiseaseCategory::Heart).await;
        let snap = controller.submit().await;
        assert!(!snap.can_submit);

        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn successful_prediction_is_presented() {
        let backend = FakeBackend::new(respond(0.73));
        let controller = TryNowController::new(backend.clone());

        controller.select_file(csv("batch.csv")).await;
        let snap = controller.select_category(DiseaseCategory::Diabetes).await;
        assert!(snap.can_submit);

        let snap = controller.submit().await;
        assert_eq!(snap.phase, FlowPhase::Succeeded);
        let result = snap.result.unwrap();
        assert_eq!(result.percent_label, "73.0%");
        assert_eq!(result.tier, RiskTier::High);
        assert_eq!(result.tier_label, "High Risk");
        assert_eq!(result.factors.len(), 5);
        assert!(snap.last_error.is_none());

        // the file went with the request; the category stays picked
        assert!(snap.file.is_none());
        assert_eq!(snap.category, Some(DiseaseCategory::Diabetes));
        assert!(!snap.can_submit);

        assert_eq!(backend.calls(), 1);
        assert_eq!(
            backend.seen.lock().unwrap()[0],
            ("batch.csv".to_string(), DiseaseCategory::Diabetes)
        );
    }

    #[tokio::test]
    async fn empty_records_return_to_idle() {
        let backend = FakeBackend::new(Script::Respond(json!({ "predictions": [] })));
        let controller = TryNowController::new(backend);

        controller.select_file(csv("batch.csv")).await;
        controller.select_category(DiseaseCategory::Kidney).await;
        let snap = controller.submit().await;

        assert_eq!(snap.phase, FlowPhase::Idle);
        assert!(snap.result.is_none());
        assert!(snap.last_error.is_none());
    }

    #[tokio::test]
    async fn failure_returns_to_idle_with_error() {
        let backend = FakeBackend::new(Script::Fail("connection refused"));
        let controller = TryNowController::new(backend);

        controller.select_file(csv("batch.csv")).await;
        controller.select_category(DiseaseCategory::Obesity).await;
        let snap = controller.submit().await;

        assert_eq!(snap.phase, FlowPhase::Idle);
        assert!(snap.result.is_none());
        assert_eq!(snap.last_error.as_deref(), Some("connection refused"));

        // picking a new file clears the error
        let snap = controller.select_file(csv("retry.csv")).await;
        assert!(snap.last_error.is_none());
        assert!(snap.can_submit);
    }

    #[tokio::test]
    async fn failure_clears_previous_result() {
        let controller = TryNowController::new(FakeBackend::new(respond(0.2)));
        controller.select_category(DiseaseCategory::Heart).await;
        controller.select_file(csv("one.csv")).await;
        assert!(controller.submit().await.result.is_some());

        controller
            .set_backend(FakeBackend::new(Script::Fail("timed out")))
            .await;
        controller.select_file(csv("two.csv")).await;
        let snap = controller.submit().await;
        assert!(snap.result.is_none());
        assert_eq!(snap.phase, FlowPhase::Idle);
    }

    #[tokio::test]
    async fn no_resubmission_while_in_flight() {
        let gate = Arc::new(Notify::new());
        let backend = FakeBackend::gated(respond(0.42), gate.clone());
        let controller = Arc::new(TryNowController::new(backend.clone()));

        controller.select_file(csv("batch.csv")).await;
        controller.select_category(DiseaseCategory::Heart).await;

        let task = tokio::spawn({
            let controller = controller.clone();
            async move { controller.submit().await }
        });

        while !controller.is_submitting().await {
            tokio::task::yield_now().await;
        }

        // a new file arrives mid-flight, but submission stays disabled
        let snap = controller.select_file(csv("next.csv")).await;
        assert_eq!(snap.phase, FlowPhase::Submitting);
        assert!(!snap.can_submit);

        let snap = controller.submit().await;
        assert_eq!(snap.phase, FlowPhase::Submitting);
        assert!(matches!(controller.clear().await, Err(AppError::Busy)));

        gate.notify_one();
        let snap = task.await.unwrap();
        assert_eq!(snap.phase, FlowPhase::Succeeded);
        assert_eq!(snap.result.unwrap().tier, RiskTier::Medium);
        assert!(snap.can_submit);
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test]
    async fn new_result_replaces_old_one() {
        let controller = TryNowController::new(FakeBackend::new(respond(0.1)));
        controller.select_category(DiseaseCategory::Diabetes).await;
        controller.select_file(csv("one.csv")).await;
        let first = controller.submit().await.result.unwrap();
        assert_eq!(first.tier, RiskTier::Low);

        controller.set_backend(FakeBackend::new(respond(0.9))).await;
        controller.select_file(csv("two.csv")).await;
        let second = controller.submit().await.result.unwrap();
        assert_eq!(second.tier, RiskTier::High);
        assert_eq!(second.factors, first.factors);
    }

    #[tokio::test]
    async fn server_supplied_features_are_ignored() {
        let backend = FakeBackend::new(Script::Respond(json!({
            "predictions": [{
                "probability": 0.55,
                "features": [
                    { "name": "Glucose", "importance": 0.9, "value": "180 mg/dL" },
                    { "name": "Age", "importance": 0.01, "value": "30 years" }
                ],
                "factors": ["Smoking"]
            }]
        })));
        let controller = TryNowController::new(backend);
        controller.select_file(csv("batch.csv")).await;
        controller.select_category(DiseaseCategory::Diabetes).await;

        let result = controller.submit().await.result.unwrap();
        assert_eq!(result.tier, RiskTier::Medium);
        assert_eq!(result.factors.len(), ILLUSTRATIVE_FACTORS.len());
        for (shown, fixed) in result.factors.iter().zip(ILLUSTRATIVE_FACTORS.iter()) {
            assert_eq!(shown.name, fixed.name);
            assert_eq!(shown.value, fixed.value);
            assert_eq!(shown.importance, fixed.importance);
        }
    }

    #[tokio::test]
    async fn clear_resets_everything() {
        let controller = TryNowController::new(FakeBackend::new(respond(0.5)));
        controller.select_file(csv("a.csv")).await;
        controller.select_category(DiseaseCategory::Kidney).await;
        controller.submit().await;

        let snap = controller.clear().await.unwrap();
        assert_eq!(snap.phase, FlowPhase::Idle);
        assert!(snap.file.is_none());
        assert!(snap.category.is_none());
        assert!(snap.result.is_none());
    }
}
