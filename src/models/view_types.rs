use crate::models::prediction_types::{DiseaseCategory, RiskTier};
use crate::models::upload_types::SelectedFileInfo;
use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowPhase {
    #[default]
    Idle,
    Submitting,
    Succeeded,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct GaugeArc {
    pub radius: f64,
    pub circumference: f64,
    pub filled: f64,
    pub dash_array: String,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct FactorView {
    pub name: &'static str,
    pub value: &'static str,
    pub importance: f64,
    pub importance_label: String,
    pub bar_width: f64,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ResultView {
    pub category: DiseaseCategory,
    pub category_label: &'static str,
    pub probability: f64,
    pub percent_label: String,
    pub tier: RiskTier,
    pub tier_label: &'static str,
    pub gauge: GaugeArc,
    pub factors: Vec<FactorView>,
}

/// Everything the Try Now page needs to render itself.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct TryNowSnapshot {
    pub phase: FlowPhase,
    pub file: Option<SelectedFileInfo>,
    pub category: Option<DiseaseCategory>,
    pub can_submit: bool,
    pub result: Option<ResultView>,
    pub last_error: Option<String>,
}
