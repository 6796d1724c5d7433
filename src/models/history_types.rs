use crate::models::prediction_types::{DiseaseCategory, RiskTier};
use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryStatus {
    Completed,
    Processing,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PredictionHistoryEntry {
    pub id: &'static str,
    pub filename: &'static str,
    pub category: DiseaseCategory,
    pub probability: f64,
    pub tier: RiskTier,
    pub timestamp: NaiveDateTime,
    pub status: HistoryStatus,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct HistoryEntryView {
    pub id: &'static str,
    pub filename: &'static str,
    pub disease_type: &'static str,
    pub probability: f64,
    pub probability_label: String,
    pub risk_level: &'static str,
    pub timestamp: NaiveDateTime,
    pub date_label: String,
    pub status: HistoryStatus,
}
