use crate::models::history_types::{HistoryEntryView, HistoryStatus, PredictionHistoryEntry};
use crate::models::prediction_types::{DiseaseCategory, RiskTier};
use crate::services::prediction::presenter;
use chrono::{NaiveDate, NaiveDateTime};

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, 0)
}

/// Sample past predictions shown beside the upload form. Not persisted and
/// not updated by live submissions.
pub fn entries() -> Vec<PredictionHistoryEntry> {
    let samples = [
        ("1", "patient_data_batch_01.csv", DiseaseCategory::Diabetes, 0.73, RiskTier::High, at(2024, 1, 15, 10, 30)),
        ("2", "heart_screening_data.csv", DiseaseCategory::Heart, 0.42, RiskTier::Medium, at(2024, 1, 14, 15, 45)),
        ("3", "kidney_health_assessment.csv", DiseaseCategory::Kidney, 0.28, RiskTier::Low, at(2024, 1, 13, 9, 15)),
    ];

    samples
        .into_iter()
        .filter_map(|(id, filename, category, probability, tier, timestamp)| {
            Some(PredictionHistoryEntry {
                id,
                filename,
                category,
                probability,
                tier,
                timestamp: timestamp?,
                status: HistoryStatus::Completed,
            })
        })
        .collect()
}

pub fn view(entry: &PredictionHistoryEntry) -> HistoryEntryView {
    HistoryEntryView {
        id: entry.id,
        filename: entry.filename,
        disease_type: entry.category.label(),
        probability: entry.probability,
        probability_label: presenter::format_percent(entry.probability),
        risk_level: entry.tier.short_label(),
        timestamp: entry.timestamp,
        date_label: entry.timestamp.format("%Y-%m-%d").to_string(),
        status: entry.status,
    }
}

pub fn views() -> Vec<HistoryEntryView> {
    entries().iter().map(view).collect()
}
