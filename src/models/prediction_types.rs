use crate::error::AppError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiseaseCategory {
    Diabetes,
    Heart,
    Kidney,
    Obesity,
}

impl DiseaseCategory {
    pub const ALL: [DiseaseCategory; 4] = [
        DiseaseCategory::Diabetes,
        DiseaseCategory::Heart,
        DiseaseCategory::Kidney,
        DiseaseCategory::Obesity,
    ];

    /// Path segment used by the prediction endpoint.
    pub fn slug(&self) -> &'static str {
        match self {
            DiseaseCategory::Diabetes => "diabetes",
            DiseaseCategory::Heart => "heart",
            DiseaseCategory::Kidney => "kidney",
            DiseaseCategory::Obesity => "obesity",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DiseaseCategory::Diabetes => "Diabetes",
            DiseaseCategory::Heart => "Heart Disease",
            DiseaseCategory::Kidney => "Kidney Disease",
            DiseaseCategory::Obesity => "Obesity",
        }
    }
}

impl fmt::Display for DiseaseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for DiseaseCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DiseaseCategory::ALL
            .into_iter()
            .find(|c| c.slug() == s)
            .ok_or_else(|| AppError::Validation(format!("Unknown disease category: {}", s)))
    }
}

/// Entry of the category picker.
#[derive(Debug, Serialize, Clone)]
pub struct CategoryOption {
    pub value: DiseaseCategory,
    pub label: &'static str,
}

impl From<DiseaseCategory> for CategoryOption {
    fn from(category: DiseaseCategory) -> Self {
        CategoryOption {
            value: category,
            label: category.label(),
        }
    }
}

pub const LOW_RISK_CEILING: f64 = 0.3;
pub const MEDIUM_RISK_CEILING: f64 = 0.7;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    /// [0, 0.3) is Low, [0.3, 0.7) is Medium, everything from 0.7 up is High.
    pub fn from_probability(probability: f64) -> Self {
        if probability < LOW_RISK_CEILING {
            RiskTier::Low
        } else if probability < MEDIUM_RISK_CEILING {
            RiskTier::Medium
        } else {
            RiskTier::High
        }
    }

    pub fn short_label(&self) -> &'static str {
        match self {
            RiskTier::Low => "Low",
            RiskTier::Medium => "Medium",
            RiskTier::High => "High",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskTier::Low => "Low Risk",
            RiskTier::Medium => "Medium Risk",
            RiskTier::High => "High Risk",
        }
    }
}

/// One per-patient record returned by the prediction service. Only the
/// probability is interpreted; everything else is kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub probability: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredictionResponse {
    pub records: Vec<Value>,
}

impl PredictionResponse {
    /// Accepts any JSON body. A missing or non-array `predictions` field
    /// yields an empty response rather than an error.
    pub fn from_value(body: Value) -> Self {
        let records = match body {
            Value::Object(mut obj) => match obj.remove("predictions") {
                Some(Value::Array(items)) => items,
                _ => Vec::new(),
            },
            _ => Vec::new(),
        };
        PredictionResponse { records }
    }

    /// First record, if it carries a probability in [0, 1]. Later records are ignored.
    pub fn first_record(&self) -> Option<PredictionRecord> {
        let first = self.records.first()?.clone();
        let record: PredictionRecord = serde_json::from_value(first).ok()?;
        if record.probability.is_finite() && (0.0..=1.0).contains(&record.probability) {
            Some(record)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContributingFactor {
    pub name: &'static str,
    pub importance: f64,
    pub value: &'static str,
}

// Illustrative only; the service does not return feature importances.
pub const ILLUSTRATIVE_FACTORS: [ContributingFactor; 5] = [
    ContributingFactor { name: "Age", importance: 0.23, value: "65 years" },
    ContributingFactor { name: "BMI", importance: 0.19, value: "28.5" },
    ContributingFactor { name: "Blood Pressure", importance: 0.17, value: "140/90" },
    ContributingFactor { name: "Cholesterol", importance: 0.15, value: "240 mg/dL" },
    ContributingFactor { name: "Family History", importance: 0.12, value: "Positive" },
];

#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult {
    pub category: DiseaseCategory,
    pub probability: f64,
    pub factors: Vec<ContributingFactor>,
}

impl PredictionResult {
    pub fn from_record(category: DiseaseCategory, record: PredictionRecord) -> Self {
        PredictionResult {
            category,
            probability: record.probability,
            factors: ILLUSTRATIVE_FACTORS.to_vec(),
        }
    }

    pub fn tier(&self) -> RiskTier {
        RiskTier::from_probability(self.probability)
    }
}
