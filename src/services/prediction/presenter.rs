use crate::models::prediction_types::{ContributingFactor, PredictionResult};
use crate::models::view_types::{FactorView, GaugeArc, ResultView};

pub const GAUGE_RADIUS: f64 = 50.0;
/// 2 * pi * radius, rounded the way the gauge artwork is drawn.
pub const GAUGE_CIRCUMFERENCE: f64 = 314.0;

/// `0.73` -> `"73.0%"`
pub fn format_percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

pub fn gauge(probability: f64) -> GaugeArc {
    let filled = probability * GAUGE_CIRCUMFERENCE;
    GaugeArc {
        radius: GAUGE_RADIUS,
        circumference: GAUGE_CIRCUMFERENCE,
        filled,
        dash_array: format!("{:.2} {}", filled, GAUGE_CIRCUMFERENCE),
    }
}

pub fn factor_view(factor: &ContributingFactor) -> FactorView {
    FactorView {
        name: factor.name,
        value: factor.value,
        importance: factor.importance,
        importance_label: format_percent(factor.importance),
        bar_width: factor.importance * 100.0,
    }
}

// Factors keep the order they were supplied in; weights are shown as-is.
pub fn render(result: &PredictionResult) -> ResultView {
    let tier = result.tier();
    ResultView {
        category: result.category,
        category_label: result.category.label(),
        probability: result.probability,
        percent_label: format_percent(result.probability),
        tier,
        tier_label: tier.label(),
        gauge: gauge(result.probability),
        factors: result.factors.iter().map(factor_view).collect(),
    }
}
