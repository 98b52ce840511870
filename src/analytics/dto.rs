use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::diagnostics::{ExtractionStatus, WaterClass};
use crate::store::models::{BeverageType, Coffee, VerdictStatus};

#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsSummary {
    pub coffees: Vec<CoffeeAnalytics>,
    pub water_rankings: Vec<WaterImpact>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CoffeeAnalytics {
    pub coffee: Coffee,
    pub extraction_history: Vec<ExtractionEntry>,
    pub parameter_suggestions: Vec<ParameterSuggestion>,
    pub sensory_summary: SensorySummary,
    pub global_score: GlobalScore,
    pub water_impacts: Vec<WaterImpact>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtractionEntry {
    pub shot_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub beverage_type: BeverageType,
    pub grind_setting: String,
    pub dose_grams: f64,
    pub beverage_weight_grams: f64,
    pub extraction_time_seconds: f64,
    pub brew_ratio: f64,
    pub target_ratio: f64,
    pub extraction_score: f64,
    pub diagnosis: ExtractionStatus,
    pub diagnosis_label: &'static str,
    pub advice: Vec<String>,
    pub water_label: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParameterSuggestion {
    pub beverage_type: BeverageType,
    pub shot_id: Uuid,
    pub grind_setting: String,
    pub dose_grams: f64,
    pub beverage_weight_grams: f64,
    pub extraction_time_seconds: f64,
    pub brew_ratio: f64,
    pub target_ratio: f64,
    pub score: f64,
    pub tasted: bool,
    pub rationale: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SensorySummary {
    pub mean: Option<f64>,
    pub weighted_mean: Option<f64>,
    pub sample_size: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GlobalScore {
    pub score: f64,
    pub verdict: VerdictStatus,
    pub verdict_label: &'static str,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WaterImpact {
    pub rank: usize,
    pub water_id: Uuid,
    pub label: String,
    pub classification: WaterClass,
    pub classification_label: &'static str,
    pub extraction_note: &'static str,
    pub sensory_note: &'static str,
    pub avg_brew_ratio: f64,
    pub avg_sensory_mean: Option<f64>,
    pub shot_count: usize,
    pub tasting_count: usize,
}
