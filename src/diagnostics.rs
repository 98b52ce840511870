//! Extraction quality and water chemistry diagnostics.

use serde::Serialize;

use crate::scoring::round2;
use crate::store::models::{BeverageType, Shot, Water};

pub const EXTRACTION_WINDOW_SECONDS: (f64, f64) = (22.0, 36.0);

const RATIO_PENALTY_FACTOR: f64 = 1.4;
const TIME_PENALTY_PER_SECOND: f64 = 0.04;
const MAX_PENALTY: f64 = 4.0;

const UNDER_EXTRACTION_DELTA: f64 = -0.2;
const OVER_EXTRACTION_DELTA: f64 = 0.3;

pub fn target_ratio(beverage: BeverageType) -> f64 {
    match beverage {
        BeverageType::Ristretto => 1.6,
        BeverageType::Espresso => 2.0,
        BeverageType::Long => 2.8,
    }
}

fn seconds_outside_window(seconds: f64) -> f64 {
    let (low, high) = EXTRACTION_WINDOW_SECONDS;
    if seconds < low {
        low - seconds
    } else if seconds > high {
        seconds - high
    } else {
        0.0
    }
}

/// 1-5 proxy for how close a shot landed to its ratio and time targets.
pub fn extraction_score(shot: &Shot) -> f64 {
    let ratio_penalty = (shot.brew_ratio - target_ratio(shot.beverage_type)).abs() * RATIO_PENALTY_FACTOR;
    let time_penalty = seconds_outside_window(shot.extraction_time_seconds) * TIME_PENALTY_PER_SECOND;
    let raw = 5.0 - (ratio_penalty + time_penalty).min(MAX_PENALTY);
    round2(raw.clamp(1.0, 5.0))
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ExtractionStatus {
    UnderExtracted,
    OverExtracted,
    InTarget,
}

impl ExtractionStatus {
    pub fn label(self) -> &'static str {
        match self {
            ExtractionStatus::UnderExtracted => "under-extracted",
            ExtractionStatus::OverExtracted => "over-extracted",
            ExtractionStatus::InTarget => "in target",
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ExtractionDiagnosis {
    pub status: ExtractionStatus,
    pub ratio_delta: f64,
    pub advice: Vec<String>,
}

pub fn diagnose_extraction(shot: &Shot, water: Option<&Water>) -> ExtractionDiagnosis {
    let delta = shot.brew_ratio - target_ratio(shot.beverage_type);
    let mut advice = Vec::new();

    let status = if delta < UNDER_EXTRACTION_DELTA {
        advice.push("tighten the grind or extend the extraction".to_string());
        ExtractionStatus::UnderExtracted
    } else if delta > OVER_EXTRACTION_DELTA {
        advice.push("open the grind or reduce the yield".to_string());
        ExtractionStatus::OverExtracted
    } else {
        ExtractionStatus::InTarget
    };

    let (low, high) = EXTRACTION_WINDOW_SECONDS;
    if shot.extraction_time_seconds < low {
        advice.push("increase fineness".to_string());
    } else if shot.extraction_time_seconds > high {
        advice.push("reduce dose or open grind".to_string());
    }

    if let Some(water) = water {
        let profile = classify_water_profile(water);
        advice.push(format!("water {}: {}", water.label, profile.classification.label()));
        advice.push(profile.extraction_note.to_string());
        if profile.sensory_note != profile.extraction_note {
            advice.push(profile.sensory_note.to_string());
        }
    }

    ExtractionDiagnosis {
        status,
        ratio_delta: round2(delta),
        advice,
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum WaterClass {
    LowMineralization,
    Balanced,
    HighMineralization,
    WeakBuffering,
}

impl WaterClass {
    pub fn label(self) -> &'static str {
        match self {
            WaterClass::LowMineralization => "low mineralization",
            WaterClass::Balanced => "balanced",
            WaterClass::HighMineralization => "high mineralization",
            WaterClass::WeakBuffering => "weak buffering",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct WaterProfile {
    pub classification: WaterClass,
    pub extraction_note: &'static str,
    pub sensory_note: &'static str,
}

/// Bucket a water by chemistry. Rules are checked in order, first match wins.
pub fn classify_water_profile(water: &Water) -> WaterProfile {
    let mineralization = water.mineralization_ppm.unwrap_or(0.0);
    let hardness = water.hardness.unwrap_or(0.0);
    let alkalinity = water.alkalinity.unwrap_or(0.0);

    if mineralization < 70.0 || hardness < 25.0 {
        WaterProfile {
            classification: WaterClass::LowMineralization,
            extraction_note: "risk of under-extraction",
            sensory_note: "sharper acidity, lighter body",
        }
    } else if mineralization > 180.0 || hardness > 90.0 || alkalinity > 120.0 {
        WaterProfile {
            classification: WaterClass::HighMineralization,
            extraction_note: "risk of over-extraction or slow flow",
            sensory_note: "more bitterness, heavier texture",
        }
    } else if alkalinity < 40.0 {
        WaterProfile {
            classification: WaterClass::WeakBuffering,
            extraction_note: "unstable effective pH",
            sensory_note: "perceived acidity higher",
        }
    } else {
        WaterProfile {
            classification: WaterClass::Balanced,
            extraction_note: "neutral effect on extraction",
            sensory_note: "neutral effect on taste",
        }
    }
}
