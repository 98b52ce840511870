//! Pure scoring helpers: label conversion, ratios, means and verdicts.

use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::error::{Error, Result};
use crate::store::models::{SensoryInput, SensoryScores, VerdictStatus};

pub const REFERENCE_DOSE_GRAMS: f64 = 18.0;

const MID_SCALE_LABEL: &str = "équilibré";

/// Canonical label for each score, index 0 is score 1.
const CANONICAL_LABELS: [&str; 5] = ["absente", "léger", "équilibré", "prononcé", "intense"];

/// Accepted spellings, already folded (lowercase, no diacritics).
const LABEL_TABLE: &[(&str, u8)] = &[
    ("absente", 1),
    ("absent", 1),
    ("nul", 1),
    ("none", 1),
    ("leger", 2),
    ("faible", 2),
    ("light", 2),
    ("faint", 2),
    ("weak", 2),
    ("equilibre", 3),
    ("moyen", 3),
    ("balanced", 3),
    ("medium", 3),
    ("prononce", 4),
    ("marque", 4),
    ("pronounced", 4),
    ("marked", 4),
    ("strong", 4),
    ("intense", 5),
    ("sirupeux", 5),
    ("syrupy", 5),
];

/// Per-axis weights for the weighted sensory mean.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SensoryWeights {
    pub acidity: f64,
    pub bitterness: f64,
    pub body: f64,
    pub aroma: f64,
    pub balance: f64,
    pub finish: f64,
    pub overall: f64,
}

impl Default for SensoryWeights {
    fn default() -> Self {
        Self {
            acidity: 0.15,
            bitterness: 0.10,
            body: 0.15,
            aroma: 0.20,
            balance: 0.20,
            finish: 0.10,
            overall: 0.10,
        }
    }
}

impl SensoryWeights {
    pub fn as_array(&self) -> [f64; 7] {
        [
            self.acidity,
            self.bitterness,
            self.body,
            self.aroma,
            self.balance,
            self.finish,
            self.overall,
        ]
    }

    pub fn from_array(w: [f64; 7]) -> Self {
        Self {
            acidity: w[0],
            bitterness: w[1],
            body: w[2],
            aroma: w[3],
            balance: w[4],
            finish: w[5],
            overall: w[6],
        }
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Trim, lowercase, then decompose and drop combining marks, so precomposed
/// and decomposed accents both fold to the bare letter.
pub fn normalize_label(label: &str) -> String {
    label
        .trim()
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

pub fn label_to_score(label: &str) -> Result<u8> {
    let normalized = normalize_label(label);
    if let Ok(digit) = normalized.parse::<u8>() {
        if (1..=5).contains(&digit) {
            return Ok(digit);
        }
    }
    LABEL_TABLE
        .iter()
        .find(|(known, _)| *known == normalized)
        .map(|(_, score)| *score)
        .ok_or_else(|| Error::UnknownLabel(label.to_string()))
}

pub fn score_to_label(score: i64) -> &'static str {
    let bounded = score.clamp(1, 5);
    CANONICAL_LABELS
        .get((bounded - 1) as usize)
        .copied()
        .unwrap_or(MID_SCALE_LABEL)
}

pub fn mean_to_label(mean: f64) -> &'static str {
    score_to_label(mean.round() as i64)
}

/// Resolve one tasting axis to its 1-5 score.
pub fn sensory_input_score(input: &SensoryInput) -> Result<u8> {
    match input {
        SensoryInput::Score(value) if (1..=5).contains(value) => Ok(*value as u8),
        SensoryInput::Score(value) => Err(Error::UnknownLabel(value.to_string())),
        SensoryInput::Label(label) => label_to_score(label),
    }
}

pub fn compute_brew_ratio(dose_grams: f64, beverage_weight_grams: f64) -> f64 {
    if dose_grams <= 0.0 {
        return 0.0;
    }
    round2(beverage_weight_grams / dose_grams)
}

pub fn compute_cost_per_shot(price: f64, bag_weight_grams: u32, reference_dose: f64) -> f64 {
    if bag_weight_grams == 0 {
        return 0.0;
    }
    round2(price / f64::from(bag_weight_grams) * reference_dose)
}

pub fn compute_sensory_mean(scores: &SensoryScores) -> f64 {
    let values = scores.as_array();
    let sum: f64 = values.iter().map(|s| f64::from(*s)).sum();
    round2(sum / values.len() as f64)
}

pub fn compute_weighted_sensory_mean(scores: &SensoryScores, weights: &SensoryWeights) -> f64 {
    let weights = weights.as_array();
    let total_weight: f64 = weights.iter().sum();
    if total_weight <= 0.0 {
        return compute_sensory_mean(scores);
    }
    let weighted: f64 = scores
        .as_array()
        .iter()
        .zip(weights.iter())
        .map(|(s, w)| f64::from(*s) * w)
        .sum();
    round2(weighted / total_weight)
}

pub fn verdict_from_mean(mean: f64) -> VerdictStatus {
    if mean >= 4.5 {
        VerdictStatus::BuyAgain
    } else if mean >= 3.5 {
        VerdictStatus::NeedsRefinement
    } else if mean >= 2.5 {
        VerdictStatus::UnderObservation
    } else {
        VerdictStatus::Avoid
    }
}

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
