use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// Bag format of a coffee lot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CoffeeFormat {
    Grain,
    Ground,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WaterSource {
    Tap,
    Bottled,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BeverageType {
    Ristretto,
    Espresso,
    Long,
}

impl BeverageType {
    pub fn as_str(self) -> &'static str {
        match self {
            BeverageType::Ristretto => "ristretto",
            BeverageType::Espresso => "espresso",
            BeverageType::Long => "long",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum VerdictStatus {
    BuyAgain,
    NeedsRefinement,
    UnderObservation,
    Avoid,
}

impl VerdictStatus {
    /// Human label shown next to rankings.
    pub fn label(self) -> &'static str {
        match self {
            VerdictStatus::BuyAgain => "buy again",
            VerdictStatus::NeedsRefinement => "needs refinement",
            VerdictStatus::UnderObservation => "under observation",
            VerdictStatus::Avoid => "avoid",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Coffee {
    pub id: Uuid,
    pub name: String,
    pub roaster: String,
    pub reference: Option<String>,
    pub format: CoffeeFormat,
    pub package_weight_grams: u32,
    pub price: f64,
    #[serde(with = "iso_date")]
    pub purchased_on: Date,
    pub cost_per_shot: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoffeeInput {
    pub name: String,
    pub roaster: String,
    #[serde(default)]
    pub reference: Option<String>,
    pub format: CoffeeFormat,
    pub package_weight_grams: u32,
    pub price: f64,
    #[serde(with = "iso_date")]
    pub purchased_on: Date,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Water {
    pub id: Uuid,
    pub label: String,
    pub source: WaterSource,
    pub brand: Option<String>,
    pub mineralization_ppm: Option<f64>,
    pub hardness: Option<f64>,
    pub alkalinity: Option<f64>,
    pub ph: Option<f64>,
    pub filter: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WaterChemistry {
    #[serde(default)]
    pub mineralization_ppm: Option<f64>,
    #[serde(default)]
    pub hardness: Option<f64>,
    #[serde(default)]
    pub alkalinity: Option<f64>,
    #[serde(default)]
    pub ph: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WaterInput {
    pub label: String,
    pub source: WaterSource,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(flatten)]
    pub chemistry: WaterChemistry,
    #[serde(default)]
    pub filter: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Shot {
    pub id: Uuid,
    pub coffee_id: Uuid,
    pub water_id: Option<Uuid>,
    pub beverage_type: BeverageType,
    pub grind_setting: String,
    pub dose_grams: f64,
    pub beverage_weight_grams: f64,
    pub extraction_time_seconds: f64,
    pub notes: Option<String>,
    pub brew_ratio: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShotInput {
    pub coffee_id: Uuid,
    #[serde(default)]
    pub water_id: Option<Uuid>,
    pub beverage_type: BeverageType,
    pub grind_setting: String,
    pub dose_grams: f64,
    pub beverage_weight_grams: f64,
    pub extraction_time_seconds: f64,
    #[serde(default)]
    pub notes: Option<String>,
}

/// The seven tasting axes, each on a 1-5 scale.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SensoryScores {
    pub acidity: u8,
    pub bitterness: u8,
    pub body: u8,
    pub aroma: u8,
    pub balance: u8,
    pub finish: u8,
    pub overall: u8,
}

impl SensoryScores {
    pub fn as_array(&self) -> [u8; 7] {
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
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tasting {
    pub id: Uuid,
    pub shot_id: Uuid,
    #[serde(flatten)]
    pub scores: SensoryScores,
    pub comments: Option<String>,
    pub sensory_mean: f64,
    /// Absent on records written before weighting existed.
    #[serde(default)]
    pub weighted_sensory_mean: Option<f64>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Tasting {
    /// Weighted mean when recorded, raw mean otherwise.
    pub fn preferred_mean(&self) -> f64 {
        self.weighted_sensory_mean.unwrap_or(self.sensory_mean)
    }
}

/// A tasting axis as typed by the caller: a bare score or a label.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum SensoryInput {
    Score(i64),
    Label(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TastingInput {
    pub shot_id: Uuid,
    pub acidity: SensoryInput,
    pub bitterness: SensoryInput,
    pub body: SensoryInput,
    pub aroma: SensoryInput,
    pub balance: SensoryInput,
    pub finish: SensoryInput,
    pub overall: SensoryInput,
    #[serde(default)]
    pub comments: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Verdict {
    pub id: Uuid,
    pub coffee_id: Uuid,
    pub status: VerdictStatus,
    pub rationale: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VerdictInput {
    pub coffee_id: Uuid,
    pub status: VerdictStatus,
    #[serde(default)]
    pub rationale: Option<String>,
}
