//! Leaderboards and per-coffee classifications.
//!
//! Everything here works on already materialized [`CoffeeStanding`] records so
//! it can be tested without a store.

use std::cmp::Ordering;

use serde::Serialize;
use uuid::Uuid;

use crate::scoring::{mean, mean_to_label, round2, verdict_from_mean};
use crate::store::models::{BeverageType, VerdictStatus};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CoffeeRef {
    pub id: Uuid,
    pub name: String,
    pub roaster: String,
}

/// What the ranking functions need to know about one coffee.
#[derive(Debug, Clone, PartialEq)]
pub struct CoffeeStanding {
    pub coffee: CoffeeRef,
    /// Mean sensory score over the tastings matching the current filter.
    pub mean: Option<f64>,
    /// Mean sensory score over every tasting of the coffee.
    pub overall_mean: Option<f64>,
    pub cost_per_shot: f64,
    pub verdict: Option<VerdictStatus>,
    /// Sensory mean of each tasting, unfiltered.
    pub tasting_means: Vec<f64>,
}

/// Explicit verdict first, then one derived from the mean.
pub fn verdict_label(verdict: Option<VerdictStatus>, overall_mean: Option<f64>) -> &'static str {
    match (verdict, overall_mean) {
        (Some(status), _) => status.label(),
        (None, Some(avg)) => verdict_from_mean(avg).label(),
        (None, None) => VerdictStatus::UnderObservation.label(),
    }
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RankedCoffee {
    pub position: usize,
    pub coffee_id: Uuid,
    pub name: String,
    pub roaster: String,
    pub mean: f64,
    pub score_label: &'static str,
    pub verdict_label: &'static str,
    pub beverage_filter: Option<BeverageType>,
}

pub fn leaderboard(standings: &[CoffeeStanding], beverage: Option<BeverageType>) -> Vec<RankedCoffee> {
    let mut ranked: Vec<(&CoffeeStanding, f64)> = standings
        .iter()
        .filter_map(|s| s.mean.map(|m| (s, m)))
        .collect();
    ranked.sort_by(|a, b| descending(a.1, b.1));

    ranked
        .into_iter()
        .enumerate()
        .map(|(idx, (standing, avg))| RankedCoffee {
            position: idx + 1,
            coffee_id: standing.coffee.id,
            name: standing.coffee.name.clone(),
            roaster: standing.coffee.roaster.clone(),
            mean: round2(avg),
            score_label: mean_to_label(avg),
            verdict_label: verdict_label(standing.verdict, standing.overall_mean),
            beverage_filter: beverage,
        })
        .collect()
}

/// Quality for money bands, ordered by priority.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum QualityPriceBand {
    NotReported,
    Unfavorable,
    Average,
    Good,
    Excellent,
}

impl QualityPriceBand {
    pub fn label(self) -> &'static str {
        match self {
            QualityPriceBand::Excellent => "excellent",
            QualityPriceBand::Good => "good",
            QualityPriceBand::Average => "average",
            QualityPriceBand::Unfavorable => "unfavorable",
            QualityPriceBand::NotReported => "not reported",
        }
    }
}

pub fn quality_price_ratio(avg_quality: f64, cost_per_shot: f64) -> Option<f64> {
    if cost_per_shot <= 0.0 {
        None
    } else {
        Some(avg_quality / cost_per_shot)
    }
}

/// Bands compare the raw quality/cost ratio, no normalization.
pub fn quality_price_band(avg_quality: f64, cost_per_shot: f64) -> QualityPriceBand {
    match quality_price_ratio(avg_quality, cost_per_shot) {
        None => QualityPriceBand::NotReported,
        Some(r) if r >= 0.20 => QualityPriceBand::Excellent,
        Some(r) if r >= 0.15 => QualityPriceBand::Good,
        Some(r) if r >= 0.10 => QualityPriceBand::Average,
        Some(_) => QualityPriceBand::Unfavorable,
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct QualityPriceInsight {
    pub coffee_id: Uuid,
    pub name: String,
    pub roaster: String,
    pub cost_per_shot: f64,
    pub average_quality: f64,
    pub quality_label: &'static str,
    pub verdict_label: &'static str,
    pub ratio: Option<f64>,
    pub band: QualityPriceBand,
    pub band_label: &'static str,
}

pub fn quality_price(standings: &[CoffeeStanding]) -> Vec<QualityPriceInsight> {
    let mut insights: Vec<QualityPriceInsight> = standings
        .iter()
        .filter_map(|s| {
            let avg = s.overall_mean?;
            let band = quality_price_band(avg, s.cost_per_shot);
            Some(QualityPriceInsight {
                coffee_id: s.coffee.id,
                name: s.coffee.name.clone(),
                roaster: s.coffee.roaster.clone(),
                cost_per_shot: s.cost_per_shot,
                average_quality: round2(avg),
                quality_label: mean_to_label(avg),
                verdict_label: verdict_label(s.verdict, s.overall_mean),
                ratio: quality_price_ratio(avg, s.cost_per_shot).map(round2),
                band,
                band_label: band.label(),
            })
        })
        .collect();
    insights.sort_by(|a, b| b.band.cmp(&a.band));
    insights
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Stability {
    InsufficientData,
    VeryStable,
    FairlyStable,
    Variable,
    HighlyVariable,
}

impl Stability {
    pub fn label(self) -> &'static str {
        match self {
            Stability::InsufficientData => "insufficient data",
            Stability::VeryStable => "very stable",
            Stability::FairlyStable => "fairly stable",
            Stability::Variable => "variable",
            Stability::HighlyVariable => "highly variable",
        }
    }
}

pub fn population_std_dev(samples: &[f64]) -> Option<f64> {
    let avg = mean(samples)?;
    let variance = samples.iter().map(|s| (s - avg).powi(2)).sum::<f64>() / samples.len() as f64;
    Some(variance.sqrt())
}

pub fn stability_label(samples: &[f64]) -> Stability {
    if samples.len() < 2 {
        return Stability::InsufficientData;
    }
    match population_std_dev(samples) {
        Some(spread) if spread < 0.25 => Stability::VeryStable,
        Some(spread) if spread < 0.5 => Stability::FairlyStable,
        Some(spread) if spread < 1.0 => Stability::Variable,
        Some(_) => Stability::HighlyVariable,
        None => Stability::InsufficientData,
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StabilityInsight {
    pub coffee_id: Uuid,
    pub name: String,
    pub roaster: String,
    pub stability: Stability,
    pub stability_label: &'static str,
    pub spread: Option<f64>,
    pub sample_size: usize,
}

/// Coffees with at least one tasting, in input order.
pub fn stability(standings: &[CoffeeStanding]) -> Vec<StabilityInsight> {
    standings
        .iter()
        .filter(|s| !s.tasting_means.is_empty())
        .map(|s| {
            let stability = stability_label(&s.tasting_means);
            StabilityInsight {
                coffee_id: s.coffee.id,
                name: s.coffee.name.clone(),
                roaster: s.coffee.roaster.clone(),
                stability,
                stability_label: stability.label(),
                spread: population_std_dev(&s.tasting_means).map(round2),
                sample_size: s.tasting_means.len(),
            }
        })
        .collect()
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RetestCandidate {
    pub coffee_id: Uuid,
    pub name: String,
    pub roaster: String,
    pub tasting_count: usize,
    pub reason: &'static str,
}

pub fn retest_candidates(counts: &[(CoffeeRef, usize)]) -> Vec<RetestCandidate> {
    counts
        .iter()
        .filter(|(_, count)| *count < 2)
        .map(|(coffee, count)| RetestCandidate {
            coffee_id: coffee.id,
            name: coffee.name.clone(),
            roaster: coffee.roaster.clone(),
            tasting_count: *count,
            reason: if *count == 0 {
                "no tasting recorded"
            } else {
                "a single tasting recorded"
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coffee(name: &str) -> CoffeeRef {
        CoffeeRef {
            id: Uuid::new_v4(),
            name: name.into(),
            roaster: "Test Roastery".into(),
        }
    }

    fn standing(name: &str, means: &[f64], cost: f64) -> CoffeeStanding {
        let overall = mean(means);
        CoffeeStanding {
            coffee: coffee(name),
            mean: overall,
            overall_mean: overall,
            cost_per_shot: cost,
            verdict: None,
            tasting_means: means.to_vec(),
        }
    }

    #[test]
    fn leaderboard_sorts_descending_and_skips_untasted() {
        let standings = vec![
            standing("low", &[2.0], 1.0),
            standing("none", &[], 1.0),
            standing("high", &[4.6, 4.8], 1.0),
        ];
        let board = leaderboard(&standings, None);
        assert_eq!(board.len(), 2);
        assert_eq!(board[0].name, "high");
        assert_eq!(board[0].position, 1);
        assert_eq!(board[0].verdict_label, "buy again");
        assert_eq!(board[1].name, "low");
        assert_eq!(board[1].position, 2);
        assert_eq!(board[1].verdict_label, "avoid");
    }

    #[test]
    fn leaderboard_prefers_the_explicit_verdict() {
        let mut s = standing("kept", &[2.0], 1.0);
        s.verdict = Some(VerdictStatus::BuyAgain);
        let board = leaderboard(&[s], Some(BeverageType::Ristretto));
        assert_eq!(board[0].verdict_label, "buy again");
        assert_eq!(board[0].beverage_filter, Some(BeverageType::Ristretto));
    }

    #[test]
    fn verdict_label_without_data_is_under_observation() {
        assert_eq!(verdict_label(None, None), "under observation");
    }

    #[test]
    fn quality_price_uses_the_raw_ratio() {
        // 4.14 / 1.04 is far above 0.20
        assert_eq!(quality_price_band(4.14, 1.04), QualityPriceBand::Excellent);
        assert_eq!(quality_price_band(3.0, 20.0), QualityPriceBand::Good);
        assert_eq!(quality_price_band(2.0, 20.0), QualityPriceBand::Average);
        assert_eq!(quality_price_band(1.0, 20.0), QualityPriceBand::Unfavorable);
        assert_eq!(quality_price_band(4.0, 0.0), QualityPriceBand::NotReported);
    }

    #[test]
    fn quality_price_sorts_by_band_priority() {
        let standings = vec![
            standing("free", &[4.0], 0.0),
            standing("pricey", &[1.0], 20.0),
            standing("bargain", &[4.0], 1.0),
        ];
        let insights = quality_price(&standings);
        let names: Vec<&str> = insights.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["bargain", "pricey", "free"]);
        assert_eq!(insights[2].band_label, "not reported");
        assert_eq!(insights[2].ratio, None);
    }

    #[test]
    fn stability_bands() {
        assert_eq!(stability_label(&[4.0, 4.0]), Stability::VeryStable);
        assert_eq!(stability_label(&[1.0, 5.0]), Stability::HighlyVariable);
        assert_eq!(stability_label(&[3.0]), Stability::InsufficientData);
        assert_eq!(stability_label(&[3.0, 3.6]), Stability::FairlyStable);
        assert_eq!(stability_label(&[3.0, 4.0]), Stability::Variable);
    }

    #[test]
    fn stability_skips_coffees_without_tastings() {
        let standings = vec![standing("none", &[], 1.0), standing("one", &[3.0], 1.0)];
        let insights = stability(&standings);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].stability_label, "insufficient data");
        assert_eq!(insights[0].sample_size, 1);
    }

    #[test]
    fn retest_lists_coffees_with_fewer_than_two_tastings() {
        let counts = vec![(coffee("zero"), 0), (coffee("one"), 1), (coffee("two"), 2)];
        let candidates = retest_candidates(&counts);
        let names: Vec<&str> = candidates.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["zero", "one"]);
        assert_eq!(candidates[0].reason, "no tasting recorded");
    }
}
