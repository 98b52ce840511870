use std::cmp::Ordering;

use tracing::debug;
use uuid::Uuid;

use super::dto::{
    AnalyticsSummary, CoffeeAnalytics, ExtractionEntry, GlobalScore, ParameterSuggestion,
    SensorySummary, WaterImpact,
};
use super::ranking::{
    self, CoffeeRef, CoffeeStanding, QualityPriceInsight, RankedCoffee, RetestCandidate,
    StabilityInsight,
};
use crate::diagnostics::{classify_water_profile, diagnose_extraction, extraction_score, target_ratio};
use crate::scoring::{mean, round2, verdict_from_mean};
use crate::store::models::{BeverageType, Coffee, Shot};
use crate::store::Store;

const SENSORY_WEIGHT: f64 = 0.65;
const EXTRACTION_WEIGHT: f64 = 0.35;

/// One analytics block per coffee plus the all-coffee water ranking.
pub fn build_summary(store: &Store) -> AnalyticsSummary {
    let coffees: Vec<CoffeeAnalytics> = store
        .list_coffees()
        .into_iter()
        .map(|coffee| coffee_analytics(store, coffee))
        .collect();
    let water_rankings = water_impacts(store, &store.list_shots());
    debug!(coffees = coffees.len(), waters = water_rankings.len(), "analytics summary built");
    AnalyticsSummary {
        coffees,
        water_rankings,
    }
}

pub fn coffee_analytics(store: &Store, coffee: Coffee) -> CoffeeAnalytics {
    let mut shots = store.shots_by_coffee(coffee.id);
    shots.sort_by_key(|s| s.created_at);

    let extraction_history = extraction_history(store, &shots);
    let parameter_suggestions = parameter_suggestions(store, &shots);
    let sensory_summary = sensory_summary(store, coffee.id);

    let extraction_scores: Vec<f64> = extraction_history.iter().map(|e| e.extraction_score).collect();
    let global_score = global_score(sensory_summary.weighted_mean, mean(&extraction_scores));
    let water_impacts = water_impacts(store, &shots);

    CoffeeAnalytics {
        coffee,
        extraction_history,
        parameter_suggestions,
        sensory_summary,
        global_score,
        water_impacts,
    }
}

fn extraction_history(store: &Store, shots: &[Shot]) -> Vec<ExtractionEntry> {
    shots
        .iter()
        .map(|shot| {
            let water = shot.water_id.and_then(|id| store.find_water(id));
            let diagnosis = diagnose_extraction(shot, water);
            ExtractionEntry {
                shot_id: shot.id,
                created_at: shot.created_at,
                beverage_type: shot.beverage_type,
                grind_setting: shot.grind_setting.clone(),
                dose_grams: shot.dose_grams,
                beverage_weight_grams: shot.beverage_weight_grams,
                extraction_time_seconds: shot.extraction_time_seconds,
                brew_ratio: shot.brew_ratio,
                target_ratio: target_ratio(shot.beverage_type),
                extraction_score: extraction_score(shot),
                diagnosis: diagnosis.status,
                diagnosis_label: diagnosis.status.label(),
                advice: diagnosis.advice,
                water_label: water.map(|w| w.label.clone()),
            }
        })
        .collect()
}

/// Average preferred mean of the shot's tastings, `None` when untasted.
fn shot_score(store: &Store, shot: &Shot) -> Option<f64> {
    let means: Vec<f64> = store
        .tastings_by_shot(shot.id)
        .iter()
        .map(|t| t.preferred_mean())
        .collect();
    mean(&means)
}

fn parameter_suggestions(store: &Store, shots: &[Shot]) -> Vec<ParameterSuggestion> {
    let mut best: Vec<(BeverageType, &Shot, f64, bool)> = Vec::new();
    for shot in shots {
        let score = shot_score(store, shot);
        let candidate = score.unwrap_or(0.0);
        match best.iter_mut().find(|(bev, ..)| *bev == shot.beverage_type) {
            Some(entry) if candidate > entry.2 => {
                *entry = (shot.beverage_type, shot, candidate, score.is_some());
            }
            Some(_) => {}
            None => best.push((shot.beverage_type, shot, candidate, score.is_some())),
        }
    }

    best.into_iter()
        .map(|(beverage, shot, score, tasted)| {
            let rationale = if tasted {
                format!(
                    "best tasted {} shot (score {:.2}): keep grind {} around ratio {:.2}",
                    beverage.as_str(),
                    score,
                    shot.grind_setting,
                    shot.brew_ratio
                )
            } else {
                format!(
                    "no tasting recorded for {} yet: taste grind {} before adjusting",
                    beverage.as_str(),
                    shot.grind_setting
                )
            };
            ParameterSuggestion {
                beverage_type: beverage,
                shot_id: shot.id,
                grind_setting: shot.grind_setting.clone(),
                dose_grams: shot.dose_grams,
                beverage_weight_grams: shot.beverage_weight_grams,
                extraction_time_seconds: shot.extraction_time_seconds,
                brew_ratio: shot.brew_ratio,
                target_ratio: target_ratio(beverage),
                score: round2(score),
                tasted,
                rationale,
            }
        })
        .collect()
}

fn sensory_summary(store: &Store, coffee_id: Uuid) -> SensorySummary {
    let tastings = store.tastings_by_coffee(coffee_id);
    let raw: Vec<f64> = tastings.iter().map(|t| t.sensory_mean).collect();
    let weighted: Vec<f64> = tastings.iter().map(|t| t.preferred_mean()).collect();
    SensorySummary {
        mean: mean(&raw).map(round2),
        weighted_mean: mean(&weighted).map(round2),
        sample_size: tastings.len(),
    }
}

/// 65% weighted sensory mean, 35% mean extraction score.
pub fn global_score(weighted_mean: Option<f64>, extraction_mean: Option<f64>) -> GlobalScore {
    let score = round2(
        SENSORY_WEIGHT * weighted_mean.unwrap_or(0.0)
            + EXTRACTION_WEIGHT * extraction_mean.unwrap_or(0.0),
    );
    let verdict = verdict_from_mean(score);
    GlobalScore {
        score,
        verdict,
        verdict_label: verdict.label(),
    }
}

/// Per-water averages over `shots`, ranked by sensory mean then ratio.
pub fn water_impacts(store: &Store, shots: &[Shot]) -> Vec<WaterImpact> {
    let mut groups: Vec<(Uuid, Vec<&Shot>)> = Vec::new();
    for shot in shots {
        let Some(water_id) = shot.water_id else {
            continue;
        };
        match groups.iter_mut().find(|(id, _)| *id == water_id) {
            Some((_, members)) => members.push(shot),
            None => groups.push((water_id, vec![shot])),
        }
    }

    let mut impacts: Vec<WaterImpact> = groups
        .into_iter()
        .filter_map(|(water_id, members)| {
            let water = store.find_water(water_id)?;
            let profile = classify_water_profile(water);
            let ratios: Vec<f64> = members.iter().map(|s| s.brew_ratio).collect();
            let means: Vec<f64> = members
                .iter()
                .flat_map(|s| store.tastings_by_shot(s.id))
                .map(|t| t.sensory_mean)
                .collect();
            Some(WaterImpact {
                rank: 0,
                water_id,
                label: water.label.clone(),
                classification: profile.classification,
                classification_label: profile.classification.label(),
                extraction_note: profile.extraction_note,
                sensory_note: profile.sensory_note,
                avg_brew_ratio: mean(&ratios).map(round2).unwrap_or(0.0),
                avg_sensory_mean: mean(&means).map(round2),
                shot_count: members.len(),
                tasting_count: means.len(),
            })
        })
        .collect();

    impacts.sort_by(|a, b| {
        let by_mean = b
            .avg_sensory_mean
            .unwrap_or(0.0)
            .partial_cmp(&a.avg_sensory_mean.unwrap_or(0.0))
            .unwrap_or(Ordering::Equal);
        by_mean.then_with(|| {
            b.avg_brew_ratio
                .partial_cmp(&a.avg_brew_ratio)
                .unwrap_or(Ordering::Equal)
        })
    });
    for (idx, impact) in impacts.iter_mut().enumerate() {
        impact.rank = idx + 1;
    }
    impacts
}

// --- store-backed ranking views ---

/// Materialize ranking inputs, optionally filtering means to one beverage.
pub fn standings(store: &Store, beverage: Option<BeverageType>) -> Vec<CoffeeStanding> {
    store
        .list_coffees()
        .into_iter()
        .map(|coffee| {
            let tastings = store.tastings_by_coffee(coffee.id);
            let tasting_means: Vec<f64> = tastings.iter().map(|t| t.sensory_mean).collect();
            let filtered_mean = match beverage {
                None => mean(&tasting_means),
                Some(bev) => {
                    let shot_ids: Vec<Uuid> = store
                        .shots_by_coffee(coffee.id)
                        .into_iter()
                        .filter(|s| s.beverage_type == bev)
                        .map(|s| s.id)
                        .collect();
                    let filtered: Vec<f64> = tastings
                        .iter()
                        .filter(|t| shot_ids.contains(&t.shot_id))
                        .map(|t| t.sensory_mean)
                        .collect();
                    mean(&filtered)
                }
            };
            CoffeeStanding {
                mean: filtered_mean,
                overall_mean: mean(&tasting_means),
                cost_per_shot: coffee.cost_per_shot,
                verdict: store.verdict_for_coffee(coffee.id).map(|v| v.status),
                tasting_means,
                coffee: CoffeeRef {
                    id: coffee.id,
                    name: coffee.name,
                    roaster: coffee.roaster,
                },
            }
        })
        .collect()
}

pub fn rankings(store: &Store, beverage: Option<BeverageType>) -> Vec<RankedCoffee> {
    ranking::leaderboard(&standings(store, beverage), beverage)
}

pub fn quality_price(store: &Store) -> Vec<QualityPriceInsight> {
    ranking::quality_price(&standings(store, None))
}

pub fn stability(store: &Store) -> Vec<StabilityInsight> {
    ranking::stability(&standings(store, None))
}

pub fn retest(store: &Store) -> Vec<RetestCandidate> {
    let counts = store.tasting_counts();
    let rows: Vec<(CoffeeRef, usize)> = store
        .list_coffees()
        .into_iter()
        .map(|c| {
            let count = counts.get(&c.id).copied().unwrap_or(0);
            (
                CoffeeRef {
                    id: c.id,
                    name: c.name,
                    roaster: c.roaster,
                },
                count,
            )
        })
        .collect();
    ranking::retest_candidates(&rows)
}
