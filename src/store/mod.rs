//! In-memory entity store.
//!
//! The store owns every record and is the only place where derived fields
//! (cost per shot, brew ratio, sensory means) get written. It does no locking
//! of its own; callers serialize writers.

use std::collections::HashMap;

use anyhow::Context;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::scoring::SensoryWeights;

mod coffees;
pub mod models;
mod shots;
mod tastings;
mod verdicts;
mod waters;

use models::{Coffee, Shot, Tasting, Verdict, Water};

/// Everything the store persists, in insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Dataset {
    #[serde(default)]
    pub coffees: Vec<Coffee>,
    #[serde(default)]
    pub waters: Vec<Water>,
    #[serde(default)]
    pub shots: Vec<Shot>,
    #[serde(default)]
    pub tastings: Vec<Tasting>,
    #[serde(default)]
    pub verdicts: Vec<Verdict>,
}

#[derive(Debug, Clone, Default)]
pub struct Store {
    data: Dataset,
    weights: SensoryWeights,
}

impl Store {
    pub fn new(weights: SensoryWeights) -> Self {
        Self {
            data: Dataset::default(),
            weights,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.data
    }

    pub fn to_snapshot(&self) -> anyhow::Result<Bytes> {
        let body = serde_json::to_vec_pretty(&self.data).context("serialize store snapshot")?;
        Ok(Bytes::from(body))
    }

    pub fn from_snapshot(body: &[u8], weights: SensoryWeights) -> anyhow::Result<Self> {
        let data: Dataset = serde_json::from_slice(body).context("parse store snapshot")?;
        tracing::info!(
            coffees = data.coffees.len(),
            waters = data.waters.len(),
            shots = data.shots.len(),
            tastings = data.tastings.len(),
            verdicts = data.verdicts.len(),
            "store snapshot loaded"
        );
        Ok(Self { data, weights })
    }

    // --- query helpers used by analytics ---

    /// Shots of a coffee in insertion order.
    pub fn shots_by_coffee(&self, coffee_id: Uuid) -> Vec<Shot> {
        self.data
            .shots
            .iter()
            .filter(|s| s.coffee_id == coffee_id)
            .cloned()
            .collect()
    }

    pub fn tastings_by_shot(&self, shot_id: Uuid) -> Vec<Tasting> {
        self.data
            .tastings
            .iter()
            .filter(|t| t.shot_id == shot_id)
            .cloned()
            .collect()
    }

    pub fn tastings_by_coffee(&self, coffee_id: Uuid) -> Vec<Tasting> {
        let shot_ids: Vec<Uuid> = self
            .data
            .shots
            .iter()
            .filter(|s| s.coffee_id == coffee_id)
            .map(|s| s.id)
            .collect();
        self.data
            .tastings
            .iter()
            .filter(|t| shot_ids.contains(&t.shot_id))
            .cloned()
            .collect()
    }

    /// Tasting count per coffee; coffees without tastings report 0.
    pub fn tasting_counts(&self) -> HashMap<Uuid, usize> {
        let mut counts: HashMap<Uuid, usize> =
            self.data.coffees.iter().map(|c| (c.id, 0)).collect();
        for tasting in &self.data.tastings {
            if let Some(shot) = self.data.shots.iter().find(|s| s.id == tasting.shot_id) {
                *counts.entry(shot.coffee_id).or_insert(0) += 1;
            }
        }
        counts
    }

    pub fn verdict_for_coffee(&self, coffee_id: Uuid) -> Option<Verdict> {
        self.data
            .verdicts
            .iter()
            .find(|v| v.coffee_id == coffee_id)
            .cloned()
    }

    pub(crate) fn find_water(&self, id: Uuid) -> Option<&Water> {
        self.data.waters.iter().find(|w| w.id == id)
    }
}

fn newest_first<T: Clone>(items: &[T], created_at: impl Fn(&T) -> OffsetDateTime) -> Vec<T> {
    let mut out = items.to_vec();
    out.reverse();
    out.sort_by_key(|item| std::cmp::Reverse(created_at(item)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::models::*;
    use time::macros::date;

    fn coffee_input(name: &str) -> CoffeeInput {
        CoffeeInput {
            name: name.into(),
            roaster: "Test Roastery".into(),
            reference: None,
            format: CoffeeFormat::Grain,
            package_weight_grams: 250,
            price: 14.5,
            purchased_on: date!(2024 - 06 - 10),
        }
    }

    #[test]
    fn snapshot_restores_the_same_dataset() {
        let mut store = Store::default();
        store.upsert_coffee(coffee_input("Snapshot"), None).unwrap();
        let body = store.to_snapshot().unwrap();
        let restored = Store::from_snapshot(&body, SensoryWeights::default()).unwrap();
        assert_eq!(restored.dataset(), store.dataset());
    }

    #[test]
    fn empty_snapshot_object_is_an_empty_store() {
        let restored = Store::from_snapshot(b"{}", SensoryWeights::default()).unwrap();
        assert!(restored.list_coffees().is_empty());
    }

    #[test]
    fn tasting_counts_include_untasted_coffees() {
        let mut store = Store::default();
        let c = store.upsert_coffee(coffee_input("Lonely"), None).unwrap();
        assert_eq!(store.tasting_counts().get(&c.id), Some(&0));
    }
}
