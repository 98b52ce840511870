use time::OffsetDateTime;
use tracing::{debug, info};
use uuid::Uuid;

use super::models::{SensoryScores, Tasting, TastingInput, VerdictInput};
use super::{newest_first, Store};
use crate::error::{Error, Result};
use crate::scoring::{
    compute_sensory_mean, compute_weighted_sensory_mean, mean_to_label, sensory_input_score,
    verdict_from_mean,
};

fn resolve_scores(input: &TastingInput) -> Result<SensoryScores> {
    Ok(SensoryScores {
        acidity: sensory_input_score(&input.acidity)?,
        bitterness: sensory_input_score(&input.bitterness)?,
        body: sensory_input_score(&input.body)?,
        aroma: sensory_input_score(&input.aroma)?,
        balance: sensory_input_score(&input.balance)?,
        finish: sensory_input_score(&input.finish)?,
        overall: sensory_input_score(&input.overall)?,
    })
}

impl Store {
    pub fn list_tastings(&self) -> Vec<Tasting> {
        newest_first(&self.data.tastings, |t| t.created_at)
    }

    pub fn get_tasting(&self, id: Uuid) -> Result<Tasting> {
        self.data
            .tastings
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or(Error::TastingNotFound(id))
    }

    /// Record a tasting, then refresh the verdict of the tasted coffee.
    pub fn upsert_tasting(&mut self, input: TastingInput, id: Option<Uuid>) -> Result<Tasting> {
        if let Some(id) = id {
            if !self.data.tastings.iter().any(|t| t.id == id) {
                return Err(Error::TastingNotFound(id));
            }
        }
        let coffee_id = self
            .find_shot(input.shot_id)
            .map(|s| s.coffee_id)
            .ok_or(Error::ShotNotFound(input.shot_id))?;
        let scores = resolve_scores(&input)?;

        let sensory_mean = compute_sensory_mean(&scores);
        let weighted_sensory_mean = compute_weighted_sensory_mean(&scores, &self.weights);
        debug!(sensory_mean, weighted_sensory_mean, "tasting means derived");

        let tasting = match id {
            Some(id) => {
                let tasting = self
                    .data
                    .tastings
                    .iter_mut()
                    .find(|t| t.id == id)
                    .ok_or(Error::TastingNotFound(id))?;
                tasting.shot_id = input.shot_id;
                tasting.scores = scores;
                tasting.comments = input.comments;
                tasting.sensory_mean = sensory_mean;
                tasting.weighted_sensory_mean = Some(weighted_sensory_mean);
                tasting.clone()
            }
            None => {
                let tasting = Tasting {
                    id: Uuid::new_v4(),
                    shot_id: input.shot_id,
                    scores,
                    comments: input.comments,
                    sensory_mean,
                    weighted_sensory_mean: Some(weighted_sensory_mean),
                    created_at: OffsetDateTime::now_utc(),
                };
                info!(tasting_id = %tasting.id, shot_id = %tasting.shot_id, sensory_mean, "tasting created");
                self.data.tastings.push(tasting.clone());
                tasting
            }
        };

        self.merge_verdict_for_coffee(VerdictInput {
            coffee_id,
            status: verdict_from_mean(sensory_mean),
            rationale: Some(format!(
                "sensory mean {} on the latest tasted shot",
                mean_to_label(sensory_mean)
            )),
        })?;

        Ok(tasting)
    }

    pub fn delete_tasting(&mut self, id: Uuid) -> Result<()> {
        if !self.data.tastings.iter().any(|t| t.id == id) {
            return Err(Error::TastingNotFound(id));
        }
        self.data.tastings.retain(|t| t.id != id);
        info!(tasting_id = %id, "tasting deleted");
        Ok(())
    }
}
