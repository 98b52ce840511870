use time::OffsetDateTime;
use tracing::{debug, info};
use uuid::Uuid;

use super::models::{Shot, ShotInput};
use super::{newest_first, Store};
use crate::error::{Error, Result};
use crate::scoring::compute_brew_ratio;

impl Store {
    pub fn list_shots(&self) -> Vec<Shot> {
        newest_first(&self.data.shots, |s| s.created_at)
    }

    pub fn get_shot(&self, id: Uuid) -> Result<Shot> {
        self.find_shot(id).cloned().ok_or(Error::ShotNotFound(id))
    }

    pub(crate) fn find_shot(&self, id: Uuid) -> Option<&Shot> {
        self.data.shots.iter().find(|s| s.id == id)
    }

    fn check_shot_parents(&self, input: &ShotInput) -> Result<()> {
        if self.find_coffee(input.coffee_id).is_none() {
            return Err(Error::CoffeeNotFound(input.coffee_id));
        }
        if let Some(water_id) = input.water_id {
            if self.find_water(water_id).is_none() {
                return Err(Error::WaterNotFound(water_id));
            }
        }
        Ok(())
    }

    pub fn upsert_shot(&mut self, input: ShotInput, id: Option<Uuid>) -> Result<Shot> {
        if let Some(id) = id {
            if self.find_shot(id).is_none() {
                return Err(Error::ShotNotFound(id));
            }
        }
        self.check_shot_parents(&input)?;

        let brew_ratio = compute_brew_ratio(input.dose_grams, input.beverage_weight_grams);
        debug!(dose = input.dose_grams, weight = input.beverage_weight_grams, brew_ratio, "shot ratio derived");

        match id {
            Some(id) => {
                let shot = self
                    .data
                    .shots
                    .iter_mut()
                    .find(|s| s.id == id)
                    .ok_or(Error::ShotNotFound(id))?;
                shot.coffee_id = input.coffee_id;
                shot.water_id = input.water_id;
                shot.beverage_type = input.beverage_type;
                shot.grind_setting = input.grind_setting;
                shot.dose_grams = input.dose_grams;
                shot.beverage_weight_grams = input.beverage_weight_grams;
                shot.extraction_time_seconds = input.extraction_time_seconds;
                shot.notes = input.notes;
                shot.brew_ratio = brew_ratio;
                Ok(shot.clone())
            }
            None => {
                let shot = Shot {
                    id: Uuid::new_v4(),
                    coffee_id: input.coffee_id,
                    water_id: input.water_id,
                    beverage_type: input.beverage_type,
                    grind_setting: input.grind_setting,
                    dose_grams: input.dose_grams,
                    beverage_weight_grams: input.beverage_weight_grams,
                    extraction_time_seconds: input.extraction_time_seconds,
                    notes: input.notes,
                    brew_ratio,
                    created_at: OffsetDateTime::now_utc(),
                };
                info!(shot_id = %shot.id, coffee_id = %shot.coffee_id, "shot created");
                self.data.shots.push(shot.clone());
                Ok(shot)
            }
        }
    }

    /// Remove a shot and every tasting of it.
    pub fn delete_shot(&mut self, id: Uuid) -> Result<()> {
        if self.find_shot(id).is_none() {
            return Err(Error::ShotNotFound(id));
        }
        self.remove_shot_cascade(id);
        info!(shot_id = %id, "shot deleted");
        Ok(())
    }

    pub(super) fn remove_shot_cascade(&mut self, id: Uuid) {
        self.data.tastings.retain(|t| t.shot_id != id);
        self.data.shots.retain(|s| s.id != id);
    }
}
