use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use super::models::{Water, WaterInput};
use super::{newest_first, Store};
use crate::error::{Error, Result};

impl Store {
    pub fn list_waters(&self) -> Vec<Water> {
        newest_first(&self.data.waters, |w| w.created_at)
    }

    pub fn get_water(&self, id: Uuid) -> Result<Water> {
        self.find_water(id).cloned().ok_or(Error::WaterNotFound(id))
    }

    pub fn upsert_water(&mut self, input: WaterInput, id: Option<Uuid>) -> Result<Water> {
        let WaterInput {
            label,
            source,
            brand,
            chemistry,
            filter,
        } = input;

        match id {
            Some(id) => {
                let water = self
                    .data
                    .waters
                    .iter_mut()
                    .find(|w| w.id == id)
                    .ok_or(Error::WaterNotFound(id))?;
                water.label = label;
                water.source = source;
                water.brand = brand;
                water.mineralization_ppm = chemistry.mineralization_ppm;
                water.hardness = chemistry.hardness;
                water.alkalinity = chemistry.alkalinity;
                water.ph = chemistry.ph;
                water.filter = filter;
                Ok(water.clone())
            }
            None => {
                let water = Water {
                    id: Uuid::new_v4(),
                    label,
                    source,
                    brand,
                    mineralization_ppm: chemistry.mineralization_ppm,
                    hardness: chemistry.hardness,
                    alkalinity: chemistry.alkalinity,
                    ph: chemistry.ph,
                    filter,
                    created_at: OffsetDateTime::now_utc(),
                };
                info!(water_id = %water.id, label = %water.label, "water created");
                self.data.waters.push(water.clone());
                Ok(water)
            }
        }
    }

    /// Plain removal; shots that used this water keep the dangling id.
    pub fn delete_water(&mut self, id: Uuid) -> Result<()> {
        if self.find_water(id).is_none() {
            return Err(Error::WaterNotFound(id));
        }
        self.data.waters.retain(|w| w.id != id);
        info!(water_id = %id, "water deleted");
        Ok(())
    }
}
