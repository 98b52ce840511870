use time::OffsetDateTime;
use tracing::{debug, info};
use uuid::Uuid;

use super::models::{Coffee, CoffeeInput};
use super::{newest_first, Store};
use crate::error::{Error, Result};
use crate::scoring::{compute_cost_per_shot, REFERENCE_DOSE_GRAMS};

impl Store {
    pub fn list_coffees(&self) -> Vec<Coffee> {
        newest_first(&self.data.coffees, |c| c.created_at)
    }

    pub fn get_coffee(&self, id: Uuid) -> Result<Coffee> {
        self.find_coffee(id).cloned().ok_or(Error::CoffeeNotFound(id))
    }

    pub(crate) fn find_coffee(&self, id: Uuid) -> Option<&Coffee> {
        self.data.coffees.iter().find(|c| c.id == id)
    }

    /// Create a coffee, or replace every field of an existing one.
    pub fn upsert_coffee(&mut self, input: CoffeeInput, id: Option<Uuid>) -> Result<Coffee> {
        let cost_per_shot =
            compute_cost_per_shot(input.price, input.package_weight_grams, REFERENCE_DOSE_GRAMS);
        debug!(price = input.price, weight = input.package_weight_grams, cost_per_shot, "coffee cost derived");

        match id {
            Some(id) => {
                let coffee = self
                    .data
                    .coffees
                    .iter_mut()
                    .find(|c| c.id == id)
                    .ok_or(Error::CoffeeNotFound(id))?;
                coffee.name = input.name;
                coffee.roaster = input.roaster;
                coffee.reference = input.reference;
                coffee.format = input.format;
                coffee.package_weight_grams = input.package_weight_grams;
                coffee.price = input.price;
                coffee.purchased_on = input.purchased_on;
                coffee.cost_per_shot = cost_per_shot;
                Ok(coffee.clone())
            }
            None => {
                let coffee = Coffee {
                    id: Uuid::new_v4(),
                    name: input.name,
                    roaster: input.roaster,
                    reference: input.reference,
                    format: input.format,
                    package_weight_grams: input.package_weight_grams,
                    price: input.price,
                    purchased_on: input.purchased_on,
                    cost_per_shot,
                    created_at: OffsetDateTime::now_utc(),
                };
                info!(coffee_id = %coffee.id, name = %coffee.name, "coffee created");
                self.data.coffees.push(coffee.clone());
                Ok(coffee)
            }
        }
    }

    /// Remove a coffee with its shots, their tastings, and its verdict.
    pub fn delete_coffee(&mut self, id: Uuid) -> Result<()> {
        if self.find_coffee(id).is_none() {
            return Err(Error::CoffeeNotFound(id));
        }
        let shot_ids: Vec<Uuid> = self
            .data
            .shots
            .iter()
            .filter(|s| s.coffee_id == id)
            .map(|s| s.id)
            .collect();
        for shot_id in &shot_ids {
            self.remove_shot_cascade(*shot_id);
        }
        self.data.verdicts.retain(|v| v.coffee_id != id);
        self.data.coffees.retain(|c| c.id != id);
        info!(coffee_id = %id, shots = shot_ids.len(), "coffee deleted");
        Ok(())
    }
}
