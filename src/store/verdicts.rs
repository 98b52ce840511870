use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use super::models::{Verdict, VerdictInput};
use super::{newest_first, Store};
use crate::error::{Error, Result};

impl Store {
    pub fn list_verdicts(&self) -> Vec<Verdict> {
        newest_first(&self.data.verdicts, |v| v.created_at)
    }

    pub fn get_verdict(&self, id: Uuid) -> Result<Verdict> {
        self.data
            .verdicts
            .iter()
            .find(|v| v.id == id)
            .cloned()
            .ok_or(Error::VerdictNotFound(id))
    }

    /// Upsert by identifier. Without an id this is the per-coffee merge.
    pub fn upsert_verdict(&mut self, input: VerdictInput, id: Option<Uuid>) -> Result<Verdict> {
        let Some(id) = id else {
            return self.merge_verdict_for_coffee(input);
        };
        if !self.data.verdicts.iter().any(|v| v.id == id) {
            return Err(Error::VerdictNotFound(id));
        }
        if self.find_coffee(input.coffee_id).is_none() {
            return Err(Error::CoffeeNotFound(input.coffee_id));
        }
        if self
            .data
            .verdicts
            .iter()
            .any(|v| v.coffee_id == input.coffee_id && v.id != id)
        {
            return Err(Error::DuplicateVerdict(input.coffee_id));
        }
        let verdict = self
            .data
            .verdicts
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or(Error::VerdictNotFound(id))?;
        verdict.coffee_id = input.coffee_id;
        verdict.status = input.status;
        verdict.rationale = input.rationale;
        Ok(verdict.clone())
    }

    /// Upsert by natural key: a coffee owns at most one verdict.
    pub fn merge_verdict_for_coffee(&mut self, input: VerdictInput) -> Result<Verdict> {
        if self.find_coffee(input.coffee_id).is_none() {
            return Err(Error::CoffeeNotFound(input.coffee_id));
        }
        if let Some(verdict) = self
            .data
            .verdicts
            .iter_mut()
            .find(|v| v.coffee_id == input.coffee_id)
        {
            verdict.status = input.status;
            verdict.rationale = input.rationale;
            return Ok(verdict.clone());
        }
        let verdict = Verdict {
            id: Uuid::new_v4(),
            coffee_id: input.coffee_id,
            status: input.status,
            rationale: input.rationale,
            created_at: OffsetDateTime::now_utc(),
        };
        info!(verdict_id = %verdict.id, coffee_id = %verdict.coffee_id, status = ?verdict.status, "verdict created");
        self.data.verdicts.push(verdict.clone());
        Ok(verdict)
    }

    pub fn delete_verdict(&mut self, id: Uuid) -> Result<()> {
        if !self.data.verdicts.iter().any(|v| v.id == id) {
            return Err(Error::VerdictNotFound(id));
        }
        self.data.verdicts.retain(|v| v.id != id);
        info!(verdict_id = %id, "verdict deleted");
        Ok(())
    }
}
