//! ResultCommitSequencer - writes a validated result as one unit of work.
//!
//! ## Example
//!
//! ```ignore
//! let fixture = store.records::<Match>().get_live(match_id)?.ok_or(..)?;
//! let checked = consistency::check(&report)?;
//! let completed = ResultCommitSequencer::new(&store).commit(fixture, &checked)?;
//! ```
//!
//! The unit stages, in order: the score and status update guarded by the
//! version that was read, removal of the match's previous goals, and one
//! insert per new goal. Readers see all of it or none of it.

use chrono::Utc;

use crate::domain::{Goal, Match, MatchStatus};
use crate::error::DomainError;
use crate::store::{EntityStore, Record, RecordsExt, StoreError, UnitOfWork, Versioned};

use super::consistency::ValidatedResult;

pub struct ResultCommitSequencer<'a, S> {
    store: &'a S,
}

impl<'a, S: EntityStore> ResultCommitSequencer<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Complete `fixture` with `result`. The fixture must still be
    /// scheduled, both as read and at the moment the unit is applied.
    pub fn commit(
        &self,
        fixture: Versioned<Match>,
        result: &ValidatedResult,
    ) -> Result<Match, DomainError> {
        let Versioned {
            data: mut fixture,
            version,
        } = fixture;
        let match_id = fixture.id;

        if !fixture.is_scheduled() {
            return Err(DomainError::AlreadyReported { match_id });
        }

        let now = Utc::now();
        fixture.home_score = result.home_score;
        fixture.away_score = result.away_score;
        fixture.status = MatchStatus::Completed;
        fixture.updated_at = now;

        let mut unit = UnitOfWork::new()
            .update(&fixture, version)
            .delete_where::<Goal, _>(move |goal| goal.match_id == match_id);

        for scored in &result.goals {
            let goal = Goal {
                id: self.store.next_id(Goal::COLLECTION)?,
                match_id,
                player_id: scored.player_id,
                minute: scored.minute,
                created_at: now,
            };
            unit = unit.insert(&goal);
        }

        match self.store.apply(unit) {
            Ok(()) => {
                tracing::info!(
                    match_id,
                    home_score = fixture.home_score,
                    away_score = fixture.away_score,
                    goals = result.goals.len(),
                    "result committed"
                );
                Ok(fixture)
            }
            Err(StoreError::ConcurrencyConflict { ref collection, id, .. })
                if collection == Match::COLLECTION && id == match_id =>
            {
                self.lost_race(match_id)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// The version guard failed. Another reporter usually got there first;
    /// anything else that moved the version is a storage problem.
    fn lost_race(&self, match_id: u64) -> Result<Match, DomainError> {
        let current = self.store.records::<Match>().get(match_id)?;
        match current {
            Some(current) if !current.data.is_scheduled() => {
                tracing::debug!(match_id, "result lost a concurrent report");
                Err(DomainError::AlreadyReported { match_id })
            }
            _ => Err(DomainError::StorageFailure(StoreError::Storage(format!(
                "match {} changed while its result was being committed",
                match_id
            )))),
        }
    }
}
