//! Reporting engine - accepts match results and derives reports from them.
//!
//! A result report passes through three stages before anything is written:
//!
//! 1. [`consistency::check`] - scores non-negative, goal minutes within
//!    1..=120, goal count equal to home + away.
//! 2. [`ReferentialValidator`] - every scorer plays for one of the two sides.
//! 3. [`ResultCommitSequencer`] - score, status and goals land as one unit
//!    of work, guarded by the match version that was read.
//!
//! [`ReportAggregator`] reads independently of all three.
//!
//! ## Example
//!
//! ```ignore
//! use scoreline::{InMemoryStore, ReportingEngine, ResultReport};
//!
//! let engine = ReportingEngine::new(InMemoryStore::new());
//! let report = ResultReport::new(2, 1)
//!     .goal(striker, 10)
//!     .goal(striker, 45)
//!     .goal(winger, 70);
//!
//! engine.report_result(match_id, &report)?;
//! assert_eq!(engine.get_report(match_id)?.final_score, "2-1");
//! ```

mod commit;
pub mod consistency;
mod report;
mod roster;
mod validate;

pub use commit::ResultCommitSequencer;
pub use consistency::{ValidatedGoal, ValidatedResult};
pub use report::{MatchReport, Outcome, ReportAggregator, TopScorer, NO_GOALS_YET};
pub use roster::{MatchDetail, Roster};
pub use validate::ReferentialValidator;

use tracing::{info, warn};

use crate::domain::{Match, ResultReport};
use crate::error::DomainError;
use crate::store::{EntityStore, RecordsExt};

/// Entry point for every engine operation. Owns the store handle and lends
/// it to the component that does the work.
#[derive(Clone)]
pub struct ReportingEngine<S> {
    store: S,
}

impl<S: EntityStore> ReportingEngine<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn roster(&self) -> Roster<'_, S> {
        Roster::new(&self.store)
    }

    pub fn validator(&self) -> ReferentialValidator<'_, S> {
        ReferentialValidator::new(&self.store)
    }

    pub fn aggregator(&self) -> ReportAggregator<'_, S> {
        ReportAggregator::new(&self.store)
    }

    /// Record the final score and goals of a scheduled match.
    ///
    /// Returns the completed match. On any error no record has changed.
    pub fn report_result(
        &self,
        match_id: u64,
        report: &ResultReport,
    ) -> Result<Match, DomainError> {
        let span = tracing::info_span!("report_result", match_id);
        let _entered = span.enter();

        let outcome = self.try_report(match_id, report);
        match &outcome {
            Ok(fixture) => info!(
                home_score = fixture.home_score,
                away_score = fixture.away_score,
                "result accepted"
            ),
            Err(err) if matches!(err, DomainError::StorageFailure(_)) => {
                warn!(error = %err, "result not stored")
            }
            Err(err) => info!(reason = err.kind(), error = %err, "result rejected"),
        }
        outcome
    }

    fn try_report(&self, match_id: u64, report: &ResultReport) -> Result<Match, DomainError> {
        let checked = consistency::check(report)?;

        let fixture = self
            .store
            .records::<Match>()
            .get_live(match_id)?
            .ok_or_else(|| DomainError::not_found("match", match_id))?;
        if !fixture.data.is_scheduled() {
            return Err(DomainError::AlreadyReported { match_id });
        }

        self.validator()
            .validate_scorers(&checked.goals, &fixture.data)?;

        ResultCommitSequencer::new(&self.store).commit(fixture, &checked)
    }

    /// Summary view of a match, recomputed from storage.
    pub fn get_report(&self, match_id: u64) -> Result<MatchReport, DomainError> {
        self.aggregator().report(match_id)
    }
}
