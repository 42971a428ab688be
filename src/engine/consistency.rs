//! Result consistency - minute bounds and goal count against the score.
//!
//! Runs before any store access, so a rejected report never costs a read.

use crate::domain::ResultReport;
use crate::error::DomainError;

/// Earliest minute a goal may be recorded at.
pub const MIN_MINUTE: i64 = 1;
/// Latest minute a goal may be recorded at (end of extra time).
pub const MAX_MINUTE: i64 = 120;

/// A goal whose minute has been range-checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedGoal {
    pub player_id: u64,
    pub minute: u8,
}

/// A report whose shape is internally consistent. Scorers are not yet
/// checked against the fixture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedResult {
    pub home_score: u32,
    pub away_score: u32,
    pub goals: Vec<ValidatedGoal>,
}

impl ValidatedResult {
    pub fn total(&self) -> u64 {
        u64::from(self.home_score) + u64::from(self.away_score)
    }
}

/// Check a raw report: scores, then every minute, then the goal count.
pub fn check(report: &ResultReport) -> Result<ValidatedResult, DomainError> {
    let home_score = score("home_score", report.home_score)?;
    let away_score = score("away_score", report.away_score)?;

    let goals = report
        .goals
        .iter()
        .enumerate()
        .map(|(index, goal)| {
            minute(index, goal.minute).map(|minute| ValidatedGoal {
                player_id: goal.player_id,
                minute,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let result = ValidatedResult {
        home_score,
        away_score,
        goals,
    };
    if result.goals.len() as u64 != result.total() {
        return Err(DomainError::InconsistentScore {
            total: result.total(),
            supplied: result.goals.len(),
        });
    }
    Ok(result)
}

fn score(field: &str, value: i64) -> Result<u32, DomainError> {
    u32::try_from(value).map_err(|_| {
        DomainError::InvalidInput(format!("{} must be a non-negative count, got {}", field, value))
    })
}

fn minute(index: usize, minute: i64) -> Result<u8, DomainError> {
    if !(MIN_MINUTE..=MAX_MINUTE).contains(&minute) {
        return Err(DomainError::OutOfRange { index, minute });
    }
    u8::try_from(minute).map_err(|_| DomainError::OutOfRange { index, minute })
}
