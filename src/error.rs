use thiserror::Error;

use crate::store::StoreError;

/// Every way a scoreline operation can be refused.
///
/// All variants are recoverable outcomes for the caller. The validation
/// variants are raised before anything is written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Malformed or missing request fields.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// A referenced team, player or match has no live record.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: u64 },
    /// Home and away are the same team, or a scorer plays for neither side.
    #[error("invalid relationship: {0}")]
    InvalidRelationship(String),
    /// The number of goal events differs from home + away.
    #[error("inconsistent score: total score is {total} but {supplied} goal events were supplied")]
    InconsistentScore { total: u64, supplied: usize },
    /// A goal minute outside 1..=120.
    #[error("goal {index} is at minute {minute}, outside 1 to 120")]
    OutOfRange { index: usize, minute: i64 },
    /// The match has left the scheduled state.
    #[error("match {match_id} has already been reported")]
    AlreadyReported { match_id: u64 },
    /// A query or the result commit failed in storage.
    #[error("storage failure: {0}")]
    StorageFailure(#[from] StoreError),
}

impl DomainError {
    pub(crate) fn not_found(entity: &'static str, id: u64) -> Self {
        DomainError::NotFound { entity, id }
    }

    /// Short machine-readable name of the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            DomainError::InvalidInput(_) => "invalid_input",
            DomainError::NotFound { .. } => "not_found",
            DomainError::InvalidRelationship(_) => "invalid_relationship",
            DomainError::InconsistentScore { .. } => "inconsistent_score",
            DomainError::OutOfRange { .. } => "out_of_range",
            DomainError::AlreadyReported { .. } => "already_reported",
            DomainError::StorageFailure(_) => "storage_failure",
        }
    }
}
