use serde::{Deserialize, Serialize};

use crate::store::Timestamp;
use crate::Record;

/// A stored goal. Goals belong to their match and are replaced wholesale
/// whenever the result is reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
#[record(collection = "goals")]
pub struct Goal {
    pub id: u64,
    pub match_id: u64,
    pub player_id: u64,
    pub minute: u8,
    pub created_at: Timestamp,
}

/// One goal as reported by a caller, before validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalEvent {
    pub player_id: u64,
    pub minute: i64,
}

/// A final score with the goals that produced it.
///
/// Scores and minutes are signed here so that out-of-range input reaches
/// the consistency checks instead of failing to decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultReport {
    pub home_score: i64,
    pub away_score: i64,
    #[serde(default)]
    pub goals: Vec<GoalEvent>,
}

impl ResultReport {
    pub fn new(home_score: i64, away_score: i64) -> Self {
        Self {
            home_score,
            away_score,
            goals: Vec::new(),
        }
    }

    pub fn goal(mut self, player_id: u64, minute: i64) -> Self {
        self.goals.push(GoalEvent { player_id, minute });
        self
    }
}
