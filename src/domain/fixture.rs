use std::fmt;

use serde::{Deserialize, Serialize};

use crate::store::Timestamp;
use crate::Record;

/// Lifecycle of a match. Only `Scheduled -> Completed` is reachable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MatchStatus::Scheduled => "scheduled",
            MatchStatus::Completed => "completed",
            MatchStatus::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

/// A fixture between two distinct teams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
#[record(collection = "matches")]
pub struct Match {
    pub id: u64,
    pub home_team_id: u64,
    pub away_team_id: u64,
    pub scheduled_at: Timestamp,
    #[serde(default)]
    pub status: MatchStatus,
    #[serde(default)]
    pub home_score: u32,
    #[serde(default)]
    pub away_score: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[record(soft_delete)]
    pub deleted_at: Option<Timestamp>,
}

/// Fields accepted when scheduling a match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMatch {
    pub home_team_id: u64,
    pub away_team_id: u64,
    pub scheduled_at: Timestamp,
}

impl Match {
    /// A scheduled, goalless fixture. Team checks belong to the caller.
    pub fn schedule(new: NewMatch, now: Timestamp) -> Self {
        Self {
            id: 0,
            home_team_id: new.home_team_id,
            away_team_id: new.away_team_id,
            scheduled_at: new.scheduled_at,
            status: MatchStatus::Scheduled,
            home_score: 0,
            away_score: 0,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    pub fn is_scheduled(&self) -> bool {
        self.status == MatchStatus::Scheduled
    }

    pub fn is_completed(&self) -> bool {
        self.status == MatchStatus::Completed
    }

    pub fn involves(&self, team_id: u64) -> bool {
        self.home_team_id == team_id || self.away_team_id == team_id
    }

    /// True for a completed match that `team_id` won, home or away.
    pub fn won_by(&self, team_id: u64) -> bool {
        if !self.is_completed() {
            return false;
        }
        (self.home_team_id == team_id && self.home_score > self.away_score)
            || (self.away_team_id == team_id && self.away_score > self.home_score)
    }
}
