//! Domain records - teams, players, match fixtures and goals.
//!
//! Every record is a plain serde struct deriving [`Record`](crate::Record),
//! stored in its own collection and linked to others by id.

mod fixture;
mod goal;
mod patch;
mod player;
mod team;

pub use fixture::{Match, MatchStatus, NewMatch};
pub use goal::{Goal, GoalEvent, ResultReport};
pub use patch::Patch;
pub use player::{NewPlayer, Player, PlayerPatch, Position};
pub use team::{NewTeam, Team, TeamPatch};

use crate::error::DomainError;

/// Trimmed, non-empty name or `InvalidInput` naming the field.
pub(crate) fn required_name(field: &str, value: &str) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidInput(format!("{} must not be empty", field)));
    }
    Ok(trimmed.to_string())
}
