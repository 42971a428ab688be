use std::fmt;

use serde::{Deserialize, Serialize};

use super::{required_name, Patch};
use crate::error::DomainError;
use crate::store::Timestamp;
use crate::Record;

/// Lowest and highest jersey number a player may wear.
pub const JERSEY_NUMBERS: std::ops::RangeInclusive<i64> = 1..=99;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    Forward,
    Midfielder,
    Defender,
    Goalkeeper,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Position::Forward => "forward",
            Position::Midfielder => "midfielder",
            Position::Defender => "defender",
            Position::Goalkeeper => "goalkeeper",
        };
        f.write_str(name)
    }
}

/// A squad member. The owning team is fixed at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
#[record(collection = "players")]
pub struct Player {
    pub id: u64,
    pub team_id: u64,
    pub name: String,
    pub position: Position,
    pub jersey_number: u8,
    pub height_cm: Option<u16>,
    pub weight_kg: Option<u16>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[record(soft_delete)]
    pub deleted_at: Option<Timestamp>,
}

/// Fields accepted when registering a player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPlayer {
    pub team_id: u64,
    pub name: String,
    pub position: Position,
    pub jersey_number: i64,
    #[serde(default)]
    pub height_cm: Option<u16>,
    #[serde(default)]
    pub weight_kg: Option<u16>,
}

/// Partial update of a player. The team cannot be changed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayerPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub position: Option<Position>,
    #[serde(default)]
    pub jersey_number: Option<i64>,
    #[serde(default)]
    pub height_cm: Patch<u16>,
    #[serde(default)]
    pub weight_kg: Patch<u16>,
}

pub(crate) fn jersey_number(value: i64) -> Result<u8, DomainError> {
    if !JERSEY_NUMBERS.contains(&value) {
        return Err(DomainError::InvalidInput(format!(
            "jersey number {} is outside 1 to 99",
            value
        )));
    }
    u8::try_from(value).map_err(|_| DomainError::InvalidInput(format!("jersey number {}", value)))
}

impl Player {
    pub fn create(new: NewPlayer, now: Timestamp) -> Result<Self, DomainError> {
        Ok(Self {
            id: 0,
            team_id: new.team_id,
            name: required_name("player name", &new.name)?,
            position: new.position,
            jersey_number: jersey_number(new.jersey_number)?,
            height_cm: new.height_cm,
            weight_kg: new.weight_kg,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        })
    }

    /// Apply a patch. Nothing changes when validation fails. Jersey
    /// uniqueness within the team is checked by the caller.
    pub fn apply(&mut self, patch: PlayerPatch, now: Timestamp) -> Result<(), DomainError> {
        let name = patch
            .name
            .as_deref()
            .map(|name| required_name("player name", name))
            .transpose()?;
        let jersey = patch.jersey_number.map(jersey_number).transpose()?;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(position) = patch.position {
            self.position = position;
        }
        if let Some(jersey) = jersey {
            self.jersey_number = jersey;
        }
        patch.height_cm.apply_to(&mut self.height_cm);
        patch.weight_kg.apply_to(&mut self.weight_kg);
        self.updated_at = now;
        Ok(())
    }
}
