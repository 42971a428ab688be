use serde::{Deserialize, Serialize};

use super::{required_name, Patch};
use crate::error::DomainError;
use crate::store::Timestamp;
use crate::Record;

/// A club. Owns players and plays matches as home or away side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
#[record(collection = "teams")]
pub struct Team {
    pub id: u64,
    pub name: String,
    pub logo_url: Option<String>,
    pub founded_year: Option<i32>,
    pub headquarters_address: Option<String>,
    pub headquarters_city: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[record(soft_delete)]
    pub deleted_at: Option<Timestamp>,
}

/// Fields accepted when creating a team.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewTeam {
    pub name: String,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub founded_year: Option<i32>,
    #[serde(default)]
    pub headquarters_address: Option<String>,
    #[serde(default)]
    pub headquarters_city: Option<String>,
}

/// Partial update of a team. `name` can be replaced but never cleared.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub logo_url: Patch<String>,
    #[serde(default)]
    pub founded_year: Patch<i32>,
    #[serde(default)]
    pub headquarters_address: Patch<String>,
    #[serde(default)]
    pub headquarters_city: Patch<String>,
}

impl Team {
    pub fn create(new: NewTeam, now: Timestamp) -> Result<Self, DomainError> {
        Ok(Self {
            id: 0,
            name: required_name("team name", &new.name)?,
            logo_url: new.logo_url,
            founded_year: new.founded_year,
            headquarters_address: new.headquarters_address,
            headquarters_city: new.headquarters_city,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        })
    }

    /// Apply a patch. Nothing changes when validation fails.
    pub fn apply(&mut self, patch: TeamPatch, now: Timestamp) -> Result<(), DomainError> {
        let name = patch
            .name
            .as_deref()
            .map(|name| required_name("team name", name))
            .transpose()?;

        if let Some(name) = name {
            self.name = name;
        }
        patch.logo_url.apply_to(&mut self.logo_url);
        patch.founded_year.apply_to(&mut self.founded_year);
        patch.headquarters_address.apply_to(&mut self.headquarters_address);
        patch.headquarters_city.apply_to(&mut self.headquarters_city);
        self.updated_at = now;
        Ok(())
    }
}
