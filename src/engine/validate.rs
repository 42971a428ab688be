//! Referential checks - fixtures name two live, distinct teams and every
//! scorer plays for one of them. Read-only.

use crate::domain::{Match, Player, Team};
use crate::error::DomainError;
use crate::store::{EntityStore, RecordsExt};

use super::consistency::ValidatedGoal;

pub struct ReferentialValidator<'a, S> {
    store: &'a S,
}

impl<'a, S: EntityStore> ReferentialValidator<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Both teams live and distinct. Returns them home first.
    pub fn validate_fixture(&self, home_id: u64, away_id: u64) -> Result<(Team, Team), DomainError> {
        if home_id == away_id {
            return Err(DomainError::InvalidRelationship(format!(
                "team {} cannot play itself",
                home_id
            )));
        }
        let home = self.live_team(home_id)?;
        let away = self.live_team(away_id)?;
        Ok((home, away))
    }

    /// The player is live and plays for the home or away side of `fixture`.
    pub fn validate_scorer(&self, player_id: u64, fixture: &Match) -> Result<Player, DomainError> {
        let player = self
            .store
            .records::<Player>()
            .get_live(player_id)?
            .ok_or_else(|| DomainError::not_found("player", player_id))?
            .data;

        if !fixture.involves(player.team_id) {
            return Err(DomainError::InvalidRelationship(format!(
                "player {} ({}) plays for team {}, which is not in match {}",
                player.id, player.name, player.team_id, fixture.id
            )));
        }
        Ok(player)
    }

    /// Check every scorer, stopping at the first failure. Each distinct
    /// player is looked up once.
    pub fn validate_scorers(&self, goals: &[ValidatedGoal], fixture: &Match) -> Result<(), DomainError> {
        let mut seen = Vec::new();
        for goal in goals {
            if seen.contains(&goal.player_id) {
                continue;
            }
            self.validate_scorer(goal.player_id, fixture)?;
            seen.push(goal.player_id);
        }
        Ok(())
    }

    fn live_team(&self, id: u64) -> Result<Team, DomainError> {
        self.store
            .records::<Team>()
            .get_live(id)?
            .map(|versioned| versioned.data)
            .ok_or_else(|| DomainError::not_found("team", id))
    }
}
