//! Roster - team, player and fixture records.
//!
//! Field validation and pass-through persistence. The only cross-record
//! rules are team liveness and jersey uniqueness within a team. Jersey
//! uniqueness is checked under the store's apply lock, in the same unit of
//! work as the player write.

use chrono::Utc;
use serde::Serialize;

use crate::domain::{
    Goal, Match, NewMatch, NewPlayer, NewTeam, Player, PlayerPatch, Team, TeamPatch,
};
use crate::error::DomainError;
use crate::store::{EntityStore, Record, RecordsExt, StoreError, UnitOfWork};

use super::validate::ReferentialValidator;

/// A match together with its goals in scoring order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchDetail {
    #[serde(flatten)]
    pub fixture: Match,
    pub goals: Vec<Goal>,
}

pub struct Roster<'a, S> {
    store: &'a S,
}

impl<'a, S: EntityStore> Roster<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    // Teams

    pub fn create_team(&self, new: NewTeam) -> Result<Team, DomainError> {
        let team = Team::create(new, Utc::now())?;
        let stored = self.store.records::<Team>().insert(team)?;
        tracing::debug!(team_id = stored.data.id, "team created");
        Ok(stored.data)
    }

    pub fn list_teams(&self) -> Result<Vec<Team>, DomainError> {
        Ok(self
            .store
            .records::<Team>()
            .find_live(&|_| true)?
            .into_iter()
            .map(|versioned| versioned.data)
            .collect())
    }

    pub fn get_team(&self, id: u64) -> Result<Team, DomainError> {
        self.store
            .records::<Team>()
            .get_live(id)?
            .map(|versioned| versioned.data)
            .ok_or_else(|| DomainError::not_found("team", id))
    }

    pub fn update_team(&self, id: u64, patch: TeamPatch) -> Result<Team, DomainError> {
        let teams = self.store.records::<Team>();
        let mut current = teams
            .get_live(id)?
            .ok_or_else(|| DomainError::not_found("team", id))?;
        current.data.apply(patch, Utc::now())?;
        Ok(teams.update(&current.data, current.version)?.data)
    }

    /// Soft delete. Matches and goals that reference the team keep
    /// resolving its name.
    pub fn delete_team(&self, id: u64) -> Result<(), DomainError> {
        if !self.store.records::<Team>().soft_delete(id)? {
            return Err(DomainError::not_found("team", id));
        }
        tracing::debug!(team_id = id, "team deleted");
        Ok(())
    }

    // Players

    pub fn create_player(&self, new: NewPlayer) -> Result<Player, DomainError> {
        self.get_team(new.team_id)?;
        let mut player = Player::create(new, Utc::now())?;
        player.set_id(self.store.next_id(Player::COLLECTION)?);

        let unit = jersey_guard(&player).insert(&player);
        self.apply_player_write(unit, &player)?;
        tracing::debug!(player_id = player.id, team_id = player.team_id, "player created");
        Ok(player)
    }

    /// Live players of a live team, ordered by id.
    pub fn list_players(&self, team_id: u64) -> Result<Vec<Player>, DomainError> {
        self.get_team(team_id)?;
        Ok(self
            .store
            .records::<Player>()
            .find_live(&|player| player.team_id == team_id)?
            .into_iter()
            .map(|versioned| versioned.data)
            .collect())
    }

    pub fn get_player(&self, id: u64) -> Result<Player, DomainError> {
        self.store
            .records::<Player>()
            .get_live(id)?
            .map(|versioned| versioned.data)
            .ok_or_else(|| DomainError::not_found("player", id))
    }

    pub fn update_player(&self, id: u64, patch: PlayerPatch) -> Result<Player, DomainError> {
        let players = self.store.records::<Player>();
        let mut current = players
            .get_live(id)?
            .ok_or_else(|| DomainError::not_found("player", id))?;
        let previous_jersey = current.data.jersey_number;

        current.data.apply(patch, Utc::now())?;
        let unit = if current.data.jersey_number != previous_jersey {
            jersey_guard(&current.data)
        } else {
            UnitOfWork::new()
        };
        let unit = unit.update(&current.data, current.version);
        self.apply_player_write(unit, &current.data)?;
        Ok(current.data)
    }

    pub fn delete_player(&self, id: u64) -> Result<(), DomainError> {
        if !self.store.records::<Player>().soft_delete(id)? {
            return Err(DomainError::not_found("player", id));
        }
        tracing::debug!(player_id = id, "player deleted");
        Ok(())
    }

    fn apply_player_write(&self, unit: UnitOfWork, player: &Player) -> Result<(), DomainError> {
        match self.store.apply(unit) {
            Ok(()) => Ok(()),
            Err(StoreError::UniqueViolation { .. }) => Err(DomainError::InvalidInput(format!(
                "jersey number {} already taken in team {}",
                player.jersey_number, player.team_id
            ))),
            Err(err) => Err(err.into()),
        }
    }

    // Matches

    pub fn create_match(&self, new: NewMatch) -> Result<Match, DomainError> {
        ReferentialValidator::new(self.store).validate_fixture(new.home_team_id, new.away_team_id)?;
        let fixture = Match::schedule(new, Utc::now());
        let stored = self.store.records::<Match>().insert(fixture)?;
        tracing::debug!(match_id = stored.data.id, "match scheduled");
        Ok(stored.data)
    }

    pub fn get_match(&self, id: u64) -> Result<MatchDetail, DomainError> {
        let fixture = self
            .store
            .records::<Match>()
            .get_live(id)?
            .ok_or_else(|| DomainError::not_found("match", id))?
            .data;
        let goals = self
            .store
            .records::<Goal>()
            .find(&|goal| goal.match_id == id)?
            .into_iter()
            .map(|versioned| versioned.data)
            .collect();
        Ok(MatchDetail { fixture, goals })
    }
}

/// A unit whose first step fails if another live player of the same team
/// already wears `player`'s number.
fn jersey_guard(player: &Player) -> UnitOfWork {
    let (id, team_id, jersey_number) = (player.id, player.team_id, player.jersey_number);
    UnitOfWork::new().require_none::<Player, _>(move |other| {
        other.is_live()
            && other.team_id == team_id
            && other.jersey_number == jersey_number
            && other.id != id
    })
}
