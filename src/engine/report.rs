//! Report aggregation - outcome, top scorer and win tallies for a match.
//!
//! Everything here is derived from stored records on every call; nothing is
//! cached and nothing is written.

use std::collections::BTreeMap;
use std::fmt;

use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};

use crate::domain::{Goal, Match, Player, Team};
use crate::error::DomainError;
use crate::store::{EntityStore, RecordsExt};

/// Shown in place of a top scorer while a match has no goals.
pub const NO_GOALS_YET: &str = "no goals yet";

/// How a match ended, from the home side's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    NotFinished,
    HomeWin,
    AwayWin,
    Draw,
}

impl Outcome {
    pub fn classify(fixture: &Match) -> Self {
        if !fixture.is_completed() {
            return Outcome::NotFinished;
        }
        match fixture.home_score.cmp(&fixture.away_score) {
            std::cmp::Ordering::Greater => Outcome::HomeWin,
            std::cmp::Ordering::Less => Outcome::AwayWin,
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Outcome::NotFinished => "not finished",
            Outcome::HomeWin => "home win",
            Outcome::AwayWin => "away win",
            Outcome::Draw => "draw",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The player with the most goals in one match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopScorer {
    pub player_id: u64,
    pub name: String,
    pub goals: usize,
}

impl TopScorer {
    /// `"Name (1 goal)"` or `"Name (n goals)"`.
    pub fn describe(&self) -> String {
        let noun = if self.goals == 1 { "goal" } else { "goals" };
        format!("{} ({} {})", self.name, self.goals, noun)
    }
}

/// Summary view of one match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReport {
    pub schedule: String,
    pub home_team: String,
    pub away_team: String,
    pub final_score: String,
    pub match_result: String,
    pub top_scorer_in_match: String,
    pub home_team_total_wins: u64,
    pub away_team_total_wins: u64,
}

pub struct ReportAggregator<'a, S> {
    store: &'a S,
}

impl<'a, S: EntityStore> ReportAggregator<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Build the report for a live match. Teams and players are resolved
    /// even when soft-deleted.
    pub fn report(&self, match_id: u64) -> Result<MatchReport, DomainError> {
        let fixture = self
            .store
            .records::<Match>()
            .get_live(match_id)?
            .ok_or_else(|| DomainError::not_found("match", match_id))?
            .data;

        let home = self.team(fixture.home_team_id)?;
        let away = self.team(fixture.away_team_id)?;
        let top_scorer = self
            .top_scorer(match_id)?
            .map(|scorer| scorer.describe())
            .unwrap_or_else(|| NO_GOALS_YET.to_string());

        Ok(MatchReport {
            schedule: fixture
                .scheduled_at
                .to_rfc3339_opts(SecondsFormat::Secs, true),
            home_team: home.name,
            away_team: away.name,
            final_score: format!("{}-{}", fixture.home_score, fixture.away_score),
            match_result: Outcome::classify(&fixture).label().to_string(),
            top_scorer_in_match: top_scorer,
            home_team_total_wins: self.count_wins(fixture.home_team_id)?,
            away_team_total_wins: self.count_wins(fixture.away_team_id)?,
        })
    }

    /// Most goals in the match; ties go to the lowest player id.
    pub fn top_scorer(&self, match_id: u64) -> Result<Option<TopScorer>, DomainError> {
        let goals = self
            .store
            .records::<Goal>()
            .find(&|goal| goal.match_id == match_id)?;

        let mut tally: BTreeMap<u64, usize> = BTreeMap::new();
        for goal in &goals {
            *tally.entry(goal.data.player_id).or_default() += 1;
        }

        // BTreeMap iterates by ascending id, so strict > keeps the lowest
        let mut best: Option<(u64, usize)> = None;
        for (&player_id, &count) in &tally {
            if best.map_or(true, |(_, top)| count > top) {
                best = Some((player_id, count));
            }
        }

        let Some((player_id, goals)) = best else {
            return Ok(None);
        };
        let player = self
            .store
            .records::<Player>()
            .get(player_id)?
            .ok_or_else(|| DomainError::not_found("player", player_id))?;

        Ok(Some(TopScorer {
            player_id,
            name: player.data.name,
            goals,
        }))
    }

    /// Completed, live matches the team won at home or away.
    pub fn count_wins(&self, team_id: u64) -> Result<u64, DomainError> {
        let wins = self
            .store
            .records::<Match>()
            .count_live(&|fixture| fixture.won_by(team_id))?;
        Ok(wins as u64)
    }

    fn team(&self, id: u64) -> Result<Team, DomainError> {
        self.store
            .records::<Team>()
            .get(id)?
            .map(|versioned| versioned.data)
            .ok_or_else(|| DomainError::not_found("team", id))
    }
}
