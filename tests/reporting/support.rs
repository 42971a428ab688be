//! Seeded league: three teams, a few players, one scheduled fixture.

use chrono::{TimeZone, Utc};
use scoreline::{
    Goal, InMemoryStore, Match, MatchStatus, NewMatch, NewPlayer, NewTeam, Player, Position,
    RecordsExt, ReportingEngine, Team, Versioned,
};

pub struct League {
    pub engine: ReportingEngine<InMemoryStore>,
    pub home: Team,
    pub away: Team,
    pub neutral: Team,
    /// Home striker.
    pub striker: Player,
    /// Home winger.
    pub winger: Player,
    /// Away forward.
    pub visitor: Player,
    /// Plays for the neutral team.
    pub outsider: Player,
    pub fixture: Match,
}

impl League {
    pub fn seed() -> Self {
        let engine = ReportingEngine::new(InMemoryStore::new());
        let roster = engine.roster();

        let home = roster.create_team(team("Persija")).unwrap();
        let away = roster.create_team(team("Persib")).unwrap();
        let neutral = roster.create_team(team("Bali United")).unwrap();

        let striker = roster
            .create_player(player(home.id, "Marko Simic", Position::Forward, 9))
            .unwrap();
        let winger = roster
            .create_player(player(home.id, "Riko Simanjuntak", Position::Midfielder, 25))
            .unwrap();
        let visitor = roster
            .create_player(player(away.id, "David da Silva", Position::Forward, 19))
            .unwrap();
        let outsider = roster
            .create_player(player(neutral.id, "Yabes Roni", Position::Forward, 7))
            .unwrap();
        let fixture = schedule(&engine, home.id, away.id);

        Self {
            engine,
            home,
            away,
            neutral,
            striker,
            winger,
            visitor,
            outsider,
            fixture,
        }
    }

    pub fn store(&self) -> &InMemoryStore {
        self.engine.store()
    }

    pub fn schedule(&self, home_team_id: u64, away_team_id: u64) -> Match {
        schedule(&self.engine, home_team_id, away_team_id)
    }

    pub fn stored_match(&self, match_id: u64) -> Versioned<Match> {
        self.store()
            .records::<Match>()
            .get(match_id)
            .unwrap()
            .unwrap()
    }

    pub fn stored_goals(&self, match_id: u64) -> Vec<Goal> {
        self.store()
            .records::<Goal>()
            .find(&|goal| goal.match_id == match_id)
            .unwrap()
            .into_iter()
            .map(|versioned| versioned.data)
            .collect()
    }

    /// Completed, live matches the team won, counted straight from storage.
    pub fn recount_wins(&self, team_id: u64) -> u64 {
        let matches = self
            .store()
            .records::<Match>()
            .find_live(&|_| true)
            .unwrap();
        matches
            .iter()
            .map(|versioned| &versioned.data)
            .filter(|m| m.status == MatchStatus::Completed)
            .filter(|m| {
                (m.home_team_id == team_id && m.home_score > m.away_score)
                    || (m.away_team_id == team_id && m.away_score > m.home_score)
            })
            .count() as u64
    }
}

pub fn team(name: &str) -> NewTeam {
    NewTeam {
        name: name.into(),
        ..Default::default()
    }
}

pub fn player(team_id: u64, name: &str, position: Position, jersey_number: i64) -> NewPlayer {
    NewPlayer {
        team_id,
        name: name.into(),
        position,
        jersey_number,
        height_cm: None,
        weight_kg: None,
    }
}

fn schedule(engine: &ReportingEngine<InMemoryStore>, home_team_id: u64, away_team_id: u64) -> Match {
    engine
        .roster()
        .create_match(NewMatch {
            home_team_id,
            away_team_id,
            scheduled_at: Utc.with_ymd_and_hms(2024, 8, 17, 19, 0, 0).unwrap(),
        })
        .unwrap()
}
