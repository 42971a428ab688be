//! scoreline - football match result reporting.
//!
//! Teams, players and fixtures live in an [`EntityStore`]. The
//! [`ReportingEngine`] accepts final scores with their goals, checks them
//! against each other and against the fixture, and commits them as one
//! unit of work. Reports (outcome, top scorer, win tallies) are derived
//! from stored records on demand.
//!
//! The [`api`] module puts a command service in front of the engine, with
//! an axum transport behind the `http` feature.

// Lets `#[derive(Record)]` expand to `scoreline::...` paths inside this crate.
extern crate self as scoreline;

pub mod api;
pub mod config;
pub mod domain;
pub mod engine;
mod error;
pub mod store;

pub use domain::{
    Goal, GoalEvent, Match, MatchStatus, NewMatch, NewPlayer, NewTeam, Patch, Player,
    PlayerPatch, Position, ResultReport, Team, TeamPatch,
};
pub use engine::{MatchReport, Outcome, ReportingEngine, TopScorer};
pub use error::DomainError;
pub use store::{
    EntityStore, Expect, InMemoryStore, Record, Records, RecordsExt, StoreError, Timestamp,
    UnitOfWork, Versioned,
};

// Re-export the derive macro alongside the trait it implements
pub use scoreline_macros::Record;
