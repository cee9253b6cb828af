//! Season projection for a 12-team league
//!
//! This crate provides:
//! - A single round robin of best-of-one matches with a standings ledger
//! - Tiebreaking by head-to-head, strength of victory, then coinflip
//! - An 8-team double-elimination playoff bracket (14 positions)
//! - A seeded Monte Carlo engine that aggregates outcome probabilities
//!
//! # Usage
//!
//! ```no_run
//! use lec_core::{SimulationConfig, SimulationEngine, Tournament, TeamRoster, WinRateMatrix};
//! use std::sync::Arc;
//!
//! let mut roster = TeamRoster::new();
//! for i in 0..12 {
//!     roster.add(&format!("Team {i}"), &format!("T{i}"), false).unwrap();
//! }
//! let tournament = Tournament::create_new(Arc::new(roster)).unwrap();
//! let config = SimulationConfig { seed: Some(1), ..Default::default() };
//! let engine = SimulationEngine::new(tournament, WinRateMatrix::default(), config).unwrap();
//! let results = engine.run().unwrap();
//! println!("{:?}", results.championship_probability);
//! ```

pub mod engine;
pub mod error;
pub mod fixture;
pub mod playoffs;
pub mod results;
pub mod round_robin;
pub mod snapshot;
pub mod standing;
pub mod team;
pub mod tiebreaker;
pub mod tournament;
pub mod win_rates;

pub use engine::{SimulationConfig, SimulationEngine, SimulationOutcome, DEFAULT_SIMULATIONS};
pub use error::{SimError, SimResult};
pub use fixture::{Match, MatchFormat, MatchId, MatchResult, Slot, Stage};
pub use playoffs::{Advance, BracketPosition, Placement, PlayoffBracket, Route, PLAYOFF_TEAMS};
pub use results::{Distribution, OutcomeTally, SimulationResults};
pub use round_robin::generate_round_robin_schedule;
pub use snapshot::{
    roster_from_entries, CompletedMatch, SkipReason, SkippedEntry, SnapshotReport, TeamEntry,
    TournamentSnapshot,
};
pub use standing::{HeadToHead, Standings, TeamStanding};
pub use team::{Team, TeamId, TeamRoster};
pub use tiebreaker::{
    CoinflipTiebreaker, HeadToHeadTiebreaker, StrengthOfVictoryTiebreaker, TiebreakerChain,
    TiebreakerMethod, TiebreakerResult, TiebreakerRule,
};
pub use tournament::{Tournament, ROUND_ROBIN_FORMAT};
pub use win_rates::{elo_win_probability, WinRateMatrix, DEFAULT_ELO_SCALE, DEFAULT_WIN_RATE};
