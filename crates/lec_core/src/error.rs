//! Error type shared by every fallible operation in the crate.

use thiserror::Error;

use crate::fixture::MatchId;
use crate::playoffs::BracketPosition;
use crate::team::TeamId;

pub type SimResult<T> = Result<T, SimError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    // Invalid configuration
    #[error("win probability {0} is outside [0, 1]")]
    InvalidProbability(f64),
    #[error("Elo scale must be positive and finite, got {0}")]
    InvalidEloScale(f64),
    #[error("exactly 8 teams required for playoffs, got {0}")]
    WrongSeedCount(usize),
    #[error("need at least 8 standings for playoffs, got {0}")]
    NotEnoughStandings(usize),
    #[error("duplicate team short code {0:?}")]
    DuplicateTeamCode(String),
    #[error("a tournament needs at least two teams, got {0}")]
    EmptyRoster(usize),
    #[error("number of simulations must be at least 1")]
    ZeroSimulations,

    // Logic invariant violations
    #[error("team {0} is not part of the standings")]
    UnknownTeam(TeamId),
    #[error("team {team} does not play in match {match_id}")]
    TeamNotInMatch { team: TeamId, match_id: MatchId },
    #[error("match {0} already has a result")]
    AlreadyCompleted(MatchId),
    #[error("match {0} is a placeholder still waiting for its second entrant")]
    PlaceholderMatch(MatchId),
    #[error("no match has been created at bracket position {0}")]
    EmptyPosition(BracketPosition),
    #[error("invalid result for match {match_id}: {reason}")]
    InvalidResult {
        match_id: MatchId,
        reason: &'static str,
    },
    #[error("no round-robin match with id {0}")]
    UnknownMatch(MatchId),
}
