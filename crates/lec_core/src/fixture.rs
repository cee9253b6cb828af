//! Matches (series) and their results.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{SimError, SimResult};
use crate::playoffs::BracketPosition;
use crate::team::TeamId;

/// Series length (best of N)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchFormat {
    Bo1,
    Bo3,
    Bo5,
}

impl MatchFormat {
    pub fn best_of(self) -> u32 {
        match self {
            MatchFormat::Bo1 => 1,
            MatchFormat::Bo3 => 3,
            MatchFormat::Bo5 => 5,
        }
    }

    /// Number of games needed to win the series
    pub fn games_to_win(self) -> u32 {
        self.best_of().div_ceil(2)
    }
}

/// Identity of a match, unique within its tournament.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MatchId {
    /// Index into the round-robin schedule
    RoundRobin(u32),
    Bracket(BracketPosition),
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchId::RoundRobin(index) => write!(f, "round_robin#{index}"),
            MatchId::Bracket(position) => write!(f, "{position}"),
        }
    }
}

/// Which part of the tournament a match belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    RoundRobin,
    Playoffs(BracketPosition),
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::RoundRobin => f.write_str("round_robin"),
            Stage::Playoffs(position) => write!(f, "{position}"),
        }
    }
}

/// Result of a completed match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub winner: TeamId,
    pub loser: TeamId,
    /// Games won by the winner (1 for Bo1, up to 3 for Bo5)
    pub winner_score: u32,
    pub loser_score: u32,
}

impl MatchResult {
    pub fn new(winner: TeamId, loser: TeamId, winner_score: u32, loser_score: u32) -> Self {
        Self {
            winner,
            loser,
            winner_score,
            loser_score,
        }
    }
}

/// A scheduled or completed match.
///
/// A match whose two slots hold the same team is a bracket placeholder: the
/// first entrant has arrived, the second has not. Placeholders are never
/// playable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub team_a: TeamId,
    pub team_b: TeamId,
    pub format: MatchFormat,
    pub stage: Stage,
    result: Option<MatchResult>,
}

impl Match {
    pub fn new(
        id: MatchId,
        team_a: TeamId,
        team_b: TeamId,
        format: MatchFormat,
        stage: Stage,
    ) -> Self {
        Self {
            id,
            team_a,
            team_b,
            format,
            stage,
            result: None,
        }
    }

    /// A match holding only its first entrant.
    pub fn placeholder(id: MatchId, team: TeamId, format: MatchFormat, stage: Stage) -> Self {
        Self::new(id, team, team, format, stage)
    }

    pub fn is_placeholder(&self) -> bool {
        self.team_a == self.team_b
    }

    pub fn is_completed(&self) -> bool {
        self.result.is_some()
    }

    /// Both slots hold distinct teams and no result has been recorded.
    pub fn is_playable(&self) -> bool {
        !self.is_placeholder() && !self.is_completed()
    }

    pub fn result(&self) -> Option<&MatchResult> {
        self.result.as_ref()
    }

    pub fn involves(&self, team: TeamId) -> bool {
        self.team_a == team || self.team_b == team
    }

    /// Get the opponent of the given team in this match.
    pub fn opponent_of(&self, team: TeamId) -> SimResult<TeamId> {
        if team == self.team_a {
            Ok(self.team_b)
        } else if team == self.team_b {
            Ok(self.team_a)
        } else {
            Err(SimError::TeamNotInMatch {
                team,
                match_id: self.id,
            })
        }
    }

    /// Check that `result` could have come out of this match.
    pub fn validate_result(&self, result: &MatchResult) -> SimResult<()> {
        if self.is_placeholder() {
            return Err(SimError::PlaceholderMatch(self.id));
        }
        if !self.involves(result.winner) {
            return Err(SimError::TeamNotInMatch {
                team: result.winner,
                match_id: self.id,
            });
        }
        if self.opponent_of(result.winner)? != result.loser {
            return Err(SimError::InvalidResult {
                match_id: self.id,
                reason: "loser is not the winner's opponent",
            });
        }
        if result.winner_score <= result.loser_score {
            return Err(SimError::InvalidResult {
                match_id: self.id,
                reason: "winner score must exceed loser score",
            });
        }
        Ok(())
    }

    /// Record the result. A completed match is terminal: recording twice fails.
    pub fn record_result(&mut self, result: MatchResult) -> SimResult<()> {
        if self.is_completed() {
            return Err(SimError::AlreadyCompleted(self.id));
        }
        self.validate_result(&result)?;
        self.result = Some(result);
        Ok(())
    }

    /// Put a team into slot A or B. Only meaningful before the match is played.
    pub(crate) fn assign_slot(&mut self, slot: Slot, team: TeamId) {
        match slot {
            Slot::A => self.team_a = team,
            Slot::B => self.team_b = team,
        }
    }
}

/// Positional slot inside a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    A,
    B,
}

#[cfg(test)]
#[path = "fixture_tests.rs"]
mod fixture_tests;
