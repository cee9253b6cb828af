//! Snapshot contract: the teams and completed round-robin results that a
//! tournament is rebuilt from.
//!
//! Entries that cannot be applied (unknown team code, pairing not in the
//! schedule, duplicate result, nonsense score) are skipped and reported,
//! never fatal.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::SimResult;
use crate::fixture::MatchResult;
use crate::team::{TeamRoster, TeamId};
use crate::tournament::Tournament;

/// Snapshot of a tournament in progress
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TournamentSnapshot {
    /// Roster to use; the caller supplies a default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teams: Option<Vec<TeamEntry>>,
    #[serde(default)]
    pub completed_matches: Vec<CompletedMatch>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamEntry {
    pub name: String,
    pub short_name: String,
    #[serde(default)]
    pub is_erl: bool,
}

/// One played round-robin match, teams given by short code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedMatch {
    pub team_a: String,
    pub team_b: String,
    pub winner: String,
    /// [winner_score, loser_score]
    #[serde(default = "default_score")]
    pub score: [u32; 2],
}

fn default_score() -> [u32; 2] {
    [1, 0]
}

impl TournamentSnapshot {
    /// Build a roster from the snapshot's team list, if it has one.
    pub fn roster(&self) -> Option<SimResult<TeamRoster>> {
        self.teams.as_ref().map(|teams| roster_from_entries(teams))
    }
}

pub fn roster_from_entries(entries: &[TeamEntry]) -> SimResult<TeamRoster> {
    let mut roster = TeamRoster::new();
    for entry in entries {
        roster.add(&entry.name, &entry.short_name, entry.is_erl)?;
    }
    Ok(roster)
}

/// Why a snapshot entry was not applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    UnknownTeam(String),
    WinnerNotInPairing(String),
    PairingNotScheduled,
    AlreadyCompleted,
    InvalidScore([u32; 2]),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    /// Position of the entry in `completed_matches`
    pub index: usize,
    pub reason: SkipReason,
}

/// What happened while applying a snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotReport {
    pub applied: usize,
    pub skipped: Vec<SkippedEntry>,
}

impl Tournament {
    /// Create a tournament for `roster` and apply every valid completed match.
    pub fn from_snapshot(
        roster: Arc<TeamRoster>,
        completed: &[CompletedMatch],
    ) -> SimResult<(Self, SnapshotReport)> {
        let mut tournament = Tournament::create_new(roster)?;
        let mut report = SnapshotReport::default();

        for (index, entry) in completed.iter().enumerate() {
            match tournament.apply_completed_match(entry) {
                Ok(()) => report.applied += 1,
                Err(reason) => {
                    tracing::warn!(
                        index,
                        team_a = %entry.team_a,
                        team_b = %entry.team_b,
                        ?reason,
                        "skipping snapshot entry"
                    );
                    report.skipped.push(SkippedEntry { index, reason });
                }
            }
        }

        Ok((tournament, report))
    }

    fn apply_completed_match(&mut self, entry: &CompletedMatch) -> Result<(), SkipReason> {
        let lookup = |code: &str| -> Result<TeamId, SkipReason> {
            self.roster()
                .by_code(code)
                .map(|t| t.id)
                .ok_or_else(|| SkipReason::UnknownTeam(code.to_string()))
        };
        let team_a = lookup(&entry.team_a)?;
        let team_b = lookup(&entry.team_b)?;
        let winner = lookup(&entry.winner)?;

        let m = self
            .find_round_robin_match(team_a, team_b)
            .ok_or(SkipReason::PairingNotScheduled)?;
        if m.is_completed() {
            return Err(SkipReason::AlreadyCompleted);
        }
        let loser = m
            .opponent_of(winner)
            .map_err(|_| SkipReason::WinnerNotInPairing(entry.winner.clone()))?;

        let [winner_score, loser_score] = entry.score;
        if winner_score <= loser_score {
            return Err(SkipReason::InvalidScore(entry.score));
        }

        let id = m.id;
        let result = MatchResult::new(winner, loser, winner_score, loser_score);
        self.record_round_robin_result(id, result)
            .map_err(|_| SkipReason::AlreadyCompleted)
    }
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod snapshot_tests;
