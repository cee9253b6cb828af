//! Win/loss ledger for the round-robin stage

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{SimError, SimResult};
use crate::team::TeamId;

/// Direct record against one opponent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadToHead {
    pub wins: u32,
    pub losses: u32,
}

/// Standing for a single team.
///
/// The head-to-head entries always add up to the overall record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamStanding {
    pub team: TeamId,
    pub wins: u32,
    pub losses: u32,
    /// opponent -> record against them
    pub head_to_head: BTreeMap<TeamId, HeadToHead>,
}

impl TeamStanding {
    pub fn new(team: TeamId) -> Self {
        Self {
            team,
            wins: 0,
            losses: 0,
            head_to_head: BTreeMap::new(),
        }
    }

    pub fn games_played(&self) -> u32 {
        self.wins + self.losses
    }

    pub fn record_win(&mut self, opponent: TeamId) {
        self.wins += 1;
        self.head_to_head.entry(opponent).or_default().wins += 1;
    }

    pub fn record_loss(&mut self, opponent: TeamId) {
        self.losses += 1;
        self.head_to_head.entry(opponent).or_default().losses += 1;
    }

    pub fn h2h_record(&self, opponent: TeamId) -> HeadToHead {
        self.head_to_head.get(&opponent).copied().unwrap_or_default()
    }
}

/// One standing per tournament participant. Entries are created with the
/// tournament and never added or removed afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Standings {
    standings: BTreeMap<TeamId, TeamStanding>,
}

impl Standings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an empty record for every team.
    pub fn for_teams(teams: impl IntoIterator<Item = TeamId>) -> Self {
        let mut standings = Self::new();
        for team in teams {
            standings.add_team(team);
        }
        standings
    }

    pub fn add_team(&mut self, team: TeamId) -> &mut TeamStanding {
        self.standings
            .entry(team)
            .or_insert_with(|| TeamStanding::new(team))
    }

    pub fn get(&self, team: TeamId) -> Option<&TeamStanding> {
        self.standings.get(&team)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TeamStanding> {
        self.standings.values()
    }

    pub fn len(&self) -> usize {
        self.standings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.standings.is_empty()
    }

    /// Record a match result. Both teams must already be in the ledger.
    pub fn record_match_result(&mut self, winner: TeamId, loser: TeamId) -> SimResult<()> {
        for team in [winner, loser] {
            if !self.standings.contains_key(&team) {
                return Err(SimError::UnknownTeam(team));
            }
        }
        if let Some(standing) = self.standings.get_mut(&winner) {
            standing.record_win(loser);
        }
        if let Some(standing) = self.standings.get_mut(&loser) {
            standing.record_loss(winner);
        }
        Ok(())
    }

    /// Standings ordered by wins (desc), then losses (asc).
    ///
    /// No tiebreakers are applied: teams with the same record come out in
    /// ledger order. Use `Tournament::resolve_standings` for final ranks.
    pub fn get_ordered(&self) -> Vec<&TeamStanding> {
        let mut ordered: Vec<_> = self.standings.values().collect();
        ordered.sort_by_key(|s| (std::cmp::Reverse(s.wins), s.losses));
        ordered
    }
}

#[cfg(test)]
#[path = "standing_tests.rs"]
mod standing_tests;
