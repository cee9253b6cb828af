//! Tournament aggregate: roster, round-robin schedule, standings and bracket

use rand::RngCore;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::error::{SimError, SimResult};
use crate::fixture::{Match, MatchFormat, MatchId, MatchResult};
use crate::playoffs::{PlayoffBracket, PLAYOFF_TEAMS};
use crate::round_robin::{completed_matches, generate_round_robin_schedule, remaining_matches};
use crate::standing::Standings;
use crate::team::{TeamId, TeamRoster};
use crate::tiebreaker::TiebreakerChain;

/// Round-robin games are single games
pub const ROUND_ROBIN_FORMAT: MatchFormat = MatchFormat::Bo1;

/// Main tournament state.
///
/// Cloning gives an independent tournament for one simulation trial:
/// matches, standings and the completed set are duplicated while the roster
/// is shared.
#[derive(Debug, Clone)]
pub struct Tournament {
    roster: Arc<TeamRoster>,
    standings: Standings,
    round_robin_matches: Vec<Match>,
    playoff_bracket: Option<PlayoffBracket>,
    completed_match_ids: BTreeSet<MatchId>,
}

impl Tournament {
    /// Create a new tournament with empty standings and the full round-robin
    /// schedule.
    pub fn create_new(roster: Arc<TeamRoster>) -> SimResult<Self> {
        if roster.len() < 2 {
            return Err(SimError::EmptyRoster(roster.len()));
        }
        let ids: Vec<TeamId> = roster.ids().collect();
        Ok(Self {
            standings: Standings::for_teams(ids.iter().copied()),
            round_robin_matches: generate_round_robin_schedule(&ids, ROUND_ROBIN_FORMAT),
            playoff_bracket: None,
            completed_match_ids: BTreeSet::new(),
            roster,
        })
    }

    pub fn roster(&self) -> &Arc<TeamRoster> {
        &self.roster
    }

    pub fn standings(&self) -> &Standings {
        &self.standings
    }

    pub fn round_robin_matches(&self) -> &[Match] {
        &self.round_robin_matches
    }

    pub fn playoff_bracket(&self) -> Option<&PlayoffBracket> {
        self.playoff_bracket.as_ref()
    }

    pub fn completed_match_ids(&self) -> &BTreeSet<MatchId> {
        &self.completed_match_ids
    }

    pub fn remaining_round_robin_matches(&self) -> impl Iterator<Item = &Match> {
        remaining_matches(&self.round_robin_matches)
    }

    pub fn completed_round_robin_matches(&self) -> impl Iterator<Item = &Match> {
        completed_matches(&self.round_robin_matches)
    }

    /// Ids of unplayed round-robin matches, in schedule order.
    pub fn remaining_round_robin_ids(&self) -> Vec<MatchId> {
        self.remaining_round_robin_matches().map(|m| m.id).collect()
    }

    /// Find the scheduled match between two teams, in either slot order.
    pub fn find_round_robin_match(&self, a: TeamId, b: TeamId) -> Option<&Match> {
        if a == b {
            return None;
        }
        self.round_robin_matches
            .iter()
            .find(|m| m.involves(a) && m.involves(b))
    }

    pub fn round_robin_match(&self, id: MatchId) -> SimResult<&Match> {
        match id {
            MatchId::RoundRobin(index) => self
                .round_robin_matches
                .get(index as usize)
                .ok_or(SimError::UnknownMatch(id)),
            MatchId::Bracket(_) => Err(SimError::UnknownMatch(id)),
        }
    }

    /// Record a round-robin result into the match and the standings.
    ///
    /// Fails if the match was already played: standings cannot be rolled
    /// back, so a second result is never accepted.
    pub fn record_round_robin_result(&mut self, id: MatchId, result: MatchResult) -> SimResult<()> {
        let MatchId::RoundRobin(index) = id else {
            return Err(SimError::UnknownMatch(id));
        };
        let m = self
            .round_robin_matches
            .get_mut(index as usize)
            .ok_or(SimError::UnknownMatch(id))?;
        m.record_result(result)?;
        self.completed_match_ids.insert(id);
        self.standings.record_match_result(result.winner, result.loser)
    }

    /// Final regular-season order with tiebreakers applied, 1st first.
    ///
    /// Teams are grouped by win count and each group is resolved by the
    /// tiebreaker chain, from most wins to fewest.
    pub fn resolve_standings<R: RngCore>(&self, rng: &mut R) -> Vec<TeamId> {
        let mut by_wins: BTreeMap<u32, Vec<TeamId>> = BTreeMap::new();
        for standing in self.standings.iter() {
            by_wins.entry(standing.wins).or_default().push(standing.team);
        }

        let chain = TiebreakerChain::default();
        let mut final_order = Vec::with_capacity(self.standings.len());
        for group in by_wins.values().rev() {
            if group.len() == 1 {
                final_order.extend_from_slice(group);
            } else {
                let result = chain.resolve(group, &self.standings, &mut *rng);
                final_order.extend(result.ordered_teams);
            }
        }
        final_order
    }

    /// Create the playoff bracket from the top of the resolved standings.
    pub fn create_playoff_bracket(&mut self, ranked: &[TeamId]) -> SimResult<&mut PlayoffBracket> {
        if ranked.len() < PLAYOFF_TEAMS {
            return Err(SimError::NotEnoughStandings(ranked.len()));
        }
        let mut bracket = PlayoffBracket::new();
        bracket.seed_teams(&ranked[..PLAYOFF_TEAMS])?;
        Ok(self.playoff_bracket.insert(bracket))
    }

    /// Independent copy for one simulation trial.
    pub fn copy(&self) -> Self {
        self.clone()
    }
}

#[cfg(test)]
#[path = "tournament_tests.rs"]
mod tournament_tests;
