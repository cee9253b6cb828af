//! Round-robin schedule generation

use crate::fixture::{Match, MatchFormat, MatchId, Stage};
use crate::team::TeamId;

/// Generate one unplayed match for every unordered pair of teams.
///
/// Pairs come out in input order: (t0, t1), (t0, t2), ..., (t1, t2), ...
/// The order is stable but is not a playing calendar.
pub fn generate_round_robin_schedule(teams: &[TeamId], format: MatchFormat) -> Vec<Match> {
    iter_matchups(teams)
        .enumerate()
        .map(|(index, (team_a, team_b))| {
            Match::new(
                MatchId::RoundRobin(index as u32),
                team_a,
                team_b,
                format,
                Stage::RoundRobin,
            )
        })
        .collect()
}

/// Iterate over all unordered matchups.
pub fn iter_matchups(teams: &[TeamId]) -> impl Iterator<Item = (TeamId, TeamId)> + '_ {
    teams
        .iter()
        .enumerate()
        .flat_map(move |(i, &a)| teams[i + 1..].iter().map(move |&b| (a, b)))
}

pub fn remaining_matches(matches: &[Match]) -> impl Iterator<Item = &Match> {
    matches.iter().filter(|m| !m.is_completed())
}

pub fn completed_matches(matches: &[Match]) -> impl Iterator<Item = &Match> {
    matches.iter().filter(|m| m.is_completed())
}

#[cfg(test)]
#[path = "round_robin_tests.rs"]
mod round_robin_tests;
