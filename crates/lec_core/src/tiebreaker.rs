//! Tiebreaker resolution for teams level on wins.
//!
//! A [`TiebreakerChain`] applies its rules in order. Each rule either orders
//! the whole group (resolved) or hands a re-ordered group to the next rule.
//! The default chain is head-to-head, then strength of victory, then a
//! coinflip which always resolves.
//!
//! Every rule works on the full tied group it was given. A multi-way
//! head-to-head that only separates some of the teams does not split the
//! group into smaller ties; the next rule re-sorts the entire group and the
//! previous order only survives among teams the new rule cannot tell apart.

use rand::seq::SliceRandom;
use rand::RngCore;
use std::collections::BTreeMap;

use crate::standing::Standings;
use crate::team::TeamId;

/// Types of tiebreaker methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TiebreakerMethod {
    HeadToHead,
    StrengthOfVictory,
    Coinflip,
}

/// Result of applying a tiebreaker
#[derive(Debug, Clone, PartialEq)]
pub struct TiebreakerResult {
    pub resolved: bool,
    /// Rule that produced the final order, if any
    pub method: Option<TiebreakerMethod>,
    pub ordered_teams: Vec<TeamId>,
    pub notes: &'static str,
}

impl TiebreakerResult {
    fn resolved(method: TiebreakerMethod, ordered_teams: Vec<TeamId>, notes: &'static str) -> Self {
        Self {
            resolved: true,
            method: Some(method),
            ordered_teams,
            notes,
        }
    }

    fn unresolved(ordered_teams: Vec<TeamId>, notes: &'static str) -> Self {
        Self {
            resolved: false,
            method: None,
            ordered_teams,
            notes,
        }
    }
}

/// A single rule in the chain.
pub trait TiebreakerRule: Send + Sync {
    fn method(&self) -> TiebreakerMethod;

    /// Attempt to order `tied` (all on the same number of wins).
    fn resolve(
        &self,
        tied: &[TeamId],
        standings: &Standings,
        rng: &mut dyn RngCore,
    ) -> TiebreakerResult;
}

/// Sort `teams` by `score` descending (stable) and report whether every score
/// is distinct.
fn rank_by_score(teams: &[TeamId], scores: &BTreeMap<TeamId, i64>) -> (Vec<TeamId>, bool) {
    let score = |team: &TeamId| scores.get(team).copied().unwrap_or(0);
    let mut ordered = teams.to_vec();
    ordered.sort_by_key(|team| std::cmp::Reverse(score(team)));
    let distinct = ordered.windows(2).all(|pair| score(&pair[0]) != score(&pair[1]));
    (ordered, distinct)
}

/// Resolve ties on head-to-head record.
///
/// Two teams: whoever won more direct meetings. Three or more: wins minus
/// losses counting only games among the tied teams.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadToHeadTiebreaker;

impl HeadToHeadTiebreaker {
    fn resolve_two_way(&self, first: TeamId, second: TeamId, standings: &Standings) -> TiebreakerResult {
        let wins_of = |team: TeamId, opponent: TeamId| {
            standings
                .get(team)
                .map(|s| s.h2h_record(opponent).wins)
                .unwrap_or(0)
        };
        let first_wins = wins_of(first, second);
        let second_wins = wins_of(second, first);

        if first_wins > second_wins {
            TiebreakerResult::resolved(self.method(), vec![first, second], "H2H wins")
        } else if second_wins > first_wins {
            TiebreakerResult::resolved(self.method(), vec![second, first], "H2H wins")
        } else {
            TiebreakerResult::unresolved(vec![first, second], "H2H tied")
        }
    }

    fn resolve_multi_way(&self, tied: &[TeamId], standings: &Standings) -> TiebreakerResult {
        let mut differentials = BTreeMap::new();
        for &team in tied {
            let Some(standing) = standings.get(team) else {
                differentials.insert(team, 0);
                continue;
            };
            let (wins, losses) = tied
                .iter()
                .filter(|&&other| other != team)
                .map(|&other| standing.h2h_record(other))
                .fold((0i64, 0i64), |(w, l), h2h| (w + h2h.wins as i64, l + h2h.losses as i64));
            differentials.insert(team, wins - losses);
        }

        let (ordered, distinct) = rank_by_score(tied, &differentials);
        if distinct {
            TiebreakerResult::resolved(self.method(), ordered, "Multi-way H2H")
        } else {
            TiebreakerResult::unresolved(ordered, "Multi-way H2H partially resolved")
        }
    }
}

impl TiebreakerRule for HeadToHeadTiebreaker {
    fn method(&self) -> TiebreakerMethod {
        TiebreakerMethod::HeadToHead
    }

    fn resolve(
        &self,
        tied: &[TeamId],
        standings: &Standings,
        _rng: &mut dyn RngCore,
    ) -> TiebreakerResult {
        match tied {
            [first, second] => self.resolve_two_way(*first, *second, standings),
            _ => self.resolve_multi_way(tied, standings),
        }
    }
}

/// Strength of victory: for every opponent a team beat, add that opponent's
/// total wins once per victory. Beating stronger teams ranks higher.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrengthOfVictoryTiebreaker;

impl StrengthOfVictoryTiebreaker {
    pub fn score(team: TeamId, standings: &Standings) -> i64 {
        let Some(standing) = standings.get(team) else {
            return 0;
        };
        standing
            .head_to_head
            .iter()
            .filter(|(_, h2h)| h2h.wins > 0)
            .filter_map(|(&opponent, h2h)| {
                standings
                    .get(opponent)
                    .map(|opp| opp.wins as i64 * h2h.wins as i64)
            })
            .sum()
    }
}

impl TiebreakerRule for StrengthOfVictoryTiebreaker {
    fn method(&self) -> TiebreakerMethod {
        TiebreakerMethod::StrengthOfVictory
    }

    fn resolve(
        &self,
        tied: &[TeamId],
        standings: &Standings,
        _rng: &mut dyn RngCore,
    ) -> TiebreakerResult {
        let scores: BTreeMap<TeamId, i64> = tied
            .iter()
            .map(|&team| (team, Self::score(team, standings)))
            .collect();

        let (ordered, distinct) = rank_by_score(tied, &scores);
        if distinct {
            TiebreakerResult::resolved(self.method(), ordered, "SoV")
        } else {
            TiebreakerResult::unresolved(ordered, "SoV tied")
        }
    }
}

/// Last resort: uniformly random order. Always resolves.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoinflipTiebreaker;

impl TiebreakerRule for CoinflipTiebreaker {
    fn method(&self) -> TiebreakerMethod {
        TiebreakerMethod::Coinflip
    }

    fn resolve(
        &self,
        tied: &[TeamId],
        _standings: &Standings,
        rng: &mut dyn RngCore,
    ) -> TiebreakerResult {
        let mut shuffled = tied.to_vec();
        shuffled.shuffle(rng);
        TiebreakerResult::resolved(self.method(), shuffled, "Random tiebreaker")
    }
}

/// Apply tiebreakers in order until resolved.
///
/// Default LEC order: H2H -> SoV -> Coinflip
pub struct TiebreakerChain {
    rules: Vec<Box<dyn TiebreakerRule>>,
}

impl Default for TiebreakerChain {
    fn default() -> Self {
        Self::new(vec![
            Box::new(HeadToHeadTiebreaker),
            Box::new(StrengthOfVictoryTiebreaker),
            Box::new(CoinflipTiebreaker),
        ])
    }
}

impl TiebreakerChain {
    pub fn new(rules: Vec<Box<dyn TiebreakerRule>>) -> Self {
        Self { rules }
    }

    pub fn resolve(
        &self,
        tied: &[TeamId],
        standings: &Standings,
        rng: &mut dyn RngCore,
    ) -> TiebreakerResult {
        if tied.len() <= 1 {
            return TiebreakerResult {
                resolved: true,
                method: None,
                ordered_teams: tied.to_vec(),
                notes: "No tie",
            };
        }

        let mut current = tied.to_vec();
        for rule in &self.rules {
            let result = rule.resolve(&current, standings, rng);
            if result.resolved {
                return result;
            }
            current = result.ordered_teams;
        }

        // Only reachable with a custom chain that lacks a coinflip
        TiebreakerResult::unresolved(current, "Tiebreakers exhausted")
    }
}

#[cfg(test)]
#[path = "tiebreaker_tests.rs"]
mod tiebreaker_tests;
