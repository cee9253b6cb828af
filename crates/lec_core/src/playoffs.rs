//! Double-elimination playoff bracket for 8 teams.
//!
//! The bracket is a state machine over 14 fixed positions. Seeding creates
//! the four upper quarterfinals; every recorded result is routed through
//! [`BracketPosition::route`], which says where the winner and the loser go
//! next. Matches further down the bracket are created on the first arrival
//! of either entrant as a placeholder and become playable once the second
//! entrant is routed in.
//!
//! ```text
//! Upper:  QF1 ─┐
//!         QF2 ─┴ SF1 ─┐
//!         QF3 ─┐      ├ Final ───────────────┐
//!         QF4 ─┴ SF2 ─┘                      ├ Grand Final
//! Lower:  R1-1 ─ R2-1 ─┐                     │
//!                      ├ SF ─ Final ─────────┘
//!         R1-2 ─ R2-2 ─┘
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{SimError, SimResult};
use crate::fixture::{Match, MatchFormat, MatchId, MatchResult, Slot, Stage};
use crate::team::TeamId;

/// Number of teams entering the bracket
pub const PLAYOFF_TEAMS: usize = 8;

/// Positions in the double-elimination bracket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BracketPosition {
    /// Seed 1 vs Seed 8
    UpperQf1,
    /// Seed 4 vs Seed 5
    UpperQf2,
    /// Seed 2 vs Seed 7
    UpperQf3,
    /// Seed 3 vs Seed 6
    UpperQf4,
    UpperSf1,
    UpperSf2,
    UpperFinal,
    /// Loser QF1 vs Loser QF2
    LowerR1_1,
    /// Loser QF3 vs Loser QF4
    LowerR1_2,
    /// Winner LR1-1 vs Loser USF1
    LowerR2_1,
    /// Winner LR1-2 vs Loser USF2
    LowerR2_2,
    LowerSf,
    LowerFinal,
    GrandFinal,
}

impl BracketPosition {
    pub const ALL: [BracketPosition; 14] = [
        BracketPosition::UpperQf1,
        BracketPosition::UpperQf2,
        BracketPosition::UpperQf3,
        BracketPosition::UpperQf4,
        BracketPosition::UpperSf1,
        BracketPosition::UpperSf2,
        BracketPosition::UpperFinal,
        BracketPosition::LowerR1_1,
        BracketPosition::LowerR1_2,
        BracketPosition::LowerR2_1,
        BracketPosition::LowerR2_2,
        BracketPosition::LowerSf,
        BracketPosition::LowerFinal,
        BracketPosition::GrandFinal,
    ];

    /// Order in which positions can be played so that every match's entrants
    /// have already been decided when it is reached.
    pub const PLAY_ORDER: [BracketPosition; 14] = [
        BracketPosition::UpperQf1,
        BracketPosition::UpperQf2,
        BracketPosition::UpperQf3,
        BracketPosition::UpperQf4,
        BracketPosition::LowerR1_1,
        BracketPosition::LowerR1_2,
        BracketPosition::UpperSf1,
        BracketPosition::UpperSf2,
        BracketPosition::LowerR2_1,
        BracketPosition::LowerR2_2,
        BracketPosition::UpperFinal,
        BracketPosition::LowerSf,
        BracketPosition::LowerFinal,
        BracketPosition::GrandFinal,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BracketPosition::UpperQf1 => "upper_qf_1",
            BracketPosition::UpperQf2 => "upper_qf_2",
            BracketPosition::UpperQf3 => "upper_qf_3",
            BracketPosition::UpperQf4 => "upper_qf_4",
            BracketPosition::UpperSf1 => "upper_sf_1",
            BracketPosition::UpperSf2 => "upper_sf_2",
            BracketPosition::UpperFinal => "upper_final",
            BracketPosition::LowerR1_1 => "lower_r1_1",
            BracketPosition::LowerR1_2 => "lower_r1_2",
            BracketPosition::LowerR2_1 => "lower_r2_1",
            BracketPosition::LowerR2_2 => "lower_r2_2",
            BracketPosition::LowerSf => "lower_sf",
            BracketPosition::LowerFinal => "lower_final",
            BracketPosition::GrandFinal => "grand_final",
        }
    }

    /// Where the winner and loser of this position go.
    pub fn route(self) -> Route {
        ROUTES[self as usize]
    }
}

impl fmt::Display for BracketPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named final placements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Placement {
    Champion,
    RunnerUp,
    Third,
    Fourth,
}

/// Next stop for one side of a finished match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Move into `slot` of the match at `position`, creating it with
    /// `format` if nobody has arrived there yet
    To {
        position: BracketPosition,
        slot: Slot,
        format: MatchFormat,
    },
    /// Knocked out, optionally taking a named placement
    Eliminated(Option<Placement>),
    Champion,
}

/// Routing of one bracket position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub winner: Advance,
    pub loser: Advance,
}

const fn to(position: BracketPosition, slot: Slot, format: MatchFormat) -> Advance {
    Advance::To {
        position,
        slot,
        format,
    }
}

const fn route(winner: Advance, loser: Advance) -> Route {
    Route { winner, loser }
}

use BracketPosition as P;
use MatchFormat::{Bo3, Bo5};

/// Routing table, indexed by `BracketPosition as usize`.
const ROUTES: [Route; 14] = [
    // UpperQf1..4
    route(to(P::UpperSf1, Slot::A, Bo3), to(P::LowerR1_1, Slot::A, Bo3)),
    route(to(P::UpperSf1, Slot::B, Bo3), to(P::LowerR1_1, Slot::B, Bo3)),
    route(to(P::UpperSf2, Slot::A, Bo3), to(P::LowerR1_2, Slot::A, Bo3)),
    route(to(P::UpperSf2, Slot::B, Bo3), to(P::LowerR1_2, Slot::B, Bo3)),
    // UpperSf1, UpperSf2
    route(to(P::UpperFinal, Slot::A, Bo5), to(P::LowerR2_1, Slot::B, Bo3)),
    route(to(P::UpperFinal, Slot::B, Bo5), to(P::LowerR2_2, Slot::B, Bo3)),
    // UpperFinal
    route(to(P::GrandFinal, Slot::A, Bo5), to(P::LowerFinal, Slot::B, Bo5)),
    // LowerR1_1, LowerR1_2
    route(to(P::LowerR2_1, Slot::A, Bo3), Advance::Eliminated(None)),
    route(to(P::LowerR2_2, Slot::A, Bo3), Advance::Eliminated(None)),
    // LowerR2_1, LowerR2_2
    route(to(P::LowerSf, Slot::A, Bo5), Advance::Eliminated(None)),
    route(to(P::LowerSf, Slot::B, Bo5), Advance::Eliminated(None)),
    // LowerSf
    route(
        to(P::LowerFinal, Slot::A, Bo5),
        Advance::Eliminated(Some(Placement::Fourth)),
    ),
    // LowerFinal
    route(
        to(P::GrandFinal, Slot::B, Bo5),
        Advance::Eliminated(Some(Placement::Third)),
    ),
    // GrandFinal
    route(Advance::Champion, Advance::Eliminated(Some(Placement::RunnerUp))),
];

/// Seed pairings for the upper quarterfinals (1-based seeds)
const QUARTERFINALS: [(BracketPosition, usize, usize); 4] = [
    (P::UpperQf1, 1, 8),
    (P::UpperQf2, 4, 5),
    (P::UpperQf3, 2, 7),
    (P::UpperQf4, 3, 6),
];

/// Double-elimination playoff bracket for 8 teams.
///
/// State is read-only from outside: [`PlayoffBracket::seed_teams`] and
/// [`PlayoffBracket::record_result`] are the only ways to change it, so a
/// result is always routed and the champion is set exactly when the grand
/// final has been recorded.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlayoffBracket {
    /// Seeded 1-8
    teams: Vec<TeamId>,
    matches: BTreeMap<BracketPosition, Match>,
    results: BTreeMap<BracketPosition, MatchResult>,
    /// Knocked-out teams in the order they went out
    eliminated: Vec<TeamId>,
    champion: Option<TeamId>,
    runner_up: Option<TeamId>,
    third_place: Option<TeamId>,
    fourth_place: Option<TeamId>,
}

impl PlayoffBracket {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeded teams, seed 1 first
    pub fn teams(&self) -> &[TeamId] {
        &self.teams
    }

    /// Every match created so far, placeholders included
    pub fn matches(&self) -> &BTreeMap<BracketPosition, Match> {
        &self.matches
    }

    pub fn get_match(&self, position: BracketPosition) -> Option<&Match> {
        self.matches.get(&position)
    }

    pub fn results(&self) -> &BTreeMap<BracketPosition, MatchResult> {
        &self.results
    }

    pub fn result(&self, position: BracketPosition) -> Option<&MatchResult> {
        self.results.get(&position)
    }

    /// Knocked-out teams in the order they went out
    pub fn eliminated(&self) -> &[TeamId] {
        &self.eliminated
    }

    pub fn champion(&self) -> Option<TeamId> {
        self.champion
    }

    pub fn runner_up(&self) -> Option<TeamId> {
        self.runner_up
    }

    pub fn third_place(&self) -> Option<TeamId> {
        self.third_place
    }

    pub fn fourth_place(&self) -> Option<TeamId> {
        self.fourth_place
    }

    /// Seed 8 teams into the upper quarterfinals: 1v8, 4v5, 2v7, 3v6.
    pub fn seed_teams(&mut self, seeded: &[TeamId]) -> SimResult<()> {
        if seeded.len() != PLAYOFF_TEAMS {
            return Err(SimError::WrongSeedCount(seeded.len()));
        }

        *self = Self::new();
        self.teams = seeded.to_vec();
        for (position, high, low) in QUARTERFINALS {
            let m = Match::new(
                MatchId::Bracket(position),
                seeded[high - 1],
                seeded[low - 1],
                MatchFormat::Bo3,
                Stage::Playoffs(position),
            );
            self.matches.insert(position, m);
        }
        Ok(())
    }

    /// 1-based seed of a team, if it is in the bracket.
    pub fn seed_of(&self, team: TeamId) -> Option<usize> {
        self.teams.iter().position(|&t| t == team).map(|i| i + 1)
    }

    /// Record a match result and move both teams along the bracket.
    pub fn record_result(&mut self, position: BracketPosition, result: MatchResult) -> SimResult<()> {
        let m = self
            .matches
            .get_mut(&position)
            .ok_or(SimError::EmptyPosition(position))?;
        m.record_result(result)?;
        self.results.insert(position, result);

        let route = position.route();
        self.advance(result.winner, route.winner);
        self.advance(result.loser, route.loser);
        tracing::trace!(
            %position,
            winner = %result.winner,
            loser = %result.loser,
            "bracket result routed"
        );
        Ok(())
    }

    fn advance(&mut self, team: TeamId, advance: Advance) {
        match advance {
            Advance::To {
                position,
                slot,
                format,
            } => self.set_or_create_match(position, team, slot, format),
            Advance::Eliminated(placement) => {
                self.eliminated.push(team);
                match placement {
                    Some(Placement::RunnerUp) => self.runner_up = Some(team),
                    Some(Placement::Third) => self.third_place = Some(team),
                    Some(Placement::Fourth) => self.fourth_place = Some(team),
                    Some(Placement::Champion) => self.champion = Some(team),
                    None => {}
                }
            }
            Advance::Champion => self.champion = Some(team),
        }
    }

    /// Put a team into a slot, creating the match as a placeholder if this is
    /// its first entrant.
    fn set_or_create_match(
        &mut self,
        position: BracketPosition,
        team: TeamId,
        slot: Slot,
        format: MatchFormat,
    ) {
        self.matches
            .entry(position)
            .and_modify(|m| m.assign_slot(slot, team))
            .or_insert_with(|| {
                Match::placeholder(
                    MatchId::Bracket(position),
                    team,
                    format,
                    Stage::Playoffs(position),
                )
            });
    }

    /// Matches ready to be played: both teams set, no result yet.
    pub fn get_next_matches(&self) -> Vec<(BracketPosition, &Match)> {
        self.matches
            .iter()
            .filter(|(position, m)| m.is_playable() && !self.results.contains_key(*position))
            .map(|(&position, m)| (position, m))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.champion.is_some()
    }

    /// Final placement for a team.
    ///
    /// 1-4 are the named placements. Teams knocked out in lower round 2 share
    /// 5th, teams knocked out in lower round 1 share 7th.
    pub fn get_placement(&self, team: TeamId) -> Option<u32> {
        if self.champion == Some(team) {
            return Some(1);
        }
        if self.runner_up == Some(team) {
            return Some(2);
        }
        if self.third_place == Some(team) {
            return Some(3);
        }
        if self.fourth_place == Some(team) {
            return Some(4);
        }
        let lost_at = |positions: [BracketPosition; 2]| {
            positions
                .iter()
                .filter_map(|p| self.results.get(p))
                .any(|r| r.loser == team)
        };
        if lost_at([P::LowerR2_1, P::LowerR2_2]) {
            Some(5)
        } else if lost_at([P::LowerR1_1, P::LowerR1_2]) {
            Some(7)
        } else {
            None
        }
    }

    /// Placement of every team that has one so far
    pub fn final_placements(&self) -> BTreeMap<TeamId, u32> {
        self.teams
            .iter()
            .filter_map(|&team| self.get_placement(team).map(|p| (team, p)))
            .collect()
    }
}

#[cfg(test)]
#[path = "playoffs_tests.rs"]
mod playoffs_tests;
