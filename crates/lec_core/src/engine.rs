//! Monte Carlo simulation engine.
//!
//! Every trial clones the base tournament, plays out the remaining
//! round-robin matches, resolves the standings, seeds the top eight into the
//! bracket and plays it to a champion. Trials only touch their own copy and
//! their own seeded generator, so they can run on any number of threads.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::error::{SimError, SimResult};
use crate::fixture::{Match, MatchFormat, MatchResult};
use crate::playoffs::{BracketPosition, PlayoffBracket, PLAYOFF_TEAMS};
use crate::results::{OutcomeTally, SimulationResults};
use crate::team::TeamId;
use crate::tournament::Tournament;
use crate::win_rates::WinRateMatrix;

/// Default number of trials
pub const DEFAULT_SIMULATIONS: usize = 10_000;

/// Configuration for Monte Carlo simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    pub num_simulations: usize,
    /// Top-level seed (None = draw one from OS entropy)
    pub seed: Option<u64>,
    /// Run trials on the rayon thread pool
    pub parallel: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_simulations: DEFAULT_SIMULATIONS,
            seed: None,
            parallel: true,
        }
    }
}

/// Outcome of a single tournament simulation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationOutcome {
    /// Regular season rank, 1-based
    pub regular_season_rank: BTreeMap<TeamId, u32>,
    /// Top 8 after the regular season
    pub made_playoffs: BTreeSet<TeamId>,
    /// Playoff seed 1-8
    pub playoff_seed: BTreeMap<TeamId, u32>,
    /// Final placement for every team that reached the bracket
    pub final_placement: BTreeMap<TeamId, u32>,
    pub champion: Option<TeamId>,
}

/// Monte Carlo simulation engine for tournament outcomes
pub struct SimulationEngine {
    tournament: Tournament,
    win_rates: WinRateMatrix,
    config: SimulationConfig,
}

impl SimulationEngine {
    pub fn new(
        tournament: Tournament,
        win_rates: WinRateMatrix,
        config: SimulationConfig,
    ) -> SimResult<Self> {
        if config.num_simulations == 0 {
            return Err(SimError::ZeroSimulations);
        }
        Ok(Self {
            tournament,
            win_rates,
            config,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn tournament(&self) -> &Tournament {
        &self.tournament
    }

    /// Simulate a single match outcome.
    ///
    /// One uniform draw per game against P(team_a wins a game); games are
    /// played until one side reaches the number needed to win the series.
    pub fn simulate_match<R: Rng + ?Sized>(&self, m: &Match, rng: &mut R) -> SimResult<MatchResult> {
        if m.is_placeholder() {
            return Err(SimError::PlaceholderMatch(m.id));
        }
        let prob_a_wins = self.win_rates.get_win_probability(m.team_a, m.team_b);

        if m.format == MatchFormat::Bo1 {
            let a_wins = rng.gen::<f64>() < prob_a_wins;
            return Ok(if a_wins {
                MatchResult::new(m.team_a, m.team_b, 1, 0)
            } else {
                MatchResult::new(m.team_b, m.team_a, 1, 0)
            });
        }

        let games_to_win = m.format.games_to_win();
        let (mut a_score, mut b_score) = (0, 0);
        while a_score < games_to_win && b_score < games_to_win {
            if rng.gen::<f64>() < prob_a_wins {
                a_score += 1;
            } else {
                b_score += 1;
            }
        }

        Ok(if a_score > b_score {
            MatchResult::new(m.team_a, m.team_b, a_score, b_score)
        } else {
            MatchResult::new(m.team_b, m.team_a, b_score, a_score)
        })
    }

    /// Play the bracket to completion.
    ///
    /// Positions are visited in [`BracketPosition::PLAY_ORDER`] so each match
    /// has both entrants by the time it is reached.
    pub fn simulate_playoffs<R: Rng + ?Sized>(
        &self,
        bracket: &mut PlayoffBracket,
        rng: &mut R,
    ) -> SimResult<()> {
        for position in BracketPosition::PLAY_ORDER {
            let Some(m) = bracket.get_match(position) else {
                continue;
            };
            if !m.is_playable() || bracket.result(position).is_some() {
                continue;
            }
            let result = self.simulate_match(m, rng)?;
            bracket.record_result(position, result)?;
        }
        Ok(())
    }

    /// Run a single tournament simulation.
    pub fn run_single_simulation(&self, seed: u64) -> SimResult<SimulationOutcome> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut trial = self.tournament.copy();

        for id in trial.remaining_round_robin_ids() {
            let result = self.simulate_match(trial.round_robin_match(id)?, &mut rng)?;
            trial.record_round_robin_result(id, result)?;
        }

        let final_standings = trial.resolve_standings(&mut rng);
        let mut outcome = SimulationOutcome::default();

        for (rank, &team) in final_standings.iter().enumerate() {
            outcome.regular_season_rank.insert(team, rank as u32 + 1);
        }

        let playoff_teams = &final_standings[..PLAYOFF_TEAMS.min(final_standings.len())];
        for (seed, &team) in playoff_teams.iter().enumerate() {
            outcome.made_playoffs.insert(team);
            outcome.playoff_seed.insert(team, seed as u32 + 1);
        }

        let bracket = trial.create_playoff_bracket(&final_standings)?;
        self.simulate_playoffs(bracket, &mut rng)?;

        outcome.champion = bracket.champion();
        outcome.final_placement = bracket.final_placements();
        tracing::debug!(seed, champion = ?outcome.champion, "trial finished");
        Ok(outcome)
    }

    /// Draw one seed per trial from the top-level generator.
    ///
    /// All seeds are drawn before any trial runs so results do not depend on
    /// execution order or thread count.
    pub fn trial_seeds(&self, top_level_seed: u64) -> Vec<u64> {
        let mut rng = ChaCha8Rng::seed_from_u64(top_level_seed);
        (0..self.config.num_simulations).map(|_| rng.next_u64()).collect()
    }

    /// Run all Monte Carlo simulations.
    pub fn run(&self) -> SimResult<SimulationResults> {
        let top_level_seed = self
            .config
            .seed
            .unwrap_or_else(|| ChaCha8Rng::from_entropy().next_u64());
        tracing::info!(
            simulations = self.config.num_simulations,
            seed = top_level_seed,
            parallel = self.config.parallel,
            remaining_matches = self.tournament.remaining_round_robin_matches().count(),
            "starting simulation run"
        );

        let seeds = self.trial_seeds(top_level_seed);
        let outcomes: Vec<SimulationOutcome> = if self.config.parallel {
            seeds
                .par_iter()
                .map(|&seed| self.run_single_simulation(seed))
                .collect::<SimResult<_>>()?
        } else {
            seeds
                .iter()
                .map(|&seed| self.run_single_simulation(seed))
                .collect::<SimResult<_>>()?
        };

        let mut tally = OutcomeTally::new();
        for outcome in &outcomes {
            tally.add(outcome);
        }
        let results = tally.into_results(self.tournament.roster(), top_level_seed);
        tracing::info!(simulations = results.num_simulations, "simulation run finished");
        Ok(results)
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod engine_tests;
