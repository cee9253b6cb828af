//! Aggregated simulation results

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::engine::SimulationOutcome;
use crate::team::{TeamId, TeamRoster};

/// Per-team probability distribution over an ordinal (rank, seed, placement)
pub type Distribution = BTreeMap<String, BTreeMap<u32, f64>>;

/// Aggregated results from all simulations, keyed by team display name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationResults {
    pub num_simulations: usize,
    /// Top-level seed the per-trial seeds were drawn from
    pub seed: u64,
    /// team -> probability of making playoffs
    pub playoff_probability: BTreeMap<String, f64>,
    /// team -> probability of winning the championship
    pub championship_probability: BTreeMap<String, f64>,
    /// team -> {regular season rank: probability}
    pub regular_season_distribution: Distribution,
    /// team -> {playoff seed 1-8: probability}
    pub seeding_distribution: Distribution,
    /// team -> {final placement: probability}
    pub playoff_placement_distribution: Distribution,
}

impl SimulationResults {
    pub fn playoff_probability_of(&self, team: &str) -> f64 {
        self.playoff_probability.get(team).copied().unwrap_or(0.0)
    }

    pub fn championship_probability_of(&self, team: &str) -> f64 {
        self.championship_probability.get(team).copied().unwrap_or(0.0)
    }

    /// Mean regular-season rank, if the team was ever ranked
    pub fn expected_rank(&self, team: &str) -> Option<f64> {
        let ranks = self.regular_season_distribution.get(team)?;
        let mass: f64 = ranks.values().sum();
        if mass == 0.0 {
            return None;
        }
        Some(ranks.iter().map(|(&rank, &p)| rank as f64 * p).sum::<f64>() / mass)
    }
}

/// Integer counters folded from trial outcomes.
///
/// Counting is order-independent, so outcomes can be produced in any order
/// (or in parallel) and still give identical results.
#[derive(Debug, Clone, Default)]
pub struct OutcomeTally {
    trials: usize,
    playoffs: BTreeMap<TeamId, usize>,
    championships: BTreeMap<TeamId, usize>,
    ranks: BTreeMap<TeamId, BTreeMap<u32, usize>>,
    seeds: BTreeMap<TeamId, BTreeMap<u32, usize>>,
    placements: BTreeMap<TeamId, BTreeMap<u32, usize>>,
}

impl OutcomeTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trials(&self) -> usize {
        self.trials
    }

    pub fn add(&mut self, outcome: &SimulationOutcome) {
        self.trials += 1;
        for &team in &outcome.made_playoffs {
            *self.playoffs.entry(team).or_default() += 1;
        }
        if let Some(champion) = outcome.champion {
            *self.championships.entry(champion).or_default() += 1;
        }
        count_all(&mut self.ranks, &outcome.regular_season_rank);
        count_all(&mut self.seeds, &outcome.playoff_seed);
        count_all(&mut self.placements, &outcome.final_placement);
    }

    /// Convert counts to empirical probabilities (count / trials).
    pub fn into_results(self, roster: &TeamRoster, seed: u64) -> SimulationResults {
        let n = self.trials.max(1) as f64;
        let key = |team: &TeamId| roster.display_key(*team);
        let probabilities = |counts: BTreeMap<TeamId, usize>| -> BTreeMap<String, f64> {
            counts
                .iter()
                .map(|(team, &count)| (key(team), count as f64 / n))
                .collect()
        };
        let distribution = |counts: BTreeMap<TeamId, BTreeMap<u32, usize>>| -> Distribution {
            counts
                .iter()
                .map(|(team, buckets)| {
                    let buckets = buckets
                        .iter()
                        .map(|(&bucket, &count)| (bucket, count as f64 / n))
                        .collect();
                    (key(team), buckets)
                })
                .collect()
        };

        SimulationResults {
            num_simulations: self.trials,
            seed,
            playoff_probability: probabilities(self.playoffs),
            championship_probability: probabilities(self.championships),
            regular_season_distribution: distribution(self.ranks),
            seeding_distribution: distribution(self.seeds),
            playoff_placement_distribution: distribution(self.placements),
        }
    }
}

fn count_all(counts: &mut BTreeMap<TeamId, BTreeMap<u32, usize>>, values: &BTreeMap<TeamId, u32>) {
    for (&team, &value) in values {
        *counts.entry(team).or_default().entry(value).or_default() += 1;
    }
}

#[cfg(test)]
#[path = "results_tests.rs"]
mod results_tests;
