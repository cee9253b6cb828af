//! Pairwise win probabilities used to simulate matches

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{SimError, SimResult};
use crate::team::TeamId;

/// Win rate used when nothing is known about a matchup
pub const DEFAULT_WIN_RATE: f64 = 0.5;

/// Elo scale factor (rating gap that gives 10:1 odds)
pub const DEFAULT_ELO_SCALE: f64 = 400.0;

/// Probability that a team beats another, per game.
///
/// `matrix[a][b]` is P(a beats b). Every write sets both directions, so
/// `P(a beats b) + P(b beats a) == 1` holds for every stored pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinRateMatrix {
    matrix: BTreeMap<TeamId, BTreeMap<TeamId, f64>>,
    default_rate: f64,
}

impl Default for WinRateMatrix {
    fn default() -> Self {
        Self {
            matrix: BTreeMap::new(),
            default_rate: DEFAULT_WIN_RATE,
        }
    }
}

fn check_probability(p: f64) -> SimResult<()> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(SimError::InvalidProbability(p))
    }
}

impl WinRateMatrix {
    /// Empty matrix where every matchup uses `default_rate`.
    pub fn uniform(default_rate: f64) -> SimResult<Self> {
        check_probability(default_rate)?;
        Ok(Self {
            matrix: BTreeMap::new(),
            default_rate,
        })
    }

    pub fn default_rate(&self) -> f64 {
        self.default_rate
    }

    /// Probability of `a` beating `b` in a single game.
    pub fn get_win_probability(&self, a: TeamId, b: TeamId) -> f64 {
        self.matrix
            .get(&a)
            .and_then(|row| row.get(&b))
            .copied()
            .unwrap_or(self.default_rate)
    }

    /// Set P(a beats b) = p and P(b beats a) = 1 - p.
    pub fn set_win_probability(&mut self, a: TeamId, b: TeamId, p: f64) -> SimResult<()> {
        check_probability(p)?;
        self.matrix.entry(a).or_default().insert(b, p);
        self.matrix.entry(b).or_default().insert(a, 1.0 - p);
        Ok(())
    }

    /// Derive every pairwise probability from Elo ratings:
    ///
    /// P(A beats B) = 1 / (1 + 10^((Elo_B - Elo_A) / scale))
    pub fn from_elo_ratings(
        ratings: &BTreeMap<TeamId, f64>,
        scale: f64,
        default_rate: f64,
    ) -> SimResult<Self> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(SimError::InvalidEloScale(scale));
        }
        let mut matrix = Self::uniform(default_rate)?;
        let entries: Vec<(TeamId, f64)> = ratings.iter().map(|(&id, &elo)| (id, elo)).collect();

        for (i, &(team_a, elo_a)) in entries.iter().enumerate() {
            for &(team_b, elo_b) in &entries[i + 1..] {
                let prob_a = elo_win_probability(elo_a, elo_b, scale);
                matrix.set_win_probability(team_a, team_b, prob_a)?;
            }
        }

        Ok(matrix)
    }

    /// Number of explicitly stored ordered pairs
    pub fn explicit_pairs(&self) -> usize {
        self.matrix.values().map(BTreeMap::len).sum()
    }
}

/// Expected score of a player rated `elo_a` against one rated `elo_b`.
pub fn elo_win_probability(elo_a: f64, elo_b: f64, scale: f64) -> f64 {
    1.0 / (1.0 + 10.0_f64.powf((elo_b - elo_a) / scale))
}

#[cfg(test)]
#[path = "win_rates_tests.rs"]
mod win_rates_tests;
