//! TOML run configuration.
//!
//! Every section is optional. Command-line flags are applied on top of the
//! file with [`RunConfig::apply_overrides`].

use anyhow::{bail, Context, Result};
use lec_core::{
    SimulationConfig, TeamId, TeamRoster, WinRateMatrix, DEFAULT_ELO_SCALE, DEFAULT_WIN_RATE,
};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub simulation: SimulationConfig,
    pub win_rates: WinRateConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WinRateConfig {
    /// Probability used for any pair without an Elo rating or override
    pub default_rate: f64,
    pub elo_scale: f64,
    /// Short code -> Elo rating
    pub elo: BTreeMap<String, f64>,
    /// Explicit pairs, applied after Elo
    pub overrides: Vec<PairOverride>,
}

impl Default for WinRateConfig {
    fn default() -> Self {
        Self {
            default_rate: DEFAULT_WIN_RATE,
            elo_scale: DEFAULT_ELO_SCALE,
            elo: BTreeMap::new(),
            overrides: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PairOverride {
    pub team_a: String,
    pub team_b: String,
    /// P(team_a beats team_b) in a single game
    pub probability: f64,
}

/// Flags that take precedence over the file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub simulations: Option<usize>,
    pub seed: Option<u64>,
    pub win_rate: Option<f64>,
    pub sequential: bool,
}

impl RunConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(n) = overrides.simulations {
            self.simulation.num_simulations = n;
        }
        if overrides.seed.is_some() {
            self.simulation.seed = overrides.seed;
        }
        if let Some(rate) = overrides.win_rate {
            self.win_rates.default_rate = rate;
        }
        if overrides.sequential {
            self.simulation.parallel = false;
        }
    }

    /// Build the win-rate table for `roster`.
    ///
    /// Unknown short codes are rejected rather than ignored.
    pub fn win_rate_matrix(&self, roster: &TeamRoster) -> Result<WinRateMatrix> {
        let cfg = &self.win_rates;
        let mut matrix = if cfg.elo.is_empty() {
            WinRateMatrix::uniform(cfg.default_rate)?
        } else {
            let mut ratings = BTreeMap::new();
            for (code, &elo) in &cfg.elo {
                ratings.insert(lookup(roster, code, "[win_rates.elo]")?, elo);
            }
            WinRateMatrix::from_elo_ratings(&ratings, cfg.elo_scale, cfg.default_rate)?
        };

        for pair in &cfg.overrides {
            let a = lookup(roster, &pair.team_a, "[[win_rates.overrides]]")?;
            let b = lookup(roster, &pair.team_b, "[[win_rates.overrides]]")?;
            if a == b {
                bail!("override pairs {} with itself", pair.team_a);
            }
            matrix
                .set_win_probability(a, b, pair.probability)
                .with_context(|| format!("override {} vs {}", pair.team_a, pair.team_b))?;
        }

        tracing::debug!(
            default_rate = matrix.default_rate(),
            explicit_pairs = matrix.explicit_pairs(),
            "win-rate table built"
        );
        Ok(matrix)
    }
}

fn lookup(roster: &TeamRoster, code: &str, section: &str) -> Result<TeamId> {
    match roster.by_code(code) {
        Some(team) => Ok(team.id),
        None => bail!("unknown team code '{code}' in {section}"),
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
