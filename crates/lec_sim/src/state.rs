//! Tournament state loading

use anyhow::{Context, Result};
use lec_core::{SnapshotReport, Tournament, TournamentSnapshot};
use std::path::Path;
use std::sync::Arc;

use crate::roster::default_roster;

pub fn load_snapshot(path: &Path) -> Result<TournamentSnapshot> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("state file not found: {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse state file {}", path.display()))
}

/// Rebuild the tournament a snapshot describes.
///
/// Uses the snapshot's own team list when present, the default roster
/// otherwise.
pub fn tournament_from_snapshot(
    snapshot: &TournamentSnapshot,
) -> Result<(Tournament, SnapshotReport)> {
    let roster = match snapshot.roster() {
        Some(roster) => roster.context("invalid team list in state file")?,
        None => default_roster()?,
    };
    let (tournament, report) =
        Tournament::from_snapshot(Arc::new(roster), &snapshot.completed_matches)?;
    Ok((tournament, report))
}

/// Load a tournament from `path`, or start a fresh one with the default
/// roster when no path is given.
pub fn load_tournament(path: Option<&Path>) -> Result<Tournament> {
    let Some(path) = path else {
        tracing::info!("starting fresh tournament (no completed matches)");
        return Ok(Tournament::create_new(Arc::new(default_roster()?))?);
    };

    tracing::info!(path = %path.display(), "loading state");
    let snapshot = load_snapshot(path)?;
    let (tournament, report) = tournament_from_snapshot(&snapshot)?;
    if !report.skipped.is_empty() {
        tracing::warn!(
            skipped = report.skipped.len(),
            applied = report.applied,
            "some completed matches were not applied"
        );
    }
    Ok(tournament)
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod state_tests;
