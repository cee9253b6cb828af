//! Console tables and JSON export for simulation results

use anyhow::{Context, Result};
use chrono::Local;
use lec_core::{Distribution, SimulationResults, TeamId, Tournament, PLAYOFF_TEAMS};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Default directory for timestamped result files
pub const RESULTS_DIR: &str = "data/results";

/// How many remaining matches `schedule` lists before summarising
pub const SCHEDULE_PREVIEW: usize = 20;

#[derive(Serialize)]
struct SavedResults<'a> {
    timestamp: String,
    results: &'a SimulationResults,
}

/// Sort by probability, highest first; ties keep name order.
fn ranked(probabilities: &BTreeMap<String, f64>) -> Vec<(&str, f64)> {
    let mut sorted: Vec<(&str, f64)> = probabilities
        .iter()
        .map(|(team, &p)| (team.as_str(), p))
        .collect();
    sorted.sort_by(|a, b| b.1.total_cmp(&a.1));
    sorted
}

/// Probability table, with a marker line after row `cutoff`
pub fn format_probability_table(
    probabilities: &BTreeMap<String, f64>,
    title: &str,
    limit: Option<usize>,
    cutoff: Option<usize>,
) -> String {
    let mut out = String::new();
    out.push_str(&format!("\n{}\n{}\n{}\n", "-".repeat(60), title, "-".repeat(60)));
    out.push_str(&format!("{:<6} {:<25} {:>8}\n", "Rank", "Team", "Prob"));

    let rows = ranked(probabilities);
    let limit = limit.unwrap_or(rows.len());
    for (i, (team, p)) in rows.into_iter().take(limit).enumerate() {
        out.push_str(&format!("{:<6} {:<25} {:>7.1}%\n", i + 1, team, p * 100.0));
        if cutoff == Some(i + 1) {
            out.push_str(&format!("       {} (playoff cutoff)\n", "-".repeat(40)));
        }
    }
    out
}

/// Team x position grid; teams sorted by their share of position 1
pub fn format_distribution_table(distribution: &Distribution, title: &str, positions: &[u32]) -> String {
    let mut out = String::new();
    out.push_str(&format!("\n{}\n{}\n{}\n", "-".repeat(70), title, "-".repeat(70)));

    let mut header = format!("{:<20}", "Team");
    for pos in positions {
        header.push_str(&format!("{pos:>6}"));
    }
    out.push_str(&header);
    out.push('\n');

    let firsts: BTreeMap<String, f64> = distribution
        .iter()
        .map(|(team, buckets)| (team.clone(), buckets.get(&1).copied().unwrap_or(0.0)))
        .collect();
    for (team, _) in ranked(&firsts) {
        let mut row = format!("{team:<20}");
        for pos in positions {
            match distribution[team].get(pos) {
                Some(&p) if p > 0.0 => row.push_str(&format!("{:>5.1}%", p * 100.0)),
                _ => row.push_str(&format!("{:>6}", "--")),
            }
        }
        out.push_str(&row);
        out.push('\n');
    }
    out
}

pub fn print_summary(results: &SimulationResults) {
    println!("\n{}", "=".repeat(60));
    println!("SIMULATION RESULTS");
    println!("{}", "=".repeat(60));
    println!("Simulations run: {}", results.num_simulations);
    println!("Seed: {}", results.seed);

    print!(
        "{}",
        format_probability_table(
            &results.playoff_probability,
            "PLAYOFF QUALIFICATION PROBABILITY",
            None,
            Some(PLAYOFF_TEAMS),
        )
    );
    print!(
        "{}",
        format_probability_table(
            &results.championship_probability,
            "CHAMPIONSHIP PROBABILITY",
            Some(PLAYOFF_TEAMS),
            None,
        )
    );
    let seeds: Vec<u32> = (1..=PLAYOFF_TEAMS as u32).collect();
    print!(
        "{}",
        format_distribution_table(&results.seeding_distribution, "PLAYOFF SEEDING", &seeds)
    );
}

/// Current W-L table in raw win order, ties left unresolved
pub fn format_standings(tournament: &Tournament) -> String {
    let mut out = String::new();
    out.push_str(&format!("\nCurrent Standings\n{}\n", "=".repeat(40)));
    out.push_str(&format!("{:<6} {:<25} {:<10}\n", "Rank", "Team", "W-L"));
    out.push_str(&format!("{}\n", "-".repeat(40)));

    let roster = tournament.roster();
    for (i, standing) in tournament.standings().get_ordered().into_iter().enumerate() {
        let name = roster
            .get(standing.team)
            .map_or_else(|| standing.team.to_string(), |t| t.name.clone());
        let record = format!("{}-{}", standing.wins, standing.losses);
        out.push_str(&format!("{:<6} {:<25} {:<10}\n", i + 1, name, record));
    }

    out.push_str(&format!(
        "\nMatches: {}/{} completed\n",
        tournament.completed_round_robin_matches().count(),
        tournament.round_robin_matches().len()
    ));
    out
}

/// First [`SCHEDULE_PREVIEW`] remaining matches, then a count of the rest
pub fn format_schedule(tournament: &Tournament) -> String {
    let roster = tournament.roster();
    let code = |id: TeamId| roster.get(id).map_or_else(|| id.to_string(), |t| t.short_name.clone());
    let remaining: Vec<_> = tournament.remaining_round_robin_matches().collect();

    let mut out = String::new();
    out.push_str(&format!("\nRemaining Matches\n{}\n", "=".repeat(40)));
    out.push_str(&format!("Total remaining: {}\n{}\n", remaining.len(), "-".repeat(40)));
    for (i, m) in remaining.iter().take(SCHEDULE_PREVIEW).enumerate() {
        out.push_str(&format!("{:>3}. {} vs {}\n", i + 1, code(m.team_a), code(m.team_b)));
    }
    if remaining.len() > SCHEDULE_PREVIEW {
        out.push_str(&format!("... and {} more matches\n", remaining.len() - SCHEDULE_PREVIEW));
    }
    out
}

/// Save results as `{ timestamp, results }` JSON.
///
/// Without an explicit path a timestamped file is created under
/// [`RESULTS_DIR`].
pub fn save_results(results: &SimulationResults, path: Option<&Path>) -> Result<PathBuf> {
    let now = Local::now();
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            std::fs::create_dir_all(RESULTS_DIR)
                .with_context(|| format!("failed to create {RESULTS_DIR}"))?;
            Path::new(RESULTS_DIR).join(format!("sim_{}.json", now.format("%Y%m%d_%H%M%S")))
        }
    };

    let saved = SavedResults {
        timestamp: now.to_rfc3339(),
        results,
    };
    let json = serde_json::to_string_pretty(&saved).context("failed to serialize results")?;
    std::fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod report_tests;
