//! End-to-end runs of the Monte Carlo engine over a full 12-team season.

use lec_core::{
    roster_from_entries, BracketPosition, CompletedMatch, PlayoffBracket, SimulationConfig,
    SimulationEngine, SimulationResults, TeamEntry, TeamId, Tournament, WinRateMatrix,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;

const CODES: [&str; 12] = [
    "FNC", "G2", "GX", "KC", "SHFT", "VIT", "TH", "MKOI", "SK", "NAVI", "LR", "KCB",
];

fn entries() -> Vec<TeamEntry> {
    CODES
        .iter()
        .map(|code| TeamEntry {
            name: format!("Team {code}"),
            short_name: code.to_string(),
            is_erl: false,
        })
        .collect()
}

fn tournament() -> Tournament {
    Tournament::create_new(Arc::new(roster_from_entries(&entries()).unwrap())).unwrap()
}

fn run(tournament: Tournament, win_rates: WinRateMatrix, n: usize, parallel: bool) -> SimulationResults {
    let config = SimulationConfig {
        num_simulations: n,
        seed: Some(2024),
        parallel,
    };
    SimulationEngine::new(tournament, win_rates, config)
        .unwrap()
        .run()
        .unwrap()
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn same_seed_gives_identical_output() {
    let first = run(tournament(), WinRateMatrix::default(), 200, false);
    let second = run(tournament(), WinRateMatrix::default(), 200, false);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn parallel_matches_sequential() {
    let sequential = run(tournament(), WinRateMatrix::default(), 300, false);
    let parallel = run(tournament(), WinRateMatrix::default(), 300, true);
    assert_eq!(
        serde_json::to_string(&sequential).unwrap(),
        serde_json::to_string(&parallel).unwrap()
    );
}

#[test]
fn probabilities_are_consistent() {
    let n = 400;
    let results = run(tournament(), WinRateMatrix::default(), n, true);
    assert_eq!(results.num_simulations, n);
    assert_eq!(results.regular_season_distribution.len(), 12);

    for &p in results
        .playoff_probability
        .values()
        .chain(results.championship_probability.values())
    {
        assert!((0.0..=1.0).contains(&p));
    }

    // exactly 8 qualifiers and one champion per trial
    assert_close(results.playoff_probability.values().sum(), 8.0);
    assert_close(results.championship_probability.values().sum(), 1.0);

    for ranks in results.regular_season_distribution.values() {
        assert_close(ranks.values().sum(), 1.0);
        assert!(ranks.keys().all(|rank| (1..=12).contains(rank)));
    }

    // a team's seed and placement mass equals its playoff probability
    for (team, &p) in &results.playoff_probability {
        let seeds: f64 = results.seeding_distribution[team].values().sum();
        let placements: f64 = results.playoff_placement_distribution[team].values().sum();
        assert_close(seeds, p);
        assert_close(placements, p);
    }

    // each rank is held by exactly one team per trial
    for rank in 1..=12u32 {
        let mass: f64 = results
            .regular_season_distribution
            .values()
            .filter_map(|ranks| ranks.get(&rank))
            .sum();
        assert_close(mass, 1.0);
    }
}

#[test]
fn dominant_team_always_wins() {
    let tournament = tournament();
    let x = tournament.roster().by_code("KC").unwrap().id;
    let mut rates = WinRateMatrix::default();
    for other in tournament.roster().ids().filter(|&id| id != x) {
        rates.set_win_probability(x, other, 1.0).unwrap();
    }

    for n in [1, 50] {
        let results = run(tournament.clone(), rates.clone(), n, true);
        assert_eq!(results.playoff_probability_of("Team KC"), 1.0);
        assert_eq!(results.championship_probability_of("Team KC"), 1.0);
        assert_eq!(results.regular_season_distribution["Team KC"][&1], 1.0);
        assert_eq!(results.playoff_placement_distribution["Team KC"][&1], 1.0);
        assert_eq!(results.expected_rank("Team KC"), Some(1.0));
    }
}

#[test]
fn completed_season_is_not_resimulated() {
    // lower roster index always wins
    let completed: Vec<CompletedMatch> = (0..CODES.len())
        .flat_map(|i| (i + 1..CODES.len()).map(move |j| (i, j)))
        .map(|(i, j)| CompletedMatch {
            team_a: CODES[i].to_string(),
            team_b: CODES[j].to_string(),
            winner: CODES[i].to_string(),
            score: [1, 0],
        })
        .collect();

    let roster = Arc::new(roster_from_entries(&entries()).unwrap());
    let (tournament, report) = Tournament::from_snapshot(roster, &completed).unwrap();
    assert_eq!(report.applied, 66);
    assert_eq!(tournament.remaining_round_robin_matches().count(), 0);

    let results = run(tournament, WinRateMatrix::default(), 100, true);
    for (rank, code) in CODES.iter().enumerate() {
        let name = format!("Team {code}");
        assert_eq!(results.regular_season_distribution[&name][&(rank as u32 + 1)], 1.0);
        if rank < 8 {
            assert_eq!(results.seeding_distribution[&name][&(rank as u32 + 1)], 1.0);
            assert_eq!(results.playoff_probability_of(&name), 1.0);
        } else {
            assert_eq!(results.playoff_probability_of(&name), 0.0);
        }
    }
}

#[test]
fn unset_seed_is_recorded_and_replayable() {
    let config = SimulationConfig {
        num_simulations: 50,
        seed: None,
        parallel: true,
    };
    let first = SimulationEngine::new(tournament(), WinRateMatrix::default(), config)
        .unwrap()
        .run()
        .unwrap();

    let replay = SimulationConfig {
        num_simulations: 50,
        seed: Some(first.seed),
        parallel: false,
    };
    let second = SimulationEngine::new(tournament(), WinRateMatrix::default(), replay)
        .unwrap()
        .run()
        .unwrap();
    assert_eq!(first, second);
}

#[test]
fn bracket_is_read_through_accessors_after_engine_play() {
    let engine = SimulationEngine::new(
        tournament(),
        WinRateMatrix::default(),
        SimulationConfig {
            num_simulations: 1,
            seed: Some(1),
            parallel: false,
        },
    )
    .unwrap();
    let mut bracket = PlayoffBracket::new();
    bracket.seed_teams(&(0..8).map(TeamId).collect::<Vec<_>>()).unwrap();
    assert_eq!(bracket.champion(), None);

    let mut rng = ChaCha8Rng::seed_from_u64(31);
    engine.simulate_playoffs(&mut bracket, &mut rng).unwrap();

    let final_result = bracket.result(BracketPosition::GrandFinal).unwrap();
    assert_eq!(bracket.champion(), Some(final_result.winner));
    assert_eq!(bracket.runner_up(), Some(final_result.loser));
    assert_eq!(bracket.eliminated().len(), 7);
    assert_eq!(bracket.results().len(), bracket.matches().len());
}
