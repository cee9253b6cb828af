use super::*;
use crate::fixture::MatchResult;
use std::collections::HashSet;

fn teams(n: u32) -> Vec<TeamId> {
    (0..n).map(TeamId).collect()
}

#[test]
fn every_pair_exactly_once() {
    for n in [0u32, 1, 2, 3, 8, 12] {
        let schedule = generate_round_robin_schedule(&teams(n), MatchFormat::Bo1);
        let n = n as usize;
        assert_eq!(schedule.len(), n * n.saturating_sub(1) / 2);

        let pairs: HashSet<_> = schedule
            .iter()
            .map(|m| (m.team_a.min(m.team_b), m.team_a.max(m.team_b)))
            .collect();
        assert_eq!(pairs.len(), schedule.len());
        assert!(schedule.iter().all(|m| !m.is_placeholder()));
    }
}

#[test]
fn schedule_is_unplayed_and_tagged() {
    let schedule = generate_round_robin_schedule(&teams(4), MatchFormat::Bo3);
    assert!(schedule.iter().all(|m| !m.is_completed()));
    assert!(schedule.iter().all(|m| m.stage == Stage::RoundRobin));
    assert!(schedule.iter().all(|m| m.format == MatchFormat::Bo3));
    assert_eq!(schedule[0].id, MatchId::RoundRobin(0));
    assert_eq!(schedule[5].id, MatchId::RoundRobin(5));
}

#[test]
fn generation_order_is_stable() {
    let schedule = generate_round_robin_schedule(&teams(3), MatchFormat::Bo1);
    let pairs: Vec<_> = schedule.iter().map(|m| (m.team_a.0, m.team_b.0)).collect();
    assert_eq!(pairs, vec![(0, 1), (0, 2), (1, 2)]);
}

#[test]
fn filters_split_the_schedule() {
    let mut schedule = generate_round_robin_schedule(&teams(4), MatchFormat::Bo1);
    schedule[0]
        .record_result(MatchResult::new(TeamId(0), TeamId(1), 1, 0))
        .unwrap();

    assert_eq!(completed_matches(&schedule).count(), 1);
    assert_eq!(remaining_matches(&schedule).count(), 5);
}
