use super::*;

/// Seeds 1..8 map to TeamId(1)..TeamId(8) so ids read as seeds.
fn seeds() -> Vec<TeamId> {
    (1..=8).map(TeamId).collect()
}

fn seeded_bracket() -> PlayoffBracket {
    let mut bracket = PlayoffBracket::new();
    bracket.seed_teams(&seeds()).unwrap();
    bracket
}

fn team_a_wins(m: &Match) -> MatchResult {
    let games = m.format.games_to_win();
    MatchResult::new(m.team_a, m.team_b, games, 0)
}

/// Play every position in order with slot A always winning.
fn play_out_team_a(bracket: &mut PlayoffBracket) {
    for position in BracketPosition::PLAY_ORDER {
        let result = team_a_wins(&bracket.matches()[&position]);
        bracket.record_result(position, result).unwrap();
    }
}

fn pairing(bracket: &PlayoffBracket, position: BracketPosition) -> (u32, u32) {
    let m = &bracket.matches()[&position];
    (m.team_a.0, m.team_b.0)
}

#[test]
fn quarterfinal_pairings() {
    let bracket = seeded_bracket();
    assert_eq!(pairing(&bracket, P::UpperQf1), (1, 8));
    assert_eq!(pairing(&bracket, P::UpperQf2), (4, 5));
    assert_eq!(pairing(&bracket, P::UpperQf3), (2, 7));
    assert_eq!(pairing(&bracket, P::UpperQf4), (3, 6));
    assert!(bracket
        .matches()
        .values()
        .all(|m| m.format == MatchFormat::Bo3));
    assert_eq!(bracket.get_next_matches().len(), 4);
    assert_eq!(bracket.seed_of(TeamId(5)), Some(5));
}

#[test]
fn wrong_number_of_seeds_fails() {
    let mut bracket = PlayoffBracket::new();
    assert_eq!(
        bracket.seed_teams(&seeds()[..7]),
        Err(SimError::WrongSeedCount(7))
    );
    let nine: Vec<_> = (1..=9).map(TeamId).collect();
    assert_eq!(bracket.seed_teams(&nine), Err(SimError::WrongSeedCount(9)));
    assert!(bracket.matches().is_empty());
}

#[test]
fn first_arrival_creates_placeholder() {
    let mut bracket = seeded_bracket();
    bracket
        .record_result(P::UpperQf1, MatchResult::new(TeamId(1), TeamId(8), 2, 1))
        .unwrap();

    let sf1 = &bracket.matches()[&P::UpperSf1];
    assert!(sf1.is_placeholder());
    assert_eq!(sf1.team_a, TeamId(1));
    let lr1 = &bracket.matches()[&P::LowerR1_1];
    assert!(lr1.is_placeholder());
    assert_eq!(lr1.team_a, TeamId(8));

    // Placeholders are not part of the playable frontier
    let frontier: Vec<_> = bracket.get_next_matches().iter().map(|(p, _)| *p).collect();
    assert_eq!(frontier, vec![P::UpperQf2, P::UpperQf3, P::UpperQf4]);
}

#[test]
fn second_arrival_fills_the_other_slot() {
    let mut bracket = seeded_bracket();
    bracket
        .record_result(P::UpperQf2, MatchResult::new(TeamId(5), TeamId(4), 2, 0))
        .unwrap();
    bracket
        .record_result(P::UpperQf1, MatchResult::new(TeamId(8), TeamId(1), 2, 1))
        .unwrap();

    assert_eq!(pairing(&bracket, P::UpperSf1), (8, 5));
    assert_eq!(pairing(&bracket, P::LowerR1_1), (1, 4));
    assert!(bracket.matches()[&P::UpperSf1].is_playable());
}

#[test]
fn placeholder_position_cannot_be_recorded() {
    let mut bracket = seeded_bracket();
    bracket
        .record_result(P::UpperQf1, MatchResult::new(TeamId(1), TeamId(8), 2, 0))
        .unwrap();

    let err = bracket
        .record_result(P::UpperSf1, MatchResult::new(TeamId(1), TeamId(4), 2, 0))
        .unwrap_err();
    assert!(matches!(err, SimError::PlaceholderMatch(_)));
    assert!(bracket.result(P::UpperSf1).is_none());

    assert_eq!(
        bracket.record_result(P::GrandFinal, MatchResult::new(TeamId(1), TeamId(2), 3, 0)),
        Err(SimError::EmptyPosition(P::GrandFinal))
    );
}

#[test]
fn position_cannot_be_recorded_twice() {
    let mut bracket = seeded_bracket();
    let result = MatchResult::new(TeamId(1), TeamId(8), 2, 0);
    bracket.record_result(P::UpperQf1, result).unwrap();
    assert!(matches!(
        bracket.record_result(P::UpperQf1, result),
        Err(SimError::AlreadyCompleted(_))
    ));
    assert_eq!(bracket.eliminated().len(), 0);
}

#[test]
fn routing_table_feeds_every_later_position_twice() {
    let mut arrivals: BTreeMap<BracketPosition, Vec<Slot>> = BTreeMap::new();
    for position in BracketPosition::ALL {
        let route = position.route();
        for advance in [route.winner, route.loser] {
            if let Advance::To { position, slot, .. } = advance {
                arrivals.entry(position).or_default().push(slot);
            }
        }
    }

    for position in BracketPosition::ALL {
        let slots = arrivals.get(&position).cloned().unwrap_or_default();
        if QUARTERFINALS.iter().any(|(qf, _, _)| *qf == position) {
            assert!(slots.is_empty(), "{position} is seeded directly");
        } else {
            assert_eq!(slots.len(), 2, "{position} needs two entrants");
            assert_ne!(slots[0], slots[1], "{position} slots collide");
        }
    }
}

#[test]
fn finals_are_best_of_five() {
    let mut bracket = seeded_bracket();
    play_out_team_a(&mut bracket);

    for position in [P::UpperFinal, P::LowerSf, P::LowerFinal, P::GrandFinal] {
        assert_eq!(bracket.matches()[&position].format, MatchFormat::Bo5);
    }
    for position in [P::UpperSf1, P::LowerR1_2, P::LowerR2_1] {
        assert_eq!(bracket.matches()[&position].format, MatchFormat::Bo3);
    }
}

#[test]
fn slot_a_always_winning_crowns_seed_one() {
    let mut bracket = seeded_bracket();
    play_out_team_a(&mut bracket);

    assert!(bracket.is_complete());
    assert_eq!(bracket.results().len(), 14);
    assert!(bracket.get_next_matches().is_empty());

    assert_eq!(bracket.champion(), Some(TeamId(1)));
    assert_eq!(bracket.runner_up(), Some(TeamId(8)));
    assert_eq!(bracket.third_place(), Some(TeamId(2)));
    assert_eq!(bracket.fourth_place(), Some(TeamId(7)));

    // Lower R1 losers went out first, then lower R2, then the finals
    assert_eq!(
        bracket.eliminated(),
        &[TeamId(5), TeamId(6), TeamId(4), TeamId(3), TeamId(7), TeamId(2), TeamId(8)]
    );

    let placements = bracket.final_placements();
    assert_eq!(placements.len(), 8);
    assert_eq!(placements[&TeamId(1)], 1);
    assert_eq!(placements[&TeamId(8)], 2);
    assert_eq!(placements[&TeamId(2)], 3);
    assert_eq!(placements[&TeamId(7)], 4);
    assert_eq!(placements[&TeamId(4)], 5);
    assert_eq!(placements[&TeamId(3)], 5);
    assert_eq!(placements[&TeamId(5)], 7);
    assert_eq!(placements[&TeamId(6)], 7);
}

#[test]
fn lower_bracket_runner_can_win_grand_final() {
    let mut bracket = seeded_bracket();
    for position in BracketPosition::PLAY_ORDER {
        let m = &bracket.matches()[&position];
        let result = if position == P::GrandFinal {
            MatchResult::new(m.team_b, m.team_a, 3, 2)
        } else {
            team_a_wins(m)
        };
        bracket.record_result(position, result).unwrap();
    }

    assert_eq!(bracket.champion(), Some(TeamId(8)));
    assert_eq!(bracket.runner_up(), Some(TeamId(1)));
    assert_eq!(bracket.get_placement(TeamId(1)), Some(2));
}

#[test]
fn incomplete_bracket_has_no_champion() {
    let mut bracket = seeded_bracket();
    for position in &BracketPosition::PLAY_ORDER[..13] {
        let result = team_a_wins(&bracket.matches()[position]);
        bracket.record_result(*position, result).unwrap();
    }
    assert!(!bracket.is_complete());
    assert_eq!(bracket.get_placement(TeamId(1)), None);
    assert_eq!(bracket.get_next_matches().len(), 1);
}

#[test]
fn state_only_moves_through_recorded_results() {
    let mut bracket = seeded_bracket();
    assert_eq!(bracket.teams(), seeds().as_slice());
    assert!(bracket.results().is_empty());
    assert!(bracket.get_match(P::GrandFinal).is_none());

    for (played, position) in BracketPosition::PLAY_ORDER.into_iter().enumerate() {
        assert!(bracket.result(position).is_none(), "{position} has a result before it was played");
        assert_eq!(bracket.champion(), None);

        let result = team_a_wins(bracket.get_match(position).unwrap());
        bracket.record_result(position, result).unwrap();

        assert_eq!(bracket.result(position), Some(&result));
        assert_eq!(bracket.results().len(), played + 1);
    }

    assert_eq!(bracket.champion(), Some(TeamId(1)));
    assert_eq!(bracket.is_complete(), bracket.champion().is_some());
}

#[test]
fn rejected_result_leaves_bracket_unchanged() {
    let mut bracket = seeded_bracket();
    let before = bracket.clone();

    // Team 3 is not in the 1 v 8 quarterfinal
    assert!(bracket
        .record_result(P::UpperQf1, MatchResult::new(TeamId(3), TeamId(8), 2, 0))
        .is_err());
    assert_eq!(bracket, before);
    assert!(bracket.get_match(P::UpperSf1).is_none());
}
