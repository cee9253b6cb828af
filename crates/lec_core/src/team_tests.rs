use super::*;

#[test]
fn ids_follow_insertion_order() {
    let mut roster = TeamRoster::new();
    let fnc = roster.add("Fnatic", "FNC", false).unwrap();
    let g2 = roster.add("G2 Esports", "G2", false).unwrap();

    assert_eq!(fnc, TeamId(0));
    assert_eq!(g2, TeamId(1));
    assert_eq!(roster.by_code("G2").map(|t| t.id), Some(g2));
    assert!(roster.by_code("KC").is_none());
}

#[test]
fn duplicate_short_code_is_rejected() {
    let mut roster = TeamRoster::new();
    roster.add("Fnatic", "FNC", false).unwrap();

    let err = roster.add("Fnatic Rising", "FNC", true).unwrap_err();
    assert_eq!(err, SimError::DuplicateTeamCode("FNC".to_string()));
    assert_eq!(roster.len(), 1);
}

#[test]
fn teams_with_same_name_stay_distinct() {
    let mut roster = TeamRoster::new();
    let a = roster.add("Karmine Corp", "KC", false).unwrap();
    let b = roster.add("Karmine Corp", "KCB", true).unwrap();

    assert_ne!(roster.get(a), roster.get(b));
    assert_eq!(roster.display_key(a), "Karmine Corp (KC)");
    assert_eq!(roster.display_key(b), "Karmine Corp (KCB)");
}

#[test]
fn display_key_is_plain_name_when_unique() {
    let mut roster = TeamRoster::new();
    let id = roster.add("Team Heretics", "TH", false).unwrap();
    assert_eq!(roster.display_key(id), "Team Heretics");
}
