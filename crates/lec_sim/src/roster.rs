//! Default LEC 2026 Versus roster

use lec_core::{roster_from_entries, SimResult, TeamEntry, TeamRoster};

/// (name, short code, external-region)
const DEFAULT_TEAMS: [(&str, &str, bool); 12] = [
    ("Fnatic", "FNC", false),
    ("G2 Esports", "G2", false),
    ("GIANTX", "GX", false),
    ("Karmine Corp", "KC", false),
    ("Shifters", "SHFT", false),
    ("Team Vitality", "VIT", false),
    ("Team Heretics", "TH", false),
    ("Movistar KOI", "MKOI", false),
    ("SK Gaming", "SK", false),
    ("Natus Vincere", "NAVI", false),
    ("Los Ratones", "LR", true),
    ("Karmine Corp Blue", "KCB", true),
];

pub fn default_entries() -> Vec<TeamEntry> {
    DEFAULT_TEAMS
        .iter()
        .map(|&(name, short_name, is_erl)| TeamEntry {
            name: name.to_string(),
            short_name: short_name.to_string(),
            is_erl,
        })
        .collect()
}

pub fn default_roster() -> SimResult<TeamRoster> {
    roster_from_entries(&default_entries())
}
