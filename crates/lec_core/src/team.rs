//! Teams and the roster that owns them.
//!
//! Teams are created once and never change. Everything else in the crate
//! (schedules, standings, brackets) refers to a team through its [`TeamId`],
//! so copying a tournament for a simulation trial never copies a team.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{SimError, SimResult};

/// Stable identity of a team inside one roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TeamId(pub u32);

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A team taking part in the tournament.
///
/// Equality and hashing only look at the id, so two teams that happen to
/// share a display name are still different teams.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    /// Display name, e.g. "Fnatic"
    pub name: String,
    /// Short code used in snapshots and config files, e.g. "FNC"
    pub short_name: String,
    /// Guest team coming from an external regional league
    pub is_erl: bool,
}

impl PartialEq for Team {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Team {}

impl Hash for Team {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name)
    }
}

/// Arena of immutable teams. Ids are handed out in insertion order.
#[derive(Debug, Clone, Default)]
pub struct TeamRoster {
    teams: Vec<Team>,
    by_code: HashMap<String, TeamId>,
}

impl TeamRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a team and return its id. Short codes must be unique.
    pub fn add(&mut self, name: &str, short_name: &str, is_erl: bool) -> SimResult<TeamId> {
        if self.by_code.contains_key(short_name) {
            return Err(SimError::DuplicateTeamCode(short_name.to_string()));
        }
        let id = TeamId(self.teams.len() as u32);
        self.teams.push(Team {
            id,
            name: name.to_string(),
            short_name: short_name.to_string(),
            is_erl,
        });
        self.by_code.insert(short_name.to_string(), id);
        Ok(id)
    }

    pub fn get(&self, id: TeamId) -> Option<&Team> {
        self.teams.get(id.0 as usize)
    }

    pub fn by_code(&self, short_name: &str) -> Option<&Team> {
        self.by_code.get(short_name).and_then(|&id| self.get(id))
    }

    pub fn ids(&self) -> impl Iterator<Item = TeamId> + '_ {
        self.teams.iter().map(|t| t.id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Team> {
        self.teams.iter()
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Name used to key aggregated results.
    ///
    /// Falls back to "name (CODE)" when another team carries the same display
    /// name, so distinct teams never share a key.
    pub fn display_key(&self, id: TeamId) -> String {
        let Some(team) = self.get(id) else {
            return id.to_string();
        };
        let shared = self
            .teams
            .iter()
            .any(|other| other.id != team.id && other.name == team.name);
        if shared {
            format!("{} ({})", team.name, team.short_name)
        } else {
            team.name.clone()
        }
    }
}

#[cfg(test)]
#[path = "team_tests.rs"]
mod team_tests;
