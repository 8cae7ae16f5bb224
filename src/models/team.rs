//! Team and Group data structures, plus the id sequence that numbers them.

use serde::{Deserialize, Serialize};

/// Identifier for a team within a tournament.
pub type TeamId = u64;

/// Identifier for a group within a tournament.
pub type GroupId = u64;

/// Monotonic id source shared by teams, groups and matches of one tournament.
///
/// Ids start at 1 and are never handed out twice, even after the entity they
/// named is gone.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct IdSequence {
    last: u64,
}

impl IdSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next id.
    pub fn next_id(&mut self) -> u64 {
        self.last += 1;
        self.last
    }

    /// Last id handed out (0 if none yet).
    pub fn last(&self) -> u64 {
        self.last
    }
}

/// A team. Belongs to exactly one group at a time (`group_id`).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub group_id: GroupId,
}

impl Team {
    pub fn new(id: TeamId, name: impl Into<String>, group_id: GroupId) -> Self {
        Self {
            id,
            name: name.into(),
            group_id,
        }
    }
}

/// A group of teams playing each other once in the group stage.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    /// "Group A", "Group B", ... derived from the group's position.
    pub name: String,
    /// Insertion order; also the order fixtures are paired in.
    pub teams: Vec<Team>,
}

impl Group {
    /// Create an empty group.
    pub fn new(id: GroupId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            teams: Vec::new(),
        }
    }

    /// Add a team to the end of this group, pointing its membership here.
    pub fn push_team(&mut self, mut team: Team) {
        team.group_id = self.id;
        self.teams.push(team);
    }

    pub fn contains_team(&self, id: TeamId) -> bool {
        self.teams.iter().any(|t| t.id == id)
    }

    pub fn team_names(&self) -> Vec<&str> {
        self.teams.iter().map(|t| t.name.as_str()).collect()
    }
}
