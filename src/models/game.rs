//! Match (fixture), Score, Stage and MatchStatus.

use crate::models::team::TeamId;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Identifier for a match within a tournament.
pub type MatchId = u64;

/// Phase of the tournament this match belongs to.
///
/// Only `Group` is generated; knockout stages are reserved.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    #[default]
    Group,
    Quarterfinal,
    Semifinal,
    Final,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Scheduled,
    InProgress,
    Completed,
}

/// Final score of a match. Home and away are always set together.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub home: u32,
    pub away: u32,
}

impl Score {
    pub fn new(home: u32, away: u32) -> Self {
        Self { home, away }
    }
}

/// A single fixture between two teams.
///
/// Team names and the group name are snapshots taken when the fixture was
/// created, so later renames do not rewrite past fixtures.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
    pub home_team_name: String,
    pub away_team_name: String,
    /// None until the match is completed.
    pub score: Option<Score>,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub stage: Stage,
    pub status: MatchStatus,
    pub group_name: Option<String>,
}

impl Match {
    /// Mark the match as being played. Only valid from `Scheduled`.
    pub fn start(&mut self) -> bool {
        if self.status != MatchStatus::Scheduled {
            return false;
        }
        self.status = MatchStatus::InProgress;
        true
    }

    /// Set the final score and complete the match. A completed match can be corrected.
    pub fn complete(&mut self, score: Score) {
        self.score = Some(score);
        self.status = MatchStatus::Completed;
    }

    /// Score of a completed match, None otherwise.
    pub fn final_score(&self) -> Option<Score> {
        match self.status {
            MatchStatus::Completed => self.score,
            _ => None,
        }
    }

    pub fn is_group_stage(&self) -> bool {
        self.stage == Stage::Group
    }
}
