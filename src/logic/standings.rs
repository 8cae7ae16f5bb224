//! Group standings: aggregate completed group-stage results into a ranked table.

use crate::models::{Group, GroupId, Match, TeamId, Tournament};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

pub const POINTS_FOR_WIN: u32 = 3;
pub const POINTS_FOR_DRAW: u32 = 1;

/// One row of a group table.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TeamStanding {
    pub team_id: TeamId,
    pub name: String,
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub points: u32,
}

impl TeamStanding {
    fn new(team_id: TeamId, name: &str) -> Self {
        Self {
            team_id,
            name: name.to_string(),
            played: 0,
            wins: 0,
            draws: 0,
            losses: 0,
            goals_for: 0,
            goals_against: 0,
            points: 0,
        }
    }

    pub fn goal_difference(&self) -> i64 {
        i64::from(self.goals_for) - i64::from(self.goals_against)
    }

    fn record(&mut self, scored: u32, conceded: u32) {
        self.played += 1;
        self.goals_for += scored;
        self.goals_against += conceded;
        match scored.cmp(&conceded) {
            Ordering::Greater => {
                self.wins += 1;
                self.points += POINTS_FOR_WIN;
            }
            Ordering::Less => self.losses += 1,
            Ordering::Equal => {
                self.draws += 1;
                self.points += POINTS_FOR_DRAW;
            }
        }
    }

    /// Ranking key, compared descending: points, then goal difference, then goals scored.
    fn rank_key(&self) -> (u32, i64, u32) {
        (self.points, self.goal_difference(), self.goals_for)
    }
}

/// Standings table for one group.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GroupStandings {
    pub group_id: GroupId,
    pub group_name: String,
    pub table: Vec<TeamStanding>,
}

/// Compute the ranked table for `group` from the tournament's matches.
///
/// Counts only completed group-stage matches tagged with this group's name whose teams are
/// both in the group. Teams level on (points, goal difference, goals for) keep the group's
/// team order.
pub fn compute_standings(group: &Group, matches: &[Match]) -> Vec<TeamStanding> {
    let mut table: Vec<TeamStanding> = group
        .teams
        .iter()
        .map(|t| TeamStanding::new(t.id, &t.name))
        .collect();
    let index: HashMap<TeamId, usize> = group
        .teams
        .iter()
        .enumerate()
        .map(|(i, t)| (t.id, i))
        .collect();

    let in_group = matches.iter().filter(|m| {
        m.is_group_stage() && m.group_name.as_deref() == Some(group.name.as_str())
    });
    for m in in_group {
        let (Some(&home), Some(&away)) = (index.get(&m.home_team_id), index.get(&m.away_team_id))
        else {
            continue;
        };
        let Some(score) = m.final_score() else {
            continue;
        };
        table[home].record(score.home, score.away);
        table[away].record(score.away, score.home);
    }

    // Vec::sort_by is stable.
    table.sort_by(|a, b| b.rank_key().cmp(&a.rank_key()));
    table
}

/// Standings for every group, in group order.
pub fn tournament_standings(tournament: &Tournament) -> Vec<GroupStandings> {
    tournament
        .groups
        .iter()
        .map(|g| GroupStandings {
            group_id: g.id,
            group_name: g.name.clone(),
            table: compute_standings(g, &tournament.matches),
        })
        .collect()
}
