//! Data structures for a group-stage tournament: teams, groups, matches, tournament state.

mod game;
mod team;
mod tournament;

pub use game::{Match, MatchId, MatchStatus, Score, Stage};
pub use team::{Group, GroupId, IdSequence, Team, TeamId};
pub use tournament::{parse_score, Tournament, TournamentError, TournamentId, TournamentStatus};
