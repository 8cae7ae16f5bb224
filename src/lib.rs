//! Group-stage tournament organizer: library with models and business logic.

pub mod config;
pub mod logic;
pub mod models;

pub use config::AppConfig;
pub use logic::{
    allocate_groups, build_schedule, compute_standings, create_tournament, generate_schedule,
    generate_schedule_with, group_label, group_name, parse_team_names, round_robin_pairs,
    schedule_csv_string, shuffle_groups, shuffle_groups_seeded, tournament_standings,
    write_schedule_csv, GroupStandings, SlotCursor, SlotPolicy, TeamStanding,
};
pub use models::{
    parse_score, Group, GroupId, IdSequence, Match, MatchId, MatchStatus, Score, Stage, Team,
    TeamId, Tournament, TournamentError, TournamentId, TournamentStatus,
};
