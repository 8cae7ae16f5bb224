//! Tournament business logic: group allocation, shuffling, scheduling, standings, export.

mod export;
mod schedule;
mod setup;
mod shuffle;
mod standings;

pub use export::{schedule_csv_string, write_schedule_csv};
pub use schedule::{
    build_schedule, generate_schedule, generate_schedule_with, round_robin_pairs, SlotCursor,
    SlotPolicy,
};
pub use setup::{allocate_groups, create_tournament, group_label, group_name, parse_team_names};
pub use shuffle::{shuffle_groups, shuffle_groups_seeded};
pub use standings::{
    compute_standings, tournament_standings, GroupStandings, TeamStanding, POINTS_FOR_DRAW,
    POINTS_FOR_WIN,
};
