//! Integration tests for tournament creation and group allocation.

use chrono::NaiveDate;
use group_stage_tournament::{
    allocate_groups, create_tournament, group_label, group_name, parse_team_names, IdSequence,
    TournamentError, TournamentStatus,
};
use std::collections::HashSet;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn team_names(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("Team {i}")).collect()
}

#[test]
fn allocation_is_balanced_for_all_small_sizes() {
    for groups in 1..=8 {
        for teams in groups..=30 {
            let mut ids = IdSequence::new();
            let allocated = allocate_groups(&team_names(teams), groups, &mut ids).unwrap();
            let sizes: Vec<usize> = allocated.iter().map(|g| g.teams.len()).collect();
            assert_eq!(allocated.len(), groups);
            assert_eq!(sizes.iter().sum::<usize>(), teams);
            let max = *sizes.iter().max().unwrap();
            let min = *sizes.iter().min().unwrap();
            assert!(max - min <= 1, "{teams} teams in {groups} groups: {sizes:?}");
        }
    }
}

#[test]
fn five_teams_in_two_groups_fill_left_to_right() {
    let mut ids = IdSequence::new();
    let groups = allocate_groups(&["A", "B", "C", "D", "E"], 2, &mut ids).unwrap();
    assert_eq!(groups[0].name, "Group A");
    assert_eq!(groups[0].team_names(), vec!["A", "B", "C"]);
    assert_eq!(groups[1].name, "Group B");
    assert_eq!(groups[1].team_names(), vec!["D", "E"]);
    for g in &groups {
        assert!(g.teams.iter().all(|t| t.group_id == g.id));
    }
}

#[test]
fn fewer_teams_than_groups_fails_without_drawing_ids() {
    let mut ids = IdSequence::new();
    let err = allocate_groups(&["A", "B"], 3, &mut ids).unwrap_err();
    assert_eq!(err, TournamentError::InsufficientTeams { teams: 2, groups: 3 });
    assert_eq!(ids.last(), 0);
}

#[test]
fn zero_groups_is_rejected() {
    let mut ids = IdSequence::new();
    assert_eq!(
        allocate_groups(&["A"], 0, &mut ids),
        Err(TournamentError::NoGroups)
    );
}

#[test]
fn ids_are_unique_across_teams_and_groups() {
    let mut ids = IdSequence::new();
    let groups = allocate_groups(&team_names(10), 3, &mut ids).unwrap();
    let mut seen = HashSet::new();
    for g in &groups {
        assert!(seen.insert(g.id));
        for t in &g.teams {
            assert!(seen.insert(t.id));
        }
    }
    assert_eq!(seen.len() as u64, ids.last());
}

#[test]
fn group_labels_continue_past_z() {
    assert_eq!(group_label(0), "A");
    assert_eq!(group_label(25), "Z");
    assert_eq!(group_label(26), "AA");
    assert_eq!(group_label(27), "AB");
    assert_eq!(group_label(51), "AZ");
    assert_eq!(group_label(52), "BA");
    assert_eq!(group_label(701), "ZZ");
    assert_eq!(group_label(702), "AAA");
    assert_eq!(group_name(1), "Group B");
}

#[test]
fn thirty_groups_get_distinct_names() {
    let mut ids = IdSequence::new();
    let groups = allocate_groups(&team_names(30), 30, &mut ids).unwrap();
    let names: HashSet<&str> = groups.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names.len(), 30);
    assert_eq!(groups[29].name, "Group AD");
}

#[test]
fn pasted_team_list_drops_blank_lines_and_trims() {
    let names = parse_team_names("  Lions \n\n Tigers\r\n   \nBears\n");
    assert_eq!(names, vec!["Lions", "Tigers", "Bears"]);
}

#[test]
fn create_tournament_allocates_groups() {
    let t = create_tournament("Summer Cup", date(2024, 6, 1), date(2024, 6, 10), &team_names(7), 2)
        .unwrap();
    assert_eq!(t.name, "Summer Cup");
    assert_eq!(t.status, TournamentStatus::Group);
    assert_eq!(t.groups.len(), 2);
    assert_eq!(t.team_count(), 7);
    assert!(t.matches.is_empty());
}

#[test]
fn create_tournament_validates_input() {
    let names = team_names(4);
    assert_eq!(
        create_tournament("Cup", date(2024, 6, 10), date(2024, 6, 1), &names, 2).unwrap_err(),
        TournamentError::InvalidDateRange
    );
    assert_eq!(
        create_tournament("   ", date(2024, 6, 1), date(2024, 6, 1), &names, 2).unwrap_err(),
        TournamentError::EmptyTournamentName
    );
    assert!(matches!(
        create_tournament("Cup", date(2024, 6, 1), date(2024, 6, 1), &names, 5),
        Err(TournamentError::InsufficientTeams { teams: 4, groups: 5 })
    ));
}
