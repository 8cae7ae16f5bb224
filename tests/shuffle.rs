//! Integration tests for reshuffling teams across groups.

use chrono::NaiveDate;
use group_stage_tournament::{
    create_tournament, generate_schedule, shuffle_groups, shuffle_groups_seeded, Tournament,
    TournamentError,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeSet;

fn tournament(teams: usize, groups: usize) -> Tournament {
    let names: Vec<String> = (0..teams).map(|i| format!("Team {i}")).collect();
    let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
    create_tournament("Cup", start, end, &names, groups).unwrap()
}

fn layout(t: &Tournament) -> Vec<Vec<String>> {
    t.groups
        .iter()
        .map(|g| g.teams.iter().map(|team| team.name.clone()).collect())
        .collect()
}

fn team_ids(t: &Tournament) -> BTreeSet<u64> {
    t.groups
        .iter()
        .flat_map(|g| g.teams.iter().map(|team| team.id))
        .collect()
}

#[test]
fn shuffle_preserves_team_count_and_group_sizes() {
    for (teams, groups) in [(1, 1), (5, 2), (9, 4), (16, 4), (17, 3)] {
        let mut t = tournament(teams, groups);
        let sizes_before: Vec<usize> = t.groups.iter().map(|g| g.teams.len()).collect();
        let mut rng = StdRng::seed_from_u64(teams as u64);
        shuffle_groups(&mut t, &mut rng).unwrap();
        let sizes_after: Vec<usize> = t.groups.iter().map(|g| g.teams.len()).collect();
        assert_eq!(t.team_count(), teams);
        assert_eq!(sizes_before, sizes_after);
    }
}

#[test]
fn shuffle_keeps_team_identities_and_updates_membership() {
    let mut t = tournament(12, 3);
    let ids_before = team_ids(&t);
    let group_names: Vec<String> = t.groups.iter().map(|g| g.name.clone()).collect();

    shuffle_groups_seeded(&mut t, 99).unwrap();

    assert_eq!(team_ids(&t), ids_before);
    let names_after: Vec<String> = t.groups.iter().map(|g| g.name.clone()).collect();
    assert_eq!(group_names, names_after);
    for g in &t.groups {
        assert!(g.teams.iter().all(|team| team.group_id == g.id));
    }
}

#[test]
fn same_seed_gives_same_groups() {
    let original = tournament(20, 4);
    let mut a = original.clone();
    let mut b = original.clone();
    shuffle_groups_seeded(&mut a, 2024).unwrap();
    shuffle_groups_seeded(&mut b, 2024).unwrap();
    assert_eq!(layout(&a), layout(&b));
}

#[test]
fn different_seeds_usually_differ() {
    let original = tournament(20, 4);
    let mut a = original.clone();
    let mut b = original.clone();
    shuffle_groups_seeded(&mut a, 1).unwrap();
    shuffle_groups_seeded(&mut b, 2).unwrap();
    // 20! orderings; two seeds colliding on the same layout is not a realistic outcome.
    assert_ne!(layout(&a), layout(&b));
}

#[test]
fn shuffle_is_refused_once_scheduled() {
    let mut t = tournament(8, 2);
    generate_schedule(&mut t).unwrap();
    let before = layout(&t);
    let matches_before = t.matches.len();

    assert_eq!(
        shuffle_groups_seeded(&mut t, 5),
        Err(TournamentError::ScheduleAlreadyGenerated)
    );
    assert_eq!(layout(&t), before);
    assert_eq!(t.matches.len(), matches_before);
}

#[test]
fn clearing_the_schedule_allows_reshuffle_and_regeneration() {
    let mut t = tournament(8, 2);
    generate_schedule(&mut t).unwrap();
    assert_eq!(t.clear_schedule(), 12);

    shuffle_groups_seeded(&mut t, 5).unwrap();
    let fixtures = generate_schedule(&mut t).unwrap().len();
    assert_eq!(fixtures, 12);
}

#[test]
fn tournament_without_groups_is_left_alone() {
    let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    let mut t = Tournament::new("Empty", start, start).unwrap();
    shuffle_groups_seeded(&mut t, 1).unwrap();
    assert!(t.groups.is_empty());
}
