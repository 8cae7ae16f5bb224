//! Setup phase: create the tournament and split its teams into balanced groups.

use crate::models::{Group, IdSequence, Team, Tournament, TournamentError};
use chrono::NaiveDate;

/// Split pasted team input into names: one per line, trimmed, blank lines dropped.
pub fn parse_team_names(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Letter label for the group at `index`: A..Z, then AA, AB, .. AZ, BA, ..
/// (bijective base 26, like spreadsheet columns).
pub fn group_label(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        n -= 1;
        letters.push(b'A' + (n % 26) as u8);
        n /= 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// Display name of the group at `index` ("Group A", ...).
pub fn group_name(index: usize) -> String {
    format!("Group {}", group_label(index))
}

/// Group sizes for `total` items over `groups` buckets: the first `total % groups`
/// buckets get one extra. Sizes differ by at most one and sum to `total`.
pub(crate) fn balanced_sizes(total: usize, groups: usize) -> Vec<usize> {
    if groups == 0 {
        return Vec::new();
    }
    let base = total / groups;
    let remainder = total % groups;
    (0..groups)
        .map(|i| base + usize::from(i < remainder))
        .collect()
}

/// Allocate `team_names` into `group_count` groups, in input order, filling groups left to right.
///
/// Fails without drawing any ids when `group_count` is zero or there are fewer teams than groups.
pub fn allocate_groups<S: AsRef<str>>(
    team_names: &[S],
    group_count: usize,
    ids: &mut IdSequence,
) -> Result<Vec<Group>, TournamentError> {
    if group_count == 0 {
        return Err(TournamentError::NoGroups);
    }
    if team_names.len() < group_count {
        return Err(TournamentError::InsufficientTeams {
            teams: team_names.len(),
            groups: group_count,
        });
    }

    let mut names = team_names.iter().map(|n| n.as_ref().trim());
    let groups = balanced_sizes(team_names.len(), group_count)
        .into_iter()
        .enumerate()
        .map(|(i, size)| {
            let mut group = Group::new(ids.next_id(), group_name(i));
            for name in names.by_ref().take(size) {
                group.push_team(Team::new(ids.next_id(), name, group.id));
            }
            group
        })
        .collect();
    Ok(groups)
}

/// Create a tournament and allocate its teams into groups.
pub fn create_tournament<S: AsRef<str>>(
    name: &str,
    start_date: NaiveDate,
    end_date: NaiveDate,
    team_names: &[S],
    group_count: usize,
) -> Result<Tournament, TournamentError> {
    let mut tournament = Tournament::new(name, start_date, end_date)?;
    tournament.groups = allocate_groups(team_names, group_count, &mut tournament.ids)?;
    log::info!(
        "Created tournament {:?} ({}) with {} teams in {} groups",
        tournament.name,
        tournament.id,
        tournament.team_count(),
        tournament.groups.len()
    );
    Ok(tournament)
}
