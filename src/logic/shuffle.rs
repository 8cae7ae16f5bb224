//! Reshuffle teams across a tournament's existing groups.

use crate::logic::setup::balanced_sizes;
use crate::models::{Team, Tournament, TournamentError};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Randomly redistribute all teams over the existing groups.
///
/// 1. Collect every team, in group order (current membership is discarded).
/// 2. Shuffle with `rng`.
/// 3. Refill the groups in their current order using the same balanced split as allocation.
///
/// Teams keep their ids; only `group_id` changes. The new layout is built aside and
/// committed only once the team count checks out, so on error nothing has changed.
/// Refuses while group-stage fixtures exist, since they would span groups afterwards;
/// call [`Tournament::clear_schedule`] first to reshuffle a scheduled tournament.
pub fn shuffle_groups<R: Rng + ?Sized>(
    tournament: &mut Tournament,
    rng: &mut R,
) -> Result<(), TournamentError> {
    if tournament.has_group_schedule() {
        return Err(TournamentError::ScheduleAlreadyGenerated);
    }
    if tournament.groups.is_empty() {
        return Ok(());
    }

    let mut pool: Vec<Team> = tournament
        .groups
        .iter()
        .flat_map(|g| g.teams.iter().cloned())
        .collect();
    let before = pool.len();
    pool.shuffle(rng);

    let mut pool = pool.into_iter();
    let layout: Vec<Vec<Team>> = balanced_sizes(before, tournament.groups.len())
        .into_iter()
        .zip(&tournament.groups)
        .map(|(size, group)| {
            pool.by_ref()
                .take(size)
                .map(|mut team| {
                    team.group_id = group.id;
                    team
                })
                .collect()
        })
        .collect();

    let after: usize = layout.iter().map(Vec::len).sum();
    if after != before {
        log::error!(
            "Shuffle of tournament {} produced {} teams from {}",
            tournament.id,
            after,
            before
        );
        return Err(TournamentError::TeamCountMismatch { before, after });
    }

    for (group, teams) in tournament.groups.iter_mut().zip(layout) {
        group.teams = teams;
    }
    log::info!(
        "Shuffled {} teams across {} groups in tournament {}",
        before,
        tournament.groups.len(),
        tournament.id
    );
    Ok(())
}

/// [`shuffle_groups`] with a reproducible generator: same tournament + same seed gives the same groups.
pub fn shuffle_groups_seeded(tournament: &mut Tournament, seed: u64) -> Result<(), TournamentError> {
    let mut rng = StdRng::seed_from_u64(seed);
    shuffle_groups(tournament, &mut rng)
}
