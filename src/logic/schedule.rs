//! Group stage: round-robin fixture generation and kickoff slot allocation.

use crate::models::{Group, IdSequence, Match, MatchStatus, Stage, Tournament, TournamentError};
use chrono::{Duration, NaiveDate, NaiveTime};

/// Daily kickoff rules for the group stage.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SlotPolicy {
    /// First kickoff of each day.
    pub first_kickoff: NaiveTime,
    /// Gap between consecutive kickoffs.
    pub slot_length: Duration,
    /// A slot at or after this time rolls over to the next day's first kickoff.
    pub day_cutoff: NaiveTime,
}

impl Default for SlotPolicy {
    fn default() -> Self {
        Self {
            first_kickoff: kickoff(10, 0),
            slot_length: Duration::minutes(90),
            day_cutoff: kickoff(20, 0),
        }
    }
}

fn kickoff(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("hour and minute in range")
}

impl SlotPolicy {
    /// A policy is usable when slots have positive length and the first kickoff precedes the cutoff.
    pub fn is_valid(&self) -> bool {
        self.slot_length > Duration::zero() && self.first_kickoff < self.day_cutoff
    }
}

/// Running (date, time) position handed to consecutive fixtures.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SlotCursor {
    pub date: NaiveDate,
    pub time: NaiveTime,
}

impl SlotCursor {
    pub fn new(date: NaiveDate, policy: &SlotPolicy) -> Self {
        Self {
            date,
            time: policy.first_kickoff,
        }
    }

    /// Move to the next slot, rolling to the next day once the cutoff is reached.
    /// Fails, leaving the cursor where it was, if the next day is past `NaiveDate::MAX`.
    pub fn advance(&mut self, policy: &SlotPolicy) -> Result<(), TournamentError> {
        let (next, wrapped) = self.time.overflowing_add_signed(policy.slot_length);
        if wrapped != 0 || next >= policy.day_cutoff {
            self.date = self
                .date
                .succ_opt()
                .ok_or(TournamentError::ScheduleOutOfRange)?;
            self.time = policy.first_kickoff;
        } else {
            self.time = next;
        }
        Ok(())
    }
}

/// All unordered pairs `(i, j)`, `i < j`, over `len` items, in row order.
pub fn round_robin_pairs(len: usize) -> Vec<(usize, usize)> {
    (0..len)
        .flat_map(|i| (i + 1..len).map(move |j| (i, j)))
        .collect()
}

/// Build the group-stage fixtures for `groups`, in group order then pair order.
///
/// One slot cursor runs across all groups starting at `start_date`; every fixture gets
/// its own slot. Groups with fewer than two teams contribute nothing.
/// Fails with `ScheduleOutOfRange` if the fixtures do not fit before `NaiveDate::MAX`.
pub fn build_schedule(
    groups: &[Group],
    start_date: NaiveDate,
    policy: &SlotPolicy,
    ids: &mut IdSequence,
) -> Result<Vec<Match>, TournamentError> {
    let mut cursor = SlotCursor::new(start_date, policy);
    let mut matches: Vec<Match> = Vec::new();

    for group in groups {
        if group.teams.len() < 2 {
            log::debug!("Skipping {}: fewer than two teams", group.name);
            continue;
        }
        for (i, j) in round_robin_pairs(group.teams.len()) {
            // Advance lazily so the final fixture never needs a slot after it.
            if !matches.is_empty() {
                cursor.advance(policy)?;
            }
            let (home, away) = (&group.teams[i], &group.teams[j]);
            matches.push(Match {
                id: ids.next_id(),
                home_team_id: home.id,
                away_team_id: away.id,
                home_team_name: home.name.clone(),
                away_team_name: away.name.clone(),
                score: None,
                date: cursor.date,
                time: cursor.time,
                stage: Stage::Group,
                status: MatchStatus::Scheduled,
                group_name: Some(group.name.clone()),
            });
        }
    }

    Ok(matches)
}

/// Generate and store the group-stage schedule with the default slot policy.
pub fn generate_schedule(tournament: &mut Tournament) -> Result<&[Match], TournamentError> {
    generate_schedule_with(tournament, &SlotPolicy::default())
}

/// Generate and store the group-stage schedule.
///
/// Refuses if group-stage fixtures already exist, so calling twice never duplicates pairs.
/// On error nothing is stored.
pub fn generate_schedule_with<'a>(
    tournament: &'a mut Tournament,
    policy: &SlotPolicy,
) -> Result<&'a [Match], TournamentError> {
    if tournament.has_group_schedule() {
        return Err(TournamentError::ScheduleAlreadyGenerated);
    }

    let fixtures = build_schedule(
        &tournament.groups,
        tournament.start_date,
        policy,
        &mut tournament.ids,
    )?;
    if let Some(last) = fixtures.last() {
        if last.date > tournament.end_date {
            log::warn!(
                "Schedule for tournament {} runs to {}, past its end date {}",
                tournament.id,
                last.date,
                tournament.end_date
            );
        }
    }
    log::info!(
        "Generated {} group-stage matches for tournament {}",
        fixtures.len(),
        tournament.id
    );

    let first_new = tournament.matches.len();
    tournament.matches.extend(fixtures);
    Ok(&tournament.matches[first_new..])
}
