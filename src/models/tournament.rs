//! Tournament, TournamentStatus and TournamentError.

use crate::models::game::{Match, MatchId, Score};
use crate::models::team::{Group, IdSequence};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Fewer teams than groups.
    InsufficientTeams { teams: usize, groups: usize },
    /// Group count of zero.
    NoGroups,
    /// Shuffle lost or gained teams. Indicates a bug, never retry.
    TeamCountMismatch { before: usize, after: usize },
    /// Score missing, not an integer, or negative.
    InvalidScore(String),
    MatchNotFound(MatchId),
    /// Group-stage fixtures already exist.
    ScheduleAlreadyGenerated,
    /// End date before start date.
    InvalidDateRange,
    EmptyTournamentName,
    /// Tournament is not in a state that allows this action.
    InvalidState,
    /// Kickoff slots ran past the last representable date.
    ScheduleOutOfRange,
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::InsufficientTeams { teams, groups } => write!(
                f,
                "You need at least as many teams as groups ({} teams, {} groups)",
                teams, groups
            ),
            TournamentError::NoGroups => write!(f, "Need at least one group"),
            TournamentError::TeamCountMismatch { before, after } => {
                write!(f, "Team count mismatch: {} before, {} after", before, after)
            }
            TournamentError::InvalidScore(raw) => write!(f, "Invalid score format: {:?}", raw),
            TournamentError::MatchNotFound(id) => write!(f, "Match {} not found", id),
            TournamentError::ScheduleAlreadyGenerated => {
                write!(f, "The group-stage schedule has already been generated")
            }
            TournamentError::InvalidDateRange => write!(f, "End date is before start date"),
            TournamentError::EmptyTournamentName => write!(f, "Tournament name must not be empty"),
            TournamentError::InvalidState => write!(f, "Invalid state for this action"),
            TournamentError::ScheduleOutOfRange => {
                write!(f, "Schedule runs past the last supported date")
            }
        }
    }
}

impl std::error::Error for TournamentError {}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Current phase of the tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    /// Round-robin group stage.
    #[default]
    Group,
    /// Knockout rounds. Brackets are not generated.
    Knockout,
    Completed,
}

/// Full tournament state: groups, fixtures and phase.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub status: TournamentStatus,
    pub groups: Vec<Group>,
    /// Fixtures in generation order.
    pub matches: Vec<Match>,
    /// Source of team, group and match ids.
    pub ids: IdSequence,
}

impl Tournament {
    /// Create an empty tournament in the group stage.
    pub fn new(
        name: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Self, TournamentError> {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(TournamentError::EmptyTournamentName);
        }
        if end_date < start_date {
            return Err(TournamentError::InvalidDateRange);
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            start_date,
            end_date,
            created_at: Utc::now(),
            status: TournamentStatus::Group,
            groups: Vec::new(),
            matches: Vec::new(),
            ids: IdSequence::new(),
        })
    }

    /// Total number of teams across all groups.
    pub fn team_count(&self) -> usize {
        self.groups.iter().map(|g| g.teams.len()).sum()
    }

    pub fn has_group_schedule(&self) -> bool {
        self.matches.iter().any(Match::is_group_stage)
    }

    pub fn get_match_mut(&mut self, id: MatchId) -> Option<&mut Match> {
        self.matches.iter_mut().find(|m| m.id == id)
    }

    /// Set the final score of a match and mark it completed.
    pub fn record_result(
        &mut self,
        match_id: MatchId,
        home: u32,
        away: u32,
    ) -> Result<(), TournamentError> {
        let m = self
            .get_match_mut(match_id)
            .ok_or(TournamentError::MatchNotFound(match_id))?;
        m.complete(Score::new(home, away));
        log::debug!(
            "Recorded {} {}-{} {} (match {})",
            m.home_team_name,
            home,
            away,
            m.away_team_name,
            match_id
        );
        Ok(())
    }

    /// Record a result from raw text input (e.g. form fields).
    /// Both scores are parsed before anything changes; a bad score leaves the match as it was.
    pub fn update_match_score(
        &mut self,
        match_id: MatchId,
        raw_home: &str,
        raw_away: &str,
    ) -> Result<(), TournamentError> {
        if !self.matches.iter().any(|m| m.id == match_id) {
            return Err(TournamentError::MatchNotFound(match_id));
        }
        let home = parse_score(raw_home)?;
        let away = parse_score(raw_away)?;
        self.record_result(match_id, home, away)
    }

    /// Move a scheduled match to in-progress.
    pub fn start_match(&mut self, match_id: MatchId) -> Result<(), TournamentError> {
        let m = self
            .get_match_mut(match_id)
            .ok_or(TournamentError::MatchNotFound(match_id))?;
        if !m.start() {
            return Err(TournamentError::InvalidState);
        }
        Ok(())
    }

    /// Drop every fixture so groups can be reshuffled and the schedule rebuilt.
    pub fn clear_schedule(&mut self) -> usize {
        let removed = self.matches.len();
        self.matches.clear();
        removed
    }

    /// Fixtures keyed by date, each day in kickoff order.
    pub fn matches_by_date(&self) -> BTreeMap<NaiveDate, Vec<&Match>> {
        let mut by_date: BTreeMap<NaiveDate, Vec<&Match>> = BTreeMap::new();
        for m in &self.matches {
            by_date.entry(m.date).or_default().push(m);
        }
        for day in by_date.values_mut() {
            day.sort_by_key(|m| m.time);
        }
        by_date
    }

    /// Group-stage fixtures keyed by their group-name snapshot.
    pub fn matches_by_group(&self) -> HashMap<&str, Vec<&Match>> {
        let mut by_group: HashMap<&str, Vec<&Match>> = HashMap::new();
        for m in self.matches.iter().filter(|m| m.is_group_stage()) {
            if let Some(name) = m.group_name.as_deref() {
                by_group.entry(name).or_default().push(m);
            }
        }
        by_group
    }

    /// Move from the group stage to the knockout stage.
    pub fn advance_to_knockout(&mut self) -> Result<(), TournamentError> {
        if self.status != TournamentStatus::Group {
            return Err(TournamentError::InvalidState);
        }
        self.status = TournamentStatus::Knockout;
        log::info!("Tournament {} advanced to knockout stage", self.id);
        Ok(())
    }
}

/// Parse a single score field: a non-negative integer, surrounding whitespace allowed.
pub fn parse_score(raw: &str) -> Result<u32, TournamentError> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| TournamentError::InvalidScore(raw.to_string()))
}
