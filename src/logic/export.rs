//! CSV export of the fixture list.

use crate::models::{Match, MatchStatus, Stage};
use serde::Serialize;
use std::io;

#[derive(Serialize)]
struct FixtureRow<'a> {
    match_id: u64,
    date: String,
    time: String,
    stage: Stage,
    group: &'a str,
    home_team: &'a str,
    away_team: &'a str,
    home_score: Option<u32>,
    away_score: Option<u32>,
    status: MatchStatus,
}

/// Write one CSV row per match (with a header), in the order given.
/// Scores are empty until a match is completed.
pub fn write_schedule_csv<W: io::Write>(matches: &[Match], writer: W) -> Result<(), csv::Error> {
    let mut out = csv::Writer::from_writer(writer);
    for m in matches {
        let score = m.final_score();
        out.serialize(FixtureRow {
            match_id: m.id,
            date: m.date.format("%Y-%m-%d").to_string(),
            time: m.time.format("%H:%M").to_string(),
            stage: m.stage,
            group: m.group_name.as_deref().unwrap_or(""),
            home_team: &m.home_team_name,
            away_team: &m.away_team_name,
            home_score: score.map(|s| s.home),
            away_score: score.map(|s| s.away),
            status: m.status,
        })?;
    }
    out.flush()?;
    Ok(())
}

/// Convenience wrapper returning the CSV as a string.
pub fn schedule_csv_string(matches: &[Match]) -> Result<String, csv::Error> {
    let mut buf = Vec::new();
    write_schedule_csv(matches, &mut buf)?;
    String::from_utf8(buf).map_err(|e| csv::Error::from(io::Error::new(io::ErrorKind::InvalidData, e)))
}
