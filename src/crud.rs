use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{Row, params};
use thiserror::Error;

use crate::db::Database;
use crate::table::{Cell, Table};

/// Cap on rows returned by the "recent" read paths.
pub const RECENT_ROW_LIMIT: usize = 500;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown {kind} '{value}'")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchType {
    #[default]
    Test,
    Odi,
    T20i,
}

impl MatchType {
    pub const ALL: [MatchType; 3] = [MatchType::Test, MatchType::Odi, MatchType::T20i];

    pub fn as_str(self) -> &'static str {
        match self {
            MatchType::Test => "Test",
            MatchType::Odi => "ODI",
            MatchType::T20i => "T20I",
        }
    }

    pub fn next(self) -> Self {
        match self {
            MatchType::Test => MatchType::Odi,
            MatchType::Odi => MatchType::T20i,
            MatchType::T20i => MatchType::Test,
        }
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MatchType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseEnumError {
                kind: "match type",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchStatus {
    #[default]
    Scheduled,
    InProgress,
    Completed,
}

impl MatchStatus {
    pub const ALL: [MatchStatus; 3] = [
        MatchStatus::Scheduled,
        MatchStatus::InProgress,
        MatchStatus::Completed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MatchStatus::Scheduled => "scheduled",
            MatchStatus::InProgress => "in_progress",
            MatchStatus::Completed => "completed",
        }
    }

    pub fn next(self) -> Self {
        match self {
            MatchStatus::Scheduled => MatchStatus::InProgress,
            MatchStatus::InProgress => MatchStatus::Completed,
            MatchStatus::Completed => MatchStatus::Scheduled,
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MatchStatus::ALL
            .into_iter()
            .find(|t| t.as_str() == s.trim())
            .ok_or_else(|| ParseEnumError {
                kind: "match status",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPlayer {
    pub first_name: String,
    pub last_name: String,
    pub country: String,
    pub playing_role: String,
    pub batting_style: String,
    pub bowling_style: String,
}

/// Stored player row; CSV-loaded rows may leave any text column NULL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub country: Option<String>,
    pub playing_role: Option<String>,
    pub batting_style: Option<String>,
    pub bowling_style: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMatch {
    pub description: String,
    pub team1_id: i64,
    pub team2_id: i64,
    pub venue_id: i64,
    pub match_date: NaiveDate,
    pub match_type: MatchType,
    pub status: MatchStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    pub id: i64,
    pub description: Option<String>,
    pub team1_id: Option<i64>,
    pub team2_id: Option<i64>,
    pub venue_id: Option<i64>,
    pub match_date: Option<String>,
    pub match_type: Option<String>,
    pub status: Option<String>,
    pub winning_team_id: Option<i64>,
    pub win_margin: Option<i64>,
    pub win_type: Option<String>,
    pub toss_winner_id: Option<i64>,
    pub toss_decision: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTeam {
    pub name: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVenue {
    pub name: String,
    pub city: String,
    pub country: String,
    pub capacity: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerStat {
    pub player_id: i64,
    pub format: MatchType,
    pub matches_played: i64,
    pub runs: i64,
    pub wickets: i64,
    pub centuries: i64,
    pub batting_average: Option<f64>,
    pub bowling_average: Option<f64>,
    pub strike_rate: Option<f64>,
    pub economy: Option<f64>,
}

pub fn insert_player(db: &Database, player: &NewPlayer) -> Result<i64> {
    let conn = db.connect()?;
    conn.execute(
        "INSERT INTO players (first_name, last_name, country, playing_role, batting_style, bowling_style)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            player.first_name,
            player.last_name,
            player.country,
            player.playing_role,
            player.batting_style,
            player.bowling_style
        ],
    )
    .context("insert player")?;
    let id = conn.last_insert_rowid();
    log::info!("player {id} created");
    Ok(id)
}

pub fn recent_players(db: &Database) -> Result<Vec<Player>> {
    let conn = db.connect()?;
    let mut stmt = conn
        .prepare(
            "SELECT id, first_name, last_name, country, playing_role, batting_style, bowling_style
             FROM players ORDER BY id DESC LIMIT ?1",
        )
        .context("prepare recent players query")?;
    let rows = stmt
        .query_map(params![RECENT_ROW_LIMIT as i64], player_from_row)
        .context("query recent players")?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row.context("read player row")?);
    }
    Ok(out)
}

fn player_from_row(row: &Row<'_>) -> rusqlite::Result<Player> {
    Ok(Player {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        country: row.get(3)?,
        playing_role: row.get(4)?,
        batting_style: row.get(5)?,
        bowling_style: row.get(6)?,
    })
}

/// Outcome columns (winner, margin, toss) are left NULL.
pub fn insert_match(db: &Database, m: &NewMatch) -> Result<i64> {
    let conn = db.connect()?;
    conn.execute(
        "INSERT INTO matches (description, team1_id, team2_id, venue_id, match_date, match_type, status)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            m.description,
            m.team1_id,
            m.team2_id,
            m.venue_id,
            m.match_date.format("%Y-%m-%d").to_string(),
            m.match_type.as_str(),
            m.status.as_str()
        ],
    )
    .context("insert match")?;
    let id = conn.last_insert_rowid();
    log::info!("match {id} created");
    Ok(id)
}

pub fn recent_matches(db: &Database) -> Result<Vec<MatchRecord>> {
    let conn = db.connect()?;
    let mut stmt = conn
        .prepare(
            "SELECT id, description, team1_id, team2_id, venue_id, match_date, match_type, status,
                    winning_team_id, win_margin, win_type, toss_winner_id, toss_decision
             FROM matches ORDER BY id DESC LIMIT ?1",
        )
        .context("prepare recent matches query")?;
    let rows = stmt
        .query_map(params![RECENT_ROW_LIMIT as i64], |row| {
            Ok(MatchRecord {
                id: row.get(0)?,
                description: row.get(1)?,
                team1_id: row.get(2)?,
                team2_id: row.get(3)?,
                venue_id: row.get(4)?,
                match_date: row.get(5)?,
                match_type: row.get(6)?,
                status: row.get(7)?,
                winning_team_id: row.get(8)?,
                win_margin: row.get(9)?,
                win_type: row.get(10)?,
                toss_winner_id: row.get(11)?,
                toss_decision: row.get(12)?,
            })
        })
        .context("query recent matches")?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row.context("read match row")?);
    }
    Ok(out)
}

pub fn insert_team(db: &Database, team: &NewTeam) -> Result<i64> {
    let conn = db.connect()?;
    conn.execute(
        "INSERT INTO teams (name, country) VALUES (?1, ?2)",
        params![team.name, team.country],
    )
    .context("insert team")?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_venue(db: &Database, venue: &NewVenue) -> Result<i64> {
    let conn = db.connect()?;
    conn.execute(
        "INSERT INTO venues (name, city, country, capacity) VALUES (?1, ?2, ?3, ?4)",
        params![venue.name, venue.city, venue.country, venue.capacity],
    )
    .context("insert venue")?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_player_stat(db: &Database, stat: &PlayerStat) -> Result<()> {
    let conn = db.connect()?;
    conn.execute(
        "INSERT INTO player_stats (player_id, format, matches_played, runs, wickets, centuries,
                                   batting_average, bowling_average, strike_rate, economy)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            stat.player_id,
            stat.format.as_str(),
            stat.matches_played,
            stat.runs,
            stat.wickets,
            stat.centuries,
            stat.batting_average,
            stat.bowling_average,
            stat.strike_rate,
            stat.economy
        ],
    )
    .context("insert player stat")?;
    Ok(())
}

fn text_cell(value: &Option<String>) -> Cell {
    value.clone().map(Cell::Text).unwrap_or(Cell::Null)
}

fn int_cell(value: Option<i64>) -> Cell {
    value.map(Cell::Integer).unwrap_or(Cell::Null)
}

pub fn players_table(players: &[Player]) -> Table {
    let mut table = Table::new(
        [
            "id",
            "first_name",
            "last_name",
            "country",
            "playing_role",
            "batting_style",
            "bowling_style",
        ]
        .iter()
        .map(|c| c.to_string())
        .collect(),
    );
    for p in players {
        table.rows.push(vec![
            Cell::Integer(p.id),
            text_cell(&p.first_name),
            text_cell(&p.last_name),
            text_cell(&p.country),
            text_cell(&p.playing_role),
            text_cell(&p.batting_style),
            text_cell(&p.bowling_style),
        ]);
    }
    table
}

pub fn matches_table(matches: &[MatchRecord]) -> Table {
    let mut table = Table::new(
        [
            "id",
            "description",
            "team1_id",
            "team2_id",
            "venue_id",
            "match_date",
            "match_type",
            "status",
            "winning_team_id",
            "win_margin",
            "win_type",
            "toss_winner_id",
            "toss_decision",
        ]
        .iter()
        .map(|c| c.to_string())
        .collect(),
    );
    for m in matches {
        table.rows.push(vec![
            Cell::Integer(m.id),
            text_cell(&m.description),
            int_cell(m.team1_id),
            int_cell(m.team2_id),
            int_cell(m.venue_id),
            text_cell(&m.match_date),
            text_cell(&m.match_type),
            text_cell(&m.status),
            int_cell(m.winning_team_id),
            int_cell(m.win_margin),
            text_cell(&m.win_type),
            int_cell(m.toss_winner_id),
            text_cell(&m.toss_decision),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enum_spellings_round_trip() {
        for t in MatchType::ALL {
            assert_eq!(t.as_str().parse::<MatchType>(), Ok(t));
        }
        for s in MatchStatus::ALL {
            assert_eq!(s.as_str().parse::<MatchStatus>(), Ok(s));
        }
        assert_eq!("odi".parse::<MatchType>(), Ok(MatchType::Odi));
        assert!("Hundred".parse::<MatchType>().is_err());
        assert!("In Progress".parse::<MatchStatus>().is_err());
    }

    #[test]
    fn cycling_visits_every_variant() {
        let mut t = MatchType::default();
        let mut seen = Vec::new();
        for _ in 0..3 {
            seen.push(t);
            t = t.next();
        }
        assert_eq!(seen, MatchType::ALL.to_vec());
        assert_eq!(t, MatchType::Test);
        assert_eq!(MatchStatus::Completed.next(), MatchStatus::Scheduled);
    }
}
