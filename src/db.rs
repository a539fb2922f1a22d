use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rusqlite::{Connection, OpenFlags};

/// Handle to the single-file cricket database.
///
/// Holds only the path; every operation acquires its own connection through
/// [`Database::connect`] and drops it when the operation ends.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    /// Creates the parent directory if needed and ensures the schema exists.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create data dir {}", parent.display()))?;
            }
        }
        let db = Self { path };
        let conn = db.connect()?;
        init_schema(&conn)?;
        log::debug!("database ready at {}", db.path.display());
        Ok(db)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn connect(&self) -> Result<Connection> {
        Connection::open(&self.path)
            .with_context(|| format!("open sqlite db {}", self.path.display()))
    }

    pub fn connect_read_only(&self) -> Result<Connection> {
        Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_context(|| format!("open sqlite db {} read-only", self.path.display()))
    }
}

pub const TABLE_NAMES: [&str; 6] = [
    "players",
    "teams",
    "venues",
    "matches",
    "player_stats",
    "performances",
];

/// Idempotent: existing tables and rows are left untouched.
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS players (
            id INTEGER PRIMARY KEY,
            first_name TEXT,
            last_name TEXT,
            country TEXT,
            playing_role TEXT,
            batting_style TEXT,
            bowling_style TEXT
        );

        CREATE TABLE IF NOT EXISTS teams (
            id INTEGER PRIMARY KEY,
            name TEXT,
            country TEXT
        );

        CREATE TABLE IF NOT EXISTS venues (
            id INTEGER PRIMARY KEY,
            name TEXT,
            city TEXT,
            country TEXT,
            capacity INTEGER
        );

        CREATE TABLE IF NOT EXISTS matches (
            id INTEGER PRIMARY KEY,
            description TEXT,
            team1_id INTEGER,
            team2_id INTEGER,
            venue_id INTEGER,
            match_date TEXT,
            match_type TEXT,
            status TEXT,
            winning_team_id INTEGER,
            win_margin INTEGER,
            win_type TEXT,
            toss_winner_id INTEGER,
            toss_decision TEXT
        );

        CREATE TABLE IF NOT EXISTS player_stats (
            player_id INTEGER,
            format TEXT,
            matches_played INTEGER,
            runs INTEGER,
            wickets INTEGER,
            centuries INTEGER,
            batting_average REAL,
            bowling_average REAL,
            strike_rate REAL,
            economy REAL
        );

        CREATE TABLE IF NOT EXISTS performances (
            match_id INTEGER,
            player_id INTEGER,
            team_id INTEGER,
            runs_scored INTEGER,
            balls_faced INTEGER,
            batting_position INTEGER,
            overs_bowled REAL,
            runs_conceded INTEGER,
            wickets_taken INTEGER,
            catches INTEGER,
            stumpings INTEGER,
            innings_number INTEGER
        );
        "#,
    )
    .context("create sqlite schema")?;
    Ok(())
}
