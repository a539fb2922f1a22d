use anyhow::{Context, Result};

use crate::db::Database;
use crate::table::{Cell, Table};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CannedQuery {
    pub id: u32,
    pub title: &'static str,
    pub sql: &'static str,
}

pub const CANNED_QUERIES: &[CannedQuery] = &[
    CannedQuery {
        id: 1,
        title: "Players from India",
        sql: r#"
SELECT id, first_name || ' ' || last_name AS full_name, playing_role, batting_style, bowling_style
FROM players WHERE country = 'India';
"#,
    },
    CannedQuery {
        id: 2,
        title: "Matches in the last 30 days",
        sql: r#"
SELECT m.description, t1.name AS team1, t2.name AS team2, v.name AS venue_name, v.city, m.match_date
FROM matches m
JOIN teams t1 ON m.team1_id = t1.id
JOIN teams t2 ON m.team2_id = t2.id
JOIN venues v ON m.venue_id = v.id
WHERE DATE(m.match_date) >= DATE('now','-30 days') ORDER BY m.match_date DESC;
"#,
    },
];

pub const TOP_RUN_SCORERS_SQL: &str = r#"
SELECT p.first_name || ' ' || p.last_name AS player, SUM(ps.runs) AS total_runs
FROM player_stats ps JOIN players p ON ps.player_id = p.id
GROUP BY ps.player_id ORDER BY total_runs DESC LIMIT 10;
"#;

pub const TOP_WICKET_TAKERS_SQL: &str = r#"
SELECT p.first_name || ' ' || p.last_name AS player, SUM(ps.wickets) AS total_wickets
FROM player_stats ps JOIN players p ON ps.player_id = p.id
GROUP BY ps.player_id ORDER BY total_wickets DESC LIMIT 10;
"#;

pub fn canned_query(id: u32) -> Option<&'static CannedQuery> {
    CANNED_QUERIES.iter().find(|q| q.id == id)
}

/// Result of a read query. Failures are data, never a propagated error.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    Rows(Table),
    Failed { message: String },
}

impl QueryOutcome {
    pub fn table(&self) -> Option<&Table> {
        match self {
            QueryOutcome::Rows(table) => Some(table),
            QueryOutcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            QueryOutcome::Rows(_) => None,
            QueryOutcome::Failed { message } => Some(message.as_str()),
        }
    }
}

/// Runs a developer-authored read query on a read-only connection.
pub fn run_query(db: &Database, sql: &str) -> QueryOutcome {
    match read_table(db, sql) {
        Ok(table) => {
            log::debug!("query returned {} rows", table.rows.len());
            QueryOutcome::Rows(table)
        }
        Err(err) => {
            log::warn!("query failed: {err:#}");
            QueryOutcome::Failed {
                message: root_message(&err),
            }
        }
    }
}

fn read_table(db: &Database, sql: &str) -> Result<Table> {
    let conn = db.connect_read_only()?;
    let mut stmt = conn.prepare(sql).context("prepare query")?;
    let columns = stmt
        .column_names()
        .into_iter()
        .map(str::to_string)
        .collect::<Vec<_>>();
    let width = columns.len();

    let mut table = Table::new(columns);
    let mut rows = stmt.query([]).context("run query")?;
    while let Some(row) = rows.next().context("read query row")? {
        let mut cells = Vec::with_capacity(width);
        for idx in 0..width {
            cells.push(Cell::from_sql(row.get_ref(idx).context("read query cell")?));
        }
        table.rows.push(cells);
    }
    Ok(table)
}

// Context layers are for the log; the UI shows the engine's own message.
fn root_message(err: &anyhow::Error) -> String {
    match err.downcast_ref::<rusqlite::Error>() {
        Some(sql_err) => sql_err.to_string(),
        None => format!("{err:#}"),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TopStats {
    pub runs: QueryOutcome,
    pub wickets: QueryOutcome,
}

impl TopStats {
    /// `(panel, message)` for every query that failed.
    pub fn failures(&self) -> Vec<(&'static str, &str)> {
        [("runs", &self.runs), ("wickets", &self.wickets)]
            .into_iter()
            .filter_map(|(panel, outcome)| outcome.error().map(|msg| (panel, msg)))
            .collect()
    }
}

pub fn top_player_stats(db: &Database) -> TopStats {
    TopStats {
        runs: run_query(db, TOP_RUN_SCORERS_SQL),
        wickets: run_query(db, TOP_WICKET_TAKERS_SQL),
    }
}
