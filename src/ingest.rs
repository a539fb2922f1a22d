//! Best-effort loader for the optional sample players spreadsheet.
//!
//! Headers are loosely named in the wild (`Player`, `NAME`, `playing_role`...),
//! so each target column is located through an ordered list of candidate
//! names. The loader never fails startup: every problem is reported through
//! [`IngestOutcome`] for the caller to log once.

use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rusqlite::params_from_iter;

use crate::db::Database;

const NAME_CANDIDATES: &[&str] = &["player", "name", "player_name"];
const COUNTRY_CANDIDATES: &[&str] = &["country"];
const ROLE_CANDIDATES: &[&str] = &["role", "playing_role"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedPlayer {
    pub first_name: String,
    pub last_name: String,
    pub country: Option<String>,
    pub playing_role: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedBatch {
    /// Target `players` columns that were found in the source, in insert order.
    pub columns: Vec<&'static str>,
    pub rows: Vec<NormalizedPlayer>,
    pub rows_read: usize,
    pub duplicates_dropped: usize,
}

impl NormalizedBatch {
    pub fn has_name_column(&self) -> bool {
        self.columns.contains(&"first_name")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestReport {
    pub path: PathBuf,
    pub columns: Vec<&'static str>,
    pub rows_read: usize,
    pub rows_inserted: usize,
    pub duplicates_dropped: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    FileMissing(PathBuf),
    NoNameColumn(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    Loaded(IngestReport),
    Skipped(SkipReason),
    Failed { path: PathBuf, reason: String },
}

impl IngestOutcome {
    pub fn rows_inserted(&self) -> usize {
        match self {
            IngestOutcome::Loaded(report) => report.rows_inserted,
            _ => 0,
        }
    }

    /// Writes the outcome to the log facade; the single place ingestion is reported.
    pub fn log(&self) {
        match self {
            IngestOutcome::Loaded(_) => log::info!("{self}"),
            IngestOutcome::Skipped(_) => log::info!("{self}"),
            IngestOutcome::Failed { .. } => log::warn!("{self}"),
        }
    }
}

impl fmt::Display for IngestOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IngestOutcome::Loaded(report) => write!(
                f,
                "sample CSV {} loaded: {} of {} rows inserted ({} duplicates dropped; columns: {})",
                report.path.display(),
                report.rows_inserted,
                report.rows_read,
                report.duplicates_dropped,
                report.columns.join(", ")
            ),
            IngestOutcome::Skipped(SkipReason::FileMissing(path)) => {
                write!(f, "sample CSV {} not found, skipped", path.display())
            }
            IngestOutcome::Skipped(SkipReason::NoNameColumn(path)) => write!(
                f,
                "sample CSV {} has no player/name column, nothing inserted",
                path.display()
            ),
            IngestOutcome::Failed { path, reason } => {
                write!(f, "sample CSV {} failed to load: {reason}", path.display())
            }
        }
    }
}

/// Loads the sample spreadsheet into `players`. Never returns an error.
pub fn load_sample_players(db: &Database, path: &Path) -> IngestOutcome {
    if !path.exists() {
        return IngestOutcome::Skipped(SkipReason::FileMissing(path.to_path_buf()));
    }
    if !path.is_file() {
        return IngestOutcome::Failed {
            path: path.to_path_buf(),
            reason: "not a regular file".to_string(),
        };
    }
    match try_load(db, path) {
        Ok(outcome) => outcome,
        Err(err) => IngestOutcome::Failed {
            path: path.to_path_buf(),
            reason: format!("{err:#}"),
        },
    }
}

fn try_load(db: &Database, path: &Path) -> Result<IngestOutcome> {
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let batch = normalize_players(file)?;
    if !batch.has_name_column() {
        return Ok(IngestOutcome::Skipped(SkipReason::NoNameColumn(
            path.to_path_buf(),
        )));
    }
    let rows_inserted = insert_batch(db, &batch)?;
    Ok(IngestOutcome::Loaded(IngestReport {
        path: path.to_path_buf(),
        columns: batch.columns.clone(),
        rows_read: batch.rows_read,
        rows_inserted,
        duplicates_dropped: batch.duplicates_dropped,
    }))
}

/// Parses and normalizes a players CSV without touching the database.
pub fn normalize_players<R: Read>(rdr: R) -> Result<NormalizedBatch> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(rdr);
    let headers = reader
        .headers()
        .context("read csv header")?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect::<Vec<_>>();

    let name_idx = find_column(&headers, NAME_CANDIDATES);
    let country_idx = find_column(&headers, COUNTRY_CANDIDATES);
    let role_idx = find_column(&headers, ROLE_CANDIDATES);

    let mut columns = Vec::new();
    if name_idx.is_some() {
        columns.extend(["first_name", "last_name"]);
    }
    if country_idx.is_some() {
        columns.push("country");
    }
    if role_idx.is_some() {
        columns.push("playing_role");
    }

    let mut rows = Vec::new();
    let mut seen = HashSet::new();
    let mut rows_read = 0usize;
    let mut duplicates_dropped = 0usize;
    for (line, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("read csv record {}", line + 1))?;
        rows_read += 1;
        let Some(name_idx) = name_idx else {
            continue;
        };

        let (first_name, last_name) = split_name(record.get(name_idx).unwrap_or_default());
        if !seen.insert((first_name.clone(), last_name.clone())) {
            duplicates_dropped += 1;
            continue;
        }
        rows.push(NormalizedPlayer {
            first_name,
            last_name,
            country: country_idx.and_then(|idx| optional_cell(record.get(idx))),
            playing_role: role_idx.and_then(|idx| optional_cell(record.get(idx))),
        });
    }

    Ok(NormalizedBatch {
        columns,
        rows,
        rows_read,
        duplicates_dropped,
    })
}

/// First candidate (in priority order) present among the lower-cased headers.
pub fn find_column(headers: &[String], candidates: &[&str]) -> Option<usize> {
    candidates
        .iter()
        .find_map(|candidate| headers.iter().position(|h| h == candidate))
}

/// "Virat Kohli" -> ("Virat", "Kohli"); "Kohli" -> ("Kohli", "").
/// A value with no tokens is kept verbatim as the first name.
pub fn split_name(raw: &str) -> (String, String) {
    let mut tokens = raw.split_whitespace();
    match tokens.next() {
        Some(first) => (first.to_string(), tokens.collect::<Vec<_>>().join(" ")),
        None => (raw.to_string(), String::new()),
    }
}

fn optional_cell(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn insert_batch(db: &Database, batch: &NormalizedBatch) -> Result<usize> {
    if batch.rows.is_empty() {
        return Ok(0);
    }
    let placeholders = (1..=batch.columns.len())
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!(
        "INSERT INTO players ({}) VALUES ({placeholders})",
        batch.columns.join(", ")
    );

    let mut conn = db.connect()?;
    let tx = conn.transaction().context("begin players ingest")?;
    {
        let mut stmt = tx.prepare(&sql).context("prepare players insert")?;
        for row in &batch.rows {
            let values = batch.columns.iter().map(|col| match *col {
                "first_name" => Some(row.first_name.as_str()),
                "last_name" => Some(row.last_name.as_str()),
                "country" => row.country.as_deref(),
                _ => row.playing_role.as_deref(),
            });
            stmt.execute(params_from_iter(values))
                .with_context(|| format!("insert player {} {}", row.first_name, row.last_name))?;
        }
    }
    tx.commit().context("commit players ingest")?;
    Ok(batch.rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|h| h.to_string()).collect()
    }

    #[test]
    fn split_name_handles_token_counts() {
        assert_eq!(split_name("Virat Kohli"), ("Virat".into(), "Kohli".into()));
        assert_eq!(split_name("Kohli"), ("Kohli".into(), String::new()));
        assert_eq!(
            split_name("  AB  de   Villiers "),
            ("AB".into(), "de Villiers".into())
        );
        assert_eq!(split_name("   "), ("   ".into(), String::new()));
        assert_eq!(split_name(""), (String::new(), String::new()));
    }

    #[test]
    fn find_column_prefers_candidate_order() {
        let cols = headers(&["name", "team", "player"]);
        assert_eq!(find_column(&cols, NAME_CANDIDATES), Some(2));
        let cols = headers(&["player_name", "playing_role"]);
        assert_eq!(find_column(&cols, NAME_CANDIDATES), Some(0));
        assert_eq!(find_column(&cols, ROLE_CANDIDATES), Some(1));
        assert_eq!(find_column(&cols, COUNTRY_CANDIDATES), None);
    }

    #[test]
    fn normalize_lowercases_headers_and_drops_duplicates() {
        let raw = "Player,COUNTRY,Role\nVirat Kohli,India,Batsman\nVirat Kohli,India,Batter\nKohli,,\n";
        let batch = normalize_players(raw.as_bytes()).unwrap();
        assert_eq!(
            batch.columns,
            vec!["first_name", "last_name", "country", "playing_role"]
        );
        assert_eq!(batch.rows_read, 3);
        assert_eq!(batch.duplicates_dropped, 1);
        assert_eq!(batch.rows.len(), 2);
        assert_eq!(batch.rows[0].playing_role.as_deref(), Some("Batsman"));
        assert_eq!(batch.rows[1].first_name, "Kohli");
        assert_eq!(batch.rows[1].last_name, "");
        assert_eq!(batch.rows[1].country, None);
    }

    #[test]
    fn normalize_without_name_column_is_empty() {
        let raw = "country,role\nIndia,Bowler\n";
        let batch = normalize_players(raw.as_bytes()).unwrap();
        assert!(!batch.has_name_column());
        assert!(batch.rows.is_empty());
        assert_eq!(batch.columns, vec!["country", "playing_role"]);
    }
}
