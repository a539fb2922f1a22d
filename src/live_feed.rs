use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::http_client::http_client;
use crate::table::{Cell, Table};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveMatchSummary {
    pub match_id: u32,
    pub description: String,
    pub team1: String,
    pub team2: String,
    pub venue: String,
    pub status: String,
    pub score: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LiveFeed {
    /// No endpoint configured.
    Mock(Vec<LiveMatchSummary>),
    /// Body of a successful GET, not validated against any shape.
    Remote(Value),
    Failed { error: String },
}

impl LiveFeed {
    pub fn is_failed(&self) -> bool {
        matches!(self, LiveFeed::Failed { .. })
    }

    pub fn records(&self) -> Vec<Value> {
        match self {
            LiveFeed::Mock(rows) => rows
                .iter()
                .filter_map(|row| serde_json::to_value(row).ok())
                .collect(),
            LiveFeed::Remote(Value::Array(items)) => items.clone(),
            LiveFeed::Remote(Value::Null) => Vec::new(),
            LiveFeed::Remote(other) => vec![other.clone()],
            LiveFeed::Failed { .. } => Vec::new(),
        }
    }

    /// Pretty JSON of one record, for the detail pane.
    pub fn record_json(&self, idx: usize) -> Option<String> {
        let record = self.records().into_iter().nth(idx)?;
        serde_json::to_string_pretty(&record).ok()
    }

    /// Label for a record picker: `description` when present, else the index.
    pub fn record_label(&self, idx: usize) -> String {
        self.records()
            .get(idx)
            .and_then(|r| r.get("description"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("record {idx}"))
    }

    pub fn to_table(&self) -> Table {
        match self {
            LiveFeed::Failed { error } => Table {
                columns: vec!["error".to_string()],
                rows: vec![vec![Cell::Text(error.clone())]],
            },
            LiveFeed::Mock(rows) => mock_table(rows),
            LiveFeed::Remote(_) => records_to_table(&self.records()),
        }
    }
}

fn mock_table(rows: &[LiveMatchSummary]) -> Table {
    let columns = [
        "match_id",
        "description",
        "team1",
        "team2",
        "venue",
        "status",
        "score",
    ];
    let mut table = Table::new(columns.iter().map(|c| c.to_string()).collect());
    for row in rows {
        table.rows.push(vec![
            Cell::Integer(i64::from(row.match_id)),
            Cell::Text(row.description.clone()),
            Cell::Text(row.team1.clone()),
            Cell::Text(row.team2.clone()),
            Cell::Text(row.venue.clone()),
            Cell::Text(row.status.clone()),
            row.score.clone().map(Cell::Text).unwrap_or(Cell::Null),
        ]);
    }
    table
}

/// Empty (or blank) `url` returns the mock payload; otherwise one GET.
pub fn fetch_live_matches(url: &str) -> LiveFeed {
    if url.trim().is_empty() {
        return LiveFeed::Mock(mock_matches());
    }
    match http_client() {
        Ok(client) => fetch_live_matches_with(client, url),
        Err(err) => LiveFeed::Failed {
            error: format!("{err:#}"),
        },
    }
}

pub fn fetch_live_matches_with(client: &Client, url: &str) -> LiveFeed {
    let url = url.trim();
    if url.is_empty() {
        return LiveFeed::Mock(mock_matches());
    }
    match fetch_json(client, url) {
        Ok(body) => {
            log::info!("live feed fetched from {url}");
            LiveFeed::Remote(body)
        }
        Err(err) => {
            log::warn!("live feed fetch from {url} failed: {err:#}");
            LiveFeed::Failed {
                error: format!("{err:#}"),
            }
        }
    }
}

fn fetch_json(client: &Client, url: &str) -> Result<Value> {
    let resp = client.get(url).send().context("request failed")?;
    let resp = resp.error_for_status().context("bad status")?;
    resp.json::<Value>().context("invalid json body")
}

pub fn mock_matches() -> Vec<LiveMatchSummary> {
    vec![
        LiveMatchSummary {
            match_id: 1,
            description: "India vs Australia - 2nd ODI".to_string(),
            team1: "India".to_string(),
            team2: "Australia".to_string(),
            venue: "Eden Gardens, Kolkata".to_string(),
            status: "In Progress".to_string(),
            score: Some("India 220/3 (36.4 ov)".to_string()),
        },
        LiveMatchSummary {
            match_id: 2,
            description: "England vs Pakistan - T20I".to_string(),
            team1: "England".to_string(),
            team2: "Pakistan".to_string(),
            venue: "Lords, London".to_string(),
            status: "Delayed".to_string(),
            score: None,
        },
    ]
}

fn records_to_table(records: &[Value]) -> Table {
    let objects = records
        .iter()
        .filter_map(Value::as_object)
        .collect::<Vec<&Map<String, Value>>>();
    if objects.len() != records.len() {
        let mut table = Table::new(vec!["value".to_string()]);
        table.rows = records.iter().map(|v| vec![Cell::from_json(v)]).collect();
        return table;
    }

    let mut columns: Vec<String> = Vec::new();
    for obj in &objects {
        for key in obj.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
    }
    let rows = objects
        .iter()
        .map(|obj| {
            columns
                .iter()
                .map(|col| obj.get(col).map(Cell::from_json).unwrap_or(Cell::Null))
                .collect()
        })
        .collect();
    Table { columns, rows }
}
