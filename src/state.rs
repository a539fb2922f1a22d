use std::collections::VecDeque;
use std::path::PathBuf;

use chrono::{NaiveDate, Utc};
use thiserror::Error;

use crate::crud::{MatchStatus, MatchType, NewMatch, NewPlayer};
use crate::live_feed::LiveFeed;
use crate::queries::{CANNED_QUERIES, CannedQuery, QueryOutcome, TopStats};
use crate::table::Table;

const MAX_LOGS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    LiveMatches,
    TopPlayerStats,
    SqlQueries,
    Crud,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Page::Home,
        Page::LiveMatches,
        Page::TopPlayerStats,
        Page::SqlQueries,
        Page::Crud,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::LiveMatches => "Live Matches",
            Page::TopPlayerStats => "Top Player Stats",
            Page::SqlQueries => "SQL Queries & Analytics",
            Page::Crud => "CRUD Operations",
        }
    }

    /// '1'..='5' select a page.
    pub fn from_digit(c: char) -> Option<Page> {
        let idx = c.to_digit(10)? as usize;
        idx.checked_sub(1).and_then(|i| Page::ALL.get(i).copied())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrudEntity {
    Players,
    Matches,
}

impl CrudEntity {
    pub fn toggle(self) -> Self {
        match self {
            CrudEntity::Players => CrudEntity::Matches,
            CrudEntity::Matches => CrudEntity::Players,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CrudEntity::Players => "players",
            CrudEntity::Matches => "matches",
        }
    }

    pub fn singular(self) -> &'static str {
        match self {
            CrudEntity::Players => "player",
            CrudEntity::Matches => "match",
        }
    }
}

/// What keystrokes are routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    LiveUrl,
    Form,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("{field} must be a whole number >= 1 (got '{value}')")]
    InvalidId { field: &'static str, value: String },
    #[error("match date must be YYYY-MM-DD (got '{0}')")]
    InvalidDate(String),
}

pub const PLAYER_FIELDS: [&str; 6] = [
    "First name",
    "Last name",
    "Country",
    "Playing role",
    "Batting style",
    "Bowling style",
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerForm {
    pub values: [String; 6],
    pub focus: usize,
}

impl PlayerForm {
    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % PLAYER_FIELDS.len();
    }

    pub fn focus_prev(&mut self) {
        self.focus = (self.focus + PLAYER_FIELDS.len() - 1) % PLAYER_FIELDS.len();
    }

    pub fn input_char(&mut self, c: char) {
        self.values[self.focus].push(c);
    }

    pub fn backspace(&mut self) {
        self.values[self.focus].pop();
    }

    /// Free text, nothing validated; empty strings are stored as-is.
    pub fn to_new_player(&self) -> NewPlayer {
        let [first_name, last_name, country, playing_role, batting_style, bowling_style] =
            self.values.clone();
        NewPlayer {
            first_name,
            last_name,
            country,
            playing_role,
            batting_style,
            bowling_style,
        }
    }
}

pub const MATCH_FIELDS: [&str; 7] = [
    "Description",
    "Team 1 ID",
    "Team 2 ID",
    "Venue ID",
    "Match date",
    "Match type",
    "Status",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchForm {
    pub description: String,
    pub team1_id: String,
    pub team2_id: String,
    pub venue_id: String,
    pub match_date: String,
    pub match_type: MatchType,
    pub status: MatchStatus,
    pub focus: usize,
}

impl MatchForm {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            description: String::new(),
            team1_id: "1".to_string(),
            team2_id: "2".to_string(),
            venue_id: "1".to_string(),
            match_date: today.format("%Y-%m-%d").to_string(),
            match_type: MatchType::default(),
            status: MatchStatus::default(),
            focus: 0,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % MATCH_FIELDS.len();
    }

    pub fn focus_prev(&mut self) {
        self.focus = (self.focus + MATCH_FIELDS.len() - 1) % MATCH_FIELDS.len();
    }

    fn text_field(&mut self) -> Option<&mut String> {
        match self.focus {
            0 => Some(&mut self.description),
            1 => Some(&mut self.team1_id),
            2 => Some(&mut self.team2_id),
            3 => Some(&mut self.venue_id),
            4 => Some(&mut self.match_date),
            _ => None,
        }
    }

    /// Typing on an enum field cycles it instead.
    pub fn input_char(&mut self, c: char) {
        match self.text_field() {
            Some(field) => field.push(c),
            None => self.cycle_choice(),
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.text_field() {
            field.pop();
        }
    }

    pub fn cycle_choice(&mut self) {
        match self.focus {
            5 => self.match_type = self.match_type.next(),
            6 => self.status = self.status.next(),
            _ => {}
        }
    }

    pub fn field_value(&self, idx: usize) -> String {
        match idx {
            0 => self.description.clone(),
            1 => self.team1_id.clone(),
            2 => self.team2_id.clone(),
            3 => self.venue_id.clone(),
            4 => self.match_date.clone(),
            5 => self.match_type.to_string(),
            _ => self.status.to_string(),
        }
    }

    pub fn to_new_match(&self) -> Result<NewMatch, FormError> {
        let match_date = NaiveDate::parse_from_str(self.match_date.trim(), "%Y-%m-%d")
            .map_err(|_| FormError::InvalidDate(self.match_date.clone()))?;
        Ok(NewMatch {
            description: self.description.clone(),
            team1_id: parse_id("Team 1 ID", &self.team1_id)?,
            team2_id: parse_id("Team 2 ID", &self.team2_id)?,
            venue_id: parse_id("Venue ID", &self.venue_id)?,
            match_date,
            match_type: self.match_type,
            status: self.status,
        })
    }
}

fn parse_id(field: &'static str, raw: &str) -> Result<i64, FormError> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|id| *id >= 1)
        .ok_or_else(|| FormError::InvalidId {
            field,
            value: raw.to_string(),
        })
}

pub struct AppState {
    pub page: Page,
    pub input_mode: InputMode,
    pub help_overlay: bool,
    pub logs: VecDeque<String>,
    pub db_path: PathBuf,
    pub sample_csv: PathBuf,
    pub ingest_summary: Option<String>,

    pub live_url: String,
    pub live_feed: Option<LiveFeed>,
    pub live_selected: usize,

    pub top_stats: Option<TopStats>,

    pub query_selected: usize,
    pub query_result: Option<(u32, QueryOutcome)>,
    pub last_export: Option<PathBuf>,

    pub crud_entity: CrudEntity,
    pub player_form: PlayerForm,
    pub match_form: MatchForm,
    pub crud_view: Option<Result<Table, String>>,
    pub crud_scroll: usize,
}

impl AppState {
    pub fn new(db_path: PathBuf, sample_csv: PathBuf, live_url: String) -> Self {
        Self {
            page: Page::Home,
            input_mode: InputMode::Normal,
            help_overlay: false,
            logs: VecDeque::new(),
            db_path,
            sample_csv,
            ingest_summary: None,
            live_url,
            live_feed: None,
            live_selected: 0,
            top_stats: None,
            query_selected: 0,
            query_result: None,
            last_export: None,
            crud_entity: CrudEntity::Players,
            player_form: PlayerForm::default(),
            match_form: MatchForm::new(Utc::now().date_naive()),
            crud_view: None,
            crud_scroll: 0,
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    pub fn selected_query(&self) -> &'static CannedQuery {
        &CANNED_QUERIES[self.query_selected.min(CANNED_QUERIES.len() - 1)]
    }

    pub fn select_next_query(&mut self) {
        self.query_selected = (self.query_selected + 1) % CANNED_QUERIES.len();
    }

    pub fn select_prev_query(&mut self) {
        self.query_selected = (self.query_selected + CANNED_QUERIES.len() - 1) % CANNED_QUERIES.len();
    }

    pub fn live_record_count(&self) -> usize {
        self.live_feed
            .as_ref()
            .map(|feed| feed.records().len())
            .unwrap_or(0)
    }

    pub fn select_next_live(&mut self) {
        let total = self.live_record_count();
        if total == 0 {
            self.live_selected = 0;
            return;
        }
        self.live_selected = (self.live_selected + 1).min(total - 1);
    }

    pub fn select_prev_live(&mut self) {
        self.live_selected = self.live_selected.saturating_sub(1);
    }

    pub fn set_live_feed(&mut self, feed: LiveFeed) {
        self.live_selected = 0;
        self.live_feed = Some(feed);
    }

    pub fn set_crud_entity(&mut self, entity: CrudEntity) {
        if self.crud_entity != entity {
            self.crud_entity = entity;
            self.crud_view = None;
            self.crud_scroll = 0;
        }
    }

    pub fn scroll_crud_down(&mut self) {
        let total = match &self.crud_view {
            Some(Ok(table)) => table.rows.len(),
            _ => 0,
        };
        if self.crud_scroll + 1 < total {
            self.crud_scroll += 1;
        }
    }

    pub fn scroll_crud_up(&mut self) {
        self.crud_scroll = self.crud_scroll.saturating_sub(1);
    }

    pub fn form_focus_next(&mut self) {
        match self.crud_entity {
            CrudEntity::Players => self.player_form.focus_next(),
            CrudEntity::Matches => self.match_form.focus_next(),
        }
    }

    pub fn form_focus_prev(&mut self) {
        match self.crud_entity {
            CrudEntity::Players => self.player_form.focus_prev(),
            CrudEntity::Matches => self.match_form.focus_prev(),
        }
    }

    pub fn form_input_char(&mut self, c: char) {
        match self.crud_entity {
            CrudEntity::Players => self.player_form.input_char(c),
            CrudEntity::Matches => self.match_form.input_char(c),
        }
    }

    pub fn form_backspace(&mut self) {
        match self.crud_entity {
            CrudEntity::Players => self.player_form.backspace(),
            CrudEntity::Matches => self.match_form.backspace(),
        }
    }
}
