use std::fs::File;
use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{
    Bar, BarChart, BarGroup, Block, Borders, Cell as TuiCell, Clear, Paragraph, Row,
    Table as TuiTable, Wrap,
};
use reqwest::blocking::Client;

use cricket_terminal::config::AppConfig;
use cricket_terminal::crud;
use cricket_terminal::db::Database;
use cricket_terminal::export;
use cricket_terminal::http_client;
use cricket_terminal::ingest;
use cricket_terminal::live_feed::{self, LiveFeed};
use cricket_terminal::queries::{self, CANNED_QUERIES, QueryOutcome};
use cricket_terminal::state::{
    AppState, CrudEntity, InputMode, MATCH_FIELDS, PLAYER_FIELDS, Page,
};
use cricket_terminal::table::Table;

struct App {
    state: AppState,
    db: Database,
    config: AppConfig,
    live_client: Option<Client>,
    should_quit: bool,
}

impl App {
    fn new(db: Database, config: AppConfig) -> Self {
        let live_client = match http_client::build_client(config.live_timeout) {
            Ok(client) => Some(client),
            Err(err) => {
                log::warn!("live client unavailable: {err:#}");
                None
            }
        };
        let state = AppState::new(
            db.path().to_path_buf(),
            config.sample_csv.clone(),
            config.live_url.clone(),
        );
        Self {
            state,
            db,
            config,
            live_client,
            should_quit: false,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        match self.state.input_mode {
            InputMode::LiveUrl => self.on_live_url_key(key),
            InputMode::Form => self.on_form_key(key),
            InputMode::Normal => self.on_normal_key(key),
        }
    }

    fn on_normal_key(&mut self, key: KeyEvent) {
        if let KeyCode::Char(c) = key.code {
            if let Some(page) = Page::from_digit(c) {
                self.open_page(page);
                return;
            }
        }
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            KeyCode::Esc => self.state.help_overlay = false,
            _ => match self.state.page {
                Page::Home => {}
                Page::LiveMatches => self.on_live_key(key),
                Page::TopPlayerStats => {
                    if matches!(key.code, KeyCode::Char('r')) {
                        self.refresh_top_stats();
                    }
                }
                Page::SqlQueries => self.on_queries_key(key),
                Page::Crud => self.on_crud_key(key),
            },
        }
    }

    fn open_page(&mut self, page: Page) {
        self.state.page = page;
        match page {
            Page::TopPlayerStats if self.state.top_stats.is_none() => self.refresh_top_stats(),
            Page::Crud if self.state.crud_view.is_none() => self.refresh_crud_view(),
            _ => {}
        }
    }

    fn on_live_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('e') => self.state.input_mode = InputMode::LiveUrl,
            KeyCode::Char('f') | KeyCode::Enter => self.fetch_live(),
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next_live(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev_live(),
            _ => {}
        }
    }

    fn on_live_url_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.state.input_mode = InputMode::Normal,
            KeyCode::Enter => {
                self.state.input_mode = InputMode::Normal;
                self.fetch_live();
            }
            KeyCode::Backspace => {
                self.state.live_url.pop();
            }
            KeyCode::Char(c) => self.state.live_url.push(c),
            _ => {}
        }
    }

    fn on_queries_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next_query(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev_query(),
            KeyCode::Char('r') | KeyCode::Enter => self.run_selected_query(),
            KeyCode::Char('x') => self.export_query_result(false),
            KeyCode::Char('X') => self.export_query_result(true),
            _ => {}
        }
    }

    fn on_crud_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('p') => {
                self.state.set_crud_entity(CrudEntity::Players);
                self.refresh_crud_view();
            }
            KeyCode::Char('m') => {
                self.state.set_crud_entity(CrudEntity::Matches);
                self.refresh_crud_view();
            }
            KeyCode::Tab => {
                self.state.set_crud_entity(self.state.crud_entity.toggle());
                self.refresh_crud_view();
            }
            KeyCode::Char('e') => self.state.input_mode = InputMode::Form,
            KeyCode::Char('r') => self.refresh_crud_view(),
            KeyCode::Char('j') | KeyCode::Down => self.state.scroll_crud_down(),
            KeyCode::Char('k') | KeyCode::Up => self.state.scroll_crud_up(),
            _ => {}
        }
    }

    fn on_form_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.state.input_mode = InputMode::Normal,
            KeyCode::Tab | KeyCode::Down => self.state.form_focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.state.form_focus_prev(),
            KeyCode::Left | KeyCode::Right => {
                if self.state.crud_entity == CrudEntity::Matches {
                    self.state.match_form.cycle_choice();
                }
            }
            KeyCode::Backspace => self.state.form_backspace(),
            KeyCode::Enter => self.submit_form(),
            KeyCode::Char(c) => self.state.form_input_char(c),
            _ => {}
        }
    }

    fn fetch_live(&mut self) {
        let url = self.state.live_url.trim().to_string();
        let feed = match (&self.live_client, url.is_empty()) {
            (Some(client), false) => live_feed::fetch_live_matches_with(client, &url),
            _ => live_feed::fetch_live_matches(&url),
        };
        match &feed {
            LiveFeed::Mock(rows) => self
                .state
                .push_log(format!("[INFO] No endpoint set, showing {} mock matches", rows.len())),
            LiveFeed::Remote(_) => self
                .state
                .push_log(format!("[INFO] Live feed fetched from {url}")),
            LiveFeed::Failed { error } => {
                self.state.push_log(format!("[WARN] Error fetching: {error}"))
            }
        }
        self.state.set_live_feed(feed);
    }

    fn refresh_top_stats(&mut self) {
        let stats = queries::top_player_stats(&self.db);
        for (panel, err) in stats.failures() {
            self.state
                .push_log(format!("[WARN] Top {panel} query failed: {err}"));
        }
        self.state.top_stats = Some(stats);
    }

    fn run_selected_query(&mut self) {
        let query = self.state.selected_query();
        let outcome = queries::run_query(&self.db, query.sql);
        match &outcome {
            QueryOutcome::Rows(table) => self.state.push_log(format!(
                "[INFO] Query {} returned {} rows",
                query.id,
                table.rows.len()
            )),
            QueryOutcome::Failed { message } => self
                .state
                .push_log(format!("[WARN] Query {} failed: {message}", query.id)),
        }
        self.state.query_result = Some((query.id, outcome));
        self.state.last_export = None;
    }

    fn export_query_result(&mut self, xlsx: bool) {
        let Some((query_id, QueryOutcome::Rows(table))) = &self.state.query_result else {
            self.state
                .push_log("[INFO] Run a query successfully before exporting");
            return;
        };
        let extension = if xlsx { "xlsx" } else { "csv" };
        let path = export::query_export_path(&self.config.export_dir, *query_id, extension);
        let res = if xlsx {
            export::export_xlsx(table, &format!("query_{query_id}"), &path)
        } else {
            export::export_csv(table, &path)
        };
        match res {
            Ok(()) => {
                self.state
                    .push_log(format!("[INFO] Exported to {}", path.display()));
                self.state.last_export = Some(path);
            }
            Err(err) => self.state.push_log(format!("[WARN] Export failed: {err:#}")),
        }
    }

    fn refresh_crud_view(&mut self) {
        let view = match self.state.crud_entity {
            CrudEntity::Players => {
                crud::recent_players(&self.db).map(|rows| crud::players_table(&rows))
            }
            CrudEntity::Matches => {
                crud::recent_matches(&self.db).map(|rows| crud::matches_table(&rows))
            }
        };
        if let Err(err) = &view {
            self.state.push_log(format!("[WARN] Load failed: {err:#}"));
        }
        self.state.crud_view = Some(view.map_err(|err| format!("{err:#}")));
        self.state.crud_scroll = 0;
    }

    fn submit_form(&mut self) {
        let res = match self.state.crud_entity {
            CrudEntity::Players => {
                let player = self.state.player_form.to_new_player();
                crud::insert_player(&self.db, &player).map(|id| format!("Player {id} created"))
            }
            CrudEntity::Matches => match self.state.match_form.to_new_match() {
                Ok(new_match) => crud::insert_match(&self.db, &new_match)
                    .map(|id| format!("Match {id} created")),
                Err(err) => {
                    self.state.push_log(format!("[WARN] {err}"));
                    return;
                }
            },
        };
        match res {
            Ok(msg) => {
                self.state.push_log(format!("[INFO] {msg}"));
                self.state.input_mode = InputMode::Normal;
                self.refresh_crud_view();
            }
            Err(err) => self.state.push_log(format!("[WARN] Create failed: {err:#}")),
        }
    }
}

fn init_logging(config: &AppConfig) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    let _ = std::fs::create_dir_all(&config.data_dir);
    match File::create(config.log_path()) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        // Raw mode would garble stderr output.
        Err(_) => {
            builder.filter_level(log::LevelFilter::Off);
        }
    }
    let _ = builder.try_init();
}

fn open_database(config: &AppConfig) -> io::Result<Database> {
    Database::open(&config.db_path).map_err(|err| {
        log::error!("database unavailable: {err:#}");
        io::Error::other(format!("{err:#}"))
    })
}

fn main() -> io::Result<()> {
    let config = AppConfig::from_env();
    init_logging(&config);

    let db = open_database(&config)?;
    let outcome = ingest::load_sample_players(&db, &config.sample_csv);
    outcome.log();

    let mut app = App::new(db, config);
    app.state.ingest_summary = Some(outcome.to_string());
    app.state.push_log(format!("[INFO] {outcome}"));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(&app.state))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match app.state.page {
        Page::Home => render_home(frame, chunks[1], &app.state),
        Page::LiveMatches => render_live(frame, chunks[1], &app.state),
        Page::TopPlayerStats => render_top_stats(frame, chunks[1], &app.state),
        Page::SqlQueries => render_queries(frame, chunks[1], &app.state),
        Page::Crud => render_crud(frame, chunks[1], &app.state),
    }

    let console = Paragraph::new(console_text(&app.state))
        .block(Block::default().title("Console").borders(Borders::TOP));
    frame.render_widget(console, chunks[2]);

    let footer = Paragraph::new(footer_text(&app.state)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[3]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let tabs = Page::ALL
        .iter()
        .enumerate()
        .map(|(idx, page)| {
            if *page == state.page {
                format!("[{} {}]", idx + 1, page.label())
            } else {
                format!(" {} {} ", idx + 1, page.label())
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    format!("  CRICKET LEARNING & SQL PRACTICE\n  {tabs}")
}

fn footer_text(state: &AppState) -> String {
    match state.input_mode {
        InputMode::LiveUrl => "Type URL | Enter Fetch | Esc Done".to_string(),
        InputMode::Form => {
            "Tab/↑/↓ Field | ←/→ Cycle choice | Enter Create | Esc Done".to_string()
        }
        InputMode::Normal => match state.page {
            Page::Home => "1-5 Pages | ? Help | q Quit".to_string(),
            Page::LiveMatches => {
                "e Edit URL | f/Enter Fetch | j/k Select match | 1-5 Pages | q Quit".to_string()
            }
            Page::TopPlayerStats => "r Refresh | 1-5 Pages | q Quit".to_string(),
            Page::SqlQueries => {
                "j/k Choose query | r/Enter Run | x Export CSV | X Export XLSX | 1-5 Pages | q Quit"
                    .to_string()
            }
            Page::Crud => {
                "p Players | m Matches | Tab Toggle | e Edit form | r Refresh | j/k Scroll | q Quit"
                    .to_string()
            }
        },
    }
}

fn render_home(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut lines = vec![
        "Project Overview".to_string(),
        String::new(),
        "An educational tool for cricket analytics and SQL practice.".to_string(),
        String::new(),
        format!("Database:   {}", state.db_path.display()),
        format!("Sample CSV: {}", state.sample_csv.display()),
    ];
    if let Some(summary) = &state.ingest_summary {
        lines.push(String::new());
        lines.push(summary.clone());
    }
    lines.push(String::new());
    lines.push("Views:".to_string());
    for (idx, page) in Page::ALL.iter().enumerate() {
        lines.push(format!("  {}  {}", idx + 1, page.label()));
    }
    let home = Paragraph::new(lines.join("\n"))
        .wrap(Wrap { trim: false })
        .block(Block::default().title("Home").borders(Borders::ALL));
    frame.render_widget(home, area);
}

fn render_live(frame: &mut Frame, area: Rect, state: &AppState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    let editing = state.input_mode == InputMode::LiveUrl;
    let url_text = if state.live_url.is_empty() && !editing {
        "(empty: mock data)".to_string()
    } else if editing {
        format!("{}_", state.live_url)
    } else {
        state.live_url.clone()
    };
    let url_style = if editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let url = Paragraph::new(url_text)
        .style(url_style)
        .block(Block::default().title("Live API endpoint (optional)").borders(Borders::ALL));
    frame.render_widget(url, rows[0]);

    let Some(feed) = &state.live_feed else {
        let empty = Paragraph::new("Press f to fetch live matches")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, rows[1]);
        return;
    };
    if let LiveFeed::Failed { error } = feed {
        let err = Paragraph::new(format!("Error fetching: {error}"))
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: false })
            .block(Block::default().title("Live Matches").borders(Borders::ALL));
        frame.render_widget(err, rows[1]);
        return;
    }

    let body = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[1]);
    let table = feed.to_table();
    render_data_table(frame, body[0], "Live Matches", &table, Some(state.live_selected));

    let detail = feed
        .record_json(state.live_selected)
        .unwrap_or_else(|| "No matches".to_string());
    let title = format!("Selected: {}", feed.record_label(state.live_selected));
    let detail = Paragraph::new(detail)
        .wrap(Wrap { trim: false })
        .block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(detail, body[1]);
}

fn render_top_stats(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(stats) = &state.top_stats else {
        let empty = Paragraph::new("Press r to load stats")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    };
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_stat_panel(
        frame,
        cols[0],
        "Top 10 Run-scorers",
        &stats.runs,
        "total_runs",
        Color::Green,
    );
    render_stat_panel(
        frame,
        cols[1],
        "Top 10 Wicket-takers",
        &stats.wickets,
        "total_wickets",
        Color::Red,
    );
}

fn render_stat_panel(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    outcome: &QueryOutcome,
    value_col: &str,
    color: Color,
) {
    let table = match outcome {
        QueryOutcome::Rows(table) => table,
        QueryOutcome::Failed { message } => {
            render_error(frame, area, title, message);
            return;
        }
    };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    render_data_table(frame, rows[0], title, table, None);

    let series = table.series("player", value_col);
    if series.is_empty() {
        return;
    }
    let bars = series
        .iter()
        .map(|(label, value)| {
            Bar::default()
                .label(Line::from(label.clone()))
                .value(value.max(0.0).round() as u64)
                .style(Style::default().fg(color))
        })
        .collect::<Vec<_>>();
    let chart = BarChart::default()
        .block(Block::default().title(value_col.to_string()).borders(Borders::ALL))
        .data(BarGroup::default().bars(&bars))
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0);
    frame.render_widget(chart, rows[1]);
}

fn render_queries(frame: &mut Frame, area: Rect, state: &AppState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(CANNED_QUERIES.len() as u16 + 2),
            Constraint::Length(10),
            Constraint::Min(1),
        ])
        .split(area);

    let picker = CANNED_QUERIES
        .iter()
        .enumerate()
        .map(|(idx, q)| {
            let prefix = if idx == state.query_selected { "> " } else { "  " };
            format!("{prefix}Query {}: {}", q.id, q.title)
        })
        .collect::<Vec<_>>()
        .join("\n");
    let picker =
        Paragraph::new(picker).block(Block::default().title("Choose query").borders(Borders::ALL));
    frame.render_widget(picker, rows[0]);

    let sql = Paragraph::new(state.selected_query().sql.trim().to_string())
        .style(Style::default().fg(Color::Cyan))
        .wrap(Wrap { trim: false })
        .block(Block::default().title("SQL").borders(Borders::ALL));
    frame.render_widget(sql, rows[1]);

    match &state.query_result {
        None => {
            let empty = Paragraph::new("Press r to run the query")
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(empty, rows[2]);
        }
        Some((id, QueryOutcome::Failed { message })) => {
            render_error(frame, rows[2], &format!("Query {id}"), message);
        }
        Some((id, QueryOutcome::Rows(table))) => {
            let title = match &state.last_export {
                Some(path) => format!("Query {id} results (last export: {})", path.display()),
                None => format!("Query {id} results ({} rows)", table.rows.len()),
            };
            render_data_table(frame, rows[2], &title, table, None);
        }
    }
}

fn render_crud(frame: &mut Frame, area: Rect, state: &AppState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(44), Constraint::Min(20)])
        .split(area);

    let editing = state.input_mode == InputMode::Form;
    let (labels, values, focus): (&[&str], Vec<String>, usize) = match state.crud_entity {
        CrudEntity::Players => (
            &PLAYER_FIELDS[..],
            state.player_form.values.to_vec(),
            state.player_form.focus,
        ),
        CrudEntity::Matches => (
            &MATCH_FIELDS[..],
            (0..MATCH_FIELDS.len())
                .map(|idx| state.match_form.field_value(idx))
                .collect(),
            state.match_form.focus,
        ),
    };
    let lines = labels
        .iter()
        .zip(values.iter())
        .enumerate()
        .map(|(idx, (label, value))| {
            let marker = if editing && idx == focus { ">" } else { " " };
            let cursor = if editing && idx == focus { "_" } else { "" };
            format!("{marker} {label:<14} {value}{cursor}")
        })
        .collect::<Vec<_>>()
        .join("\n");
    let form_style = if editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let title = format!("Create new {}", state.crud_entity.singular());
    let form = Paragraph::new(lines)
        .style(form_style)
        .block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(form, cols[0]);

    let title = format!("View {}", state.crud_entity.label());
    match &state.crud_view {
        None => {
            let empty = Paragraph::new("Press r to load rows")
                .block(Block::default().title(title).borders(Borders::ALL));
            frame.render_widget(empty, cols[1]);
        }
        Some(Err(message)) => render_error(frame, cols[1], &title, message),
        Some(Ok(table)) => {
            let visible = Table {
                columns: table.columns.clone(),
                rows: table.rows.iter().skip(state.crud_scroll).cloned().collect(),
            };
            let title = format!("{title} ({} rows)", table.rows.len());
            render_data_table(frame, cols[1], &title, &visible, None);
        }
    }
}

fn render_data_table(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    table: &Table,
    selected: Option<usize>,
) {
    let block = Block::default().title(title.to_string()).borders(Borders::ALL);
    if table.columns.is_empty() {
        frame.render_widget(Paragraph::new("No columns").block(block), area);
        return;
    }
    let widths = table
        .column_widths(28)
        .into_iter()
        .map(|w| Constraint::Length(w as u16))
        .collect::<Vec<_>>();
    let header = Row::new(
        table
            .columns
            .iter()
            .map(|c| TuiCell::from(c.clone()))
            .collect::<Vec<_>>(),
    )
    .style(Style::default().add_modifier(Modifier::BOLD));
    let rows = table.rows.iter().enumerate().map(|(idx, row)| {
        let style = if selected == Some(idx) {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else {
            Style::default()
        };
        Row::new(
            row.iter()
                .map(|cell| {
                    let cell_style = if cell.is_null() {
                        Style::default().fg(Color::DarkGray)
                    } else {
                        Style::default()
                    };
                    TuiCell::from(cell.to_string()).style(cell_style)
                })
                .collect::<Vec<_>>(),
        )
        .style(style)
    });
    let widget = TuiTable::new(rows, widths)
        .header(header)
        .column_spacing(2)
        .block(block);
    frame.render_widget(widget, area);
}

fn render_error(frame: &mut Frame, area: Rect, title: &str, message: &str) {
    let err = Paragraph::new(message.to_string())
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: false })
        .block(Block::default().title(title.to_string()).borders(Borders::ALL));
    frame.render_widget(err, area);
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No messages yet".to_string();
    }
    state
        .logs
        .iter()
        .rev()
        .take(3)
        .cloned()
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Cricket Terminal - Help",
        "",
        "Global:",
        "  1-5          Switch view",
        "  ?            Toggle help",
        "  q            Quit",
        "",
        "Live Matches:",
        "  e            Edit endpoint (empty = mock)",
        "  f / Enter    Fetch",
        "  j/k          Select match",
        "",
        "SQL Queries:",
        "  j/k          Choose query",
        "  r / Enter    Run",
        "  x / X        Export CSV / XLSX",
        "",
        "CRUD:",
        "  p / m / Tab  Players / Matches",
        "  e            Edit form, Enter to create",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
