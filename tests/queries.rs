use chrono::{Duration, NaiveDate, Utc};

use cricket_terminal::crud::{
    self, MatchStatus, MatchType, NewMatch, NewPlayer, NewTeam, NewVenue, PlayerStat,
};
use cricket_terminal::db::Database;
use cricket_terminal::export;
use cricket_terminal::queries::{self, QueryOutcome, canned_query, run_query};
use cricket_terminal::table::Cell;

fn temp_db() -> (tempfile::TempDir, Database) {
    let dir = tempfile::tempdir().expect("tempdir");
    let db = Database::open(dir.path().join("cricket.db")).expect("open db");
    (dir, db)
}

fn player(first: &str, last: &str, country: &str) -> NewPlayer {
    NewPlayer {
        first_name: first.to_string(),
        last_name: last.to_string(),
        country: country.to_string(),
        playing_role: "Batsman".to_string(),
        batting_style: "Right-hand bat".to_string(),
        bowling_style: String::new(),
    }
}

fn stat(player_id: i64, format: MatchType, runs: i64, wickets: i64) -> PlayerStat {
    PlayerStat {
        player_id,
        format,
        matches_played: 10,
        runs,
        wickets,
        centuries: 0,
        batting_average: None,
        bowling_average: None,
        strike_rate: None,
        economy: None,
    }
}

fn fixture_match(description: &str, date: NaiveDate, venue_id: i64) -> NewMatch {
    NewMatch {
        description: description.to_string(),
        team1_id: 1,
        team2_id: 2,
        venue_id,
        match_date: date,
        match_type: MatchType::Odi,
        status: MatchStatus::Completed,
    }
}

#[test]
fn missing_table_is_reported_in_band() {
    let (_dir, db) = temp_db();
    let outcome = run_query(&db, "SELECT * FROM umpires");
    let message = outcome.error().expect("query should fail");
    assert!(message.contains("no such table: umpires"), "message was {message}");
    assert!(!message.starts_with("Error code"), "message was {message}");
    assert!(outcome.table().is_none());
}

#[test]
fn unopenable_database_names_the_file() {
    let (dir, db) = temp_db();
    std::fs::remove_file(dir.path().join("cricket.db")).expect("remove db");

    let outcome = run_query(&db, "SELECT 1");
    let message = outcome.error().expect("open should fail");
    assert!(message.contains("unable to open"), "message was {message}");
    assert!(message.contains("cricket.db"), "message was {message}");
}

#[test]
fn empty_result_is_not_a_failure() {
    let (_dir, db) = temp_db();
    let query = canned_query(1).expect("query 1");
    let QueryOutcome::Rows(table) = run_query(&db, query.sql) else {
        panic!("empty players table should still succeed");
    };
    assert!(table.is_empty());
    assert_eq!(
        table.columns,
        vec!["id", "full_name", "playing_role", "batting_style", "bowling_style"]
    );
}

#[test]
fn runner_refuses_writes() {
    let (_dir, db) = temp_db();
    let outcome = run_query(&db, "DELETE FROM players");
    assert!(outcome.error().is_some());
}

#[test]
fn indian_players_query_filters_by_country() {
    let (_dir, db) = temp_db();
    crud::insert_player(&db, &player("Rohit", "Sharma", "India")).expect("insert");
    crud::insert_player(&db, &player("Steve", "Smith", "Australia")).expect("insert");

    let outcome = run_query(&db, canned_query(1).expect("query 1").sql);
    let table = outcome.table().expect("rows");
    assert_eq!(table.rows.len(), 1);
    assert_eq!(
        table.cell(0, "full_name"),
        Some(&Cell::Text("Rohit Sharma".to_string()))
    );
}

#[test]
fn recent_matches_query_joins_teams_and_venue() {
    let (_dir, db) = temp_db();
    crud::insert_team(
        &db,
        &NewTeam {
            name: "India".to_string(),
            country: "India".to_string(),
        },
    )
    .expect("team");
    crud::insert_team(
        &db,
        &NewTeam {
            name: "Australia".to_string(),
            country: "Australia".to_string(),
        },
    )
    .expect("team");
    let venue = crud::insert_venue(
        &db,
        &NewVenue {
            name: "Eden Gardens".to_string(),
            city: "Kolkata".to_string(),
            country: "India".to_string(),
            capacity: Some(68_000),
        },
    )
    .expect("venue");

    let today = Utc::now().date_naive();
    crud::insert_match(&db, &fixture_match("Old series", today - Duration::days(90), venue))
        .expect("old match");
    crud::insert_match(&db, &fixture_match("Last week", today - Duration::days(7), venue))
        .expect("recent match");
    crud::insert_match(&db, &fixture_match("Today", today, venue)).expect("today match");
    // Dangling venue reference drops out of the inner join.
    crud::insert_match(&db, &fixture_match("Nowhere", today, 99)).expect("dangling match");

    let outcome = run_query(&db, canned_query(2).expect("query 2").sql);
    let table = outcome.table().expect("rows");
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.cell(0, "description"), Some(&Cell::Text("Today".to_string())));
    assert_eq!(table.cell(1, "description"), Some(&Cell::Text("Last week".to_string())));
    assert_eq!(table.cell(0, "team2"), Some(&Cell::Text("Australia".to_string())));
    assert_eq!(table.cell(0, "city"), Some(&Cell::Text("Kolkata".to_string())));
}

#[test]
fn top_stats_sum_across_formats() {
    let (_dir, db) = temp_db();
    let kohli = crud::insert_player(&db, &player("Virat", "Kohli", "India")).expect("insert");
    let bumrah = crud::insert_player(&db, &player("Jasprit", "Bumrah", "India")).expect("insert");
    crud::insert_player_stat(&db, &stat(kohli, MatchType::Test, 8_848, 0)).expect("stat");
    crud::insert_player_stat(&db, &stat(kohli, MatchType::Odi, 13_906, 5)).expect("stat");
    crud::insert_player_stat(&db, &stat(bumrah, MatchType::Test, 250, 159)).expect("stat");
    crud::insert_player_stat(&db, &stat(bumrah, MatchType::T20i, 8, 89)).expect("stat");

    let stats = queries::top_player_stats(&db);
    let runs = stats.runs.table().expect("runs table");
    assert_eq!(runs.series("player", "total_runs")[0], ("Virat Kohli".to_string(), 22_754.0));

    let wickets = stats.wickets.table().expect("wickets table");
    assert_eq!(wickets.cell(0, "player"), Some(&Cell::Text("Jasprit Bumrah".to_string())));
    assert_eq!(wickets.cell(0, "total_wickets"), Some(&Cell::Integer(248)));
}

#[test]
fn failing_wickets_query_is_reported_alongside_runs() {
    let (_dir, db) = temp_db();
    let kohli = crud::insert_player(&db, &player("Virat", "Kohli", "India")).expect("insert");
    crud::insert_player_stat(&db, &stat(kohli, MatchType::Test, 8_848, 0)).expect("stat");
    db.connect()
        .expect("connect")
        .execute_batch("ALTER TABLE player_stats DROP COLUMN wickets")
        .expect("drop wickets column");

    let stats = queries::top_player_stats(&db);
    assert!(stats.runs.table().is_some());
    let failures = stats.failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].0, "wickets");
    assert!(failures[0].1.contains("no such column"), "message was {}", failures[0].1);
}

#[test]
fn query_result_exports_with_header() {
    let (dir, db) = temp_db();
    crud::insert_player(&db, &player("Rohit", "Sharma", "India")).expect("insert");
    let table = run_query(&db, canned_query(1).expect("query 1").sql)
        .table()
        .cloned()
        .expect("rows");

    let path = export::query_export_path(dir.path(), 1, "csv");
    export::export_csv(&table, &path).expect("export");
    let text = std::fs::read_to_string(&path).expect("read export");
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("id,full_name,playing_role,batting_style,bowling_style")
    );
    assert_eq!(lines.next(), Some("1,Rohit Sharma,Batsman,Right-hand bat,"));
    assert!(path.ends_with("query_1_results.csv"));
}
